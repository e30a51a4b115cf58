//! ## Attack Surface
//!
//! | Attack | Expected |
//! |--------|----------|
//! | Swap `extraData` for another name | InvalidSigner |
//! | Replay to a different resolver | InvalidSigner |
//! | Edit the result | InvalidSigner |
//! | Extend `expires` | InvalidSigner |
//! | Truncate the response | MalformedResponse |
//! | Replay after expiry | Expired |

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use proptest::prelude::*;

    use ccip_resolver::adapters::{InMemoryEventLog, InMemoryRootDelegate, ManualClock};
    use ccip_resolver::{
        dns_encode, DeferredRequest, OffchainResolverApi, OffchainResolverService,
        ResolverConfig, ResolverError, SignedResponse,
    };
    use shared_types::{Address, Bytes};

    use crate::fixtures::*;

    /// A signed gateway answer for `ducks.eth` together with its request.
    async fn captured(d: &Deployment) -> (Bytes, DeferredRequest) {
        d.add_record("ducks.eth", addr_call(), vec![0x42; 32]);
        d.add_record("geese.eth", addr_call(), vec![0x24; 32]);
        let request = DeferredRequest::new(RESOLVER, dns_encode("ducks.eth").unwrap(), addr_call());
        let response = d
            .gateway
            .handle(RESOLVER, &request.call_data())
            .await
            .unwrap();
        (response, request)
    }

    #[tokio::test]
    async fn test_baseline_accepted() {
        let d = Deployment::new();
        let (response, request) = captured(&d).await;
        assert_eq!(
            d.resolver
                .resolve_with_proof(&response, &request.extra_data())
                .unwrap(),
            vec![0x42; 32]
        );
    }

    #[tokio::test]
    async fn test_extra_data_substitution() {
        let d = Deployment::new();
        let (response, _) = captured(&d).await;
        let other = DeferredRequest::new(RESOLVER, dns_encode("geese.eth").unwrap(), addr_call());

        let err = d
            .resolver
            .resolve_with_proof(&response, &other.extra_data())
            .unwrap_err();
        assert!(matches!(err, ResolverError::InvalidSigner { .. }));
    }

    #[tokio::test]
    async fn test_inner_call_substitution() {
        let d = Deployment::new();
        let (response, request) = captured(&d).await;
        let mut data = addr_call();
        data[4] ^= 0x01;
        let other = DeferredRequest::new(RESOLVER, request.name.clone(), data);

        assert!(matches!(
            d.resolver.resolve_with_proof(&response, &other.extra_data()),
            Err(ResolverError::InvalidSigner { .. })
        ));
    }

    #[tokio::test]
    async fn test_cross_resolver_replay() {
        let d = Deployment::new();
        let (response, request) = captured(&d).await;

        // A second resolver trusting the same gateway key.
        let twin = OffchainResolverService::new(
            ResolverConfig {
                address: Address::new([0xbb; 20]),
                gateway_url: GATEWAY_URL.into(),
                root_name: String::new(),
                owner: OWNER,
                signers: vec![d.gateway.signer_address()],
            },
            Arc::new(InMemoryRootDelegate::new(ROOT_DELEGATE)),
            Arc::new(InMemoryEventLog::new()),
            Arc::new(ManualClock::new(NOW)),
        )
        .unwrap();

        assert!(matches!(
            twin.resolve_with_proof(&response, &request.extra_data()),
            Err(ResolverError::InvalidSigner { .. })
        ));
    }

    #[tokio::test]
    async fn test_result_tampering() {
        let d = Deployment::new();
        let (response, request) = captured(&d).await;
        let mut signed = SignedResponse::decode(&response).unwrap();
        signed.result[0] ^= 0xff;

        assert!(matches!(
            d.resolver
                .resolve_with_proof(&signed.encode(), &request.extra_data()),
            Err(ResolverError::InvalidSigner { .. })
        ));
    }

    #[tokio::test]
    async fn test_expiry_extension() {
        let d = Deployment::new();
        let (response, request) = captured(&d).await;
        let mut signed = SignedResponse::decode(&response).unwrap();
        signed.expires += 3_600;

        assert!(matches!(
            d.resolver
                .resolve_with_proof(&signed.encode(), &request.extra_data()),
            Err(ResolverError::InvalidSigner { .. })
        ));
    }

    #[tokio::test]
    async fn test_truncated_response() {
        let d = Deployment::new();
        let (response, request) = captured(&d).await;

        assert!(matches!(
            d.resolver
                .resolve_with_proof(&response[..response.len() - 1], &request.extra_data()),
            Err(ResolverError::MalformedResponse(_))
        ));
    }

    #[tokio::test]
    async fn test_replay_after_expiry() {
        let d = Deployment::new();
        let (response, request) = captured(&d).await;
        d.clock.advance(TTL + 1);

        assert!(matches!(
            d.resolver
                .resolve_with_proof(&response, &request.extra_data()),
            Err(ResolverError::Expired { .. })
        ));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        /// Flipping any single byte of a signed response never yields an accepted
        /// answer with a different result.
        #[test]
        fn prop_bit_flip_never_forges(index in 0usize..448, mask in 1u8..=255) {
            let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
            let d = Deployment::new();
            let (response, request) = runtime.block_on(captured(&d));
            let mut forged = response.clone();
            let index = index % forged.len();
            forged[index] ^= mask;

            if let Ok(result) = d.resolver.resolve_with_proof(&forged, &request.extra_data()) {
                prop_assert_eq!(result, vec![0x42; 32]);
            }
        }
    }
}
