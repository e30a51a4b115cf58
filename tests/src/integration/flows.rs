//! # End-to-End Lookup Flows
//!
//! A client resolves names against a resolver whose gateway runs in-process.
//!
//! ## Flow Tested:
//!
//! 1. **Root name**: answered by the root delegate, no gateway traffic
//! 2. **Other names**: `OffchainLookup` → gateway → `resolveWithProof`
//! 3. **Rejections**: unregistered signer, stale answer, missing record
//! 4. **Administration**: owner-only setters observed through the ABI surface

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use ccip_client::{ClientError, TransportError};
    use ccip_resolver::adapters::ManualClock;
    use ccip_resolver::domain::abi::encode_with_selector;
    use ccip_resolver::domain::errors::error_string;
    use ccip_resolver::{
        dns_encode, selectors, CallOutcome, DeferredRequest, OffchainResolverApi, Resolution,
        ResolverEvent, RevertPayload, Token,
    };
    use shared_crypto::Secp256k1KeyPair;
    use shared_types::{Address, Selector};

    use crate::fixtures::*;

    fn assert_reverted_with(err: ClientError, reason: &str) {
        match err {
            ClientError::Reverted(payload) => {
                assert_eq!(payload.as_bytes(), error_string(reason).as_slice())
            }
            other => panic!("expected revert '{reason}', got {other}"),
        }
    }

    // =============================================================================
    // DIRECT AND DEFERRED RESOLUTION
    // =============================================================================

    #[tokio::test]
    async fn test_root_name_resolved_directly() {
        let d = Deployment::new();
        d.root.set_record(vec![0], addr_call(), vec![0xab]);
        let (client, transport) = d.client();

        let result = client
            .resolve(&*d.resolver, OWNER, "", &addr_call())
            .await
            .unwrap();

        assert_eq!(result, vec![0xab]);
        assert!(transport.calls().is_empty());
    }

    #[tokio::test]
    async fn test_redirect_carries_configured_gateway() {
        let d = Deployment::new();
        let name = dns_encode("ducks.eth").unwrap();

        let Ok(Resolution::Redirect(lookup)) = d.resolver.resolve(&name, &addr_call()) else {
            panic!("expected a redirect");
        };
        let request = DeferredRequest::new(RESOLVER, name, addr_call());

        assert_eq!(lookup.sender, RESOLVER);
        assert_eq!(lookup.urls, vec![GATEWAY_URL.to_string()]);
        assert_eq!(lookup.call_data, request.call_data());
        assert_eq!(lookup.extra_data, request.extra_data());
        assert_eq!(lookup.callback_function, selectors::RESOLVE_WITH_PROOF);
    }

    #[tokio::test]
    async fn test_offchain_name_resolved_through_gateway() {
        let d = Deployment::new();
        d.add_record("ducks.eth", addr_call(), vec![0x42; 32]);
        let (client, transport) = d.client();

        let result = client
            .resolve(&*d.resolver, OWNER, "ducks.eth", &addr_call())
            .await
            .unwrap();

        assert_eq!(result, vec![0x42; 32]);
        assert_eq!(transport.calls(), vec![GATEWAY_URL.to_string()]);
    }

    #[tokio::test]
    async fn test_subdomains_are_deferred_too() {
        let d = Deployment::new();
        d.add_record("a.b.ducks.eth", addr_call(), vec![0x01]);
        let (client, _) = d.client();

        let result = client
            .resolve(&*d.resolver, OWNER, "a.b.ducks.eth", &addr_call())
            .await
            .unwrap();
        assert_eq!(result, vec![0x01]);
    }

    #[tokio::test]
    async fn test_missing_record_stops_at_gateway() {
        let d = Deployment::new();
        let (client, transport) = d.client();

        let err = client
            .resolve(&*d.resolver, OWNER, "nobody.eth", &addr_call())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ClientError::Rejected {
                source: TransportError::Status { status: 404, .. },
                ..
            }
        ));
        assert_eq!(transport.calls().len(), 1);
    }

    // =============================================================================
    // PROOF REJECTION
    // =============================================================================

    #[tokio::test]
    async fn test_unregistered_gateway_key_rejected() {
        let d = Deployment::new();
        d.add_record("ducks.eth", addr_call(), vec![0x42; 32]);
        let rogue = d.rogue_gateway(Secp256k1KeyPair::generate(), d.clock.clone());
        let (client, _) = Deployment::client_for(rogue);

        let err = client
            .resolve(&*d.resolver, OWNER, "ducks.eth", &addr_call())
            .await
            .unwrap_err();
        assert_reverted_with(err, "SignatureVerifier: Invalid signature");
    }

    #[tokio::test]
    async fn test_stale_answer_rejected_even_from_registered_signer() {
        let secret = [0x5a; 32];
        let d = Deployment::with_key(Secp256k1KeyPair::from_bytes(secret).unwrap());
        d.add_record("ducks.eth", addr_call(), vec![0x42; 32]);

        // Same registered key, but the gateway's clock lags past the TTL.
        let lagging = Arc::new(ManualClock::new(NOW - TTL - 1));
        let stale = d.rogue_gateway(Secp256k1KeyPair::from_bytes(secret).unwrap(), lagging);
        let (client, _) = Deployment::client_for(stale);

        let err = client
            .resolve(&*d.resolver, OWNER, "ducks.eth", &addr_call())
            .await
            .unwrap_err();
        assert_reverted_with(err, "SignatureVerifier: Signature expired");
    }

    #[tokio::test]
    async fn test_answer_valid_until_expiry_inclusive() {
        let d = Deployment::new();
        d.add_record("ducks.eth", addr_call(), vec![0x42; 32]);
        let name = dns_encode("ducks.eth").unwrap();
        let request = DeferredRequest::new(RESOLVER, name, addr_call());

        let response = d
            .gateway
            .handle(RESOLVER, &request.call_data())
            .await
            .unwrap();

        d.clock.advance(TTL);
        assert!(d
            .resolver
            .resolve_with_proof(&response, &request.extra_data())
            .is_ok());

        d.clock.advance(1);
        assert!(d
            .resolver
            .resolve_with_proof(&response, &request.extra_data())
            .is_err());
    }

    #[tokio::test]
    async fn test_removed_signer_invalidates_gateway() {
        let d = Deployment::new();
        d.add_record("ducks.eth", addr_call(), vec![0x42; 32]);
        let signer = d.gateway.signer_address();
        let (client, _) = d.client();

        assert!(client
            .resolve(&*d.resolver, OWNER, "ducks.eth", &addr_call())
            .await
            .is_ok());

        d.resolver.remove_signer(OWNER, signer).unwrap();
        let err = client
            .resolve(&*d.resolver, OWNER, "ducks.eth", &addr_call())
            .await
            .unwrap_err();
        assert_reverted_with(err, "SignatureVerifier: Invalid signature");
    }

    #[tokio::test]
    async fn test_rotated_signer_accepted_after_add() {
        let d = Deployment::new();
        d.add_record("ducks.eth", addr_call(), vec![0x42; 32]);
        let new_key = Secp256k1KeyPair::generate();
        let new_signer = new_key.address();
        let rotated = d.rogue_gateway(new_key, d.clock.clone());
        let (client, _) = Deployment::client_for(rotated);

        assert!(client
            .resolve(&*d.resolver, OWNER, "ducks.eth", &addr_call())
            .await
            .is_err());

        d.resolver.add_signers(OWNER, &[new_signer]).unwrap();
        let result = client
            .resolve(&*d.resolver, OWNER, "ducks.eth", &addr_call())
            .await
            .unwrap();
        assert_eq!(result, vec![0x42; 32]);
    }

    // =============================================================================
    // ADMINISTRATION THROUGH THE ABI SURFACE
    // =============================================================================

    #[tokio::test]
    async fn test_non_owner_cannot_change_url() {
        let d = Deployment::new();
        let (client, _) = d.client();
        let call = encode_with_selector(
            selectors::SET_URL,
            &[Token::String("https://evil.test/{data}".into())],
        );

        let err = client
            .call(&*d.resolver, Address::new([0x66; 20]), &call)
            .await
            .unwrap_err();

        assert_reverted_with(err, "Ownable: caller is not the owner");
        assert_eq!(d.resolver.url(), GATEWAY_URL);
    }

    #[tokio::test]
    async fn test_owner_url_change_redirects_elsewhere() {
        let d = Deployment::new();
        d.add_record("ducks.eth", addr_call(), vec![0x42; 32]);
        let (client, transport) = d.client();
        let new_url = "https://other.test/{sender}/{data}.json";

        let call = encode_with_selector(selectors::SET_URL, &[Token::String(new_url.into())]);
        client.call(&*d.resolver, OWNER, &call).await.unwrap();

        client
            .resolve(&*d.resolver, OWNER, "ducks.eth", &addr_call())
            .await
            .unwrap();
        assert_eq!(transport.calls(), vec![new_url.to_string()]);
        assert_eq!(
            d.events.last(),
            Some(ResolverEvent::UrlSet {
                url: new_url.to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_add_signers_twice_is_idempotent() {
        let d = Deployment::new();
        let extra = Address::new([0x33; 20]);
        let call = encode_with_selector(
            selectors::ADD_SIGNERS,
            &[Token::Array(vec![Token::Address(extra)])],
        );

        d.resolver.dispatch(OWNER, &call);
        let after_first = d.resolver.snapshot();
        d.resolver.dispatch(OWNER, &call);

        assert_eq!(d.resolver.snapshot(), after_first);
        assert!(d.resolver.is_signer(&extra));
    }

    #[tokio::test]
    async fn test_removing_absent_signer_is_silent() {
        let d = Deployment::new();
        let before = d.events.len();
        let call = encode_with_selector(
            selectors::REMOVE_SIGNER,
            &[Token::Address(Address::new([0x44; 20]))],
        );

        assert!(d.resolver.dispatch(OWNER, &call).is_return());
        assert_eq!(d.events.len(), before);
    }

    // =============================================================================
    // DELEGATION SHIM
    // =============================================================================

    #[tokio::test]
    async fn test_unknown_call_forwarded_and_failure_propagated() {
        let d = Deployment::new();
        let text_selector = Selector::new([0x59, 0xd1, 0xd4, 0x3c]);
        let failure = RevertPayload::new(vec![0xde, 0xad, 0xbe, 0xef, 0x01]);
        d.root.set_call_response(text_selector, Err(failure.clone()));
        let (client, _) = d.client();

        let mut call = text_selector.as_bytes().to_vec();
        call.extend_from_slice(&[0u8; 64]);
        let err = client.call(&*d.resolver, OWNER, &call).await.unwrap_err();

        match err {
            ClientError::Reverted(payload) => assert_eq!(payload, failure),
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(d.root.forwarded(), vec![call]);
    }

    #[tokio::test]
    async fn test_unknown_call_forwarded_and_answer_returned() {
        let d = Deployment::new();
        let selector = Selector::new([0x01, 0x02, 0x03, 0x04]);
        d.root.set_call_response(selector, Ok(vec![0x77; 32]));

        let outcome = d.resolver.dispatch(OWNER, selector.as_bytes());
        assert_eq!(outcome, CallOutcome::Return(vec![0x77; 32]));
    }

    #[tokio::test]
    async fn test_interface_detection() {
        let d = Deployment::new();
        let call = encode_with_selector(
            selectors::SUPPORTS_INTERFACE,
            &[Token::FixedBytes(
                selectors::EXTENDED_RESOLVER_INTERFACE.as_bytes().to_vec(),
            )],
        );
        let outcome = d.resolver.dispatch(OWNER, &call);

        let mut expected = vec![0u8; 32];
        expected[31] = 1;
        assert_eq!(outcome, CallOutcome::Return(expected));
    }
}
