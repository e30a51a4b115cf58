//! # Live HTTP Gateway
//!
//! The gateway is served on an ephemeral local port and the client reaches
//! it through `HttpTransport`, once with a GET template and once via POST.

#[cfg(test)]
mod tests {
    use std::net::SocketAddr;
    use std::sync::Arc;

    use tokio::net::TcpListener;
    use tokio::sync::oneshot;

    use ccip_client::{CcipReadClient, ClientConfig, ClientError, HttpTransport, TransportError};
    use ccip_gateway::{GatewayConfig, GatewayServer, GatewayService};
    use ccip_resolver::OffchainResolverApi;

    use crate::fixtures::*;

    struct RunningGateway {
        addr: SocketAddr,
        shutdown: Option<oneshot::Sender<()>>,
        handle: tokio::task::JoinHandle<()>,
    }

    impl RunningGateway {
        async fn start(service: Arc<GatewayService>) -> Self {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            let addr = listener.local_addr().unwrap();
            let (tx, rx) = oneshot::channel::<()>();
            let server = GatewayServer::new(GatewayConfig::default(), service).unwrap();

            let handle = tokio::spawn(async move {
                server
                    .serve_on(listener, async move {
                        let _ = rx.await;
                    })
                    .await
                    .unwrap();
            });

            Self {
                addr,
                shutdown: Some(tx),
                handle,
            }
        }

        async fn stop(mut self) {
            if let Some(tx) = self.shutdown.take() {
                let _ = tx.send(());
            }
            self.handle.await.unwrap();
        }
    }

    fn http_client() -> CcipReadClient {
        let config = ClientConfig::default();
        let transport = Arc::new(HttpTransport::new(&config).unwrap());
        CcipReadClient::new(transport, config).unwrap()
    }

    #[tokio::test]
    async fn test_get_template_round_trip() {
        let d = Deployment::new();
        d.add_record("ducks.eth", addr_call(), vec![0x42; 32]);
        let gateway = RunningGateway::start(d.gateway.clone()).await;
        d.resolver
            .set_url(OWNER, format!("http://{}/{{sender}}/{{data}}.json", gateway.addr))
            .unwrap();

        let result = http_client()
            .resolve(&*d.resolver, OWNER, "ducks.eth", &addr_call())
            .await
            .unwrap();

        assert_eq!(result, vec![0x42; 32]);
        gateway.stop().await;
    }

    #[tokio::test]
    async fn test_post_round_trip() {
        let d = Deployment::new();
        d.add_record("ducks.eth", addr_call(), vec![0x07]);
        let gateway = RunningGateway::start(d.gateway.clone()).await;
        d.resolver
            .set_url(OWNER, format!("http://{}/", gateway.addr))
            .unwrap();

        let result = http_client()
            .resolve(&*d.resolver, OWNER, "ducks.eth", &addr_call())
            .await
            .unwrap();

        assert_eq!(result, vec![0x07]);
        gateway.stop().await;
    }

    #[tokio::test]
    async fn test_missing_record_is_client_error() {
        let d = Deployment::new();
        let gateway = RunningGateway::start(d.gateway.clone()).await;
        d.resolver
            .set_url(OWNER, format!("http://{}/{{sender}}/{{data}}.json", gateway.addr))
            .unwrap();

        let err = http_client()
            .resolve(&*d.resolver, OWNER, "nobody.eth", &addr_call())
            .await
            .unwrap_err();

        match err {
            ClientError::Rejected {
                source: TransportError::Status { status, message },
                ..
            } => {
                assert_eq!(status, 404);
                assert!(message.contains("nobody.eth"));
            }
            other => panic!("unexpected error: {other}"),
        }
        gateway.stop().await;
    }

    #[tokio::test]
    async fn test_unreachable_gateway_exhausts() {
        let d = Deployment::new();
        // Bind then drop to get a port nobody listens on.
        let addr = TcpListener::bind("127.0.0.1:0")
            .await
            .unwrap()
            .local_addr()
            .unwrap();
        d.resolver
            .set_url(OWNER, format!("http://{addr}/{{sender}}/{{data}}.json"))
            .unwrap();

        let err = http_client()
            .resolve(&*d.resolver, OWNER, "ducks.eth", &addr_call())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ClientError::GatewaysExhausted(TransportError::Network(_))
        ));
    }
}
