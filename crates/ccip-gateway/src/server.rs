//! HTTP surface of the gateway.
//!
//! ## Routes
//!
//! | Method | Path | Body | Response |
//! |--------|------|------|----------|
//! | GET | `/{sender}/{data}` (optional `.json`) | - | `{ "data": "0x…" }` |
//! | POST | `/` | `{ "sender": "0x…", "data": "0x…" }` | `{ "data": "0x…" }` |
//! | GET | `/health` | - | status, signer, version |
//!
//! Errors are `{ "message": "…" }` with 400, 404 or 500.

use crate::domain::config::GatewayConfig;
use crate::domain::error::{GatewayError, GatewayResult};
use crate::middleware::{create_cors_layer, TracingLayer};
use crate::service::GatewayService;
use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use shared_types::{decode_hex, Address, Bytes};
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::timeout::TimeoutLayer;
use tracing::{info, warn};

/// POST body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupRequest {
    /// Resolver address (hex)
    pub sender: String,
    /// Call data (hex)
    pub data: String,
}

/// Success body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupResponse {
    /// ABI-encoded signed response
    #[serde(with = "shared_types::hex_bytes")]
    pub data: Bytes,
}

/// Application state shared across handlers
#[derive(Clone)]
struct AppState {
    service: Arc<GatewayService>,
}

/// HTTP server hosting a [`GatewayService`].
pub struct GatewayServer {
    config: GatewayConfig,
    service: Arc<GatewayService>,
}

impl GatewayServer {
    /// Create a server; the configuration is validated here.
    pub fn new(config: GatewayConfig, service: Arc<GatewayService>) -> GatewayResult<Self> {
        config
            .validate()
            .map_err(|e| GatewayError::Config(e.to_string()))?;
        Ok(Self { config, service })
    }

    /// Build the router with its middleware stack
    pub fn router(&self) -> Router {
        build_router(Arc::clone(&self.service), &self.config)
    }

    /// Bind the configured address and serve until `shutdown` resolves.
    pub async fn serve<F>(self, shutdown: F) -> GatewayResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = self.config.http_addr();
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| GatewayError::Server(format!("bind {addr}: {e}")))?;
        self.serve_on(listener, shutdown).await
    }

    /// Serve on an already-bound listener until `shutdown` resolves.
    pub async fn serve_on<F>(self, listener: TcpListener, shutdown: F) -> GatewayResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let local = listener
            .local_addr()
            .map_err(|e| GatewayError::Server(e.to_string()))?;
        info!(
            addr = %local,
            signer = %self.service.signer_address(),
            ttl_secs = self.service.ttl_secs(),
            "Starting gateway HTTP server"
        );

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| GatewayError::Server(e.to_string()))?;

        info!("Gateway stopped");
        Ok(())
    }
}

/// Build the gateway router
pub fn build_router(service: Arc<GatewayService>, config: &GatewayConfig) -> Router {
    let middleware = ServiceBuilder::new()
        .layer(create_cors_layer(&config.cors))
        .layer(TracingLayer::new())
        .layer(TimeoutLayer::new(config.timeouts.request()));

    Router::new()
        .route("/", post(handle_post))
        .route("/health", get(health_check))
        .route("/:sender/:data", get(handle_get))
        .layer(middleware)
        .with_state(AppState { service })
}

/// `GET /{sender}/{data}[.json]`
async fn handle_get(
    State(state): State<AppState>,
    Path((sender, data)): Path<(String, String)>,
) -> GatewayResult<Json<LookupResponse>> {
    let data = data.strip_suffix(".json").unwrap_or(&data);
    answer(&state, &sender, data).await
}

/// `POST /` with a JSON body
async fn handle_post(
    State(state): State<AppState>,
    body: String,
) -> GatewayResult<Json<LookupResponse>> {
    let request: LookupRequest = serde_json::from_str(&body)
        .map_err(|e| GatewayError::InvalidCallData(format!("request body: {e}")))?;
    answer(&state, &request.sender, &request.data).await
}

async fn answer(state: &AppState, sender: &str, data: &str) -> GatewayResult<Json<LookupResponse>> {
    let sender: Address = sender
        .parse()
        .map_err(|_| GatewayError::InvalidSender(sender.to_string()))?;
    let call_data = decode_hex(data).map_err(|e| GatewayError::InvalidCallData(e.to_string()))?;

    match state.service.handle(sender, &call_data).await {
        Ok(data) => Ok(Json(LookupResponse { data })),
        Err(e) => {
            warn!(%sender, error = %e, "Lookup failed");
            Err(e)
        }
    }
}

/// Health check endpoint
async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "signer": state.service.signer_address(),
        "version": crate::VERSION,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryRecordSource;
    use crate::domain::error::ErrorBody;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use ccip_resolver::adapters::ManualClock;
    use ccip_resolver::{dns_encode, DeferredRequest, SignedResponse};
    use shared_crypto::Secp256k1KeyPair;
    use shared_types::encode_hex;
    use tower::ServiceExt;

    const RESOLVER: Address = Address::new([0xaa; 20]);

    fn router() -> Router {
        let records = InMemoryRecordSource::new();
        records.insert(dns_encode("test.eth").unwrap(), vec![0x3b, 0x3b, 0x57, 0xde], vec![7; 32]);
        let service = Arc::new(GatewayService::new(
            Secp256k1KeyPair::generate(),
            Arc::new(records),
            Arc::new(ManualClock::new(1_000)),
            60,
        ));
        build_router(service, &GatewayConfig::default())
    }

    fn call_data(name: &str) -> Bytes {
        DeferredRequest::new(RESOLVER, dns_encode(name).unwrap(), vec![0x3b, 0x3b, 0x57, 0xde])
            .call_data()
    }

    async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
        axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec()
    }

    #[tokio::test]
    async fn test_get_with_json_suffix() {
        let uri = format!("/{}/{}.json", RESOLVER, encode_hex(&call_data("test.eth")));
        let response = router()
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body: LookupResponse = serde_json::from_slice(&body_bytes(response).await).unwrap();
        let signed = SignedResponse::decode(&body.data).unwrap();
        assert_eq!(signed.result, vec![7; 32]);
        assert_eq!(signed.expires, 1_060);
    }

    #[tokio::test]
    async fn test_post() {
        let request = LookupRequest {
            sender: RESOLVER.to_string(),
            data: encode_hex(&call_data("test.eth")),
        };
        let response = router()
            .oneshot(
                Request::post("/")
                    .header("content-type", "application/json")
                    .body(Body::from(serde_json::to_vec(&request).unwrap()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_missing_record_is_404() {
        let uri = format!("/{}/{}", RESOLVER, encode_hex(&call_data("nope.eth")));
        let response = router()
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body: ErrorBody = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert!(body.message.contains("nope.eth"));
    }

    #[tokio::test]
    async fn test_bad_sender_is_400() {
        let uri = format!("/0x1234/{}", encode_hex(&call_data("test.eth")));
        let response = router()
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_bad_post_body_is_400() {
        let response = router()
            .oneshot(Request::post("/").body(Body::from("{not json")).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_health() {
        let response = router()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body: serde_json::Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(body["status"], "ok");
    }

    #[test]
    fn test_server_rejects_invalid_config() {
        let mut config = GatewayConfig::default();
        config.signing.ttl_secs = 0;
        let service = Arc::new(GatewayService::new(
            Secp256k1KeyPair::generate(),
            Arc::new(InMemoryRecordSource::new()),
            Arc::new(ManualClock::new(0)),
            0,
        ));
        assert!(matches!(
            GatewayServer::new(config, service),
            Err(GatewayError::Config(_))
        ));
    }
}
