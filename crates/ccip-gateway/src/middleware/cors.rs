//! CORS middleware.
//!
//! Wrapper around tower-http CORS with gateway configuration.

use crate::domain::config::CorsConfig;
use axum::http::{header, Method};
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};

/// Create CORS layer from gateway config
pub fn create_cors_layer(config: &CorsConfig) -> CorsLayer {
    if !config.enabled {
        // No CORS headers: same-origin callers only
        return CorsLayer::new();
    }

    let mut cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .max_age(Duration::from_secs(config.max_age));

    if config.allowed_origins.iter().any(|o| o == "*") {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<_> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors = cors.allow_origin(origins);
    }

    cors
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Smoke test: the layer is opaque, so only construction is checked.
    #[test]
    fn test_default_cors_config() {
        let config = CorsConfig::default();
        let layer = create_cors_layer(&config);
        assert!(config.enabled);
        drop(layer);
    }

    #[test]
    fn test_specific_origins() {
        let config = CorsConfig {
            enabled: true,
            allowed_origins: vec!["https://app.example.com".to_string(), "not a url\n".to_string()],
            max_age: 60,
        };
        drop(create_cors_layer(&config));
    }
}
