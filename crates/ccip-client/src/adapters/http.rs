//! reqwest-backed gateway transport.
//!
//! URL templates containing `{data}` are fetched with GET after substituting
//! `{sender}` and `{data}`; any other URL receives a POST of
//! `{ "data": "0x…", "sender": "0x…" }`.

use crate::domain::{ClientConfig, ClientError, TransportError};
use crate::ports::GatewayTransport;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use shared_types::{encode_hex, Address, Bytes};
use tracing::debug;

#[derive(Serialize)]
struct PostBody {
    data: String,
    sender: String,
}

#[derive(Deserialize)]
struct SuccessBody {
    #[serde(with = "shared_types::hex_bytes")]
    data: Bytes,
}

#[derive(Deserialize)]
struct FailureBody {
    message: String,
}

/// HTTP transport for gateway lookups.
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Create a new HTTP transport.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .build()?;
        Ok(Self { client })
    }
}

/// Substitutes `{sender}` and `{data}` in a GET template.
pub fn expand_url(template: &str, sender: Address, call_data: &[u8]) -> String {
    template
        .replace("{sender}", &sender.to_string())
        .replace("{data}", &encode_hex(call_data))
}

#[async_trait]
impl GatewayTransport for HttpTransport {
    async fn fetch(
        &self,
        url: &str,
        sender: Address,
        call_data: &[u8],
    ) -> Result<Bytes, TransportError> {
        let request = if url.contains("{data}") {
            self.client.get(expand_url(url, sender, call_data))
        } else {
            self.client.post(url).json(&PostBody {
                data: encode_hex(call_data),
                sender: sender.to_string(),
            })
        };

        let response = request
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let status = response.status();
        debug!(url, status = status.as_u16(), "[ccip-client] gateway answered");

        if !status.is_success() {
            let message = match response.json::<FailureBody>().await {
                Ok(body) => body.message,
                Err(_) => status.to_string(),
            };
            return Err(TransportError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let body: SuccessBody = response
            .json()
            .await
            .map_err(|e| TransportError::InvalidBody(e.to_string()))?;
        Ok(body.data)
    }
}
