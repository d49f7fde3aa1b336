//! Client for the remote transaction lookup endpoint

use crate::error::{CoreError, CoreResult};
use crate::models::{FetchRequest, FetchResponse, TransactionRecord};
use async_trait::async_trait;
use log::{debug, warn};
use razorweb_config::GatewayConfig;
use reqwest::Client as HttpClient;
use std::time::Duration;

/// Anything that can answer a date-range lookup
#[async_trait]
pub trait TransactionSource: Send + Sync {
    /// Fetch the records between two user-entered dates
    async fn fetch(&self, request: &FetchRequest) -> CoreResult<Vec<TransactionRecord>>;
}

/// HTTP client posting `{"from", "to"}` to the configured endpoint
pub struct GatewayClient {
    http_client: HttpClient,
    endpoint: String,
}

impl GatewayClient {
    /// Create a client from configuration
    pub fn new(config: &GatewayConfig) -> CoreResult<Self> {
        let mut builder = HttpClient::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http_client = builder
            .build()
            .map_err(|e| CoreError::Config { message: format!("Failed to build HTTP client: {}", e) })?;

        Ok(Self {
            http_client,
            endpoint: config.endpoint.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl TransactionSource for GatewayClient {
    async fn fetch(&self, request: &FetchRequest) -> CoreResult<Vec<TransactionRecord>> {
        debug!("POST {} from={} to={}", self.endpoint, request.from, request.to);

        let response = self
            .http_client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| CoreError::Request { message: e.to_string() })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| CoreError::Request { message: e.to_string() })?;

        if !status.is_success() {
            warn!("Transaction endpoint answered {}: {}", status, body);
            return Err(CoreError::Status { status: status.as_u16(), body });
        }

        let parsed: FetchResponse = serde_json::from_str(&body)
            .map_err(|e| CoreError::Decode { message: e.to_string() })?;

        Ok(parsed.items)
    }
}
