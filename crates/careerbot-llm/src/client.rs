//! Chat-completion transport.
//!
//! [`ChatCompletion`] is the seam between the gateway and the network. The
//! production impl speaks the OpenAI-compatible `/chat/completions` protocol
//! (OpenRouter by default); tests substitute a stub.

use std::future::Future;
use std::pin::Pin;

use tracing::debug;

use crate::error::GatewayError;
use crate::types::{CompletionRequest, CompletionResponse};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";

pub const DEFAULT_MODEL: &str = "mistralai/mistral-7b-instruct";

/// Sends one completion request and returns the decoded response.
pub trait ChatCompletion: Send + Sync {
    fn complete<'a>(
        &'a self,
        request: &'a CompletionRequest,
    ) -> BoxFuture<'a, Result<CompletionResponse, GatewayError>>;
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL without the `/chat/completions` suffix.
    pub base_url: String,
    /// Bearer credential.
    pub api_key: String,
}

/// HTTP transport for OpenAI-compatible completion APIs.
///
/// No request timeout is set; the transport default applies.
pub struct CompletionClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl CompletionClient {
    pub fn new(config: ClientConfig) -> Result<Self, GatewayError> {
        if config.api_key.trim().is_empty() {
            return Err(GatewayError::Config("API key is empty".to_string()));
        }

        Ok(Self {
            http: reqwest::Client::new(),
            endpoint: format!("{}/chat/completions", config.base_url.trim_end_matches('/')),
            api_key: config.api_key,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl ChatCompletion for CompletionClient {
    fn complete<'a>(
        &'a self,
        request: &'a CompletionRequest,
    ) -> BoxFuture<'a, Result<CompletionResponse, GatewayError>> {
        Box::pin(async move {
            debug!(endpoint = %self.endpoint, model = %request.model, "sending completion request");

            let response = self
                .http
                .post(&self.endpoint)
                .bearer_auth(&self.api_key)
                .json(request)
                .send()
                .await?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(GatewayError::Status {
                    status: status.as_u16(),
                    body,
                });
            }

            Ok(response.json::<CompletionResponse>().await?)
        })
    }
}
