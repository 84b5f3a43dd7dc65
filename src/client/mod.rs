use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{LlmProvider, LlmSettings, ModelSettings};

#[cfg(feature = "anthropic")]
mod anthropic;
mod credential;
#[cfg(feature = "openai")]
mod openai;

#[cfg(feature = "anthropic")]
pub use anthropic::AnthropicClient;
pub use credential::Credential;
#[cfg(feature = "openai")]
pub use openai::OpenAiClient;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatMessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatMessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatMessageRole::User,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatMessageRole {
    System,
    User,
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("The {} client is not available in this build", .provider.display_name())]
    Unavailable { provider: LlmProvider },
    #[error("Failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),
    #[error("Request to {} failed: {source}", .provider.display_name())]
    Http {
        provider: LlmProvider,
        #[source]
        source: reqwest::Error,
    },
    #[error("Invalid API key. Please check your {} API key.", .provider.display_name())]
    Unauthorized { provider: LlmProvider },
    #[error("Rate limit exceeded (API response: {body})")]
    RateLimited { body: String },
    #[error("API error (status {status}): {body}")]
    Api { status: StatusCode, body: String },
    #[error("{} returned no completion text", .provider.display_name())]
    EmptyResponse { provider: LlmProvider },
}

/// A single provider's completion endpoint.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    fn provider(&self) -> LlmProvider;

    async fn complete(
        &self,
        messages: &[ChatMessage],
        max_tokens: u32,
        temperature: f32,
    ) -> Result<String, ClientError>;
}

pub type DynCompletionClient = dyn CompletionClient;

/// Builds a fresh client per request from the caller's credential.
pub trait CompletionClientFactory: Send + Sync {
    fn is_available(&self, provider: LlmProvider) -> bool;

    fn build(
        &self,
        provider: LlmProvider,
        credential: &Credential,
    ) -> Result<Box<DynCompletionClient>, ClientError>;
}

#[derive(Debug, Clone)]
pub struct HttpClientFactory {
    llm: LlmSettings,
    models: ModelSettings,
}

impl HttpClientFactory {
    pub fn new(llm: LlmSettings, models: ModelSettings) -> Self {
        Self { llm, models }
    }
}

impl CompletionClientFactory for HttpClientFactory {
    fn is_available(&self, provider: LlmProvider) -> bool {
        provider.is_compiled_in()
    }

    fn build(
        &self,
        provider: LlmProvider,
        credential: &Credential,
    ) -> Result<Box<DynCompletionClient>, ClientError> {
        if !self.is_available(provider) {
            return Err(ClientError::Unavailable { provider });
        }

        let model = self.models.model_for(provider);
        match provider {
            LlmProvider::OpenAi => build_openai(&self.llm, model, credential),
            LlmProvider::Anthropic => build_anthropic(&self.llm, model, credential),
        }
    }
}

#[cfg(feature = "openai")]
fn build_openai(
    llm: &LlmSettings,
    model: &str,
    credential: &Credential,
) -> Result<Box<DynCompletionClient>, ClientError> {
    Ok(Box::new(OpenAiClient::new(llm, model, credential.clone())?))
}

#[cfg(not(feature = "openai"))]
fn build_openai(
    _llm: &LlmSettings,
    _model: &str,
    _credential: &Credential,
) -> Result<Box<DynCompletionClient>, ClientError> {
    Err(ClientError::Unavailable {
        provider: LlmProvider::OpenAi,
    })
}

#[cfg(feature = "anthropic")]
fn build_anthropic(
    llm: &LlmSettings,
    model: &str,
    credential: &Credential,
) -> Result<Box<DynCompletionClient>, ClientError> {
    Ok(Box::new(AnthropicClient::new(llm, model, credential.clone())?))
}

#[cfg(not(feature = "anthropic"))]
fn build_anthropic(
    _llm: &LlmSettings,
    _model: &str,
    _credential: &Credential,
) -> Result<Box<DynCompletionClient>, ClientError> {
    Err(ClientError::Unavailable {
        provider: LlmProvider::Anthropic,
    })
}

#[cfg_attr(not(any(feature = "openai", feature = "anthropic")), allow(dead_code))]
pub(crate) fn build_http(settings: &LlmSettings) -> Result<Client, ClientError> {
    Client::builder()
        .timeout(Duration::from_secs(settings.timeout_secs))
        .user_agent(settings.user_agent.as_str())
        .build()
        .map_err(ClientError::Build)
}

/// Maps non-success statuses to `ClientError`, keeping the body text so
/// callers can inspect provider error codes.
#[cfg_attr(not(any(feature = "openai", feature = "anthropic")), allow(dead_code))]
pub(crate) async fn check_status(
    provider: LlmProvider,
    response: Response,
) -> Result<Response, ClientError> {
    match response.status() {
        status if status.is_success() => Ok(response),
        StatusCode::UNAUTHORIZED => Err(ClientError::Unauthorized { provider }),
        StatusCode::TOO_MANY_REQUESTS => {
            let body = response.text().await.unwrap_or_default();
            Err(ClientError::RateLimited { body })
        }
        status => {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            Err(ClientError::Api { status, body })
        }
    }
}
