use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{LlmProvider, LlmSettings};

use super::{
    ChatMessage, ChatMessageRole, ClientError, CompletionClient, Credential, build_http,
    check_status,
};

const PROVIDER: LlmProvider = LlmProvider::Anthropic;
const ANTHROPIC_VERSION: &str = "2023-06-01";

#[derive(Debug, Clone)]
pub struct AnthropicClient {
    http: Client,
    base_url: String,
    model: String,
    credential: Credential,
}

impl AnthropicClient {
    pub fn new(
        settings: &LlmSettings,
        model: impl Into<String>,
        credential: Credential,
    ) -> Result<Self, ClientError> {
        Ok(Self {
            http: build_http(settings)?,
            base_url: settings.anthropic_base_url.trim_end_matches('/').to_string(),
            model: model.into(),
            credential,
        })
    }
}

#[async_trait]
impl CompletionClient for AnthropicClient {
    fn provider(&self) -> LlmProvider {
        PROVIDER
    }

    async fn complete(
        &self,
        messages: &[ChatMessage],
        max_tokens: u32,
        temperature: f32,
    ) -> Result<String, ClientError> {
        let url = format!("{}/messages", self.base_url);
        let request = MessagesRequest::from_chat(&self.model, messages, max_tokens, temperature);
        debug!(model = %self.model, "dispatching Anthropic completion");

        let response = self
            .http
            .post(url)
            .header("x-api-key", self.credential.expose())
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&request)
            .send()
            .await
            .map_err(http_error)?;

        let payload: MessagesResponse = check_status(PROVIDER, response)
            .await?
            .json()
            .await
            .map_err(http_error)?;

        let text = payload
            .content
            .into_iter()
            .filter_map(|block| block.text)
            .collect::<Vec<_>>()
            .join("\n");

        let text = text.trim();
        if text.is_empty() {
            return Err(ClientError::EmptyResponse { provider: PROVIDER });
        }
        Ok(text.to_string())
    }
}

fn http_error(source: reqwest::Error) -> ClientError {
    ClientError::Http {
        provider: PROVIDER,
        source,
    }
}

/// Messages API body. System instructions travel in the top-level `system`
/// field; the `messages` array only holds conversation turns.
#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    messages: Vec<&'a ChatMessage>,
}

impl<'a> MessagesRequest<'a> {
    fn from_chat(
        model: &'a str,
        messages: &'a [ChatMessage],
        max_tokens: u32,
        temperature: f32,
    ) -> Self {
        let (system, turns): (Vec<&ChatMessage>, Vec<&ChatMessage>) = messages
            .iter()
            .partition(|message| message.role == ChatMessageRole::System);

        let system = if system.is_empty() {
            None
        } else {
            Some(
                system
                    .iter()
                    .map(|message| message.content.as_str())
                    .collect::<Vec<_>>()
                    .join("\n\n"),
            )
        };

        Self {
            model,
            max_tokens,
            temperature,
            system,
            messages: turns,
        }
    }
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: Option<String>,
}
