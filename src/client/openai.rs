use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{LlmProvider, LlmSettings};

use super::{ChatMessage, ClientError, CompletionClient, Credential, build_http, check_status};

const PROVIDER: LlmProvider = LlmProvider::OpenAi;

/// Chat Completions client. System and user turns go out as a `messages`
/// array; the first choice's content is the completion.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    http: Client,
    base_url: String,
    model: String,
    credential: Credential,
}

impl OpenAiClient {
    pub fn new(
        settings: &LlmSettings,
        model: impl Into<String>,
        credential: Credential,
    ) -> Result<Self, ClientError> {
        Ok(Self {
            http: build_http(settings)?,
            base_url: settings.openai_base_url.trim_end_matches('/').to_string(),
            model: model.into(),
            credential,
        })
    }
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    fn provider(&self) -> LlmProvider {
        PROVIDER
    }

    async fn complete(
        &self,
        messages: &[ChatMessage],
        max_tokens: u32,
        temperature: f32,
    ) -> Result<String, ClientError> {
        let url = format!("{}/chat/completions", self.base_url);
        let request = ChatCompletionRequest {
            model: &self.model,
            messages,
            max_tokens,
            temperature,
        };

        debug!(model = %self.model, "dispatching OpenAI chat completion");
        let response = self
            .http
            .post(url)
            .bearer_auth(self.credential.expose())
            .json(&request)
            .send()
            .await
            .map_err(http_error)?;

        let payload: ChatCompletionResponse = check_status(PROVIDER, response)
            .await?
            .json()
            .await
            .map_err(http_error)?;

        payload
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or(ClientError::EmptyResponse { provider: PROVIDER })
    }
}

fn http_error(source: reqwest::Error) -> ClientError {
    ClientError::Http {
        provider: PROVIDER,
        source,
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn sample_settings(base_url: String) -> LlmSettings {
        LlmSettings {
            openai_base_url: base_url,
            user_agent: "course-planner/test".to_string(),
            ..LlmSettings::default()
        }
    }

    fn sample_messages() -> Vec<ChatMessage> {
        vec![
            ChatMessage::system("You are an advisor."),
            ChatMessage::user("Plan my studies."),
        ]
    }

    #[tokio::test]
    async fn posts_messages_and_trims_first_choice() {
        let server = MockServer::start_async().await;

        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/v1/chat/completions")
                    .header("Authorization", "Bearer sk-test")
                    .json_body(json!({
                        "model": "gpt-3.5-turbo",
                        "messages": [
                            {"role": "system", "content": "You are an advisor."},
                            {"role": "user", "content": "Plan my studies."}
                        ],
                        "max_tokens": 1024,
                        "temperature": 0.5
                    }));

                then.status(200).json_body(json!({
                    "choices": [
                        {
                            "index": 0,
                            "finish_reason": "stop",
                            "message": {"role": "assistant", "content": "  Week 1: SQL basics\n"}
                        },
                        {
                            "index": 1,
                            "finish_reason": "stop",
                            "message": {"role": "assistant", "content": "ignored"}
                        }
                    ]
                }));
            })
            .await;

        let settings = sample_settings(server.url("/v1"));
        let client = OpenAiClient::new(&settings, "gpt-3.5-turbo", Credential::new("sk-test"))
            .unwrap();

        let text = client.complete(&sample_messages(), 1024, 0.5).await.unwrap();

        assert_eq!(text, "Week 1: SQL basics");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn default_model_uses_chat_completions_endpoint() {
        let server = MockServer::start_async().await;

        let chat = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/v1/chat/completions")
                    .json_body_partial(
                        r#"{
                            "model": "gpt-3.5-turbo",
                            "messages": [
                                {"role": "system", "content": "You are an advisor."},
                                {"role": "user", "content": "Plan my studies."}
                            ]
                        }"#,
                    );
                then.status(200).json_body(json!({
                    "choices": [{"message": {"role": "assistant", "content": "Semester 1: Calculus"}}]
                }));
            })
            .await;
        let completions = server
            .mock_async(|when, then| {
                when.method(POST).path("/v1/completions");
                then.status(404);
            })
            .await;

        let settings = sample_settings(server.url("/v1"));
        let model = crate::config::ModelSettings::default().openai;
        let client = OpenAiClient::new(&settings, model, Credential::new("sk-test")).unwrap();

        let text = client.complete(&sample_messages(), 256, 0.5).await.unwrap();

        assert_eq!(text, "Semester 1: Calculus");
        chat.assert_async().await;
        completions.assert_hits_async(0).await;
    }

    #[tokio::test]
    async fn rate_limit_keeps_provider_error_body() {
        let server = MockServer::start_async().await;

        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/v1/chat/completions");
                then.status(429)
                    .header("Content-Type", "application/json")
                    .body(r#"{"error":{"code":"insufficient_quota","message":"You exceeded your current quota"}}"#);
            })
            .await;

        let settings = sample_settings(server.url("/v1"));
        let client =
            OpenAiClient::new(&settings, "gpt-3.5-turbo", Credential::new("sk-test")).unwrap();

        let err = client
            .complete(&sample_messages(), 1024, 0.5)
            .await
            .unwrap_err();

        assert!(matches!(err, ClientError::RateLimited { .. }));
        assert!(err.to_string().contains("insufficient_quota"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn unauthorized_maps_to_invalid_key_error() {
        let server = MockServer::start_async().await;

        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/v1/chat/completions");
                then.status(401).body(r#"{"error":"invalid_api_key"}"#);
            })
            .await;

        let settings = sample_settings(server.url("/v1"));
        let client =
            OpenAiClient::new(&settings, "gpt-3.5-turbo", Credential::new("sk-bad")).unwrap();

        let err = client
            .complete(&sample_messages(), 1024, 0.5)
            .await
            .unwrap_err();

        assert!(err.to_string().contains("Invalid API key"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn empty_choice_list_is_an_error() {
        let server = MockServer::start_async().await;

        let _mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/v1/chat/completions");
                then.status(200).json_body(json!({"choices": []}));
            })
            .await;

        let settings = sample_settings(server.url("/v1"));
        let client =
            OpenAiClient::new(&settings, "gpt-3.5-turbo", Credential::new("sk-test")).unwrap();

        let err = client
            .complete(&sample_messages(), 1024, 0.5)
            .await
            .unwrap_err();

        assert!(matches!(err, ClientError::EmptyResponse { .. }));
    }

    #[tokio::test]
    async fn blank_content_is_an_empty_response() {
        let server = MockServer::start_async().await;

        let _mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/v1/chat/completions");
                then.status(200).json_body(json!({
                    "choices": [{"message": {"role": "assistant", "content": " \n\t "}}]
                }));
            })
            .await;

        let settings = sample_settings(server.url("/v1"));
        let client =
            OpenAiClient::new(&settings, "gpt-3.5-turbo", Credential::new("sk-test")).unwrap();

        let err = client
            .complete(&sample_messages(), 1024, 0.5)
            .await
            .unwrap_err();

        assert!(matches!(err, ClientError::EmptyResponse { .. }));
    }
}
