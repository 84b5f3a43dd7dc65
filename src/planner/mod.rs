use std::sync::Arc;

use tracing::{debug, warn};

use crate::client::{CompletionClientFactory, Credential};
use crate::config::LlmProvider;
use crate::prompt::PromptMessages;

mod error;
mod pipeline;
mod types;

pub use error::PlanError;
pub use pipeline::PlanPipeline;
pub use types::{DegreeDetails, PlanRequest, PlanRun, PlanSubject, parse_provider};

/// Sends a prompt pair to the selected provider and returns plan text.
///
/// A client is built for each call from the caller's credential; nothing is
/// shared between requests.
#[derive(Clone)]
pub struct PlanGenerator {
    factory: Arc<dyn CompletionClientFactory>,
    max_tokens: u32,
    temperature: f32,
}

impl PlanGenerator {
    pub fn new(factory: Arc<dyn CompletionClientFactory>, max_tokens: u32, temperature: f32) -> Self {
        Self {
            factory,
            max_tokens,
            temperature,
        }
    }

    pub async fn try_generate_plan(
        &self,
        provider: LlmProvider,
        credential: &Credential,
        messages: &PromptMessages,
    ) -> Result<String, PlanError> {
        if !self.factory.is_available(provider) {
            return Err(PlanError::DependencyMissing { provider });
        }
        if credential.is_empty() {
            return Err(PlanError::MissingCredential);
        }

        let client = self
            .factory
            .build(provider, credential)
            .map_err(|err| PlanError::from_upstream(err.to_string()))?;

        debug!(
            provider = %client.provider(),
            max_tokens = self.max_tokens,
            "requesting plan completion"
        );
        let text = client
            .complete(&messages.to_chat(), self.max_tokens, self.temperature)
            .await
            .map_err(|err| {
                warn!(%provider, error = %err, "plan generation failed");
                PlanError::from_upstream(err.to_string())
            })?;

        Ok(text.trim().to_string())
    }

    /// Plan text on success, otherwise the advisory for the failure.
    pub async fn generate_plan(
        &self,
        provider: LlmProvider,
        credential: &Credential,
        messages: &PromptMessages,
    ) -> String {
        self.try_generate_plan(provider, credential, messages)
            .await
            .unwrap_or_else(|err| err.to_string())
    }
}

impl std::fmt::Debug for PlanGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlanGenerator")
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .finish_non_exhaustive()
    }
}
