use thiserror::Error;

use crate::config::LlmProvider;

/// Advisory outcomes shown in place of a plan. `Display` is the user-facing
/// text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    #[error(
        "The {} client is not available in this build. Rebuild with the `{}` feature to enable plan generation with {}.",
        .provider.display_name(),
        .provider.feature_name(),
        .provider.display_name()
    )]
    DependencyMissing { provider: LlmProvider },

    #[error("No API key provided. Please enter a valid API key to generate a plan.")]
    MissingCredential,

    #[error("Please provide the following required fields: {}", .missing.join(", "))]
    InvalidInput { missing: Vec<&'static str> },

    #[error(
        "Your API key does not have sufficient quota to generate a plan. Please check your usage or billing status with your AI provider and try again."
    )]
    QuotaExhausted,

    #[error("Error generating plan: {0}")]
    Upstream(String),

    #[error(
        "Unsupported AI provider. Please select a supported provider such as OpenAI or Anthropic."
    )]
    UnsupportedProvider,

    #[error("No courses were found for the specified topic. Please try a different keyword.")]
    NoCoursesFound,
}

const QUOTA_MARKERS: [&str; 2] = ["insufficient_quota", "You exceeded your current quota"];

impl PlanError {
    /// Sorts raw upstream error text into the quota advisory or a generic
    /// failure.
    pub fn from_upstream(text: impl Into<String>) -> Self {
        let text = text.into();
        if QUOTA_MARKERS.iter().any(|marker| text.contains(marker)) {
            PlanError::QuotaExhausted
        } else {
            PlanError::Upstream(text)
        }
    }

    /// Whether the CLI should treat this outcome as a failed invocation.
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self,
            PlanError::InvalidInput { .. }
                | PlanError::UnsupportedProvider
                | PlanError::NoCoursesFound
        )
    }
}
