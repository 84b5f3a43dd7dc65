use super::constants::*;
use super::types::{LlmProvider, LlmSettings, ModelSettings, SearchSettings};

pub fn default_user_agent() -> String {
    format!("course-planner/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            provider: LlmProvider::OpenAi,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            openai_base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            anthropic_base_url: DEFAULT_ANTHROPIC_BASE_URL.to_string(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            openai: DEFAULT_OPENAI_MODEL.to_string(),
            anthropic: DEFAULT_ANTHROPIC_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: DEFAULT_SEARCH_BASE_URL.to_string(),
            timeout_secs: DEFAULT_SEARCH_TIMEOUT_SECS,
            course_results: DEFAULT_COURSE_RESULTS,
            curriculum_results: DEFAULT_CURRICULUM_RESULTS,
            elective_results: DEFAULT_ELECTIVE_RESULTS,
        }
    }
}
