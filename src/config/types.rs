use anyhow::anyhow;
use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub llm: LlmSettings,
    pub models: ModelSettings,
    pub search: SearchSettings,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LlmSettings {
    pub provider: LlmProvider,
    pub timeout_secs: u64,
    pub openai_base_url: String,
    pub anthropic_base_url: String,
    pub user_agent: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    OpenAi,
    Anthropic,
}

impl fmt::Display for LlmProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LlmProvider::OpenAi => write!(f, "openai"),
            LlmProvider::Anthropic => write!(f, "anthropic"),
        }
    }
}

impl std::str::FromStr for LlmProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "openai" => Ok(LlmProvider::OpenAi),
            "anthropic" => Ok(LlmProvider::Anthropic),
            other => Err(anyhow!("Unknown LLM provider '{other}'")),
        }
    }
}

impl LlmProvider {
    pub const ALL: [LlmProvider; 2] = [LlmProvider::OpenAi, LlmProvider::Anthropic];

    pub fn api_key_env_var(self) -> &'static str {
        match self {
            LlmProvider::OpenAi => "OPENAI_API_KEY",
            LlmProvider::Anthropic => "ANTHROPIC_API_KEY",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            LlmProvider::OpenAi => "OpenAI",
            LlmProvider::Anthropic => "Anthropic",
        }
    }

    /// Cargo feature that compiles the provider's client in.
    pub fn feature_name(self) -> &'static str {
        match self {
            LlmProvider::OpenAi => "openai",
            LlmProvider::Anthropic => "anthropic",
        }
    }

    pub fn is_compiled_in(self) -> bool {
        match self {
            LlmProvider::OpenAi => cfg!(feature = "openai"),
            LlmProvider::Anthropic => cfg!(feature = "anthropic"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModelSettings {
    pub openai: String,
    pub anthropic: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl ModelSettings {
    pub fn model_for(&self, provider: LlmProvider) -> &str {
        match provider {
            LlmProvider::OpenAi => &self.openai,
            LlmProvider::Anthropic => &self.anthropic,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchSettings {
    pub enabled: bool,
    pub base_url: String,
    pub timeout_secs: u64,
    pub course_results: usize,
    pub curriculum_results: usize,
    pub elective_results: usize,
}

// File configuration types
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct FileConfig {
    pub llm: Option<FileLlmSettings>,
    pub models: Option<FileModelSettings>,
    pub search: Option<FileSearchSettings>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct FileLlmSettings {
    pub provider: Option<String>,
    pub timeout_secs: Option<u64>,
    pub openai_base_url: Option<String>,
    pub anthropic_base_url: Option<String>,
    pub user_agent: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct FileModelSettings {
    pub openai: Option<String>,
    pub anthropic: Option<String>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct FileSearchSettings {
    pub enabled: Option<bool>,
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub course_results: Option<usize>,
    pub curriculum_results: Option<usize>,
    pub elective_results: Option<usize>,
}

// Serialization helpers. Credentials are never persisted.
#[derive(Serialize)]
pub(super) struct PersistedConfig<'a> {
    pub llm: PersistedLlm<'a>,
    pub models: PersistedModels<'a>,
    pub search: PersistedSearch<'a>,
}

#[derive(Serialize)]
pub(super) struct PersistedLlm<'a> {
    pub provider: LlmProvider,
    pub timeout_secs: u64,
    pub openai_base_url: &'a str,
    pub anthropic_base_url: &'a str,
    pub user_agent: &'a str,
}

#[derive(Serialize)]
pub(super) struct PersistedModels<'a> {
    pub openai: &'a str,
    pub anthropic: &'a str,
    pub max_tokens: u32,
    pub temperature: f32,
}

#[derive(Serialize)]
pub(super) struct PersistedSearch<'a> {
    pub enabled: bool,
    pub base_url: &'a str,
    pub timeout_secs: u64,
    pub course_results: usize,
    pub curriculum_results: usize,
    pub elective_results: usize,
}

impl<'a> From<&'a Config> for PersistedConfig<'a> {
    fn from(config: &'a Config) -> Self {
        PersistedConfig {
            llm: PersistedLlm {
                provider: config.llm.provider,
                timeout_secs: config.llm.timeout_secs,
                openai_base_url: &config.llm.openai_base_url,
                anthropic_base_url: &config.llm.anthropic_base_url,
                user_agent: &config.llm.user_agent,
            },
            models: PersistedModels {
                openai: &config.models.openai,
                anthropic: &config.models.anthropic,
                max_tokens: config.models.max_tokens,
                temperature: config.models.temperature,
            },
            search: PersistedSearch {
                enabled: config.search.enabled,
                base_url: &config.search.base_url,
                timeout_secs: config.search.timeout_secs,
                course_results: config.search.course_results,
                curriculum_results: config.search.curriculum_results,
                elective_results: config.search.elective_results,
            },
        }
    }
}
