use anyhow::{Result, bail};

use super::types::{Config, LlmProvider, LlmSettings, ModelSettings, SearchSettings};

/// Accumulates settings from each configuration layer.
///
/// `build` normalises what the layers supplied: model names are trimmed and
/// base URLs lose trailing slashes, so clients can append paths directly.
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    llm: LlmSettings,
    models: ModelSettings,
    search: SearchSettings,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            llm: LlmSettings::default(),
            models: ModelSettings::default(),
            search: SearchSettings::default(),
        }
    }

    /// Starts from an already merged configuration, e.g. before applying
    /// `config` command flags.
    pub fn from_config(config: Config) -> Self {
        Self {
            llm: config.llm,
            models: config.models,
            search: config.search,
        }
    }

    pub fn with_llm<F>(mut self, update: F) -> Self
    where
        F: FnOnce(&mut LlmSettings),
    {
        update(&mut self.llm);
        self
    }

    pub fn with_models<F>(mut self, update: F) -> Self
    where
        F: FnOnce(&mut ModelSettings),
    {
        update(&mut self.models);
        self
    }

    pub fn with_search<F>(mut self, update: F) -> Self
    where
        F: FnOnce(&mut SearchSettings),
    {
        update(&mut self.search);
        self
    }

    pub fn with_provider(mut self, provider: LlmProvider) -> Self {
        self.llm.provider = provider;
        self
    }

    pub fn with_model(mut self, provider: LlmProvider, model: impl Into<String>) -> Self {
        let model = model.into();
        match provider {
            LlmProvider::OpenAi => self.models.openai = model,
            LlmProvider::Anthropic => self.models.anthropic = model,
        }
        self
    }

    pub fn with_base_url(mut self, provider: LlmProvider, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        match provider {
            LlmProvider::OpenAi => self.llm.openai_base_url = base_url,
            LlmProvider::Anthropic => self.llm.anthropic_base_url = base_url,
        }
        self
    }

    pub fn build(mut self) -> Result<Config> {
        for provider in LlmProvider::ALL {
            let model = self.models.model_for(provider).trim().to_string();
            if model.is_empty() {
                bail!("models.{provider} cannot be empty");
            }
            self = self.with_model(provider, model);
        }

        for url in [
            &mut self.llm.openai_base_url,
            &mut self.llm.anthropic_base_url,
            &mut self.search.base_url,
        ] {
            let trimmed = url.trim().trim_end_matches('/').to_string();
            *url = trimmed;
        }

        Ok(Config {
            llm: self.llm,
            models: self.models,
            search: self.search,
        })
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
