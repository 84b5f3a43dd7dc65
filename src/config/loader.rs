use anyhow::{Context, Result};
use dirs::home_dir;
use std::{fs, path::Path};

use super::Config;
use super::builder::ConfigBuilder;
use super::environment::apply_env_overrides;
use super::types::{FileConfig, LlmProvider, PersistedConfig};
use super::validation::validate;

impl Config {
    pub fn config_path() -> Result<std::path::PathBuf> {
        let mut path = home_dir().context("Could not determine home directory")?;
        path.push(".course-planner/config");
        Ok(path)
    }

    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    pub fn to_builder(&self) -> ConfigBuilder {
        ConfigBuilder::from_config(self.clone())
    }

    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        let mut builder = Self::builder();

        if path.exists() {
            builder = Self::apply_file(builder, &path)?;
        }

        builder = apply_env_overrides(builder)?;

        let config = builder.build()?;
        validate(&config)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Unable to create config directory {}", parent.display())
            })?;
        }

        let payload = PersistedConfig::from(self);
        let json = serde_json::to_string_pretty(&payload)
            .context("Failed to serialize configuration to JSON")?;
        fs::write(&path, json)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        validate(self)
    }

    fn apply_file(builder: ConfigBuilder, path: &Path) -> Result<ConfigBuilder> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed reading config at {}", path.display()))?;

        if contents.trim().is_empty() {
            return Ok(builder);
        }

        let raw: FileConfig = serde_json::from_str(&contents)
            .with_context(|| format!("Failed parsing JSON config at {}", path.display()))?;

        raw.apply(builder)
            .with_context(|| format!("Invalid value in config at {}", path.display()))
    }
}

impl FileConfig {
    pub fn apply(self, builder: ConfigBuilder) -> Result<ConfigBuilder> {
        let mut builder = builder;

        if let Some(llm) = self.llm {
            let provider = llm
                .provider
                .as_deref()
                .map(str::parse::<LlmProvider>)
                .transpose()?;

            builder = builder.with_llm(|settings| {
                if let Some(provider) = provider {
                    settings.provider = provider;
                }
                if let Some(timeout) = llm.timeout_secs {
                    settings.timeout_secs = timeout;
                }
                if let Some(base_url) = llm.openai_base_url {
                    settings.openai_base_url = base_url;
                }
                if let Some(base_url) = llm.anthropic_base_url {
                    settings.anthropic_base_url = base_url;
                }
                if let Some(user_agent) = llm.user_agent {
                    settings.user_agent = user_agent;
                }
            });
        }

        if let Some(models) = self.models {
            builder = builder.with_models(|settings| {
                if let Some(openai) = models.openai {
                    settings.openai = openai;
                }
                if let Some(anthropic) = models.anthropic {
                    settings.anthropic = anthropic;
                }
                if let Some(max_tokens) = models.max_tokens {
                    settings.max_tokens = max_tokens;
                }
                if let Some(temperature) = models.temperature {
                    settings.temperature = temperature;
                }
            });
        }

        if let Some(search) = self.search {
            builder = builder.with_search(|settings| {
                if let Some(enabled) = search.enabled {
                    settings.enabled = enabled;
                }
                if let Some(base_url) = search.base_url {
                    settings.base_url = base_url;
                }
                if let Some(timeout) = search.timeout_secs {
                    settings.timeout_secs = timeout;
                }
                if let Some(limit) = search.course_results {
                    settings.course_results = limit;
                }
                if let Some(limit) = search.curriculum_results {
                    settings.curriculum_results = limit;
                }
                if let Some(limit) = search.elective_results {
                    settings.elective_results = limit;
                }
            });
        }

        Ok(builder)
    }
}
