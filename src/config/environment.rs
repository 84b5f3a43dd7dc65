use anyhow::{Context, Result, anyhow};
use std::env;
use std::str::FromStr;

use super::builder::ConfigBuilder;
use super::types::LlmProvider;

pub fn apply_env_overrides(mut builder: ConfigBuilder) -> Result<ConfigBuilder> {
    if let Some(provider) = env_parsed::<LlmProvider>("COURSE_PLANNER_PROVIDER")? {
        builder = builder.with_provider(provider);
    }

    if let Some(timeout) = env_u64("COURSE_PLANNER_TIMEOUT_SECS")? {
        builder = builder.with_llm(|llm| llm.timeout_secs = timeout);
    }

    if let Some(base_url) = env_string("COURSE_PLANNER_OPENAI_BASE_URL")? {
        builder = builder.with_base_url(LlmProvider::OpenAi, base_url);
    }

    if let Some(base_url) = env_string("COURSE_PLANNER_ANTHROPIC_BASE_URL")? {
        builder = builder.with_base_url(LlmProvider::Anthropic, base_url);
    }

    if let Some(max_tokens) = env_u32("COURSE_PLANNER_MAX_TOKENS")? {
        builder = builder.with_models(|models| models.max_tokens = max_tokens);
    }

    if let Some(temperature) = env_parsed::<f32>("COURSE_PLANNER_TEMPERATURE")? {
        builder = builder.with_models(|models| models.temperature = temperature);
    }

    if let Some(model) = env_string("COURSE_PLANNER_OPENAI_MODEL")? {
        builder = builder.with_model(LlmProvider::OpenAi, model);
    }

    if let Some(model) = env_string("COURSE_PLANNER_ANTHROPIC_MODEL")? {
        builder = builder.with_model(LlmProvider::Anthropic, model);
    }

    if let Some(enabled) = env_bool("COURSE_PLANNER_SEARCH_ENABLED")? {
        builder = builder.with_search(|search| search.enabled = enabled);
    }

    if let Some(base_url) = env_string("COURSE_PLANNER_SEARCH_BASE_URL")? {
        builder = builder.with_search(|search| search.base_url = base_url);
    }

    Ok(builder)
}

pub fn env_string(key: &str) -> Result<Option<String>> {
    match env::var(key) {
        Ok(val) => Ok(Some(val)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(_)) => Err(anyhow!("{key} contains invalid UTF-8")),
    }
}

pub fn env_u64(key: &str) -> Result<Option<u64>> {
    env_parsed::<u64>(key)
}

pub fn env_u32(key: &str) -> Result<Option<u32>> {
    env_parsed::<u32>(key)
}

pub fn env_bool(key: &str) -> Result<Option<bool>> {
    let Some(value) = env_string(key)? else {
        return Ok(None);
    };

    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(Some(true)),
        "0" | "false" | "no" | "off" => Ok(Some(false)),
        other => Err(anyhow!("Failed to parse {key} value '{other}' as a boolean")),
    }
}

fn env_parsed<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    if let Some(value) = env_string(key)? {
        let parsed = value
            .trim()
            .parse::<T>()
            .map_err(|err| anyhow!("{err}"))
            .with_context(|| format!("Failed to parse {key} value '{value}'"))?;
        Ok(Some(parsed))
    } else {
        Ok(None)
    }
}
