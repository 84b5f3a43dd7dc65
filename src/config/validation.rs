use anyhow::{Result, bail};

use super::constants::MAX_TEMPERATURE;
use super::types::Config;

pub fn validate(config: &Config) -> Result<()> {
    if config.llm.timeout_secs == 0 {
        bail!("llm.timeout_secs must be greater than zero");
    }
    if config.search.timeout_secs == 0 {
        bail!("search.timeout_secs must be greater than zero");
    }
    if config.models.max_tokens == 0 {
        bail!("models.max_tokens must be greater than zero");
    }
    if !(0.0..=MAX_TEMPERATURE).contains(&config.models.temperature) {
        bail!(
            "models.temperature must be between 0 and {MAX_TEMPERATURE} (got {})",
            config.models.temperature
        );
    }

    for (name, url) in [
        ("llm.openai_base_url", &config.llm.openai_base_url),
        ("llm.anthropic_base_url", &config.llm.anthropic_base_url),
        ("search.base_url", &config.search.base_url),
    ] {
        if url.trim().is_empty() {
            bail!("{name} cannot be empty");
        }
    }

    for (name, limit) in [
        ("search.course_results", config.search.course_results),
        ("search.curriculum_results", config.search.curriculum_results),
        ("search.elective_results", config.search.elective_results),
    ] {
        if limit == 0 {
            bail!("{name} must be greater than zero");
        }
    }

    Ok(())
}
