use anyhow::Result;
use colored::Colorize;

use crate::config::{Config, LlmProvider};
use crate::search::Searcher;

use super::util::credential_status;

fn provider_description(provider: LlmProvider) -> &'static str {
    match provider {
        LlmProvider::OpenAi => "OpenAI Chat Completions API (GPT models)",
        LlmProvider::Anthropic => "Anthropic Messages API (Claude models)",
    }
}

pub(crate) fn print_provider_list(config: &Config) -> Result<()> {
    println!("\n🌐 Available Providers:\n");
    for provider in LlmProvider::ALL {
        let marker = if provider == config.llm.provider {
            " (default)"
        } else {
            ""
        };
        let build = if provider.is_compiled_in() {
            "available".green()
        } else {
            format!("missing `{}` feature", provider.feature_name()).red()
        };

        println!(
            "  {} ({}){} - {}",
            provider,
            provider.display_name(),
            marker,
            provider_description(provider)
        );
        println!("     Model: {}", config.models.model_for(provider));
        println!("     Client: {build}");
        println!(
            "     {}: {}",
            provider.api_key_env_var(),
            credential_status(provider)?
        );
    }

    let search = if Searcher::from_settings(&config.search).is_available() {
        "available".green()
    } else {
        "unavailable".yellow()
    };
    println!("\n🔎 Web search: {search}");
    println!();
    Ok(())
}
