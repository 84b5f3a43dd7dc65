use anyhow::{Context, Result};

use crate::config::{Config, LlmProvider};

use super::args::ConfigArgs;
use super::util::credential_status;

pub(crate) fn handle_config(args: &ConfigArgs, config: &mut Config) -> Result<()> {
    if args.has_updates() {
        *config = apply_updates(args, config)?;
        config.validate()?;
        config.save()?;
        println!(
            "✅ Configuration saved to {}",
            Config::config_path()?.display()
        );
    }

    print_config(config)
}

fn apply_updates(args: &ConfigArgs, config: &Config) -> Result<Config> {
    let mut builder = config.to_builder();

    if let Some(ref provider) = args.provider {
        let provider = provider
            .parse::<LlmProvider>()
            .context("Supported providers are openai and anthropic")?;
        builder = builder.with_provider(provider);
    }

    if let Some(timeout) = args.timeout {
        builder = builder.with_llm(|llm| llm.timeout_secs = timeout);
    }

    if let Some(max_tokens) = args.max_tokens {
        builder = builder.with_models(|models| models.max_tokens = max_tokens);
    }

    if let Some(temperature) = args.temperature {
        builder = builder.with_models(|models| models.temperature = temperature);
    }

    if let Some(ref model) = args.openai_model {
        builder = builder.with_model(LlmProvider::OpenAi, model.as_str());
    }

    if let Some(ref model) = args.anthropic_model {
        builder = builder.with_model(LlmProvider::Anthropic, model.as_str());
    }

    if let Some(enabled) = args.search_enabled {
        builder = builder.with_search(|search| search.enabled = enabled);
    }

    builder.build()
}

fn print_config(config: &Config) -> Result<()> {
    println!("📋 Current configuration:");
    println!(
        "   Provider: {} ({})",
        config.llm.provider,
        config.llm.provider.display_name()
    );
    println!("   Timeout: {}s", config.llm.timeout_secs);
    println!("   OpenAI Model: {}", config.models.openai);
    println!("   Anthropic Model: {}", config.models.anthropic);
    println!("   Max Tokens: {}", config.models.max_tokens);
    println!("   Temperature: {}", config.models.temperature);
    println!(
        "   Web Search: {}",
        if config.search.enabled { "on" } else { "off" }
    );
    for provider in LlmProvider::ALL {
        println!(
            "   {}: {}",
            provider.api_key_env_var(),
            credential_status(provider)?
        );
    }
    Ok(())
}
