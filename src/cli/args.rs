use std::process::ExitCode;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use super::commands;

/// Entry point for the `course-planner` command-line interface.
#[derive(Debug, Parser)]
#[command(
    name = "course-planner",
    about = "Search for courses and draft a study plan with an AI provider",
    version,
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Enable debug logging on stderr
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Build a learning plan for a topic from discovered online courses.
    Topic(TopicArgs),
    /// Build a semester-by-semester plan for a degree program.
    Degree(DegreeArgs),
    /// List supported AI providers and their default models.
    Providers,
    /// Show or update persisted settings.
    Config(ConfigArgs),
}

/// Provider selection shared by the planning commands.
#[derive(Debug, Args)]
pub struct ProviderArgs {
    /// AI provider (openai or anthropic); defaults to the configured one
    #[arg(long)]
    pub provider: Option<String>,

    /// API key for this request; falls back to OPENAI_API_KEY / ANTHROPIC_API_KEY
    #[arg(long)]
    pub api_key: Option<String>,
}

#[derive(Debug, Args)]
pub struct TopicArgs {
    /// What you want to learn, e.g. `data engineering`
    pub topic: Vec<String>,

    #[command(flatten)]
    pub provider: ProviderArgs,

    /// Number of search results to consider
    #[arg(long)]
    pub max_results: Option<usize>,

    /// Do not print the discovered courses
    #[arg(long)]
    pub hide_sources: bool,
}

#[derive(Debug, Args)]
pub struct DegreeArgs {
    /// University or college name
    #[arg(long, default_value = "")]
    pub school: String,

    /// Major or program
    #[arg(long, default_value = "")]
    pub major: String,

    /// Years until graduation
    #[arg(long)]
    pub years: Option<u32>,

    /// Free-text preferences appended to the request
    #[arg(long, default_value = "")]
    pub preferences: String,

    #[command(flatten)]
    pub provider: ProviderArgs,

    /// Print the curriculum and elective search results
    #[arg(long)]
    pub show_sources: bool,
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Default AI provider
    #[arg(long)]
    pub provider: Option<String>,

    /// HTTP timeout for AI requests, in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Completion length limit
    #[arg(long)]
    pub max_tokens: Option<u32>,

    /// Sampling temperature (0.0 - 2.0)
    #[arg(long)]
    pub temperature: Option<f32>,

    /// Model used with OpenAI
    #[arg(long)]
    pub openai_model: Option<String>,

    /// Model used with Anthropic
    #[arg(long)]
    pub anthropic_model: Option<String>,

    /// Turn web search on or off
    #[arg(long)]
    pub search_enabled: Option<bool>,
}

impl ConfigArgs {
    pub(crate) fn has_updates(&self) -> bool {
        self.provider.is_some()
            || self.timeout.is_some()
            || self.max_tokens.is_some()
            || self.temperature.is_some()
            || self.openai_model.is_some()
            || self.anthropic_model.is_some()
            || self.search_enabled.is_some()
    }
}

impl Cli {
    pub async fn run(self) -> Result<ExitCode> {
        commands::run(self).await
    }
}
