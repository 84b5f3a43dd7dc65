use std::process::ExitCode;

use anyhow::Result;
use colored::Colorize;

use crate::config::Config;
use crate::logging;

use super::args::{Cli, Command};
use super::config_cmd;
use super::plan_cmd;
use super::providers;

pub(crate) async fn run(cli: Cli) -> Result<ExitCode> {
    logging::init(cli.verbose);

    let Some(command) = cli.command else {
        show_welcome_message();
        return Ok(ExitCode::SUCCESS);
    };

    let mut config = Config::load()?;

    match command {
        Command::Topic(args) => plan_cmd::handle_topic(args, &config).await,
        Command::Degree(args) => plan_cmd::handle_degree(args, &config).await,
        Command::Providers => {
            providers::print_provider_list(&config)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Config(args) => {
            config_cmd::handle_config(&args, &mut config)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn show_welcome_message() {
    println!("{}", "📚 course-planner".bold());
    println!();
    println!("📖 What it does:");
    println!("   • Searches the web for courses or degree requirements");
    println!("   • Keeps results whose titles look like courses or curricula");
    println!("   • Asks OpenAI or Anthropic to turn them into a study plan");
    println!();
    println!("💡 How to use it:");
    println!("   course-planner topic data engineering                        # Learning plan for a topic");
    println!("   course-planner topic rust --provider anthropic               # Use Anthropic instead");
    println!(
        "   course-planner degree --school 'Acme University' --major Robotics --years 4"
    );
    println!("   course-planner providers                                     # Providers and models");
    println!("   course-planner config --temperature 0.3                      # Update settings");
    println!();
    println!("🔑 Keys come from --api-key, OPENAI_API_KEY or ANTHROPIC_API_KEY and are never saved.");
    println!();
    println!("❓ For more help: course-planner --help");
}
