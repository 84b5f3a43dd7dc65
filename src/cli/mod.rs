mod args;
mod commands;
mod config_cmd;
mod plan_cmd;
mod providers;
mod util;

pub use args::Cli;
