//! Configuration management for the course planner.
//!
//! Settings are layered the same way for every command:
//! - Built-in defaults
//! - The JSON file at `~/.course-planner/config`
//! - `COURSE_PLANNER_*` environment variable overrides
//! - Validation of the merged result
//!
//! Provider credentials are not part of the configuration: they are
//! supplied per request and never written to disk.

mod builder;
mod constants;
mod defaults;
mod environment;
mod loader;
mod types;
mod validation;

pub use types::{Config, LlmProvider, LlmSettings, ModelSettings, SearchSettings};

pub(crate) use environment::env_string;
