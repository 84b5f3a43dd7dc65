use anyhow::Result;
use colored::Colorize;

use crate::config::{LlmProvider, env_string};
use crate::search::SearchRecord;

/// Reports whether a provider key is present in the environment without
/// revealing it.
pub(crate) fn credential_status(provider: LlmProvider) -> Result<&'static str> {
    let present = env_string(provider.api_key_env_var())?
        .is_some_and(|value| !value.trim().is_empty());
    Ok(if present { "set" } else { "not set" })
}

pub(crate) fn print_heading(text: &str) {
    println!("\n{}", text.bold().cyan());
}

pub(crate) fn print_records(records: &[SearchRecord]) {
    if records.is_empty() {
        println!("   {}", "(no results)".dimmed());
        return;
    }

    for (index, record) in records.iter().enumerate() {
        println!("  {}. {}", index + 1, record.title.bold());
        if !record.link.is_empty() {
            println!("     {}", record.link.underline());
        }
        if !record.snippet.is_empty() {
            println!("     {}", record.snippet);
        }
    }
}

pub(crate) fn join_words(words: &[String]) -> String {
    words.join(" ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_words_trims_edges() {
        let words = vec!["data".to_string(), "engineering ".to_string()];
        assert_eq!(join_words(&words), "data engineering");
        assert_eq!(join_words(&[]), "");
    }
}
