use std::fmt;

use anyhow::Result;

use crate::config::{LlmProvider, env_string};

/// Provider API key supplied for a single request.
///
/// The secret is trimmed on construction and never shown by `Debug`.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into().trim().to_string())
    }

    /// Uses the explicit value when given, otherwise the provider's
    /// environment variable. Absence yields an empty credential.
    pub fn resolve(explicit: Option<&str>, provider: LlmProvider) -> Result<Self> {
        if let Some(secret) = explicit {
            return Ok(Self::new(secret));
        }

        let from_env = env_string(provider.api_key_env_var())?;
        Ok(from_env.map(Self::new).unwrap_or_default())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            f.write_str("Credential(<empty>)")
        } else {
            f.write_str("Credential(<redacted>)")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_trims_whitespace() {
        let credential = Credential::new("  sk-test \n");
        assert_eq!(credential.expose(), "sk-test");
        assert!(Credential::new("   ").is_empty());
    }

    #[test]
    fn debug_never_prints_secret() {
        let credential = Credential::new("sk-very-secret");
        let rendered = format!("{credential:?}");
        assert!(!rendered.contains("sk-very-secret"));
        assert_eq!(rendered, "Credential(<redacted>)");
        assert_eq!(format!("{:?}", Credential::default()), "Credential(<empty>)");
    }

    #[test]
    fn explicit_value_wins_over_environment() {
        let credential = Credential::resolve(Some("sk-flag"), LlmProvider::OpenAi).unwrap();
        assert_eq!(credential.expose(), "sk-flag");
    }
}
