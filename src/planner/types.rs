use crate::client::Credential;
use crate::config::LlmProvider;
use crate::prompt::PromptMessages;
use crate::search::SearchRecord;

use super::PlanError;

/// School, major and timeline for a degree plan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DegreeDetails {
    pub school: String,
    pub major: String,
    pub years: Option<u32>,
    /// Free text appended verbatim to the prompt.
    pub preferences: String,
}

impl DegreeDetails {
    /// Terms for the curriculum query: `"<school> <major>"`.
    pub fn curriculum_terms(&self) -> String {
        format!("{} {}", self.school.trim(), self.major.trim())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanSubject {
    Topic(String),
    Degree(DegreeDetails),
}

/// One planning request. Lives for a single pipeline run.
#[derive(Debug, Clone)]
pub struct PlanRequest {
    pub subject: PlanSubject,
    pub provider: LlmProvider,
    pub credential: Credential,
}

impl PlanRequest {
    pub fn topic(topic: impl Into<String>, provider: LlmProvider, credential: Credential) -> Self {
        Self {
            subject: PlanSubject::Topic(topic.into()),
            provider,
            credential,
        }
    }

    pub fn degree(details: DegreeDetails, provider: LlmProvider, credential: Credential) -> Self {
        Self {
            subject: PlanSubject::Degree(details),
            provider,
            credential,
        }
    }

    /// Lists every blank required field in display order.
    pub fn validate(&self) -> Result<(), PlanError> {
        let mut missing = Vec::new();
        if self.credential.is_empty() {
            missing.push("API key");
        }

        match &self.subject {
            PlanSubject::Topic(topic) => {
                if topic.trim().is_empty() {
                    missing.push("topic");
                }
            }
            PlanSubject::Degree(details) => {
                if details.school.trim().is_empty() {
                    missing.push("university name");
                }
                if details.major.trim().is_empty() {
                    missing.push("major/program");
                }
                if details.years.is_none_or(|years| years == 0) {
                    missing.push("number of years");
                }
            }
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(PlanError::InvalidInput { missing })
        }
    }
}

/// Case-insensitive provider lookup with the advisory for unknown names.
pub fn parse_provider(name: &str) -> Result<LlmProvider, PlanError> {
    name.parse().map_err(|_| PlanError::UnsupportedProvider)
}

/// Everything a pipeline run produced, so the caller can choose what to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanRun {
    /// Courses for a topic request, curriculum pages for a degree request.
    pub sources: Vec<SearchRecord>,
    /// Elective suggestions; empty for topic requests.
    pub electives: Vec<SearchRecord>,
    pub messages: PromptMessages,
    /// Plan text or the advisory that replaced it.
    pub plan: String,
}
