use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::SearchSettings;

#[cfg(feature = "duckduckgo")]
mod duckduckgo;

#[cfg(feature = "duckduckgo")]
pub use duckduckgo::DuckDuckGoBackend;

const MISSING_TITLE: &str = "No title provided";

/// A filtered search hit handed to the prompt builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRecord {
    pub title: String,
    pub link: String,
    pub snippet: String,
}

/// An item as the search provider returned it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawSearchItem {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, alias = "link")]
    pub href: Option<String>,
    #[serde(default, alias = "snippet")]
    pub body: Option<String>,
}

impl From<RawSearchItem> for SearchRecord {
    fn from(item: RawSearchItem) -> Self {
        Self {
            title: item.title.unwrap_or_else(|| MISSING_TITLE.to_string()),
            link: item.href.unwrap_or_default(),
            snippet: item.body.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Failed to build search HTTP client: {0}")]
    Build(#[source] reqwest::Error),
    #[error("Search request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Search provider returned status {0}")]
    Status(reqwest::StatusCode),
    #[error("Could not parse search results: {0}")]
    Parse(String),
}

#[async_trait]
pub trait SearchBackend: Send + Sync {
    fn name(&self) -> &'static str;

    async fn text_search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<RawSearchItem>, SearchError>;
}

/// Call-site parameterization: query template plus title keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchProfile {
    Courses,
    Curriculum,
    Electives,
}

impl SearchProfile {
    fn template(self) -> &'static str {
        match self {
            SearchProfile::Courses => "best {terms} online course",
            SearchProfile::Curriculum => "{terms} degree requirements curriculum",
            SearchProfile::Electives => "best elective courses {terms} degree",
        }
    }

    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            SearchProfile::Courses => &["course", "program", "tutorial", "certificate"],
            SearchProfile::Curriculum => &["curriculum", "degree", "requirements", "major"],
            SearchProfile::Electives => &["elective", "course", "recommended"],
        }
    }

    pub fn query(self, terms: &str) -> String {
        self.template().replace("{terms}", terms.trim())
    }

    pub fn default_limit(self, settings: &SearchSettings) -> usize {
        match self {
            SearchProfile::Courses => settings.course_results,
            SearchProfile::Curriculum => settings.curriculum_results,
            SearchProfile::Electives => settings.elective_results,
        }
    }
}

/// Keeps records whose lowercased title contains at least one keyword.
pub fn retain_by_title(records: Vec<SearchRecord>, keywords: &[&str]) -> Vec<SearchRecord> {
    records
        .into_iter()
        .filter(|record| {
            let title = record.title.to_lowercase();
            keywords
                .iter()
                .any(|keyword| title.contains(&keyword.to_lowercase()))
        })
        .collect()
}

/// Front door to the optional search capability.
///
/// Backend availability is fixed at construction. Every failure degrades to
/// an empty result list.
#[derive(Clone, Default)]
pub struct Searcher {
    backend: Option<Arc<dyn SearchBackend>>,
}

impl Searcher {
    pub fn new(backend: Arc<dyn SearchBackend>) -> Self {
        Self {
            backend: Some(backend),
        }
    }

    pub fn unavailable() -> Self {
        Self { backend: None }
    }

    #[cfg(feature = "duckduckgo")]
    pub fn from_settings(settings: &SearchSettings) -> Self {
        if !settings.enabled {
            return Self::unavailable();
        }

        match DuckDuckGoBackend::new(settings) {
            Ok(backend) => Self::new(Arc::new(backend)),
            Err(err) => {
                warn!(error = %err, "search backend could not be initialised; continuing without search");
                Self::unavailable()
            }
        }
    }

    #[cfg(not(feature = "duckduckgo"))]
    pub fn from_settings(_settings: &SearchSettings) -> Self {
        Self::unavailable()
    }

    pub fn is_available(&self) -> bool {
        self.backend.is_some()
    }

    pub async fn search(
        &self,
        profile: SearchProfile,
        terms: &str,
        max_results: usize,
    ) -> Vec<SearchRecord> {
        let Some(backend) = &self.backend else {
            warn!("search backend is not available; returning no results");
            return Vec::new();
        };

        let query = profile.query(terms);
        debug!(backend = backend.name(), %query, max_results, "issuing search");

        let items = match backend.text_search(&query, max_results).await {
            Ok(items) => items,
            Err(err) => {
                warn!(backend = backend.name(), error = %err, "search failed; treating as zero results");
                return Vec::new();
            }
        };

        let records = items
            .into_iter()
            .take(max_results)
            .map(SearchRecord::from)
            .collect();
        let kept = retain_by_title(records, profile.keywords());
        debug!(kept = kept.len(), ?profile, "search results filtered");
        kept
    }
}

impl std::fmt::Debug for Searcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Searcher")
            .field("backend", &self.backend.as_ref().map(|backend| backend.name()))
            .finish()
    }
}
