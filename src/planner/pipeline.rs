use std::sync::Arc;

use tracing::{debug, info};

use crate::client::HttpClientFactory;
use crate::config::{Config, SearchSettings};
use crate::prompt::{build_degree_messages, build_topic_messages};
use crate::search::{SearchProfile, Searcher};

use super::{PlanError, PlanGenerator, PlanRequest, PlanRun, PlanSubject};

/// Validate, search, build the prompt, generate. Strictly in that order.
#[derive(Debug, Clone)]
pub struct PlanPipeline {
    searcher: Searcher,
    generator: PlanGenerator,
    search: SearchSettings,
}

impl PlanPipeline {
    pub fn new(searcher: Searcher, generator: PlanGenerator, search: SearchSettings) -> Self {
        Self {
            searcher,
            generator,
            search,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let factory = HttpClientFactory::new(config.llm.clone(), config.models.clone());
        let generator = PlanGenerator::new(
            Arc::new(factory),
            config.models.max_tokens,
            config.models.temperature,
        );
        Self::new(
            Searcher::from_settings(&config.search),
            generator,
            config.search.clone(),
        )
    }

    /// Overrides how many course results the topic search considers.
    pub fn with_course_limit(mut self, limit: usize) -> Self {
        self.search.course_results = limit;
        self
    }

    /// Validation failures and an empty course search are returned as
    /// errors; generation failures are carried as the plan text.
    pub async fn run(&self, request: &PlanRequest) -> Result<PlanRun, PlanError> {
        request.validate()?;

        match &request.subject {
            PlanSubject::Topic(topic) => {
                let topic = topic.trim();
                let courses = self
                    .searcher
                    .search(
                        SearchProfile::Courses,
                        topic,
                        SearchProfile::Courses.default_limit(&self.search),
                    )
                    .await;
                if courses.is_empty() {
                    return Err(PlanError::NoCoursesFound);
                }
                info!(count = courses.len(), "courses discovered");

                let messages = build_topic_messages(topic, &courses);
                let plan = self
                    .generator
                    .generate_plan(request.provider, &request.credential, &messages)
                    .await;

                Ok(PlanRun {
                    sources: courses,
                    electives: Vec::new(),
                    messages,
                    plan,
                })
            }
            PlanSubject::Degree(details) => {
                let curriculum = self
                    .searcher
                    .search(
                        SearchProfile::Curriculum,
                        &details.curriculum_terms(),
                        SearchProfile::Curriculum.default_limit(&self.search),
                    )
                    .await;
                let electives = self
                    .searcher
                    .search(
                        SearchProfile::Electives,
                        details.major.trim(),
                        SearchProfile::Electives.default_limit(&self.search),
                    )
                    .await;
                debug!(
                    curriculum = curriculum.len(),
                    electives = electives.len(),
                    "degree sources gathered"
                );

                let messages = build_degree_messages(details, &curriculum, &electives);
                let plan = self
                    .generator
                    .generate_plan(request.provider, &request.credential, &messages)
                    .await;

                Ok(PlanRun {
                    sources: curriculum,
                    electives,
                    messages,
                    plan,
                })
            }
        }
    }
}
