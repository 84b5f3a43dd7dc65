use std::process::ExitCode;

use anyhow::Result;
use colored::Colorize;

use crate::client::Credential;
use crate::config::{Config, LlmProvider};
use crate::planner::{
    DegreeDetails, PlanError, PlanPipeline, PlanRequest, PlanRun, PlanSubject, parse_provider,
};

use super::args::{DegreeArgs, ProviderArgs, TopicArgs};
use super::util::{join_words, print_heading, print_records};

pub(crate) async fn handle_topic(args: TopicArgs, config: &Config) -> Result<ExitCode> {
    let Some((provider, credential)) = resolve_provider(&args.provider, config)? else {
        return Ok(ExitCode::FAILURE);
    };

    let topic = join_words(&args.topic);
    let mut pipeline = PlanPipeline::from_config(config);
    if let Some(limit) = args.max_results.filter(|&limit| limit > 0) {
        pipeline = pipeline.with_course_limit(limit);
    }

    let request = PlanRequest::topic(topic.as_str(), provider, credential);
    match search_banner(&request) {
        Ok(banner) => println!("{banner}"),
        Err(err) => return Ok(report_advisory(&err)),
    }
    let run = match pipeline.run(&request).await {
        Ok(run) => run,
        Err(err) => return Ok(report_advisory(&err)),
    };

    if !args.hide_sources {
        print_heading("Discovered courses");
        print_records(&run.sources);
    }
    print_plan(&format!("Learning plan for '{topic}'"), provider, &run);
    Ok(ExitCode::SUCCESS)
}

pub(crate) async fn handle_degree(args: DegreeArgs, config: &Config) -> Result<ExitCode> {
    let Some((provider, credential)) = resolve_provider(&args.provider, config)? else {
        return Ok(ExitCode::FAILURE);
    };

    let details = DegreeDetails {
        school: args.school.trim().to_string(),
        major: args.major.trim().to_string(),
        years: args.years,
        preferences: args.preferences.trim().to_string(),
    };
    let heading = format!("{} plan at {}", details.major, details.school);

    let pipeline = PlanPipeline::from_config(config);
    let request = PlanRequest::degree(details, provider, credential);
    let run = match pipeline.run(&request).await {
        Ok(run) => run,
        Err(err) => return Ok(report_advisory(&err)),
    };

    if args.show_sources {
        print_heading("Curriculum sources");
        print_records(&run.sources);
        print_heading("Elective suggestions");
        print_records(&run.electives);
    }
    print_plan(&heading, provider, &run);
    Ok(ExitCode::SUCCESS)
}

/// Progress line for a topic search, only for requests that pass validation.
fn search_banner(request: &PlanRequest) -> Result<String, PlanError> {
    request.validate()?;
    let topic = match &request.subject {
        PlanSubject::Topic(topic) => topic.trim(),
        PlanSubject::Degree(details) => details.major.trim(),
    };
    Ok(format!("🔎 Searching for {} courses...", topic.bold()))
}

/// `None` means an unsupported provider name was given and already reported.
fn resolve_provider(
    args: &ProviderArgs,
    config: &Config,
) -> Result<Option<(LlmProvider, Credential)>> {
    let provider = match args.provider.as_deref() {
        Some(name) => match parse_provider(name) {
            Ok(provider) => provider,
            Err(err) => {
                report_advisory(&err);
                return Ok(None);
            }
        },
        None => config.llm.provider,
    };

    let credential = Credential::resolve(args.api_key.as_deref(), provider)?;
    Ok(Some((provider, credential)))
}

fn report_advisory(err: &PlanError) -> ExitCode {
    eprintln!("{} {}", "⚠️ ".yellow(), err.to_string().yellow());
    if err.is_usage_error() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn print_plan(heading: &str, provider: LlmProvider, run: &PlanRun) {
    print_heading(heading);
    println!("{}", format!("(generated with {})", provider.display_name()).dimmed());
    println!();
    println!("{}", run.plan);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_banner_for_blank_topic() {
        let request = PlanRequest::topic("   ", LlmProvider::OpenAi, Credential::new("sk-test"));
        let err = search_banner(&request).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Please provide the following required fields: topic"
        );
    }

    #[test]
    fn no_banner_without_credential() {
        let request = PlanRequest::topic("rust", LlmProvider::OpenAi, Credential::new(""));
        assert!(search_banner(&request).is_err());
    }

    #[test]
    fn banner_names_the_trimmed_topic() {
        let request = PlanRequest::topic(
            " data engineering ",
            LlmProvider::Anthropic,
            Credential::new("sk-test"),
        );
        let banner = search_banner(&request).unwrap();
        assert!(banner.starts_with("🔎 Searching for "));
        assert!(banner.contains("data engineering"));
        assert!(banner.ends_with("courses..."));
    }
}
