use crate::client::ChatMessage;
use crate::planner::DegreeDetails;
use crate::search::SearchRecord;

pub(crate) const TOPIC_SYSTEM_PROMPT: &str = "You are a helpful educational advisor. Based on the search results, \
recommend a structured learning plan for the user. Your plan should list the courses in a logical order, \
summarise the unique aspects of each course, and suggest approximate durations. Include any relevant notes \
about prerequisites or progression.";

pub(crate) const DEGREE_SYSTEM_PROMPT: &str = "You are an academic advisor tasked with creating a realistic and \
actionable course plan. Use the provided degree requirement snippets to inform your plan.";

/// The system/user pair sent to a completion provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptMessages {
    pub system: String,
    pub user: String,
}

impl PromptMessages {
    pub fn to_chat(&self) -> Vec<ChatMessage> {
        vec![
            ChatMessage::system(self.system.as_str()),
            ChatMessage::user(self.user.as_str()),
        ]
    }
}

/// Renders records as `"<n>. <title> (<link>) - <snippet>"`, one per line,
/// numbered from 1.
pub fn render_records(records: &[SearchRecord]) -> String {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            format!(
                "{}. {} ({}) - {}",
                index + 1,
                record.title,
                record.link,
                record.snippet
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn build_topic_messages(topic: &str, courses: &[SearchRecord]) -> PromptMessages {
    let user = format!(
        "The user wants to learn about '{topic}'. Here are some course descriptions:\n\
         {courses}\n\n\
         Using these descriptions as a starting point, generate a clear and actionable learning plan.",
        courses = render_records(courses),
    );

    PromptMessages {
        system: TOPIC_SYSTEM_PROMPT.to_string(),
        user,
    }
}

pub fn build_degree_messages(
    details: &DegreeDetails,
    curriculum: &[SearchRecord],
    electives: &[SearchRecord],
) -> PromptMessages {
    let DegreeDetails {
        school,
        major,
        years,
        preferences,
    } = details;
    let years = years.map(|years| years.to_string()).unwrap_or_default();

    let user = format!(
        "A student is planning their {major} degree at {school}. They wish to graduate in {years} years.\n\
         Here are some snippets from official curriculum or degree requirement pages:\n\
         {curriculum}\n\n\
         Here are some search snippets listing recommended elective courses for {major}:\n\
         {electives}\n\n\
         Based on the above resources, generate a semester-by-semester course plan that satisfies the degree requirements.\n\
         Include general education courses as appropriate and note any prerequisites. When suggesting elective courses,\n\
         provide specific example courses relevant to the major using the elective snippets rather than generic placeholders.\n\
         Respect the desired graduation timeline. {preferences}",
        curriculum = render_records(curriculum),
        electives = render_records(electives),
    );

    PromptMessages {
        system: DEGREE_SYSTEM_PROMPT.to_string(),
        user: user.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ChatMessageRole;

    fn record(title: &str, link: &str, snippet: &str) -> SearchRecord {
        SearchRecord {
            title: title.to_string(),
            link: link.to_string(),
            snippet: snippet.to_string(),
        }
    }

    fn robotics() -> DegreeDetails {
        DegreeDetails {
            school: "Acme University".to_string(),
            major: "Robotics".to_string(),
            years: Some(4),
            preferences: "Prefer morning classes.".to_string(),
        }
    }

    #[test]
    fn render_records_numbers_from_one() {
        let records = vec![
            record("SQL Course", "https://a.example", "Joins."),
            record("Spark Tutorial", "https://b.example", "Streaming."),
            record("Airflow Certificate", "https://c.example", "DAGs."),
        ];

        assert_eq!(
            render_records(&records),
            "1. SQL Course (https://a.example) - Joins.\n\
             2. Spark Tutorial (https://b.example) - Streaming.\n\
             3. Airflow Certificate (https://c.example) - DAGs."
        );
    }

    #[test]
    fn render_records_empty_is_empty_string() {
        assert_eq!(render_records(&[]), "");
    }

    #[test]
    fn topic_messages_embed_topic_and_list() {
        let records = vec![record("Rust Course", "https://rust.example", "Ownership.")];
        let messages = build_topic_messages("systems programming", &records);

        assert_eq!(messages.system, TOPIC_SYSTEM_PROMPT);
        assert_eq!(
            messages.user,
            "The user wants to learn about 'systems programming'. Here are some course descriptions:\n\
             1. Rust Course (https://rust.example) - Ownership.\n\n\
             Using these descriptions as a starting point, generate a clear and actionable learning plan."
        );
    }

    #[test]
    fn degree_messages_cover_every_field() {
        let curriculum = vec![record(
            "Robotics Degree Requirements",
            "https://acme.edu/robotics",
            "120 credits.",
        )];
        let electives = vec![
            record("Recommended electives", "https://acme.edu/e1", "Vision."),
            record("Elective: Swarm Robotics", "https://acme.edu/e2", "Agents."),
        ];

        let messages = build_degree_messages(&robotics(), &curriculum, &electives);
        let user = &messages.user;

        assert_eq!(messages.system, DEGREE_SYSTEM_PROMPT);
        assert!(user.starts_with(
            "A student is planning their Robotics degree at Acme University. They wish to graduate in 4 years."
        ));
        assert!(user.contains(
            "requirement pages:\n1. Robotics Degree Requirements (https://acme.edu/robotics) - 120 credits.\n\n"
        ));
        assert!(user.contains(
            "elective courses for Robotics:\n1. Recommended electives (https://acme.edu/e1) - Vision.\n\
             2. Elective: Swarm Robotics (https://acme.edu/e2) - Agents.\n\n"
        ));
        assert!(user.contains("semester-by-semester"));
        assert!(user.ends_with("Respect the desired graduation timeline. Prefer morning classes."));
    }

    #[test]
    fn degree_messages_without_preferences_have_no_trailing_space() {
        let details = DegreeDetails {
            preferences: String::new(),
            ..robotics()
        };
        let messages = build_degree_messages(&details, &[], &[]);
        assert!(messages.user.ends_with("Respect the desired graduation timeline."));
    }

    #[test]
    fn building_is_deterministic() {
        let records = vec![record("Go Course", "https://go.example", "Goroutines.")];
        assert_eq!(
            build_topic_messages("go", &records),
            build_topic_messages("go", &records)
        );
    }

    #[test]
    fn to_chat_orders_system_then_user() {
        let chat = build_topic_messages("go", &[]).to_chat();
        assert_eq!(chat.len(), 2);
        assert_eq!(chat[0].role, ChatMessageRole::System);
        assert_eq!(chat[1].role, ChatMessageRole::User);
    }
}
