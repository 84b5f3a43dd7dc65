pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_MAX_TOKENS: u32 = 1024;
pub const DEFAULT_TEMPERATURE: f32 = 0.5;
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_ANTHROPIC_MODEL: &str = "claude-3-haiku-20240307";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com/v1";

pub const DEFAULT_SEARCH_BASE_URL: &str = "https://html.duckduckgo.com";
pub const DEFAULT_SEARCH_TIMEOUT_SECS: u64 = 15;
pub const DEFAULT_COURSE_RESULTS: usize = 5;
pub const DEFAULT_CURRICULUM_RESULTS: usize = 5;
pub const DEFAULT_ELECTIVE_RESULTS: usize = 3;

pub const MAX_TEMPERATURE: f32 = 2.0;
