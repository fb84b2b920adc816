// src/config.rs

use std::env;
use std::time::Duration;

use dotenvy::dotenv;
use url::Url;

/// XP for a correctly answered quick check.
pub const QUICK_CHECK_XP: u32 = 15;
/// XP per correct multiple-choice answer on the final quiz.
pub const QUIZ_XP_PER_CORRECT: u32 = 10;
/// Flat bonus for submitting the final quiz at all.
pub const QUIZ_PARTICIPATION_XP: u32 = 25;
/// Bonus for a perfect final quiz.
pub const QUIZ_PERFECT_XP: u32 = 50;
/// XP for submitting a treatment design.
pub const DESIGN_CHALLENGE_XP: u32 = 50;
/// XP for requesting feedback (design or short answers).
pub const FEEDBACK_XP: u32 = 15;

/// XP at which the progress bar is full.
pub const PROGRESS_CAP_XP: u32 = 500;

pub const DEFAULT_FEEDBACK_API_URL: &str = "https://api.anthropic.com/v1/messages";
pub const DEFAULT_FEEDBACK_MODEL: &str = "claude-sonnet-4-20250514";

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub rust_log: String,
    pub allowed_origins: Vec<String>,
    pub session_ttl_seconds: u64,
    pub feedback: FeedbackConfig,
}

/// Settings for the external text-generation collaborator.
/// `api_key == None` disables the collaborator; every request then gets fallback text.
#[derive(Debug, Clone)]
pub struct FeedbackConfig {
    pub api_url: Url,
    pub api_key: Option<String>,
    pub model: String,
    pub max_tokens: u32,
    pub timeout: Duration,
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            api_url: Url::parse(DEFAULT_FEEDBACK_API_URL).expect("default feedback URL is valid"),
            api_key: None,
            model: DEFAULT_FEEDBACK_MODEL.to_string(),
            max_tokens: 2000,
            timeout: Duration::from_secs(60),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let allowed_origins = env::var("ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000,http://127.0.0.1:3000".to_string())
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect();

        let session_ttl_seconds = parse_env("SESSION_TTL_SECONDS", 4 * 60 * 60);

        let api_url = env::var("FEEDBACK_API_URL")
            .map(|raw| Url::parse(&raw).expect("FEEDBACK_API_URL must be a valid URL"))
            .unwrap_or_else(|_| FeedbackConfig::default().api_url);

        let api_key = env::var("FEEDBACK_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());

        let model =
            env::var("FEEDBACK_MODEL").unwrap_or_else(|_| DEFAULT_FEEDBACK_MODEL.to_string());

        let feedback = FeedbackConfig {
            api_url,
            api_key,
            model,
            max_tokens: parse_env("FEEDBACK_MAX_TOKENS", 2000),
            timeout: Duration::from_secs(parse_env("FEEDBACK_TIMEOUT_SECONDS", 60)),
        };

        Self {
            bind_addr,
            rust_log,
            allowed_origins,
            session_ttl_seconds,
            feedback,
        }
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}
