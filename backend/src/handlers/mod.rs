// src/handlers/mod.rs

pub mod checks;
pub mod design;
pub mod pages;
pub mod quiz;
pub mod sessions;

use uuid::Uuid;

use crate::error::AppError;

pub(crate) fn session_not_found(id: &Uuid) -> AppError {
    AppError::NotFound(format!("Session '{}' not found", id))
}

/// Body returned by both feedback endpoints.
#[derive(Debug, serde::Serialize)]
pub struct FeedbackResponse {
    #[serde(flatten)]
    pub feedback: crate::services::feedback::FeedbackReply,
    pub xp_awarded: u32,
    pub progress: crate::models::progress::ProgressSnapshot,
}
