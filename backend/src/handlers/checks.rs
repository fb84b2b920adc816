// src/handlers/checks.rs

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::{
    catalog,
    error::AppError,
    handlers::session_not_found,
    models::progress::{ProgressSnapshot, ProgressTracker},
    session::SessionStore,
};

#[derive(Debug, Deserialize, Validate)]
pub struct CheckAnswerRequest {
    #[validate(length(min = 1, max = 1))]
    pub answer: String,
}

#[derive(Debug, Serialize)]
pub struct CheckAnswerResponse {
    pub correct: bool,
    /// False for a repeat of an already credited check.
    pub newly_awarded: bool,
    pub xp_awarded: u32,
    /// Explanation when correct, hint otherwise.
    pub message: &'static str,
    /// Achievements unlocked by this answer, in unlock order.
    pub unlocked: Vec<String>,
    pub progress: ProgressSnapshot,
}

/// Grades one quick check and credits it at most once per session.
///
/// Wrong answers and repeats leave the session untouched.
pub async fn submit_check(
    State(sessions): State<Arc<SessionStore>>,
    State(tracker): State<Arc<ProgressTracker>>,
    Path((id, check_id)): Path<(Uuid, String)>,
    Json(req): Json<CheckAnswerRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;

    let check = catalog::find_quick_check(&check_id)
        .ok_or_else(|| AppError::NotFound(format!("Quick check '{}' not found", check_id)))?;

    let answer = req.answer.trim().to_ascii_uppercase();
    if !check.question.has_option(&answer) {
        return Err(AppError::BadRequest(format!(
            "'{}' is not an option for {}",
            req.answer, check_id
        )));
    }
    let correct = check.question.is_correct(&answer);

    let response = sessions
        .with_session(&id, |s| {
            let before = s.progress.xp();
            let unlocked_before = s.progress.achievements().len();

            let newly_awarded = correct && {
                let definition = check.definition(&s.progress);
                tracker.award_check(&mut s.progress, &definition)
            };

            CheckAnswerResponse {
                correct,
                newly_awarded,
                xp_awarded: s.progress.xp() - before,
                message: if correct {
                    check.explanation
                } else {
                    check.hint
                },
                unlocked: s.progress.achievements()[unlocked_before..].to_vec(),
                progress: ProgressSnapshot::from(&s.progress),
            }
        })
        .ok_or_else(|| session_not_found(&id))?;

    tracing::debug!(
        "Session {} check {}: correct={} newly_awarded={}",
        id,
        check_id,
        response.correct,
        response.newly_awarded
    );

    Ok(Json(response))
}
