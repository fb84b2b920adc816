// src/handlers/design.rs

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use serde::Serialize;
use uuid::Uuid;
use validator::Validate;

use crate::{
    catalog::{DESIGN_CHALLENGE, DESIGN_FEEDBACK},
    error::AppError,
    handlers::{FeedbackResponse, session_not_found},
    models::{
        design::{DesignOptions, DesignSummary, SubmitDesignRequest, TreatmentDesign},
        progress::{ProgressSnapshot, ProgressTracker},
    },
    services::{feedback::FeedbackService, prompts},
    session::SessionStore,
};

#[derive(Debug, Serialize)]
pub struct SubmitDesignResponse {
    pub summary: DesignSummary,
    pub newly_awarded: bool,
    pub xp_awarded: u32,
    pub unlocked: Vec<String>,
    pub progress: ProgressSnapshot,
}

/// Diseases and every allowed value of the design form.
pub async fn get_options() -> impl IntoResponse {
    Json(DesignOptions::all())
}

/// Validates and stores a treatment design.
/// The first submission earns the design-challenge XP; later ones replace the stored design.
pub async fn submit_design(
    State(sessions): State<Arc<SessionStore>>,
    State(tracker): State<Arc<ProgressTracker>>,
    Path(id): Path<Uuid>,
    Json(req): Json<SubmitDesignRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;
    let design = TreatmentDesign::try_from(req).map_err(AppError::BadRequest)?;
    let summary = DesignSummary::from(&design);

    let response = sessions
        .with_session(&id, |s| {
            let before = s.progress.xp();
            let unlocked_before = s.progress.achievements().len();

            let newly_awarded = tracker.award_check(&mut s.progress, &DESIGN_CHALLENGE);
            s.design = Some(design);

            SubmitDesignResponse {
                summary,
                newly_awarded,
                xp_awarded: s.progress.xp() - before,
                unlocked: s.progress.achievements()[unlocked_before..].to_vec(),
                progress: ProgressSnapshot::from(&s.progress),
            }
        })
        .ok_or_else(|| session_not_found(&id))?;

    tracing::info!(
        "Session {} submitted design targeting {}",
        id,
        response.summary.target
    );

    Ok(Json(response))
}

/// Expert feedback on the stored design.
///
/// XP for asking is credited before the collaborator is called; if the
/// collaborator fails the student gets deterministic fallback text.
pub async fn design_feedback(
    State(sessions): State<Arc<SessionStore>>,
    State(tracker): State<Arc<ProgressTracker>>,
    State(feedback): State<FeedbackService>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let (design, xp_awarded, progress) = sessions
        .with_session(&id, |s| -> Result<_, AppError> {
            let design = s.design.clone().ok_or_else(|| {
                AppError::Conflict("Submit a treatment design before asking for feedback".to_string())
            })?;

            let before = s.progress.xp();
            tracker.award_check(&mut s.progress, &DESIGN_FEEDBACK);
            Ok((
                design,
                s.progress.xp() - before,
                ProgressSnapshot::from(&s.progress),
            ))
        })
        .ok_or_else(|| session_not_found(&id))??;

    let prompt = prompts::design_prompt(&design);
    let reply = feedback
        .respond(&prompt, || prompts::design_fallback(&design))
        .await;

    Ok(Json(FeedbackResponse {
        feedback: reply,
        xp_awarded,
        progress,
    }))
}
