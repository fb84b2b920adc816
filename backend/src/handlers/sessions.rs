// src/handlers/sessions.rs

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Serialize;
use uuid::Uuid;

use crate::{
    error::AppError, handlers::session_not_found, models::progress::ProgressSnapshot,
    session::SessionStore,
};

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub session_id: Uuid,
    pub started_at: chrono::DateTime<chrono::Utc>,
    pub progress: ProgressSnapshot,
}

/// Starts a lesson session with zero XP and no achievements.
pub async fn create_session(
    State(sessions): State<Arc<SessionStore>>,
) -> Result<impl IntoResponse, AppError> {
    let id = sessions.create();
    let response = sessions
        .with_session(&id, |s| SessionResponse {
            session_id: id,
            started_at: s.created_at,
            progress: ProgressSnapshot::from(&s.progress),
        })
        .ok_or_else(|| AppError::InternalServerError("Session vanished after creation".to_string()))?;

    tracing::info!("Session {} started", id);
    Ok((StatusCode::CREATED, Json(response)))
}

/// Current XP, level, progress and achievements.
pub async fn get_progress(
    State(sessions): State<Arc<SessionStore>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let response = sessions
        .with_session(&id, |s| SessionResponse {
            session_id: id,
            started_at: s.created_at,
            progress: ProgressSnapshot::from(&s.progress),
        })
        .ok_or_else(|| session_not_found(&id))?;

    Ok(Json(response))
}

/// Discards the session and everything recorded in it.
pub async fn end_session(
    State(sessions): State<Arc<SessionStore>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    if !sessions.remove(&id) {
        return Err(session_not_found(&id));
    }
    tracing::info!("Session {} ended", id);
    Ok(StatusCode::NO_CONTENT)
}
