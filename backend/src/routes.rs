// src/routes.rs

use axum::{
    Router,
    http::{HeaderValue, Method},
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{checks, design, pages, quiz, sessions},
    state::AppState,
};

/// Assembles the main application router.
///
/// * Static lesson content (pages, quiz paper, design options) needs no session.
/// * Everything that reads or changes progress is nested under `/api/sessions/{id}`.
/// * Applies global middleware (Trace, CORS).
pub fn create_router(state: AppState) -> Router {
    let origins: Vec<HeaderValue> = state
        .config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    let content_routes = Router::new()
        .route("/pages", get(pages::list_pages))
        .route("/pages/{page}", get(pages::get_page))
        .route("/quiz", get(quiz::get_quiz))
        .route("/design/options", get(design::get_options));

    let session_routes = Router::new()
        .route("/", post(sessions::create_session))
        .route(
            "/{id}",
            get(sessions::get_progress).delete(sessions::end_session),
        )
        .route("/{id}/checks/{check_id}", post(checks::submit_check))
        .route("/{id}/quiz", post(quiz::submit_quiz))
        .route("/{id}/quiz/feedback", post(quiz::quiz_feedback))
        .route("/{id}/design", post(design::submit_design))
        .route("/{id}/design/feedback", post(design::design_feedback));

    Router::new()
        .nest("/api", content_routes)
        .nest("/api/sessions", session_routes)
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
