use std::sync::Arc;

use axum::extract::FromRef;

use crate::{
    catalog,
    config::Config,
    models::progress::ProgressTracker,
    services::feedback::FeedbackService,
    session::SessionStore,
};

#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<SessionStore>,
    pub tracker: Arc<ProgressTracker>,
    pub feedback: FeedbackService,
    pub config: Config,
}

impl AppState {
    /// State with the lesson's achievement rules and the configured feedback client.
    pub fn new(config: Config) -> Self {
        let feedback = FeedbackService::from_config(config.feedback.clone());
        Self::with_feedback(config, feedback)
    }

    pub fn with_feedback(config: Config, feedback: FeedbackService) -> Self {
        Self {
            sessions: Arc::new(SessionStore::new(config.session_ttl_seconds)),
            tracker: Arc::new(ProgressTracker::new(catalog::composite_rules())),
            feedback,
            config,
        }
    }
}

impl FromRef<AppState> for Arc<SessionStore> {
    fn from_ref(state: &AppState) -> Self {
        state.sessions.clone()
    }
}

impl FromRef<AppState> for Arc<ProgressTracker> {
    fn from_ref(state: &AppState) -> Self {
        state.tracker.clone()
    }
}

impl FromRef<AppState> for FeedbackService {
    fn from_ref(state: &AppState) -> Self {
        state.feedback.clone()
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}
