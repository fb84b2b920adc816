// src/handlers/quiz.rs

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
    catalog::{
        FINAL_QUIZ, QUIZ_CHAMPION, QUIZ_COMPLETE, QUIZ_FEEDBACK, QUIZ_PERFECT,
        SHORT_ANSWER_Q7, SHORT_ANSWER_Q8,
    },
    config::{QUIZ_PARTICIPATION_XP, QUIZ_XP_PER_CORRECT},
    error::AppError,
    handlers::{FeedbackResponse, session_not_found},
    models::{
        progress::{ProgressSnapshot, ProgressTracker},
        quiz::{AnswerKey, PublicQuestion, QuizResult, SubmitQuizRequest, grade},
    },
    services::{feedback::FeedbackService, prompts},
    session::{QuizAttempt, SessionStore},
};

#[derive(Debug, Serialize)]
pub struct ShortAnswerPrompt {
    pub id: &'static str,
    pub prompt: &'static str,
}

#[derive(Debug, Serialize)]
pub struct QuizPaper {
    pub questions: Vec<PublicQuestion>,
    pub short_answers: [ShortAnswerPrompt; 2],
}

#[derive(Debug, Serialize)]
pub struct SubmitQuizResponse {
    #[serde(flatten)]
    pub result: QuizResult,
    pub status: &'static str,
    /// True only for the submission that earned the quiz XP.
    pub scored: bool,
    pub xp_awarded: u32,
    pub unlocked: Vec<String>,
    pub progress: ProgressSnapshot,
}

/// The final quiz without its answers.
pub async fn get_quiz() -> impl IntoResponse {
    Json(QuizPaper {
        questions: FINAL_QUIZ.iter().map(PublicQuestion::from).collect(),
        short_answers: [
            ShortAnswerPrompt {
                id: "q7",
                prompt: SHORT_ANSWER_Q7,
            },
            ShortAnswerPrompt {
                id: "q8",
                prompt: SHORT_ANSWER_Q8,
            },
        ],
    })
}

/// Grades the final quiz.
///
/// * The first submission earns `score * 10 + 25` XP and "Quiz Champion".
/// * A perfect first submission also earns the perfect-score bonus.
/// * Retakes are graded and reported but never score again.
pub async fn submit_quiz(
    State(sessions): State<Arc<SessionStore>>,
    State(tracker): State<Arc<ProgressTracker>>,
    Path(id): Path<Uuid>,
    Json(req): Json<SubmitQuizRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;

    let key = AnswerKey::from(&FINAL_QUIZ[..]);
    req.answers
        .check_against(&key)
        .and_then(|_| req.answers.check_choices(&FINAL_QUIZ))
        .map_err(AppError::BadRequest)?;

    let result = grade(&req.answers, &key);
    let short_answers = req.short_answers();

    let response = sessions
        .with_session(&id, |s| {
            let before = s.progress.xp();
            let unlocked_before = s.progress.achievements().len();

            let points = result.score * QUIZ_XP_PER_CORRECT + QUIZ_PARTICIPATION_XP;
            let scored =
                tracker.award_if_new(&mut s.progress, QUIZ_COMPLETE, points, Some(QUIZ_CHAMPION));
            if scored && result.is_perfect() {
                tracker.award_check(&mut s.progress, &QUIZ_PERFECT);
            }

            s.quiz = Some(QuizAttempt {
                result,
                short_answers,
            });

            SubmitQuizResponse {
                result,
                status: result.status(),
                scored,
                xp_awarded: s.progress.xp() - before,
                unlocked: s.progress.achievements()[unlocked_before..].to_vec(),
                progress: ProgressSnapshot::from(&s.progress),
            }
        })
        .ok_or_else(|| session_not_found(&id))?;

    tracing::info!(
        "Session {} quiz graded {}/{} (scored={})",
        id,
        result.score,
        result.total,
        response.scored
    );

    Ok(Json(response))
}

/// Feedback on the short answers of the latest quiz submission.
///
/// XP for asking is credited before the collaborator is called, so its
/// outcome never changes progress.
pub async fn quiz_feedback(
    State(sessions): State<Arc<SessionStore>>,
    State(tracker): State<Arc<ProgressTracker>>,
    State(feedback): State<FeedbackService>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let (attempt, xp_awarded, progress) = sessions
        .with_session(&id, |s| -> Result<_, AppError> {
            let attempt = s
                .quiz
                .clone()
                .ok_or_else(|| {
                    AppError::Conflict("Submit the quiz before asking for feedback".to_string())
                })?;
            if attempt.short_answers.is_empty() {
                return Err(AppError::Conflict(
                    "Answer at least one short-answer question to get feedback".to_string(),
                ));
            }

            let before = s.progress.xp();
            tracker.award_check(&mut s.progress, &QUIZ_FEEDBACK);
            Ok((
                attempt,
                s.progress.xp() - before,
                ProgressSnapshot::from(&s.progress),
            ))
        })
        .ok_or_else(|| session_not_found(&id))??;

    let prompt = prompts::quiz_prompt(
        &attempt.short_answers,
        attempt.result.score,
        attempt.result.total,
    );
    let reply = feedback.respond(&prompt, prompts::quiz_fallback).await;

    Ok(Json(FeedbackResponse {
        feedback: reply,
        xp_awarded,
        progress,
    }))
}
