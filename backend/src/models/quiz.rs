// src/models/quiz.rs

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::utils::html::clean_text;

/// A static multiple-choice question. Option ids are letters ("A", "B", ...)
/// assigned by position.
#[derive(Debug, Clone, Copy)]
pub struct Question {
    pub id: &'static str,
    pub prompt: &'static str,
    pub options: &'static [&'static str],
    /// Letter of the correct option.
    pub answer: &'static str,
    /// Michigan Science Standard the question addresses.
    pub standard: &'static str,
}

impl Question {
    pub fn option_ids(&self) -> impl Iterator<Item = String> + '_ {
        (0..self.options.len()).map(option_letter)
    }

    pub fn has_option(&self, option_id: &str) -> bool {
        self.option_ids().any(|id| id == option_id)
    }

    pub fn is_correct(&self, option_id: &str) -> bool {
        self.answer == option_id
    }
}

fn option_letter(index: usize) -> String {
    char::from(b'A' + index as u8).to_string()
}

/// Option as shown to the student.
#[derive(Debug, Serialize)]
pub struct PublicOption {
    pub id: String,
    pub text: &'static str,
}

/// DTO for sending a question to the client (excludes the answer).
#[derive(Debug, Serialize)]
pub struct PublicQuestion {
    pub id: &'static str,
    pub prompt: &'static str,
    pub options: Vec<PublicOption>,
    pub standard: &'static str,
}

impl From<&Question> for PublicQuestion {
    fn from(q: &Question) -> Self {
        Self {
            id: q.id,
            prompt: q.prompt,
            options: q
                .options
                .iter()
                .enumerate()
                .map(|(i, text)| PublicOption {
                    id: option_letter(i),
                    text,
                })
                .collect(),
            standard: q.standard,
        }
    }
}

/// Mapping from question id to the correct option id. Its keys are the
/// canonical question list of a quiz.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerKey(BTreeMap<String, String>);

impl AnswerKey {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, question_id: &str) -> bool {
        self.0.contains_key(question_id)
    }
}

impl<Q: Into<String>, O: Into<String>> FromIterator<(Q, O)> for AnswerKey {
    fn from_iter<T: IntoIterator<Item = (Q, O)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(q, o)| (q.into(), o.into())).collect())
    }
}

impl From<&[Question]> for AnswerKey {
    fn from(questions: &[Question]) -> Self {
        questions.iter().map(|q| (q.id, q.answer)).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmittedAnswer {
    pub question_id: String,
    pub choice: String,
}

/// Ordered (question, chosen option) pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuizSubmission(pub Vec<SubmittedAnswer>);

impl QuizSubmission {
    /// The first choice submitted for `question_id`.
    pub fn choice_for(&self, question_id: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|a| a.question_id == question_id)
            .map(|a| a.choice.as_str())
    }

    /// Rejects repeated or unknown question ids.
    pub fn check_against(&self, key: &AnswerKey) -> Result<(), String> {
        let mut seen = HashSet::new();
        for answer in &self.0 {
            if !key.contains(&answer.question_id) {
                return Err(format!("Unknown question '{}'", answer.question_id));
            }
            if !seen.insert(answer.question_id.as_str()) {
                return Err(format!(
                    "Question '{}' answered more than once",
                    answer.question_id
                ));
            }
        }
        Ok(())
    }

    /// Rejects choices that are not an option letter of their question.
    /// Answers to questions missing from `questions` are left to [`Self::check_against`].
    pub fn check_choices(&self, questions: &[Question]) -> Result<(), String> {
        for answer in &self.0 {
            let Some(question) = questions.iter().find(|q| q.id == answer.question_id) else {
                continue;
            };
            if !question.has_option(&answer.choice) {
                return Err(format!(
                    "'{}' is not an option for {}",
                    answer.choice, answer.question_id
                ));
            }
        }
        Ok(())
    }
}

impl<Q: Into<String>, O: Into<String>> FromIterator<(Q, O)> for QuizSubmission {
    fn from_iter<T: IntoIterator<Item = (Q, O)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(q, o)| SubmittedAnswer {
                    question_id: q.into(),
                    choice: o.into(),
                })
                .collect(),
        )
    }
}

/// Free-text answers to the final quiz's short-answer questions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShortAnswers {
    pub q7: Option<String>,
    pub q8: Option<String>,
}

impl ShortAnswers {
    pub fn is_empty(&self) -> bool {
        self.q7.is_none() && self.q8.is_none()
    }
}

/// DTO for submitting the final quiz.
#[derive(Debug, Deserialize, Validate)]
pub struct SubmitQuizRequest {
    pub answers: QuizSubmission,
    #[validate(length(max = 4000, message = "Short answers must be at most 4000 characters."))]
    #[serde(default)]
    pub q7: String,
    #[validate(length(max = 4000, message = "Short answers must be at most 4000 characters."))]
    #[serde(default)]
    pub q8: String,
}

impl SubmitQuizRequest {
    pub fn short_answers(&self) -> ShortAnswers {
        ShortAnswers {
            q7: clean_text(&self.q7),
            q8: clean_text(&self.q8),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QuizResult {
    pub score: u32,
    pub total: u32,
    pub percentage: f64,
}

impl QuizResult {
    pub fn is_perfect(&self) -> bool {
        self.total > 0 && self.score == self.total
    }

    pub fn status(&self) -> &'static str {
        if self.percentage >= 80.0 {
            "Excellent"
        } else if self.percentage >= 60.0 {
            "Good Work"
        } else {
            "Keep Studying"
        }
    }
}

/// Grades `submission` against every question in `key`.
/// Unanswered questions count as incorrect.
pub fn grade(submission: &QuizSubmission, key: &AnswerKey) -> QuizResult {
    let score = key
        .0
        .iter()
        .filter(|(question_id, correct)| submission.choice_for(question_id) == Some(correct.as_str()))
        .count() as u32;
    let total = key.len() as u32;

    let percentage = if total == 0 {
        0.0
    } else {
        100.0 * f64::from(score) / f64::from(total)
    };

    QuizResult {
        score,
        total,
        percentage,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_question_key() -> AnswerKey {
        [("q1", "B"), ("q2", "B")].into_iter().collect()
    }

    #[test]
    fn test_grade_half() {
        let submission: QuizSubmission = [("q1", "B"), ("q2", "A")].into_iter().collect();

        let result = grade(&submission, &two_question_key());
        assert_eq!(
            result,
            QuizResult {
                score: 1,
                total: 2,
                percentage: 50.0
            }
        );
    }

    #[test]
    fn test_grade_unanswered_counts_as_wrong() {
        let submission: QuizSubmission = [("q2", "B")].into_iter().collect();

        let result = grade(&submission, &two_question_key());
        assert_eq!(result.score, 1);
        assert_eq!(result.total, 2);
        assert!(!result.is_perfect());
    }

    #[test]
    fn test_grade_empty_submission() {
        let result = grade(&QuizSubmission::default(), &two_question_key());
        assert_eq!(result.score, 0);
        assert_eq!(result.percentage, 0.0);
        assert_eq!(result.status(), "Keep Studying");
    }

    #[test]
    fn test_grade_perfect() {
        let submission: QuizSubmission = [("q2", "B"), ("q1", "B")].into_iter().collect();

        let result = grade(&submission, &two_question_key());
        assert!(result.is_perfect());
        assert_eq!(result.status(), "Excellent");
    }

    #[test]
    fn test_status_tiers() {
        let at = |percentage| QuizResult {
            score: 0,
            total: 1,
            percentage,
        };
        assert_eq!(at(80.0).status(), "Excellent");
        assert_eq!(at(66.7).status(), "Good Work");
        assert_eq!(at(60.0).status(), "Good Work");
        assert_eq!(at(50.0).status(), "Keep Studying");
    }

    #[test]
    fn test_check_against_rejects_duplicates_and_unknown() {
        let key = two_question_key();

        let dup: QuizSubmission = [("q1", "B"), ("q1", "A")].into_iter().collect();
        assert!(dup.check_against(&key).is_err());

        let unknown: QuizSubmission = [("q9", "B")].into_iter().collect();
        assert!(unknown.check_against(&key).is_err());

        let fine: QuizSubmission = [("q1", "C")].into_iter().collect();
        assert!(fine.check_against(&key).is_ok());
    }

    #[test]
    fn test_check_choices_rejects_unknown_letters() {
        let questions = [Question {
            id: "q1",
            prompt: "?",
            options: &["one", "two", "three", "four"],
            answer: "B",
            standard: "HS-LS1-2",
        }];

        let bogus: QuizSubmission = [("q1", "ZZZ")].into_iter().collect();
        let err = bogus.check_choices(&questions).unwrap_err();
        assert!(err.contains("ZZZ"));

        let lowercase: QuizSubmission = [("q1", "b")].into_iter().collect();
        assert!(lowercase.check_choices(&questions).is_err());

        let wrong_but_valid: QuizSubmission = [("q1", "D")].into_iter().collect();
        assert!(wrong_but_valid.check_choices(&questions).is_ok());
        assert_eq!(grade(&wrong_but_valid, &AnswerKey::from(&questions[..])).score, 0);
    }

    #[test]
    fn test_question_options() {
        let q = Question {
            id: "x",
            prompt: "?",
            options: &["one", "two", "three"],
            answer: "C",
            standard: "HS-LS1-1",
        };
        assert!(q.has_option("C"));
        assert!(!q.has_option("D"));
        assert!(q.is_correct("C"));

        let public = PublicQuestion::from(&q);
        assert_eq!(public.options[1].id, "B");
        assert_eq!(public.options[1].text, "two");
    }
}
