// src/models/progress.rs

use std::collections::{BTreeSet, HashSet};

use serde::Serialize;

use crate::config::PROGRESS_CAP_XP;

/// Per-session progress: XP, completed checks and unlocked achievements.
///
/// Only [`ProgressTracker::award_if_new`] mutates it, so `xp` never decreases
/// and each check contributes its points at most once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgressState {
    xp: u32,
    completed_checks: HashSet<String>,
    /// Unlock order, no duplicates.
    achievements: Vec<String>,
}

impl ProgressState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn xp(&self) -> u32 {
        self.xp
    }

    pub fn achievements(&self) -> &[String] {
        &self.achievements
    }

    pub fn is_completed(&self, check_id: &str) -> bool {
        self.completed_checks.contains(check_id)
    }

    pub fn has_achievement(&self, name: &str) -> bool {
        self.achievements.iter().any(|a| a == name)
    }

    fn unlock(&mut self, name: &str) -> bool {
        if self.has_achievement(name) {
            return false;
        }
        self.achievements.push(name.to_string());
        true
    }
}

/// A scorable event the presentation layer can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckDefinition {
    pub id: &'static str,
    pub points: u32,
    pub achievement_on_first_award: Option<&'static str>,
}

/// Achievement unlocked once every check in `required` is completed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositeRule {
    pub required: BTreeSet<String>,
    pub achievement: String,
}

impl CompositeRule {
    pub fn new<I, S>(required: I, achievement: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            required: required.into_iter().map(Into::into).collect(),
            achievement: achievement.into(),
        }
    }

    fn is_satisfied(&self, state: &ProgressState) -> bool {
        self.required.iter().all(|id| state.is_completed(id))
    }
}

/// Level tiers as inclusive lower XP bounds, highest first.
const LEVELS: [(u32, &str); 4] = [
    (400, "Biology Master"),
    (250, "Research Scientist"),
    (100, "Lab Technician"),
    (25, "Biology Student"),
];

const BASE_LEVEL: &str = "Beginner";

pub fn level(xp: u32) -> &'static str {
    LEVELS
        .iter()
        .find(|(threshold, _)| xp >= *threshold)
        .map(|(_, name)| *name)
        .unwrap_or(BASE_LEVEL)
}

pub fn progress_ratio(xp: u32) -> f64 {
    (f64::from(xp) / f64::from(PROGRESS_CAP_XP)).min(1.0)
}

/// Applies awards to a [`ProgressState`] and evaluates composite achievement rules.
#[derive(Debug, Clone, Default)]
pub struct ProgressTracker {
    rules: Vec<CompositeRule>,
}

impl ProgressTracker {
    pub fn new(rules: Vec<CompositeRule>) -> Self {
        Self { rules }
    }

    /// Credits `points` for `check_id` unless it was already credited.
    ///
    /// Returns `false` without touching `state` for a repeated check id.
    ///
    /// # Panics
    ///
    /// Panics on an empty `check_id` or zero `points`; both are caller bugs.
    pub fn award_if_new(
        &self,
        state: &mut ProgressState,
        check_id: &str,
        points: u32,
        achievement: Option<&str>,
    ) -> bool {
        assert!(!check_id.is_empty(), "check id must not be empty");
        assert!(points > 0, "check `{check_id}` must award positive points");

        if state.is_completed(check_id) {
            return false;
        }

        state.xp += points;
        state.completed_checks.insert(check_id.to_string());

        if let Some(name) = achievement {
            if state.unlock(name) {
                tracing::info!(check_id, achievement = name, "achievement unlocked");
            }
        }

        for rule in &self.rules {
            if rule.is_satisfied(state) && state.unlock(&rule.achievement) {
                tracing::info!(
                    check_id,
                    achievement = %rule.achievement,
                    "composite achievement unlocked"
                );
            }
        }

        true
    }

    /// Convenience over [`Self::award_if_new`] for a static check definition.
    pub fn award_check(&self, state: &mut ProgressState, check: &CheckDefinition) -> bool {
        self.award_if_new(state, check.id, check.points, check.achievement_on_first_award)
    }
}

/// Read-only view of a session's progress for the presentation layer.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProgressSnapshot {
    pub xp: u32,
    pub level: &'static str,
    pub progress: f64,
    pub achievements: Vec<String>,
    pub completed_checks: Vec<String>,
}

impl From<&ProgressState> for ProgressSnapshot {
    fn from(state: &ProgressState) -> Self {
        let completed_checks: BTreeSet<&String> = state.completed_checks.iter().collect();
        Self {
            xp: state.xp,
            level: level(state.xp),
            progress: progress_ratio(state.xp),
            achievements: state.achievements.clone(),
            completed_checks: completed_checks.into_iter().cloned().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expert_tracker() -> ProgressTracker {
        ProgressTracker::new(vec![CompositeRule::new(["c1", "c2"], "Expert")])
    }

    #[test]
    fn test_award_is_idempotent() {
        let tracker = ProgressTracker::default();
        let mut state = ProgressState::new();

        assert!(tracker.award_if_new(&mut state, "immune_q1", 15, Some("First Steps")));
        let after_first = state.clone();

        assert!(!tracker.award_if_new(&mut state, "immune_q1", 15, Some("First Steps")));
        assert_eq!(state, after_first);
        assert_eq!(state.xp(), 15);
    }

    #[test]
    fn test_repeat_with_different_points_is_ignored() {
        let tracker = ProgressTracker::default();
        let mut state = ProgressState::new();

        tracker.award_if_new(&mut state, "quiz_complete", 45, None);
        assert!(!tracker.award_if_new(&mut state, "quiz_complete", 85, Some("Quiz Champion")));
        assert_eq!(state.xp(), 45);
        assert!(state.achievements().is_empty());
    }

    #[test]
    fn test_xp_is_monotonic() {
        let tracker = ProgressTracker::default();
        let mut state = ProgressState::new();
        let mut last = state.xp();

        for id in ["a", "b", "a", "c", "b", "d"] {
            tracker.award_if_new(&mut state, id, 10, None);
            assert!(state.xp() >= last);
            last = state.xp();
        }
        assert_eq!(state.xp(), 40);
    }

    #[test]
    fn test_achievements_never_duplicate() {
        let tracker = ProgressTracker::default();
        let mut state = ProgressState::new();

        tracker.award_if_new(&mut state, "a", 5, Some("Explorer"));
        tracker.award_if_new(&mut state, "b", 5, Some("Explorer"));
        tracker.award_if_new(&mut state, "c", 5, Some("Scholar"));

        assert_eq!(state.achievements(), ["Explorer", "Scholar"]);
    }

    #[test]
    fn test_composite_requires_all_checks() {
        let tracker = expert_tracker();
        let mut state = ProgressState::new();

        tracker.award_if_new(&mut state, "c1", 15, None);
        assert!(!state.has_achievement("Expert"));

        tracker.award_if_new(&mut state, "c2", 15, None);
        assert_eq!(state.achievements(), ["Expert"]);
    }

    #[test]
    fn test_composite_either_order_fires_once() {
        let tracker = expert_tracker();
        let mut state = ProgressState::new();

        tracker.award_if_new(&mut state, "c2", 15, None);
        tracker.award_if_new(&mut state, "c1", 15, None);
        tracker.award_if_new(&mut state, "c1", 15, None);
        tracker.award_if_new(&mut state, "c3", 15, None);

        assert_eq!(state.achievements(), ["Expert"]);
    }

    #[test]
    fn test_single_achievement_precedes_composite() {
        let tracker = expert_tracker();
        let mut state = ProgressState::new();

        tracker.award_if_new(&mut state, "c1", 15, None);
        tracker.award_if_new(&mut state, "c2", 15, Some("Second"));

        assert_eq!(state.achievements(), ["Second", "Expert"]);
    }

    #[test]
    #[should_panic(expected = "check id must not be empty")]
    fn test_empty_check_id_panics() {
        ProgressTracker::default().award_if_new(&mut ProgressState::new(), "", 10, None);
    }

    #[test]
    #[should_panic(expected = "positive points")]
    fn test_zero_points_panics() {
        ProgressTracker::default().award_if_new(&mut ProgressState::new(), "x", 0, None);
    }

    #[test]
    fn test_level_thresholds() {
        assert_eq!(level(0), "Beginner");
        assert_eq!(level(24), "Beginner");
        assert_eq!(level(25), "Biology Student");
        assert_eq!(level(99), "Biology Student");
        assert_eq!(level(100), "Lab Technician");
        assert_eq!(level(250), "Research Scientist");
        assert_eq!(level(399), "Research Scientist");
        assert_eq!(level(400), "Biology Master");
        assert_eq!(level(10_000), "Biology Master");
    }

    #[test]
    fn test_progress_ratio_clamps() {
        assert_eq!(progress_ratio(0), 0.0);
        assert_eq!(progress_ratio(250), 0.5);
        assert_eq!(progress_ratio(500), 1.0);
        assert_eq!(progress_ratio(750), 1.0);
    }

    #[test]
    fn test_snapshot_sorts_checks() {
        let tracker = ProgressTracker::default();
        let mut state = ProgressState::new();
        tracker.award_if_new(&mut state, "drug_q1", 15, None);
        tracker.award_if_new(&mut state, "auto_q1", 15, None);

        let snapshot = ProgressSnapshot::from(&state);
        assert_eq!(snapshot.completed_checks, ["auto_q1", "drug_q1"]);
        assert_eq!(snapshot.level, "Biology Student");
        assert_eq!(snapshot.xp, 30);
    }
}
