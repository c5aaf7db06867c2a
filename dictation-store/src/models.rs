//! Data models for practice attempts

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored dictation attempt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttemptRecord {
    // Identity
    pub id: String,
    pub group_id: String,

    // Source content
    pub audio_url: String,
    pub original_text: String,
    pub title: String,
    pub description: String,

    // Result
    pub user_text: String,
    pub score: f64,
    pub time_spent_seconds: f64,

    pub created_at: DateTime<Utc>,
}

/// Attempt data supplied by the caller; id and timestamp are assigned on insert
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewAttempt {
    pub group_id: String,
    pub audio_url: String,
    pub original_text: String,
    pub title: String,
    pub description: String,
    pub user_text: String,
    pub score: f64,
    pub time_spent_seconds: f64,
}

impl NewAttempt {
    /// Start a new attempt on the same content as an earlier one (same group)
    pub fn redo_of(record: &AttemptRecord) -> Self {
        Self {
            group_id: record.group_id.clone(),
            audio_url: record.audio_url.clone(),
            original_text: record.original_text.clone(),
            title: record.title.clone(),
            description: record.description.clone(),
            ..Self::default()
        }
    }
}

/// Aggregate statistics across all stored attempts
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PracticeStats {
    // Totals
    pub total_attempts: i64,
    pub total_groups: i64,
    pub total_time_seconds: f64,

    // Scores (None when nothing is stored)
    pub average_score: Option<f64>,
    pub median_score: Option<f64>,
    pub best_score: Option<f64>,

    pub last_attempt_at: Option<DateTime<Utc>>,
}

impl PracticeStats {
    /// Fill the score statistics from a list of scores
    pub fn with_scores(mut self, scores: &[f64]) -> Self {
        if scores.is_empty() {
            return self;
        }

        self.average_score = Some(statistical::mean(scores));
        self.median_score = Some(statistical::median(scores));
        self.best_score = scores.iter().copied().reduce(f64::max);
        self
    }

    pub fn total_time_minutes(&self) -> f64 {
        self.total_time_seconds / 60.0
    }
}
