//! One practice round: content, timer, and the scored submission

use anyhow::Result;
use thiserror::Error;
use tracing::{debug, info};

use dictation_content::Content;
use dictation_scoring::Comparison;
use dictation_store::{AttemptDatabase, AttemptRecord, NewAttempt};

use crate::timer::PracticeTimer;

#[derive(Error, Debug, PartialEq)]
pub enum PracticeError {
    #[error("Please enter your transcription before submitting")]
    EmptyTranscription,

    #[error("This exercise has no original text to compare against")]
    EmptyOriginal,
}

/// A submitted and stored attempt
#[derive(Debug)]
pub struct PracticeOutcome {
    pub record: AttemptRecord,
    pub comparison: Comparison,
}

/// Content under practice plus its running timer
#[derive(Debug)]
pub struct PracticeSession {
    template: NewAttempt,
    timer: PracticeTimer,
}

impl PracticeSession {
    /// Fresh practice on fetched content; the article id names the group
    pub fn from_content(content: &Content) -> Self {
        Self {
            template: NewAttempt {
                group_id: content.article_id.to_string(),
                audio_url: content.audio_url.clone(),
                original_text: content.original_text.clone(),
                title: content.title.clone(),
                description: content.description.clone(),
                ..NewAttempt::default()
            },
            timer: PracticeTimer::new(),
        }
    }

    /// Practice again on a stored attempt's content, in the same group
    pub fn redo(record: &AttemptRecord) -> Self {
        Self {
            template: NewAttempt::redo_of(record),
            timer: PracticeTimer::new(),
        }
    }

    pub fn group_id(&self) -> &str {
        &self.template.group_id
    }

    pub fn title(&self) -> &str {
        &self.template.title
    }

    pub fn description(&self) -> &str {
        &self.template.description
    }

    pub fn audio_url(&self) -> &str {
        &self.template.audio_url
    }

    pub fn original_text(&self) -> &str {
        &self.template.original_text
    }

    pub fn timer(&self) -> &PracticeTimer {
        &self.timer
    }

    pub fn timer_mut(&mut self) -> &mut PracticeTimer {
        &mut self.timer
    }

    /// Score the transcription and store it. The timer stops here.
    pub fn submit(&mut self, user_text: &str, db: &AttemptDatabase) -> Result<PracticeOutcome> {
        if user_text.trim().is_empty() {
            return Err(PracticeError::EmptyTranscription.into());
        }
        if self.template.original_text.trim().is_empty() {
            return Err(PracticeError::EmptyOriginal.into());
        }

        let time_spent_seconds = self.timer.finish();
        let comparison = Comparison::new(&self.template.original_text, user_text);
        debug!(
            "Alignment distance {} over {}/{} tokens",
            comparison.alignment().distance(),
            comparison.alignment().origin_len(),
            comparison.alignment().candidate_len()
        );

        let attempt = NewAttempt {
            user_text: user_text.to_string(),
            score: comparison.score(),
            time_spent_seconds,
            ..self.template.clone()
        };
        let record = db.insert_attempt(&attempt)?;

        info!(
            "Scored {:.2} after {:.1}s of practice",
            record.score, record.time_spent_seconds
        );

        Ok(PracticeOutcome { record, comparison })
    }
}
