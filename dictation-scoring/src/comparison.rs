//! One comparison of a reference transcript with a user transcription
//!
//! Tokenizes both texts and aligns them once; the score and the diff view are
//! both derived from that alignment so they can never disagree.

use serde::Serialize;

use crate::alignment::{align, Alignment, Segment};
use crate::render::DiffView;
use crate::tokenizer::tokenize;

#[derive(Debug, Clone)]
pub struct Comparison {
    alignment: Alignment,
    score: f64,
    view: DiffView,
}

/// Serializable summary of a comparison
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonReport {
    pub score: f64,
    pub distance: usize,
    pub origin_tokens: usize,
    pub candidate_tokens: usize,
    pub segments: Vec<Segment>,
    pub view: DiffView,
}

impl Comparison {
    pub fn new(origin_text: &str, candidate_text: &str) -> Self {
        let alignment = align(&tokenize(origin_text), &tokenize(candidate_text));
        Self::from_alignment(alignment)
    }

    pub fn from_alignment(alignment: Alignment) -> Self {
        let score = alignment.score();
        let view = DiffView::from_alignment(&alignment);
        Self {
            alignment,
            score,
            view,
        }
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn alignment(&self) -> &Alignment {
        &self.alignment
    }

    pub fn view(&self) -> &DiffView {
        &self.view
    }

    /// True when the candidate reproduces every origin token in order
    pub fn is_perfect(&self) -> bool {
        self.alignment.distance() == 0
    }

    pub fn report(&self) -> ComparisonReport {
        ComparisonReport {
            score: self.score,
            distance: self.alignment.distance(),
            origin_tokens: self.alignment.origin_len(),
            candidate_tokens: self.alignment.candidate_len(),
            segments: self.alignment.segments().to_vec(),
            view: self.view.clone(),
        }
    }
}

/// Compare two texts and serialize the report as JSON
pub fn comparison_json(origin_text: &str, candidate_text: &str) -> serde_json::Result<String> {
    serde_json::to_string(&Comparison::new(origin_text, candidate_text).report())
}
