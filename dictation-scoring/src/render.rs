//! Diff views projected from an alignment
//!
//! The view is display-agnostic: each side is a list of tokens flagged as
//! plain or as a difference. [`DiffView::markup`] turns it into word-diff
//! text for terminals and logs.

use serde::{Deserialize, Serialize};

use crate::alignment::{align, Alignment, SegmentKind};
use crate::tokenizer::tokenize;

/// One token of a diff view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffToken {
    pub text: String,
    pub is_difference: bool,
}

/// Parallel origin-side and candidate-side views of one alignment
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffView {
    pub origin: Vec<DiffToken>,
    pub candidate: Vec<DiffToken>,
}

/// Word-diff markup of both sides
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffMarkup {
    pub origin: String,
    pub candidate: String,
}

impl DiffView {
    /// Project an alignment into two views
    ///
    /// - `Unchanged` → plain on both sides
    /// - `Removed` → difference on the origin side only
    /// - `Inserted` → difference on the candidate side only
    pub fn from_alignment(alignment: &Alignment) -> Self {
        let mut view = DiffView::default();

        for segment in alignment.segments() {
            let tokens = segment.tokens.iter();
            match segment.kind {
                SegmentKind::Unchanged => {
                    for token in tokens {
                        view.origin.push(DiffToken::plain(token));
                        view.candidate.push(DiffToken::plain(token));
                    }
                }
                SegmentKind::Removed => {
                    view.origin.extend(tokens.map(|t| DiffToken::difference(t)));
                }
                SegmentKind::Inserted => {
                    view.candidate.extend(tokens.map(|t| DiffToken::difference(t)));
                }
            }
        }

        view
    }

    /// Number of plain tokens on the origin side
    pub fn plain_count(&self) -> usize {
        self.origin.iter().filter(|t| !t.is_difference).count()
    }

    /// Number of flagged tokens across both sides
    pub fn difference_count(&self) -> usize {
        self.origin
            .iter()
            .chain(self.candidate.iter())
            .filter(|t| t.is_difference)
            .count()
    }

    /// Word-diff markup: `[-removed words-]` on the origin side,
    /// `{+inserted words+}` on the candidate side
    pub fn markup(&self) -> DiffMarkup {
        DiffMarkup {
            origin: mark_side(&self.origin, "[-", "-]"),
            candidate: mark_side(&self.candidate, "{+", "+}"),
        }
    }
}

impl DiffToken {
    fn plain(text: &str) -> Self {
        Self {
            text: text.to_owned(),
            is_difference: false,
        }
    }

    fn difference(text: &str) -> Self {
        Self {
            text: text.to_owned(),
            is_difference: true,
        }
    }
}

/// Tokenize, align and project two raw texts
pub fn render_diff(origin: &str, candidate: &str) -> DiffView {
    DiffView::from_alignment(&align(&tokenize(origin), &tokenize(candidate)))
}

// Adjacent flagged tokens share one marker pair
fn mark_side(tokens: &[DiffToken], open: &str, close: &str) -> String {
    let mut out = String::new();
    let mut in_marker = false;

    for (idx, token) in tokens.iter().enumerate() {
        if idx > 0 {
            out.push(' ');
        }
        if token.is_difference && !in_marker {
            out.push_str(open);
            in_marker = true;
        }
        out.push_str(&token.text);

        let next_flagged = tokens.get(idx + 1).is_some_and(|t| t.is_difference);
        if in_marker && !next_flagged {
            out.push_str(close);
            in_marker = false;
        }
    }

    out
}
