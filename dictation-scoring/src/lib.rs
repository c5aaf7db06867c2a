//! Transcription scoring for dictation practice
//!
//! Pure computation shared by the live practice flow and history review:
//! - Tokenization (lowercase ASCII alphanumeric words)
//! - Word-level edit-distance alignment
//! - Similarity score (0-100)
//! - Diff views projected from the same alignment
//!
//! Callers should go through [`Comparison`], which tokenizes and aligns once
//! and derives both the score and the diff view from that single alignment.
//!
//! ```
//! use dictation_scoring::Comparison;
//!
//! let cmp = Comparison::new("the cat sat", "the dog sat");
//! assert_eq!(dictation_scoring::format_score(cmp.score()), "66.67");
//! assert_eq!(cmp.view().plain_count(), 2);
//! ```

pub mod alignment;
pub mod comparison;
pub mod render;
pub mod score;
pub mod tokenizer;

// WASM bindings (only when building the browser module)
#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export main types
pub use alignment::{align, Alignment, Segment, SegmentKind};
pub use comparison::{comparison_json, Comparison, ComparisonReport};
pub use render::{render_diff, DiffMarkup, DiffToken, DiffView};
pub use score::{format_score, score, similarity};
pub use tokenizer::tokenize;
