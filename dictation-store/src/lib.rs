//! Practice attempt storage for the dictation tool
//!
//! Embedded SQLite store of scored attempts with the history workflows the
//! practice UI needs: newest-first listing, per-content groups (redo), single
//! and group deletion, and aggregate statistics.
//!
//! Only the score and the two raw texts are stored. Diff views are recomputed
//! on demand from `original_text` / `user_text`.

pub mod database;
pub mod models;

// Re-export main types
pub use database::AttemptDatabase;
pub use models::{AttemptRecord, NewAttempt, PracticeStats};
