//! Dictation practice CLI library
//!
//! This module re-exports the CLI's modules for integration testing.

pub mod config;
pub mod practice;
pub mod report;
pub mod timer;
pub mod version;

pub use config::DictationConfig;
pub use practice::{PracticeError, PracticeOutcome, PracticeSession};
pub use timer::PracticeTimer;
