//! Practice timer
//!
//! Accumulates wall-clock time across start/pause cycles. Hiding the practice
//! view pauses a running timer; showing it again resumes only if the timer was
//! running before it was hidden.

use std::time::{Duration, Instant};

#[derive(Debug, Default, Clone)]
pub struct PracticeTimer {
    /// Start of the current run, if running
    started_at: Option<Instant>,
    /// Time banked from finished runs
    accumulated: Duration,
    /// Whether the user had the timer running (survives hide/show)
    was_running: bool,
}

impl PracticeTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Timer that is already running
    pub fn started() -> Self {
        let mut timer = Self::new();
        timer.start();
        timer
    }

    pub fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn start(&mut self) {
        self.start_at(Instant::now());
    }

    pub fn pause(&mut self) {
        self.pause_at(Instant::now());
    }

    /// Practice view hidden
    pub fn hide(&mut self) {
        self.hide_at(Instant::now());
    }

    /// Practice view visible again
    pub fn show(&mut self) {
        self.show_at(Instant::now());
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Total time: banked runs plus the current run
    pub fn elapsed(&self) -> Duration {
        self.elapsed_at(Instant::now())
    }

    pub fn start_at(&mut self, now: Instant) {
        if self.started_at.is_none() {
            self.started_at = Some(now);
            self.was_running = true;
        }
    }

    pub fn pause_at(&mut self, now: Instant) {
        if let Some(started) = self.started_at.take() {
            self.accumulated += now.saturating_duration_since(started);
        }
    }

    pub fn hide_at(&mut self, now: Instant) {
        // Keeps `was_running` so `show` can resume
        self.pause_at(now);
    }

    pub fn show_at(&mut self, now: Instant) {
        if self.was_running && !self.is_running() {
            self.start_at(now);
        }
    }

    pub fn elapsed_at(&self, now: Instant) -> Duration {
        let current = self
            .started_at
            .map(|started| now.saturating_duration_since(started))
            .unwrap_or_default();
        self.accumulated + current
    }

    /// Stop the timer and return the total in seconds
    pub fn finish(&mut self) -> f64 {
        self.finish_at(Instant::now())
    }

    pub fn finish_at(&mut self, now: Instant) -> f64 {
        self.pause_at(now);
        self.was_running = false;
        self.accumulated.as_secs_f64()
    }
}
