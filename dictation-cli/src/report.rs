//! Terminal output for results, history and statistics

use std::fmt::Write;

use chrono::{DateTime, Local, Utc};
use dictation_scoring::{format_score, Comparison};
use dictation_store::{AttemptRecord, PracticeStats};

/// Widest title shown in history rows
const TITLE_WIDTH: usize = 40;

/// Seconds as `m:ss` (or `h:mm:ss` past an hour)
pub fn format_duration(seconds: f64) -> String {
    let total = seconds.max(0.0).floor() as u64;
    let (hours, minutes, secs) = (total / 3600, (total % 3600) / 60, total % 60);

    if hours > 0 {
        format!("{hours}:{minutes:02}:{secs:02}")
    } else {
        format!("{minutes}:{secs:02}")
    }
}

fn local_time(at: &DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}

/// Shorten to `width` characters, marking the cut with `...`
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let kept: String = text.chars().take(width.saturating_sub(3)).collect();
    format!("{}...", kept.trim_end())
}

/// Score and word diff for one comparison
pub fn comparison_text(comparison: &Comparison) -> String {
    let markup = comparison.view().markup();
    let alignment = comparison.alignment();

    let mut out = String::new();
    let _ = writeln!(out, "Score: {}%", format_score(comparison.score()));
    let _ = writeln!(
        out,
        "Words: {} matched, {} missed, {} extra",
        alignment.unchanged_count(),
        alignment.removed_count(),
        alignment.inserted_count()
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "Original: {}", markup.origin);
    let _ = write!(out, "Yours:    {}", markup.candidate);
    out
}

/// One history row
pub fn attempt_line(record: &AttemptRecord) -> String {
    let label = if record.title.is_empty() {
        &record.original_text
    } else {
        &record.title
    };

    format!(
        "{}  {:>6}%  {:>7}  {:<width$}  {} (group {})",
        local_time(&record.created_at),
        format_score(record.score),
        format_duration(record.time_spent_seconds),
        truncate(label, TITLE_WIDTH),
        record.id,
        record.group_id,
        width = TITLE_WIDTH
    )
}

/// Header plus the recomputed diff of a stored attempt
pub fn attempt_detail(record: &AttemptRecord, comparison: &Comparison) -> String {
    let mut out = String::new();
    if !record.title.is_empty() {
        let _ = writeln!(out, "{}", record.title);
    }
    if !record.description.is_empty() {
        let _ = writeln!(out, "{}", record.description);
    }
    let _ = writeln!(out, "Attempt:  {}", record.id);
    let _ = writeln!(out, "Group:    {}", record.group_id);
    let _ = writeln!(out, "Date:     {}", local_time(&record.created_at));
    let _ = writeln!(out, "Time:     {}", format_duration(record.time_spent_seconds));
    if !record.audio_url.is_empty() {
        let _ = writeln!(out, "Audio:    {}", record.audio_url);
    }
    let _ = writeln!(out);
    out.push_str(&comparison_text(comparison));
    out
}

pub fn stats_text(stats: &PracticeStats) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Attempts:      {}", stats.total_attempts);
    let _ = writeln!(out, "Exercises:     {}", stats.total_groups);
    let _ = writeln!(
        out,
        "Practice time: {}",
        format_duration(stats.total_time_seconds)
    );

    let score = |value: Option<f64>| {
        value.map_or_else(|| "-".to_string(), |s| format!("{}%", format_score(s)))
    };
    let _ = writeln!(out, "Average score: {}", score(stats.average_score));
    let _ = writeln!(out, "Median score:  {}", score(stats.median_score));
    let _ = write!(out, "Best score:    {}", score(stats.best_score));

    if let Some(last) = &stats.last_attempt_at {
        let _ = write!(out, "\nLast practice: {}", local_time(last));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0.0), "0:00");
        assert_eq!(format_duration(59.9), "0:59");
        assert_eq!(format_duration(125.0), "2:05");
        assert_eq!(format_duration(3725.0), "1:02:05");
        assert_eq!(format_duration(-4.0), "0:00");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a somewhat longer title", 10), "a somew...");
        assert_eq!(truncate("übergrößenträger", 8), "überg...");
    }

    #[test]
    fn test_comparison_text() {
        let comparison = Comparison::new("the cat sat", "the dog sat");
        let text = comparison_text(&comparison);

        assert!(text.starts_with("Score: 66.67%"));
        assert!(text.contains("2 matched, 1 missed, 1 extra"));
        assert!(text.contains("Original: the [-cat-] sat"));
        assert!(text.contains("Yours:    the {+dog+} sat"));
    }

    #[test]
    fn test_stats_text_empty() {
        let text = stats_text(&PracticeStats::default());
        assert!(text.contains("Attempts:      0"));
        assert!(text.contains("Average score: -"));
        assert!(!text.contains("Last practice"));
    }

    #[test]
    fn test_stats_text_with_scores() {
        let stats = PracticeStats {
            total_attempts: 3,
            total_groups: 2,
            total_time_seconds: 90.0,
            ..PracticeStats::default()
        }
        .with_scores(&[50.0, 100.0, 75.0]);

        let text = stats_text(&stats);
        assert!(text.contains("Exercises:     2"));
        assert!(text.contains("Practice time: 1:30"));
        assert!(text.contains("Average score: 75.00%"));
        assert!(text.contains("Best score:    100.00%"));
    }
}
