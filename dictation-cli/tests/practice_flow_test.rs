//! Practice flow against a real database file and config

use std::time::{Duration, Instant};

use approx::assert_relative_eq;
use dictation_cli::report;
use dictation_cli::{DictationConfig, PracticeError, PracticeSession, PracticeTimer};
use dictation_content::Content;
use dictation_store::AttemptDatabase;
use tempfile::TempDir;

fn broadcast() -> Content {
    Content {
        article_id: 704573,
        title: "Evening Broadcast".to_string(),
        description: String::new(),
        audio_url: "https://k7.kekenet.com/Sound/2025/03/704573.mp3".to_string(),
        original_text: "The quick brown fox jumps over the lazy dog.".to_string(),
    }
}

/// Config in a temp dir whose database also lives there
fn temp_setup() -> (TempDir, DictationConfig, AttemptDatabase) {
    let tmp = TempDir::new().unwrap();
    let mut config = DictationConfig::load_from(tmp.path().join("config.toml")).unwrap();
    config.database_path = Some(tmp.path().join("db").join("attempts.db").display().to_string());
    config.save().unwrap();

    let db = AttemptDatabase::new(config.resolve_database_path().unwrap()).unwrap();
    (tmp, config, db)
}

#[test]
fn test_practice_redo_and_history() {
    let (_tmp, config, db) = temp_setup();

    let first = PracticeSession::from_content(&broadcast())
        .submit("the quick brown fox jumped over a lazy dog", &db)
        .unwrap();
    assert_relative_eq!(first.record.score, 700.0 / 9.0, epsilon = 1e-9);

    let second = PracticeSession::redo(&first.record)
        .submit("The quick brown fox jumps over the lazy dog", &db)
        .unwrap();
    assert!(second.comparison.is_perfect());

    let history = db.list_attempts(Some(config.history_limit)).unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].id, second.record.id);
    assert_eq!(history[1].id, first.record.id);
    assert!(history.iter().all(|r| r.group_id == "704573"));

    let stats = db.stats().unwrap();
    assert_eq!(stats.total_attempts, 2);
    assert_eq!(stats.total_groups, 1);
    assert_relative_eq!(stats.best_score.unwrap(), 100.0);

    let line = report::attempt_line(&history[1]);
    assert!(line.contains("77.78%"));
    assert!(line.contains("Evening Broadcast"));
}

#[test]
fn test_show_recomputes_stored_diff() {
    let (_tmp, _config, db) = temp_setup();
    let outcome = PracticeSession::from_content(&broadcast())
        .submit("the quick brown fox jumped over a lazy dog", &db)
        .unwrap();

    let record = db.get_attempt(&outcome.record.id).unwrap().unwrap();
    let comparison = dictation_scoring::Comparison::new(&record.original_text, &record.user_text);
    let detail = report::attempt_detail(&record, &comparison);

    assert!(detail.starts_with("Evening Broadcast\n"));
    assert!(detail.contains("Score: 77.78%"));
    assert!(detail.contains("[-jumps-]"));
    assert!(detail.contains("{+jumped+}"));
}

#[test]
fn test_blank_submission_is_not_stored() {
    let (_tmp, _config, db) = temp_setup();
    let err = PracticeSession::from_content(&broadcast())
        .submit("", &db)
        .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<PracticeError>(),
        Some(PracticeError::EmptyTranscription)
    ));
    assert_eq!(db.stats().unwrap().total_attempts, 0);
}

#[test]
fn test_delete_group_after_practice() {
    let (_tmp, _config, db) = temp_setup();
    let first = PracticeSession::from_content(&broadcast())
        .submit("quick fox", &db)
        .unwrap();
    PracticeSession::redo(&first.record)
        .submit("quick brown fox", &db)
        .unwrap();

    assert_eq!(db.delete_group("704573").unwrap(), 2);
    assert!(db.list_attempts(None).unwrap().is_empty());
}

#[test]
fn test_hidden_time_is_not_billed() {
    let t0 = Instant::now();
    let mut timer = PracticeTimer::new();

    timer.start_at(t0);
    timer.hide_at(t0 + Duration::from_secs(30));
    timer.show_at(t0 + Duration::from_secs(300));

    let spent = timer.finish_at(t0 + Duration::from_secs(330));
    assert_eq!(spent, 60.0);
    assert_eq!(report::format_duration(spent), "1:00");
}
