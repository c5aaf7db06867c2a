//! SQLite storage for practice attempts

use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::{debug, info};
use uuid::Uuid;

use crate::models::{AttemptRecord, NewAttempt, PracticeStats};

const ATTEMPT_COLUMNS: &str = "id, group_id, audio_url, original_text, user_text, score,
    time_spent_seconds, created_at, title, description";

/// Thread-safe SQLite database of dictation attempts
pub struct AttemptDatabase {
    db_path: PathBuf,
    conn: Arc<Mutex<Connection>>,
}

impl AttemptDatabase {
    /// Open (or create) the attempts database
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let db_path = Self::expand_path(db_path)?;

        // Create parent directory if needed
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let conn = Connection::open(&db_path).context("Failed to open attempts database")?;

        let db = Self {
            db_path,
            conn: Arc::new(Mutex::new(conn)),
        };

        db.init_schema()?;
        debug!("Attempts database ready at {}", db.db_path.display());

        Ok(db)
    }

    /// In-memory database, used by tests and dry runs
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("Failed to open in-memory database")?;
        let db = Self {
            db_path: PathBuf::from(":memory:"),
            conn: Arc::new(Mutex::new(conn)),
        };
        db.init_schema()?;
        Ok(db)
    }

    pub fn path(&self) -> &Path {
        &self.db_path
    }

    /// Expand ~ in path
    fn expand_path<P: AsRef<Path>>(path: P) -> Result<PathBuf> {
        let path_str = path.as_ref().to_str().context("Invalid path encoding")?;

        let expanded = if path_str.starts_with('~') {
            if let Some(home) = dirs::home_dir() {
                home.join(path_str.strip_prefix("~/").unwrap_or(path_str))
            } else {
                PathBuf::from(path_str)
            }
        } else {
            PathBuf::from(path_str)
        };

        Ok(expanded)
    }

    fn init_schema(&self) -> Result<()> {
        let conn = self.conn.lock().unwrap();

        conn.execute(
            "CREATE TABLE IF NOT EXISTS attempts (
                id TEXT PRIMARY KEY,
                group_id TEXT NOT NULL,
                audio_url TEXT NOT NULL,
                original_text TEXT NOT NULL,
                user_text TEXT NOT NULL,
                score REAL NOT NULL,
                time_spent_seconds REAL NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL,
                title TEXT NOT NULL DEFAULT '',
                description TEXT NOT NULL DEFAULT ''
            )",
            [],
        )?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_attempts_created_at ON attempts(created_at)",
            [],
        )?;
        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_attempts_group_id ON attempts(group_id)",
            [],
        )?;

        Ok(())
    }

    /// Insert a new attempt; assigns its id and creation time
    pub fn insert_attempt(&self, attempt: &NewAttempt) -> Result<AttemptRecord> {
        let record = AttemptRecord {
            id: Uuid::new_v4().to_string(),
            group_id: attempt.group_id.clone(),
            audio_url: attempt.audio_url.clone(),
            original_text: attempt.original_text.clone(),
            title: attempt.title.clone(),
            description: attempt.description.clone(),
            user_text: attempt.user_text.clone(),
            score: attempt.score,
            time_spent_seconds: attempt.time_spent_seconds,
            // Matches the stored precision
            created_at: Utc::now().trunc_subsecs(6),
        };

        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO attempts (
                id, group_id, audio_url, original_text, user_text, score,
                time_spent_seconds, created_at, title, description
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                record.id,
                record.group_id,
                record.audio_url,
                record.original_text,
                record.user_text,
                record.score,
                record.time_spent_seconds,
                format_timestamp(&record.created_at),
                record.title,
                record.description,
            ],
        )
        .context("Failed to insert attempt")?;

        info!(
            "Saved attempt {} (group {}, score {:.2})",
            record.id, record.group_id, record.score
        );

        Ok(record)
    }

    /// List attempts, newest first
    pub fn list_attempts(&self, limit: Option<usize>) -> Result<Vec<AttemptRecord>> {
        let conn = self.conn.lock().unwrap();

        let limit = sql_limit(limit);

        let mut stmt = conn.prepare(&format!(
            "SELECT {ATTEMPT_COLUMNS} FROM attempts
             ORDER BY created_at DESC, rowid DESC
             LIMIT ?1"
        ))?;

        let records = stmt
            .query_map(params![limit], row_to_attempt)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(records)
    }

    /// List attempts of one group, newest first
    pub fn list_group(&self, group_id: &str) -> Result<Vec<AttemptRecord>> {
        let conn = self.conn.lock().unwrap();

        let mut stmt = conn.prepare(&format!(
            "SELECT {ATTEMPT_COLUMNS} FROM attempts
             WHERE group_id = ?1
             ORDER BY created_at DESC, rowid DESC"
        ))?;

        let records = stmt
            .query_map(params![group_id], row_to_attempt)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(records)
    }

    /// Get attempt by ID
    pub fn get_attempt(&self, id: &str) -> Result<Option<AttemptRecord>> {
        let conn = self.conn.lock().unwrap();

        let record = conn
            .query_row(
                &format!("SELECT {ATTEMPT_COLUMNS} FROM attempts WHERE id = ?1"),
                params![id],
                row_to_attempt,
            )
            .optional()?;

        Ok(record)
    }

    /// Delete one attempt; returns whether a row was removed
    pub fn delete_attempt(&self, id: &str) -> Result<bool> {
        let conn = self.conn.lock().unwrap();
        let removed = conn.execute("DELETE FROM attempts WHERE id = ?1", params![id])?;

        if removed > 0 {
            info!("Deleted attempt {}", id);
        }
        Ok(removed > 0)
    }

    /// Delete every attempt of a group; returns the number of rows removed
    pub fn delete_group(&self, group_id: &str) -> Result<usize> {
        let conn = self.conn.lock().unwrap();
        let removed = conn.execute("DELETE FROM attempts WHERE group_id = ?1", params![group_id])?;

        info!("Deleted {} attempt(s) of group {}", removed, group_id);
        Ok(removed)
    }

    /// Aggregate statistics over all attempts
    pub fn stats(&self) -> Result<PracticeStats> {
        let conn = self.conn.lock().unwrap();

        let (total_attempts, total_groups, total_time_seconds, last_created): (
            i64,
            i64,
            f64,
            Option<String>,
        ) = conn.query_row(
            "SELECT COUNT(*), COUNT(DISTINCT group_id),
                    COALESCE(SUM(time_spent_seconds), 0.0), MAX(created_at)
             FROM attempts",
            [],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?)),
        )?;

        let mut stmt = conn.prepare("SELECT score FROM attempts")?;
        let scores = stmt
            .query_map([], |row| row.get::<_, f64>(0))?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let last_attempt_at = last_created.as_deref().map(parse_timestamp).transpose()?;

        Ok(PracticeStats {
            total_attempts,
            total_groups,
            total_time_seconds,
            last_attempt_at,
            ..PracticeStats::default()
        }
        .with_scores(&scores))
    }
}

/// Convert database row to AttemptRecord
fn row_to_attempt(row: &Row) -> rusqlite::Result<AttemptRecord> {
    let created_at: String = row.get("created_at")?;
    let created_at = DateTime::parse_from_rfc3339(&created_at)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(7, rusqlite::types::Type::Text, Box::new(e))
        })?;

    Ok(AttemptRecord {
        id: row.get("id")?,
        group_id: row.get("group_id")?,
        audio_url: row.get("audio_url")?,
        original_text: row.get("original_text")?,
        user_text: row.get("user_text")?,
        score: row.get("score")?,
        time_spent_seconds: row.get("time_spent_seconds")?,
        created_at,
        title: row.get("title")?,
        description: row.get("description")?,
    })
}

// Fixed-width UTC so that text ordering matches time ordering
/// LIMIT value for SQLite: negative means no limit, oversized saturates
fn sql_limit(limit: Option<usize>) -> i64 {
    limit.map_or(-1, |l| i64::try_from(l).unwrap_or(i64::MAX))
}

fn format_timestamp(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_timestamp(s: &str) -> Result<DateTime<Utc>> {
    let dt = DateTime::parse_from_rfc3339(s)
        .with_context(|| format!("Invalid timestamp in database: {}", s))?;
    Ok(dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn attempt(group: &str, user_text: &str, score: f64) -> NewAttempt {
        NewAttempt {
            group_id: group.to_string(),
            audio_url: "https://k7.kekenet.com/Sound/2025/03/clip.mp3".to_string(),
            original_text: "the quick brown fox".to_string(),
            title: "Morning news".to_string(),
            description: "Short clip".to_string(),
            user_text: user_text.to_string(),
            score,
            time_spent_seconds: 30.0,
        }
    }

    #[test]
    fn test_database_creation() {
        let tmp_dir = TempDir::new().unwrap();
        let db_path = tmp_dir.path().join("nested").join("attempts.db");

        let db = AttemptDatabase::new(&db_path).unwrap();
        assert!(db_path.exists());
        assert_eq!(db.path(), db_path.as_path());
    }

    #[test]
    fn test_insert_and_get() {
        let db = AttemptDatabase::in_memory().unwrap();

        let saved = db.insert_attempt(&attempt("704573", "the quick brown box", 75.0)).unwrap();
        assert!(!saved.id.is_empty());

        let fetched = db.get_attempt(&saved.id).unwrap().unwrap();
        assert_eq!(fetched.user_text, "the quick brown box");
        assert_eq!(fetched.score, 75.0);
        assert_eq!(fetched.group_id, "704573");
        assert_eq!(
            fetched.created_at.timestamp_micros(),
            saved.created_at.timestamp_micros()
        );

        assert!(db.get_attempt("missing").unwrap().is_none());
    }

    #[test]
    fn test_huge_limit_returns_everything() {
        assert_eq!(sql_limit(None), -1);
        assert_eq!(sql_limit(Some(3)), 3);
        assert_eq!(sql_limit(Some(usize::MAX)), i64::MAX);

        let db = AttemptDatabase::in_memory().unwrap();
        db.insert_attempt(&attempt("g1", "one", 10.0)).unwrap();
        db.insert_attempt(&attempt("g1", "two", 20.0)).unwrap();

        assert_eq!(db.list_attempts(Some(usize::MAX)).unwrap().len(), 2);
        assert!(db.list_attempts(Some(0)).unwrap().is_empty());
    }

    #[test]
    fn test_list_newest_first() {
        let db = AttemptDatabase::in_memory().unwrap();

        let first = db.insert_attempt(&attempt("g1", "one", 10.0)).unwrap();
        let second = db.insert_attempt(&attempt("g1", "two", 20.0)).unwrap();
        let third = db.insert_attempt(&attempt("g2", "three", 30.0)).unwrap();

        let ids: Vec<String> = db
            .list_attempts(None)
            .unwrap()
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec![third.id.clone(), second.id.clone(), first.id]);

        let limited = db.list_attempts(Some(1)).unwrap();
        assert_eq!(limited.len(), 1);
        assert_eq!(limited[0].id, third.id);

        let group = db.list_group("g1").unwrap();
        assert_eq!(group.len(), 2);
        assert_eq!(group[0].id, second.id);
    }

    #[test]
    fn test_delete_attempt() {
        let db = AttemptDatabase::in_memory().unwrap();
        let saved = db.insert_attempt(&attempt("g1", "one", 10.0)).unwrap();

        assert!(db.delete_attempt(&saved.id).unwrap());
        assert!(!db.delete_attempt(&saved.id).unwrap());
        assert!(db.list_attempts(None).unwrap().is_empty());
    }

    #[test]
    fn test_delete_group() {
        let db = AttemptDatabase::in_memory().unwrap();
        db.insert_attempt(&attempt("g1", "one", 10.0)).unwrap();
        db.insert_attempt(&attempt("g1", "two", 20.0)).unwrap();
        let other = db.insert_attempt(&attempt("g2", "three", 30.0)).unwrap();

        assert_eq!(db.delete_group("g1").unwrap(), 2);
        assert_eq!(db.delete_group("g1").unwrap(), 0);

        let remaining = db.list_attempts(None).unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, other.id);
    }

    #[test]
    fn test_stats() {
        let db = AttemptDatabase::in_memory().unwrap();

        let empty = db.stats().unwrap();
        assert_eq!(empty.total_attempts, 0);
        assert_eq!(empty.best_score, None);
        assert_eq!(empty.last_attempt_at, None);

        db.insert_attempt(&attempt("g1", "one", 40.0)).unwrap();
        db.insert_attempt(&attempt("g1", "two", 80.0)).unwrap();
        let last = db.insert_attempt(&attempt("g2", "three", 60.0)).unwrap();

        let stats = db.stats().unwrap();
        assert_eq!(stats.total_attempts, 3);
        assert_eq!(stats.total_groups, 2);
        assert_eq!(stats.total_time_seconds, 90.0);
        assert_eq!(stats.best_score, Some(80.0));
        assert_eq!(stats.median_score, Some(60.0));
        assert_eq!(
            stats.last_attempt_at.map(|t| t.timestamp_micros()),
            Some(last.created_at.timestamp_micros())
        );
    }

    #[test]
    fn test_reopen_keeps_records() {
        let tmp_dir = TempDir::new().unwrap();
        let db_path = tmp_dir.path().join("attempts.db");

        let saved = {
            let db = AttemptDatabase::new(&db_path).unwrap();
            db.insert_attempt(&attempt("g1", "one", 10.0)).unwrap()
        };

        let db = AttemptDatabase::new(&db_path).unwrap();
        assert_eq!(db.get_attempt(&saved.id).unwrap().unwrap().user_text, "one");
    }
}
