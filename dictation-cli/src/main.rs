//! Dictation practice from the terminal
//!
//! Fetches an audio clip and its transcript, times the user while they write
//! down what they hear, then scores the transcription word by word and keeps
//! every attempt in a local SQLite history.

use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, error, info, Level};

use dictation_cli::report;
use dictation_cli::version::version_long;
use dictation_cli::{DictationConfig, PracticeSession};
use dictation_content::ContentClient;
use dictation_scoring::Comparison;
use dictation_store::AttemptDatabase;

/// Listen, transcribe, and score your dictation practice.
#[derive(Parser)]
#[command(name = "dictation", version)]
struct Cli {
    /// Configuration file (default: platform config directory).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Debug logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Practice on a content page: fetch, transcribe, score, save.
    Practice {
        /// Content page URL (its last path segment is the article id).
        url: String,

        /// Transcription to submit instead of reading stdin.
        #[arg(long)]
        text: Option<String>,
    },

    /// Score a transcription against an original text without saving.
    Score {
        origin: String,
        candidate: String,

        /// Print the full comparison as JSON.
        #[arg(long)]
        json: bool,
    },

    /// List attempts, newest first.
    History {
        /// Maximum rows (default from config).
        #[arg(long)]
        limit: Option<usize>,

        /// Only attempts on this exercise.
        #[arg(long)]
        group: Option<String>,
    },

    /// Show a stored attempt with its word diff.
    Show { id: String },

    /// Practice again on a stored attempt's content, in the same group.
    Redo {
        id: String,

        /// Transcription to submit instead of reading stdin.
        #[arg(long)]
        text: Option<String>,
    },

    /// Delete one attempt.
    Delete { id: String },

    /// Delete every attempt of an exercise.
    DeleteGroup { group_id: String },

    /// Aggregate practice statistics.
    Stats,

    /// Version and build details.
    Version,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays clean for results and --json
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run(cli).await {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config;

    match cli.command {
        Command::Score {
            origin,
            candidate,
            json,
        } => score(&origin, &candidate, json),
        Command::Version => {
            println!("{}", version_long());
            Ok(())
        }
        Command::Practice { url, text } => {
            let (config, db) = open(config_path)?;
            let client = ContentClient::new(
                config.content_endpoint.as_str(),
                config.audio_base_url.as_str(),
                config.request_timeout(),
            )?;
            let content = client
                .fetch_page(&url)
                .await
                .with_context(|| format!("Failed to fetch practice content for {url}"))?;
            info!("Loaded \"{}\" ({})", content.title, content.article_id);

            let mut session = PracticeSession::from_content(&content);
            practice(&mut session, text, &db)
        }
        Command::Redo { id, text } => {
            let (_, db) = open(config_path)?;
            let record = db
                .get_attempt(&id)?
                .with_context(|| format!("No attempt with id {id}"))?;

            let mut session = PracticeSession::redo(&record);
            practice(&mut session, text, &db)
        }
        Command::History { limit, group } => {
            let (config, db) = open(config_path)?;
            let limit = limit.unwrap_or(config.history_limit);
            let records = match &group {
                Some(group_id) => {
                    let mut records = db.list_group(group_id)?;
                    records.truncate(limit);
                    records
                }
                None => db.list_attempts(Some(limit))?,
            };

            if records.is_empty() {
                println!("No attempts yet.");
            }
            for record in &records {
                println!("{}", report::attempt_line(record));
            }
            Ok(())
        }
        Command::Show { id } => {
            let (_, db) = open(config_path)?;
            let record = db
                .get_attempt(&id)?
                .with_context(|| format!("No attempt with id {id}"))?;
            let comparison = Comparison::new(&record.original_text, &record.user_text);
            println!("{}", report::attempt_detail(&record, &comparison));
            Ok(())
        }
        Command::Delete { id } => {
            let (_, db) = open(config_path)?;
            if !db.delete_attempt(&id)? {
                bail!("No attempt with id {id}");
            }
            println!("Deleted attempt {id}");
            Ok(())
        }
        Command::DeleteGroup { group_id } => {
            let (_, db) = open(config_path)?;
            let removed = db.delete_group(&group_id)?;
            if removed == 0 {
                bail!("No attempts in group {group_id}");
            }
            println!("Deleted {removed} attempt(s) from group {group_id}");
            Ok(())
        }
        Command::Stats => {
            let (_, db) = open(config_path)?;
            println!("{}", report::stats_text(&db.stats()?));
            Ok(())
        }
    }
}

/// Load configuration and open the attempts database it points at
fn open(config_path: Option<PathBuf>) -> Result<(DictationConfig, AttemptDatabase)> {
    let config = match config_path {
        Some(path) => DictationConfig::load_from(path),
        None => DictationConfig::load(),
    }
    .context("Failed to load configuration")?;
    debug!("Configuration loaded from {}", config.config_path().display());

    let db_path = config.resolve_database_path()?;
    let db = AttemptDatabase::new(&db_path)
        .with_context(|| format!("Failed to open attempts database {}", db_path.display()))?;

    Ok((config, db))
}

fn score(origin: &str, candidate: &str, json: bool) -> Result<()> {
    let comparison = Comparison::new(origin, candidate);
    if json {
        let body = serde_json::to_string_pretty(&comparison.report())
            .context("Failed to serialize comparison")?;
        println!("{body}");
    } else {
        println!("{}", report::comparison_text(&comparison));
    }
    Ok(())
}

fn practice(session: &mut PracticeSession, text: Option<String>, db: &AttemptDatabase) -> Result<()> {
    if !session.title().is_empty() {
        println!("{}", session.title());
    }
    if !session.description().is_empty() {
        println!("{}", session.description());
    }
    println!("Listen: {}", session.audio_url());

    session.timer_mut().start();
    let user_text = match text {
        Some(text) => text,
        None => read_transcription()?,
    };

    let outcome = session.submit(&user_text, db)?;

    println!();
    println!("{}", report::comparison_text(&outcome.comparison));
    println!(
        "Time: {}  Saved as {} (group {})",
        report::format_duration(outcome.record.time_spent_seconds),
        outcome.record.id,
        outcome.record.group_id
    );
    Ok(())
}

fn read_transcription() -> Result<String> {
    let mut stdin = io::stdin();
    if stdin.is_terminal() {
        println!("Type what you hear, then press Ctrl-D to submit:");
    }

    let mut text = String::new();
    stdin
        .read_to_string(&mut text)
        .context("Failed to read transcription")?;
    Ok(text)
}
