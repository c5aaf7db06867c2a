//! Cross-platform path utilities for the dictation tool.
//!
//! Single source of truth for where configuration and the attempts database
//! live.
//!
//! # Platform Behavior
//!
//! | Platform | Data Directory | Config Directory |
//! |----------|----------------|------------------|
//! | Linux    | `~/.local/share/dictation` | `~/.config/dictation` |
//! | macOS    | `~/Library/Application Support/dictation` | Same as data dir |
//! | Windows  | `%APPDATA%/dictation` | Same as data dir |

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use thiserror::Error;

/// Errors specific to path operations.
#[derive(Error, Debug)]
pub enum PathError {
    #[error("Could not determine data directory")]
    NoDataDirectory,

    #[error("Could not determine config directory")]
    NoConfigDirectory,
}

/// Application identifier used in path construction.
pub const APP_NAME: &str = "dictation";

/// Configuration file name inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Attempts database file name inside the database directory.
pub const DATABASE_FILE_NAME: &str = "attempts.db";

/// Create a directory (and parents) if missing, owner-only on Unix.
pub fn ensure_dir(dir: &Path) -> Result<()> {
    if dir.exists() {
        return Ok(());
    }

    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let perms = fs::Permissions::from_mode(0o700);
        fs::set_permissions(dir, perms)
            .with_context(|| format!("Failed to set permissions on {}", dir.display()))?;
    }

    Ok(())
}

/// Get the application data directory, creating it if needed.
///
/// # Errors
/// Returns an error if the directory cannot be determined or created.
pub fn get_data_dir() -> Result<PathBuf> {
    let base_dir = dirs::data_dir().ok_or(PathError::NoDataDirectory)?;
    let data_dir = base_dir.join(APP_NAME);
    ensure_dir(&data_dir)?;
    Ok(data_dir)
}

/// Get the configuration directory, creating it if needed.
///
/// # Platform Behavior
/// - **Linux**: `~/.config/dictation`
/// - **macOS/Windows**: the data directory
pub fn get_config_dir() -> Result<PathBuf> {
    #[cfg(target_os = "linux")]
    {
        let config_base = dirs::config_dir().ok_or(PathError::NoConfigDirectory)?;
        let config_dir = config_base.join(APP_NAME);
        ensure_dir(&config_dir)?;
        Ok(config_dir)
    }

    #[cfg(not(target_os = "linux"))]
    {
        get_data_dir()
    }
}

/// Path of the configuration file.
pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join(CONFIG_FILE_NAME))
}

/// Get the database directory (`<data_dir>/db`), creating it if needed.
pub fn get_db_dir() -> Result<PathBuf> {
    let db_dir = get_data_dir()?.join("db");
    ensure_dir(&db_dir)?;
    Ok(db_dir)
}

/// Path of the attempts database.
pub fn get_database_path() -> Result<PathBuf> {
    Ok(get_db_dir()?.join(DATABASE_FILE_NAME))
}
