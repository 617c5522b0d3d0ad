//! Output artifact and console summary
//!
//! Writes the roster as pretty-printed JSON and renders a short human-readable
//! summary of what was fetched.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use thiserror::Error;

use crate::data::UserRecord;

/// Default output file name
pub const DEFAULT_OUTPUT_FILE: &str = "usuarios.json";

/// Number of records listed in the summary
const SUMMARY_PREVIEW: usize = 5;

/// Errors that can occur when persisting the roster
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// Writing or reading the file failed
    #[error("Failed to access {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    /// The roster could not be encoded or decoded
    #[error("Failed to encode roster for {path}: {source}")]
    Serialize {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Writes users to `path` as indented UTF-8 JSON, replacing any existing file
pub fn write_users(path: &Path, users: &[UserRecord]) -> Result<(), PersistenceError> {
    let json = serde_json::to_string_pretty(users).map_err(|source| PersistenceError::Serialize {
        path: path.display().to_string(),
        source,
    })?;

    fs::write(path, json).map_err(|source| PersistenceError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Reads users back from a file written by [`write_users`]
pub fn read_users(path: &Path) -> Result<Vec<UserRecord>, PersistenceError> {
    let content = fs::read_to_string(path).map_err(|source| PersistenceError::Io {
        path: path.display().to_string(),
        source,
    })?;

    serde_json::from_str(&content).map_err(|source| PersistenceError::Serialize {
        path: path.display().to_string(),
        source,
    })
}

/// Renders the roster summary
pub fn write_summary<W: Write>(out: &mut W, users: &[UserRecord]) -> io::Result<()> {
    let rule = "=".repeat(50);
    writeln!(out)?;
    writeln!(out, "{}", rule)?;
    writeln!(out, "USER ROSTER SUMMARY")?;
    writeln!(out, "{}", rule)?;

    if users.is_empty() {
        writeln!(out, "No users found")?;
        return Ok(());
    }

    writeln!(out, "Total users: {}", users.len())?;
    writeln!(out)?;
    writeln!(out, "First {} users:", users.len().min(SUMMARY_PREVIEW))?;

    for (i, user) in users.iter().take(SUMMARY_PREVIEW).enumerate() {
        writeln!(out)?;
        writeln!(out, "{}. {}", i + 1, user.name)?;
        writeln!(out, "   id: {}", user.id)?;
        writeln!(out, "   employee_id: {}", user.employee_id)?;
    }

    writeln!(out)?;
    writeln!(out, "Fields per user:")?;
    for field in UserRecord::FIELD_NAMES {
        writeln!(out, "   - {}", field)?;
    }

    Ok(())
}
