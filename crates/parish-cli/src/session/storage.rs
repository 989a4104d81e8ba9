//! Session storage for persisting login state.
//!
//! One JSON file in the platform data directory holds the signed-in user,
//! the store URL and the store token. On Unix it is only readable by its
//! owner.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use parish_core::{StoreUrl, User};

use super::CliSession;

#[cfg(unix)]
use std::os::unix::fs::OpenOptionsExt;

const SESSION_FILE: &str = "session.json";

#[derive(Debug, Serialize, Deserialize)]
struct StoredSession {
    user: User,
    store: StoreUrl,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    token: Option<String>,
}

fn session_path() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("", "", "parish").context("Could not determine data directory")?;
    let data_dir = dirs.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data directory")?;
    Ok(data_dir.join(SESSION_FILE))
}

/// Save a session to disk, replacing any earlier one.
pub async fn save_session(session: &CliSession) -> Result<()> {
    let stored = StoredSession {
        user: session.user().clone(),
        store: session.url().clone(),
        token: session.token().map(str::to_string),
    };
    let json = serde_json::to_vec_pretty(&stored)?;

    let path = session_path()?;
    // The mode only applies when the file is created.
    match fs::remove_file(&path) {
        Ok(()) => {}
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => return Err(e).context("Failed to replace session file"),
    }

    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    options.mode(0o600);

    let mut file = options.open(&path).context("Failed to write session file")?;
    file.write_all(&json).context("Failed to write session file")?;

    debug!(path = %path.display(), "Saved session");
    Ok(())
}

/// Load the saved session, if there is one.
pub async fn load_session() -> Result<Option<CliSession>> {
    let path = session_path()?;
    let json = match fs::read(&path) {
        Ok(json) => json,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e).context("Failed to read session file"),
    };

    let stored: StoredSession = serde_json::from_slice(&json).context("Invalid session file")?;
    Ok(Some(CliSession::new(stored.user, stored.store, stored.token)?))
}

/// Remove the saved session. Returns false if there was none.
pub async fn clear_session() -> Result<bool> {
    match fs::remove_file(session_path()?) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e).context("Failed to remove session file"),
    }
}
