//! Session snapshot persistence.
//!
//! One JSON file holding `{"state": {"user": ..., "token": ...}}` — the same
//! shape the original web client keeps in local storage. The auth flag is not
//! stored; it is recomputed on rehydration. No expiry check happens here: an
//! expired token is only discovered when the backend answers 401.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::user::User;
use crate::session::Session;

#[derive(Debug, Error)]
pub enum RehydrateError {
    #[error("Could not read session file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Session file is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
}

#[derive(Debug, Serialize, Deserialize)]
struct Snapshot {
    state: PersistedState,
}

#[derive(Debug, Serialize, Deserialize)]
struct PersistedState {
    user: Option<User>,
    token: Option<String>,
}

/// Reads the snapshot back. `Ok(None)` when no file exists (first run);
/// `Err` when the blob is unreadable or malformed — callers treat that as
/// "no session", they must not crash on it.
pub fn rehydrate(path: &Path) -> Result<Option<Session>, RehydrateError> {
    if !path.exists() {
        return Ok(None);
    }
    let raw = fs::read_to_string(path)?;
    let snapshot: Snapshot = serde_json::from_str(&raw)?;
    let mut session = Session {
        user: snapshot.state.user,
        token: snapshot.state.token,
        is_authenticated: false,
    };
    session.is_authenticated =
        session.user.is_some() && session.token.as_deref().is_some_and(|t| !t.is_empty());
    Ok(Some(session))
}

/// Writes the snapshot, creating parent directories on first use.
pub fn write_snapshot(path: &Path, session: &Session) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let snapshot = Snapshot {
        state: PersistedState {
            user: session.user.clone(),
            token: session.token.clone(),
        },
    };
    let raw = serde_json::to_string(&snapshot)
        .map_err(|err| std::io::Error::new(std::io::ErrorKind::Other, err))?;
    fs::write(path, raw)
}
