//! Session Store — the single client-side record of who is logged in.
//!
//! ARCHITECTURAL RULE: `user`, `token`, and `is_authenticated` are only ever
//! mutated together, through `login`/`update_user`/`logout`. No other code
//! path may touch the fields directly; `is_authenticated` is recomputed
//! inside every mutation so the invariant
//! `is_authenticated == (user present && token present)` holds at every
//! observable point.

pub mod persist;

use std::path::PathBuf;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::models::user::{User, UserUpdate};

/// One snapshot of the authenticated identity. This is also the exact shape
/// persisted to disk (wrapped in `{"state": ...}` by `persist`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub user: Option<User>,
    pub token: Option<String>,
    #[serde(default)]
    pub is_authenticated: bool,
}

impl Session {
    fn recompute_flag(&mut self) {
        self.is_authenticated =
            self.user.is_some() && self.token.as_deref().is_some_and(|t| !t.is_empty());
    }
}

/// Process-wide session store, shared via `Arc` and mutated from many call
/// sites. Every mutation writes a snapshot to `session_file`; persistence
/// failures are logged and swallowed so an unwritable disk never blocks a
/// login or logout.
pub struct SessionStore {
    inner: RwLock<Session>,
    session_file: PathBuf,
}

impl SessionStore {
    /// Starts from a rehydrated snapshot if one exists; a missing or
    /// malformed snapshot means an unauthenticated session, never an error.
    pub fn open(session_file: PathBuf) -> Self {
        let session = match persist::rehydrate(&session_file) {
            Ok(Some(session)) => {
                debug!("Session rehydrated from {}", session_file.display());
                session
            }
            Ok(None) => Session::default(),
            Err(err) => {
                warn!("Discarding malformed session snapshot: {err}");
                Session::default()
            }
        };
        Self {
            inner: RwLock::new(session),
            session_file,
        }
    }

    pub fn snapshot(&self) -> Session {
        self.inner.read().expect("session lock poisoned").clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner
            .read()
            .expect("session lock poisoned")
            .is_authenticated
    }

    /// Installs the authenticated identity. Navigation after login is the
    /// caller's responsibility.
    pub fn login(&self, user: User, token: String) {
        let snapshot = {
            let mut session = self.inner.write().expect("session lock poisoned");
            session.user = Some(user);
            session.token = Some(token);
            session.recompute_flag();
            session.clone()
        };
        self.persist(&snapshot);
    }

    /// Shallow-merges a partial update into the current user. Silent no-op
    /// when no user is set; never touches `token` or the auth flag.
    pub fn update_user(&self, partial: &UserUpdate) {
        let snapshot = {
            let mut session = self.inner.write().expect("session lock poisoned");
            let merged = match session.user.as_ref() {
                Some(user) => user.merged(partial),
                None => return,
            };
            session.user = Some(merged);
            session.clone()
        };
        self.persist(&snapshot);
    }

    /// Replaces the stored user wholesale (profile refetch from `/auth/me`).
    /// No-op when unauthenticated, mirroring `update_user`.
    pub fn replace_user(&self, user: User) {
        let snapshot = {
            let mut session = self.inner.write().expect("session lock poisoned");
            if session.user.is_none() {
                return;
            }
            session.user = Some(user);
            session.clone()
        };
        self.persist(&snapshot);
    }

    /// Clears `user` and `token` atomically. Clearing the query cache on
    /// logout is wired at the operation layer and in the 401 interceptor.
    pub fn logout(&self) {
        let snapshot = {
            let mut session = self.inner.write().expect("session lock poisoned");
            session.user = None;
            session.token = None;
            session.recompute_flag();
            session.clone()
        };
        self.persist(&snapshot);
    }

    /// Bearer credential for the next outgoing request, if any.
    pub fn token(&self) -> Option<String> {
        self.inner
            .read()
            .expect("session lock poisoned")
            .token
            .clone()
    }

    fn persist(&self, snapshot: &Session) {
        if let Err(err) = persist::write_snapshot(&self.session_file, snapshot) {
            warn!(
                "Failed to persist session to {}: {err}",
                self.session_file.display()
            );
        }
    }
}
