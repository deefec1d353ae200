//! Session id resolution: read the slot, create lazily, fall back to memory when storage fails.

use tracing::{debug, warn};

use crate::error::StorageError;
use crate::telemetry::sessions::store::SessionStore;
use crate::telemetry::types::new_session_id;

/// Storage key holding the session id.
pub const SESSION_ID_KEY: &str = "crp_session_id";

/// Where the resolved session id lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionSource {
    /// Already present in the store.
    Existing,
    /// Generated and written during this resolution.
    Created,
    /// Storage failed; the id lives only in this process.
    Ephemeral,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSession {
    pub session_id: String,
    pub source: SessionSource,
}

/// Read-if-absent-then-write. No lock: concurrent writers race and the last write wins.
/// An empty or undecodable stored value counts as absent and is overwritten.
pub fn resolve_session_id(store: &dyn SessionStore) -> Result<ResolvedSession, StorageError> {
    let stored = match store.get(SESSION_ID_KEY) {
        Ok(stored) => stored,
        Err(StorageError::InvalidValue { reason, .. }) => {
            warn!(reason = %reason, "stored session id is unreadable; replacing it");
            None
        }
        Err(err) => return Err(err),
    };
    if let Some(existing) = stored {
        if !existing.is_empty() {
            return Ok(ResolvedSession {
                session_id: existing,
                source: SessionSource::Existing,
            });
        }
    }
    let session_id = new_session_id();
    store.set(SESSION_ID_KEY, &session_id)?;
    debug!(session_id = %session_id, "created telemetry session id");
    Ok(ResolvedSession {
        session_id,
        source: SessionSource::Created,
    })
}

/// Infallible resolution used at logger construction.
pub fn resolve_or_ephemeral(store: &dyn SessionStore) -> ResolvedSession {
    match resolve_session_id(store) {
        Ok(resolved) => resolved,
        Err(err) => ephemeral(&err),
    }
}

/// Resolution when the store could not even be opened.
pub fn ephemeral(err: &StorageError) -> ResolvedSession {
    let session_id = new_session_id();
    warn!(
        error = %err,
        session_id = %session_id,
        "session storage unavailable; using in-memory session id"
    );
    ResolvedSession {
        session_id,
        source: SessionSource::Ephemeral,
    }
}

/// Clear the stored id so the next resolution creates a new one.
pub fn reset_session(store: &dyn SessionStore) -> Result<(), StorageError> {
    store.remove(SESSION_ID_KEY)
}
