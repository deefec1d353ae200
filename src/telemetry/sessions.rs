//! Session identity: the persisted id slot and its resolution policy.

pub mod service;
pub mod store;

pub use service::{
    reset_session, resolve_or_ephemeral, resolve_session_id, ResolvedSession, SessionSource,
    SESSION_ID_KEY,
};
pub use store::{MemorySessionStore, SessionStore, SledSessionStore};
