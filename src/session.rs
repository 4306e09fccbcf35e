//! In-memory conversation session store
//!
//! Maps a caller-supplied session id to its message history so that the
//! same id resumes prior context on the next turn. History lives only for
//! the lifetime of the process; nothing here persists to disk.

use std::collections::HashMap;

use tokio::sync::Mutex;
use tracing::debug;

use crate::llm::Message;

/// Per-session message history behind an async lock
#[derive(Default)]
pub struct SessionStore {
    sessions: Mutex<HashMap<String, Vec<Message>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot the history for a session (empty for an unknown id).
    pub async fn history(&self, session_id: &str) -> Vec<Message> {
        let sessions = self.sessions.lock().await;
        sessions.get(session_id).cloned().unwrap_or_default()
    }

    /// Append one completed turn (user message + assistant reply).
    pub async fn record_turn(&self, session_id: &str, user: Message, assistant: Message) {
        let mut sessions = self.sessions.lock().await;
        let history = sessions.entry(session_id.to_string()).or_default();
        history.push(user);
        history.push(assistant);
        debug!(session_id, turns = history.len() / 2, "record_turn: history updated");
    }
}
