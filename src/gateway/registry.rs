//! Conversation registry — per-conversation handoff state.
//!
//! One explicit owned store, constructed at process start and shared by
//! handle. In-memory only: state does not survive a restart.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Mutex;

/// Who is currently answering a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// The assistant replies automatically.
    Automated,
    /// A human operator has taken over; the assistant stays quiet.
    HumanAssisted,
}

/// State of one conversation.
#[derive(Debug, Clone)]
pub struct ConversationState {
    pub mode: Mode,
    /// When a human-assisted conversation is due to revert to automated.
    pub resume_at: Option<DateTime<Utc>>,
}

impl Default for ConversationState {
    fn default() -> Self {
        Self {
            mode: Mode::Automated,
            resume_at: None,
        }
    }
}

/// Map from chat id to conversation state. All operations are total: any
/// chat id resolves to a state, default-created on first access.
pub struct ConversationRegistry {
    states: Mutex<HashMap<i64, ConversationState>>,
}

impl ConversationRegistry {
    pub fn new() -> Self {
        Self {
            states: Mutex::new(HashMap::new()),
        }
    }

    /// Current state for a conversation, default-creating an `Automated`
    /// entry with no pending deadline on first access.
    pub fn get(&self, chat_id: i64) -> ConversationState {
        self.states
            .lock()
            .unwrap()
            .entry(chat_id)
            .or_default()
            .clone()
    }

    /// Overwrite a conversation's state. No timer side effects — the
    /// scheduler owns timers, deliberately kept separate.
    pub fn set(&self, chat_id: i64, state: ConversationState) {
        self.states.lock().unwrap().insert(chat_id, state);
    }
}
