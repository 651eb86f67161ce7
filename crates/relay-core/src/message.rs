use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Telegram caps a single message at 4096 chars; we slice a little below
/// that so formatting never pushes a chunk over the limit.
pub const MESSAGE_CHUNK_SIZE: usize = 4000;

/// An incoming message event from the channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomingMessage {
    pub id: Uuid,
    /// Chat this message arrived in (end-user chat or the operator group).
    pub chat_id: i64,
    /// Platform user id of the sender.
    pub sender_id: i64,
    /// Human-readable sender name ("@username" or first name).
    pub sender_name: String,
    /// Platform username, when the sender has one.
    pub username: Option<String>,
    /// Sender's first name.
    pub first_name: String,
    /// Message text content.
    pub text: String,
    pub timestamp: DateTime<Utc>,
    /// If this message replies to an earlier one, that message's id.
    pub reply_to_message_id: Option<i64>,
    /// Whether this message comes from a group chat.
    #[serde(default)]
    pub is_group: bool,
}

/// A completion produced by the assistant provider.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutgoingMessage {
    pub text: String,
    pub metadata: MessageMetadata,
}

/// Metadata about how a completion was generated.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MessageMetadata {
    /// Which provider produced this response.
    pub provider_used: String,
    /// Token count (if available from the provider).
    pub tokens_used: Option<u64>,
    /// Wall-clock processing time in milliseconds.
    pub processing_time_ms: u64,
    /// Model identifier (if applicable).
    pub model: Option<String>,
    /// True when the provider answered but carried no usable completion and
    /// the text is a fixed clarification request. Degraded exchanges are
    /// delivered but never persisted to history.
    #[serde(default)]
    pub degraded: bool,
}

/// Receipt for a message the channel accepted, carrying the
/// transport-assigned id of the sent message.
#[derive(Debug, Clone, Copy)]
pub struct SentMessage {
    pub message_id: i64,
}

/// Split text into fixed-size chunks for transports with a per-message
/// length limit. Boundaries are character counts, not sentence-aware.
pub fn split_chunks(text: &str, chunk_size: usize) -> Vec<String> {
    if text.chars().count() <= chunk_size {
        return vec![text.to_string()];
    }

    let mut chunks = Vec::new();
    let mut current = String::with_capacity(chunk_size);
    for (count, ch) in text.chars().enumerate() {
        if count > 0 && count % chunk_size == 0 {
            chunks.push(std::mem::take(&mut current));
        }
        current.push(ch);
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}
