use crate::{
    context::Context,
    error::RelayError,
    message::{IncomingMessage, OutgoingMessage, SentMessage},
};
use async_trait::async_trait;

/// Assistant provider trait — the brain.
///
/// The completion backend (an OpenAI-compatible API in production, a mock in
/// tests) implements this trait to provide a uniform interface.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Human-readable provider name.
    fn name(&self) -> &str;

    /// Send a conversation context to the provider and get a completion.
    async fn complete(&self, context: &Context) -> Result<OutgoingMessage, RelayError>;

    /// Check if the provider is available and ready.
    async fn is_available(&self) -> bool;
}

/// Messaging channel trait — the nervous system.
///
/// The messaging platform (Telegram in production, a mock in tests)
/// implements this trait to receive and send messages.
#[async_trait]
pub trait Channel: Send + Sync {
    /// Human-readable channel name.
    fn name(&self) -> &str;

    /// Start listening for incoming messages.
    /// Returns a receiver that yields incoming messages.
    async fn start(&self) -> Result<tokio::sync::mpsc::Receiver<IncomingMessage>, RelayError>;

    /// Send text to a chat. Returns the transport-assigned message id so the
    /// caller can key reply routing on it.
    async fn send_text(&self, chat_id: i64, text: &str) -> Result<SentMessage, RelayError>;

    /// Send a typing indicator to show the assistant is working.
    async fn send_typing(&self, _chat_id: i64) -> Result<(), RelayError> {
        Ok(())
    }

    /// Graceful shutdown.
    async fn stop(&self) -> Result<(), RelayError>;
}
