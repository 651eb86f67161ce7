//! Assistant pipeline — context assembly, completion call, history append,
//! and chunked delivery.

use super::Gateway;
use relay_core::context::Context;
use relay_core::message::{split_chunks, IncomingMessage, MESSAGE_CHUNK_SIZE};
use tracing::{error, info, warn};

pub(super) const FALLBACK_REPLY: &str = "Sorry, I'm having a little trouble right now.\n\
    Send /support and a human will help you directly!";

impl Gateway {
    /// Invoke the assistant for one message and deliver the completion.
    ///
    /// On provider failure the exchange is NOT written to history and the
    /// conversation state is untouched; the customer gets the fixed
    /// fallback and their next message is the de facto retry.
    pub(super) async fn assistant_reply(&self, incoming: &IncomingMessage) {
        let _ = self.channel.send_typing(incoming.chat_id).await;

        // Knowledge is re-read on every call so facts taught a minute ago
        // already apply.
        let knowledge = match self.store.recent_knowledge(self.knowledge_limit).await {
            Ok(k) => k,
            Err(e) => {
                error!("failed to load knowledge: {e}");
                Vec::new()
            }
        };
        let history = match self
            .store
            .recent_history(incoming.chat_id, self.context_limit)
            .await
        {
            Ok(h) => h,
            Err(e) => {
                error!("failed to load history: {e}");
                Vec::new()
            }
        };

        let context = Context {
            system_prompt: self.catalog.system_prompt(&knowledge),
            history,
            current_message: incoming.text.clone(),
        };

        let completion = match self.provider.complete(&context).await {
            Ok(c) => c,
            Err(e) => {
                error!("assistant pipeline failed for chat {}: {e}", incoming.chat_id);
                self.send_text(incoming.chat_id, FALLBACK_REPLY).await;
                return;
            }
        };

        info!(
            "completion for chat {} via {} in {}ms",
            incoming.chat_id,
            completion.metadata.provider_used,
            completion.metadata.processing_time_ms
        );

        // A degraded completion (no usable choice in the response body) is
        // still delivered, but the exchange is not persisted so the fixed
        // clarification text never enters a later context window.
        if completion.metadata.degraded {
            warn!("degraded completion for chat {}, skipping history", incoming.chat_id);
        } else {
            if let Err(e) = self
                .store
                .append_history(incoming.chat_id, &incoming.sender_name, "user", &incoming.text)
                .await
            {
                error!("history append failed: {e}");
            }
            if let Err(e) = self
                .store
                .append_history(
                    incoming.chat_id,
                    &incoming.sender_name,
                    "assistant",
                    &completion.text,
                )
                .await
            {
                error!("history append failed: {e}");
            }
        }

        for chunk in split_chunks(&completion.text, MESSAGE_CHUNK_SIZE) {
            if let Err(e) = self.channel.send_text(incoming.chat_id, &chunk).await {
                error!("delivery to chat {} failed: {e}", incoming.chat_id);
                break;
            }
        }
    }
}
