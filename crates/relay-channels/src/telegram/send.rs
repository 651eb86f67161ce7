//! Outbound Bot API calls: sendMessage and sendChatAction.

use super::types::{TgMessage, TgResponse};
use super::TelegramChannel;
use relay_core::{error::RelayError, message::SentMessage};
use serde_json::json;

impl TelegramChannel {
    /// Send plain text to a chat. Returns the id Telegram assigned to the
    /// sent message.
    pub(crate) async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
    ) -> Result<SentMessage, RelayError> {
        let url = format!("{}/sendMessage", self.base_url);
        let body = json!({
            "chat_id": chat_id,
            "text": text,
        });

        let resp: TgResponse<TgMessage> = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| RelayError::Delivery(format!("telegram sendMessage failed: {e}")))?
            .json()
            .await
            .map_err(|e| RelayError::Delivery(format!("telegram sendMessage parse failed: {e}")))?;

        if !resp.ok {
            return Err(RelayError::Delivery(format!(
                "telegram rejected sendMessage to {chat_id}: {}",
                resp.description.unwrap_or_default()
            )));
        }

        let message_id = resp
            .result
            .map(|m| m.message_id)
            .ok_or_else(|| RelayError::Delivery("sendMessage returned no message".into()))?;

        Ok(SentMessage { message_id })
    }

    /// Send a chat action ("typing").
    pub(crate) async fn send_chat_action(
        &self,
        chat_id: i64,
        action: &str,
    ) -> Result<(), RelayError> {
        let url = format!("{}/sendChatAction", self.base_url);
        let body = json!({
            "chat_id": chat_id,
            "action": action,
        });

        let resp: TgResponse<bool> = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| RelayError::Delivery(format!("telegram sendChatAction failed: {e}")))?
            .json()
            .await
            .map_err(|e| {
                RelayError::Delivery(format!("telegram sendChatAction parse failed: {e}"))
            })?;

        if !resp.ok {
            return Err(RelayError::Delivery(format!(
                "telegram rejected sendChatAction: {}",
                resp.description.unwrap_or_default()
            )));
        }

        Ok(())
    }
}
