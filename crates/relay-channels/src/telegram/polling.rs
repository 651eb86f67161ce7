//! Long-polling update loop and Channel trait implementation.

use super::types::{display_name, TgResponse, TgUpdate};
use super::TelegramChannel;
use async_trait::async_trait;
use relay_core::{
    error::RelayError,
    message::{IncomingMessage, SentMessage},
    traits::Channel,
};
use tokio::sync::mpsc;
use tracing::{error, info};
use uuid::Uuid;

#[async_trait]
impl Channel for TelegramChannel {
    fn name(&self) -> &str {
        "telegram"
    }

    async fn start(&self) -> Result<mpsc::Receiver<IncomingMessage>, RelayError> {
        let (tx, rx) = mpsc::channel(64);
        let client = self.client.clone();
        let base_url = self.base_url.clone();
        let last_update_id = self.last_update_id.clone();

        info!("Telegram channel starting long polling...");

        tokio::spawn(async move {
            let mut backoff_secs: u64 = 1;

            loop {
                let last = last_update_id.lock().await;
                let offset = last.map(|id| id + 1);
                drop(last);

                let mut url = format!("{base_url}/getUpdates?timeout=30");
                if let Some(off) = offset {
                    url.push_str(&format!("&offset={off}"));
                }

                let resp = match client
                    .get(&url)
                    .timeout(std::time::Duration::from_secs(35))
                    .send()
                    .await
                {
                    Ok(r) => r,
                    Err(e) => {
                        error!("telegram poll error (retry in {backoff_secs}s): {e}");
                        tokio::time::sleep(std::time::Duration::from_secs(backoff_secs)).await;
                        backoff_secs = (backoff_secs * 2).min(60);
                        continue;
                    }
                };

                let body: TgResponse<Vec<TgUpdate>> = match resp.json().await {
                    Ok(b) => b,
                    Err(e) => {
                        error!("telegram parse error (retry in {backoff_secs}s): {e}");
                        tokio::time::sleep(std::time::Duration::from_secs(backoff_secs)).await;
                        backoff_secs = (backoff_secs * 2).min(60);
                        continue;
                    }
                };

                if !body.ok {
                    error!(
                        "telegram API error (retry in {backoff_secs}s): {}",
                        body.description.unwrap_or_default()
                    );
                    tokio::time::sleep(std::time::Duration::from_secs(backoff_secs)).await;
                    backoff_secs = (backoff_secs * 2).min(60);
                    continue;
                }

                // Successful poll -- reset backoff.
                backoff_secs = 1;

                let updates = body.result.unwrap_or_default();

                if let Some(last_update) = updates.last() {
                    *last_update_id.lock().await = Some(last_update.update_id);
                }

                for update in updates {
                    let msg = match update.message {
                        Some(m) => m,
                        None => continue,
                    };

                    // Text only -- stickers, photos, voice etc. are not
                    // part of the support flow.
                    let text = match msg.text {
                        Some(t) => t,
                        None => continue,
                    };

                    let user = match msg.from {
                        Some(u) => u,
                        None => continue,
                    };

                    let is_group = matches!(msg.chat.chat_type.as_str(), "group" | "supergroup");

                    let incoming = IncomingMessage {
                        id: Uuid::new_v4(),
                        chat_id: msg.chat.id,
                        sender_id: user.id,
                        sender_name: display_name(&user),
                        username: user.username.clone(),
                        first_name: user.first_name.clone(),
                        text,
                        timestamp: chrono::Utc::now(),
                        reply_to_message_id: msg.reply_to_message.map(|r| r.message_id),
                        is_group,
                    };

                    if tx.send(incoming).await.is_err() {
                        info!("telegram channel receiver dropped, stopping poll");
                        return;
                    }
                }
            }
        });

        Ok(rx)
    }

    async fn send_text(&self, chat_id: i64, text: &str) -> Result<SentMessage, RelayError> {
        self.send_message(chat_id, text).await
    }

    async fn send_typing(&self, chat_id: i64) -> Result<(), RelayError> {
        self.send_chat_action(chat_id, "typing").await
    }

    async fn stop(&self) -> Result<(), RelayError> {
        info!("Telegram channel stopped");
        Ok(())
    }
}
