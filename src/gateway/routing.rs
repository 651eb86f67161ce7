//! Inbound event routing — operator replies, control commands, and the
//! end-user message flow.

use super::keywords::is_urgent;
use super::registry::{ConversationState, Mode};
use super::Gateway;
use crate::commands::Command;
use chrono::Utc;
use relay_core::message::IncomingMessage;
use tracing::{error, info, warn};

pub(super) const GREETING: &str = "Hi! 👋\n\
    I'm the support assistant. Ask me anything about our services, \
    or send /support to talk to a human.";

pub(super) const HELP_TEXT: &str = "How this chat works:\n\
    • Just type your question — the assistant answers automatically\n\
    • /support — ask a human support agent to take over\n\
    • /resume — let the assistant answer again\n\
    • /help — show this message";

pub(super) const SUPPORT_ACK: &str = "Got it — a support agent will join this chat shortly.\n\
    The assistant is paused meanwhile and will come back automatically.";

pub(super) const RESUME_ACK: &str =
    "The assistant is ready to help you again! What else can I do for you?";

impl Gateway {
    /// Classify one inbound event and dispatch it.
    pub(super) async fn handle_message(&self, incoming: IncomingMessage) {
        let preview = if incoming.text.chars().count() > 60 {
            let truncated: String = incoming.text.chars().take(60).collect();
            format!("{truncated}...")
        } else {
            incoming.text.clone()
        };
        info!("[{}] {} says: {}", incoming.chat_id, incoming.sender_name, preview);

        // Operator-group traffic is reply routing, never assistant input.
        if incoming.chat_id == self.operator_group_id {
            self.handle_operator_message(&incoming).await;
            return;
        }

        if let Some(cmd) = Command::parse(&incoming.text) {
            self.handle_command(cmd, &incoming).await;
            return;
        }

        let is_admin_teaching = incoming.sender_id == self.admin_id && !incoming.is_group;
        if is_admin_teaching {
            // Admin private messages teach the assistant. They skip the
            // operator relay and the handoff pause check, but still get an
            // assistant reply below.
            match self.store.save_knowledge(&incoming.text).await {
                Ok(()) => info!("taught new fact from admin"),
                Err(e) => error!("failed to save taught fact: {e}"),
            }
        } else {
            if let Err(e) = self
                .store
                .upsert_customer(
                    incoming.chat_id,
                    incoming.username.as_deref(),
                    Some(&incoming.first_name),
                )
                .await
            {
                error!("customer upsert failed: {e}");
            }

            // Urgency detection and the operator relay run on every
            // end-user message, regardless of handoff state.
            let urgent = is_urgent(&incoming.text, &self.urgent_keywords);
            if urgent {
                self.escalate_urgent(&incoming).await;
            }
            self.relay_to_operators(&incoming, urgent).await;

            if self.registry.get(incoming.chat_id).mode == Mode::HumanAssisted {
                // A human owns this conversation — no automated reply.
                return;
            }
        }

        self.assistant_reply(&incoming).await;
    }

    /// An event in the operator group: if it replies to a relayed
    /// notification, forward the text verbatim to the mapped customer and
    /// report the outcome; otherwise it's ordinary group chatter.
    async fn handle_operator_message(&self, incoming: &IncomingMessage) {
        let Some(reply_id) = incoming.reply_to_message_id else {
            return;
        };
        let Some(target) = self.bridge.resolve(reply_id) else {
            return;
        };

        match self.channel.send_text(target.chat_id, &incoming.text).await {
            Ok(_) => {
                info!(
                    "operator reply forwarded to {} ({})",
                    target.display_name, target.chat_id
                );
                self.send_text(
                    self.operator_group_id,
                    &format!("✅ Delivered to {}", target.display_name),
                )
                .await;
            }
            Err(e) => {
                warn!("operator reply to chat {} failed: {e}", target.chat_id);
                self.send_text(
                    self.operator_group_id,
                    &format!("❌ Could not deliver to {}: {e}", target.display_name),
                )
                .await;
            }
        }
    }

    async fn handle_command(&self, cmd: Command, incoming: &IncomingMessage) {
        match cmd {
            Command::Start => {
                if let Err(e) = self
                    .store
                    .upsert_customer(
                        incoming.chat_id,
                        incoming.username.as_deref(),
                        Some(&incoming.first_name),
                    )
                    .await
                {
                    error!("customer upsert failed: {e}");
                }
                self.send_text(incoming.chat_id, GREETING).await;
            }
            Command::Help => self.send_text(incoming.chat_id, HELP_TEXT).await,
            Command::Support => self.request_human_handoff(incoming).await,
            Command::Resume => {
                self.resume_automated(incoming.chat_id);
                self.send_text(incoming.chat_id, RESUME_ACK).await;
            }
        }
    }

    /// Hand a conversation over to a human: pause the assistant, schedule
    /// the timed reversion, acknowledge the customer, and alert the
    /// operator group.
    pub async fn request_human_handoff(&self, incoming: &IncomingMessage) {
        let resume_at = Utc::now()
            + chrono::Duration::from_std(self.resume_delay)
                .unwrap_or_else(|_| chrono::Duration::hours(1));
        self.registry.set(
            incoming.chat_id,
            ConversationState {
                mode: Mode::HumanAssisted,
                resume_at: Some(resume_at),
            },
        );
        self.scheduler.schedule_resume(incoming.chat_id);
        info!("handoff requested for chat {}", incoming.chat_id);

        self.send_text(incoming.chat_id, SUPPORT_ACK).await;

        let alert = format!(
            "🔔 Customer requests live support\n👤 {} (id {})\n\nPlease reach out now!",
            incoming.sender_name, incoming.sender_id
        );
        self.send_text(self.operator_group_id, &alert).await;
    }

    /// Return a conversation to automated handling, cancelling any pending
    /// resume timer. Idempotent.
    pub fn resume_automated(&self, chat_id: i64) {
        self.registry.set(chat_id, ConversationState::default());
        self.scheduler.cancel(chat_id);
        info!("chat {chat_id} back to automated handling");
    }

    async fn escalate_urgent(&self, incoming: &IncomingMessage) {
        let alert = format!(
            "🚨 URGENT message\n👤 {}\n💬 {}",
            incoming.sender_name, incoming.text
        );
        self.send_text(self.admin_id, &alert).await;
    }

    /// Relay a customer message into the operator group and record the
    /// reverse mapping keyed by the id of the notification just sent.
    async fn relay_to_operators(&self, incoming: &IncomingMessage, urgent: bool) {
        let tag = if urgent { "🚨 URGENT 🚨\n" } else { "" };
        let notification = format!(
            "{tag}📩 Message from customer\n👤 {} (id {})\n💬 {}\n\n\
             Reply to this message to answer them.",
            incoming.sender_name, incoming.sender_id, incoming.text
        );

        match self
            .channel
            .send_text(self.operator_group_id, &notification)
            .await
        {
            Ok(sent) => {
                self.bridge
                    .record(sent.message_id, incoming.chat_id, &incoming.sender_name);
            }
            Err(e) => warn!("operator relay failed: {e}"),
        }
    }
}
