//! Gateway — the main event loop connecting the Telegram channel, the
//! store, and the completion provider.
//!
//! Owns the conversation state & handoff core: the conversation registry,
//! the resume scheduler, and the operator relay bridge.

pub mod bridge;
pub mod keywords;
pub mod registry;
pub mod scheduler;

mod pipeline;
mod routing;


use crate::catalog::Catalog;
use bridge::RelayBridge;
use registry::ConversationRegistry;
use relay_core::{
    config::Config,
    traits::{Channel, Provider},
};
use relay_memory::Store;
use scheduler::ResumeScheduler;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

/// The central gateway routing messages between the channel, the store,
/// and the provider.
pub struct Gateway {
    pub(super) provider: Arc<dyn Provider>,
    pub(super) channel: Arc<dyn Channel>,
    pub(super) store: Store,
    pub(super) registry: Arc<ConversationRegistry>,
    pub(super) scheduler: Arc<ResumeScheduler>,
    pub(super) bridge: RelayBridge,
    pub(super) catalog: Catalog,
    pub(super) urgent_keywords: Vec<String>,
    pub(super) admin_id: i64,
    pub(super) operator_group_id: i64,
    pub(super) resume_delay: Duration,
    pub(super) context_limit: i64,
    pub(super) knowledge_limit: i64,
}

impl Gateway {
    /// Create a new gateway. The registry, scheduler, and bridge are
    /// constructed here, once, and live for the process lifetime.
    pub fn new(
        provider: Arc<dyn Provider>,
        channel: Arc<dyn Channel>,
        store: Store,
        catalog: Catalog,
        cfg: &Config,
    ) -> Arc<Self> {
        let registry = Arc::new(ConversationRegistry::new());
        let resume_delay = Duration::from_secs(cfg.handoff.resume_after_mins * 60);
        let scheduler = ResumeScheduler::new(registry.clone(), channel.clone(), resume_delay);
        let urgent_keywords = catalog.effective_urgent_keywords();

        Arc::new(Self {
            provider,
            channel,
            store,
            registry,
            scheduler,
            bridge: RelayBridge::new(cfg.handoff.relay_map_capacity),
            catalog,
            urgent_keywords,
            admin_id: cfg.telegram.admin_id,
            operator_group_id: cfg.telegram.operator_group_id,
            resume_delay,
            context_limit: cfg.memory.context_limit,
            knowledge_limit: cfg.memory.knowledge_limit,
        })
    }

    /// Run the main event loop until shutdown.
    ///
    /// Each inbound message is handled in its own task, so events for
    /// different conversations interleave freely. Two quick messages from
    /// the same conversation may also overlap — an accepted limitation.
    pub async fn run(self: Arc<Self>) -> anyhow::Result<()> {
        info!(
            "relay gateway running | provider: {} | channel: {} | operator group: {}",
            self.provider.name(),
            self.channel.name(),
            self.operator_group_id,
        );

        let mut rx = self
            .channel
            .start()
            .await
            .map_err(|e| anyhow::anyhow!("failed to start channel: {e}"))?;

        loop {
            tokio::select! {
                maybe = rx.recv() => {
                    match maybe {
                        Some(incoming) => {
                            let gw = self.clone();
                            tokio::spawn(async move {
                                gw.handle_message(incoming).await;
                            });
                        }
                        None => {
                            warn!("channel stream ended");
                            break;
                        }
                    }
                }
                _ = tokio::signal::ctrl_c() => {
                    info!("Received shutdown signal");
                    break;
                }
            }
        }

        if let Err(e) = self.channel.stop().await {
            warn!("failed to stop channel: {e}");
        }
        info!("Shutdown complete.");
        Ok(())
    }

    /// Send text to a chat, logging delivery failures instead of
    /// propagating them.
    pub(super) async fn send_text(&self, chat_id: i64, text: &str) {
        if let Err(e) = self.channel.send_text(chat_id, text).await {
            error!("failed to send to chat {chat_id}: {e}");
        }
    }
}
