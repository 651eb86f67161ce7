//! Handoff scheduler — timed reversion of human-assisted conversations
//! back to automated mode.

use super::registry::{ConversationRegistry, ConversationState, Mode};
use relay_core::traits::Channel;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// Sent to the conversation when the assistant takes back over.
pub const RESUME_NOTICE: &str = "The automated assistant is back. \
    If you still need a human, send /support again.";

struct TimerEntry {
    generation: u64,
    handle: JoinHandle<()>,
}

/// Owns the pending resume timers, keyed per conversation. At most one
/// live timer per chat id: scheduling cancels the previous timer first.
/// Each timer carries a generation so a fire can tell whether it still
/// owns the bookkeeping entry.
pub struct ResumeScheduler {
    registry: Arc<ConversationRegistry>,
    channel: Arc<dyn Channel>,
    delay: Duration,
    next_generation: AtomicU64,
    timers: Mutex<HashMap<i64, TimerEntry>>,
}

impl ResumeScheduler {
    pub fn new(
        registry: Arc<ConversationRegistry>,
        channel: Arc<dyn Channel>,
        delay: Duration,
    ) -> Arc<Self> {
        Arc::new(Self {
            registry,
            channel,
            delay,
            next_generation: AtomicU64::new(0),
            timers: Mutex::new(HashMap::new()),
        })
    }

    /// Schedule a resume after the configured delay.
    pub fn schedule_resume(self: &Arc<Self>, chat_id: i64) {
        self.schedule_resume_after(chat_id, self.delay);
    }

    /// Schedule a resume after `delay`, cancelling any pending timer for
    /// the same conversation first.
    pub fn schedule_resume_after(self: &Arc<Self>, chat_id: i64, delay: Duration) {
        let generation = self.next_generation.fetch_add(1, Ordering::Relaxed);
        let mut timers = self.timers.lock().unwrap();
        if let Some(old) = timers.remove(&chat_id) {
            old.handle.abort();
        }

        let scheduler = Arc::clone(self);
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            scheduler.fire(chat_id, generation).await;
        });
        timers.insert(chat_id, TimerEntry { generation, handle });
    }

    /// Cancel a pending timer, if any. No-op otherwise.
    pub fn cancel(&self, chat_id: i64) {
        if let Some(entry) = self.timers.lock().unwrap().remove(&chat_id) {
            entry.handle.abort();
        }
    }

    /// Whether a timer is currently pending for a conversation.
    pub fn has_pending(&self, chat_id: i64) -> bool {
        self.timers.lock().unwrap().contains_key(&chat_id)
    }

    /// Timer fire handler. Only the generation that still owns the
    /// bookkeeping entry may proceed: a fire racing its own replacement
    /// (the old task past its sleep when aborted) must not remove the
    /// newer timer's handle. It then re-reads current state: a
    /// conversation already resumed by other means must not be touched
    /// again, and must not receive a duplicate notice.
    pub(super) async fn fire(&self, chat_id: i64, generation: u64) {
        {
            let mut timers = self.timers.lock().unwrap();
            match timers.get(&chat_id) {
                Some(entry) if entry.generation == generation => {
                    timers.remove(&chat_id);
                }
                _ => return,
            }
        }

        let state = self.registry.get(chat_id);
        if state.mode != Mode::HumanAssisted {
            return;
        }

        self.registry.set(
            chat_id,
            ConversationState {
                mode: Mode::Automated,
                resume_at: None,
            },
        );
        info!("auto-resume for chat {chat_id}");

        // The transition has committed; a failed notice must not block it.
        if let Err(e) = self.channel.send_text(chat_id, RESUME_NOTICE).await {
            warn!("resume notice for chat {chat_id} undeliverable: {e}");
        }
    }
}
