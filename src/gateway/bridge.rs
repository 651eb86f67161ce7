//! Relay bridge — reverse mapping from operator-group notifications back
//! to the originating end-user conversation.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

/// Where an operator reply should be routed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayTarget {
    pub chat_id: i64,
    pub display_name: String,
}

/// Map from the message id of a notification sent to the operator group to
/// the customer conversation it relayed. Entries are read-only once
/// recorded (operators may reply to the same notification repeatedly) and
/// evicted oldest-first past `capacity`, since notification ids are never
/// reused but accumulate forever on a long-running process.
pub struct RelayBridge {
    capacity: usize,
    inner: Mutex<Inner>,
}

struct Inner {
    map: HashMap<i64, RelayTarget>,
    order: VecDeque<i64>,
}

impl RelayBridge {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            inner: Mutex::new(Inner {
                map: HashMap::new(),
                order: VecDeque::new(),
            }),
        }
    }

    /// Register a mapping, keyed by the transport-assigned id of the
    /// notification just sent to the operator group.
    pub fn record(&self, notification_id: i64, chat_id: i64, display_name: &str) {
        let mut inner = self.inner.lock().unwrap();
        if inner
            .map
            .insert(
                notification_id,
                RelayTarget {
                    chat_id,
                    display_name: display_name.to_string(),
                },
            )
            .is_none()
        {
            inner.order.push_back(notification_id);
        }
        while inner.order.len() > self.capacity {
            if let Some(oldest) = inner.order.pop_front() {
                inner.map.remove(&oldest);
            }
        }
    }

    /// Pure lookup. A miss means "not a routable reply", not an error.
    pub fn resolve(&self, notification_id: i64) -> Option<RelayTarget> {
        self.inner.lock().unwrap().map.get(&notification_id).cloned()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().map.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let bridge = RelayBridge::new(16);
        bridge.record(1, 42, "alice");
        let target = bridge.resolve(1).unwrap();
        assert_eq!(target.chat_id, 42);
        assert_eq!(target.display_name, "alice");
    }

    #[test]
    fn test_unknown_id_is_not_found() {
        let bridge = RelayBridge::new(16);
        bridge.record(1, 42, "alice");
        assert!(bridge.resolve(2).is_none());
    }

    #[test]
    fn test_resolve_does_not_consume() {
        let bridge = RelayBridge::new(16);
        bridge.record(1, 42, "alice");
        assert!(bridge.resolve(1).is_some());
        assert!(bridge.resolve(1).is_some());
    }

    #[test]
    fn test_oldest_entries_evicted_past_capacity() {
        let bridge = RelayBridge::new(3);
        for id in 1..=5 {
            bridge.record(id, id * 10, "c");
        }
        assert_eq!(bridge.len(), 3);
        assert!(bridge.resolve(1).is_none());
        assert!(bridge.resolve(2).is_none());
        assert_eq!(bridge.resolve(5).unwrap().chat_id, 50);
    }

    #[test]
    fn test_re_record_same_id_overwrites() {
        let bridge = RelayBridge::new(3);
        bridge.record(1, 42, "alice");
        bridge.record(1, 43, "bob");
        assert_eq!(bridge.len(), 1);
        assert_eq!(bridge.resolve(1).unwrap().chat_id, 43);
    }
}
