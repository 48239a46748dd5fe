//! Broadcast signal bus decoupling independently mounted views of the same state.
//!
//! Signals are fire-and-forget and receivers must be idempotent: getting `TreeChanged` twice
//! costs at most one extra reload, never an error. Delivery is a bounded per-subscriber inbox
//! drained by the owning view on its next render pass.

use std::collections::{BTreeSet, HashMap};

use crate::model::WindowId;

const MAX_INBOX_SIGNALS: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Identity of a bus subscriber (a mounted view).
pub struct SubscriberId(pub u64);

#[derive(Debug, Clone, PartialEq, Eq)]
/// Cross-cutting shell notification.
pub enum ShellSignal {
    /// The file tree changed; scoped to one window when only the originating view should
    /// reload.
    TreeChanged {
        /// Window whose view should reload, or `None` for every tree view.
        scope: Option<WindowId>,
    },
    /// The trash contents changed.
    TrashChanged,
    /// Ask the Finder view in `window_id` to navigate to `path`.
    NavigateWindow {
        /// Target window.
        window_id: WindowId,
        /// Path to navigate to.
        path: String,
    },
    /// Any window bound to `path` (or a descendant) should close.
    ClosePathWindows {
        /// Vanished source path.
        path: String,
    },
    /// Attach `path` to the external chat surface.
    AttachToChat {
        /// Path to attach.
        path: String,
    },
}

impl ShellSignal {
    /// Stable topic string the signal is published under.
    pub fn topic(&self) -> &'static str {
        match self {
            Self::TreeChanged { .. } => "tree-changed",
            Self::TrashChanged => "trash-changed",
            Self::NavigateWindow { .. } => "navigate-window",
            Self::ClosePathWindows { .. } => "close-path-windows",
            Self::AttachToChat { .. } => "attach-to-chat",
        }
    }
}

#[derive(Debug, Default)]
/// Topic-keyed subscriber registry with bounded inboxes.
pub struct SignalBus {
    next_subscriber: u64,
    topic_subscribers: HashMap<&'static str, BTreeSet<SubscriberId>>,
    inboxes: HashMap<SubscriberId, Vec<ShellSignal>>,
}

impl SignalBus {
    /// Registers a new subscriber and returns its id.
    pub fn register(&mut self) -> SubscriberId {
        self.next_subscriber += 1;
        let id = SubscriberId(self.next_subscriber);
        self.inboxes.insert(id, Vec::new());
        id
    }

    /// Subscribes `id` to a topic.
    pub fn subscribe(&mut self, id: SubscriberId, topic: &'static str) {
        if self.inboxes.contains_key(&id) {
            self.topic_subscribers.entry(topic).or_default().insert(id);
        }
    }

    /// Removes one subscription.
    pub fn unsubscribe(&mut self, id: SubscriberId, topic: &'static str) {
        if let Some(subscribers) = self.topic_subscribers.get_mut(topic) {
            subscribers.remove(&id);
            if subscribers.is_empty() {
                self.topic_subscribers.remove(topic);
            }
        }
    }

    /// Drops a subscriber and all of its subscriptions.
    pub fn remove_subscriber(&mut self, id: SubscriberId) {
        self.inboxes.remove(&id);
        for subscribers in self.topic_subscribers.values_mut() {
            subscribers.remove(&id);
        }
        self.topic_subscribers
            .retain(|_, subscribers| !subscribers.is_empty());
    }

    /// Broadcasts `signal` to every subscriber of its topic.
    pub fn publish(&mut self, signal: ShellSignal) {
        let Some(subscribers) = self.topic_subscribers.get(signal.topic()).cloned() else {
            return;
        };
        for target in subscribers {
            if let Some(inbox) = self.inboxes.get_mut(&target) {
                inbox.push(signal.clone());
                if inbox.len() > MAX_INBOX_SIGNALS {
                    let overflow = inbox.len() - MAX_INBOX_SIGNALS;
                    inbox.drain(0..overflow);
                }
            }
        }
    }

    /// Drains and returns the pending signals for `id`.
    pub fn drain(&mut self, id: SubscriberId) -> Vec<ShellSignal> {
        self.inboxes
            .get_mut(&id)
            .map(std::mem::take)
            .unwrap_or_default()
    }
}
