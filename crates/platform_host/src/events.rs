//! Push-event channel contracts.
//!
//! The channel is one-way: the server reports filesystem changes and the shell reacts. Nothing
//! in the shell ever emits on this channel.

use std::{cell::RefCell, rc::Rc};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
/// Kind of filesystem change reported by the push channel.
pub enum FsEventKind {
    /// A new entry appeared.
    Created,
    /// An entry was removed.
    Deleted,
    /// An entry moved from `path` to `dest_path`.
    Moved,
    /// An entry's content or metadata changed.
    Modified,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// One inbound filesystem change notification.
pub struct FsEvent {
    /// Change kind.
    pub kind: FsEventKind,
    /// Affected store path (the source path for moves).
    pub path: String,
    /// Destination path for [`FsEventKind::Moved`] events.
    #[serde(default)]
    pub dest_path: Option<String>,
    /// Modification time in unix milliseconds when the server supplies one.
    #[serde(default)]
    pub mtime: Option<u64>,
}

/// Handler invoked for each inbound push event.
pub type PushHandler = Rc<dyn Fn(FsEvent)>;

/// Host contract for the server-to-client change stream.
pub trait PushChannel {
    /// Installs `handler` for subsequent events. Installing a new handler replaces the previous
    /// one; the channel delivers events on the single UI execution context.
    fn subscribe(&self, handler: PushHandler);
}

#[derive(Debug, Clone, Copy, Default)]
/// No-op channel for unsupported targets; never delivers an event.
pub struct NoopPushChannel;

impl PushChannel for NoopPushChannel {
    fn subscribe(&self, _handler: PushHandler) {}
}

#[derive(Clone, Default)]
/// In-memory channel that lets tests and local tooling inject events by hand.
pub struct MemoryPushChannel {
    handler: Rc<RefCell<Option<PushHandler>>>,
}

impl MemoryPushChannel {
    /// Delivers `event` to the installed handler, if any.
    pub fn emit(&self, event: FsEvent) {
        let handler = self.handler.borrow().clone();
        if let Some(handler) = handler {
            handler(event);
        }
    }

    /// Returns `true` once a subscriber has been installed.
    pub fn has_subscriber(&self) -> bool {
        self.handler.borrow().is_some()
    }
}

impl PushChannel for MemoryPushChannel {
    fn subscribe(&self, handler: PushHandler) {
        *self.handler.borrow_mut() = Some(handler);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    #[test]
    fn fs_event_serde_uses_kebab_case_kinds_and_optional_fields() {
        let event: FsEvent = serde_json::from_str(
            r#"{"kind":"moved","path":"Desktop/a/x.md","dest_path":"Desktop/b/x.md"}"#,
        )
        .expect("deserialize");
        assert_eq!(event.kind, FsEventKind::Moved);
        assert_eq!(event.dest_path.as_deref(), Some("Desktop/b/x.md"));
        assert_eq!(event.mtime, None);

        let event: FsEvent =
            serde_json::from_str(r#"{"kind":"created","path":"Notes"}"#).expect("deserialize");
        assert_eq!(event.kind, FsEventKind::Created);
        assert_eq!(event.dest_path, None);
    }

    #[test]
    fn memory_channel_delivers_to_latest_subscriber() {
        let channel = MemoryPushChannel::default();
        assert!(!channel.has_subscriber());

        let seen = Rc::new(Cell::new(0u32));
        let seen_in_handler = seen.clone();
        channel.subscribe(Rc::new(move |_event| {
            seen_in_handler.set(seen_in_handler.get() + 1);
        }));

        channel.emit(FsEvent {
            kind: FsEventKind::Created,
            path: "Desktop/new.md".to_string(),
            dest_path: None,
            mtime: None,
        });
        assert_eq!(seen.get(), 1);
    }
}
