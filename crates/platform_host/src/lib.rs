//! Typed host-domain contracts and shared models used across the shell runtime and browser
//! adapters.
//!
//! This crate is the API-first boundary for platform services. It exposes the remote file-store
//! contract, push-event channel contract, notification contract, and the shared path/wire types,
//! while concrete browser adapters live in `platform_host_http`.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod events;
pub mod fs;
pub mod notifications;

pub use events::{
    FsEvent, FsEventKind, MemoryPushChannel, NoopPushChannel, PushChannel, PushHandler,
};
pub use fs::path::{basename, is_descendant_path, join_path, normalize_store_path, parent_path};
pub use fs::service::{
    NoopRemoteFsService, RecordedFsCall, RecordingFsService, RemoteFsFuture, RemoteFsService,
};
pub use fs::types::{FsError, RemoteEntry, RemoteEntryKind, RemoteListing};
pub use notifications::{NoopNotificationService, NotificationFuture, NotificationService};
