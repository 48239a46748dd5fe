//! Browser adapters for the `platform_host` contracts.
//!
//! The remote file store is reached over its HTTP API with `fetch`, and the push channel over a
//! server-sent-event stream. Everything browser-specific is gated on `target_arch = "wasm32"`;
//! on other targets the adapters degrade to typed failures so the workspace builds and tests
//! everywhere.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

mod events;
mod fetch;
mod fs;
mod notifications;
mod upload;

pub use events::EventSourcePushChannel;
pub use fs::HttpRemoteFsService;
pub use notifications::ConsoleNotificationService;
pub use upload::{pick_and_upload, UploadDone};

/// Base URL prefix of the file-store HTTP API.
pub const FILES_API_BASE: &str = "/api/files";

/// Returns the configured remote file-store adapter.
pub fn remote_fs_service() -> HttpRemoteFsService {
    HttpRemoteFsService::new(FILES_API_BASE)
}

/// Returns the configured push-event channel adapter.
pub fn push_channel() -> EventSourcePushChannel {
    EventSourcePushChannel::new(&format!("{FILES_API_BASE}/events"))
}

/// Returns the configured notification adapter.
pub fn notification_service() -> ConsoleNotificationService {
    ConsoleNotificationService
}

/// Builds the export/download URL for a store path.
pub fn export_url(path: &str) -> String {
    format!("{FILES_API_BASE}/export?path={}", fetch::encode_component(path))
}

/// Opens `url` in a new browser tab. No-op outside the browser.
pub fn open_external_url(url: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            let _ = window.open_with_url_and_target(url, "_blank");
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    let _ = url;
}
