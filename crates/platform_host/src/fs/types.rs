//! Remote file-store wire types shared across host contracts and adapters.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
/// Remote store entry kind.
pub enum RemoteEntryKind {
    /// File entry.
    File,
    /// Directory entry.
    Directory,
}

impl RemoteEntryKind {
    /// Returns `true` for directory entries.
    pub fn is_directory(self) -> bool {
        matches!(self, Self::Directory)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Entry returned by listing and stat operations.
pub struct RemoteEntry {
    /// Base name of the entry.
    pub name: String,
    /// Full normalized store path.
    pub path: String,
    /// File or directory kind.
    pub kind: RemoteEntryKind,
    /// File size in bytes (files only).
    pub size: Option<u64>,
    /// Last-modified time in unix milliseconds when available.
    pub modified_at_unix_ms: Option<u64>,
    /// Number of direct children (directories only).
    pub child_count: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Result payload for directory listing operations.
pub struct RemoteListing {
    /// Normalized directory path that was listed.
    pub path: String,
    /// Child entries in the directory.
    pub entries: Vec<RemoteEntry>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Typed failure returned by remote file-store operations.
///
/// The shell treats every variant the same way at the action boundary (surface a notification,
/// leave local state untouched); the variants exist so adapters and tests can be precise about
/// what the server reported.
pub enum FsError {
    /// Transport or server failure (network error, 5xx).
    #[error("file store unreachable: {0}")]
    Network(String),
    /// The path no longer exists on the server.
    #[error("no such path: {path}")]
    NotFound {
        /// Path the server rejected.
        path: String,
    },
    /// The destination directory already contains an entry with this name.
    #[error("destination already contains \"{name}\"")]
    Conflict {
        /// Conflicting entry name.
        name: String,
    },
    /// The server refused the operation.
    #[error("operation rejected: {reason}")]
    Rejected {
        /// Server-supplied reason.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn entry_kind_serde_uses_kebab_case_wire_values() {
        assert_eq!(
            serde_json::to_string(&RemoteEntryKind::Directory).expect("serialize"),
            "\"directory\""
        );
        let kind: RemoteEntryKind = serde_json::from_str("\"file\"").expect("deserialize");
        assert_eq!(kind, RemoteEntryKind::File);
    }

    #[test]
    fn listing_round_trips_with_serde() {
        let listing = RemoteListing {
            path: "Desktop".to_string(),
            entries: vec![RemoteEntry {
                name: "notes.md".to_string(),
                path: "Desktop/notes.md".to_string(),
                kind: RemoteEntryKind::File,
                size: Some(42),
                modified_at_unix_ms: Some(1_700_000_000_000),
                child_count: None,
            }],
        };

        let value = serde_json::to_value(&listing).expect("serialize");
        assert_eq!(value["entries"][0]["path"], json!("Desktop/notes.md"));
        let round_trip: RemoteListing = serde_json::from_value(value).expect("deserialize");
        assert_eq!(round_trip, listing);
    }

    #[test]
    fn fs_error_messages_name_the_failing_piece() {
        let err = FsError::Conflict {
            name: "notes.md".to_string(),
        };
        assert_eq!(err.to_string(), "destination already contains \"notes.md\"");
    }
}
