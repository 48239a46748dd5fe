//! File-tree cache and push-event reconciliation.
//!
//! The cache is a wholesale-replaced mirror of the desktop subtree: it is refreshed on mount, on
//! any push event touching the displayed subtree, and on the explicit refresh that follows a
//! completed mutation. Mutations never edit the cache directly — the UI stays eventually
//! consistent with the store, and the latency window between a mutation and its confirming push
//! event is accepted by design.

use platform_host::{
    basename, is_descendant_path, FsEvent, FsEventKind, RemoteEntry, RemoteEntryKind, RemoteListing,
};
use serde::{Deserialize, Serialize};

/// Store path of the subtree mirrored on the desktop.
pub const DESKTOP_ROOT: &str = "Desktop";
/// Store path of the trash directory.
pub const TRASH_DIR: &str = "Trash";
/// Sentinel child file marking a directory as a custom app.
pub const APP_MARKER_FILE: &str = "APP.md";
/// Sentinel child file marking a directory as a life domain.
pub const LIFE_MARKER_FILE: &str = "LIFE.md";
/// Basenames that may never be renamed, moved, or trashed.
pub const PROTECTED_SYSTEM_FILES: &[&str] = &[APP_MARKER_FILE, LIFE_MARKER_FILE];

/// Returns `true` when `name` is in the protected-system set.
pub fn is_protected_basename(name: &str) -> bool {
    PROTECTED_SYSTEM_FILES.contains(&name)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// One node of the mirrored tree. `path` is the sole identity: the tree is wholesale-replaced on
/// reload, so every lookup and mutation is keyed by path, never by node identity.
pub struct FileNode {
    /// Base name.
    pub name: String,
    /// Full store path, unique within the tree.
    pub path: String,
    /// File or directory.
    pub kind: RemoteEntryKind,
    /// File size in bytes (files only).
    pub size: Option<u64>,
    /// Last-modified time in unix milliseconds when known.
    pub modified_at_unix_ms: Option<u64>,
    /// Direct child count reported by the store (directories only).
    pub child_count: Option<u32>,
    /// Loaded children; `None` for files and for directories not yet listed.
    pub children: Option<Vec<FileNode>>,
}

impl FileNode {
    /// Builds a node from a wire entry, without children.
    pub fn from_entry(entry: &RemoteEntry) -> Self {
        Self {
            name: entry.name.clone(),
            path: entry.path.clone(),
            kind: entry.kind,
            size: entry.size,
            modified_at_unix_ms: entry.modified_at_unix_ms,
            child_count: entry.child_count,
            children: None,
        }
    }

    /// Whether this node is a directory.
    pub fn is_directory(&self) -> bool {
        self.kind.is_directory()
    }

    /// Whether this is a protected system file. Derived from the basename, never stored.
    pub fn is_system_file(&self) -> bool {
        !self.is_directory() && is_protected_basename(&self.name)
    }

    /// Whether this directory carries the custom-app sentinel among its children.
    pub fn has_app_marker(&self) -> bool {
        self.has_sentinel_child(APP_MARKER_FILE)
    }

    /// Whether this directory carries the life-domain sentinel among its children.
    pub fn has_life_marker(&self) -> bool {
        self.has_sentinel_child(LIFE_MARKER_FILE)
    }

    fn has_sentinel_child(&self, sentinel: &str) -> bool {
        self.children
            .as_deref()
            .map(|children| {
                children
                    .iter()
                    .any(|c| !c.is_directory() && c.name == sentinel)
            })
            .unwrap_or(false)
    }

    /// Finds a node by path within this subtree.
    pub fn find(&self, path: &str) -> Option<&FileNode> {
        if self.path == path {
            return Some(self);
        }
        let children = self.children.as_deref()?;
        if !is_descendant_path(&self.path, path) && !self.path.is_empty() {
            return None;
        }
        children.iter().find_map(|child| child.find(path))
    }
}

#[derive(Debug, Clone, PartialEq)]
/// In-memory mirror of one subtree of the remote store.
pub struct FileTreeCache {
    root_path: String,
    root: Option<FileNode>,
}

impl FileTreeCache {
    /// Creates an empty cache rooted at `root_path`.
    pub fn new(root_path: impl Into<String>) -> Self {
        Self {
            root_path: root_path.into(),
            root: None,
        }
    }

    /// The subtree root this cache mirrors.
    pub fn root_path(&self) -> String {
        self.root_path.clone()
    }

    /// Applies a fresh listing, wholesale-replacing the cached tree.
    ///
    /// Applies only when `requested_root` still matches the cache root — a stale response for a
    /// superseded request is dropped rather than clobbering a newer view. Returns whether the
    /// listing was applied.
    pub fn apply_listing(&mut self, requested_root: &str, listing: &RemoteListing) -> bool {
        if requested_root != self.root_path {
            return false;
        }
        self.root = Some(FileNode {
            name: basename(&self.root_path).to_string(),
            path: self.root_path.clone(),
            kind: RemoteEntryKind::Directory,
            size: None,
            modified_at_unix_ms: None,
            child_count: Some(listing.entries.len() as u32),
            children: Some(listing.entries.iter().map(FileNode::from_entry).collect()),
        });
        true
    }

    /// The desktop icon entries: direct children of the root, in store order.
    pub fn icons(&self) -> &[FileNode] {
        self.root
            .as_ref()
            .and_then(|root| root.children.as_deref())
            .unwrap_or(&[])
    }

    /// Finds a node by path.
    pub fn node(&self, path: &str) -> Option<&FileNode> {
        self.root.as_ref()?.find(path)
    }

    /// Whether the tree currently contains `path`.
    pub fn contains(&self, path: &str) -> bool {
        self.node(path).is_some()
    }
}

/// Returns `true` when `path` is relevant to the subtree rooted at `root`: the root itself, a
/// descendant, or an ancestor whose change invalidates the root wholesale.
pub fn touches_subtree(root: &str, path: &str) -> bool {
    path == root || is_descendant_path(root, path) || is_descendant_path(path, root)
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Reconciliation step derived from one push event.
pub enum SyncReaction {
    /// Reload the displayed subtree wholesale.
    ReloadTree,
    /// Close any window bound to `path` or a descendant of it (stale-reference cleanup).
    ClosePathWindows {
        /// Source path that disappeared.
        path: String,
    },
    /// The trash contents changed; refresh the trash count and notify listeners.
    TrashChanged,
}

/// Derives the reconciliation steps for an inbound push event against the subtree currently
/// displayed at `displayed_root`. Pure; the reducer turns reactions into effects.
pub fn reactions_for_event(event: &FsEvent, displayed_root: &str) -> Vec<SyncReaction> {
    let mut reactions = Vec::new();

    let touches_display = touches_subtree(displayed_root, &event.path)
        || event
            .dest_path
            .as_deref()
            .map(|dest| touches_subtree(displayed_root, dest))
            .unwrap_or(false);
    if touches_display {
        reactions.push(SyncReaction::ReloadTree);
    }

    match event.kind {
        FsEventKind::Deleted | FsEventKind::Moved => {
            reactions.push(SyncReaction::ClosePathWindows {
                path: event.path.clone(),
            });
        }
        FsEventKind::Created | FsEventKind::Modified => {}
    }

    let touches_trash = touches_subtree(TRASH_DIR, &event.path)
        || event
            .dest_path
            .as_deref()
            .map(|dest| touches_subtree(TRASH_DIR, dest))
            .unwrap_or(false);
    if touches_trash {
        reactions.push(SyncReaction::TrashChanged);
    }

    reactions
}

#[cfg(test)]
mod tests {
    use platform_host::{FsEvent, FsEventKind, RemoteEntry, RemoteEntryKind, RemoteListing};
    use pretty_assertions::assert_eq;

    use super::*;

    fn entry(name: &str, path: &str, kind: RemoteEntryKind) -> RemoteEntry {
        RemoteEntry {
            name: name.to_string(),
            path: path.to_string(),
            kind,
            size: None,
            modified_at_unix_ms: None,
            child_count: None,
        }
    }

    fn desktop_listing() -> RemoteListing {
        RemoteListing {
            path: DESKTOP_ROOT.to_string(),
            entries: vec![
                entry("LIFE.md", "Desktop/LIFE.md", RemoteEntryKind::File),
                entry("work", "Desktop/work", RemoteEntryKind::Directory),
                entry("notes.md", "Desktop/notes.md", RemoteEntryKind::File),
            ],
        }
    }

    #[test]
    fn apply_listing_replaces_tree_wholesale() {
        let mut cache = FileTreeCache::new(DESKTOP_ROOT);
        assert!(cache.apply_listing(DESKTOP_ROOT, &desktop_listing()));
        assert_eq!(cache.icons().len(), 3);
        assert!(cache.contains("Desktop/work"));

        let smaller = RemoteListing {
            path: DESKTOP_ROOT.to_string(),
            entries: vec![entry("notes.md", "Desktop/notes.md", RemoteEntryKind::File)],
        };
        assert!(cache.apply_listing(DESKTOP_ROOT, &smaller));
        assert_eq!(cache.icons().len(), 1);
        assert!(!cache.contains("Desktop/work"));
    }

    #[test]
    fn stale_listing_for_superseded_root_is_dropped() {
        let mut cache = FileTreeCache::new(DESKTOP_ROOT);
        let stale = RemoteListing {
            path: "Archive".to_string(),
            entries: vec![entry("old.md", "Archive/old.md", RemoteEntryKind::File)],
        };
        assert!(!cache.apply_listing("Archive", &stale));
        assert_eq!(cache.icons().len(), 0);
    }

    #[test]
    fn system_flag_derives_from_protected_basename() {
        let mut cache = FileTreeCache::new(DESKTOP_ROOT);
        cache.apply_listing(DESKTOP_ROOT, &desktop_listing());

        assert!(cache.node("Desktop/LIFE.md").unwrap().is_system_file());
        assert!(!cache.node("Desktop/notes.md").unwrap().is_system_file());
    }

    #[test]
    fn marker_flags_derive_from_sentinel_children() {
        let domain = FileNode {
            name: "health".to_string(),
            path: "Desktop/health".to_string(),
            kind: RemoteEntryKind::Directory,
            size: None,
            modified_at_unix_ms: None,
            child_count: Some(2),
            children: Some(vec![
                FileNode::from_entry(&entry(
                    "LIFE.md",
                    "Desktop/health/LIFE.md",
                    RemoteEntryKind::File,
                )),
                FileNode::from_entry(&entry(
                    "log.md",
                    "Desktop/health/log.md",
                    RemoteEntryKind::File,
                )),
            ]),
        };
        assert!(domain.has_life_marker());
        assert!(!domain.has_app_marker());

        let unlisted = FileNode::from_entry(&entry("work", "Desktop/work", RemoteEntryKind::Directory));
        assert!(!unlisted.has_life_marker());
    }

    #[test]
    fn event_under_displayed_subtree_triggers_reload() {
        let event = FsEvent {
            kind: FsEventKind::Created,
            path: "Desktop/new.md".to_string(),
            dest_path: None,
            mtime: None,
        };
        assert_eq!(
            reactions_for_event(&event, DESKTOP_ROOT),
            vec![SyncReaction::ReloadTree]
        );
    }

    #[test]
    fn event_outside_displayed_subtree_is_ignored() {
        let event = FsEvent {
            kind: FsEventKind::Modified,
            path: "Archive/old.md".to_string(),
            dest_path: None,
            mtime: None,
        };
        assert_eq!(reactions_for_event(&event, DESKTOP_ROOT), Vec::new());
    }

    #[test]
    fn move_event_closes_windows_for_the_source_path() {
        let event = FsEvent {
            kind: FsEventKind::Moved,
            path: "Desktop/a/x.md".to_string(),
            dest_path: Some("Desktop/b/x.md".to_string()),
            mtime: None,
        };
        let reactions = reactions_for_event(&event, DESKTOP_ROOT);
        assert!(reactions.contains(&SyncReaction::ReloadTree));
        assert!(reactions.contains(&SyncReaction::ClosePathWindows {
            path: "Desktop/a/x.md".to_string()
        }));
    }

    #[test]
    fn trash_events_raise_trash_changed() {
        let event = FsEvent {
            kind: FsEventKind::Created,
            path: "Trash/notes.md".to_string(),
            dest_path: None,
            mtime: None,
        };
        assert_eq!(
            reactions_for_event(&event, DESKTOP_ROOT),
            vec![SyncReaction::TrashChanged]
        );

        let moved_in = FsEvent {
            kind: FsEventKind::Moved,
            path: "Desktop/notes.md".to_string(),
            dest_path: Some("Trash/notes.md".to_string()),
            mtime: None,
        };
        let reactions = reactions_for_event(&moved_in, DESKTOP_ROOT);
        assert!(reactions.contains(&SyncReaction::TrashChanged));
        assert!(reactions.contains(&SyncReaction::ReloadTree));
    }
}
