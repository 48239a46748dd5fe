//! Per-window navigation: browser-style history, Miller columns, and breadcrumbs.

use platform_host::RemoteEntry;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// One open Miller column.
pub struct ColumnState {
    /// Directory this column lists.
    pub path: String,
    /// Listed children; empty until the async load completes.
    pub items: Vec<RemoteEntry>,
    /// Path of the selected child, if any. Column *i+1* exists only when this selection is a
    /// directory.
    pub selected_child: Option<String>,
}

impl ColumnState {
    fn new(path: String) -> Self {
        Self {
            path,
            items: Vec::new(),
            selected_child: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// A breadcrumb segment derived from the current path.
pub struct BreadcrumbSegment {
    /// Display label (the path segment).
    pub label: String,
    /// Prefix path the segment navigates to.
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Stack-based visit history plus the open column list for one Finder window.
pub struct NavigationState {
    /// Path currently displayed.
    pub current_path: String,
    /// Visited paths, oldest first.
    pub history: Vec<String>,
    /// Index of `current_path` within `history`; always a valid index.
    pub history_index: usize,
    /// Open columns, left to right. The first column always lists `current_path`.
    pub columns: Vec<ColumnState>,
}

impl NavigationState {
    /// Fresh navigation rooted at `path`.
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            current_path: path.clone(),
            history: vec![path.clone()],
            history_index: 0,
            columns: vec![ColumnState::new(path)],
        }
    }

    /// Navigates to `path`: truncates any forward history past the current index, appends the
    /// new entry, and collapses the column list back to a single column at `path`.
    pub fn navigate_to(&mut self, path: impl Into<String>) {
        let path = path.into();
        self.history.truncate(self.history_index + 1);
        self.history.push(path.clone());
        self.history_index = self.history.len() - 1;
        self.set_current(path);
    }

    /// Steps back one history entry. Returns `false` at the oldest entry.
    pub fn go_back(&mut self) -> bool {
        if self.history_index == 0 {
            return false;
        }
        self.history_index -= 1;
        self.set_current(self.history[self.history_index].clone());
        true
    }

    /// Steps forward one history entry. Returns `false` at the newest entry.
    pub fn go_forward(&mut self) -> bool {
        if self.history_index + 1 >= self.history.len() {
            return false;
        }
        self.history_index += 1;
        self.set_current(self.history[self.history_index].clone());
        true
    }

    /// Whether a back step is possible.
    pub fn can_go_back(&self) -> bool {
        self.history_index > 0
    }

    /// Whether a forward step is possible.
    pub fn can_go_forward(&self) -> bool {
        self.history_index + 1 < self.history.len()
    }

    /// Marks `child_path` selected in column `column` and truncates every column to its right.
    ///
    /// For a directory selection this appends a fresh, unloaded, unselected column and returns
    /// its path so the caller can issue the async child listing; selecting a non-directory in
    /// the last column never grows the list.
    pub fn select_in_column(
        &mut self,
        column: usize,
        child_path: impl Into<String>,
        is_directory: bool,
    ) -> Option<String> {
        if column >= self.columns.len() {
            return None;
        }
        let child_path = child_path.into();
        self.columns.truncate(column + 1);
        self.columns[column].selected_child = Some(child_path.clone());
        if is_directory {
            self.columns.push(ColumnState::new(child_path.clone()));
            Some(child_path)
        } else {
            None
        }
    }

    /// Applies an async column listing. Dropped when the column no longer exists or no longer
    /// lists `requested_path` — a stale response must not clobber a newer column set. Returns
    /// whether the listing was applied.
    pub fn apply_column_listing(
        &mut self,
        column: usize,
        requested_path: &str,
        items: Vec<RemoteEntry>,
    ) -> bool {
        match self.columns.get_mut(column) {
            Some(col) if col.path == requested_path => {
                col.items = items;
                true
            }
            _ => false,
        }
    }

    /// Breadcrumb segments derived purely from splitting `current_path`. The store root is
    /// always the first segment.
    pub fn breadcrumb_segments(&self) -> Vec<BreadcrumbSegment> {
        let mut segments = vec![BreadcrumbSegment {
            label: "Home".to_string(),
            path: String::new(),
        }];
        let mut prefix = String::new();
        for part in self.current_path.split('/').filter(|p| !p.is_empty()) {
            prefix = platform_host::join_path(&prefix, part);
            segments.push(BreadcrumbSegment {
                label: part.to_string(),
                path: prefix.clone(),
            });
        }
        segments
    }

    fn set_current(&mut self, path: String) {
        self.current_path = path.clone();
        self.columns = vec![ColumnState::new(path)];
    }
}

#[cfg(test)]
mod tests {
    use platform_host::{RemoteEntry, RemoteEntryKind};
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

    #[test]
    fn back_returns_to_previous_path_and_new_navigation_discards_forward() {
        let mut nav = NavigationState::new("Desktop");
        nav.navigate_to("Desktop/p1");
        nav.navigate_to("Desktop/p2");

        assert!(nav.go_back());
        assert_eq!(nav.current_path, "Desktop/p1");
        assert!(nav.can_go_forward());

        nav.navigate_to("Desktop/p3");
        assert!(!nav.can_go_forward());
        assert_eq!(
            nav.history,
            vec!["Desktop", "Desktop/p1", "Desktop/p3"]
                .into_iter()
                .map(String::from)
                .collect::<Vec<_>>()
        );
    }

    #[test]
    fn back_at_oldest_and_forward_at_newest_are_refused() {
        let mut nav = NavigationState::new("Desktop");
        assert!(!nav.go_back());
        assert!(!nav.go_forward());
        assert_eq!(nav.history_index, 0);
    }

    #[test]
    fn selecting_a_directory_appends_an_unselected_column() {
        let mut nav = NavigationState::new("Desktop");
        let load = nav.select_in_column(0, "Desktop/work", true);

        assert_eq!(load.as_deref(), Some("Desktop/work"));
        assert_eq!(nav.columns.len(), 2);
        assert_eq!(nav.columns[0].selected_child.as_deref(), Some("Desktop/work"));
        assert_eq!(nav.columns[1].path, "Desktop/work");
        assert_eq!(nav.columns[1].selected_child, None);
    }

    #[test]
    fn selecting_a_file_truncates_without_growing() {
        let mut nav = NavigationState::new("Desktop");
        nav.select_in_column(0, "Desktop/work", true);
        nav.select_in_column(1, "Desktop/work/deep", true);
        assert_eq!(nav.columns.len(), 3);

        let load = nav.select_in_column(1, "Desktop/work/readme.md", false);
        assert_eq!(load, None);
        assert_eq!(nav.columns.len(), 2);
        assert_eq!(
            nav.columns[1].selected_child.as_deref(),
            Some("Desktop/work/readme.md")
        );
    }

    #[test]
    fn stale_column_listing_is_dropped() {
        let mut nav = NavigationState::new("Desktop");
        nav.select_in_column(0, "Desktop/work", true);
        // User re-selects before the first load lands.
        nav.select_in_column(0, "Desktop/play", true);

        let stale = vec![entry("a.md", "Desktop/work/a.md", RemoteEntryKind::File)];
        assert!(!nav.apply_column_listing(1, "Desktop/work", stale));
        assert!(nav.columns[1].items.is_empty());

        let fresh = vec![entry("b.md", "Desktop/play/b.md", RemoteEntryKind::File)];
        assert!(nav.apply_column_listing(1, "Desktop/play", fresh));
        assert_eq!(nav.columns[1].items.len(), 1);
    }

    #[test]
    fn full_navigation_collapses_columns() {
        let mut nav = NavigationState::new("Desktop");
        nav.select_in_column(0, "Desktop/work", true);
        assert_eq!(nav.columns.len(), 2);

        nav.navigate_to("Desktop/work");
        assert_eq!(nav.columns.len(), 1);
        assert_eq!(nav.columns[0].path, "Desktop/work");
    }

    #[test]
    fn breadcrumbs_derive_prefix_paths_from_the_current_path() {
        let nav = NavigationState::new("Desktop/work/reports");
        let segments = nav.breadcrumb_segments();
        let pairs: Vec<(&str, &str)> = segments
            .iter()
            .map(|s| (s.label.as_str(), s.path.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("Home", ""),
                ("Desktop", "Desktop"),
                ("work", "Desktop/work"),
                ("reports", "Desktop/work/reports"),
            ]
        );
    }
}
