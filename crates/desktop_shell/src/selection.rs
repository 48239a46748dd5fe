//! Icon selection state and the icon drag/drop gesture.

use platform_host::is_descendant_path;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Direction of an arrow-key selection step over the sorted icon order.
pub enum StepDirection {
    /// Toward the end of the order (right/down arrows).
    Next,
    /// Toward the start of the order (left/up arrows).
    Previous,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
/// Ordered set of selected icon paths.
///
/// The sorted icon order is supplied by the view at call time so stepping always tracks the
/// currently rendered sort.
pub struct SelectionState {
    selected: Vec<String>,
}

impl SelectionState {
    /// Selected paths, in selection order.
    pub fn paths(&self) -> &[String] {
        &self.selected
    }

    /// First-selected path, if any.
    pub fn primary(&self) -> Option<&str> {
        self.selected.first().map(String::as_str)
    }

    /// Whether `path` is selected.
    pub fn is_selected(&self, path: &str) -> bool {
        self.selected.iter().any(|p| p == path)
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Selects `path`. Additive selection toggles membership; plain selection replaces the set.
    pub fn select(&mut self, path: impl Into<String>, additive: bool) {
        let path = path.into();
        if additive {
            if let Some(idx) = self.selected.iter().position(|p| *p == path) {
                self.selected.remove(idx);
            } else {
                self.selected.push(path);
            }
        } else {
            self.selected = vec![path];
        }
    }

    /// Replaces the selection with every path in `order`.
    pub fn select_all(&mut self, order: &[String]) {
        self.selected = order.to_vec();
    }

    /// Clears the selection.
    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Steps the selection through `order`: from the most recently selected entry, one position
    /// in `direction`, clamped at the ends. With no current selection the first (or last) entry
    /// is selected. The result replaces the selection.
    pub fn step(&mut self, direction: StepDirection, order: &[String]) {
        if order.is_empty() {
            return;
        }
        let next = match self
            .selected
            .last()
            .and_then(|current| order.iter().position(|p| p == current))
        {
            Some(idx) => match direction {
                StepDirection::Next => (idx + 1).min(order.len() - 1),
                StepDirection::Previous => idx.saturating_sub(1),
            },
            None => match direction {
                StepDirection::Next => 0,
                StepDirection::Previous => order.len() - 1,
            },
        };
        self.selected = vec![order[next].clone()];
    }

    /// Drops selected paths the current tree no longer contains.
    pub fn retain_existing(&mut self, exists: impl Fn(&str) -> bool) {
        self.selected.retain(|p| exists(p));
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Active icon drag gesture. Created at drag start and torn down on drop, cancel, navigation,
/// and external tree refresh — never resumed against stale data.
pub struct IconDragState {
    /// Path of the entity being dragged.
    pub dragged_path: String,
    /// Path of the directory currently hovered as a drop candidate, if it qualifies.
    pub hover_target: Option<String>,
}

impl IconDragState {
    /// Starts a drag for `path`.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            dragged_path: path.into(),
            hover_target: None,
        }
    }
}

/// Whether `candidate` qualifies as a drop target for `dragged`: it must be a directory, must
/// not be the dragged entity, and must not be a descendant of it (the self-nesting guard —
/// rejected here, before any network call is made).
pub fn can_accept_drop(dragged: &str, candidate: &str, candidate_is_directory: bool) -> bool {
    candidate_is_directory && candidate != dragged && !is_descendant_path(dragged, candidate)
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A potential drop target under the pointer during a drag.
pub struct DropCandidate {
    /// Store path of the hovered entity.
    pub path: String,
    /// Whether the hovered entity is a directory.
    pub is_directory: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Where a drag gesture was released.
pub enum DropZone {
    /// The trash drop-zone.
    Trash,
    /// A directory entity.
    Directory {
        /// Destination directory path.
        path: String,
        /// Whether the release target is a directory (re-validated at drop time).
        is_directory: bool,
    },
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn order() -> Vec<String> {
        vec!["a.md", "b.md", "c.md"]
            .into_iter()
            .map(String::from)
            .collect()
    }

    #[test]
    fn plain_select_replaces_and_additive_select_toggles() {
        let mut sel = SelectionState::default();
        sel.select("a.md", false);
        sel.select("b.md", true);
        assert_eq!(sel.paths(), ["a.md", "b.md"]);

        sel.select("a.md", true);
        assert_eq!(sel.paths(), ["b.md"]);

        sel.select("c.md", false);
        assert_eq!(sel.paths(), ["c.md"]);
    }

    #[test]
    fn step_walks_the_sorted_order_and_clamps_at_the_ends() {
        let mut sel = SelectionState::default();
        let order = order();

        sel.step(StepDirection::Next, &order);
        assert_eq!(sel.paths(), ["a.md"]);
        sel.step(StepDirection::Next, &order);
        assert_eq!(sel.paths(), ["b.md"]);
        sel.step(StepDirection::Next, &order);
        sel.step(StepDirection::Next, &order);
        assert_eq!(sel.paths(), ["c.md"], "clamped at the end");

        sel.step(StepDirection::Previous, &order);
        assert_eq!(sel.paths(), ["b.md"]);
    }

    #[test]
    fn step_with_no_selection_starts_at_an_end() {
        let mut sel = SelectionState::default();
        sel.step(StepDirection::Previous, &order());
        assert_eq!(sel.paths(), ["c.md"]);
    }

    #[test]
    fn drop_requires_a_directory_that_is_not_self_or_descendant() {
        assert!(can_accept_drop("Desktop/a.md", "Desktop/work", true));
        assert!(!can_accept_drop("Desktop/a.md", "Desktop/b.md", false));
        assert!(!can_accept_drop("Desktop/work", "Desktop/work", true));
        assert!(
            !can_accept_drop("Desktop/work", "Desktop/work/sub", true),
            "moving a folder into its own descendant is rejected"
        );
        assert!(can_accept_drop("Desktop/work/sub", "Desktop/work", true));
    }
}
