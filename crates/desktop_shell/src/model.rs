//! Core data model for the desktop shell: windows, geometry, and the aggregate runtime state.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{navigation::NavigationState, selection::SelectionState, tree::FileTreeCache};

/// Schema version stamped into persisted layout snapshots.
pub const DESKTOP_LAYOUT_SCHEMA_VERSION: u32 = 1;
/// Default width for newly opened windows.
pub const DEFAULT_WINDOW_WIDTH: i32 = 520;
/// Default height for newly opened windows.
pub const DEFAULT_WINDOW_HEIGHT: i32 = 360;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
/// Stable identity of a managed window for its whole lifetime.
pub struct WindowId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
/// Built-in application surfaces a window can host.
pub enum AppKind {
    /// File browser (Miller columns + breadcrumbs).
    Finder,
    /// Mail client (opaque collaborator view).
    Mail,
    /// Contacts (opaque collaborator view).
    Contacts,
    /// Calendar (opaque collaborator view).
    Calendar,
    /// Chat surface for the assistant panel.
    Messages,
    /// Settings panels (opaque collaborator view).
    Settings,
}

impl AppKind {
    /// Default window title for the app.
    pub fn title(self) -> &'static str {
        match self {
            Self::Finder => "Files",
            Self::Mail => "Mail",
            Self::Contacts => "Contacts",
            Self::Calendar => "Calendar",
            Self::Messages => "Messages",
            Self::Settings => "Settings",
        }
    }

    /// Stable icon id used by the shell chrome.
    pub fn icon_id(self) -> &'static str {
        match self {
            Self::Finder => "folder",
            Self::Mail => "mail",
            Self::Contacts => "contacts",
            Self::Calendar => "calendar",
            Self::Messages => "chat",
            Self::Settings => "gear",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
/// What a window displays: an application surface, or a file viewer bound to a store path.
pub enum WindowTarget {
    /// Application surface.
    App(AppKind),
    /// File viewer bound to `path`; the window closes when the path disappears.
    File {
        /// Store path backing the viewer.
        path: String,
    },
}

impl WindowTarget {
    /// Default window title for the target.
    pub fn default_title(&self) -> String {
        match self {
            Self::App(kind) => kind.title().to_string(),
            Self::File { path } => platform_host::basename(path).to_string(),
        }
    }

    /// Returns the backing file path for viewer windows.
    pub fn file_path(&self) -> Option<&str> {
        match self {
            Self::App(_) => None,
            Self::File { path } => Some(path),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Window geometry in desktop coordinates.
pub struct WindowRect {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Width.
    pub w: i32,
    /// Height.
    pub h: i32,
}

impl WindowRect {
    /// Returns the rect translated by `(dx, dy)`.
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self
        }
    }

    /// Returns the rect with width/height clamped up to the given minimums.
    pub fn clamped_min(self, min_w: i32, min_h: i32) -> Self {
        Self {
            w: self.w.max(min_w),
            h: self.h.max(min_h),
            ..self
        }
    }
}

impl Default for WindowRect {
    fn default() -> Self {
        Self {
            x: 48,
            y: 48,
            w: DEFAULT_WINDOW_WIDTH,
            h: DEFAULT_WINDOW_HEIGHT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// One managed window.
pub struct WindowRecord {
    /// Stable window id.
    pub id: WindowId,
    /// What the window displays.
    pub target: WindowTarget,
    /// Titlebar text.
    pub title: String,
    /// Current geometry. Minimized windows keep their last geometry for restore.
    pub rect: WindowRect,
    /// Pre-maximize geometry; present only while `maximized` is set and consumed by an explicit
    /// restore. Direct manipulation while maximized discards it.
    pub restore_rect: Option<WindowRect>,
    /// Stacking position; strictly monotone across all focus assignments, never reused.
    pub z_index: u32,
    /// Whether this window holds input focus. At most one window does.
    pub is_focused: bool,
    /// Whether the window is minimized (excluded from the visible z-order).
    pub minimized: bool,
    /// Whether the window fills the viewport.
    pub maximized: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// User-tunable shell preferences.
pub struct DesktopPreferences {
    /// Open icons on double-click (single-click selects) rather than single-click.
    pub double_click_opens: bool,
    /// Show dotfiles in listings.
    pub show_hidden_files: bool,
    /// Restore the persisted window layout on boot.
    pub restore_layout_on_boot: bool,
}

impl Default for DesktopPreferences {
    fn default() -> Self {
        Self {
            double_click_opens: true,
            show_hidden_files: false,
            restore_layout_on_boot: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// An assistant work session surfaced in the dock.
pub struct DockSession {
    /// Stable session id assigned by the collaborator service.
    pub id: String,
    /// Display title.
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// A desktop widget instance.
pub struct WidgetRecord {
    /// Stable widget id.
    pub id: String,
    /// Display title.
    pub title: String,
}

#[derive(Debug, Clone, PartialEq)]
/// Aggregate desktop runtime state owned by the reducer.
///
/// The window list, the file-tree cache, and per-window navigation are independent managers that
/// live side by side here; nothing in one reaches into another except through reducer
/// transitions and the signal bus.
pub struct DesktopState {
    /// Next window id to assign.
    pub next_window_id: u64,
    /// Next z-index to assign on focus; never decremented or reused.
    pub next_z_index: u32,
    /// All managed windows, in creation order. Visible stacking follows `z_index`.
    pub windows: Vec<WindowRecord>,
    /// Navigation state per Finder window; dropped when its window closes.
    pub navigations: HashMap<WindowId, NavigationState>,
    /// In-memory mirror of the desktop subtree of the remote store.
    pub tree: FileTreeCache,
    /// Number of entries currently in the trash, refreshed on trash-changed signals.
    pub trash_count: usize,
    /// Path currently shown in quick-look, if any.
    pub quick_look_path: Option<String>,
    /// Assistant work sessions pinned to the dock.
    pub dock_sessions: Vec<DockSession>,
    /// Widgets placed on the desktop.
    pub widgets: Vec<WidgetRecord>,
    /// Shell preferences.
    pub preferences: DesktopPreferences,
}

impl Default for DesktopState {
    fn default() -> Self {
        Self {
            next_window_id: 1,
            next_z_index: 1,
            windows: Vec::new(),
            navigations: HashMap::new(),
            tree: FileTreeCache::new(crate::tree::DESKTOP_ROOT),
            trash_count: 0,
            quick_look_path: None,
            dock_sessions: Vec::new(),
            widgets: Vec::new(),
            preferences: DesktopPreferences::default(),
        }
    }
}

impl DesktopState {
    /// Id of the focused window, if any.
    pub fn focused_window_id(&self) -> Option<WindowId> {
        self.windows.iter().find(|w| w.is_focused).map(|w| w.id)
    }

    /// Looks up a window by id.
    pub fn window(&self, id: WindowId) -> Option<&WindowRecord> {
        self.windows.iter().find(|w| w.id == id)
    }

    /// Builds a persistable snapshot of layout and preferences.
    pub fn snapshot(&self) -> DesktopSnapshot {
        DesktopSnapshot {
            schema_version: DESKTOP_LAYOUT_SCHEMA_VERSION,
            preferences: self.preferences.clone(),
            windows: self.windows.clone(),
        }
    }

    /// Rebuilds runtime state from a snapshot, re-deriving the id and z counters and giving
    /// every restored Finder window a fresh navigation stack at the desktop root.
    pub fn from_snapshot(snapshot: DesktopSnapshot) -> Self {
        let mut state = Self::default();
        state.preferences = snapshot.preferences;
        state.windows = snapshot.windows;
        state.next_window_id = state
            .windows
            .iter()
            .map(|w| w.id.0)
            .max()
            .unwrap_or(0)
            .saturating_add(1);
        state.next_z_index = state
            .windows
            .iter()
            .map(|w| w.z_index)
            .max()
            .unwrap_or(0)
            .saturating_add(1);
        for window in &state.windows {
            if window.target == WindowTarget::App(AppKind::Finder) {
                state
                    .navigations
                    .insert(window.id, NavigationState::new(state.tree.root_path()));
            }
        }
        state
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Persisted layout snapshot.
pub struct DesktopSnapshot {
    /// Snapshot schema version.
    pub schema_version: u32,
    /// Shell preferences.
    pub preferences: DesktopPreferences,
    /// Window records at snapshot time.
    pub windows: Vec<WindowRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Request to open a new window.
pub struct OpenWindowRequest {
    /// What the window should display.
    pub target: WindowTarget,
    /// Title override; defaults to the target's derived title.
    pub title: Option<String>,
    /// Geometry override; defaults to a staggered cascade position.
    pub rect: Option<WindowRect>,
}

impl OpenWindowRequest {
    /// Request for an application window with defaults.
    pub fn app(kind: AppKind) -> Self {
        Self {
            target: WindowTarget::App(kind),
            title: None,
            rect: None,
        }
    }

    /// Request for a file-viewer window with defaults.
    pub fn file(path: impl Into<String>) -> Self {
        Self {
            target: WindowTarget::File { path: path.into() },
            title: None,
            rect: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Pointer position in desktop coordinates.
pub struct PointerPosition {
    /// Horizontal coordinate.
    pub x: i32,
    /// Vertical coordinate.
    pub y: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Edge or corner grabbed during a window resize.
pub enum ResizeEdge {
    /// Top edge.
    North,
    /// Bottom edge.
    South,
    /// Right edge.
    East,
    /// Left edge.
    West,
    /// Top-right corner.
    NorthEast,
    /// Top-left corner.
    NorthWest,
    /// Bottom-right corner.
    SouthEast,
    /// Bottom-left corner.
    SouthWest,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Active titlebar drag session.
pub struct WindowDragSession {
    /// Window being dragged.
    pub window_id: WindowId,
    /// Pointer position at drag start.
    pub pointer_start: PointerPosition,
    /// Window geometry at drag start.
    pub rect_start: WindowRect,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Active edge-resize session.
pub struct WindowResizeSession {
    /// Window being resized.
    pub window_id: WindowId,
    /// Edge or corner being dragged.
    pub edge: ResizeEdge,
    /// Pointer position at resize start.
    pub pointer_start: PointerPosition,
    /// Window geometry at resize start.
    pub rect_start: WindowRect,
}

#[derive(Debug, Clone, PartialEq, Default)]
/// Transient pointer-gesture and selection state, separate from [`DesktopState`].
///
/// Every session here is created at gesture start and torn down on every exit path (release,
/// cancel, navigation, external refresh); nothing survives a render frame boundary except by
/// explicit continuation.
pub struct InteractionState {
    /// Active titlebar drag, if any.
    pub window_drag: Option<WindowDragSession>,
    /// Active window resize, if any.
    pub window_resize: Option<WindowResizeSession>,
    /// Active icon drag gesture, if any.
    pub icon_drag: Option<crate::selection::IconDragState>,
    /// Current icon selection.
    pub selection: SelectionState,
}
