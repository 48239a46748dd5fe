//! Reducer actions, side-effect intents, and transition logic for the desktop shell.
//!
//! `reduce_desktop` is the single authoritative transition engine. It mutates state
//! synchronously on the one UI execution context and returns effect intents; all I/O (remote
//! calls, listing loads, notifications) happens later in the effect executor. Local state is
//! never mutated optimistically — the tree only changes when a listing or push event arrives.

use platform_host::{basename, is_descendant_path, FsEvent, RemoteEntry, RemoteListing};
use thiserror::Error;

use crate::{
    bus::ShellSignal,
    context_menu::MenuAction,
    keyboard::ShellCommand,
    model::{
        AppKind, DesktopSnapshot, DesktopState, InteractionState, OpenWindowRequest,
        PointerPosition, ResizeEdge, WindowDragSession, WindowId, WindowRecord, WindowRect,
        WindowResizeSession, WindowTarget,
    },
    navigation::NavigationState,
    selection::{can_accept_drop, DropCandidate, DropZone, IconDragState},
    tree::{is_protected_basename, reactions_for_event, SyncReaction, TRASH_DIR},
    window_manager::{
        cascade_rect, focus_window_internal, resize_rect, MIN_WINDOW_HEIGHT, MIN_WINDOW_WIDTH,
    },
};

#[derive(Debug, Clone, PartialEq)]
/// Actions accepted by [`reduce_desktop`] to mutate [`DesktopState`].
pub enum DesktopAction {
    /// Open a new window using the supplied request.
    OpenWindow(OpenWindowRequest),
    /// Close a window by id. Idempotent: closing an unknown id is a no-op, because stale-path
    /// closers can race an external deletion.
    CloseWindow {
        /// Window to close.
        window_id: WindowId,
    },
    /// Focus (and raise) a window by id.
    FocusWindow {
        /// Window to focus.
        window_id: WindowId,
    },
    /// Minimize a window. A minimized window keeps its geometry for restore.
    MinimizeWindow {
        /// Window to minimize.
        window_id: WindowId,
    },
    /// Restore a minimized window and focus it.
    UnminimizeWindow {
        /// Window to restore.
        window_id: WindowId,
    },
    /// Maximize a window into the viewport, snapshotting its pre-maximize geometry.
    MaximizeWindow {
        /// Window to maximize.
        window_id: WindowId,
        /// Viewport rectangle to fill.
        viewport: WindowRect,
    },
    /// Explicitly un-maximize, consuming the geometry snapshot when one exists. Also restores
    /// from minimized state.
    RestoreWindow {
        /// Window to restore.
        window_id: WindowId,
    },
    /// Begin dragging a window by its titlebar.
    BeginWindowMove {
        /// Window being dragged.
        window_id: WindowId,
        /// Pointer position at drag start.
        pointer: PointerPosition,
    },
    /// Update an in-progress window drag.
    UpdateWindowMove {
        /// Current pointer position.
        pointer: PointerPosition,
    },
    /// End the active window drag.
    EndWindowMove,
    /// Begin resizing a window.
    BeginWindowResize {
        /// Window being resized.
        window_id: WindowId,
        /// Edge or corner being dragged.
        edge: ResizeEdge,
        /// Pointer position at resize start.
        pointer: PointerPosition,
    },
    /// Update an in-progress window resize.
    UpdateWindowResize {
        /// Current pointer position.
        pointer: PointerPosition,
    },
    /// End the active window resize.
    EndWindowResize,
    /// Invoke a context-menu action. The view closes the menu before dispatching.
    InvokeMenuAction(MenuAction),
    /// Select a desktop icon.
    SelectIcon {
        /// Icon path.
        path: String,
        /// Additive (toggle) selection.
        additive: bool,
    },
    /// Clear the icon selection.
    ClearSelection,
    /// Begin an icon drag gesture.
    BeginIconDrag {
        /// Path being dragged.
        path: String,
    },
    /// Update the hovered drop candidate for the active icon drag. The candidate is recorded
    /// only when it qualifies (directory, not self, not a descendant of the dragged entity).
    SetDropHover {
        /// Entity under the pointer, if any.
        candidate: Option<DropCandidate>,
    },
    /// Complete the active icon drag on the given zone (or none).
    CompleteIconDrop {
        /// Release zone.
        zone: Option<DropZone>,
    },
    /// Abandon the active icon drag without dropping.
    CancelIconDrag,
    /// Apply a completed desktop-tree listing (subject to the last-request-wins guard).
    ApplyTreeListing {
        /// Root the listing was requested for.
        requested_root: String,
        /// Listing payload.
        listing: RemoteListing,
    },
    /// React to an inbound push event.
    HandlePushEvent {
        /// The event.
        event: FsEvent,
    },
    /// Record a refreshed trash entry count.
    SetTrashCount {
        /// Current trash size.
        count: usize,
    },
    /// Navigate a Finder window to a path (breadcrumb click, double-click, bus request).
    NavigateTo {
        /// Finder window.
        window_id: WindowId,
        /// Destination path.
        path: String,
    },
    /// Step a Finder window back in its history.
    GoBack {
        /// Finder window.
        window_id: WindowId,
    },
    /// Step a Finder window forward in its history.
    GoForward {
        /// Finder window.
        window_id: WindowId,
    },
    /// Single-click selection inside a Miller column.
    SelectInColumn {
        /// Finder window.
        window_id: WindowId,
        /// Column index.
        column: usize,
        /// Selected child path.
        path: String,
        /// Whether the child is a directory.
        is_directory: bool,
    },
    /// Apply a completed column listing (subject to the stale-response guard).
    ApplyColumnListing {
        /// Finder window.
        window_id: WindowId,
        /// Column index the listing was requested for.
        column: usize,
        /// Path the listing was requested for.
        requested_path: String,
        /// Listed children.
        items: Vec<RemoteEntry>,
    },
    /// Run a desktop-root keyboard command.
    HandleShellCommand {
        /// The command.
        command: ShellCommand,
        /// Currently sorted icon order, supplied by the view.
        icon_order: Vec<String>,
    },
    /// Hydrate runtime state from a persisted snapshot.
    HydrateSnapshot {
        /// Snapshot payload to restore.
        snapshot: DesktopSnapshot,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Fire-and-forget mutation against the remote file store.
pub enum FsMutation {
    /// Create a text file.
    CreateFile {
        /// Full path.
        path: String,
        /// Initial content.
        content: String,
    },
    /// Create a directory.
    CreateFolder {
        /// Full path.
        path: String,
    },
    /// Rename an entry within its parent.
    Rename {
        /// Entry path.
        path: String,
        /// New basename.
        new_name: String,
    },
    /// Move an entry into a destination directory.
    Move {
        /// Entry path.
        path: String,
        /// Destination directory.
        dest_dir: String,
    },
    /// Move an entry to the trash.
    Trash {
        /// Entry path.
        path: String,
    },
    /// Permanently empty the trash.
    EmptyTrash,
}

#[derive(Debug, Clone, PartialEq)]
/// Side-effect intents emitted by [`reduce_desktop`] for the shell runtime to execute.
pub enum RuntimeEffect {
    /// Issue a remote mutation. On success the executor publishes the matching refresh signal;
    /// on failure it surfaces a notification and leaves state untouched.
    FsCall(FsMutation),
    /// Load the desktop tree listing for `root`.
    LoadTree {
        /// Subtree root to list.
        root: String,
    },
    /// Load a Miller-column listing.
    LoadColumn {
        /// Finder window.
        window_id: WindowId,
        /// Column index.
        column: usize,
        /// Directory to list.
        path: String,
    },
    /// Refresh the trash entry count.
    LoadTrashCount,
    /// Fetch metadata for `path` and surface it.
    LoadEntryInfo {
        /// Entry path.
        path: String,
    },
    /// Open the host file picker and upload the chosen file into `dir`.
    PickAndUpload {
        /// Destination directory.
        dir: String,
    },
    /// Download the entry at `path` through the export endpoint.
    ExportPath {
        /// Entry path.
        path: String,
    },
    /// Broadcast a signal on the shell bus.
    Publish(ShellSignal),
    /// Surface a transient, dismissable notification.
    Notify {
        /// Notification title.
        title: String,
        /// Notification body.
        body: String,
    },
    /// Persist the current layout snapshot.
    PersistLayout,
    /// Move browser focus into the newly focused window's primary input.
    FocusWindowInput(WindowId),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Reducer errors for invalid actions.
pub enum ShellError {
    /// The target window id was not found in the current state.
    #[error("window not found")]
    WindowNotFound,
}

/// Applies a [`DesktopAction`] to the desktop state and collects resulting side effects.
///
/// # Errors
///
/// Returns [`ShellError::WindowNotFound`] when a focus, geometry, or navigation action
/// references a window that is not present. Close is exempt (idempotent by design).
pub fn reduce_desktop(
    state: &mut DesktopState,
    interaction: &mut InteractionState,
    action: DesktopAction,
) -> Result<Vec<RuntimeEffect>, ShellError> {
    let mut effects = Vec::new();
    match action {
        DesktopAction::OpenWindow(req) => {
            let window_id = open_window_record(state, req, &mut effects);
            effects.push(RuntimeEffect::PersistLayout);
            effects.push(RuntimeEffect::FocusWindowInput(window_id));
        }
        DesktopAction::CloseWindow { window_id } => {
            if close_window_records(state, |w| w.id == window_id) {
                effects.push(RuntimeEffect::PersistLayout);
            }
        }
        DesktopAction::FocusWindow { window_id } => {
            if !focus_window_internal(state, window_id) {
                return Err(ShellError::WindowNotFound);
            }
            effects.push(RuntimeEffect::FocusWindowInput(window_id));
        }
        DesktopAction::MinimizeWindow { window_id } => {
            let window = find_window_mut(state, window_id)?;
            window.minimized = true;
            window.is_focused = false;
            effects.push(RuntimeEffect::PersistLayout);
        }
        DesktopAction::UnminimizeWindow { window_id } => {
            let window = find_window_mut(state, window_id)?;
            window.minimized = false;
            focus_window_internal(state, window_id);
            effects.push(RuntimeEffect::PersistLayout);
        }
        DesktopAction::MaximizeWindow {
            window_id,
            viewport,
        } => {
            let window = find_window_mut(state, window_id)?;
            if !window.maximized {
                window.restore_rect = Some(window.rect);
            }
            window.rect = viewport.clamped_min(MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT);
            window.maximized = true;
            window.minimized = false;
            focus_window_internal(state, window_id);
            effects.push(RuntimeEffect::PersistLayout);
        }
        DesktopAction::RestoreWindow { window_id } => {
            let window = find_window_mut(state, window_id)?;
            if window.maximized {
                window.maximized = false;
                // The snapshot may already be gone: direct manipulation while maximized
                // discards it, in which case this is a geometry no-op, not a revert.
                if let Some(restore_rect) = window.restore_rect.take() {
                    window.rect = restore_rect;
                }
            }
            window.minimized = false;
            focus_window_internal(state, window_id);
            effects.push(RuntimeEffect::PersistLayout);
        }
        DesktopAction::BeginWindowMove { window_id, pointer } => {
            let rect_start = find_window_mut(state, window_id)?.rect;
            focus_window_internal(state, window_id);
            interaction.window_drag = Some(WindowDragSession {
                window_id,
                pointer_start: pointer,
                rect_start,
            });
        }
        DesktopAction::UpdateWindowMove { pointer } => {
            if let Some(session) = interaction.window_drag.as_ref() {
                let dx = pointer.x - session.pointer_start.x;
                let dy = pointer.y - session.pointer_start.y;
                let window = find_window_mut(state, session.window_id)?;
                leave_maximized_for_manipulation(window);
                window.rect = session.rect_start.offset(dx, dy);
            }
        }
        DesktopAction::EndWindowMove => {
            if interaction.window_drag.take().is_some() {
                effects.push(RuntimeEffect::PersistLayout);
            }
        }
        DesktopAction::BeginWindowResize {
            window_id,
            edge,
            pointer,
        } => {
            let rect_start = find_window_mut(state, window_id)?.rect;
            focus_window_internal(state, window_id);
            interaction.window_resize = Some(WindowResizeSession {
                window_id,
                edge,
                pointer_start: pointer,
                rect_start,
            });
        }
        DesktopAction::UpdateWindowResize { pointer } => {
            if let Some(session) = interaction.window_resize.as_ref() {
                let dx = pointer.x - session.pointer_start.x;
                let dy = pointer.y - session.pointer_start.y;
                let edge = session.edge;
                let rect_start = session.rect_start;
                let window = find_window_mut(state, session.window_id)?;
                leave_maximized_for_manipulation(window);
                window.rect = resize_rect(rect_start, edge, dx, dy)
                    .clamped_min(MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT);
            }
        }
        DesktopAction::EndWindowResize => {
            if interaction.window_resize.take().is_some() {
                effects.push(RuntimeEffect::PersistLayout);
            }
        }
        DesktopAction::InvokeMenuAction(menu_action) => {
            apply_menu_action(state, interaction, menu_action, &mut effects)?;
        }
        DesktopAction::SelectIcon { path, additive } => {
            interaction.selection.select(path, additive);
        }
        DesktopAction::ClearSelection => {
            interaction.selection.clear();
        }
        DesktopAction::BeginIconDrag { path } => {
            interaction.icon_drag = Some(IconDragState::new(path));
        }
        DesktopAction::SetDropHover { candidate } => {
            if let Some(drag) = interaction.icon_drag.as_mut() {
                let qualified = candidate
                    .filter(|c| can_accept_drop(&drag.dragged_path, &c.path, c.is_directory));
                drag.hover_target = qualified.map(|c| c.path);
            }
        }
        DesktopAction::CompleteIconDrop { zone } => {
            if let Some(drag) = interaction.icon_drag.take() {
                apply_icon_drop(&drag, zone, &mut effects);
            }
        }
        DesktopAction::CancelIconDrag => {
            interaction.icon_drag = None;
        }
        DesktopAction::ApplyTreeListing {
            requested_root,
            listing,
        } => {
            if state.tree.apply_listing(&requested_root, &listing) {
                // An external refresh abandons any in-flight drag and prunes selections and
                // quick-look targets the tree no longer contains.
                interaction.icon_drag = None;
                let tree = &state.tree;
                interaction.selection.retain_existing(|p| tree.contains(p));
                if let Some(path) = state.quick_look_path.clone() {
                    if !state.tree.contains(&path) {
                        state.quick_look_path = None;
                    }
                }
            }
        }
        DesktopAction::HandlePushEvent { event } => {
            for reaction in reactions_for_event(&event, &state.tree.root_path()) {
                match reaction {
                    SyncReaction::ReloadTree => effects.push(RuntimeEffect::LoadTree {
                        root: state.tree.root_path(),
                    }),
                    SyncReaction::ClosePathWindows { path } => {
                        if close_window_records(state, |w| {
                            w.target
                                .file_path()
                                .map(|p| p == path || is_descendant_path(&path, p))
                                .unwrap_or(false)
                        }) {
                            effects.push(RuntimeEffect::PersistLayout);
                        }
                        effects.push(RuntimeEffect::Publish(ShellSignal::ClosePathWindows {
                            path,
                        }));
                    }
                    SyncReaction::TrashChanged => {
                        effects.push(RuntimeEffect::LoadTrashCount);
                        effects.push(RuntimeEffect::Publish(ShellSignal::TrashChanged));
                    }
                }
            }
        }
        DesktopAction::SetTrashCount { count } => {
            state.trash_count = count;
        }
        DesktopAction::NavigateTo { window_id, path } => {
            let nav = find_navigation_mut(state, window_id)?;
            nav.navigate_to(path.clone());
            interaction.icon_drag = None;
            effects.push(RuntimeEffect::LoadColumn {
                window_id,
                column: 0,
                path,
            });
        }
        DesktopAction::GoBack { window_id } => {
            let nav = find_navigation_mut(state, window_id)?;
            if nav.go_back() {
                let path = nav.current_path.clone();
                effects.push(RuntimeEffect::LoadColumn {
                    window_id,
                    column: 0,
                    path,
                });
            }
        }
        DesktopAction::GoForward { window_id } => {
            let nav = find_navigation_mut(state, window_id)?;
            if nav.go_forward() {
                let path = nav.current_path.clone();
                effects.push(RuntimeEffect::LoadColumn {
                    window_id,
                    column: 0,
                    path,
                });
            }
        }
        DesktopAction::SelectInColumn {
            window_id,
            column,
            path,
            is_directory,
        } => {
            let nav = find_navigation_mut(state, window_id)?;
            if let Some(load_path) = nav.select_in_column(column, path, is_directory) {
                effects.push(RuntimeEffect::LoadColumn {
                    window_id,
                    column: column + 1,
                    path: load_path,
                });
            }
        }
        DesktopAction::ApplyColumnListing {
            window_id,
            column,
            requested_path,
            items,
        } => {
            let nav = find_navigation_mut(state, window_id)?;
            nav.apply_column_listing(column, &requested_path, items);
        }
        DesktopAction::HandleShellCommand {
            command,
            icon_order,
        } => {
            apply_shell_command(state, interaction, command, &icon_order, &mut effects)?;
        }
        DesktopAction::HydrateSnapshot { snapshot } => {
            *state = DesktopState::from_snapshot(snapshot);
            effects.push(RuntimeEffect::LoadTree {
                root: state.tree.root_path(),
            });
        }
    }
    Ok(effects)
}

fn leave_maximized_for_manipulation(window: &mut WindowRecord) {
    if window.maximized {
        // Falling back to direct manipulation: the flag clears silently and the snapshot is
        // discarded, so a later explicit restore has nothing to revert to.
        window.maximized = false;
        window.restore_rect = None;
    }
}

fn open_window_record(
    state: &mut DesktopState,
    req: OpenWindowRequest,
    effects: &mut Vec<RuntimeEffect>,
) -> WindowId {
    let window_id = WindowId(state.next_window_id);
    state.next_window_id = state.next_window_id.saturating_add(1);
    let rect = req
        .rect
        .unwrap_or_else(|| cascade_rect(window_id.0))
        .clamped_min(MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT);
    let title = req.title.unwrap_or_else(|| req.target.default_title());
    let is_finder = req.target == WindowTarget::App(AppKind::Finder);
    state.windows.push(WindowRecord {
        id: window_id,
        target: req.target,
        title,
        rect,
        restore_rect: None,
        z_index: 0,
        is_focused: false,
        minimized: false,
        maximized: false,
    });
    focus_window_internal(state, window_id);
    if is_finder {
        let root = state.tree.root_path();
        state
            .navigations
            .insert(window_id, NavigationState::new(root.clone()));
        effects.push(RuntimeEffect::LoadColumn {
            window_id,
            column: 0,
            path: root,
        });
    }
    window_id
}

/// Opens a Finder window already navigated to `path`.
fn open_finder_at(
    state: &mut DesktopState,
    path: String,
    effects: &mut Vec<RuntimeEffect>,
) -> WindowId {
    let mut req = OpenWindowRequest::app(AppKind::Finder);
    if !path.is_empty() {
        req.title = Some(basename(&path).to_string());
    }
    let window_id = open_window_record(state, req, effects);
    // Replace the default root navigation (and its queued load) with the requested path.
    effects.retain(|e| {
        !matches!(e, RuntimeEffect::LoadColumn { window_id: w, .. } if *w == window_id)
    });
    state
        .navigations
        .insert(window_id, NavigationState::new(path.clone()));
    effects.push(RuntimeEffect::LoadColumn {
        window_id,
        column: 0,
        path,
    });
    effects.push(RuntimeEffect::PersistLayout);
    effects.push(RuntimeEffect::FocusWindowInput(window_id));
    window_id
}

fn close_window_records(
    state: &mut DesktopState,
    mut matches: impl FnMut(&WindowRecord) -> bool,
) -> bool {
    let removed: Vec<WindowId> = state
        .windows
        .iter()
        .filter(|w| matches(w))
        .map(|w| w.id)
        .collect();
    if removed.is_empty() {
        return false;
    }
    state.windows.retain(|w| !removed.contains(&w.id));
    for id in &removed {
        state.navigations.remove(id);
    }
    true
}

fn find_window_mut(
    state: &mut DesktopState,
    window_id: WindowId,
) -> Result<&mut WindowRecord, ShellError> {
    state
        .windows
        .iter_mut()
        .find(|w| w.id == window_id)
        .ok_or(ShellError::WindowNotFound)
}

fn find_navigation_mut(
    state: &mut DesktopState,
    window_id: WindowId,
) -> Result<&mut NavigationState, ShellError> {
    state
        .navigations
        .get_mut(&window_id)
        .ok_or(ShellError::WindowNotFound)
}

fn reject_protected(path: &str, verb: &str, effects: &mut Vec<RuntimeEffect>) -> bool {
    if is_protected_basename(basename(path)) {
        effects.push(RuntimeEffect::Notify {
            title: "Protected file".to_string(),
            body: format!("\"{}\" is a system file and cannot be {verb}.", basename(path)),
        });
        return true;
    }
    false
}

fn apply_icon_drop(drag: &IconDragState, zone: Option<DropZone>, effects: &mut Vec<RuntimeEffect>) {
    match zone {
        Some(DropZone::Trash) => {
            if reject_protected(&drag.dragged_path, "trashed", effects) {
                return;
            }
            effects.push(RuntimeEffect::FsCall(FsMutation::Trash {
                path: drag.dragged_path.clone(),
            }));
        }
        Some(DropZone::Directory { path, is_directory }) => {
            // Re-validated at drop time: the hover guard may not have seen this target.
            if !can_accept_drop(&drag.dragged_path, &path, is_directory) {
                return;
            }
            if reject_protected(&drag.dragged_path, "moved", effects) {
                return;
            }
            effects.push(RuntimeEffect::FsCall(FsMutation::Move {
                path: drag.dragged_path.clone(),
                dest_dir: path,
            }));
        }
        None => {}
    }
}

fn apply_menu_action(
    state: &mut DesktopState,
    interaction: &mut InteractionState,
    action: MenuAction,
    effects: &mut Vec<RuntimeEffect>,
) -> Result<(), ShellError> {
    match action {
        MenuAction::Open { path, is_directory } => {
            if is_directory {
                open_finder_at(state, path, effects);
            } else {
                let window_id =
                    open_window_record(state, OpenWindowRequest::file(path), effects);
                effects.push(RuntimeEffect::PersistLayout);
                effects.push(RuntimeEffect::FocusWindowInput(window_id));
            }
        }
        MenuAction::QuickLook { path } => {
            state.quick_look_path = Some(path);
        }
        MenuAction::GetInfo { path } => {
            effects.push(RuntimeEffect::LoadEntryInfo { path });
        }
        MenuAction::Rename { path, new_name } => {
            if reject_protected(&path, "renamed", effects) {
                return Ok(());
            }
            if new_name.is_empty() {
                effects.push(RuntimeEffect::Notify {
                    title: "Rename".to_string(),
                    body: "A name is required.".to_string(),
                });
                return Ok(());
            }
            effects.push(RuntimeEffect::FsCall(FsMutation::Rename { path, new_name }));
        }
        MenuAction::Move { path, dest_dir } => {
            if reject_protected(&path, "moved", effects) {
                return Ok(());
            }
            if dest_dir == path || is_descendant_path(&path, &dest_dir) {
                effects.push(RuntimeEffect::Notify {
                    title: "Move".to_string(),
                    body: "A folder cannot be moved into itself.".to_string(),
                });
                return Ok(());
            }
            effects.push(RuntimeEffect::FsCall(FsMutation::Move { path, dest_dir }));
        }
        MenuAction::MoveToTrash { path } => {
            if reject_protected(&path, "trashed", effects) {
                return Ok(());
            }
            effects.push(RuntimeEffect::FsCall(FsMutation::Trash { path }));
        }
        MenuAction::Export { path } => {
            effects.push(RuntimeEffect::ExportPath { path });
        }
        MenuAction::NewFolder { path } => {
            if basename(&path).is_empty() {
                effects.push(RuntimeEffect::Notify {
                    title: "New Folder".to_string(),
                    body: "A name is required.".to_string(),
                });
                return Ok(());
            }
            effects.push(RuntimeEffect::FsCall(FsMutation::CreateFolder { path }));
        }
        MenuAction::NewFile { path } => {
            if basename(&path).is_empty() {
                effects.push(RuntimeEffect::Notify {
                    title: "New File".to_string(),
                    body: "A name is required.".to_string(),
                });
                return Ok(());
            }
            effects.push(RuntimeEffect::FsCall(FsMutation::CreateFile {
                path,
                content: String::new(),
            }));
        }
        MenuAction::UploadHere { dir } => {
            effects.push(RuntimeEffect::PickAndUpload { dir });
        }
        MenuAction::RefreshDesktop => {
            effects.push(RuntimeEffect::LoadTree {
                root: state.tree.root_path(),
            });
        }
        MenuAction::OpenTrash => {
            open_finder_at(state, TRASH_DIR.to_string(), effects);
        }
        MenuAction::EmptyTrash => {
            if state.trash_count > 0 {
                effects.push(RuntimeEffect::FsCall(FsMutation::EmptyTrash));
            }
        }
        MenuAction::RemoveWidget { widget_id } => {
            state.widgets.retain(|w| w.id != widget_id);
        }
        MenuAction::OpenApp { app } => {
            let existing = state
                .windows
                .iter()
                .filter(|w| w.target == WindowTarget::App(app))
                .max_by_key(|w| w.z_index)
                .map(|w| w.id);
            match existing {
                Some(window_id) => {
                    focus_window_internal(state, window_id);
                    effects.push(RuntimeEffect::FocusWindowInput(window_id));
                }
                None => {
                    let window_id =
                        open_window_record(state, OpenWindowRequest::app(app), effects);
                    effects.push(RuntimeEffect::PersistLayout);
                    effects.push(RuntimeEffect::FocusWindowInput(window_id));
                }
            }
        }
        MenuAction::CloseAppWindows { app } => {
            if close_window_records(state, |w| w.target == WindowTarget::App(app)) {
                effects.push(RuntimeEffect::PersistLayout);
            }
        }
        MenuAction::LaunchCustomApp { path } => {
            let spec_path = platform_host::join_path(&path, crate::tree::APP_MARKER_FILE);
            let mut req = OpenWindowRequest::file(spec_path);
            req.title = Some(basename(&path).to_string());
            let window_id = open_window_record(state, req, effects);
            effects.push(RuntimeEffect::PersistLayout);
            effects.push(RuntimeEffect::FocusWindowInput(window_id));
        }
        MenuAction::FocusSession { session_id: _ } => {
            return apply_menu_action(
                state,
                interaction,
                MenuAction::OpenApp {
                    app: AppKind::Messages,
                },
                effects,
            );
        }
        MenuAction::AttachSessionSelection { session_id: _ }
        | MenuAction::AttachSelectionToChat => match interaction.selection.primary() {
            Some(path) => effects.push(RuntimeEffect::Publish(ShellSignal::AttachToChat {
                path: path.to_string(),
            })),
            None => effects.push(RuntimeEffect::Notify {
                title: "Attach".to_string(),
                body: "Nothing is selected.".to_string(),
            }),
        },
        MenuAction::SessionInfo { session_id } => {
            let body = state
                .dock_sessions
                .iter()
                .find(|s| s.id == session_id)
                .map(|s| s.title.clone())
                .unwrap_or_else(|| "Session has ended.".to_string());
            effects.push(RuntimeEffect::Notify {
                title: "Session".to_string(),
                body,
            });
        }
        MenuAction::EndSession { session_id } => {
            state.dock_sessions.retain(|s| s.id != session_id);
        }
        MenuAction::RestoreWindow { window_id } => {
            return reduce_append(
                state,
                interaction,
                DesktopAction::UnminimizeWindow { window_id },
                effects,
            );
        }
        MenuAction::CloseWindow { window_id } => {
            return reduce_append(
                state,
                interaction,
                DesktopAction::CloseWindow { window_id },
                effects,
            );
        }
        MenuAction::NewConversation => {
            let window_id = open_window_record(
                state,
                OpenWindowRequest::app(AppKind::Messages),
                effects,
            );
            effects.push(RuntimeEffect::PersistLayout);
            effects.push(RuntimeEffect::FocusWindowInput(window_id));
        }
        MenuAction::OpenAttachment { path } => {
            let window_id = open_window_record(state, OpenWindowRequest::file(path), effects);
            effects.push(RuntimeEffect::PersistLayout);
            effects.push(RuntimeEffect::FocusWindowInput(window_id));
        }
        MenuAction::SaveAttachmentToDesktop { path } => {
            effects.push(RuntimeEffect::FsCall(FsMutation::Move {
                path,
                dest_dir: state.tree.root_path(),
            }));
        }
    }
    Ok(())
}

fn apply_shell_command(
    state: &mut DesktopState,
    interaction: &mut InteractionState,
    command: ShellCommand,
    icon_order: &[String],
    effects: &mut Vec<RuntimeEffect>,
) -> Result<(), ShellError> {
    match command {
        ShellCommand::SelectAll => {
            interaction.selection.select_all(icon_order);
        }
        ShellCommand::CloseFocusedWindow => {
            if let Some(window_id) = state.focused_window_id() {
                return reduce_append(
                    state,
                    interaction,
                    DesktopAction::CloseWindow { window_id },
                    effects,
                );
            }
        }
        ShellCommand::Refresh => {
            effects.push(RuntimeEffect::LoadTree {
                root: state.tree.root_path(),
            });
        }
        ShellCommand::ToggleQuickLook => {
            state.quick_look_path = match state.quick_look_path.take() {
                Some(_) => None,
                None => interaction.selection.primary().map(String::from),
            };
        }
        ShellCommand::OpenSelection => {
            if let Some(path) = interaction.selection.primary().map(String::from) {
                let is_directory = state
                    .tree
                    .node(&path)
                    .map(|n| n.is_directory())
                    .unwrap_or_else(|| !basename(&path).contains('.'));
                return apply_menu_action(
                    state,
                    interaction,
                    MenuAction::Open { path, is_directory },
                    effects,
                );
            }
        }
        ShellCommand::TrashSelection => {
            for path in interaction.selection.paths().to_vec() {
                if reject_protected(&path, "trashed", effects) {
                    continue;
                }
                effects.push(RuntimeEffect::FsCall(FsMutation::Trash { path }));
            }
        }
        ShellCommand::StepSelection(direction) => {
            interaction.selection.step(direction, icon_order);
        }
        ShellCommand::Escape => {
            // Quick-look takes priority over clearing the selection.
            if state.quick_look_path.take().is_none() {
                interaction.selection.clear();
            }
        }
    }
    Ok(())
}

fn reduce_append(
    state: &mut DesktopState,
    interaction: &mut InteractionState,
    action: DesktopAction,
    effects: &mut Vec<RuntimeEffect>,
) -> Result<(), ShellError> {
    effects.extend(reduce_desktop(state, interaction, action)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use platform_host::{FsEvent, FsEventKind, RemoteEntry, RemoteEntryKind, RemoteListing};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::tree::DESKTOP_ROOT;

    fn open_file(
        state: &mut DesktopState,
        interaction: &mut InteractionState,
        path: &str,
    ) -> WindowId {
        reduce_desktop(
            state,
            interaction,
            DesktopAction::OpenWindow(OpenWindowRequest::file(path)),
        )
        .expect("open window");
        state.windows.last().expect("window").id
    }

    fn open_app(
        state: &mut DesktopState,
        interaction: &mut InteractionState,
        app: AppKind,
    ) -> WindowId {
        reduce_desktop(
            state,
            interaction,
            DesktopAction::OpenWindow(OpenWindowRequest::app(app)),
        )
        .expect("open window");
        state.windows.last().expect("window").id
    }

    fn fs_calls(effects: &[RuntimeEffect]) -> Vec<&FsMutation> {
        effects
            .iter()
            .filter_map(|e| match e {
                RuntimeEffect::FsCall(m) => Some(m),
                _ => None,
            })
            .collect()
    }

    fn desktop_listing() -> RemoteListing {
        RemoteListing {
            path: DESKTOP_ROOT.to_string(),
            entries: vec![
                RemoteEntry {
                    name: "work".to_string(),
                    path: "Desktop/work".to_string(),
                    kind: RemoteEntryKind::Directory,
                    size: None,
                    modified_at_unix_ms: None,
                    child_count: Some(0),
                },
                RemoteEntry {
                    name: "notes.md".to_string(),
                    path: "Desktop/notes.md".to_string(),
                    kind: RemoteEntryKind::File,
                    size: Some(10),
                    modified_at_unix_ms: None,
                    child_count: None,
                },
            ],
        }
    }

    #[test]
    fn at_most_one_window_is_focused_and_it_stacks_on_top() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();

        let first = open_file(&mut state, &mut interaction, "Desktop/a.md");
        let second = open_file(&mut state, &mut interaction, "Desktop/b.md");
        let third = open_app(&mut state, &mut interaction, AppKind::Finder);

        for sequence in [
            DesktopAction::FocusWindow { window_id: first },
            DesktopAction::FocusWindow { window_id: third },
            DesktopAction::FocusWindow { window_id: second },
        ] {
            reduce_desktop(&mut state, &mut interaction, sequence).expect("focus");
            let focused: Vec<_> = state.windows.iter().filter(|w| w.is_focused).collect();
            assert_eq!(focused.len(), 1);
            let top = focused[0];
            assert!(state
                .windows
                .iter()
                .filter(|w| w.id != top.id && !w.minimized)
                .all(|w| w.z_index < top.z_index));
        }
    }

    #[test]
    fn closing_the_focused_window_leaves_no_window_focused() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();

        open_file(&mut state, &mut interaction, "Desktop/a.md");
        let second = open_file(&mut state, &mut interaction, "Desktop/b.md");
        assert_eq!(state.focused_window_id(), Some(second));

        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::CloseWindow { window_id: second },
        )
        .expect("close");
        assert_eq!(state.focused_window_id(), None);
    }

    #[test]
    fn minimizing_the_focused_window_also_clears_focus_and_keeps_geometry() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();

        let win = open_file(&mut state, &mut interaction, "Desktop/a.md");
        let rect = state.window(win).unwrap().rect;

        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::MinimizeWindow { window_id: win },
        )
        .expect("minimize");
        let record = state.window(win).unwrap();
        assert!(record.minimized);
        assert!(!record.is_focused);
        assert_eq!(record.rect, rect);
        assert_eq!(state.focused_window_id(), None);

        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::UnminimizeWindow { window_id: win },
        )
        .expect("unminimize");
        let record = state.window(win).unwrap();
        assert!(!record.minimized);
        assert!(record.is_focused);
        assert_eq!(record.rect, rect);
    }

    #[test]
    fn close_is_idempotent_for_unknown_ids() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();

        let effects = reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::CloseWindow {
                window_id: WindowId(99),
            },
        )
        .expect("close of unknown id is a no-op");
        assert_eq!(effects, Vec::new());

        // Focus of an unknown id is still an error.
        assert_eq!(
            reduce_desktop(
                &mut state,
                &mut interaction,
                DesktopAction::FocusWindow {
                    window_id: WindowId(99),
                },
            ),
            Err(ShellError::WindowNotFound)
        );
    }

    #[test]
    fn opening_the_same_file_twice_allows_duplicate_windows() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();

        open_file(&mut state, &mut interaction, "Desktop/a.md");
        open_file(&mut state, &mut interaction, "Desktop/a.md");
        assert_eq!(state.windows.len(), 2);
    }

    #[test]
    fn drag_while_maximized_clears_the_flag_and_discards_the_snapshot() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        let viewport = WindowRect {
            x: 0,
            y: 0,
            w: 1280,
            h: 720,
        };

        let win = open_file(&mut state, &mut interaction, "Desktop/a.md");
        {
            let record = find_window_mut(&mut state, win).unwrap();
            record.rect = WindowRect {
                x: 10,
                y: 10,
                w: 400,
                h: 300,
            };
        }
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::MaximizeWindow {
                window_id: win,
                viewport,
            },
        )
        .expect("maximize");
        assert_eq!(
            state.window(win).unwrap().restore_rect,
            Some(WindowRect {
                x: 10,
                y: 10,
                w: 400,
                h: 300
            })
        );

        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::BeginWindowMove {
                window_id: win,
                pointer: PointerPosition { x: 0, y: 0 },
            },
        )
        .expect("begin move");
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::UpdateWindowMove {
                pointer: PointerPosition { x: 50, y: 50 },
            },
        )
        .expect("update move");
        reduce_desktop(&mut state, &mut interaction, DesktopAction::EndWindowMove)
            .expect("end move");

        let record = state.window(win).unwrap();
        assert!(!record.maximized);
        assert_eq!(record.restore_rect, None);
        let dragged_rect = record.rect;

        // A later explicit restore is a geometry no-op, not a revert to (10, 10).
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::RestoreWindow { window_id: win },
        )
        .expect("restore");
        assert_eq!(state.window(win).unwrap().rect, dragged_rect);
    }

    #[test]
    fn explicit_restore_consumes_the_snapshot() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        let viewport = WindowRect {
            x: 0,
            y: 0,
            w: 1280,
            h: 720,
        };

        let win = open_file(&mut state, &mut interaction, "Desktop/a.md");
        let original = state.window(win).unwrap().rect;
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::MaximizeWindow {
                window_id: win,
                viewport,
            },
        )
        .expect("maximize");
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::RestoreWindow { window_id: win },
        )
        .expect("restore");

        let record = state.window(win).unwrap();
        assert!(!record.maximized);
        assert_eq!(record.rect, original);
        assert_eq!(record.restore_rect, None);
    }

    #[test]
    fn dropping_onto_a_descendant_issues_no_mutation() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();

        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::BeginIconDrag {
                path: "Desktop/work".to_string(),
            },
        )
        .expect("begin drag");
        let effects = reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::CompleteIconDrop {
                zone: Some(DropZone::Directory {
                    path: "Desktop/work/sub".to_string(),
                    is_directory: true,
                }),
            },
        )
        .expect("drop");

        assert_eq!(fs_calls(&effects), Vec::<&FsMutation>::new());
        assert_eq!(interaction.icon_drag, None);
    }

    #[test]
    fn hover_guard_only_records_qualifying_candidates() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();

        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::BeginIconDrag {
                path: "Desktop/work".to_string(),
            },
        )
        .expect("begin drag");

        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::SetDropHover {
                candidate: Some(DropCandidate {
                    path: "Desktop/work/sub".to_string(),
                    is_directory: true,
                }),
            },
        )
        .expect("hover descendant");
        assert_eq!(interaction.icon_drag.as_ref().unwrap().hover_target, None);

        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::SetDropHover {
                candidate: Some(DropCandidate {
                    path: "Desktop/other".to_string(),
                    is_directory: true,
                }),
            },
        )
        .expect("hover valid dir");
        assert_eq!(
            interaction.icon_drag.as_ref().unwrap().hover_target.as_deref(),
            Some("Desktop/other")
        );
    }

    #[test]
    fn drop_on_trash_trashes_and_drop_elsewhere_is_a_noop() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();

        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::BeginIconDrag {
                path: "Desktop/notes.md".to_string(),
            },
        )
        .expect("begin drag");
        let effects = reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::CompleteIconDrop {
                zone: Some(DropZone::Trash),
            },
        )
        .expect("drop");
        assert_eq!(
            fs_calls(&effects),
            vec![&FsMutation::Trash {
                path: "Desktop/notes.md".to_string()
            }]
        );

        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::BeginIconDrag {
                path: "Desktop/notes.md".to_string(),
            },
        )
        .expect("begin drag");
        let effects = reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::CompleteIconDrop { zone: None },
        )
        .expect("drop nowhere");
        assert_eq!(effects, Vec::new());
    }

    #[test]
    fn mutations_leave_the_tree_unchanged_until_a_listing_arrives() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::ApplyTreeListing {
                requested_root: DESKTOP_ROOT.to_string(),
                listing: desktop_listing(),
            },
        )
        .expect("seed tree");
        let before = state.tree.clone();

        let effects = reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::InvokeMenuAction(MenuAction::NewFolder {
                path: "Desktop/Reports".to_string(),
            }),
        )
        .expect("new folder");
        assert_eq!(
            fs_calls(&effects),
            vec![&FsMutation::CreateFolder {
                path: "Desktop/Reports".to_string()
            }]
        );
        assert_eq!(state.tree, before, "no optimistic insertion");
    }

    #[test]
    fn stale_tree_listing_is_dropped_by_the_request_guard() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        let before = state.tree.clone();

        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::ApplyTreeListing {
                requested_root: "Archive".to_string(),
                listing: RemoteListing {
                    path: "Archive".to_string(),
                    entries: Vec::new(),
                },
            },
        )
        .expect("stale listing");
        assert_eq!(state.tree, before);
    }

    #[test]
    fn tree_refresh_abandons_the_active_icon_drag() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();

        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::BeginIconDrag {
                path: "Desktop/notes.md".to_string(),
            },
        )
        .expect("begin drag");
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::ApplyTreeListing {
                requested_root: DESKTOP_ROOT.to_string(),
                listing: desktop_listing(),
            },
        )
        .expect("refresh");
        assert_eq!(interaction.icon_drag, None);
    }

    #[test]
    fn moved_push_event_closes_windows_bound_to_the_source_path() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();

        let doomed = open_file(&mut state, &mut interaction, "Desktop/a/x.md");
        let survivor = open_file(&mut state, &mut interaction, "Desktop/b/y.md");

        let effects = reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::HandlePushEvent {
                event: FsEvent {
                    kind: FsEventKind::Moved,
                    path: "Desktop/a/x.md".to_string(),
                    dest_path: Some("Desktop/b/x.md".to_string()),
                    mtime: None,
                },
            },
        )
        .expect("push event");

        assert!(state.window(doomed).is_none());
        assert!(state.window(survivor).is_some());
        assert!(effects.iter().any(|e| matches!(e, RuntimeEffect::LoadTree { .. })));
    }

    #[test]
    fn deleting_a_folder_closes_viewers_deeper_inside_it() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();

        let doomed = open_file(&mut state, &mut interaction, "Desktop/a/deep/x.md");
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::HandlePushEvent {
                event: FsEvent {
                    kind: FsEventKind::Deleted,
                    path: "Desktop/a".to_string(),
                    dest_path: None,
                    mtime: None,
                },
            },
        )
        .expect("push event");
        assert!(state.window(doomed).is_none());
    }

    #[test]
    fn renaming_a_protected_file_is_rejected_before_any_call() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();

        let effects = reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::InvokeMenuAction(MenuAction::Rename {
                path: "Desktop/LIFE.md".to_string(),
                new_name: "life-old.md".to_string(),
            }),
        )
        .expect("rename");
        assert_eq!(fs_calls(&effects), Vec::<&FsMutation>::new());
        assert!(effects
            .iter()
            .any(|e| matches!(e, RuntimeEffect::Notify { .. })));
    }

    #[test]
    fn empty_trash_is_only_issued_when_the_trash_has_entries() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();

        let effects = reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::InvokeMenuAction(MenuAction::EmptyTrash),
        )
        .expect("empty trash at zero");
        assert_eq!(effects, Vec::new());

        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::SetTrashCount { count: 2 },
        )
        .expect("set count");
        let effects = reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::InvokeMenuAction(MenuAction::EmptyTrash),
        )
        .expect("empty trash");
        assert_eq!(fs_calls(&effects), vec![&FsMutation::EmptyTrash]);
    }

    #[test]
    fn finder_history_truncates_forward_entries_on_navigation() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();

        let finder = open_app(&mut state, &mut interaction, AppKind::Finder);
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::NavigateTo {
                window_id: finder,
                path: "Desktop/p1".to_string(),
            },
        )
        .expect("navigate");
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::NavigateTo {
                window_id: finder,
                path: "Desktop/p2".to_string(),
            },
        )
        .expect("navigate");
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::GoBack { window_id: finder },
        )
        .expect("back");
        assert_eq!(
            state.navigations[&finder].current_path,
            "Desktop/p1".to_string()
        );

        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::NavigateTo {
                window_id: finder,
                path: "Desktop/p3".to_string(),
            },
        )
        .expect("navigate");
        assert!(!state.navigations[&finder].can_go_forward());
    }

    #[test]
    fn closing_a_finder_window_drops_its_navigation_state() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();

        let finder = open_app(&mut state, &mut interaction, AppKind::Finder);
        assert!(state.navigations.contains_key(&finder));
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::CloseWindow { window_id: finder },
        )
        .expect("close");
        assert!(!state.navigations.contains_key(&finder));
    }

    #[test]
    fn escape_closes_quick_look_before_clearing_the_selection() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();

        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::SelectIcon {
                path: "Desktop/notes.md".to_string(),
                additive: false,
            },
        )
        .expect("select");
        state.quick_look_path = Some("Desktop/notes.md".to_string());

        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::HandleShellCommand {
                command: ShellCommand::Escape,
                icon_order: Vec::new(),
            },
        )
        .expect("escape");
        assert_eq!(state.quick_look_path, None);
        assert!(!interaction.selection.is_empty());

        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::HandleShellCommand {
                command: ShellCommand::Escape,
                icon_order: Vec::new(),
            },
        )
        .expect("escape again");
        assert!(interaction.selection.is_empty());
    }

    #[test]
    fn open_app_focuses_an_existing_window_instead_of_duplicating() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();

        let mail = open_app(&mut state, &mut interaction, AppKind::Mail);
        open_file(&mut state, &mut interaction, "Desktop/a.md");
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::InvokeMenuAction(MenuAction::OpenApp { app: AppKind::Mail }),
        )
        .expect("open app");

        assert_eq!(
            state
                .windows
                .iter()
                .filter(|w| w.target == WindowTarget::App(AppKind::Mail))
                .count(),
            1
        );
        assert_eq!(state.focused_window_id(), Some(mail));
    }

    #[test]
    fn hydrate_rebuilds_counters_and_requests_a_tree_load() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        open_file(&mut state, &mut interaction, "Desktop/a.md");
        open_app(&mut state, &mut interaction, AppKind::Finder);
        let snapshot = state.snapshot();

        let mut fresh = DesktopState::default();
        let effects = reduce_desktop(
            &mut fresh,
            &mut interaction,
            DesktopAction::HydrateSnapshot { snapshot },
        )
        .expect("hydrate");

        assert_eq!(fresh.windows.len(), 2);
        assert!(fresh.next_window_id > fresh.windows.iter().map(|w| w.id.0).max().unwrap());
        assert!(effects.iter().any(|e| matches!(e, RuntimeEffect::LoadTree { .. })));
        assert_eq!(fresh.navigations.len(), 1);
    }
}
