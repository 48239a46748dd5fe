//! Context-menu target resolution, menu construction, and the bound action set.
//!
//! Resolution is a pure priority chain over the click metadata; construction is a single
//! exhaustive match over the closed target enum, so an unhandled new target fails to compile.
//! The resolver performs no I/O — every side effect of an action goes through the reducer's
//! effect pipeline.

use platform_host::{basename, join_path, normalize_store_path};
use serde::{Deserialize, Serialize};

use crate::{
    model::{AppKind, PointerPosition, WindowId},
    tree::is_protected_basename,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Explicit non-filesystem click sites reported by the view layer. These never carry a backing
/// store path and always win resolution.
pub enum ContextSurface {
    /// The trash drop-zone or dock tile.
    Trash,
    /// A desktop widget.
    Widget {
        /// Widget instance id.
        widget_id: String,
    },
    /// A pinned application tile in the dock.
    DockApp {
        /// Application the tile launches.
        app: AppKind,
    },
    /// An assistant work-session tile in the dock.
    DockSession {
        /// Session id.
        session_id: String,
    },
    /// A minimized-window tile in the dock.
    DockMinimized {
        /// Minimized window.
        window_id: WindowId,
    },
    /// The chief assistant header of the side panel.
    PanelChief,
    /// A specialist entry in the side panel.
    PanelSpecialist {
        /// Specialist session id.
        specialist_id: String,
    },
    /// An attachment chip in the side panel.
    PanelAttachment {
        /// Store path of the attachment.
        path: String,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Right-click site plus the auxiliary metadata the view layer can cheaply supply.
pub struct ContextClick {
    /// Explicit surface, when the click landed on a non-filesystem site.
    pub surface: Option<ContextSurface>,
    /// Store path under the pointer, when any.
    pub path: Option<String>,
    /// Directory-ness of `path` when the caller knows it.
    pub is_directory: Option<bool>,
    /// Whether the app sentinel is present among the entity's children.
    pub has_app_marker: bool,
    /// Whether the life-domain sentinel is present among the entity's children.
    pub has_life_marker: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Resolved context-menu target. Closed: every variant is matched exhaustively when the menu is
/// built, and classification returns exactly one variant per input.
pub enum ContextTarget {
    /// A plain file.
    File {
        /// Store path.
        path: String,
    },
    /// A plain directory.
    Folder {
        /// Store path.
        path: String,
    },
    /// A protected system file; exposes no rename or trash actions.
    SystemFile {
        /// Store path.
        path: String,
    },
    /// A directory carrying the life-domain sentinel.
    LifeDomain {
        /// Store path.
        path: String,
    },
    /// A directory carrying the custom-app sentinel.
    CustomApp {
        /// Store path.
        path: String,
    },
    /// Empty desktop background.
    Desktop,
    /// The trash.
    Trash,
    /// A desktop widget.
    Widget {
        /// Widget instance id.
        widget_id: String,
    },
    /// A pinned dock application.
    DockApp {
        /// Application.
        app: AppKind,
    },
    /// An assistant work session in the dock.
    DockSession {
        /// Session id.
        session_id: String,
    },
    /// A minimized window in the dock.
    DockMinimized {
        /// Minimized window.
        window_id: WindowId,
    },
    /// The chief assistant panel header.
    PanelChief,
    /// A specialist panel entry.
    PanelSpecialist {
        /// Specialist session id.
        specialist_id: String,
    },
    /// An attachment chip in the panel.
    PanelAttachment {
        /// Store path of the attachment.
        path: String,
    },
}

/// Classifies a right-click into exactly one [`ContextTarget`].
///
/// The chain is evaluated top to bottom, first match wins: explicit surface, no path at all,
/// protected basename, life marker, app marker, then directory-ness. When directory-ness is
/// unknown, a basename without a dot is treated as a directory — a heuristic with a known false
/// negative on extensionless files, kept deliberately.
pub fn resolve_context_target(click: &ContextClick) -> ContextTarget {
    if let Some(surface) = &click.surface {
        return match surface.clone() {
            ContextSurface::Trash => ContextTarget::Trash,
            ContextSurface::Widget { widget_id } => ContextTarget::Widget { widget_id },
            ContextSurface::DockApp { app } => ContextTarget::DockApp { app },
            ContextSurface::DockSession { session_id } => ContextTarget::DockSession { session_id },
            ContextSurface::DockMinimized { window_id } => {
                ContextTarget::DockMinimized { window_id }
            }
            ContextSurface::PanelChief => ContextTarget::PanelChief,
            ContextSurface::PanelSpecialist { specialist_id } => {
                ContextTarget::PanelSpecialist { specialist_id }
            }
            ContextSurface::PanelAttachment { path } => ContextTarget::PanelAttachment { path },
        };
    }

    let Some(path) = click.path.clone() else {
        return ContextTarget::Desktop;
    };

    let name = basename(&path);
    if is_protected_basename(name) {
        return ContextTarget::SystemFile { path };
    }
    if click.has_life_marker {
        return ContextTarget::LifeDomain { path };
    }
    if click.has_app_marker {
        return ContextTarget::CustomApp { path };
    }

    let is_directory = click.is_directory.unwrap_or_else(|| !name.contains('.'));
    if is_directory {
        ContextTarget::Folder { path }
    } else {
        ContextTarget::File { path }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// An invocable menu action, fully bound to its payload. The reducer maps each variant to
/// effects; actions are independent and never assume another has run first.
pub enum MenuAction {
    /// Open a file viewer or a Finder window at `path`.
    Open {
        /// Store path.
        path: String,
        /// Whether `path` is a directory.
        is_directory: bool,
    },
    /// Show `path` in quick-look.
    QuickLook {
        /// Store path.
        path: String,
    },
    /// Fetch and surface metadata for `path`.
    GetInfo {
        /// Store path.
        path: String,
    },
    /// Rename the entry at `path`.
    Rename {
        /// Store path.
        path: String,
        /// New basename.
        new_name: String,
    },
    /// Move the entry at `path` into `dest_dir`.
    Move {
        /// Store path.
        path: String,
        /// Destination directory.
        dest_dir: String,
    },
    /// Move the entry at `path` to the trash.
    MoveToTrash {
        /// Store path.
        path: String,
    },
    /// Download the entry at `path`.
    Export {
        /// Store path.
        path: String,
    },
    /// Create a directory at `path`.
    NewFolder {
        /// Full path of the directory to create.
        path: String,
    },
    /// Create an empty file at `path`.
    NewFile {
        /// Full path of the file to create.
        path: String,
    },
    /// Pick a local file and upload it into `dir`.
    UploadHere {
        /// Destination directory.
        dir: String,
    },
    /// Reload the desktop tree.
    RefreshDesktop,
    /// Open a Finder window on the trash.
    OpenTrash,
    /// Permanently empty the trash.
    EmptyTrash,
    /// Remove a desktop widget.
    RemoveWidget {
        /// Widget instance id.
        widget_id: String,
    },
    /// Open (or focus) an application.
    OpenApp {
        /// Application.
        app: AppKind,
    },
    /// Close every window of an application.
    CloseAppWindows {
        /// Application.
        app: AppKind,
    },
    /// Launch a custom app from its sentinel file.
    LaunchCustomApp {
        /// App directory path.
        path: String,
    },
    /// Bring the chat surface forward for a work session.
    FocusSession {
        /// Session id.
        session_id: String,
    },
    /// Attach the current selection to a work session's chat.
    AttachSessionSelection {
        /// Session id.
        session_id: String,
    },
    /// Surface session details.
    SessionInfo {
        /// Session id.
        session_id: String,
    },
    /// End a work session and drop its dock tile.
    EndSession {
        /// Session id.
        session_id: String,
    },
    /// Restore a minimized window.
    RestoreWindow {
        /// Window to restore.
        window_id: WindowId,
    },
    /// Close a window.
    CloseWindow {
        /// Window to close.
        window_id: WindowId,
    },
    /// Start a fresh conversation with the chief assistant.
    NewConversation,
    /// Attach the current selection to the chief chat.
    AttachSelectionToChat,
    /// Open an attachment in a viewer window.
    OpenAttachment {
        /// Store path.
        path: String,
    },
    /// Move an attachment onto the desktop.
    SaveAttachmentToDesktop {
        /// Store path.
        path: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A menu row that needs user input before it becomes a [`MenuAction`].
pub enum InputPrompt {
    /// Rename the entry at `path`; input is the new basename.
    RenameEntry {
        /// Store path.
        path: String,
    },
    /// Move the entry at `path`; input is the destination directory.
    MoveEntry {
        /// Store path.
        path: String,
    },
    /// Create a folder in the current directory; input is the folder name.
    NewFolder,
    /// Create a file in the current directory; input is the file name.
    NewFile,
}

/// Builds the final action for a completed input prompt. `input` is the raw user text.
pub fn action_for_prompt(prompt: &InputPrompt, input: &str, ctx: &MenuContext) -> MenuAction {
    match prompt {
        InputPrompt::RenameEntry { path } => MenuAction::Rename {
            path: path.clone(),
            new_name: input.trim().to_string(),
        },
        InputPrompt::MoveEntry { path } => MenuAction::Move {
            path: path.clone(),
            dest_dir: normalize_store_path(input),
        },
        InputPrompt::NewFolder => MenuAction::NewFolder {
            path: join_path(&ctx.current_directory, input.trim()),
        },
        InputPrompt::NewFile => MenuAction::NewFile {
            path: join_path(&ctx.current_directory, input.trim()),
        },
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// What a menu row does when activated.
pub enum MenuEntry {
    /// Dispatch the bound action directly.
    Invoke(MenuAction),
    /// Open an input prompt; the completed prompt builds the action.
    Prompt(InputPrompt),
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// One rendered menu row.
pub struct MenuItem {
    /// Row behavior.
    pub entry: MenuEntry,
    /// Display label.
    pub label: &'static str,
    /// Disabled rows render but do not dispatch.
    pub enabled: bool,
}

impl MenuItem {
    fn invoke(label: &'static str, action: MenuAction) -> Self {
        Self {
            entry: MenuEntry::Invoke(action),
            label,
            enabled: true,
        }
    }

    fn prompt(label: &'static str, prompt: InputPrompt) -> Self {
        Self {
            entry: MenuEntry::Prompt(prompt),
            label,
            enabled: true,
        }
    }

    fn disabled(mut self, disabled: bool) -> Self {
        self.enabled = !disabled;
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Ambient state the menu builder needs beyond the target itself.
pub struct MenuContext {
    /// Current trash entry count (drives the empty-trash enabled state).
    pub trash_count: usize,
    /// Directory backing the surface that was clicked (the desktop root for desktop clicks).
    pub current_directory: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// The single transient context-menu instance: target, screen position, and rows.
///
/// Only one exists at a time; opening a new menu discards the previous one, and every action
/// dispatch closes it.
pub struct ContextMenuModel {
    /// Resolved target.
    pub target: ContextTarget,
    /// Screen position of the click.
    pub position: PointerPosition,
    /// Menu rows, top to bottom.
    pub items: Vec<MenuItem>,
}

impl ContextMenuModel {
    /// Resolves the click and builds the menu in one step.
    pub fn from_click(click: &ContextClick, position: PointerPosition, ctx: &MenuContext) -> Self {
        let target = resolve_context_target(click);
        let items = build_context_menu(&target, ctx);
        Self {
            target,
            position,
            items,
        }
    }
}

/// Builds the fixed, variant-specific row set for a resolved target.
pub fn build_context_menu(target: &ContextTarget, ctx: &MenuContext) -> Vec<MenuItem> {
    match target {
        ContextTarget::File { path } => vec![
            MenuItem::invoke(
                "Open",
                MenuAction::Open {
                    path: path.clone(),
                    is_directory: false,
                },
            ),
            MenuItem::invoke("Quick Look", MenuAction::QuickLook { path: path.clone() }),
            MenuItem::invoke("Get Info", MenuAction::GetInfo { path: path.clone() }),
            MenuItem::prompt("Rename…", InputPrompt::RenameEntry { path: path.clone() }),
            MenuItem::prompt("Move…", InputPrompt::MoveEntry { path: path.clone() }),
            MenuItem::invoke("Move to Trash", MenuAction::MoveToTrash { path: path.clone() }),
            MenuItem::invoke("Export", MenuAction::Export { path: path.clone() }),
        ],
        ContextTarget::Folder { path } => vec![
            MenuItem::invoke(
                "Open",
                MenuAction::Open {
                    path: path.clone(),
                    is_directory: true,
                },
            ),
            MenuItem::invoke("Get Info", MenuAction::GetInfo { path: path.clone() }),
            MenuItem::prompt("Rename…", InputPrompt::RenameEntry { path: path.clone() }),
            MenuItem::prompt("Move…", InputPrompt::MoveEntry { path: path.clone() }),
            MenuItem::invoke("Move to Trash", MenuAction::MoveToTrash { path: path.clone() }),
        ],
        ContextTarget::SystemFile { path } => vec![
            MenuItem::invoke(
                "Open",
                MenuAction::Open {
                    path: path.clone(),
                    is_directory: false,
                },
            ),
            MenuItem::invoke("Quick Look", MenuAction::QuickLook { path: path.clone() }),
            MenuItem::invoke("Get Info", MenuAction::GetInfo { path: path.clone() }),
        ],
        ContextTarget::LifeDomain { path } => vec![
            MenuItem::invoke(
                "Open",
                MenuAction::Open {
                    path: path.clone(),
                    is_directory: true,
                },
            ),
            MenuItem::invoke(
                "View Life Spec",
                MenuAction::Open {
                    path: join_path(path, crate::tree::LIFE_MARKER_FILE),
                    is_directory: false,
                },
            ),
            MenuItem::invoke("Get Info", MenuAction::GetInfo { path: path.clone() }),
        ],
        ContextTarget::CustomApp { path } => vec![
            MenuItem::invoke("Launch", MenuAction::LaunchCustomApp { path: path.clone() }),
            MenuItem::invoke(
                "Show Contents",
                MenuAction::Open {
                    path: path.clone(),
                    is_directory: true,
                },
            ),
            MenuItem::invoke("Get Info", MenuAction::GetInfo { path: path.clone() }),
        ],
        ContextTarget::Desktop => vec![
            MenuItem::prompt("New Folder…", InputPrompt::NewFolder),
            MenuItem::prompt("New File…", InputPrompt::NewFile),
            MenuItem::invoke(
                "Upload…",
                MenuAction::UploadHere {
                    dir: ctx.current_directory.clone(),
                },
            ),
            MenuItem::invoke("Refresh", MenuAction::RefreshDesktop),
        ],
        ContextTarget::Trash => vec![
            MenuItem::invoke("Open Trash", MenuAction::OpenTrash),
            MenuItem::invoke("Empty Trash…", MenuAction::EmptyTrash)
                .disabled(ctx.trash_count == 0),
        ],
        ContextTarget::Widget { widget_id } => vec![MenuItem::invoke(
            "Remove Widget",
            MenuAction::RemoveWidget {
                widget_id: widget_id.clone(),
            },
        )],
        ContextTarget::DockApp { app } => vec![
            MenuItem::invoke("Open", MenuAction::OpenApp { app: *app }),
            MenuItem::invoke("Close All Windows", MenuAction::CloseAppWindows { app: *app }),
        ],
        ContextTarget::DockSession { session_id } => vec![
            MenuItem::invoke(
                "Focus",
                MenuAction::FocusSession {
                    session_id: session_id.clone(),
                },
            ),
            MenuItem::invoke(
                "Attach Selection",
                MenuAction::AttachSessionSelection {
                    session_id: session_id.clone(),
                },
            ),
            MenuItem::invoke(
                "Info",
                MenuAction::SessionInfo {
                    session_id: session_id.clone(),
                },
            ),
            MenuItem::invoke(
                "End Session",
                MenuAction::EndSession {
                    session_id: session_id.clone(),
                },
            ),
        ],
        ContextTarget::DockMinimized { window_id } => vec![
            MenuItem::invoke("Restore", MenuAction::RestoreWindow { window_id: *window_id }),
            MenuItem::invoke("Close", MenuAction::CloseWindow { window_id: *window_id }),
        ],
        ContextTarget::PanelChief => vec![
            MenuItem::invoke("New Conversation", MenuAction::NewConversation),
            MenuItem::invoke("Attach Selection", MenuAction::AttachSelectionToChat),
        ],
        ContextTarget::PanelSpecialist { specialist_id } => vec![
            MenuItem::invoke(
                "Info",
                MenuAction::SessionInfo {
                    session_id: specialist_id.clone(),
                },
            ),
            MenuItem::invoke(
                "End Session",
                MenuAction::EndSession {
                    session_id: specialist_id.clone(),
                },
            ),
        ],
        ContextTarget::PanelAttachment { path } => vec![
            MenuItem::invoke("Open", MenuAction::OpenAttachment { path: path.clone() }),
            MenuItem::invoke(
                "Save to Desktop",
                MenuAction::SaveAttachmentToDesktop { path: path.clone() },
            ),
        ],
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn path_click(path: &str) -> ContextClick {
        ContextClick {
            path: Some(path.to_string()),
            ..ContextClick::default()
        }
    }

    #[test]
    fn explicit_surface_wins_over_any_path_metadata() {
        let click = ContextClick {
            surface: Some(ContextSurface::PanelAttachment {
                path: "inbox/report.pdf".to_string(),
            }),
            path: Some("inbox/report.pdf".to_string()),
            is_directory: Some(false),
            ..ContextClick::default()
        };
        assert_eq!(
            resolve_context_target(&click),
            ContextTarget::PanelAttachment {
                path: "inbox/report.pdf".to_string()
            }
        );
    }

    #[test]
    fn no_path_resolves_to_desktop() {
        assert_eq!(
            resolve_context_target(&ContextClick::default()),
            ContextTarget::Desktop
        );
    }

    #[test]
    fn protected_basename_resolves_to_system_file_before_markers() {
        let mut click = path_click("Desktop/LIFE.md");
        click.has_life_marker = true;
        click.is_directory = Some(false);
        assert_eq!(
            resolve_context_target(&click),
            ContextTarget::SystemFile {
                path: "Desktop/LIFE.md".to_string()
            }
        );
    }

    #[test]
    fn marker_flags_resolve_domains_and_apps_in_priority_order() {
        let mut click = path_click("Desktop/health");
        click.has_life_marker = true;
        click.has_app_marker = true;
        assert_eq!(
            resolve_context_target(&click),
            ContextTarget::LifeDomain {
                path: "Desktop/health".to_string()
            }
        );

        let mut click = path_click("Desktop/timer");
        click.has_app_marker = true;
        assert_eq!(
            resolve_context_target(&click),
            ContextTarget::CustomApp {
                path: "Desktop/timer".to_string()
            }
        );
    }

    #[test]
    fn directory_flag_beats_the_basename_heuristic() {
        let mut click = path_click("Desktop/archive.d");
        click.is_directory = Some(true);
        assert_eq!(
            resolve_context_target(&click),
            ContextTarget::Folder {
                path: "Desktop/archive.d".to_string()
            }
        );
    }

    #[test]
    fn without_metadata_a_dotless_basename_is_treated_as_a_folder() {
        assert_eq!(
            resolve_context_target(&path_click("Desktop/work")),
            ContextTarget::Folder {
                path: "Desktop/work".to_string()
            }
        );
        assert_eq!(
            resolve_context_target(&path_click("Desktop/notes.md")),
            ContextTarget::File {
                path: "Desktop/notes.md".to_string()
            }
        );
        // Known false negative: an extensionless file classifies as a folder.
        assert_eq!(
            resolve_context_target(&path_click("Desktop/Makefile")),
            ContextTarget::Folder {
                path: "Desktop/Makefile".to_string()
            }
        );
    }

    #[test]
    fn resolution_is_deterministic_over_the_full_input_grid() {
        let surfaces = [
            None,
            Some(ContextSurface::Trash),
            Some(ContextSurface::PanelChief),
        ];
        let paths = [None, Some("Desktop/work"), Some("Desktop/LIFE.md")];
        let flags = [false, true];
        let dirs = [None, Some(false), Some(true)];

        for surface in &surfaces {
            for &path in &paths {
                for &life in &flags {
                    for &app in &flags {
                        for &dir in &dirs {
                            let click = ContextClick {
                                surface: surface.clone(),
                                path: path.map(String::from),
                                is_directory: dir,
                                has_app_marker: app,
                                has_life_marker: life,
                            };
                            assert_eq!(
                                resolve_context_target(&click),
                                resolve_context_target(&click),
                                "click={click:?}"
                            );
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn system_file_menu_has_no_rename_or_trash_rows() {
        let target = resolve_context_target(&path_click("Desktop/LIFE.md"));
        let items = build_context_menu(&target, &MenuContext::default());
        assert!(items.iter().all(|item| {
            !matches!(
                item.entry,
                MenuEntry::Prompt(InputPrompt::RenameEntry { .. })
                    | MenuEntry::Invoke(MenuAction::MoveToTrash { .. })
            )
        }));
        assert!(!items.is_empty());
    }

    #[test]
    fn new_folder_prompt_joins_the_current_directory() {
        let items = build_context_menu(&ContextTarget::Desktop, &MenuContext::default());
        let prompt = items
            .iter()
            .find_map(|item| match &item.entry {
                MenuEntry::Prompt(prompt @ InputPrompt::NewFolder) => Some(prompt),
                _ => None,
            })
            .expect("desktop menu offers New Folder");

        let at_root = MenuContext {
            trash_count: 0,
            current_directory: String::new(),
        };
        assert_eq!(
            action_for_prompt(prompt, "Notes", &at_root),
            MenuAction::NewFolder {
                path: "Notes".to_string()
            }
        );

        let in_work = MenuContext {
            trash_count: 0,
            current_directory: "work".to_string(),
        };
        assert_eq!(
            action_for_prompt(prompt, "Notes", &in_work),
            MenuAction::NewFolder {
                path: "work/Notes".to_string()
            }
        );
    }

    #[test]
    fn empty_trash_is_disabled_at_zero_and_enabled_above() {
        let empty = build_context_menu(
            &ContextTarget::Trash,
            &MenuContext {
                trash_count: 0,
                current_directory: String::new(),
            },
        );
        let row = empty
            .iter()
            .find(|item| matches!(item.entry, MenuEntry::Invoke(MenuAction::EmptyTrash)))
            .expect("trash menu offers Empty Trash");
        assert!(!row.enabled);

        let full = build_context_menu(
            &ContextTarget::Trash,
            &MenuContext {
                trash_count: 3,
                current_directory: String::new(),
            },
        );
        let row = full
            .iter()
            .find(|item| matches!(item.entry, MenuEntry::Invoke(MenuAction::EmptyTrash)))
            .expect("trash menu offers Empty Trash");
        assert!(row.enabled);
    }

    #[test]
    fn dock_session_menu_exposes_the_session_action_set() {
        let items = build_context_menu(
            &ContextTarget::DockSession {
                session_id: "s-12".to_string(),
            },
            &MenuContext::default(),
        );
        let labels: Vec<&str> = items.iter().map(|i| i.label).collect();
        assert_eq!(labels, vec!["Focus", "Attach Selection", "Info", "End Session"]);
    }
}
