//! Desktop shell UI composition and interaction surfaces.

mod a11y;
mod finder;
mod menus;
mod window;

use leptos::*;

use self::{
    a11y::window_dom_id,
    menus::{ContextMenuOverlay, PromptOverlay, PromptState},
    window::DesktopWindow,
};
use crate::{
    context_menu::{ContextClick, ContextMenuModel, ContextSurface, MenuAction, MenuContext},
    host::ShellHostContext,
    keyboard::command_for_key,
    model::{AppKind, DesktopState, PointerPosition, ResizeEdge, WindowId},
    reducer::DesktopAction,
    runtime_context::{use_shell_runtime, ShellRuntimeContext},
    selection::{DropCandidate, DropZone},
    tree::FileNode,
};

pub use self::finder::FinderView;

pub(crate) use self::a11y::focus_window_primary_input;

/// Height reserved for the dock at the bottom of the viewport.
pub const DOCK_HEIGHT_PX: i32 = 56;

fn pointer_from_pointer_event(ev: &web_sys::PointerEvent) -> PointerPosition {
    PointerPosition {
        x: ev.client_x(),
        y: ev.client_y(),
    }
}

fn stop_mouse_event(ev: &web_sys::MouseEvent) {
    ev.prevent_default();
    ev.stop_propagation();
}

/// The icon order currently rendered on the desktop: directories first, then names,
/// case-insensitive. Keyboard stepping and select-all use exactly this order.
pub(crate) fn sorted_icon_paths(state: &DesktopState) -> Vec<String> {
    let mut icons: Vec<&FileNode> = state.tree.icons().iter().collect();
    if !state.preferences.show_hidden_files {
        icons.retain(|node| !node.name.starts_with('.'));
    }
    icons.sort_by(|a, b| {
        b.is_directory()
            .cmp(&a.is_directory())
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
    });
    icons.into_iter().map(|node| node.path.clone()).collect()
}

fn menu_context_from_state(state: &DesktopState) -> MenuContext {
    MenuContext {
        trash_count: state.trash_count,
        current_directory: state.tree.root_path(),
    }
}

/// Opens the single context-menu instance for a click site, replacing any previous menu.
pub(crate) fn open_context_menu(runtime: ShellRuntimeContext, click: ContextClick, x: i32, y: i32) {
    let state = runtime.state.get_untracked();
    let model =
        ContextMenuModel::from_click(&click, PointerPosition { x, y }, &menu_context_from_state(&state));
    runtime.context_menu.set(Some(model));
}

/// Executes the upload-picker effect through the host adapters.
pub(crate) fn open_upload_picker(host: ShellHostContext, runtime: ShellRuntimeContext, dir: String) {
    let done_host = host.clone();
    platform_host_http::pick_and_upload(
        host.remote_fs(),
        dir,
        std::rc::Rc::new(move |result| match result {
            Ok(_) => done_host.publish_signal(runtime, crate::bus::ShellSignal::TreeChanged {
                scope: None,
            }),
            Err(err) => done_host.notify("Upload failed", &err.to_string()),
        }),
    );
}

#[derive(Clone, PartialEq, Eq)]
struct IconData {
    name: String,
    path: String,
    is_directory: bool,
    is_system: bool,
    has_app_marker: bool,
    has_life_marker: bool,
}

fn desktop_icons(state: &DesktopState) -> Vec<IconData> {
    let order = sorted_icon_paths(state);
    order
        .iter()
        .filter_map(|path| state.tree.node(path))
        .map(|node| IconData {
            name: node.name.clone(),
            path: node.path.clone(),
            is_directory: node.is_directory(),
            is_system: node.is_system_file(),
            has_app_marker: node.has_app_marker(),
            has_life_marker: node.has_life_marker(),
        })
        .collect()
}

#[component]
/// Renders the full desktop shell: icon grid, window layer, dock, assistant panel, and the
/// transient overlays (context menu, prompt, quick look).
pub fn DesktopShell() -> impl IntoView {
    let runtime = use_shell_runtime();
    let state = runtime.state;
    let prompt_state = create_rw_signal(None::<PromptState>);

    let keydown_listener = window_event_listener(ev::keydown, move |ev| {
        if ev.default_prevented() {
            return;
        }
        if prompt_state.get_untracked().is_some() {
            return;
        }
        if ev.key() == "Escape" && runtime.context_menu.get_untracked().is_some() {
            ev.prevent_default();
            runtime.context_menu.set(None);
            return;
        }
        let Some(command) = command_for_key(&ev.key(), ev.meta_key() || ev.ctrl_key()) else {
            return;
        };
        ev.prevent_default();
        let icon_order = sorted_icon_paths(&state.get_untracked());
        runtime.dispatch_action(DesktopAction::HandleShellCommand {
            command,
            icon_order,
        });
    });
    on_cleanup(move || keydown_listener.remove());

    let on_pointer_move = move |ev: web_sys::PointerEvent| {
        let pointer = pointer_from_pointer_event(&ev);
        let interaction = runtime.interaction.get_untracked();
        if interaction.window_drag.is_some() {
            runtime.dispatch_action(DesktopAction::UpdateWindowMove { pointer });
        }
        if interaction.window_resize.is_some() {
            runtime.dispatch_action(DesktopAction::UpdateWindowResize { pointer });
        }
    };
    let end_pointer_interactions = move || {
        let interaction = runtime.interaction.get_untracked();
        if interaction.window_drag.is_some() {
            runtime.dispatch_action(DesktopAction::EndWindowMove);
        }
        if interaction.window_resize.is_some() {
            runtime.dispatch_action(DesktopAction::EndWindowResize);
        }
        if interaction.icon_drag.is_some() {
            runtime.dispatch_action(DesktopAction::CompleteIconDrop { zone: None });
        }
    };

    view! {
        <div
            id="desktop-shell-root"
            class="desktop-shell"
            tabindex="-1"
            on:pointermove=on_pointer_move
            on:pointerup=move |_| end_pointer_interactions()
            on:pointercancel=move |_| end_pointer_interactions()
            on:click=move |_| {
                if runtime.context_menu.get_untracked().is_some() {
                    runtime.context_menu.set(None);
                }
            }
        >
            <div
                class="desktop-backdrop"
                on:mousedown=move |_| {
                    runtime.context_menu.set(None);
                    runtime.dispatch_action(DesktopAction::ClearSelection);
                }
                on:contextmenu=move |ev| {
                    ev.prevent_default();
                    ev.stop_propagation();
                    open_context_menu(
                        runtime,
                        ContextClick::default(),
                        ev.client_x(),
                        ev.client_y(),
                    );
                }
            ></div>

            <div class="desktop-icon-grid">
                <For
                    each=move || desktop_icons(&state.get())
                    key=|icon| icon.path.clone()
                    let:icon
                >
                    <DesktopIcon icon=icon />
                </For>
            </div>

            <div class="desktop-widget-layer">
                <For
                    each=move || state.get().widgets
                    key=|widget| widget.id.clone()
                    let:widget
                >
                    {{
                        let widget_id = widget.id.clone();
                        view! {
                            <div
                                class="desktop-widget"
                                on:contextmenu=move |ev| {
                                    ev.prevent_default();
                                    ev.stop_propagation();
                                    open_context_menu(
                                        runtime,
                                        ContextClick {
                                            surface: Some(ContextSurface::Widget {
                                                widget_id: widget_id.clone(),
                                            }),
                                            ..ContextClick::default()
                                        },
                                        ev.client_x(),
                                        ev.client_y(),
                                    );
                                }
                            >
                                {widget.title.clone()}
                            </div>
                        }
                    }}
                </For>
            </div>

            <div class="window-layer">
                <For each=move || state.get().windows key=|win| win.id.0 let:win>
                    <DesktopWindow window_id=win.id />
                </For>
            </div>

            <AssistantPanel />
            <Dock />
            <QuickLookOverlay />
            <ContextMenuOverlay prompt_state=prompt_state />
            <PromptOverlay prompt_state=prompt_state />
        </div>
    }
}

#[component]
fn DesktopIcon(icon: IconData) -> impl IntoView {
    let runtime = use_shell_runtime();
    let path = icon.path.clone();
    let select_path = path.clone();
    let drag_path = path.clone();
    let hover_path = path.clone();
    let drop_path = path.clone();
    let open_path = path.clone();
    let menu_icon = icon.clone();
    let is_directory = icon.is_directory;

    let is_selected = Signal::derive(move || {
        runtime.interaction.get().selection.is_selected(&path)
    });
    let glyph_class = if icon.has_life_marker {
        "icon-glyph domain"
    } else if icon.has_app_marker {
        "icon-glyph app"
    } else if icon.is_system {
        "icon-glyph system"
    } else if icon.is_directory {
        "icon-glyph folder"
    } else {
        "icon-glyph file"
    };

    view! {
        <button
            class=move || {
                if is_selected.get() {
                    "desktop-icon selected"
                } else {
                    "desktop-icon"
                }
            }
            on:pointerdown=move |ev: web_sys::PointerEvent| {
                if ev.button() != 0 {
                    return;
                }
                ev.stop_propagation();
                let additive = ev.shift_key() || ev.meta_key() || ev.ctrl_key();
                runtime.dispatch_action(DesktopAction::SelectIcon {
                    path: select_path.clone(),
                    additive,
                });
                runtime.dispatch_action(DesktopAction::BeginIconDrag {
                    path: drag_path.clone(),
                });
            }
            on:pointerenter=move |_| {
                if runtime.interaction.get_untracked().icon_drag.is_some() {
                    runtime.dispatch_action(DesktopAction::SetDropHover {
                        candidate: Some(DropCandidate {
                            path: hover_path.clone(),
                            is_directory,
                        }),
                    });
                }
            }
            on:pointerleave=move |_| {
                if runtime.interaction.get_untracked().icon_drag.is_some() {
                    runtime.dispatch_action(DesktopAction::SetDropHover { candidate: None });
                }
            }
            on:pointerup=move |ev: web_sys::PointerEvent| {
                let interaction = runtime.interaction.get_untracked();
                let Some(drag) = interaction.icon_drag.as_ref() else {
                    return;
                };
                if drag.dragged_path != drop_path {
                    ev.stop_propagation();
                    runtime.dispatch_action(DesktopAction::CompleteIconDrop {
                        zone: Some(DropZone::Directory {
                            path: drop_path.clone(),
                            is_directory,
                        }),
                    });
                }
            }
            on:dblclick=move |ev| {
                stop_mouse_event(&ev);
                runtime.dispatch_action(DesktopAction::InvokeMenuAction(MenuAction::Open {
                    path: open_path.clone(),
                    is_directory,
                }));
            }
            on:contextmenu=move |ev| {
                ev.prevent_default();
                ev.stop_propagation();
                runtime.dispatch_action(DesktopAction::SelectIcon {
                    path: menu_icon.path.clone(),
                    additive: false,
                });
                open_context_menu(
                    runtime,
                    ContextClick {
                        surface: None,
                        path: Some(menu_icon.path.clone()),
                        is_directory: Some(menu_icon.is_directory),
                        has_app_marker: menu_icon.has_app_marker,
                        has_life_marker: menu_icon.has_life_marker,
                    },
                    ev.client_x(),
                    ev.client_y(),
                );
            }
        >
            <span class=glyph_class aria-hidden="true"></span>
            <span class="desktop-icon-label">{icon.name.clone()}</span>
        </button>
    }
}

const PINNED_DOCK_APPS: [AppKind; 6] = [
    AppKind::Finder,
    AppKind::Mail,
    AppKind::Contacts,
    AppKind::Calendar,
    AppKind::Messages,
    AppKind::Settings,
];

#[component]
fn Dock() -> impl IntoView {
    let runtime = use_shell_runtime();
    let state = runtime.state;

    view! {
        <div class="dock" role="toolbar" aria-label="Dock">
            <For each=move || PINNED_DOCK_APPS.to_vec() key=|app| app.icon_id() let:app>
                {{
                    view! {
                        <button
                            class="dock-tile dock-app"
                            aria-label=app.title()
                            on:click=move |_| {
                                runtime.dispatch_action(DesktopAction::InvokeMenuAction(
                                    MenuAction::OpenApp { app },
                                ));
                            }
                            on:contextmenu=move |ev| {
                                ev.prevent_default();
                                ev.stop_propagation();
                                open_context_menu(
                                    runtime,
                                    ContextClick {
                                        surface: Some(ContextSurface::DockApp { app }),
                                        ..ContextClick::default()
                                    },
                                    ev.client_x(),
                                    ev.client_y(),
                                );
                            }
                        >
                            <span class=format!("dock-glyph {}", app.icon_id()) aria-hidden="true"></span>
                        </button>
                    }
                }}
            </For>

            <For
                each=move || {
                    state
                        .get()
                        .windows
                        .into_iter()
                        .filter(|w| w.minimized)
                        .collect::<Vec<_>>()
                }
                key=|win| win.id.0
                let:win
            >
                {{
                    let window_id = win.id;
                    view! {
                        <button
                            class="dock-tile dock-minimized"
                            aria-label=format!("Restore {}", win.title)
                            on:click=move |_| {
                                runtime.dispatch_action(DesktopAction::UnminimizeWindow {
                                    window_id,
                                });
                            }
                            on:contextmenu=move |ev| {
                                ev.prevent_default();
                                ev.stop_propagation();
                                open_context_menu(
                                    runtime,
                                    ContextClick {
                                        surface: Some(ContextSurface::DockMinimized { window_id }),
                                        ..ContextClick::default()
                                    },
                                    ev.client_x(),
                                    ev.client_y(),
                                );
                            }
                        >
                            <span class="dock-minimized-label">{win.title.clone()}</span>
                        </button>
                    }
                }}
            </For>

            <For
                each=move || state.get().dock_sessions
                key=|session| session.id.clone()
                let:session
            >
                {{
                    let session_id = session.id.clone();
                    let focus_id = session_id.clone();
                    view! {
                        <button
                            class="dock-tile dock-session"
                            aria-label=format!("Session {}", session.title)
                            on:click=move |_| {
                                runtime.dispatch_action(DesktopAction::InvokeMenuAction(
                                    MenuAction::FocusSession {
                                        session_id: focus_id.clone(),
                                    },
                                ));
                            }
                            on:contextmenu=move |ev| {
                                ev.prevent_default();
                                ev.stop_propagation();
                                open_context_menu(
                                    runtime,
                                    ContextClick {
                                        surface: Some(ContextSurface::DockSession {
                                            session_id: session_id.clone(),
                                        }),
                                        ..ContextClick::default()
                                    },
                                    ev.client_x(),
                                    ev.client_y(),
                                );
                            }
                        >
                            <span class="dock-session-label">{session.title.clone()}</span>
                        </button>
                    }
                }}
            </For>

            <button
                class="dock-tile dock-trash"
                aria-label="Trash"
                on:click=move |_| {
                    runtime.dispatch_action(DesktopAction::InvokeMenuAction(MenuAction::OpenTrash));
                }
                on:pointerup=move |ev: web_sys::PointerEvent| {
                    if runtime.interaction.get_untracked().icon_drag.is_some() {
                        ev.stop_propagation();
                        runtime.dispatch_action(DesktopAction::CompleteIconDrop {
                            zone: Some(DropZone::Trash),
                        });
                    }
                }
                on:contextmenu=move |ev| {
                    ev.prevent_default();
                    ev.stop_propagation();
                    open_context_menu(
                        runtime,
                        ContextClick {
                            surface: Some(ContextSurface::Trash),
                            ..ContextClick::default()
                        },
                        ev.client_x(),
                        ev.client_y(),
                    );
                }
            >
                <span class="dock-glyph trash" aria-hidden="true"></span>
                <Show when=move || (state.get().trash_count > 0) fallback=|| ()>
                    <span class="dock-trash-count">{move || state.get().trash_count}</span>
                </Show>
            </button>
        </div>
    }
}

#[component]
fn AssistantPanel() -> impl IntoView {
    let runtime = use_shell_runtime();
    let state = runtime.state;

    view! {
        <aside class="assistant-panel" aria-label="Assistant">
            <div
                class="assistant-chief"
                on:contextmenu=move |ev| {
                    ev.prevent_default();
                    ev.stop_propagation();
                    open_context_menu(
                        runtime,
                        ContextClick {
                            surface: Some(ContextSurface::PanelChief),
                            ..ContextClick::default()
                        },
                        ev.client_x(),
                        ev.client_y(),
                    );
                }
            >
                "Chief"
            </div>
            <For
                each=move || state.get().dock_sessions
                key=|session| session.id.clone()
                let:session
            >
                {{
                    let specialist_id = session.id.clone();
                    view! {
                        <div
                            class="assistant-specialist"
                            on:contextmenu=move |ev| {
                                ev.prevent_default();
                                ev.stop_propagation();
                                open_context_menu(
                                    runtime,
                                    ContextClick {
                                        surface: Some(ContextSurface::PanelSpecialist {
                                            specialist_id: specialist_id.clone(),
                                        }),
                                        ..ContextClick::default()
                                    },
                                    ev.client_x(),
                                    ev.client_y(),
                                );
                            }
                        >
                            {session.title.clone()}
                        </div>
                    }
                }}
            </For>
        </aside>
    }
}

#[component]
fn QuickLookOverlay() -> impl IntoView {
    let runtime = use_shell_runtime();
    let state = runtime.state;

    view! {
        <Show when=move || state.get().quick_look_path.is_some() fallback=|| ()>
            {move || {
                let Some(path) = state.get().quick_look_path else {
                    return ().into_view();
                };
                view! {
                    <div class="quick-look-backdrop">
                        <div class="quick-look" role="dialog" aria-label="Quick Look">
                            <div class="quick-look-path">{path}</div>
                            <p class="quick-look-note">
                                "Preview is handled by the content renderer."
                            </p>
                        </div>
                    </div>
                }
                    .into_view()
            }}
        </Show>
    }
}
