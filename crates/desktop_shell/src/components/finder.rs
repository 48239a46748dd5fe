use platform_host::RemoteEntryKind;

use super::*;
use crate::navigation::ColumnState;

/// Miller-column file browser with breadcrumbs and back/forward history.
#[component]
pub fn FinderView(window_id: WindowId) -> impl IntoView {
    let runtime = use_shell_runtime();
    let nav = Signal::derive(move || runtime.state.get().navigations.get(&window_id).cloned());

    let go_back = move |_| {
        runtime.dispatch_action(DesktopAction::GoBack { window_id });
    };
    let go_forward = move |_| {
        runtime.dispatch_action(DesktopAction::GoForward { window_id });
    };

    view! {
        <div class="app-shell app-finder">
            <div class="finder-toolbar">
                <button
                    class="finder-nav-button"
                    aria-label="Back"
                    disabled=move || nav.get().map(|n| !n.can_go_back()).unwrap_or(true)
                    on:click=go_back
                >
                    "‹"
                </button>
                <button
                    class="finder-nav-button"
                    aria-label="Forward"
                    disabled=move || nav.get().map(|n| !n.can_go_forward()).unwrap_or(true)
                    on:click=go_forward
                >
                    "›"
                </button>
                <nav class="finder-breadcrumbs" aria-label="Path">
                    <For
                        each=move || {
                            nav.get().map(|n| n.breadcrumb_segments()).unwrap_or_default()
                        }
                        key=|segment| segment.path.clone()
                        let:segment
                    >
                        {{
                            let target = segment.path.clone();
                            view! {
                                <button
                                    class="finder-breadcrumb"
                                    on:click=move |_| {
                                        runtime.dispatch_action(DesktopAction::NavigateTo {
                                            window_id,
                                            path: target.clone(),
                                        });
                                    }
                                >
                                    {segment.label.clone()}
                                </button>
                            }
                        }}
                    </For>
                </nav>
            </div>

            <div class="finder-columns">
                <For
                    each=move || {
                        nav.get()
                            .map(|n| n.columns.into_iter().enumerate().collect::<Vec<_>>())
                            .unwrap_or_default()
                    }
                    key=|(idx, col)| (*idx, col.path.clone())
                    let:indexed
                >
                    {{
                        let (idx, column) = indexed;
                        view! { <FinderColumn window_id=window_id column_index=idx column=column /> }
                    }}
                </For>
            </div>
        </div>
    }
}

#[component]
fn FinderColumn(window_id: WindowId, column_index: usize, column: ColumnState) -> impl IntoView {
    let runtime = use_shell_runtime();
    let selected = column.selected_child.clone();
    let items = column.items.clone();

    view! {
        <ul class="finder-column" role="listbox">
            <For
                each=move || items.clone()
                key=|entry| entry.path.clone()
                let:entry
            >
                {{
                    let is_directory = entry.kind == RemoteEntryKind::Directory;
                    let path = entry.path.clone();
                    let select_path = path.clone();
                    let open_path = path.clone();
                    let is_selected = selected.as_deref() == Some(path.as_str());
                    let row_class = if is_selected {
                        "finder-item selected"
                    } else {
                        "finder-item"
                    };

                    view! {
                        <li role="option" aria-selected=is_selected.to_string()>
                            <button
                                class=row_class
                                on:click=move |_| {
                                    runtime.dispatch_action(DesktopAction::SelectInColumn {
                                        window_id,
                                        column: column_index,
                                        path: select_path.clone(),
                                        is_directory,
                                    });
                                }
                                on:dblclick=move |ev| {
                                    stop_mouse_event(&ev);
                                    if is_directory {
                                        runtime.dispatch_action(DesktopAction::NavigateTo {
                                            window_id,
                                            path: open_path.clone(),
                                        });
                                    } else {
                                        runtime.dispatch_action(DesktopAction::InvokeMenuAction(
                                            crate::context_menu::MenuAction::Open {
                                                path: open_path.clone(),
                                                is_directory: false,
                                            },
                                        ));
                                    }
                                }
                            >
                                <span class=if is_directory {
                                    "finder-item-glyph folder"
                                } else {
                                    "finder-item-glyph file"
                                }></span>
                                <span class="finder-item-name">{entry.name.clone()}</span>
                                <Show when=move || is_directory fallback=|| ()>
                                    <span class="finder-item-chevron" aria-hidden="true">"›"</span>
                                </Show>
                            </button>
                        </li>
                    }
                }}
            </For>
        </ul>
    }
}
