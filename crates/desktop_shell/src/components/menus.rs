use super::*;
use crate::context_menu::{action_for_prompt, InputPrompt, MenuEntry};

#[derive(Clone)]
/// An input prompt opened from a context-menu row, pending user text.
pub(super) struct PromptState {
    pub prompt: InputPrompt,
    pub title: &'static str,
    pub value: RwSignal<String>,
}

pub(super) fn prompt_title(prompt: &InputPrompt) -> &'static str {
    match prompt {
        InputPrompt::RenameEntry { .. } => "Rename",
        InputPrompt::MoveEntry { .. } => "Move to…",
        InputPrompt::NewFolder => "New Folder",
        InputPrompt::NewFile => "New File",
    }
}

#[component]
pub(super) fn ContextMenuOverlay(
    prompt_state: RwSignal<Option<PromptState>>,
) -> impl IntoView {
    let runtime = use_shell_runtime();
    let menu = runtime.context_menu;

    view! {
        <Show when=move || menu.get().is_some() fallback=|| ()>
            {move || {
                let Some(model) = menu.get() else {
                    return ().into_view();
                };
                let menu_style = format!("left:{}px;top:{}px;", model.position.x, model.position.y);

                view! {
                    <div
                        id="desktop-context-menu"
                        class="desktop-context-menu"
                        role="menu"
                        style=menu_style
                        on:mousedown=move |ev| ev.stop_propagation()
                        on:click=move |ev| ev.stop_propagation()
                        on:contextmenu=move |ev| {
                            ev.prevent_default();
                            ev.stop_propagation();
                        }
                    >
                        <For
                            each=move || {
                                menu.get()
                                    .map(|m| m.items.into_iter().enumerate().collect::<Vec<_>>())
                                    .unwrap_or_default()
                            }
                            key=|(idx, _)| *idx
                            let:row
                        >
                            {{
                                let (idx, item) = row;
                                let entry = item.entry.clone();
                                let label = item.label;
                                let enabled = item.enabled;
                                view! {
                                    <button
                                        id=format!("desktop-context-menu-item-{idx}")
                                        role="menuitem"
                                        class="desktop-context-menu-item"
                                        disabled=!enabled
                                        on:click=move |ev| {
                                            stop_mouse_event(&ev);
                                            // Every action closes the menu before it runs.
                                            menu.set(None);
                                            match entry.clone() {
                                                MenuEntry::Invoke(action) => {
                                                    runtime.dispatch_action(
                                                        DesktopAction::InvokeMenuAction(action),
                                                    );
                                                }
                                                MenuEntry::Prompt(prompt) => {
                                                    let title = prompt_title(&prompt);
                                                    prompt_state.set(Some(PromptState {
                                                        prompt,
                                                        title,
                                                        value: create_rw_signal(String::new()),
                                                    }));
                                                }
                                            }
                                        }
                                    >
                                        {label}
                                    </button>
                                }
                            }}
                        </For>
                    </div>
                }
                    .into_view()
            }}
        </Show>
    }
}

#[component]
pub(super) fn PromptOverlay(prompt_state: RwSignal<Option<PromptState>>) -> impl IntoView {
    let runtime = use_shell_runtime();

    let submit = move |state: PromptState| {
        let ctx = menu_context_from_state(&runtime.state.get_untracked());
        let action = action_for_prompt(&state.prompt, &state.value.get_untracked(), &ctx);
        prompt_state.set(None);
        runtime.dispatch_action(DesktopAction::InvokeMenuAction(action));
    };

    view! {
        <Show when=move || prompt_state.get().is_some() fallback=|| ()>
            {move || {
                let Some(state) = prompt_state.get() else {
                    return ().into_view();
                };
                let value = state.value;
                let on_submit = state.clone();
                let on_key = state.clone();

                view! {
                    <div class="shell-prompt-backdrop" on:mousedown=move |_| prompt_state.set(None)>
                        <div
                            class="shell-prompt"
                            role="dialog"
                            aria-label=state.title
                            on:mousedown=move |ev| ev.stop_propagation()
                        >
                            <div class="shell-prompt-title">{state.title}</div>
                            <input
                                class="shell-prompt-input"
                                type="text"
                                prop:value=move || value.get()
                                on:input=move |ev| value.set(event_target_value(&ev))
                                on:keydown=move |ev: web_sys::KeyboardEvent| {
                                    if ev.key() == "Enter" {
                                        ev.prevent_default();
                                        submit(on_key.clone());
                                    } else if ev.key() == "Escape" {
                                        ev.prevent_default();
                                        ev.stop_propagation();
                                        prompt_state.set(None);
                                    }
                                }
                            />
                            <div class="shell-prompt-actions">
                                <button on:click=move |_| prompt_state.set(None)>"Cancel"</button>
                                <button
                                    class="primary"
                                    on:click=move |_| submit(on_submit.clone())
                                >
                                    "OK"
                                </button>
                            </div>
                        </div>
                    </div>
                }
                    .into_view()
            }}
        </Show>
    }
}
