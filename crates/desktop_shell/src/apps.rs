//! Window body composition for the built-in app surfaces.
//!
//! Mail, contacts, calendar, and settings are thin views over collaborator services and render
//! placeholder panels here; the Finder and the file viewer are the shell's own surfaces.

use leptos::*;

use crate::{
    bus::ShellSignal,
    components::FinderView,
    model::{AppKind, WindowId, WindowTarget},
    runtime_context::use_shell_runtime,
};

/// Mounts the body view for a window target.
pub fn mount_window_body(window_id: WindowId, target: &WindowTarget) -> View {
    match target {
        WindowTarget::App(AppKind::Finder) => view! { <FinderView window_id=window_id /> }.into_view(),
        WindowTarget::App(AppKind::Messages) => view! { <MessagesApp /> }.into_view(),
        WindowTarget::App(kind) => {
            let kind = *kind;
            view! { <CompanionApp kind=kind /> }.into_view()
        }
        WindowTarget::File { path } => {
            let path = path.clone();
            view! { <FileViewerApp path=path /> }.into_view()
        }
    }
}

#[component]
fn CompanionApp(kind: AppKind) -> impl IntoView {
    view! {
        <div class="app-shell app-companion">
            <div class="app-companion-title">{kind.title()}</div>
            <p class="app-companion-note">
                {format!("{} is served by the companion service.", kind.title())}
            </p>
        </div>
    }
}

#[component]
fn FileViewerApp(path: String) -> impl IntoView {
    view! {
        <div class="app-shell app-file-viewer">
            <div class="file-viewer-path">{path}</div>
            <p class="file-viewer-note">"Preview is handled by the content renderer."</p>
        </div>
    }
}

/// Chat surface. Subscribes to attach-to-chat signals and lists attached paths; the
/// conversation itself lives in the collaborator service.
#[component]
fn MessagesApp() -> impl IntoView {
    let runtime = use_shell_runtime();
    let attachments = create_rw_signal(Vec::<String>::new());

    let subscriber = {
        let mut id = None;
        runtime.bus.update_untracked(|bus| {
            let sub = bus.register();
            bus.subscribe(sub, "attach-to-chat");
            id = Some(sub);
        });
        id.expect("bus subscriber registered")
    };

    create_effect(move |_| {
        runtime.bus_version.get();
        let mut drained = Vec::new();
        runtime
            .bus
            .update_untracked(|bus| drained = bus.drain(subscriber));
        for signal in drained {
            if let ShellSignal::AttachToChat { path } = signal {
                attachments.update(|list| {
                    if !list.contains(&path) {
                        list.push(path);
                    }
                });
            }
        }
    });

    on_cleanup(move || {
        runtime
            .bus
            .update_untracked(|bus| bus.remove_subscriber(subscriber));
    });

    view! {
        <div class="app-shell app-messages">
            <div class="messages-thread">
                <p class="messages-note">"Conversation history is served by the chat service."</p>
            </div>
            <Show when=move || !attachments.get().is_empty() fallback=|| ()>
                <div class="messages-attachments">
                    <div class="messages-attachments-title">"Attachments"</div>
                    <For each=move || attachments.get() key=|path| path.clone() let:path>
                        <div class="messages-attachment-chip">{path}</div>
                    </For>
                </div>
            </Show>
        </div>
    }
}
