//! Runtime provider and context wiring for the desktop shell.
//!
//! This module owns the long-lived reducer container, the runtime effect queue, the signal bus,
//! and boot wiring (persisted-layout hydration, push-channel subscription, initial loads). UI
//! composition stays in [`crate::components`].

use leptos::*;

use crate::{
    bus::{ShellSignal, SignalBus},
    context_menu::ContextMenuModel,
    effect_executor,
    host::ShellHostContext,
    model::{DesktopState, InteractionState},
    persistence,
    reducer::{reduce_desktop, DesktopAction, RuntimeEffect},
};

#[derive(Clone, Copy)]
/// Leptos context for reading shell state and dispatching [`DesktopAction`] values.
pub struct ShellRuntimeContext {
    /// Host service bundle for executing runtime side effects.
    pub host: StoredValue<ShellHostContext>,
    /// Reactive desktop state signal.
    pub state: RwSignal<DesktopState>,
    /// Reactive pointer/drag/selection interaction state signal.
    pub interaction: RwSignal<InteractionState>,
    /// The single transient context-menu instance. Opening a new menu replaces any previous one;
    /// every dispatch path clears it first.
    pub context_menu: RwSignal<Option<ContextMenuModel>>,
    /// Broadcast bus for cross-cutting signals between mounted views.
    pub bus: RwSignal<SignalBus>,
    /// Bumped on every publish so subscribers can drain their inboxes untracked.
    pub bus_version: RwSignal<u64>,
    /// Queue of runtime effects emitted by the reducer and processed by the host.
    pub effects: RwSignal<Vec<RuntimeEffect>>,
    /// Reducer dispatch callback.
    pub dispatch: Callback<DesktopAction>,
}

impl ShellRuntimeContext {
    /// Dispatches a reducer action through the runtime context callback.
    pub fn dispatch_action(&self, action: DesktopAction) {
        self.dispatch.call(action);
    }

    /// Delivers a signal into subscriber inboxes and wakes subscribers.
    pub fn deliver_signal(&self, signal: ShellSignal) {
        self.bus.update_untracked(|bus| bus.publish(signal));
        self.bus_version.update(|v| *v += 1);
    }
}

#[component]
/// Provides [`ShellRuntimeContext`] to descendant components and boots persisted state.
pub fn ShellProvider(children: Children) -> impl IntoView {
    let host = store_value(ShellHostContext::default());
    let state = create_rw_signal(DesktopState::default());
    let interaction = create_rw_signal(InteractionState::default());
    let context_menu = create_rw_signal(None::<ContextMenuModel>);
    let bus = create_rw_signal(SignalBus::default());
    let bus_version = create_rw_signal(0u64);
    let effects = create_rw_signal(Vec::<RuntimeEffect>::new());

    let dispatch = Callback::new(move |action: DesktopAction| {
        let mut desktop = state.get_untracked();
        let mut ui = interaction.get_untracked();
        let previous_desktop = desktop.clone();
        let previous_ui = ui.clone();

        match reduce_desktop(&mut desktop, &mut ui, action) {
            Ok(new_effects) => {
                if desktop != previous_desktop {
                    state.set(desktop);
                }
                if ui != previous_ui {
                    interaction.set(ui);
                }
                if !new_effects.is_empty() {
                    let mut queue = effects.get_untracked();
                    queue.extend(new_effects);
                    effects.set(queue);
                }
            }
            Err(err) => logging::warn!("shell reducer error: {err}"),
        }
    });

    let runtime = ShellRuntimeContext {
        host,
        state,
        interaction,
        context_menu,
        bus,
        bus_version,
        effects,
        dispatch,
    };

    provide_context(runtime);

    effect_executor::install(runtime);
    install_boot(runtime);

    children().into_view()
}

/// Hydrates persisted layout, subscribes to the push channel, and issues the initial loads.
fn install_boot(runtime: ShellRuntimeContext) {
    create_effect(move |ran: Option<()>| {
        if ran.is_some() {
            return;
        }

        if let Some(mut snapshot) = persistence::load_boot_snapshot() {
            if !snapshot.preferences.restore_layout_on_boot {
                snapshot.windows.clear();
            }
            runtime.dispatch_action(DesktopAction::HydrateSnapshot { snapshot });
        }

        let host = runtime.host.get_value();
        host.install_push_subscription(runtime.dispatch);
        let root = runtime.state.get_untracked().tree.root_path();
        host.run_runtime_effect(runtime, RuntimeEffect::LoadTree { root });
        host.run_runtime_effect(runtime, RuntimeEffect::LoadTrashCount);
    });
}

/// Returns the current [`ShellRuntimeContext`].
///
/// # Panics
///
/// Panics if called outside [`ShellProvider`].
pub fn use_shell_runtime() -> ShellRuntimeContext {
    use_context::<ShellRuntimeContext>().expect("ShellRuntimeContext not provided")
}
