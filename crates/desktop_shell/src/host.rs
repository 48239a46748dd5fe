//! Host-side runtime: the injected service bundle and the effect executor.
//!
//! Everything asynchronous lives here. The reducer emits intents; this module runs them with
//! `spawn_local`, converts typed failures into notifications, and feeds results back through
//! the dispatch callback. Failures never bubble past this boundary.

use std::rc::Rc;

use leptos::*;
use platform_host::{FsError, NotificationService, PushChannel, RemoteFsService};

use crate::{
    bus::ShellSignal,
    model::{WindowId, WindowRect},
    persistence,
    reducer::{DesktopAction, FsMutation, RuntimeEffect},
    runtime_context::ShellRuntimeContext,
    tree::TRASH_DIR,
};

#[derive(Clone)]
/// Host service bundle for shell runtime side effects.
pub struct ShellHostContext {
    fs: Rc<dyn RemoteFsService>,
    push: Rc<dyn PushChannel>,
    notifications: Rc<dyn NotificationService>,
}

impl Default for ShellHostContext {
    fn default() -> Self {
        Self {
            fs: Rc::new(platform_host_http::remote_fs_service()),
            push: Rc::new(platform_host_http::push_channel()),
            notifications: Rc::new(platform_host_http::notification_service()),
        }
    }
}

impl ShellHostContext {
    /// Builds a host context from explicit services (tests and alternative hosts).
    pub fn new(
        fs: Rc<dyn RemoteFsService>,
        push: Rc<dyn PushChannel>,
        notifications: Rc<dyn NotificationService>,
    ) -> Self {
        Self {
            fs,
            push,
            notifications,
        }
    }

    /// The configured remote file-store service.
    pub fn remote_fs(&self) -> Rc<dyn RemoteFsService> {
        self.fs.clone()
    }

    /// Routes inbound push events into the reducer.
    pub fn install_push_subscription(&self, dispatch: Callback<DesktopAction>) {
        self.push.subscribe(Rc::new(move |event| {
            dispatch.call(DesktopAction::HandlePushEvent { event });
        }));
    }

    /// Returns the viewport rect available to maximized windows, below the dock.
    pub fn desktop_viewport_rect(&self, dock_height_px: i32) -> WindowRect {
        #[cfg(target_arch = "wasm32")]
        {
            if let Some(window) = web_sys::window() {
                let width = window
                    .inner_width()
                    .ok()
                    .and_then(|value| value.as_f64())
                    .map(|value| value as i32)
                    .unwrap_or(1024);
                let height = window
                    .inner_height()
                    .ok()
                    .and_then(|value| value.as_f64())
                    .map(|value| value as i32)
                    .unwrap_or(768);
                return WindowRect {
                    x: 0,
                    y: 0,
                    w: width.max(320),
                    h: (height - dock_height_px).max(220),
                };
            }
        }

        WindowRect {
            x: 0,
            y: 0,
            w: 1024,
            h: 768 - dock_height_px,
        }
    }

    /// Executes a single [`RuntimeEffect`] emitted by the reducer.
    pub fn run_runtime_effect(&self, runtime: ShellRuntimeContext, effect: RuntimeEffect) {
        match effect {
            RuntimeEffect::FsCall(mutation) => {
                let host = self.clone();
                spawn_local(async move {
                    match run_fs_mutation(host.fs.as_ref(), &mutation).await {
                        Ok(signals) => {
                            for signal in signals {
                                host.publish_signal(runtime, signal);
                            }
                        }
                        Err(err) => host.notify("File operation failed", &err.to_string()),
                    }
                });
            }
            RuntimeEffect::LoadTree { root } => {
                let host = self.clone();
                spawn_local(async move {
                    match host.fs.list_dir(&root).await {
                        Ok(listing) => runtime.dispatch_action(DesktopAction::ApplyTreeListing {
                            requested_root: root,
                            listing,
                        }),
                        Err(err) => logging::warn!("tree load failed for `{root}`: {err}"),
                    }
                });
            }
            RuntimeEffect::LoadColumn {
                window_id,
                column,
                path,
            } => {
                let host = self.clone();
                spawn_local(async move {
                    match host.fs.list_dir(&path).await {
                        Ok(listing) => {
                            runtime.dispatch_action(DesktopAction::ApplyColumnListing {
                                window_id,
                                column,
                                requested_path: path,
                                items: listing.entries,
                            });
                        }
                        Err(err) => logging::warn!("column load failed for `{path}`: {err}"),
                    }
                });
            }
            RuntimeEffect::LoadTrashCount => {
                let host = self.clone();
                spawn_local(async move {
                    match host.fs.list_dir(TRASH_DIR).await {
                        Ok(listing) => runtime.dispatch_action(DesktopAction::SetTrashCount {
                            count: listing.entries.len(),
                        }),
                        Err(err) => logging::warn!("trash count refresh failed: {err}"),
                    }
                });
            }
            RuntimeEffect::LoadEntryInfo { path } => {
                let host = self.clone();
                spawn_local(async move {
                    match host.fs.stat(&path).await {
                        Ok(entry) => {
                            let kind = if entry.kind.is_directory() {
                                "Folder"
                            } else {
                                "File"
                            };
                            let detail = match (entry.size, entry.child_count) {
                                (Some(size), _) => format!("{kind}, {size} bytes"),
                                (_, Some(count)) => format!("{kind}, {count} items"),
                                _ => kind.to_string(),
                            };
                            host.notify(&entry.name, &detail);
                        }
                        Err(err) => host.notify("Get Info failed", &err.to_string()),
                    }
                });
            }
            RuntimeEffect::PickAndUpload { dir } => {
                crate::components::open_upload_picker(self.clone(), runtime, dir);
            }
            RuntimeEffect::ExportPath { path } => {
                platform_host_http::open_external_url(&platform_host_http::export_url(&path));
            }
            RuntimeEffect::Publish(signal) => {
                self.publish_signal(runtime, signal);
            }
            RuntimeEffect::Notify { title, body } => {
                self.notify(&title, &body);
            }
            RuntimeEffect::PersistLayout => {
                let state = runtime.state.get_untracked();
                if let Err(err) = persistence::persist_layout_snapshot(&state) {
                    logging::warn!("persist layout snapshot failed: {err}");
                }
            }
            RuntimeEffect::FocusWindowInput(window_id) => {
                crate::components::focus_window_primary_input(window_id);
            }
        }
    }

    /// Publishes a signal on the bus and performs the shell-root routing for it. Receivers stay
    /// idempotent: a duplicate signal costs at most one extra reload.
    pub fn publish_signal(&self, runtime: ShellRuntimeContext, signal: ShellSignal) {
        match &signal {
            ShellSignal::TreeChanged { scope } => {
                self.refresh_tree_views(runtime, *scope);
            }
            ShellSignal::TrashChanged => {
                self.run_runtime_effect(runtime, RuntimeEffect::LoadTrashCount);
            }
            ShellSignal::NavigateWindow { window_id, path } => {
                runtime.dispatch_action(DesktopAction::NavigateTo {
                    window_id: *window_id,
                    path: path.clone(),
                });
            }
            ShellSignal::ClosePathWindows { .. } | ShellSignal::AttachToChat { .. } => {}
        }
        runtime.deliver_signal(signal);
    }

    /// Reloads the desktop tree and the column sets of open Finder windows. A `scope` limits the
    /// reload to one window's view.
    fn refresh_tree_views(&self, runtime: ShellRuntimeContext, scope: Option<WindowId>) {
        let state = runtime.state.get_untracked();
        if scope.is_none() {
            self.run_runtime_effect(
                runtime,
                RuntimeEffect::LoadTree {
                    root: state.tree.root_path(),
                },
            );
        }
        for (window_id, nav) in &state.navigations {
            if scope.map(|s| s != *window_id).unwrap_or(false) {
                continue;
            }
            for (column, col) in nav.columns.iter().enumerate() {
                self.run_runtime_effect(
                    runtime,
                    RuntimeEffect::LoadColumn {
                        window_id: *window_id,
                        column,
                        path: col.path.clone(),
                    },
                );
            }
        }
    }

    /// Surfaces a transient notification, logging delivery failures.
    pub fn notify(&self, title: &str, body: &str) {
        let notifications = self.notifications.clone();
        let title = title.to_string();
        let body = body.to_string();
        spawn_local(async move {
            if let Err(err) = notifications.notify(&title, &body).await {
                logging::warn!("notification dispatch failed: {err}");
            }
        });
    }
}

/// Runs one fire-and-forget mutation and reports the refresh signals its success implies.
///
/// The visible tree is untouched here: confirmation arrives through the push channel, and these
/// signals only trigger the explicit post-mutation refresh.
pub(crate) async fn run_fs_mutation(
    fs: &dyn RemoteFsService,
    mutation: &FsMutation,
) -> Result<Vec<ShellSignal>, FsError> {
    match mutation {
        FsMutation::CreateFile { path, content } => {
            fs.create_file(path, content).await?;
        }
        FsMutation::CreateFolder { path } => {
            fs.create_dir(path).await?;
        }
        FsMutation::Rename { path, new_name } => {
            fs.rename(path, new_name).await?;
        }
        FsMutation::Move { path, dest_dir } => {
            fs.move_entry(path, dest_dir).await?;
        }
        FsMutation::Trash { path } => {
            fs.trash(path).await?;
            return Ok(vec![
                ShellSignal::TreeChanged { scope: None },
                ShellSignal::TrashChanged,
            ]);
        }
        FsMutation::EmptyTrash => {
            fs.empty_trash().await?;
            return Ok(vec![ShellSignal::TrashChanged]);
        }
    }
    Ok(vec![ShellSignal::TreeChanged { scope: None }])
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use platform_host::{FsError, RecordedFsCall, RecordingFsService};
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn mutations_reach_the_store_and_report_refresh_signals() {
        let fs = RecordingFsService::default();

        let signals = block_on(run_fs_mutation(
            &fs,
            &FsMutation::CreateFolder {
                path: "work/Notes".to_string(),
            },
        ))
        .expect("create");
        assert_eq!(signals, vec![ShellSignal::TreeChanged { scope: None }]);

        let signals = block_on(run_fs_mutation(
            &fs,
            &FsMutation::Trash {
                path: "Desktop/notes.md".to_string(),
            },
        ))
        .expect("trash");
        assert_eq!(
            signals,
            vec![
                ShellSignal::TreeChanged { scope: None },
                ShellSignal::TrashChanged,
            ]
        );

        assert_eq!(
            fs.calls(),
            vec![
                RecordedFsCall::CreateDir("work/Notes".to_string()),
                RecordedFsCall::Trash("Desktop/notes.md".to_string()),
            ]
        );
    }

    #[test]
    fn a_failed_move_surfaces_the_typed_conflict() {
        let fs = RecordingFsService::default();
        fs.fail_next(FsError::Conflict {
            name: "notes.md".to_string(),
        });

        let err = block_on(run_fs_mutation(
            &fs,
            &FsMutation::Move {
                path: "Desktop/notes.md".to_string(),
                dest_dir: "Desktop/work".to_string(),
            },
        ))
        .expect_err("conflict");
        assert_eq!(
            err.to_string(),
            "destination already contains \"notes.md\""
        );
    }
}
