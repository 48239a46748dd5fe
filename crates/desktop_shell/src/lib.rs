//! Desktop coordination layer: window lifecycle, context-target resolution, eventually
//! consistent file-tree sync, and hierarchical navigation, plus the Leptos shell that renders
//! them.

pub mod apps;
pub mod bus;
pub mod components;
pub mod context_menu;
pub mod host;
pub mod keyboard;
pub mod model;
pub mod navigation;
pub mod persistence;
pub mod reducer;
pub mod runtime_context;
pub mod selection;
pub mod tree;
pub mod window_manager;

mod effect_executor;

pub use components::{DesktopShell, FinderView, DOCK_HEIGHT_PX};
pub use host::ShellHostContext;
pub use model::*;
pub use reducer::{reduce_desktop, DesktopAction, FsMutation, RuntimeEffect, ShellError};
pub use runtime_context::{use_shell_runtime, ShellProvider, ShellRuntimeContext};
