//! Layout persistence for boot hydration.
//!
//! The snapshot lives in `localStorage` behind a schema version; non-browser targets read and
//! write nothing.

use crate::model::{DesktopSnapshot, DesktopState, DESKTOP_LAYOUT_SCHEMA_VERSION};

#[cfg(target_arch = "wasm32")]
const SNAPSHOT_KEY: &str = "webdesk.layout.v1";

/// Loads the persisted boot snapshot if one exists and its schema is current.
pub fn load_boot_snapshot() -> Option<DesktopSnapshot> {
    #[cfg(target_arch = "wasm32")]
    {
        let storage = local_storage()?;
        let raw = storage.get_item(SNAPSHOT_KEY).ok().flatten()?;
        let snapshot = serde_json::from_str::<DesktopSnapshot>(&raw).ok()?;
        (snapshot.schema_version == DESKTOP_LAYOUT_SCHEMA_VERSION).then_some(snapshot)
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        None
    }
}

/// Persists the current layout snapshot.
///
/// # Errors
///
/// Returns a message when serialization or storage access fails.
pub fn persist_layout_snapshot(state: &DesktopState) -> Result<(), String> {
    let snapshot = state.snapshot();
    let _raw = serde_json::to_string(&snapshot).map_err(|err| err.to_string())?;

    #[cfg(target_arch = "wasm32")]
    {
        let storage = local_storage().ok_or_else(|| "localStorage unavailable".to_string())?;
        storage
            .set_item(SNAPSHOT_KEY, &_raw)
            .map_err(|_| "localStorage write failed".to_string())?;
    }

    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::{AppKind, OpenWindowRequest};
    use crate::reducer::{reduce_desktop, DesktopAction};

    #[test]
    fn snapshot_round_trips_through_serde_and_hydration() {
        let mut state = DesktopState::default();
        let mut interaction = crate::model::InteractionState::default();
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::OpenWindow(OpenWindowRequest::app(AppKind::Finder)),
        )
        .expect("open");
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::OpenWindow(OpenWindowRequest::file("Desktop/notes.md")),
        )
        .expect("open");

        let raw = serde_json::to_string(&state.snapshot()).expect("serialize");
        let parsed: DesktopSnapshot = serde_json::from_str(&raw).expect("deserialize");
        assert_eq!(parsed.schema_version, DESKTOP_LAYOUT_SCHEMA_VERSION);

        let restored = DesktopState::from_snapshot(parsed);
        assert_eq!(restored.windows.len(), 2);
        assert_eq!(restored.windows, state.windows);
    }
}
