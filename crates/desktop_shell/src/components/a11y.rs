//! Internal DOM focus helpers for shell widgets.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;

use crate::model::WindowId;

/// Stable DOM id of a window's primary input target.
pub(crate) fn window_primary_input_dom_id(window_id: WindowId) -> String {
    format!("window-primary-input-{}", window_id.0)
}

/// Stable DOM id of a window's chrome section.
pub(crate) fn window_dom_id(window_id: WindowId) -> String {
    format!("desktop-window-{}", window_id.0)
}

/// Focuses an element by id and reports whether a focusable HTML element was found.
pub(crate) fn focus_element_by_id(id: &str) -> bool {
    #[cfg(target_arch = "wasm32")]
    {
        let Some(document) = web_sys::window().and_then(|window| window.document()) else {
            return false;
        };
        let Some(element) = document.get_element_by_id(id) else {
            return false;
        };
        let Ok(element) = element.dyn_into::<web_sys::HtmlElement>() else {
            return false;
        };
        let _ = element.focus();
        true
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = id;
        false
    }
}

/// Moves browser focus into a window's primary input, falling back to its chrome.
pub(crate) fn focus_window_primary_input(window_id: WindowId) {
    if !focus_element_by_id(&window_primary_input_dom_id(window_id)) {
        let _ = focus_element_by_id(&window_dom_id(window_id));
    }
}
