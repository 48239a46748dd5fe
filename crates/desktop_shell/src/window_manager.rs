//! Shared window-manager transition helpers used by the desktop reducer.

use crate::model::{DesktopState, ResizeEdge, WindowId, WindowRect, DEFAULT_WINDOW_HEIGHT, DEFAULT_WINDOW_WIDTH};

/// Minimum allowed managed window width.
pub const MIN_WINDOW_WIDTH: i32 = 240;
/// Minimum allowed managed window height.
pub const MIN_WINDOW_HEIGHT: i32 = 160;

/// Focuses and raises `window_id`: every other window loses focus and the target takes the next
/// monotone z-index, so the focused window's stacking position is strictly greater than every
/// other window's. Unminimizes the target. Returns `false` when the window does not exist.
pub fn focus_window_internal(state: &mut DesktopState, window_id: WindowId) -> bool {
    if !state.windows.iter().any(|w| w.id == window_id) {
        return false;
    }
    let z_index = state.next_z_index;
    state.next_z_index = state.next_z_index.saturating_add(1);
    for window in &mut state.windows {
        if window.id == window_id {
            window.is_focused = true;
            window.minimized = false;
            window.z_index = z_index;
        } else {
            window.is_focused = false;
        }
    }
    true
}

/// Staggered cascade position for the `n`th opened window.
pub fn cascade_rect(window_ordinal: u64) -> WindowRect {
    let offset = ((window_ordinal as i32) - 1).rem_euclid(8) * 24;
    WindowRect {
        x: 40 + offset,
        y: 48 + offset,
        w: DEFAULT_WINDOW_WIDTH,
        h: DEFAULT_WINDOW_HEIGHT,
    }
}

/// Applies resize deltas for a given edge/corner drag.
pub fn resize_rect(start: WindowRect, edge: ResizeEdge, dx: i32, dy: i32) -> WindowRect {
    match edge {
        ResizeEdge::East => WindowRect {
            w: start.w + dx,
            ..start
        },
        ResizeEdge::West => WindowRect {
            x: start.x + dx,
            w: start.w - dx,
            ..start
        },
        ResizeEdge::South => WindowRect {
            h: start.h + dy,
            ..start
        },
        ResizeEdge::North => WindowRect {
            y: start.y + dy,
            h: start.h - dy,
            ..start
        },
        ResizeEdge::NorthEast => WindowRect {
            y: start.y + dy,
            h: start.h - dy,
            w: start.w + dx,
            ..start
        },
        ResizeEdge::NorthWest => WindowRect {
            x: start.x + dx,
            y: start.y + dy,
            w: start.w - dx,
            h: start.h - dy,
        },
        ResizeEdge::SouthEast => WindowRect {
            w: start.w + dx,
            h: start.h + dy,
            ..start
        },
        ResizeEdge::SouthWest => WindowRect {
            x: start.x + dx,
            w: start.w - dx,
            h: start.h + dy,
            ..start
        },
    }
}
