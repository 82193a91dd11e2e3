use codealong_core::{HandleId, Panel, Rect, Vec2};

use crate::visibility::Visibility;
use crate::widths::compute_widths;
use crate::LayoutState;

/// Handle hit-test threshold in pixels.
pub const HANDLE_HIT_THRESHOLD: f32 = 8.0;

/// Lay the visible panels out left to right inside `container`.
/// Hidden panels are omitted; an all-hidden layout yields no rects.
pub fn panel_rects(state: &LayoutState, container: Rect) -> Vec<(Panel, Rect)> {
    let widths = compute_widths(state);
    let mut x = container.x;
    let mut out = Vec::new();

    for panel in state.visibility.visible_panels() {
        let width = container.width * (widths[panel] / 100.0) as f32;
        out.push((panel, Rect::new(x, container.y, width, container.height)));
        x += width;
    }
    out
}

/// Handles that currently exist: one between each pair of adjacent panels
/// that are both visible.
pub fn handles(visibility: &Visibility) -> Vec<HandleId> {
    HandleId::ALL
        .into_iter()
        .filter(|h| {
            let (left, right) = h.panels();
            visibility.is_visible(left) && visibility.is_visible(right)
        })
        .collect()
}

/// The x coordinate of every existing handle's boundary.
pub fn handle_positions(state: &LayoutState, container: Rect) -> Vec<(HandleId, f32)> {
    let rects = panel_rects(state, container);
    handles(&state.visibility)
        .into_iter()
        .filter_map(|handle| {
            let (left, _) = handle.panels();
            rects
                .iter()
                .find(|(p, _)| *p == left)
                .map(|(_, r)| (handle, r.right()))
        })
        .collect()
}

/// Find the handle closest to `position`, if it lies within the hit threshold.
pub fn handle_at(state: &LayoutState, container: Rect, position: Vec2) -> Option<HandleId> {
    if position.y < container.y || position.y > container.y + container.height {
        return None;
    }

    let mut best: Option<(f32, HandleId)> = None;
    for (handle, x) in handle_positions(state, container) {
        let dist = (position.x - x).abs();
        if dist > HANDLE_HIT_THRESHOLD {
            continue;
        }
        if best.map_or(true, |(best_dist, _)| dist < best_dist) {
            best = Some((dist, handle));
        }
    }
    best.map(|(_, h)| h)
}
