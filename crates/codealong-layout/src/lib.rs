// Three-panel proportional layout engine.
// Stored weights always sum to 100 across all panels; displayed widths are
// renormalized over the visible panels only. Both normalizations are kept.

pub mod drag;
pub mod geometry;
pub mod visibility;
pub mod widths;
mod tests;

use codealong_core::{CursorHint, HandleId, Panel, PanelMap, Rect, Vec2};

pub use drag::{resize_weights, DragController, DragSession, DragState, MoveOutcome, WeightBounds};
pub use visibility::Visibility;
pub use widths::compute_widths;

/// Default split. Not exactly equal; sums to 100.00.
pub const DEFAULT_WEIGHTS: PanelMap<f64> = PanelMap::new(33.33, 33.33, 33.34);

// ──────────────────────────────────────────────
// LayoutState
// ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutState {
    pub weights: PanelMap<f64>,
    pub visibility: Visibility,
}

impl LayoutState {
    pub fn new(weights: PanelMap<f64>) -> Self {
        Self {
            weights,
            visibility: Visibility::all_visible(),
        }
    }
}

impl Default for LayoutState {
    fn default() -> Self {
        Self::new(DEFAULT_WEIGHTS)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    pub bounds: WeightBounds,
    pub default_weights: PanelMap<f64>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            bounds: WeightBounds::default(),
            default_weights: DEFAULT_WEIGHTS,
        }
    }
}

// ──────────────────────────────────────────────
// PanelLayout
// ──────────────────────────────────────────────

/// Owns the layout state and the drag controller. All layout mutation goes
/// through here so the drag session can be torn down consistently.
pub struct PanelLayout {
    state: LayoutState,
    drag: DragController,
    default_weights: PanelMap<f64>,
}

impl PanelLayout {
    pub fn new(config: LayoutConfig) -> Self {
        Self {
            state: LayoutState::new(config.default_weights),
            drag: DragController::new(config.bounds),
            default_weights: config.default_weights,
        }
    }

    pub fn state(&self) -> &LayoutState {
        &self.state
    }

    pub fn weights(&self) -> PanelMap<f64> {
        self.state.weights
    }

    pub fn visibility(&self) -> &Visibility {
        &self.state.visibility
    }

    pub fn visible_panels(&self) -> Vec<Panel> {
        self.state.visibility.visible_panels()
    }

    pub fn widths(&self) -> PanelMap<f64> {
        compute_widths(&self.state)
    }

    pub fn set_visible(&mut self, panel: Panel, visible: bool) {
        self.state.visibility.set_visible(panel, visible);
        self.cancel_drag_if_handle_gone();
    }

    pub fn toggle_visibility(&mut self, panel: Panel) -> bool {
        let visible = self.state.visibility.toggle(panel);
        self.cancel_drag_if_handle_gone();
        visible
    }

    /// Restore the default weights. An in-flight drag is cancelled so its
    /// start snapshot cannot overwrite the reset on the next move.
    pub fn reset_weights(&mut self) {
        self.drag.cancel();
        self.state.weights = self.default_weights;
    }

    // ── Drag ────────────────────────────────────

    pub fn begin_drag(&mut self, handle: HandleId, pointer_x: f32) -> bool {
        self.drag
            .begin(handle, pointer_x, &self.state.weights, &self.state.visibility)
    }

    /// Begin a drag on whichever handle lies under `position`, if any.
    pub fn begin_drag_at(&mut self, position: Vec2, container: Rect) -> Option<HandleId> {
        let handle = geometry::handle_at(&self.state, container, position)?;
        self.begin_drag(handle, position.x).then_some(handle)
    }

    pub fn drag_border(&mut self, pointer_x: f32, container_width: Option<f32>) -> MoveOutcome {
        self.drag
            .drag_to(pointer_x, container_width, &mut self.state.weights)
    }

    pub fn end_drag(&mut self) -> bool {
        self.drag.end()
    }

    pub fn cancel_drag(&mut self) -> bool {
        self.drag.cancel()
    }

    pub fn drag_session(&self) -> Option<&DragSession> {
        self.drag.session()
    }

    /// The global "resizing in progress" flag. Derived from the drag state so
    /// it cannot outlive the session.
    pub fn is_resizing(&self) -> bool {
        self.drag.is_dragging()
    }

    pub fn cursor(&self) -> CursorHint {
        if self.is_resizing() {
            CursorHint::ColResize
        } else {
            CursorHint::Default
        }
    }

    // ── Geometry ────────────────────────────────

    pub fn panel_rects(&self, container: Rect) -> Vec<(Panel, Rect)> {
        geometry::panel_rects(&self.state, container)
    }

    pub fn handles(&self) -> Vec<HandleId> {
        geometry::handles(&self.state.visibility)
    }

    fn cancel_drag_if_handle_gone(&mut self) {
        if let Some(handle) = self.drag.active_handle() {
            if !self.handles().contains(&handle) {
                self.drag.cancel();
            }
        }
    }
}

impl Default for PanelLayout {
    fn default() -> Self {
        Self::new(LayoutConfig::default())
    }
}
