// Drag-resize controller: turns pointer deltas on a handle into new panel weights.

use codealong_core::{HandleId, PanelMap};

use crate::visibility::Visibility;

/// Inclusive per-panel weight bounds enforced while dragging (percentage points).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightBounds {
    pub min: f64,
    pub max: f64,
}

impl WeightBounds {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, weight: f64) -> bool {
        weight >= self.min && weight <= self.max
    }
}

impl Default for WeightBounds {
    fn default() -> Self {
        Self::new(15.0, 70.0)
    }
}

/// State captured on pointer-down, alive until pointer-up or cancellation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    pub handle: HandleId,
    pub anchor_x: f32,
    pub start_weights: PanelMap<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(DragSession),
}

/// What a pointer move did to the weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Weights were updated.
    Applied,
    /// A candidate fell outside the bounds; weights kept their pre-move values.
    Rejected,
    /// No drag in progress or the container could not be measured.
    Ignored,
}

/// Compute the weights for a drag of `delta` percentage points on `handle`,
/// starting from `start`. The left panel grows by `delta`, the right panel
/// shrinks by it, the third panel keeps its start weight.
///
/// Returns `None` when either adjacent candidate falls outside `bounds`: the
/// move is rejected as a whole rather than pinning one side. Accepted weights
/// are renormalized to sum to 100.
pub fn resize_weights(
    start: &PanelMap<f64>,
    handle: HandleId,
    delta: f64,
    bounds: WeightBounds,
) -> Option<PanelMap<f64>> {
    let (left, right) = handle.panels();
    let grown = start[left] + delta;
    let shrunk = start[right] - delta;

    if !bounds.contains(grown) || !bounds.contains(shrunk) {
        return None;
    }

    let mut next = *start;
    next[left] = grown;
    next[right] = shrunk;

    let total = next.sum();
    if !total.is_finite() || total <= 0.0 {
        return None;
    }
    Some(next.map(|_, w| w / total * 100.0))
}

pub struct DragController {
    state: DragState,
    bounds: WeightBounds,
}

impl DragController {
    pub fn new(bounds: WeightBounds) -> Self {
        Self {
            state: DragState::Idle,
            bounds,
        }
    }

    pub fn bounds(&self) -> WeightBounds {
        self.bounds
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn session(&self) -> Option<&DragSession> {
        match &self.state {
            DragState::Dragging(session) => Some(session),
            DragState::Idle => None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    pub fn active_handle(&self) -> Option<HandleId> {
        self.session().map(|s| s.handle)
    }

    /// Pointer-down on `handle`. Ignored while a drag is already active or when
    /// either panel next to the handle is hidden (the handle does not exist).
    pub fn begin(
        &mut self,
        handle: HandleId,
        pointer_x: f32,
        weights: &PanelMap<f64>,
        visibility: &Visibility,
    ) -> bool {
        if self.is_dragging() {
            log::trace!("Ignoring pointer-down on {}: drag already active", handle.name());
            return false;
        }
        let (left, right) = handle.panels();
        if !visibility.is_visible(left) || !visibility.is_visible(right) {
            log::trace!("Ignoring pointer-down on hidden handle {}", handle.name());
            return false;
        }

        self.state = DragState::Dragging(DragSession {
            handle,
            anchor_x: pointer_x,
            start_weights: *weights,
        });
        log::debug!("Resize drag started on {} at x={}", handle.name(), pointer_x);
        true
    }

    /// Pointer move. `container_width` is the measured width of the layout
    /// container in pixels, `None` when it cannot be measured.
    pub fn drag_to(
        &mut self,
        pointer_x: f32,
        container_width: Option<f32>,
        weights: &mut PanelMap<f64>,
    ) -> MoveOutcome {
        let DragState::Dragging(session) = &self.state else {
            return MoveOutcome::Ignored;
        };
        let width = match container_width {
            Some(w) if w.is_finite() && w > 0.0 => w,
            _ => return MoveOutcome::Ignored,
        };

        let delta = f64::from(pointer_x - session.anchor_x) / f64::from(width) * 100.0;
        match resize_weights(&session.start_weights, session.handle, delta, self.bounds) {
            Some(next) => {
                *weights = next;
                MoveOutcome::Applied
            }
            None => {
                log::trace!(
                    "Rejected resize move on {} (delta {:.3}%)",
                    session.handle.name(),
                    delta
                );
                MoveOutcome::Rejected
            }
        }
    }

    /// Pointer-up. Returns true if a drag was active.
    pub fn end(&mut self) -> bool {
        match std::mem::take(&mut self.state) {
            DragState::Dragging(session) => {
                log::debug!("Resize drag ended on {}", session.handle.name());
                true
            }
            DragState::Idle => false,
        }
    }

    /// Abnormal termination (pointer capture lost). Same exit as `end`.
    pub fn cancel(&mut self) -> bool {
        match std::mem::take(&mut self.state) {
            DragState::Dragging(session) => {
                log::debug!("Resize drag cancelled on {}", session.handle.name());
                true
            }
            DragState::Idle => false,
        }
    }
}

impl Default for DragController {
    fn default() -> Self {
        Self::new(WeightBounds::default())
    }
}
