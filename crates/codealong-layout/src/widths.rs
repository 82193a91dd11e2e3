// Displayed widths: stored weights renormalized over the visible panels only.

use codealong_core::{Panel, PanelMap};

use crate::LayoutState;

/// Compute the on-screen percentage for every panel.
///
/// Hidden panels get 0. A single visible panel gets 100 whatever its weight.
/// With two or more visible panels each gets `weight / Σ visible weights * 100`,
/// so toggling a panel never changes the relative proportions of the others.
/// A non-positive (or non-finite) visible sum degrades to the all-hidden case.
pub fn compute_widths(state: &LayoutState) -> PanelMap<f64> {
    let visible = state.visibility.visible_panels();

    match visible.as_slice() {
        [] => PanelMap::default(),
        [only] => {
            let mut widths = PanelMap::default();
            widths[*only] = 100.0;
            widths
        }
        panels => {
            let total: f64 = panels.iter().map(|p| state.weights[*p]).sum();
            if !total.is_finite() || total <= 0.0 {
                return PanelMap::default();
            }
            PanelMap::from_fn(|p: Panel| {
                if state.visibility.is_visible(p) {
                    state.weights[p] / total * 100.0
                } else {
                    0.0
                }
            })
        }
    }
}
