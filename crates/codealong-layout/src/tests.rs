#[cfg(test)]
mod tests {
    use crate::{
        compute_widths, resize_weights, LayoutConfig, LayoutState, MoveOutcome, PanelLayout,
        Visibility, WeightBounds, DEFAULT_WEIGHTS,
    };
    use codealong_core::{CursorHint, HandleId, Panel, PanelMap, Rect, Vec2};

    const CONTAINER: Rect = Rect {
        x: 0.0,
        y: 0.0,
        width: 1000.0,
        height: 600.0,
    };

    const TOLERANCE: f64 = 1e-6;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < TOLERANCE
    }

    fn weights_approx_eq(a: &PanelMap<f64>, b: &PanelMap<f64>) -> bool {
        approx_eq(a.video, b.video) && approx_eq(a.editor, b.editor) && approx_eq(a.preview, b.preview)
    }

    fn state(weights: PanelMap<f64>, visible: PanelMap<bool>) -> LayoutState {
        LayoutState {
            weights,
            visibility: Visibility::from_flags(visible),
        }
    }

    fn layout_with(weights: PanelMap<f64>) -> PanelLayout {
        PanelLayout::new(LayoutConfig {
            default_weights: weights,
            ..LayoutConfig::default()
        })
    }

    /// Every visibility combination, for property-style loops.
    fn all_visibilities() -> Vec<PanelMap<bool>> {
        (0..8u8)
            .map(|bits| PanelMap::new(bits & 1 != 0, bits & 2 != 0, bits & 4 != 0))
            .collect()
    }

    // ──────────────────────────────────────────
    // Width engine
    // ──────────────────────────────────────────

    #[test]
    fn test_default_weights_display_unchanged() {
        let widths = compute_widths(&LayoutState::default());
        assert!(approx_eq(widths.video, 33.33));
        assert!(approx_eq(widths.editor, 33.33));
        assert!(approx_eq(widths.preview, 33.34));
        assert!(approx_eq(widths.sum(), 100.0));
    }

    #[test]
    fn test_hiding_preview_renormalizes_remaining() {
        let s = state(DEFAULT_WEIGHTS, PanelMap::new(true, true, false));
        let widths = compute_widths(&s);
        assert!(approx_eq(widths.video, 50.0));
        assert!(approx_eq(widths.editor, 50.0));
        assert_eq!(widths.preview, 0.0);
    }

    #[test]
    fn test_single_visible_panel_gets_everything() {
        for panel in Panel::ALL {
            let mut flags = PanelMap::new(false, false, false);
            flags[panel] = true;
            let s = state(PanelMap::new(15.0, 70.0, 15.0), flags);
            let widths = compute_widths(&s);
            assert_eq!(widths[panel], 100.0);
            assert!(approx_eq(widths.sum(), 100.0));
        }
    }

    #[test]
    fn test_all_hidden_is_zero_width() {
        let s = state(DEFAULT_WEIGHTS, PanelMap::new(false, false, false));
        assert_eq!(compute_widths(&s), PanelMap::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn test_non_positive_visible_sum_degrades_to_zero() {
        let s = state(PanelMap::new(0.0, 0.0, 50.0), PanelMap::new(true, true, false));
        assert_eq!(compute_widths(&s), PanelMap::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn test_widths_sum_to_100_for_any_visible_set() {
        let weight_sets = [
            DEFAULT_WEIGHTS,
            PanelMap::new(15.0, 70.0, 15.0),
            PanelMap::new(40.0, 30.0, 30.0),
            PanelMap::new(21.7, 48.1, 30.2),
        ];
        for weights in weight_sets {
            for flags in all_visibilities() {
                let s = state(weights, flags);
                let widths = compute_widths(&s);
                if s.visibility.visible_count() == 0 {
                    assert_eq!(widths.sum(), 0.0);
                } else {
                    assert!(
                        approx_eq(widths.sum(), 100.0),
                        "weights {weights:?} flags {flags:?} summed to {}",
                        widths.sum()
                    );
                }
                for panel in Panel::ALL {
                    if !flags[panel] {
                        assert_eq!(widths[panel], 0.0);
                    }
                }
            }
        }
    }

    #[test]
    fn test_hiding_keeps_relative_proportions() {
        let weights = PanelMap::new(20.0, 50.0, 30.0);
        let s = state(weights, PanelMap::new(false, true, true));
        let widths = compute_widths(&s);
        assert!(approx_eq(widths.editor / widths.preview, 50.0 / 30.0));
    }

    // ──────────────────────────────────────────
    // resize_weights (pure drag arithmetic)
    // ──────────────────────────────────────────

    #[test]
    fn test_resize_video_editor_plus_ten() {
        let start = PanelMap::new(30.0, 40.0, 30.0);
        let next = resize_weights(&start, HandleId::VideoEditor, 10.0, WeightBounds::default())
            .expect("move within bounds");
        assert!(weights_approx_eq(&next, &PanelMap::new(40.0, 30.0, 30.0)));
    }

    #[test]
    fn test_resize_rejects_when_grown_side_exceeds_max() {
        let start = PanelMap::new(65.0, 20.0, 15.0);
        assert!(resize_weights(&start, HandleId::VideoEditor, 10.0, WeightBounds::default()).is_none());
    }

    #[test]
    fn test_resize_rejects_when_shrunk_side_drops_below_min() {
        let start = PanelMap::new(30.0, 20.0, 50.0);
        assert!(resize_weights(&start, HandleId::VideoEditor, 10.0, WeightBounds::default()).is_none());
    }

    #[test]
    fn test_resize_editor_preview_leaves_video_fixed() {
        let start = PanelMap::new(30.0, 40.0, 30.0);
        let next = resize_weights(&start, HandleId::EditorPreview, -5.0, WeightBounds::default())
            .expect("move within bounds");
        assert!(weights_approx_eq(&next, &PanelMap::new(30.0, 35.0, 35.0)));
    }

    #[test]
    fn test_resize_renormalizes_to_100() {
        // Start weights that do not sum to 100 still come out normalized.
        let start = PanelMap::new(20.0, 20.0, 20.0);
        let next = resize_weights(&start, HandleId::VideoEditor, 5.0, WeightBounds::default())
            .expect("move within bounds");
        assert!(approx_eq(next.sum(), 100.0));
        assert!(approx_eq(next.video, 25.0 / 60.0 * 100.0));
        assert!(approx_eq(next.preview, 20.0 / 60.0 * 100.0));
    }

    #[test]
    fn test_resize_bounds_are_inclusive() {
        let start = PanelMap::new(60.0, 25.0, 15.0);
        let next = resize_weights(&start, HandleId::VideoEditor, 10.0, WeightBounds::default())
            .expect("exactly 70/15 is allowed");
        assert!(approx_eq(next.video, 70.0));
        assert!(approx_eq(next.editor, 15.0));
    }

    // ──────────────────────────────────────────
    // Drag controller state machine
    // ──────────────────────────────────────────

    #[test]
    fn test_drag_plus_ten_percent_commits() {
        let mut layout = layout_with(PanelMap::new(30.0, 40.0, 30.0));
        assert!(layout.begin_drag(HandleId::VideoEditor, 300.0));
        assert_eq!(layout.drag_border(400.0, Some(1000.0)), MoveOutcome::Applied);
        assert!(layout.end_drag());

        assert!(weights_approx_eq(&layout.weights(), &PanelMap::new(40.0, 30.0, 30.0)));
    }

    #[test]
    fn test_drag_out_of_bounds_is_rejected_atomically() {
        let mut layout = layout_with(PanelMap::new(65.0, 20.0, 15.0));
        let before = layout.weights();
        layout.begin_drag(HandleId::VideoEditor, 100.0);
        assert_eq!(layout.drag_border(200.0, Some(1000.0)), MoveOutcome::Rejected);

        let after = layout.weights();
        assert_eq!(after.video, before.video);
        assert_eq!(after.editor, before.editor);
        assert_eq!(after.preview, before.preview);
    }

    #[test]
    fn test_rejected_move_keeps_last_accepted_weights() {
        let mut layout = layout_with(PanelMap::new(50.0, 30.0, 20.0));
        layout.begin_drag(HandleId::VideoEditor, 0.0);
        assert_eq!(layout.drag_border(100.0, Some(1000.0)), MoveOutcome::Applied);
        let accepted = layout.weights();
        assert!(approx_eq(accepted.video, 60.0));

        // 50 + 30 = 80 exceeds the max: rejected, the previous move stays.
        assert_eq!(layout.drag_border(300.0, Some(1000.0)), MoveOutcome::Rejected);
        assert_eq!(layout.weights(), accepted);
    }

    #[test]
    fn test_zero_displacement_drag_restores_start() {
        let mut layout = PanelLayout::default();
        let start = layout.weights();
        layout.begin_drag(HandleId::EditorPreview, 500.0);
        layout.drag_border(620.0, Some(1000.0));
        layout.drag_border(410.0, Some(1000.0));
        layout.drag_border(500.0, Some(1000.0));
        layout.end_drag();

        assert!(weights_approx_eq(&layout.weights(), &start));
    }

    #[test]
    fn test_committed_weights_stay_in_bounds() {
        let mut layout = PanelLayout::default();
        let bounds = WeightBounds::default();
        for handle in HandleId::ALL {
            layout.begin_drag(handle, 500.0);
            let mut x = 0.0;
            while x <= 1000.0 {
                layout.drag_border(x, Some(1000.0));
                for (_, w) in layout.weights().iter() {
                    assert!(
                        *w >= bounds.min - TOLERANCE && *w <= bounds.max + TOLERANCE,
                        "weight {w} out of bounds at x={x}"
                    );
                }
                assert!(approx_eq(layout.weights().sum(), 100.0));
                x += 7.5;
            }
            layout.end_drag();
        }
    }

    #[test]
    fn test_drag_is_relative_to_start_snapshot() {
        let mut layout = layout_with(PanelMap::new(30.0, 40.0, 30.0));
        layout.begin_drag(HandleId::VideoEditor, 0.0);
        layout.drag_border(50.0, Some(1000.0));
        layout.drag_border(100.0, Some(1000.0));
        // Moves do not accumulate: +100px from the anchor is +10, not +15.
        assert!(approx_eq(layout.weights().video, 40.0));
    }

    #[test]
    fn test_unmeasurable_container_ignores_moves() {
        let mut layout = layout_with(PanelMap::new(30.0, 40.0, 30.0));
        layout.begin_drag(HandleId::VideoEditor, 0.0);
        let before = layout.weights();
        assert_eq!(layout.drag_border(100.0, None), MoveOutcome::Ignored);
        assert_eq!(layout.drag_border(100.0, Some(0.0)), MoveOutcome::Ignored);
        assert_eq!(layout.drag_border(100.0, Some(-10.0)), MoveOutcome::Ignored);
        assert_eq!(layout.drag_border(100.0, Some(f32::NAN)), MoveOutcome::Ignored);
        assert_eq!(layout.weights(), before);
        assert!(layout.is_resizing());

        // A later valid measurement works again.
        assert_eq!(layout.drag_border(100.0, Some(1000.0)), MoveOutcome::Applied);
    }

    #[test]
    fn test_moves_while_idle_are_ignored() {
        let mut layout = PanelLayout::default();
        let before = layout.weights();
        assert_eq!(layout.drag_border(900.0, Some(1000.0)), MoveOutcome::Ignored);
        assert!(!layout.end_drag());
        assert_eq!(layout.weights(), before);
    }

    #[test]
    fn test_nested_pointer_down_is_ignored() {
        let mut layout = PanelLayout::default();
        assert!(layout.begin_drag(HandleId::VideoEditor, 100.0));
        assert!(!layout.begin_drag(HandleId::EditorPreview, 700.0));

        let session = layout.drag_session().expect("drag active");
        assert_eq!(session.handle, HandleId::VideoEditor);
        assert_eq!(session.anchor_x, 100.0);
    }

    #[test]
    fn test_begin_on_hidden_handle_is_ignored() {
        let mut layout = PanelLayout::default();
        layout.set_visible(Panel::Video, false);
        assert!(!layout.begin_drag(HandleId::VideoEditor, 100.0));
        assert!(!layout.is_resizing());
        assert!(layout.begin_drag(HandleId::EditorPreview, 100.0));
    }

    #[test]
    fn test_resizing_flag_cleared_on_every_exit() {
        let mut layout = PanelLayout::default();

        layout.begin_drag(HandleId::VideoEditor, 10.0);
        assert_eq!(layout.cursor(), CursorHint::ColResize);
        layout.end_drag();
        assert!(!layout.is_resizing());
        assert!(layout.drag_session().is_none());

        layout.begin_drag(HandleId::VideoEditor, 10.0);
        assert!(layout.cancel_drag());
        assert_eq!(layout.cursor(), CursorHint::Default);

        layout.begin_drag(HandleId::VideoEditor, 10.0);
        layout.reset_weights();
        assert!(!layout.is_resizing());

        layout.begin_drag(HandleId::VideoEditor, 10.0);
        layout.toggle_visibility(Panel::Editor);
        assert!(!layout.is_resizing());
    }

    #[test]
    fn test_hiding_unrelated_panel_keeps_drag() {
        let mut layout = PanelLayout::default();
        layout.begin_drag(HandleId::VideoEditor, 10.0);
        layout.toggle_visibility(Panel::Preview);
        assert!(layout.is_resizing());
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut layout = PanelLayout::default();
        layout.begin_drag(HandleId::VideoEditor, 0.0);
        layout.drag_border(150.0, Some(1000.0));
        layout.end_drag();
        assert!(!weights_approx_eq(&layout.weights(), &DEFAULT_WEIGHTS));

        layout.reset_weights();
        assert_eq!(layout.weights(), DEFAULT_WEIGHTS);
        layout.reset_weights();
        assert_eq!(layout.weights(), DEFAULT_WEIGHTS);
    }

    #[test]
    fn test_drag_then_hide_uses_both_normalizations() {
        let mut layout = layout_with(PanelMap::new(30.0, 40.0, 30.0));
        layout.begin_drag(HandleId::VideoEditor, 0.0);
        layout.drag_border(100.0, Some(1000.0));
        layout.end_drag();

        layout.set_visible(Panel::Preview, false);
        // Stored weights still sum to 100 over all three panels...
        assert!(approx_eq(layout.weights().sum(), 100.0));
        // ...while display renormalizes over video + editor.
        let widths = layout.widths();
        assert!(approx_eq(widths.video, 40.0 / 70.0 * 100.0));
        assert!(approx_eq(widths.editor, 30.0 / 70.0 * 100.0));
    }

    // ──────────────────────────────────────────
    // Geometry and handle hit-testing
    // ──────────────────────────────────────────

    #[test]
    fn test_panel_rects_tile_container() {
        let layout = layout_with(PanelMap::new(20.0, 50.0, 30.0));
        let rects = layout.panel_rects(CONTAINER);
        assert_eq!(rects.len(), 3);
        assert_eq!(rects[0].0, Panel::Video);
        assert!((rects[0].1.width - 200.0).abs() < 0.01);
        assert!((rects[1].1.x - 200.0).abs() < 0.01);
        assert!((rects[1].1.width - 500.0).abs() < 0.01);
        assert!((rects[2].1.right() - 1000.0).abs() < 0.01);
    }

    #[test]
    fn test_panel_rects_all_hidden() {
        let mut layout = PanelLayout::default();
        for panel in Panel::ALL {
            layout.set_visible(panel, false);
        }
        assert!(layout.panel_rects(CONTAINER).is_empty());
        assert!(layout.handles().is_empty());
    }

    #[test]
    fn test_handles_require_both_neighbours() {
        let mut layout = PanelLayout::default();
        assert_eq!(layout.handles(), HandleId::ALL.to_vec());

        layout.set_visible(Panel::Editor, false);
        // Video and preview sit next to each other but have no handle.
        assert!(layout.handles().is_empty());

        layout.set_visible(Panel::Editor, true);
        layout.set_visible(Panel::Video, false);
        assert_eq!(layout.handles(), vec![HandleId::EditorPreview]);
    }

    #[test]
    fn test_begin_drag_at_handle_position() {
        let mut layout = layout_with(PanelMap::new(20.0, 50.0, 30.0));
        let handle = layout.begin_drag_at(Vec2::new(703.0, 300.0), CONTAINER);
        assert_eq!(handle, Some(HandleId::EditorPreview));
        assert!(layout.is_resizing());
    }

    #[test]
    fn test_begin_drag_at_miss() {
        let mut layout = layout_with(PanelMap::new(20.0, 50.0, 30.0));
        assert_eq!(layout.begin_drag_at(Vec2::new(450.0, 300.0), CONTAINER), None);
        assert_eq!(layout.begin_drag_at(Vec2::new(200.0, 900.0), CONTAINER), None);
        assert!(!layout.is_resizing());
    }
}
