// Session: owns the layout, the source buffer and the preview renderer, and
// is the single surface hosts drive. Time is always passed in by the caller.

use std::time::{Duration, Instant};

use codealong_core::{CursorHint, HandleId, Language, Panel, PanelMap, Rect, Vec2};
use codealong_editor::SourceBuffer;
use codealong_input::Command;
use codealong_layout::{LayoutConfig, MoveOutcome, PanelLayout};
use codealong_preview::{
    Document, PreviewPane, PreviewRenderer, RenderTarget, RenderTicket, TargetId, DEFAULT_DELAY,
};

use crate::theme::Theme;
use crate::video::{extract_video_id, VideoError, VideoId, VideoParams};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionConfig {
    pub layout: LayoutConfig,
    pub preview_delay: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            layout: LayoutConfig::default(),
            preview_delay: DEFAULT_DELAY,
        }
    }
}

pub struct Session {
    layout: PanelLayout,
    sources: SourceBuffer,
    preview: PreviewRenderer,
    theme: Theme,
    fullscreen: bool,
    video: Option<VideoId>,
    /// The pane target while the Preview panel is hidden.
    parked_pane: Option<Box<dyn RenderTarget>>,
}

impl Session {
    /// Starter sources, all panels visible, the in-page preview pane attached.
    pub fn new(config: SessionConfig) -> Self {
        Self::with_sources(config, SourceBuffer::with_starter())
    }

    pub fn with_sources(config: SessionConfig, sources: SourceBuffer) -> Self {
        let mut preview = PreviewRenderer::new(config.preview_delay);
        preview.attach(Box::new(PreviewPane::new(TargetId::PANE)));
        Self {
            layout: PanelLayout::new(config.layout),
            sources,
            preview,
            theme: Theme::default(),
            fullscreen: false,
            video: None,
            parked_pane: None,
        }
    }

    // ──────────────────────────────────────────────
    // Layout
    // ──────────────────────────────────────────────

    pub fn visible_panels(&self) -> Vec<Panel> {
        self.layout.visible_panels()
    }

    /// Displayed width percentages, renormalized over visible panels.
    pub fn compute_widths(&self) -> PanelMap<f64> {
        self.layout.widths()
    }

    pub fn weights(&self) -> PanelMap<f64> {
        self.layout.weights()
    }

    pub fn is_visible(&self, panel: Panel) -> bool {
        self.layout.visibility().is_visible(panel)
    }

    pub fn panel_rects(&self, container: Rect) -> Vec<(Panel, Rect)> {
        self.layout.panel_rects(container)
    }

    pub fn handles(&self) -> Vec<HandleId> {
        self.layout.handles()
    }

    pub fn reset_weights(&mut self) {
        self.layout.reset_weights();
    }

    /// Flip a panel's visibility. The pane target follows the Preview panel:
    /// it is parked while hidden and re-attached, caught up, when shown.
    pub fn toggle_visibility(&mut self, panel: Panel) -> bool {
        let visible = self.layout.toggle_visibility(panel);
        if panel == Panel::Preview {
            if visible {
                let pane = self
                    .parked_pane
                    .take()
                    .unwrap_or_else(|| {
                        Box::new(PreviewPane::new(TargetId::PANE)) as Box<dyn RenderTarget>
                    });
                self.preview.attach(pane);
            } else {
                self.parked_pane = self.preview.detach(TargetId::PANE);
            }
        }
        visible
    }

    // ── Drag ────────────────────────────────────

    /// Pointer bindings for one resize handle.
    pub fn drag_handlers(&mut self, handle: HandleId) -> DragHandlers<'_> {
        DragHandlers {
            layout: &mut self.layout,
            handle,
        }
    }

    /// Start a drag from raw pointer coordinates, if they land on a handle.
    pub fn begin_drag_at(&mut self, position: Vec2, container: Rect) -> Option<HandleId> {
        self.layout.begin_drag_at(position, container)
    }

    pub fn is_resizing(&self) -> bool {
        self.layout.is_resizing()
    }

    pub fn cursor(&self) -> CursorHint {
        self.layout.cursor()
    }

    // ──────────────────────────────────────────────
    // Sources and preview
    // ──────────────────────────────────────────────

    pub fn active_tab(&self) -> Language {
        self.sources.active_tab()
    }

    pub fn set_active_tab(&mut self, language: Language) {
        self.sources.set_active_tab(language);
    }

    pub fn source(&self, language: Language) -> &str {
        self.sources.text(language)
    }

    pub fn sources(&self) -> &SourceBuffer {
        &self.sources
    }

    /// Replace one tab's text and restart the preview debounce.
    pub fn set_source_text(
        &mut self,
        language: Language,
        text: impl Into<String>,
        now: Instant,
    ) -> RenderTicket {
        self.sources.set_text(language, text);
        self.preview.schedule(now)
    }

    /// Replace the active tab's text; the editor surface calls this.
    pub fn edit_active(&mut self, text: impl Into<String>, now: Instant) -> RenderTicket {
        self.sources.edit_active(text);
        self.preview.schedule(now)
    }

    /// Compose and render now, without waiting for the debounce.
    pub fn trigger_manual_refresh(&mut self) {
        self.preview.refresh(&self.sources);
    }

    /// Deliver a timer callback. Renders only if `ticket` is still current.
    pub fn fire(&mut self, ticket: RenderTicket) -> bool {
        self.preview.fire(ticket, &self.sources)
    }

    /// Render if the pending ticket is due at `now`.
    pub fn poll(&mut self, now: Instant) -> bool {
        self.preview.poll(now, &self.sources)
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.preview.next_deadline()
    }

    /// Attach a target. A pane target supplied while the Preview panel is
    /// hidden is parked until the panel is shown.
    pub fn attach_target(&mut self, target: Box<dyn RenderTarget>) {
        if target.id() == TargetId::PANE && !self.is_visible(Panel::Preview) {
            self.parked_pane = Some(target);
        } else {
            self.preview.attach(target);
        }
    }

    pub fn detach_target(&mut self, id: TargetId) -> Option<Box<dyn RenderTarget>> {
        if id == TargetId::PANE && self.parked_pane.is_some() {
            return self.parked_pane.take();
        }
        self.preview.detach(id)
    }

    pub fn preview(&self) -> &PreviewRenderer {
        &self.preview
    }

    /// Document currently shown by target `id`, if it keeps one.
    pub fn preview_document(&self, id: TargetId) -> Option<&Document> {
        self.preview.target(id).and_then(|t| t.document())
    }

    // ──────────────────────────────────────────────
    // Presentation
    // ──────────────────────────────────────────────

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggle();
        self.theme
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    /// Open or close the fullscreen preview. Opening renders the current
    /// sources so both targets show the same document.
    pub fn toggle_fullscreen(&mut self) -> bool {
        self.fullscreen = !self.fullscreen;
        if self.fullscreen {
            self.preview
                .attach(Box::new(PreviewPane::new(TargetId::FULLSCREEN)));
            self.preview.refresh(&self.sources);
        } else {
            self.preview.detach(TargetId::FULLSCREEN);
        }
        log::debug!("Fullscreen preview {}", if self.fullscreen { "opened" } else { "closed" });
        self.fullscreen
    }

    // ── Video ───────────────────────────────────

    pub fn video_id(&self) -> Option<&VideoId> {
        self.video.as_ref()
    }

    /// Load a video from a pasted URL. Invalid input leaves the current video
    /// in place.
    pub fn load_video(&mut self, url: &str) -> Result<&VideoId, VideoError> {
        let id = extract_video_id(url)?;
        log::info!("Loaded video {}", id);
        Ok(&*self.video.insert(id))
    }

    /// Pick the initial video from page query parameters. Returns whether one
    /// was found.
    pub fn load_video_from_query(&mut self, query: &str) -> bool {
        match VideoParams::from_query(query).initial_video_id() {
            Some(id) => {
                self.video = Some(id);
                true
            }
            None => false,
        }
    }

    // ──────────────────────────────────────────────
    // Commands
    // ──────────────────────────────────────────────

    pub fn execute(&mut self, command: Command) {
        log::debug!("Command {}", command.action_key());
        match command {
            Command::SetActiveTab(language) => self.set_active_tab(language),
            Command::Refresh => self.trigger_manual_refresh(),
            Command::ToggleVisibility(panel) => {
                self.toggle_visibility(panel);
            }
            Command::ResetWeights => self.reset_weights(),
            Command::ToggleTheme => {
                self.toggle_theme();
            }
            Command::ToggleFullscreen => {
                self.toggle_fullscreen();
            }
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

// ──────────────────────────────────────────────
// DragHandlers
// ──────────────────────────────────────────────

/// Pointer down/move/up/cancel bindings for a single handle. Moves and ups
/// are no-ops unless this handle's drag is the active one.
pub struct DragHandlers<'a> {
    layout: &'a mut PanelLayout,
    handle: HandleId,
}

impl DragHandlers<'_> {
    pub fn handle(&self) -> HandleId {
        self.handle
    }

    pub fn pointer_down(&mut self, pointer_x: f32) -> bool {
        self.layout.begin_drag(self.handle, pointer_x)
    }

    pub fn pointer_move(&mut self, pointer_x: f32, container_width: Option<f32>) -> MoveOutcome {
        if !self.owns_drag() {
            return MoveOutcome::Ignored;
        }
        self.layout.drag_border(pointer_x, container_width)
    }

    pub fn pointer_up(&mut self) -> bool {
        self.owns_drag() && self.layout.end_drag()
    }

    /// Pointer capture lost.
    pub fn pointer_cancel(&mut self) -> bool {
        self.owns_drag() && self.layout.cancel_drag()
    }

    fn owns_drag(&self) -> bool {
        self.layout
            .drag_session()
            .is_some_and(|s| s.handle == self.handle)
    }
}
