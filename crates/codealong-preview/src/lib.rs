// codealong-preview: composes the three editor sources into one document and
// loads it into every live render target, debounced on edits.

pub mod compose;
pub mod debounce;
pub mod target;

use std::time::{Duration, Instant};

use codealong_editor::SourceBuffer;

pub use compose::{compose, Document};
pub use debounce::{Debouncer, RenderTicket, DEFAULT_DELAY};
pub use target::{FileTarget, PreviewPane, RenderTarget, Sandbox, TargetError, TargetId};

/// Owns the runtime set of render targets and the debounce state.
pub struct PreviewRenderer {
    targets: Vec<Box<dyn RenderTarget>>,
    debouncer: Debouncer,
    last_document: Option<Document>,
    passes: u64,
}

impl PreviewRenderer {
    pub fn new(delay: Duration) -> Self {
        Self {
            targets: Vec::new(),
            debouncer: Debouncer::new(delay),
            last_document: None,
            passes: 0,
        }
    }

    // ── Targets ─────────────────────────────────

    /// Add a target, replacing any existing target with the same id. A target
    /// attached after a render immediately receives the current document so
    /// it never shows stale or empty content next to its siblings.
    pub fn attach(&mut self, mut target: Box<dyn RenderTarget>) {
        if let Some(doc) = &self.last_document {
            if let Err(e) = target.load_document(doc) {
                log::warn!("Preview target {:?}: {}", target.id(), e);
            }
        }
        let id = target.id();
        self.targets.retain(|t| t.id() != id);
        self.targets.push(target);
        log::debug!("Attached preview target {:?} ({} live)", id, self.targets.len());
    }

    pub fn detach(&mut self, id: TargetId) -> Option<Box<dyn RenderTarget>> {
        let idx = self.targets.iter().position(|t| t.id() == id)?;
        log::debug!("Detached preview target {:?}", id);
        Some(self.targets.remove(idx))
    }

    pub fn has_target(&self, id: TargetId) -> bool {
        self.targets.iter().any(|t| t.id() == id)
    }

    pub fn target(&self, id: TargetId) -> Option<&dyn RenderTarget> {
        self.targets
            .iter()
            .find(|t| t.id() == id)
            .map(|t| &**t)
    }

    pub fn target_ids(&self) -> Vec<TargetId> {
        self.targets.iter().map(|t| t.id()).collect()
    }

    // ── Debounce ────────────────────────────────

    /// Called on every source mutation.
    pub fn schedule(&mut self, now: Instant) -> RenderTicket {
        self.debouncer.schedule(now)
    }

    /// Host timer callback for `ticket`. Renders only if no newer edit
    /// superseded it. Returns whether a pass ran.
    pub fn fire(&mut self, ticket: RenderTicket, buffer: &SourceBuffer) -> bool {
        if !self.debouncer.fire(ticket) {
            log::trace!("Dropping superseded render ticket #{}", ticket.seq());
            return false;
        }
        self.render(buffer);
        true
    }

    /// Event-loop alternative to `fire`: renders once the pending deadline
    /// has passed.
    pub fn poll(&mut self, now: Instant, buffer: &SourceBuffer) -> bool {
        if !self.debouncer.poll(now) {
            return false;
        }
        self.render(buffer);
        true
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.debouncer.next_deadline()
    }

    pub fn delay(&self) -> Duration {
        self.debouncer.delay()
    }

    // ── Rendering ───────────────────────────────

    /// Manual refresh: render now, bypassing the timer. A pending ticket stays
    /// armed; when it fires it renders the same (current) buffer again.
    pub fn refresh(&mut self, buffer: &SourceBuffer) {
        self.render(buffer);
    }

    /// One compose + load pass over every live target. A failing target is
    /// logged and skipped; the others still receive the document.
    fn render(&mut self, buffer: &SourceBuffer) {
        let document = compose(buffer);
        for target in &mut self.targets {
            if let Err(e) = target.load_document(&document) {
                log::warn!("Preview target {:?}: {}", target.id(), e);
            }
        }
        self.passes += 1;
        log::debug!(
            "Preview pass #{}: {} bytes to {} target(s)",
            self.passes,
            document.len(),
            self.targets.len()
        );
        self.last_document = Some(document);
    }

    pub fn last_document(&self) -> Option<&Document> {
        self.last_document.as_ref()
    }

    /// Number of completed render passes.
    pub fn passes(&self) -> u64 {
        self.passes
    }
}

impl Default for PreviewRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_DELAY)
    }
}
