// Render targets: sandboxed containers that display the composed document.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::compose::Document;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TargetId(pub u64);

impl TargetId {
    /// The preview panel inside the layout.
    pub const PANE: TargetId = TargetId(1);
    /// The enlarged overlay shown while fullscreen preview is open.
    pub const FULLSCREEN: TargetId = TargetId(2);
}

/// Isolation policy for a target. Script execution is allowed; navigating
/// the parent (top-level) context is never granted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sandbox {
    pub allow_scripts: bool,
    pub allow_same_origin: bool,
}

impl Sandbox {
    pub const fn preview() -> Self {
        Self {
            allow_scripts: true,
            allow_same_origin: true,
        }
    }

    /// Value for an iframe `sandbox` attribute. Top-level navigation is never
    /// granted.
    pub fn attribute(&self) -> String {
        let mut tokens = Vec::new();
        if self.allow_scripts {
            tokens.push("allow-scripts");
        }
        if self.allow_same_origin {
            tokens.push("allow-same-origin");
        }
        tokens.join(" ")
    }
}

impl Default for Sandbox {
    fn default() -> Self {
        Self::preview()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TargetError {
    #[error("failed to write preview to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Anything that can host the preview document.
pub trait RenderTarget {
    fn id(&self) -> TargetId;

    fn sandbox(&self) -> Sandbox {
        Sandbox::preview()
    }

    /// Replace the target's entire content with `document`.
    fn load_document(&mut self, document: &Document) -> Result<(), TargetError>;

    /// The document currently shown, when the target keeps it in memory.
    fn document(&self) -> Option<&Document> {
        None
    }
}

// ──────────────────────────────────────────────
// PreviewPane: in-memory target
// ──────────────────────────────────────────────

/// Holds the last loaded document. Used for the layout's preview panel and
/// the fullscreen overlay; the host reads `document()` when painting.
#[derive(Debug)]
pub struct PreviewPane {
    id: TargetId,
    sandbox: Sandbox,
    document: Option<Document>,
    /// Bumped on every load, for dirty tracking by the host.
    generation: u64,
}

impl PreviewPane {
    pub fn new(id: TargetId) -> Self {
        Self {
            id,
            sandbox: Sandbox::preview(),
            document: None,
            generation: 0,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl RenderTarget for PreviewPane {
    fn id(&self) -> TargetId {
        self.id
    }

    fn sandbox(&self) -> Sandbox {
        self.sandbox
    }

    fn load_document(&mut self, document: &Document) -> Result<(), TargetError> {
        self.document = Some(document.clone());
        self.generation = self.generation.wrapping_add(1);
        Ok(())
    }

    fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }
}

// ──────────────────────────────────────────────
// FileTarget: preview page on disk
// ──────────────────────────────────────────────

/// Writes a host page that embeds the document in a sandboxed iframe via
/// `srcdoc`, so opening the file in a browser gives the same isolation as
/// the in-app preview.
#[derive(Debug)]
pub struct FileTarget {
    id: TargetId,
    path: PathBuf,
    sandbox: Sandbox,
}

impl FileTarget {
    pub fn new(id: TargetId, path: impl Into<PathBuf>) -> Self {
        Self {
            id,
            path: path.into(),
            sandbox: Sandbox::preview(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RenderTarget for FileTarget {
    fn id(&self) -> TargetId {
        self.id
    }

    fn sandbox(&self) -> Sandbox {
        self.sandbox
    }

    fn load_document(&mut self, document: &Document) -> Result<(), TargetError> {
        let page = sandboxed_page(document, self.sandbox);
        fs::write(&self.path, page).map_err(|source| TargetError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

/// Build a standalone page embedding `document` in a sandboxed iframe.
pub fn sandboxed_page(document: &Document, sandbox: Sandbox) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"UTF-8\"><title>Preview</title>\n\
         <style>html,body,iframe{{margin:0;border:0;width:100%;height:100%;}}</style>\n\
         </head>\n<body>\n<iframe title=\"Code Preview\" sandbox=\"{}\" srcdoc=\"{}\"></iframe>\n\
         </body>\n</html>\n",
        sandbox.attribute(),
        escape_attribute(document.as_str())
    )
}

fn escape_attribute(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}
