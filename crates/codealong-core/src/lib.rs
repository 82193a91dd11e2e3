use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

// ──────────────────────────────────────────────
// Geometry
// ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

// ──────────────────────────────────────────────
// Panels
// ──────────────────────────────────────────────

/// One of the three side-by-side layout regions, in canonical left-to-right order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Panel {
    Video,
    Editor,
    Preview,
}

impl Panel {
    /// Canonical iteration order. Every consumer that walks panels uses this.
    pub const ALL: [Panel; 3] = [Panel::Video, Panel::Editor, Panel::Preview];

    pub fn index(self) -> usize {
        match self {
            Panel::Video => 0,
            Panel::Editor => 1,
            Panel::Preview => 2,
        }
    }

    /// Stable lowercase name, used in settings and keybinding action keys.
    pub fn name(self) -> &'static str {
        match self {
            Panel::Video => "video",
            Panel::Editor => "editor",
            Panel::Preview => "preview",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }
}

/// A fixed-size map with one value per panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PanelMap<T> {
    pub video: T,
    pub editor: T,
    pub preview: T,
}

impl<T> PanelMap<T> {
    pub const fn new(video: T, editor: T, preview: T) -> Self {
        Self { video, editor, preview }
    }

    pub fn from_fn(mut f: impl FnMut(Panel) -> T) -> Self {
        Self {
            video: f(Panel::Video),
            editor: f(Panel::Editor),
            preview: f(Panel::Preview),
        }
    }

    pub fn map<U>(&self, mut f: impl FnMut(Panel, &T) -> U) -> PanelMap<U> {
        PanelMap {
            video: f(Panel::Video, &self.video),
            editor: f(Panel::Editor, &self.editor),
            preview: f(Panel::Preview, &self.preview),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Panel, &T)> {
        Panel::ALL.into_iter().map(move |p| (p, &self[p]))
    }
}

impl PanelMap<f64> {
    pub fn sum(&self) -> f64 {
        self.video + self.editor + self.preview
    }
}

impl<T> Index<Panel> for PanelMap<T> {
    type Output = T;

    fn index(&self, panel: Panel) -> &T {
        match panel {
            Panel::Video => &self.video,
            Panel::Editor => &self.editor,
            Panel::Preview => &self.preview,
        }
    }
}

impl<T> IndexMut<Panel> for PanelMap<T> {
    fn index_mut(&mut self, panel: Panel) -> &mut T {
        match panel {
            Panel::Video => &mut self.video,
            Panel::Editor => &mut self.editor,
            Panel::Preview => &mut self.preview,
        }
    }
}

// ──────────────────────────────────────────────
// Resize handles
// ──────────────────────────────────────────────

/// The draggable boundary between two adjacent panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HandleId {
    /// Between video and editor (A-B).
    VideoEditor,
    /// Between editor and preview (B-C).
    EditorPreview,
}

impl HandleId {
    pub const ALL: [HandleId; 2] = [HandleId::VideoEditor, HandleId::EditorPreview];

    /// The (left, right) panels this handle separates.
    pub fn panels(self) -> (Panel, Panel) {
        match self {
            HandleId::VideoEditor => (Panel::Video, Panel::Editor),
            HandleId::EditorPreview => (Panel::Editor, Panel::Preview),
        }
    }

    /// The panel not adjacent to this handle.
    pub fn fixed_panel(self) -> Panel {
        match self {
            HandleId::VideoEditor => Panel::Preview,
            HandleId::EditorPreview => Panel::Video,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            HandleId::VideoEditor => "video-editor",
            HandleId::EditorPreview => "editor-preview",
        }
    }
}

// ──────────────────────────────────────────────
// Source languages
// ──────────────────────────────────────────────

/// Editor tab key: markup, style, or script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Html,
    Css,
    JavaScript,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::Html, Language::Css, Language::JavaScript];

    pub fn key(self) -> &'static str {
        match self {
            Language::Html => "html",
            Language::Css => "css",
            Language::JavaScript => "javascript",
        }
    }

    /// Tab caption.
    pub fn label(self) -> &'static str {
        match self {
            Language::Html => "HTML",
            Language::Css => "CSS",
            Language::JavaScript => "JavaScript",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.key() == key)
    }
}

// ──────────────────────────────────────────────
// Input
// ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Escape,
    Tab,
    F(u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

/// Cursor affordance the host should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorHint {
    #[default]
    Default,
    ColResize,
}
