// codealong-editor: the three source buffers (markup, style, script) and the
// active-tab binding of the editor surface.

pub mod starter;

use std::fs;
use std::io;
use std::path::Path;

use codealong_core::Language;

/// Source text keyed by language tab. Content is never validated.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceBuffer {
    html: String,
    css: String,
    javascript: String,
    active: Language,
    /// Bumped on every mutation; lets consumers detect changes cheaply.
    generation: u64,
}

impl SourceBuffer {
    /// An empty buffer with the HTML tab active.
    pub fn new() -> Self {
        Self {
            html: String::new(),
            css: String::new(),
            javascript: String::new(),
            active: Language::Html,
            generation: 0,
        }
    }

    /// A buffer pre-filled with the starter project.
    pub fn with_starter() -> Self {
        Self {
            html: starter::HTML.to_string(),
            css: starter::CSS.to_string(),
            javascript: starter::JAVASCRIPT.to_string(),
            ..Self::new()
        }
    }

    pub fn text(&self, language: Language) -> &str {
        match language {
            Language::Html => &self.html,
            Language::Css => &self.css,
            Language::JavaScript => &self.javascript,
        }
    }

    fn slot_mut(&mut self, language: Language) -> &mut String {
        match language {
            Language::Html => &mut self.html,
            Language::Css => &mut self.css,
            Language::JavaScript => &mut self.javascript,
        }
    }

    /// Replace the whole entry for one tab.
    pub fn set_text(&mut self, language: Language, text: impl Into<String>) {
        *self.slot_mut(language) = text.into();
        self.generation += 1;
    }

    pub fn active_tab(&self) -> Language {
        self.active
    }

    /// Rebind the editor surface. Not a content mutation, so the generation
    /// is left alone.
    pub fn set_active_tab(&mut self, language: Language) {
        self.active = language;
    }

    pub fn active_text(&self) -> &str {
        self.text(self.active)
    }

    /// Editor change callback: replaces the active tab's text.
    pub fn edit_active(&mut self, text: impl Into<String>) {
        self.set_text(self.active, text);
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Replace one tab's content with a file from disk.
    pub fn load_file(&mut self, language: Language, path: &Path) -> io::Result<()> {
        let content = fs::read_to_string(path)?;
        log::debug!(
            "Loaded {} source from {} ({} bytes)",
            language.label(),
            path.display(),
            content.len()
        );
        self.set_text(language, content);
        Ok(())
    }
}

impl Default for SourceBuffer {
    fn default() -> Self {
        Self::with_starter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_text_replaces_only_one_tab() {
        let mut buf = SourceBuffer::new();
        buf.set_text(Language::Css, "body { color: red; }");
        assert_eq!(buf.text(Language::Css), "body { color: red; }");
        assert_eq!(buf.text(Language::Html), "");
        assert_eq!(buf.text(Language::JavaScript), "");
        assert_eq!(buf.generation(), 1);
    }

    #[test]
    fn edit_active_follows_tab_selection() {
        let mut buf = SourceBuffer::new();
        buf.set_active_tab(Language::JavaScript);
        buf.edit_active("console.log(1)");
        assert_eq!(buf.text(Language::JavaScript), "console.log(1)");
        assert_eq!(buf.active_text(), "console.log(1)");

        buf.set_active_tab(Language::Html);
        assert_eq!(buf.active_text(), "");
    }

    #[test]
    fn tab_switch_is_not_a_mutation() {
        let mut buf = SourceBuffer::new();
        buf.set_active_tab(Language::Css);
        buf.set_active_tab(Language::Css);
        assert_eq!(buf.generation(), 0);
    }

    #[test]
    fn invalid_markup_is_accepted() {
        let mut buf = SourceBuffer::new();
        buf.set_text(Language::Html, "<div><p>unterminated");
        assert_eq!(buf.text(Language::Html), "<div><p>unterminated");
    }

    #[test]
    fn starter_fills_every_tab() {
        let buf = SourceBuffer::with_starter();
        for lang in Language::ALL {
            assert!(!buf.text(lang).is_empty(), "{} starter is empty", lang.label());
        }
        assert_eq!(buf.active_tab(), Language::Html);
    }

    #[test]
    fn load_file_reads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.js");
        std::fs::write(&path, "let x = 1;").unwrap();

        let mut buf = SourceBuffer::new();
        buf.load_file(Language::JavaScript, &path).unwrap();
        assert_eq!(buf.text(Language::JavaScript), "let x = 1;");
        assert_eq!(buf.generation(), 1);

        assert!(buf
            .load_file(Language::Css, &dir.path().join("missing.css"))
            .is_err());
        assert_eq!(buf.generation(), 1);
    }
}
