use std::fmt;

use codealong_core::Language;
use codealong_editor::SourceBuffer;

/// One self-contained executable document built from the three sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document(String);

impl Document {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Markup first, then the style block, then the script block.
/// Fragments are inserted verbatim: broken markup is the document's problem,
/// contained by the target's sandbox.
pub fn compose(buffer: &SourceBuffer) -> Document {
    let html = buffer.text(Language::Html);
    let css = buffer.text(Language::Css);
    let js = buffer.text(Language::JavaScript);

    let mut out = String::with_capacity(html.len() + css.len() + js.len() + 48);
    out.push_str(html);
    out.push_str("\n<style>");
    out.push_str(css);
    out.push_str("</style>\n<script>");
    out.push_str(js);
    out.push_str("</script>\n");
    Document(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fragments_appear_in_fixed_order() {
        let mut buf = SourceBuffer::new();
        buf.set_text(Language::JavaScript, "alert(1)");
        buf.set_text(Language::Html, "<h1>hi</h1>");
        buf.set_text(Language::Css, "h1{color:red}");

        let doc = compose(&buf);
        assert_eq!(
            doc.as_str(),
            "<h1>hi</h1>\n<style>h1{color:red}</style>\n<script>alert(1)</script>\n"
        );
    }

    #[test]
    fn empty_sources_still_produce_blocks() {
        let doc = compose(&SourceBuffer::new());
        assert_eq!(doc.as_str(), "\n<style></style>\n<script></script>\n");
    }

    #[test]
    fn malformed_markup_passes_through() {
        let mut buf = SourceBuffer::new();
        buf.set_text(Language::Html, "<div><span");
        assert!(compose(&buf).as_str().starts_with("<div><span\n<style>"));
    }
}
