//! Markdown rendering for Quire.
//!
//! Provides [`MarkdownRenderer`], a [`MarkupRenderer`] backed by
//! `pulldown-cmark`. Raw HTML in the input is passed through, so markup the
//! flattener emits (such as `<strong>`) survives rendering.
//!
//! # Modules
//!
//! - [`inline`]: neutralizing block syntax for span-level rendering
//!
//! # Example
//!
//! ```rust
//! use quire_core::MarkupRenderer;
//! use quire_markup::MarkdownRenderer;
//!
//! let renderer = MarkdownRenderer::new();
//! assert_eq!(renderer.render_inline("**hi**").unwrap(), "<strong>hi</strong>");
//! assert_eq!(renderer.render_block("**hi**").unwrap(), "<p><strong>hi</strong></p>");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod inline;

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd, html};
use quire_core::{MarkupRenderer, Result};

/// Markdown renderer with inline and block modes.
#[derive(Debug, Clone)]
pub struct MarkdownRenderer {
    block_options: Options,
    inline_options: Options,
}

impl MarkdownRenderer {
    /// Creates a renderer with tables and strikethrough enabled for blocks,
    /// and strikethrough for inline text.
    pub fn new() -> Self {
        let mut block_options = Options::empty();
        block_options.insert(Options::ENABLE_TABLES);
        block_options.insert(Options::ENABLE_STRIKETHROUGH);

        let mut inline_options = Options::empty();
        inline_options.insert(Options::ENABLE_STRIKETHROUGH);

        Self {
            block_options,
            inline_options,
        }
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkupRenderer for MarkdownRenderer {
    fn render_inline(&self, text: &str) -> Result<String> {
        let source = inline::neutralize_blocks(text);
        let mut seen_paragraph = false;

        // Paragraph tags go away; a paragraph break becomes a blank line.
        let events = Parser::new_ext(&source, self.inline_options).flat_map(|event| {
            let replacement: Vec<Event<'_>> = match event {
                Event::Start(Tag::Paragraph) => {
                    if std::mem::replace(&mut seen_paragraph, true) {
                        vec![Event::SoftBreak, Event::SoftBreak]
                    } else {
                        Vec::new()
                    }
                }
                Event::End(TagEnd::Paragraph) => Vec::new(),
                other => vec![other],
            };
            replacement
        });

        let mut out = String::with_capacity(text.len() + text.len() / 4);
        html::push_html(&mut out, events);
        Ok(out)
    }

    fn render_block(&self, text: &str) -> Result<String> {
        let parser = Parser::new_ext(text, self.block_options);
        let mut out = String::with_capacity(text.len() * 3 / 2);
        html::push_html(&mut out, parser);

        let trimmed_len = out.trim_end().len();
        out.truncate(trimmed_len);
        tracing::trace!(input = text.len(), output = out.len(), "Rendered block markup");
        Ok(out)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn inline(text: &str) -> String {
        MarkdownRenderer::new().render_inline(text).unwrap()
    }

    fn block(text: &str) -> String {
        MarkdownRenderer::new().render_block(text).unwrap()
    }

    // ------------------------------------------------------------------------
    // block mode
    // ------------------------------------------------------------------------

    #[test]
    fn test_block_paragraph_with_strong() {
        assert_eq!(block(" **hi**"), "<p><strong>hi</strong></p>");
    }

    #[test]
    fn test_block_heading_and_paragraph() {
        assert_eq!(block("# Title\n\nText"), "<h1>Title</h1>\n<p>Text</p>");
    }

    #[test]
    fn test_block_list() {
        assert_eq!(block("* a\n* b"), "<ul>\n<li>a</li>\n<li>b</li>\n</ul>");
    }

    #[test]
    fn test_block_strikethrough() {
        assert_eq!(block("~~gone~~"), "<p><del>gone</del></p>");
    }

    #[test]
    fn test_block_raw_html_passthrough() {
        assert_eq!(
            block("<strong>Bold</strong> text"),
            "<p><strong>Bold</strong> text</p>"
        );
    }

    #[test]
    fn test_block_empty() {
        assert_eq!(block(""), "");
        assert_eq!(block("  \n"), "");
    }

    // ------------------------------------------------------------------------
    // inline mode
    // ------------------------------------------------------------------------

    #[test]
    fn test_inline_emphasis() {
        assert_eq!(
            inline("**bold** and *em*"),
            "<strong>bold</strong> and <em>em</em>"
        );
    }

    #[test]
    fn test_inline_plain_text_unchanged() {
        assert_eq!(inline("value"), "value");
    }

    #[test]
    fn test_inline_link() {
        assert_eq!(
            inline("[site](https://example.com)"),
            "<a href=\"https://example.com\">site</a>"
        );
    }

    #[test]
    fn test_inline_escapes_html_specials_in_text() {
        assert_eq!(inline("a & b"), "a &amp; b");
    }

    #[test]
    fn test_inline_raw_html_passthrough() {
        assert_eq!(
            inline("<strong>Big</strong> news"),
            "<strong>Big</strong> news"
        );
    }

    #[test]
    fn test_inline_no_block_constructs() {
        assert_eq!(inline("# not a heading"), "# not a heading");
        assert_eq!(inline("1. first"), "1. first");
        assert_eq!(inline("- item"), "- item");
        assert_eq!(inline("> quote"), "&gt; quote");
        assert_eq!(inline("---"), "---");
    }

    #[test]
    fn test_inline_setext_underline_not_heading() {
        let html = inline("Heading\n--");
        assert!(!html.contains("<h2>"), "{html}");
        assert_eq!(html, "Heading\n--");
        assert_eq!(inline("Title\n="), "Title\n=");
    }

    #[test]
    fn test_inline_line_breaks_kept() {
        assert_eq!(inline("line one\nline two"), "line one\nline two");
        assert_eq!(inline("p1\n\np2"), "p1\n\np2");
    }

    #[test]
    fn test_inline_empty() {
        assert_eq!(inline(""), "");
    }
}
