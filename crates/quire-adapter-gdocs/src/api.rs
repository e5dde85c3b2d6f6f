//! Serde model of the Docs API v1 `documents.get` response.
//!
//! Only the fields the conversion reads are modelled; everything else in the
//! response is ignored.

use serde::Deserialize;

/// A document as returned with `includeTabsContent=true`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Document id.
    #[serde(default)]
    pub document_id: Option<String>,
    /// Document title.
    #[serde(default)]
    pub title: Option<String>,
    /// Top-level tabs; absent when tab content was not requested.
    #[serde(default)]
    pub tabs: Option<Vec<Tab>>,
}

/// One tab and its nested tabs.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tab {
    /// Id, title and position.
    #[serde(default)]
    pub tab_properties: TabProperties,
    /// Body of a document tab.
    #[serde(default)]
    pub document_tab: Option<DocumentTab>,
    /// Nested tabs.
    #[serde(default)]
    pub child_tabs: Vec<Tab>,
}

/// Tab metadata.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabProperties {
    /// Tab id.
    #[serde(default)]
    pub tab_id: String,
    /// Tab label.
    #[serde(default)]
    pub title: String,
    /// Zero-based position among siblings.
    #[serde(default)]
    pub index: Option<u32>,
}

/// The content of a document tab.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DocumentTab {
    /// Tab body.
    #[serde(default)]
    pub body: Option<Body>,
}

/// A body: an ordered list of structural elements.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Body {
    /// Structural elements in order.
    #[serde(default)]
    pub content: Vec<StructuralElement>,
}

/// A structural element. Only paragraphs are read; section breaks, tables
/// and tables of contents have no `paragraph`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StructuralElement {
    /// Paragraph content, if this element is a paragraph.
    #[serde(default)]
    pub paragraph: Option<Paragraph>,
}

/// A paragraph.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Paragraph {
    /// Inline elements in order.
    #[serde(default)]
    pub elements: Vec<ParagraphElement>,
    /// Present when the paragraph is a list item.
    #[serde(default)]
    pub bullet: Option<Bullet>,
}

/// List membership of a paragraph.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bullet {
    /// List id.
    #[serde(default)]
    pub list_id: Option<String>,
    /// Nesting depth, absent at the top level.
    #[serde(default)]
    pub nesting_level: Option<u32>,
}

/// An inline paragraph element.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParagraphElement {
    /// Text content, if this element is a text run.
    #[serde(default)]
    pub text_run: Option<TextRun>,
}

/// A styled text run.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextRun {
    /// Run text, including any trailing newline.
    #[serde(default)]
    pub content: String,
    /// Run style.
    #[serde(default)]
    pub text_style: TextStyle,
}

/// Text style; only `bold` is read.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TextStyle {
    /// Bold flag.
    #[serde(default)]
    pub bold: Option<bool>,
}
