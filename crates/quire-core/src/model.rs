//! Document model: tabs, paragraphs, and styled text runs.
//!
//! This is the shape the pipeline reads. Retrieval adapters convert their
//! wire formats into these types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a document in the hosting service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    /// Creates a document ID from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for DocumentId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for DocumentId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Opaque identifier of a tab, carried through to the output unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TabId(String);

impl TabId {
    /// Creates a tab ID from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TabId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for TabId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A retrieved document: an ordered sequence of tabs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Document identifier, when known.
    pub id: Option<DocumentId>,
    /// Document title, when known.
    pub title: Option<String>,
    /// Top-level tabs in document order.
    pub tabs: Vec<Tab>,
}

impl Document {
    /// Creates a document from its top-level tabs.
    pub fn new(tabs: Vec<Tab>) -> Self {
        Self {
            id: None,
            title: None,
            tabs,
        }
    }

    /// Returns every tab, depth-first, each parent before its children.
    pub fn flattened_tabs(&self) -> Vec<&Tab> {
        fn walk<'a>(tabs: &'a [Tab], out: &mut Vec<&'a Tab>) {
            for tab in tabs {
                out.push(tab);
                walk(&tab.children, out);
            }
        }

        let mut out = Vec::new();
        walk(&self.tabs, &mut out);
        out
    }
}

/// One top-level section of a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tab {
    /// Tab label.
    pub title: String,
    /// Tab identifier.
    pub id: TabId,
    /// Paragraphs in body order.
    pub body: Vec<Paragraph>,
    /// Nested tabs.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Tab>,
}

impl Tab {
    /// Creates a tab with no child tabs.
    pub fn new(id: impl Into<TabId>, title: impl Into<String>, body: Vec<Paragraph>) -> Self {
        Self {
            title: title.into(),
            id: id.into(),
            body,
            children: Vec::new(),
        }
    }
}

/// A paragraph: a bullet flag and its text runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    /// Whether the paragraph is a list item.
    pub is_bullet: bool,
    /// Text runs in order.
    pub runs: Vec<TextRun>,
}

impl Paragraph {
    /// Creates a plain (non-bullet) paragraph.
    pub fn new(runs: Vec<TextRun>) -> Self {
        Self {
            is_bullet: false,
            runs,
        }
    }

    /// Creates a bullet paragraph.
    pub fn bullet(runs: Vec<TextRun>) -> Self {
        Self {
            is_bullet: true,
            runs,
        }
    }
}

/// A run of text sharing one style.
///
/// Only `bold` is interpreted; other style attributes are dropped when a
/// document is converted into this model.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextRun {
    /// Run text; empty for non-text paragraph elements.
    pub text: String,
    /// Whether the run is bold.
    pub bold: bool,
}

impl TextRun {
    /// Creates a plain run.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: false,
        }
    }

    /// Creates a bold run.
    pub fn bold(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: true,
        }
    }

    /// Creates the empty run used for non-text elements.
    pub fn empty() -> Self {
        Self::default()
    }
}
