//! Collaborator seams: record parsing, markup rendering, and retrieval.

use async_trait::async_trait;

use crate::error::Result;
use crate::model::{Document, DocumentId};
use crate::value::Record;

/// Parses flattened tab text into a nested record.
///
/// Implementations report malformed input as [`Error::Grammar`](crate::Error::Grammar).
pub trait RecordParser: Send + Sync {
    /// Parses `text` into a record.
    fn parse(&self, text: &str) -> Result<Record>;
}

/// Renders lightweight markup into presentation markup.
///
/// Both entry points are pure string transforms.
pub trait MarkupRenderer: Send + Sync {
    /// Span-level rendering: no wrapping block elements.
    fn render_inline(&self, text: &str) -> Result<String>;

    /// Full block-level rendering (paragraphs, lists, headings, ...).
    fn render_block(&self, text: &str) -> Result<String>;
}

/// Retrieves a document by identifier.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Fetches the document. Failures are fatal for the whole run.
    async fn fetch(&self, id: &DocumentId) -> Result<Document>;
}
