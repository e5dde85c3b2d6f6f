#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! Quire Core Library
//!
//! Document model, record tree, and the per-tab pipeline that turns a tab of
//! styled paragraphs into a structured record:
//!
//! 1. [`flatten`] the tab's paragraphs into one markup string
//! 2. pull named `+name: ... :end` blocks out with [`extras`]
//! 3. parse the remainder with a [`RecordParser`]
//! 4. [`markdownify`] every string leaf
//! 5. merge the rendered extras on top ([`assemble`])
//!
//! Parsing, rendering and retrieval are collaborators behind the traits in
//! [`traits`]; this crate performs no I/O.

pub mod assemble;
pub mod error;
pub mod extras;
pub mod flatten;
pub mod markdownify;
pub mod model;
pub mod traits;
pub mod value;

mod proptests;

// Re-exports for convenience
pub use assemble::{TabAssembler, TabRecord};
pub use error::{Error, Result};
pub use extras::{Extraction, extract};
pub use flatten::flatten;
pub use markdownify::markdownify;
pub use model::{Document, DocumentId, Paragraph, Tab, TabId, TextRun};
pub use traits::{DocumentSource, MarkupRenderer, RecordParser};
pub use value::{Record, Value};
