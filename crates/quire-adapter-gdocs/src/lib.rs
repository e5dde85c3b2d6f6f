//! Google Docs source adapter for Quire.
//!
//! Fetches a document with all tab content from the Docs API v1 and converts
//! the response into the [`quire_core::Document`] model. A [`FileSource`]
//! reads saved responses for offline conversion.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod api;
pub mod convert;
pub mod error;
pub mod source;

pub use convert::convert_document;
pub use error::{Error, Result};
pub use source::{DEFAULT_BASE_URL, FileSource, GoogleDocsSource};
