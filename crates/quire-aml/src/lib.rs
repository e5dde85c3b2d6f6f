//! ArchieML record parser.
//!
//! Implements [`RecordParser`] for the ArchieML subset used in Quire
//! documents: `key: value` pairs (with dotted keys), multi-line values closed
//! by `:end`, `{object}` and `[array]` scopes (string arrays of `* item`
//! lines and object arrays delimited by their first key), `:skip` /
//! `:endskip` and `:ignore`. Lines that match none of these are free text
//! and only matter inside a multi-line value.
//!
//! # Example
//!
//! ```rust
//! use quire_aml::ArchieParser;
//! use quire_core::{RecordParser, Value};
//!
//! let text = "title: Hello\n[tags]\n* rust\n* docs\n[]\n";
//! let record = ArchieParser::new().parse(text).unwrap();
//!
//! assert_eq!(record.get("title"), Some(&Value::from("Hello")));
//! assert_eq!(
//!     record.get("tags"),
//!     Some(&Value::Array(vec![Value::from("rust"), Value::from("docs")]))
//! );
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod line;
mod parser;

use quire_core::{Record, RecordParser, Result};

/// ArchieML implementation of [`RecordParser`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ArchieParser;

impl ArchieParser {
    /// Creates a parser.
    pub fn new() -> Self {
        Self
    }
}

impl RecordParser for ArchieParser {
    fn parse(&self, text: &str) -> Result<Record> {
        let record = parser::Parser::new().parse(text)?;
        tracing::trace!(keys = record.len(), "Parsed ArchieML");
        Ok(record)
    }
}

// ============================================================================
// Tests
// ============================================================================
