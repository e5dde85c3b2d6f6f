//! Quire: Google Docs tabs to structured ArchieML records, umbrella crate.
//!
//! Re-exports the Quire components and wires the default parser and
//! renderer together. Enable the `gdocs` feature for the Google Docs
//! adapter and service-account authentication.
//!
//! ```rust
//! use quire::core::{Paragraph, Tab, TextRun};
//!
//! let tab = Tab::new(
//!     "t.0",
//!     "Main",
//!     vec![Paragraph::new(vec![TextRun::plain("key: value\n")])],
//! );
//! let record = quire::default_assembler().process_tab(&tab).unwrap();
//! assert_eq!(record.record["key"].as_str(), Some("value"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use std::sync::Arc;

pub use quire_aml as aml;
pub use quire_core as core;
pub use quire_markup as markup;

#[cfg(feature = "gdocs")]
pub use quire_adapter_gdocs as gdocs;

#[cfg(feature = "gdocs")]
pub use quire_gcp_auth as auth;

pub use quire_aml::ArchieParser;
pub use quire_core::{Error, Result, TabAssembler, TabRecord};
pub use quire_markup::MarkdownRenderer;

/// An assembler using [`ArchieParser`] and [`MarkdownRenderer`].
pub fn default_assembler() -> TabAssembler {
    TabAssembler::new(
        Arc::new(ArchieParser::new()),
        Arc::new(MarkdownRenderer::new()),
    )
}
