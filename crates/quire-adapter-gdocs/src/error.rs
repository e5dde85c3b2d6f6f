//! Error types for quire-adapter-gdocs

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for adapter operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while retrieving a document
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Access token could not be obtained
    #[error("Authentication failed: {0}")]
    Auth(#[from] quire_gcp_auth::AuthError),

    /// The API could not be reached
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The configured base URL cannot hold a document path
    #[error("Invalid Docs API base URL '{url}': {message}")]
    BaseUrl {
        /// Configured base URL
        url: String,
        /// What is wrong with it
        message: String,
    },

    /// The API answered with a non-success status
    #[error("Docs API returned HTTP {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, for diagnostics
        body: String,
    },

    /// The response is not a Docs API document
    #[error("Malformed document JSON: {0}")]
    Decode(#[from] serde_json::Error),

    /// The response has no `tabs` array
    #[error(
        "Document '{document}' has no tabs; request it with includeTabsContent=true"
    )]
    MissingTabs {
        /// Document id or title, for the message
        document: String,
    },

    /// A saved response could not be read
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        /// File path
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl From<Error> for quire_core::Error {
    fn from(err: Error) -> Self {
        quire_core::Error::retrieval_with_source(err.to_string(), err)
    }
}
