//! Error types for quire-gcp-auth

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for authentication operations
pub type Result<T> = std::result::Result<T, AuthError>;

/// Errors that can occur while obtaining an access token
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum AuthError {
    /// The service-account key could not be read or is incomplete
    #[error("Invalid credentials in {}: {message}", path.display())]
    Credentials {
        /// Key file path
        path: PathBuf,
        /// What is wrong with it
        message: String,
    },

    /// The JWT assertion could not be signed
    #[error("Failed to sign token assertion: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),

    /// The token endpoint could not be reached or returned garbage
    #[error("Token request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The token endpoint refused the assertion
    #[error("Token endpoint returned HTTP {status}: {body}")]
    TokenExchange {
        /// HTTP status code
        status: u16,
        /// Response body, for diagnostics
        body: String,
    },
}

impl AuthError {
    /// Creates a credentials error for a key file.
    pub fn credentials(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        AuthError::Credentials {
            path: path.into(),
            message: message.into(),
        }
    }
}
