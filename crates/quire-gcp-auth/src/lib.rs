//! Google service-account authentication for Quire.
//!
//! Loads a service-account key (optionally from a named section of a larger
//! JSON file), signs an RS256 JWT assertion and exchanges it for an OAuth2
//! access token. Tokens are cached until shortly before they expire.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod key;
pub mod token;

pub use error::{AuthError, Result};
pub use key::{DEFAULT_TOKEN_URI, ServiceAccountKey};
pub use token::{DRIVE_SCOPE, TokenProvider};
