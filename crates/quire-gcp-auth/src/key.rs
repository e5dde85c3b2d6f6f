//! Service-account key files.

use serde::Deserialize;
use std::path::Path;

use crate::error::{AuthError, Result};

/// Google's OAuth2 token endpoint.
pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

/// The fields of a service-account JSON key that token exchange needs.
#[derive(Clone, Deserialize)]
pub struct ServiceAccountKey {
    /// Service-account email, used as the JWT issuer.
    pub client_email: String,
    /// PEM-encoded RSA private key.
    pub private_key: String,
    /// Key identifier, sent as the JWT `kid`.
    #[serde(default)]
    pub private_key_id: Option<String>,
    /// Token endpoint; defaults to Google's.
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

impl std::fmt::Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("client_email", &self.client_email)
            .field("private_key_id", &self.private_key_id)
            .field("token_uri", &self.token_uri)
            .finish_non_exhaustive()
    }
}

impl ServiceAccountKey {
    /// Loads a key from a JSON file.
    ///
    /// With `section`, the key is read from that top-level member instead of
    /// the file root, e.g. `{"archie": {"client_email": ..., ...}}`.
    pub fn from_file(path: &Path, section: Option<&str>) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AuthError::credentials(path, format!("cannot read key file: {e}")))?;
        Self::from_json(&content, section).map_err(|message| AuthError::credentials(path, message))
    }

    /// Parses a key from JSON text; the error is a plain description.
    pub fn from_json(content: &str, section: Option<&str>) -> std::result::Result<Self, String> {
        let mut value: serde_json::Value =
            serde_json::from_str(content).map_err(|e| format!("not valid JSON: {e}"))?;

        if let Some(name) = section {
            value = value
                .get_mut(name)
                .map(serde_json::Value::take)
                .ok_or_else(|| format!("no '{name}' section"))?;
        }

        let key: Self =
            serde_json::from_value(value).map_err(|e| format!("incomplete key: {e}"))?;
        if key.client_email.trim().is_empty() {
            return Err("client_email is empty".to_string());
        }
        if key.private_key.trim().is_empty() {
            return Err("private_key is empty".to_string());
        }
        Ok(key)
    }
}
