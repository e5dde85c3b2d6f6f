//! Service-account token exchange (OAuth2 JWT bearer grant).

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::error::{AuthError, Result};
use crate::key::ServiceAccountKey;

/// Default scope; covers reading Docs content.
pub const DRIVE_SCOPE: &str = "https://www.googleapis.com/auth/drive";

const GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Lifetime requested for each assertion; Google caps it at one hour.
const ASSERTION_LIFETIME_SECS: i64 = 3600;

/// Tokens are refreshed this long before they expire.
const REFRESH_MARGIN_SECS: i64 = 60;

#[derive(Debug, Serialize)]
struct Claims<'a> {
    iss: &'a str,
    scope: String,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
}

#[derive(Debug, Clone)]
struct CachedToken {
    token: String,
    expires_at: DateTime<Utc>,
}

impl CachedToken {
    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now + Duration::seconds(REFRESH_MARGIN_SECS) < self.expires_at
    }
}

/// Issues and caches access tokens for one service account.
pub struct TokenProvider {
    key: ServiceAccountKey,
    scopes: Vec<String>,
    http: reqwest::Client,
    cached: Mutex<Option<CachedToken>>,
}

impl std::fmt::Debug for TokenProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenProvider")
            .field("client_email", &self.key.client_email)
            .field("scopes", &self.scopes)
            .finish_non_exhaustive()
    }
}

impl TokenProvider {
    /// Creates a provider for `key` requesting `scopes`.
    ///
    /// An empty scope list falls back to [`DRIVE_SCOPE`].
    pub fn new(key: ServiceAccountKey, scopes: Vec<String>) -> Self {
        Self::with_client(key, scopes, reqwest::Client::new())
    }

    /// Creates a provider that shares an existing HTTP client.
    pub fn with_client(key: ServiceAccountKey, scopes: Vec<String>, http: reqwest::Client) -> Self {
        let scopes = if scopes.is_empty() {
            vec![DRIVE_SCOPE.to_string()]
        } else {
            scopes
        };
        Self {
            key,
            scopes,
            http,
            cached: Mutex::new(None),
        }
    }

    /// The scopes this provider requests.
    pub fn scopes(&self) -> &[String] {
        &self.scopes
    }

    /// Returns a valid access token, exchanging a new assertion when the
    /// cached token is missing or about to expire.
    pub async fn access_token(&self) -> Result<String> {
        let mut cached = self.cached.lock().await;
        let now = Utc::now();

        if let Some(token) = cached.as_ref().filter(|t| t.is_fresh(now)) {
            tracing::trace!("Using cached access token");
            return Ok(token.token.clone());
        }

        let fresh = self.exchange(now).await?;
        let token = fresh.token.clone();
        *cached = Some(fresh);
        Ok(token)
    }

    /// Signs the RS256 assertion sent to the token endpoint.
    pub fn assertion(&self, now: DateTime<Utc>) -> Result<String> {
        let iat = now.timestamp();
        let claims = Claims {
            iss: &self.key.client_email,
            scope: self.scopes.join(" "),
            aud: &self.key.token_uri,
            iat,
            exp: iat + ASSERTION_LIFETIME_SECS,
        };

        let mut header = Header::new(Algorithm::RS256);
        header.kid = self.key.private_key_id.clone();
        let signing_key = EncodingKey::from_rsa_pem(self.key.private_key.as_bytes())?;
        Ok(encode(&header, &claims, &signing_key)?)
    }

    async fn exchange(&self, now: DateTime<Utc>) -> Result<CachedToken> {
        let assertion = self.assertion(now)?;
        tracing::debug!(
            client = %self.key.client_email,
            endpoint = %self.key.token_uri,
            "Requesting access token"
        );

        let response = self
            .http
            .post(&self.key.token_uri)
            .form(&[("grant_type", GRANT_TYPE), ("assertion", assertion.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AuthError::TokenExchange {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: TokenResponse = response.json().await?;
        let lifetime = parsed.expires_in.unwrap_or(ASSERTION_LIFETIME_SECS);
        tracing::debug!(expires_in = lifetime, "Access token issued");

        Ok(CachedToken {
            token: parsed.access_token,
            expires_at: now + Duration::seconds(lifetime),
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
