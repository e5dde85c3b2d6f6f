//! Quire configuration file.
//!
//! Resolution order: an explicit `--config` path, then `quire.toml` in the
//! working directory, then `<config dir>/quire/config.toml`. A missing
//! implicit file means defaults.

use std::path::{Path, PathBuf};

use quire::core::assemble::DEFAULT_RECORD_KEY;
use quire::core::{Error, Result};
use quire::gdocs::DEFAULT_BASE_URL;
use serde::{Deserialize, Serialize};

/// Project name, used for the config directory and messages.
pub const PROJECT_NAME: &str = "quire";

/// Config file name looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "quire.toml";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuireConfig {
    /// Which document to read.
    pub document: DocumentConfig,
    /// Service-account credentials.
    pub credentials: CredentialsConfig,
    /// Where and how to write records.
    pub output: OutputConfig,
    /// Docs API endpoint.
    pub api: ApiConfig,
}

/// `[document]`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentConfig {
    /// Document id; falls back to the `archie` field of `package.json`.
    pub id: String,
    /// Process nested tabs as well, depth-first.
    pub include_child_tabs: bool,
}

/// `[credentials]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CredentialsConfig {
    /// Service-account key file.
    pub path: PathBuf,
    /// Top-level member of the key file holding the key; empty for none.
    pub section: String,
    /// OAuth scopes to request.
    pub scopes: Vec<String>,
}

impl Default for CredentialsConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("keys.json"),
            section: "archie".to_string(),
            scopes: vec![quire::auth::DRIVE_SCOPE.to_string()],
        }
    }
}

impl CredentialsConfig {
    /// The key section, if one is configured.
    pub fn section(&self) -> Option<&str> {
        Some(self.section.trim()).filter(|s| !s.is_empty())
    }
}

/// `[output]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output file; `-` writes to stdout.
    pub path: PathBuf,
    /// Key each tab's record is stored under.
    pub record_key: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("src/data/archie.json"),
            record_key: DEFAULT_RECORD_KEY.to_string(),
        }
    }
}

impl OutputConfig {
    /// Whether output goes to stdout.
    pub fn is_stdout(&self) -> bool {
        self.path.as_os_str() == "-"
    }
}

/// `[api]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Docs API base URL.
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl QuireConfig {
    /// `<config dir>/quire/config.toml`, if the platform has a config dir.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(PROJECT_NAME).join("config.toml"))
    }

    /// Resolves the config file path relative to `cwd`.
    pub fn resolve_config_path(explicit: Option<&Path>, cwd: &Path) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(path.to_path_buf());
        }
        let local = cwd.join(LOCAL_CONFIG_FILE);
        if local.is_file() {
            return Some(local);
        }
        Self::default_config_path()
    }

    /// Loads configuration, falling back to defaults when no file exists.
    ///
    /// An explicit path that does not exist is an error.
    pub fn load(explicit: Option<&Path>, cwd: &Path) -> Result<Self> {
        match Self::resolve_config_path(explicit, cwd) {
            Some(path) if path.is_file() => {
                tracing::debug!(path = %path.display(), "Loading config");
                let content = std::fs::read_to_string(&path).map_err(|e| {
                    Error::config(format!("Failed to read {}: {e}", path.display()))
                })?;
                toml::from_str(&content).map_err(|e| {
                    Error::config(format!("Failed to parse {}: {e}", path.display()))
                })
            }
            Some(path) if explicit.is_some() => Err(Error::config(format!(
                "Config file does not exist at {}",
                path.display()
            ))),
            _ => {
                tracing::debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Parses TOML; absent keys keep their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::config(format!("Invalid config: {e}")))
    }

    /// Serializes to pretty TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }

    /// Fills an empty document id from the `archie` field of
    /// `package.json` in `dir`, if there is one.
    pub fn fill_document_id_from_package(&mut self, dir: &Path) {
        if !self.document.id.trim().is_empty() {
            return;
        }
        if let Some(id) = package_document_id(dir) {
            tracing::debug!(id = %id, "Using document id from package.json");
            self.document.id = id;
        }
    }

    /// Checks the settings every run needs.
    pub fn validate(&self) -> Result<()> {
        if self.output.record_key.trim().is_empty() {
            return Err(Error::config("output.record_key must not be empty"));
        }
        if self.output.path.as_os_str().is_empty() {
            return Err(Error::config("output.path must not be empty"));
        }
        Ok(())
    }

    /// Checks the settings a live fetch needs on top of [`validate`](Self::validate).
    pub fn validate_for_fetch(&self) -> Result<()> {
        self.validate()?;
        if self.document.id.trim().is_empty() {
            return Err(Error::config(
                "No document id: set document.id, pass --id, or add an \"archie\" field to package.json",
            ));
        }
        if !self.credentials.path.is_file() {
            return Err(Error::config(format!(
                "Credentials file not found at {}",
                self.credentials.path.display()
            )));
        }
        if self.api.base_url.trim().is_empty() {
            return Err(Error::config("api.base_url must not be empty"));
        }
        Ok(())
    }
}

/// Reads the `archie` document id from `package.json` in `dir`.
pub fn package_document_id(dir: &Path) -> Option<String> {
    let content = std::fs::read_to_string(dir.join("package.json")).ok()?;
    let package: serde_json::Value = serde_json::from_str(&content).ok()?;
    package
        .get("archie")
        .and_then(serde_json::Value::as_str)
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
}

// ============================================================================
// Tests
// ============================================================================
