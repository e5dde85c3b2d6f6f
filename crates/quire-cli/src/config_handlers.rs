//! Handlers for `quire config` subcommands.

use std::path::{Path, PathBuf};

use quire::core::{Error, Result};

use crate::cli::ConfigAction;
use crate::config::{PROJECT_NAME, QuireConfig};

/// Dispatches a config subcommand.
pub fn handle_config_command(
    config_path: Option<&Path>,
    cwd: &Path,
    action: ConfigAction,
) -> Result<()> {
    match action {
        ConfigAction::Path => cmd_config_path(config_path, cwd),
        ConfigAction::Show => {
            let config = QuireConfig::load(config_path, cwd)?;
            print!("{}", config.to_toml_string()?);
            Ok(())
        }
        ConfigAction::Get { key } => {
            let config = QuireConfig::load(config_path, cwd)?;
            println!("{}", config_value(&config, &key)?);
            Ok(())
        }
        ConfigAction::Init { file, force } => {
            let path = cmd_config_init(file, force)?;
            println!("Config file created at {}", path.display());
            Ok(())
        }
    }
}

/// Shows the resolved config file path.
pub fn cmd_config_path(config_path: Option<&Path>, cwd: &Path) -> Result<()> {
    match QuireConfig::resolve_config_path(config_path, cwd) {
        Some(path) => {
            println!("{}", path.display());
            if !path.exists() {
                eprintln!("(file does not exist; run `{PROJECT_NAME} config init` to create it)");
            }
            Ok(())
        }
        None => Err(Error::config(
            "Could not determine config directory for this platform",
        )),
    }
}

/// Looks up one configuration value by dotted key.
pub fn config_value(config: &QuireConfig, key: &str) -> Result<String> {
    let value = toml::Value::try_from(config).map_err(|e| Error::config(e.to_string()))?;
    get_nested_value(&value, key)
        .map(format_toml_value)
        .ok_or_else(|| Error::config(format!("Key '{key}' not found in configuration")))
}

/// Writes a default configuration file and returns its path.
pub fn cmd_config_init(file: Option<PathBuf>, force: bool) -> Result<PathBuf> {
    let path = match file {
        Some(path) => path,
        None => QuireConfig::default_config_path()
            .ok_or_else(|| Error::config("Could not determine config directory"))?,
    };

    if path.exists() && !force {
        return Err(Error::config(format!(
            "Config file already exists at {}. Use --force to overwrite.",
            path.display()
        )));
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, QuireConfig::default().to_toml_string()?)?;
    tracing::debug!(path = %path.display(), "Wrote default config");
    Ok(path)
}

/// Navigates a dotted key path in a TOML value tree.
pub fn get_nested_value<'a>(value: &'a toml::Value, key: &str) -> Option<&'a toml::Value> {
    key.split('.')
        .try_fold(value, |current, part| current.as_table()?.get(part))
}

/// Formats a TOML value for display on stdout.
pub fn format_toml_value(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        toml::Value::Integer(i) => i.to_string(),
        toml::Value::Float(f) => f.to_string(),
        toml::Value::Boolean(b) => b.to_string(),
        toml::Value::Datetime(dt) => dt.to_string(),
        toml::Value::Array(items) => items
            .iter()
            .map(format_toml_value)
            .collect::<Vec<_>>()
            .join("\n"),
        toml::Value::Table(_) => {
            toml::to_string_pretty(value).unwrap_or_else(|_| format!("{value:?}"))
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_value_nested() {
        let config = QuireConfig::default();
        assert_eq!(config_value(&config, "output.record_key").unwrap(), "archie");
        assert_eq!(
            config_value(&config, "document.include_child_tabs").unwrap(),
            "false"
        );
    }

    #[test]
    fn test_config_value_table() {
        let config = QuireConfig::default();
        let table = config_value(&config, "api").unwrap();
        assert!(table.contains("base_url"));
    }

    #[test]
    fn test_config_value_missing() {
        let err = config_value(&QuireConfig::default(), "output.nope").unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_cmd_config_path_explicit() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        assert!(cmd_config_path(Some(path.as_path()), dir.path()).is_ok());
    }

    #[test]
    fn test_cmd_config_init_creates_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("quire").join("config.toml");

        let written = cmd_config_init(Some(path.clone()), false).unwrap();
        assert_eq!(written, path);

        let loaded = QuireConfig::load(Some(path.as_path()), dir.path()).unwrap();
        assert_eq!(loaded, QuireConfig::default());
    }

    #[test]
    fn test_cmd_config_init_no_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "existing").unwrap();

        let err = cmd_config_init(Some(path.clone()), false).unwrap_err();
        assert!(err.to_string().contains("already exists"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "existing");
    }

    #[test]
    fn test_cmd_config_init_force_overwrites() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "old content").unwrap();

        cmd_config_init(Some(path.clone()), true).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("[output]"));
    }

    #[test]
    fn test_get_nested_value_top_level() {
        let val: toml::Value = toml::from_str("port = 8080").unwrap();
        assert_eq!(get_nested_value(&val, "port"), Some(&toml::Value::Integer(8080)));
    }

    #[test]
    fn test_get_nested_value_through_non_table() {
        let val: toml::Value = toml::from_str("port = 8080").unwrap();
        assert_eq!(get_nested_value(&val, "port.inner"), None);
    }
}
