use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Current config version. Bump this when adding fields or changing shape.
/// Each bump requires a corresponding entry in [`migrate`].
const CURRENT_VERSION: u32 = 1;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api/v1";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Environment variable that overrides the configured base URL.
pub const API_URL_ENV: &str = "SNIPMAN_API_URL";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Schema version. Missing or 0 = pre-versioned config.
    #[serde(default)]
    pub config_version: u32,
    /// API root including the `/api/v1` base path.
    pub base_url: String,
    /// Added in v1. Never 0.
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            config_version: CURRENT_VERSION,
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ClientConfig {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    fn check(&self) -> Result<(), ConfigError> {
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(())
    }
}

fn config_dir() -> Result<PathBuf, ConfigError> {
    let base = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
    Ok(base.join("snipman"))
}

pub fn config_path() -> Result<PathBuf, ConfigError> {
    Ok(config_dir()?.join("config.json"))
}

/// Resolve the effective config: explicit override, then the
/// `SNIPMAN_API_URL` environment variable, then the config file, then
/// defaults.
pub fn resolve(api_url_override: Option<&str>) -> Result<ClientConfig, ConfigError> {
    let path = config_path()?;
    let mut config = if path.exists() {
        load_from(&path)?
    } else {
        ClientConfig::default()
    };

    if let Ok(url) = std::env::var(API_URL_ENV)
        && !url.trim().is_empty()
    {
        config.base_url = url;
    }
    if let Some(url) = api_url_override {
        config.base_url = url.to_string();
    }

    tracing::debug!(base_url = %config.base_url, "resolved client config");
    Ok(config)
}

pub fn load_from(path: &Path) -> Result<ClientConfig, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;

    // Parse as raw JSON so we can run migrations before deserializing.
    let json: serde_json::Value = serde_json::from_str(&contents)?;
    let on_disk_version = json
        .get("config_version")
        .and_then(|v| v.as_u64())
        .unwrap_or(0) as u32;

    let migrated = migrate(json, on_disk_version)?;
    let config: ClientConfig = serde_json::from_value(migrated)?;
    config.check()?;
    Ok(config)
}

/// Run sequential migrations from `from_version` up to [`CURRENT_VERSION`].
fn migrate(
    mut json: serde_json::Value,
    from_version: u32,
) -> Result<serde_json::Value, ConfigError> {
    if from_version > CURRENT_VERSION {
        return Err(ConfigError::UnsupportedVersion {
            found: from_version,
            supported: CURRENT_VERSION,
        });
    }

    // v0 → v1: add request_timeout_secs
    if from_version < 1 {
        let obj = json.as_object_mut().ok_or(ConfigError::NotAnObject)?;
        obj.entry("request_timeout_secs")
            .or_insert(serde_json::Value::Number(DEFAULT_TIMEOUT_SECS.into()));
        obj.insert(
            "config_version".to_string(),
            serde_json::Value::Number(1.into()),
        );
        tracing::info!("migrated config v0 → v1 (added request_timeout_secs)");
    }

    Ok(json)
}

pub fn save(config: &ClientConfig) -> Result<PathBuf, ConfigError> {
    let path = config_path()?;
    save_to(&path, config)?;
    Ok(path)
}

pub fn save_to(path: &Path, config: &ClientConfig) -> Result<(), ConfigError> {
    config.check()?;
    let dir = path.parent().ok_or_else(|| {
        ConfigError::io(
            path,
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "config path has no parent"),
        )
    })?;
    std::fs::create_dir_all(dir).map_err(|e| ConfigError::io(dir, e))?;

    // Always write the current version, regardless of what was loaded.
    let mut stamped = config.clone();
    stamped.config_version = CURRENT_VERSION;

    let json = serde_json::to_string_pretty(&stamped)?;

    // Write to a temp file then rename for atomicity
    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, json.as_bytes()).map_err(|e| ConfigError::io(&tmp_path, e))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&tmp_path, std::fs::Permissions::from_mode(0o600))
            .map_err(|e| ConfigError::io(&tmp_path, e))?;
    }

    std::fs::rename(&tmp_path, path).map_err(|e| ConfigError::io(path, e))?;

    tracing::info!(path = %path.display(), "config saved");
    Ok(())
}

pub fn delete() -> Result<(), ConfigError> {
    let path = config_path()?;
    if path.exists() {
        std::fs::remove_file(&path).map_err(|e| ConfigError::io(&path, e))?;
        tracing::info!(path = %path.display(), "config deleted");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn v0_config_gains_default_timeout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "base_url": "http://api.test/api/v1" }"#).unwrap();

        let config = load_from(&path).unwrap();
        assert_eq!(config.config_version, 1);
        assert_eq!(config.base_url, "http://api.test/api/v1");
        assert_eq!(config.request_timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn newer_config_version_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{ "config_version": 9, "base_url": "http://x", "request_timeout_secs": 1 }"#,
        )
        .unwrap();

        let err = load_from(&path).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::UnsupportedVersion {
                found: 9,
                supported: CURRENT_VERSION
            }
        ));
        assert!(err.to_string().contains("newer than this build supports"));
    }

    #[test]
    fn zero_timeout_is_rejected_on_load_and_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{ "config_version": 1, "base_url": "http://x", "request_timeout_secs": 0 }"#,
        )
        .unwrap();
        assert!(matches!(load_from(&path), Err(ConfigError::ZeroTimeout)));

        let other = dir.path().join("other.json");
        let mut config = ClientConfig::default();
        config.request_timeout_secs = 0;
        assert!(matches!(save_to(&other, &config), Err(ConfigError::ZeroTimeout)));
        assert!(!other.exists());
    }

    #[test]
    fn missing_file_reports_its_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        let err = load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("absent.json"));
    }

    #[test]
    fn save_then_load_stamps_current_version() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let mut config = ClientConfig::with_base_url("http://saved/api/v1");
        config.config_version = 0;

        save_to(&path, &config).unwrap();
        let loaded = load_from(&path).unwrap();
        assert_eq!(loaded.config_version, CURRENT_VERSION);
        assert_eq!(loaded.base_url, "http://saved/api/v1");
        assert!(!path.with_extension("json.tmp").exists());
    }
}
