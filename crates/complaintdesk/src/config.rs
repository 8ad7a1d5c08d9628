//! Configuration management for complaintdesk.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::credentials::{CredentialSource, ServiceAccountKey};
use crate::error::{Error, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default data directory name.
const DATA_DIR_NAME: &str = "complaintdesk";

/// Default workbook file name.
const WORKBOOK_FILE_NAME: &str = "workbook.db";

/// Prefix of environment overrides. Nested keys use `__`, e.g.
/// `COMPLAINTDESK_SHEET__SPREADSHEET_ID`.
const ENV_PREFIX: &str = "COMPLAINTDESK_";

/// Characters allowed in a spreadsheet key.
const SPREADSHEET_ID_PATTERN: &str = r"^[A-Za-z0-9_-]+$";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `COMPLAINTDESK_`)
/// 2. TOML config file at `~/.config/complaintdesk/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Spreadsheet store configuration.
    pub sheet: SheetConfig,
    /// Admin view configuration.
    pub admin: AdminConfig,
    /// Form presentation.
    pub form: FormConfig,
}

/// Where complaints are stored and how to reach them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetConfig {
    /// Path to the workbook file.
    /// Defaults to `~/.local/share/complaintdesk/workbook.db`
    pub workbook_path: Option<PathBuf>,
    /// Key of the complaint spreadsheet. Required.
    pub spreadsheet_id: Option<String>,
    /// Path to the service-account JSON key. Required.
    pub credentials_path: Option<PathBuf>,
}

/// Admin view configuration.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    /// Shared password unlocking the record view.
    pub password: String,
}

/// Form presentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// Page title.
    pub title: String,
    /// Heading above the submission fields.
    pub header: String,
    /// Optional image shown beside the title.
    pub image_url: Option<String>,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            password: "admin123".to_string(),
        }
    }
}

impl std::fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminConfig")
            .field("password", &"<redacted>")
            .finish()
    }
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            title: "Complaint Management System".to_string(),
            header: "Submit a New Complaint".to_string(),
            image_url: None,
        }
    }
}

impl Config {
    /// Load configuration from all sources, reading the TOML layer from
    /// `config_path` or the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(DATA_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(DATA_DIR_NAME)
    }

    /// Validate the configuration.
    ///
    /// Secrets may still be absent here; [`Config::credential_source`]
    /// enforces them when the store is opened.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.admin.password.is_empty() {
            return Err(Error::ConfigValidation {
                message: "admin.password must not be empty".to_string(),
            });
        }

        if self.form.title.trim().is_empty() {
            return Err(Error::ConfigValidation {
                message: "form.title must not be empty".to_string(),
            });
        }

        if let Some(id) = &self.sheet.spreadsheet_id {
            let pattern = Regex::new(SPREADSHEET_ID_PATTERN)
                .map_err(|e| Error::internal(format!("bad spreadsheet id pattern: {e}")))?;
            if !pattern.is_match(id) {
                return Err(Error::ConfigValidation {
                    message: format!(
                        "sheet.spreadsheet_id {id:?} may only contain letters, digits, '-' and '_'"
                    ),
                });
            }
        }

        Ok(())
    }

    /// Get the workbook path, resolving defaults if not set.
    #[must_use]
    pub fn workbook_path(&self) -> PathBuf {
        self.sheet
            .workbook_path
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(WORKBOOK_FILE_NAME))
    }

    /// Resolve the secrets needed to open the complaint spreadsheet.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingSecret`] if the spreadsheet key or credential
    /// path is not configured, or a credentials error if the key bundle
    /// cannot be read.
    pub fn credential_source(&self) -> Result<CredentialSource> {
        let spreadsheet_id = self
            .sheet
            .spreadsheet_id
            .clone()
            .filter(|id| !id.trim().is_empty())
            .ok_or(Error::MissingSecret {
                name: "sheet.spreadsheet_id",
            })?;

        let credentials_path =
            self.sheet
                .credentials_path
                .as_ref()
                .ok_or(Error::MissingSecret {
                    name: "sheet.credentials_path",
                })?;

        let credentials = ServiceAccountKey::from_file(credentials_path)?;
        Ok(CredentialSource::new(credentials, spreadsheet_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_temp(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "complaintdesk_cfg_{name}_{}",
            std::process::id()
        ));
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert!(config.sheet.spreadsheet_id.is_none());
        assert!(config.sheet.credentials_path.is_none());
        assert_eq!(config.admin.password, "admin123");
        assert_eq!(config.form.title, "Complaint Management System");
        assert!(config.form.image_url.is_none());
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_empty_password() {
        let mut config = Config::default();
        config.admin.password = String::new();

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("admin.password"));
    }

    #[test]
    fn test_validate_blank_title() {
        let mut config = Config::default();
        config.form.title = "  ".to_string();

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("form.title"));
    }

    #[test]
    fn test_validate_spreadsheet_id_charset() {
        let mut config = Config::default();
        config.sheet.spreadsheet_id = Some("1AbC-d_E".to_string());
        assert!(config.validate().is_ok());

        config.sheet.spreadsheet_id = Some("../etc/passwd".to_string());
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("spreadsheet_id"));
    }

    #[test]
    fn test_workbook_path_default() {
        let config = Config::default();
        let path = config.workbook_path();

        assert!(path.to_string_lossy().contains("complaintdesk"));
        assert!(path.to_string_lossy().ends_with("workbook.db"));
    }

    #[test]
    fn test_workbook_path_custom() {
        let mut config = Config::default();
        config.sheet.workbook_path = Some(PathBuf::from("/srv/complaints.db"));

        assert_eq!(config.workbook_path(), PathBuf::from("/srv/complaints.db"));
    }

    #[test]
    fn test_credential_source_missing_spreadsheet_id() {
        let config = Config::default();
        let err = config.credential_source().unwrap_err();
        assert!(matches!(
            err,
            Error::MissingSecret {
                name: "sheet.spreadsheet_id"
            }
        ));
        assert!(err.is_startup_error());
    }

    #[test]
    fn test_credential_source_blank_spreadsheet_id() {
        let mut config = Config::default();
        config.sheet.spreadsheet_id = Some(" ".to_string());
        assert!(matches!(
            config.credential_source(),
            Err(Error::MissingSecret { .. })
        ));
    }

    #[test]
    fn test_credential_source_missing_credentials() {
        let mut config = Config::default();
        config.sheet.spreadsheet_id = Some("complaints".to_string());

        assert!(matches!(
            config.credential_source(),
            Err(Error::MissingSecret {
                name: "sheet.credentials_path"
            })
        ));
    }

    #[test]
    fn test_credential_source_resolves() {
        let key_path = write_temp(
            "key.json",
            r#"{"type":"service_account","client_email":"bot@example.com","private_key":"k"}"#,
        );
        let mut config = Config::default();
        config.sheet.spreadsheet_id = Some("complaints".to_string());
        config.sheet.credentials_path = Some(key_path.clone());

        let source = config.credential_source().unwrap();
        assert_eq!(source.spreadsheet_id, "complaints");
        assert_eq!(source.client_email(), "bot@example.com");

        let _ = std::fs::remove_file(&key_path);
    }

    #[test]
    fn test_load_nonexistent_config() {
        let result = Config::load_from(Some(PathBuf::from("/nonexistent/config.toml")));
        assert!(result.is_ok());
        assert_eq!(result.unwrap(), Config::default());
    }

    #[test]
    fn test_load_from_toml() {
        let path = write_temp(
            "config.toml",
            r#"
[sheet]
spreadsheet_id = "intake-2025"
workbook_path = "/tmp/intake.db"

[admin]
password = "s3cret"

[form]
title = "Complaints"
image_url = "https://example.com/fox.jpg"
"#,
        );

        let config = Config::load_from(Some(path.clone())).unwrap();
        assert_eq!(config.sheet.spreadsheet_id.as_deref(), Some("intake-2025"));
        assert_eq!(config.workbook_path(), PathBuf::from("/tmp/intake.db"));
        assert_eq!(config.admin.password, "s3cret");
        assert_eq!(config.form.title, "Complaints");
        assert_eq!(config.form.header, FormConfig::default().header);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_load_invalid_toml_value() {
        let path = write_temp("bad.toml", "[admin]\npassword = \"\"\n");
        let result = Config::load_from(Some(path.clone()));
        assert!(matches!(result, Err(Error::ConfigValidation { .. })));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_admin_config_debug_redacts() {
        let debug_str = format!("{:?}", AdminConfig::default());
        assert!(!debug_str.contains("admin123"));
        assert!(debug_str.contains("redacted"));
    }

    #[test]
    fn test_default_config_path() {
        let path = Config::default_config_path();
        assert!(path.to_string_lossy().contains("complaintdesk"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }

    #[test]
    fn test_sheet_config_deserialize() {
        let json = r#"{"spreadsheet_id": "abc", "credentials_path": "/k.json"}"#;
        let sheet: SheetConfig = serde_json::from_str(json).unwrap();
        assert_eq!(sheet.spreadsheet_id.as_deref(), Some("abc"));
        assert_eq!(sheet.credentials_path, Some(PathBuf::from("/k.json")));
    }
}
