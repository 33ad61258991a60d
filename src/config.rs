//! Configuration handling for the form

use crate::error::FormError;
use crate::state::FormValues;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// When edits re-run a field's validation rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ValidationMode {
    /// Every edit re-validates the edited field
    #[default]
    OnChange,
    /// Edits re-validate only after the first submit attempt
    OnSubmit,
}

/// User configuration for the form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FormConfig {
    /// Substrings a channel name may not contain
    pub blacklisted_words: Vec<String>,
    /// Address the email field refuses even though it is well formed
    pub reserved_email: String,
    pub validation_mode: ValidationMode,
    /// Initial values; the empty form when unset
    pub default_values: Option<FormValues>,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            blacklisted_words: vec!["blacklist".to_string(), "badword".to_string()],
            reserved_email: "admin@example.com".to_string(),
            validation_mode: ValidationMode::default(),
            default_values: None,
        }
    }
}

impl FormConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("io", "ytform", "youtube-form")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from the user config directory, falling back to
    /// defaults when there is no file
    pub fn load() -> Result<Self, FormError> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self, FormError> {
        let content = fs::read_to_string(path).map_err(|source| FormError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| FormError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = FormConfig::default();
        assert_eq!(config.blacklisted_words, vec!["blacklist", "badword"]);
        assert_eq!(config.reserved_email, "admin@example.com");
        assert_eq!(config.validation_mode, ValidationMode::OnChange);
        assert!(config.default_values.is_none());
    }

    #[test]
    fn test_deserialize_from_empty_json() {
        let parsed: FormConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed, FormConfig::default());
    }

    #[test]
    fn test_partial_deserialization() {
        let json = r#"{"blacklistedWords": ["spam"], "validationMode": "onSubmit"}"#;
        let parsed: FormConfig = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.blacklisted_words, vec!["spam"]);
        assert_eq!(parsed.validation_mode, ValidationMode::OnSubmit);
        assert_eq!(parsed.reserved_email, "admin@example.com");
    }

    #[test]
    fn test_deserialize_default_values() {
        let json = r#"{"defaultValues": {"username": "guest", "phNumbers": []}}"#;
        let parsed: FormConfig = serde_json::from_str(json).unwrap();
        let values = parsed.default_values.unwrap();
        assert_eq!(values.username, "guest");
        assert!(values.ph_numbers.is_empty());
    }

    #[test]
    fn test_deserialize_with_extra_fields() {
        let json = r#"{"reservedEmail": "root@example.com", "unknown_field": "value"}"#;
        let parsed: FormConfig = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.reserved_email, "root@example.com");
    }

    #[test]
    fn test_keys_match_form_value_casing() {
        let json = r#"{
            "blacklistedWords": [],
            "reservedEmail": "owner@example.com",
            "validationMode": "onChange",
            "defaultValues": {"social": {"twitter": "@bruce"}, "phoneNumbers": ["1", "2"]}
        }"#;
        let parsed: FormConfig = serde_json::from_str(json).unwrap();
        assert!(parsed.blacklisted_words.is_empty());
        assert_eq!(parsed.reserved_email, "owner@example.com");
        let values = parsed.default_values.unwrap();
        assert_eq!(values.social.twitter, "@bruce");
        assert_eq!(values.phone_numbers, ["1".to_string(), "2".to_string()]);

        let round_trip = serde_json::to_value(FormConfig::default()).unwrap();
        assert!(round_trip.get("blacklistedWords").is_some());
        assert!(round_trip.get("blacklisted_words").is_none());
    }

    #[test]
    fn test_snake_case_keys_are_ignored() {
        let parsed: FormConfig =
            serde_json::from_str(r#"{"reserved_email": "root@example.com"}"#).unwrap();
        assert_eq!(parsed.reserved_email, "admin@example.com");
    }

    fn temp_config(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "youtube-form-{name}-{}.json",
            std::process::id()
        ));
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_from_missing_file_is_read_error() {
        let path = Path::new("/nonexistent/youtube-form.json");
        match FormConfig::load_from(path) {
            Err(FormError::ConfigRead { path: failed, source }) => {
                assert_eq!(failed, path);
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("expected read error, got {other:?}"),
        }
    }

    #[test]
    fn test_load_from_malformed_file_is_parse_error() {
        let path = temp_config("malformed", r#"{"reservedEmail": "#);
        let result = FormConfig::load_from(&path);
        let _ = fs::remove_file(&path);

        let err = result.unwrap_err();
        assert!(matches!(&err, FormError::ConfigParse { source, .. } if source.is_eof()));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_load_from_file() {
        let path = temp_config("valid", r#"{"reservedEmail": "x@y.z"}"#);
        let config = FormConfig::load_from(&path).unwrap();
        let _ = fs::remove_file(&path);
        assert_eq!(config.reserved_email, "x@y.z");
    }

    #[test]
    fn test_config_path_returns_option() {
        let _path = FormConfig::config_path();
    }
}
