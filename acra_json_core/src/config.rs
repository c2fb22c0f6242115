/**
 * Sender configuration.
 *
 * Everything the sender needs besides the report itself lives here and is
 * passed in at construction time. The host can build it in code or load it
 * from a TOML document:
 *
 * ```toml
 * form_uri = "https://crashes.example.com/report"
 * custom_report_content = ["STACK_TRACE", "APP_VERSION"]
 * login = "reporter"
 * password = "s3cret"
 *
 * [mapping]
 * STACK_TRACE = "trace"
 * ```
 */
use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ReportSenderError, Result};
use crate::protocol::fields::{ReportField, DEFAULT_REPORT_FIELDS};

/**
 * Explicit configuration for a `JsonSender`.
 *
 * All fields have defaults, so a TOML document only needs to name what it
 * changes.
 */
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SenderConfig {
    /// Destination of the POST.
    pub form_uri: String,

    /// Fields to emit, in order. Empty means `default_report_fields`.
    pub custom_report_content: Vec<ReportField>,

    /// Fallback field set used when `custom_report_content` is empty.
    pub default_report_fields: Vec<ReportField>,

    /// Basic-auth login. No `Authorization` header is sent without it.
    pub login: Option<String>,

    /// Basic-auth password, paired with `login`.
    pub password: Option<String>,

    /// Output key overrides. Fields without an entry use their canonical name.
    pub mapping: Option<HashMap<ReportField, String>>,

    /// TCP connect timeout. `None` keeps the HTTP client default.
    pub connection_timeout_ms: Option<u64>,

    /// Timeout for the whole exchange. `None` keeps the HTTP client default.
    pub request_timeout_ms: Option<u64>,
}

impl Default for SenderConfig {
    fn default() -> Self {
        Self {
            form_uri: String::new(),
            custom_report_content: Vec::new(),
            default_report_fields: DEFAULT_REPORT_FIELDS.to_vec(),
            login: None,
            password: None,
            mapping: None,
            connection_timeout_ms: None,
            request_timeout_ms: None,
        }
    }
}

impl SenderConfig {
    /// Configuration with the given destination and all other values defaulted.
    pub fn with_form_uri(form_uri: impl Into<String>) -> Self {
        Self {
            form_uri: form_uri.into(),
            ..Default::default()
        }
    }

    /// Parses a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: SenderConfig = toml::from_str(source)?;
        Ok(config)
    }

    /// Reads and parses a TOML file.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&contents)
    }

    /**
     * The field selection for one send: the custom list when it names
     * anything, otherwise the default set.
     */
    pub fn report_fields(&self) -> &[ReportField] {
        if self.custom_report_content.is_empty() {
            &self.default_report_fields
        } else {
            &self.custom_report_content
        }
    }

    /**
     * Checks that neither field list repeats an identifier.
     *
     * The form URI is validated separately when the sender is built.
     */
    pub fn validate(&self) -> Result<()> {
        check_unique("custom_report_content", &self.custom_report_content)?;
        check_unique("default_report_fields", &self.default_report_fields)?;
        Ok(())
    }
}

fn check_unique(list_name: &str, fields: &[ReportField]) -> Result<()> {
    let mut seen = HashSet::with_capacity(fields.len());
    for field in fields {
        if !seen.insert(field) {
            return Err(ReportSenderError::Config(format!(
                "{list_name} lists {field} more than once"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SenderConfig::default();
        assert!(config.custom_report_content.is_empty());
        assert_eq!(config.default_report_fields, DEFAULT_REPORT_FIELDS);
        assert!(config.mapping.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
            form_uri = "https://crashes.example.com/report"
            custom_report_content = ["STACK_TRACE", "APP_VERSION"]
            login = "reporter"
            password = "s3cret"
            request_timeout_ms = 5000

            [mapping]
            STACK_TRACE = "trace"
        "#;

        let config = SenderConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.form_uri, "https://crashes.example.com/report");
        assert_eq!(
            config.custom_report_content,
            vec![ReportField::StackTrace, ReportField::AppVersion]
        );
        assert_eq!(config.login.as_deref(), Some("reporter"));
        assert_eq!(config.password.as_deref(), Some("s3cret"));
        assert_eq!(config.request_timeout_ms, Some(5000));
        assert_eq!(config.connection_timeout_ms, None);

        let mapping = config.mapping.unwrap();
        assert_eq!(mapping.get(&ReportField::StackTrace).map(String::as_str), Some("trace"));
        // Untouched lists keep their defaults.
        assert_eq!(config.default_report_fields, DEFAULT_REPORT_FIELDS);
    }

    #[test]
    fn test_parse_rejects_unknown_field_name() {
        let result = SenderConfig::from_toml_str(r#"custom_report_content = ["NOPE"]"#);
        assert!(matches!(result, Err(ReportSenderError::ConfigParse(_))));
    }

    #[test]
    fn test_report_fields_fallback() {
        let mut config = SenderConfig {
            default_report_fields: vec![ReportField::StackTrace, ReportField::AppVersion],
            ..Default::default()
        };
        assert_eq!(
            config.report_fields(),
            &[ReportField::StackTrace, ReportField::AppVersion]
        );

        config.custom_report_content = vec![ReportField::Logcat];
        assert_eq!(config.report_fields(), &[ReportField::Logcat]);
    }

    #[test]
    fn test_validate_rejects_duplicates() {
        let config = SenderConfig {
            custom_report_content: vec![ReportField::StackTrace, ReportField::StackTrace],
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ReportSenderError::Config(_)));
        assert!(err.to_string().contains("STACK_TRACE"));
    }
}
