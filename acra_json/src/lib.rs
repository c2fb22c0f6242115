/**
 * ACRA JSON: crash-report sender that POSTs reports as JSON.
 *
 * This is the crate host applications should depend on. It re-exports the
 * core API and offers `sender()`, which builds a ready `JsonSender` from a
 * bare URL or a full `Options` struct.
 *
 * # Quick start
 *
 * ```ignore
 * use acra_json::{CrashReportData, ReportField, ReportSender};
 *
 * let sender = acra_json::sender("https://crashes.example.com/report")?;
 *
 * let mut report = CrashReportData::new();
 * report.put(ReportField::StackTrace, "boom");
 * sender.send(&report)?;
 * ```
 *
 * # With options
 *
 * ```ignore
 * use std::collections::HashMap;
 *
 * let sender = acra_json::sender(acra_json::Options {
 *     form_uri: "https://crashes.example.com/report".into(),
 *     mapping: Some(HashMap::from([(acra_json::ReportField::StackTrace, "trace".into())])),
 *     ..Default::default()
 * })?;
 * ```
 */

use std::collections::HashMap;

// ---------------------------------------------------------------------------
// Re-exports from acra_json_core: the public surface area
// ---------------------------------------------------------------------------

pub use acra_json_core::{
    payload, Credentials, CrashReportData, JsonSender, ReportField, ReportSender,
    ReportSenderError, Result, SenderConfig, ServerReply, UnknownField, DEFAULT_REPORT_FIELDS,
    FORM_CONTENT_TYPE, FORM_PARAMETER, JSON_CONTENT_TYPE, NULL_VALUE, SENDER_VERSION,
};

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/**
 * Everything needed to build a sender.
 *
 * Implements `From<&str>` so `sender()` accepts just a URL.
 * `form_uri` and `mapping` take precedence over the same values in `config`.
 */
#[derive(Debug, Clone, Default)]
pub struct Options {
    /// Destination of the POST.
    pub form_uri: String,

    /// Output key overrides, `None` for canonical field names.
    pub mapping: Option<HashMap<ReportField, String>>,

    /// Remaining settings: field lists, credentials, timeouts.
    pub config: SenderConfig,
}

/**
 * Allows `acra_json::sender("https://...")`.
 */
impl From<&str> for Options {
    fn from(form_uri: &str) -> Self {
        Self {
            form_uri: form_uri.to_string(),
            ..Default::default()
        }
    }
}

/**
 * Builds a `JsonSender` straight from a configuration, e.g. one loaded with
 * `SenderConfig::load_from`.
 */
impl From<SenderConfig> for Options {
    fn from(config: SenderConfig) -> Self {
        Self {
            form_uri: config.form_uri.clone(),
            mapping: config.mapping.clone(),
            config,
        }
    }
}

// ---------------------------------------------------------------------------
// sender
// ---------------------------------------------------------------------------

/**
 * Builds a `JsonSender`.
 *
 * ```ignore
 * // Just a URL, default field set, canonical keys
 * let sender = acra_json::sender("https://crashes.example.com/report")?;
 *
 * // From a TOML file
 * let sender = acra_json::sender(acra_json::SenderConfig::load_from("acra.toml")?)?;
 * ```
 *
 * # Errors
 * Fails when the URL is malformed or the configuration is inconsistent.
 */
pub fn sender(options: impl Into<Options>) -> Result<JsonSender> {
    let opts = options.into();

    let config = SenderConfig {
        form_uri: opts.form_uri,
        mapping: opts.mapping,
        ..opts.config
    };

    JsonSender::with_config(config)
}
