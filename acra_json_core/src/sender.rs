/**
 * The JSON report sender.
 *
 * `JsonSender` is built once from a `SenderConfig` and then handed reports
 * by the host framework, one `send` per crash:
 *
 * 1. The form URI is validated up front, so a bad URI fails at construction
 *    and never reaches the network.
 * 2. `send` builds the JSON document, form-encodes it and POSTs it through a
 *    `Transport` that lives only for that call.
 * 3. The response status and body are logged; any failure on the way comes
 *    back as a single `ReportSenderError`.
 *
 * The sender holds no mutable state and is `Send + Sync`.
 */
use std::collections::HashMap;

use tracing::{debug, warn};
use ureq::http::Uri;

use crate::config::SenderConfig;
use crate::error::{ReportSenderError, Result};
use crate::payload;
use crate::protocol::constants::JSON_CONTENT_TYPE;
use crate::protocol::fields::ReportField;
use crate::protocol::report::CrashReportData;
use crate::transport::{Credentials, Transport};

// ---------------------------------------------------------------------------
// ReportSender trait
// ---------------------------------------------------------------------------

/**
 * A destination for finished crash reports.
 *
 * The host framework calls `send` once per report and treats an `Err` as
 * "this report was not delivered".
 */
pub trait ReportSender {
    fn send(&self, report: &CrashReportData) -> Result<()>;
}

// ---------------------------------------------------------------------------
// JsonSender
// ---------------------------------------------------------------------------

/**
 * Sends reports as a JSON document inside the `json` form field.
 */
#[derive(Debug)]
pub struct JsonSender {
    /// Validated destination, surrounding whitespace trimmed.
    form_uri: String,

    config: SenderConfig,

    credentials: Option<Credentials>,
}

impl JsonSender {
    /**
     * Sender for `form_uri` with an optional key mapping and default
     * configuration otherwise.
     *
     * With `mapping` set to `None`, JSON keys are the canonical field
     * names. Otherwise a field's key is `mapping[field]` when present.
     *
     * # Errors
     * `ReportSenderError::InvalidUri` if `form_uri` is malformed.
     */
    pub fn new(
        form_uri: impl Into<String>,
        mapping: Option<HashMap<ReportField, String>>,
    ) -> Result<Self> {
        Self::with_config(SenderConfig {
            mapping,
            ..SenderConfig::with_form_uri(form_uri)
        })
    }

    /**
     * Sender driven entirely by `config`.
     *
     * # Errors
     * - `InvalidUri` if `config.form_uri` is malformed.
     * - `Config` if a field list repeats an identifier.
     * - `Credentials` if the configured login cannot be used for basic auth.
     */
    pub fn with_config(config: SenderConfig) -> Result<Self> {
        let form_uri = validate_form_uri(&config.form_uri)?;
        config.validate()?;
        let credentials = Credentials::from_config(&config)?;

        Ok(Self {
            form_uri,
            config,
            credentials,
        })
    }

    pub fn form_uri(&self) -> &str {
        &self.form_uri
    }

    pub fn config(&self) -> &SenderConfig {
        &self.config
    }

    /**
     * The form body `send` would POST for `report`.
     *
     * Exposed so hosts can inspect or archive exactly what goes out.
     */
    pub fn encode_report(&self, report: &CrashReportData) -> Result<String> {
        let json = payload::build_json(
            report,
            self.config.report_fields(),
            self.config.mapping.as_ref(),
        );
        let text = payload::to_json_string(&json)?;
        Ok(payload::encode_form(&text))
    }
}

impl ReportSender for JsonSender {
    fn send(&self, report: &CrashReportData) -> Result<()> {
        debug!(url = %self.form_uri, "Connect to {}", self.form_uri);

        let body = self.encode_report(report)?;
        debug!(
            content_type = JSON_CONTENT_TYPE,
            bytes = body.len(),
            "Report encoded"
        );

        /*
         * The agent is dropped at the end of this call whatever the outcome,
         * closing any connection it opened.
         */
        if let Some(credentials) = &self.credentials {
            debug!(login = credentials.login(), "Using basic auth");
        }
        let transport = Transport::new(&self.config);
        let reply = transport.post_form(&self.form_uri, &body, self.credentials.as_ref())?;

        debug!("Server Status: {}", reply.status_line);
        debug!("Server Response: {}", reply.body);

        if !reply.is_success() {
            warn!(
                status = reply.status,
                "Collection endpoint answered {}", reply.status_line
            );
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// URI validation
// ---------------------------------------------------------------------------

/**
 * Accepts absolute `http`/`https` URIs with a host.
 *
 * Returns the URI with surrounding whitespace trimmed and otherwise
 * untouched, so the query string and path go out as configured.
 */
fn validate_form_uri(form_uri: &str) -> Result<String> {
    let invalid = |reason: &str| ReportSenderError::InvalidUri {
        uri: form_uri.to_string(),
        reason: reason.to_string(),
    };

    let trimmed = form_uri.trim();
    if trimmed.is_empty() {
        return Err(invalid("URI is empty"));
    }

    let uri: Uri = trimmed.parse().map_err(|e: ureq::http::uri::InvalidUri| {
        invalid(&e.to_string())
    })?;

    match uri.scheme_str() {
        Some("http") | Some("https") => {}
        Some(other) => return Err(invalid(&format!("unsupported scheme `{other}`"))),
        None => return Err(invalid("URI has no scheme")),
    }

    match uri.host() {
        Some(host) if !host.is_empty() => Ok(trimmed.to_string()),
        _ => Err(invalid("URI has no host")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_http_and_https() {
        assert!(JsonSender::new("http://localhost:8080/report", None).is_ok());
        assert!(JsonSender::new("https://crashes.example.com/submit?app=1", None).is_ok());
    }

    #[test]
    fn test_form_uri_is_trimmed_only() {
        let sender = JsonSender::new("  https://crashes.example.com/submit?app=1&v=%20x \n", None)
            .unwrap();
        assert_eq!(sender.form_uri(), "https://crashes.example.com/submit?app=1&v=%20x");
    }

    #[test]
    fn test_rejects_malformed_uris() {
        for uri in ["", "   ", "not a url", "ftp://example.com/", "/relative/path", "http://"] {
            let result = JsonSender::new(uri, None);
            assert!(
                matches!(result, Err(ReportSenderError::InvalidUri { .. })),
                "expected {uri:?} to be rejected"
            );
        }
    }

    #[test]
    fn test_rejects_duplicate_custom_fields() {
        let config = SenderConfig {
            custom_report_content: vec![ReportField::Logcat, ReportField::Logcat],
            ..SenderConfig::with_form_uri("http://localhost/")
        };
        assert!(matches!(
            JsonSender::with_config(config),
            Err(ReportSenderError::Config(_))
        ));
    }

    /**
     * The example from the protocol description: two fields, no mapping.
     */
    #[test]
    fn test_encode_report_scenario() {
        let config = SenderConfig {
            default_report_fields: vec![ReportField::StackTrace, ReportField::AppVersion],
            ..SenderConfig::with_form_uri("http://localhost/")
        };
        let sender = JsonSender::with_config(config).unwrap();

        let report: CrashReportData = [
            (ReportField::StackTrace, "boom"),
            (ReportField::AppVersion, "1.0"),
        ]
        .into_iter()
        .collect();

        assert_eq!(
            sender.encode_report(&report).unwrap(),
            "json=%7B%22STACK_TRACE%22%3A%22boom%22%2C%22APP_VERSION%22%3A%221.0%22%7D"
        );
    }

    #[test]
    fn test_default_fields_used_when_custom_list_empty() {
        let sender = JsonSender::new("http://localhost/", None).unwrap();
        let body = sender.encode_report(&CrashReportData::new()).unwrap();
        let json: serde_json::Map<String, serde_json::Value> =
            serde_json::from_str(&payload::decode_form(&body).unwrap()).unwrap();

        let keys: Vec<&str> = json.keys().map(String::as_str).collect();
        let expected: Vec<&str> = crate::protocol::fields::DEFAULT_REPORT_FIELDS
            .iter()
            .map(ReportField::as_str)
            .collect();
        assert_eq!(keys, expected);
        assert!(json.values().all(serde_json::Value::is_null));
    }

    #[test]
    fn test_sender_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<JsonSender>();
    }
}
