/**
 * Turns a `CrashReportData` into the POST body.
 *
 * Two steps, both pure:
 * 1. `build_json` walks the field selection in order and writes one JSON
 *    key per field, using the mapped name when the mapping has one.
 * 2. `encode_form` wraps the serialized document as the single form field
 *    `json=<percent-encoded document>`.
 *
 * Key order in the JSON object follows the field selection (serde_json is
 * built with `preserve_order`).
 */
use std::collections::HashMap;

use serde_json::{Map, Value};
use tracing::warn;

use crate::error::Result;
use crate::protocol::constants::FORM_PARAMETER;
use crate::protocol::fields::ReportField;
use crate::protocol::report::CrashReportData;

/**
 * Output key for `field`: the mapped name when `mapping` has an entry,
 * otherwise the canonical field name.
 */
pub fn output_key(field: ReportField, mapping: Option<&HashMap<ReportField, String>>) -> &str {
    mapping
        .and_then(|m| m.get(&field))
        .map(String::as_str)
        .unwrap_or_else(|| field.as_str())
}

/**
 * Builds the report document.
 *
 * Missing values and the null sentinel become JSON `null`. When two fields
 * map onto the same key the later field's value wins; the key keeps the
 * position of its first occurrence and the collision is logged.
 */
pub fn build_json(
    report: &CrashReportData,
    fields: &[ReportField],
    mapping: Option<&HashMap<ReportField, String>>,
) -> Map<String, Value> {
    let mut json = Map::with_capacity(fields.len());

    for &field in fields {
        let key = output_key(field, mapping);
        let value = match report.get(field) {
            Some(text) => Value::String(text.to_string()),
            None => Value::Null,
        };

        if json.insert(key.to_string(), value).is_some() {
            warn!(%field, key, "Key already written by another field, overwriting");
        }
    }

    json
}

/// Serializes the document to compact JSON text.
pub fn to_json_string(json: &Map<String, Value>) -> Result<String> {
    Ok(serde_json::to_string(json)?)
}

/**
 * Form body carrying `json_text` as the `json` parameter.
 *
 * Alphanumerics and `-_.~` stay literal; every other UTF-8 byte is
 * percent-encoded.
 */
pub fn encode_form(json_text: &str) -> String {
    format!("{FORM_PARAMETER}={}", urlencoding::encode(json_text))
}

/**
 * Extracts and decodes the `json` parameter from a form body.
 *
 * Accepts `+` as an encoded space, as form encoders commonly emit it.
 * Returns `None` when the parameter is missing or not valid UTF-8.
 */
pub fn decode_form(body: &str) -> Option<String> {
    body.split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(name, _)| *name == FORM_PARAMETER)
        .and_then(|(_, value)| {
            urlencoding::decode(&value.replace('+', " "))
                .ok()
                .map(|decoded| decoded.into_owned())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::constants::NULL_VALUE;

    fn sample_report() -> CrashReportData {
        [
            (ReportField::StackTrace, "boom"),
            (ReportField::AppVersion, "1.0"),
        ]
        .into_iter()
        .collect()
    }

    const SCENARIO_FIELDS: &[ReportField] = &[ReportField::StackTrace, ReportField::AppVersion];

    #[test]
    fn test_build_json_uses_canonical_names() {
        let json = build_json(&sample_report(), SCENARIO_FIELDS, None);
        let text = to_json_string(&json).unwrap();
        assert_eq!(text, r#"{"STACK_TRACE":"boom","APP_VERSION":"1.0"}"#);
    }

    #[test]
    fn test_mapping_overrides_key() {
        let mapping = HashMap::from([(ReportField::StackTrace, "trace".to_string())]);
        let json = build_json(&sample_report(), SCENARIO_FIELDS, Some(&mapping));

        let keys: Vec<&str> = json.keys().map(String::as_str).collect();
        assert_eq!(keys, ["trace", "APP_VERSION"]);
        assert_eq!(json["trace"], "boom");
    }

    /**
     * The key set is exactly one entry per selected field, whether or not
     * the report has a value for it.
     */
    #[test]
    fn test_key_set_matches_selection() {
        let fields = [
            ReportField::ReportId,
            ReportField::StackTrace,
            ReportField::Logcat,
            ReportField::UserEmail,
        ];
        let json = build_json(&sample_report(), &fields, None);

        let keys: Vec<&str> = json.keys().map(String::as_str).collect();
        assert_eq!(keys, ["REPORT_ID", "STACK_TRACE", "LOGCAT", "USER_EMAIL"]);
        assert_eq!(json["REPORT_ID"], Value::Null);
    }

    #[test]
    fn test_null_sentinel_becomes_json_null() {
        let mut report = sample_report();
        report.put(ReportField::AppVersion, NULL_VALUE);

        let json = build_json(&report, SCENARIO_FIELDS, None);
        assert_eq!(json["APP_VERSION"], Value::Null);
        assert_eq!(
            to_json_string(&json).unwrap(),
            r#"{"STACK_TRACE":"boom","APP_VERSION":null}"#
        );
    }

    /**
     * An empty mapped name is still a valid JSON key.
     */
    #[test]
    fn test_empty_mapped_key_is_written() {
        let mapping = HashMap::from([(ReportField::StackTrace, String::new())]);
        let json = build_json(&sample_report(), SCENARIO_FIELDS, Some(&mapping));

        let keys: Vec<&str> = json.keys().map(String::as_str).collect();
        assert_eq!(keys, ["", "APP_VERSION"]);
        assert_eq!(json[""], "boom");
        assert_eq!(
            to_json_string(&json).unwrap(),
            r#"{"":"boom","APP_VERSION":"1.0"}"#
        );
    }

    /**
     * Two fields mapped onto the same key: the last one's value wins and
     * the key stays where it was first written.
     */
    #[test]
    fn test_colliding_mapped_key_keeps_last_value() {
        let mapping = HashMap::from([
            (ReportField::StackTrace, "data".to_string()),
            (ReportField::AppVersion, "data".to_string()),
        ]);
        let fields = [ReportField::StackTrace, ReportField::ReportId, ReportField::AppVersion];
        let json = build_json(&sample_report(), &fields, Some(&mapping));

        let keys: Vec<&str> = json.keys().map(String::as_str).collect();
        assert_eq!(keys, ["data", "REPORT_ID"]);
        assert_eq!(json["data"], "1.0");
    }

    #[test]
    fn test_encode_form_scenario() {
        let body = encode_form(r#"{"STACK_TRACE":"boom","APP_VERSION":"1.0"}"#);
        assert_eq!(
            body,
            "json=%7B%22STACK_TRACE%22%3A%22boom%22%2C%22APP_VERSION%22%3A%221.0%22%7D"
        );
    }

    #[test]
    fn test_decode_form_recovers_document() {
        let mut report = sample_report();
        report.put(ReportField::UserComment, "crashed after tapping \"Save\" & exit\n\u{e9}");
        let fields = [ReportField::StackTrace, ReportField::UserComment];

        let json = build_json(&report, &fields, None);
        let body = encode_form(&to_json_string(&json).unwrap());

        let decoded = decode_form(&body).unwrap();
        let parsed: Map<String, Value> = serde_json::from_str(&decoded).unwrap();
        assert_eq!(parsed, json);
    }

    #[test]
    fn test_decode_form_accepts_plus_and_other_params() {
        assert_eq!(
            decode_form("other=1&json=%7B%22a%22%3A%22b+c%22%7D").as_deref(),
            Some(r#"{"a":"b c"}"#)
        );
        assert_eq!(decode_form("other=1"), None);
    }
}
