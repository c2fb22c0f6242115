/**
 * Wire-level constants shared by the payload builder and the transport.
 */

/// Marker the host framework stores for a field it could not collect.
/// Serialized as JSON `null`, never as the literal string.
pub const NULL_VALUE: &str = "N/A";

/// Name of the single form field that carries the serialized report.
pub const FORM_PARAMETER: &str = "json";

/// Declared content type of the report document inside the form field.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Content type of the POST request itself.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Sender version string, derived from the `acra_json_core` package version.
pub const SENDER_VERSION: &str = concat!("acra-json-rust/", env!("CARGO_PKG_VERSION"));
