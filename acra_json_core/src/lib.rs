/*!
 * ACRA JSON Core: the report sender engine.
 *
 * This crate turns an assembled crash report into a JSON document and POSTs
 * it to a collection endpoint as the single form field `json`. Host
 * applications should depend on the `acra_json` facade crate, which
 * re-exports everything here.
 *
 * # Module structure
 *
 * - `protocol/`: what we send: field identifiers, the report, constants
 * - `payload`: report → JSON document → form body
 * - `transport/`: how we deliver: blocking HTTP POST, basic auth
 * - `config`: explicit sender configuration, TOML loading
 * - `sender`: `JsonSender` and the `ReportSender` trait
 * - `error`: `ReportSenderError`
 *
 * The library logs through `tracing` and never installs a subscriber.
 */

pub mod config;
pub mod error;
pub mod payload;
pub mod protocol;
pub mod sender;
pub mod transport;

// ---------------------------------------------------------------------------
// Re-exports
// ---------------------------------------------------------------------------

pub use config::SenderConfig;
pub use error::{ReportSenderError, Result};
pub use protocol::constants::{
    FORM_CONTENT_TYPE, FORM_PARAMETER, JSON_CONTENT_TYPE, NULL_VALUE, SENDER_VERSION,
};
pub use protocol::fields::{ReportField, UnknownField, DEFAULT_REPORT_FIELDS};
pub use protocol::report::CrashReportData;
pub use sender::{JsonSender, ReportSender};
pub use transport::{Credentials, ServerReply};
