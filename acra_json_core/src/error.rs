//! Error type for the report sender.

use thiserror::Error;

/**
 * The single failure a sender reports back to the host framework.
 *
 * Every variant keeps its underlying cause reachable through
 * `std::error::Error::source`, so the host can log the full chain.
 */
#[derive(Error, Debug)]
pub enum ReportSenderError {
    /// The destination URL could not be used.
    #[error("invalid form URI `{uri}`: {reason}")]
    InvalidUri { uri: String, reason: String },

    /// Configuration values are inconsistent.
    #[error("configuration error: {0}")]
    Config(String),

    /// Configuration file is not valid TOML for `SenderConfig`.
    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Configuration file could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The report document could not be serialized.
    #[error("failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Basic-auth credentials could not be turned into a header.
    #[error("invalid credentials: {0}")]
    Credentials(String),

    /// The POST could not be completed.
    #[error("error while sending report to form URI: {0}")]
    Transport(#[from] ureq::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ReportSenderError>;
