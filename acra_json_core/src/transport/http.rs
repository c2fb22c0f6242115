/*!
 * HTTP transport for delivering the form-encoded report.
 *
 * Uses `ureq`, a pure-Rust blocking HTTP client with no async runtime.
 * A send is a single blocking round trip on the caller's thread, so there is
 * nothing for a runtime to schedule.
 *
 * Design decisions:
 * - **One agent per send**: the sender builds a `Transport` for every
 *   report and drops it when the call returns, so no connection outlives
 *   the send that opened it.
 * - **Status is not an error**: the agent is configured with
 *   `http_status_as_error(false)`; the caller gets the status line and body
 *   and decides what to log. Only transport-level failures are errors.
 * - **Single attempt**: no retries.
 */

use std::time::Duration;

use base64::Engine as _;
use ureq::Agent;

use crate::config::SenderConfig;
use crate::error::{ReportSenderError, Result};
use crate::protocol::constants::{FORM_CONTENT_TYPE, SENDER_VERSION};
use crate::protocol::report::is_null;

// ---------------------------------------------------------------------------
// Credentials
// ---------------------------------------------------------------------------

/**
 * Basic-auth credentials for the collection endpoint.
 */
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    login: String,
    password: String,
}

impl Credentials {
    /**
     * Validates and stores a login/password pair.
     *
     * Basic auth joins the two with a colon, so the login itself must not
     * contain one.
     */
    pub fn new(login: impl Into<String>, password: impl Into<String>) -> Result<Self> {
        let login = login.into();
        if login.contains(':') {
            return Err(ReportSenderError::Credentials(
                "basic-auth login must not contain ':'".into(),
            ));
        }
        Ok(Self {
            login,
            password: password.into(),
        })
    }

    /**
     * Credentials from the sender configuration.
     *
     * `None` when no login is configured (missing or the null sentinel).
     * A missing password is sent as empty.
     */
    pub fn from_config(config: &SenderConfig) -> Result<Option<Self>> {
        let login = config.login.as_deref();
        if is_null(login) {
            return Ok(None);
        }

        let password = config.password.as_deref();
        let password = if is_null(password) { "" } else { password.unwrap_or_default() };

        Self::new(login.unwrap_or_default(), password).map(Some)
    }

    /// Login as configured; logged by the sender, never the password.
    pub fn login(&self) -> &str {
        &self.login
    }

    /// `Authorization` header value: `Basic base64(login:password)`.
    pub fn header_value(&self) -> String {
        let raw = format!("{}:{}", self.login, self.password);
        format!("Basic {}", base64::engine::general_purpose::STANDARD.encode(raw))
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("login", &self.login)
            .field("password", &"<redacted>")
            .finish()
    }
}

// ---------------------------------------------------------------------------
// ServerReply
// ---------------------------------------------------------------------------

/// What the collection endpoint answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerReply {
    /// Numeric HTTP status.
    pub status: u16,

    /// Protocol version, status code and reason, e.g. `"HTTP/1.1 200 OK"`.
    pub status_line: String,

    /// Response body decoded as text.
    pub body: String,
}

impl ServerReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

// ---------------------------------------------------------------------------
// Transport
// ---------------------------------------------------------------------------

/**
 * Thin wrapper around `ureq::Agent` that POSTs one form body.
 */
pub struct Transport {
    agent: Agent,
}

impl Transport {
    /**
     * Creates a `Transport` with timeouts taken from the configuration.
     *
     * Unset timeouts keep the agent defaults.
     */
    pub fn new(config: &SenderConfig) -> Self {
        let agent: Agent = Agent::config_builder()
            .timeout_connect(config.connection_timeout_ms.map(Duration::from_millis))
            .timeout_global(config.request_timeout_ms.map(Duration::from_millis))
            .http_status_as_error(false)
            .build()
            .into();

        Self { agent }
    }

    /**
     * POSTs `body` to `url` as `application/x-www-form-urlencoded`.
     *
     * Adds an `Authorization` header when `credentials` is given.
     * Any failure to send the request or to read the response body is
     * returned as `ReportSenderError::Transport`.
     */
    pub fn post_form(
        &self,
        url: &str,
        body: &str,
        credentials: Option<&Credentials>,
    ) -> Result<ServerReply> {
        let mut request = self
            .agent
            .post(url)
            .header("Content-Type", FORM_CONTENT_TYPE)
            .header("User-Agent", SENDER_VERSION);

        if let Some(credentials) = credentials {
            request = request.header("Authorization", credentials.header_value().as_str());
        }

        let response = request.send(body)?;

        let status = response.status();
        let status_line = format!("{:?} {}", response.version(), status);
        let body = response.into_body().read_to_string()?;

        Ok(ServerReply {
            status: status.as_u16(),
            status_line,
            body,
        })
    }
}
