//! CLI error types with miette diagnostics.
//!
//! Maps `nuage_api::Error` variants into user-facing errors with actionable
//! help text and a process exit code.

use miette::Diagnostic;
use thiserror::Error;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const PERMISSION: i32 = 5;
    pub const CONFLICT: i32 = 6;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to VSD at {url}")]
    #[diagnostic(
        code(nuage::connection_failed),
        help(
            "Check that the VSD is reachable and the API listens on port 8443.\n\
             URL: {url}"
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("TLS setup failed: {reason}")]
    #[diagnostic(
        code(nuage::tls_error),
        help("Check ca_cert in your profile, or use --insecure (-k) for self-signed controllers.")
    )]
    TlsError { reason: String },

    #[error("Request timed out")]
    #[diagnostic(
        code(nuage::timeout),
        help("Increase the timeout with --timeout or check controller responsiveness.")
    )]
    Timeout,

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(nuage::auth_failed),
        help(
            "Verify the organization, username and password.\n\
             Store a password with: nuage config set-password"
        )
    )]
    AuthFailed { message: String },

    #[error("Not connected to a VSD")]
    #[diagnostic(
        code(nuage::not_connected),
        help("In the shell, run `setconn` then `makeconn`.")
    )]
    NotConnected,

    #[error("No credentials configured for profile '{profile}'")]
    #[diagnostic(
        code(nuage::no_credentials),
        help(
            "Configure a profile with: nuage config init\n\
             Or set NUAGE_ORGANIZATION, NUAGE_USERNAME and NUAGE_PASSWORD."
        )
    )]
    NoCredentials { profile: String },

    #[error("Permission denied: {message}")]
    #[diagnostic(code(nuage::permission_denied))]
    PermissionDenied { message: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("Not found: {message}")]
    #[diagnostic(
        code(nuage::not_found),
        help("List the parent collection with `nuage get <collection>` to see valid IDs.")
    )]
    NotFound { message: String },

    #[error("Conflict: {message}")]
    #[diagnostic(code(nuage::conflict))]
    Conflict { message: String },

    // ── API ──────────────────────────────────────────────────────────
    #[error("VSD returned HTTP {code} (expected {expected}): {message}")]
    #[diagnostic(code(nuage::api_error))]
    ApiError {
        code: u16,
        expected: u16,
        message: String,
    },

    #[error("Could not decode VSD response: {message}")]
    #[diagnostic(code(nuage::decode), help("Run with -vv to see the raw transaction."))]
    Decode { message: String },

    // ── Usage / validation ───────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(code(nuage::usage), help("{usage}"))]
    Usage { message: String, usage: String },

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(nuage::validation))]
    Validation { field: String, reason: String },

    #[error("Deletion of {what} requires confirmation")]
    #[diagnostic(
        code(nuage::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { what: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(nuage::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: nuage config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No VSD endpoint configured")]
    #[diagnostic(
        code(nuage::no_config),
        help(
            "Create a profile with: nuage config init\n\
             Or pass --endpoint. Expected config at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(nuage::config))]
    Config(Box<figment::Error>),

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    #[diagnostic(code(nuage::json))]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    #[diagnostic(code(nuage::yaml))]
    Yaml(#[from] serde_yaml::Error),
}

impl From<figment::Error> for CliError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } | Self::TlsError { .. } => exit_code::CONNECTION,
            Self::Timeout => exit_code::TIMEOUT,
            Self::AuthFailed { .. } | Self::NotConnected | Self::NoCredentials { .. } => {
                exit_code::AUTH
            }
            Self::PermissionDenied { .. } => exit_code::PERMISSION,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Conflict { .. } => exit_code::CONFLICT,
            Self::Usage { .. } | Self::Validation { .. } | Self::NonInteractiveRequiresYes { .. } => {
                exit_code::USAGE
            }
            _ => exit_code::GENERAL,
        }
    }

    pub(crate) fn usage(message: impl Into<String>, usage: impl Into<String>) -> Self {
        Self::Usage {
            message: message.into(),
            usage: usage.into(),
        }
    }
}

// ── nuage_api::Error → CliError mapping ──────────────────────────────

impl From<nuage_api::Error> for CliError {
    fn from(err: nuage_api::Error) -> Self {
        use nuage_api::Error as E;

        match err {
            E::NotAuthenticated => Self::NotConnected,
            E::Authentication { message, .. } => Self::AuthFailed { message },

            E::Transport(e) if e.is_timeout() => Self::Timeout,
            E::Transport(e) => Self::ConnectionFailed {
                url: e
                    .url()
                    .map_or_else(|| "(unknown)".into(), ToString::to_string),
                source: Box::new(e),
            },
            E::Tls(reason) => Self::TlsError { reason },
            E::InvalidUrl(e) => Self::Validation {
                field: "endpoint".into(),
                reason: e.to_string(),
            },

            E::UnexpectedStatus {
                code,
                expected,
                body,
            } => {
                let message = vsd_message(&body);
                match code {
                    401 => Self::AuthFailed { message },
                    403 => Self::PermissionDenied { message },
                    404 => Self::NotFound { message },
                    409 => Self::Conflict { message },
                    _ => Self::ApiError {
                        code,
                        expected,
                        message,
                    },
                }
            }

            E::Deserialization { message, .. } => Self::Decode { message },
            E::Serialization(e) => Self::Json(e),
            E::Validation { entity, reason } => Self::Validation {
                field: entity.into(),
                reason,
            },
        }
    }
}

/// Pull a readable message out of a VSD error body.
///
/// The controller answers with
/// `{"errors": [{"property": .., "descriptions": [{"title": .., "description": ..}]}]}`;
/// anything else is passed through trimmed.
pub fn vsd_message(body: &str) -> String {
    let parsed: Option<serde_json::Value> = serde_json::from_str(body).ok();
    let description = parsed.as_ref().and_then(|v| {
        let desc = v.pointer("/errors/0/descriptions/0")?;
        desc.get("description")
            .or_else(|| desc.get("title"))
            .and_then(serde_json::Value::as_str)
    });

    match description {
        Some(text) => text.to_owned(),
        None if body.trim().is_empty() => "(empty response body)".into(),
        None => body.trim().to_owned(),
    }
}
