use thiserror::Error;

/// Top-level error type for the `nuage-api` crate.
///
/// Covers every failure mode of a VSD transaction: transport, missing or
/// rejected credentials, unexpected HTTP status, undecodable payloads, and
/// local field validation that short-circuits before any network I/O.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// An entity operation was attempted before `authenticate` succeeded.
    #[error("Not authenticated -- call authenticate before issuing requests")]
    NotAuthenticated,

    /// The `me` login exchange was rejected or returned an unusable body.
    #[error("Authentication failed: {message}")]
    Authentication {
        message: String,
        status: Option<u16>,
    },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, TLS handshake).
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS configuration error (unreadable CA file, client build failure).
    #[error("TLS error: {0}")]
    Tls(String),

    // ── API ─────────────────────────────────────────────────────────
    /// A response arrived but its status is not the one the verb expects.
    #[error("HTTP status code: {code} (expected {expected})")]
    UnexpectedStatus {
        code: u16,
        expected: u16,
        body: String,
    },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    /// An entity could not be encoded as a request payload.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // ── Local validation ────────────────────────────────────────────
    /// Required fields are missing; no request was sent.
    #[error("{entity}: {reason}")]
    Validation { entity: &'static str, reason: String },
}

impl Error {
    pub(crate) fn validation(entity: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            entity,
            reason: reason.into(),
        }
    }

    pub(crate) fn deserialization(err: &serde_json::Error, body: &[u8]) -> Self {
        Self::Deserialization {
            message: err.to_string(),
            body: String::from_utf8_lossy(body).into_owned(),
        }
    }

    /// The HTTP status carried by this error, if a response was received.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::UnexpectedStatus { code, .. } => Some(*code),
            Self::Authentication { status, .. } => *status,
            _ => None,
        }
    }

    /// Returns `true` if the controller answered 404.
    pub fn is_not_found(&self) -> bool {
        self.status_code() == Some(404)
    }

    /// Returns `true` for failures below HTTP: connect, DNS, TLS, timeout.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Tls(_))
    }

    /// Returns `true` if re-authenticating might resolve this error.
    pub fn is_auth_error(&self) -> bool {
        match self {
            Self::NotAuthenticated | Self::Authentication { .. } => true,
            Self::UnexpectedStatus { code, .. } => *code == 401,
            _ => false,
        }
    }

    /// Returns `true` if the request timed out.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport(e) if e.is_timeout())
    }
}
