// VSD session and transaction executor
//
// A `Session` owns the HTTP client, the controller base URL, the API version
// tag and (after `authenticate`) the credential. Every entity operation goes
// through `execute`, which attaches the organization and XREST headers and
// hands back the raw status and body without interpreting them.

use bytes::Bytes;
use reqwest::Method;
use reqwest::header::CONTENT_TYPE;
use tracing::debug;
use url::Url;

use crate::auth::{Credential, ORGANIZATION_HEADER, xrest_authorization};
use crate::error::Error;
use crate::transport::TransportConfig;

/// API version the entity models in this crate were written against.
pub const DEFAULT_API_VERSION: &str = "v3_2";

/// Port the VSD API listens on.
pub const DEFAULT_API_PORT: u16 = 8443;

/// Build the conventional API root for a controller address:
/// `https://{host}:8443/nuage`.
pub fn base_url_for_host(host: &str) -> Result<Url, Error> {
    let host = if host.contains(':') && !host.starts_with('[') {
        format!("[{host}]")
    } else {
        host.to_owned()
    };
    Ok(Url::parse(&format!(
        "https://{host}:{DEFAULT_API_PORT}/nuage"
    ))?)
}

/// Everything needed to construct a `Session`.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// API root, e.g. `https://10.0.0.5:8443/nuage`.
    pub base_url: Url,
    /// Version tag inserted into every entity path, e.g. `v3_2`.
    pub api_version: String,
    pub transport: TransportConfig,
}

impl SessionConfig {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            api_version: DEFAULT_API_VERSION.to_owned(),
            transport: TransportConfig::default(),
        }
    }

    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    pub fn with_transport(mut self, transport: TransportConfig) -> Self {
        self.transport = transport;
        self
    }
}

/// Raw outcome of one transaction: the status and body, uninterpreted.
#[derive(Debug, Clone)]
pub struct Reply {
    pub status: u16,
    pub body: Bytes,
}

/// An authenticated (or not yet authenticated) connection to a VSD.
///
/// The credential is read-only once `authenticate` has stored it, so a
/// `&Session` can be shared freely. Re-authenticating needs `&mut self`,
/// which the borrow checker keeps exclusive of in-flight requests.
pub struct Session {
    http: reqwest::Client,
    base_url: Url,
    api_version: String,
    credential: Option<Credential>,
}

impl Session {
    /// Create an unauthenticated session from a `SessionConfig`.
    pub fn new(config: &SessionConfig) -> Result<Self, Error> {
        let http = config.transport.build_client()?;
        Ok(Self::with_client(
            http,
            config.base_url.clone(),
            config.api_version.clone(),
        ))
    }

    /// Create a session around a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url, api_version: impl Into<String>) -> Self {
        Self {
            http,
            base_url,
            api_version: api_version.into(),
            credential: None,
        }
    }

    /// The controller API root.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The API version tag, e.g. `v3_2`.
    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    /// The active credential, if `authenticate` has succeeded.
    pub fn credential(&self) -> Option<&Credential> {
        self.credential.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.credential.is_some()
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    pub(crate) fn set_credential(&mut self, credential: Credential) {
        self.credential = Some(credential);
    }

    /// Drop the active credential. Subsequent operations fail with
    /// `NotAuthenticated` until `authenticate` is called again.
    pub fn clear_credential(&mut self) {
        self.credential = None;
    }

    pub(crate) fn require_credential(&self) -> Result<&Credential, Error> {
        self.credential.as_ref().ok_or(Error::NotAuthenticated)
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build `{base}/api/{version}/{path}`. No validation of `path` is done;
    /// a malformed path surfaces as whatever status the controller returns.
    pub fn api_url(&self, path: &str) -> Result<Url, Error> {
        self.root_url(&self.api_version, path)
    }

    /// Build `{base}/api/{version}/{path}` for an explicit version tag.
    pub(crate) fn root_url(&self, version: &str, path: &str) -> Result<Url, Error> {
        let full = format!(
            "{}/api/{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            version,
            path.trim_start_matches('/')
        );
        Ok(Url::parse(&full)?)
    }

    // ── Transaction executor ─────────────────────────────────────────

    /// Perform one authenticated HTTP call.
    ///
    /// Fails with `NotAuthenticated` before touching the network if no
    /// credential is held. Any HTTP response, whatever its status, is a
    /// successful transaction; only transport failures are errors. For POST
    /// a non-empty `payload` is sent verbatim as the request body.
    pub async fn execute(
        &self,
        method: Method,
        url: Url,
        payload: Option<&[u8]>,
    ) -> Result<Reply, Error> {
        let credential = self.require_credential()?;

        debug!(%method, %url, "VSD transaction");

        let mut request = self
            .http
            .request(method.clone(), url)
            .header(ORGANIZATION_HEADER, credential.enterprise_name.as_str())
            .header(
                reqwest::header::AUTHORIZATION,
                xrest_authorization(&credential.user_name, credential.api_key()),
            )
            .header(CONTENT_TYPE, "application/json");

        if method == Method::POST {
            if let Some(body) = payload.filter(|p| !p.is_empty()) {
                request = request.body(body.to_vec());
            }
        }

        let resp = request.send().await?;
        let status = resp.status().as_u16();
        let body = resp.bytes().await?;

        debug!(status, bytes = body.len(), "VSD response");
        Ok(Reply { status, body })
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("base_url", &self.base_url.as_str())
            .field("api_version", &self.api_version)
            .field("credential", &self.credential)
            .finish_non_exhaustive()
    }
}

impl std::fmt::Display for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Endpoint URL: [{}]", self.base_url)?;
        writeln!(f, "API version:  [{}]", self.api_version)?;
        match &self.credential {
            Some(c) => write!(
                f,
                "Connected as user [{}], enterprise [{}]",
                c.user_name, c.enterprise_name
            ),
            None => write!(f, "Not connected"),
        }
    }
}
