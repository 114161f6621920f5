// VSD authentication
//
// The controller issues an API key in exchange for username/password at the
// fixed `v1_0/me` resource. The key is then presented on every request as
// `Authorization: XREST base64(user:apikey)` alongside the organization header.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer};
use tracing::debug;

use crate::error::Error;
use crate::session::Session;

/// Header naming the organization (enterprise) a request acts on behalf of.
pub const ORGANIZATION_HEADER: &str = "X-Nuage-Organization";

/// API version of the login resource; fixed regardless of the session's version.
pub const WHOAMI_API_VERSION: &str = "v1_0";

/// Path of the login resource under `/api/{WHOAMI_API_VERSION}/`.
pub const WHOAMI_PATH: &str = "me";

/// Encode an `Authorization` header value: `XREST base64(user:secret)`,
/// using the padded URL-safe alphabet the VSD expects.
pub fn xrest_authorization(user: &str, secret: &str) -> String {
    format!("XREST {}", URL_SAFE.encode(format!("{user}:{secret}")))
}

/// Server-issued credential returned by the login exchange.
///
/// Only the fields this client uses are typed; the API key itself is kept
/// in a `SecretString` so it never shows up in `Debug` output or logs.
#[derive(Debug, Deserialize)]
pub struct Credential {
    #[serde(rename = "APIKey", alias = "apiKey", deserialize_with = "secret_string")]
    api_key: SecretString,
    #[serde(rename = "APIKeyExpiry", alias = "apiKeyExpiry", default)]
    pub api_key_expiry: Option<i64>,
    #[serde(rename = "ID", default)]
    pub id: Option<String>,
    #[serde(rename = "userName")]
    pub user_name: String,
    #[serde(rename = "enterpriseName")]
    pub enterprise_name: String,
    #[serde(rename = "enterpriseID", default)]
    pub enterprise_id: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(rename = "firstName", default)]
    pub first_name: Option<String>,
    #[serde(rename = "lastName", default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(rename = "mobileNumber", default)]
    pub mobile_number: Option<String>,
    #[serde(rename = "entityScope", default)]
    pub entity_scope: Option<String>,
    #[serde(rename = "externalID", default)]
    pub external_id: Option<String>,
}

impl Credential {
    /// The API key presented in the XREST header.
    pub fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

fn secret_string<'de, D: Deserializer<'de>>(d: D) -> Result<SecretString, D::Error> {
    String::deserialize(d).map(SecretString::from)
}

impl Session {
    /// Exchange username/password for an API key.
    ///
    /// Sends one unauthenticated GET to `{base}/api/v1_0/me`. Anything but a
    /// 200 whose body is a JSON array with a decodable first element is an
    /// authentication failure; nothing is retried. On success the credential
    /// replaces whatever this session held before.
    pub async fn authenticate(
        &mut self,
        organization: &str,
        username: &str,
        password: &SecretString,
    ) -> Result<&Credential, Error> {
        let url = self.root_url(WHOAMI_API_VERSION, WHOAMI_PATH)?;

        debug!(%url, organization, username, "authenticating");

        let resp = self
            .http()
            .get(url)
            .header(ORGANIZATION_HEADER, organization)
            .header(
                AUTHORIZATION,
                xrest_authorization(username, password.expose_secret()),
            )
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await?;

        let status = resp.status();
        if status != reqwest::StatusCode::OK {
            let body = resp.text().await.unwrap_or_default();
            debug!(%status, "authentication rejected");
            return Err(Error::Authentication {
                message: format!("login failed (HTTP {status}): {body}"),
                status: Some(status.as_u16()),
            });
        }

        let body = resp.bytes().await?;
        let credential = decode_credential(&body)?;

        debug!(
            user = %credential.user_name,
            enterprise = %credential.enterprise_name,
            "authentication successful"
        );
        self.set_credential(credential);
        self.require_credential()
    }
}

fn decode_credential(body: &[u8]) -> Result<Credential, Error> {
    let mut tokens: Vec<Credential> =
        serde_json::from_slice(body).map_err(|e| Error::Authentication {
            message: format!("unable to decode credential: {e}"),
            status: Some(200),
        })?;
    if tokens.is_empty() {
        return Err(Error::Authentication {
            message: "controller returned an empty credential list".into(),
            status: Some(200),
        });
    }
    Ok(tokens.swap_remove(0))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn xrest_header_encodes_user_and_secret() {
        // base64("admin:secret") == "YWRtaW46c2VjcmV0"
        assert_eq!(
            xrest_authorization("admin", "secret"),
            "XREST YWRtaW46c2VjcmV0"
        );
    }

    #[test]
    fn xrest_header_uses_url_safe_alphabet() {
        // "u:~~~" encodes to "dTp+fn4=" in the standard alphabet
        assert_eq!(xrest_authorization("u", "~~~"), "XREST dTp-fn4=");
        assert_eq!(xrest_authorization("u", "???"), "XREST dTo_Pz8=");
    }

    #[test]
    fn decode_takes_first_element() {
        let body = br#"[
            {"APIKey": "k-1", "APIKeyExpiry": 1700000000000, "userName": "admin",
             "enterpriseName": "acme", "enterpriseID": "e-1", "role": "CSPROOT"},
            {"APIKey": "k-2", "userName": "other", "enterpriseName": "x"}
        ]"#;
        let credential = decode_credential(body).unwrap();
        assert_eq!(credential.api_key(), "k-1");
        assert_eq!(credential.enterprise_name, "acme");
        assert_eq!(credential.enterprise_id.as_deref(), Some("e-1"));
        assert_eq!(credential.api_key_expiry, Some(1_700_000_000_000));
    }

    #[test]
    fn decode_rejects_empty_array_and_garbage() {
        assert!(matches!(
            decode_credential(b"[]"),
            Err(Error::Authentication { .. })
        ));
        assert!(matches!(
            decode_credential(b"{\"APIKey\": \"k\"}"),
            Err(Error::Authentication { .. })
        ));
    }

    #[test]
    fn debug_output_redacts_api_key() {
        let credential =
            decode_credential(br#"[{"APIKey": "super-secret", "userName": "u", "enterpriseName": "e"}]"#)
                .unwrap();
        let debug = format!("{credential:?}");
        assert!(!debug.contains("super-secret"));
    }
}
