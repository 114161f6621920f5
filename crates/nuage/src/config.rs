//! CLI-owned configuration: TOML profiles, credential resolution, and
//! translation to `nuage_api::SessionConfig`.
//!
//! The library never sees these types; it receives a pre-built
//! `SessionConfig` and the login triple.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use url::Url;

use nuage_api::session::DEFAULT_API_VERSION;
use nuage_api::{SessionConfig, TlsMode, TransportConfig, base_url_for_host};

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Service name for system keyring entries.
pub const KEYRING_SERVICE: &str = "nuage";

// ── TOML config structs ──────────────────────────────────────────────

#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name (used when --profile is not specified).
    pub default_profile: Option<String>,

    #[serde(default)]
    pub defaults: Defaults,

    /// Named VSD profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// VSDs ship with self-signed certificates, so this starts out `true`.
    #[serde(default = "default_insecure")]
    pub insecure: bool,

    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            api_version: default_api_version(),
            insecure: default_insecure(),
            timeout: default_timeout(),
        }
    }
}

fn default_api_version() -> String {
    DEFAULT_API_VERSION.into()
}
fn default_insecure() -> bool {
    true
}
fn default_timeout() -> u64 {
    30
}

/// One VSD login.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Profile {
    /// VSD IP/hostname, or a full API root URL.
    pub endpoint: String,

    /// Enterprise (organization) to log in to, e.g. "csp".
    pub organization: String,

    pub username: String,

    /// Password (plaintext -- prefer keyring or NUAGE_PASSWORD).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,

    /// Path to the controller's CA certificate (PEM).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ca_cert: Option<PathBuf>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub insecure: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
}

// ── Config file path ─────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "nuage", "nuage").map_or_else(
        || {
            let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
            p.push(".config");
            p.push("nuage");
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

// ── Config loading ───────────────────────────────────────────────────

/// Load the full Config from defaults, the TOML file and `NUAGE_*` env.
///
/// Nested keys use a double underscore: `NUAGE_DEFAULTS__TIMEOUT=60`.
pub fn load_config() -> Result<Config, CliError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(config_path()))
        .merge(Env::prefixed("NUAGE_").split("__"));

    Ok(figment.extract()?)
}

/// Load config, returning a default if the file is missing or unreadable.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

pub fn save_config(cfg: &Config) -> Result<(), CliError> {
    let path = config_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg).map_err(|e| CliError::Validation {
        field: "config".into(),
        reason: format!("failed to serialize config: {e}"),
    })?;
    std::fs::write(&path, toml_str)?;
    Ok(())
}

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

// ── Connection settings ──────────────────────────────────────────────

/// Everything needed to open and authenticate a `Session`, with every
/// piece optional until it is actually used. The shell edits these in
/// place through `setconn`.
pub struct ConnSettings {
    pub profile: String,
    pub endpoint: Option<String>,
    pub organization: Option<String>,
    pub username: Option<String>,
    pub password: Option<SecretString>,
    pub api_version: String,
    pub transport: TransportConfig,
}

impl ConnSettings {
    /// Merge the active profile (if any) with flag and env overrides.
    pub fn resolve(global: &GlobalOpts) -> Result<Self, CliError> {
        let cfg = load_config_or_default();
        let profile_name = active_profile_name(global, &cfg);

        let profile = match cfg.profiles.get(&profile_name) {
            Some(p) => Some(p),
            // Naming a profile that doesn't exist is an error; falling back
            // from the implicit default is not.
            None if global.profile.is_some() => {
                return Err(CliError::ProfileNotFound {
                    available: available_profiles(&cfg),
                    name: profile_name,
                });
            }
            None => None,
        };

        let pick = |flag: Option<&String>, from_profile: fn(&Profile) -> &String| {
            flag.cloned()
                .or_else(|| profile.map(from_profile).filter(|v| !v.is_empty()).cloned())
        };

        let endpoint = pick(global.endpoint.as_ref(), |p| &p.endpoint);
        let organization = pick(global.organization.as_ref(), |p| &p.organization);
        let username = pick(global.username.as_ref(), |p| &p.username);
        let password = resolve_password(profile, &profile_name);

        let api_version = global
            .api_version
            .clone()
            .or_else(|| profile.and_then(|p| p.api_version.clone()))
            .unwrap_or_else(|| cfg.defaults.api_version.clone());

        let timeout = global
            .timeout
            .or_else(|| profile.and_then(|p| p.timeout))
            .unwrap_or(cfg.defaults.timeout);

        let tls = if global.insecure {
            TlsMode::DangerAcceptInvalid
        } else if let Some(ca) = profile.and_then(|p| p.ca_cert.clone()) {
            TlsMode::CustomCa(ca)
        } else if profile
            .and_then(|p| p.insecure)
            .unwrap_or(cfg.defaults.insecure)
        {
            TlsMode::DangerAcceptInvalid
        } else {
            TlsMode::System
        };

        Ok(Self {
            profile: profile_name,
            endpoint,
            organization,
            username,
            password,
            api_version,
            transport: TransportConfig::default()
                .with_tls(tls)
                .with_timeout(Duration::from_secs(timeout)),
        })
    }

    /// API root for the configured endpoint.
    pub fn base_url(&self) -> Result<Url, CliError> {
        let endpoint = self.endpoint.as_deref().ok_or_else(|| CliError::NoConfig {
            path: config_path().display().to_string(),
        })?;
        parse_endpoint(endpoint)
    }

    pub fn session_config(&self) -> Result<SessionConfig, CliError> {
        Ok(SessionConfig::new(self.base_url()?)
            .with_api_version(self.api_version.clone())
            .with_transport(self.transport.clone()))
    }

    /// Organization, username and password, all required.
    pub fn login(&self) -> Result<(&str, &str, &SecretString), CliError> {
        match (&self.organization, &self.username, &self.password) {
            (Some(org), Some(user), Some(pass)) => Ok((org, user, pass)),
            _ => Err(CliError::NoCredentials {
                profile: self.profile.clone(),
            }),
        }
    }
}

/// Accept either a bare address (`10.0.0.5`) or a full API root URL.
pub fn parse_endpoint(endpoint: &str) -> Result<Url, CliError> {
    let invalid = |reason: String| CliError::Validation {
        field: "endpoint".into(),
        reason,
    };

    if endpoint.contains("://") {
        Url::parse(endpoint).map_err(|e| invalid(format!("invalid URL '{endpoint}': {e}")))
    } else {
        base_url_for_host(endpoint).map_err(|e| invalid(e.to_string()))
    }
}

pub fn available_profiles(cfg: &Config) -> String {
    let mut names: Vec<_> = cfg.profiles.keys().cloned().collect();
    names.sort();
    if names.is_empty() {
        "(none)".into()
    } else {
        names.join(", ")
    }
}

// ── Credential helpers ───────────────────────────────────────────────

pub fn keyring_key(profile_name: &str) -> String {
    format!("{profile_name}/password")
}

/// Password chain: NUAGE_PASSWORD, then system keyring, then plaintext profile.
fn resolve_password(profile: Option<&Profile>, profile_name: &str) -> Option<SecretString> {
    if let Ok(pw) = std::env::var("NUAGE_PASSWORD") {
        return Some(SecretString::from(pw));
    }

    if let Ok(entry) = keyring::Entry::new(KEYRING_SERVICE, &keyring_key(profile_name)) {
        if let Ok(pw) = entry.get_password() {
            return Some(SecretString::from(pw));
        }
    }

    profile
        .and_then(|p| p.password.clone())
        .map(SecretString::from)
}
