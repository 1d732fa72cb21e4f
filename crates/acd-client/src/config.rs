//! Client configuration
//!
//! Values are layered: built-in defaults, then an optional JSON file, then
//! `ACD_*` environment variables. The result is passed to
//! [`crate::AcdClient::new`] and never read from global state afterwards.

use std::{env, path::Path, time::Duration};

use serde::{Deserialize, Serialize};

use crate::error::{AcdError, Result};

pub const DEFAULT_SERVICE_URL: &str =
    "https://us-east.wh-acd.cloud.ibm.com/wh-acd/api";
pub const DEFAULT_API_VERSION: &str = "2023-01-01";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Environment variable naming the JSON config file read by [`AcdConfig::load`].
pub const CONFIG_FILE_ENV: &str = "ACD_CONFIG_FILE";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthKind {
    #[default]
    None,
    Bearer,
    Basic,
}

impl std::str::FromStr for AuthKind {
    type Err = AcdError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "none" | "noauth" => Ok(Self::None),
            "bearer" | "bearertoken" | "iam" => Ok(Self::Bearer),
            "basic" => Ok(Self::Basic),
            other => Err(AcdError::Config(format!(
                "unknown auth type '{}', expected one of: none, bearer, basic",
                other
            ))),
        }
    }
}

/// Credentials used to build an [`crate::auth::Authenticator`].
#[derive(Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AuthSettings {
    pub kind: AuthKind,
    pub bearer_token: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl std::fmt::Debug for AuthSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSettings")
            .field("kind", &self.kind)
            .field("bearer_token", &self.bearer_token.as_ref().map(|_| "<redacted>"))
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AcdConfig {
    /// Base URL of the service, without the `/v1` prefix.
    pub service_url: String,
    /// API version date sent as the `version` query parameter on every call.
    pub version: String,
    /// Skip TLS certificate verification. Only for test environments.
    pub disable_ssl_verification: bool,
    pub timeout_secs: u64,
    pub user_agent: Option<String>,
    pub auth: AuthSettings,
}

impl Default for AcdConfig {
    fn default() -> Self {
        Self {
            service_url: DEFAULT_SERVICE_URL.to_string(),
            version: DEFAULT_API_VERSION.to_string(),
            disable_ssl_verification: false,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: None,
            auth: AuthSettings::default(),
        }
    }
}

impl AcdConfig {
    pub fn new(service_url: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            service_url: service_url.into(),
            version: version.into(),
            ..Default::default()
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn user_agent(&self) -> String {
        self.user_agent
            .clone()
            .unwrap_or_else(|| format!("acd-client-rust/{}", env!("CARGO_PKG_VERSION")))
    }

    /// Loads the file named by `ACD_CONFIG_FILE` (if set) and applies the
    /// environment on top.
    pub async fn load() -> Result<Self> {
        let mut config = match env::var(CONFIG_FILE_ENV) {
            Ok(path) => load_config_from_file(Path::new(&path)).await,
            Err(_) => Self::default(),
        };
        config.apply_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Overrides fields from `ACD_*` environment variables that are set.
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_vars(|key| env::var(key).ok())
    }

    pub(crate) fn apply_vars<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("ACD_URL") {
            self.service_url = url;
        }
        if let Some(version) = lookup("ACD_VERSION") {
            self.version = version;
        }
        if let Some(flag) = lookup("ACD_DISABLE_SSL") {
            self.disable_ssl_verification = parse_bool(&flag).ok_or_else(|| {
                AcdError::Config(format!("ACD_DISABLE_SSL must be true or false, got '{}'", flag))
            })?;
        }
        if let Some(secs) = lookup("ACD_TIMEOUT_SECS") {
            self.timeout_secs = secs.trim().parse().map_err(|e| {
                AcdError::Config(format!("Invalid ACD_TIMEOUT_SECS '{}': {}", secs, e))
            })?;
        }
        if let Some(kind) = lookup("ACD_AUTH_TYPE") {
            self.auth.kind = kind.parse()?;
        }
        if let Some(token) = lookup("ACD_BEARER_TOKEN") {
            self.auth.bearer_token = Some(token);
        }
        if let Some(username) = lookup("ACD_USERNAME") {
            self.auth.username = Some(username);
        }
        if let Some(password) = lookup("ACD_PASSWORD") {
            self.auth.password = Some(password);
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        let url = self.service_url.trim();
        if url.is_empty() {
            return Err(AcdError::Config("service_url must not be empty".to_string()));
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(AcdError::Config(format!(
                "service_url must start with http:// or https://, got '{}'",
                url
            )));
        }
        if self.version.trim().is_empty() {
            return Err(AcdError::Config("version must not be empty".to_string()));
        }
        if self.timeout_secs == 0 {
            return Err(AcdError::Config("timeout_secs must be greater than zero".to_string()));
        }
        Ok(())
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Reads a JSON config file, falling back to defaults when the file is
/// missing, empty or malformed.
pub async fn load_config_from_file(path: &Path) -> AcdConfig {
    match tokio::fs::read_to_string(path).await {
        Ok(raw) if raw.trim().is_empty() => {
            tracing::warn!("Config file {} is empty, using defaults", path.display());
            AcdConfig::default()
        }
        Ok(raw) => match serde_json::from_str::<AcdConfig>(&raw) {
            Ok(config) => {
                tracing::debug!("Loaded ACD config from {}", path.display());
                config
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to parse config file {}: {}, using defaults",
                    path.display(),
                    e
                );
                AcdConfig::default()
            }
        },
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config file at {}, using defaults", path.display());
            AcdConfig::default()
        }
        Err(e) => {
            tracing::warn!("Failed to read config file {}: {}, using defaults", path.display(), e);
            AcdConfig::default()
        }
    }
}

pub async fn save_config_to_file(config: &AcdConfig, path: &Path) -> Result<()> {
    let raw = serde_json::to_string_pretty(config)
        .map_err(|e| AcdError::Config(format!("Failed to serialize config: {}", e)))?;
    tokio::fs::write(path, raw).await?;
    Ok(())
}
