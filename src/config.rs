//! Gateway configuration types.
//!
//! [`GopayConfig`] carries the OAuth2 client credentials, the merchant
//! account id (goid), the API root and the token scope. It is immutable for
//! the lifetime of a session.

use std::{fmt, path::Path};

use serde::{Deserialize, Deserializer, Serialize};
use url::Url;

use crate::error::{GopayError, Result};

/// Default API root: the GoPay sandbox environment.
pub const DEFAULT_API_ROOT: &str = "https://gw.sandbox.gopay.com/api";

/// Default OAuth2 scope, covering all payment operations.
pub const DEFAULT_SCOPE: &str = "payment-all";

/// GoPay gateway configuration.
///
/// # Examples
///
/// ```
/// use gopay_client::config::GopayConfig;
///
/// let config = GopayConfig::new("client-id", "client-secret", "8123456789");
/// assert_eq!(config.api_root, "https://gw.sandbox.gopay.com/api");
/// assert_eq!(config.scope, "payment-all");
/// ```
///
/// From TOML (goid may be a string or an integer):
///
/// ```
/// use gopay_client::config::GopayConfig;
///
/// let toml = r#"
///     client_id = "client-id"
///     client_secret = "client-secret"
///     goid = 8123456789
/// "#;
///
/// let config = GopayConfig::from_toml(toml).unwrap();
/// assert_eq!(config.goid, "8123456789");
/// ```
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GopayConfig {
    /// OAuth2 client id issued by GoPay.
    pub client_id: String,

    /// OAuth2 client secret issued by GoPay.
    pub client_secret: String,

    /// Merchant account id. Accepted as a string or an integer in
    /// configuration input; stored as a string.
    #[serde(deserialize_with = "deserialize_goid")]
    pub goid: String,

    /// API root URL (default: the sandbox environment).
    #[serde(default = "default_api_root")]
    pub api_root: String,

    /// OAuth2 token scope (default: `payment-all`).
    #[serde(default = "default_scope")]
    pub scope: String,
}

impl GopayConfig {
    /// Creates a configuration with the default sandbox API root and scope.
    #[must_use]
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        goid: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            goid: goid.into(),
            api_root: default_api_root(),
            scope: default_scope(),
        }
    }

    /// Parses a configuration from TOML.
    ///
    /// # Errors
    ///
    /// Returns [`GopayError::Config`] if TOML parsing fails.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        toml::from_str(toml_str)
            .map_err(|e| GopayError::Config(format!("invalid TOML config: {e}")))
    }

    /// Reads and parses a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`GopayError::Config`] if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| GopayError::Config(format!("cannot read config file: {e}")))?;
        Self::from_toml(&content)
    }

    /// Validates the configuration.
    ///
    /// Checks that credentials and goid are non-empty and that `api_root`
    /// is a valid HTTPS URL.
    ///
    /// # Errors
    ///
    /// Returns [`GopayError::Config`] naming the offending field.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("client_id", &self.client_id),
            ("client_secret", &self.client_secret),
            ("goid", &self.goid),
            ("scope", &self.scope),
        ] {
            if value.is_empty() {
                return Err(GopayError::Config(format!("{name} must not be empty")));
            }
        }

        let url = Url::parse(&self.api_root)
            .map_err(|e| GopayError::Config(format!("invalid api_root '{}': {e}", self.api_root)))?;
        if url.scheme() != "https" {
            return Err(GopayError::Config(format!(
                "api_root must use HTTPS, got: {}",
                url.scheme()
            )));
        }

        Ok(())
    }
}

// Manual Debug so the client secret never lands in logs.
impl fmt::Debug for GopayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GopayConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("goid", &self.goid)
            .field("api_root", &self.api_root)
            .field("scope", &self.scope)
            .finish()
    }
}

fn default_api_root() -> String {
    DEFAULT_API_ROOT.to_owned()
}

fn default_scope() -> String {
    DEFAULT_SCOPE.to_owned()
}

/// Accepts the merchant id as either a string or an integer.
fn deserialize_goid<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Goid {
        Text(String),
        Number(u64),
    }

    Ok(match Goid::deserialize(deserializer)? {
        Goid::Text(s) => s,
        Goid::Number(n) => n.to_string(),
    })
}
