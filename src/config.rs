//! Client configuration
//!
//! Resolves the IDR base URL from an explicit override or a named
//! environment, and validates credentials. All checks run in
//! [`ClientConfigBuilder::build`], so a misconfigured client never reaches
//! the network.

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Timeout applied to every IDR request
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Environment variable holding the IDR username
pub const ENV_USER: &str = "CVE_USER";
/// Environment variable holding the organization short name
pub const ENV_ORG: &str = "CVE_ORG";
/// Environment variable holding the API key
pub const ENV_API_KEY: &str = "CVE_API_KEY";
/// Environment variable holding the environment name
pub const ENV_ENVIRONMENT: &str = "CVE_ENVIRONMENT";
/// Environment variable holding an explicit API URL
pub const ENV_API_URL: &str = "CVE_API_URL";

// ============================================================================
// Environment
// ============================================================================

/// Named IDR deployment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    /// Production service
    #[default]
    Prod,
    /// Development/test service
    Dev,
}

impl Environment {
    /// Base URL of this environment
    pub fn base_url(self) -> &'static str {
        match self {
            Self::Prod => "https://cveawg.mitre.org/api/",
            Self::Dev => "https://cveawg-dev.mitre.org/api/",
        }
    }

    /// Name used on the command line and in `CVE_ENVIRONMENT`
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Prod => "prod",
            Self::Dev => "dev",
        }
    }
}

impl FromStr for Environment {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "prod" => Ok(Self::Prod),
            "dev" => Ok(Self::Dev),
            other => Err(Error::config(format!("Unknown IDR environment: {other}"))),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Error Policy
// ============================================================================

/// What the transport does with HTTP error statuses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Convert 4xx/5xx responses into [`Error::Idr`]
    #[default]
    Raise,
    /// Hand every response back to the caller untouched
    Passthrough,
}

// ============================================================================
// Client Config
// ============================================================================

/// Validated, immutable connection configuration
#[derive(Clone)]
pub struct ClientConfig {
    base_url: String,
    username: String,
    org: String,
    api_key: String,
    error_policy: ErrorPolicy,
}

impl ClientConfig {
    /// Create a new config builder
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Build a config from the `CVE_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = Self::builder();
        if let Some(username) = lookup(ENV_USER) {
            builder = builder.username(username);
        }
        if let Some(org) = lookup(ENV_ORG) {
            builder = builder.org(org);
        }
        if let Some(api_key) = lookup(ENV_API_KEY) {
            builder = builder.api_key(api_key);
        }
        if let Some(env) = lookup(ENV_ENVIRONMENT) {
            builder = builder.environment(env);
        }
        if let Some(url) = lookup(ENV_API_URL).filter(|u| !u.is_empty()) {
            builder = builder.url(url);
        }
        builder.build()
    }

    /// Resolved base URL, always ending in `/`
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// IDR username
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Organization short name
    pub fn org(&self) -> &str {
        &self.org
    }

    /// API key
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Error status handling
    pub fn error_policy(&self) -> ErrorPolicy {
        self.error_policy
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("org", &self.org)
            .field("api_key", &"<redacted>")
            .field("error_policy", &self.error_policy)
            .finish()
    }
}

/// Builder for [`ClientConfig`]
#[derive(Debug, Clone)]
pub struct ClientConfigBuilder {
    environment: Option<String>,
    url: Option<String>,
    username: Option<String>,
    org: Option<String>,
    api_key: Option<String>,
    error_policy: ErrorPolicy,
}

impl Default for ClientConfigBuilder {
    fn default() -> Self {
        Self {
            environment: Some(Environment::default().as_str().to_string()),
            url: None,
            username: None,
            org: None,
            api_key: None,
            error_policy: ErrorPolicy::default(),
        }
    }
}

impl ClientConfigBuilder {
    /// Select a named environment ("prod" or "dev")
    #[must_use]
    pub fn environment(mut self, name: impl Into<String>) -> Self {
        self.environment = Some(name.into());
        self
    }

    /// Clear the environment, so only an explicit URL can resolve
    #[must_use]
    pub fn no_environment(mut self) -> Self {
        self.environment = None;
        self
    }

    /// Set an explicit base URL, overriding the environment
    #[must_use]
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Set the username
    #[must_use]
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Set the organization short name
    #[must_use]
    pub fn org(mut self, org: impl Into<String>) -> Self {
        self.org = Some(org.into());
        self
    }

    /// Set the API key
    #[must_use]
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the error policy
    #[must_use]
    pub fn error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.error_policy = policy;
        self
    }

    /// Validate and build the config
    pub fn build(self) -> Result<ClientConfig> {
        let username = required(self.username, "username")?;
        let org = required(self.org, "org")?;
        let api_key = required(self.api_key, "api_key")?;

        let base_url = match self.url {
            Some(url) => url,
            None => self
                .environment
                .as_deref()
                .and_then(|name| name.parse::<Environment>().ok())
                .map(|env| env.base_url().to_string())
                .ok_or_else(|| Error::config("Missing URL for IDR"))?,
        };

        Ok(ClientConfig {
            base_url: with_trailing_slash(base_url),
            username,
            org,
            api_key,
            error_policy: self.error_policy,
        })
    }
}

fn required(value: Option<String>, field: &str) -> Result<String> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| Error::missing_config_field(field))
}

fn with_trailing_slash(mut url: String) -> String {
    if !url.ends_with('/') {
        url.push('/');
    }
    url
}
