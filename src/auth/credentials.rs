//! IDR credential headers

use crate::config::ClientConfig;
use reqwest::RequestBuilder;
use std::fmt;

/// Header carrying the API key
pub const HEADER_API_KEY: &str = "CVE-API-KEY";
/// Header carrying the organization short name
pub const HEADER_API_ORG: &str = "CVE-API-ORG";
/// Header carrying the username
pub const HEADER_API_USER: &str = "CVE-API-USER";

/// Credentials applied to every IDR request
#[derive(Clone)]
pub struct Credentials {
    username: String,
    org: String,
    api_key: String,
}

impl Credentials {
    /// Create credentials from their parts
    pub fn new(
        username: impl Into<String>,
        org: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            org: org.into(),
            api_key: api_key.into(),
        }
    }

    /// Take the credentials out of a validated config
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.username(), config.org(), config.api_key())
    }

    /// Organization short name
    pub fn org(&self) -> &str {
        &self.org
    }

    /// Username
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Apply the authentication headers to a request builder
    pub fn apply(&self, req: RequestBuilder) -> RequestBuilder {
        req.header(HEADER_API_KEY, &self.api_key)
            .header(HEADER_API_ORG, &self.org)
            .header(HEADER_API_USER, &self.username)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("org", &self.org)
            .field("api_key", &"<redacted>")
            .finish()
    }
}
