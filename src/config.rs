//! Runtime configuration loaded from the environment.

use crate::{
    error::{ClashError, Result},
    BASE_URL_ENV_VAR, HOST_ENV_VAR, PORT_ENV_VAR, TOKEN_ENV_VAR,
};
use reqwest::header::HeaderValue;
use std::fmt;

/// Base URL of the Clash of Clans public API.
pub const DEFAULT_BASE_URL: &str = "https://api.clashofclans.com/v1";
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3000;

/// Bearer credential for the upstream API.
///
/// Stored as a ready-made, sensitive `Authorization` header value so it is
/// validated once at startup and never printed.
#[derive(Clone)]
pub struct BearerToken(HeaderValue);

impl BearerToken {
    pub fn new(token: &str) -> Result<Self> {
        let mut value = HeaderValue::from_str(&format!("Bearer {token}"))?;
        value.set_sensitive(true);
        Ok(Self(value))
    }

    pub fn header_value(&self) -> &HeaderValue {
        &self.0
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(<redacted>)")
    }
}

/// What a lookup client needs: the credential and where to send it.
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    pub token: BearerToken,
    pub base_url: String,
}

impl UpstreamConfig {
    /// Load the upstream settings from the process environment, after reading
    /// a `.env` file if one exists. Server settings are not consulted.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = lookup(TOKEN_ENV_VAR)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ClashError::MissingToken {
                env_var: TOKEN_ENV_VAR.to_string(),
            })?;

        Ok(Self {
            token: BearerToken::new(&token)?,
            base_url: lookup(BASE_URL_ENV_VAR).unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        })
    }

    pub fn with_base_url(mut self, base_url: Option<String>) -> Self {
        if let Some(base_url) = base_url {
            self.base_url = base_url;
        }
        self
    }
}

/// Full server configuration: upstream settings plus the bind address.
#[derive(Debug, Clone)]
pub struct Config {
    pub upstream: UpstreamConfig,
    pub host: String,
    pub port: u16,
}

impl Config {
    /// Load configuration from the process environment, after reading a
    /// `.env` file if one exists.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let upstream = UpstreamConfig::from_lookup(&lookup)?;

        let port = match lookup(PORT_ENV_VAR) {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|_| ClashError::InvalidPort { value: raw })?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            upstream,
            host: lookup(HOST_ENV_VAR).unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
        })
    }

    /// Apply command-line overrides on top of the environment.
    pub fn with_overrides(
        mut self,
        host: Option<String>,
        port: Option<u16>,
        base_url: Option<String>,
    ) -> Self {
        if let Some(host) = host {
            self.host = host;
        }
        if let Some(port) = port {
            self.port = port;
        }
        self.upstream = self.upstream.with_base_url(base_url);
        self
    }
}
