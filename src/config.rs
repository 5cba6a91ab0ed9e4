//! Connection configuration for the status endpoint.
//!
//! Holds everything the fetcher needs to address one server: hostname, port,
//! scheme, the TLS verification policy, and a request timeout. Can be built
//! field by field or parsed from a full URL.

use eyre::Result;
use serde::{
    Deserialize,
    Serialize,
};
use std::{
    fmt,
    time::Duration,
};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    #[default]
    Http,
    Https,
}

impl Scheme {
    pub fn default_port(&self) -> u16 {
        match self {
            Scheme::Http => 80,
            Scheme::Https => 443,
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scheme::Http => write!(f, "http"),
            Scheme::Https => write!(f, "https"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionConfig {
    pub hostname: String,
    pub port: u16,
    pub scheme: Scheme,
    /// Skip TLS certificate and hostname verification. Off by default; only
    /// enable for legacy hosts that cannot present a valid certificate.
    pub accept_invalid_certs: bool,
    pub timeout: Duration,
}

impl ConnectionConfig {
    pub fn new(hostname: impl Into<String>) -> Self {
        Self {
            hostname: hostname.into(),
            port: Scheme::Http.default_port(),
            scheme: Scheme::Http,
            accept_invalid_certs: false,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Parse a full URL into a configuration, e.g. `https://web01.example.com:8443`.
    /// The port defaults from the scheme when the URL does not carry one.
    pub fn from_url(raw: &str) -> Result<Self> {
        let url = url::Url::parse(raw)?;

        let scheme = match url.scheme() {
            "http" => Scheme::Http,
            "https" => Scheme::Https,
            other => eyre::bail!("Unsupported scheme '{}' in URL: {}", other, raw),
        };
        let hostname = url
            .host_str()
            .ok_or_else(|| eyre::eyre!("No host found in URL: {}", raw))?
            .to_string();

        Ok(Self {
            hostname,
            port: url.port().unwrap_or_else(|| scheme.default_port()),
            scheme,
            accept_invalid_certs: false,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// The machine-readable status endpoint for this server.
    pub fn status_url(&self) -> String {
        format!(
            "{}://{}:{}/server-status/?auto",
            self.scheme, self.hostname, self.port
        )
    }
}
