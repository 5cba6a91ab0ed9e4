//! Fetching the raw status report over HTTP.
//!
//! The [`StatusFetcher`] trait is the seam between the network and the
//! parser: anything that can produce a raw `?auto` body will do, so the
//! parser and its consumers are testable without a live server. A transport
//! failure is a [`FetchError`], never an empty success — callers can always
//! tell "server unreachable" apart from "server reachable but field absent".

use crate::config::ConnectionConfig;
use reqwest::StatusCode;
use tracing::{
    debug,
    warn,
};

#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    #[error("The status request could not be completed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("The server answered {status} for {url}")]
    UnexpectedStatus { status: StatusCode, url: String },
}

/// Source of raw status report bodies.
pub trait StatusFetcher {
    fn fetch(&self) -> Result<String, FetchError>;
}

/// Blocking HTTP fetcher for the `/server-status/?auto` endpoint.
pub struct HttpFetcher {
    config: ConnectionConfig,
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    pub fn new(config: ConnectionConfig) -> Result<Self, FetchError> {
        if config.accept_invalid_certs {
            warn!(
                hostname = %config.hostname,
                "TLS certificate verification is disabled for this host"
            );
        }

        let client = reqwest::blocking::Client::builder()
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .timeout(config.timeout)
            .build()?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &ConnectionConfig {
        &self.config
    }
}

impl StatusFetcher for HttpFetcher {
    fn fetch(&self) -> Result<String, FetchError> {
        let url = self.config.status_url();
        debug!(%url, "Requesting server status");

        let response = self.client.get(&url).send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::UnexpectedStatus { status, url });
        }

        Ok(response.text()?)
    }
}
