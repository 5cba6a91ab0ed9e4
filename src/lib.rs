//! # apache-status
//!
//! Fetches a web server's machine-readable status report (the Apache
//! `mod_status` `?auto` format) over HTTP and parses it into a typed,
//! immutable [`StatusReport`], including a derived worker utilization metric
//! computed from the scoreboard.
//!
//! ## Architecture
//!
//! - **`config`**: connection parameters (hostname, port, scheme, TLS policy,
//!   timeout) and endpoint URL handling
//! - **`fetch`**: the [`StatusFetcher`] boundary and its blocking
//!   [`HttpFetcher`] implementation
//! - **`report`**: the pure parser producing [`StatusReport`] records
//!
//! ## Usage
//!
//! ```no_run
//! use apache_status::{
//!     ConnectionConfig,
//!     HttpFetcher,
//!     StatusFetcher,
//!     StatusReport,
//! };
//!
//! # fn main() -> Result<(), apache_status::FetchError> {
//! let fetcher = HttpFetcher::new(ConnectionConfig::new("web01.example.com"))?;
//! let report = StatusReport::parse(fetcher.fetch()?);
//! println!("{:.0}% busy", report.utilization() * 100.0);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod fetch;
pub mod report;

pub use config::{
    ConnectionConfig,
    Scheme,
};
pub use fetch::{
    FetchError,
    HttpFetcher,
    StatusFetcher,
};
pub use report::StatusReport;
