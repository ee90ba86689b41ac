//! Error types for the GoPay client.
//!
//! The error surface is deliberately small. The library raises an error only
//! for transport-level faults (DNS, connection, timeout) and for programmer
//! errors such as missing configuration. Gateway-level failures (a declined
//! payment, an unknown payment id, an expired token) are ordinary data: they
//! arrive as an [`ApiResponse`](crate::transport::ApiResponse) with
//! `success = false`, and callers branch on that field rather than catching
//! anything.
//!
//! # Examples
//!
//! ```
//! use gopay_client::error::{GopayError, Result};
//!
//! fn require_goid(goid: &str) -> Result<&str> {
//!     if goid.is_empty() {
//!         return Err(GopayError::Config("goid must not be empty".to_owned()));
//!     }
//!     Ok(goid)
//! }
//! ```

use thiserror::Error;

/// Result type alias for GoPay client operations.
///
/// All fallible functions in this crate return this type.
pub type Result<T> = std::result::Result<T, GopayError>;

/// Errors that can occur in the GoPay client.
///
/// # Error Recovery
///
/// - **Transport errors** ([`Http`](Self::Http)): transient network faults;
///   retry at the caller's discretion.
/// - **Configuration errors** ([`Config`](Self::Config)): fix the input and
///   reconstruct the session.
#[must_use = "errors should be handled, propagated, or explicitly panicked"]
#[derive(Debug, Error)]
pub enum GopayError {
    /// HTTP request failed before a gateway response was received.
    ///
    /// Wraps [`reqwest::Error`]: timeouts, connection refused, DNS
    /// resolution failures, TLS errors. A response with a non-2xx status is
    /// NOT this error; that is a normal
    /// [`ApiResponse`](crate::transport::ApiResponse) with
    /// `success = false`.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid or missing configuration.
    ///
    /// Raised at session construction when required credentials are absent,
    /// the API root is not a valid HTTPS URL, or a TOML configuration file
    /// cannot be parsed.
    #[error("invalid configuration: {0}")]
    Config(String),
}
