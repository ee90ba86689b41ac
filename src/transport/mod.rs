//! Transport abstraction layer.
//!
//! This module provides a sealed [`Transport`] trait that performs a single
//! gateway request and normalizes whatever comes back into an
//! [`ApiResponse`]. The session never touches reqwest directly: it describes
//! the request (URL, verb, auth mode, body encoding) as an [`ApiRequest`]
//! and hands it to the transport.
//!
//! Normalization rules:
//! - the response body is JSON-decoded when possible, otherwise kept as raw
//!   text; a non-JSON body is a valid response shape, never an error;
//! - `success` is derived strictly from the HTTP status (2xx), independent
//!   of body content;
//! - network-level faults propagate as [`GopayError::Http`].
//!
//! [`GopayError::Http`]: crate::error::GopayError::Http
//!
//! # Examples
//!
//! ```rust,no_run
//! use gopay_client::transport::{
//!     ApiRequest, AuthMode, Encoding, HttpTransport, Method, Transport,
//! };
//!
//! # async fn example() -> gopay_client::error::Result<()> {
//! let transport = HttpTransport::new()?;
//!
//! let request = ApiRequest {
//!     url: "https://gw.sandbox.gopay.com/api/payments/payment/3000000001",
//!     method: Method::Get,
//!     auth: AuthMode::Bearer("token"),
//!     body: None,
//!     encoding: Encoding::None,
//! };
//!
//! let response = transport.execute(request).await?;
//! println!("status: {}, success: {}", response.status, response.success);
//! # Ok(())
//! # }
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;

pub mod config;
pub mod http;
pub(crate) mod sealed;

pub use config::HttpConfig;
pub use http::HttpTransport;

/// HTTP verbs used by the gateway API.
///
/// The gateway only ever uses GET and POST; refunds, voids and captures are
/// all POST operations on payment sub-resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// HTTP GET.
    Get,
    /// HTTP POST.
    Post,
}

impl Method {
    /// Returns the verb as an uppercase string.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request body encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// No request body.
    None,
    /// JSON body with `Content-Type: application/json`.
    Json,
    /// Form body with `Content-Type: application/x-www-form-urlencoded`.
    Form,
}

/// Authentication mode for a single request.
///
/// Token acquisition is the only operation that uses HTTP basic credentials;
/// everything else carries a bearer token.
#[derive(Debug, Clone, Copy)]
pub enum AuthMode<'a> {
    /// `Authorization: Bearer <token>` header.
    Bearer(&'a str),
    /// HTTP basic credentials (client id and secret).
    Basic {
        /// OAuth2 client id.
        id: &'a str,
        /// OAuth2 client secret.
        secret: &'a str,
    },
}

/// A single gateway request, fully described.
///
/// Built by the session from the [`crate::endpoint`] catalog plus its own
/// credentials and token state.
#[derive(Debug, Clone)]
pub struct ApiRequest<'a> {
    /// Absolute request URL.
    pub url: &'a str,
    /// HTTP verb.
    pub method: Method,
    /// Authentication mode.
    pub auth: AuthMode<'a>,
    /// Request body, if the operation has one.
    pub body: Option<&'a Value>,
    /// Body encoding; [`Encoding::None`] sends no body even if one is set.
    pub encoding: Encoding,
}

/// Response body: decoded JSON when the gateway sent JSON, raw text
/// otherwise.
///
/// Account statements, for example, arrive as CSV text; error pages may be
/// HTML. Both are valid non-error response shapes.
///
/// Serialization note: a `Text` body serializes as a plain JSON string, so a
/// snapshot round-trip restores it as `Json(Value::String)`. [`Self::as_text`]
/// treats both representations identically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ApiBody {
    /// Successfully decoded JSON document.
    Json(Value),
    /// Raw body text that did not parse as JSON.
    Text(String),
}

impl ApiBody {
    /// Parses raw body text, falling back to [`ApiBody::Text`] when the body
    /// is not valid JSON. This fallback never fails.
    #[must_use]
    pub fn parse(raw: String) -> Self {
        match serde_json::from_str(&raw) {
            Ok(value) => Self::Json(value),
            Err(_) => Self::Text(raw),
        }
    }

    /// Returns the decoded JSON document, if the body was JSON.
    #[must_use]
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Text(_) => None,
        }
    }

    /// Returns the body as text: the raw text for non-JSON bodies, or the
    /// string content when the JSON document is itself a string.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(raw) => Some(raw),
            Self::Json(Value::String(s)) => Some(s),
            Self::Json(_) => None,
        }
    }
}

/// Normalized gateway response.
///
/// Every transport call produces one of these, regardless of what the
/// gateway sent back. `success` mirrors the HTTP status and nothing else: a
/// well-formed JSON error payload with a 4xx status still has
/// `success = false`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    /// `true` iff `status` is in the 2xx range.
    pub success: bool,
    /// HTTP status code.
    pub status: u16,
    /// `Content-Type` response header, when present.
    pub content_type: Option<String>,
    /// Decoded-or-raw response body.
    pub body: ApiBody,
}

impl ApiResponse {
    /// Builds a normalized response; `success` is derived from `status`.
    #[must_use]
    pub fn new(status: u16, content_type: Option<String>, body: ApiBody) -> Self {
        Self { success: (200..300).contains(&status), status, content_type, body }
    }
}

/// Gateway transport abstraction.
///
/// This trait is sealed: the normalization contract above is part of the
/// library's behavior and only in-crate implementations can uphold it.
pub trait Transport: sealed::private::Sealed + Send + Sync {
    /// Executes one request and normalizes the result.
    ///
    /// # Errors
    ///
    /// Returns [`GopayError::Http`](crate::error::GopayError::Http) for
    /// network-level faults. Gateway errors (any non-2xx status) are NOT
    /// errors; they come back as a response with `success = false`.
    fn execute<'a>(
        &'a self,
        request: ApiRequest<'a>,
    ) -> impl Future<Output = Result<ApiResponse>> + Send + 'a;
}
