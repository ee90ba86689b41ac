//! Endpoint catalog for the gateway REST API.
//!
//! Stateless constructors mapping every gateway operation to its path, HTTP
//! verb and body encoding. This module is the single source of truth for the
//! wire shape of each operation; the session prepends the configured API
//! root and supplies auth.
//!
//! Token acquisition is the only operation authenticated with HTTP basic
//! credentials; every other endpoint expects a bearer token.

use crate::transport::{Encoding, Method};

/// One resolved gateway endpoint: path, verb and body encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    /// Request path relative to the API root, with ids interpolated.
    pub path: String,
    /// HTTP verb.
    pub method: Method,
    /// Request body encoding.
    pub encoding: Encoding,
}

impl Endpoint {
    fn new(path: String, method: Method, encoding: Encoding) -> Self {
        Self { path, method, encoding }
    }
}

/// OAuth2 token acquisition. Form-encoded, HTTP basic auth.
#[must_use]
pub fn token() -> Endpoint {
    Endpoint::new("/oauth2/token".to_owned(), Method::Post, Encoding::Form)
}

/// Payment creation.
#[must_use]
pub fn create_payment() -> Endpoint {
    Endpoint::new("/payments/payment".to_owned(), Method::Post, Encoding::Json)
}

/// Payment status inquiry.
#[must_use]
pub fn payment_status(id: &str) -> Endpoint {
    Endpoint::new(format!("/payments/payment/{id}"), Method::Get, Encoding::None)
}

/// Full or partial refund of a payment. The amount travels form-encoded.
#[must_use]
pub fn refund_payment(id: &str) -> Endpoint {
    Endpoint::new(format!("/payments/payment/{id}/refund"), Method::Post, Encoding::Form)
}

/// On-demand recurrence creation against a parent recurring payment.
#[must_use]
pub fn create_recurrence(id: &str) -> Endpoint {
    Endpoint::new(format!("/payments/payment/{id}/create-recurrence"), Method::Post, Encoding::Json)
}

/// Recurrence cancellation.
#[must_use]
pub fn void_recurrence(id: &str) -> Endpoint {
    Endpoint::new(format!("/payments/payment/{id}/void-recurrence"), Method::Post, Encoding::None)
}

/// Capture of a preauthorized payment's full amount.
#[must_use]
pub fn capture_preauthorization(id: &str) -> Endpoint {
    Endpoint::new(format!("/payments/payment/{id}/capture"), Method::Post, Encoding::None)
}

/// Partial capture of a preauthorized payment. Same path as the full
/// capture; the JSON body selects the amount and items.
#[must_use]
pub fn capture_preauthorization_partial(id: &str) -> Endpoint {
    Endpoint::new(format!("/payments/payment/{id}/capture"), Method::Post, Encoding::Json)
}

/// Preauthorization cancellation.
#[must_use]
pub fn void_preauthorization(id: &str) -> Endpoint {
    Endpoint::new(
        format!("/payments/payment/{id}/void-authorization"),
        Method::Post,
        Encoding::None,
    )
}

/// Enabled payment instruments for an eshop, optionally filtered by
/// currency. Without a filter the trailing path segment is omitted
/// entirely, which lists instruments for all currencies.
#[must_use]
pub fn payment_methods(goid: &str, currency: Option<&str>) -> Endpoint {
    let path = match currency {
        Some(currency) => format!("/eshops/eshop/{goid}/payment-instruments/{currency}"),
        None => format!("/eshops/eshop/{goid}/payment-instruments"),
    };
    Endpoint::new(path, Method::Get, Encoding::None)
}

/// Account statement download. The response body is the statement itself
/// (CSV/XLS/ABO per the requested format), not JSON.
#[must_use]
pub fn account_statement() -> Endpoint {
    Endpoint::new("/accounts/account-statement".to_owned(), Method::Post, Encoding::Json)
}

/// EET receipts recorded for a single payment.
#[must_use]
pub fn payment_eet_receipts(id: &str) -> Endpoint {
    Endpoint::new(format!("/payments/payment/{id}/eet-receipts"), Method::Get, Encoding::None)
}

/// EET receipts for a merchant premise over a date span.
#[must_use]
pub fn eet_receipts() -> Endpoint {
    Endpoint::new("/eet-receipts".to_owned(), Method::Post, Encoding::Json)
}
