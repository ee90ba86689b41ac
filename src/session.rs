//! Gateway session: token lifecycle and request dispatch.
//!
//! [`Gopay`] is the main entry point of the crate. Construction is eager: it
//! fetches an OAuth2 client-credentials token and the enabled
//! payment-instrument catalogue up front, then stays reusable indefinitely.
//! Before every authenticated call the session checks token staleness and
//! refreshes when needed; staleness is checked lazily, never by a background
//! timer.
//!
//! All operations take `&mut self`, so the stale-check/refresh sequence and
//! the last-response slot cannot race. Callers that want to share a session
//! across tasks wrap it themselves.
//!
//! # Examples
//!
//! ```rust,no_run
//! use gopay_client::{Gopay, GopayConfig};
//! use serde_json::json;
//!
//! # async fn example() -> gopay_client::error::Result<()> {
//! let config = GopayConfig::new("client-id", "client-secret", "8123456789");
//! let mut gopay = Gopay::new(config).await?;
//!
//! let response = gopay
//!     .create_payment(json!({
//!         "amount": 12000,
//!         "currency": "CZK",
//!         "order_number": "Test order",
//!         "callback": {
//!             "return_url": "https://example.com/return",
//!             "notification_url": "https://example.com/notify",
//!         },
//!     }))
//!     .await?;
//!
//! if response.success {
//!     if let Some(body) = response.body.as_json() {
//!         println!("redirect the payer to {}", body["gw_url"]);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{debug, warn};

use crate::{
    config::GopayConfig,
    endpoint::{self, Endpoint},
    error::Result,
    instruments::{self, InstrumentTable, SwiftTable},
    snapshot::SessionSnapshot,
    transport::{ApiRequest, ApiResponse, AuthMode, HttpTransport, Transport},
};

/// Token freshness window in seconds. A token older than this is refreshed
/// before the next authenticated call.
pub const TOKEN_TTL_SECS: i64 = 1800;

/// Bearer token with its issuance timestamp.
///
/// Owned exclusively by the session and replaced wholesale on refresh,
/// never mutated in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Opaque bearer string from the token endpoint.
    pub access_token: String,
    /// Issuance timestamp; staleness is a pure function of `now - issued_at`.
    pub issued_at: DateTime<Utc>,
}

impl Token {
    /// Whether the token is stale at the given instant.
    ///
    /// Stale means strictly older than [`TOKEN_TTL_SECS`]; a token exactly
    /// at the boundary is still fresh.
    #[must_use]
    pub fn is_stale_at(&self, now: DateTime<Utc>) -> bool {
        now - self.issued_at > chrono::Duration::seconds(TOKEN_TTL_SECS)
    }
}

/// A date parameter: a pre-formatted `YYYY-MM-DD` string or a structured
/// date, normalized to the string form before transmission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiDate {
    /// Pre-formatted `YYYY-MM-DD` string, sent as-is.
    Text(String),
    /// Structured date, formatted on transmission.
    Day(NaiveDate),
}

impl ApiDate {
    /// Today's date (UTC).
    #[must_use]
    pub fn today() -> Self {
        Self::Day(Utc::now().date_naive())
    }
}

impl fmt::Display for ApiDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Day(d) => write!(f, "{}", d.format("%Y-%m-%d")),
        }
    }
}

impl From<&str> for ApiDate {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<String> for ApiDate {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<NaiveDate> for ApiDate {
    fn from(d: NaiveDate) -> Self {
        Self::Day(d)
    }
}

/// GoPay gateway session.
///
/// Owns the credentials, the current token, the derived instrument/swift
/// tables and the most recent normalized response. Generic over
/// [`Transport`] with [`HttpTransport`] as the default; the seam exists so
/// the dispatch contract can be exercised without a network.
#[derive(Debug)]
pub struct Gopay<T: Transport = HttpTransport> {
    config: GopayConfig,
    transport: T,
    token: Option<Token>,
    instrument_table: InstrumentTable,
    swift_table: SwiftTable,
    last_response: Option<ApiResponse>,
}

impl Gopay<HttpTransport> {
    /// Creates a session over the default HTTP transport.
    ///
    /// Eagerly fetches a token and the payment-instrument catalogue. A
    /// gateway-level failure of either fetch does NOT fail construction;
    /// it is recorded as the last response and every subsequent call
    /// surfaces the auth failure explicitly.
    ///
    /// # Errors
    ///
    /// Returns [`GopayError::Config`](crate::error::GopayError::Config) for
    /// invalid configuration and
    /// [`GopayError::Http`](crate::error::GopayError::Http) for
    /// transport-level faults.
    pub async fn new(config: GopayConfig) -> Result<Self> {
        Self::with_transport(config, HttpTransport::new()?).await
    }

    /// Restores a session from a snapshot over the default HTTP transport.
    ///
    /// # Errors
    ///
    /// Returns error if the snapshot's configuration is invalid.
    pub fn from_snapshot(snapshot: SessionSnapshot) -> Result<Self> {
        Self::restore(snapshot, HttpTransport::new()?)
    }
}

impl<T: Transport> Gopay<T> {
    /// Creates a session over a caller-provided transport.
    ///
    /// # Errors
    ///
    /// Same contract as [`Gopay::new`].
    pub async fn with_transport(config: GopayConfig, transport: T) -> Result<Self> {
        config.validate()?;
        let mut session = Self {
            config,
            transport,
            token: None,
            instrument_table: InstrumentTable::new(),
            swift_table: SwiftTable::new(),
            last_response: None,
        };
        session.refresh_token().await?;
        session.rebuild_payment_methods().await?;
        Ok(session)
    }

    /// Restores a session from a snapshot without touching the network.
    ///
    /// The cached token is reused until it goes stale; the instrument
    /// tables are taken from the snapshot as-is.
    ///
    /// # Errors
    ///
    /// Returns error if the snapshot's configuration is invalid.
    pub fn restore(snapshot: SessionSnapshot, transport: T) -> Result<Self> {
        snapshot.config.validate()?;
        Ok(Self {
            config: snapshot.config,
            transport,
            token: snapshot.token,
            instrument_table: snapshot.instrument_table,
            swift_table: snapshot.swift_table,
            last_response: snapshot.last_response,
        })
    }

    /// Captures the session state as a plain serializable record.
    ///
    /// The snapshot carries everything needed to resume the session
    /// elsewhere: credentials, token with its issuance time, both derived
    /// tables and the last response. Where it is stored is the caller's
    /// concern.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            config: self.config.clone(),
            token: self.token.clone(),
            instrument_table: self.instrument_table.clone(),
            swift_table: self.swift_table.clone(),
            last_response: self.last_response.clone(),
        }
    }

    /// The session configuration.
    #[must_use]
    pub fn config(&self) -> &GopayConfig {
        &self.config
    }

    /// The current token, if one has been acquired.
    #[must_use]
    pub fn token(&self) -> Option<&Token> {
        self.token.as_ref()
    }

    /// Currency code to instrument names supporting it, rebuilt from the
    /// catalogue at construction and on [`Self::reload`].
    #[must_use]
    pub fn payment_instruments(&self) -> &InstrumentTable {
        &self.instrument_table
    }

    /// Currency code to bank SWIFT codes, restricted to the currencies the
    /// bank-transfer instrument supports.
    #[must_use]
    pub fn enabled_swifts(&self) -> &SwiftTable {
        &self.swift_table
    }

    /// The most recent normalized response, overwritten by every call.
    ///
    /// Every operation also returns its response by value; this slot exists
    /// for the snapshot interface, not for control flow.
    #[must_use]
    pub fn last_response(&self) -> Option<&ApiResponse> {
        self.last_response.as_ref()
    }

    /// Creates a payment.
    ///
    /// The body follows the gateway's payment-creation document, except that
    /// a missing `target` defaults to `{type: "ACCOUNT", goid: <goid>}`; all
    /// caller-provided fields pass through unchanged. On success the
    /// response's `gw_url` field is the redirect URL for the payer.
    ///
    /// # Errors
    ///
    /// Returns error only for transport-level faults; gateway rejections
    /// come back as a response with `success = false`.
    pub async fn create_payment(&mut self, mut body: Value) -> Result<ApiResponse> {
        if let Some(fields) = body.as_object_mut() {
            fields
                .entry("target")
                .or_insert_with(|| json!({"type": "ACCOUNT", "goid": self.config.goid}));
        }
        self.dispatch(endpoint::create_payment(), Some(body)).await
    }

    /// Payment status inquiry.
    ///
    /// # Errors
    ///
    /// Returns error only for transport-level faults.
    pub async fn payment_status(&mut self, id: &str) -> Result<ApiResponse> {
        self.dispatch(endpoint::payment_status(id), None).await
    }

    /// Refunds a payment, partially or fully. The amount is in the
    /// currency's minor units.
    ///
    /// # Errors
    ///
    /// Returns error only for transport-level faults.
    pub async fn refund_payment(&mut self, id: &str, amount: i64) -> Result<ApiResponse> {
        let body = json!({"amount": amount});
        self.dispatch(endpoint::refund_payment(id), Some(body)).await
    }

    /// Creates an on-demand recurrence against a parent recurring payment.
    ///
    /// # Errors
    ///
    /// Returns error only for transport-level faults.
    pub async fn create_recurrence(&mut self, id: &str, body: Value) -> Result<ApiResponse> {
        self.dispatch(endpoint::create_recurrence(id), Some(body)).await
    }

    /// Cancels a payment recurrence.
    ///
    /// # Errors
    ///
    /// Returns error only for transport-level faults.
    pub async fn void_recurrence(&mut self, id: &str) -> Result<ApiResponse> {
        self.dispatch(endpoint::void_recurrence(id), None).await
    }

    /// Captures a preauthorized payment's full amount.
    ///
    /// # Errors
    ///
    /// Returns error only for transport-level faults.
    pub async fn capture_preauthorization(&mut self, id: &str) -> Result<ApiResponse> {
        self.dispatch(endpoint::capture_preauthorization(id), None).await
    }

    /// Captures part of a preauthorized payment; the body selects the
    /// amount and items.
    ///
    /// # Errors
    ///
    /// Returns error only for transport-level faults.
    pub async fn capture_preauthorization_partial(
        &mut self,
        id: &str,
        body: Value,
    ) -> Result<ApiResponse> {
        self.dispatch(endpoint::capture_preauthorization_partial(id), Some(body)).await
    }

    /// Voids a payment preauthorization.
    ///
    /// # Errors
    ///
    /// Returns error only for transport-level faults.
    pub async fn void_preauthorization(&mut self, id: &str) -> Result<ApiResponse> {
        self.dispatch(endpoint::void_preauthorization(id), None).await
    }

    /// Fetches the enabled payment instruments, optionally filtered by
    /// currency. Called internally at construction and on [`Self::reload`]
    /// to rebuild the instrument and swift tables.
    ///
    /// # Errors
    ///
    /// Returns error only for transport-level faults.
    pub async fn fetch_payment_methods(
        &mut self,
        currency: Option<&str>,
    ) -> Result<ApiResponse> {
        let catalog_entry = endpoint::payment_methods(&self.config.goid, currency);
        self.dispatch(catalog_entry, None).await
    }

    /// Downloads an account statement for a date span. The response body is
    /// the statement itself in the requested format, not JSON.
    ///
    /// `date_to` defaults to today.
    ///
    /// # Errors
    ///
    /// Returns error only for transport-level faults.
    pub async fn account_statement(
        &mut self,
        currency: &str,
        format: &str,
        date_from: impl Into<ApiDate>,
        date_to: Option<ApiDate>,
    ) -> Result<ApiResponse> {
        let body = json!({
            "date_from": date_from.into().to_string(),
            "date_to": date_to.unwrap_or_else(ApiDate::today).to_string(),
            "goid": self.config.goid,
            "currency": currency,
            "format": format,
        });
        self.dispatch(endpoint::account_statement(), Some(body)).await
    }

    /// EET receipts for a merchant premise over a date span. `date_to`
    /// defaults to today.
    ///
    /// # Errors
    ///
    /// Returns error only for transport-level faults.
    pub async fn eet_receipts(
        &mut self,
        merchant_premise_id: &str,
        date_from: impl Into<ApiDate>,
        date_to: Option<ApiDate>,
    ) -> Result<ApiResponse> {
        // `id_provozovny` is the gateway's wire name for the premise id.
        let body = json!({
            "date_from": date_from.into().to_string(),
            "date_to": date_to.unwrap_or_else(ApiDate::today).to_string(),
            "id_provozovny": merchant_premise_id,
        });
        self.dispatch(endpoint::eet_receipts(), Some(body)).await
    }

    /// EET receipts recorded for a single payment.
    ///
    /// # Errors
    ///
    /// Returns error only for transport-level faults.
    pub async fn payment_eet_receipts(&mut self, id: &str) -> Result<ApiResponse> {
        self.dispatch(endpoint::payment_eet_receipts(id), None).await
    }

    /// Forces a token refresh and a full instrument/swift table rebuild,
    /// independent of staleness. Useful when the allowed payment methods
    /// changed on the gateway side.
    ///
    /// Returns the payment-methods response, or the refresh response when
    /// the refresh itself failed.
    ///
    /// # Errors
    ///
    /// Returns error only for transport-level faults.
    pub async fn reload(&mut self) -> Result<ApiResponse> {
        let refresh = self.refresh_token().await?;
        if !refresh.success {
            return Ok(refresh);
        }
        self.rebuild_payment_methods().await
    }

    /// Whether the current token must be refreshed before dispatching.
    /// No token at all is unconditionally stale.
    fn token_stale(&self) -> bool {
        self.token.as_ref().is_none_or(|token| token.is_stale_at(Utc::now()))
    }

    /// Fetches a fresh token with HTTP basic credentials.
    ///
    /// On success the token is replaced wholesale with a fresh issuance
    /// timestamp. On failure the old token (possibly none) is left in
    /// place; the caller decides what to do with the returned response.
    async fn refresh_token(&mut self) -> Result<ApiResponse> {
        let catalog_entry = endpoint::token();
        let url = self.absolute_url(&catalog_entry.path);
        let body = json!({"scope": self.config.scope, "grant_type": "client_credentials"});

        let request = ApiRequest {
            url: &url,
            method: catalog_entry.method,
            auth: AuthMode::Basic {
                id: &self.config.client_id,
                secret: &self.config.client_secret,
            },
            body: Some(&body),
            encoding: catalog_entry.encoding,
        };
        let response = self.transport.execute(request).await?;

        if response.success {
            let access_token = response
                .body
                .as_json()
                .and_then(|body| body.get("access_token"))
                .and_then(Value::as_str);
            if let Some(access_token) = access_token {
                debug!("token refreshed");
                self.token =
                    Some(Token { access_token: access_token.to_owned(), issued_at: Utc::now() });
            }
        } else {
            warn!(status = response.status, "token refresh failed");
        }

        self.last_response = Some(response.clone());
        Ok(response)
    }

    /// Refreshes a stale token, then executes the operation with bearer
    /// auth and records the normalized result as the last response.
    ///
    /// A failed refresh is an explicit decision point: the failed refresh
    /// response becomes the outcome of the operation, so the caller sees
    /// the auth failure directly instead of a compounded downstream one.
    async fn dispatch(&mut self, catalog_entry: Endpoint, body: Option<Value>) -> Result<ApiResponse> {
        if self.token_stale() {
            let refresh = self.refresh_token().await?;
            if !refresh.success {
                return Ok(refresh);
            }
        }

        let url = self.absolute_url(&catalog_entry.path);
        let bearer = self.token.as_ref().map_or("", |token| token.access_token.as_str());
        let request = ApiRequest {
            url: &url,
            method: catalog_entry.method,
            auth: AuthMode::Bearer(bearer),
            body: body.as_ref(),
            encoding: catalog_entry.encoding,
        };
        let response = self.transport.execute(request).await?;

        self.last_response = Some(response.clone());
        Ok(response)
    }

    /// Re-fetches the full catalogue and rebuilds both tables. The tables
    /// are replaced only on a successful fetch with a well-formed body.
    async fn rebuild_payment_methods(&mut self) -> Result<ApiResponse> {
        let response = self.fetch_payment_methods(None).await?;
        if response.success {
            let catalog = response
                .body
                .as_json()
                .and_then(|body| body.get("enabledPaymentInstruments"));
            if let Some(catalog) = catalog {
                let (instrument_table, swift_table) = instruments::reshape(catalog);
                debug!(currencies = instrument_table.len(), "rebuilt instrument tables");
                self.instrument_table = instrument_table;
                self.swift_table = swift_table;
            }
        }
        Ok(response)
    }

    fn absolute_url(&self, path: &str) -> String {
        format!("{}{path}", self.config.api_root.trim_end_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use std::{
        collections::VecDeque,
        sync::{Arc, Mutex},
    };

    use super::*;
    use crate::transport::{ApiBody, Encoding, Method, sealed};

    /// Recording transport double: pops canned responses in order and
    /// captures every request it sees.
    #[derive(Debug, Clone, Default)]
    struct MockTransport {
        inner: Arc<MockInner>,
    }

    #[derive(Debug, Default)]
    struct MockInner {
        responses: Mutex<VecDeque<ApiResponse>>,
        calls: Mutex<Vec<RecordedCall>>,
    }

    #[derive(Debug, Clone)]
    struct RecordedCall {
        url: String,
        method: Method,
        bearer: Option<String>,
        basic: Option<(String, String)>,
        body: Option<Value>,
        encoding: Encoding,
    }

    impl MockTransport {
        fn new(responses: Vec<ApiResponse>) -> Self {
            Self {
                inner: Arc::new(MockInner {
                    responses: Mutex::new(responses.into()),
                    calls: Mutex::new(Vec::new()),
                }),
            }
        }

        fn calls(&self) -> Vec<RecordedCall> {
            self.inner.calls.lock().unwrap().clone()
        }

        fn token_fetches(&self) -> usize {
            self.calls().iter().filter(|call| call.url.ends_with("/oauth2/token")).count()
        }
    }

    impl sealed::private::Sealed for MockTransport {}

    impl Transport for MockTransport {
        async fn execute<'a>(&'a self, request: ApiRequest<'a>) -> Result<ApiResponse> {
            let (bearer, basic) = match request.auth {
                AuthMode::Bearer(token) => (Some(token.to_owned()), None),
                AuthMode::Basic { id, secret } => {
                    (None, Some((id.to_owned(), secret.to_owned())))
                }
            };
            self.inner.calls.lock().unwrap().push(RecordedCall {
                url: request.url.to_owned(),
                method: request.method,
                bearer,
                basic,
                body: request.body.cloned(),
                encoding: request.encoding,
            });
            let canned = self.inner.responses.lock().unwrap().pop_front();
            Ok(canned.unwrap_or_else(|| ok(json!({}))))
        }
    }

    fn ok(body: Value) -> ApiResponse {
        ApiResponse::new(200, Some("application/json".to_owned()), ApiBody::Json(body))
    }

    fn denied(status: u16) -> ApiResponse {
        ApiResponse::new(
            status,
            Some("application/json".to_owned()),
            ApiBody::Json(json!({"errors": [{"error_code": 202}]})),
        )
    }

    fn token_response(token: &str) -> ApiResponse {
        ok(json!({"access_token": token, "expires_in": 1800}))
    }

    fn catalog_response() -> ApiResponse {
        ok(json!({
            "enabledPaymentInstruments": {
                "PAYMENT_CARD": {"currencies": ["CZK", "EUR"]},
                "BANK_ACCOUNT": {
                    "currencies": {"CZK": 1},
                    "enabledSwifts": {"GIBACZPX": {"currencies": {"CZK": 1}}},
                },
            },
        }))
    }

    fn config() -> GopayConfig {
        GopayConfig::new("client-id", "client-secret", "8123456789")
    }

    async fn ready_session(
        extra_responses: Vec<ApiResponse>,
    ) -> (Gopay<MockTransport>, MockTransport) {
        let mut responses = vec![token_response("T1"), catalog_response()];
        responses.extend(extra_responses);
        let transport = MockTransport::new(responses);
        let session = Gopay::with_transport(config(), transport.clone()).await.unwrap();
        (session, transport)
    }

    #[test]
    fn test_token_fresh_within_window() {
        let issued = Utc::now();
        let token = Token { access_token: "T1".to_owned(), issued_at: issued };

        assert!(!token.is_stale_at(issued + chrono::Duration::seconds(1799)));
        assert!(!token.is_stale_at(issued + chrono::Duration::seconds(1800)));
        assert!(token.is_stale_at(issued + chrono::Duration::seconds(1801)));
    }

    #[test]
    fn test_api_date_display() {
        assert_eq!(ApiDate::from("2024-01-31").to_string(), "2024-01-31");

        let day = NaiveDate::from_ymd_opt(2024, 2, 5).unwrap();
        assert_eq!(ApiDate::from(day).to_string(), "2024-02-05");
    }

    #[tokio::test]
    async fn test_construction_fetches_token_and_catalog() {
        let (session, transport) = ready_session(vec![]).await;

        let calls = transport.calls();
        assert_eq!(calls.len(), 2);

        // Token acquisition: POST, form-encoded, basic credentials.
        assert_eq!(calls[0].url, "https://gw.sandbox.gopay.com/api/oauth2/token");
        assert_eq!(calls[0].method, Method::Post);
        assert_eq!(calls[0].encoding, Encoding::Form);
        assert_eq!(
            calls[0].basic,
            Some(("client-id".to_owned(), "client-secret".to_owned()))
        );
        assert_eq!(
            calls[0].body,
            Some(json!({"scope": "payment-all", "grant_type": "client_credentials"}))
        );

        // Catalogue fetch: bearer token, no currency filter.
        assert_eq!(
            calls[1].url,
            "https://gw.sandbox.gopay.com/api/eshops/eshop/8123456789/payment-instruments"
        );
        assert_eq!(calls[1].bearer.as_deref(), Some("T1"));

        assert_eq!(session.payment_instruments()["CZK"], vec!["PAYMENT_CARD", "BANK_ACCOUNT"]);
        assert_eq!(session.enabled_swifts()["CZK"], vec!["GIBACZPX"]);
    }

    #[tokio::test]
    async fn test_single_token_fetch_across_calls() {
        let create = ok(json!({"gw_url": "https://pay/x", "id": "123"}));
        let status = ok(json!({"id": "123", "state": "PAID"}));
        let (mut session, transport) = ready_session(vec![create, status]).await;

        let created = session
            .create_payment(json!({"amount": 12000, "currency": "CZK"}))
            .await
            .unwrap();
        assert!(created.success);
        let checked = session.payment_status("123").await.unwrap();
        assert!(checked.success);

        // Exactly one token fetch, both downstream calls on bearer T1.
        assert_eq!(transport.token_fetches(), 1);
        let calls = transport.calls();
        assert_eq!(calls[2].bearer.as_deref(), Some("T1"));
        assert_eq!(calls[3].url, "https://gw.sandbox.gopay.com/api/payments/payment/123");
        assert_eq!(calls[3].bearer.as_deref(), Some("T1"));
    }

    #[tokio::test]
    async fn test_stale_token_triggers_refresh() {
        let (mut session, transport) = ready_session(vec![token_response("T2"), ok(json!({}))]).await;

        // Age the token past the freshness window.
        let token = session.token.as_mut().unwrap();
        token.issued_at -= chrono::Duration::seconds(TOKEN_TTL_SECS + 1);

        session.payment_status("123").await.unwrap();

        assert_eq!(transport.token_fetches(), 2);
        let calls = transport.calls();
        assert_eq!(calls.last().unwrap().bearer.as_deref(), Some("T2"));
    }

    #[tokio::test]
    async fn test_create_payment_defaults_target() {
        let (mut session, transport) = ready_session(vec![ok(json!({"id": "1"}))]).await;

        session
            .create_payment(json!({
                "amount": 12000,
                "currency": "CZK",
                "order_number": "x",
                "callback": {"return_url": "https://example.com/return"},
            }))
            .await
            .unwrap();

        let body = transport.calls().last().unwrap().body.clone().unwrap();
        assert_eq!(body["target"], json!({"type": "ACCOUNT", "goid": "8123456789"}));
        // Caller fields pass through unchanged.
        assert_eq!(body["amount"], 12000);
        assert_eq!(body["currency"], "CZK");
        assert_eq!(body["order_number"], "x");
        assert_eq!(body["callback"]["return_url"], "https://example.com/return");
    }

    #[tokio::test]
    async fn test_create_payment_keeps_explicit_target() {
        let (mut session, transport) = ready_session(vec![ok(json!({}))]).await;

        session
            .create_payment(json!({"amount": 1, "target": {"type": "ACCOUNT", "goid": "other"}}))
            .await
            .unwrap();

        let body = transport.calls().last().unwrap().body.clone().unwrap();
        assert_eq!(body["target"]["goid"], "other");
    }

    #[tokio::test]
    async fn test_failed_refresh_returned_explicitly() {
        // Both construction-time refreshes fail; the session still builds.
        let transport = MockTransport::new(vec![denied(403), denied(403), denied(403)]);
        let mut session = Gopay::with_transport(config(), transport.clone()).await.unwrap();
        assert!(session.token().is_none());
        assert!(session.payment_instruments().is_empty());

        // The operation's outcome is the failed refresh, and no payment
        // endpoint is ever hit.
        let response = session.payment_status("123").await.unwrap();
        assert!(!response.success);
        assert_eq!(response.status, 403);
        assert!(transport.calls().iter().all(|call| !call.url.contains("/payments/")));
    }

    #[tokio::test]
    async fn test_refund_sends_form_amount() {
        let (mut session, transport) = ready_session(vec![ok(json!({}))]).await;

        session.refund_payment("42", 500).await.unwrap();

        let call = transport.calls().last().unwrap().clone();
        assert_eq!(call.url, "https://gw.sandbox.gopay.com/api/payments/payment/42/refund");
        assert_eq!(call.encoding, Encoding::Form);
        assert_eq!(call.body, Some(json!({"amount": 500})));
    }

    #[tokio::test]
    async fn test_account_statement_body() {
        let (mut session, transport) = ready_session(vec![ok(json!({}))]).await;

        session
            .account_statement("CZK", "CSV_A", "2024-01-01", Some(ApiDate::from("2024-01-31")))
            .await
            .unwrap();

        let call = transport.calls().last().unwrap().clone();
        assert_eq!(call.url, "https://gw.sandbox.gopay.com/api/accounts/account-statement");
        assert_eq!(
            call.body,
            Some(json!({
                "date_from": "2024-01-01",
                "date_to": "2024-01-31",
                "goid": "8123456789",
                "currency": "CZK",
                "format": "CSV_A",
            }))
        );
    }

    #[tokio::test]
    async fn test_eet_receipts_body() {
        let (mut session, transport) = ready_session(vec![ok(json!({}))]).await;

        let from = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        session
            .eet_receipts("11", from, Some(ApiDate::from("2024-06-30")))
            .await
            .unwrap();

        let call = transport.calls().last().unwrap().clone();
        assert_eq!(call.url, "https://gw.sandbox.gopay.com/api/eet-receipts");
        assert_eq!(
            call.body,
            Some(json!({
                "date_from": "2024-01-01",
                "date_to": "2024-06-30",
                "id_provozovny": "11",
            }))
        );
    }

    #[tokio::test]
    async fn test_payment_methods_currency_filter() {
        let (mut session, transport) = ready_session(vec![ok(json!({}))]).await;

        session.fetch_payment_methods(Some("EUR")).await.unwrap();

        assert_eq!(
            transport.calls().last().unwrap().url,
            "https://gw.sandbox.gopay.com/api/eshops/eshop/8123456789/payment-instruments/EUR"
        );
    }

    #[tokio::test]
    async fn test_reload_refreshes_token_and_tables() {
        let fresh_catalog = ok(json!({
            "enabledPaymentInstruments": {"PAYPAL": {"currencies": ["EUR"]}},
        }));
        let (mut session, transport) =
            ready_session(vec![token_response("T2"), fresh_catalog]).await;

        let response = session.reload().await.unwrap();
        assert!(response.success);

        assert_eq!(transport.token_fetches(), 2);
        assert_eq!(session.payment_instruments()["EUR"], vec!["PAYPAL"]);
        assert!(session.enabled_swifts().is_empty());
        assert_eq!(session.token().unwrap().access_token, "T2");
    }

    #[tokio::test]
    async fn test_failed_catalog_fetch_keeps_tables() {
        let (mut session, _transport) =
            ready_session(vec![token_response("T2"), denied(500)]).await;

        let before = session.payment_instruments().clone();
        let response = session.reload().await.unwrap();

        assert!(!response.success);
        assert_eq!(session.payment_instruments(), &before);
    }

    #[tokio::test]
    async fn test_last_response_overwritten_each_call() {
        let first = ok(json!({"id": "1"}));
        let second = ok(json!({"id": "2"}));
        let (mut session, _transport) = ready_session(vec![first, second]).await;

        session.payment_status("1").await.unwrap();
        session.payment_status("2").await.unwrap();

        let last = session.last_response().unwrap();
        assert_eq!(last.body.as_json().unwrap()["id"], "2");
    }

    #[tokio::test]
    async fn test_snapshot_restore_reuses_token() {
        let (session, _transport) = ready_session(vec![]).await;

        let encoded = serde_json::to_string(&session.snapshot()).unwrap();
        let snapshot: SessionSnapshot = serde_json::from_str(&encoded).unwrap();

        let transport = MockTransport::new(vec![ok(json!({"state": "PAID"}))]);
        let mut restored = Gopay::restore(snapshot, transport.clone()).unwrap();

        assert_eq!(restored.payment_instruments()["CZK"], vec!["PAYMENT_CARD", "BANK_ACCOUNT"]);

        let response = restored.payment_status("123").await.unwrap();
        assert!(response.success);
        // Cached token is still fresh: no new token fetch.
        assert_eq!(transport.token_fetches(), 0);
        assert_eq!(transport.calls()[0].bearer.as_deref(), Some("T1"));
    }

    #[tokio::test]
    async fn test_invalid_config_rejected_at_construction() {
        let transport = MockTransport::default();
        let bad = GopayConfig::new("", "secret", "1");
        let result = Gopay::with_transport(bad, transport).await;
        assert!(result.is_err());
    }
}
