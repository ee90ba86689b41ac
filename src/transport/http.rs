//! HTTP transport implementation.
//!
//! Executes gateway requests over HTTPS using reqwest and normalizes the
//! result per the [`Transport`](super::Transport) contract.

use std::{sync::LazyLock, time::Duration};

use reqwest::{Client, RequestBuilder, header};
use tracing::{info, instrument};

use super::{ApiBody, ApiRequest, ApiResponse, AuthMode, Encoding, HttpConfig, Method, sealed};
use crate::error::Result;

/// `User-Agent` sent on every gateway request.
const USER_AGENT: &str = concat!("gopay-client/", env!("CARGO_PKG_VERSION"));

/// Default HTTP client with connection pooling enabled.
///
/// Using a singleton avoids recreating the client per transport instance,
/// preserving connection pooling benefits across all default transports.
static DEFAULT_HTTP_CLIENT: LazyLock<Client> = LazyLock::new(|| {
    Client::builder()
        .pool_max_idle_per_host(10)
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .build()
        .expect("Failed to create default HTTP client")
});

/// HTTP transport using reqwest.
///
/// Supports automatic connection pooling and keep-alive. One transport is
/// shared by all operations of a session.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl sealed::private::Sealed for HttpTransport {}

impl HttpTransport {
    /// Creates a new HTTP transport with default settings.
    ///
    /// Uses a shared singleton client for connection pooling efficiency.
    ///
    /// Default configuration:
    /// - Pool max idle per host: 10
    /// - Timeout: 30 seconds
    /// - Connect timeout: 10 seconds
    ///
    /// # Errors
    ///
    /// This method is infallible but returns `Result` for API consistency
    /// with [`Self::with_config`].
    pub fn new() -> Result<Self> {
        Ok(Self { client: DEFAULT_HTTP_CLIENT.clone() })
    }

    /// Creates an HTTP transport with custom configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the configuration is out of bounds or HTTP client
    /// creation fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use gopay_client::transport::{HttpConfig, HttpTransport};
    ///
    /// let config = HttpConfig { timeout_secs: 60, ..Default::default() };
    /// let transport = HttpTransport::with_config(&config).unwrap();
    /// ```
    pub fn with_config(config: &HttpConfig) -> Result<Self> {
        config.validate()?;

        let client = Client::builder()
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .build()?;

        Ok(Self { client })
    }

    fn apply_auth<'a>(builder: RequestBuilder, auth: AuthMode<'a>) -> RequestBuilder {
        match auth {
            AuthMode::Bearer(token) => builder.bearer_auth(token),
            AuthMode::Basic { id, secret } => builder.basic_auth(id, Some(secret)),
        }
    }

    fn apply_body<'a>(builder: RequestBuilder, request: &ApiRequest<'a>) -> RequestBuilder {
        match (request.encoding, request.body) {
            (Encoding::Json, Some(body)) => builder.json(body),
            (Encoding::Form, Some(body)) => builder.form(body),
            _ => builder,
        }
    }
}

impl super::Transport for HttpTransport {
    #[instrument(skip(self, request), fields(method = %request.method, url = request.url))]
    async fn execute<'a>(&'a self, request: ApiRequest<'a>) -> Result<ApiResponse> {
        let builder = match request.method {
            Method::Get => self.client.get(request.url),
            Method::Post => self.client.post(request.url),
        };

        let builder = builder
            .header(header::ACCEPT, "application/json")
            .header(header::USER_AGENT, USER_AGENT);
        let builder = Self::apply_auth(builder, request.auth);
        let builder = Self::apply_body(builder, &request);

        let response = builder.send().await?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let body = ApiBody::parse(response.text().await?);

        info!(method = %request.method, url = request.url, status, "gateway request");

        Ok(ApiResponse::new(status, content_type, body))
    }
}
