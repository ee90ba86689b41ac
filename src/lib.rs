//! GoPay Payment Gateway Client
//!
//! A Rust client for the GoPay REST API: OAuth2 client-credentials token
//! handling, typed wrappers for the payment endpoints, and a normalized
//! response shape for every gateway reply.
//!
//! # What does this crate do?
//!
//! A [`Gopay`] session hides the gateway's auth dance behind plain method
//! calls:
//!
//! - **Token lifecycle**: fetches an OAuth2 token eagerly at construction
//!   and refreshes it transparently before any call once it goes stale
//! - **Typed endpoints**: payments, refunds, recurrence, preauthorization,
//!   payment instruments, account statements and EET receipts
//! - **Normalized responses**: every reply becomes an [`ApiResponse`] with a
//!   2xx-derived `success` flag and a JSON-or-text body; gateway rejections
//!   are data, not errors
//! - **Instrument catalogue**: the enabled payment instruments are reshaped
//!   into per-currency lookup tables at construction
//! - **Snapshots**: the whole session state serializes to a
//!   [`SessionSnapshot`] for caching and restores without a network round
//!   trip
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐
//! │   Application    │
//! └────────┬─────────┘
//!          │ typed operations (create_payment, refund_payment, ...)
//! ┌────────▼─────────────────────────────────────┐
//! │            Gopay session (this crate)        │
//! │  ┌──────────────┐      ┌──────────────────┐  │
//! │  │   Endpoint   │──────│  Token lifecycle │  │
//! │  │   catalogue  │      │  (OAuth2, 1800s) │  │
//! │  └──────┬───────┘      └──────────────────┘  │
//! │         │ ApiRequest                         │
//! │  ┌──────▼───────┐                            │
//! │  │  Transport   │  sealed seam, HTTP default │
//! │  └──────────────┘                            │
//! └────────┬─────────────────────────────────────┘
//!          │ HTTPS
//! ┌────────▼─────────┐
//! │  GoPay gateway   │
//! └──────────────────┘
//! ```
//!
//! # Quick Start
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
//!         "order_number": "order-001",
//!         "callback": {
//!             "return_url": "https://eshop.example.com/return",
//!             "notification_url": "https://eshop.example.com/notify",
//!         },
//!     }))
//!     .await?;
//!
//! if response.success {
//!     let body = response.body.as_json().expect("payment replies are JSON");
//!     println!("redirect the payer to {}", body["gw_url"]);
//! } else {
//!     eprintln!("gateway rejected the payment: {:?}", response.body);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`session`]: the [`Gopay`] session (token lifecycle, request dispatch,
//!   all endpoint operations)
//! - [`transport`]: sealed transport seam and the normalized
//!   request/response types
//! - [`endpoint`]: the endpoint catalogue (path, method, body encoding)
//! - [`instruments`]: payment-instrument catalogue reshaping
//! - [`snapshot`]: serializable session state
//! - [`config`]: credentials and gateway target configuration
//! - [`error`]: error types
//!
//! # Error Handling
//!
//! The error surface is deliberately small: [`GopayError`] covers
//! transport-level faults and configuration misuse, nothing else. A gateway
//! rejection (bad request, declined payment, expired credentials) is a
//! normal [`ApiResponse`] with `success = false`; inspect its body for the
//! gateway's error document.
//!
//! ```rust,no_run
//! use gopay_client::{Gopay, GopayConfig, GopayError};
//!
//! # async fn example() {
//! let config = GopayConfig::new("client-id", "client-secret", "8123456789");
//!
//! match Gopay::new(config).await {
//!     Ok(mut gopay) => {
//!         let response = gopay.payment_status("3000006529").await.unwrap();
//!         println!("success: {}", response.success);
//!     }
//!     Err(GopayError::Config(msg)) => eprintln!("bad configuration: {msg}"),
//!     Err(GopayError::Http(e)) => eprintln!("network fault: {e}"),
//! }
//! # }
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod config;
pub mod endpoint;
pub mod error;
pub mod instruments;
pub mod session;
pub mod snapshot;
pub mod transport;

pub use config::GopayConfig;
pub use error::{GopayError, Result};
pub use instruments::{InstrumentTable, SwiftTable};
pub use session::{ApiDate, Gopay, Token};
pub use snapshot::SessionSnapshot;
pub use transport::{ApiBody, ApiResponse, HttpTransport, Transport};
