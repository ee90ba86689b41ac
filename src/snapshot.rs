//! Serializable session state for caching and hand-off.
//!
//! A [`SessionSnapshot`] captures everything a [`Gopay`](crate::Gopay)
//! session holds: credentials, the current token with its issuance time,
//! both derived catalogue tables and the last normalized response. It is a
//! plain serde record; encode it with any serde format and stash it
//! wherever suits the deployment (a file, a cache server, a session store).
//!
//! Restoring never touches the network. A restored session keeps using the
//! cached token until it goes stale, at which point the usual refresh logic
//! takes over.
//!
//! # Examples
//!
//! ```rust,no_run
//! use gopay_client::{Gopay, GopayConfig, SessionSnapshot};
//!
//! # async fn example() -> gopay_client::error::Result<()> {
//! let config = GopayConfig::new("client-id", "client-secret", "8123456789");
//! let gopay = Gopay::new(config).await?;
//!
//! let encoded = serde_json::to_string(&gopay.snapshot()).expect("snapshot is plain data");
//! // ... store `encoded`, later in another process ...
//! let snapshot: SessionSnapshot = serde_json::from_str(&encoded).expect("stored by us");
//! let gopay = Gopay::from_snapshot(snapshot)?;
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};

use crate::{
    config::GopayConfig,
    instruments::{InstrumentTable, SwiftTable},
    session::Token,
    transport::ApiResponse,
};

/// Complete session state as a plain serializable record.
///
/// Contains the client secret; treat an encoded snapshot with the same care
/// as the credentials themselves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Gateway credentials and target configuration.
    pub config: GopayConfig,
    /// Cached token, if one was acquired before the snapshot.
    pub token: Option<Token>,
    /// Currency to instrument names.
    pub instrument_table: InstrumentTable,
    /// Currency to bank SWIFT codes.
    pub swift_table: SwiftTable,
    /// Most recent normalized response at snapshot time.
    pub last_response: Option<ApiResponse>,
}
