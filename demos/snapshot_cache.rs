//! Snapshot caching example: persist the session between process runs.
//!
//! A fresh session costs two gateway round trips (token plus catalogue).
//! Short-lived processes can skip both by caching a snapshot; here it goes
//! to a file, but any store that holds a string works the same way.
//!
//! # Running this example
//!
//! ```bash
//! export GOPAY_CLIENT_ID=<client id>
//! export GOPAY_CLIENT_SECRET=<client secret>
//! export GOPAY_GOID=<merchant account id>
//! cargo run --example snapshot_cache
//! ```

#![allow(
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::uninlined_format_args,
    reason = "examples are allowed to use println and simple formatting"
)]

use std::{env, fs, path::Path};

use gopay_client::{Gopay, GopayConfig, SessionSnapshot};

const CACHE_PATH: &str = "gopay-session.json";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("GoPay Client: Snapshot Cache Example\n");

    let mut gopay = if Path::new(CACHE_PATH).exists() {
        // Restoring skips the token and catalogue round trips entirely. A
        // stale cached token refreshes on the first call, as usual.
        println!("Restoring cached session from {CACHE_PATH}...");
        let snapshot: SessionSnapshot = serde_json::from_str(&fs::read_to_string(CACHE_PATH)?)?;
        Gopay::from_snapshot(snapshot)?
    } else {
        println!("No cache, creating a fresh session...");
        let config = GopayConfig::new(
            env::var("GOPAY_CLIENT_ID")?,
            env::var("GOPAY_CLIENT_SECRET")?,
            env::var("GOPAY_GOID")?,
        );
        Gopay::new(config).await?
    };

    println!("Instruments known for CZK: {:?}", gopay.payment_instruments().get("CZK"));

    let response = gopay.payment_status("3000006529").await?;
    println!("Status inquiry: success={}, status={}", response.success, response.status);

    // The snapshot contains the client secret; in production store it with
    // the same care as the credentials themselves.
    fs::write(CACHE_PATH, serde_json::to_string(&gopay.snapshot())?)?;
    println!("Session cached to {CACHE_PATH}");

    Ok(())
}
