//! Payment instruments example: list enabled instruments and bank swifts.
//!
//! # Running this example
//!
//! ```bash
//! export GOPAY_CLIENT_ID=<client id>
//! export GOPAY_CLIENT_SECRET=<client secret>
//! export GOPAY_GOID=<merchant account id>
//! cargo run --example payment_methods
//! ```

#![allow(
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::uninlined_format_args,
    reason = "examples are allowed to use println and simple formatting"
)]

use std::env;

use gopay_client::{Gopay, GopayConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("GoPay Client: Payment Methods Example\n");

    let config = GopayConfig::new(
        env::var("GOPAY_CLIENT_ID")?,
        env::var("GOPAY_CLIENT_SECRET")?,
        env::var("GOPAY_GOID")?,
    );
    let mut gopay = Gopay::new(config).await?;

    // The tables were built at construction from the full catalogue.
    println!("Enabled instruments by currency:");
    for (currency, instrument_names) in gopay.payment_instruments() {
        println!("  {currency}: {}", instrument_names.join(", "));
    }

    println!("\nBank swifts by currency:");
    for (currency, swifts) in gopay.enabled_swifts() {
        println!("  {currency}: {}", swifts.join(", "));
    }

    // A currency-filtered fetch returns the raw catalogue document without
    // touching the session tables.
    println!("\nRaw catalogue for EUR:");
    let response = gopay.fetch_payment_methods(Some("EUR")).await?;
    if response.success {
        let body = response.body.as_json().expect("catalogue replies are JSON");
        println!("{}", serde_json::to_string_pretty(body)?);
    } else {
        eprintln!("catalogue fetch rejected ({})", response.status);
    }

    Ok(())
}
