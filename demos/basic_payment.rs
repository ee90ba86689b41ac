//! Basic payment example: create a payment and poll its status.
//!
//! # Running this example
//!
//! Set the gateway credentials for your sandbox account:
//! ```bash
//! export GOPAY_CLIENT_ID=<client id>
//! export GOPAY_CLIENT_SECRET=<client secret>
//! export GOPAY_GOID=<merchant account id>
//! cargo run --example basic_payment
//! ```

#![allow(
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::uninlined_format_args,
    reason = "examples are allowed to use println and simple formatting"
)]

use std::env;

use gopay_client::{Gopay, GopayConfig};
use serde_json::json;

/// Loads credentials from environment variables.
///
/// Never hardcode the client secret in source code or commit it to version
/// control; load it from the environment or a secrets manager.
fn load_config() -> Result<GopayConfig, Box<dyn std::error::Error>> {
    let client_id = env::var("GOPAY_CLIENT_ID")
        .map_err(|_| "GOPAY_CLIENT_ID environment variable not set")?;
    let client_secret = env::var("GOPAY_CLIENT_SECRET")
        .map_err(|_| "GOPAY_CLIENT_SECRET environment variable not set")?;
    let goid = env::var("GOPAY_GOID").map_err(|_| "GOPAY_GOID environment variable not set")?;

    Ok(GopayConfig::new(client_id, client_secret, goid))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("GoPay Client: Basic Payment Example\n");

    // Step 1: Build the session. This fetches a token and the enabled
    // payment instruments up front.
    println!("1. Connecting to the sandbox gateway...");
    let config = load_config()?;
    let goid = config.goid.clone();
    let mut gopay = Gopay::new(config).await?;
    println!("   ✓ Session ready, token acquired");

    // Step 2: Create a payment. The target defaults to our own account.
    println!("\n2. Creating a test payment...");
    let response = gopay
        .create_payment(json!({
            "payer": {
                "default_payment_instrument": "PAYMENT_CARD",
                "contact": {"email": "customer@example.com"},
            },
            "amount": 12000,
            "currency": "CZK",
            "order_number": "order-001",
            "order_description": "Basic payment example",
            "callback": {
                "return_url": "https://eshop.example.com/return",
                "notification_url": "https://eshop.example.com/notify",
            },
        }))
        .await?;

    if !response.success {
        eprintln!("   ✗ Gateway rejected the payment ({})", response.status);
        eprintln!("   Body: {:?}", response.body);
        return Ok(());
    }

    let body = response.body.as_json().expect("payment replies are JSON");
    let payment_id = body["id"].to_string();
    println!("   ✓ Payment created (goid {})", goid);
    println!("   - Id: {}", payment_id);
    println!("   - Redirect the payer to: {}", body["gw_url"]);

    // Step 3: Poll the payment status.
    println!("\n3. Checking payment status...");
    let status = gopay.payment_status(&payment_id).await?;
    if status.success {
        let body = status.body.as_json().expect("status replies are JSON");
        println!("   - State: {}", body["state"]);
    } else {
        eprintln!("   ✗ Status inquiry rejected ({})", status.status);
    }

    println!("\n✓ Example complete");
    Ok(())
}
