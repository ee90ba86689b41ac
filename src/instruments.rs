//! Payment-instrument catalogue reshaping.
//!
//! The gateway's `enabledPaymentInstruments` document is a nested mapping
//! from instrument name to label/image/currency metadata; the special
//! `BANK_ACCOUNT` instrument additionally nests an `enabledSwifts` mapping
//! of bank SWIFT codes. [`reshape`] turns that document into two flat,
//! currency-indexed lookup tables:
//!
//! - [`InstrumentTable`]: currency code to the instrument names supporting
//!   it, in the catalogue's original key order;
//! - [`SwiftTable`]: currency code to the SWIFT codes whose single declared
//!   currency equals it, restricted to the currencies the gateway's bank
//!   transfer feature supports (CZK, EUR, PLN).
//!
//! The transformation is pure and total: malformed or empty entries
//! contribute nothing rather than erroring, and a catalogue without a
//! `BANK_ACCOUNT` entry yields an empty (not absent) swift table.

use std::collections::{BTreeMap, BTreeSet};

use serde_json::Value;

/// Currency code to instrument names supporting it.
///
/// Keys are deterministic: ascending lexicographic order on the currency
/// code. Values keep the catalogue's original instrument order.
pub type InstrumentTable = BTreeMap<String, Vec<String>>;

/// Currency code to bank SWIFT codes, restricted to [`SWIFT_CURRENCIES`].
pub type SwiftTable = BTreeMap<String, Vec<String>>;

/// Currencies supported by the gateway's bank-transfer instrument. SWIFT
/// codes declaring any other currency never enter the [`SwiftTable`].
pub const SWIFT_CURRENCIES: [&str; 3] = ["CZK", "EUR", "PLN"];

/// Reshapes the raw `enabledPaymentInstruments` document.
///
/// Accepts the document as loosely-typed JSON because the catalogue's value
/// shapes vary by instrument: `currencies` is a list for ordinary
/// instruments but a mapping for `BANK_ACCOUNT`. Anything that is not an
/// object produces two empty tables.
///
/// # Examples
///
/// ```
/// use gopay_client::instruments::reshape;
/// use serde_json::json;
///
/// let catalog = json!({
///     "PAYMENT_CARD": {"currencies": ["CZK", "EUR"]},
///     "PAYPAL": {"currencies": ["EUR"]},
/// });
///
/// let (instruments, swifts) = reshape(&catalog);
/// assert_eq!(instruments["CZK"], vec!["PAYMENT_CARD"]);
/// assert_eq!(instruments["EUR"], vec!["PAYMENT_CARD", "PAYPAL"]);
/// assert!(swifts.is_empty());
/// ```
#[must_use]
pub fn reshape(catalog: &Value) -> (InstrumentTable, SwiftTable) {
    let Some(entries) = catalog.as_object() else {
        return (InstrumentTable::new(), SwiftTable::new());
    };

    let mut instruments = InstrumentTable::new();
    for (name, entry) in entries {
        // Dedup within one instrument so a repeated currency cannot list
        // the instrument twice.
        let mut seen = BTreeSet::new();
        for currency in entry_currencies(entry) {
            if seen.insert(currency.clone()) {
                instruments.entry(currency).or_default().push(name.clone());
            }
        }
    }

    let swifts = entries
        .get("BANK_ACCOUNT")
        .and_then(|bank| bank.get("enabledSwifts"))
        .and_then(Value::as_object)
        .map(reshape_swifts)
        .unwrap_or_default();

    (instruments, swifts)
}

/// Currencies declared by one instrument entry: the items of a `currencies`
/// list, or the keys of a `currencies` mapping (the `BANK_ACCOUNT` shape).
fn entry_currencies(entry: &Value) -> Vec<String> {
    match entry.get("currencies") {
        Some(Value::Array(list)) => {
            list.iter().filter_map(Value::as_str).map(str::to_owned).collect()
        }
        Some(Value::Object(map)) => map.keys().cloned().collect(),
        _ => Vec::new(),
    }
}

fn reshape_swifts(swifts: &serde_json::Map<String, Value>) -> SwiftTable {
    let mut table = SwiftTable::new();
    for (code, entry) in swifts {
        // Each SWIFT declares exactly one currency, as the single key of
        // its `currencies` mapping.
        let currency = entry
            .get("currencies")
            .and_then(Value::as_object)
            .and_then(|currencies| currencies.keys().next());
        let Some(currency) = currency else { continue };

        if SWIFT_CURRENCIES.contains(&currency.as_str()) {
            table.entry(currency.clone()).or_default().push(code.clone());
        }
    }
    table
}
