//! Fare price extraction.
//!
//! A fare cell either carries a price label such as `PKR 12,500 ` or a
//! status message such as "SOLD OUT". The extractor looks for the first
//! `<CCC><ws><amount><ws or ">` token sequence in the serialized markup
//! and treats anything else as "no price".

use crate::domain::{CurrencyCode, Money};

/// Extract the first currency/amount pair from fare-cell markup.
///
/// The pattern is three uppercase ASCII letters, exactly one whitespace
/// character, then an amount made of digits, commas and at most one
/// decimal point, terminated by whitespace or a double quote. Commas are
/// thousands separators and are dropped before parsing.
///
/// Returns `None` when no such pattern exists. This is the normal outcome
/// for sold-out or empty fare classes, not a failure.
///
/// # Examples
///
/// ```
/// use flight_search::extract::extract_price;
///
/// let price = extract_price("<label>USD 1,234.50 </label>").unwrap();
/// assert_eq!(price.amount(), 1234.50);
/// assert_eq!(price.currency().as_str(), "USD");
///
/// assert!(extract_price("<label>SOLD OUT</label>").is_none());
/// ```
pub fn extract_price(markup: &str) -> Option<Money> {
    let bytes = markup.as_bytes();
    (0..bytes.len()).find_map(|start| price_at(bytes, start))
}

/// Try to match the price pattern starting exactly at `start`.
fn price_at(bytes: &[u8], start: usize) -> Option<Money> {
    let code = bytes.get(start..start + 3)?;
    if !code.iter().all(u8::is_ascii_uppercase) {
        return None;
    }

    if !bytes.get(start + 3)?.is_ascii_whitespace() {
        return None;
    }

    let number_start = start + 4;
    let number_len = bytes[number_start..]
        .iter()
        .take_while(|&&b| b.is_ascii_digit() || b == b',' || b == b'.')
        .count();
    if number_len == 0 {
        return None;
    }

    let number_end = number_start + number_len;
    match bytes.get(number_end) {
        Some(&b) if b.is_ascii_whitespace() || b == b'"' => {}
        _ => return None,
    }

    // Both slices are pure ASCII, so these conversions cannot fail
    let currency = CurrencyCode::parse(std::str::from_utf8(code).ok()?).ok()?;
    let amount = parse_amount(std::str::from_utf8(&bytes[number_start..number_end]).ok()?)?;

    Money::new(amount, currency).ok()
}

/// Parse an amount token such as `1,234.50`.
fn parse_amount(token: &str) -> Option<f64> {
    let digits: String = token.chars().filter(|&c| c != ',').collect();

    if digits.matches('.').count() > 1 || !digits.bytes().any(|b| b.is_ascii_digit()) {
        return None;
    }

    digits.parse().ok()
}
