//! Currency codes and fare amounts.

use std::fmt;

use serde::{Serialize, Serializer};

/// Error returned when parsing an invalid currency code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid currency code: {reason}")]
pub struct InvalidCurrencyCode {
    reason: &'static str,
}

/// Error returned when a fare amount is negative or not finite.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid amount {0}: must be finite and non-negative")]
pub struct InvalidAmount(pub f64);

/// A 3-letter ISO 4217 style currency code (e.g. `PKR`, `USD`).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct CurrencyCode([u8; 3]);

impl CurrencyCode {
    /// Parse a currency code. Exactly 3 uppercase ASCII letters.
    pub fn parse(s: &str) -> Result<Self, InvalidCurrencyCode> {
        let bytes = s.as_bytes();

        if bytes.len() != 3 {
            return Err(InvalidCurrencyCode {
                reason: "must be exactly 3 characters",
            });
        }

        if !bytes.iter().all(u8::is_ascii_uppercase) {
            return Err(InvalidCurrencyCode {
                reason: "must be uppercase ASCII letters A-Z",
            });
        }

        Ok(CurrencyCode([bytes[0], bytes[1], bytes[2]]))
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        std::str::from_utf8(&self.0).unwrap_or("???")
    }
}

impl fmt::Debug for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CurrencyCode({})", self.as_str())
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for CurrencyCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A fare amount in a single currency.
///
/// Amounts are plain floating point, as quoted by the booking site.
/// No conversion between currencies is ever performed.
///
/// # Examples
///
/// ```
/// use flight_search::domain::{CurrencyCode, Money};
///
/// let usd = CurrencyCode::parse("USD").unwrap();
/// let fare = Money::new(1234.5, usd).unwrap();
/// assert_eq!(fare.to_string(), "1234.50 USD");
///
/// assert!(Money::new(-1.0, usd).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Money {
    amount: f64,
    currency: CurrencyCode,
}

impl Money {
    /// Create an amount, rejecting negative and non-finite values.
    pub fn new(amount: f64, currency: CurrencyCode) -> Result<Self, InvalidAmount> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(InvalidAmount(amount));
        }
        Ok(Self { amount, currency })
    }

    /// Returns the numeric amount.
    pub fn amount(&self) -> f64 {
        self.amount
    }

    /// Returns the currency.
    pub fn currency(&self) -> CurrencyCode {
        self.currency
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} {}", self.amount, self.currency)
    }
}
