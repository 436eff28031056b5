//! IATA airport codes.

use std::fmt;

use serde::{Serialize, Serializer};

/// Why a string is not an IATA airport code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidIataCode {
    #[error("IATA codes have 3 letters, got {0}")]
    Length(usize),

    #[error("IATA codes are letters A-Z, found {found:?} at position {position}")]
    NotALetter { position: usize, found: char },
}

/// Three-letter airport code as listed by the booking site ("KHI", "DXB").
///
/// Stored inline as three uppercase ASCII bytes, so the code is `Copy`
/// and orders alphabetically.
///
/// ```
/// use flight_search::domain::IataCode;
///
/// let lhe = IataCode::parse("LHE").unwrap();
/// assert_eq!(lhe.to_string(), "LHE");
///
/// assert!(IataCode::parse("lhe").is_err());
/// assert_eq!(IataCode::parse_normalized(" lhe ").unwrap(), lhe);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IataCode([u8; 3]);

impl IataCode {
    /// Accepts exactly three uppercase ASCII letters.
    pub fn parse(s: &str) -> Result<Self, InvalidIataCode> {
        let letters: [u8; 3] = s
            .as_bytes()
            .try_into()
            .map_err(|_| InvalidIataCode::Length(s.chars().count()))?;

        let bad = s.chars().enumerate().find(|(_, c)| !c.is_ascii_uppercase());
        if let Some((position, found)) = bad {
            return Err(InvalidIataCode::NotALetter { position, found });
        }

        Ok(IataCode(letters))
    }

    /// Like [`parse`](Self::parse), after trimming and upper-casing, for
    /// codes typed on the command line.
    pub fn parse_normalized(s: &str) -> Result<Self, InvalidIataCode> {
        Self::parse(&s.trim().to_ascii_uppercase())
    }

    pub fn as_str(&self) -> &str {
        std::str::from_utf8(&self.0).unwrap_or("???")
    }
}

impl fmt::Debug for IataCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IataCode({})", self.as_str())
    }
}

impl fmt::Display for IataCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for IataCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
