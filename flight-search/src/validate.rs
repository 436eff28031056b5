//! Search argument validation.
//!
//! Turns the raw strings typed by the user into a [`SearchRequest`].
//! Validation runs before anything is fetched; it checks airport codes
//! against the list served by the site and keeps dates inside the
//! bookable window.

use std::fmt;

use chrono::{Duration, NaiveDate};

use crate::domain::IataCode;

/// Default number of days ahead of today that can be searched.
pub const DEFAULT_MAX_ADVANCE_DAYS: i64 = 365;

/// Validation settings.
#[derive(Debug, Clone)]
pub struct ValidationConfig {
    /// Latest searchable date, in days after today.
    pub max_advance_days: i64,
}

impl ValidationConfig {
    pub fn new(max_advance_days: i64) -> Self {
        Self { max_advance_days }
    }
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            max_advance_days: DEFAULT_MAX_ADVANCE_DAYS,
        }
    }
}

/// Which end of the trip an airport argument names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AirportRole {
    Departure,
    Arrival,
}

impl fmt::Display for AirportRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AirportRole::Departure => f.write_str("departure"),
            AirportRole::Arrival => f.write_str("arrival"),
        }
    }
}

/// Which date argument is meant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateRole {
    Departure,
    Return,
}

impl fmt::Display for DateRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateRole::Departure => f.write_str("departure"),
            DateRole::Return => f.write_str("return"),
        }
    }
}

/// A search argument that cannot be used.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{role} airport {code:?} is not a 3-letter IATA code")]
    InvalidAirportCode { role: AirportRole, code: String },

    #[error("{role} airport {code} is not served")]
    UnknownAirport { role: AirportRole, code: IataCode },

    #[error("departure and arrival airports are both {0}")]
    SameAirport(IataCode),

    #[error("{role} date {value:?} is not a YYYY-MM-DD date")]
    InvalidDate { role: DateRole, value: String },

    #[error("{role} date {date} is outside the bookable window {earliest} to {latest}")]
    DateOutOfRange {
        role: DateRole,
        date: NaiveDate,
        earliest: NaiveDate,
        latest: NaiveDate,
    },

    #[error("return date {return_date} is before departure date {departure}")]
    ReturnBeforeDeparture {
        departure: NaiveDate,
        return_date: NaiveDate,
    },
}

/// A validated search: one-way when `return_date` is `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub origin: IataCode,
    pub destination: IataCode,
    pub departure: NaiveDate,
    pub return_date: Option<NaiveDate>,
}

impl SearchRequest {
    /// Validate raw user input.
    ///
    /// Airports are checked before dates, so the first reported error is
    /// the first bad argument in command-line order.
    ///
    /// # Examples
    ///
    /// ```
    /// use flight_search::domain::IataCode;
    /// use flight_search::validate::{SearchRequest, ValidationConfig};
    /// use chrono::NaiveDate;
    ///
    /// let served = ["KHI", "ISB"].map(|c| IataCode::parse(c).unwrap());
    /// let today = NaiveDate::from_ymd_opt(2020, 2, 1).unwrap();
    ///
    /// let request = SearchRequest::validate(
    ///     "khi", "ISB", "2020-02-27", Some("2020-02-29"),
    ///     &served, today, &ValidationConfig::default(),
    /// ).unwrap();
    /// assert!(request.is_round_trip());
    /// assert_eq!(request.origin.as_str(), "KHI");
    /// ```
    pub fn validate(
        origin: &str,
        destination: &str,
        departure: &str,
        return_date: Option<&str>,
        served: &[IataCode],
        today: NaiveDate,
        config: &ValidationConfig,
    ) -> Result<Self, ValidationError> {
        let (origin, destination) = validate_airports(origin, destination, served)?;
        let (departure, return_date) = validate_dates(departure, return_date, today, config)?;

        Ok(Self {
            origin,
            destination,
            departure,
            return_date,
        })
    }

    pub fn is_round_trip(&self) -> bool {
        self.return_date.is_some()
    }
}

/// Check both airports are served by the site and differ.
pub fn validate_airports(
    origin: &str,
    destination: &str,
    served: &[IataCode],
) -> Result<(IataCode, IataCode), ValidationError> {
    let origin = served_airport(origin, AirportRole::Departure, served)?;
    let destination = served_airport(destination, AirportRole::Arrival, served)?;

    if origin == destination {
        return Err(ValidationError::SameAirport(origin));
    }

    Ok((origin, destination))
}

fn served_airport(
    input: &str,
    role: AirportRole,
    served: &[IataCode],
) -> Result<IataCode, ValidationError> {
    let code =
        IataCode::parse_normalized(input).map_err(|_| ValidationError::InvalidAirportCode {
            role,
            code: input.to_string(),
        })?;

    if !served.contains(&code) {
        return Err(ValidationError::UnknownAirport { role, code });
    }

    Ok(code)
}

/// Parse both dates and check they fall in `[today, today + max_advance_days]`
/// with the return not before the departure.
pub fn validate_dates(
    departure: &str,
    return_date: Option<&str>,
    today: NaiveDate,
    config: &ValidationConfig,
) -> Result<(NaiveDate, Option<NaiveDate>), ValidationError> {
    let departure = bookable_date(departure, DateRole::Departure, today, config)?;

    let return_date = match return_date {
        None => None,
        Some(raw) => {
            let date = bookable_date(raw, DateRole::Return, today, config)?;
            if date < departure {
                return Err(ValidationError::ReturnBeforeDeparture {
                    departure,
                    return_date: date,
                });
            }
            Some(date)
        }
    };

    Ok((departure, return_date))
}

fn bookable_date(
    input: &str,
    role: DateRole,
    today: NaiveDate,
    config: &ValidationConfig,
) -> Result<NaiveDate, ValidationError> {
    let date = parse_iso_date(input).ok_or_else(|| ValidationError::InvalidDate {
        role,
        value: input.to_string(),
    })?;

    let latest = Duration::try_days(config.max_advance_days)
        .and_then(|window| today.checked_add_signed(window))
        .unwrap_or(NaiveDate::MAX);
    if date < today || date > latest {
        return Err(ValidationError::DateOutOfRange {
            role,
            date,
            earliest: today,
            latest,
        });
    }

    Ok(date)
}

/// Strict `YYYY-MM-DD`: four-digit year, two-digit month and day.
fn parse_iso_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    let bytes = input.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return None;
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d").ok()
}
