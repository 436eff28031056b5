//! Flight time handling.
//!
//! The booking site shows departure and arrival as 12-hour clock strings
//! ("11:45 PM") with no date attached. This module anchors them to the
//! flight date and infers an overnight arrival when the arrival clock time
//! is earlier than the departure clock time.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Serialize, Serializer};
use std::fmt;

/// Error returned when a clock string does not match the 12-hour format.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// A time of day parsed from 12-hour clock text.
///
/// # Examples
///
/// ```
/// use flight_search::domain::ClockTime;
///
/// let t = ClockTime::parse_12h("11:45 PM").unwrap();
/// assert_eq!(t.to_string(), "23:45");
///
/// assert_eq!(ClockTime::parse_12h("12:05 AM").unwrap().to_string(), "00:05");
/// assert_eq!(ClockTime::parse_12h("12:05 PM").unwrap().to_string(), "12:05");
///
/// assert!(ClockTime::parse_12h("23:45").is_err());
/// assert!(ClockTime::parse_12h("13:00 PM").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime(NaiveTime);

impl ClockTime {
    /// Parse `H:MM AM` / `HH:MM PM` text.
    ///
    /// The hour is 1-12 (one or two digits), the minute exactly two digits.
    /// Whitespace between the minutes and the marker is optional and the
    /// marker is case-insensitive. Surrounding whitespace is ignored.
    pub fn parse_12h(s: &str) -> Result<Self, TimeError> {
        let s = s.trim();

        let marker_start = s
            .find(|c: char| c.is_ascii_alphabetic())
            .ok_or_else(|| TimeError::new("missing AM/PM marker"))?;
        let (clock, marker) = s.split_at(marker_start);
        let clock = clock.trim_end();

        let is_pm = if marker.eq_ignore_ascii_case("AM") {
            false
        } else if marker.eq_ignore_ascii_case("PM") {
            true
        } else {
            return Err(TimeError::new("marker must be AM or PM"));
        };

        let (hour_text, minute_text) = clock
            .split_once(':')
            .ok_or_else(|| TimeError::new("expected H:MM"))?;

        if hour_text.is_empty() || hour_text.len() > 2 {
            return Err(TimeError::new("hour must be one or two digits"));
        }
        let hour = parse_digits(hour_text).ok_or_else(|| TimeError::new("invalid hour digits"))?;
        if !(1..=12).contains(&hour) {
            return Err(TimeError::new("hour must be 1-12"));
        }

        if minute_text.len() != 2 {
            return Err(TimeError::new("minute must be two digits"));
        }
        let minute =
            parse_digits(minute_text).ok_or_else(|| TimeError::new("invalid minute digits"))?;
        if minute > 59 {
            return Err(TimeError::new("minute must be 0-59"));
        }

        let hour = hour % 12 + if is_pm { 12 } else { 0 };
        let time =
            NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(|| TimeError::new("invalid time"))?;

        Ok(Self(time))
    }

    /// Returns the time of day.
    pub fn time(&self) -> NaiveTime {
        self.0
    }

    /// Anchors this clock time to a calendar date.
    pub fn on(&self, date: NaiveDate) -> NaiveDateTime {
        date.and_time(self.0)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%H:%M"))
    }
}

fn parse_digits(s: &str) -> Option<u32> {
    if !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Time spent in the air, displayed as `"<H> hour(s) <M> minute(s)"`.
///
/// Seconds are never shown and the components are truncated, not rounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FlightDuration(Duration);

impl FlightDuration {
    /// Wraps a duration. Negative durations are stored by magnitude.
    pub fn new(duration: Duration) -> Self {
        Self(duration.abs())
    }

    /// Whole hours.
    pub fn hours(&self) -> i64 {
        self.0.num_hours()
    }

    /// Minutes past the whole hours (0-59).
    pub fn minutes(&self) -> i64 {
        self.0.num_minutes() % 60
    }

    /// Returns the underlying duration.
    pub fn as_duration(&self) -> Duration {
        self.0
    }
}

impl fmt::Display for FlightDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} hour(s) {} minute(s)", self.hours(), self.minutes())
    }
}

impl Serialize for FlightDuration {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Departure and arrival timestamps of one flight, with its duration.
///
/// # Invariants
///
/// - `arrival >= departure`
/// - `duration == arrival - departure`, less than 24 hours
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlightTimes {
    departure: NaiveDateTime,
    arrival: NaiveDateTime,
    duration: FlightDuration,
}

impl FlightTimes {
    /// Departure timestamp.
    pub fn departure(&self) -> NaiveDateTime {
        self.departure
    }

    /// Arrival timestamp, on the next day for overnight flights.
    pub fn arrival(&self) -> NaiveDateTime {
        self.arrival
    }

    /// Time in the air.
    pub fn duration(&self) -> FlightDuration {
        self.duration
    }

    /// Returns true if the flight lands on the day after it departs.
    pub fn is_overnight(&self) -> bool {
        self.arrival.date() > self.departure.date()
    }
}

/// Infer departure/arrival timestamps from clock text on a flight date.
///
/// Both texts are anchored to `flight_date`. If the arrival comes out
/// strictly earlier than the departure, the flight is taken to land the
/// next day and the arrival is advanced by exactly one calendar day.
/// Flights never span more than one midnight.
///
/// # Examples
///
/// ```
/// use flight_search::domain::infer_times;
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2020, 2, 27).unwrap();
///
/// let times = infer_times("08:00 AM", "10:30 AM", date).unwrap();
/// assert_eq!(times.arrival().date(), date);
/// assert_eq!(times.duration().to_string(), "2 hour(s) 30 minute(s)");
///
/// // Overnight flight lands on the following day
/// let times = infer_times("11:45 PM", "02:15 AM", date).unwrap();
/// assert_eq!(times.arrival().date(), date.succ_opt().unwrap());
/// assert_eq!(times.duration().to_string(), "2 hour(s) 30 minute(s)");
/// ```
pub fn infer_times(
    departure_text: &str,
    arrival_text: &str,
    flight_date: NaiveDate,
) -> Result<FlightTimes, TimeError> {
    let departure = ClockTime::parse_12h(departure_text)?.on(flight_date);
    let mut arrival = ClockTime::parse_12h(arrival_text)?.on(flight_date);

    if arrival < departure {
        let next_day = flight_date
            .succ_opt()
            .ok_or_else(|| TimeError::new("date overflow"))?;
        arrival = next_day.and_time(arrival.time());
    }

    Ok(FlightTimes {
        departure,
        arrival,
        duration: FlightDuration::new(arrival.signed_duration_since(departure)),
    })
}
