//! Domain types for the flight search.
//!
//! Codes, fares and times are validated at construction, so code that
//! receives these types can trust them.

mod airport;
mod itinerary;
mod money;
mod time;

pub use airport::{IataCode, InvalidIataCode};
pub use itinerary::{ItineraryLeg, ItineraryPair};
pub use money::{CurrencyCode, InvalidAmount, InvalidCurrencyCode, Money};
pub use time::{ClockTime, FlightDuration, FlightTimes, TimeError, infer_times};
