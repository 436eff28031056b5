//! Itinerary legs and round-trip pairs.
//!
//! An `ItineraryLeg` is one flight row priced in one fare class. Legs are
//! immutable once built; round-trip pairs share them through `Arc` since
//! the same leg usually appears in many pairs.

use std::sync::Arc;

use chrono::NaiveDateTime;

use super::{FlightDuration, FlightTimes, IataCode, Money};

/// One directional flight in a specific fare class.
///
/// Origin and destination are the ones requested by the collection that
/// produced the leg; they are never derived from the row itself.
#[derive(Debug, Clone, PartialEq)]
pub struct ItineraryLeg {
    origin: IataCode,
    destination: IataCode,
    times: FlightTimes,
    fare_class: String,
    price: Money,
}

impl ItineraryLeg {
    /// Create a leg from its parts.
    pub fn new(
        origin: IataCode,
        destination: IataCode,
        times: FlightTimes,
        fare_class: impl Into<String>,
        price: Money,
    ) -> Self {
        Self {
            origin,
            destination,
            times,
            fare_class: fare_class.into(),
            price,
        }
    }

    pub fn origin(&self) -> IataCode {
        self.origin
    }

    pub fn destination(&self) -> IataCode {
        self.destination
    }

    pub fn departure(&self) -> NaiveDateTime {
        self.times.departure()
    }

    pub fn arrival(&self) -> NaiveDateTime {
        self.times.arrival()
    }

    pub fn duration(&self) -> FlightDuration {
        self.times.duration()
    }

    pub fn times(&self) -> &FlightTimes {
        &self.times
    }

    /// Fare class label as shown in the table header (e.g. "Value").
    pub fn fare_class(&self) -> &str {
        &self.fare_class
    }

    pub fn price(&self) -> Money {
        self.price
    }

    /// Shorthand for `price().amount()`, the one-way ranking key.
    pub fn amount(&self) -> f64 {
        self.price.amount()
    }
}

/// An outbound leg plus an inbound leg.
///
/// The pair exists regardless of the legs' currencies. The total is only
/// meaningful when both legs share a currency; see [`ItineraryPair::total`].
#[derive(Debug, Clone, PartialEq)]
pub struct ItineraryPair {
    outbound: Arc<ItineraryLeg>,
    inbound: Arc<ItineraryLeg>,
}

impl ItineraryPair {
    pub fn new(outbound: Arc<ItineraryLeg>, inbound: Arc<ItineraryLeg>) -> Self {
        Self { outbound, inbound }
    }

    pub fn outbound(&self) -> &ItineraryLeg {
        &self.outbound
    }

    pub fn inbound(&self) -> &ItineraryLeg {
        &self.inbound
    }

    /// Raw sum of both legs' amounts, whatever their currencies.
    ///
    /// This is the ranking key for round trips.
    pub fn total_amount(&self) -> f64 {
        self.outbound.amount() + self.inbound.amount()
    }

    /// Returns true if the two legs are priced in different currencies.
    pub fn is_currency_mismatch(&self) -> bool {
        self.outbound.price().currency() != self.inbound.price().currency()
    }

    /// Total cost in the shared currency, or `None` on a currency mismatch.
    pub fn total(&self) -> Option<Money> {
        if self.is_currency_mismatch() {
            return None;
        }
        Money::new(self.total_amount(), self.outbound.price().currency()).ok()
    }
}
