//! Extraction of flight availability from a parsed results page.
//!
//! The page itself is fetched and parsed elsewhere; this module only runs
//! structural queries against the element tree and turns the matching
//! rows into [`ItineraryLeg`](crate::domain::ItineraryLeg) values.

mod legs;
mod price;

pub use legs::{CollectedLegs, FlightGroup, MalformedRow, RowError, collect_legs, table_key};
pub use price::extract_price;
