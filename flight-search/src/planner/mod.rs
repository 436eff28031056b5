//! Itinerary combination and ranking.
//!
//! Turns collected legs into the options shown to the traveller: a ranked
//! list of legs for one-way searches, or ranked outbound/inbound pairs for
//! round trips.

mod combine;
mod rank;

pub use combine::{RoundTripOutcome, combine_one_way, combine_round_trip};
pub use rank::{rank_legs, rank_pairs};
