//! Cost ranking for search results.
//!
//! Both sorts are stable: options with equal cost keep the order in which
//! they were collected, which is document order on the results page.

use crate::domain::{ItineraryLeg, ItineraryPair};

/// Rank round-trip pairs by total cost, cheapest first.
///
/// The total is the raw sum of both legs' amounts. Pairs whose legs are in
/// different currencies are ranked by that sum as well; callers should
/// label them using [`ItineraryPair::is_currency_mismatch`].
pub fn rank_pairs(mut pairs: Vec<ItineraryPair>) -> Vec<ItineraryPair> {
    pairs.sort_by(|a, b| a.total_amount().total_cmp(&b.total_amount()));
    pairs
}

/// Rank one-way legs by fare, cheapest first.
pub fn rank_legs(mut legs: Vec<ItineraryLeg>) -> Vec<ItineraryLeg> {
    legs.sort_by(|a, b| a.amount().total_cmp(&b.amount()));
    legs
}
