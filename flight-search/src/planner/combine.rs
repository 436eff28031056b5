//! Itinerary combination.
//!
//! One-way searches rank the outbound legs directly. Round trips take the
//! cross product of outbound and inbound legs, drop pairs that cannot be
//! flown on a same-day return, and rank what is left by total cost.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, warn};

use super::rank::{rank_legs, rank_pairs};
use crate::domain::{ItineraryLeg, ItineraryPair};

/// Result of combining a round trip.
///
/// The two "nothing to offer" cases are normal outcomes and are kept apart
/// so callers can tell the traveller why nothing was found.
#[derive(Debug, Clone, PartialEq)]
pub enum RoundTripOutcome {
    /// Compatible pairs, cheapest first.
    Available(Vec<ItineraryPair>),

    /// One or both directions had no priced legs at all.
    NoLegs,

    /// Legs exist in both directions, but on a same-day return every
    /// inbound flight leaves before the outbound flight lands.
    NoSameDayPairs,
}

impl RoundTripOutcome {
    /// Ranked pairs; empty for the "nothing found" outcomes.
    pub fn pairs(&self) -> &[ItineraryPair] {
        match self {
            RoundTripOutcome::Available(pairs) => pairs,
            RoundTripOutcome::NoLegs | RoundTripOutcome::NoSameDayPairs => &[],
        }
    }

    pub fn into_pairs(self) -> Vec<ItineraryPair> {
        match self {
            RoundTripOutcome::Available(pairs) => pairs,
            RoundTripOutcome::NoLegs | RoundTripOutcome::NoSameDayPairs => Vec::new(),
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, RoundTripOutcome::Available(_))
    }
}

/// Build and rank round-trip pairs.
///
/// Every outbound leg is paired with every inbound leg. When the departure
/// and return dates are the same, a pair is dropped if the outbound flight
/// lands after the inbound flight departs. On different dates no pair is
/// dropped. Surviving pairs are ordered by total cost; equal totals keep
/// cross-product order (outbound-major).
///
/// # Examples
///
/// ```
/// use flight_search::domain::{CurrencyCode, IataCode, ItineraryLeg, Money, infer_times};
/// use flight_search::planner::{RoundTripOutcome, combine_round_trip};
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2020, 2, 27).unwrap();
/// let pkr = CurrencyCode::parse("PKR").unwrap();
/// let (isb, auh) = (IataCode::parse("ISB").unwrap(), IataCode::parse("AUH").unwrap());
/// let leg = |from, to, dep, arr, amount| {
///     let times = infer_times(dep, arr, date).unwrap();
///     ItineraryLeg::new(from, to, times, "Value", Money::new(amount, pkr).unwrap())
/// };
///
/// let outbound = vec![leg(isb, auh, "08:00 AM", "10:00 AM", 100.0)];
/// let inbound = vec![
///     leg(auh, isb, "09:00 AM", "01:00 PM", 50.0),
///     leg(auh, isb, "02:00 PM", "06:00 PM", 80.0),
/// ];
///
/// let outcome = combine_round_trip(outbound, inbound, date, date);
/// let pairs = outcome.pairs();
/// assert_eq!(pairs.len(), 1);
/// assert_eq!(pairs[0].total_amount(), 180.0);
/// ```
pub fn combine_round_trip(
    outbound: Vec<ItineraryLeg>,
    inbound: Vec<ItineraryLeg>,
    departure_date: NaiveDate,
    return_date: NaiveDate,
) -> RoundTripOutcome {
    if outbound.is_empty() || inbound.is_empty() {
        debug!(
            outbound = outbound.len(),
            inbound = inbound.len(),
            "no legs in at least one direction"
        );
        return RoundTripOutcome::NoLegs;
    }

    let same_day = departure_date == return_date;
    let outbound: Vec<Arc<ItineraryLeg>> = outbound.into_iter().map(Arc::new).collect();
    let inbound: Vec<Arc<ItineraryLeg>> = inbound.into_iter().map(Arc::new).collect();

    let mut pairs = Vec::with_capacity(outbound.len() * inbound.len());
    for out_leg in &outbound {
        for in_leg in &inbound {
            if same_day && out_leg.arrival() > in_leg.departure() {
                continue;
            }
            pairs.push(ItineraryPair::new(Arc::clone(out_leg), Arc::clone(in_leg)));
        }
    }

    debug!(
        candidates = outbound.len() * inbound.len(),
        compatible = pairs.len(),
        same_day,
        "combined round trip"
    );

    if pairs.is_empty() {
        return RoundTripOutcome::NoSameDayPairs;
    }

    let mismatched = pairs.iter().filter(|p| p.is_currency_mismatch()).count();
    if mismatched > 0 {
        warn!(
            mismatched,
            "round-trip pairs mix currencies; totals are raw sums"
        );
    }

    RoundTripOutcome::Available(rank_pairs(pairs))
}

/// Rank one-way legs by fare. An empty input is simply "no availability".
pub fn combine_one_way(legs: Vec<ItineraryLeg>) -> Vec<ItineraryLeg> {
    rank_legs(legs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CurrencyCode, IataCode, Money, infer_times};

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 2, d).unwrap()
    }

    fn leg_on(day: u32, dep: &str, arr: &str, amount: f64, currency: &str) -> ItineraryLeg {
        ItineraryLeg::new(
            IataCode::parse("ISB").unwrap(),
            IataCode::parse("AUH").unwrap(),
            infer_times(dep, arr, date(day)).unwrap(),
            "Value",
            Money::new(amount, CurrencyCode::parse(currency).unwrap()).unwrap(),
        )
    }

    fn leg(dep: &str, arr: &str, amount: f64) -> ItineraryLeg {
        leg_on(27, dep, arr, amount, "PKR")
    }

    #[test]
    fn same_day_excludes_overlapping_returns() {
        let outbound = vec![leg("08:00 AM", "10:00 AM", 100.0)];
        let inbound = vec![leg("09:00 AM", "11:00 AM", 50.0), leg("02:00 PM", "04:00 PM", 80.0)];

        let outcome = combine_round_trip(outbound, inbound, date(27), date(27));

        let pairs = outcome.pairs();
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].inbound().departure().format("%H:%M").to_string(), "14:00");
        assert_eq!(pairs[0].total_amount(), 180.0);
    }

    #[test]
    fn same_day_allows_departure_at_arrival_instant() {
        let outbound = vec![leg("08:00 AM", "10:00 AM", 100.0)];
        let inbound = vec![leg("10:00 AM", "12:00 PM", 50.0)];

        let outcome = combine_round_trip(outbound, inbound, date(27), date(27));
        assert_eq!(outcome.pairs().len(), 1);
    }

    #[test]
    fn different_dates_keep_full_cross_product() {
        let outbound = vec![leg_on(27, "08:00 PM", "10:00 PM", 100.0, "PKR")];
        let inbound = vec![
            leg_on(29, "06:00 AM", "08:00 AM", 50.0, "PKR"),
            leg_on(29, "09:00 AM", "11:00 AM", 80.0, "PKR"),
        ];

        let outcome = combine_round_trip(outbound, inbound, date(27), date(29));
        assert_eq!(outcome.pairs().len(), 2);
    }

    #[test]
    fn different_dates_do_not_filter_on_clock_times() {
        // Timestamps are taken as given; the filter only applies to same-day returns
        let outbound = vec![leg("08:00 PM", "10:00 PM", 100.0)];
        let inbound = vec![leg("06:00 AM", "08:00 AM", 50.0)];

        let outcome = combine_round_trip(outbound, inbound, date(27), date(28));
        assert_eq!(outcome.pairs().len(), 1);
    }

    #[test]
    fn empty_direction_is_no_legs() {
        let outcome = combine_round_trip(vec![], vec![leg("08:00 AM", "10:00 AM", 1.0)], date(27), date(28));
        assert_eq!(outcome, RoundTripOutcome::NoLegs);
        assert!(outcome.pairs().is_empty());

        let outcome = combine_round_trip(vec![leg("08:00 AM", "10:00 AM", 1.0)], vec![], date(27), date(28));
        assert_eq!(outcome, RoundTripOutcome::NoLegs);
    }

    #[test]
    fn nothing_compatible_same_day() {
        let outbound = vec![leg("04:00 PM", "06:00 PM", 100.0)];
        let inbound = vec![leg("09:00 AM", "11:00 AM", 50.0)];

        let outcome = combine_round_trip(outbound, inbound, date(27), date(27));
        assert_eq!(outcome, RoundTripOutcome::NoSameDayPairs);
        assert!(!outcome.is_available());
        assert!(outcome.into_pairs().is_empty());
    }

    #[test]
    fn pairs_sorted_by_total_with_stable_ties() {
        let outbound = vec![leg("06:00 AM", "07:00 AM", 100.0), leg("07:00 AM", "08:00 AM", 50.0)];
        let inbound = vec![leg("06:00 PM", "07:00 PM", 50.0), leg("08:00 PM", "09:00 PM", 100.0)];

        let outcome = combine_round_trip(outbound, inbound, date(27), date(27));

        let keys: Vec<(String, String, f64)> = outcome
            .pairs()
            .iter()
            .map(|p| {
                (
                    p.outbound().departure().format("%H:%M").to_string(),
                    p.inbound().departure().format("%H:%M").to_string(),
                    p.total_amount(),
                )
            })
            .collect();

        assert_eq!(
            keys,
            vec![
                ("07:00".into(), "18:00".into(), 100.0),
                // 150 tie: outbound 06:00 pair comes first in cross-product order
                ("06:00".into(), "18:00".into(), 150.0),
                ("07:00".into(), "20:00".into(), 150.0),
                ("06:00".into(), "20:00".into(), 200.0),
            ]
        );
    }

    #[test]
    fn mismatched_currencies_still_pair() {
        let outbound = vec![leg_on(27, "08:00 AM", "10:00 AM", 100.0, "PKR")];
        let inbound = vec![leg_on(28, "08:00 AM", "10:00 AM", 20.0, "AED")];

        let outcome = combine_round_trip(outbound, inbound, date(27), date(28));

        let pair = &outcome.pairs()[0];
        assert!(pair.is_currency_mismatch());
        assert_eq!(pair.total_amount(), 120.0);
    }

    #[test]
    fn one_way_sorted_and_empty_ok() {
        let ranked = combine_one_way(vec![
            leg("08:00 AM", "10:00 AM", 300.0),
            leg("09:00 AM", "11:00 AM", 100.0),
        ]);
        assert_eq!(ranked[0].amount(), 100.0);
        assert_eq!(ranked[1].amount(), 300.0);

        assert!(combine_one_way(vec![]).is_empty());
    }
}
