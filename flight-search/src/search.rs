//! Search over one fetched results page.
//!
//! Reads the outbound table (and the inbound one for round trips) and
//! combines them. Fetching and validation happen before this stage and
//! rendering after it.

use chrono::NaiveDate;
use scraper::Html;

use crate::domain::ItineraryLeg;
use crate::extract::{FlightGroup, collect_legs};
use crate::planner::{RoundTripOutcome, combine_one_way, combine_round_trip};
use crate::validate::SearchRequest;

/// Ranked options for a search.
#[derive(Debug, Clone, PartialEq)]
pub enum Itineraries {
    /// One-way legs, cheapest first; empty when nothing is available.
    OneWay(Vec<ItineraryLeg>),
    /// Round-trip outcome for the return date.
    RoundTrip {
        return_date: NaiveDate,
        outcome: RoundTripOutcome,
    },
}

/// Everything found for one search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResults {
    pub request: SearchRequest,
    pub itineraries: Itineraries,
    /// Flight rows that were on the page but could not be read.
    pub skipped_rows: usize,
}

/// Collect and combine the itineraries on a results page.
///
/// Outbound legs are read from flight group 1 on the departure date.
/// For a round trip, inbound legs (destination back to origin) are read
/// from flight group 2 on the return date.
pub fn find_itineraries(document: &Html, request: &SearchRequest) -> SearchResults {
    let outbound = collect_legs(
        document,
        request.departure,
        request.origin,
        request.destination,
        FlightGroup::OUTBOUND,
    );
    let mut skipped_rows = outbound.malformed_rows.len();

    let itineraries = match request.return_date {
        None => Itineraries::OneWay(combine_one_way(outbound.into_legs())),
        Some(return_date) => {
            let inbound = collect_legs(
                document,
                return_date,
                request.destination,
                request.origin,
                FlightGroup::INBOUND,
            );
            skipped_rows += inbound.malformed_rows.len();

            Itineraries::RoundTrip {
                return_date,
                outcome: combine_round_trip(
                    outbound.into_legs(),
                    inbound.into_legs(),
                    request.departure,
                    return_date,
                ),
            }
        }
    };

    SearchResults {
        request: request.clone(),
        itineraries,
        skipped_rows,
    }
}
