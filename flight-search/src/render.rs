//! Presentation of search results as plain-text tables or JSON.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::domain::{ItineraryLeg, ItineraryPair, Money};
use crate::planner::RoundTripOutcome;
use crate::search::{Itineraries, SearchResults};

/// Column headings of every results table.
pub const TABLE_HEAD: [&str; 7] = [
    "From",
    "To",
    "Departure",
    "Arrival",
    "Flight time",
    "Class",
    "Price",
];

const SEPARATOR_WIDTH: usize = 50;

fn format_timestamp(t: NaiveDateTime) -> String {
    t.format("%Y-%m-%d %H:%M").to_string()
}

/// One flight leg in a report.
#[derive(Debug, Serialize)]
pub struct LegView {
    pub from: String,
    pub to: String,
    pub departure: String,
    pub arrival: String,
    pub flight_time: String,
    pub fare_class: String,
    pub price: Money,
}

impl LegView {
    pub fn from_leg(leg: &ItineraryLeg) -> Self {
        Self {
            from: leg.origin().to_string(),
            to: leg.destination().to_string(),
            departure: format_timestamp(leg.departure()),
            arrival: format_timestamp(leg.arrival()),
            flight_time: leg.duration().to_string(),
            fare_class: leg.fare_class().to_string(),
            price: leg.price(),
        }
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.from.clone(),
            self.to.clone(),
            self.departure.clone(),
            self.arrival.clone(),
            self.flight_time.clone(),
            self.fare_class.clone(),
            self.price.to_string(),
        ]
    }
}

/// Combined cost of a round trip.
#[derive(Debug, Serialize)]
pub struct TotalView {
    /// Sum of both leg amounts, regardless of currency
    pub amount: f64,

    /// Shared currency, absent when the legs are priced differently
    pub currency: Option<String>,

    pub currency_mismatch: bool,
}

/// An outbound and inbound leg with their total.
#[derive(Debug, Serialize)]
pub struct PairView {
    pub outbound: LegView,
    pub inbound: LegView,
    pub total: TotalView,
}

impl PairView {
    pub fn from_pair(pair: &ItineraryPair) -> Self {
        let total = match pair.total() {
            Some(money) => TotalView {
                amount: money.amount(),
                currency: Some(money.currency().to_string()),
                currency_mismatch: false,
            },
            None => TotalView {
                amount: pair.total_amount(),
                currency: None,
                currency_mismatch: true,
            },
        };
        Self {
            outbound: LegView::from_leg(pair.outbound()),
            inbound: LegView::from_leg(pair.inbound()),
            total,
        }
    }
}

/// Serializable outcome of a search.
#[derive(Debug, Serialize)]
#[serde(tag = "trip", rename_all = "snake_case")]
pub enum SearchReport {
    OneWay {
        departure_date: NaiveDate,
        legs: Vec<LegView>,
        /// Set when nothing is available
        message: Option<String>,
        skipped_rows: usize,
    },
    RoundTrip {
        departure_date: NaiveDate,
        return_date: NaiveDate,
        pairs: Vec<PairView>,
        message: Option<String>,
        skipped_rows: usize,
    },
}

impl SearchReport {
    pub fn from_results(results: &SearchResults) -> Self {
        let departure_date = results.request.departure;
        match &results.itineraries {
            Itineraries::OneWay(legs) => SearchReport::OneWay {
                departure_date,
                legs: legs.iter().map(LegView::from_leg).collect(),
                message: legs.is_empty().then(|| not_available_on(departure_date)),
                skipped_rows: results.skipped_rows,
            },
            Itineraries::RoundTrip {
                return_date,
                outcome,
            } => SearchReport::RoundTrip {
                departure_date,
                return_date: *return_date,
                pairs: outcome.pairs().iter().map(PairView::from_pair).collect(),
                message: unavailable_message(outcome, departure_date, *return_date),
                skipped_rows: results.skipped_rows,
            },
        }
    }

    fn message(&self) -> Option<&str> {
        match self {
            SearchReport::OneWay { message, .. } | SearchReport::RoundTrip { message, .. } => {
                message.as_deref()
            }
        }
    }

    fn skipped_rows(&self) -> usize {
        match self {
            SearchReport::OneWay { skipped_rows, .. }
            | SearchReport::RoundTrip { skipped_rows, .. } => *skipped_rows,
        }
    }
}

fn not_available_on(date: NaiveDate) -> String {
    format!("Flights are not available on {date}")
}

fn unavailable_message(
    outcome: &RoundTripOutcome,
    departure_date: NaiveDate,
    return_date: NaiveDate,
) -> Option<String> {
    match outcome {
        RoundTripOutcome::Available(_) => None,
        RoundTripOutcome::NoLegs => Some(format!(
            "Flights are not available on {departure_date} and {return_date}"
        )),
        RoundTripOutcome::NoSameDayPairs => Some(not_available_on(departure_date)),
    }
}

/// A bordered text table with centred cells.
#[derive(Debug, Clone, Default)]
pub struct Table {
    head: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(head: &[&str]) -> Self {
        Self {
            head: head.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row. Missing cells render blank; extra cells are dropped.
    pub fn add_row(&mut self, mut row: Vec<String>) {
        row.resize(self.head.len(), String::new());
        self.rows.push(row);
    }

    fn widths(&self) -> Vec<usize> {
        self.head
            .iter()
            .enumerate()
            .map(|(i, h)| {
                self.rows
                    .iter()
                    .map(|r| r[i].chars().count())
                    .chain(std::iter::once(h.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }
}

fn write_rule(f: &mut fmt::Formatter<'_>, widths: &[usize]) -> fmt::Result {
    for w in widths {
        write!(f, "+{}", "-".repeat(w + 2))?;
    }
    writeln!(f, "+")
}

fn write_cells(f: &mut fmt::Formatter<'_>, cells: &[String], widths: &[usize]) -> fmt::Result {
    for (cell, &w) in cells.iter().zip(widths) {
        write!(f, "| {cell:^w$} ")?;
    }
    writeln!(f, "|")
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let widths = self.widths();
        write_rule(f, &widths)?;
        write_cells(f, &self.head, &widths)?;
        write_rule(f, &widths)?;
        for row in &self.rows {
            write_cells(f, row, &widths)?;
        }
        write_rule(f, &widths)
    }
}

fn total_line(total: &TotalView) -> String {
    match &total.currency {
        Some(currency) => format!("Total cost: {:.2} {currency}", total.amount),
        None => format!(
            "Total cost: {:.2} (mixed currencies, not converted)",
            total.amount
        ),
    }
}

/// Render a report as the human-readable listing.
///
/// Each option is preceded by a line of asterisks and printed as a table,
/// round trips followed by their total cost.
pub fn render_text(report: &SearchReport) -> String {
    let separator = "*".repeat(SEPARATOR_WIDTH);
    let mut out = String::new();

    if let Some(message) = report.message() {
        out.push_str(message);
        out.push('\n');
    }

    match report {
        SearchReport::OneWay { legs, .. } => {
            for leg in legs {
                let mut table = Table::new(&TABLE_HEAD);
                table.add_row(leg.cells());
                out.push_str(&separator);
                out.push('\n');
                out.push_str(&table.to_string());
            }
        }
        SearchReport::RoundTrip { pairs, .. } => {
            for pair in pairs {
                let mut table = Table::new(&TABLE_HEAD);
                table.add_row(pair.outbound.cells());
                table.add_row(pair.inbound.cells());
                out.push_str(&separator);
                out.push('\n');
                out.push_str(&table.to_string());
                out.push_str(&total_line(&pair.total));
                out.push('\n');
            }
        }
    }

    let skipped = report.skipped_rows();
    if skipped > 0 {
        out.push_str(&format!("{skipped} flight row(s) could not be read and were skipped\n"));
    }

    out
}

/// Render a report as pretty-printed JSON.
pub fn render_json(report: &SearchReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}
