//! Flight row collection.
//!
//! The results page holds one `<table>` per (flight group, date), with id
//! `trip_<group>_date_<YYYY>_<MM>_<DD>`. Its header lists the fare classes
//! and each operating flight is a `<tr class="flight-status-ontime">` row
//! with departure/arrival cells followed by one fare cell per class.

use std::fmt;
use std::sync::LazyLock;

use chrono::NaiveDate;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, trace, warn};

use super::price::extract_price;
use crate::domain::{FlightTimes, IataCode, ItineraryLeg, TimeError, infer_times};

/// Tables carrying an id attribute; the flight table is picked by id.
static ID_TABLES: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("table[id]").expect("static selector"));

const ON_TIME_ROW_CLASS: &str = "flight-status-ontime";
const FARE_CELL_CLASS: &str = "family family-";

/// Which of the page's flight groups to read.
///
/// The site numbers groups from 1: outbound flights are group 1 and the
/// return flights of a round-trip search are group 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FlightGroup(u32);

impl FlightGroup {
    pub const OUTBOUND: FlightGroup = FlightGroup(1);
    pub const INBOUND: FlightGroup = FlightGroup(2);

    pub fn new(index: u32) -> Self {
        Self(index)
    }

    pub fn index(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for FlightGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Element id of the table for a flight group on a date.
///
/// ```
/// use flight_search::extract::{FlightGroup, table_key};
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2020, 2, 27).unwrap();
/// assert_eq!(table_key(FlightGroup::INBOUND, date), "trip_2_date_2020_02_27");
/// ```
pub fn table_key(group: FlightGroup, date: NaiveDate) -> String {
    format!("trip_{}_date_{}", group.index(), date.format("%Y_%m_%d"))
}

/// Why a single flight row could not be turned into legs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RowError {
    /// The row has no departure or arrival time cell
    #[error("row has no {0} time cell")]
    MissingTimeCell(&'static str),

    /// A time cell does not hold 12-hour clock text
    #[error(transparent)]
    MalformedTime(#[from] TimeError),
}

/// A flight row that was skipped, with its position among on-time rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedRow {
    pub row: usize,
    pub error: RowError,
}

/// Result of reading one flight table.
///
/// Rows that fail to parse are reported in `malformed_rows` and do not
/// prevent the other rows from producing legs.
#[derive(Debug, Clone, Default)]
pub struct CollectedLegs {
    pub legs: Vec<ItineraryLeg>,
    pub malformed_rows: Vec<MalformedRow>,
}

impl CollectedLegs {
    /// Returns true if no leg was collected.
    pub fn is_empty(&self) -> bool {
        self.legs.is_empty()
    }

    /// Discards the row diagnostics and returns the legs.
    pub fn into_legs(self) -> Vec<ItineraryLeg> {
        self.legs
    }
}

/// Collect one leg per (on-time row, priced fare class) from a results page.
///
/// Legs come out row by row in document order, and within a row in header
/// order. Fare classes without a parseable price are skipped. A missing
/// table, or one with no on-time rows, yields an empty collection: that is
/// simply a day without flights.
///
/// Header labels and a row's fare cells are paired by position. If their
/// counts differ, the extra labels or cells are ignored.
pub fn collect_legs(
    document: &Html,
    flight_date: NaiveDate,
    origin: IataCode,
    destination: IataCode,
    group: FlightGroup,
) -> CollectedLegs {
    let key = table_key(group, flight_date);

    let Some(table) = document
        .select(&ID_TABLES)
        .find(|table| table.value().id() == Some(key.as_str()))
    else {
        debug!(table = %key, "flight table not found");
        return CollectedLegs::default();
    };

    let rows: Vec<ElementRef<'_>> = child_elements(table, "tbody")
        .flat_map(|tbody| child_elements(tbody, "tr"))
        .filter(|tr| tr.value().attr("class") == Some(ON_TIME_ROW_CLASS))
        .collect();

    if rows.is_empty() {
        debug!(table = %key, "no on-time rows");
        return CollectedLegs::default();
    }

    let fare_classes = fare_class_labels(table);
    debug!(
        table = %key,
        rows = rows.len(),
        fare_classes = fare_classes.len(),
        "reading flight table"
    );

    let mut collected = CollectedLegs::default();

    for (row_idx, row) in rows.into_iter().enumerate() {
        let times = match row_times(row, flight_date) {
            Ok(times) => times,
            Err(error) => {
                warn!(table = %key, row = row_idx, %error, "skipping malformed flight row");
                collected.malformed_rows.push(MalformedRow { row: row_idx, error });
                continue;
            }
        };

        let fare_cells = fare_cell_markup(row);
        if fare_cells.len() != fare_classes.len() {
            warn!(
                table = %key,
                row = row_idx,
                labels = fare_classes.len(),
                cells = fare_cells.len(),
                "fare header and fare cells disagree; pairing by position"
            );
        }

        for (label, markup) in fare_classes.iter().zip(&fare_cells) {
            let Some(label) = label else { continue };
            let Some(markup) = markup else {
                trace!(row = row_idx, fare_class = %label, "fare cell has no label");
                continue;
            };
            let Some(price) = extract_price(markup) else {
                trace!(row = row_idx, fare_class = %label, "no price in fare cell");
                continue;
            };

            trace!(row = row_idx, fare_class = %label, %price, "leg");
            collected
                .legs
                .push(ItineraryLeg::new(origin, destination, times, label.clone(), price));
        }
    }

    collected
}

/// Fare class label of each header cell, in header order.
///
/// The label is the first whitespace-delimited word of the cell text
/// ("Value Fare" → "Value"). A blank cell keeps its position as `None`
/// so the later columns still line up.
fn fare_class_labels(table: ElementRef<'_>) -> Vec<Option<String>> {
    child_elements(table, "thead")
        .flat_map(|thead| child_elements(thead, "tr"))
        .flat_map(|tr| child_elements(tr, "th"))
        .flat_map(|th| child_elements(th, "span"))
        .map(|span| {
            span.text()
                .collect::<String>()
                .split_whitespace()
                .next()
                .map(str::to_owned)
        })
        .collect()
}

fn row_times(row: ElementRef<'_>, flight_date: NaiveDate) -> Result<FlightTimes, RowError> {
    let departure = time_cell_text(row, "leaving").ok_or(RowError::MissingTimeCell("departure"))?;
    let arrival = time_cell_text(row, "landing").ok_or(RowError::MissingTimeCell("arrival"))?;
    Ok(infer_times(&departure, &arrival, flight_date)?)
}

/// Own text of the row's last `<td class="time {kind}">` cell.
///
/// Only the cell's direct text nodes are read, so markers nested in child
/// elements (`08:00 AM<sup>+1</sup>`) do not reach the time parser.
fn time_cell_text(row: ElementRef<'_>, kind: &str) -> Option<String> {
    child_elements(row, "td")
        .filter(|td| {
            let classes: Vec<&str> = td.value().classes().collect();
            classes.contains(&"time") && classes.contains(&kind)
        })
        .last()
        .map(|td| {
            td.children()
                .filter_map(|node| node.value().as_text())
                .map(|text| &**text)
                .collect::<String>()
        })
}

/// Markup of the first `<label>` in each fare cell, one entry per cell in
/// column order. A cell without a label (sold out as plain text) is `None`,
/// so it still occupies its column.
fn fare_cell_markup(row: ElementRef<'_>) -> Vec<Option<String>> {
    child_elements(row, "td")
        .filter(|td| {
            td.value()
                .attr("class")
                .is_some_and(|class| class.contains(FARE_CELL_CLASS))
        })
        .map(|td| child_elements(td, "label").next().map(|label| label.html()))
        .collect()
}

/// Direct element children of `parent` with the given tag name.
fn child_elements<'a>(
    parent: ElementRef<'a>,
    name: &'static str,
) -> impl Iterator<Item = ElementRef<'a>> {
    parent
        .children()
        .filter_map(ElementRef::wrap)
        .filter(move |child| child.value().name() == name)
}

#[cfg(test)]
#[path = "legs_tests.rs"]
mod tests;
