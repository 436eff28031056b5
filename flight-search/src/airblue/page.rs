//! Request and response shapes of the booking site.
//!
//! Query construction for the flight selection page, the airport list on
//! the home page, and the "Too Many Requests" page the site serves when it
//! is overloaded.

use std::sync::LazyLock;

use chrono::NaiveDate;
use scraper::{Html, Selector};

use crate::domain::IataCode;
use crate::validate::SearchRequest;

static TITLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("title").expect("static selector"));

static ARRIVAL_AIRPORT_SELECT: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"select[name="AC"]"#).expect("static selector"));

static OPTION: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("option").expect("static selector"));

const OVERLOADED_TITLE: &str = "Too Many Requests";

/// Path of the flight selection page, relative to the site base URL.
pub const FLIGHT_SELECTION_PATH: &str = "/bookings/flight_selection.aspx";

/// Query parameters for the flight selection page.
///
/// ```
/// use flight_search::airblue::search_query;
/// use flight_search::domain::IataCode;
/// use flight_search::validate::SearchRequest;
/// use chrono::NaiveDate;
///
/// let request = SearchRequest {
///     origin: IataCode::parse("KHI").unwrap(),
///     destination: IataCode::parse("ISB").unwrap(),
///     departure: NaiveDate::from_ymd_opt(2020, 2, 27).unwrap(),
///     return_date: None,
/// };
/// let query = search_query(&request);
/// assert!(query.contains(&("TT", "OW".to_string())));
/// assert!(query.contains(&("AM", "2020-02".to_string())));
/// assert!(query.contains(&("AD", "27".to_string())));
/// ```
pub fn search_query(request: &SearchRequest) -> Vec<(&'static str, String)> {
    let trip_type = if request.return_date.is_some() { "RT" } else { "OW" };

    let mut query = vec![
        ("FL", "on".to_string()),
        ("PA", "1".to_string()),
        ("TT", trip_type.to_string()),
        ("DC", request.origin.to_string()),
        ("AC", request.destination.to_string()),
        ("AM", year_month(request.departure)),
        ("AD", day(request.departure)),
    ];

    if let Some(return_date) = request.return_date {
        query.push(("RM", year_month(return_date)));
        query.push(("RD", day(return_date)));
    }

    query
}

fn year_month(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

fn day(date: NaiveDate) -> String {
    date.format("%d").to_string()
}

/// Airport codes the site flies to, from the home page's arrival selector.
///
/// The first option of the selector is a placeholder and is skipped.
/// Option values that are not 3-letter codes are ignored.
pub fn parse_airport_codes(document: &Html) -> Vec<IataCode> {
    let mut codes: Vec<IataCode> = document
        .select(&ARRIVAL_AIRPORT_SELECT)
        .flat_map(|select| select.select(&OPTION).skip(1))
        .filter_map(|option| option.value().attr("value"))
        .filter_map(|value| IataCode::parse(value.trim()).ok())
        .collect();

    codes.sort();
    codes.dedup();
    codes
}

/// Returns true if the page is the site's "Too Many Requests" notice.
pub fn is_overloaded(document: &Html) -> bool {
    document
        .select(&TITLE)
        .next()
        .is_some_and(|title| title.text().collect::<String>().trim() == OVERLOADED_TITLE)
}
