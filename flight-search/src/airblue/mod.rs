//! Client for the airblue.com booking site.
//!
//! This is the network boundary of the tool. Nothing here interprets
//! flight data: it builds the search query, fetches pages, and recognises
//! the site's overload notice.

mod client;
mod error;
mod page;

pub use client::{AirblueClient, AirblueConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
pub use error::AirblueError;
pub use page::{FLIGHT_SELECTION_PATH, is_overloaded, parse_airport_codes, search_query};
