//! Flight search over the Airblue booking site.
//!
//! Fetches the flight selection page for a route and dates, reads the
//! fare tables into priced legs, and ranks one-way legs or round-trip
//! pairs by total cost.

pub mod airblue;
pub mod domain;
pub mod extract;
pub mod planner;
pub mod render;
pub mod search;
pub mod validate;
