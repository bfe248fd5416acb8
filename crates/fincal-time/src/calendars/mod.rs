//! Concrete market calendars and the identifier lookup table.

pub mod united_states;

use crate::calendar::{HolidayOracle, NULL_CALENDAR, WEEKENDS_ONLY};
use united_states::UsMarket;

/// Identifiers understood by [`Calendar::from_market_id`](crate::Calendar::from_market_id).
pub const MARKET_IDS: [&str; 8] = [
    "NULL",
    "WEEKENDS-ONLY",
    "US-SETTLEMENT",
    "US-LIBOR",
    "US-NYSE",
    "US-GOVBOND",
    "US-NERC",
    "US-FED",
];

static MARKETS: [(&str, &(dyn HolidayOracle + 'static)); 2] =
    [("NULL", &NULL_CALENDAR), ("WEEKENDS-ONLY", &WEEKENDS_ONLY)];

/// Oracle registered under `id`, compared case-insensitively.
pub(crate) fn oracle_for(id: &str) -> Option<&'static dyn HolidayOracle> {
    MARKETS
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(id))
        .map(|&(_, oracle)| oracle)
        .or_else(|| id.parse::<UsMarket>().ok().map(UsMarket::oracle))
}
