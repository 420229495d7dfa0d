//! Deep links from a shelter's address to a map search.

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

pub const DEFAULT_MAP_SEARCH_URL: &str = "https://www.google.com/maps/search/?api=1&query=";

/// Appends the percent-encoded `address` to `search_prefix`.
///
/// Returns `None` for a blank address; there is nothing to search for.
#[must_use]
pub fn map_search_url(search_prefix: &str, address: &str) -> Option<String> {
    let address = address.trim();
    if address.is_empty() {
        return None;
    }
    let encoded = utf8_percent_encode(address, NON_ALPHANUMERIC);
    Some(format!("{search_prefix}{encoded}"))
}
