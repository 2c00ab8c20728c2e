use lazy_static::lazy_static;
use regex::Regex;

use crate::gateways::FoundPlace;

pub const MAX_SEARCH_QUERY_LEN: usize = 100;

lazy_static! {
    static ref UNSUPPORTED_QUERY_CHARS: Regex =
        Regex::new(r"[^A-Za-z0-9_\s\-áéíóúñüÁÉÍÓÚÑÜ]").unwrap();
}

/// Removes everything from a free text query that is neither a letter,
/// a digit, whitespace nor a dash and limits its length.
pub fn sanitize_search_query(query: &str) -> String {
    UNSUPPORTED_QUERY_CHARS
        .replace_all(query.trim(), "")
        .chars()
        .take(MAX_SEARCH_QUERY_LEN)
        .collect()
}

/// Keeps only places with an address in one of the regions.
///
/// Regions are matched as case-insensitive substrings.
pub fn filter_by_region<S: AsRef<str>>(places: Vec<FoundPlace>, regions: &[S]) -> Vec<FoundPlace> {
    let regions: Vec<_> = regions
        .iter()
        .map(|r| r.as_ref().trim().to_lowercase())
        .filter(|r| !r.is_empty())
        .collect();
    places
        .into_iter()
        .filter(|place| {
            let address = place.formatted_address.to_lowercase();
            regions.iter().any(|region| address.contains(region.as_str()))
        })
        .collect()
}
