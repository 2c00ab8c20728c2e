use super::prelude::*;
use crate::{
    gateways::{FoundPlace, PlacesGateway},
    util::search::{filter_by_region, sanitize_search_query},
};

/// Searches the external places provider and keeps only
/// the results located in one of the regions.
pub fn search_external_places<S: AsRef<str>>(
    gateway: &dyn PlacesGateway,
    query: &str,
    regions: &[S],
) -> Result<Vec<FoundPlace>> {
    let query = sanitize_search_query(query);
    if query.is_empty() {
        return Err(Error::MissingQuery);
    }
    let results = gateway.text_search(&query).map_err(|err| {
        log::warn!("Failed to search places for '{query}': {err:#}");
        Error::Upstream(err)
    })?;
    let total = results.len();
    let results = filter_by_region(results, regions);
    log::debug!(
        "Found {} of {total} places for '{query}' within the regions",
        results.len()
    );
    Ok(results)
}

pub fn external_place_details(gateway: &dyn PlacesGateway, place_id: &str) -> Result<String> {
    let place_id = place_id.trim();
    if place_id.is_empty() {
        return Err(Error::MissingPlaceId);
    }
    gateway.place_details(place_id).map_err(|err| {
        log::warn!("Failed to fetch details of place {place_id}: {err:#}");
        Error::Upstream(err)
    })
}
