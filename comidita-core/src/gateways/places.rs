use crate::entities::MapPoint;

/// A single result of a text search at the places provider.
#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq)]
pub struct FoundPlace {
    pub place_id           : String,
    pub name               : String,
    pub formatted_address  : String,
    pub pos                : Option<MapPoint>,
    pub rating             : Option<f64>,
    pub user_ratings_total : Option<u64>,
    pub price_level        : Option<u8>,
    pub types              : Vec<String>,
}

pub trait PlacesGateway {
    fn text_search(&self, query: &str) -> anyhow::Result<Vec<FoundPlace>>;

    /// Returns the unmodified JSON payload of the provider.
    fn place_details(&self, place_id: &str) -> anyhow::Result<String>;
}
