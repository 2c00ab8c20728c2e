use serde::{Deserialize, Serialize};

#[cfg(feature = "entity-conversions")]
mod conv;

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, Copy, PartialEq))]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, Copy, PartialEq))]
pub struct Geometry {
    pub location: Coordinate,
}

/// A place as returned by the external places provider.
#[rustfmt::skip]
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct FoundPlace {
    pub place_id           : String,
    pub name               : String,
    pub formatted_address  : String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geometry           : Option<Geometry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating             : Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_ratings_total : Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_level        : Option<u8>,
    #[serde(default)]
    pub types              : Vec<String>,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct SearchResults {
    pub results: Vec<FoundPlace>,
}

#[rustfmt::skip]
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct Place {
    pub id              : String,
    pub google_place_id : String,
    pub name            : String,
    pub address         : String,
    pub lat             : f64,
    pub lng             : f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone           : Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website         : Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category        : Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_range     : Option<String>,
    pub rating          : f64,
    pub total_reviews   : u64,
    pub created_at      : i64,
    pub updated_at      : i64,
}

/// The twelve sub-ratings of a detailed review.
#[rustfmt::skip]
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, Copy, PartialEq, Eq))]
pub struct AspectRatings {
    pub food_taste          : i16,
    pub presentation        : i16,
    pub portion_size        : i16,
    pub drinks_variety      : i16,
    pub veggie_options      : i16,
    pub gluten_free_options : i16,
    pub vegan_options       : i16,
    pub music_acoustics     : i16,
    pub ambiance            : i16,
    pub furniture_comfort   : i16,
    pub cleanliness         : i16,
    pub service             : i16,
}

#[rustfmt::skip]
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, Copy, PartialEq))]
pub struct AvgAspectRatings {
    pub food_taste          : f64,
    pub presentation        : f64,
    pub portion_size        : f64,
    pub drinks_variety      : f64,
    pub veggie_options      : f64,
    pub gluten_free_options : f64,
    pub vegan_options       : f64,
    pub music_acoustics     : f64,
    pub ambiance            : f64,
    pub furniture_comfort   : f64,
    pub cleanliness         : f64,
    pub service             : f64,
    pub overall             : f64,
    pub review_count        : u64,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct PlaceWithRatings {
    pub place: Place,
    pub ratings: AvgAspectRatings,
}

#[rustfmt::skip]
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct DetailedReview {
    pub id             : String,
    pub user_id        : String,
    pub place_id       : String,
    pub ratings        : AspectRatings,
    pub overall_rating : f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dish_name      : Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment        : Option<String>,
    pub photo_1_url    : Option<String>,
    pub photo_2_url    : Option<String>,
    pub price_range    : String,
    pub category       : String,
    pub created_at     : i64,
}

/// The place a new review refers to.
///
/// `id` is missing (or a `temp-` placeholder) for places that
/// have not been stored yet. Places without coordinates are
/// positioned at a default location.
#[rustfmt::skip]
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct NewPlaceRef {
    #[serde(default)]
    pub id              : Option<String>,
    pub google_place_id : String,
    pub name            : String,
    pub address         : String,
    #[serde(default)]
    pub lat             : Option<f64>,
    #[serde(default)]
    pub lng             : Option<f64>,
    #[serde(default)]
    pub phone           : Option<String>,
    #[serde(default)]
    pub website         : Option<String>,
}

/// Either an already hosted photo or an upload with base64 encoded data.
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq, Eq))]
#[serde(untagged)]
pub enum NewPhoto {
    Hosted {
        url: String,
    },
    Upload {
        file_name: String,
        content_type: String,
        data: String,
    },
}

#[rustfmt::skip]
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct NewDetailedReview {
    pub place       : NewPlaceRef,
    pub ratings     : AspectRatings,
    #[serde(default)]
    pub dish_name   : Option<String>,
    #[serde(default)]
    pub comment     : Option<String>,
    #[serde(default)]
    pub photos      : Vec<NewPhoto>,
    pub price_range : String,
    pub category    : String,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq, Eq))]
pub struct ReviewCreated {
    pub id: String,
    pub place_id: String,
    pub points_earned: u64,
    pub first_review_of_place: bool,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq, Eq))]
pub struct CategoryCount {
    pub category: String,
    pub label: String,
    pub count: u64,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct Recommendation {
    pub review: DetailedReview,
    pub place: Place,
}

#[rustfmt::skip]
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq, Eq))]
pub struct UserLevel {
    pub name       : String,
    pub min_points : u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_points : Option<u64>,
    pub color      : String,
    pub icon       : String,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct UserStats {
    pub total_reviews: u64,
    pub total_points: u64,
    pub places_reviewed: u64,
    pub average_rating: f64,
}

#[rustfmt::skip]
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct UserProfile {
    pub id             : String,
    pub email          : Option<String>,
    pub name           : Option<String>,
    pub avatar_url     : Option<String>,
    pub points         : u64,
    pub stats          : UserStats,
    pub level          : UserLevel,
    pub next_level     : Option<UserLevel>,
    pub level_progress : u8,
}

/// Error body of the proxy routes.
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq, Eq))]
pub struct ProxyError {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, thiserror::Error))]
#[cfg_attr(feature = "extra-derive", error("{message}"))]
pub struct Error {
    /// The HTTP status code of the error.
    pub http_status: u16,
    /// A human readable description of the error.
    pub message: String,
}
