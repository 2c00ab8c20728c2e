use crate::{category::*, id::*, price::*, rating::*, time::*};

/// The maximum number of photos per review.
pub const MAX_REVIEW_PHOTOS: usize = 2;

#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq)]
pub struct DetailedReview {
    pub id          : Id,
    pub user_id     : Id,
    pub place_id    : Id,
    pub ratings     : AspectRatings,
    pub dish_name   : Option<String>,
    pub comment     : Option<String>,
    pub photo_1_url : Option<String>,
    pub photo_2_url : Option<String>,
    pub price_range : PriceRange,
    pub category    : RestaurantCategory,
    pub created_at  : TimestampMs,
}

impl DetailedReview {
    pub fn overall_rating(&self) -> AvgRatingValue {
        self.ratings.overall()
    }

    pub fn has_photo(&self) -> bool {
        self.photo_1_url.is_some() || self.photo_2_url.is_some()
    }

    pub fn has_dish_name(&self) -> bool {
        self.dish_name
            .as_deref()
            .map(|name| !name.trim().is_empty())
            .unwrap_or(false)
    }

    pub fn photo_urls(&self) -> impl Iterator<Item = &str> {
        self.photo_1_url
            .as_deref()
            .into_iter()
            .chain(self.photo_2_url.as_deref())
    }
}
