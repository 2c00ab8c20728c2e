use crate::{category::*, geo::*, id::*, price::*, rating::*, time::*};

#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq)]
pub struct Place {
    pub id              : Id,
    pub google_place_id : String,
    pub name            : String,
    pub address         : String,
    pub pos             : MapPoint,
    pub phone           : Option<String>,
    pub website         : Option<String>,
    pub category        : Option<RestaurantCategory>,
    pub price_range     : Option<PriceRange>,
    pub rating          : AvgRatingValue,
    pub total_reviews   : u64,
    pub created_at      : TimestampMs,
    pub updated_at      : TimestampMs,
}

/// Describes the place a review is written for.
///
/// The internal id is only known if the place has already been
/// stored. Otherwise the place is resolved by its external id.
#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceRef {
    pub id              : Option<Id>,
    pub google_place_id : String,
    pub name            : String,
    pub address         : String,
    pub pos             : MapPoint,
    pub phone           : Option<String>,
    pub website         : Option<String>,
}

impl PlaceRef {
    pub fn is_complete(&self) -> bool {
        !self.google_place_id.trim().is_empty()
    }

    pub fn into_new_place(
        self,
        id: Id,
        category: Option<RestaurantCategory>,
        price_range: Option<PriceRange>,
        now: TimestampMs,
    ) -> Place {
        let Self {
            id: _,
            google_place_id,
            name,
            address,
            pos,
            phone,
            website,
        } = self;
        Place {
            id,
            google_place_id,
            name,
            address,
            pos,
            phone,
            website,
            category,
            price_range,
            rating: Default::default(),
            total_reviews: 0,
            created_at: now,
            updated_at: now,
        }
    }
}

/// The number of stored places per category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryCount {
    pub category: RestaurantCategory,
    pub count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place_ref() -> PlaceRef {
        PlaceRef {
            id: None,
            google_place_id: "ChIJ123".into(),
            name: "El Cairo".into(),
            address: "Santa Fe 1102, Rosario".into(),
            pos: MapPoint::new(-32.94, -60.64),
            phone: None,
            website: None,
        }
    }

    #[test]
    fn incomplete_without_external_id() {
        assert!(place_ref().is_complete());
        let r = PlaceRef {
            google_place_id: " ".into(),
            ..place_ref()
        };
        assert!(!r.is_complete());
    }

    #[test]
    fn new_place_starts_without_reviews() {
        let now = TimestampMs::from_inner(42);
        let place = place_ref().into_new_place(
            "p1".into(),
            Some(RestaurantCategory::Bares),
            None,
            now,
        );
        assert_eq!("p1", place.id.as_str());
        assert_eq!(0, place.total_reviews);
        assert_eq!(now, place.created_at);
        assert_eq!(Some(RestaurantCategory::Bares), place.category);
    }
}
