use super::*;
use comidita_entities as e;

/// Prefix of ids that clients assign to places not stored yet.
const TEMPORARY_ID_PREFIX: &str = "temp-";

impl From<e::geo::MapPoint> for Coordinate {
    fn from(from: e::geo::MapPoint) -> Self {
        Self {
            lat: from.lat(),
            lng: from.lng(),
        }
    }
}

impl From<e::place::Place> for Place {
    fn from(from: e::place::Place) -> Self {
        let e::place::Place {
            id,
            google_place_id,
            name,
            address,
            pos,
            phone,
            website,
            category,
            price_range,
            rating,
            total_reviews,
            created_at,
            updated_at,
        } = from;
        Self {
            id: id.into(),
            google_place_id,
            name,
            address,
            lat: pos.lat(),
            lng: pos.lng(),
            phone,
            website,
            category: category.map(|c| c.as_ref().to_owned()),
            price_range: price_range.map(|p| p.as_ref().to_owned()),
            rating: rating.rounded().into(),
            total_reviews,
            created_at: created_at.into_inner(),
            updated_at: updated_at.into_inner(),
        }
    }
}

impl From<e::rating::AspectRatings> for AspectRatings {
    fn from(from: e::rating::AspectRatings) -> Self {
        Self {
            food_taste: from.food_taste.into(),
            presentation: from.presentation.into(),
            portion_size: from.portion_size.into(),
            drinks_variety: from.drinks_variety.into(),
            veggie_options: from.veggie_options.into(),
            gluten_free_options: from.gluten_free_options.into(),
            vegan_options: from.vegan_options.into(),
            music_acoustics: from.music_acoustics.into(),
            ambiance: from.ambiance.into(),
            furniture_comfort: from.furniture_comfort.into(),
            cleanliness: from.cleanliness.into(),
            service: from.service.into(),
        }
    }
}

impl TryFrom<AspectRatings> for e::rating::AspectRatings {
    type Error = (e::rating::RatingAspect, e::rating::InvalidRatingValue);

    fn try_from(from: AspectRatings) -> Result<Self, Self::Error> {
        use e::rating::RatingAspect::*;
        Self::try_from_fn(|aspect| match aspect {
            FoodTaste => from.food_taste,
            Presentation => from.presentation,
            PortionSize => from.portion_size,
            DrinksVariety => from.drinks_variety,
            VeggieOptions => from.veggie_options,
            GlutenFreeOptions => from.gluten_free_options,
            VeganOptions => from.vegan_options,
            MusicAcoustics => from.music_acoustics,
            Ambiance => from.ambiance,
            FurnitureComfort => from.furniture_comfort,
            Cleanliness => from.cleanliness,
            Service => from.service,
        })
    }
}

impl From<e::rating::AvgAspectRatings> for AvgAspectRatings {
    fn from(from: e::rating::AvgAspectRatings) -> Self {
        use e::rating::RatingAspect::*;
        let avg = |aspect| f64::from(from.get(aspect).rounded());
        Self {
            food_taste: avg(FoodTaste),
            presentation: avg(Presentation),
            portion_size: avg(PortionSize),
            drinks_variety: avg(DrinksVariety),
            veggie_options: avg(VeggieOptions),
            gluten_free_options: avg(GlutenFreeOptions),
            vegan_options: avg(VeganOptions),
            music_acoustics: avg(MusicAcoustics),
            ambiance: avg(Ambiance),
            furniture_comfort: avg(FurnitureComfort),
            cleanliness: avg(Cleanliness),
            service: avg(Service),
            overall: from.overall.rounded().into(),
            review_count: from.review_count as u64,
        }
    }
}

impl From<e::review::DetailedReview> for DetailedReview {
    fn from(from: e::review::DetailedReview) -> Self {
        let overall_rating = from.overall_rating().rounded().into();
        let e::review::DetailedReview {
            id,
            user_id,
            place_id,
            ratings,
            dish_name,
            comment,
            photo_1_url,
            photo_2_url,
            price_range,
            category,
            created_at,
        } = from;
        Self {
            id: id.into(),
            user_id: user_id.into(),
            place_id: place_id.into(),
            ratings: ratings.into(),
            overall_rating,
            dish_name,
            comment,
            photo_1_url,
            photo_2_url,
            price_range: price_range.as_ref().to_owned(),
            category: category.as_ref().to_owned(),
            created_at: created_at.into_inner(),
        }
    }
}

impl NewPlaceRef {
    /// The referenced place, positioned at `fallback_pos`
    /// unless both coordinates are given.
    pub fn into_place_ref(self, fallback_pos: e::geo::MapPoint) -> e::place::PlaceRef {
        let NewPlaceRef {
            id,
            google_place_id,
            name,
            address,
            lat,
            lng,
            phone,
            website,
        } = self;
        let id = id
            .map(|id| id.trim().to_owned())
            .filter(|id| !id.is_empty() && !id.starts_with(TEMPORARY_ID_PREFIX))
            .map(e::id::Id::from);
        let pos = match (lat, lng) {
            (Some(lat), Some(lng)) => e::geo::MapPoint::new(lat, lng),
            _ => fallback_pos,
        };
        e::place::PlaceRef {
            id,
            google_place_id: google_place_id.trim().to_owned(),
            name,
            address,
            pos,
            phone,
            website,
        }
    }
}

impl From<e::place::CategoryCount> for CategoryCount {
    fn from(from: e::place::CategoryCount) -> Self {
        let e::place::CategoryCount { category, count } = from;
        Self {
            category: category.as_ref().to_owned(),
            label: category.label().to_owned(),
            count,
        }
    }
}

impl From<e::user::UserLevel> for UserLevel {
    fn from(from: e::user::UserLevel) -> Self {
        let e::user::UserLevel {
            name,
            min_points,
            max_points,
            color,
            icon,
        } = from;
        Self {
            name: name.to_owned(),
            min_points,
            max_points,
            color: color.to_owned(),
            icon: icon.to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place_ref(id: Option<&str>) -> NewPlaceRef {
        NewPlaceRef {
            id: id.map(Into::into),
            google_place_id: " ChIJ1 ".into(),
            name: "El Cairo".into(),
            address: "Rosario".into(),
            lat: Some(-32.9),
            lng: Some(-60.6),
            phone: None,
            website: None,
        }
    }

    fn centre() -> e::geo::MapPoint {
        e::geo::MapPoint::new(-32.9442426, -60.6505388)
    }

    #[test]
    fn temporary_place_ids_are_absent() {
        let place = place_ref(Some("temp-1700000000000")).into_place_ref(centre());
        assert!(place.id.is_none());
        assert_eq!("ChIJ1", place.google_place_id);
        assert!(place_ref(Some(" ")).into_place_ref(centre()).id.is_none());
        assert!(place_ref(None).into_place_ref(centre()).id.is_none());
        assert_eq!(
            Some("abc"),
            place_ref(Some("abc"))
                .into_place_ref(centre())
                .id
                .as_ref()
                .map(e::id::Id::as_str)
        );
    }

    #[test]
    fn position_places_without_coordinates_at_fallback() {
        let place = place_ref(None).into_place_ref(centre());
        assert_eq!(e::geo::MapPoint::new(-32.9, -60.6), place.pos);

        let mut without_lng = place_ref(None);
        without_lng.lng = None;
        assert_eq!(centre(), without_lng.into_place_ref(centre()).pos);

        let mut without_pos = place_ref(None);
        without_pos.lat = None;
        without_pos.lng = None;
        assert_eq!(centre(), without_pos.into_place_ref(centre()).pos);
    }

    #[test]
    fn reject_out_of_range_ratings() {
        let mut ratings = AspectRatings::from(e::rating::AspectRatings::uniform(
            e::rating::RatingValue::max(),
        ));
        assert!(e::rating::AspectRatings::try_from(AspectRatings { ..ratings }).is_ok());
        ratings.cleanliness = 11;
        let (aspect, err) = e::rating::AspectRatings::try_from(ratings).unwrap_err();
        assert_eq!(e::rating::RatingAspect::Cleanliness, aspect);
        assert_eq!(e::rating::InvalidRatingValue(11), err);
    }
}
