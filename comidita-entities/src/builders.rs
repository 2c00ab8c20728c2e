pub trait Builder {
    type Build;
    fn build() -> Self::Build;
}

pub use self::{place_builder::*, review_builder::*};

pub mod place_builder {

    use super::*;
    use crate::{category::*, geo::*, id::*, place::*, price::*, time::*};

    #[derive(Debug)]
    pub struct PlaceBuild {
        place: Place,
    }

    impl PlaceBuild {
        pub fn id(mut self, id: &str) -> Self {
            self.place.id = id.into();
            self
        }
        pub fn google_place_id(mut self, id: &str) -> Self {
            self.place.google_place_id = id.into();
            self
        }
        pub fn name(mut self, name: &str) -> Self {
            self.place.name = name.into();
            self
        }
        pub fn address(mut self, address: &str) -> Self {
            self.place.address = address.into();
            self
        }
        pub fn pos(mut self, pos: MapPoint) -> Self {
            self.place.pos = pos;
            self
        }
        pub fn category(mut self, category: Option<RestaurantCategory>) -> Self {
            self.place.category = category;
            self
        }
        pub fn price_range(mut self, price_range: Option<PriceRange>) -> Self {
            self.place.price_range = price_range;
            self
        }
        pub fn rating(mut self, rating: f64) -> Self {
            self.place.rating = rating.into();
            self
        }
        pub fn finish(self) -> Place {
            self.place
        }
    }

    impl Builder for Place {
        type Build = PlaceBuild;
        fn build() -> PlaceBuild {
            let id = Id::new();
            PlaceBuild {
                place: Place {
                    google_place_id: format!("g-{id}"),
                    id,
                    name: "".into(),
                    address: "".into(),
                    pos: MapPoint::new(-32.9442426, -60.6505388),
                    phone: None,
                    website: None,
                    category: None,
                    price_range: None,
                    rating: Default::default(),
                    total_reviews: 0,
                    created_at: TimestampMs::now(),
                    updated_at: TimestampMs::now(),
                },
            }
        }
    }
}

pub mod review_builder {

    use super::*;
    use crate::{category::*, id::*, price::*, rating::*, review::*, time::*};

    #[derive(Debug)]
    pub struct DetailedReviewBuild {
        review: DetailedReview,
    }

    impl DetailedReviewBuild {
        pub fn id(mut self, id: &str) -> Self {
            self.review.id = id.into();
            self
        }
        pub fn user_id(mut self, id: &str) -> Self {
            self.review.user_id = id.into();
            self
        }
        pub fn place_id(mut self, id: &str) -> Self {
            self.review.place_id = id.into();
            self
        }
        pub fn ratings(mut self, value: i16) -> Self {
            let value = RatingValue::try_from(value).expect("valid rating value");
            self.review.ratings = AspectRatings::uniform(value);
            self
        }
        pub fn dish_name(mut self, dish_name: Option<&str>) -> Self {
            self.review.dish_name = dish_name.map(Into::into);
            self
        }
        pub fn photo_1_url(mut self, url: Option<&str>) -> Self {
            self.review.photo_1_url = url.map(Into::into);
            self
        }
        pub fn category(mut self, category: RestaurantCategory) -> Self {
            self.review.category = category;
            self
        }
        pub fn created_at(mut self, created_at: i64) -> Self {
            self.review.created_at = TimestampMs::from_inner(created_at);
            self
        }
        pub fn finish(self) -> DetailedReview {
            self.review
        }
    }

    impl Builder for DetailedReview {
        type Build = DetailedReviewBuild;
        fn build() -> DetailedReviewBuild {
            DetailedReviewBuild {
                review: DetailedReview {
                    id: Id::new(),
                    user_id: Id::new(),
                    place_id: Id::new(),
                    ratings: AspectRatings::uniform(RatingValue::max()),
                    dish_name: None,
                    comment: None,
                    photo_1_url: None,
                    photo_2_url: None,
                    price_range: PriceRange::From10000To15000,
                    category: RestaurantCategory::Restaurantes,
                    created_at: TimestampMs::now(),
                },
            }
        }
    }
}
