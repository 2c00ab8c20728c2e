pub use comidita_boundary::*;

use crate::core::{entities as e, gateways, usecases};

pub mod from_json {
    //! JSON -> Entity

    use super::*;
    use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
    use usecases::Error as ParameterError;

    // NOTE:
    // We cannot impl From<T> here, because the JSON structs
    // and the use case parameters both are outside this crate.

    pub fn try_photo(from: NewPhoto) -> Result<e::PhotoSource, ParameterError> {
        match from {
            NewPhoto::Hosted { url } => Ok(e::PhotoSource::Hosted(url)),
            NewPhoto::Upload {
                file_name,
                content_type,
                data,
            } => {
                // Data URLs are accepted as well
                let data = data
                    .split_once(";base64,")
                    .map(|(_, data)| data)
                    .unwrap_or(&data);
                let data = BASE64.decode(data.trim()).map_err(|err| {
                    ParameterError::InvalidImage(format!("{file_name} is not base64 encoded: {err}"))
                })?;
                Ok(e::PhotoSource::Upload(e::ImageFile {
                    file_name,
                    content_type,
                    data,
                }))
            }
        }
    }

    pub fn try_new_detailed_review(
        user: Option<e::Id>,
        from: NewDetailedReview,
        default_pos: e::MapPoint,
    ) -> Result<usecases::NewDetailedReview, ParameterError> {
        let NewDetailedReview {
            place,
            ratings,
            dish_name,
            comment,
            photos,
            price_range,
            category,
        } = from;
        let ratings = e::AspectRatings::try_from(ratings)?;
        let price_range = price_range
            .parse()
            .map_err(|_| ParameterError::PriceRange(price_range))?;
        let category = try_category(&category)?;
        let photos = photos
            .into_iter()
            .map(try_photo)
            .collect::<Result<_, _>>()?;
        Ok(usecases::NewDetailedReview {
            user,
            place: place.into_place_ref(default_pos),
            ratings,
            dish_name,
            comment,
            photos,
            price_range,
            category,
        })
    }

    pub fn try_category(category: &str) -> Result<e::RestaurantCategory, ParameterError> {
        category
            .parse()
            .map_err(|_| ParameterError::Category(category.to_owned()))
    }
}

pub mod to_json {
    //! Entity -> JSON

    use super::*;

    pub fn found_place(from: gateways::FoundPlace) -> FoundPlace {
        let gateways::FoundPlace {
            place_id,
            name,
            formatted_address,
            pos,
            rating,
            user_ratings_total,
            price_level,
            types,
        } = from;
        FoundPlace {
            place_id,
            name,
            formatted_address,
            geometry: pos.map(|pos| Geometry {
                location: pos.into(),
            }),
            rating,
            user_ratings_total,
            price_level,
            types,
        }
    }

    pub fn recommendation((review, place): (e::DetailedReview, e::Place)) -> Recommendation {
        Recommendation {
            review: review.into(),
            place: place.into(),
        }
    }

    pub fn user_profile(from: usecases::UserProfile) -> UserProfile {
        let usecases::UserProfile {
            user,
            stats,
            level,
            next_level,
            level_progress,
        } = from;
        let e::User {
            id,
            email,
            name,
            avatar_url,
            points,
        } = user;
        UserProfile {
            id: id.into(),
            email,
            name,
            avatar_url,
            points,
            stats: UserStats {
                total_reviews: stats.total_reviews,
                total_points: stats.total_points,
                places_reviewed: stats.places_reviewed,
                average_rating: stats.average_rating.into(),
            },
            level: level.into(),
            next_level: next_level.map(Into::into),
            level_progress,
        }
    }

    pub fn review_created(from: usecases::ReviewReceipt) -> ReviewCreated {
        let usecases::ReviewReceipt {
            review_id,
            place_id,
            points_earned,
            first_review_of_place,
        } = from;
        ReviewCreated {
            id: review_id.into(),
            place_id: place_id.into(),
            points_earned,
            first_review_of_place,
        }
    }
}
