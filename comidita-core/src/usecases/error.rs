use crate::{entities::InvalidRatingValue, repositories, util::image::ImageInvalidation};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("A signed in user is required")]
    Unauthenticated,
    #[error("The place is incomplete")]
    MalformedPlace,
    #[error("Rating value of {0} out of range")]
    RatingValue(String),
    #[error("Invalid image: {0}")]
    InvalidImage(String),
    #[error("Unknown restaurant category '{0}'")]
    Category(String),
    #[error("Unknown price range '{0}'")]
    PriceRange(String),
    #[error("Too many photos")]
    TooManyPhotos,
    #[error("You already have a review for this place")]
    DuplicateReview,
    #[error("Missing search query")]
    MissingQuery,
    #[error("Missing place id")]
    MissingPlaceId,
    #[error("The external service failed")]
    Upstream(#[source] anyhow::Error),
    #[error(transparent)]
    Repo(#[from] repositories::Error),
}

impl From<ImageInvalidation> for Error {
    fn from(err: ImageInvalidation) -> Self {
        Self::InvalidImage(err.to_string())
    }
}

impl From<(crate::entities::RatingAspect, InvalidRatingValue)> for Error {
    fn from((aspect, _): (crate::entities::RatingAspect, InvalidRatingValue)) -> Self {
        Self::RatingValue(aspect.as_ref().to_string())
    }
}
