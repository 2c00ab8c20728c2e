// Low-level database access traits.
// Each repository is responsible for a single entity and
// its relationships. Related entities are only referenced
// by their id and never modified or loaded by another
// repository.

use crate::entities::*;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("The requested object could not be found")]
    NotFound,
    #[error("The object already exists")]
    AlreadyExists,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

type Result<T> = std::result::Result<T, Error>;

pub trait PlaceRepo {
    /// Fails with [`Error::AlreadyExists`] if either the id or
    /// the external place id is already taken.
    fn create_place(&self, place: Place) -> Result<()>;
    fn update_place(&self, place: &Place) -> Result<()>;

    fn get_place(&self, id: &str) -> Result<Place>;
    fn try_get_place_by_google_id(&self, google_place_id: &str) -> Result<Option<Place>>;

    // Name or address contains the text, best rated first
    fn search_places(&self, text: &str, limit: u64) -> Result<Vec<Place>>;
    // Best rated first
    fn places_by_category(&self, category: RestaurantCategory) -> Result<Vec<Place>>;
    fn count_places_by_category(&self) -> Result<Vec<CategoryCount>>;
}

pub trait DetailedReviewRepo {
    /// Fails with [`Error::AlreadyExists`] if the user
    /// has already reviewed the place.
    fn create_detailed_review(&self, review: DetailedReview) -> Result<()>;

    fn get_detailed_review(&self, id: &str) -> Result<DetailedReview>;
    fn try_get_detailed_review_of_user_for_place(
        &self,
        user_id: &str,
        place_id: &str,
    ) -> Result<Option<DetailedReview>>;

    // Newest first
    fn detailed_reviews_of_place(&self, place_id: &str) -> Result<Vec<DetailedReview>>;
    fn detailed_reviews_of_user(&self, user_id: &str) -> Result<Vec<DetailedReview>>;
    fn recent_detailed_reviews_with_dish(&self, limit: u64) -> Result<Vec<DetailedReview>>;
}

pub trait UserRepo {
    fn create_user(&self, user: &User) -> Result<()>;
    fn try_get_user(&self, id: &str) -> Result<Option<User>>;
    fn add_points(&self, id: &str, points: u64) -> Result<()>;

    fn get_user(&self, id: &str) -> Result<User> {
        self.try_get_user(id)?.ok_or(Error::NotFound)
    }
}
