use super::prelude::*;
use crate::util::search::sanitize_search_query;
use strum::IntoEnumIterator;

pub const DEFAULT_LOCAL_SEARCH_LIMIT: u64 = 10;

pub fn load_place_with_ratings<R>(repo: &R, id: &str) -> Result<(Place, AvgAspectRatings)>
where
    R: PlaceRepo + DetailedReviewRepo,
{
    let place = repo.get_place(id)?;
    let mut ratings = AvgAspectRatingsBuilder::default();
    for review in repo.detailed_reviews_of_place(id)? {
        ratings += &review.ratings;
    }
    Ok((place, ratings.build()))
}

pub fn search_local_places<R: PlaceRepo>(repo: &R, text: &str, limit: Option<u64>) -> Result<Vec<Place>> {
    let text = sanitize_search_query(text);
    if text.is_empty() {
        return Err(Error::MissingQuery);
    }
    let limit = limit.unwrap_or(DEFAULT_LOCAL_SEARCH_LIMIT).min(100);
    Ok(repo.search_places(&text, limit)?)
}

pub fn places_by_category<R: PlaceRepo>(repo: &R, category: RestaurantCategory) -> Result<Vec<Place>> {
    Ok(repo.places_by_category(category)?)
}

/// Number of places for every category, including empty ones.
pub fn category_counts<R: PlaceRepo>(repo: &R) -> Result<Vec<CategoryCount>> {
    let stored = repo.count_places_by_category()?;
    Ok(RestaurantCategory::iter()
        .map(|category| CategoryCount {
            category,
            count: stored
                .iter()
                .find(|c| c.category == category)
                .map(|c| c.count)
                .unwrap_or(0),
        })
        .collect())
}
