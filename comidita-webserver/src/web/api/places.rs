use super::*;

#[get("/places?<q>&<limit>")]
pub fn get_places(db: Db, q: Option<String>, limit: Option<u64>) -> Result<Vec<json::Place>> {
    let places = usecases::search_local_places(
        &db.shared()?,
        q.as_deref().unwrap_or_default(),
        limit,
    )?;
    Ok(Json(places.into_iter().map(Into::into).collect()))
}

#[get("/places/<id>")]
pub fn get_place(db: Db, id: &str) -> Result<json::PlaceWithRatings> {
    let (place, ratings) = usecases::load_place_with_ratings(&db.shared()?, id)?;
    Ok(Json(json::PlaceWithRatings {
        place: place.into(),
        ratings: ratings.into(),
    }))
}

#[get("/places/<id>/reviews")]
pub fn get_place_reviews(db: Db, id: &str) -> Result<Vec<json::DetailedReview>> {
    let reviews = usecases::load_place_reviews(&db.shared()?, id)?;
    Ok(Json(reviews.into_iter().map(Into::into).collect()))
}

#[get("/categories")]
pub fn get_categories(db: Db) -> Result<Vec<json::CategoryCount>> {
    let counts = usecases::category_counts(&db.shared()?)?;
    Ok(Json(counts.into_iter().map(Into::into).collect()))
}

#[get("/categories/<category>/places")]
pub fn get_category_places(db: Db, category: &str) -> Result<Vec<json::Place>> {
    let category = from_json::try_category(category)?;
    let places = usecases::places_by_category(&db.shared()?, category)?;
    Ok(Json(places.into_iter().map(Into::into).collect()))
}
