use super::prelude::*;

pub const RECOMMENDATION_CANDIDATES: u64 = 12;
pub const MAX_RECOMMENDATIONS: usize = 4;

/// Recently recommended dishes, preferring reviews with a photo.
pub fn recommendations<R>(repo: &R) -> Result<Vec<(DetailedReview, Place)>>
where
    R: PlaceRepo + DetailedReviewRepo,
{
    let (with_photo, without_photo): (Vec<_>, Vec<_>) = repo
        .recent_detailed_reviews_with_dish(RECOMMENDATION_CANDIDATES)?
        .into_iter()
        .filter(DetailedReview::has_dish_name)
        .partition(DetailedReview::has_photo);
    let mut results = Vec::with_capacity(MAX_RECOMMENDATIONS);
    for review in with_photo.into_iter().chain(without_photo) {
        if results.len() >= MAX_RECOMMENDATIONS {
            break;
        }
        match repo.get_place(review.place_id.as_str()) {
            Ok(place) => results.push((review, place)),
            Err(repositories::Error::NotFound) => {
                log::warn!("Place {} of review {} not found", review.place_id, review.id);
            }
            Err(err) => return Err(err.into()),
        }
    }
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::super::tests::MockDb;
    use super::*;
    use comidita_entities::builders::*;

    #[test]
    fn prefer_reviews_with_photos() {
        let db = MockDb::default();
        db.places.borrow_mut().push(Place::build().id("p").finish());
        let dish = Some("Milanesa");
        db.reviews.borrow_mut().extend([
            DetailedReview::build().id("1").place_id("p").dish_name(dish).created_at(1).finish(),
            DetailedReview::build().id("2").place_id("p").dish_name(dish).photo_1_url(Some("x")).created_at(2).finish(),
            DetailedReview::build().id("3").place_id("p").dish_name(None).photo_1_url(Some("x")).created_at(3).finish(),
            DetailedReview::build().id("4").place_id("p").dish_name(dish).created_at(4).finish(),
            DetailedReview::build().id("5").place_id("p").dish_name(dish).photo_1_url(Some("x")).created_at(5).finish(),
            DetailedReview::build().id("6").place_id("p").dish_name(dish).created_at(6).finish(),
            DetailedReview::build().id("7").place_id("p").dish_name(Some(" ")).created_at(7).finish(),
        ]);
        let ids: Vec<_> = recommendations(&db)
            .unwrap()
            .into_iter()
            .map(|(r, _)| r.id.to_string())
            .collect();
        assert_eq!(vec!["5", "2", "6", "4"], ids);
    }

    #[test]
    fn skip_reviews_of_missing_places() {
        let db = MockDb::default();
        db.reviews.borrow_mut().push(
            DetailedReview::build()
                .place_id("gone")
                .dish_name(Some("Flan"))
                .finish(),
        );
        assert!(recommendations(&db).unwrap().is_empty());
    }
}
