use super::prelude::*;

pub fn load_review<R: DetailedReviewRepo>(repo: &R, id: &str) -> Result<DetailedReview> {
    Ok(repo.get_detailed_review(id)?)
}

pub fn load_place_reviews<R>(repo: &R, place_id: &str) -> Result<Vec<DetailedReview>>
where
    R: PlaceRepo + DetailedReviewRepo,
{
    // Distinguish an unknown place from a place without reviews
    repo.get_place(place_id)?;
    Ok(repo.detailed_reviews_of_place(place_id)?)
}

#[cfg(test)]
mod tests {
    use super::super::tests::MockDb;
    use super::*;
    use comidita_entities::builders::*;

    #[test]
    fn newest_reviews_first() {
        let db = MockDb::default();
        db.places.borrow_mut().push(Place::build().id("p1").finish());
        db.reviews.borrow_mut().extend([
            DetailedReview::build().id("old").place_id("p1").created_at(1).finish(),
            DetailedReview::build().id("new").place_id("p1").created_at(2).finish(),
        ]);
        let reviews = load_place_reviews(&db, "p1").unwrap();
        let ids: Vec<_> = reviews.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(vec!["new", "old"], ids);
    }

    #[test]
    fn reviews_of_unknown_place() {
        let db = MockDb::default();
        assert!(load_place_reviews(&db, "p1").is_err());
        assert!(load_review(&db, "r1").is_err());
    }
}
