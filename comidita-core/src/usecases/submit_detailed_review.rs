use super::prelude::*;
use crate::util::image::validate_image_file;

#[rustfmt::skip]
#[derive(Debug, Clone)]
pub struct NewDetailedReview {
    pub user        : Option<Id>,
    pub place       : PlaceRef,
    pub ratings     : AspectRatings,
    pub dish_name   : Option<String>,
    pub comment     : Option<String>,
    pub photos      : Vec<PhotoSource>,
    pub price_range : PriceRange,
    pub category    : RestaurantCategory,
}

/// A validated review together with its resolved place.
///
/// The photos still need to be materialized before
/// the review can be stored.
#[derive(Debug, Clone)]
pub struct PreparedReview {
    place: Place,
    review: DetailedReview,
    photos: Vec<PhotoSource>,
}

impl PreparedReview {
    pub fn review_id(&self) -> &Id {
        &self.review.id
    }

    pub fn user_id(&self) -> &Id {
        &self.review.user_id
    }

    pub fn place(&self) -> &Place {
        &self.place
    }

    pub fn take_photos(&mut self) -> Vec<PhotoSource> {
        std::mem::take(&mut self.photos)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReviewReceipt {
    pub review_id: Id,
    pub place_id: Id,
    pub points_earned: u64,
    pub first_review_of_place: bool,
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.map(|s| s.trim().to_owned()).filter(|s| !s.is_empty())
}

pub fn prepare_detailed_review<R>(repo: &R, new_review: NewDetailedReview) -> Result<PreparedReview>
where
    R: PlaceRepo + DetailedReviewRepo,
{
    let NewDetailedReview {
        user,
        place,
        ratings,
        dish_name,
        comment,
        photos,
        price_range,
        category,
    } = new_review;
    let user_id = user.filter(Id::is_valid).ok_or(Error::Unauthenticated)?;
    if !place.is_complete() {
        return Err(Error::MalformedPlace);
    }
    if photos.len() > MAX_REVIEW_PHOTOS {
        return Err(Error::TooManyPhotos);
    }
    for photo in &photos {
        match photo {
            PhotoSource::Upload(file) => validate_image_file(file)?,
            PhotoSource::Hosted(url) => {
                if url.trim().is_empty() {
                    return Err(Error::InvalidImage("Empty photo URL".into()));
                }
            }
        }
    }
    let now = TimestampMs::now();
    let place = resolve_place(repo, place, now)?;
    if repo
        .try_get_detailed_review_of_user_for_place(user_id.as_str(), place.id.as_str())?
        .is_some()
    {
        return Err(Error::DuplicateReview);
    }
    let review = DetailedReview {
        id: Id::new(),
        user_id,
        place_id: place.id.clone(),
        ratings,
        dish_name: non_empty(dish_name),
        comment: non_empty(comment),
        photo_1_url: None,
        photo_2_url: None,
        price_range,
        category,
        created_at: now,
    };
    Ok(PreparedReview {
        place,
        review,
        photos,
    })
}

// Lookup-or-insert by the external place id.
fn resolve_place<R: PlaceRepo>(repo: &R, place_ref: PlaceRef, now: TimestampMs) -> Result<Place> {
    if let Some(id) = &place_ref.id {
        match repo.get_place(id.as_str()) {
            Ok(place) => return Ok(place),
            Err(repositories::Error::NotFound) => {
                log::debug!("Place {id} not found, resolving it by its external id");
            }
            Err(err) => return Err(err.into()),
        }
    }
    if let Some(place) = repo.try_get_place_by_google_id(&place_ref.google_place_id)? {
        return Ok(place);
    }
    let google_place_id = place_ref.google_place_id.clone();
    let new_place = place_ref.into_new_place(Id::new(), None, None, now);
    match repo.create_place(new_place.clone()) {
        Ok(()) => {
            log::info!("Created place {} ({})", new_place.id, google_place_id);
            Ok(new_place)
        }
        Err(repositories::Error::AlreadyExists) => {
            // Inserted concurrently
            repo.try_get_place_by_google_id(&google_place_id)?
                .ok_or(Error::Repo(repositories::Error::NotFound))
        }
        Err(err) => Err(err.into()),
    }
}

pub fn store_detailed_review<R>(
    repo: &R,
    prepared: PreparedReview,
    photo_urls: Vec<String>,
) -> Result<ReviewReceipt>
where
    R: PlaceRepo + DetailedReviewRepo + UserRepo,
{
    let PreparedReview {
        place, mut review, ..
    } = prepared;
    debug_assert_eq!(place.id, review.place_id);
    let mut photo_urls = photo_urls.into_iter();
    review.photo_1_url = photo_urls.next();
    review.photo_2_url = photo_urls.next();

    let previous_reviews = repo.detailed_reviews_of_place(place.id.as_str())?;
    let first_review_of_place = previous_reviews.is_empty();
    repo.create_detailed_review(review.clone())
        .map_err(|err| match err {
            repositories::Error::AlreadyExists => Error::DuplicateReview,
            err => Error::Repo(err),
        })?;

    let points_earned = points_for_review(first_review_of_place);
    if repo.try_get_user(review.user_id.as_str())?.is_none() {
        repo.create_user(&User::new(review.user_id.clone()))?;
    }
    repo.add_points(review.user_id.as_str(), points_earned)?;

    let mut place = repo.get_place(place.id.as_str())?;
    let mut avg_rating = AvgRatingValueBuilder::default();
    for r in previous_reviews.iter().chain(std::iter::once(&review)) {
        avg_rating += r.overall_rating();
    }
    place.total_reviews = avg_rating.count() as u64;
    place.rating = avg_rating.build().rounded();
    place.category = place.category.or(Some(review.category));
    place.price_range = place.price_range.or(Some(review.price_range));
    place.updated_at = TimestampMs::now();
    repo.update_place(&place)?;

    Ok(ReviewReceipt {
        review_id: review.id,
        place_id: place.id,
        points_earned,
        first_review_of_place,
    })
}

#[cfg(test)]
mod tests {
    use super::super::tests::MockDb;
    use super::*;
    use comidita_entities::builders::*;

    fn place_ref(google_place_id: &str) -> PlaceRef {
        PlaceRef {
            id: None,
            google_place_id: google_place_id.into(),
            name: "La Estancia".into(),
            address: "Av. Pellegrini 1510, Rosario, Santa Fe".into(),
            pos: MapPoint::new(-32.95, -60.65),
            phone: None,
            website: None,
        }
    }

    fn new_review(user: Option<&str>, google_place_id: &str) -> NewDetailedReview {
        NewDetailedReview {
            user: user.map(Into::into),
            place: place_ref(google_place_id),
            ratings: AspectRatings::uniform(RatingValue::try_from(8).unwrap()),
            dish_name: Some(" Bife de chorizo ".into()),
            comment: Some("".into()),
            photos: vec![],
            price_range: PriceRange::From20000To30000,
            category: RestaurantCategory::Parrillas,
        }
    }

    fn submit(db: &MockDb, new_review: NewDetailedReview) -> Result<ReviewReceipt> {
        let mut prepared = prepare_detailed_review(db, new_review)?;
        let urls = prepared
            .take_photos()
            .into_iter()
            .filter_map(|p| match p {
                PhotoSource::Hosted(url) => Some(url),
                PhotoSource::Upload(_) => None,
            })
            .collect();
        store_detailed_review(db, prepared, urls)
    }

    #[test]
    fn reject_without_user() {
        let db = MockDb::default();
        assert!(matches!(
            prepare_detailed_review(&db, new_review(None, "g1")),
            Err(Error::Unauthenticated)
        ));
        assert!(matches!(
            prepare_detailed_review(&db, new_review(Some(""), "g1")),
            Err(Error::Unauthenticated)
        ));
        assert!(db.places.borrow().is_empty());
    }

    #[test]
    fn reject_without_external_place_id() {
        let db = MockDb::default();
        assert!(matches!(
            prepare_detailed_review(&db, new_review(Some("u1"), "")),
            Err(Error::MalformedPlace)
        ));
        assert!(db.places.borrow().is_empty());
    }

    #[test]
    fn create_new_place_exactly_once() {
        let db = MockDb::default();
        let receipt = submit(&db, new_review(Some("u1"), "g-new")).unwrap();
        assert_eq!(1, db.places.borrow().len());
        let place = db.places.borrow()[0].clone();
        assert_eq!("g-new", place.google_place_id);
        assert_eq!(place.id, receipt.place_id);
        assert_eq!(place.id, db.reviews.borrow()[0].place_id);

        submit(&db, new_review(Some("u2"), "g-new")).unwrap();
        assert_eq!(1, db.places.borrow().len());
        assert_eq!(2, db.reviews.borrow().len());
    }

    #[test]
    fn reuse_existing_place_by_internal_id() {
        let db = MockDb::default();
        let place = Place::build().id("p1").google_place_id("g1").finish();
        db.places.borrow_mut().push(place);
        let mut r = new_review(Some("u1"), "g1");
        r.place.id = Some("p1".into());
        let receipt = submit(&db, r).unwrap();
        assert_eq!("p1", receipt.place_id.as_str());
        assert_eq!(1, db.places.borrow().len());
    }

    #[test]
    fn fall_back_to_external_id_for_unknown_internal_id() {
        let db = MockDb::default();
        let place = Place::build().id("p1").google_place_id("g1").finish();
        db.places.borrow_mut().push(place);
        let mut r = new_review(Some("u1"), "g1");
        r.place.id = Some("stale".into());
        let receipt = submit(&db, r).unwrap();
        assert_eq!("p1", receipt.place_id.as_str());
    }

    #[test]
    fn reject_second_review_of_same_place() {
        let db = MockDb::default();
        submit(&db, new_review(Some("u1"), "g1")).unwrap();
        let err = submit(&db, new_review(Some("u1"), "g1")).unwrap_err();
        assert!(matches!(err, Error::DuplicateReview));
        assert_eq!(
            "You already have a review for this place",
            err.to_string()
        );
        assert_eq!(1, db.reviews.borrow().len());
    }

    #[test]
    fn duplicate_detected_on_insert() {
        let db = MockDb::default();
        let prepared = prepare_detailed_review(&db, new_review(Some("u1"), "g1")).unwrap();
        let again = prepare_detailed_review(&db, new_review(Some("u1"), "g1")).unwrap();
        store_detailed_review(&db, prepared, vec![]).unwrap();
        assert!(matches!(
            store_detailed_review(&db, again, vec![]),
            Err(Error::DuplicateReview)
        ));
        assert_eq!(1, db.reviews.borrow().len());
    }

    #[test]
    fn award_points_with_bonus_for_first_review() {
        let db = MockDb::default();
        let first = submit(&db, new_review(Some("u1"), "g1")).unwrap();
        assert!(first.first_review_of_place);
        assert_eq!(150, first.points_earned);
        let second = submit(&db, new_review(Some("u2"), "g1")).unwrap();
        assert!(!second.first_review_of_place);
        assert_eq!(100, second.points_earned);
        let third = submit(&db, new_review(Some("u1"), "g2")).unwrap();
        assert_eq!(150, third.points_earned);

        let users = db.users.borrow();
        let u1 = users.iter().find(|u| u.id.as_str() == "u1").unwrap();
        assert_eq!(300, u1.points);
    }

    #[test]
    fn refresh_place_aggregates() {
        let db = MockDb::default();
        submit(&db, new_review(Some("u1"), "g1")).unwrap();
        let mut r = new_review(Some("u2"), "g1");
        r.ratings = AspectRatings::uniform(RatingValue::try_from(5).unwrap());
        r.category = RestaurantCategory::Bares;
        submit(&db, r).unwrap();
        let place = db.places.borrow()[0].clone();
        assert_eq!(2, place.total_reviews);
        assert_eq!(AvgRatingValue::from(6.5), place.rating);
        // The first review decides the category
        assert_eq!(Some(RestaurantCategory::Parrillas), place.category);
        assert_eq!(Some(PriceRange::From20000To30000), place.price_range);
    }

    #[test]
    fn normalize_optional_texts() {
        let db = MockDb::default();
        submit(&db, new_review(Some("u1"), "g1")).unwrap();
        let review = db.reviews.borrow()[0].clone();
        assert_eq!(Some("Bife de chorizo".to_string()), review.dish_name);
        assert_eq!(None, review.comment);
    }

    #[test]
    fn keep_hosted_photo_urls_in_order() {
        let db = MockDb::default();
        let mut r = new_review(Some("u1"), "g1");
        r.photos = vec![
            PhotoSource::Hosted("https://img/1.jpg".into()),
            PhotoSource::Hosted("https://img/2.jpg".into()),
        ];
        submit(&db, r).unwrap();
        let review = db.reviews.borrow()[0].clone();
        assert_eq!(Some("https://img/1.jpg"), review.photo_1_url.as_deref());
        assert_eq!(Some("https://img/2.jpg"), review.photo_2_url.as_deref());
    }

    #[test]
    fn reject_invalid_photos_before_anything_is_stored() {
        let db = MockDb::default();
        let mut r = new_review(Some("u1"), "g1");
        r.photos = vec![PhotoSource::Upload(ImageFile {
            file_name: "notes.jpg".into(),
            content_type: "image/jpeg".into(),
            data: b"plain text".to_vec(),
        })];
        assert!(matches!(
            prepare_detailed_review(&db, r),
            Err(Error::InvalidImage(_))
        ));
        assert!(db.places.borrow().is_empty());
    }

    #[test]
    fn reject_more_than_two_photos() {
        let db = MockDb::default();
        let mut r = new_review(Some("u1"), "g1");
        r.photos = vec![PhotoSource::Hosted("https://img/x.jpg".into()); 3];
        assert!(matches!(
            prepare_detailed_review(&db, r),
            Err(Error::TooManyPhotos)
        ));
    }
}
