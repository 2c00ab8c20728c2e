use super::*;
use comidita_core::{gateways::PhotoStorageGateway, util::image::CompressionOptions};

/// Stores a new detailed review.
///
/// The store is only locked while resolving the place and while
/// writing the review. Photos are compressed and uploaded in between.
pub fn submit_detailed_review(
    connections: &sqlite::Connections,
    photo_storage: &dyn PhotoStorageGateway,
    new_review: usecases::NewDetailedReview,
    compression: &CompressionOptions,
) -> Result<usecases::ReviewReceipt> {
    let mut prepared = {
        let mut connection = connections.exclusive()?;
        connection.transaction(|conn| usecases::prepare_detailed_review(conn, new_review))?
    };
    let photos = prepared.take_photos();
    let photo_urls = if photos.is_empty() {
        vec![]
    } else {
        let user_id = prepared.user_id().clone();
        let review_id = prepared.review_id().clone();
        usecases::materialize_photos(photo_storage, &user_id, &review_id, photos, compression)
    };
    let receipt = {
        let mut connection = connections.exclusive()?;
        connection
            .transaction(|conn| usecases::store_detailed_review(conn, prepared, photo_urls))
            .inspect_err(|err| warn!("Failed to store new detailed review: {err}"))?
    };
    info!(
        "Created review {} of place {} ({} points)",
        receipt.review_id, receipt.place_id, receipt.points_earned
    );
    Ok(receipt)
}

#[cfg(test)]
mod tests {
    use super::super::tests::prelude::*;

    #[test]
    fn submit_review_of_new_place() {
        let fixture = BackendFixture::new();
        let receipt = fixture
            .submit(new_review("u1", "g1", vec![png_upload(), hosted("https://img/2.jpg")]))
            .unwrap();
        assert!(receipt.first_review_of_place);
        assert_eq!(150, receipt.points_earned);

        let db = fixture.db_connections.shared().unwrap();
        let place = db.get_place(receipt.place_id.as_str()).unwrap();
        assert_eq!("g1", place.google_place_id);
        assert_eq!(1, place.total_reviews);
        assert_eq!(Some(RestaurantCategory::Parrillas), place.category);

        let review = db.get_detailed_review(receipt.review_id.as_str()).unwrap();
        let photo_1 = review.photo_1_url.unwrap();
        assert!(photo_1.starts_with(&format!("https://storage/u1_{}_1_", receipt.review_id)));
        assert_eq!(Some("https://img/2.jpg"), review.photo_2_url.as_deref());
        assert_eq!(1, fixture.photo_storage.uploads.borrow().len());
        assert_eq!(150, db.get_user("u1").unwrap().points);
    }

    #[test]
    fn reject_duplicate_review_without_uploading_photos() {
        let fixture = BackendFixture::new();
        fixture.submit(new_review("u1", "g1", vec![])).unwrap();
        let err = fixture
            .submit(new_review("u1", "g1", vec![png_upload()]))
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::Business(BError::Parameter(usecases::Error::DuplicateReview))
        ));
        assert!(fixture.photo_storage.uploads.borrow().is_empty());
    }

    #[test]
    fn second_review_of_place_earns_no_bonus() {
        let fixture = BackendFixture::new();
        let first = fixture.submit(new_review("u1", "g1", vec![])).unwrap();
        let second = fixture.submit(new_review("u2", "g1", vec![])).unwrap();
        assert_eq!(first.place_id, second.place_id);
        assert!(!second.first_review_of_place);
        assert_eq!(100, second.points_earned);
        let db = fixture.db_connections.shared().unwrap();
        assert_eq!(
            2,
            db.get_place(first.place_id.as_str()).unwrap().total_reviews
        );
    }

    #[test]
    fn degrade_to_placeholder_if_storage_fails() {
        let mut fixture = BackendFixture::new();
        fixture.photo_storage.fail = true;
        let receipt = fixture
            .submit(new_review("u1", "g1", vec![png_upload()]))
            .unwrap();
        let db = fixture.db_connections.shared().unwrap();
        let review = db.get_detailed_review(receipt.review_id.as_str()).unwrap();
        assert_eq!(
            Some("/placeholder.svg?height=300&width=300&text=Foto+1"),
            review.photo_1_url.as_deref()
        );
        assert!(review.photo_2_url.is_none());
    }
}
