use super::*;
use rocket::{response::status::Created, tokio::task::spawn_blocking};

#[post("/reviews", data = "<body>")]
pub async fn post_review(
    db: Db,
    auth: Auth,
    cfg: &State<Cfg>,
    photo_storage: &State<PhotoStorage>,
    body: JsonResult<'_, json::NewDetailedReview>,
) -> result::Result<Created<Json<json::ReviewCreated>>, ApiError> {
    // Anonymous requests are rejected before the body is inspected
    let account = auth.account()?.clone();
    let new_review = from_json::try_new_detailed_review(
        Some(account.id.clone()),
        body?.into_inner(),
        cfg.default_location,
    )?;
    let storage = Arc::clone(&photo_storage.0);
    let compression = cfg.compression.clone();
    let receipt = spawn_blocking(move || -> result::Result<_, AppError> {
        flows::ensure_user(&db, account.into())?;
        flows::submit_detailed_review(&db, &*storage, new_review, &compression)
    })
    .await
    .map_err(anyhow::Error::from)??;
    let location = format!("/api/reviews/{}", receipt.review_id);
    Ok(Created::new(location).body(Json(to_json::review_created(receipt))))
}

#[get("/reviews/<id>")]
pub fn get_review(db: Db, id: &str) -> Result<json::DetailedReview> {
    let review = usecases::load_review(&db.shared()?, id)?;
    Ok(Json(review.into()))
}

#[get("/recommendations")]
pub fn get_recommendations(db: Db) -> Result<Vec<json::Recommendation>> {
    let recommendations = usecases::recommendations(&db.shared()?)?;
    Ok(Json(
        recommendations
            .into_iter()
            .map(to_json::recommendation)
            .collect(),
    ))
}
