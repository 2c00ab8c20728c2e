use super::*;
use rocket::tokio::task::spawn_blocking;

/// Profile of the signed in user, who is registered on first contact.
#[get("/users/me")]
pub async fn get_current_user(db: Db, auth: Auth) -> Result<json::UserProfile> {
    let user = User::from(auth.account()?.clone());
    let profile = spawn_blocking(move || flows::load_user_profile(&db, user))
        .await
        .map_err(anyhow::Error::from)??;
    Ok(Json(to_json::user_profile(profile)))
}
