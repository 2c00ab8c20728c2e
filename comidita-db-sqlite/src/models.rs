#![allow(clippy::extra_unused_lifetimes)]

// NOTE:
// All timestamps with the `_at` postfix are stored
// as unix timestamp in **milli**seconds.

use super::schema::*;

#[derive(Queryable, Insertable, AsChangeset)]
#[diesel(table_name = places)]
pub struct PlaceEntity {
    pub id: String,
    pub google_place_id: String,
    pub name: String,
    pub address: String,
    pub lat: f64,
    pub lng: f64,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub category: Option<String>,
    pub price_range: Option<String>,
    pub rating: f64,
    pub total_reviews: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Queryable, Insertable)]
#[diesel(table_name = detailed_reviews)]
pub struct DetailedReviewEntity {
    pub id: String,
    pub user_id: String,
    pub place_id: String,
    pub food_taste: i16,
    pub presentation: i16,
    pub portion_size: i16,
    pub drinks_variety: i16,
    pub veggie_options: i16,
    pub gluten_free_options: i16,
    pub vegan_options: i16,
    pub music_acoustics: i16,
    pub ambiance: i16,
    pub furniture_comfort: i16,
    pub cleanliness: i16,
    pub service: i16,
    pub dish_name: Option<String>,
    pub comment: Option<String>,
    pub photo_1_url: Option<String>,
    pub photo_2_url: Option<String>,
    pub price_range: String,
    pub category: String,
    pub created_at: i64,
}

#[derive(Insertable)]
#[diesel(table_name = users)]
pub struct NewUser<'a> {
    pub id: &'a str,
    pub email: Option<&'a str>,
    pub name: Option<&'a str>,
    pub avatar_url: Option<&'a str>,
    pub points: i64,
}

#[derive(Queryable)]
pub struct UserEntity {
    pub id: String,
    pub email: Option<String>,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
    pub points: i64,
}
