table! {
    places (id) {
        id -> Text,
        google_place_id -> Text,
        name -> Text,
        address -> Text,
        lat -> Double,
        lng -> Double,
        phone -> Nullable<Text>,
        website -> Nullable<Text>,
        category -> Nullable<Text>,
        price_range -> Nullable<Text>,
        rating -> Double,
        total_reviews -> BigInt,
        created_at -> BigInt,
        updated_at -> BigInt,
    }
}

table! {
    detailed_reviews (id) {
        id -> Text,
        user_id -> Text,
        place_id -> Text,
        food_taste -> SmallInt,
        presentation -> SmallInt,
        portion_size -> SmallInt,
        drinks_variety -> SmallInt,
        veggie_options -> SmallInt,
        gluten_free_options -> SmallInt,
        vegan_options -> SmallInt,
        music_acoustics -> SmallInt,
        ambiance -> SmallInt,
        furniture_comfort -> SmallInt,
        cleanliness -> SmallInt,
        service -> SmallInt,
        dish_name -> Nullable<Text>,
        comment -> Nullable<Text>,
        photo_1_url -> Nullable<Text>,
        photo_2_url -> Nullable<Text>,
        price_range -> Text,
        category -> Text,
        created_at -> BigInt,
    }
}

joinable!(detailed_reviews -> places (place_id));

table! {
    users (id) {
        id -> Text,
        email -> Nullable<Text>,
        name -> Nullable<Text>,
        avatar_url -> Nullable<Text>,
        points -> BigInt,
    }
}

allow_tables_to_appear_in_same_query!(places, detailed_reviews, users);
