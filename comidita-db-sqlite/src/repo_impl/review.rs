use super::*;

impl<'a> DetailedReviewRepo for DbReadOnly<'a> {
    fn create_detailed_review(&self, _review: DetailedReview) -> Result<()> {
        unreachable!();
    }

    fn get_detailed_review(&self, id: &str) -> Result<DetailedReview> {
        get_detailed_review(&mut self.conn.borrow_mut(), id)
    }
    fn try_get_detailed_review_of_user_for_place(
        &self,
        user_id: &str,
        place_id: &str,
    ) -> Result<Option<DetailedReview>> {
        try_get_detailed_review_of_user_for_place(&mut self.conn.borrow_mut(), user_id, place_id)
    }
    fn detailed_reviews_of_place(&self, place_id: &str) -> Result<Vec<DetailedReview>> {
        detailed_reviews_of_place(&mut self.conn.borrow_mut(), place_id)
    }
    fn detailed_reviews_of_user(&self, user_id: &str) -> Result<Vec<DetailedReview>> {
        detailed_reviews_of_user(&mut self.conn.borrow_mut(), user_id)
    }
    fn recent_detailed_reviews_with_dish(&self, limit: u64) -> Result<Vec<DetailedReview>> {
        recent_detailed_reviews_with_dish(&mut self.conn.borrow_mut(), limit)
    }
}

impl<'a> DetailedReviewRepo for DbReadWrite<'a> {
    fn create_detailed_review(&self, review: DetailedReview) -> Result<()> {
        create_detailed_review(&mut self.conn.borrow_mut(), review)
    }

    fn get_detailed_review(&self, id: &str) -> Result<DetailedReview> {
        get_detailed_review(&mut self.conn.borrow_mut(), id)
    }
    fn try_get_detailed_review_of_user_for_place(
        &self,
        user_id: &str,
        place_id: &str,
    ) -> Result<Option<DetailedReview>> {
        try_get_detailed_review_of_user_for_place(&mut self.conn.borrow_mut(), user_id, place_id)
    }
    fn detailed_reviews_of_place(&self, place_id: &str) -> Result<Vec<DetailedReview>> {
        detailed_reviews_of_place(&mut self.conn.borrow_mut(), place_id)
    }
    fn detailed_reviews_of_user(&self, user_id: &str) -> Result<Vec<DetailedReview>> {
        detailed_reviews_of_user(&mut self.conn.borrow_mut(), user_id)
    }
    fn recent_detailed_reviews_with_dish(&self, limit: u64) -> Result<Vec<DetailedReview>> {
        recent_detailed_reviews_with_dish(&mut self.conn.borrow_mut(), limit)
    }
}

impl<'a> DetailedReviewRepo for DbConnection<'a> {
    fn create_detailed_review(&self, review: DetailedReview) -> Result<()> {
        create_detailed_review(&mut self.conn.borrow_mut(), review)
    }

    fn get_detailed_review(&self, id: &str) -> Result<DetailedReview> {
        get_detailed_review(&mut self.conn.borrow_mut(), id)
    }
    fn try_get_detailed_review_of_user_for_place(
        &self,
        user_id: &str,
        place_id: &str,
    ) -> Result<Option<DetailedReview>> {
        try_get_detailed_review_of_user_for_place(&mut self.conn.borrow_mut(), user_id, place_id)
    }
    fn detailed_reviews_of_place(&self, place_id: &str) -> Result<Vec<DetailedReview>> {
        detailed_reviews_of_place(&mut self.conn.borrow_mut(), place_id)
    }
    fn detailed_reviews_of_user(&self, user_id: &str) -> Result<Vec<DetailedReview>> {
        detailed_reviews_of_user(&mut self.conn.borrow_mut(), user_id)
    }
    fn recent_detailed_reviews_with_dish(&self, limit: u64) -> Result<Vec<DetailedReview>> {
        recent_detailed_reviews_with_dish(&mut self.conn.borrow_mut(), limit)
    }
}

impl From<DetailedReview> for models::DetailedReviewEntity {
    fn from(from: DetailedReview) -> Self {
        let DetailedReview {
            id,
            user_id,
            place_id,
            ratings,
            dish_name,
            comment,
            photo_1_url,
            photo_2_url,
            price_range,
            category,
            created_at,
        } = from;
        Self {
            id: id.into(),
            user_id: user_id.into(),
            place_id: place_id.into(),
            food_taste: ratings.food_taste.into(),
            presentation: ratings.presentation.into(),
            portion_size: ratings.portion_size.into(),
            drinks_variety: ratings.drinks_variety.into(),
            veggie_options: ratings.veggie_options.into(),
            gluten_free_options: ratings.gluten_free_options.into(),
            vegan_options: ratings.vegan_options.into(),
            music_acoustics: ratings.music_acoustics.into(),
            ambiance: ratings.ambiance.into(),
            furniture_comfort: ratings.furniture_comfort.into(),
            cleanliness: ratings.cleanliness.into(),
            service: ratings.service.into(),
            dish_name,
            comment,
            photo_1_url,
            photo_2_url,
            price_range: price_range.as_ref().to_owned(),
            category: category.as_ref().to_owned(),
            created_at: created_at.into_inner(),
        }
    }
}

fn load_detailed_review(entity: models::DetailedReviewEntity) -> Result<DetailedReview> {
    use RatingAspect::*;
    let ratings = AspectRatings::try_from_fn(|aspect| match aspect {
        FoodTaste => entity.food_taste,
        Presentation => entity.presentation,
        PortionSize => entity.portion_size,
        DrinksVariety => entity.drinks_variety,
        VeggieOptions => entity.veggie_options,
        GlutenFreeOptions => entity.gluten_free_options,
        VeganOptions => entity.vegan_options,
        MusicAcoustics => entity.music_acoustics,
        Ambiance => entity.ambiance,
        FurnitureComfort => entity.furniture_comfort,
        Cleanliness => entity.cleanliness,
        Service => entity.service,
    })
    .map_err(|(aspect, err)| {
        anyhow!(
            "Invalid {} rating of review {}: {err}",
            aspect.as_ref(),
            entity.id
        )
    })?;
    let price_range = parse_column("detailed_reviews.price_range", &entity.price_range)?;
    let category = parse_column("detailed_reviews.category", &entity.category)?;
    Ok(DetailedReview {
        id: entity.id.into(),
        user_id: entity.user_id.into(),
        place_id: entity.place_id.into(),
        ratings,
        dish_name: entity.dish_name,
        comment: entity.comment,
        photo_1_url: entity.photo_1_url,
        photo_2_url: entity.photo_2_url,
        price_range,
        category,
        created_at: TimestampMs::from_inner(entity.created_at),
    })
}

fn load_detailed_reviews(entities: Vec<models::DetailedReviewEntity>) -> Result<Vec<DetailedReview>> {
    entities.into_iter().map(load_detailed_review).collect()
}

fn create_detailed_review(conn: &mut SqliteConnection, review: DetailedReview) -> Result<()> {
    let entity = models::DetailedReviewEntity::from(review);
    diesel::insert_into(schema::detailed_reviews::table)
        .values(&entity)
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

fn get_detailed_review(conn: &mut SqliteConnection, id: &str) -> Result<DetailedReview> {
    use schema::detailed_reviews::dsl;
    let entity = dsl::detailed_reviews
        .filter(dsl::id.eq(id))
        .first::<models::DetailedReviewEntity>(conn)
        .map_err(from_diesel_err)?;
    load_detailed_review(entity)
}

fn try_get_detailed_review_of_user_for_place(
    conn: &mut SqliteConnection,
    user_id: &str,
    place_id: &str,
) -> Result<Option<DetailedReview>> {
    use schema::detailed_reviews::dsl;
    dsl::detailed_reviews
        .filter(dsl::user_id.eq(user_id))
        .filter(dsl::place_id.eq(place_id))
        .first::<models::DetailedReviewEntity>(conn)
        .optional()
        .map_err(from_diesel_err)?
        .map(load_detailed_review)
        .transpose()
}

fn detailed_reviews_of_place(
    conn: &mut SqliteConnection,
    place_id: &str,
) -> Result<Vec<DetailedReview>> {
    use schema::detailed_reviews::dsl;
    let entities = dsl::detailed_reviews
        .filter(dsl::place_id.eq(place_id))
        .order_by(dsl::created_at.desc())
        .load::<models::DetailedReviewEntity>(conn)
        .map_err(from_diesel_err)?;
    load_detailed_reviews(entities)
}

fn detailed_reviews_of_user(
    conn: &mut SqliteConnection,
    user_id: &str,
) -> Result<Vec<DetailedReview>> {
    use schema::detailed_reviews::dsl;
    let entities = dsl::detailed_reviews
        .filter(dsl::user_id.eq(user_id))
        .order_by(dsl::created_at.desc())
        .load::<models::DetailedReviewEntity>(conn)
        .map_err(from_diesel_err)?;
    load_detailed_reviews(entities)
}

fn recent_detailed_reviews_with_dish(
    conn: &mut SqliteConnection,
    limit: u64,
) -> Result<Vec<DetailedReview>> {
    use schema::detailed_reviews::dsl;
    let entities = dsl::detailed_reviews
        .filter(dsl::dish_name.is_not_null())
        .filter(dsl::dish_name.ne(""))
        .order_by(dsl::created_at.desc())
        .limit(limit as i64)
        .load::<models::DetailedReviewEntity>(conn)
        .map_err(from_diesel_err)?;
    load_detailed_reviews(entities)
}
