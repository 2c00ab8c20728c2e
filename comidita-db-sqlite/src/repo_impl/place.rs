use super::*;

impl<'a> PlaceRepo for DbReadOnly<'a> {
    fn create_place(&self, _place: Place) -> Result<()> {
        unreachable!();
    }
    fn update_place(&self, _place: &Place) -> Result<()> {
        unreachable!();
    }

    fn get_place(&self, id: &str) -> Result<Place> {
        get_place(&mut self.conn.borrow_mut(), id)
    }
    fn try_get_place_by_google_id(&self, google_place_id: &str) -> Result<Option<Place>> {
        try_get_place_by_google_id(&mut self.conn.borrow_mut(), google_place_id)
    }

    fn search_places(&self, text: &str, limit: u64) -> Result<Vec<Place>> {
        search_places(&mut self.conn.borrow_mut(), text, limit)
    }
    fn places_by_category(&self, category: RestaurantCategory) -> Result<Vec<Place>> {
        places_by_category(&mut self.conn.borrow_mut(), category)
    }
    fn count_places_by_category(&self) -> Result<Vec<CategoryCount>> {
        count_places_by_category(&mut self.conn.borrow_mut())
    }
}

impl<'a> PlaceRepo for DbReadWrite<'a> {
    fn create_place(&self, place: Place) -> Result<()> {
        create_place(&mut self.conn.borrow_mut(), place)
    }
    fn update_place(&self, place: &Place) -> Result<()> {
        update_place(&mut self.conn.borrow_mut(), place)
    }

    fn get_place(&self, id: &str) -> Result<Place> {
        get_place(&mut self.conn.borrow_mut(), id)
    }
    fn try_get_place_by_google_id(&self, google_place_id: &str) -> Result<Option<Place>> {
        try_get_place_by_google_id(&mut self.conn.borrow_mut(), google_place_id)
    }

    fn search_places(&self, text: &str, limit: u64) -> Result<Vec<Place>> {
        search_places(&mut self.conn.borrow_mut(), text, limit)
    }
    fn places_by_category(&self, category: RestaurantCategory) -> Result<Vec<Place>> {
        places_by_category(&mut self.conn.borrow_mut(), category)
    }
    fn count_places_by_category(&self) -> Result<Vec<CategoryCount>> {
        count_places_by_category(&mut self.conn.borrow_mut())
    }
}

impl<'a> PlaceRepo for DbConnection<'a> {
    fn create_place(&self, place: Place) -> Result<()> {
        create_place(&mut self.conn.borrow_mut(), place)
    }
    fn update_place(&self, place: &Place) -> Result<()> {
        update_place(&mut self.conn.borrow_mut(), place)
    }

    fn get_place(&self, id: &str) -> Result<Place> {
        get_place(&mut self.conn.borrow_mut(), id)
    }
    fn try_get_place_by_google_id(&self, google_place_id: &str) -> Result<Option<Place>> {
        try_get_place_by_google_id(&mut self.conn.borrow_mut(), google_place_id)
    }

    fn search_places(&self, text: &str, limit: u64) -> Result<Vec<Place>> {
        search_places(&mut self.conn.borrow_mut(), text, limit)
    }
    fn places_by_category(&self, category: RestaurantCategory) -> Result<Vec<Place>> {
        places_by_category(&mut self.conn.borrow_mut(), category)
    }
    fn count_places_by_category(&self) -> Result<Vec<CategoryCount>> {
        count_places_by_category(&mut self.conn.borrow_mut())
    }
}

impl From<&Place> for models::PlaceEntity {
    fn from(from: &Place) -> Self {
        Self {
            id: from.id.to_string(),
            google_place_id: from.google_place_id.clone(),
            name: from.name.clone(),
            address: from.address.clone(),
            lat: from.pos.lat(),
            lng: from.pos.lng(),
            phone: from.phone.clone(),
            website: from.website.clone(),
            category: from.category.map(|c| c.as_ref().to_owned()),
            price_range: from.price_range.map(|p| p.as_ref().to_owned()),
            rating: from.rating.into(),
            total_reviews: from.total_reviews as i64,
            created_at: from.created_at.into_inner(),
            updated_at: from.updated_at.into_inner(),
        }
    }
}

fn load_place(entity: models::PlaceEntity) -> Result<Place> {
    let models::PlaceEntity {
        id,
        google_place_id,
        name,
        address,
        lat,
        lng,
        phone,
        website,
        category,
        price_range,
        rating,
        total_reviews,
        created_at,
        updated_at,
    } = entity;
    let pos = MapPoint::try_from_lat_lng(lat, lng).unwrap_or_else(|err| {
        // This should never happen if positions have been validated on insert
        log::warn!("Invalid position of place {id}: {err}");
        MapPoint::default()
    });
    Ok(Place {
        id: id.into(),
        google_place_id,
        name,
        address,
        pos,
        phone,
        website,
        category: category
            .as_deref()
            .map(|c| parse_column("places.category", c))
            .transpose()?,
        price_range: price_range
            .as_deref()
            .map(|p| parse_column("places.price_range", p))
            .transpose()?,
        rating: rating.into(),
        total_reviews: total_reviews.max(0) as u64,
        created_at: TimestampMs::from_inner(created_at),
        updated_at: TimestampMs::from_inner(updated_at),
    })
}

fn create_place(conn: &mut SqliteConnection, place: Place) -> Result<()> {
    let entity = models::PlaceEntity::from(&place);
    diesel::insert_into(schema::places::table)
        .values(&entity)
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

fn update_place(conn: &mut SqliteConnection, place: &Place) -> Result<()> {
    use schema::places::dsl;
    let entity = models::PlaceEntity::from(place);
    let count = diesel::update(dsl::places.filter(dsl::id.eq(&entity.id)))
        .set(&entity)
        .execute(conn)
        .map_err(from_diesel_err)?;
    if count == 0 {
        return Err(repo::Error::NotFound);
    }
    Ok(())
}

fn get_place(conn: &mut SqliteConnection, id: &str) -> Result<Place> {
    use schema::places::dsl;
    let entity = dsl::places
        .filter(dsl::id.eq(id))
        .first::<models::PlaceEntity>(conn)
        .map_err(from_diesel_err)?;
    load_place(entity)
}

fn try_get_place_by_google_id(
    conn: &mut SqliteConnection,
    google_place_id: &str,
) -> Result<Option<Place>> {
    use schema::places::dsl;
    dsl::places
        .filter(dsl::google_place_id.eq(google_place_id))
        .first::<models::PlaceEntity>(conn)
        .optional()
        .map_err(from_diesel_err)?
        .map(load_place)
        .transpose()
}

fn search_places(conn: &mut SqliteConnection, text: &str, limit: u64) -> Result<Vec<Place>> {
    use schema::places::dsl;
    let pattern = contains_pattern(text);
    dsl::places
        .filter(
            dsl::name
                .like(&pattern)
                .escape('\\')
                .or(dsl::address.like(&pattern).escape('\\')),
        )
        .order_by((dsl::rating.desc(), dsl::name))
        .limit(limit as i64)
        .load::<models::PlaceEntity>(conn)
        .map_err(from_diesel_err)?
        .into_iter()
        .map(load_place)
        .collect()
}

fn places_by_category(
    conn: &mut SqliteConnection,
    category: RestaurantCategory,
) -> Result<Vec<Place>> {
    use schema::places::dsl;
    dsl::places
        .filter(dsl::category.eq(category.as_ref()))
        .order_by((dsl::rating.desc(), dsl::name))
        .load::<models::PlaceEntity>(conn)
        .map_err(from_diesel_err)?
        .into_iter()
        .map(load_place)
        .collect()
}

fn count_places_by_category(conn: &mut SqliteConnection) -> Result<Vec<CategoryCount>> {
    use schema::places::dsl;
    let rows = dsl::places
        .filter(dsl::category.is_not_null())
        .group_by(dsl::category)
        .select((dsl::category, diesel::dsl::count_star()))
        .load::<(Option<String>, i64)>(conn)
        .map_err(from_diesel_err)?;
    let mut counts = Vec::with_capacity(rows.len());
    for (category, count) in rows {
        let Some(category) = category else {
            continue;
        };
        match category.parse() {
            Ok(category) => counts.push(CategoryCount {
                category,
                count: count as u64,
            }),
            Err(_) => log::warn!("Ignoring places with unknown category '{category}'"),
        }
    }
    Ok(counts)
}
