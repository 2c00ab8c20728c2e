use super::prelude::*;
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq)]
pub struct UserStats {
    pub total_reviews: u64,
    pub total_points: u64,
    pub places_reviewed: u64,
    pub average_rating: AvgRatingValue,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserProfile {
    pub user: User,
    pub stats: UserStats,
    pub level: UserLevel,
    pub next_level: Option<UserLevel>,
    pub level_progress: u8,
}

/// Creates the user on first contact and returns the stored record.
///
/// Profile details of an already existing user are kept.
pub fn ensure_user<R: UserRepo>(repo: &R, user: User) -> Result<User> {
    if let Some(existing) = repo.try_get_user(user.id.as_str())? {
        return Ok(existing);
    }
    match repo.create_user(&user) {
        Ok(()) | Err(repositories::Error::AlreadyExists) => Ok(repo.get_user(user.id.as_str())?),
        Err(err) => Err(err.into()),
    }
}

pub fn user_profile<R>(repo: &R, user_id: &str) -> Result<UserProfile>
where
    R: UserRepo + DetailedReviewRepo,
{
    let user = repo
        .try_get_user(user_id)?
        .unwrap_or_else(|| User::new(user_id.into()));
    let reviews = repo.detailed_reviews_of_user(user_id)?;
    let mut average_rating = AvgRatingValueBuilder::default();
    for review in &reviews {
        average_rating += review.overall_rating();
    }
    let places_reviewed = reviews
        .iter()
        .map(|r| r.place_id.as_str())
        .collect::<HashSet<_>>()
        .len() as u64;
    let stats = UserStats {
        total_reviews: reviews.len() as u64,
        total_points: user.points,
        places_reviewed,
        average_rating: average_rating.build().rounded(),
    };
    let level = *level_for_points(user.points);
    Ok(UserProfile {
        next_level: next_level(&level).copied(),
        level_progress: level.progress_percentage(user.points),
        level,
        stats,
        user,
    })
}

#[cfg(test)]
mod tests {
    use super::super::tests::MockDb;
    use super::*;
    use comidita_entities::builders::*;

    #[test]
    fn profile_of_active_user() {
        let db = MockDb::default();
        db.users.borrow_mut().push(User {
            points: 1_250,
            ..User::new("u1".into())
        });
        db.reviews.borrow_mut().extend([
            DetailedReview::build().user_id("u1").place_id("a").ratings(8).finish(),
            DetailedReview::build().user_id("u1").place_id("b").ratings(5).finish(),
            DetailedReview::build().user_id("u2").place_id("a").ratings(1).finish(),
        ]);
        let profile = user_profile(&db, "u1").unwrap();
        assert_eq!(2, profile.stats.total_reviews);
        assert_eq!(2, profile.stats.places_reviewed);
        assert_eq!(1_250, profile.stats.total_points);
        assert_eq!(AvgRatingValue::from(6.5), profile.stats.average_rating);
        assert_eq!("Comensal", profile.level.name);
        assert_eq!("Foodie", profile.next_level.unwrap().name);
        assert_eq!(16, profile.level_progress);
    }

    #[test]
    fn profile_of_unknown_user() {
        let db = MockDb::default();
        let profile = user_profile(&db, "new").unwrap();
        assert_eq!(0, profile.stats.total_reviews);
        assert_eq!(AvgRatingValue::default(), profile.stats.average_rating);
        assert_eq!("Nuevo", profile.level.name);
        assert_eq!("#6B7280", profile.level.color);
        assert_eq!(0, profile.level_progress);
    }

    #[test]
    fn ensure_user_keeps_existing_details() {
        let db = MockDb::default();
        let created = ensure_user(
            &db,
            User {
                email: Some("ana@example.com".into()),
                ..User::new("u1".into())
            },
        )
        .unwrap();
        assert_eq!(Some("ana@example.com"), created.email.as_deref());
        let again = ensure_user(&db, User::new("u1".into())).unwrap();
        assert_eq!(created, again);
        assert_eq!(1, db.users.borrow().len());
    }
}
