use super::prelude::*;

use std::{cell::RefCell, result};

type RepoResult<T> = result::Result<T, repositories::Error>;

trait Key {
    fn key(&self) -> &str;
}

impl Key for Place {
    fn key(&self) -> &str {
        self.id.as_str()
    }
}

impl Key for DetailedReview {
    fn key(&self) -> &str {
        self.id.as_str()
    }
}

impl Key for User {
    fn key(&self) -> &str {
        self.id.as_str()
    }
}

fn get<T: Clone + Key>(objects: &[T], id: &str) -> RepoResult<T> {
    match objects.iter().find(|x| x.key() == id) {
        Some(x) => Ok(x.clone()),
        None => Err(repositories::Error::NotFound),
    }
}

fn create<T: Clone + Key>(objects: &mut Vec<T>, e: T) -> RepoResult<()> {
    if objects.iter().any(|x| x.key() == e.key()) {
        return Err(repositories::Error::AlreadyExists);
    }
    objects.push(e);
    Ok(())
}

fn update<T: Clone + Key>(objects: &mut [T], e: &T) -> RepoResult<()> {
    let pos = objects
        .iter()
        .position(|x| x.key() == e.key())
        .ok_or(repositories::Error::NotFound)?;
    objects[pos] = e.clone();
    Ok(())
}

fn newest_first(mut reviews: Vec<DetailedReview>) -> Vec<DetailedReview> {
    reviews.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    reviews
}

fn best_rated_first(mut places: Vec<Place>) -> Vec<Place> {
    places.sort_by(|a, b| {
        f64::from(b.rating)
            .partial_cmp(&f64::from(a.rating))
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    places
}

#[derive(Default)]
pub struct MockDb {
    pub places: RefCell<Vec<Place>>,
    pub reviews: RefCell<Vec<DetailedReview>>,
    pub users: RefCell<Vec<User>>,
}

impl PlaceRepo for MockDb {
    fn create_place(&self, place: Place) -> RepoResult<()> {
        if self
            .places
            .borrow()
            .iter()
            .any(|p| p.google_place_id == place.google_place_id)
        {
            return Err(repositories::Error::AlreadyExists);
        }
        create(&mut self.places.borrow_mut(), place)
    }

    fn update_place(&self, place: &Place) -> RepoResult<()> {
        update(&mut self.places.borrow_mut(), place)
    }

    fn get_place(&self, id: &str) -> RepoResult<Place> {
        get(&self.places.borrow(), id)
    }

    fn try_get_place_by_google_id(&self, google_place_id: &str) -> RepoResult<Option<Place>> {
        Ok(self
            .places
            .borrow()
            .iter()
            .find(|p| p.google_place_id == google_place_id)
            .cloned())
    }

    fn search_places(&self, text: &str, limit: u64) -> RepoResult<Vec<Place>> {
        let text = text.to_lowercase();
        let places = self
            .places
            .borrow()
            .iter()
            .filter(|p| {
                p.name.to_lowercase().contains(&text) || p.address.to_lowercase().contains(&text)
            })
            .cloned()
            .collect();
        Ok(best_rated_first(places)
            .into_iter()
            .take(limit as usize)
            .collect())
    }

    fn places_by_category(&self, category: RestaurantCategory) -> RepoResult<Vec<Place>> {
        let places = self
            .places
            .borrow()
            .iter()
            .filter(|p| p.category == Some(category))
            .cloned()
            .collect();
        Ok(best_rated_first(places))
    }

    fn count_places_by_category(&self) -> RepoResult<Vec<CategoryCount>> {
        let mut counts: Vec<CategoryCount> = vec![];
        for category in self.places.borrow().iter().filter_map(|p| p.category) {
            match counts.iter_mut().find(|c| c.category == category) {
                Some(c) => c.count += 1,
                None => counts.push(CategoryCount { category, count: 1 }),
            }
        }
        Ok(counts)
    }
}

impl DetailedReviewRepo for MockDb {
    fn create_detailed_review(&self, review: DetailedReview) -> RepoResult<()> {
        if self
            .reviews
            .borrow()
            .iter()
            .any(|r| r.user_id == review.user_id && r.place_id == review.place_id)
        {
            return Err(repositories::Error::AlreadyExists);
        }
        create(&mut self.reviews.borrow_mut(), review)
    }

    fn get_detailed_review(&self, id: &str) -> RepoResult<DetailedReview> {
        get(&self.reviews.borrow(), id)
    }

    fn try_get_detailed_review_of_user_for_place(
        &self,
        user_id: &str,
        place_id: &str,
    ) -> RepoResult<Option<DetailedReview>> {
        Ok(self
            .reviews
            .borrow()
            .iter()
            .find(|r| r.user_id.as_str() == user_id && r.place_id.as_str() == place_id)
            .cloned())
    }

    fn detailed_reviews_of_place(&self, place_id: &str) -> RepoResult<Vec<DetailedReview>> {
        Ok(newest_first(
            self.reviews
                .borrow()
                .iter()
                .filter(|r| r.place_id.as_str() == place_id)
                .cloned()
                .collect(),
        ))
    }

    fn detailed_reviews_of_user(&self, user_id: &str) -> RepoResult<Vec<DetailedReview>> {
        Ok(newest_first(
            self.reviews
                .borrow()
                .iter()
                .filter(|r| r.user_id.as_str() == user_id)
                .cloned()
                .collect(),
        ))
    }

    fn recent_detailed_reviews_with_dish(&self, limit: u64) -> RepoResult<Vec<DetailedReview>> {
        Ok(newest_first(
            self.reviews
                .borrow()
                .iter()
                .filter(|r| r.has_dish_name())
                .cloned()
                .collect(),
        )
        .into_iter()
        .take(limit as usize)
        .collect())
    }
}

impl UserRepo for MockDb {
    fn create_user(&self, user: &User) -> RepoResult<()> {
        create(&mut self.users.borrow_mut(), user.clone())
    }

    fn try_get_user(&self, id: &str) -> RepoResult<Option<User>> {
        Ok(self.users.borrow().iter().find(|u| u.key() == id).cloned())
    }

    fn add_points(&self, id: &str, points: u64) -> RepoResult<()> {
        let mut users = self.users.borrow_mut();
        let user = users
            .iter_mut()
            .find(|u| u.key() == id)
            .ok_or(repositories::Error::NotFound)?;
        user.points += points;
        Ok(())
    }
}
