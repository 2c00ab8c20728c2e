use crate::id::*;

#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id         : Id,
    pub email      : Option<String>,
    pub name       : Option<String>,
    pub avatar_url : Option<String>,
    pub points     : u64,
}

impl User {
    pub fn new(id: Id) -> Self {
        Self {
            id,
            email: None,
            name: None,
            avatar_url: None,
            points: 0,
        }
    }
}

/// A named range of points.
#[rustfmt::skip]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserLevel {
    pub name       : &'static str,
    pub min_points : u64,
    pub max_points : Option<u64>,
    pub color      : &'static str,
    pub icon       : &'static str,
}

impl UserLevel {
    pub fn contains(&self, points: u64) -> bool {
        points >= self.min_points && self.max_points.map(|max| points <= max).unwrap_or(true)
    }

    /// Progress towards the next level in percent (`0..=100`).
    pub fn progress_percentage(&self, points: u64) -> u8 {
        let Some(max) = self.max_points else {
            return 100;
        };
        let span = (max + 1).saturating_sub(self.min_points);
        if span == 0 {
            return 100;
        }
        let done = points.saturating_sub(self.min_points).min(span);
        ((done * 100) / span) as u8
    }
}
