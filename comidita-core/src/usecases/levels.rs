use super::prelude::*;

pub const POINTS_PER_REVIEW: u64 = 100;
pub const FIRST_REVIEW_OF_PLACE_BONUS: u64 = 50;

#[rustfmt::skip]
pub const USER_LEVELS: [UserLevel; 5] = [
    UserLevel { name: "Nuevo",    min_points:      0, max_points: Some(999),  color: "#6B7280", icon: "🥚" },
    UserLevel { name: "Comensal", min_points:  1_000, max_points: Some(2_499), color: "#10B981", icon: "🍽️" },
    UserLevel { name: "Foodie",   min_points:  2_500, max_points: Some(4_999), color: "#3B82F6", icon: "🍕" },
    UserLevel { name: "Gourmet",  min_points:  5_000, max_points: Some(9_999), color: "#8B5CF6", icon: "👨‍🍳" },
    UserLevel { name: "Crítico",  min_points: 10_000, max_points: None,       color: "#F59E0B", icon: "🏆" },
];

pub const fn points_for_review(first_review_of_place: bool) -> u64 {
    if first_review_of_place {
        POINTS_PER_REVIEW + FIRST_REVIEW_OF_PLACE_BONUS
    } else {
        POINTS_PER_REVIEW
    }
}

pub fn level_for_points(points: u64) -> &'static UserLevel {
    USER_LEVELS
        .iter()
        .rev()
        .find(|level| points >= level.min_points)
        .unwrap_or(&USER_LEVELS[0])
}

pub fn next_level(level: &UserLevel) -> Option<&'static UserLevel> {
    USER_LEVELS
        .iter()
        .find(|next| next.min_points > level.min_points)
}
