mod error;
mod levels;
mod load_places;
mod load_reviews;
mod materialize_photos;
mod recommendations;
mod search_places;
mod submit_detailed_review;
mod user_profile;

#[cfg(test)]
pub mod tests;

pub use self::{
    error::Error, levels::*, load_places::*, load_reviews::*, materialize_photos::*,
    recommendations::*, search_places::*, submit_detailed_review::*, user_profile::*,
};

mod prelude {
    pub use super::error::Error;
    pub type Result<T> = std::result::Result<T, Error>;
    pub use super::levels::*;
    pub use crate::{entities::*, repositories::{self, *}};
}
