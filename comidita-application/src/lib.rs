#[macro_use]
extern crate log;

mod ensure_user;
mod submit_detailed_review;

pub mod prelude {
    pub use super::{ensure_user::*, submit_detailed_review::*};
}

pub mod error;

pub type Result<T> = std::result::Result<T, error::AppError>;

pub(crate) use comidita_core::{entities::*, usecases};

#[cfg(test)]
pub(crate) mod tests;

pub(crate) mod sqlite {
    pub use comidita_db_sqlite::Connections;
}
