//! # comidita-core
//!
//! Business logic of the Comidita review service.
//! Storage and external services are only accessed through the
//! traits in [`repositories`] and [`gateways`].

pub mod gateways;
pub mod repositories;
pub mod usecases;
pub mod util;

pub mod entities {
    pub use comidita_entities::{
        category::*, geo::*, id::*, photo::*, place::*, price::*, rating::*, review::*, time::*,
        user::*,
    };
}
