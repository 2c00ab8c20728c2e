pub use comidita_core::{entities, gateways, repositories, usecases, util};

pub mod prelude {
    pub use super::{entities::*, repositories::*};
}
