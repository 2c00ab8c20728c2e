mod photos;
mod places;

pub use self::{photos::*, places::*};
