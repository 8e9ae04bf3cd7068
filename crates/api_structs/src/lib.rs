mod reminder;
mod status;
mod summary;

pub mod dtos {
    pub use crate::reminder::dtos::*;
}

pub use crate::reminder::api::*;
pub use crate::status::api::*;
pub use crate::summary::api::*;
