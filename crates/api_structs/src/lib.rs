mod location;
mod reminder;
mod status;

pub mod dtos {
    pub use crate::location::dtos::*;
    pub use crate::reminder::dtos::*;
}

pub use crate::location::api::*;
pub use crate::reminder::api::*;
pub use crate::status::api::*;
