mod reminder;
mod status;
mod webhook;
mod whatsapp;

pub mod dtos {
    pub use crate::whatsapp::dtos::*;
}

pub use crate::reminder::api::*;
pub use crate::status::api::*;
pub use crate::webhook::api::*;
pub use crate::whatsapp::api::*;
