//! Request and response DTOs

pub mod menu_dto;

pub use menu_dto::*;
