//! # Menu API
//! 
//! HTTP handlers, DTOs, extractors, and routing for the menu hierarchy service.

pub mod handlers;
pub mod dto;
pub mod error;
pub mod extract;
pub mod response;
pub mod routes;
pub mod state;

pub use routes::build_router;
pub use state::AppState;
