//! # Menu Core
//! 
//! Domain entities, hierarchy logic, services, and repository traits for the
//! menu hierarchy service.

pub mod domain;
pub mod services;
pub mod repositories;
pub mod error;

// Re-export domain entities
pub use domain::*;
pub use error::DomainError;
