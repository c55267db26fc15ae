//! # Menu Infrastructure
//! 
//! Repository implementations (adapters): PostgreSQL and in-memory.

pub mod database;
pub mod memory;

pub use database::{build_menu_repository, create_pool, run_migrations, PgMenuRepository};
pub use memory::InMemoryMenuRepository;
