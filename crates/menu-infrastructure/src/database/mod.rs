//! Database module (PostgreSQL adapters)

pub mod connection;
pub mod postgres;

use std::sync::Arc;

use tracing::info;

use menu_core::repositories::MenuRepository;
use menu_shared::config::{DatabaseSettings, StorageBackend};

use crate::memory::InMemoryMenuRepository;

pub use connection::{create_pool, run_migrations};
pub use postgres::PgMenuRepository;

/// Picks the repository implementation named by `database.backend`.
pub async fn build_menu_repository(settings: &DatabaseSettings) -> anyhow::Result<Arc<dyn MenuRepository>> {
    match settings.backend {
        StorageBackend::Postgres => {
            info!("Connecting to PostgreSQL...");
            let pool = create_pool(settings).await?;
            if settings.run_migrations {
                run_migrations(&pool).await?;
                info!("Database migrations applied.");
            }
            info!("Database connection established.");
            Ok(Arc::new(PgMenuRepository::new(pool)))
        }
        StorageBackend::Memory => {
            info!("Using in-memory menu repository; data is lost on restart.");
            Ok(Arc::new(InMemoryMenuRepository::new()))
        }
    }
}
