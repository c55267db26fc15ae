//! Menu repository trait (port)

use async_trait::async_trait;
use uuid::Uuid;
use crate::domain::Menu;
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MenuRepository: Send + Sync {
    /// Cheap reachability check for readiness probes.
    async fn ping(&self) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Menu>, DomainError>;

    /// All rows ordered by depth, then sibling order.
    async fn find_all(&self) -> Result<Vec<Menu>, DomainError>;

    /// Direct children of `parent_id` in sibling order; `None` selects roots.
    async fn find_children(&self, parent_id: Option<Uuid>) -> Result<Vec<Menu>, DomainError>;

    async fn count_children(&self, parent_id: Option<Uuid>) -> Result<i64, DomainError>;

    async fn create(&self, menu: &Menu) -> Result<Menu, DomainError>;

    /// Writes every given row in one atomic batch and returns them as stored.
    async fn save_all(&self, menus: &[Menu]) -> Result<Vec<Menu>, DomainError>;

    /// Deletes `ids` and writes the renumbered siblings in one atomic batch.
    /// Returns the number of deleted rows.
    async fn delete_all(&self, ids: &[Uuid], reordered: &[Menu]) -> Result<u64, DomainError>;
}
