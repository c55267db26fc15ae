// ============================================================================
// Menu Infrastructure - In-Memory Menu Repository
// File: crates/menu-infrastructure/src/memory/menu_repo_impl.rs
// ============================================================================
//! Process-local menu table. Each call holds the lock for its whole
//! duration, which gives batch writes the same all-or-nothing behaviour as
//! the PostgreSQL transaction.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use menu_core::domain::Menu;
use menu_core::error::DomainError;
use menu_core::repositories::MenuRepository;

#[derive(Default)]
pub struct InMemoryMenuRepository {
    rows: RwLock<HashMap<Uuid, Menu>>,
}

impl InMemoryMenuRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the table with existing rows, replacing rows with equal ids.
    pub fn with_menus(menus: impl IntoIterator<Item = Menu>) -> Self {
        let repo = Self::new();
        {
            let mut rows = repo.rows.write();
            for menu in menus {
                rows.insert(menu.id, menu);
            }
        }
        repo
    }
}

fn sorted(mut menus: Vec<Menu>, key: impl Fn(&Menu) -> (i32, i32)) -> Vec<Menu> {
    menus.sort_by(|a, b| key(a).cmp(&key(b)).then(a.created_at.cmp(&b.created_at)));
    menus
}

#[async_trait]
impl MenuRepository for InMemoryMenuRepository {
    async fn ping(&self) -> Result<(), DomainError> {
        Ok(())
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Menu>, DomainError> {
        Ok(self.rows.read().get(id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Menu>, DomainError> {
        let menus: Vec<Menu> = self.rows.read().values().cloned().collect();
        Ok(sorted(menus, |m| (m.depth, m.order)))
    }

    async fn find_children(&self, parent_id: Option<Uuid>) -> Result<Vec<Menu>, DomainError> {
        let menus: Vec<Menu> = self
            .rows
            .read()
            .values()
            .filter(|m| m.parent_id == parent_id)
            .cloned()
            .collect();
        Ok(sorted(menus, |m| (m.order, 0)))
    }

    async fn count_children(&self, parent_id: Option<Uuid>) -> Result<i64, DomainError> {
        let count = self.rows.read().values().filter(|m| m.parent_id == parent_id).count();
        Ok(count as i64)
    }

    async fn create(&self, menu: &Menu) -> Result<Menu, DomainError> {
        let mut rows = self.rows.write();

        if rows.contains_key(&menu.id) {
            return Err(DomainError::DatabaseError(format!("duplicate key: menu {} already exists", menu.id)));
        }
        if let Some(parent_id) = menu.parent_id {
            if !rows.contains_key(&parent_id) {
                return Err(DomainError::ParentNotFound(parent_id));
            }
        }

        rows.insert(menu.id, menu.clone());
        info!("Menu created in memory: {}", menu.id);
        Ok(menu.clone())
    }

    async fn save_all(&self, menus: &[Menu]) -> Result<Vec<Menu>, DomainError> {
        let mut rows = self.rows.write();

        if let Some(missing) = menus.iter().find(|m| !rows.contains_key(&m.id)) {
            return Err(DomainError::MenuNotFound(missing.id));
        }

        let saved: Vec<Menu> = menus
            .iter()
            .map(|menu| {
                // created_at is immutable, as with the SQL UPDATE.
                let created_at = rows.get(&menu.id).map(|m| m.created_at).unwrap_or(menu.created_at);
                let mut stored = menu.clone();
                stored.created_at = created_at;
                rows.insert(stored.id, stored.clone());
                stored
            })
            .collect();

        debug!("Saved {} menu row(s) in memory", saved.len());
        Ok(saved)
    }

    async fn delete_all(&self, ids: &[Uuid], reordered: &[Menu]) -> Result<u64, DomainError> {
        let mut rows = self.rows.write();

        let deleted = ids.iter().filter(|id| rows.remove(*id).is_some()).count() as u64;
        for menu in reordered {
            if let Some(row) = rows.get_mut(&menu.id) {
                row.order = menu.order;
                row.updated_at = menu.updated_at;
            }
        }

        info!("Deleted {} menu row(s) in memory, renumbered {}", deleted, reordered.len());
        Ok(deleted)
    }
}
