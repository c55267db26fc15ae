// ============================================================================
// Menu Core - Menu Service
// File: crates/menu-core/src/services/menu_service.rs
// ============================================================================
//! Menu hierarchy service: create, lookup, reorder, move and delete
//!
//! Every rule is checked before the first write, and every mutation reaches
//! the repository as a single atomic call.

use std::sync::Arc;
use uuid::Uuid;
use tracing::{info, warn};

use menu_shared::constants::{FIRST_ORDER, ROOT_DEPTH};

use crate::domain::{build_hierarchy, collect_descendant_ids, find_root, Menu, MenuNode, RootMenu};
use crate::error::DomainError;
use crate::repositories::MenuRepository;

/// Menu service over any repository implementation
pub struct MenuService<R: MenuRepository + ?Sized> {
    menu_repo: Arc<R>,
}

impl<R: MenuRepository + ?Sized> Clone for MenuService<R> {
    fn clone(&self) -> Self {
        Self { menu_repo: self.menu_repo.clone() }
    }
}

impl<R: MenuRepository + ?Sized> MenuService<R> {
    pub fn new(menu_repo: Arc<R>) -> Self {
        Self { menu_repo }
    }

    /// Create a menu at the end of its sibling group
    pub async fn create(&self, input: CreateMenuInput) -> Result<Menu, DomainError> {
        info!("Creating menu '{}' under parent {:?}", input.name, input.parent_id);

        let depth = match input.parent_id {
            Some(parent_id) => {
                let parent = self.require_parent(&parent_id).await?;
                check_child_depth(&parent, input.depth)?
            }
            None => check_root_depth(input.depth)?,
        };

        let expected_order = self.sibling_count(input.parent_id).await? + 1;
        if let Some(order) = input.order {
            if order != expected_order {
                warn!("Create rejected: order {} but expected {}", order, expected_order);
                return Err(DomainError::InvalidOrder { expected: expected_order, received: order });
            }
        }

        let menu = Menu::new(input.name, input.parent_id, depth, expected_order)?;
        let created = self.menu_repo.create(&menu).await?;

        info!("Menu created: {} (depth {}, order {})", created.id, created.depth, created.order);
        Ok(created)
    }

    /// All menus, flat
    pub async fn list(&self) -> Result<Vec<Menu>, DomainError> {
        self.menu_repo.find_all().await
    }

    /// One menu together with its topmost ancestor
    pub async fn find_one(&self, id: &Uuid) -> Result<MenuDetail, DomainError> {
        let menus = self.menu_repo.find_all().await?;
        let menu = menus
            .iter()
            .find(|m| m.id == *id)
            .cloned()
            .ok_or(DomainError::MenuNotFound(*id))?;

        let root = if menu.is_root() {
            &menu
        } else {
            find_root(&menus, id).unwrap_or(&menu)
        };
        Ok(MenuDetail {
            root_menu: RootMenu::from(root),
            menu,
        })
    }

    /// The whole forest, children in sibling order
    pub async fn hierarchy(&self) -> Result<Vec<MenuNode>, DomainError> {
        let menus = self.menu_repo.find_all().await?;
        Ok(build_hierarchy(&menus))
    }

    /// Replace the given fields of a menu.
    ///
    /// Moving to another parent appends the menu to the new group unless an
    /// explicit order is given; the old group is renumbered. Reordering inside
    /// the same group shifts the siblings in between by one.
    pub async fn update(&self, id: &Uuid, input: UpdateMenuInput) -> Result<Menu, DomainError> {
        info!("Updating menu {}: {:?}", id, input);

        let original = self.require_menu(id).await?;
        let mut menu = original.clone();

        if let Some(name) = &input.name {
            menu.rename(name)?;
        }

        let new_parent_id = input.parent_id.unwrap_or(original.parent_id);
        if new_parent_id == Some(*id) {
            warn!("Update rejected: menu {} cannot be its own parent", id);
            return Err(DomainError::InvalidParent(*id));
        }

        let depth = match new_parent_id {
            Some(parent_id) => {
                let parent = self.require_parent(&parent_id).await?;
                check_child_depth(&parent, input.depth)?
            }
            None => check_root_depth(input.depth)?,
        };

        if depth != original.depth && self.menu_repo.count_children(Some(*id)).await? > 0 {
            warn!("Update rejected: menu {} has children, depth change {} -> {}", id, original.depth, depth);
            return Err(DomainError::DepthChangeWithChildren(*id));
        }

        menu.parent_id = new_parent_id;
        menu.depth = depth;

        let mut changed: Vec<Menu> = Vec::new();
        if new_parent_id == original.parent_id {
            if let Some(order) = input.order.filter(|o| *o != original.order) {
                let siblings = self.menu_repo.find_children(new_parent_id).await?;
                check_order_range(order, count_as_order(siblings.len())?)?;
                changed.extend(shift_within(&siblings, id, original.order, order));
                menu.order = order;
            }
        } else {
            let new_siblings = self.menu_repo.find_children(new_parent_id).await?;
            let max_order = count_as_order(new_siblings.len())? + 1;
            let order = input.order.unwrap_or(max_order);
            check_order_range(order, max_order)?;

            let old_siblings = self.menu_repo.find_children(original.parent_id).await?;
            changed.extend(close_gap(&old_siblings, id, original.order));
            changed.extend(open_gap(&new_siblings, order));
            menu.order = order;
        }

        menu.touch();
        changed.push(menu);

        let saved = self.menu_repo.save_all(&changed).await?;
        let updated = saved
            .into_iter()
            .find(|m| m.id == *id)
            .ok_or_else(|| DomainError::InternalError(format!("Updated menu {} missing from batch result", id)))?;

        info!("Menu {} updated ({} row(s) written)", id, changed.len());
        Ok(updated)
    }

    /// Delete a leaf menu
    pub async fn remove(&self, id: &Uuid) -> Result<DeleteResult, DomainError> {
        info!("Deleting menu {}", id);

        let menu = self.require_menu(id).await?;

        if self.menu_repo.count_children(Some(*id)).await? > 0 {
            warn!("Delete rejected: menu {} has children", id);
            return Err(DomainError::MenuHasChildren(*id));
        }

        let siblings = self.menu_repo.find_children(menu.parent_id).await?;
        let reordered = close_gap(&siblings, id, menu.order);
        self.menu_repo.delete_all(&[*id], &reordered).await?;

        info!("Menu {} deleted", id);
        Ok(DeleteResult {
            deleted_ids: vec![*id],
            cascade: false,
        })
    }

    /// Delete a menu and its whole subtree.
    ///
    /// The full descendant scan completes before anything is deleted.
    pub async fn remove_with_children(&self, id: &Uuid) -> Result<DeleteResult, DomainError> {
        info!("Deleting menu {} with children", id);

        let menu = self.require_menu(id).await?;
        let menus = self.menu_repo.find_all().await?;

        let mut deleted_ids = vec![*id];
        deleted_ids.extend(collect_descendant_ids(&menus, id));

        let mut siblings: Vec<Menu> = menus
            .into_iter()
            .filter(|m| m.parent_id == menu.parent_id)
            .collect();
        siblings.sort_by_key(|m| m.order);
        let reordered = close_gap(&siblings, id, menu.order);

        let deleted = self.menu_repo.delete_all(&deleted_ids, &reordered).await?;

        info!("Menu {} and {} descendant(s) deleted", id, deleted.saturating_sub(1));
        Ok(DeleteResult {
            deleted_ids,
            cascade: true,
        })
    }

    /// Repository reachability, for readiness probes
    pub async fn health(&self) -> Result<(), DomainError> {
        self.menu_repo.ping().await
    }

    async fn require_menu(&self, id: &Uuid) -> Result<Menu, DomainError> {
        self.menu_repo.find_by_id(id).await?.ok_or_else(|| {
            warn!("Menu not found: {}", id);
            DomainError::MenuNotFound(*id)
        })
    }

    async fn require_parent(&self, parent_id: &Uuid) -> Result<Menu, DomainError> {
        self.menu_repo.find_by_id(parent_id).await?.ok_or_else(|| {
            warn!("Parent menu not found: {}", parent_id);
            DomainError::ParentNotFound(*parent_id)
        })
    }

    async fn sibling_count(&self, parent_id: Option<Uuid>) -> Result<i32, DomainError> {
        let count = self.menu_repo.count_children(parent_id).await?;
        i32::try_from(count).map_err(|_| DomainError::InternalError(format!("Sibling count overflow: {}", count)))
    }
}

/// Fields accepted when creating a menu
#[derive(Debug, Clone, Default)]
pub struct CreateMenuInput {
    pub name: String,
    pub parent_id: Option<Uuid>,
    /// Derived from the parent when omitted.
    pub depth: Option<i32>,
    /// Must equal the sibling count + 1 when given.
    pub order: Option<i32>,
}

/// Fields accepted when updating a menu. `None` keeps the current value.
#[derive(Debug, Clone, Default)]
pub struct UpdateMenuInput {
    pub name: Option<String>,
    /// `Some(None)` turns the menu into a root.
    pub parent_id: Option<Option<Uuid>>,
    pub depth: Option<i32>,
    pub order: Option<i32>,
}

/// Result of a single-menu lookup
#[derive(Debug, Clone)]
pub struct MenuDetail {
    pub menu: Menu,
    pub root_menu: RootMenu,
}

/// Result of a delete
#[derive(Debug, Clone)]
pub struct DeleteResult {
    pub deleted_ids: Vec<Uuid>,
    pub cascade: bool,
}

fn check_child_depth(parent: &Menu, requested: Option<i32>) -> Result<i32, DomainError> {
    let depth = requested.unwrap_or(parent.depth + 1);
    if parent.depth != depth - 1 {
        warn!("Depth rejected: requested {} under parent at depth {}", depth, parent.depth);
        return Err(DomainError::InvalidDepth {
            expected_parent_depth: depth - 1,
            found: parent.depth,
        });
    }
    Ok(depth)
}

fn check_root_depth(requested: Option<i32>) -> Result<i32, DomainError> {
    match requested {
        Some(depth) if depth != ROOT_DEPTH => Err(DomainError::InvalidRootDepth(depth)),
        _ => Ok(ROOT_DEPTH),
    }
}

fn check_order_range(order: i32, max: i32) -> Result<(), DomainError> {
    if order < FIRST_ORDER || order > max {
        warn!("Order rejected: {} outside 1..={}", order, max);
        return Err(DomainError::OrderOutOfRange { max, received: order });
    }
    Ok(())
}

fn count_as_order(len: usize) -> Result<i32, DomainError> {
    i32::try_from(len).map_err(|_| DomainError::InternalError(format!("Sibling count overflow: {}", len)))
}

/// Siblings after `removed_order` move up one position.
fn close_gap(siblings: &[Menu], removed_id: &Uuid, removed_order: i32) -> Vec<Menu> {
    renumber(siblings, |m| {
        (m.id != *removed_id && m.order > removed_order).then(|| m.order - 1)
    })
}

/// Siblings at or after `at` move down one position.
fn open_gap(siblings: &[Menu], at: i32) -> Vec<Menu> {
    renumber(siblings, |m| (m.order >= at).then(|| m.order + 1))
}

/// Siblings between `from` and `to` make room for `id` at `to`.
fn shift_within(siblings: &[Menu], id: &Uuid, from: i32, to: i32) -> Vec<Menu> {
    renumber(siblings, |m| {
        if m.id == *id {
            None
        } else if to < from && (to..from).contains(&m.order) {
            Some(m.order + 1)
        } else if to > from && (from + 1..=to).contains(&m.order) {
            Some(m.order - 1)
        } else {
            None
        }
    })
}

fn renumber(siblings: &[Menu], new_order: impl Fn(&Menu) -> Option<i32>) -> Vec<Menu> {
    siblings
        .iter()
        .filter_map(|m| {
            new_order(m).map(|order| {
                let mut moved = m.clone();
                moved.order = order;
                moved.touch();
                moved
            })
        })
        .collect()
}
