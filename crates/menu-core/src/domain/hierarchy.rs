// ============================================================================
// Menu Core - Hierarchy Assembly
// File: crates/menu-core/src/domain/hierarchy.rs
// Description: Tree reconstruction and traversal over flat menu rows
// ============================================================================
//! Pure functions turning the flat parent-pointer table into a tree.
//!
//! None of these functions trust the input to be well formed: rows pointing
//! at a missing parent, or rows forming a cycle, are skipped instead of
//! looping forever.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::warn;
use uuid::Uuid;

use super::menu::Menu;

/// A menu together with its ordered children.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MenuNode {
    pub id: Uuid,
    pub name: String,
    pub parent_id: Option<Uuid>,
    pub depth: i32,
    pub order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub children: Vec<MenuNode>,
}

impl From<&Menu> for MenuNode {
    fn from(menu: &Menu) -> Self {
        Self {
            id: menu.id,
            name: menu.name.clone(),
            parent_id: menu.parent_id,
            depth: menu.depth,
            order: menu.order,
            created_at: menu.created_at,
            updated_at: menu.updated_at,
            children: Vec::new(),
        }
    }
}

impl MenuNode {
    /// Number of nodes in this subtree, including `self`.
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(MenuNode::size).sum::<usize>()
    }

    fn sort_recursive(&mut self) {
        sort_siblings(&mut self.children);
        for child in &mut self.children {
            child.sort_recursive();
        }
    }
}

fn sort_siblings(nodes: &mut [MenuNode]) {
    nodes.sort_by(|a, b| a.order.cmp(&b.order).then(a.created_at.cmp(&b.created_at)));
}

/// Builds the menu forest.
///
/// Nodes are attached to their parents one depth level at a time, deepest
/// level first, so that every subtree is complete before it moves into its
/// parent. Whatever is left at the end with no parent is a root.
pub fn build_hierarchy(menus: &[Menu]) -> Vec<MenuNode> {
    if menus.is_empty() {
        return Vec::new();
    }

    let max_depth = menus.iter().map(|m| m.depth).max().unwrap_or(0);
    let mut nodes: HashMap<Uuid, MenuNode> = menus.iter().map(|m| (m.id, MenuNode::from(m))).collect();

    let mut by_depth: HashMap<i32, Vec<&Menu>> = HashMap::new();
    for menu in menus {
        by_depth.entry(menu.depth).or_default().push(menu);
    }

    let mut dropped = 0usize;
    for depth in (1..=max_depth).rev() {
        let Some(level) = by_depth.get(&depth) else {
            continue;
        };
        for menu in level {
            let Some(parent_id) = menu.parent_id else {
                continue;
            };
            let Some(node) = nodes.remove(&menu.id) else {
                continue;
            };
            match nodes.get_mut(&parent_id) {
                Some(parent) => parent.children.push(node),
                None => dropped += node.size(),
            }
        }
    }

    let mut roots: Vec<MenuNode> = Vec::new();
    for (_, node) in nodes.drain() {
        if node.parent_id.is_none() {
            roots.push(node);
        } else {
            dropped += node.size();
        }
    }

    if dropped > 0 {
        warn!("Menu hierarchy skipped {} row(s) not reachable from a root", dropped);
    }

    sort_siblings(&mut roots);
    for root in &mut roots {
        root.sort_recursive();
    }
    roots
}

/// Every descendant of `id`, depth-first pre-order, children in sibling order.
/// `id` itself is not included.
pub fn collect_descendant_ids(menus: &[Menu], id: &Uuid) -> Vec<Uuid> {
    let mut children: HashMap<Uuid, Vec<&Menu>> = HashMap::new();
    for menu in menus {
        if let Some(parent_id) = menu.parent_id {
            children.entry(parent_id).or_default().push(menu);
        }
    }
    for group in children.values_mut() {
        group.sort_by(|a, b| a.order.cmp(&b.order).then(a.created_at.cmp(&b.created_at)));
    }

    let mut visited: HashSet<Uuid> = HashSet::from([*id]);
    let mut result = Vec::new();
    let mut stack: Vec<Uuid> = children
        .get(id)
        .map(|group| group.iter().rev().map(|m| m.id).collect())
        .unwrap_or_default();

    while let Some(current) = stack.pop() {
        if !visited.insert(current) {
            continue;
        }
        result.push(current);
        if let Some(group) = children.get(&current) {
            stack.extend(group.iter().rev().map(|m| m.id));
        }
    }

    result
}

/// Walks parent pointers up to the topmost reachable ancestor of `id`.
/// Returns `None` only when `id` itself is absent.
pub fn find_root<'a>(menus: &'a [Menu], id: &Uuid) -> Option<&'a Menu> {
    let by_id: HashMap<Uuid, &Menu> = menus.iter().map(|m| (m.id, m)).collect();
    let mut current = *by_id.get(id)?;
    let mut visited: HashSet<Uuid> = HashSet::from([current.id]);

    while let Some(parent_id) = current.parent_id {
        match by_id.get(&parent_id).copied() {
            Some(parent) if visited.insert(parent.id) => current = parent,
            _ => break,
        }
    }

    Some(current)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn menu(name: &str, parent: Option<&Menu>, order: i32) -> Menu {
        let depth = parent.map(|p| p.depth + 1).unwrap_or(0);
        Menu::new(name.to_string(), parent.map(|p| p.id), depth, order).unwrap()
    }

    /// system
    /// ├── users
    /// │   └── roles
    /// └── audit
    /// reports
    fn sample() -> Vec<Menu> {
        let system = menu("system", None, 1);
        let reports = menu("reports", None, 2);
        let users = menu("users", Some(&system), 1);
        let audit = menu("audit", Some(&system), 2);
        let roles = menu("roles", Some(&users), 1);
        // Deliberately shuffled: input order must not matter.
        vec![roles, audit, reports, users, system]
    }

    fn subtree_ids(node: &MenuNode) -> Vec<Uuid> {
        let mut ids = vec![node.id];
        for child in &node.children {
            ids.extend(subtree_ids(child));
        }
        ids
    }

    fn by_name<'a>(menus: &'a [Menu], name: &str) -> &'a Menu {
        menus.iter().find(|m| m.name == name).unwrap()
    }

    #[test]
    fn test_build_hierarchy_nests_and_sorts() {
        let menus = sample();
        let tree = build_hierarchy(&menus);

        assert_eq!(tree.len(), 2);
        assert_eq!(tree[0].name, "system");
        assert_eq!(tree[1].name, "reports");

        let system = &tree[0];
        let names: Vec<&str> = system.children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["users", "audit"]);
        assert_eq!(system.children[0].children[0].name, "roles");
        assert_eq!(system.size(), 4);
    }

    #[test]
    fn test_build_hierarchy_empty() {
        assert!(build_hierarchy(&[]).is_empty());
    }

    #[test]
    fn test_build_hierarchy_skips_orphans() {
        let mut menus = sample();
        let ghost_parent = menu("ghost", None, 9);
        let mut orphan = menu("orphan", Some(&ghost_parent), 1);
        orphan.depth = 1;
        menus.push(orphan);

        let tree = build_hierarchy(&menus);
        let total: usize = tree.iter().map(MenuNode::size).sum();
        assert_eq!(total, 5);
    }

    #[test]
    fn test_build_hierarchy_survives_cycle() {
        let mut a = menu("a", None, 1);
        let mut b = menu("b", None, 1);
        a.parent_id = Some(b.id);
        a.depth = 2;
        b.parent_id = Some(a.id);
        b.depth = 1;
        let root = menu("root", None, 1);

        let tree = build_hierarchy(&[a, b, root]);
        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].name, "root");
    }

    #[test]
    fn test_collect_descendants_pre_order() {
        let menus = sample();
        let system = by_name(&menus, "system");
        let ids = collect_descendant_ids(&menus, &system.id);

        let expected: Vec<Uuid> = ["users", "roles", "audit"]
            .iter()
            .map(|n| by_name(&menus, n).id)
            .collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_collect_descendants_of_leaf_is_empty() {
        let menus = sample();
        let roles = by_name(&menus, "roles");
        assert!(collect_descendant_ids(&menus, &roles.id).is_empty());
        assert!(collect_descendant_ids(&menus, &Uuid::new_v4()).is_empty());
    }

    #[test]
    fn test_collect_descendants_matches_subtree_ids() {
        let menus = sample();
        let tree = build_hierarchy(&menus);
        let system = &tree[0];
        let mut from_tree = subtree_ids(system);
        from_tree.remove(0);
        assert_eq!(collect_descendant_ids(&menus, &system.id), from_tree);
    }

    #[test]
    fn test_find_root() {
        let menus = sample();
        let roles = by_name(&menus, "roles");
        let root = find_root(&menus, &roles.id).unwrap();
        assert_eq!(root.name, "system");

        let reports = by_name(&menus, "reports");
        assert_eq!(find_root(&menus, &reports.id).unwrap().id, reports.id);
        assert!(find_root(&menus, &Uuid::new_v4()).is_none());
    }

    #[test]
    fn test_find_root_stops_on_cycle() {
        let mut a = menu("a", None, 1);
        let mut b = menu("b", None, 1);
        a.parent_id = Some(b.id);
        b.parent_id = Some(a.id);
        let menus = vec![a.clone(), b];
        assert!(find_root(&menus, &a.id).is_some());
    }
}
