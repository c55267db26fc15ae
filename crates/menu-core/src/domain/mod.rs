//! # Menu Core - Domain Module
//! 
//! Domain entities and pure hierarchy logic.

pub mod menu;
pub mod hierarchy;

pub use menu::{Menu, RootMenu};
pub use hierarchy::{build_hierarchy, collect_descendant_ids, find_root, MenuNode};
