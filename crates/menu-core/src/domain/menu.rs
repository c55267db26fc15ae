// ============================================================================
// Menu Core - Menu Entity
// File: crates/menu-core/src/domain/menu.rs
// Description: Flat parent-pointer menu record
// ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use menu_shared::constants::ROOT_DEPTH;
use menu_shared::{new_id, now};

/// Menu entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Menu {
    pub id: Uuid,

    #[validate(length(min = 1, max = 100, message = "Menu name must be between 1 and 100 characters"))]
    pub name: String,

    pub parent_id: Option<Uuid>,

    #[validate(range(min = 0, message = "Menu depth must not be negative"))]
    pub depth: i32,

    #[validate(range(min = 1, message = "Menu order starts at 1"))]
    pub order: i32,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Menu {
    pub fn new(
        name: String,
        parent_id: Option<Uuid>,
        depth: i32,
        order: i32,
    ) -> Result<Self, validator::ValidationErrors> {
        let created_at = now();
        let menu = Self {
            id: new_id(),
            name: name.trim().to_string(),
            parent_id,
            depth,
            order,
            created_at,
            updated_at: created_at,
        };

        menu.validate()?;
        Ok(menu)
    }

    /// Root menus have no parent and sit at depth 0.
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none() && self.depth == ROOT_DEPTH
    }

    pub fn rename(&mut self, name: &str) -> Result<(), validator::ValidationErrors> {
        let previous = std::mem::replace(&mut self.name, name.trim().to_string());
        if let Err(e) = self.validate() {
            self.name = previous;
            return Err(e);
        }
        Ok(())
    }

    pub fn touch(&mut self) {
        self.updated_at = now();
    }
}

/// Topmost ancestor reference attached to single-menu lookups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootMenu {
    pub id: Uuid,
    pub name: String,
}

impl From<&Menu> for RootMenu {
    fn from(menu: &Menu) -> Self {
        Self {
            id: menu.id,
            name: menu.name.clone(),
        }
    }
}
