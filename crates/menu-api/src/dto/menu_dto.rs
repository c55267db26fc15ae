// ============================================================================
// Menu API - Menu DTOs
// File: crates/menu-api/src/dto/menu_dto.rs
// ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use menu_core::domain::{Menu, MenuNode, RootMenu};
use menu_shared::constants::{MAX_MENU_NAME_LENGTH, MIN_MENU_NAME_LENGTH};
use menu_core::services::{CreateMenuInput, DeleteResult, MenuDetail, UpdateMenuInput};

/// Create request payload - POST /menus
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateMenuRequest {
    #[validate(custom(function = "validate_menu_name"))]
    pub name: String,

    /// An empty string is treated as "no parent".
    #[serde(default, deserialize_with = "empty_as_none")]
    pub parent_id: Option<Uuid>,

    #[validate(range(min = 0, message = "Depth must not be negative"))]
    pub depth: Option<i32>,

    #[validate(range(min = 1, message = "Order starts at 1"))]
    pub order: Option<i32>,
}

impl From<CreateMenuRequest> for CreateMenuInput {
    fn from(req: CreateMenuRequest) -> Self {
        Self {
            name: req.name,
            parent_id: req.parent_id,
            depth: req.depth,
            order: req.order,
        }
    }
}

/// Update request payload - PATCH /menus/{id}
///
/// `parentId` is tri-state: absent keeps the parent, `null` or `""` makes
/// the menu a root, a UUID moves it.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateMenuRequest {
    #[validate(custom(function = "validate_menu_name"))]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "present_empty_as_none")]
    pub parent_id: Option<Option<Uuid>>,

    #[validate(range(min = 0, message = "Depth must not be negative"))]
    pub depth: Option<i32>,

    #[validate(range(min = 1, message = "Order starts at 1"))]
    pub order: Option<i32>,
}

impl From<UpdateMenuRequest> for UpdateMenuInput {
    fn from(req: UpdateMenuRequest) -> Self {
        Self {
            name: req.name,
            parent_id: req.parent_id,
            depth: req.depth,
            order: req.order,
        }
    }
}

/// Query string for DELETE /menus/{id}
#[derive(Debug, Default, Deserialize, Validate)]
pub struct DeleteMenuQuery {
    pub cascade: Option<String>,
}

/// Menu DTO for responses
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuDto {
    pub id: Uuid,
    pub name: String,
    pub parent_id: Option<Uuid>,
    pub depth: i32,
    pub order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Menu> for MenuDto {
    fn from(menu: &Menu) -> Self {
        Self {
            id: menu.id,
            name: menu.name.clone(),
            parent_id: menu.parent_id,
            depth: menu.depth,
            order: menu.order,
            created_at: menu.created_at,
            updated_at: menu.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RootMenuDto {
    pub id: Uuid,
    pub name: String,
}

impl From<&RootMenu> for RootMenuDto {
    fn from(root: &RootMenu) -> Self {
        Self {
            id: root.id,
            name: root.name.clone(),
        }
    }
}

/// Single-menu lookup: the menu's fields plus `rootMenu`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuDetailDto {
    #[serde(flatten)]
    pub menu: MenuDto,
    pub root_menu: RootMenuDto,
}

impl From<&MenuDetail> for MenuDetailDto {
    fn from(detail: &MenuDetail) -> Self {
        Self {
            menu: MenuDto::from(&detail.menu),
            root_menu: RootMenuDto::from(&detail.root_menu),
        }
    }
}

/// Hierarchy node
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuNodeDto {
    #[serde(flatten)]
    pub menu: MenuDto,
    pub children: Vec<MenuNodeDto>,
}

impl From<&MenuNode> for MenuNodeDto {
    fn from(node: &MenuNode) -> Self {
        Self {
            menu: MenuDto {
                id: node.id,
                name: node.name.clone(),
                parent_id: node.parent_id,
                depth: node.depth,
                order: node.order,
                created_at: node.created_at,
                updated_at: node.updated_at,
            },
            children: node.children.iter().map(MenuNodeDto::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteMenuResponse {
    pub deleted_ids: Vec<Uuid>,
    pub cascade: bool,
}

impl From<DeleteResult> for DeleteMenuResponse {
    fn from(result: DeleteResult) -> Self {
        Self {
            deleted_ids: result.deleted_ids,
            cascade: result.cascade,
        }
    }
}

/// Names are trimmed before storage, so the bounds apply to the trimmed value.
fn validate_menu_name(value: &str) -> Result<(), ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("Menu name must not be blank".into());
        return Err(err);
    }

    let length = trimmed.chars().count() as u64;
    if !(MIN_MENU_NAME_LENGTH..=MAX_MENU_NAME_LENGTH).contains(&length) {
        let mut err = ValidationError::new("length");
        err.message = Some(
            format!(
                "Menu name must be between {} and {} characters",
                MIN_MENU_NAME_LENGTH, MAX_MENU_NAME_LENGTH
            )
            .into(),
        );
        return Err(err);
    }
    Ok(())
}

fn parse_optional_id<E: serde::de::Error>(raw: Option<String>) -> Result<Option<Uuid>, E> {
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => Uuid::parse_str(value)
            .map(Some)
            .map_err(|_| E::custom(format!("invalid parentId: {}", value))),
    }
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<Uuid>, D::Error>
where
    D: Deserializer<'de>,
{
    parse_optional_id(Option::<String>::deserialize(deserializer)?)
}

/// Only called when the field is present, so absence stays `None`.
fn present_empty_as_none<'de, D>(deserializer: D) -> Result<Option<Option<Uuid>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    parse_optional_id::<D::Error>(raw).map(Some)
}
