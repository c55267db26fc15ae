// ============================================================================
// Menu API - Menu Handlers
// File: crates/menu-api/src/handlers/menu.rs
// ============================================================================
//! Menu CRUD HTTP handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;
use uuid::Uuid;

use menu_shared::utils::{parse_entity_id, parse_flag};

use crate::dto::{
    CreateMenuRequest, DeleteMenuQuery, DeleteMenuResponse, MenuDetailDto, MenuDto, MenuNodeDto,
    UpdateMenuRequest,
};
use crate::error::ApiError;
use crate::extract::{ValidatedJson, ValidatedQuery};
use crate::response::ApiResponse;
use crate::state::AppState;

type ApiResult<T> = Result<(StatusCode, Json<ApiResponse<T>>), ApiError>;

fn menu_id(raw: &str) -> Result<Uuid, ApiError> {
    parse_entity_id(raw).ok_or_else(|| ApiError::BadRequest(format!("Invalid menu ID: {}", raw)))
}

/// Create handler - POST /menus
pub async fn create_menu(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateMenuRequest>,
) -> ApiResult<MenuDto> {
    info!("Creating menu: {:?}", payload);

    let menu = state.menu_service.create(payload.into()).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success_with_message(MenuDto::from(&menu), "Menu successfully created")),
    ))
}

/// List handler - GET /menus
pub async fn list_menus(State(state): State<AppState>) -> ApiResult<Vec<MenuDto>> {
    info!("Fetching all menus");

    let menus = state.menu_service.list().await?;
    let data: Vec<MenuDto> = menus.iter().map(MenuDto::from).collect();
    Ok((
        StatusCode::OK,
        Json(ApiResponse::success_with_message(data, "Menus retrieved successfully")),
    ))
}

/// Hierarchy handler - GET /menus/hierarchy
pub async fn get_hierarchy(State(state): State<AppState>) -> ApiResult<Vec<MenuNodeDto>> {
    info!("Fetching menu hierarchy");

    let roots = state.menu_service.hierarchy().await?;
    let data: Vec<MenuNodeDto> = roots.iter().map(MenuNodeDto::from).collect();
    Ok((
        StatusCode::OK,
        Json(ApiResponse::success_with_message(data, "Menu hierarchy retrieved successfully")),
    ))
}

/// Detail handler - GET /menus/{id}
pub async fn get_menu(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<MenuDetailDto> {
    info!("Fetching menu with ID: {}", id);
    let id = menu_id(&id)?;

    let detail = state.menu_service.find_one(&id).await?;
    Ok((
        StatusCode::OK,
        Json(ApiResponse::success_with_message(
            MenuDetailDto::from(&detail),
            format!("Menu with ID {} retrieved successfully", id),
        )),
    ))
}

/// Update handler - PATCH /menus/{id}
pub async fn update_menu(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<UpdateMenuRequest>,
) -> ApiResult<MenuDto> {
    info!("Updating menu ID: {} with data: {:?}", id, payload);
    let id = menu_id(&id)?;

    let menu = state.menu_service.update(&id, payload.into()).await?;
    Ok((
        StatusCode::OK,
        Json(ApiResponse::success_with_message(
            MenuDto::from(&menu),
            format!("Menu with ID {} successfully updated", id),
        )),
    ))
}

/// Delete handler - DELETE /menus/{id}?cascade=true
pub async fn delete_menu(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedQuery(query): ValidatedQuery<DeleteMenuQuery>,
) -> ApiResult<DeleteMenuResponse> {
    let cascade = parse_flag(query.cascade.as_deref());
    info!("Deleting menu with ID: {}, cascade: {}", id, cascade);
    let id = menu_id(&id)?;

    let (result, message) = if cascade {
        let result = state.menu_service.remove_with_children(&id).await?;
        (result, format!("Menu with ID {} and its children successfully deleted", id))
    } else {
        let result = state.menu_service.remove(&id).await?;
        (result, format!("Menu with ID {} successfully deleted", id))
    };

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success_with_message(DeleteMenuResponse::from(result), message)),
    ))
}
