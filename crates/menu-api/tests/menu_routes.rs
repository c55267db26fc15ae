//! HTTP-level tests over the in-memory repository.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use menu_api::{build_router, AppState};
use menu_infrastructure::InMemoryMenuRepository;
use menu_shared::config::{AppConfig, StorageBackend};

fn app() -> Router {
    let mut config = AppConfig::defaults().unwrap();
    config.database.backend = StorageBackend::Memory;
    build_router(AppState::new(Arc::new(InMemoryMenuRepository::new()), config))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn create(app: &Router, name: &str, parent_id: Option<&str>) -> String {
    let body = match parent_id {
        Some(parent_id) => json!({ "name": name, "parentId": parent_id }),
        None => json!({ "name": name }),
    };
    let (status, json) = send(app, "POST", "/menus", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED, "create {} failed: {}", name, json);
    json["data"]["id"].as_str().unwrap().to_string()
}

fn names(nodes: &Value) -> Vec<String> {
    nodes
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["name"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_create_assigns_depth_and_order() {
    let app = app();
    let system = create(&app, "System", None).await;

    let (status, json) = send(&app, "POST", "/menus", Some(json!({ "name": "Users", "parentId": system }))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["success"], true);
    assert_eq!(json["message"], "Menu successfully created");
    assert_eq!(json["data"]["depth"], 1);
    assert_eq!(json["data"]["order"], 1);
    assert_eq!(json["data"]["parentId"], system.as_str());

    let (_, json) = send(&app, "POST", "/menus", Some(json!({ "name": "Roles", "parentId": system, "depth": 1, "order": 2 }))).await;
    assert_eq!(json["data"]["order"], 2);
}

#[tokio::test]
async fn test_create_rejects_wrong_order_and_depth() {
    let app = app();
    let system = create(&app, "System", None).await;

    let (status, json) = send(&app, "POST", "/menus", Some(json!({ "name": "Reports", "order": 5 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);
    assert_eq!(json["error"]["code"], "BAD_REQUEST");
    assert_eq!(json["error"]["message"], "Invalid order: Expected order 2, but received 5");

    let (status, json) = send(&app, "POST", "/menus", Some(json!({ "name": "Users", "parentId": system, "depth": 4 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["message"], "Invalid depth: Parent menu must have depth 3, but found 0");
}

#[tokio::test]
async fn test_create_with_missing_parent() {
    let app = app();
    let ghost = uuid::Uuid::new_v4().to_string();

    let (status, json) = send(&app, "POST", "/menus", Some(json!({ "name": "Orphan", "parentId": ghost }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"]["message"], "Parent menu not found");
}

#[tokio::test]
async fn test_request_validation() {
    let app = app();

    let (status, json) = send(&app, "POST", "/menus", Some(json!({ "name": "x", "icon": "home" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);

    let (status, json) = send(&app, "POST", "/menus", Some(json!({ "name": "  " }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], "VALIDATION_ERROR");

    let (status, _) = send(&app, "GET", "/menus/not-a-uuid", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, "GET", "/nowhere", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_name_bounds_apply_after_trim() {
    let app = app();

    let padded = format!(" {} ", "x".repeat(100));
    let (status, json) = send(&app, "POST", "/menus", Some(json!({ "name": padded }))).await;
    assert_eq!(status, StatusCode::CREATED, "{}", json);
    assert_eq!(json["data"]["name"], "x".repeat(100));

    let (status, json) = send(&app, "POST", "/menus", Some(json!({ "name": "x".repeat(101) }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_malformed_delete_query_uses_error_envelope() {
    let app = app();
    let system = create(&app, "System", None).await;

    let (status, json) =
        send(&app, "DELETE", &format!("/menus/{}?cascade=true&cascade=false", system), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);
    assert_eq!(json["error"]["code"], "BAD_REQUEST");

    let (status, _) = send(&app, "GET", &format!("/menus/{}", system), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_list_and_hierarchy() {
    let app = app();

    let (status, json) = send(&app, "GET", "/menus", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"], json!([]));

    let system = create(&app, "System", None).await;
    create(&app, "Reports", None).await;
    let users = create(&app, "Users", Some(&system)).await;
    create(&app, "Audit", Some(&system)).await;
    create(&app, "Roles", Some(&users)).await;

    let (_, json) = send(&app, "GET", "/menus", None).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 5);

    let (status, json) = send(&app, "GET", "/menus/hierarchy", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Menu hierarchy retrieved successfully");

    let roots = &json["data"];
    assert_eq!(names(roots), vec!["System", "Reports"]);
    assert_eq!(names(&roots[0]["children"]), vec!["Users", "Audit"]);
    assert_eq!(names(&roots[0]["children"][0]["children"]), vec!["Roles"]);
    assert_eq!(roots[1]["children"], json!([]));
}

#[tokio::test]
async fn test_get_one_includes_root_menu() {
    let app = app();
    let system = create(&app, "System", None).await;
    let users = create(&app, "Users", Some(&system)).await;
    let roles = create(&app, "Roles", Some(&users)).await;

    let (status, json) = send(&app, "GET", &format!("/menus/{}", roles), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["name"], "Roles");
    assert_eq!(json["data"]["depth"], 2);
    assert_eq!(json["data"]["rootMenu"]["id"], system.as_str());
    assert_eq!(json["data"]["rootMenu"]["name"], "System");

    let (status, json) = send(&app, "GET", &format!("/menus/{}", uuid::Uuid::new_v4()), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_guarded_and_cascade_delete() {
    let app = app();
    let system = create(&app, "System", None).await;
    let users = create(&app, "Users", Some(&system)).await;
    let roles = create(&app, "Roles", Some(&users)).await;

    let (status, json) = send(&app, "DELETE", &format!("/menus/{}", system), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        json["error"]["message"],
        format!("Cannot delete menu ID {} because it has children. Delete the children first.", system)
    );

    let (status, json) = send(&app, "DELETE", &format!("/menus/{}?cascade=false", system), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "{}", json);

    let (status, json) = send(&app, "DELETE", &format!("/menus/{}?cascade=true", system), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["cascade"], true);
    assert_eq!(json["data"]["deletedIds"], json!([system, users, roles]));
    assert_eq!(
        json["message"],
        format!("Menu with ID {} and its children successfully deleted", system)
    );

    let (_, json) = send(&app, "GET", "/menus", None).await;
    assert_eq!(json["data"], json!([]));

    let (status, _) = send(&app, "DELETE", &format!("/menus/{}", system), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_leaf_keeps_orders_contiguous() {
    let app = app();
    let a = create(&app, "a", None).await;
    create(&app, "b", None).await;
    create(&app, "c", None).await;

    let (status, json) = send(&app, "DELETE", &format!("/menus/{}", a), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["deletedIds"], json!([a]));

    let (_, json) = send(&app, "GET", "/menus/hierarchy", None).await;
    let roots = json["data"].as_array().unwrap();
    let orders: Vec<(String, i64)> = roots
        .iter()
        .map(|n| (n["name"].as_str().unwrap().to_string(), n["order"].as_i64().unwrap()))
        .collect();
    assert_eq!(orders, vec![("b".to_string(), 1), ("c".to_string(), 2)]);

    // A new root goes to the end of the renumbered group.
    let (_, json) = send(&app, "POST", "/menus", Some(json!({ "name": "d", "order": 3 }))).await;
    assert_eq!(json["data"]["order"], 3);
}

#[tokio::test]
async fn test_update_rename_move_and_reorder() {
    let app = app();
    let a = create(&app, "a", None).await;
    let b = create(&app, "b", None).await;
    let c = create(&app, "c", None).await;

    let (status, json) = send(&app, "PATCH", &format!("/menus/{}", b), Some(json!({ "name": "bee" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["name"], "bee");
    assert_eq!(json["message"], format!("Menu with ID {} successfully updated", b));

    // Move c to the front of the root group.
    let (status, json) = send(&app, "PATCH", &format!("/menus/{}", c), Some(json!({ "order": 1 }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["order"], 1);
    let (_, json) = send(&app, "GET", "/menus/hierarchy", None).await;
    assert_eq!(names(&json["data"]), vec!["c", "a", "bee"]);

    // Move bee under a.
    let (status, json) = send(&app, "PATCH", &format!("/menus/{}", b), Some(json!({ "parentId": a }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["depth"], 1);
    assert_eq!(json["data"]["order"], 1);

    let (_, json) = send(&app, "GET", "/menus/hierarchy", None).await;
    assert_eq!(names(&json["data"]), vec!["c", "a"]);
    assert_eq!(names(&json["data"][1]["children"]), vec!["bee"]);

    // And back to the root group, which it joins at the end.
    let (status, json) = send(&app, "PATCH", &format!("/menus/{}", b), Some(json!({ "parentId": null }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["depth"], 0);
    assert_eq!(json["data"]["order"], 3);
}

#[tokio::test]
async fn test_update_cannot_create_cycle() {
    let app = app();
    let system = create(&app, "System", None).await;
    let users = create(&app, "Users", Some(&system)).await;

    let (status, _) = send(&app, "PATCH", &format!("/menus/{}", system), Some(json!({ "parentId": system }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, json) = send(&app, "PATCH", &format!("/menus/{}", system), Some(json!({ "parentId": users }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        json["error"]["message"],
        format!("Cannot change depth of menu ID {} because it has children", system)
    );

    let (status, _) = send(&app, "PATCH", &format!("/menus/{}", users), Some(json!({ "color": "red" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_health_endpoints() {
    let app = app();

    let (status, json) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");

    let (status, json) = send(&app, "GET", "/health/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ready");
}
