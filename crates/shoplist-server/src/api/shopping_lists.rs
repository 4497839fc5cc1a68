use super::{ApiError, decode_body};
use axum::{
    Extension, Json, Router,
    extract::{Path, rejection::JsonRejection},
    http::StatusCode,
    routing::{get, patch, post},
};
use serde::{Deserialize, Serialize};
use shoplist_core::{
    AppCore, DeleteAck, ShoppingList,
    auth::{LIST_ADMIN, LIST_LEAVE, Principal, RoleGate},
    services::shopping_list as list_service,
};
use std::sync::Arc;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_lists).post(create_list))
        .route("/{list_id}", get(get_list))
        .route(
            "/{list_id}",
            patch(rename_list)
                .delete(delete_list)
                .layer(Extension(LIST_ADMIN)),
        )
        .route(
            "/{list_id}/archive",
            patch(archive_list).layer(Extension(LIST_ADMIN)),
        )
        .route(
            "/{list_id}/members/{member_id}",
            post(add_member)
                .delete(remove_member)
                .layer(Extension(LIST_ADMIN)),
        )
        .route(
            "/{list_id}/leave",
            post(leave_list).layer(Extension(LIST_LEAVE)),
        )
}

#[derive(Debug, Serialize)]
struct ListsResponse {
    list: Vec<ShoppingList>,
}

#[derive(Debug, Deserialize)]
struct NameRequest {
    name: String,
}

async fn list_lists(
    Extension(core): Extension<Arc<AppCore>>,
    Extension(principal): Extension<Principal>,
) -> Result<Json<ListsResponse>, ApiError> {
    let list = list_service::list_for_user(&core, &principal).await?;
    Ok(Json(ListsResponse { list }))
}

async fn get_list(
    Extension(core): Extension<Arc<AppCore>>,
    Path(list_id): Path<String>,
) -> Result<Json<ShoppingList>, ApiError> {
    Ok(Json(list_service::get_list(&core, &list_id).await?))
}

async fn create_list(
    Extension(core): Extension<Arc<AppCore>>,
    Extension(principal): Extension<Principal>,
    req: Result<Json<NameRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ShoppingList>), ApiError> {
    let req = decode_body(req)?;
    let created = list_service::create_list(&core, &principal, &req.name).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn rename_list(
    Extension(core): Extension<Arc<AppCore>>,
    Extension(principal): Extension<Principal>,
    Extension(gate): Extension<RoleGate>,
    Path(list_id): Path<String>,
    req: Result<Json<NameRequest>, JsonRejection>,
) -> Result<Json<ShoppingList>, ApiError> {
    let name = decode_body(req).map(|req| req.name);
    let updated = list_service::rename_list(&core, &principal, gate, &list_id, name).await?;
    Ok(Json(updated))
}

async fn archive_list(
    Extension(core): Extension<Arc<AppCore>>,
    Extension(principal): Extension<Principal>,
    Extension(gate): Extension<RoleGate>,
    Path(list_id): Path<String>,
) -> Result<Json<ShoppingList>, ApiError> {
    let archived = list_service::archive_list(&core, &principal, gate, &list_id).await?;
    Ok(Json(archived))
}

async fn delete_list(
    Extension(core): Extension<Arc<AppCore>>,
    Extension(principal): Extension<Principal>,
    Extension(gate): Extension<RoleGate>,
    Path(list_id): Path<String>,
) -> Result<Json<DeleteAck>, ApiError> {
    let ack = list_service::delete_list(&core, &principal, gate, &list_id).await?;
    Ok(Json(ack))
}

async fn add_member(
    Extension(core): Extension<Arc<AppCore>>,
    Extension(principal): Extension<Principal>,
    Extension(gate): Extension<RoleGate>,
    Path((list_id, member_id)): Path<(String, String)>,
) -> Result<Json<ShoppingList>, ApiError> {
    let updated =
        list_service::add_member(&core, &principal, gate, &list_id, &member_id).await?;
    Ok(Json(updated))
}

async fn remove_member(
    Extension(core): Extension<Arc<AppCore>>,
    Extension(principal): Extension<Principal>,
    Extension(gate): Extension<RoleGate>,
    Path((list_id, member_id)): Path<(String, String)>,
) -> Result<Json<ShoppingList>, ApiError> {
    let updated =
        list_service::remove_member(&core, &principal, gate, &list_id, &member_id).await?;
    Ok(Json(updated))
}

async fn leave_list(
    Extension(core): Extension<Arc<AppCore>>,
    Extension(principal): Extension<Principal>,
    Extension(gate): Extension<RoleGate>,
    Path(list_id): Path<String>,
) -> Result<Json<ShoppingList>, ApiError> {
    let updated = list_service::leave_list(&core, &principal, gate, &list_id).await?;
    Ok(Json(updated))
}
