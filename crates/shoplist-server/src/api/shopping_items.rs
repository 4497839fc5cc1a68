use super::{ApiError, decode_body};
use axum::{
    Extension, Json, Router,
    extract::{Path, rejection::JsonRejection},
    http::StatusCode,
    routing::{get, patch, post},
};
use shoplist_core::{
    AppCore, DeleteAck, ItemPatch, NewItem, ShoppingItem,
    auth::{ITEM_READ, ITEM_WRITE, Principal, RoleGate},
    services::shopping_item as item_service,
};
use std::sync::Arc;

/// Item routes, relative to `/shopping-lists`.
pub fn router() -> Router {
    Router::new()
        .route(
            "/{list_id}/items",
            get(list_items).layer(Extension(ITEM_READ)),
        )
        .route(
            "/{list_id}/items",
            post(create_item).layer(Extension(ITEM_WRITE)),
        )
        .route(
            "/{list_id}/items/{item_id}",
            patch(update_item)
                .delete(delete_item)
                .layer(Extension(ITEM_WRITE)),
        )
        .route(
            "/{list_id}/items/{item_id}/resolve",
            post(resolve_item).layer(Extension(ITEM_WRITE)),
        )
        .route(
            "/{list_id}/items/{item_id}/unresolve",
            post(unresolve_item).layer(Extension(ITEM_WRITE)),
        )
}

async fn list_items(
    Extension(core): Extension<Arc<AppCore>>,
    Extension(principal): Extension<Principal>,
    Extension(gate): Extension<RoleGate>,
    Path(list_id): Path<String>,
) -> Result<Json<Vec<ShoppingItem>>, ApiError> {
    let items = item_service::list_items(&core, &principal, gate, &list_id).await?;
    Ok(Json(items))
}

async fn create_item(
    Extension(core): Extension<Arc<AppCore>>,
    Extension(principal): Extension<Principal>,
    Extension(gate): Extension<RoleGate>,
    Path(list_id): Path<String>,
    req: Result<Json<NewItem>, JsonRejection>,
) -> Result<(StatusCode, Json<ShoppingItem>), ApiError> {
    let created =
        item_service::create_item(&core, &principal, gate, &list_id, decode_body(req)).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_item(
    Extension(core): Extension<Arc<AppCore>>,
    Extension(principal): Extension<Principal>,
    Extension(gate): Extension<RoleGate>,
    Path((list_id, item_id)): Path<(String, String)>,
    patch: Result<Json<ItemPatch>, JsonRejection>,
) -> Result<Json<ShoppingItem>, ApiError> {
    let patch = decode_body(patch);
    let updated =
        item_service::update_item(&core, &principal, gate, &list_id, &item_id, patch).await?;
    Ok(Json(updated))
}

async fn delete_item(
    Extension(core): Extension<Arc<AppCore>>,
    Extension(principal): Extension<Principal>,
    Extension(gate): Extension<RoleGate>,
    Path((list_id, item_id)): Path<(String, String)>,
) -> Result<Json<DeleteAck>, ApiError> {
    let ack = item_service::delete_item(&core, &principal, gate, &list_id, &item_id).await?;
    Ok(Json(ack))
}

async fn resolve_item(
    Extension(core): Extension<Arc<AppCore>>,
    Extension(principal): Extension<Principal>,
    Extension(gate): Extension<RoleGate>,
    Path((list_id, item_id)): Path<(String, String)>,
) -> Result<Json<ShoppingItem>, ApiError> {
    let updated = item_service::resolve_item(&core, &principal, gate, &list_id, &item_id).await?;
    Ok(Json(updated))
}

async fn unresolve_item(
    Extension(core): Extension<Arc<AppCore>>,
    Extension(principal): Extension<Principal>,
    Extension(gate): Extension<RoleGate>,
    Path((list_id, item_id)): Path<(String, String)>,
) -> Result<Json<ShoppingItem>, ApiError> {
    let updated =
        item_service::unresolve_item(&core, &principal, gate, &list_id, &item_id).await?;
    Ok(Json(updated))
}
