use super::{ApiError, decode_body};
use axum::{
    Extension, Json, Router,
    extract::{Path, rejection::JsonRejection},
    http::StatusCode,
    routing::{delete, get},
};
use serde::{Deserialize, Serialize};
use shoplist_core::{AppCore, User, services::user as user_service};
use std::sync::Arc;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/{user_id}", delete(delete_user))
}

#[derive(Debug, Deserialize)]
struct CreateUserRequest {
    name: String,
}

#[derive(Debug, Serialize)]
struct UsersResponse {
    users: Vec<User>,
}

#[derive(Debug, Serialize)]
struct DeletedResponse {
    deleted: bool,
}

async fn create_user(
    Extension(core): Extension<Arc<AppCore>>,
    req: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let req = decode_body(req)?;
    let created = user_service::create_user(&core, &req.name).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn list_users(
    Extension(core): Extension<Arc<AppCore>>,
) -> Result<Json<UsersResponse>, ApiError> {
    let users = user_service::list_users(&core).await?;
    Ok(Json(UsersResponse { users }))
}

async fn delete_user(
    Extension(core): Extension<Arc<AppCore>>,
    Path(user_id): Path<String>,
) -> Result<Json<DeletedResponse>, ApiError> {
    user_service::delete_user(&core, &user_id).await?;
    Ok(Json(DeletedResponse { deleted: true }))
}
