pub mod error;
pub mod shopping_items;
pub mod shopping_lists;
pub mod users;

pub use error::{ApiError, decode_body};

use crate::middleware;
use axum::{Extension, Json, Router, http::StatusCode, routing::get};
use serde_json::{Value, json};
use shoplist_core::AppCore;
use std::sync::Arc;

/// Build the application router.
///
/// Shopping list and item routes sit behind the identity middleware; user
/// routes and the health check do not.
pub fn build_router(core: Arc<AppCore>, cors_origins: &[String]) -> Router {
    let cors = middleware::cors::build_cors_layer(cors_origins);

    let shopping_lists = shopping_lists::router()
        .merge(shopping_items::router())
        .layer(axum::middleware::from_fn(middleware::identity::require_identity));

    Router::new()
        .route("/api/health", get(health_check))
        .nest("/api/shopping-lists", shopping_lists)
        .nest("/api/users", users::router())
        .fallback(route_not_found)
        .layer(cors)
        .layer(Extension(core))
}

async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn route_not_found() -> ApiError {
    ApiError::new(StatusCode::NOT_FOUND, "notFound", "Route not found")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{Body, to_bytes},
        http::{Method, Request},
        response::Response,
    };
    use tempfile::{TempDir, tempdir};
    use tower::ServiceExt;

    const OWNER: &str = "64b000000000000000000001";
    const MEMBER: &str = "64b000000000000000000002";
    const OUTSIDER: &str = "64b000000000000000000003";

    async fn test_app() -> (Router, Arc<AppCore>, TempDir) {
        let temp_dir = tempdir().unwrap();
        let db_path = temp_dir.path().join("test.db");
        let core = Arc::new(AppCore::new(db_path.to_str().unwrap()).await.unwrap());
        (build_router(core.clone(), &[]), core, temp_dir)
    }

    fn request(
        method: Method,
        uri: &str,
        caller: Option<(&str, &str)>,
        body: Option<Value>,
    ) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some((user_id, profile)) = caller {
            builder = builder
                .header("x-user-id", user_id)
                .header("x-user-profile", profile);
        }
        match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
        let response: Response = app.clone().oneshot(req).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    async fn create_list(app: &Router, name: &str) -> String {
        let (status, body) = send(
            app,
            request(
                Method::POST,
                "/api/shopping-lists",
                Some((OWNER, "owner")),
                Some(json!({ "name": name })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        body["id"].as_str().unwrap().to_string()
    }

    async fn add_member(app: &Router, list_id: &str, member_id: &str) -> (StatusCode, Value) {
        send(
            app,
            request(
                Method::POST,
                &format!("/api/shopping-lists/{list_id}/members/{member_id}"),
                Some((OWNER, "owner")),
                None,
            ),
        )
        .await
    }

    #[tokio::test]
    async fn test_health() {
        let (app, _core, _tmp) = test_app().await;
        let (status, body) = send(&app, request(Method::GET, "/api/health", None, None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_lists_require_identity() {
        let (app, _core, _tmp) = test_app().await;
        let (status, body) =
            send(&app, request(Method::GET, "/api/shopping-lists", None, None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["code"], "unauthenticated");
    }

    #[tokio::test]
    async fn test_create_and_list_for_owner_and_member() {
        let (app, _core, _tmp) = test_app().await;
        let list_id = create_list(&app, "Groceries").await;
        let (status, body) = add_member(&app, &list_id, MEMBER).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["members"], json!([MEMBER]));

        for caller in [OWNER, MEMBER] {
            let (status, body) = send(
                &app,
                request(Method::GET, "/api/shopping-lists", Some((caller, "member")), None),
            )
            .await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body["list"][0]["id"], list_id.as_str());
        }

        let (_, body) = send(
            &app,
            request(Method::GET, "/api/shopping-lists", Some((OUTSIDER, "member")), None),
        )
        .await;
        assert_eq!(body["list"], json!([]));
    }

    #[tokio::test]
    async fn test_non_owner_rename_is_forbidden_and_list_unchanged() {
        let (app, core, _tmp) = test_app().await;
        let list_id = create_list(&app, "Groceries").await;

        let (status, body) = send(
            &app,
            request(
                Method::PATCH,
                &format!("/api/shopping-lists/{list_id}"),
                Some((MEMBER, "owner")),
                Some(json!({ "name": "Hijacked" })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"]["reason"], "notListOwner");

        let list = shoplist_core::services::shopping_list::get_list(&core, &list_id)
            .await
            .unwrap();
        assert_eq!(list.name, "Groceries");
    }

    #[tokio::test]
    async fn test_ghost_list_is_not_found_before_role_check() {
        let (app, _core, _tmp) = test_app().await;
        let (status, body) = send(
            &app,
            request(
                Method::DELETE,
                "/api/shopping-lists/ghost",
                Some((OUTSIDER, "viewer")),
                None,
            ),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["reason"], "shoppingListDoesNotExist");
    }

    #[tokio::test]
    async fn test_owner_adding_self_is_bad_request() {
        let (app, _core, _tmp) = test_app().await;
        let list_id = create_list(&app, "Groceries").await;
        let (status, body) = add_member(&app, &list_id, OWNER).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["reason"], "ownerAlreadyInList");
    }

    #[tokio::test]
    async fn test_leave_rules() {
        let (app, _core, _tmp) = test_app().await;
        let list_id = create_list(&app, "Groceries").await;
        add_member(&app, &list_id, MEMBER).await;
        let leave = format!("/api/shopping-lists/{list_id}/leave");

        let (status, body) =
            send(&app, request(Method::POST, &leave, Some((OWNER, "member")), None)).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"]["reason"], "ownerCannotLeave");

        let (status, body) =
            send(&app, request(Method::POST, &leave, Some((OUTSIDER, "member")), None)).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"]["reason"], "notAMember");

        let (status, body) =
            send(&app, request(Method::POST, &leave, Some((MEMBER, "member")), None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["members"], json!([]));
    }

    #[tokio::test]
    async fn test_malformed_body_is_structured_bad_request() {
        let (app, _core, _tmp) = test_app().await;
        for body in [json!({}), json!({ "name": 5 })] {
            let (status, body) = send(
                &app,
                request(
                    Method::POST,
                    "/api/shopping-lists",
                    Some((OWNER, "owner")),
                    Some(body),
                ),
            )
            .await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["error"]["code"], "invalidInput");
            assert_eq!(body["error"]["reason"], "invalidBody");
        }

        let (status, body) =
            send(&app, request(Method::POST, "/api/users", None, Some(json!({})))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["reason"], "invalidBody");
    }

    #[tokio::test]
    async fn test_missing_list_wins_over_malformed_body() {
        let (app, _core, _tmp) = test_app().await;
        let ghost = "/api/shopping-lists/bbbbbbbbbbbbbbbbbbbbbbbb";
        let owner = Some((OWNER, "owner"));

        for (method, uri) in [
            (Method::PATCH, ghost.to_string()),
            (Method::POST, format!("{ghost}/items")),
        ] {
            let (status, body) = send(&app, request(method, &uri, owner, Some(json!({})))).await;
            assert_eq!(status, StatusCode::NOT_FOUND);
            assert_eq!(body["error"]["reason"], "shoppingListDoesNotExist");
        }
    }

    #[tokio::test]
    async fn test_malformed_patch_on_existing_list_is_bad_request() {
        let (app, _core, _tmp) = test_app().await;
        let list_id = create_list(&app, "Groceries").await;
        let (status, body) = send(
            &app,
            request(
                Method::PATCH,
                &format!("/api/shopping-lists/{list_id}"),
                Some((OWNER, "owner")),
                Some(json!({ "title": "Party" })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["reason"], "invalidBody");
    }

    #[tokio::test]
    async fn test_owner_declaring_owner_role_cannot_reach_leave() {
        let (app, _core, _tmp) = test_app().await;
        let list_id = create_list(&app, "Groceries").await;
        let (status, body) = send(
            &app,
            request(
                Method::POST,
                &format!("/api/shopping-lists/{list_id}/leave"),
                Some((OWNER, "owner")),
                None,
            ),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"]["reason"], "insufficientRole");
    }

    #[tokio::test]
    async fn test_viewer_cannot_create_items_but_can_read() {
        let (app, _core, _tmp) = test_app().await;
        let list_id = create_list(&app, "Groceries").await;
        add_member(&app, &list_id, MEMBER).await;
        let items = format!("/api/shopping-lists/{list_id}/items");

        let (status, body) = send(
            &app,
            request(
                Method::POST,
                &items,
                Some((MEMBER, "viewer")),
                Some(json!({ "name": "Milk" })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"]["reason"], "insufficientRole");

        let (status, body) =
            send(&app, request(Method::GET, &items, Some((MEMBER, "viewer")), None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn test_item_lifecycle() {
        let (app, _core, _tmp) = test_app().await;
        let list_id = create_list(&app, "Groceries").await;
        add_member(&app, &list_id, MEMBER).await;
        let items = format!("/api/shopping-lists/{list_id}/items");
        let member = Some((MEMBER, "member"));

        let (status, item) = send(
            &app,
            request(
                Method::POST,
                &items,
                member,
                Some(json!({ "name": "Milk", "quantity": "2 l" })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(item["isDone"], false);
        let item_id = item["id"].as_str().unwrap().to_string();

        let (status, item) = send(
            &app,
            request(Method::POST, &format!("{items}/{item_id}/resolve"), member, None),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(item["isDone"], true);

        let (_, item) = send(
            &app,
            request(
                Method::PATCH,
                &format!("{items}/{item_id}"),
                member,
                Some(json!({ "name": "Oat milk" })),
            ),
        )
        .await;
        assert_eq!(item["name"], "Oat milk");
        assert_eq!(item["isDone"], true);

        let (status, ack) = send(
            &app,
            request(Method::DELETE, &format!("{items}/{item_id}"), member, None),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(ack["deletedId"], item_id.as_str());
    }

    #[tokio::test]
    async fn test_delete_list_acknowledges() {
        let (app, _core, _tmp) = test_app().await;
        let list_id = create_list(&app, "Groceries").await;
        let (status, body) = send(
            &app,
            request(
                Method::DELETE,
                &format!("/api/shopping-lists/{list_id}"),
                Some((OWNER, "owner")),
                None,
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "deletedId": list_id }));
    }

    #[tokio::test]
    async fn test_users_endpoints() {
        let (app, _core, _tmp) = test_app().await;
        let create = |name: &str| {
            request(
                Method::POST,
                "/api/users",
                None,
                Some(json!({ "name": name })),
            )
        };

        let (status, user) = send(&app, create("anna")).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(user["name"], "Anna");

        let (status, body) = send(&app, create("ANNA")).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"]["reason"], "userExists");

        let (status, body) = send(&app, create("R2D2")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["reason"], "invalidCharacters");

        let (_, body) = send(&app, request(Method::GET, "/api/users", None, None)).await;
        assert_eq!(body["users"].as_array().unwrap().len(), 1);

        let user_id = user["id"].as_str().unwrap();
        let (status, body) = send(
            &app,
            request(Method::DELETE, &format!("/api/users/{user_id}"), None, None),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "deleted": true }));
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let (app, _core, _tmp) = test_app().await;
        let (status, body) = send(&app, request(Method::GET, "/api/nope", None, None)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "notFound");
    }
}
