use crate::api::ApiError;
use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use shoplist_core::{ShopError, auth::resolve_identity};

/// Resolve the caller from request headers and expose it as an
/// `Extension<Principal>` to downstream handlers.
pub async fn require_identity(mut req: Request, next: Next) -> Response {
    match resolve_identity(req.headers()) {
        Ok(principal) => {
            tracing::debug!(user_id = %principal.user_id, role = %principal.role, "Identity resolved");
            req.extensions_mut().insert(principal);
            next.run(req).await
        }
        Err(err) => {
            tracing::warn!(error = %err, path = %req.uri().path(), "Rejected request without identity");
            ApiError::from(ShopError::from(err)).into_response()
        }
    }
}
