use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use shoplist_core::{ShopError, services::Payload};

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: &'static str,
    pub reason: Option<&'static str>,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            reason: None,
            message: message.into(),
        }
    }
}

/// Turn an extracted JSON body into a service payload. Bodies that fail to
/// decode become `invalidBody`.
pub fn decode_body<T>(body: Result<Json<T>, JsonRejection>) -> Payload<T> {
    body.map(|Json(value)| value)
        .map_err(|rejection| ShopError::invalid_input("invalidBody", rejection.body_text()))
}

fn status_for(err: &ShopError) -> StatusCode {
    match err {
        ShopError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
        ShopError::Forbidden(_) => StatusCode::FORBIDDEN,
        ShopError::NotFound { .. } => StatusCode::NOT_FOUND,
        ShopError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
        ShopError::Conflict { .. } => StatusCode::CONFLICT,
        ShopError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<ShopError> for ApiError {
    fn from(err: ShopError) -> Self {
        if let ShopError::Storage(inner) = &err {
            tracing::error!(error = %format!("{inner:#}"), "Storage failure");
        }
        Self {
            status: status_for(&err),
            code: err.code(),
            reason: err.reason(),
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut error = json!({
            "code": self.code,
            "message": self.message,
        });
        if let Some(reason) = self.reason {
            error["reason"] = json!(reason);
        }
        (self.status, Json(json!({ "error": error }))).into_response()
    }
}
