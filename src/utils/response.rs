use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::Value;

#[derive(Serialize)]
pub struct ApiResponse<T>
where
    T: Serialize,
{
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
}

#[derive(Serialize)]
pub struct ApiErrorBody {
    pub code: String,
    pub message: String,
    pub details: Option<Value>,
}

#[derive(Serialize)]
pub struct ApiErrorResponse {
    pub success: bool,
    pub error: ApiErrorBody,
}

fn envelope<T>(data: Option<T>, message: impl Into<String>, status: StatusCode) -> Response
where
    T: Serialize,
{
    let body = ApiResponse {
        success: true,
        data,
        message: Some(message.into()),
    };
    (status, Json(body)).into_response()
}

pub fn success<T>(data: T, message: impl Into<String>) -> Response
where
    T: Serialize,
{
    envelope(Some(data), message, StatusCode::OK)
}

pub fn empty_success(message: impl Into<String>) -> Response {
    envelope::<()>(None, message, StatusCode::OK)
}

/// 201 envelope for handlers that create a resource.
pub fn created(message: impl Into<String>) -> Response {
    envelope::<()>(None, message, StatusCode::CREATED)
}

pub fn error(
    code: &str,
    message: impl Into<String>,
    details: Option<Value>,
    status: StatusCode,
) -> Response {
    let body = ApiErrorResponse {
        success: false,
        error: ApiErrorBody {
            code: code.to_string(),
            message: message.into(),
            details,
        },
    };

    (status, Json(body)).into_response()
}
