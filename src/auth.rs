//! Acting-admin context. Verification happens upstream (gateway/session
//! layer); this middleware only recovers the identity it forwarded in the
//! `x-admin-user-id` and `x-admin-club-id` headers and stores it in the
//! request extensions for the extractor below.

use async_trait::async_trait;
use axum::extract::{FromRequestParts, Request};
use axum::http::request::Parts;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use uuid::Uuid;

use crate::utils::error::AppError;

pub const ADMIN_USER_HEADER: &str = "x-admin-user-id";
pub const ADMIN_CLUB_HEADER: &str = "x-admin-club-id";

/// Identity of the admin on whose behalf a request runs. Never read from
/// the request body.
#[derive(Debug, Clone, Copy)]
pub struct AdminContext {
    pub admin_user_id: Uuid,
    pub admin_club_id: Uuid,
}

/// Non-blocking: requests without a valid context pass through and are
/// rejected later, by the extractor, only on routes that need it.
pub async fn admin_context_middleware(mut request: Request, next: Next) -> Response {
    if let Some(ctx) = context_from_headers(request.headers()) {
        request.extensions_mut().insert(ctx);
    }
    next.run(request).await
}

fn context_from_headers(headers: &HeaderMap) -> Option<AdminContext> {
    let admin_user_id = parse_uuid_header(headers, ADMIN_USER_HEADER)?;
    let admin_club_id = parse_uuid_header(headers, ADMIN_CLUB_HEADER)?;
    Some(AdminContext {
        admin_user_id,
        admin_club_id,
    })
}

fn parse_uuid_header(headers: &HeaderMap, name: &str) -> Option<Uuid> {
    headers.get(name)?.to_str().ok()?.parse().ok()
}

#[async_trait]
impl<S> FromRequestParts<S> for AdminContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AdminContext>()
            .copied()
            .ok_or_else(|| AppError::AuthError("Admin session required".to_string()))
    }
}
