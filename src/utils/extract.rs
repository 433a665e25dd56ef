use async_trait::async_trait;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;

use crate::utils::error::AppError;

/// JSON body extractor that reports malformed bodies through the standard
/// error envelope. A wrong-shaped body (non-list where a list is expected,
/// wrong-typed field) is a validation failure, so it must surface as 400,
/// not as the stock extractor's 422.
pub struct Json<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for Json<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match axum::Json::<T>::from_request(req, state).await {
            Ok(axum::Json(value)) => Ok(Json(value)),
            Err(rejection) => Err(AppError::ValidationError(rejection.body_text())),
        }
    }
}
