use axum::extract::State;
use axum::response::Response;
use serde::Deserialize;
use uuid::Uuid;

use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::extract::Json;
use crate::utils::response::empty_success;

/// All three fields are mandatory, but `false` is a legal presence value,
/// so each one is an `Option` and checked for absence explicitly.
#[derive(Debug, Deserialize)]
pub struct AttendanceUpdate {
    pub event_id: Option<Uuid>,
    pub user_id: Option<Uuid>,
    pub is_present: Option<bool>,
}

pub async fn update_attendance(
    State(state): State<AppState>,
    Json(body): Json<AttendanceUpdate>,
) -> Result<Response, AppError> {
    let (event_id, user_id, is_present) = match (body.event_id, body.user_id, body.is_present) {
        (Some(event_id), Some(user_id), Some(is_present)) => (event_id, user_id, is_present),
        _ => {
            return Err(AppError::ValidationError(
                "Required fields missing: event_id, user_id, and is_present are required"
                    .to_string(),
            ))
        }
    };

    let touched = state
        .store
        .update_attendance(event_id, user_id, is_present)
        .await?;

    if touched == 0 {
        return Err(AppError::NotFound(
            "No record found for matching event_id and user_id".to_string(),
        ));
    }

    Ok(empty_success(
        "Attendance updated successfully for the given user_id and event_id",
    ))
}
