use axum::extract::State;
use axum::response::Response;
use serde::Serialize;

use crate::auth::AdminContext;
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::response::success;

#[derive(Debug, Serialize)]
pub struct AdminProfile {
    pub name: String,
    pub rollno: String,
    pub club: String,
}

/// Identity comes from the auth context, never from the request body.
pub async fn admin_profile(
    State(state): State<AppState>,
    ctx: AdminContext,
) -> Result<Response, AppError> {
    let user = state.store.find_user(ctx.admin_user_id).await?;
    let club = state.store.find_club(ctx.admin_club_id).await?;

    let (Some(user), Some(club)) = (user, club) else {
        return Err(AppError::NotFound("Admin or Club data not found".to_string()));
    };

    let profile = AdminProfile {
        name: user.name,
        rollno: user.rollno,
        club: club.name,
    };

    Ok(success(profile, "Admin profile fetched successfully"))
}
