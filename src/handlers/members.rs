use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::AdminContext;
use crate::state::AppState;
use crate::store::Store;
use crate::utils::error::AppError;
use crate::utils::extract::Json;
use crate::utils::response::{empty_success, error, success};

const DEFAULT_ROLE: &str = "Member";

#[derive(Debug, Deserialize)]
pub struct BulkAddRequest {
    pub members: Option<Vec<MemberInput>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MemberInput {
    pub rollno: Option<String>,
    pub role: Option<String>,
}

#[derive(Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueStatus {
    Failed,
    Skipped,
}

#[derive(Debug, Serialize)]
pub struct MemberIssue {
    pub rollno: String,
    pub status: IssueStatus,
    pub message: String,
}

#[derive(Debug)]
pub enum MemberOutcome {
    Added,
    Issue(MemberIssue),
}

#[derive(Serialize)]
struct BulkAddIssues {
    errors: Vec<MemberIssue>,
}

pub async fn add_club_members(
    State(state): State<AppState>,
    ctx: AdminContext,
    Json(body): Json<BulkAddRequest>,
) -> Result<Response, AppError> {
    let members = body.members.unwrap_or_default();
    if members.is_empty() {
        return Err(AppError::ValidationError(
            "Members array is required and cannot be empty".to_string(),
        ));
    }

    // Items are processed strictly in order; a later duplicate of an earlier
    // roll number observes the earlier insert and is skipped.
    let mut added = 0usize;
    let mut issues = Vec::new();
    for member in members {
        match process_member(state.store.as_ref(), ctx.admin_club_id, member).await {
            MemberOutcome::Added => added += 1,
            MemberOutcome::Issue(issue) => issues.push(issue),
        }
    }

    Ok(report(added, issues))
}

/// One member's outcome never influences another's; store failures become a
/// per-item error instead of aborting the batch.
async fn process_member(store: &dyn Store, club_id: Uuid, member: MemberInput) -> MemberOutcome {
    let Some(rollno) = member.rollno.filter(|r| !r.is_empty()) else {
        return MemberOutcome::Issue(MemberIssue {
            rollno: "undefined".to_string(),
            status: IssueStatus::Failed,
            message: "Roll number is required".to_string(),
        });
    };

    let user = match store.find_user_by_rollno(&rollno).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return MemberOutcome::Issue(MemberIssue {
                rollno,
                status: IssueStatus::Failed,
                message: "User not found".to_string(),
            })
        }
        Err(err) => return store_failure(rollno, err),
    };

    match store.is_club_member(user.id, club_id).await {
        Ok(true) => {
            return MemberOutcome::Issue(MemberIssue {
                rollno,
                status: IssueStatus::Skipped,
                message: "User is already a member of this club".to_string(),
            })
        }
        Ok(false) => {}
        Err(err) => return store_failure(rollno, err),
    }

    let role = member.role.unwrap_or_else(|| DEFAULT_ROLE.to_string());
    match store.insert_club_member(user.id, club_id, &role, false).await {
        Ok(()) => MemberOutcome::Added,
        Err(err) => store_failure(rollno, err),
    }
}

fn store_failure(rollno: String, err: AppError) -> MemberOutcome {
    tracing::error!(error = ?err, rollno = %rollno, "Failed to process club member");
    MemberOutcome::Issue(MemberIssue {
        rollno,
        status: IssueStatus::Failed,
        message: "Error processing this member".to_string(),
    })
}

fn report(added: usize, issues: Vec<MemberIssue>) -> Response {
    match (added, issues.is_empty()) {
        (0, true) => empty_success("No action taken"),
        (_, true) => empty_success("Members added successfully"),
        (0, false) => error(
            "VALIDATION_ERROR",
            "Failed to add members",
            serde_json::to_value(BulkAddIssues { errors: issues }).ok(),
            StatusCode::BAD_REQUEST,
        ),
        (n, false) => success(
            BulkAddIssues { errors: issues },
            format!("{n} members added successfully, but some issues were encountered"),
        ),
    }
}
