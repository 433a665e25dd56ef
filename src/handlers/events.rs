use axum::extract::{Query, State};
use axum::response::Response;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::NewEvent;
use crate::state::AppState;
use crate::store::{ConvenorProfile, PastEventRecord, WinnerEntry};
use crate::utils::error::AppError;
use crate::utils::extract::Json;
use crate::utils::response::{created, success};

/// At most this many convenors per event; extra entries are dropped.
const MAX_CONVENORS: usize = 3;

#[derive(Debug, Deserialize)]
pub struct CreateEventRequest {
    pub name: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub event_type: Option<String>,
    pub event_category: Option<String>,
    pub min_no_member: Option<i32>,
    pub max_no_member: Option<i32>,
    pub club_id: Option<Uuid>,
    pub venue: Option<String>,
    pub about: Option<String>,
    pub poster: Option<String>,
    pub chief_guest: Option<String>,
    pub exp_expense: Option<Decimal>,
    pub tot_amt_allot_su: Option<Decimal>,
    pub tot_amt_spt_dor: Option<Decimal>,
    pub exp_no_aud: Option<i32>,
    pub faculty_obs_desig: Option<String>,
    pub faculty_obs_dept: Option<String>,
    #[serde(rename = "eventConvenors", default)]
    pub event_convenors: Vec<String>,
}

pub async fn create_event(
    State(state): State<AppState>,
    Json(body): Json<CreateEventRequest>,
) -> Result<Response, AppError> {
    let (
        Some(name),
        Some(date),
        Some(event_type),
        Some(event_category),
        Some(min_no_member),
        Some(max_no_member),
        Some(club_id),
        Some(venue),
        Some(about),
    ) = (
        body.name,
        body.date,
        body.event_type,
        body.event_category,
        body.min_no_member,
        body.max_no_member,
        body.club_id,
        body.venue,
        body.about,
    )
    else {
        return Err(AppError::ValidationError(
            "Missing required fields.".to_string(),
        ));
    };

    if state
        .store
        .find_event_by_name_date_venue(&name, date, &venue)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict(
            "Event already exists with the same name, date, and venue.".to_string(),
        ));
    }

    // Single resolution pass: unknown roll numbers abort the whole request,
    // known users who are not club members only produce a warning later.
    let requested: Vec<String> = body
        .event_convenors
        .into_iter()
        .take(MAX_CONVENORS)
        .collect();

    let mut convenor_ids = Vec::new();
    let mut non_members = Vec::new();

    if !requested.is_empty() {
        let users = state.store.find_users_by_rollnos(&requested).await?;

        let missing: Vec<&str> = requested
            .iter()
            .filter(|rollno| !users.iter().any(|u| u.rollno.eq_ignore_ascii_case(rollno)))
            .map(String::as_str)
            .collect();

        if !missing.is_empty() {
            return Err(AppError::ValidationError(format!(
                "Event creation failed. The following users could not be added as convenors \
                 because they don't exist in the database: {}",
                missing.join(", ")
            )));
        }

        for user in users {
            if state.store.is_club_member(user.id, club_id).await? {
                convenor_ids.push(user.id);
            } else {
                non_members.push(user.rollno);
            }
        }
    }

    let new_event = NewEvent {
        name,
        about,
        date,
        event_type,
        event_category,
        venue,
        min_no_member,
        max_no_member,
        poster: body.poster,
        chief_guest: body.chief_guest,
        exp_expense: body.exp_expense,
        tot_amt_allot_su: body.tot_amt_allot_su,
        tot_amt_spt_dor: body.tot_amt_spt_dor,
        exp_no_aud: body.exp_no_aud,
        faculty_obs_desig: body.faculty_obs_desig,
        faculty_obs_dept: body.faculty_obs_dept,
    };

    state
        .store
        .create_event(&new_event, club_id, &convenor_ids)
        .await?;

    if non_members.is_empty() {
        Ok(created("Event created successfully."))
    } else {
        Ok(created(format!(
            "Event created successfully, but the following users could not be added as \
             convenors because they are not members of the club: {}",
            non_members.join(", ")
        )))
    }
}

#[derive(Debug, Deserialize)]
pub struct PastEventsQuery {
    pub club_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct PastEventSummary {
    pub name: String,
    pub about: String,
    pub date: DateTime<Utc>,
    pub event_type: String,
    pub event_category: String,
    #[serde(rename = "eventConvenors")]
    pub event_convenors: Vec<ConvenorProfile>,
    #[serde(rename = "eventWinners")]
    pub event_winners: Vec<WinnerEntry>,
    pub average_rating: f64,
    pub total_registered_teams: u64,
    pub total_attendance: u64,
}

pub async fn past_events(
    State(state): State<AppState>,
    Query(query): Query<PastEventsQuery>,
) -> Result<Response, AppError> {
    let club_id = query
        .club_id
        .ok_or_else(|| AppError::ValidationError("Club ID is required.".to_string()))?;

    let records = state.store.past_events(club_id, Utc::now()).await?;
    let data: Vec<PastEventSummary> = records.into_iter().map(summarize).collect();

    Ok(success(data, "Past events details retrieved successfully."))
}

fn summarize(record: PastEventRecord) -> PastEventSummary {
    let average_rating = average_rating(&record.ratings);
    PastEventSummary {
        name: record.event.name,
        about: record.event.about,
        date: record.event.date,
        event_type: record.event.event_type,
        event_category: record.event.event_category,
        event_convenors: record.convenors,
        event_winners: record.winners,
        average_rating,
        total_registered_teams: record.registered_teams,
        total_attendance: record.attendance,
    }
}

/// Mean of all feedback ratings, counting a missing rating as 0, rounded to
/// two decimal places. Zero when there is no feedback at all.
fn average_rating(ratings: &[Option<i32>]) -> f64 {
    if ratings.is_empty() {
        return 0.0;
    }
    let sum: i64 = ratings.iter().map(|r| i64::from(r.unwrap_or(0))).sum();
    let mean = sum as f64 / ratings.len() as f64;
    (mean * 100.0).round() / 100.0
}
