use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::{Club, Event, NewEvent, User};
use crate::utils::error::AppError;

pub mod postgres;

#[cfg(test)]
pub mod memory;

pub use postgres::PgStore;

/// Convenor projection joined from the users table for past-event reports.
#[derive(Debug, Clone, Serialize)]
pub struct ConvenorProfile {
    pub name: String,
    pub department: Option<String>,
    pub yearofstudy: Option<i32>,
}

/// Winner projection joined with the winning team's name.
#[derive(Debug, Clone, Serialize)]
pub struct WinnerEntry {
    pub position: i32,
    pub team_name: Option<String>,
}

/// One past event together with everything the report needs: joined
/// relations still in raw form, aggregation happens in the handler.
#[derive(Debug, Clone)]
pub struct PastEventRecord {
    pub event: Event,
    pub convenors: Vec<ConvenorProfile>,
    pub winners: Vec<WinnerEntry>,
    /// One entry per feedback row; a row may carry no rating.
    pub ratings: Vec<Option<i32>>,
    pub registered_teams: u64,
    pub attendance: u64,
}

/// Persistence operations the handlers depend on. `PgStore` is the
/// production implementation; tests swap in an in-memory one.
#[async_trait]
pub trait Store: Send + Sync {
    /// Sets `is_present` on every attendance record for the (event, user)
    /// pair and returns how many rows were touched.
    async fn update_attendance(
        &self,
        event_id: Uuid,
        user_id: Uuid,
        is_present: bool,
    ) -> Result<u64, AppError>;

    /// Point lookup on the (name, date, venue) uniqueness triple.
    async fn find_event_by_name_date_venue(
        &self,
        name: &str,
        date: DateTime<Utc>,
        venue: &str,
    ) -> Result<Option<Uuid>, AppError>;

    /// Resolves roll numbers to users, matching case-insensitively.
    /// Roll numbers with no matching user are simply absent from the result.
    async fn find_users_by_rollnos(&self, rollnos: &[String]) -> Result<Vec<User>, AppError>;

    async fn find_user_by_rollno(&self, rollno: &str) -> Result<Option<User>, AppError>;

    async fn find_user(&self, user_id: Uuid) -> Result<Option<User>, AppError>;

    async fn find_club(&self, club_id: Uuid) -> Result<Option<Club>, AppError>;

    async fn is_club_member(&self, user_id: Uuid, club_id: Uuid) -> Result<bool, AppError>;

    /// Inserts the event, its organizing-club link, and one convenor row per
    /// user id, all inside a single transaction. Returns the new event id.
    async fn create_event(
        &self,
        event: &NewEvent,
        club_id: Uuid,
        convenor_user_ids: &[Uuid],
    ) -> Result<Uuid, AppError>;

    async fn insert_club_member(
        &self,
        user_id: Uuid,
        club_id: Uuid,
        role: &str,
        is_admin: bool,
    ) -> Result<(), AppError>;

    /// Events organized by the club with `date` strictly before `before`,
    /// joined with convenors, winners, feedback, registrations and rosters.
    async fn past_events(
        &self,
        club_id: Uuid,
        before: DateTime<Utc>,
    ) -> Result<Vec<PastEventRecord>, AppError>;
}
