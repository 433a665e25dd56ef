use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Team {
    pub id: Uuid,
    pub event_id: Uuid,
    pub name: String,
}

/// Team roster entry; attendance lives here as the `is_present` flag and is
/// only ever updated, never created, by the handlers in this crate.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TeamMember {
    pub id: Uuid,
    pub team_id: Uuid,
    pub event_id: Uuid,
    pub user_id: Uuid,
    pub is_present: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EventRegistration {
    pub id: Uuid,
    pub event_id: Uuid,
    pub team_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EventWinner {
    pub id: Uuid,
    pub event_id: Uuid,
    pub team_id: Uuid,
    pub position: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Feedback {
    pub id: Uuid,
    pub event_id: Uuid,
    pub user_id: Uuid,
    pub rating: Option<i32>,
}
