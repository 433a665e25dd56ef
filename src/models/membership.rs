use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A (user, club) membership. At most one row per pair; duplicates are
/// rejected, never merged.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ClubMember {
    pub id: Uuid,
    pub user_id: Uuid,
    pub club_id: Uuid,
    pub role: String,
    pub is_admin: bool,
}

/// Links an event to the club that runs it. Exactly one per event in the
/// creation flow handled here.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OrganizingClub {
    pub id: Uuid,
    pub event_id: Uuid,
    pub club_id: Uuid,
}

/// A club member designated as organizer/contact for one event.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EventConvenor {
    pub id: Uuid,
    pub event_id: Uuid,
    pub user_id: Uuid,
    pub club_id: Uuid,
}
