use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Event {
    pub id: Uuid,
    pub name: String,
    pub about: String,
    pub date: DateTime<Utc>,
    pub event_type: String,
    pub event_category: String,
    pub venue: String,
    pub min_no_member: i32,
    pub max_no_member: i32,
    pub poster: Option<String>,
    pub chief_guest: Option<String>,
    pub exp_expense: Option<Decimal>,
    pub tot_amt_allot_su: Option<Decimal>,
    pub tot_amt_spt_dor: Option<Decimal>,
    pub exp_no_aud: Option<i32>,
    pub faculty_obs_desig: Option<String>,
    pub faculty_obs_dept: Option<String>,
}

/// Column values for an event row about to be inserted.
#[derive(Debug, Clone)]
pub struct NewEvent {
    pub name: String,
    pub about: String,
    pub date: DateTime<Utc>,
    pub event_type: String,
    pub event_category: String,
    pub venue: String,
    pub min_no_member: i32,
    pub max_no_member: i32,
    pub poster: Option<String>,
    pub chief_guest: Option<String>,
    pub exp_expense: Option<Decimal>,
    pub tot_amt_allot_su: Option<Decimal>,
    pub tot_amt_spt_dor: Option<Decimal>,
    pub exp_no_aud: Option<i32>,
    pub faculty_obs_desig: Option<String>,
    pub faculty_obs_dept: Option<String>,
}
