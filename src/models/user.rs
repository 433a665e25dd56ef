use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A student account. Roll numbers are stored lowercase and compared
/// case-insensitively everywhere.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub rollno: String,
    pub name: String,
    pub department: Option<String>,
    pub yearofstudy: Option<i32>,
}
