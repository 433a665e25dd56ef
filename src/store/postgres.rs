use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::models::{Club, Event, NewEvent, User};
use crate::store::{ConvenorProfile, PastEventRecord, Store, WinnerEntry};
use crate::utils::error::AppError;

/// Postgres-backed store. All queries are bound at runtime against the
/// shared connection pool.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct ConvenorRow {
    event_id: Uuid,
    name: String,
    department: Option<String>,
    yearofstudy: Option<i32>,
}

#[derive(FromRow)]
struct WinnerRow {
    event_id: Uuid,
    position: i32,
    team_name: Option<String>,
}

#[derive(FromRow)]
struct RatingRow {
    event_id: Uuid,
    rating: Option<i32>,
}

#[derive(FromRow)]
struct CountRow {
    event_id: Uuid,
    n: i64,
}

#[async_trait]
impl Store for PgStore {
    async fn update_attendance(
        &self,
        event_id: Uuid,
        user_id: Uuid,
        is_present: bool,
    ) -> Result<u64, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE teammembers
            SET is_present = $3
            WHERE event_id = $1 AND user_id = $2
            "#,
        )
        .bind(event_id)
        .bind(user_id)
        .bind(is_present)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn find_event_by_name_date_venue(
        &self,
        name: &str,
        date: DateTime<Utc>,
        venue: &str,
    ) -> Result<Option<Uuid>, AppError> {
        let id = sqlx::query_scalar(
            r#"
            SELECT id FROM events
            WHERE name = $1 AND date = $2 AND venue = $3
            "#,
        )
        .bind(name)
        .bind(date)
        .bind(venue)
        .fetch_optional(&self.pool)
        .await?;

        Ok(id)
    }

    async fn find_users_by_rollnos(&self, rollnos: &[String]) -> Result<Vec<User>, AppError> {
        let lowered: Vec<String> = rollnos.iter().map(|r| r.to_lowercase()).collect();

        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, rollno, name, department, yearofstudy
            FROM users
            WHERE lower(rollno) = ANY($1)
            "#,
        )
        .bind(&lowered)
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    async fn find_user_by_rollno(&self, rollno: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, rollno, name, department, yearofstudy
            FROM users
            WHERE lower(rollno) = lower($1)
            "#,
        )
        .bind(rollno)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_user(&self, user_id: Uuid) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, rollno, name, department, yearofstudy
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_club(&self, club_id: Uuid) -> Result<Option<Club>, AppError> {
        let club = sqlx::query_as::<_, Club>(
            r#"
            SELECT id, name FROM clubs WHERE id = $1
            "#,
        )
        .bind(club_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(club)
    }

    async fn is_club_member(&self, user_id: Uuid, club_id: Uuid) -> Result<bool, AppError> {
        let found: Option<Uuid> = sqlx::query_scalar(
            r#"
            SELECT id FROM clubmembers
            WHERE user_id = $1 AND club_id = $2
            "#,
        )
        .bind(user_id)
        .bind(club_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(found.is_some())
    }

    async fn create_event(
        &self,
        event: &NewEvent,
        club_id: Uuid,
        convenor_user_ids: &[Uuid],
    ) -> Result<Uuid, AppError> {
        let mut tx = self.pool.begin().await?;

        let event_id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO events (
                name, about, date, event_type, event_category, venue,
                min_no_member, max_no_member, poster, chief_guest,
                exp_expense, tot_amt_allot_su, tot_amt_spt_dor, exp_no_aud,
                faculty_obs_desig, faculty_obs_dept
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            RETURNING id
            "#,
        )
        .bind(&event.name)
        .bind(&event.about)
        .bind(event.date)
        .bind(&event.event_type)
        .bind(&event.event_category)
        .bind(&event.venue)
        .bind(event.min_no_member)
        .bind(event.max_no_member)
        .bind(&event.poster)
        .bind(&event.chief_guest)
        .bind(event.exp_expense)
        .bind(event.tot_amt_allot_su)
        .bind(event.tot_amt_spt_dor)
        .bind(event.exp_no_aud)
        .bind(&event.faculty_obs_desig)
        .bind(&event.faculty_obs_dept)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO organizingclubs (event_id, club_id) VALUES ($1, $2)
            "#,
        )
        .bind(event_id)
        .bind(club_id)
        .execute(&mut *tx)
        .await?;

        for user_id in convenor_user_ids {
            sqlx::query(
                r#"
                INSERT INTO eventconvenors (event_id, user_id, club_id)
                VALUES ($1, $2, $3)
                "#,
            )
            .bind(event_id)
            .bind(user_id)
            .bind(club_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(event_id)
    }

    async fn insert_club_member(
        &self,
        user_id: Uuid,
        club_id: Uuid,
        role: &str,
        is_admin: bool,
    ) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO clubmembers (user_id, club_id, role, is_admin)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(user_id)
        .bind(club_id)
        .bind(role)
        .bind(is_admin)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn past_events(
        &self,
        club_id: Uuid,
        before: DateTime<Utc>,
    ) -> Result<Vec<PastEventRecord>, AppError> {
        let events = sqlx::query_as::<_, Event>(
            r#"
            SELECT e.*
            FROM events e
            JOIN organizingclubs oc ON oc.event_id = e.id
            WHERE oc.club_id = $1 AND e.date < $2
            ORDER BY e.date DESC
            "#,
        )
        .bind(club_id)
        .bind(before)
        .fetch_all(&self.pool)
        .await?;

        if events.is_empty() {
            return Ok(Vec::new());
        }

        let event_ids: Vec<Uuid> = events.iter().map(|e| e.id).collect();

        let convenor_rows = sqlx::query_as::<_, ConvenorRow>(
            r#"
            SELECT ec.event_id, u.name, u.department, u.yearofstudy
            FROM eventconvenors ec
            JOIN users u ON u.id = ec.user_id
            WHERE ec.event_id = ANY($1)
            "#,
        )
        .bind(&event_ids)
        .fetch_all(&self.pool)
        .await?;

        let winner_rows = sqlx::query_as::<_, WinnerRow>(
            r#"
            SELECT ew.event_id, ew.position, t.name AS team_name
            FROM eventwinners ew
            LEFT JOIN teams t ON t.id = ew.team_id
            WHERE ew.event_id = ANY($1)
            ORDER BY ew.position
            "#,
        )
        .bind(&event_ids)
        .fetch_all(&self.pool)
        .await?;

        let rating_rows = sqlx::query_as::<_, RatingRow>(
            r#"
            SELECT event_id, rating FROM feedback WHERE event_id = ANY($1)
            "#,
        )
        .bind(&event_ids)
        .fetch_all(&self.pool)
        .await?;

        let registration_rows = sqlx::query_as::<_, CountRow>(
            r#"
            SELECT event_id, COUNT(*) AS n
            FROM eventregistration
            WHERE event_id = ANY($1)
            GROUP BY event_id
            "#,
        )
        .bind(&event_ids)
        .fetch_all(&self.pool)
        .await?;

        let attendance_rows = sqlx::query_as::<_, CountRow>(
            r#"
            SELECT event_id, COUNT(*) AS n
            FROM teammembers
            WHERE event_id = ANY($1) AND is_present
            GROUP BY event_id
            "#,
        )
        .bind(&event_ids)
        .fetch_all(&self.pool)
        .await?;

        let mut convenors: HashMap<Uuid, Vec<ConvenorProfile>> = HashMap::new();
        for row in convenor_rows {
            convenors.entry(row.event_id).or_default().push(ConvenorProfile {
                name: row.name,
                department: row.department,
                yearofstudy: row.yearofstudy,
            });
        }

        let mut winners: HashMap<Uuid, Vec<WinnerEntry>> = HashMap::new();
        for row in winner_rows {
            winners.entry(row.event_id).or_default().push(WinnerEntry {
                position: row.position,
                team_name: row.team_name,
            });
        }

        let mut ratings: HashMap<Uuid, Vec<Option<i32>>> = HashMap::new();
        for row in rating_rows {
            ratings.entry(row.event_id).or_default().push(row.rating);
        }

        let registrations: HashMap<Uuid, i64> = registration_rows
            .into_iter()
            .map(|row| (row.event_id, row.n))
            .collect();

        let attendance: HashMap<Uuid, i64> = attendance_rows
            .into_iter()
            .map(|row| (row.event_id, row.n))
            .collect();

        let records = events
            .into_iter()
            .map(|event| {
                let id = event.id;
                PastEventRecord {
                    event,
                    convenors: convenors.remove(&id).unwrap_or_default(),
                    winners: winners.remove(&id).unwrap_or_default(),
                    ratings: ratings.remove(&id).unwrap_or_default(),
                    registered_teams: registrations.get(&id).copied().unwrap_or(0) as u64,
                    attendance: attendance.get(&id).copied().unwrap_or(0) as u64,
                }
            })
            .collect();

        Ok(records)
    }
}
