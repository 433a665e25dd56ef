//! In-memory `Store` used by handler tests. Rows live in plain vectors
//! behind a mutex; lookups mirror the SQL the Postgres store runs.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::{
    Club, ClubMember, Event, EventConvenor, EventRegistration, EventWinner, Feedback, NewEvent,
    OrganizingClub, Team, TeamMember, User,
};
use crate::store::{ConvenorProfile, PastEventRecord, Store, WinnerEntry};
use crate::utils::error::AppError;

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    clubs: Vec<Club>,
    members: Vec<ClubMember>,
    events: Vec<Event>,
    organizing: Vec<OrganizingClub>,
    convenors: Vec<EventConvenor>,
    teams: Vec<Team>,
    team_members: Vec<TeamMember>,
    registrations: Vec<EventRegistration>,
    winners: Vec<EventWinner>,
    feedback: Vec<Feedback>,
}

#[derive(Default)]
pub struct MemStore {
    tables: Mutex<Tables>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_user(&self, rollno: &str, name: &str) -> Uuid {
        let id = Uuid::new_v4();
        self.tables.lock().unwrap().users.push(User {
            id,
            rollno: rollno.to_lowercase(),
            name: name.to_string(),
            department: Some("CSE".to_string()),
            yearofstudy: Some(3),
        });
        id
    }

    pub fn add_club(&self, name: &str) -> Uuid {
        let id = Uuid::new_v4();
        self.tables.lock().unwrap().clubs.push(Club {
            id,
            name: name.to_string(),
        });
        id
    }

    pub fn add_member(&self, user_id: Uuid, club_id: Uuid) {
        self.tables.lock().unwrap().members.push(ClubMember {
            id: Uuid::new_v4(),
            user_id,
            club_id,
            role: "Member".to_string(),
            is_admin: false,
        });
    }

    pub fn add_event(&self, club_id: Uuid, name: &str, date: DateTime<Utc>, venue: &str) -> Uuid {
        let id = Uuid::new_v4();
        let mut tables = self.tables.lock().unwrap();
        tables.events.push(Event {
            id,
            name: name.to_string(),
            about: "about".to_string(),
            date,
            event_type: "Technical".to_string(),
            event_category: "Team".to_string(),
            venue: venue.to_string(),
            min_no_member: 1,
            max_no_member: 4,
            poster: None,
            chief_guest: None,
            exp_expense: None,
            tot_amt_allot_su: None,
            tot_amt_spt_dor: None,
            exp_no_aud: None,
            faculty_obs_desig: None,
            faculty_obs_dept: None,
        });
        tables.organizing.push(OrganizingClub {
            id: Uuid::new_v4(),
            event_id: id,
            club_id,
        });
        id
    }

    pub fn add_convenor(&self, event_id: Uuid, user_id: Uuid, club_id: Uuid) {
        self.tables.lock().unwrap().convenors.push(EventConvenor {
            id: Uuid::new_v4(),
            event_id,
            user_id,
            club_id,
        });
    }

    pub fn add_team(&self, event_id: Uuid, name: &str) -> Uuid {
        let id = Uuid::new_v4();
        self.tables.lock().unwrap().teams.push(Team {
            id,
            event_id,
            name: name.to_string(),
        });
        id
    }

    pub fn add_team_member(&self, team_id: Uuid, event_id: Uuid, user_id: Uuid, is_present: bool) {
        self.tables.lock().unwrap().team_members.push(TeamMember {
            id: Uuid::new_v4(),
            team_id,
            event_id,
            user_id,
            is_present,
        });
    }

    pub fn add_registration(&self, event_id: Uuid, team_id: Uuid) {
        self.tables.lock().unwrap().registrations.push(EventRegistration {
            id: Uuid::new_v4(),
            event_id,
            team_id,
        });
    }

    pub fn add_winner(&self, event_id: Uuid, team_id: Uuid, position: i32) {
        self.tables.lock().unwrap().winners.push(EventWinner {
            id: Uuid::new_v4(),
            event_id,
            team_id,
            position,
        });
    }

    pub fn add_feedback(&self, event_id: Uuid, rating: Option<i32>) {
        let user_id = Uuid::new_v4();
        self.tables.lock().unwrap().feedback.push(Feedback {
            id: Uuid::new_v4(),
            event_id,
            user_id,
            rating,
        });
    }

    pub fn event_count(&self) -> usize {
        self.tables.lock().unwrap().events.len()
    }

    pub fn event_ids(&self) -> Vec<Uuid> {
        self.tables.lock().unwrap().events.iter().map(|e| e.id).collect()
    }

    pub fn member_count(&self) -> usize {
        self.tables.lock().unwrap().members.len()
    }

    pub fn convenors_for(&self, event_id: Uuid) -> Vec<Uuid> {
        self.tables
            .lock()
            .unwrap()
            .convenors
            .iter()
            .filter(|c| c.event_id == event_id)
            .map(|c| c.user_id)
            .collect()
    }

    pub fn attendance_of(&self, event_id: Uuid, user_id: Uuid) -> Vec<bool> {
        self.tables
            .lock()
            .unwrap()
            .team_members
            .iter()
            .filter(|m| m.event_id == event_id && m.user_id == user_id)
            .map(|m| m.is_present)
            .collect()
    }

    pub fn member_role(&self, user_id: Uuid, club_id: Uuid) -> Option<String> {
        self.tables
            .lock()
            .unwrap()
            .members
            .iter()
            .find(|m| m.user_id == user_id && m.club_id == club_id)
            .map(|m| m.role.clone())
    }
}

#[async_trait]
impl Store for MemStore {
    async fn update_attendance(
        &self,
        event_id: Uuid,
        user_id: Uuid,
        is_present: bool,
    ) -> Result<u64, AppError> {
        let mut tables = self.tables.lock().unwrap();
        let mut touched = 0;
        for member in tables
            .team_members
            .iter_mut()
            .filter(|m| m.event_id == event_id && m.user_id == user_id)
        {
            member.is_present = is_present;
            touched += 1;
        }
        Ok(touched)
    }

    async fn find_event_by_name_date_venue(
        &self,
        name: &str,
        date: DateTime<Utc>,
        venue: &str,
    ) -> Result<Option<Uuid>, AppError> {
        Ok(self
            .tables
            .lock()
            .unwrap()
            .events
            .iter()
            .find(|e| e.name == name && e.date == date && e.venue == venue)
            .map(|e| e.id))
    }

    async fn find_users_by_rollnos(&self, rollnos: &[String]) -> Result<Vec<User>, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .users
            .iter()
            .filter(|u| rollnos.iter().any(|r| r.eq_ignore_ascii_case(&u.rollno)))
            .cloned()
            .collect())
    }

    async fn find_user_by_rollno(&self, rollno: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .tables
            .lock()
            .unwrap()
            .users
            .iter()
            .find(|u| u.rollno.eq_ignore_ascii_case(rollno))
            .cloned())
    }

    async fn find_user(&self, user_id: Uuid) -> Result<Option<User>, AppError> {
        Ok(self
            .tables
            .lock()
            .unwrap()
            .users
            .iter()
            .find(|u| u.id == user_id)
            .cloned())
    }

    async fn find_club(&self, club_id: Uuid) -> Result<Option<Club>, AppError> {
        Ok(self
            .tables
            .lock()
            .unwrap()
            .clubs
            .iter()
            .find(|c| c.id == club_id)
            .cloned())
    }

    async fn is_club_member(&self, user_id: Uuid, club_id: Uuid) -> Result<bool, AppError> {
        Ok(self
            .tables
            .lock()
            .unwrap()
            .members
            .iter()
            .any(|m| m.user_id == user_id && m.club_id == club_id))
    }

    async fn create_event(
        &self,
        event: &NewEvent,
        club_id: Uuid,
        convenor_user_ids: &[Uuid],
    ) -> Result<Uuid, AppError> {
        let mut tables = self.tables.lock().unwrap();
        if tables
            .events
            .iter()
            .any(|e| e.name == event.name && e.date == event.date && e.venue == event.venue)
        {
            // Mirrors the unique constraint on (name, date, venue).
            return Err(AppError::InternalServerError(
                "duplicate event for name, date and venue".to_string(),
            ));
        }
        let event_id = Uuid::new_v4();
        tables.events.push(Event {
            id: event_id,
            name: event.name.clone(),
            about: event.about.clone(),
            date: event.date,
            event_type: event.event_type.clone(),
            event_category: event.event_category.clone(),
            venue: event.venue.clone(),
            min_no_member: event.min_no_member,
            max_no_member: event.max_no_member,
            poster: event.poster.clone(),
            chief_guest: event.chief_guest.clone(),
            exp_expense: event.exp_expense,
            tot_amt_allot_su: event.tot_amt_allot_su,
            tot_amt_spt_dor: event.tot_amt_spt_dor,
            exp_no_aud: event.exp_no_aud,
            faculty_obs_desig: event.faculty_obs_desig.clone(),
            faculty_obs_dept: event.faculty_obs_dept.clone(),
        });
        tables.organizing.push(OrganizingClub {
            id: Uuid::new_v4(),
            event_id,
            club_id,
        });
        for user_id in convenor_user_ids {
            tables.convenors.push(EventConvenor {
                id: Uuid::new_v4(),
                event_id,
                user_id: *user_id,
                club_id,
            });
        }
        Ok(event_id)
    }

    async fn insert_club_member(
        &self,
        user_id: Uuid,
        club_id: Uuid,
        role: &str,
        is_admin: bool,
    ) -> Result<(), AppError> {
        let mut tables = self.tables.lock().unwrap();
        if tables
            .members
            .iter()
            .any(|m| m.user_id == user_id && m.club_id == club_id)
        {
            // Mirrors the unique constraint on (user_id, club_id).
            return Err(AppError::InternalServerError(
                "duplicate club membership".to_string(),
            ));
        }
        tables.members.push(ClubMember {
            id: Uuid::new_v4(),
            user_id,
            club_id,
            role: role.to_string(),
            is_admin,
        });
        Ok(())
    }

    async fn past_events(
        &self,
        club_id: Uuid,
        before: DateTime<Utc>,
    ) -> Result<Vec<PastEventRecord>, AppError> {
        let tables = self.tables.lock().unwrap();
        let mut records = Vec::new();
        for event in tables.events.iter().filter(|e| {
            e.date < before
                && tables
                    .organizing
                    .iter()
                    .any(|oc| oc.event_id == e.id && oc.club_id == club_id)
        }) {
            let convenors = tables
                .convenors
                .iter()
                .filter(|c| c.event_id == event.id)
                .filter_map(|c| tables.users.iter().find(|u| u.id == c.user_id))
                .map(|u| ConvenorProfile {
                    name: u.name.clone(),
                    department: u.department.clone(),
                    yearofstudy: u.yearofstudy,
                })
                .collect();

            let winners = tables
                .winners
                .iter()
                .filter(|w| w.event_id == event.id)
                .map(|w| WinnerEntry {
                    position: w.position,
                    team_name: tables
                        .teams
                        .iter()
                        .find(|t| t.id == w.team_id)
                        .map(|t| t.name.clone()),
                })
                .collect();

            let ratings = tables
                .feedback
                .iter()
                .filter(|f| f.event_id == event.id)
                .map(|f| f.rating)
                .collect();

            let registered_teams = tables
                .registrations
                .iter()
                .filter(|r| r.event_id == event.id)
                .count() as u64;

            let attendance = tables
                .team_members
                .iter()
                .filter(|m| m.event_id == event.id && m.is_present)
                .count() as u64;

            records.push(PastEventRecord {
                event: event.clone(),
                convenors,
                winners,
                ratings,
                registered_teams,
                attendance,
            });
        }
        Ok(records)
    }
}
