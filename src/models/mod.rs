pub mod club;
pub mod event;
pub mod membership;
pub mod team;
pub mod user;

pub use club::Club;
pub use event::{Event, NewEvent};
pub use membership::{ClubMember, EventConvenor, OrganizingClub};
pub use team::{EventRegistration, EventWinner, Feedback, Team, TeamMember};
pub use user::User;
