//! Counseling session model and status.
//!
//! Sessions originate from the external schedule collaborator; the engine
//! only ever reads them to count completed work within a pay period.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The lifecycle status of a counseling session.
///
/// Only [`SessionStatus::Completed`] sessions participate in salary
/// calculation; every other status is excluded from aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionStatus {
    /// Booked but not yet held.
    Booked,
    /// Held and completed.
    Completed,
    /// Cancelled before it took place.
    Cancelled,
    /// The client did not show up.
    NoShow,
}

/// A counseling session as seen by the payroll engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Identifier assigned by the schedule collaborator.
    pub id: String,
    /// The consultant who held (or was to hold) the session.
    pub consultant_id: i64,
    /// The calendar date of the session.
    pub date: NaiveDate,
    /// The consultation type code (e.g. "INITIAL_CONSULTATION"), if recorded.
    pub consultation_type: Option<String>,
    /// The session's lifecycle status.
    pub status: SessionStatus,
}

impl Session {
    /// Returns true if the session was held and completed.
    pub fn is_completed(&self) -> bool {
        self.status == SessionStatus::Completed
    }
}
