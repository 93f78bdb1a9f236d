//! The session source contract.

use std::sync::Mutex;

use crate::error::PayrollResult;
use crate::models::{PayPeriod, Session};

use super::lock;

/// Read access to the schedule collaborator's completed sessions.
///
/// Only sessions with completed status and a date strictly within the
/// period's work range are returned; cancelled, no-show and merely booked
/// sessions never appear.
pub trait SessionSource: Send + Sync {
    /// Lists the consultant's completed sessions within the work range.
    fn list_completed_sessions(
        &self,
        consultant_id: i64,
        period: &PayPeriod,
    ) -> PayrollResult<Vec<Session>>;

    /// Counts the consultant's completed sessions within the work range.
    fn count_completed_sessions(&self, consultant_id: i64, period: &PayPeriod) -> PayrollResult<u32> {
        Ok(self.list_completed_sessions(consultant_id, period)?.len() as u32)
    }
}

/// In-memory [`SessionSource`] used by tests.
#[derive(Debug, Default)]
pub struct InMemorySessionSource {
    sessions: Mutex<Vec<Session>>,
}

impl InMemorySessionSource {
    /// Creates an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a session to the schedule.
    pub fn add_session(&self, session: Session) {
        if let Ok(mut sessions) = self.sessions.lock() {
            sessions.push(session);
        }
    }
}

impl SessionSource for InMemorySessionSource {
    fn list_completed_sessions(
        &self,
        consultant_id: i64,
        period: &PayPeriod,
    ) -> PayrollResult<Vec<Session>> {
        let sessions = lock(&self.sessions)?;
        Ok(sessions
            .iter()
            .filter(|s| {
                s.consultant_id == consultant_id
                    && s.is_completed()
                    && period.contains_date(s.date)
            })
            .cloned()
            .collect())
    }
}
