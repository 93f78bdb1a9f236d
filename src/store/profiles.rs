//! The profile and option store contract.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::Utc;
use uuid::Uuid;

use crate::error::PayrollResult;
use crate::models::{CompensationOption, CompensationProfile};

use super::lock;

/// Access to compensation profiles, their options, and the consultant
/// directory the original back office keeps alongside them.
///
/// The store owns the one-active-profile invariant: saving an active profile
/// deactivates the consultant's prior active one.
pub trait ProfileStore: Send + Sync {
    /// Returns the consultant's active profile, if any.
    fn active_profile(&self, consultant_id: i64) -> PayrollResult<Option<CompensationProfile>>;

    /// Lists the active options attached to a profile.
    fn list_options(&self, profile_id: Uuid) -> PayrollResult<Vec<CompensationOption>>;

    /// Deactivates the consultant's active profile. Returns whether one
    /// existed.
    fn deactivate_profile(&self, consultant_id: i64) -> PayrollResult<bool>;

    /// Saves a profile. Saving an active profile first deactivates the
    /// consultant's prior active profile.
    fn save_profile(&self, profile: CompensationProfile) -> PayrollResult<CompensationProfile>;

    /// The consultant's display name from the directory, if known.
    fn consultant_name(&self, consultant_id: i64) -> Option<String>;

    /// The consultant's grade code (e.g. "CONSULTANT_SENIOR"), if known.
    fn consultant_grade(&self, consultant_id: i64) -> Option<String>;
}

#[derive(Debug, Clone)]
struct ConsultantRecord {
    name: String,
    grade: String,
}

/// In-memory [`ProfileStore`] used by tests.
#[derive(Debug, Default)]
pub struct InMemoryProfileStore {
    profiles: Mutex<Vec<CompensationProfile>>,
    options: Mutex<Vec<CompensationOption>>,
    directory: Mutex<HashMap<i64, ConsultantRecord>>,
}

impl InMemoryProfileStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a consultant's directory entry (name and grade).
    pub fn register_consultant(
        &self,
        consultant_id: i64,
        name: impl Into<String>,
        grade: impl Into<String>,
    ) {
        if let Ok(mut directory) = self.directory.lock() {
            directory.insert(
                consultant_id,
                ConsultantRecord {
                    name: name.into(),
                    grade: grade.into(),
                },
            );
        }
    }

    /// Attaches an option to a stored profile.
    pub fn add_option(&self, option: CompensationOption) -> PayrollResult<()> {
        lock(&self.options)?.push(option);
        Ok(())
    }
}

impl ProfileStore for InMemoryProfileStore {
    fn active_profile(&self, consultant_id: i64) -> PayrollResult<Option<CompensationProfile>> {
        let profiles = lock(&self.profiles)?;
        Ok(profiles
            .iter()
            .find(|p| p.consultant_id == consultant_id && p.active)
            .cloned())
    }

    fn list_options(&self, profile_id: Uuid) -> PayrollResult<Vec<CompensationOption>> {
        let options = lock(&self.options)?;
        Ok(options
            .iter()
            .filter(|o| o.profile_id == profile_id && o.active)
            .cloned()
            .collect())
    }

    fn deactivate_profile(&self, consultant_id: i64) -> PayrollResult<bool> {
        let mut profiles = lock(&self.profiles)?;
        let mut found = false;
        for profile in profiles
            .iter_mut()
            .filter(|p| p.consultant_id == consultant_id && p.active)
        {
            profile.active = false;
            profile.updated_at = Utc::now();
            found = true;
        }
        Ok(found)
    }

    fn save_profile(&self, profile: CompensationProfile) -> PayrollResult<CompensationProfile> {
        let mut profiles = lock(&self.profiles)?;
        if profile.active {
            for existing in profiles
                .iter_mut()
                .filter(|p| p.consultant_id == profile.consultant_id && p.active)
            {
                existing.active = false;
                existing.updated_at = Utc::now();
            }
        }
        profiles.retain(|p| p.id != profile.id);
        profiles.push(profile.clone());
        Ok(profile)
    }

    fn consultant_name(&self, consultant_id: i64) -> Option<String> {
        let directory = self.directory.lock().ok()?;
        directory.get(&consultant_id).map(|r| r.name.clone())
    }

    fn consultant_grade(&self, consultant_id: i64) -> Option<String> {
        let directory = self.directory.lock().ok()?;
        directory.get(&consultant_id).map(|r| r.grade.clone())
    }
}
