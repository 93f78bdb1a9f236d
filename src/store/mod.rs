//! Collaborator contracts for persistence and scheduling.
//!
//! The engine owns no storage technology: profiles, sessions and calculation
//! records live behind synchronous traits, with `Mutex`-backed in-memory
//! implementations shipped for tests and as reference semantics.

mod calculations;
mod profiles;
mod sessions;

pub use calculations::{CalculationStore, InMemoryCalculationStore};
pub use profiles::{InMemoryProfileStore, ProfileStore};
pub use sessions::{InMemorySessionSource, SessionSource};

use std::sync::{Mutex, MutexGuard};

use crate::error::{PayrollError, PayrollResult};

/// Locks a mutex, mapping poisoning to a store error.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> PayrollResult<MutexGuard<'_, T>> {
    mutex.lock().map_err(|_| PayrollError::Store {
        message: "store lock poisoned".to_string(),
    })
}
