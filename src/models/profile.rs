//! Compensation profile models.
//!
//! This module defines the [`CompensationProfile`] and [`CompensationOption`]
//! types describing how a consultant is paid, and the [`EmploymentType`] enum
//! selecting the tax regime.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The employment arrangement of a consultant.
///
/// The employment type selects both the pay-aggregation path (per-session for
/// freelance, fixed monthly for regular) and the tax regime (flat withholding
/// versus progressive brackets).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EmploymentType {
    /// Freelance consultant paid per completed session.
    Freelance,
    /// Regular employee paid a fixed monthly salary.
    Regular,
}

impl std::fmt::Display for EmploymentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmploymentType::Freelance => write!(f, "FREELANCE"),
            EmploymentType::Regular => write!(f, "REGULAR"),
        }
    }
}

/// The compensation profile of a single consultant.
///
/// At most one profile per consultant is active at any instant; saving a new
/// profile through the profile store deactivates the prior active one.
///
/// The meaning of `base_rate` depends on the employment type: per-session rate
/// for freelance consultants, monthly base salary for regular employees. When
/// `base_rate` is `None` the engine resolves a grade-based default from the
/// code table.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{CompensationProfile, EmploymentType};
/// use rust_decimal::Decimal;
///
/// let profile = CompensationProfile::new(101, EmploymentType::Freelance)
///     .with_base_rate(Decimal::new(30_000, 0));
/// assert!(profile.is_freelance());
/// assert!(profile.active);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompensationProfile {
    /// Surrogate identifier for this profile.
    pub id: Uuid,
    /// The consultant this profile belongs to.
    pub consultant_id: i64,
    /// The employment arrangement.
    pub employment_type: EmploymentType,
    /// Per-session rate (freelance) or monthly base (regular), if configured.
    pub base_rate: Option<Decimal>,
    /// Whether the consultant holds a formal business registration.
    pub business_registered: bool,
    /// Business registration number, when registered.
    pub business_registration_number: Option<String>,
    /// Registered business name, when registered.
    pub business_name: Option<String>,
    /// Free-text contract terms.
    pub contract_terms: Option<String>,
    /// Whether this profile is the consultant's active one.
    pub active: bool,
    /// When the profile was created.
    pub created_at: DateTime<Utc>,
    /// When the profile was last updated.
    pub updated_at: DateTime<Utc>,
}

impl CompensationProfile {
    /// Creates a new active profile with no configured rate.
    pub fn new(consultant_id: i64, employment_type: EmploymentType) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            consultant_id,
            employment_type,
            base_rate: None,
            business_registered: false,
            business_registration_number: None,
            business_name: None,
            contract_terms: None,
            active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Sets the configured base rate.
    pub fn with_base_rate(mut self, rate: Decimal) -> Self {
        self.base_rate = Some(rate);
        self
    }

    /// Marks the profile as business-registered with the given details.
    pub fn with_business_registration(
        mut self,
        registration_number: impl Into<String>,
        business_name: impl Into<String>,
    ) -> Self {
        self.business_registered = true;
        self.business_registration_number = Some(registration_number.into());
        self.business_name = Some(business_name.into());
        self
    }

    /// Returns true if this is a freelance profile.
    pub fn is_freelance(&self) -> bool {
        self.employment_type == EmploymentType::Freelance
    }

    /// Returns true if this is a regular-employment profile.
    pub fn is_regular(&self) -> bool {
        self.employment_type == EmploymentType::Regular
    }
}

/// A named additional-amount item attached to a compensation profile.
///
/// Options are soft-deactivated, never hard-deleted, so compensation history
/// is preserved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompensationOption {
    /// Surrogate identifier for this option.
    pub id: Uuid,
    /// The profile this option belongs to.
    pub profile_id: Uuid,
    /// The option type code (e.g. "INITIAL_CONSULTATION").
    pub option_type: String,
    /// The flat additional amount.
    pub amount: Decimal,
    /// A human-readable description.
    pub description: String,
    /// Whether the option is currently in effect.
    pub active: bool,
    /// When the option was created.
    pub created_at: DateTime<Utc>,
    /// When the option was last updated.
    pub updated_at: DateTime<Utc>,
}

impl CompensationOption {
    /// Creates a new active option for the given profile.
    pub fn new(
        profile_id: Uuid,
        option_type: impl Into<String>,
        amount: Decimal,
        description: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            profile_id,
            option_type: option_type.into(),
            amount,
            description: description.into(),
            active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Soft-deactivates the option.
    pub fn deactivate(&mut self) {
        self.active = false;
        self.updated_at = Utc::now();
    }
}
