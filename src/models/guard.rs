//! Guard model and related types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Whether a guard is currently available for assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuardStatus {
    /// On the active roster and assignable.
    Active,
    /// Off the roster; kept for record purposes only.
    Inactive,
}

/// A security guard on the company roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Guard {
    /// Unique identifier for the guard.
    pub id: Uuid,
    /// The guard's full name.
    pub name: String,
    /// The badge number printed on the guard's ID card.
    pub badge_number: String,
    /// Whether the guard is active or inactive.
    pub status: GuardStatus,
    /// The guard's monthly pay.
    pub monthly_pay: Decimal,
}

impl Guard {
    /// Returns true if the guard is on the active roster.
    pub fn is_active(&self) -> bool {
        self.status == GuardStatus::Active
    }
}
