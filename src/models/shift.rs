//! Shift model and related types.
//!
//! A shift row ties a site and a shift type to an optional guard. A row with
//! no guard represents an open, unfilled slot. Temporary rows additionally
//! carry a role, a pay rate, and the single date they are valid for.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The two shift types a site is staffed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftType {
    /// The day shift.
    Day,
    /// The night shift.
    Night,
}

/// A concrete (site, shift type) assignment row, optionally linked to a guard.
///
/// Uniqueness of (site, type, guard) is assumed by the allocation layer, not
/// enforced here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shift {
    /// Unique identifier for the shift row.
    pub id: Uuid,
    /// The site this shift belongs to.
    pub site_id: Uuid,
    /// Day or night.
    pub shift_type: ShiftType,
    /// The assigned guard, or `None` for an open slot.
    pub guard_id: Option<Uuid>,
    /// Whether this row is a temporary slot outside the permanent staffing model.
    #[serde(default)]
    pub is_temporary: bool,
    /// The role for a temporary slot (permanent rows leave this unset).
    #[serde(default)]
    pub role: Option<String>,
    /// The daily pay rate for a temporary slot.
    #[serde(default)]
    pub pay_rate: Option<Decimal>,
    /// The single date a temporary slot is valid for.
    #[serde(default)]
    pub valid_for: Option<NaiveDate>,
}

impl Shift {
    /// Creates a permanent shift row assigned to a guard.
    pub fn assigned(site_id: Uuid, shift_type: ShiftType, guard_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            site_id,
            shift_type,
            guard_id: Some(guard_id),
            is_temporary: false,
            role: None,
            pay_rate: None,
            valid_for: None,
        }
    }

    /// Creates a temporary, unassigned slot valid for a single date.
    pub fn temporary(
        site_id: Uuid,
        shift_type: ShiftType,
        role: String,
        pay_rate: Decimal,
        valid_for: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            site_id,
            shift_type,
            guard_id: None,
            is_temporary: true,
            role: Some(role),
            pay_rate: Some(pay_rate),
            valid_for: Some(valid_for),
        }
    }

    /// Returns true if no guard is assigned to this row.
    pub fn is_open(&self) -> bool {
        self.guard_id.is_none()
    }
}
