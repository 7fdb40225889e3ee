//! Attendance record model and related types.
//!
//! Attendance rows are created by the attendance-marking flow and are only
//! read and deleted by the allocation layer, which guards against orphaning
//! a same-day record when a shift assignment is removed.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ShiftType;

/// The marking applied to a guard for one date at one site/shift.
///
/// Statuses are set directly by each write; no transition validation is
/// performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    /// The guard worked the shift.
    Present,
    /// The guard did not show.
    Absent,
    /// A replacement guard covered the shift.
    Replaced,
    /// The guard was sent to a different site for the day.
    Reassigned,
}

/// One guard's attendance marking for one date at one site and shift type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// Unique identifier for the record.
    pub id: Uuid,
    /// The date the marking applies to.
    pub date: NaiveDate,
    /// The site the guard was assigned to.
    pub site_id: Uuid,
    /// Day or night.
    pub shift_type: ShiftType,
    /// The guard being marked.
    pub guard_id: Uuid,
    /// The marking.
    pub status: AttendanceStatus,
    /// The covering guard when `status` is `Replaced`.
    #[serde(default)]
    pub replacement_guard_id: Option<Uuid>,
    /// The destination site when `status` is `Reassigned`.
    #[serde(default)]
    pub reassigned_site_id: Option<Uuid>,
}

impl AttendanceRecord {
    /// Creates a plain marking with no replacement or reassignment target.
    pub fn marked(
        date: NaiveDate,
        site_id: Uuid,
        shift_type: ShiftType,
        guard_id: Uuid,
        status: AttendanceStatus,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            site_id,
            shift_type,
            guard_id,
            status,
            replacement_guard_id: None,
            reassigned_site_id: None,
        }
    }
}
