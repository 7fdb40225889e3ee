//! Per-site attendance overview for one date.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::RosterResult;
use crate::models::{AttendanceStatus, ShiftType};
use crate::store::{AttendanceRepository, ShiftRepository, SiteRepository};

/// A day/night pair of counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ShiftCounts {
    /// The day-shift count.
    pub day: u32,
    /// The night-shift count.
    pub night: u32,
}

impl ShiftCounts {
    fn bump(&mut self, shift_type: ShiftType) {
        match shift_type {
            ShiftType::Day => self.day += 1,
            ShiftType::Night => self.night += 1,
        }
    }
}

/// The derived marking status of a site for one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MarkingStatus {
    /// No guard is assigned on either shift.
    NoShifts,
    /// Every assigned guard on both shifts has a present marking.
    FullyMarked,
    /// No present marking exists on either shift.
    NotMarked,
    /// Some but not all assigned guards have present markings.
    PartiallyMarked,
}

/// Derives the marking status from assigned and present counts.
///
/// The rules apply in priority order: `no-shifts` when both assigned counts
/// are zero, then `fully-marked`, then `not-marked`, else
/// `partially-marked`.
///
/// # Example
///
/// ```
/// use roster_engine::attendance::{MarkingStatus, ShiftCounts, derive_marking_status};
///
/// let assigned = ShiftCounts { day: 3, night: 2 };
/// let present = ShiftCounts { day: 3, night: 2 };
/// assert_eq!(derive_marking_status(assigned, present), MarkingStatus::FullyMarked);
///
/// let nobody = ShiftCounts { day: 0, night: 0 };
/// assert_eq!(derive_marking_status(nobody, nobody), MarkingStatus::NoShifts);
/// ```
pub fn derive_marking_status(assigned: ShiftCounts, present: ShiftCounts) -> MarkingStatus {
    if assigned.day == 0 && assigned.night == 0 {
        MarkingStatus::NoShifts
    } else if present.day == assigned.day && present.night == assigned.night {
        MarkingStatus::FullyMarked
    } else if present.day == 0 && present.night == 0 {
        MarkingStatus::NotMarked
    } else {
        MarkingStatus::PartiallyMarked
    }
}

/// One site's attendance summary for the requested date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteOverview {
    /// The site.
    pub site_id: Uuid,
    /// The site's display name.
    pub site_name: String,
    /// Budgeted slot totals from the staffing requirements.
    pub slots: ShiftCounts,
    /// Guards currently assigned per shift type.
    pub assigned: ShiftCounts,
    /// Present markings per shift type for the date.
    pub present: ShiftCounts,
    /// The derived marking status.
    pub status: MarkingStatus,
}

/// Builds the per-site attendance overview for one date.
///
/// Issues three reads (sites with requirements, assigned shifts, attendance
/// for the date) and folds them per site. Only `present` markings count
/// toward the present totals.
pub async fn build_attendance_overview(
    date: NaiveDate,
    sites: &dyn SiteRepository,
    shifts: &dyn ShiftRepository,
    attendance: &dyn AttendanceRepository,
) -> RosterResult<Vec<SiteOverview>> {
    let all_sites = sites.list().await?;
    let assigned_shifts = shifts.list_assigned().await?;
    let day_records = attendance.list_for_date(date).await?;

    let mut assigned_by_site: HashMap<Uuid, ShiftCounts> = HashMap::new();
    for shift in &assigned_shifts {
        assigned_by_site
            .entry(shift.site_id)
            .or_default()
            .bump(shift.shift_type);
    }

    let mut present_by_site: HashMap<Uuid, ShiftCounts> = HashMap::new();
    for record in &day_records {
        if record.status == AttendanceStatus::Present {
            present_by_site
                .entry(record.site_id)
                .or_default()
                .bump(record.shift_type);
        }
    }

    Ok(all_sites
        .into_iter()
        .map(|site| {
            let slots = ShiftCounts {
                day: site.day_slot_total(),
                night: site.night_slot_total(),
            };
            let assigned = assigned_by_site.get(&site.id).copied().unwrap_or_default();
            let present = present_by_site.get(&site.id).copied().unwrap_or_default();
            SiteOverview {
                site_id: site.id,
                site_name: site.name,
                slots,
                assigned,
                present,
                status: derive_marking_status(assigned, present),
            }
        })
        .collect())
}
