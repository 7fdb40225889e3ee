//! Shift set reconciliation.
//!
//! Given a site, a shift type, and a target set of guard identifiers, the
//! reconciler makes the set of shift rows for that (site, type) match the
//! target set exactly: guards missing from the target are removed, guards
//! missing from the current set are added, and guards present in both are
//! left untouched.
//!
//! Before any row is removed, same-day attendance records for the departing
//! guards are looked up. If any exist, the reconciler stops and returns them
//! so the caller can obtain explicit confirmation; nothing is deleted until
//! that confirmation is supplied.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::RosterResult;
use crate::models::{AttendanceStatus, Shift, ShiftType};
use crate::store::{AttendanceRepository, ShiftRepository};

/// The set difference between the current and target guard sets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcilePlan {
    /// Guards in the target set but not currently assigned.
    pub to_add: Vec<Uuid>,
    /// Guards currently assigned but absent from the target set.
    pub to_remove: Vec<Uuid>,
}

impl ReconcilePlan {
    /// Returns true if the current set already matches the target.
    pub fn is_noop(&self) -> bool {
        self.to_add.is_empty() && self.to_remove.is_empty()
    }
}

/// Computes the additions and removals needed to turn `current` into `target`.
///
/// Duplicate identifiers on either side collapse under set semantics; the
/// returned lists are sorted for deterministic application order.
///
/// # Example
///
/// ```
/// use roster_engine::allocation::plan_reconciliation;
/// use uuid::Uuid;
///
/// let keep = Uuid::new_v4();
/// let drop = Uuid::new_v4();
/// let add = Uuid::new_v4();
///
/// let plan = plan_reconciliation(&[keep, drop], &[keep, add]);
/// assert_eq!(plan.to_add, vec![add]);
/// assert_eq!(plan.to_remove, vec![drop]);
/// ```
pub fn plan_reconciliation(current: &[Uuid], target: &[Uuid]) -> ReconcilePlan {
    let current_set: HashSet<Uuid> = current.iter().copied().collect();
    let target_set: HashSet<Uuid> = target.iter().copied().collect();

    let mut to_add: Vec<Uuid> = target_set.difference(&current_set).copied().collect();
    let mut to_remove: Vec<Uuid> = current_set.difference(&target_set).copied().collect();
    to_add.sort();
    to_remove.sort();

    ReconcilePlan { to_add, to_remove }
}

/// A same-day attendance record standing in the way of a guard's removal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceConflict {
    /// The guard whose removal is blocked.
    pub guard_id: Uuid,
    /// The attendance row that would be orphaned.
    pub attendance_id: Uuid,
    /// The row's current marking.
    pub status: AttendanceStatus,
}

/// A per-item failure recorded while applying a plan.
///
/// Failures do not abort the remaining items; the reconciliation is
/// best-effort and non-transactional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconcileFailure {
    /// The guard whose add or remove failed.
    pub guard_id: Uuid,
    /// A description of the failure.
    pub message: String,
}

/// What a completed reconciliation actually did.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ReconcileReport {
    /// Guards newly assigned.
    pub added: Vec<Uuid>,
    /// Guards unassigned.
    pub removed: Vec<Uuid>,
    /// Number of conflicting attendance rows deleted under confirmation.
    pub attendance_deleted: u32,
    /// Per-item failures that were logged and skipped.
    pub failures: Vec<ReconcileFailure>,
}

/// The result of a reconciliation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ReconcileOutcome {
    /// The plan was applied; the report lists what changed.
    Applied(ReconcileReport),
    /// Same-day attendance rows exist for guards being removed and no
    /// confirmation was supplied. Nothing was deleted.
    ConfirmationRequired {
        /// The blocking attendance rows, one per (guard, record) pair.
        conflicts: Vec<AttendanceConflict>,
    },
}

/// Applies guard-set reconciliations against the shift and attendance tables.
pub struct ShiftReconciler<'a> {
    shifts: &'a dyn ShiftRepository,
    attendance: &'a dyn AttendanceRepository,
}

impl<'a> ShiftReconciler<'a> {
    /// Creates a reconciler over the given repositories.
    pub fn new(shifts: &'a dyn ShiftRepository, attendance: &'a dyn AttendanceRepository) -> Self {
        Self { shifts, attendance }
    }

    /// Makes the assigned-guard set for `(site_id, shift_type)` equal `target`.
    ///
    /// `date` scopes the attendance-conflict check (the marking date under
    /// review, normally today). When removals would orphan attendance rows
    /// on that date and `confirm_removal` is false, the conflicts are
    /// returned and no row of any kind is deleted. With confirmation the
    /// conflicting attendance rows are deleted first, then the shift rows.
    ///
    /// Row operations are issued sequentially and independently: a failure
    /// on one item is logged and recorded in the report, and the remaining
    /// items still run. An empty `target` fully deallocates the shift type.
    pub async fn reconcile(
        &self,
        site_id: Uuid,
        shift_type: ShiftType,
        target: &[Uuid],
        date: NaiveDate,
        confirm_removal: bool,
    ) -> RosterResult<ReconcileOutcome> {
        let current_rows = self.shifts.list_for_site(site_id, shift_type).await?;
        let current: Vec<Uuid> = current_rows.iter().filter_map(|s| s.guard_id).collect();

        let plan = plan_reconciliation(&current, target);
        if plan.is_noop() {
            info!(%site_id, ?shift_type, "Shift allocation already matches target");
            return Ok(ReconcileOutcome::Applied(ReconcileReport::default()));
        }

        let mut conflicts = Vec::new();
        if !plan.to_remove.is_empty() {
            let records = self
                .attendance
                .find_for_guards(date, site_id, shift_type, &plan.to_remove)
                .await?;
            conflicts = records
                .iter()
                .map(|r| AttendanceConflict {
                    guard_id: r.guard_id,
                    attendance_id: r.id,
                    status: r.status,
                })
                .collect();

            if !conflicts.is_empty() && !confirm_removal {
                info!(
                    %site_id,
                    ?shift_type,
                    conflict_count = conflicts.len(),
                    "Removal blocked pending attendance-deletion confirmation"
                );
                return Ok(ReconcileOutcome::ConfirmationRequired { conflicts });
            }
        }

        let mut report = ReconcileReport::default();

        for conflict in &conflicts {
            match self.attendance.delete(conflict.attendance_id).await {
                Ok(()) => report.attendance_deleted += 1,
                Err(err) => {
                    warn!(
                        attendance_id = %conflict.attendance_id,
                        error = %err,
                        "Failed to delete conflicting attendance record"
                    );
                    report.failures.push(ReconcileFailure {
                        guard_id: conflict.guard_id,
                        message: err.to_string(),
                    });
                }
            }
        }

        for guard_id in &plan.to_remove {
            let Some(row) = current_rows
                .iter()
                .find(|s| s.guard_id == Some(*guard_id))
            else {
                continue;
            };
            match self.shifts.delete(row.id).await {
                Ok(()) => report.removed.push(*guard_id),
                Err(err) => {
                    warn!(%guard_id, shift_id = %row.id, error = %err, "Failed to remove shift row");
                    report.failures.push(ReconcileFailure {
                        guard_id: *guard_id,
                        message: err.to_string(),
                    });
                }
            }
        }

        for guard_id in &plan.to_add {
            let row = Shift::assigned(site_id, shift_type, *guard_id);
            match self.shifts.create(row).await {
                Ok(_) => report.added.push(*guard_id),
                Err(err) => {
                    warn!(%guard_id, error = %err, "Failed to create shift row");
                    report.failures.push(ReconcileFailure {
                        guard_id: *guard_id,
                        message: err.to_string(),
                    });
                }
            }
        }

        info!(
            %site_id,
            ?shift_type,
            added = report.added.len(),
            removed = report.removed.len(),
            attendance_deleted = report.attendance_deleted,
            failures = report.failures.len(),
            "Shift reconciliation applied"
        );
        Ok(ReconcileOutcome::Applied(report))
    }
}
