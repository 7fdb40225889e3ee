//! Temporary slot duplication.
//!
//! Temporary shift rows are valid for a single date. Copying duplicates all
//! of a site's temporary rows from one date to another, resetting the guard
//! assignment and preserving role, shift type, and pay rate.

use chrono::NaiveDate;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::RosterResult;
use crate::models::Shift;
use crate::store::ShiftRepository;

/// Copies all temporary shift rows valid on `source_date` to `target_date`.
///
/// Each copy is a fresh, unassigned row. Returns the number of rows copied;
/// zero source rows is a no-op, not an error, and issues no insert call.
/// Per-item insert failures are logged and skipped, matching the best-effort
/// behavior of the reconciler.
pub async fn copy_temporary_slots(
    shifts: &dyn ShiftRepository,
    site_id: Uuid,
    source_date: NaiveDate,
    target_date: NaiveDate,
) -> RosterResult<u32> {
    let source_rows = shifts.list_temporary_for_date(site_id, source_date).await?;
    if source_rows.is_empty() {
        info!(%site_id, %source_date, "No temporary slots to copy");
        return Ok(0);
    }

    let mut copied = 0u32;
    for row in source_rows {
        let copy = Shift {
            id: Uuid::new_v4(),
            site_id: row.site_id,
            shift_type: row.shift_type,
            guard_id: None,
            is_temporary: true,
            role: row.role.clone(),
            pay_rate: row.pay_rate,
            valid_for: Some(target_date),
        };
        match shifts.create(copy).await {
            Ok(_) => copied += 1,
            Err(err) => {
                warn!(source_shift = %row.id, error = %err, "Failed to copy temporary slot");
            }
        }
    }

    info!(%site_id, %source_date, %target_date, copied, "Copied temporary slots");
    Ok(copied)
}
