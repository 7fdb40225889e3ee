//! Direct guard reassignment between two shift rows.
//!
//! Reconciliation never updates a row in place (a swap is delete+insert);
//! this is the one operation that does, exchanging the guard references of
//! two existing rows directly.

use tracing::info;
use uuid::Uuid;

use crate::error::{RosterError, RosterResult};
use crate::models::Shift;
use crate::store::ShiftRepository;

/// Swaps the guard references of two shift rows and returns the updated rows.
///
/// Both rows must exist; either being missing fails the whole operation
/// before any write is issued. The two updates are then applied
/// sequentially, like every other multi-row mutation in this engine.
pub async fn reassign_guards(
    shifts: &dyn ShiftRepository,
    shift_id_a: Uuid,
    shift_id_b: Uuid,
) -> RosterResult<(Shift, Shift)> {
    let mut row_a = shifts
        .get(shift_id_a)
        .await?
        .ok_or(RosterError::ShiftNotFound { id: shift_id_a })?;
    let mut row_b = shifts
        .get(shift_id_b)
        .await?
        .ok_or(RosterError::ShiftNotFound { id: shift_id_b })?;

    std::mem::swap(&mut row_a.guard_id, &mut row_b.guard_id);

    let row_a = shifts.update(row_a).await?;
    let row_b = shifts.update(row_b).await?;

    info!(
        shift_a = %row_a.id,
        shift_b = %row_b.id,
        "Swapped guard references between shift rows"
    );
    Ok((row_a, row_b))
}
