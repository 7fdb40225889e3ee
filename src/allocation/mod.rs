//! Shift allocation logic.
//!
//! This module contains the reconciler that mutates remote shift rows so the
//! assigned-guard set for a (site, shift type) matches a desired set, the
//! attendance-conflict guard that blocks silent same-day deletions, and the
//! single in-place reassignment operation.

mod reassign;
mod reconcile;

pub use reassign::reassign_guards;
pub use reconcile::{
    AttendanceConflict, ReconcileFailure, ReconcileOutcome, ReconcilePlan, ReconcileReport,
    ShiftReconciler, plan_reconciliation,
};
