//! Request types for the roster engine API.
//!
//! This module defines the JSON bodies and query parameters accepted by the
//! HTTP endpoints.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{GstRegime, GuardStatus, ShiftType, StaffingRequirement};

/// A staffing requirement supplied when creating or updating a site.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffingRequirementRequest {
    /// Role the slots are for (e.g. "Security Guard", "Supervisor").
    pub role: String,
    /// Number of day-shift slots.
    pub day_slots: u32,
    /// Number of night-shift slots.
    pub night_slots: u32,
    /// Agreed monthly rate billed per slot.
    #[serde(with = "rust_decimal::serde::str")]
    pub budget_per_slot: Decimal,
}

impl From<StaffingRequirementRequest> for StaffingRequirement {
    fn from(req: StaffingRequirementRequest) -> Self {
        StaffingRequirement {
            role: req.role,
            day_slots: req.day_slots,
            night_slots: req.night_slots,
            budget_per_slot: req.budget_per_slot,
        }
    }
}

/// Body for `POST /sites`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSiteRequest {
    /// Display name of the site.
    pub name: String,
    /// Street address of the site.
    pub address: String,
    /// Tax regime the site is billed under.
    pub gst_regime: GstRegime,
    /// Site-specific GST rate override (percentage). Falls back to the
    /// company default when absent.
    #[serde(default)]
    pub gst_rate: Option<Decimal>,
    /// Contracted staffing requirements per role.
    #[serde(default)]
    pub requirements: Vec<StaffingRequirementRequest>,
}

/// Body for `POST /guards`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateGuardRequest {
    /// Full name of the guard.
    pub name: String,
    /// Unique badge number.
    pub badge_number: String,
    /// Employment status. Defaults to active.
    #[serde(default)]
    pub status: Option<GuardStatus>,
    /// Monthly pay owed to the guard.
    #[serde(with = "rust_decimal::serde::str")]
    pub monthly_pay: Decimal,
}

/// Body for `POST /sites/:id/shifts/reconcile`.
///
/// Declares the full desired roster for one shift type at a site. The
/// handler computes the difference against what is currently stored and
/// applies only that difference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconcileRequest {
    /// Which shift column the target applies to.
    pub shift_type: ShiftType,
    /// The complete set of guards that should hold shifts after the call.
    pub guard_ids: Vec<Uuid>,
    /// Date used when checking removed guards for attendance conflicts.
    pub date: NaiveDate,
    /// When true, conflicting attendance records are deleted along with
    /// their shifts instead of blocking the reconciliation.
    #[serde(default)]
    pub confirm_removal: bool,
}

/// Body for `POST /shifts/reassign`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReassignRequest {
    /// First shift in the swap.
    pub shift_id_a: Uuid,
    /// Second shift in the swap.
    pub shift_id_b: Uuid,
}

/// Query parameters for `GET /attendance/overview`.
#[derive(Debug, Clone, Deserialize)]
pub struct OverviewParams {
    /// Date the overview is built for.
    pub date: NaiveDate,
}

/// Body for `POST /sites/:id/invoices`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceRequest {
    /// First day of the billing period.
    pub period_start: NaiveDate,
    /// Last day of the billing period.
    pub period_end: NaiveDate,
    /// GST rate override (percentage). Falls back to the site's rate.
    #[serde(default)]
    pub gst_rate: Option<Decimal>,
}

/// Body for `POST /sites/:id/temporary-slots/copy`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CopySlotsRequest {
    /// Date to copy temporary slot definitions from.
    pub source_date: NaiveDate,
    /// Date the copied slots become valid for.
    pub target_date: NaiveDate,
}

/// Body for `POST /temporary-requests`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTemporaryRequest {
    /// Site the extra staff are needed at.
    pub site_id: Uuid,
    /// Date the staff are needed on.
    pub date: NaiveDate,
    /// Role being requested.
    pub role: String,
    /// Day-shift slots requested.
    pub day_slots: u32,
    /// Night-shift slots requested.
    pub night_slots: u32,
    /// Pay rate offered per slot.
    #[serde(with = "rust_decimal::serde::str")]
    pub pay_rate: Decimal,
}

/// Body for `POST /admin/users`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserRequest {
    /// Full name of the new user.
    pub name: String,
    /// Login email. Must be unique across the auth provider.
    pub email: String,
    /// Initial password.
    pub password: String,
    /// Application role (e.g. "admin", "supervisor").
    pub role: String,
}
