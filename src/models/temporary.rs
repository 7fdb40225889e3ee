//! Temporary staffing request model.
//!
//! Temporary requests collect ad-hoc role/day/night/pay-rate tuples for a
//! single date, independent of the permanent staffing model.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The processing label of a temporary staffing request, set directly by
/// each write with no transition validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    /// Submitted, awaiting a decision.
    Pending,
    /// Approved for staffing.
    Approved,
    /// Declined.
    Rejected,
    /// Staffed and worked.
    Fulfilled,
}

/// An ad-hoc staffing request for one site on one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemporaryStaffingRequest {
    /// Unique identifier for the request.
    pub id: Uuid,
    /// The requesting site.
    pub site_id: Uuid,
    /// The single date the extra staffing is for.
    pub date: NaiveDate,
    /// The requested role.
    pub role: String,
    /// Number of extra day-shift slots requested.
    pub day_slots: u32,
    /// Number of extra night-shift slots requested.
    pub night_slots: u32,
    /// The daily pay rate offered per slot.
    pub pay_rate: Decimal,
    /// The processing label.
    pub status: RequestStatus,
}
