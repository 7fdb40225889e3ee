//! Site model and related types.
//!
//! This module defines the Site struct, its per-role staffing requirements,
//! and the mutually exclusive GST treatment regimes.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The GST treatment regime applied to a site's invoices.
///
/// The regimes are mutually exclusive; every site carries exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GstRegime {
    /// Intra-state supply: the GST rate is split evenly into CGST and SGST.
    Gst,
    /// Inter-state supply: the full rate is charged as IGST.
    Igst,
    /// Reverse charge: CGST/SGST are computed and displayed but the
    /// recipient pays them, so nothing is collected by the issuer.
    Rcm,
    /// No GST is charged at all.
    Ngst,
    /// A single flat rate is charged without a CGST/SGST split.
    Personal,
}

/// A budgeted guard position requirement at a site for one role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffingRequirement {
    /// The role name (e.g., "Security Guard", "Gunman", "Supervisor").
    pub role: String,
    /// Number of budgeted day-shift slots for this role.
    pub day_slots: u32,
    /// Number of budgeted night-shift slots for this role.
    pub night_slots: u32,
    /// The monthly budget per slot, used as the invoice unit rate.
    pub budget_per_slot: Decimal,
}

impl StaffingRequirement {
    /// Returns the total number of budgeted slots across both shift types.
    pub fn total_slots(&self) -> u32 {
        self.day_slots + self.night_slots
    }
}

/// A client site guarded by the company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Site {
    /// Unique identifier for the site.
    pub id: Uuid,
    /// The site's display name.
    pub name: String,
    /// The site's billing address.
    pub address: String,
    /// The GST regime applied when invoicing this site.
    pub gst_regime: GstRegime,
    /// The GST rate (as a percentage, e.g. 18) applied to this site.
    pub gst_rate: Decimal,
    /// Per-role slot requirements for this site.
    #[serde(default)]
    pub requirements: Vec<StaffingRequirement>,
}

impl Site {
    /// Returns the total budgeted day-shift slots across all roles.
    pub fn day_slot_total(&self) -> u32 {
        self.requirements.iter().map(|r| r.day_slots).sum()
    }

    /// Returns the total budgeted night-shift slots across all roles.
    pub fn night_slot_total(&self) -> u32 {
        self.requirements.iter().map(|r| r.night_slots).sum()
    }
}
