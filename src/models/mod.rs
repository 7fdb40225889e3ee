//! Core data models for the Workforce Roster Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod attendance;
mod guard;
mod invoice;
mod shift;
mod site;
mod temporary;
mod user;

pub use attendance::{AttendanceRecord, AttendanceStatus};
pub use guard::{Guard, GuardStatus};
pub use invoice::{Invoice, InvoiceLineItem, InvoiceStatus, TaxBreakdown};
pub use shift::{Shift, ShiftType};
pub use site::{GstRegime, Site, StaffingRequirement};
pub use temporary::{RequestStatus, TemporaryStaffingRequest};
pub use user::User;
