//! Attendance overview aggregation.
//!
//! For a given date, every site is summarized as slot totals, assigned
//! counts, present counts, and a derived marking status. The status is a
//! pure function of the fetched sets; nothing is stored.

mod overview;

pub use overview::{
    MarkingStatus, ShiftCounts, SiteOverview, build_attendance_overview, derive_marking_status,
};
