//! Invoice assembly and GST computation.
//!
//! Combines a site's staffing requirements and a billing period into line
//! items, applies one of the five mutually exclusive tax-treatment regimes,
//! and snapshots the totals into a write-once invoice.

mod gst;
mod invoice;

pub use gst::compute_tax;
pub use invoice::{BillingPeriod, assemble_invoice, build_line_items};
