//! Invoice assembly.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

use crate::error::{RosterError, RosterResult};
use crate::models::{Invoice, InvoiceLineItem, InvoiceStatus, Site};

use super::compute_tax;

/// An inclusive billing period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BillingPeriod {
    /// First day of the period.
    pub start: NaiveDate,
    /// Last day of the period.
    pub end: NaiveDate,
}

impl BillingPeriod {
    /// Validates that the period does not end before it starts.
    pub fn validate(&self) -> RosterResult<()> {
        if self.end < self.start {
            return Err(RosterError::Validation {
                field: "period_end".to_string(),
                message: "billing period ends before it starts".to_string(),
            });
        }
        Ok(())
    }
}

/// Builds one line item per non-empty (requirement, shift type) pair.
///
/// Quantity is the slot count, the unit rate is the requirement's budget per
/// slot, and zero-slot pairs produce no line.
pub fn build_line_items(site: &Site) -> Vec<InvoiceLineItem> {
    let mut items = Vec::new();
    for requirement in &site.requirements {
        if requirement.day_slots > 0 {
            items.push(InvoiceLineItem {
                description: format!("{} (day shift)", requirement.role),
                quantity: requirement.day_slots,
                unit_rate: requirement.budget_per_slot,
                amount: Decimal::from(requirement.day_slots) * requirement.budget_per_slot,
            });
        }
        if requirement.night_slots > 0 {
            items.push(InvoiceLineItem {
                description: format!("{} (night shift)", requirement.role),
                quantity: requirement.night_slots,
                unit_rate: requirement.budget_per_slot,
                amount: Decimal::from(requirement.night_slots) * requirement.budget_per_slot,
            });
        }
    }
    items
}

/// Assembles a draft invoice snapshot for a site and billing period.
///
/// Validation failures (inverted period, a site with nothing to bill) block
/// assembly before anything is computed. The snapshot is final: totals are
/// never recomputed after creation.
pub fn assemble_invoice(
    site: &Site,
    period: BillingPeriod,
    gst_rate: Decimal,
    invoice_number: String,
) -> RosterResult<Invoice> {
    period.validate()?;

    let line_items = build_line_items(site);
    if line_items.is_empty() {
        return Err(RosterError::Validation {
            field: "requirements".to_string(),
            message: "site has no billable staffing requirements".to_string(),
        });
    }

    let subtotal: Decimal = line_items.iter().map(|li| li.amount).sum();
    let tax = compute_tax(site.gst_regime, subtotal, gst_rate);
    let total = subtotal + tax.charged_tax;

    info!(
        site_id = %site.id,
        invoice_number = %invoice_number,
        %subtotal,
        %total,
        regime = ?site.gst_regime,
        "Assembled invoice"
    );

    Ok(Invoice {
        id: Uuid::new_v4(),
        invoice_number,
        site_id: site.id,
        period_start: period.start,
        period_end: period.end,
        line_items,
        subtotal,
        tax,
        total,
        status: InvoiceStatus::Draft,
        created_at: Utc::now(),
    })
}
