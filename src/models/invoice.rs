//! Invoice models.
//!
//! Invoices are write-once snapshots of a billing period's computed charges;
//! they are never recomputed after creation.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::GstRegime;

/// The lifecycle label of an invoice, set directly by each write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    /// Created but not yet issued to the client.
    Draft,
    /// Issued to the client.
    Sent,
    /// Payment received.
    Paid,
}

/// One billed line on an invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceLineItem {
    /// Human-readable description (role and shift type).
    pub description: String,
    /// The number of billed slots.
    pub quantity: u32,
    /// The rate per slot for the period.
    pub unit_rate: Decimal,
    /// `quantity * unit_rate`.
    pub amount: Decimal,
}

/// The tax amounts computed for an invoice under one GST regime.
///
/// `charged_tax` is the portion actually collected by the issuer. Under the
/// reverse-charge regime the CGST/SGST amounts are displayed but
/// `charged_tax` is zero because the recipient pays them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxBreakdown {
    /// The regime the breakdown was computed under.
    pub regime: GstRegime,
    /// The GST rate used, as a percentage.
    pub rate: Decimal,
    /// Central GST component.
    pub cgst_amount: Decimal,
    /// State GST component.
    pub sgst_amount: Decimal,
    /// Integrated GST component.
    pub igst_amount: Decimal,
    /// Flat tax for the `personal` regime.
    pub flat_amount: Decimal,
    /// The tax the issuer actually collects.
    pub charged_tax: Decimal,
}

/// A write-once snapshot of a billing period's computed charges for a site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    /// Unique identifier for the invoice.
    pub id: Uuid,
    /// Sequential, human-facing invoice number.
    pub invoice_number: String,
    /// The billed site.
    pub site_id: Uuid,
    /// First day of the billing period (inclusive).
    pub period_start: NaiveDate,
    /// Last day of the billing period (inclusive).
    pub period_end: NaiveDate,
    /// The billed lines.
    pub line_items: Vec<InvoiceLineItem>,
    /// Sum of line amounts before tax.
    pub subtotal: Decimal,
    /// The computed tax amounts.
    pub tax: TaxBreakdown,
    /// `subtotal + tax.charged_tax`.
    pub total: Decimal,
    /// The invoice lifecycle label.
    pub status: InvoiceStatus,
    /// When the snapshot was taken.
    pub created_at: DateTime<Utc>,
}
