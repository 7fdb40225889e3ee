//! GST tax computation.
//!
//! The five regimes are mutually exclusive:
//!
//! | Regime   | CGST   | SGST   | IGST | Collected by issuer          |
//! |----------|--------|--------|------|------------------------------|
//! | gst      | rate/2 | rate/2 | 0    | yes                          |
//! | igst     | 0      | 0      | rate | yes                          |
//! | rcm      | rate/2 | rate/2 | 0    | no, recipient pays           |
//! | ngst     | 0      | 0      | 0    | nothing charged              |
//! | personal | flat rate, no split    || yes                          |
//!
//! Amounts are exact `Decimal` values; rounding to two places is a display
//! concern left to callers.

use rust_decimal::Decimal;

use crate::models::{GstRegime, TaxBreakdown};

/// Computes the tax breakdown for a subtotal under one GST regime.
///
/// `rate` is a percentage (e.g. 18 for 18%). Under `rcm` the CGST/SGST
/// amounts are computed for display but `charged_tax` is zero because the
/// recipient carries the liability.
///
/// # Example
///
/// ```
/// use roster_engine::billing::compute_tax;
/// use roster_engine::models::GstRegime;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let tax = compute_tax(GstRegime::Gst, Decimal::from_str("34400").unwrap(), Decimal::from_str("18").unwrap());
/// assert_eq!(tax.cgst_amount, Decimal::from_str("3096").unwrap());
/// assert_eq!(tax.sgst_amount, Decimal::from_str("3096").unwrap());
/// assert_eq!(tax.charged_tax, Decimal::from_str("6192").unwrap());
/// ```
pub fn compute_tax(regime: GstRegime, subtotal: Decimal, rate: Decimal) -> TaxBreakdown {
    let full = subtotal * rate / Decimal::from(100);
    let half = subtotal * rate / Decimal::from(200);
    let zero = Decimal::ZERO;

    match regime {
        GstRegime::Gst => TaxBreakdown {
            regime,
            rate,
            cgst_amount: half,
            sgst_amount: half,
            igst_amount: zero,
            flat_amount: zero,
            charged_tax: half + half,
        },
        GstRegime::Igst => TaxBreakdown {
            regime,
            rate,
            cgst_amount: zero,
            sgst_amount: zero,
            igst_amount: full,
            flat_amount: zero,
            charged_tax: full,
        },
        GstRegime::Rcm => TaxBreakdown {
            regime,
            rate,
            cgst_amount: half,
            sgst_amount: half,
            igst_amount: zero,
            flat_amount: zero,
            // Reverse charge: displayed but paid by the recipient.
            charged_tax: zero,
        },
        GstRegime::Ngst => TaxBreakdown {
            regime,
            rate,
            cgst_amount: zero,
            sgst_amount: zero,
            igst_amount: zero,
            flat_amount: zero,
            charged_tax: zero,
        },
        GstRegime::Personal => TaxBreakdown {
            regime,
            rate,
            cgst_amount: zero,
            sgst_amount: zero,
            igst_amount: zero,
            flat_amount: full,
            charged_tax: full,
        },
    }
}
