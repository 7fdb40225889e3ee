//! Configuration types for the roster engine.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Company settings loaded from `company.yaml`.
///
/// These are the issuer-side constants stamped onto invoices and used as
/// defaults when a site does not specify its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyConfig {
    /// The company's legal name.
    pub name: String,
    /// The company's registered address.
    pub address: String,
    /// The company's GST identification number.
    pub gstin: String,
    /// The GST rate (percentage) applied when a site has no override.
    pub default_gst_rate: Decimal,
    /// The prefix for generated invoice numbers.
    pub invoice_prefix: String,
}
