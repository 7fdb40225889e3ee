//! HTTP API module for the roster engine.
//!
//! This module provides the REST endpoints for site/guard registry
//! management, shift reconciliation, the attendance overview, invoicing,
//! temporary staffing, and administrative user provisioning.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{ReconcileRequest, ReassignRequest};
pub use response::{ApiError, ConflictResponse};
pub use state::AppState;
