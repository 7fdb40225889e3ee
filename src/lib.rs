//! Workforce Roster Engine for security guarding operations.
//!
//! This crate provides the server-side logic for a guarding services company:
//! site and guard registries, shift allocation with attendance-conflict
//! guarding, daily attendance overviews, temporary staffing slots, and
//! GST-compliant invoice generation.

#![warn(missing_docs)]

pub mod allocation;
pub mod api;
pub mod attendance;
pub mod billing;
pub mod config;
pub mod error;
pub mod feed;
pub mod models;
pub mod store;
pub mod temporary;
