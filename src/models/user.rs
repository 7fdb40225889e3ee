//! Application user model for administrative provisioning.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An application-level user row created alongside an authentication
/// identity by the administrative provisioning endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user row.
    pub id: Uuid,
    /// The authentication identity this user is linked to.
    pub auth_id: Uuid,
    /// The user's display name.
    pub name: String,
    /// The user's sign-in email.
    pub email: String,
    /// The application role (e.g., "admin", "supervisor").
    pub role: String,
}
