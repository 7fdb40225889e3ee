//! Repository traits over the remote tables.
//!
//! The managed-database client is an external dependency boundary, so every
//! entity gets an explicit repository interface with typed CRUD operations.
//! The allocation, attendance, and billing logic is written against these
//! traits and unit-tested against the [`InMemoryStore`] fake.

mod memory;

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::error::RosterResult;
use crate::models::{
    AttendanceRecord, Guard, Invoice, Shift, ShiftType, Site, TemporaryStaffingRequest, User,
};

pub use memory::{InMemoryAuthProvider, InMemoryStore};

/// CRUD access to the `sites` table.
#[async_trait]
pub trait SiteRepository: Send + Sync {
    /// Inserts a site row.
    async fn create(&self, site: Site) -> RosterResult<Site>;
    /// Fetches a site by id, or `None` if it does not exist.
    async fn get(&self, id: Uuid) -> RosterResult<Option<Site>>;
    /// Lists all sites.
    async fn list(&self) -> RosterResult<Vec<Site>>;
    /// Replaces a site row; errors if the row does not exist.
    async fn update(&self, site: Site) -> RosterResult<Site>;
    /// Deletes a site row; errors if the row does not exist.
    async fn delete(&self, id: Uuid) -> RosterResult<()>;
}

/// CRUD access to the `guards` table.
#[async_trait]
pub trait GuardRepository: Send + Sync {
    /// Inserts a guard row.
    async fn create(&self, guard: Guard) -> RosterResult<Guard>;
    /// Fetches a guard by id, or `None` if it does not exist.
    async fn get(&self, id: Uuid) -> RosterResult<Option<Guard>>;
    /// Lists all guards.
    async fn list(&self) -> RosterResult<Vec<Guard>>;
    /// Replaces a guard row; errors if the row does not exist.
    async fn update(&self, guard: Guard) -> RosterResult<Guard>;
}

/// CRUD access to the `shifts` table.
#[async_trait]
pub trait ShiftRepository: Send + Sync {
    /// Inserts a shift row.
    async fn create(&self, shift: Shift) -> RosterResult<Shift>;
    /// Fetches a shift row by id, or `None` if it does not exist.
    async fn get(&self, id: Uuid) -> RosterResult<Option<Shift>>;
    /// Replaces a shift row; errors if the row does not exist.
    async fn update(&self, shift: Shift) -> RosterResult<Shift>;
    /// Deletes a shift row; errors if the row does not exist.
    async fn delete(&self, id: Uuid) -> RosterResult<()>;
    /// Lists the permanent shift rows for one (site, shift type).
    async fn list_for_site(&self, site_id: Uuid, shift_type: ShiftType)
    -> RosterResult<Vec<Shift>>;
    /// Lists every shift row with a non-null guard reference.
    async fn list_assigned(&self) -> RosterResult<Vec<Shift>>;
    /// Lists the temporary rows for one site valid on one date.
    async fn list_temporary_for_date(
        &self,
        site_id: Uuid,
        date: NaiveDate,
    ) -> RosterResult<Vec<Shift>>;
}

/// Read/delete access to the `attendance_records` table.
///
/// Attendance rows are created by the separate marking flow; the allocation
/// layer only reads and deletes them, plus seeds them in tests.
#[async_trait]
pub trait AttendanceRepository: Send + Sync {
    /// Inserts an attendance row.
    async fn create(&self, record: AttendanceRecord) -> RosterResult<AttendanceRecord>;
    /// Deletes an attendance row; errors if the row does not exist.
    async fn delete(&self, id: Uuid) -> RosterResult<()>;
    /// Lists every attendance row for one date.
    async fn list_for_date(&self, date: NaiveDate) -> RosterResult<Vec<AttendanceRecord>>;
    /// Lists attendance rows on one date at one site/shift for exactly the
    /// given guards. Used as the pre-removal conflict check.
    async fn find_for_guards(
        &self,
        date: NaiveDate,
        site_id: Uuid,
        shift_type: ShiftType,
        guard_ids: &[Uuid],
    ) -> RosterResult<Vec<AttendanceRecord>>;
}

/// Write-once access to the `invoices` table.
#[async_trait]
pub trait InvoiceRepository: Send + Sync {
    /// Inserts an invoice snapshot.
    async fn create(&self, invoice: Invoice) -> RosterResult<Invoice>;
    /// Fetches an invoice by id, or `None` if it does not exist.
    async fn get(&self, id: Uuid) -> RosterResult<Option<Invoice>>;
    /// Lists all invoices.
    async fn list(&self) -> RosterResult<Vec<Invoice>>;
}

/// CRUD access to the `temporary_staffing_requests` table.
#[async_trait]
pub trait TemporaryRequestRepository: Send + Sync {
    /// Inserts a request row.
    async fn create(&self, request: TemporaryStaffingRequest)
    -> RosterResult<TemporaryStaffingRequest>;
    /// Lists all request rows.
    async fn list(&self) -> RosterResult<Vec<TemporaryStaffingRequest>>;
    /// Replaces a request row; errors if the row does not exist.
    async fn update(
        &self,
        request: TemporaryStaffingRequest,
    ) -> RosterResult<TemporaryStaffingRequest>;
}

/// Access to the application-level `users` table.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Inserts a user row.
    async fn create(&self, user: User) -> RosterResult<User>;
    /// Finds a user by email, or `None` if no row matches.
    async fn find_by_email(&self, email: &str) -> RosterResult<Option<User>>;
}

/// Creates authentication identities for provisioned users.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Creates an identity for the email/password pair and returns its id.
    /// Email confirmation is bypassed when `confirm_email` is false.
    async fn create_identity(
        &self,
        email: &str,
        password: &str,
        confirm_email: bool,
    ) -> RosterResult<Uuid>;
}
