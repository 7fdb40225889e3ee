//! Application state for the roster engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::CompanyConfig;
use crate::feed::ChangeFeed;
use crate::store::{
    AttendanceRepository, AuthProvider, GuardRepository, InMemoryAuthProvider, InMemoryStore,
    InvoiceRepository, ShiftRepository, SiteRepository, TemporaryRequestRepository, UserRepository,
};

/// Shared application state.
///
/// Holds the company settings plus one repository handle per entity, so the
/// handlers depend only on the trait boundary and tests can swap any piece
/// for a fake.
#[derive(Clone)]
pub struct AppState {
    company: Arc<CompanyConfig>,
    sites: Arc<dyn SiteRepository>,
    guards: Arc<dyn GuardRepository>,
    shifts: Arc<dyn ShiftRepository>,
    attendance: Arc<dyn AttendanceRepository>,
    invoices: Arc<dyn InvoiceRepository>,
    temporary_requests: Arc<dyn TemporaryRequestRepository>,
    users: Arc<dyn UserRepository>,
    auth: Arc<dyn AuthProvider>,
    feed: Arc<ChangeFeed>,
}

impl AppState {
    /// Creates state over a fresh in-memory store and auth provider.
    pub fn new(company: CompanyConfig) -> Self {
        Self::with_auth(company, Arc::new(InMemoryAuthProvider::new()))
    }

    /// Creates state over a fresh in-memory store with the given auth
    /// provider. Used by tests that need provisioning to fail.
    pub fn with_auth(company: CompanyConfig, auth: Arc<dyn AuthProvider>) -> Self {
        let store = Arc::new(InMemoryStore::new());
        let feed = store.feed();
        Self {
            company: Arc::new(company),
            sites: store.clone(),
            guards: store.clone(),
            shifts: store.clone(),
            attendance: store.clone(),
            invoices: store.clone(),
            temporary_requests: store.clone(),
            users: store,
            auth,
            feed,
        }
    }

    /// Returns the company settings.
    pub fn company(&self) -> &CompanyConfig {
        &self.company
    }

    /// Returns the site repository.
    pub fn sites(&self) -> &dyn SiteRepository {
        self.sites.as_ref()
    }

    /// Returns the guard repository.
    pub fn guards(&self) -> &dyn GuardRepository {
        self.guards.as_ref()
    }

    /// Returns the shift repository.
    pub fn shifts(&self) -> &dyn ShiftRepository {
        self.shifts.as_ref()
    }

    /// Returns the attendance repository.
    pub fn attendance(&self) -> &dyn AttendanceRepository {
        self.attendance.as_ref()
    }

    /// Returns the invoice repository.
    pub fn invoices(&self) -> &dyn InvoiceRepository {
        self.invoices.as_ref()
    }

    /// Returns the temporary staffing request repository.
    pub fn temporary_requests(&self) -> &dyn TemporaryRequestRepository {
        self.temporary_requests.as_ref()
    }

    /// Returns the user repository.
    pub fn users(&self) -> &dyn UserRepository {
        self.users.as_ref()
    }

    /// Returns the auth provider.
    pub fn auth(&self) -> &dyn AuthProvider {
        self.auth.as_ref()
    }

    /// Returns the change feed the store publishes to.
    pub fn feed(&self) -> &ChangeFeed {
        &self.feed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_clone() {
        // Verify AppState can be cloned (required for axum state)
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }
}
