//! In-memory implementations of the repository traits.
//!
//! [`InMemoryStore`] backs every table with a `RwLock`'d map and publishes
//! row changes to its [`ChangeFeed`], mirroring how the managed database
//! emits realtime notifications. It is the store the test suites run
//! against; the shift table additionally counts insert/delete calls so the
//! reconciler's call-count guarantees can be asserted directly.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::error::{RosterError, RosterResult};
use crate::feed::{ChangeEvent, ChangeFeed, ChangeOp};
use crate::models::{
    AttendanceRecord, Guard, Invoice, Shift, ShiftType, Site, TemporaryStaffingRequest, User,
};

use super::{
    AttendanceRepository, AuthProvider, GuardRepository, InvoiceRepository, ShiftRepository,
    SiteRepository, TemporaryRequestRepository, UserRepository,
};

fn read_table<T>(lock: &RwLock<T>) -> RosterResult<RwLockReadGuard<'_, T>> {
    lock.read().map_err(|_| RosterError::Storage {
        message: "store lock poisoned".to_string(),
    })
}

fn write_table<T>(lock: &RwLock<T>) -> RosterResult<RwLockWriteGuard<'_, T>> {
    lock.write().map_err(|_| RosterError::Storage {
        message: "store lock poisoned".to_string(),
    })
}

/// An in-memory stand-in for the managed database.
#[derive(Default)]
pub struct InMemoryStore {
    sites: RwLock<HashMap<Uuid, Site>>,
    guards: RwLock<HashMap<Uuid, Guard>>,
    shifts: RwLock<HashMap<Uuid, Shift>>,
    attendance: RwLock<HashMap<Uuid, AttendanceRecord>>,
    invoices: RwLock<HashMap<Uuid, Invoice>>,
    temporary_requests: RwLock<HashMap<Uuid, TemporaryStaffingRequest>>,
    users: RwLock<HashMap<Uuid, User>>,
    feed: Arc<ChangeFeed>,
    shift_inserts: AtomicUsize,
    shift_deletes: AtomicUsize,
}

impl InMemoryStore {
    /// Creates an empty store with its own change feed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the change feed this store publishes row changes to.
    pub fn feed(&self) -> Arc<ChangeFeed> {
        Arc::clone(&self.feed)
    }

    /// Number of shift insert calls issued so far.
    pub fn shift_insert_calls(&self) -> usize {
        self.shift_inserts.load(Ordering::SeqCst)
    }

    /// Number of shift delete calls issued so far.
    pub fn shift_delete_calls(&self) -> usize {
        self.shift_deletes.load(Ordering::SeqCst)
    }

    fn emit(&self, table: &str, op: ChangeOp, row_id: Uuid, site_id: Option<Uuid>) {
        self.feed.publish(ChangeEvent {
            table: table.to_string(),
            op,
            row_id,
            site_id,
        });
    }
}

#[async_trait]
impl SiteRepository for InMemoryStore {
    async fn create(&self, site: Site) -> RosterResult<Site> {
        write_table(&self.sites)?.insert(site.id, site.clone());
        self.emit("sites", ChangeOp::Insert, site.id, Some(site.id));
        Ok(site)
    }

    async fn get(&self, id: Uuid) -> RosterResult<Option<Site>> {
        Ok(read_table(&self.sites)?.get(&id).cloned())
    }

    async fn list(&self) -> RosterResult<Vec<Site>> {
        let mut sites: Vec<Site> = read_table(&self.sites)?.values().cloned().collect();
        sites.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(sites)
    }

    async fn update(&self, site: Site) -> RosterResult<Site> {
        let mut table = write_table(&self.sites)?;
        if !table.contains_key(&site.id) {
            return Err(RosterError::SiteNotFound { id: site.id });
        }
        table.insert(site.id, site.clone());
        drop(table);
        self.emit("sites", ChangeOp::Update, site.id, Some(site.id));
        Ok(site)
    }

    async fn delete(&self, id: Uuid) -> RosterResult<()> {
        let removed = write_table(&self.sites)?.remove(&id);
        match removed {
            Some(_) => {
                self.emit("sites", ChangeOp::Delete, id, Some(id));
                Ok(())
            }
            None => Err(RosterError::SiteNotFound { id }),
        }
    }
}

#[async_trait]
impl GuardRepository for InMemoryStore {
    async fn create(&self, guard: Guard) -> RosterResult<Guard> {
        write_table(&self.guards)?.insert(guard.id, guard.clone());
        self.emit("guards", ChangeOp::Insert, guard.id, None);
        Ok(guard)
    }

    async fn get(&self, id: Uuid) -> RosterResult<Option<Guard>> {
        Ok(read_table(&self.guards)?.get(&id).cloned())
    }

    async fn list(&self) -> RosterResult<Vec<Guard>> {
        let mut guards: Vec<Guard> = read_table(&self.guards)?.values().cloned().collect();
        guards.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(guards)
    }

    async fn update(&self, guard: Guard) -> RosterResult<Guard> {
        let mut table = write_table(&self.guards)?;
        if !table.contains_key(&guard.id) {
            return Err(RosterError::GuardNotFound { id: guard.id });
        }
        table.insert(guard.id, guard.clone());
        drop(table);
        self.emit("guards", ChangeOp::Update, guard.id, None);
        Ok(guard)
    }
}

#[async_trait]
impl ShiftRepository for InMemoryStore {
    async fn create(&self, shift: Shift) -> RosterResult<Shift> {
        self.shift_inserts.fetch_add(1, Ordering::SeqCst);
        write_table(&self.shifts)?.insert(shift.id, shift.clone());
        self.emit("shifts", ChangeOp::Insert, shift.id, Some(shift.site_id));
        Ok(shift)
    }

    async fn get(&self, id: Uuid) -> RosterResult<Option<Shift>> {
        Ok(read_table(&self.shifts)?.get(&id).cloned())
    }

    async fn update(&self, shift: Shift) -> RosterResult<Shift> {
        let mut table = write_table(&self.shifts)?;
        if !table.contains_key(&shift.id) {
            return Err(RosterError::ShiftNotFound { id: shift.id });
        }
        table.insert(shift.id, shift.clone());
        drop(table);
        self.emit("shifts", ChangeOp::Update, shift.id, Some(shift.site_id));
        Ok(shift)
    }

    async fn delete(&self, id: Uuid) -> RosterResult<()> {
        self.shift_deletes.fetch_add(1, Ordering::SeqCst);
        let removed = write_table(&self.shifts)?.remove(&id);
        match removed {
            Some(shift) => {
                self.emit("shifts", ChangeOp::Delete, id, Some(shift.site_id));
                Ok(())
            }
            None => Err(RosterError::ShiftNotFound { id }),
        }
    }

    async fn list_for_site(
        &self,
        site_id: Uuid,
        shift_type: ShiftType,
    ) -> RosterResult<Vec<Shift>> {
        Ok(read_table(&self.shifts)?
            .values()
            .filter(|s| s.site_id == site_id && s.shift_type == shift_type && !s.is_temporary)
            .cloned()
            .collect())
    }

    async fn list_assigned(&self) -> RosterResult<Vec<Shift>> {
        Ok(read_table(&self.shifts)?
            .values()
            .filter(|s| s.guard_id.is_some())
            .cloned()
            .collect())
    }

    async fn list_temporary_for_date(
        &self,
        site_id: Uuid,
        date: NaiveDate,
    ) -> RosterResult<Vec<Shift>> {
        Ok(read_table(&self.shifts)?
            .values()
            .filter(|s| s.site_id == site_id && s.is_temporary && s.valid_for == Some(date))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl AttendanceRepository for InMemoryStore {
    async fn create(&self, record: AttendanceRecord) -> RosterResult<AttendanceRecord> {
        write_table(&self.attendance)?.insert(record.id, record.clone());
        self.emit(
            "attendance_records",
            ChangeOp::Insert,
            record.id,
            Some(record.site_id),
        );
        Ok(record)
    }

    async fn delete(&self, id: Uuid) -> RosterResult<()> {
        let removed = write_table(&self.attendance)?.remove(&id);
        match removed {
            Some(record) => {
                self.emit(
                    "attendance_records",
                    ChangeOp::Delete,
                    id,
                    Some(record.site_id),
                );
                Ok(())
            }
            None => Err(RosterError::AttendanceNotFound { id }),
        }
    }

    async fn list_for_date(&self, date: NaiveDate) -> RosterResult<Vec<AttendanceRecord>> {
        Ok(read_table(&self.attendance)?
            .values()
            .filter(|r| r.date == date)
            .cloned()
            .collect())
    }

    async fn find_for_guards(
        &self,
        date: NaiveDate,
        site_id: Uuid,
        shift_type: ShiftType,
        guard_ids: &[Uuid],
    ) -> RosterResult<Vec<AttendanceRecord>> {
        Ok(read_table(&self.attendance)?
            .values()
            .filter(|r| {
                r.date == date
                    && r.site_id == site_id
                    && r.shift_type == shift_type
                    && guard_ids.contains(&r.guard_id)
            })
            .cloned()
            .collect())
    }
}

#[async_trait]
impl InvoiceRepository for InMemoryStore {
    async fn create(&self, invoice: Invoice) -> RosterResult<Invoice> {
        write_table(&self.invoices)?.insert(invoice.id, invoice.clone());
        self.emit(
            "invoices",
            ChangeOp::Insert,
            invoice.id,
            Some(invoice.site_id),
        );
        Ok(invoice)
    }

    async fn get(&self, id: Uuid) -> RosterResult<Option<Invoice>> {
        Ok(read_table(&self.invoices)?.get(&id).cloned())
    }

    async fn list(&self) -> RosterResult<Vec<Invoice>> {
        let mut invoices: Vec<Invoice> = read_table(&self.invoices)?.values().cloned().collect();
        invoices.sort_by(|a, b| a.invoice_number.cmp(&b.invoice_number));
        Ok(invoices)
    }
}

#[async_trait]
impl TemporaryRequestRepository for InMemoryStore {
    async fn create(
        &self,
        request: TemporaryStaffingRequest,
    ) -> RosterResult<TemporaryStaffingRequest> {
        write_table(&self.temporary_requests)?.insert(request.id, request.clone());
        self.emit(
            "temporary_staffing_requests",
            ChangeOp::Insert,
            request.id,
            Some(request.site_id),
        );
        Ok(request)
    }

    async fn list(&self) -> RosterResult<Vec<TemporaryStaffingRequest>> {
        Ok(read_table(&self.temporary_requests)?
            .values()
            .cloned()
            .collect())
    }

    async fn update(
        &self,
        request: TemporaryStaffingRequest,
    ) -> RosterResult<TemporaryStaffingRequest> {
        let mut table = write_table(&self.temporary_requests)?;
        if !table.contains_key(&request.id) {
            return Err(RosterError::Storage {
                message: format!("temporary request not found: {}", request.id),
            });
        }
        table.insert(request.id, request.clone());
        drop(table);
        self.emit(
            "temporary_staffing_requests",
            ChangeOp::Update,
            request.id,
            Some(request.site_id),
        );
        Ok(request)
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn create(&self, user: User) -> RosterResult<User> {
        write_table(&self.users)?.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> RosterResult<Option<User>> {
        Ok(read_table(&self.users)?
            .values()
            .find(|u| u.email == email)
            .cloned())
    }
}

/// An in-memory identity provider for the admin provisioning endpoint.
///
/// Rejects duplicate emails the way a hosted auth service would.
#[derive(Default)]
pub struct InMemoryAuthProvider {
    identities: RwLock<HashMap<String, Uuid>>,
}

impl InMemoryAuthProvider {
    /// Creates a provider with no identities.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AuthProvider for InMemoryAuthProvider {
    async fn create_identity(
        &self,
        email: &str,
        password: &str,
        _confirm_email: bool,
    ) -> RosterResult<Uuid> {
        if password.is_empty() {
            return Err(RosterError::Auth {
                message: "password must not be empty".to_string(),
            });
        }
        let mut identities = write_table(&self.identities)?;
        if identities.contains_key(email) {
            return Err(RosterError::Auth {
                message: format!("identity already exists for {}", email),
            });
        }
        let id = Uuid::new_v4();
        identities.insert(email.to_string(), id);
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AttendanceStatus, GstRegime, GuardStatus};
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn make_site(name: &str) -> Site {
        Site {
            id: Uuid::new_v4(),
            name: name.to_string(),
            address: "somewhere".to_string(),
            gst_regime: GstRegime::Gst,
            gst_rate: dec("18"),
            requirements: vec![],
        }
    }

    fn make_guard(name: &str) -> Guard {
        Guard {
            id: Uuid::new_v4(),
            name: name.to_string(),
            badge_number: "B-0001".to_string(),
            status: GuardStatus::Active,
            monthly_pay: dec("14500"),
        }
    }

    #[tokio::test]
    async fn test_site_crud_round_trip() {
        let store = InMemoryStore::new();
        let site = SiteRepository::create(&store, make_site("Mill")).await.unwrap();

        let fetched = SiteRepository::get(&store, site.id).await.unwrap();
        assert_eq!(fetched, Some(site.clone()));

        SiteRepository::delete(&store, site.id).await.unwrap();
        assert!(SiteRepository::get(&store, site.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_site_list_sorted_by_name() {
        let store = InMemoryStore::new();
        SiteRepository::create(&store, make_site("Zinc Works")).await.unwrap();
        SiteRepository::create(&store, make_site("Apex Tower")).await.unwrap();

        let names: Vec<String> = SiteRepository::list(&store)
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["Apex Tower", "Zinc Works"]);
    }

    #[tokio::test]
    async fn test_update_missing_site_errors() {
        let store = InMemoryStore::new();
        let result = SiteRepository::update(&store, make_site("Ghost")).await;
        assert!(matches!(result, Err(RosterError::SiteNotFound { .. })));
    }

    #[tokio::test]
    async fn test_shift_insert_and_delete_calls_are_counted() {
        let store = InMemoryStore::new();
        let site_id = Uuid::new_v4();
        let shift =
            ShiftRepository::create(&store, Shift::assigned(site_id, ShiftType::Day, Uuid::new_v4()))
                .await
                .unwrap();
        ShiftRepository::delete(&store, shift.id).await.unwrap();

        assert_eq!(store.shift_insert_calls(), 1);
        assert_eq!(store.shift_delete_calls(), 1);
    }

    #[tokio::test]
    async fn test_list_for_site_excludes_temporary_rows() {
        let store = InMemoryStore::new();
        let site_id = Uuid::new_v4();
        let date = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();

        ShiftRepository::create(&store, Shift::assigned(site_id, ShiftType::Day, Uuid::new_v4()))
            .await
            .unwrap();
        ShiftRepository::create(
            &store,
            Shift::temporary(site_id, ShiftType::Day, "Gunman".to_string(), dec("950"), date),
        )
        .await
        .unwrap();

        let permanent = store.list_for_site(site_id, ShiftType::Day).await.unwrap();
        assert_eq!(permanent.len(), 1);
        assert!(!permanent[0].is_temporary);

        let temporary = store.list_temporary_for_date(site_id, date).await.unwrap();
        assert_eq!(temporary.len(), 1);
        assert!(temporary[0].is_temporary);
    }

    #[tokio::test]
    async fn test_find_for_guards_filters_on_all_keys() {
        let store = InMemoryStore::new();
        let site_id = Uuid::new_v4();
        let guard_a = Uuid::new_v4();
        let guard_b = Uuid::new_v4();
        let date = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();

        AttendanceRepository::create(
            &store,
            AttendanceRecord::marked(date, site_id, ShiftType::Day, guard_a, AttendanceStatus::Present),
        )
        .await
        .unwrap();
        // Different shift type; must not match.
        AttendanceRepository::create(
            &store,
            AttendanceRecord::marked(date, site_id, ShiftType::Night, guard_b, AttendanceStatus::Present),
        )
        .await
        .unwrap();

        let conflicts = store
            .find_for_guards(date, site_id, ShiftType::Day, &[guard_a, guard_b])
            .await
            .unwrap();
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].guard_id, guard_a);
    }

    #[tokio::test]
    async fn test_store_publishes_changes_to_feed() {
        let store = InMemoryStore::new();
        let feed = store.feed();
        let mut rx = feed.subscribe("guards", None);

        GuardRepository::create(&store, make_guard("Ravi Patil")).await.unwrap();
        let event = rx.try_recv().unwrap();
        assert_eq!(event.table, "guards");
        assert_eq!(event.op, ChangeOp::Insert);
    }

    #[tokio::test]
    async fn test_auth_provider_rejects_duplicate_email() {
        let auth = InMemoryAuthProvider::new();
        auth.create_identity("a@example.com", "secret123", false)
            .await
            .unwrap();
        let result = auth.create_identity("a@example.com", "secret456", false).await;
        assert!(matches!(result, Err(RosterError::Auth { .. })));
    }
}
