//! Shared fixtures for integration tests
#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use shared::models::{DiningTable, NotificationPayload, Recipients, Staff, StaffRole};

use notify_server::BoxError;
use notify_server::config::Config;
use notify_server::db::{DbService, SqliteDocumentStore, SqliteIdentityStore, staff, tables};
use notify_server::gateway::{DocumentStore, PushGateway, StaffProfile};
use notify_server::state::AppState;

pub const JWT_SECRET: &str = "integration-test-secret-0123456789abcdef";

/// Push gateway that records every call
#[derive(Default)]
pub struct RecordingGateway {
    calls: Mutex<Vec<(Recipients, NotificationPayload)>>,
    fail: bool,
}

impl RecordingGateway {
    pub fn failing() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn calls(&self) -> Vec<(Recipients, NotificationPayload)> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl PushGateway for RecordingGateway {
    async fn send(
        &self,
        recipients: &Recipients,
        payload: &NotificationPayload,
    ) -> Result<(), BoxError> {
        self.calls.lock().push((recipients.clone(), payload.clone()));
        if self.fail {
            return Err("push gateway unavailable".into());
        }
        Ok(())
    }
}

/// What a [`HookedStore`] does around the regular store calls
pub enum StoreHook {
    /// Run the table release, then roll it back and fail before commit
    FailRelease,
    /// Write these tables right after the staff document is updated, as
    /// another writer would between cascade steps
    WriteAfterStaffUpdate(Vec<DiningTable>),
}

/// SQLite document store with a hook injected into the cascade sequence
pub struct HookedStore {
    inner: SqliteDocumentStore,
    hook: StoreHook,
}

impl HookedStore {
    pub fn new(inner: SqliteDocumentStore, hook: StoreHook) -> Self {
        Self { inner, hook }
    }
}

#[async_trait]
impl DocumentStore for HookedStore {
    async fn find_staff(&self, id: &str) -> Result<Option<Staff>, BoxError> {
        self.inner.find_staff(id).await
    }

    async fn staff_by_role(
        &self,
        role: &StaffRole,
        active_only: bool,
    ) -> Result<Vec<Staff>, BoxError> {
        self.inner.staff_by_role(role, active_only).await
    }

    async fn insert_staff(&self, record: &Staff) -> Result<(), BoxError> {
        self.inner.insert_staff(record).await
    }

    async fn update_staff_profile(&self, id: &str, profile: &StaffProfile) -> Result<(), BoxError> {
        self.inner.update_staff_profile(id, profile).await
    }

    async fn set_staff_active(
        &self,
        id: &str,
        is_active: bool,
        deleted_at: Option<i64>,
    ) -> Result<(), BoxError> {
        self.inner.set_staff_active(id, is_active, deleted_at).await?;
        if let StoreHook::WriteAfterStaffUpdate(writes) = &self.hook {
            for table in writes {
                tables::upsert(self.inner.pool(), table).await?;
            }
        }
        Ok(())
    }

    async fn set_push_token(&self, id: &str, token: Option<&str>) -> Result<(), BoxError> {
        self.inner.set_push_token(id, token).await
    }

    async fn clear_assignments(&self, staff_id: &str) -> Result<u64, BoxError> {
        match &self.hook {
            StoreHook::FailRelease => {
                let mut tx = self.inner.pool().begin().await?;
                let released = tables::release_assignments(&mut *tx, staff_id).await?;
                tx.rollback().await?;
                Err(format!("commit failed after releasing {released} tables").into())
            }
            StoreHook::WriteAfterStaffUpdate(_) => self.inner.clear_assignments(staff_id).await,
        }
    }

    async fn ping(&self) -> Result<(), BoxError> {
        self.inner.ping().await
    }
}

/// In-memory database with concrete store handles
pub struct Fixture {
    pub db: DbService,
    pub documents: Arc<SqliteDocumentStore>,
    pub identity: Arc<SqliteIdentityStore>,
    pub push: Arc<RecordingGateway>,
}

impl Fixture {
    pub async fn new() -> Self {
        Self::with_gateway(RecordingGateway::default()).await
    }

    pub async fn with_gateway(gateway: RecordingGateway) -> Self {
        let db = DbService::in_memory().await.unwrap();
        Self {
            documents: Arc::new(SqliteDocumentStore::new(db.pool.clone())),
            identity: Arc::new(SqliteIdentityStore::new(db.pool.clone())),
            push: Arc::new(gateway),
            db,
        }
    }

    pub fn state(&self) -> AppState {
        AppState::with_collaborators(
            Config::for_development("sqlite::memory:", JWT_SECRET),
            self.identity.clone(),
            self.documents.clone(),
            self.push.clone(),
        )
    }

    /// Staff document only (no identity)
    pub async fn add_staff(&self, id: &str, role: StaffRole, is_active: bool, token: Option<&str>) {
        let record = Staff {
            id: id.to_string(),
            display_name: format!("Staff {id}"),
            email: format!("{id}@example.com"),
            role,
            is_active,
            fcm_token: token.map(String::from),
            deleted_at: None,
        };
        staff::insert(&self.db.pool, &record).await.unwrap();
    }

    /// Staff document plus a matching enabled identity
    pub async fn add_staff_with_identity(&self, id: &str, role: StaffRole) {
        self.add_staff(id, role.clone(), true, None).await;
        let now = shared::util::now_millis();
        sqlx::query(
            "INSERT INTO identities (id, email, display_name, hashed_password, disabled, role_claim, created_at, updated_at) VALUES (?1, ?2, ?3, 'x', 0, ?4, ?5, ?5)",
        )
        .bind(id)
        .bind(format!("{id}@example.com"))
        .bind(format!("Staff {id}"))
        .bind(role.as_str())
        .bind(now)
        .execute(&self.db.pool)
        .await
        .unwrap();
    }

    pub async fn add_table(&self, id: &str, server: Option<&str>) {
        let table = DiningTable {
            id: id.to_string(),
            assigned_server_id: server.map(String::from),
        };
        tables::upsert(&self.db.pool, &table).await.unwrap();
    }

    pub async fn table(&self, id: &str) -> DiningTable {
        tables::find_by_id(&self.db.pool, id).await.unwrap().unwrap()
    }

    pub async fn staff(&self, id: &str) -> Staff {
        staff::find_by_id(&self.db.pool, id).await.unwrap().unwrap()
    }
}
