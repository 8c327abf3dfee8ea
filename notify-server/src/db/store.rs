//! SQLite-backed document store

use async_trait::async_trait;
use shared::models::{Staff, StaffRole};
use sqlx::SqlitePool;

use super::{staff, tables};
use crate::BoxError;
use crate::gateway::{DocumentStore, StaffProfile};

#[derive(Clone)]
pub struct SqliteDocumentStore {
    pool: SqlitePool,
}

impl SqliteDocumentStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl DocumentStore for SqliteDocumentStore {
    async fn find_staff(&self, id: &str) -> Result<Option<Staff>, BoxError> {
        Ok(staff::find_by_id(&self.pool, id).await?)
    }

    async fn staff_by_role(
        &self,
        role: &StaffRole,
        active_only: bool,
    ) -> Result<Vec<Staff>, BoxError> {
        Ok(staff::find_by_role(&self.pool, role, active_only).await?)
    }

    async fn insert_staff(&self, record: &Staff) -> Result<(), BoxError> {
        Ok(staff::insert(&self.pool, record).await?)
    }

    async fn update_staff_profile(&self, id: &str, profile: &StaffProfile) -> Result<(), BoxError> {
        Ok(staff::update_profile(
            &self.pool,
            id,
            &profile.email,
            &profile.display_name,
            &profile.role,
        )
        .await?)
    }

    async fn set_staff_active(
        &self,
        id: &str,
        is_active: bool,
        deleted_at: Option<i64>,
    ) -> Result<(), BoxError> {
        Ok(staff::set_active(&self.pool, id, is_active, deleted_at).await?)
    }

    async fn set_push_token(&self, id: &str, token: Option<&str>) -> Result<(), BoxError> {
        Ok(staff::set_fcm_token(&self.pool, id, token).await?)
    }

    async fn clear_assignments(&self, staff_id: &str) -> Result<u64, BoxError> {
        Ok(tables::clear_assignments(&self.pool, staff_id).await?)
    }

    async fn ping(&self) -> Result<(), BoxError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
