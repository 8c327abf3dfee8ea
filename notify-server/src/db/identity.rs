//! SQLite-backed identity store
//!
//! Login identities live in `identities`: argon2 password hash, disabled
//! flag and the role claim mirrored from the staff document.

use async_trait::async_trait;
use shared::models::RoleClaim;
use sqlx::SqlitePool;

use super::{StoreError, StoreResult};
use crate::BoxError;
use crate::gateway::{IdentityStore, IdentityUpdate};

/// Identity row (without the password hash)
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Identity {
    pub id: String,
    pub email: String,
    pub display_name: String,
    pub disabled: bool,
    pub role_claim: Option<String>,
}

#[derive(Clone)]
pub struct SqliteIdentityStore {
    pool: SqlitePool,
}

impl SqliteIdentityStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find(&self, id: &str) -> StoreResult<Option<Identity>> {
        let identity = sqlx::query_as::<_, Identity>(
            "SELECT id, email, display_name, disabled, role_claim FROM identities WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(identity)
    }

    /// Check a password; disabled identities never verify
    pub async fn verify_password(&self, email: &str, password: &str) -> StoreResult<Option<String>> {
        let row: Option<(String, String, bool)> = sqlx::query_as(
            "SELECT id, hashed_password, disabled FROM identities WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.and_then(|(id, hash, disabled)| {
            (!disabled && verify_password(password, &hash)).then_some(id)
        }))
    }

    async fn create(&self, email: &str, password: &str, display_name: &str) -> StoreResult<String> {
        let id = uuid::Uuid::new_v4().simple().to_string();
        let hashed = hash_password(password).map_err(|e| StoreError::Hash(e.to_string()))?;
        let now = shared::util::now_millis();

        let result = sqlx::query(
            "INSERT INTO identities (id, email, display_name, hashed_password, disabled, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, 0, ?5, ?5)",
        )
        .bind(&id)
        .bind(email)
        .bind(display_name)
        .bind(hashed)
        .bind(now)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(id),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Err(StoreError::Conflict(format!("email {email} already in use")))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn update(&self, id: &str, update: &IdentityUpdate) -> StoreResult<()> {
        let now = shared::util::now_millis();
        let result = sqlx::query(
            "UPDATE identities SET email = COALESCE(?1, email), display_name = COALESCE(?2, display_name), updated_at = ?3 WHERE id = ?4",
        )
        .bind(update.email.as_deref())
        .bind(update.display_name.as_deref())
        .bind(now)
        .bind(id)
        .execute(&self.pool)
        .await;

        match result {
            Ok(done) => ensure_found(done.rows_affected(), id),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Err(StoreError::Conflict("email already in use".to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn disable(&self, id: &str, disabled: bool) -> StoreResult<()> {
        let now = shared::util::now_millis();
        let rows = sqlx::query("UPDATE identities SET disabled = ?1, updated_at = ?2 WHERE id = ?3")
            .bind(disabled)
            .bind(now)
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();
        ensure_found(rows, id)
    }

    async fn set_claim(&self, id: &str, claim: &RoleClaim) -> StoreResult<()> {
        let now = shared::util::now_millis();
        let rows = sqlx::query("UPDATE identities SET role_claim = ?1, updated_at = ?2 WHERE id = ?3")
            .bind(claim.role.as_str())
            .bind(now)
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();
        ensure_found(rows, id)
    }
}

fn ensure_found(rows: u64, id: &str) -> StoreResult<()> {
    if rows == 0 {
        return Err(StoreError::NotFound(format!("identity {id}")));
    }
    Ok(())
}

fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    use argon2::password_hash::SaltString;
    use argon2::password_hash::rand_core::OsRng;
    use argon2::{Argon2, PasswordHasher};
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

fn verify_password(password: &str, hash: &str) -> bool {
    use argon2::{Argon2, PasswordHash, PasswordVerifier};
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

#[async_trait]
impl IdentityStore for SqliteIdentityStore {
    async fn create_identity(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> Result<String, BoxError> {
        Ok(self.create(email, password, display_name).await?)
    }

    async fn update_identity(&self, id: &str, update: &IdentityUpdate) -> Result<(), BoxError> {
        Ok(self.update(id, update).await?)
    }

    async fn set_disabled(&self, id: &str, disabled: bool) -> Result<(), BoxError> {
        Ok(self.disable(id, disabled).await?)
    }

    async fn set_authorization_claim(&self, id: &str, claim: &RoleClaim) -> Result<(), BoxError> {
        Ok(self.set_claim(id, claim).await?)
    }
}
