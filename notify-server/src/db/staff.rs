//! Staff Repository (`users`)

use super::{StoreError, StoreResult};
use shared::models::{Staff, StaffRole};
use sqlx::SqlitePool;

const COLUMNS: &str = "id, display_name, email, role, is_active, fcm_token, deleted_at";

pub async fn find_by_id(pool: &SqlitePool, id: &str) -> StoreResult<Option<Staff>> {
    let staff = sqlx::query_as::<_, Staff>(&format!("SELECT {COLUMNS} FROM users WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(staff)
}

/// Staff with the given role; `active_only` excludes inactive accounts
pub async fn find_by_role(
    pool: &SqlitePool,
    role: &StaffRole,
    active_only: bool,
) -> StoreResult<Vec<Staff>> {
    let sql = if active_only {
        format!("SELECT {COLUMNS} FROM users WHERE role = ? AND is_active = 1 ORDER BY rowid")
    } else {
        format!("SELECT {COLUMNS} FROM users WHERE role = ? ORDER BY rowid")
    };
    let rows = sqlx::query_as::<_, Staff>(&sql)
        .bind(role.as_str())
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn insert(pool: &SqlitePool, staff: &Staff) -> StoreResult<()> {
    let now = shared::util::now_millis();
    let result = sqlx::query(
        "INSERT INTO users (id, display_name, email, role, is_active, fcm_token, deleted_at, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8)",
    )
    .bind(&staff.id)
    .bind(&staff.display_name)
    .bind(&staff.email)
    .bind(staff.role.as_str())
    .bind(staff.is_active)
    .bind(&staff.fcm_token)
    .bind(staff.deleted_at)
    .bind(now)
    .execute(pool)
    .await;

    match result {
        Ok(_) => Ok(()),
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Err(StoreError::Conflict(
            format!("staff {} already exists", staff.id),
        )),
        Err(e) => Err(e.into()),
    }
}

pub async fn update_profile(
    pool: &SqlitePool,
    id: &str,
    email: &str,
    display_name: &str,
    role: &StaffRole,
) -> StoreResult<()> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE users SET email = ?1, display_name = ?2, role = ?3, updated_at = ?4 WHERE id = ?5",
    )
    .bind(email)
    .bind(display_name)
    .bind(role.as_str())
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?
    .rows_affected();
    ensure_found(rows, id)
}

/// Set the active flag; `deleted_at` is only written when given
pub async fn set_active(
    pool: &SqlitePool,
    id: &str,
    is_active: bool,
    deleted_at: Option<i64>,
) -> StoreResult<()> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE users SET is_active = ?1, deleted_at = COALESCE(?2, deleted_at), updated_at = ?3 WHERE id = ?4",
    )
    .bind(is_active)
    .bind(deleted_at)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?
    .rows_affected();
    ensure_found(rows, id)
}

pub async fn set_fcm_token(pool: &SqlitePool, id: &str, token: Option<&str>) -> StoreResult<()> {
    let now = shared::util::now_millis();
    let rows = sqlx::query("UPDATE users SET fcm_token = ?1, updated_at = ?2 WHERE id = ?3")
        .bind(token)
        .bind(now)
        .bind(id)
        .execute(pool)
        .await?
        .rows_affected();
    ensure_found(rows, id)
}

fn ensure_found(rows: u64, id: &str) -> StoreResult<()> {
    if rows == 0 {
        return Err(StoreError::NotFound(format!("staff {id}")));
    }
    Ok(())
}
