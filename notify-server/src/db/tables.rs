//! Dining Table Repository (`tables`)

use super::StoreResult;
use shared::models::DiningTable;
use sqlx::{SqliteConnection, SqlitePool};

pub async fn find_by_id(pool: &SqlitePool, id: &str) -> StoreResult<Option<DiningTable>> {
    let table = sqlx::query_as::<_, DiningTable>(
        "SELECT id, assigned_server_id FROM dining_tables WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(table)
}

/// Insert or replace a table and its assignment
pub async fn upsert(pool: &SqlitePool, table: &DiningTable) -> StoreResult<()> {
    let now = shared::util::now_millis();
    sqlx::query(
        "INSERT INTO dining_tables (id, assigned_server_id, updated_at) VALUES (?1, ?2, ?3) ON CONFLICT(id) DO UPDATE SET assigned_server_id = excluded.assigned_server_id, updated_at = excluded.updated_at",
    )
    .bind(&table.id)
    .bind(&table.assigned_server_id)
    .bind(now)
    .execute(pool)
    .await?;
    Ok(())
}

/// Release every table assigned to `staff_id` in one transaction
///
/// Returns the number of tables released.
pub async fn clear_assignments(pool: &SqlitePool, staff_id: &str) -> StoreResult<u64> {
    let mut tx = pool.begin().await?;
    let released = release_assignments(&mut *tx, staff_id).await?;
    tx.commit().await?;
    Ok(released)
}

/// Set-based release on an open connection; the caller owns commit/rollback
pub async fn release_assignments(conn: &mut SqliteConnection, staff_id: &str) -> StoreResult<u64> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE dining_tables SET assigned_server_id = NULL, updated_at = ?1 WHERE assigned_server_id = ?2",
    )
    .bind(now)
    .bind(staff_id)
    .execute(&mut *conn)
    .await?
    .rows_affected();
    Ok(rows)
}
