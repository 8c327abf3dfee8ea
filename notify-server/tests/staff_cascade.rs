//! Staff cascade: ordering, idempotence and batch atomicity

mod common;

use std::sync::Arc;

use common::{Fixture, HookedStore, StoreHook};
use notify_server::ServiceError;
use notify_server::db::SqliteDocumentStore;
use notify_server::staff::{CreateStaff, StaffCascadeManager, UpdateStaff};
use shared::error::ErrorCode;
use shared::models::{DiningTable, StaffRole};

async fn assigned_fixture() -> Fixture {
    let fx = Fixture::new().await;
    fx.add_staff_with_identity("s1", StaffRole::Server).await;
    fx.add_staff_with_identity("s2", StaffRole::Server).await;
    fx.add_table("t1", Some("s1")).await;
    fx.add_table("t2", Some("s1")).await;
    fx.add_table("t3", Some("s2")).await;
    fx.add_table("t4", None).await;
    fx
}

fn app_code(err: ServiceError) -> ErrorCode {
    match err {
        ServiceError::App(e) => e.code,
        ServiceError::External(e) => panic!("expected app error, got external: {e}"),
    }
}

#[tokio::test]
async fn scenario_d_deactivation_releases_tables() {
    let fx = assigned_fixture().await;
    let manager = fx.state().staff_manager();

    manager.set_active("s1", false).await.unwrap();

    assert_eq!(fx.table("t1").await.assigned_server_id, None);
    assert_eq!(fx.table("t2").await.assigned_server_id, None);
    assert_eq!(fx.table("t3").await.assigned_server_id.as_deref(), Some("s2"));
    assert!(!fx.staff("s1").await.is_active);
    assert!(fx.identity.find("s1").await.unwrap().unwrap().disabled);
}

#[tokio::test]
async fn deactivation_twice_is_idempotent() {
    let fx = assigned_fixture().await;
    let manager = fx.state().staff_manager();

    manager.set_active("s1", false).await.unwrap();
    let after_first = (fx.table("t1").await, fx.table("t2").await, fx.table("t3").await);

    manager.set_active("s1", false).await.unwrap();
    let after_second = (fx.table("t1").await, fx.table("t2").await, fx.table("t3").await);

    assert_eq!(after_first, after_second);
    assert_eq!(after_second.0.assigned_server_id, None);
    assert_eq!(after_second.1.assigned_server_id, None);
}

#[tokio::test]
async fn failed_batch_leaves_tables_untouched() {
    let fx = assigned_fixture().await;
    let broken = HookedStore::new(
        SqliteDocumentStore::new(fx.db.pool.clone()),
        StoreHook::FailRelease,
    );
    let manager = StaffCascadeManager::new(fx.identity.clone(), Arc::new(broken));

    let err = manager.set_active("s1", false).await.unwrap_err();
    assert!(matches!(err, ServiceError::External(_)));

    assert_eq!(fx.table("t1").await.assigned_server_id.as_deref(), Some("s1"));
    assert_eq!(fx.table("t2").await.assigned_server_id.as_deref(), Some("s1"));
    assert_eq!(fx.table("t3").await.assigned_server_id.as_deref(), Some("s2"));
}

#[tokio::test]
async fn deactivation_releases_tables_changed_between_steps() {
    let fx = assigned_fixture().await;
    let store = HookedStore::new(
        SqliteDocumentStore::new(fx.db.pool.clone()),
        StoreHook::WriteAfterStaffUpdate(vec![
            DiningTable {
                id: "t4".into(),
                assigned_server_id: Some("s1".into()),
            },
            DiningTable {
                id: "t2".into(),
                assigned_server_id: Some("s2".into()),
            },
        ]),
    );
    let manager = StaffCascadeManager::new(fx.identity.clone(), Arc::new(store));

    manager.set_active("s1", false).await.unwrap();

    assert_eq!(fx.table("t1").await.assigned_server_id, None);
    assert_eq!(fx.table("t4").await.assigned_server_id, None);
    assert_eq!(fx.table("t2").await.assigned_server_id.as_deref(), Some("s2"));
    assert_eq!(fx.table("t3").await.assigned_server_id.as_deref(), Some("s2"));
    assert!(!fx.staff("s1").await.is_active);
}

#[tokio::test]
async fn removed_staff_cannot_be_reactivated() {
    let fx = assigned_fixture().await;
    let manager = fx.state().staff_manager();

    manager.remove("s1").await.unwrap();
    let err = manager.set_active("s1", true).await.unwrap_err();
    assert_eq!(app_code(err), ErrorCode::StaffRemoved);

    let removed = fx.staff("s1").await;
    assert!(!removed.is_active);
    assert!(removed.deleted_at.is_some());
    assert!(fx.identity.find("s1").await.unwrap().unwrap().disabled);

    // deactivating again stays allowed
    manager.set_active("s1", false).await.unwrap();
}

#[tokio::test]
async fn activation_does_not_touch_tables() {
    let fx = assigned_fixture().await;
    let manager = fx.state().staff_manager();

    manager.set_active("s1", false).await.unwrap();
    fx.add_table("t1", Some("s1")).await;
    manager.set_active("s1", true).await.unwrap();

    assert_eq!(fx.table("t1").await.assigned_server_id.as_deref(), Some("s1"));
    assert!(fx.staff("s1").await.is_active);
    assert!(!fx.identity.find("s1").await.unwrap().unwrap().disabled);
}

#[tokio::test]
async fn remove_soft_deletes_and_releases_tables() {
    let fx = assigned_fixture().await;
    let manager = fx.state().staff_manager();

    manager.remove("s1").await.unwrap();

    let removed = fx.staff("s1").await;
    assert!(!removed.is_active);
    assert!(removed.deleted_at.is_some());
    assert!(fx.identity.find("s1").await.unwrap().unwrap().disabled);
    assert_eq!(fx.table("t1").await.assigned_server_id, None);
    assert_eq!(fx.table("t2").await.assigned_server_id, None);
}

#[tokio::test]
async fn unknown_staff_is_not_found() {
    let fx = assigned_fixture().await;
    let manager = fx.state().staff_manager();

    let err = manager.set_active("ghost", false).await.unwrap_err();
    assert_eq!(app_code(err), ErrorCode::StaffNotFound);
    let err = manager.remove("ghost").await.unwrap_err();
    assert_eq!(app_code(err), ErrorCode::StaffNotFound);
}

#[tokio::test]
async fn create_writes_identity_document_and_claim() {
    let fx = Fixture::new().await;
    let manager = fx.state().staff_manager();

    let staff = manager
        .create(CreateStaff {
            email: "paul@example.com".into(),
            password: "secret1".into(),
            display_name: "Paul".into(),
            role: StaffRole::Chef,
        })
        .await
        .unwrap();

    let stored = fx.staff(&staff.id).await;
    assert_eq!(stored.display_name, "Paul");
    assert_eq!(stored.role, StaffRole::Chef);
    assert!(stored.is_active);

    let identity = fx.identity.find(&staff.id).await.unwrap().unwrap();
    assert_eq!(identity.role_claim.as_deref(), Some("Chef"));
    assert_eq!(
        fx.identity
            .verify_password("paul@example.com", "secret1")
            .await
            .unwrap(),
        Some(staff.id.clone())
    );
}

#[tokio::test]
async fn create_with_taken_email_is_conflict() {
    let fx = Fixture::new().await;
    let manager = fx.state().staff_manager();
    let input = CreateStaff {
        email: "paul@example.com".into(),
        password: "secret1".into(),
        display_name: "Paul".into(),
        role: StaffRole::Chef,
    };

    manager.create(input.clone()).await.unwrap();
    let err = manager.create(input).await.unwrap_err();
    assert_eq!(app_code(err), ErrorCode::StaffEmailTaken);
}

#[tokio::test]
async fn update_syncs_profile_and_claim() {
    let fx = assigned_fixture().await;
    let manager = fx.state().staff_manager();

    manager
        .update(UpdateStaff {
            staff_id: "s1".into(),
            email: "marie@example.com".into(),
            display_name: "Marie".into(),
            role: StaffRole::Chef,
        })
        .await
        .unwrap();

    let stored = fx.staff("s1").await;
    assert_eq!(stored.email, "marie@example.com");
    assert_eq!(stored.display_name, "Marie");
    assert_eq!(stored.role, StaffRole::Chef);

    let identity = fx.identity.find("s1").await.unwrap().unwrap();
    assert_eq!(identity.email, "marie@example.com");
    assert_eq!(identity.role_claim.as_deref(), Some("Chef"));
}

#[tokio::test]
async fn push_token_registration() {
    let fx = assigned_fixture().await;
    let manager: StaffCascadeManager = fx.state().staff_manager();

    manager.register_push_token("s1", Some("device-1")).await.unwrap();
    assert_eq!(fx.staff("s1").await.push_token(), Some("device-1"));

    manager.register_push_token("s1", None).await.unwrap();
    assert_eq!(fx.staff("s1").await.push_token(), None);
}
