//! Collaborator interfaces
//!
//! The notification core and the staff cascade only ever talk to these
//! three traits. Handles are created once in `main` and injected through
//! [`AppState`](crate::state::AppState).

pub mod fcm;

use async_trait::async_trait;
use shared::models::{NotificationPayload, Recipients, RoleClaim, Staff, StaffRole};

use crate::BoxError;

pub use fcm::{FcmGateway, LogPushGateway};

/// Profile fields an identity update may change
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentityUpdate {
    pub email: Option<String>,
    pub display_name: Option<String>,
}

/// Identity provider: credentials, disabled flag and authorization claims
#[async_trait]
pub trait IdentityStore: Send + Sync {
    /// Create a login identity, returning its id (also the staff id)
    async fn create_identity(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> Result<String, BoxError>;

    async fn update_identity(&self, id: &str, update: &IdentityUpdate) -> Result<(), BoxError>;

    async fn set_disabled(&self, id: &str, disabled: bool) -> Result<(), BoxError>;

    /// Replace the identity's custom claims with `{role}`
    async fn set_authorization_claim(&self, id: &str, claim: &RoleClaim) -> Result<(), BoxError>;
}

/// Profile fields written by a staff update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaffProfile {
    pub email: String,
    pub display_name: String,
    pub role: StaffRole,
}

/// Document store holding the `users` and `tables` collections
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn find_staff(&self, id: &str) -> Result<Option<Staff>, BoxError>;

    /// Staff with the given role, in insertion order
    async fn staff_by_role(&self, role: &StaffRole, active_only: bool)
    -> Result<Vec<Staff>, BoxError>;

    async fn insert_staff(&self, staff: &Staff) -> Result<(), BoxError>;

    async fn update_staff_profile(&self, id: &str, profile: &StaffProfile) -> Result<(), BoxError>;

    /// Set `isActive`; `deleted_at` is written only when present
    async fn set_staff_active(
        &self,
        id: &str,
        is_active: bool,
        deleted_at: Option<i64>,
    ) -> Result<(), BoxError>;

    async fn set_push_token(&self, id: &str, token: Option<&str>) -> Result<(), BoxError>;

    /// Clear `assignedServerId` on every table that currently references
    /// `staff_id`, as one atomic write; returns the number released
    async fn clear_assignments(&self, staff_id: &str) -> Result<u64, BoxError>;

    /// Connectivity check
    async fn ping(&self) -> Result<(), BoxError>;
}

/// Push delivery service
#[async_trait]
pub trait PushGateway: Send + Sync {
    /// Send one payload to one token or a token set, in a single call
    async fn send(
        &self,
        recipients: &Recipients,
        payload: &NotificationPayload,
    ) -> Result<(), BoxError>;
}
