//! Staff cascade manager
//!
//! Every operation runs identity store → staff document → table release, in
//! that order, and stops at the first failure. Tables are released with one
//! set-based write keyed on the staff id, so a table assigned concurrently
//! is still released and one reassigned elsewhere is left alone. Role changes are mirrored
//! into the identity's authorization claim within the same operation.

use std::sync::Arc;

use shared::error::{AppError, ErrorCode};
use shared::models::{RoleClaim, Staff};

use super::commands::{CreateStaff, UpdateStaff};
use crate::BoxError;
use crate::db::StoreError;
use crate::error::{ServiceError, ServiceResult};
use crate::gateway::{DocumentStore, IdentityStore, IdentityUpdate, StaffProfile};

#[derive(Clone)]
pub struct StaffCascadeManager {
    identity: Arc<dyn IdentityStore>,
    documents: Arc<dyn DocumentStore>,
}

/// Map a collaborator failure, surfacing "not found" as a client error
fn for_staff(staff_id: &str) -> impl Fn(BoxError) -> ServiceError + '_ {
    move |err| {
        if StoreError::is_not_found(err.as_ref()) {
            ServiceError::App(AppError::staff_not_found(staff_id))
        } else {
            ServiceError::External(err)
        }
    }
}

/// Like [`for_staff`], plus duplicate emails as a conflict
fn for_identity(staff_id: &str) -> impl Fn(BoxError) -> ServiceError + '_ {
    move |err| email_taken(err).unwrap_or_else(for_staff(staff_id))
}

fn email_taken(err: BoxError) -> Result<ServiceError, BoxError> {
    if StoreError::is_conflict(err.as_ref()) {
        Ok(ServiceError::App(AppError::new(ErrorCode::StaffEmailTaken)))
    } else {
        Err(err)
    }
}

impl StaffCascadeManager {
    pub fn new(identity: Arc<dyn IdentityStore>, documents: Arc<dyn DocumentStore>) -> Self {
        Self {
            identity,
            documents,
        }
    }

    /// Create identity, staff document and role claim; returns the new staff
    pub async fn create(&self, input: CreateStaff) -> ServiceResult<Staff> {
        let id = self
            .identity
            .create_identity(&input.email, &input.password, &input.display_name)
            .await
            .map_err(|err| email_taken(err).unwrap_or_else(ServiceError::External))?;

        let staff = Staff {
            id,
            display_name: input.display_name,
            email: input.email,
            role: input.role,
            is_active: true,
            fcm_token: None,
            deleted_at: None,
        };
        self.documents.insert_staff(&staff).await?;

        let claim = RoleClaim {
            role: staff.role.clone(),
        };
        self.identity
            .set_authorization_claim(&staff.id, &claim)
            .await?;

        tracing::info!(staff_id = %staff.id, role = %staff.role, "Staff created");
        Ok(staff)
    }

    /// Update identity profile, staff document and role claim
    pub async fn update(&self, input: UpdateStaff) -> ServiceResult<()> {
        let staff_id = input.staff_id.as_str();

        let identity_update = IdentityUpdate {
            email: Some(input.email.clone()),
            display_name: Some(input.display_name.clone()),
        };
        self.identity
            .update_identity(staff_id, &identity_update)
            .await
            .map_err(for_identity(staff_id))?;

        let profile = StaffProfile {
            email: input.email,
            display_name: input.display_name,
            role: input.role,
        };
        self.documents
            .update_staff_profile(staff_id, &profile)
            .await
            .map_err(for_staff(staff_id))?;

        let claim = RoleClaim {
            role: profile.role.clone(),
        };
        self.identity
            .set_authorization_claim(staff_id, &claim)
            .await
            .map_err(for_staff(staff_id))?;

        tracing::info!(staff_id = %staff_id, role = %profile.role, "Staff updated");
        Ok(())
    }

    /// Enable or disable a staff account
    ///
    /// Deactivation also releases every table assigned to the staff member.
    /// A removed account cannot be reactivated.
    pub async fn set_active(&self, staff_id: &str, is_active: bool) -> ServiceResult<()> {
        if is_active {
            let staff = self
                .documents
                .find_staff(staff_id)
                .await?
                .ok_or_else(|| AppError::staff_not_found(staff_id))?;
            if staff.deleted_at.is_some() {
                return Err(AppError::new(ErrorCode::StaffRemoved)
                    .with_detail("staffId", staff_id)
                    .into());
            }
        }

        self.identity
            .set_disabled(staff_id, !is_active)
            .await
            .map_err(for_staff(staff_id))?;
        self.documents
            .set_staff_active(staff_id, is_active, None)
            .await
            .map_err(for_staff(staff_id))?;

        if is_active {
            tracing::info!(staff_id = %staff_id, "Staff activated");
            return Ok(());
        }

        let released = self.documents.clear_assignments(staff_id).await?;
        tracing::info!(staff_id = %staff_id, released, "Staff deactivated");
        Ok(())
    }

    /// Soft-delete a staff account and release its tables
    pub async fn remove(&self, staff_id: &str) -> ServiceResult<()> {
        self.identity
            .set_disabled(staff_id, true)
            .await
            .map_err(for_staff(staff_id))?;

        let deleted_at = shared::util::now_millis();
        self.documents
            .set_staff_active(staff_id, false, Some(deleted_at))
            .await
            .map_err(for_staff(staff_id))?;

        let released = self.documents.clear_assignments(staff_id).await?;
        tracing::info!(staff_id = %staff_id, released, "Staff removed");
        Ok(())
    }

    /// Store or clear the caller's device push token
    pub async fn register_push_token(&self, staff_id: &str, token: Option<&str>) -> ServiceResult<()> {
        self.documents
            .set_push_token(staff_id, token)
            .await
            .map_err(for_staff(staff_id))?;
        tracing::info!(staff_id = %staff_id, cleared = token.is_none(), "Push token registered");
        Ok(())
    }
}
