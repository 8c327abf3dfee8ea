//! Staff command payloads
//!
//! Wire DTOs keep every field optional so that a missing field is reported
//! as `RequiredField` instead of a JSON parse error. `validate()` turns them
//! into the checked inputs of [`StaffCascadeManager`](super::StaffCascadeManager).

use serde::Deserialize;
use shared::error::AppError;
use shared::models::StaffRole;

use crate::utils::validation::{
    MAX_ID_LEN, MAX_NAME_LEN, MAX_TOKEN_LEN, require_email, require_password, require_text,
};

/// `{staffId, isActive?}`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetActiveCommand {
    pub staff_id: Option<String>,
    /// Absent means deactivate
    pub is_active: Option<bool>,
}

impl SetActiveCommand {
    pub fn validate(&self) -> Result<(String, bool), AppError> {
        let staff_id = require_text(self.staff_id.as_deref(), "staffId", MAX_ID_LEN)?;
        Ok((staff_id.to_string(), self.is_active.unwrap_or(false)))
    }
}

/// `{staffId}`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveStaffCommand {
    pub staff_id: Option<String>,
}

impl RemoveStaffCommand {
    pub fn validate(&self) -> Result<String, AppError> {
        Ok(require_text(self.staff_id.as_deref(), "staffId", MAX_ID_LEN)?.to_string())
    }
}

/// `{email, password, displayName, role}`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStaffCommand {
    pub email: Option<String>,
    pub password: Option<String>,
    pub display_name: Option<String>,
    pub role: Option<String>,
}

/// Validated create input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateStaff {
    pub email: String,
    pub password: String,
    pub display_name: String,
    pub role: StaffRole,
}

impl CreateStaffCommand {
    pub fn validate(&self) -> Result<CreateStaff, AppError> {
        let email = require_email(self.email.as_deref(), "email")?;
        let password = require_password(self.password.as_deref(), "password")?;
        let display_name = require_text(self.display_name.as_deref(), "displayName", MAX_NAME_LEN)?;
        let role = require_text(self.role.as_deref(), "role", MAX_ID_LEN)?;
        Ok(CreateStaff {
            email: email.to_string(),
            password: password.to_string(),
            display_name: display_name.to_string(),
            role: StaffRole::from(role),
        })
    }
}

/// `{staffId, email, displayName, role}`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStaffCommand {
    pub staff_id: Option<String>,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub role: Option<String>,
}

/// Validated update input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateStaff {
    pub staff_id: String,
    pub email: String,
    pub display_name: String,
    pub role: StaffRole,
}

impl UpdateStaffCommand {
    pub fn validate(&self) -> Result<UpdateStaff, AppError> {
        let staff_id = require_text(self.staff_id.as_deref(), "staffId", MAX_ID_LEN)?;
        let email = require_email(self.email.as_deref(), "email")?;
        let display_name = require_text(self.display_name.as_deref(), "displayName", MAX_NAME_LEN)?;
        let role = require_text(self.role.as_deref(), "role", MAX_ID_LEN)?;
        Ok(UpdateStaff {
            staff_id: staff_id.to_string(),
            email: email.to_string(),
            display_name: display_name.to_string(),
            role: StaffRole::from(role),
        })
    }
}

/// `{fcmToken}`; `null` clears the token
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PushTokenCommand {
    pub fcm_token: Option<String>,
}

impl PushTokenCommand {
    pub fn validate(&self) -> Result<Option<String>, AppError> {
        match self.fcm_token.as_deref() {
            None => Ok(None),
            Some(token) => Ok(Some(
                require_text(Some(token), "fcmToken", MAX_TOKEN_LEN)?.to_string(),
            )),
        }
    }
}
