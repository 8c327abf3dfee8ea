//! Staff Model

use serde::{Deserialize, Serialize};
use std::fmt;

/// Staff role
///
/// `Chef` and `Server` drive notification routing; any other role name is
/// carried through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StaffRole {
    Chef,
    Server,
    Other(String),
}

impl StaffRole {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Chef => "Chef",
            Self::Server => "Server",
            Self::Other(name) => name,
        }
    }
}

impl From<String> for StaffRole {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Chef" => Self::Chef,
            "Server" => Self::Server,
            _ => Self::Other(value),
        }
    }
}

impl From<&str> for StaffRole {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<StaffRole> for String {
    fn from(role: StaffRole) -> Self {
        match role {
            StaffRole::Other(name) => name,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for StaffRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Staff account as stored in the `users` collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Staff {
    pub id: String,
    pub display_name: String,
    pub email: String,
    #[cfg_attr(feature = "db", sqlx(try_from = "String"))]
    pub role: StaffRole,
    pub is_active: bool,
    /// Device push token, written by the staff member's client
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fcm_token: Option<String>,
    /// Soft-delete timestamp (Unix millis)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<i64>,
}

impl Staff {
    /// Push token, ignoring empty strings
    pub fn push_token(&self) -> Option<&str> {
        self.fcm_token.as_deref().filter(|t| !t.is_empty())
    }
}

/// Authorization claim mirrored into the identity provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleClaim {
    pub role: StaffRole,
}
