//! Push notification value objects

use serde::{Deserialize, Serialize};

/// Sound marker sent with every notification
pub const DEFAULT_SOUND: &str = "default";

/// Notification payload: title, body and sound marker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationPayload {
    pub title: String,
    pub body: String,
    pub sound: String,
}

impl NotificationPayload {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            sound: DEFAULT_SOUND.to_string(),
        }
    }
}

/// Addressing for one gateway call: a single device or an ordered token set
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recipients {
    Single(String),
    Multicast(Vec<String>),
}

impl Recipients {
    /// All tokens carried by this call, in order
    pub fn tokens(&self) -> &[String] {
        match self {
            Self::Single(token) => std::slice::from_ref(token),
            Self::Multicast(tokens) => tokens,
        }
    }

    pub fn len(&self) -> usize {
        self.tokens().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens().is_empty()
    }
}
