//! Recipient resolver: staff → device push tokens

use std::sync::Arc;

use shared::models::StaffRole;

use crate::BoxError;
use crate::gateway::DocumentStore;

#[derive(Clone)]
pub struct RecipientResolver {
    store: Arc<dyn DocumentStore>,
}

impl RecipientResolver {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Push tokens of every staff member with `role`
    ///
    /// Staff without a token are skipped and duplicate tokens are dropped,
    /// keeping the first occurrence. An empty result is not an error.
    pub async fn tokens_for_role(
        &self,
        role: &StaffRole,
        active_only: bool,
    ) -> Result<Vec<String>, BoxError> {
        let staff = self.store.staff_by_role(role, active_only).await?;

        let mut tokens: Vec<String> = Vec::with_capacity(staff.len());
        for member in &staff {
            if let Some(token) = member.push_token()
                && !tokens.iter().any(|t| t == token)
            {
                tokens.push(token.to_string());
            }
        }

        if tokens.is_empty() {
            tracing::info!(role = %role, staff = staff.len(), "No push tokens for role");
        }
        Ok(tokens)
    }

    /// Push token of one staff member; `None` when missing or tokenless
    pub async fn token_for_staff(&self, staff_id: &str) -> Result<Option<String>, BoxError> {
        let token = match self.store.find_staff(staff_id).await? {
            Some(staff) => staff.push_token().map(String::from),
            None => {
                tracing::info!(staff_id = %staff_id, "Staff not found for push token lookup");
                return Ok(None);
            }
        };
        if token.is_none() {
            tracing::info!(staff_id = %staff_id, "Staff has no push token");
        }
        Ok(token)
    }
}
