//! Application state
//!
//! Built once in `main` from [`Config`]; holds only immutable collaborator
//! handles shared by every request.

use std::sync::Arc;
use std::time::Duration;

use crate::BoxError;
use crate::config::Config;
use crate::db::{DbService, SqliteDocumentStore, SqliteIdentityStore};
use crate::gateway::{DocumentStore, FcmGateway, IdentityStore, LogPushGateway, PushGateway};
use crate::notify::{NotificationDispatcher, OrderStatusTrigger, RecipientResolver};
use crate::staff::StaffCascadeManager;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub identity: Arc<dyn IdentityStore>,
    pub documents: Arc<dyn DocumentStore>,
    pub push: Arc<dyn PushGateway>,
}

impl AppState {
    /// Open the database and build the collaborators described by `config`
    pub async fn new(config: Config) -> Result<Self, BoxError> {
        let db = DbService::new(&config.database_url).await?;

        let push: Arc<dyn PushGateway> = match &config.fcm_server_key {
            Some(key) => Arc::new(FcmGateway::new(
                config.fcm_endpoint.clone(),
                key.clone(),
                Duration::from_millis(config.push_timeout_ms),
            )?),
            None => {
                tracing::warn!("FCM_SERVER_KEY not set, push notifications are only logged");
                Arc::new(LogPushGateway)
            }
        };

        Ok(Self::with_collaborators(
            config,
            Arc::new(SqliteIdentityStore::new(db.pool.clone())),
            Arc::new(SqliteDocumentStore::new(db.pool)),
            push,
        ))
    }

    /// Assemble state from explicit collaborator handles
    pub fn with_collaborators(
        config: Config,
        identity: Arc<dyn IdentityStore>,
        documents: Arc<dyn DocumentStore>,
        push: Arc<dyn PushGateway>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            identity,
            documents,
            push,
        }
    }

    pub fn order_trigger(&self) -> OrderStatusTrigger {
        OrderStatusTrigger::new(
            RecipientResolver::new(self.documents.clone()),
            NotificationDispatcher::new(self.push.clone()),
            self.config.new_order_threshold_minutes,
        )
    }

    pub fn staff_manager(&self) -> StaffCascadeManager {
        StaffCascadeManager::new(self.identity.clone(), self.documents.clone())
    }
}
