//! Notify server configuration

use crate::BoxError;

/// Default push gateway endpoint (FCM legacy HTTP API)
pub const DEFAULT_FCM_ENDPOINT: &str = "https://fcm.googleapis.com/fcm/send";

/// Server configuration, loaded once at start-up
#[derive(Debug, Clone)]
pub struct Config {
    /// Environment: development | staging | production
    pub environment: String,
    /// HTTP port
    pub http_port: u16,
    /// SQLite connection URL (document + identity store)
    pub database_url: String,
    /// HS256 secret for caller tokens
    pub jwt_secret: String,
    /// Push gateway server key; `None` selects the logging gateway
    pub fcm_server_key: Option<String>,
    /// Push gateway URL
    pub fcm_endpoint: String,
    /// Push HTTP client timeout (milliseconds)
    pub push_timeout_ms: u64,
    /// Max age of a `pending` order for the new-order alert (minutes)
    pub new_order_threshold_minutes: f64,
    pub log_level: String,
    pub log_json: bool,
    pub log_dir: Option<String>,
}

impl Config {
    /// Require a secret env var: must be set and non-empty in non-development environments.
    fn require_secret(name: &str, environment: &str) -> Result<String, BoxError> {
        let val = match std::env::var(name) {
            Ok(v) => v,
            Err(_) => {
                if environment != "development" {
                    return Err(format!("{name} must be set in {environment} environment").into());
                }
                format!("dev-{name}-not-for-production")
            }
        };
        if val.is_empty() && environment != "development" {
            return Err(format!("{name} must not be empty in {environment} environment").into());
        }
        Ok(val)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, BoxError> {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let fcm_server_key = std::env::var("FCM_SERVER_KEY")
            .ok()
            .filter(|s| !s.is_empty());
        if fcm_server_key.is_none() && environment != "development" {
            return Err(format!("FCM_SERVER_KEY must be set in {environment} environment").into());
        }

        let new_order_threshold_minutes = match std::env::var("NEW_ORDER_THRESHOLD_MINUTES") {
            Ok(raw) => raw
                .parse::<f64>()
                .ok()
                .filter(|m| m.is_finite() && *m >= 0.0)
                .ok_or_else(|| format!("NEW_ORDER_THRESHOLD_MINUTES is invalid: {raw}"))?,
            Err(_) => crate::notify::staleness::DEFAULT_THRESHOLD_MINUTES,
        };

        Ok(Self {
            environment: environment.clone(),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:notify.db".into()),
            jwt_secret: Self::require_secret("JWT_SECRET", &environment)?,
            fcm_server_key,
            fcm_endpoint: std::env::var("FCM_ENDPOINT")
                .unwrap_or_else(|_| DEFAULT_FCM_ENDPOINT.into()),
            push_timeout_ms: std::env::var("PUSH_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(10_000),
            new_order_threshold_minutes,
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_json: std::env::var("LOG_JSON")
                .map(|v| matches!(v.as_str(), "1" | "true" | "TRUE"))
                .unwrap_or(false),
            log_dir: std::env::var("LOG_DIR").ok().filter(|s| !s.is_empty()),
        })
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Configuration for tests and local tooling
    pub fn for_development(database_url: impl Into<String>, jwt_secret: impl Into<String>) -> Self {
        Self {
            environment: "development".into(),
            http_port: 0,
            database_url: database_url.into(),
            jwt_secret: jwt_secret.into(),
            fcm_server_key: None,
            fcm_endpoint: DEFAULT_FCM_ENDPOINT.into(),
            push_timeout_ms: 10_000,
            new_order_threshold_minutes: crate::notify::staleness::DEFAULT_THRESHOLD_MINUTES,
            log_level: "info".into(),
            log_json: false,
            log_dir: None,
        }
    }
}
