pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod tasks;

use std::sync::Arc;
use std::time::Duration;
use actix_web::HttpResponse;

pub use error::AppError;
pub type Result<T> = std::result::Result<T, AppError>;
pub use config::Settings;

pub use auth::{AuthService, AuthUser, TokenCodec};
pub use db::{DbOperations, RefreshTokenRecord, Task, TaskStatus, User};

/// Health check endpoint handler
/// Returns a JSON response with server status and timestamp
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Application state shared across all components
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Settings>,
    pub db: DbOperations,
    pub auth: Arc<AuthService>,
}

impl AppState {
    pub async fn new(config: Settings) -> Result<Self> {
        let db = DbOperations::new_with_options(
            &config.database.url,
            config.database.max_connections,
            Duration::from_secs(5),
        )
        .await?;

        let auth = AuthService::new(
            db.clone(),
            TokenCodec::new(&config.auth),
            config.auth.password_min_length,
        );

        Ok(Self {
            config: Arc::new(config),
            db,
            auth: Arc::new(auth),
        })
    }

    pub async fn shutdown(&self) -> Result<()> {
        self.db.pool().close().await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::postgres::PgPoolOptions;

    #[tokio::test]
    async fn test_app_state_clone_shares_resources() {
        let config = Settings::new_for_test().expect("Failed to load test config");

        let pool = Arc::new(
            PgPoolOptions::new()
                .connect_lazy(&config.database.url)
                .expect("Failed to create lazy pool"),
        );
        let db = DbOperations::new(pool);
        let auth = AuthService::new(
            db.clone(),
            TokenCodec::new(&config.auth),
            config.auth.password_min_length,
        );

        let state = AppState {
            config: Arc::new(config),
            db,
            auth: Arc::new(auth),
        };

        let cloned = state.clone();

        // Verify Arc references are shared
        assert!(Arc::ptr_eq(&state.config, &cloned.config));
        assert!(Arc::ptr_eq(&state.auth, &cloned.auth));
    }
}
