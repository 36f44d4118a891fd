use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    // Never serialized into API responses
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub display_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(email: String, password_hash: String, display_name: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            email,
            password_hash,
            display_name,
            created_at: Utc::now(),
        }
    }
}

/// Persisted proof that a refresh token was issued and not yet revoked.
/// `expires_at` always equals the expiry embedded in the token itself.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RefreshTokenRecord {
    pub token: String,
    pub user_id: Uuid,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl RefreshTokenRecord {
    pub fn new(token: String, user_id: Uuid, expires_at: DateTime<Utc>) -> Self {
        Self {
            token,
            user_id,
            expires_at,
            created_at: Utc::now(),
        }
    }

    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Done,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "PENDING",
            TaskStatus::InProgress => "IN_PROGRESS",
            TaskStatus::Done => "DONE",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    pub fn new(user_id: Uuid, title: String, description: Option<String>, status: TaskStatus) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title,
            description,
            status: status.as_str().to_string(),
            user_id,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_refresh_record_expiry() {
        let record = RefreshTokenRecord::new(
            "token".to_string(),
            Uuid::new_v4(),
            Utc::now() + Duration::days(7),
        );
        assert!(!record.is_expired());

        let stale = RefreshTokenRecord::new(
            "token".to_string(),
            Uuid::new_v4(),
            Utc::now() - Duration::seconds(1),
        );
        assert!(stale.is_expired());
    }

    #[test]
    fn test_user_serialization_hides_password_hash() {
        let user = User::new(
            "alice@example.com".to_string(),
            "$2b$12$hash".to_string(),
            Some("Alice".to_string()),
        );
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["email"], "alice@example.com");
    }

    #[test]
    fn test_task_status_round_trip() {
        let status: TaskStatus = serde_json::from_str("\"IN_PROGRESS\"").unwrap();
        assert_eq!(status, TaskStatus::InProgress);
        assert_eq!(status.as_str(), "IN_PROGRESS");

        assert!(serde_json::from_str::<TaskStatus>("\"STARTED\"").is_err());
    }
}
