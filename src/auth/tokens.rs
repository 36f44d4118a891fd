use crate::config::AuthConfig;
use crate::error::{AppError, AuthError};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{encode, decode, Header, EncodingKey, DecodingKey, Validation, Algorithm};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,  // User ID
    pub exp: i64,     // Expiration time
    pub iat: i64,     // Issued at
}

/// Decoded subject of a verified access token.
#[derive(Debug, Clone, Copy)]
pub struct AccessClaims {
    pub user_id: Uuid,
}

/// Decoded subject and embedded expiry of a verified refresh token.
#[derive(Debug, Clone, Copy)]
pub struct RefreshClaims {
    pub user_id: Uuid,
    pub expires_at: DateTime<Utc>,
}

/// Signs and verifies the two token classes. Access and refresh tokens use
/// distinct secrets, so leaking one class never allows forging the other.
pub struct TokenCodec {
    access_encoding: EncodingKey,
    access_decoding: DecodingKey,
    refresh_encoding: EncodingKey,
    refresh_decoding: DecodingKey,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenCodec {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            access_encoding: EncodingKey::from_secret(config.access_secret.as_bytes()),
            access_decoding: DecodingKey::from_secret(config.access_secret.as_bytes()),
            refresh_encoding: EncodingKey::from_secret(config.refresh_secret.as_bytes()),
            refresh_decoding: DecodingKey::from_secret(config.refresh_secret.as_bytes()),
            access_ttl: Duration::minutes(config.access_ttl_minutes),
            refresh_ttl: Duration::days(config.refresh_ttl_days),
        }
    }

    pub fn issue_access(&self, user_id: Uuid) -> Result<String, AppError> {
        self.issue(user_id, self.access_ttl, &self.access_encoding)
    }

    pub fn issue_refresh(&self, user_id: Uuid) -> Result<String, AppError> {
        self.issue(user_id, self.refresh_ttl, &self.refresh_encoding)
    }

    pub fn verify_access(&self, token: &str) -> Result<AccessClaims, AppError> {
        let claims = Self::decode_claims(token, &self.access_decoding)?;
        Ok(AccessClaims {
            user_id: Self::parse_subject(&claims)?,
        })
    }

    pub fn verify_refresh(&self, token: &str) -> Result<RefreshClaims, AppError> {
        let claims = Self::decode_claims(token, &self.refresh_decoding)?;
        let expires_at = DateTime::from_timestamp(claims.exp, 0)
            .ok_or(AuthError::TokenInvalid)?;
        Ok(RefreshClaims {
            user_id: Self::parse_subject(&claims)?,
            expires_at,
        })
    }

    fn issue(
        &self,
        user_id: Uuid,
        ttl: Duration,
        key: &EncodingKey,
    ) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            exp: (now + ttl).timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::default(), &claims, key)
            .map_err(|e| AppError::InternalError(format!("Failed to sign token: {}", e)))
    }

    fn decode_claims(token: &str, key: &DecodingKey) -> Result<Claims, AppError> {
        // exp is enforced exactly, without clock leeway
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let data = decode::<Claims>(token, key, &validation)
            .map_err(|_| AuthError::TokenInvalid)?;

        Ok(data.claims)
    }

    fn parse_subject(claims: &Claims) -> Result<Uuid, AppError> {
        Uuid::parse_str(&claims.sub).map_err(|_| AuthError::TokenInvalid.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> AuthConfig {
        AuthConfig {
            access_secret: "test_access_secret".to_string(),
            refresh_secret: "test_refresh_secret".to_string(),
            access_ttl_minutes: 15,
            refresh_ttl_days: 7,
            password_min_length: 6,
        }
    }

    #[test]
    fn test_access_round_trip() {
        let codec = TokenCodec::new(&test_config());
        let user_id = Uuid::new_v4();

        let token = codec.issue_access(user_id).unwrap();
        let claims = codec.verify_access(&token).unwrap();
        assert_eq!(claims.user_id, user_id);
    }

    #[test]
    fn test_refresh_round_trip_with_expiry() {
        let codec = TokenCodec::new(&test_config());
        let user_id = Uuid::new_v4();

        let token = codec.issue_refresh(user_id).unwrap();
        let claims = codec.verify_refresh(&token).unwrap();
        assert_eq!(claims.user_id, user_id);

        let expected = Utc::now() + Duration::days(7);
        let delta = (claims.expires_at - expected).num_seconds().abs();
        assert!(delta <= 5, "embedded expiry off by {}s", delta);
    }

    #[test]
    fn test_secrets_are_not_interchangeable() {
        let codec = TokenCodec::new(&test_config());
        let user_id = Uuid::new_v4();

        let access = codec.issue_access(user_id).unwrap();
        let refresh = codec.issue_refresh(user_id).unwrap();

        assert!(matches!(
            codec.verify_refresh(&access),
            Err(AppError::AuthError(AuthError::TokenInvalid))
        ));
        assert!(matches!(
            codec.verify_access(&refresh),
            Err(AppError::AuthError(AuthError::TokenInvalid))
        ));
    }

    #[test]
    fn test_tampered_token_rejected() {
        let codec = TokenCodec::new(&test_config());
        let token = codec.issue_refresh(Uuid::new_v4()).unwrap();

        let mut tampered = token.clone();
        tampered.pop();
        tampered.push(if token.ends_with('A') { 'B' } else { 'A' });

        assert!(matches!(
            codec.verify_refresh(&tampered),
            Err(AppError::AuthError(AuthError::TokenInvalid))
        ));
        assert!(matches!(
            codec.verify_refresh("not.a.jwt"),
            Err(AppError::AuthError(AuthError::TokenInvalid))
        ));
    }

    #[test]
    fn test_expired_token_rejected() {
        let mut config = test_config();
        config.access_ttl_minutes = -1;
        let codec = TokenCodec::new(&config);

        let token = codec.issue_access(Uuid::new_v4()).unwrap();
        assert!(matches!(
            codec.verify_access(&token),
            Err(AppError::AuthError(AuthError::TokenInvalid))
        ));
    }
}
