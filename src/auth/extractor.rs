use std::future::{ready, Ready};

use actix_web::{dev::Payload, web, FromRequest, HttpRequest};
use uuid::Uuid;

use crate::error::{AppError, AuthError};
use crate::AppState;

/// Verified subject of the bearer access token on the current request.
///
/// Verification is purely signature + expiry; no store lookup happens here,
/// which keeps authenticated request handling stateless.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub user_id: Uuid,
}

impl FromRequest for AuthUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}

fn authenticate(req: &HttpRequest) -> Result<AuthUser, AppError> {
    let state = req
        .app_data::<web::Data<AppState>>()
        .ok_or_else(|| AppError::InternalError("Application state not configured".into()))?;

    let header = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AuthError::Unauthorized("Missing Authorization header".into()))?;

    let token = header.strip_prefix("Bearer ").ok_or_else(|| {
        AuthError::Unauthorized("Invalid Authorization header format".into())
    })?;

    let user_id = state
        .auth
        .verify_access(token)
        .map_err(|_| AuthError::Unauthorized("Invalid or expired token".into()))?;

    Ok(AuthUser { user_id })
}
