use actix_web::{web, HttpResponse, HttpRequest};
use actix_web::cookie::{time::Duration as CookieDuration, Cookie, SameSite};
use serde::{Deserialize, Serialize};
use crate::AppState;
use crate::db::models::User;
use crate::error::{AppError, AuthError};
use tracing::info;

pub const REFRESH_COOKIE_NAME: &str = "jid";
const REFRESH_COOKIE_PATH: &str = "/auth/refresh";

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub access_token: String,
    pub user: User,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    pub access_token: String,
}

pub async fn register(
    req: web::Json<RegisterRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    info!("Received registration request for email: {}", req.email);
    let session = state
        .auth
        .register(&req.email, &req.password, req.name.as_deref())
        .await?;

    info!("Registration successful for email: {}", req.email);
    Ok(HttpResponse::Created()
        .cookie(refresh_cookie(
            &session.refresh_token,
            state.config.auth.refresh_ttl_days,
        ))
        .json(AuthResponse {
            access_token: session.access_token,
            user: session.user,
        }))
}

pub async fn login(
    req: web::Json<LoginRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    info!("Received login request for email: {}", req.email);
    let session = state.auth.login(&req.email, &req.password).await?;

    info!("Login successful for email: {}", req.email);
    Ok(HttpResponse::Ok()
        .cookie(refresh_cookie(
            &session.refresh_token,
            state.config.auth.refresh_ttl_days,
        ))
        .json(AuthResponse {
            access_token: session.access_token,
            user: session.user,
        }))
}

pub async fn refresh(
    req: HttpRequest,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let cookie = req
        .cookie(REFRESH_COOKIE_NAME)
        .ok_or(AuthError::MissingToken)?;

    let access_token = state.auth.refresh(cookie.value()).await?;
    Ok(HttpResponse::Ok().json(RefreshResponse { access_token }))
}

pub async fn logout(
    req: HttpRequest,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    if let Some(cookie) = req.cookie(REFRESH_COOKIE_NAME) {
        state.auth.logout(cookie.value()).await?;
    }

    Ok(HttpResponse::Ok()
        .cookie(clear_refresh_cookie())
        .json(serde_json::json!({ "ok": true })))
}

// HttpOnly keeps the refresh token away from scripts; the path scope means
// the browser only ever sends it to the refresh endpoint
fn refresh_cookie(token: &str, ttl_days: i64) -> Cookie<'static> {
    Cookie::build(REFRESH_COOKIE_NAME, token.to_string())
        .path(REFRESH_COOKIE_PATH)
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(CookieDuration::days(ttl_days))
        .finish()
}

fn clear_refresh_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::build(REFRESH_COOKIE_NAME, "")
        .path(REFRESH_COOKIE_PATH)
        .http_only(true)
        .same_site(SameSite::Lax)
        .finish();
    cookie.make_removal();
    cookie
}
