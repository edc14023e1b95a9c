//! Auth and profile handlers.
//!
//! POST /api/auth/register — create an account
//! POST /api/auth/login    — verify credentials, set the refresh cookie
//! GET  /api/auth/token    — mint a fresh access token from the cookie
//! GET  /api/auth/logout   — revoke the stored refresh token
//! GET  /api/auth/profile  — own profile
//! PUT  /api/auth/profile  — partial profile update
//! GET  /api/auth/users    — all profiles (admin only)

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::{Extension, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};

use resto_core::auth::AuthService;
use resto_core::error::RestoError;
use resto_core::principal::Principal;
use resto_core::types::{NewUser, UpdateProfile, UserProfile};

use crate::error::AppError;
use crate::handlers::take_body;
use crate::middleware::jwt::{JwtConfig, REFRESH_TOKEN_TTL_DAYS};

/// Cookie carrying the refresh token, mirrored in the user store.
pub const REFRESH_COOKIE: &str = "refreshToken";

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub data: UserProfile,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub user: UserProfile,
    pub access_token: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub access_token: String,
}

#[derive(Debug, Serialize)]
pub struct UpdateResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub data: UserProfile,
}

fn refresh_cookie(token: String) -> Cookie<'static> {
    Cookie::build((REFRESH_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::None)
        .secure(true)
        .max_age(time::Duration::days(REFRESH_TOKEN_TTL_DAYS))
        .build()
}

pub async fn register(
    Extension(auth): Extension<Arc<AuthService>>,
    body: Result<Json<NewUser>, JsonRejection>,
) -> Result<(StatusCode, Json<RegisterResponse>), AppError> {
    let new_user = take_body(body)?;
    let user = auth.register(new_user).await?;
    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            status: "Success",
            message: "Registration successful",
            data: user.into(),
        }),
    ))
}

pub async fn login(
    Extension(auth): Extension<Arc<AuthService>>,
    Extension(jwt_config): Extension<JwtConfig>,
    jar: CookieJar,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<(CookieJar, Json<LoginResponse>), AppError> {
    let request = take_body(body)?;
    let user = auth.login(&request.email, &request.password).await?;

    let access_token = jwt_config.issue_access_token(&user)?;
    let refresh_token = jwt_config.issue_refresh_token(&user)?;
    auth.store_refresh_token(user.id, &refresh_token).await?;

    let jar = jar.add(refresh_cookie(refresh_token));
    Ok((
        jar,
        Json(LoginResponse {
            status: "Success",
            message: "Login Successful",
            user: user.into(),
            access_token,
        }),
    ))
}

/// Mint a fresh access token from the refresh cookie. The cookie must
/// both match a stored token and carry a valid refresh signature.
pub async fn token(
    Extension(auth): Extension<Arc<AuthService>>,
    Extension(jwt_config): Extension<JwtConfig>,
    jar: CookieJar,
) -> Result<Json<TokenResponse>, AppError> {
    let Some(cookie) = jar.get(REFRESH_COOKIE) else {
        return Err(RestoError::Unauthorized("missing refresh token".into()).into());
    };
    let refresh_token = cookie.value();

    let Some(user) = auth.user_by_refresh_token(refresh_token).await? else {
        return Err(RestoError::Forbidden("refresh token not recognized".into()).into());
    };
    jwt_config
        .decode_refresh(refresh_token)
        .map_err(|e| RestoError::Forbidden(format!("invalid refresh token: {e}")))?;

    let access_token = jwt_config.issue_access_token(&user)?;
    Ok(Json(TokenResponse { access_token }))
}

/// 200 when a stored session was cleared, 204 when there was nothing to
/// clear (no cookie, or the token matched no user).
pub async fn logout(
    Extension(auth): Extension<Arc<AuthService>>,
    jar: CookieJar,
) -> Result<(StatusCode, CookieJar), AppError> {
    let Some(cookie) = jar.get(REFRESH_COOKIE) else {
        return Ok((StatusCode::NO_CONTENT, jar));
    };
    let token = cookie.value().to_string();

    if auth.logout(&token).await? {
        let jar = jar.remove(Cookie::build(REFRESH_COOKIE).path("/").build());
        Ok((StatusCode::OK, jar))
    } else {
        Ok((StatusCode::NO_CONTENT, jar))
    }
}

pub async fn profile(
    Extension(auth): Extension<Arc<AuthService>>,
    Extension(principal): Extension<Principal>,
) -> Result<Json<UserProfile>, AppError> {
    let user = auth.profile(principal.user_id).await?;
    Ok(Json(user.into()))
}

pub async fn update_profile(
    Extension(auth): Extension<Arc<AuthService>>,
    Extension(principal): Extension<Principal>,
    body: Result<Json<UpdateProfile>, JsonRejection>,
) -> Result<Json<UpdateResponse>, AppError> {
    let changes = take_body(body)?;
    let user = auth.update_profile(principal.user_id, changes).await?;
    Ok(Json(UpdateResponse {
        status: "Success",
        message: "Profile updated successfully",
        data: user.into(),
    }))
}

pub async fn list_users(
    Extension(auth): Extension<Arc<AuthService>>,
    Extension(principal): Extension<Principal>,
) -> Result<Json<Vec<UserProfile>>, AppError> {
    principal.require_admin()?;
    let users = auth.list_users().await?;
    Ok(Json(users.into_iter().map(UserProfile::from).collect()))
}
