//! JWT issuance and the bearer-auth middleware.
//!
//! Two HMAC key pairs: a short-lived access token authenticates API
//! calls; a long-lived refresh token, mirrored in a cookie and in the
//! user store, mints new access tokens. `jwt_auth` guards the protected
//! routes: missing/non-bearer header → 401, bad or expired token → 403.

use axum::extract::Request;
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;
use axum::Extension;
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

use resto_core::error::RestoError;
use resto_core::principal::{JwtClaims, Principal};
use resto_core::types::User;

use crate::error::AppError;

pub const ACCESS_TOKEN_TTL_MINUTES: i64 = 30;
pub const REFRESH_TOKEN_TTL_DAYS: i64 = 1;

/// HMAC keys for both token kinds, shared with handlers via Extension.
#[derive(Clone)]
pub struct JwtConfig {
    access_encoding: EncodingKey,
    access_decoding: DecodingKey,
    refresh_encoding: EncodingKey,
    refresh_decoding: DecodingKey,
}

impl JwtConfig {
    pub fn from_secrets(access_secret: &[u8], refresh_secret: &[u8]) -> Self {
        Self {
            access_encoding: EncodingKey::from_secret(access_secret),
            access_decoding: DecodingKey::from_secret(access_secret),
            refresh_encoding: EncodingKey::from_secret(refresh_secret),
            refresh_decoding: DecodingKey::from_secret(refresh_secret),
        }
    }

    /// Short-lived token returned in login and refresh responses.
    pub fn issue_access_token(&self, user: &User) -> Result<String, RestoError> {
        issue(&self.access_encoding, user, ACCESS_TOKEN_TTL_MINUTES * 60)
    }

    /// Long-lived token set as the refresh cookie and stored server-side.
    pub fn issue_refresh_token(&self, user: &User) -> Result<String, RestoError> {
        issue(
            &self.refresh_encoding,
            user,
            REFRESH_TOKEN_TTL_DAYS * 24 * 60 * 60,
        )
    }

    pub fn decode_access(&self, token: &str) -> Result<JwtClaims, jsonwebtoken::errors::Error> {
        decode::<JwtClaims>(token, &self.access_decoding, &Validation::default())
            .map(|data| data.claims)
    }

    pub fn decode_refresh(&self, token: &str) -> Result<JwtClaims, jsonwebtoken::errors::Error> {
        decode::<JwtClaims>(token, &self.refresh_decoding, &Validation::default())
            .map(|data| data.claims)
    }
}

fn issue(key: &EncodingKey, user: &User, ttl_secs: i64) -> Result<String, RestoError> {
    let now = Utc::now().timestamp();
    let claims = JwtClaims {
        sub: Some(user.id.to_string()),
        username: Some(user.username.clone()),
        email: Some(user.email.clone()),
        role: Some(user.role.clone()),
        iat: now,
        exp: now + ttl_secs,
    };
    encode(&Header::default(), &claims, key).map_err(|e| RestoError::Internal(anyhow::anyhow!(e)))
}

/// Bearer-auth middleware for the protected routes. On success the
/// decoded [`Principal`] is attached to the request extensions.
pub async fn jwt_auth(
    Extension(jwt_config): Extension<JwtConfig>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));
    let Some(token) = token else {
        return Err(RestoError::Unauthorized("missing bearer token".into()).into());
    };

    let claims = jwt_config
        .decode_access(token)
        .map_err(|e| RestoError::Forbidden(format!("invalid token: {e}")))?;
    let principal = Principal::from_jwt_claims(&claims)?;
    request.extensions_mut().insert(principal);
    Ok(next.run(request).await)
}
