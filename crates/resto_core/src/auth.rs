//! User accounts: registration, login, refresh-token bookkeeping and
//! profile updates.
//!
//! Passwords are hashed here with bcrypt; the store ports only ever see
//! hashes. Token issuance is the HTTP layer's concern — this service deals
//! in users and stored refresh tokens, not signatures.

use std::sync::Arc;

use anyhow::anyhow;
use tracing::warn;
use uuid::Uuid;

use crate::error::RestoError;
use crate::ports::{NewUserRecord, Result, UserStore};
use crate::types::{NewUser, UpdateProfile, User};

/// Shortest accepted password when one is being set.
pub const MIN_PASSWORD_LEN: usize = 6;

pub struct AuthService {
    users: Arc<dyn UserStore>,
    bcrypt_cost: u32,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self {
            users,
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }

    /// Same service with a custom hashing cost. Tests drop it to the
    /// bcrypt minimum to stay fast.
    pub fn with_cost(users: Arc<dyn UserStore>, bcrypt_cost: u32) -> Self {
        Self { users, bcrypt_cost }
    }

    /// Create an account. Role defaults to `customer`; the stored record
    /// carries the bcrypt hash, never the password.
    pub async fn register(&self, new_user: NewUser) -> Result<User> {
        let username = new_user.username.trim();
        let email = new_user.email.trim();
        if username.is_empty() || email.is_empty() || new_user.password.is_empty() {
            return Err(RestoError::InvalidInput(
                "username, email and password are required".into(),
            ));
        }
        if !email_shape_ok(email) {
            return Err(RestoError::InvalidInput("Invalid email format".into()));
        }
        if self.users.find_by_email(email).await?.is_some() {
            return Err(RestoError::InvalidInput("Email already registered".into()));
        }
        if self.users.find_by_username(username).await?.is_some() {
            return Err(RestoError::InvalidInput("Username already taken".into()));
        }

        let password_hash =
            bcrypt::hash(&new_user.password, self.bcrypt_cost).map_err(|e| anyhow!(e))?;
        self.users
            .insert(NewUserRecord {
                username: username.to_string(),
                email: email.to_string(),
                password_hash,
                role: new_user.role.unwrap_or_else(|| "customer".to_string()),
            })
            .await
    }

    /// Verify credentials. Unknown email and wrong password both surface
    /// as the same [`RestoError::BadCredentials`] so the response never
    /// reveals which field was wrong.
    pub async fn login(&self, email: &str, password: &str) -> Result<User> {
        let Some(user) = self.users.find_by_email(email).await? else {
            warn!(email, "login attempt for unknown email");
            return Err(RestoError::BadCredentials);
        };
        let valid = bcrypt::verify(password, &user.password_hash).map_err(|e| anyhow!(e))?;
        if !valid {
            warn!(email, "login attempt with wrong password");
            return Err(RestoError::BadCredentials);
        }
        Ok(user)
    }

    /// Persist the refresh token issued at login. One active token per
    /// user; issuing a new one overwrites the previous, which is what
    /// makes revocation-by-lookup work.
    pub async fn store_refresh_token(&self, user_id: Uuid, token: &str) -> Result<()> {
        self.users.set_refresh_token(user_id, Some(token)).await
    }

    /// Refresh-exchange lookup: which user holds this stored token?
    pub async fn user_by_refresh_token(&self, token: &str) -> Result<Option<User>> {
        self.users.find_by_refresh_token(token).await
    }

    /// Clear the stored refresh token for whichever user holds it.
    /// Returns whether a session was actually cleared; an unknown token
    /// is an idempotent no-op, not an error.
    pub async fn logout(&self, refresh_token: &str) -> Result<bool> {
        match self.users.find_by_refresh_token(refresh_token).await? {
            Some(user) => {
                self.users.set_refresh_token(user.id, None).await?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub async fn profile(&self, user_id: Uuid) -> Result<User> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| RestoError::NotFound("User not found".into()))
    }

    /// Apply a partial profile update. Empty strings count as absent.
    /// Username and email changes are checked for uniqueness; a password
    /// change requires the current password and a minimum length. An
    /// update that touches nothing is rejected.
    pub async fn update_profile(&self, user_id: Uuid, changes: UpdateProfile) -> Result<User> {
        let mut user = self.profile(user_id).await?;
        let mut changed = false;

        if let Some(username) = given(&changes.username) {
            if username != user.username {
                if self.users.find_by_username(username).await?.is_some() {
                    return Err(RestoError::InvalidInput("Username already taken".into()));
                }
                user.username = username.to_string();
                changed = true;
            }
        }

        if let Some(email) = given(&changes.email) {
            if email != user.email {
                if !email_shape_ok(email) {
                    return Err(RestoError::InvalidInput("Invalid email format".into()));
                }
                if self.users.find_by_email(email).await?.is_some() {
                    return Err(RestoError::InvalidInput("Email already registered".into()));
                }
                user.email = email.to_string();
                changed = true;
            }
        }

        if let Some(new_password) = given(&changes.new_password) {
            let Some(current) = given(&changes.current_password) else {
                return Err(RestoError::InvalidInput(
                    "Current password is required to set a new password".into(),
                ));
            };
            let valid = bcrypt::verify(current, &user.password_hash).map_err(|e| anyhow!(e))?;
            if !valid {
                return Err(RestoError::InvalidInput(
                    "Current password is incorrect".into(),
                ));
            }
            if new_password.len() < MIN_PASSWORD_LEN {
                return Err(RestoError::InvalidInput(
                    "New password must be at least 6 characters long".into(),
                ));
            }
            user.password_hash = bcrypt::hash(new_password, self.bcrypt_cost)
                .map_err(|e| anyhow!(e))?;
            changed = true;
        }

        if let Some(picture) = given(&changes.profile_picture) {
            user.profile_picture = Some(picture.to_string());
            changed = true;
        }
        if let Some(street) = given(&changes.street) {
            user.street = Some(street.to_string());
            changed = true;
        }
        if let Some(city) = given(&changes.city) {
            user.city = Some(city.to_string());
            changed = true;
        }
        if let Some(zip_code) = given(&changes.zip_code) {
            user.zip_code = Some(zip_code.to_string());
            changed = true;
        }
        if let Some(country) = given(&changes.country) {
            user.country = Some(country.to_string());
            changed = true;
        }

        if !changed {
            return Err(RestoError::InvalidInput(
                "No valid fields provided for update".into(),
            ));
        }
        self.users.update(&user).await
    }

    /// Every account, for the admin listing.
    pub async fn list_users(&self) -> Result<Vec<User>> {
        self.users.list().await
    }
}

/// A field counts as provided only when it is present and non-empty,
/// so a client sending `""` leaves the stored value alone.
fn given(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

/// Minimal `\S+@\S+.\S+` shape check: no whitespace, something before the
/// `@`, and a dot with characters on both sides in the domain.
fn email_shape_ok(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some(at) = email.find('@') else {
        return false;
    };
    if at == 0 {
        return false;
    }
    let domain = &email[at + 1..];
    match domain.rfind('.') {
        Some(dot) => dot > 0 && dot < domain.len() - 1,
        None => false,
    }
}
