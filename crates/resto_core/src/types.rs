//! Domain types shared across the catalog and auth services.
//!
//! Wire names are camelCase throughout, matching the public API contract.
//! `User` deliberately does not implement `Serialize` — the password hash
//! and refresh token can never cross the wire; `UserProfile` is the only
//! user shape handlers are able to return.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geo::Coordinate;

// ── Catalog ───────────────────────────────────────────────────

/// Price banding for a restaurant. Stored and serialized as lowercase text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceTier {
    Low,
    Medium,
    High,
}

impl PriceTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }
}

/// A restaurant record. Seeded once, read-only from the API surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub address: String,
    pub cuisine: String,
    pub price_range: PriceTier,
    pub average_price: f64,
    /// 0.0 through 5.0.
    pub rating: f64,
    /// Free-text time of day, never parsed for open/closed logic.
    pub open_time: String,
    pub close_time: String,
    pub phone: Option<String>,
    pub image_url: Option<String>,
    /// Manually maintained availability flag, independent of the time
    /// strings. Closed restaurants never appear in listings.
    pub is_open: bool,
    pub latitude: f64,
    pub longitude: f64,
}

impl Restaurant {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}

/// A restaurant plus the distance from the caller's coordinate in km,
/// rounded to two decimals. `distance` is present on the wire iff both
/// userLat and userLon were supplied.
#[derive(Debug, Clone, Serialize)]
pub struct AnnotatedRestaurant {
    #[serde(flatten)]
    pub restaurant: Restaurant,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
}

/// Paginated listing envelope.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantPage {
    pub total_items: usize,
    pub total_pages: usize,
    pub current_page: usize,
    pub restaurants: Vec<AnnotatedRestaurant>,
}

// ── Users ─────────────────────────────────────────────────────

/// A registered user, as stored. Not `Serialize` on purpose.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub profile_picture: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub zip_code: Option<String>,
    pub country: Option<String>,
    pub refresh_token: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Public view of a user — what profile and listing endpoints return.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub role: String,
    pub profile_picture: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub zip_code: Option<String>,
    pub country: Option<String>,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            role: user.role,
            profile_picture: user.profile_picture,
            street: user.street,
            city: user.city,
            zip_code: user.zip_code,
            country: user.country,
        }
    }
}

/// Registration payload.
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
    /// Defaults to `customer` when absent.
    pub role: Option<String>,
}

/// Profile update payload. Every field optional; empty strings are treated
/// as absent. At least one recognized field must come through.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfile {
    pub username: Option<String>,
    pub email: Option<String>,
    pub current_password: Option<String>,
    pub new_password: Option<String>,
    pub profile_picture: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub zip_code: Option<String>,
    pub country: Option<String>,
}
