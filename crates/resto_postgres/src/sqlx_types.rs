//! sqlx row mirrors of the domain types.
//!
//! Kept apart from `resto_core` so the domain crate stays sqlx-free. The
//! only fallible conversion is the price tier, stored as text.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use resto_core::types::{PriceTier, Restaurant, User};

#[derive(Debug, sqlx::FromRow)]
pub struct PgRestaurantRow {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub address: String,
    pub cuisine: String,
    pub price_range: String,
    pub average_price: f64,
    pub rating: f64,
    pub open_time: String,
    pub close_time: String,
    pub phone: Option<String>,
    pub image_url: Option<String>,
    pub is_open: bool,
    pub latitude: f64,
    pub longitude: f64,
}

impl TryFrom<PgRestaurantRow> for Restaurant {
    type Error = String;

    fn try_from(row: PgRestaurantRow) -> Result<Self, Self::Error> {
        let price_range = PriceTier::parse(&row.price_range)
            .ok_or_else(|| format!("unknown price tier: {}", row.price_range))?;
        Ok(Restaurant {
            id: row.id,
            name: row.name,
            description: row.description,
            address: row.address,
            cuisine: row.cuisine,
            price_range,
            average_price: row.average_price,
            rating: row.rating,
            open_time: row.open_time,
            close_time: row.close_time,
            phone: row.phone,
            image_url: row.image_url,
            is_open: row.is_open,
            latitude: row.latitude,
            longitude: row.longitude,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
pub struct PgUserRow {
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

impl From<PgUserRow> for User {
    fn from(row: PgUserRow) -> Self {
        User {
            id: row.id,
            username: row.username,
            email: row.email,
            password_hash: row.password_hash,
            role: row.role,
            profile_picture: row.profile_picture,
            street: row.street,
            city: row.city,
            zip_code: row.zip_code,
            country: row.country,
            refresh_token: row.refresh_token,
            created_at: row.created_at,
        }
    }
}
