//! Postgres implementations of the resto_core port traits.
//!
//! Each adapter is a newtype wrapping PgPool. All SQL is runtime-checked
//! (sqlx::query, not sqlx::query!) to avoid a compile-time DB requirement.

use anyhow::anyhow;
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use resto_core::error::RestoError;
use resto_core::ports::{NewUserRecord, RestaurantFilter, RestaurantStore, Result, UserStore};
use resto_core::types::{Restaurant, User};

use crate::sqlx_types::{PgRestaurantRow, PgUserRow};

// ── PgRestaurantStore ─────────────────────────────────────────

/// Postgres-backed restaurant catalog.
pub struct PgRestaurantStore {
    pool: PgPool,
}

impl PgRestaurantStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RestaurantStore for PgRestaurantStore {
    async fn list(&self, filter: &RestaurantFilter) -> Result<Vec<Restaurant>> {
        let rows = sqlx::query_as::<_, PgRestaurantRow>(
            r#"
            SELECT id, name, description, address, cuisine, price_range,
                   average_price, rating, open_time, close_time,
                   phone, image_url, is_open, latitude, longitude
            FROM restaurants
            WHERE is_open = TRUE
              AND ($1::text IS NULL OR cuisine = $1)
              AND ($2::text IS NULL OR price_range = $2)
              AND ($3::text IS NULL OR name ILIKE '%' || $3 || '%')
            ORDER BY created_at, id
            "#,
        )
        .bind(filter.cuisine.as_deref())
        .bind(filter.price_range.map(|p| p.as_str()))
        .bind(filter.name_contains.as_deref())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| anyhow!(e))?;
        rows.into_iter()
            .map(|r| {
                r.try_into()
                    .map_err(|e: String| RestoError::Internal(anyhow!(e)))
            })
            .collect()
    }

    async fn get(&self, id: Uuid) -> Result<Option<Restaurant>> {
        let row = sqlx::query_as::<_, PgRestaurantRow>(
            r#"
            SELECT id, name, description, address, cuisine, price_range,
                   average_price, rating, open_time, close_time,
                   phone, image_url, is_open, latitude, longitude
            FROM restaurants
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| anyhow!(e))?;
        row.map(|r| {
            r.try_into()
                .map_err(|e: String| RestoError::Internal(anyhow!(e)))
        })
        .transpose()
    }

    async fn search_text(&self, query: &str, limit: i64) -> Result<Vec<Restaurant>> {
        let pattern = format!("%{query}%");
        let rows = sqlx::query_as::<_, PgRestaurantRow>(
            r#"
            SELECT id, name, description, address, cuisine, price_range,
                   average_price, rating, open_time, close_time,
                   phone, image_url, is_open, latitude, longitude
            FROM restaurants
            WHERE is_open = TRUE
              AND (name ILIKE $1 OR cuisine ILIKE $1 OR address ILIKE $1)
            ORDER BY created_at, id
            LIMIT $2
            "#,
        )
        .bind(&pattern)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| anyhow!(e))?;
        rows.into_iter()
            .map(|r| {
                r.try_into()
                    .map_err(|e: String| RestoError::Internal(anyhow!(e)))
            })
            .collect()
    }

    async fn distinct_cuisines(&self) -> Result<Vec<String>> {
        let cuisines = sqlx::query_scalar::<_, String>(
            r#"
            SELECT DISTINCT cuisine
            FROM restaurants
            WHERE is_open = TRUE
            ORDER BY cuisine
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| anyhow!(e))?;
        Ok(cuisines)
    }
}

// ── PgUserStore ───────────────────────────────────────────────

/// Postgres-backed user accounts.
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        let row = sqlx::query_as::<_, PgUserRow>(
            r#"
            SELECT id, username, email, password_hash, role,
                   profile_picture, street, city, zip_code, country,
                   refresh_token, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| anyhow!(e))?;
        Ok(row.map(User::from))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let row = sqlx::query_as::<_, PgUserRow>(
            r#"
            SELECT id, username, email, password_hash, role,
                   profile_picture, street, city, zip_code, country,
                   refresh_token, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| anyhow!(e))?;
        Ok(row.map(User::from))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let row = sqlx::query_as::<_, PgUserRow>(
            r#"
            SELECT id, username, email, password_hash, role,
                   profile_picture, street, city, zip_code, country,
                   refresh_token, created_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| anyhow!(e))?;
        Ok(row.map(User::from))
    }

    async fn find_by_refresh_token(&self, token: &str) -> Result<Option<User>> {
        let row = sqlx::query_as::<_, PgUserRow>(
            r#"
            SELECT id, username, email, password_hash, role,
                   profile_picture, street, city, zip_code, country,
                   refresh_token, created_at
            FROM users
            WHERE refresh_token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| anyhow!(e))?;
        Ok(row.map(User::from))
    }

    async fn insert(&self, record: NewUserRecord) -> Result<User> {
        let row = sqlx::query_as::<_, PgUserRow>(
            r#"
            INSERT INTO users (id, username, email, password_hash, role)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, username, email, password_hash, role,
                      profile_picture, street, city, zip_code, country,
                      refresh_token, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&record.username)
        .bind(&record.email)
        .bind(&record.password_hash)
        .bind(&record.role)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| anyhow!(e))?;
        Ok(row.into())
    }

    async fn update(&self, user: &User) -> Result<User> {
        let row = sqlx::query_as::<_, PgUserRow>(
            r#"
            UPDATE users
            SET username = $2, email = $3, password_hash = $4, role = $5,
                profile_picture = $6, street = $7, city = $8,
                zip_code = $9, country = $10
            WHERE id = $1
            RETURNING id, username, email, password_hash, role,
                      profile_picture, street, city, zip_code, country,
                      refresh_token, created_at
            "#,
        )
        .bind(user.id)
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.role)
        .bind(user.profile_picture.as_deref())
        .bind(user.street.as_deref())
        .bind(user.city.as_deref())
        .bind(user.zip_code.as_deref())
        .bind(user.country.as_deref())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| anyhow!(e))?;
        row.map(User::from)
            .ok_or_else(|| RestoError::NotFound("User not found".into()))
    }

    async fn set_refresh_token(&self, id: Uuid, token: Option<&str>) -> Result<()> {
        sqlx::query(r#"UPDATE users SET refresh_token = $2 WHERE id = $1"#)
            .bind(id)
            .bind(token)
            .execute(&self.pool)
            .await
            .map_err(|e| anyhow!(e))?;
        Ok(())
    }

    async fn list(&self) -> Result<Vec<User>> {
        let rows = sqlx::query_as::<_, PgUserRow>(
            r#"
            SELECT id, username, email, password_hash, role,
                   profile_picture, street, city, zip_code, country,
                   refresh_token, created_at
            FROM users
            ORDER BY created_at, id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| anyhow!(e))?;
        Ok(rows.into_iter().map(User::from).collect())
    }
}
