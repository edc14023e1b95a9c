//! Schema bootstrap, run at server and seeder startup.
//!
//! Everything is CREATE ... IF NOT EXISTS so startup stays idempotent;
//! there is no migration history to replay.

use anyhow::Context;
use sqlx::PgPool;
use tracing::debug;

// restaurants.created_at uses clock_timestamp() rather than now() so rows
// inserted inside one transaction still get distinct timestamps; the
// listing orders by created_at to keep insertion order stable.
const SCHEMA_STATEMENTS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id UUID PRIMARY KEY,
        username TEXT NOT NULL UNIQUE,
        email TEXT NOT NULL UNIQUE,
        password_hash TEXT NOT NULL,
        role TEXT NOT NULL DEFAULT 'customer',
        profile_picture TEXT,
        street TEXT,
        city TEXT,
        zip_code TEXT,
        country TEXT DEFAULT 'Indonesia',
        refresh_token TEXT,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS restaurants (
        id UUID PRIMARY KEY,
        name TEXT NOT NULL,
        description TEXT NOT NULL,
        address TEXT NOT NULL,
        cuisine TEXT NOT NULL,
        price_range TEXT NOT NULL CHECK (price_range IN ('low', 'medium', 'high')),
        average_price DOUBLE PRECISION NOT NULL,
        rating DOUBLE PRECISION NOT NULL DEFAULT 0,
        open_time TEXT NOT NULL,
        close_time TEXT NOT NULL,
        phone TEXT,
        image_url TEXT,
        is_open BOOLEAN NOT NULL DEFAULT TRUE,
        latitude DOUBLE PRECISION NOT NULL,
        longitude DOUBLE PRECISION NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT clock_timestamp()
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_restaurants_cuisine ON restaurants(cuisine)",
    "CREATE INDEX IF NOT EXISTS idx_restaurants_is_open ON restaurants(is_open)",
    "CREATE INDEX IF NOT EXISTS idx_users_refresh_token ON users(refresh_token)",
];

/// Create the tables and indexes if they are missing.
pub async fn ensure_schema(pool: &PgPool) -> anyhow::Result<()> {
    for (i, statement) in SCHEMA_STATEMENTS.iter().enumerate() {
        sqlx::query(statement)
            .execute(pool)
            .await
            .with_context(|| format!("schema statement {i} failed"))?;
    }
    debug!("schema ensured");
    Ok(())
}
