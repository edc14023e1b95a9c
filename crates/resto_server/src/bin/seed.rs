//! Seed the database with the demonstration catalog.
//!
//! Usage: `cargo run --bin seed` with DATABASE_URL set (a local .env is
//! honored). Clears the restaurants table and reinserts the twelve
//! Yogyakarta restaurants.

use resto_postgres::schema::ensure_schema;
use resto_postgres::seed::seed_restaurants;
use sqlx::postgres::PgPoolOptions;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .expect("failed to connect to database");

    ensure_schema(&pool)
        .await
        .expect("failed to ensure database schema");

    let count = seed_restaurants(&pool)
        .await
        .expect("failed to seed restaurants");

    tracing::info!("Seeded {count} restaurants");
}
