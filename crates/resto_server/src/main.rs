//! resto_server — standalone REST server for restaurant discovery.
//!
//! Reads config from env vars (a local .env is honored):
//!   DATABASE_URL          — Postgres connection string (required)
//!   ACCESS_TOKEN_SECRET   — access-token HMAC secret (required)
//!   REFRESH_TOKEN_SECRET  — refresh-token HMAC secret (required)
//!   PORT                  — listen port (default: 5000)

use std::sync::Arc;

use resto_core::auth::AuthService;
use resto_core::catalog::CatalogService;
use resto_postgres::schema::ensure_schema;
use resto_postgres::{PgRestaurantStore, PgUserStore};
use resto_server::middleware::jwt::JwtConfig;
use resto_server::router::build_router;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,resto_server=debug".into()),
        )
        .init();

    // Read config from environment
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let access_secret =
        std::env::var("ACCESS_TOKEN_SECRET").expect("ACCESS_TOKEN_SECRET must be set");
    let refresh_secret =
        std::env::var("REFRESH_TOKEN_SECRET").expect("REFRESH_TOKEN_SECRET must be set");
    let port = std::env::var("PORT").unwrap_or_else(|_| "5000".into());

    // Create PgPool
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&database_url)
        .await
        .expect("failed to connect to database");

    tracing::info!("Connected to database");

    ensure_schema(&pool)
        .await
        .expect("failed to ensure database schema");

    // Build services over the Postgres stores
    let catalog = Arc::new(CatalogService::new(Arc::new(PgRestaurantStore::new(
        pool.clone(),
    ))));
    let auth = Arc::new(AuthService::new(Arc::new(PgUserStore::new(pool.clone()))));

    let jwt_config = JwtConfig::from_secrets(access_secret.as_bytes(), refresh_secret.as_bytes());

    let app = build_router(catalog, auth, jwt_config);

    // Bind and serve
    let bind_addr = format!("0.0.0.0:{port}");
    let listener = TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind to {bind_addr}: {e}"));
    tracing::info!("Restaurant Finder API running on port {port}");

    axum::serve(listener, app).await.expect("server error");
}
