//! Integration tests against a real PostgreSQL database.
//!
//! Requires a reachable database; the schema is created on the fly.
//! Run with: DATABASE_URL="postgresql:///resto_test" cargo test -p resto_server --test pg_integration -- --ignored --nocapture

use std::sync::Arc;

use axum::body::Body;
use http_body_util::BodyExt;
use hyper::{Request, StatusCode};
use serde_json::{json, Value};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

use resto_core::auth::AuthService;
use resto_core::catalog::CatalogService;
use resto_core::ports::{NewUserRecord, RestaurantStore, UserStore};
use resto_postgres::schema::ensure_schema;
use resto_postgres::seed::seed_restaurants;
use resto_postgres::{PgRestaurantStore, PgUserStore};
use resto_server::middleware::jwt::JwtConfig;
use resto_server::router::build_router;

const TEST_JWT_ACCESS: &[u8] = b"pg-test-access-secret";
const TEST_JWT_REFRESH: &[u8] = b"pg-test-refresh-secret";

async fn test_pool() -> PgPool {
    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for integration tests");
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .expect("failed to connect to test database");
    ensure_schema(&pool)
        .await
        .expect("failed to ensure schema");
    pool
}

async fn body_json(resp: axum::response::Response) -> Value {
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| json!({ "raw": String::from_utf8_lossy(&bytes).to_string() }))
}

#[tokio::test]
#[ignore] // requires DATABASE_URL
async fn schema_and_seed_roundtrip() {
    let pool = test_pool().await;
    let count = seed_restaurants(&pool).await.expect("seed failed");
    assert_eq!(count, 12);

    let store = PgRestaurantStore::new(pool);
    let all = store.list(&Default::default()).await.unwrap();
    assert_eq!(all.len(), 12);
    // Seeded order follows insertion order.
    assert_eq!(all[0].name, "Gudeg Yu Djum");

    let hits = store.search_text("gudeg", 10).await.unwrap();
    assert!(hits.iter().any(|r| r.name == "Gudeg Yu Djum"));

    let cuisines = store.distinct_cuisines().await.unwrap();
    assert!(cuisines.iter().any(|c| c == "Indonesian"));
    let mut sorted = cuisines.clone();
    sorted.sort();
    assert_eq!(cuisines, sorted);

    let by_id = store.get(all[0].id).await.unwrap();
    assert_eq!(by_id.unwrap().name, "Gudeg Yu Djum");
    assert!(store.get(Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
#[ignore] // requires DATABASE_URL
async fn user_store_crud_roundtrip() {
    let pool = test_pool().await;
    let store = PgUserStore::new(pool);

    let tag = Uuid::new_v4().simple().to_string();
    let inserted = store
        .insert(NewUserRecord {
            username: format!("it-user-{tag}"),
            email: format!("it-{tag}@example.com"),
            password_hash: "$2b$04$integrationtesthash".into(),
            role: "customer".into(),
        })
        .await
        .unwrap();
    assert_eq!(inserted.country.as_deref(), Some("Indonesia"));

    let by_email = store
        .find_by_email(&inserted.email)
        .await
        .unwrap()
        .expect("inserted user must be findable");
    assert_eq!(by_email.id, inserted.id);

    store
        .set_refresh_token(inserted.id, Some("it-refresh-token"))
        .await
        .unwrap();
    let holder = store
        .find_by_refresh_token("it-refresh-token")
        .await
        .unwrap()
        .expect("token holder must be findable");
    assert_eq!(holder.id, inserted.id);

    store.set_refresh_token(inserted.id, None).await.unwrap();
    assert!(store
        .find_by_refresh_token("it-refresh-token")
        .await
        .unwrap()
        .is_none());

    let mut changed = holder;
    changed.city = Some("Sleman".into());
    let updated = store.update(&changed).await.unwrap();
    assert_eq!(updated.city.as_deref(), Some("Sleman"));
}

#[tokio::test]
#[ignore] // requires DATABASE_URL
async fn http_flow_against_postgres() {
    let pool = test_pool().await;
    let catalog = Arc::new(CatalogService::new(Arc::new(PgRestaurantStore::new(
        pool.clone(),
    ))));
    let auth = Arc::new(AuthService::new(Arc::new(PgUserStore::new(pool))));
    let app = build_router(
        catalog,
        auth,
        JwtConfig::from_secrets(TEST_JWT_ACCESS, TEST_JWT_REFRESH),
    );

    let tag = Uuid::new_v4().simple().to_string();
    let email = format!("it-{tag}@example.com");
    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/register")
                .header("content-type", "application/json")
                .body(Body::from(
                    json!({ "username": format!("it-user-{tag}"), "email": &email, "password": "rahasia1" })
                        .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/login")
                .header("content-type", "application/json")
                .body(Body::from(
                    json!({ "email": &email, "password": "rahasia1" }).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let access = body_json(resp).await["accessToken"]
        .as_str()
        .unwrap()
        .to_string();

    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/auth/profile")
                .header("authorization", format!("Bearer {access}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["email"], email.as_str());

    // Listing works against the live store, whatever is seeded.
    let resp = app
        .oneshot(
            Request::builder()
                .uri("/api/restaurants")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert!(body["totalItems"].is_number());
    assert!(body["restaurants"].is_array());
}
