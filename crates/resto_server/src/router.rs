//! Router construction for the restaurant discovery server.

use std::sync::Arc;

use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderValue, Method};
use axum::{middleware as axum_mw, routing::get, routing::post, Extension, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use resto_core::auth::AuthService;
use resto_core::catalog::CatalogService;

use crate::handlers;
use crate::middleware::jwt::{jwt_auth, JwtConfig};

/// Build the full axum router with all routes and middleware.
pub fn build_router(
    catalog: Arc<CatalogService>,
    auth: Arc<AuthService>,
    jwt_config: JwtConfig,
) -> Router {
    // Routes that require a bearer token
    let protected = Router::new()
        .route("/api/auth/logout", get(handlers::auth::logout))
        .route(
            "/api/auth/profile",
            get(handlers::auth::profile).put(handlers::auth::update_profile),
        )
        .route("/api/auth/users", get(handlers::auth::list_users))
        .layer(axum_mw::from_fn(jwt_auth));

    // Public routes
    let public = Router::new()
        .route("/api/auth/register", post(handlers::auth::register))
        .route("/api/auth/login", post(handlers::auth::login))
        .route("/api/auth/token", get(handlers::auth::token))
        .route("/api/restaurants", get(handlers::restaurants::list))
        .route(
            "/api/restaurants/search",
            get(handlers::restaurants::search),
        )
        .route(
            "/api/restaurants/nearby",
            get(handlers::restaurants::nearby),
        )
        .route(
            "/api/restaurants/cuisines",
            get(handlers::restaurants::cuisines),
        )
        .route("/api/restaurants/:id", get(handlers::restaurants::get))
        .route("/health", get(handlers::health::health));

    // The Extensions go on the merged router: login and token are public
    // but still need the JWT keys and the auth service.
    public
        .merge(protected)
        .layer(Extension(catalog))
        .layer(Extension(auth))
        .layer(Extension(jwt_config))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
}

/// Browser clients send credentials (the refresh cookie), so origins are
/// enumerated rather than wildcarded.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin([
            HeaderValue::from_static("http://localhost:3000"),
            HeaderValue::from_static("http://localhost:8080"),
        ])
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
}
