//! Restaurant catalog handlers.
//!
//! GET /api/restaurants           — filtered, distance-annotated, paginated listing
//! GET /api/restaurants/search    — free-text search (required `query`)
//! GET /api/restaurants/nearby    — everything within a radius of the caller
//! GET /api/restaurants/cuisines  — distinct cuisine tags
//! GET /api/restaurants/:id       — single record, optional distance annotation

use std::sync::Arc;

use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query};
use axum::{Extension, Json};
use serde::Deserialize;
use uuid::Uuid;

use resto_core::catalog::{CatalogService, ListParams};
use resto_core::error::RestoError;
use resto_core::geo::Coordinate;
use resto_core::search::SortBy;
use resto_core::types::{AnnotatedRestaurant, PriceTier, RestaurantPage};

use crate::error::AppError;
use crate::handlers::{take_path, take_query};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub cuisine: Option<String>,
    pub price_range: Option<PriceTier>,
    pub search: Option<String>,
    pub user_lat: Option<f64>,
    pub user_lon: Option<f64>,
    pub radius: Option<f64>,
    pub page: Option<usize>,
    pub limit: Option<usize>,
    pub sort_by: Option<SortBy>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    pub query: Option<String>,
    pub user_lat: Option<f64>,
    pub user_lon: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NearbyQuery {
    pub user_lat: Option<f64>,
    pub user_lon: Option<f64>,
    pub radius: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetQuery {
    pub user_lat: Option<f64>,
    pub user_lon: Option<f64>,
}

/// Distance annotation engages only when both coordinates arrived.
fn viewer_from(lat: Option<f64>, lon: Option<f64>) -> Option<Coordinate> {
    match (lat, lon) {
        (Some(lat), Some(lon)) => Some(Coordinate::new(lat, lon)),
        _ => None,
    }
}

pub async fn list(
    Extension(catalog): Extension<Arc<CatalogService>>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<RestaurantPage>, AppError> {
    let q = take_query(query)?;
    let page = catalog
        .list(ListParams {
            cuisine: q.cuisine,
            price_range: q.price_range,
            search: q.search,
            viewer: viewer_from(q.user_lat, q.user_lon),
            radius_km: q.radius,
            page: q.page,
            limit: q.limit,
            sort_by: q.sort_by,
        })
        .await?;
    Ok(Json(page))
}

pub async fn search(
    Extension(catalog): Extension<Arc<CatalogService>>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> Result<Json<Vec<AnnotatedRestaurant>>, AppError> {
    let q = take_query(query)?;
    let text = q
        .query
        .as_deref()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| RestoError::InvalidInput("Search query is required".into()))?;
    let hits = catalog
        .search(text, viewer_from(q.user_lat, q.user_lon))
        .await?;
    Ok(Json(hits))
}

pub async fn nearby(
    Extension(catalog): Extension<Arc<CatalogService>>,
    query: Result<Query<NearbyQuery>, QueryRejection>,
) -> Result<Json<Vec<AnnotatedRestaurant>>, AppError> {
    let q = take_query(query)?;
    let viewer = viewer_from(q.user_lat, q.user_lon).ok_or_else(|| {
        RestoError::InvalidInput("User location (userLat, userLon) is required".into())
    })?;
    let hits = catalog.nearby(viewer, q.radius).await?;
    Ok(Json(hits))
}

pub async fn cuisines(
    Extension(catalog): Extension<Arc<CatalogService>>,
) -> Result<Json<Vec<String>>, AppError> {
    Ok(Json(catalog.cuisines().await?))
}

pub async fn get(
    Extension(catalog): Extension<Arc<CatalogService>>,
    path: Result<Path<Uuid>, PathRejection>,
    query: Result<Query<GetQuery>, QueryRejection>,
) -> Result<Json<AnnotatedRestaurant>, AppError> {
    let id = take_path(path)?;
    let q = take_query(query)?;
    let restaurant = catalog
        .get(id, viewer_from(q.user_lat, q.user_lon))
        .await?;
    Ok(Json(restaurant))
}
