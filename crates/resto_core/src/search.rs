//! The distance-annotate / radius-filter / sort / paginate pipeline.
//!
//! Pure functions over in-memory record lists; `CatalogService` composes
//! them after querying the store.

use serde::Deserialize;

use crate::geo::{haversine_km, round_km, Coordinate};
use crate::types::{AnnotatedRestaurant, Restaurant, RestaurantPage};

/// Sort orders accepted by the listing endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    #[default]
    Distance,
    Rating,
    Price,
}

/// Attach the rounded distance from `viewer` to every record. Without a
/// viewer coordinate every `distance` stays `None`.
pub fn annotate(records: Vec<Restaurant>, viewer: Option<Coordinate>) -> Vec<AnnotatedRestaurant> {
    records
        .into_iter()
        .map(|restaurant| {
            let distance = viewer.map(|v| round_km(haversine_km(v, restaurant.coordinate())));
            AnnotatedRestaurant {
                restaurant,
                distance,
            }
        })
        .collect()
}

/// Drop records whose annotated distance exceeds `radius_km`. The boundary
/// is inclusive; records without a distance annotation are kept.
pub fn filter_radius(records: &mut Vec<AnnotatedRestaurant>, radius_km: f64) {
    records.retain(|r| match r.distance {
        Some(d) => d <= radius_km,
        None => true,
    });
}

/// Order records in place.
///
/// Distance sorting applies only when a viewer coordinate was supplied;
/// `SortBy::Distance` without one leaves the incoming (store) order
/// untouched, preserving the long-standing listing behavior for calls
/// that pass no coordinate.
pub fn sort(records: &mut [AnnotatedRestaurant], sort_by: SortBy, has_viewer: bool) {
    match sort_by {
        SortBy::Distance if has_viewer => records.sort_by(|a, b| {
            a.distance
                .unwrap_or(f64::MAX)
                .total_cmp(&b.distance.unwrap_or(f64::MAX))
        }),
        SortBy::Distance => {}
        SortBy::Rating => {
            records.sort_by(|a, b| b.restaurant.rating.total_cmp(&a.restaurant.rating))
        }
        SortBy::Price => records.sort_by(|a, b| {
            a.restaurant
                .average_price
                .total_cmp(&b.restaurant.average_price)
        }),
    }
}

/// Slice one page out of the filtered records.
///
/// `total_items` counts records before slicing; a page past the end yields
/// an empty list with the counts intact. `page` and `limit` are clamped to
/// a minimum of 1.
pub fn paginate(records: Vec<AnnotatedRestaurant>, page: usize, limit: usize) -> RestaurantPage {
    let page = page.max(1);
    let limit = limit.max(1);
    let total_items = records.len();
    let total_pages = total_items.div_ceil(limit);
    let offset = (page - 1).saturating_mul(limit);
    let restaurants: Vec<_> = records.into_iter().skip(offset).take(limit).collect();
    RestaurantPage {
        total_items,
        total_pages,
        current_page: page,
        restaurants,
    }
}
