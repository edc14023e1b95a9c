//! Restaurant discovery service.
//!
//! Owns the store port and composes the search pipeline: annotate with
//! viewer distance, filter by radius, sort, paginate. Handlers stay thin;
//! every listing rule lives here.

use std::sync::Arc;

use crate::error::RestoError;
use crate::geo::{haversine_km, round_km, Coordinate};
use crate::ports::{RestaurantFilter, RestaurantStore, Result};
use crate::search::{self, SortBy};
use crate::types::{AnnotatedRestaurant, PriceTier, Restaurant, RestaurantPage};

/// Radius applied to the main listing when a viewer coordinate is present
/// but no explicit radius was asked for.
pub const DEFAULT_RADIUS_KM: f64 = 10.0;
/// Radius applied by the nearby endpoint when none is asked for.
pub const NEARBY_RADIUS_KM: f64 = 5.0;
/// Page size when the caller does not pass one.
pub const DEFAULT_PAGE_SIZE: usize = 10;
/// Text search returns at most this many records.
pub const SEARCH_RESULT_CAP: i64 = 10;

/// Everything the listing endpoint accepts, already parsed. All fields
/// optional; defaults are applied here rather than at the HTTP layer.
#[derive(Debug, Clone, Default)]
pub struct ListParams {
    pub cuisine: Option<String>,
    pub price_range: Option<PriceTier>,
    pub search: Option<String>,
    pub viewer: Option<Coordinate>,
    pub radius_km: Option<f64>,
    pub page: Option<usize>,
    pub limit: Option<usize>,
    pub sort_by: Option<SortBy>,
}

pub struct CatalogService {
    store: Arc<dyn RestaurantStore>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn RestaurantStore>) -> Self {
        Self { store }
    }

    /// The main listing: filter at the store, then run the in-memory
    /// pipeline. Radius filtering only engages when a viewer coordinate
    /// was supplied.
    pub async fn list(&self, params: ListParams) -> Result<RestaurantPage> {
        let filter = RestaurantFilter {
            cuisine: params.cuisine,
            price_range: params.price_range,
            name_contains: params.search,
        };
        let records = self.store.list(&filter).await?;

        let mut annotated = search::annotate(records, params.viewer);
        if params.viewer.is_some() {
            search::filter_radius(
                &mut annotated,
                params.radius_km.unwrap_or(DEFAULT_RADIUS_KM),
            );
        }
        search::sort(
            &mut annotated,
            params.sort_by.unwrap_or_default(),
            params.viewer.is_some(),
        );

        Ok(search::paginate(
            annotated,
            params.page.unwrap_or(1),
            params.limit.unwrap_or(DEFAULT_PAGE_SIZE),
        ))
    }

    /// Single record by id, annotated with distance when the viewer sent
    /// coordinates.
    pub async fn get(&self, id: uuid::Uuid, viewer: Option<Coordinate>) -> Result<AnnotatedRestaurant> {
        let restaurant = self
            .store
            .get(id)
            .await?
            .ok_or_else(|| RestoError::NotFound("Restaurant not found".into()))?;
        let distance = viewer.map(|v| round_km(haversine_km(v, restaurant.coordinate())));
        Ok(AnnotatedRestaurant {
            restaurant,
            distance,
        })
    }

    /// Free-text search over name, cuisine and address. Capped at
    /// [`SEARCH_RESULT_CAP`] records; sorted by distance only when the
    /// viewer sent coordinates. No radius filter and no pagination.
    pub async fn search(
        &self,
        query: &str,
        viewer: Option<Coordinate>,
    ) -> Result<Vec<AnnotatedRestaurant>> {
        let records = self.store.search_text(query, SEARCH_RESULT_CAP).await?;
        let mut annotated = search::annotate(records, viewer);
        search::sort(&mut annotated, SortBy::Distance, viewer.is_some());
        Ok(annotated)
    }

    /// Everything within `radius_km` (default 5) of the viewer, nearest
    /// first. The viewer coordinate is mandatory here, enforced at the
    /// HTTP layer.
    pub async fn nearby(
        &self,
        viewer: Coordinate,
        radius_km: Option<f64>,
    ) -> Result<Vec<AnnotatedRestaurant>> {
        let records = self.store.list_open().await?;
        let mut annotated = search::annotate(records, Some(viewer));
        search::filter_radius(&mut annotated, radius_km.unwrap_or(NEARBY_RADIUS_KM));
        search::sort(&mut annotated, SortBy::Distance, true);
        Ok(annotated)
    }

    /// Distinct cuisine names, alphabetical.
    pub async fn cuisines(&self) -> Result<Vec<String>> {
        self.store.distinct_cuisines().await
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use uuid::Uuid;

    use super::*;

    // ── fixtures ──────────────────────────────────────────────────────

    struct MemStore {
        records: Vec<Restaurant>,
    }

    #[async_trait]
    impl RestaurantStore for MemStore {
        async fn list(&self, filter: &RestaurantFilter) -> Result<Vec<Restaurant>> {
            Ok(self
                .records
                .iter()
                .filter(|r| r.is_open)
                .filter(|r| filter.cuisine.as_deref().is_none_or(|c| r.cuisine == c))
                .filter(|r| filter.price_range.is_none_or(|p| r.price_range == p))
                .filter(|r| {
                    filter
                        .name_contains
                        .as_deref()
                        .is_none_or(|n| r.name.to_lowercase().contains(&n.to_lowercase()))
                })
                .cloned()
                .collect())
        }

        async fn get(&self, id: Uuid) -> Result<Option<Restaurant>> {
            Ok(self.records.iter().find(|r| r.id == id).cloned())
        }

        async fn search_text(&self, query: &str, limit: i64) -> Result<Vec<Restaurant>> {
            let needle = query.to_lowercase();
            Ok(self
                .records
                .iter()
                .filter(|r| {
                    r.name.to_lowercase().contains(&needle)
                        || r.cuisine.to_lowercase().contains(&needle)
                        || r.address.to_lowercase().contains(&needle)
                })
                .take(limit as usize)
                .cloned()
                .collect())
        }

        async fn distinct_cuisines(&self) -> Result<Vec<String>> {
            let mut cuisines: Vec<String> =
                self.records.iter().map(|r| r.cuisine.clone()).collect();
            cuisines.sort();
            cuisines.dedup();
            Ok(cuisines)
        }
    }

    fn restaurant(name: &str, cuisine: &str, lat: f64) -> Restaurant {
        Restaurant {
            id: Uuid::new_v4(),
            name: name.into(),
            description: String::new(),
            address: format!("{name} street"),
            cuisine: cuisine.into(),
            price_range: PriceTier::Low,
            average_price: 20000.0,
            rating: 4.0,
            open_time: "08:00".into(),
            close_time: "21:00".into(),
            phone: None,
            image_url: None,
            is_open: true,
            latitude: lat,
            longitude: 0.0,
        }
    }

    fn service(records: Vec<Restaurant>) -> CatalogService {
        CatalogService::new(Arc::new(MemStore { records }))
    }

    const ORIGIN: Coordinate = Coordinate { lat: 0.0, lon: 0.0 };
    const LAT_2_KM: f64 = 0.017986432118374612;
    const LAT_5_KM: f64 = 0.044966080295936524;
    const LAT_10_KM: f64 = 0.08993216059187305;
    const LAT_12_KM: f64 = 0.10791859271024766;

    fn names(records: &[AnnotatedRestaurant]) -> Vec<&str> {
        records.iter().map(|r| r.restaurant.name.as_str()).collect()
    }

    // ── list ──────────────────────────────────────────────────────────

    #[tokio::test]
    async fn list_without_viewer_returns_everything_unannotated() {
        let svc = service(vec![
            restaurant("a", "Javanese", LAT_12_KM),
            restaurant("b", "Japanese", LAT_2_KM),
        ]);
        let page = svc.list(ListParams::default()).await.unwrap();
        assert_eq!(page.total_items, 2);
        assert_eq!(page.current_page, 1);
        assert!(page.restaurants.iter().all(|r| r.distance.is_none()));
    }

    #[tokio::test]
    async fn list_with_viewer_filters_to_ten_km_and_sorts_nearest_first() {
        let svc = service(vec![
            restaurant("outside", "Javanese", LAT_12_KM),
            restaurant("edge", "Javanese", LAT_10_KM),
            restaurant("near", "Javanese", LAT_2_KM),
        ]);
        let page = svc
            .list(ListParams {
                viewer: Some(ORIGIN),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(names(&page.restaurants), vec!["near", "edge"]);
        assert_eq!(page.total_items, 2);
        assert_eq!(page.restaurants[0].distance, Some(2.0));
    }

    #[tokio::test]
    async fn list_honors_an_explicit_radius() {
        let svc = service(vec![
            restaurant("near", "Javanese", LAT_2_KM),
            restaurant("mid", "Javanese", LAT_5_KM),
        ]);
        let page = svc
            .list(ListParams {
                viewer: Some(ORIGIN),
                radius_km: Some(3.0),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(names(&page.restaurants), vec!["near"]);
    }

    #[tokio::test]
    async fn list_paginates_with_defaults_applied() {
        let records = (0..13)
            .map(|i| restaurant(&format!("r{i:02}"), "Javanese", 0.0))
            .collect();
        let page = service(records).list(ListParams::default()).await.unwrap();
        assert_eq!(page.restaurants.len(), 10);
        assert_eq!(page.total_items, 13);
        assert_eq!(page.total_pages, 2);
    }

    #[tokio::test]
    async fn list_passes_filters_down_to_the_store() {
        let svc = service(vec![
            restaurant("gudeg", "Javanese", 0.0),
            restaurant("sushi", "Japanese", 0.0),
        ]);
        let page = svc
            .list(ListParams {
                cuisine: Some("Japanese".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(names(&page.restaurants), vec!["sushi"]);
    }

    // ── get ───────────────────────────────────────────────────────────

    #[tokio::test]
    async fn get_unknown_id_is_not_found() {
        let svc = service(vec![]);
        let err = svc.get(Uuid::new_v4(), None).await.unwrap_err();
        assert!(matches!(err, RestoError::NotFound(_)));
    }

    #[tokio::test]
    async fn get_annotates_distance_when_viewer_present() {
        let r = restaurant("a", "Javanese", LAT_2_KM);
        let id = r.id;
        let svc = service(vec![r]);
        let found = svc.get(id, Some(ORIGIN)).await.unwrap();
        assert_eq!(found.distance, Some(2.0));
        let plain = svc.get(id, None).await.unwrap();
        assert_eq!(plain.distance, None);
    }

    // ── search / nearby / cuisines ────────────────────────────────────

    #[tokio::test]
    async fn search_matches_address_too_and_sorts_by_distance() {
        let svc = service(vec![
            restaurant("far", "Javanese", LAT_10_KM),
            restaurant("near", "Javanese", LAT_2_KM),
        ]);
        let hits = svc.search("street", Some(ORIGIN)).await.unwrap();
        assert_eq!(names(&hits), vec!["near", "far"]);
    }

    #[tokio::test]
    async fn search_without_viewer_keeps_store_order() {
        let svc = service(vec![
            restaurant("far", "Javanese", LAT_10_KM),
            restaurant("near", "Javanese", LAT_2_KM),
        ]);
        let hits = svc.search("street", None).await.unwrap();
        assert_eq!(names(&hits), vec!["far", "near"]);
        assert!(hits.iter().all(|r| r.distance.is_none()));
    }

    #[tokio::test]
    async fn nearby_defaults_to_five_km_inclusive() {
        let svc = service(vec![
            restaurant("edge", "Javanese", LAT_5_KM),
            restaurant("out", "Javanese", LAT_10_KM),
            restaurant("near", "Javanese", LAT_2_KM),
        ]);
        let hits = svc.nearby(ORIGIN, None).await.unwrap();
        assert_eq!(names(&hits), vec!["near", "edge"]);
    }

    #[tokio::test]
    async fn nearby_accepts_a_wider_radius() {
        let svc = service(vec![
            restaurant("out", "Javanese", LAT_10_KM),
            restaurant("near", "Javanese", LAT_2_KM),
        ]);
        let hits = svc.nearby(ORIGIN, Some(30.0)).await.unwrap();
        assert_eq!(hits.len(), 2);
    }

    #[tokio::test]
    async fn cuisines_are_distinct_and_sorted() {
        let svc = service(vec![
            restaurant("a", "Javanese", 0.0),
            restaurant("b", "Dessert", 0.0),
            restaurant("c", "Javanese", 0.0),
        ]);
        assert_eq!(svc.cuisines().await.unwrap(), vec!["Dessert", "Javanese"]);
    }
}
