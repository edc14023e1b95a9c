//! Storage port traits for the catalog and user stores.
//! Implemented by resto_postgres — core logic depends only on these traits.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::RestoError;
use crate::types::{PriceTier, Restaurant, User};

pub type Result<T> = std::result::Result<T, RestoError>;

/// Attribute filters applied inside the restaurant store query.
/// Implementations always add `is_open = true` on top of these.
#[derive(Debug, Clone, Default)]
pub struct RestaurantFilter {
    pub cuisine: Option<String>,
    pub price_range: Option<PriceTier>,
    /// Case-insensitive substring match against the name only.
    pub name_contains: Option<String>,
}

#[async_trait]
pub trait RestaurantStore: Send + Sync {
    /// List open restaurants matching the filter, in the store's natural
    /// (insertion) order.
    async fn list(&self, filter: &RestaurantFilter) -> Result<Vec<Restaurant>>;

    /// Load a single restaurant by id.
    async fn get(&self, id: Uuid) -> Result<Option<Restaurant>>;

    /// Case-insensitive substring match over name, cuisine and address.
    /// Open restaurants only, capped at `limit` rows.
    async fn search_text(&self, query: &str, limit: i64) -> Result<Vec<Restaurant>>;

    /// Every open restaurant, no attribute filters.
    async fn list_open(&self) -> Result<Vec<Restaurant>> {
        self.list(&RestaurantFilter::default()).await
    }

    /// Distinct cuisine tags among open restaurants.
    async fn distinct_cuisines(&self) -> Result<Vec<String>>;
}

/// Insert payload for `UserStore::insert` — password already hashed.
/// Remaining profile fields come from schema defaults.
#[derive(Debug, Clone)]
pub struct NewUserRecord {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>>;

    /// Look up the holder of a stored refresh token.
    async fn find_by_refresh_token(&self, token: &str) -> Result<Option<User>>;

    /// Insert a new user and return the stored row.
    async fn insert(&self, record: NewUserRecord) -> Result<User>;

    /// Persist profile-field changes (username, email, hash, address
    /// fields) for an existing user.
    async fn update(&self, user: &User) -> Result<User>;

    /// Set or clear the single stored refresh token for a user.
    async fn set_refresh_token(&self, id: Uuid, token: Option<&str>) -> Result<()>;

    /// All users, for the admin listing.
    async fn list(&self) -> Result<Vec<User>>;
}
