//! PostgreSQL adapter for the restaurant discovery core.
//!
//! Implements the `resto_core` port traits over `sqlx::PgPool`, plus the
//! schema bootstrap and the demonstration-catalog seeder the server and
//! seed binaries run at startup.

pub mod schema;
pub mod seed;
pub mod sqlx_types;
pub mod store;

pub use store::{PgRestaurantStore, PgUserStore};
