//! resto_core — domain logic for the restaurant discovery API.
//!
//! Pure domain types, the geo-ranked search pipeline, and the port traits
//! that `resto_postgres` implements. No sqlx, no axum — the server crate
//! wires those in on top of this.

pub mod auth;
pub mod catalog;
pub mod error;
pub mod geo;
pub mod ports;
pub mod principal;
pub mod search;
pub mod types;
