//! resto_server — REST surface for the restaurant discovery service.
//!
//! Library form so integration tests can build the router against
//! in-memory stores; the binary lives in `main.rs`.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
