//! # desk-api
//!
//! REST API handlers for Desk.
//!
//! Resources are plain camelCase JSON; every failure is rendered as
//! `{"error": "<message>"}`.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod routes;

pub use extractors::AppState;
pub use routes::router;
