//! # desk-core
//!
//! Core types, traits, and utilities for Desk.
//!
//! This crate provides the foundational building blocks used across all other crates:
//! - Error taxonomy (validation, not found, conflict, store failures)
//! - Result type alias
//! - Core traits (Entity, Identifiable)
//! - The `Patch<T>` presence wrapper used by partial updates
//! - Configuration types

pub mod error;
pub mod result;
pub mod traits;
pub mod types;
pub mod config;

pub use error::*;
pub use result::*;
pub use traits::*;
pub use types::*;
