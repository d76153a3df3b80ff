//! Axum extractors and shared state for API handlers

use axum::extract::{FromRequest, FromRequestParts};
use desk_db::Stores;
use desk_services::Services;

use crate::error::ApiError;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub services: Services,
}

impl AppState {
    pub fn new(stores: Stores) -> Self {
        Self {
            services: Services::new(stores),
        }
    }

    /// State over a fresh in-memory database
    pub fn in_memory() -> Self {
        Self::new(Stores::in_memory())
    }
}

/// JSON body whose rejections render as [`ApiError`]
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// Path parameters whose rejections render as [`ApiError`]
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);

/// Query string whose rejections render as [`ApiError`]
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);
