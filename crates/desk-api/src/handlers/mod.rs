//! API request handlers

pub mod employees;
pub mod issues;
pub mod comments;
