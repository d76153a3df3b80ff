//! # desk-contracts
//!
//! Contract validation for Desk.
//!
//! Contracts validate write models before create/update operations reach a
//! store. Each contract reports only the first violation it finds: parameter
//! presence first, then required fields, then length bounds, each in
//! declaration order.

pub mod base;
pub mod employees;
pub mod issues;
pub mod comments;

pub use base::*;
pub use comments::CommentContract;
pub use employees::{EditEmployeeContract, EmployeeContract};
pub use issues::{EditIssueContract, IssueContract};
