//! # desk-models
//!
//! Domain models for Desk.
//!
//! Each resource has a persisted entity (what the store returns and the API
//! renders) and write models: `*Attributes` for create/full-update bodies and
//! `*Patch` for partial updates. Write models keep every field optional so
//! the contracts can tell "missing" apart from "too short".

pub use desk_core::traits::{Entity, Id, Identifiable};

pub mod employee;
pub mod issue;
pub mod comment;

pub use employee::{Employee, EmployeeAttributes, EmployeePatch, EmployeeReplacement};
pub use issue::{Issue, IssueAttributes, IssuePatch};
pub use comment::{Comment, CommentAttributes};
