//! # desk-services
//!
//! Business logic services for Desk.
//!
//! Services validate input through the contracts, enforce referential
//! integrity against the stores and translate store failures into
//! [`DeskError`](desk_core::DeskError).

pub mod employees;
pub mod issues;
pub mod comments;

pub use comments::CommentService;
pub use employees::EmployeeService;
pub use issues::IssueService;

use desk_db::Stores;

/// All services, wired against one set of stores
#[derive(Clone)]
pub struct Services {
    pub employees: EmployeeService,
    pub issues: IssueService,
    pub comments: CommentService,
}

impl Services {
    pub fn new(stores: Stores) -> Self {
        Self {
            employees: EmployeeService::new(stores.employees.clone(), stores.issues.clone()),
            issues: IssueService::new(stores.employees, stores.issues.clone()),
            comments: CommentService::new(stores.issues, stores.comments),
        }
    }
}
