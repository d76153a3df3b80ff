//! API routes

use axum::{
    routing::{get, post},
    Router,
};

use crate::extractors::AppState;
use crate::handlers::{comments, employees, issues};

/// Create the complete API router
pub fn router() -> Router<AppState> {
    Router::new().nest("/api", api_router())
}

fn api_router() -> Router<AppState> {
    Router::new()
        .nest("/employees", employees_router())
        .nest("/issues", issues_router())
        .nest("/comments", comments_router())
}

fn employees_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(employees::list_employees)
                .post(employees::create_employee)
                .put(employees::update_employee),
        )
        .route(
            "/:id",
            get(employees::get_employee)
                .patch(employees::edit_employee)
                .delete(employees::delete_employee),
        )
}

fn issues_router() -> Router<AppState> {
    Router::new()
        .route("/", get(issues::list_issues).post(issues::create_issue))
        .route("/search", get(issues::search_issues))
        .route("/employee/:id", get(issues::list_employee_issues))
        .route(
            "/:id",
            get(issues::get_issue)
                .patch(issues::edit_issue)
                .delete(issues::delete_issue),
        )
}

fn comments_router() -> Router<AppState> {
    Router::new()
        .route("/", post(comments::create_comment))
        .route("/issue/:id", get(comments::list_issue_comments))
        .route("/:id", axum::routing::delete(comments::delete_comment))
}
