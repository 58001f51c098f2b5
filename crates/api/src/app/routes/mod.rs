use axum::{routing::get, Router};

pub mod catalog;
pub mod report;
pub mod system;

/// Router for every endpoint. There is no authentication; the service is
/// meant for a trusted intranet.
pub fn router() -> Router {
    Router::new()
        .route("/", get(report::show_form).post(report::submit_report))
        .route("/catalog", get(catalog::get_catalog))
        .route("/health", get(system::health))
}
