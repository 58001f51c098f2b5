//! HTTP application wiring (Axum router + service wiring).
//!
//! - `services.rs`: builds the catalog, dispatcher and report processor
//! - `routes/`: HTTP handlers
//! - `page.rs`: the HTML form
//! - `dto.rs`: JSON response shapes
//! - `errors.rs`: processor errors to status codes and notices

use std::sync::Arc;

use axum::{Extension, Router};
use tower::ServiceBuilder;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod page;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs` and tests).
pub fn build_app(services: Arc<services::AppServices>) -> Router {
    routes::router().layer(
        ServiceBuilder::new()
            .layer(axum::middleware::from_fn(middleware::log_requests))
            .layer(Extension(services)),
    )
}
