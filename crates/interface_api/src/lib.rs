//! HTTP API Layer
//!
//! This crate provides the REST API for the plot registry using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: Request handlers for files, ledger editing, and export
//! - **Middleware**: Request ids, tracing, audit logging
//! - **DTOs**: Request/Response data transfer objects
//! - **Error Handling**: Consistent error responses
//!
//! The registry lives in one [`RegistryPortal`] behind a read-write lock.
//! Every request runs its registry operation to completion under the lock.
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, seed::build_portal};
//!
//! let portal = build_portal(&config)?;
//! let app = create_router(portal, config);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod handlers;
pub mod dto;
pub mod seed;

use std::sync::Arc;

use axum::{
    middleware as axum_middleware,
    routing::{get, patch, post},
    Router,
};
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use domain_registry::RegistryPortal;

use crate::config::RegistryConfig;
use crate::handlers::{export, files, health, ledger, registry};
use crate::middleware::audit_middleware;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub portal: Arc<RwLock<RegistryPortal>>,
    pub config: RegistryConfig,
}

/// Creates the main API router
///
/// # Arguments
///
/// * `portal` - The registry to serve
/// * `config` - API configuration
///
/// # Returns
///
/// Configured Axum router with all routes and middleware
pub fn create_router(portal: RegistryPortal, config: RegistryConfig) -> Router {
    let state = AppState {
        portal: Arc::new(RwLock::new(portal)),
        config,
    };

    let public_routes = Router::new().route("/health", get(health::health_check));

    let file_routes = Router::new()
        .route("/", get(files::list_files).post(files::enroll_file))
        .route("/:file_no", get(files::get_file))
        .route("/:file_no/statement", get(files::preview_statement))
        .route("/:file_no/ledger", post(ledger::begin_edit));

    let ledger_routes = Router::new()
        .route("/", get(ledger::get_ledger).delete(ledger::discard_ledger))
        .route("/entries", post(ledger::add_entry))
        .route(
            "/entries/:index",
            patch(ledger::update_entry).delete(ledger::remove_entry),
        )
        .route("/commit", post(ledger::commit_ledger));

    let api_routes = Router::new()
        .route("/registry", get(registry::registry_info))
        .nest("/files", file_routes)
        .nest("/ledger", ledger_routes)
        .route("/export", get(export::export_registry))
        .layer(axum_middleware::from_fn(audit_middleware));

    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
