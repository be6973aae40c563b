//! HTTP API Layer
//!
//! This crate provides the REST API of the customer engine using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: Request handlers for customers and health
//! - **Middleware**: Request ids, tracing, audit logging
//! - **DTOs**: Request/Response bodies with the Spanish wire names
//! - **Error Handling**: `{error, message}` bodies with engine-specific status codes,
//!   including rejected bodies, paths and query strings
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use domain_customer::CustomerService;
//! use infra_db::PostgresCustomerStore;
//! use interface_api::{create_router, AppState};
//!
//! let service = CustomerService::new(Arc::new(PostgresCustomerStore::new(pool)));
//! let app = create_router(AppState::new(service));
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod handlers;
pub mod dto;

use axum::{
    Router,
    routing::get,
    middleware as axum_middleware,
};
use tower_http::cors::{CorsLayer, Any};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use domain_customer::CustomerService;

use crate::middleware::audit_middleware;
use crate::handlers::{customer, health};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub service: CustomerService,
}

impl AppState {
    pub fn new(service: CustomerService) -> Self {
        Self { service }
    }
}

/// Creates the main API router
///
/// # Arguments
///
/// * `state` - Shared state holding the customer engine
///
/// # Returns
///
/// Configured Axum router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    // Public routes
    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    // Customer routes
    let customer_routes = Router::new()
        .route("/", get(customer::list_customers).post(customer::create_customer))
        .route(
            "/:id",
            get(customer::get_customer)
                .put(customer::update_customer)
                .delete(customer::delete_customer),
        )
        .route("/buscar", get(customer::search_customers))
        .route("/buscar/documento", get(customer::search_by_document))
        .route("/buscar/rango-fechas", get(customer::search_by_birth_date_range))
        .route("/multiples-telefonos", get(customer::multiple_phones_report))
        .route("/multiples-direcciones", get(customer::multiple_addresses_report))
        .layer(axum_middleware::from_fn(audit_middleware));

    // Combine all routes
    Router::new()
        .merge(health_routes)
        .nest("/clientes", customer_routes)
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .with_state(state)
}
