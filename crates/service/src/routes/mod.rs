//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET    /                                   - Welcome text
//! GET    /health                             - Liveness check
//! GET    /health/ready                       - Readiness check (store connectivity)
//!
//! # Patients
//! GET    /patient?lastName=&firstName=       - Fetch by name (404 if absent)
//! GET    /patients                           - Fetch all
//! POST   /patient                            - Create (201, 400 if invalid)
//! PUT    /patient/{uuid}                     - Overwrite (404 if absent, 400 if invalid)
//! DELETE /patient/{uuid}                     - Delete (404 if absent)
//!
//! # Users
//! Same as patients under /user and /users.
//! ```

pub mod health;
pub mod home;
pub mod records;


use axum::{
    Router, middleware,
    routing::{get, put},
};
use mediscreen_core::{Patient, Record, User};
use serde::{Serialize, de::DeserializeOwned};
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use crate::middleware::{operation_log_middleware, request_id_middleware};
use crate::state::{AppState, HasStore};

/// Create the CRUD routes for one record kind.
pub fn record_routes<R>() -> Router<AppState>
where
    R: Record + Serialize + DeserializeOwned,
    R::Id: DeserializeOwned,
    AppState: HasStore<R>,
{
    let kind = R::KIND;

    Router::new()
        .route(
            &format!("/{kind}"),
            get(records::show::<R>).post(records::create::<R>),
        )
        .route(&format!("/{kind}s"), get(records::list::<R>))
        .route(
            &format!("/{kind}/{{uuid}}"),
            put(records::update::<R>).delete(records::destroy::<R>),
        )
}

/// Create the operation routes: index plus both record kinds.
///
/// Every route here is wrapped by the operation log.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::index))
        .merge(record_routes::<Patient>())
        .merge(record_routes::<User>())
        .route_layer(middleware::from_fn(operation_log_middleware))
}

/// Build the full application router over `state`.
///
/// Sentry layers are added by the binary on top of this.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .merge(routes())
        .layer(middleware::from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = tracing::field::Empty,
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
}
