//! HTTP middleware stack.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, added in `main`)
//! 2. `TraceLayer` (`http_request` span with status and latency)
//! 3. Request ID (add unique ID to each request)
//! 4. Operation log (record routes only, via `route_layer`)

pub mod operation_log;
pub mod request_id;

pub use operation_log::operation_log_middleware;
pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
