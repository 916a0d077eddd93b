//! Per-operation logging for the record routes.
//!
//! Every record handler is wrapped by [`operation_log_middleware`], which
//! emits one line when the operation starts and one naming its outcome.
//! Install it with `Router::route_layer` so the matched route is known.

use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};

/// Log entry and outcome of a record operation.
///
/// The operation is named by method and matched route, e.g.
/// `PUT /patient/{uuid}`. Outcomes are logged at `info` for success, `warn`
/// for client errors (404, 400) and `error` for server errors.
pub async fn operation_log_middleware(request: Request, next: Next) -> Response {
    let operation = operation_name(&request);
    tracing::info!(%operation, "Executing operation");

    let response = next.run(request).await;
    let status = response.status();

    if status.is_server_error() {
        tracing::error!(%operation, status = status.as_u16(), "Operation failed");
    } else if status.is_client_error() {
        tracing::warn!(%operation, status = status.as_u16(), "Operation rejected");
    } else {
        tracing::info!(%operation, status = status.as_u16(), "Operation succeeded");
    }

    response
}

fn operation_name(request: &Request) -> String {
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| request.uri().path(), MatchedPath::as_str);

    format!("{} {route}", request.method())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        Router,
        body::Body,
        http::StatusCode,
        middleware,
        routing::{delete, get, post},
    };
    use tower::ServiceExt;
    use tracing::{Event, Level, Subscriber, field::Field};
    use tracing_subscriber::{
        layer::{Context, Layer},
        prelude::*,
    };

    use super::*;

    /// Level, operation and message of one logged operation event.
    type Logged = (Level, String, String);

    /// Layer keeping every event that names an operation.
    struct CaptureLayer(Arc<Mutex<Vec<Logged>>>);

    #[derive(Default)]
    struct EventFields {
        operation: Option<String>,
        message: String,
    }

    impl tracing::field::Visit for EventFields {
        fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
            match field.name() {
                "operation" => self.operation = Some(format!("{value:?}")),
                "message" => self.message = format!("{value:?}"),
                _ => {}
            }
        }
    }

    impl<S: Subscriber> Layer<S> for CaptureLayer {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            let mut fields = EventFields::default();
            event.record(&mut fields);
            if let Some(operation) = fields.operation {
                self.0
                    .lock()
                    .unwrap()
                    .push((*event.metadata().level(), operation, fields.message));
            }
        }
    }

    fn router() -> Router {
        Router::new()
            .route("/patient", post(|| async { StatusCode::CREATED }))
            .route("/patient/{uuid}", delete(|| async { StatusCode::NOT_FOUND }))
            .route(
                "/patients",
                get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
            )
            .route_layer(middleware::from_fn(operation_log_middleware))
    }

    /// Send one request and return the operation events it logged.
    async fn logged_events(method: &str, uri: &str) -> Vec<Logged> {
        let captured = Arc::new(Mutex::new(Vec::new()));
        let subscriber = tracing_subscriber::registry().with(CaptureLayer(captured.clone()));
        let _guard = tracing::subscriber::set_default(subscriber);

        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        router().oneshot(request).await.unwrap();

        captured.lock().unwrap().clone()
    }

    fn logged(level: Level, operation: &str, message: &str) -> Logged {
        (level, operation.to_string(), message.to_string())
    }

    #[tokio::test]
    async fn test_success_logs_entry_and_info_outcome() {
        let events = logged_events("POST", "/patient").await;

        assert_eq!(
            events,
            [
                logged(Level::INFO, "POST /patient", "Executing operation"),
                logged(Level::INFO, "POST /patient", "Operation succeeded"),
            ]
        );
    }

    #[tokio::test]
    async fn test_client_error_logs_warn_outcome() {
        let events =
            logged_events("DELETE", "/patient/b42a8ef5-8baa-4bc2-89aa-d18cdc3239f9").await;

        assert_eq!(
            events,
            [
                logged(Level::INFO, "DELETE /patient/{uuid}", "Executing operation"),
                logged(Level::WARN, "DELETE /patient/{uuid}", "Operation rejected"),
            ]
        );
    }

    #[tokio::test]
    async fn test_server_error_logs_error_outcome() {
        let events = logged_events("GET", "/patients").await;

        assert_eq!(
            events,
            [
                logged(Level::INFO, "GET /patients", "Executing operation"),
                logged(Level::ERROR, "GET /patients", "Operation failed"),
            ]
        );
    }

    #[test]
    fn test_operation_name_falls_back_to_uri_path() {
        let request = Request::builder()
            .method("DELETE")
            .uri("/patient/b42a8ef5-8baa-4bc2-89aa-d18cdc3239f9?x=1")
            .body(Body::empty())
            .unwrap();

        assert_eq!(
            operation_name(&request),
            "DELETE /patient/b42a8ef5-8baa-4bc2-89aa-d18cdc3239f9"
        );
    }
}
