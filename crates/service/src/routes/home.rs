//! Index route.

/// Text served at `/`.
pub const WELCOME: &str = "Welcome on the Service-SQL REST API, targeted to be used as a micro-service to communicate with a relational database.";

/// Welcome text for `GET /`.
pub async fn index() -> &'static str {
    WELCOME
}
