//! Integration tests for the user endpoints.
//!
//! These tests require:
//! - A running `PostgreSQL` database with the reference schema applied
//! - The service running (cargo run -p mediscreen-service)
//!
//! Run with: cargo test -p mediscreen-integration-tests -- --ignored

use mediscreen_integration_tests::{client, service_base_url, unique_last_name};
use reqwest::StatusCode;
use serde_json::{Value, json};

#[tokio::test]
#[ignore = "Requires running service and database"]
async fn test_user_create_and_lookup() {
    let base_url = service_base_url();
    let client = client();
    let last_name = unique_last_name();

    let resp = client
        .post(format!("{base_url}/user"))
        .json(&json!({
            "lastName": last_name,
            "firstName": "John",
            "dateOfBirth": "1970-12-31",
            "sex": "M",
            "homeAddress": "12 Rue de la Paix"
        }))
        .send()
        .await
        .expect("Failed to create user");
    assert_eq!(resp.status(), StatusCode::CREATED);
    assert_eq!(resp.text().await.unwrap_or_default(), "User sucessfully saved");

    let resp = client
        .get(format!("{base_url}/user?lastName={last_name}&firstName=John"))
        .send()
        .await
        .expect("Failed to get user");
    assert_eq!(resp.status(), StatusCode::OK);

    let user: Value = resp.json().await.expect("Invalid user JSON");
    assert_eq!(user["sex"], "M");
    assert_eq!(user["homeAddress"], "12 Rue de la Paix");

    let id = user["uuid"].as_str().expect("uuid missing");
    let resp = client
        .delete(format!("{base_url}/user/{id}"))
        .send()
        .await
        .expect("Failed to delete user");
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore = "Requires running service and database"]
async fn test_unknown_user_is_not_found() {
    let resp = client()
        .get(format!(
            "{}/user?lastName=throw&firstName=exception",
            service_base_url()
        ))
        .send()
        .await
        .expect("Failed to get user");

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
