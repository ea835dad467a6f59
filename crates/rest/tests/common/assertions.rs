//! HTTP response assertions.

use axum_test::TestResponse;
use campus_persistence::types::Course;
use serde_json::{Value, json};

/// Asserts that the response body is the standard not-found payload.
pub fn assert_not_found(response: &TestResponse) {
    response.assert_status_not_found();
    response.assert_json(&json!({"detail": "Not found."}));
}

/// Asserts a 400 response whose body reports `field`.
pub fn assert_field_error(response: &TestResponse, field: &str) {
    response.assert_status_bad_request();
    let body: Value = response.json();
    let messages = body
        .get(field)
        .and_then(Value::as_array)
        .unwrap_or_else(|| panic!("Expected errors for '{}', got {}", field, body));
    assert!(!messages.is_empty(), "Expected at least one message");
}

/// Asserts that the response has a Location header ending with `suffix`.
pub fn assert_location_ends_with(response: &TestResponse, suffix: &str) {
    let location = response.header("location");
    let location = location.to_str().expect("Location is not ASCII");
    assert!(
        location.ends_with(suffix),
        "Expected Location ending with {}, got {}",
        suffix,
        location
    );
}

/// Returns the ids of a list response in order.
pub fn ids_of(courses: &[Course]) -> Vec<i64> {
    courses.iter().map(|c| c.id).collect()
}
