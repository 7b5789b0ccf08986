//! Response checks shared by the test suites.
//!
//! Every check logs what it verifies and returns an [`AssertionError`]
//! describing the mismatch, so callers can `?` them inside tests returning
//! `anyhow::Result`.

use std::time::Duration;

use chrono::DateTime;
use reqwest::header::{HeaderMap, CONTENT_TYPE};
use serde_json::Value;

use crate::{log, User};

/// Upper bound used by [`expect_response_time`] callers that have no SLA.
pub const DEFAULT_MAX_RESPONSE_TIME: Duration = Duration::from_millis(3_000);

/// A failed response check.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("assertion failed: {0}")]
pub struct AssertionError(pub String);

type Check = std::result::Result<(), AssertionError>;

fn fail(message: String) -> Check {
    log::check_failed(format_args!("{message}"));
    Err(AssertionError(message))
}

/// A created user carries both `id` and `createdAt`.
pub fn expect_valid_user(user: &User) -> Check {
    log::check(format_args!("validating user object structure"));
    if user.id.as_deref().map_or(true, str::is_empty) {
        return fail(format!("user has no id: {user:?}"));
    }
    if user.created_at.is_none() {
        return fail(format!("user has no createdAt: {user:?}"));
    }
    Ok(())
}

/// An error message mentions the expected status code.
pub fn expect_http_status(message: &str, expected: u16) -> Check {
    log::check(format_args!(
        "expecting HTTP status message to include {expected}"
    ));
    if !message.contains(&expected.to_string()) {
        return fail(format!("unexpected HTTP message: {message}"));
    }
    Ok(())
}

/// A create-user response: status 201 and
/// `{id: string, name: string, job: string, createdAt: RFC 3339}`.
pub fn expect_user_creation_response(body: &Value, status: u16) -> Check {
    log::check(format_args!("validating user creation response"));
    if status != 201 {
        return fail(format!("expected status 201, got {status}"));
    }
    for field in ["id", "name", "job", "createdAt"] {
        match body.get(field) {
            Some(Value::String(_)) => {}
            Some(other) => return fail(format!("field '{field}' is not a string: {other}")),
            None => return fail(format!("field '{field}' is missing from {body}")),
        }
    }
    let created_at = body
        .get("createdAt")
        .and_then(Value::as_str)
        .unwrap_or_default();
    if DateTime::parse_from_rfc3339(created_at).is_err() {
        return fail(format!("createdAt is not an ISO-8601 datetime: {created_at}"));
    }
    Ok(())
}

/// A page body whose `data` field is an array.
pub fn expect_pagination_response(body: &Value) -> Check {
    log::check(format_args!("validating pagination response data structure"));
    if !body.get("data").is_some_and(Value::is_array) {
        return fail("expected 'data' to be an array".to_owned());
    }
    Ok(())
}

pub fn expect_status_ok(status: u16) -> Check {
    log::check(format_args!("expecting HTTP status 200, received {status}"));
    if status != 200 {
        return fail(format!("unexpected status: {status}"));
    }
    Ok(())
}

pub fn expect_json_content_type(headers: &HeaderMap) -> Check {
    log::check(format_args!("validating that content-type is application/json"));
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok());
    if !content_type.is_some_and(|value| value.contains("application/json")) {
        return fail(format!("unexpected content-type: {content_type:?}"));
    }
    Ok(())
}

/// The body must not echo a `password` field back.
pub fn expect_no_sensitive_data(body: &Value) -> Check {
    log::check(format_args!("ensuring no password is present in response"));
    if body.get("password").is_some() {
        return fail("sensitive field 'password' is present in response".to_owned());
    }
    Ok(())
}

pub fn expect_status_below_500(status: u16) -> Check {
    log::check(format_args!("expecting status below 500, received {status}"));
    if status >= 500 {
        return fail(format!("server error: status code {status}"));
    }
    Ok(())
}

/// Only 200 and 429 are acceptable answers from a rate-limited endpoint.
pub fn expect_rate_limit_status(status: u16) -> Check {
    log::check(format_args!(
        "validating that status is either 200 or 429, received {status}"
    ));
    if !matches!(status, 200 | 429) {
        return fail(format!("unexpected rate limit status: {status}"));
    }
    Ok(())
}

pub fn expect_response_time(elapsed: Duration, max: Duration) -> Check {
    log::check(format_args!(
        "response time {} ms (max allowed {} ms)",
        elapsed.as_millis(),
        max.as_millis()
    ));
    if elapsed >= max {
        return fail(format!("response time too high: {} ms", elapsed.as_millis()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
    use serde_json::json;

    use super::*;

    #[test]
    fn rate_limit_accepts_only_200_and_429() {
        assert!(expect_rate_limit_status(429).is_ok());
        assert!(expect_rate_limit_status(200).is_ok());
        assert!(expect_rate_limit_status(500).is_err());
        assert!(expect_rate_limit_status(204).is_err());
    }

    #[test]
    fn creation_schema_requires_string_fields_and_datetime() {
        let valid = json!({
            "id": "123",
            "name": "Alice",
            "job": "QA",
            "createdAt": "2026-10-16T09:15:30.123Z"
        });
        assert!(expect_user_creation_response(&valid, 201).is_ok());
        assert!(expect_user_creation_response(&valid, 200).is_err());

        let numeric_id = json!({
            "id": 123,
            "name": "Alice",
            "job": "QA",
            "createdAt": "2026-10-16T09:15:30.123Z"
        });
        assert!(expect_user_creation_response(&numeric_id, 201).is_err());

        let bad_date = json!({
            "id": "123",
            "name": "Alice",
            "job": "QA",
            "createdAt": "yesterday"
        });
        assert!(expect_user_creation_response(&bad_date, 201).is_err());
    }

    #[test]
    fn valid_user_needs_id_and_created_at() {
        let mut user = User {
            id: Some("7".to_owned()),
            name: "Bob".to_owned(),
            job: "Developer".to_owned(),
            created_at: Some("2026-10-16T09:15:30.123Z".to_owned()),
            updated_at: None,
        };
        assert!(expect_valid_user(&user).is_ok());
        user.created_at = None;
        assert!(expect_valid_user(&user).is_err());
    }

    #[test]
    fn status_message_and_status_checks() {
        assert!(expect_http_status("request failed: 400 - {}", 400).is_ok());
        assert!(expect_http_status("request failed: 404 - {}", 400).is_err());
        assert!(expect_status_ok(200).is_ok());
        assert!(expect_status_ok(201).is_err());
        assert!(expect_status_below_500(499).is_ok());
        assert!(expect_status_below_500(500).is_err());
    }

    #[test]
    fn body_shape_checks() {
        assert!(expect_pagination_response(&json!({ "data": [] })).is_ok());
        assert!(expect_pagination_response(&json!({ "data": {} })).is_err());
        assert!(expect_no_sensitive_data(&json!({ "token": "t" })).is_ok());
        assert!(expect_no_sensitive_data(&json!({ "token": "t", "password": "p" })).is_err());
    }

    #[test]
    fn content_type_and_timing_checks() {
        let mut headers = HeaderMap::new();
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("application/json; charset=utf-8"),
        );
        assert!(expect_json_content_type(&headers).is_ok());
        assert!(expect_json_content_type(&HeaderMap::new()).is_err());

        assert!(expect_response_time(Duration::from_millis(20), DEFAULT_MAX_RESPONSE_TIME).is_ok());
        let err = expect_response_time(Duration::from_secs(3), DEFAULT_MAX_RESPONSE_TIME)
            .expect_err("3 s is not below 3 s");
        assert!(err.to_string().contains("3000 ms"));
    }
}
