//! Response construction.
//!
//! # Responsibilities
//! - Attach the permissive CORS header set browsers require
//! - Relay upstream bytes with a JSON content type
//! - Shape error responses (status + plain-text description)
//!
//! # Design Decisions
//! - CORS headers go on successful and preflight responses only; error
//!   responses carry none
//! - The relayed body is the upstream bytes untouched

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use bytes::Bytes;

/// Methods browsers may use against the proxy.
pub const ALLOWED_METHODS: &str = "GET, OPTIONS";

/// Request headers browsers may send cross-origin.
pub const ALLOWED_HEADERS: &str = "Authorization, Content-Type";

/// Attach the three CORS headers to a response.
pub fn with_cors(mut response: Response) -> Response {
    let headers = response.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOWED_METHODS),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOWED_HEADERS),
    );
    response
}

/// Successful relay: upstream bytes verbatim, JSON content type, CORS.
pub fn relay_response(payload: Bytes) -> Response {
    with_cors(
        (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            payload,
        )
            .into_response(),
    )
}

/// Preflight answer: empty body, CORS headers, 200.
pub fn preflight_response() -> Response {
    with_cors(StatusCode::OK.into_response())
}

/// Error response: status plus a human-readable description.
pub fn error_response(status: StatusCode, message: &str) -> Response {
    (status, message.to_string()).into_response()
}
