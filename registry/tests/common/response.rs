//! Test response wrapper with fluent assertions

use actix_web::{
    dev::ServiceResponse,
    http::{StatusCode, header},
};
use fauxgem_registry_core::{ErrorResponse, PublicErrorType, codec};
use serde::de::DeserializeOwned;

/// Wrapper around ServiceResponse providing fluent assertions
pub struct TestResponse {
    status: StatusCode,
    location: Option<String>,
    content_type: Option<String>,
    body: Vec<u8>,
}

impl TestResponse {
    /// Create TestResponse from ServiceResponse
    pub(crate) async fn new(resp: ServiceResponse) -> Self {
        let status = resp.status();
        let header_value = |name: header::HeaderName| {
            resp.headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(String::from)
        };
        let location = header_value(header::LOCATION);
        let content_type = header_value(header::CONTENT_TYPE);

        let body = actix_web::body::to_bytes(resp.into_body())
            .await
            .unwrap()
            .to_vec();

        Self {
            status,
            location,
            content_type,
            body,
        }
    }

    /// Get the response status code
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Get the raw response body bytes
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Get the body as a string
    pub fn body_string(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }

    /// Get the Content-Type header, if any
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    // Status assertions

    /// Assert status equals expected, returns self for chaining
    pub fn assert_status(
        self,
        expected: StatusCode,
    ) -> Self {
        assert_eq!(
            self.status,
            expected,
            "Expected status {expected}, got {}. Body: {}",
            self.status,
            self.body_string()
        );
        self
    }

    /// Assert status is 200 OK
    pub fn assert_ok(self) -> Self {
        self.assert_status(StatusCode::OK)
    }

    /// Assert status is 404 Not Found
    pub fn assert_not_found(self) -> Self {
        self.assert_status(StatusCode::NOT_FOUND)
    }

    /// Assert status is 500 Internal Server Error
    pub fn assert_server_error(self) -> Self {
        self.assert_status(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Assert a 302 redirect to `location`
    pub fn assert_redirect_to(
        self,
        location: &str,
    ) -> Self {
        let this = self.assert_status(StatusCode::FOUND);
        assert_eq!(
            this.location.as_deref(),
            Some(location),
            "unexpected redirect target"
        );
        this
    }

    // Body parsing

    /// Decode the body with the fixture codec, panics if decoding fails
    pub fn decode<T: DeserializeOwned>(self) -> T {
        codec::decode(&self.body).unwrap_or_else(|e| {
            panic!(
                "Failed to decode response body: {}. Body: {:?}",
                e, self.body
            )
        })
    }

    /// Parse body as ErrorResponse
    pub fn error_response(self) -> ErrorResponse {
        serde_json::from_slice(&self.body).unwrap_or_else(|e| {
            panic!(
                "Failed to parse error response: {}. Body: {}",
                e,
                self.body_string()
            )
        })
    }

    // Error assertions

    /// Assert error type matches expected
    pub fn assert_error_type(
        self,
        expected: PublicErrorType,
    ) -> Self {
        let err: ErrorResponse = serde_json::from_slice(&self.body).unwrap_or_else(|e| {
            panic!(
                "Failed to parse error response: {}. Body: {}",
                e,
                self.body_string()
            )
        });
        assert_eq!(
            err.error, expected,
            "Expected error type {:?}, got {:?}",
            expected, err.error
        );
        self
    }

    /// Assert response is a missing-fixture error
    pub fn assert_file_not_found_error(self) -> Self {
        self.assert_server_error()
            .assert_error_type(PublicErrorType::FileNotFound)
    }
}

impl std::fmt::Debug for TestResponse {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.debug_struct("TestResponse")
            .field("status", &self.status)
            .field("location", &self.location)
            .field("body", &self.body_string())
            .finish()
    }
}
