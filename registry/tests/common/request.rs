//! Fluent request builder for test HTTP requests

use actix_http::Request;
use actix_web::{dev::Service, test::TestRequest};

use super::{HOST, TestRegistryCtx, TestResponse};

/// Fluent builder for constructing test GET requests
pub struct RequestBuilder<'ctx> {
    ctx: &'ctx TestRegistryCtx,
    path: String,
    headers: Vec<(String, String)>,
    query_params: Vec<(String, String)>,
}

impl<'ctx> RequestBuilder<'ctx> {
    /// Create a GET request builder
    pub fn get(
        ctx: &'ctx TestRegistryCtx,
        path: &str,
    ) -> Self {
        Self {
            ctx,
            path: path.to_string(),
            headers: vec![("Host".to_string(), HOST.to_string())],
            query_params: vec![],
        }
    }

    /// Add a query parameter
    pub fn query(
        mut self,
        key: &str,
        value: &str,
    ) -> Self {
        self.query_params
            .push((key.to_string(), value.to_string()));
        self
    }

    /// Add a custom header
    pub fn header(
        mut self,
        key: &str,
        value: &str,
    ) -> Self {
        self.headers
            .push((key.to_string(), value.to_string()));
        self
    }

    /// The path and query string this request will be sent to
    pub fn path_and_query(&self) -> String {
        if self.query_params.is_empty() {
            return self.path.clone();
        }

        let query_string: Vec<String> = self
            .query_params
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect();
        format!("{}?{}", self.path, query_string.join("&"))
    }

    /// Send the request and return TestResponse
    pub async fn send(self) -> TestResponse {
        let app = self.ctx.app().await;
        let path = self.path_and_query();

        let mut req = TestRequest::get().uri(&path);

        for (key, value) in &self.headers {
            req = req.insert_header((key.as_str(), value.as_str()));
        }

        let req: Request = req.to_request();
        let resp = app.call(req).await.unwrap();

        TestResponse::new(resp).await
    }
}
