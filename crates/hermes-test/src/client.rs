//! Test client for in-memory exchanges.

use crate::error::TestError;
use crate::request::{TestRequest, TestRequestBuilder};
use crate::response::TestResponse;
use bytes::Bytes;
use hermes_core::Request;
use hermes_server::{ExchangeService, Server};
use http::Method;
use std::sync::Arc;

/// Drives a [`Server`] (or any [`ExchangeService`]) without sockets.
///
/// Requests go through the full middleware chain and route table exactly as
/// they would over the network.
///
/// # Example
///
/// ```ignore
/// use hermes_test::TestClient;
///
/// let client = TestClient::new(server);
/// let response = client.get("/users").send().await;
/// response.assert_status(http::StatusCode::OK);
/// ```
#[must_use]
pub struct TestClient {
    service: Arc<dyn ExchangeService>,
    default_headers: Vec<(String, String)>,
}

impl TestClient {
    /// Creates a client that owns `server`.
    pub fn new(server: Server) -> Self {
        Self::from_service(Arc::new(server))
    }

    /// Creates a client over any exchange service.
    pub fn from_service(service: Arc<dyn ExchangeService>) -> Self {
        Self {
            service,
            default_headers: Vec::new(),
        }
    }

    /// Adds a header sent with every request.
    pub fn with_default_header(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.default_headers.push((name.into(), value.into()));
        self
    }

    /// Starts a `GET` request.
    pub fn get(&self, url: impl Into<String>) -> TestClientRequest<'_> {
        TestClientRequest::new(self, TestRequest::get(url))
    }

    /// Starts a `POST` request.
    pub fn post(&self, url: impl Into<String>) -> TestClientRequest<'_> {
        TestClientRequest::new(self, TestRequest::post(url))
    }

    /// Starts a `PUT` request.
    pub fn put(&self, url: impl Into<String>) -> TestClientRequest<'_> {
        TestClientRequest::new(self, TestRequest::put(url))
    }

    /// Starts a `PATCH` request.
    pub fn patch(&self, url: impl Into<String>) -> TestClientRequest<'_> {
        TestClientRequest::new(self, TestRequest::patch(url))
    }

    /// Starts a `DELETE` request.
    pub fn delete(&self, url: impl Into<String>) -> TestClientRequest<'_> {
        TestClientRequest::new(self, TestRequest::delete(url))
    }

    /// Starts a request with any method.
    pub fn request(&self, method: Method, url: impl Into<String>) -> TestClientRequest<'_> {
        TestClientRequest::new(self, TestRequestBuilder::new(method, url))
    }

    /// Dispatches a prebuilt request view as-is.
    ///
    /// Default headers are not applied. Useful for requests the builder
    /// refuses to produce, such as one without a method or url.
    pub async fn send_raw(&self, request: Request) -> TestResponse {
        let response = self.service.on_exchange(request).await;
        TestResponse::from_response(&response)
    }
}

/// A request builder bound to a test client.
#[must_use]
pub struct TestClientRequest<'a> {
    client: &'a TestClient,
    builder: TestRequestBuilder,
}

impl<'a> TestClientRequest<'a> {
    fn new(client: &'a TestClient, builder: TestRequestBuilder) -> Self {
        let builder = client
            .default_headers
            .iter()
            .fold(builder, |builder, (name, value)| builder.header(name, value));
        Self { client, builder }
    }

    /// Sets a header.
    pub fn header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        self.builder = self.builder.header(name, value);
        self
    }

    /// Sets the raw request body.
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.builder = self.builder.body(body);
        self
    }

    /// Sets the body as JSON.
    pub fn json<T: serde::Serialize>(mut self, value: &T) -> Self {
        self.builder = self.builder.json(value);
        self
    }

    /// Sends the request.
    ///
    /// # Panics
    ///
    /// Panics if the request could not be built; use
    /// [`try_send`](Self::try_send) to get the error instead.
    pub async fn send(self) -> TestResponse {
        match self.try_send().await {
            Ok(response) => response,
            Err(e) => panic!("failed to build test request: {e}"),
        }
    }

    /// Sends the request, returning build errors.
    pub async fn try_send(self) -> Result<TestResponse, TestError> {
        let request = self.builder.build()?;
        Ok(self.client.send_raw(request.into_request()).await)
    }
}
