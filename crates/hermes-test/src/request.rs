//! Test request building.

use crate::error::TestError;
use bytes::Bytes;
use hermes_core::Request;
use http::{header, HeaderMap, HeaderName, HeaderValue, Method};
use serde::Serialize;

/// A fully built test request.
#[derive(Debug, Clone)]
pub struct TestRequest {
    /// HTTP method.
    pub method: Method,
    /// Raw request-target, matched verbatim by the route table.
    pub url: String,
    /// Request headers.
    pub headers: HeaderMap,
    /// Request body.
    pub body: Bytes,
}

impl TestRequest {
    /// Starts a `GET` request.
    pub fn get(url: impl Into<String>) -> TestRequestBuilder {
        TestRequestBuilder::new(Method::GET, url)
    }

    /// Starts a `POST` request.
    pub fn post(url: impl Into<String>) -> TestRequestBuilder {
        TestRequestBuilder::new(Method::POST, url)
    }

    /// Starts a `PUT` request.
    pub fn put(url: impl Into<String>) -> TestRequestBuilder {
        TestRequestBuilder::new(Method::PUT, url)
    }

    /// Starts a `PATCH` request.
    pub fn patch(url: impl Into<String>) -> TestRequestBuilder {
        TestRequestBuilder::new(Method::PATCH, url)
    }

    /// Starts a `DELETE` request.
    pub fn delete(url: impl Into<String>) -> TestRequestBuilder {
        TestRequestBuilder::new(Method::DELETE, url)
    }

    /// Converts into the request view handed to the server.
    pub fn into_request(self) -> Request {
        let mut request = Request::new(self.method, self.url).with_body(self.body);
        *request.headers_mut() = self.headers;
        request
    }
}

/// Builder for [`TestRequest`].
///
/// Invalid headers or unserializable JSON do not panic here; the first such
/// error is reported by [`build`](Self::build).
#[must_use]
#[derive(Debug)]
pub struct TestRequestBuilder {
    method: Method,
    url: String,
    headers: HeaderMap,
    body: Option<Bytes>,
    error: Option<TestError>,
}

impl TestRequestBuilder {
    /// Creates a new request builder.
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HeaderMap::new(),
            body: None,
            error: None,
        }
    }

    /// Sets a header, replacing any previous value.
    pub fn header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        if self.error.is_some() {
            return self;
        }

        let name = name.as_ref();
        let parsed = HeaderName::try_from(name)
            .map_err(|e| TestError::InvalidHeader(format!("{name}: {e}")))
            .and_then(|name| {
                HeaderValue::try_from(value.as_ref())
                    .map(|value| (name, value))
                    .map_err(|e| TestError::InvalidHeader(format!("{}: {e}", value.as_ref())))
            });

        match parsed {
            Ok((name, value)) => {
                self.headers.insert(name, value);
            }
            Err(e) => self.error = Some(e),
        }
        self
    }

    /// Sets the Content-Type header.
    pub fn content_type(self, content_type: impl AsRef<str>) -> Self {
        self.header(header::CONTENT_TYPE.as_str(), content_type)
    }

    /// Sets the raw request body.
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Sets the body as JSON and the Content-Type to `application/json`.
    pub fn json<T: Serialize>(mut self, value: &T) -> Self {
        match serde_json::to_vec(value) {
            Ok(bytes) => {
                self.body = Some(Bytes::from(bytes));
                self.content_type("application/json")
            }
            Err(e) => {
                self.error.get_or_insert(TestError::Json(e));
                self
            }
        }
    }

    /// Builds the test request.
    pub fn build(self) -> Result<TestRequest, TestError> {
        if let Some(error) = self.error {
            return Err(error);
        }
        if self.url.is_empty() {
            return Err(TestError::RequestBuild("empty url".to_string()));
        }

        Ok(TestRequest {
            method: self.method,
            url: self.url,
            headers: self.headers,
            body: self.body.unwrap_or_default(),
        })
    }
}
