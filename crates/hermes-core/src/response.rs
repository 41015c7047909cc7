//! Outgoing response sink.
//!
//! The [`Response`] is the write side of an [`Exchange`](crate::Exchange).
//! Middleware and handlers fill it in; the transport turns it into an HTTP
//! response once dispatch completes.
//!
//! # Lifecycle
//!
//! ```text
//! open ──write_head()──▶ headers sent ──end()──▶ finished
//!   └──────────────────────end()───────────────────▲
//! ```
//!
//! Headers may only change while the sink is open. Ending twice is ignored.

use bytes::Bytes;
use http::header::AsHeaderName;
use http::{HeaderMap, HeaderName, HeaderValue, StatusCode};
use http_body_util::Full;

use crate::error::{ExchangeError, ExchangeResult};

/// The HTTP response type handed back to the transport.
pub type HttpResponse = http::Response<Full<Bytes>>;

/// Writable response sink for one exchange.
///
/// # Example
///
/// ```
/// use hermes_core::Response;
/// use http::StatusCode;
///
/// let mut response = Response::new();
/// response.set_status(StatusCode::CREATED);
/// response.set_header("X-Custom-Header", "Middleware Applied").unwrap();
/// response.end("created");
///
/// assert!(response.is_finished());
/// assert_eq!(response.status(), StatusCode::CREATED);
/// assert_eq!(response.body().as_ref(), b"created");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
    headers_sent: bool,
    finished: bool,
}

impl Default for Response {
    fn default() -> Self {
        Self {
            status: StatusCode::OK,
            headers: HeaderMap::new(),
            body: Bytes::new(),
            headers_sent: false,
            finished: false,
        }
    }
}

impl Response {
    /// Creates an open response with status `200 OK` and no headers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current status code.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Sets the status code.
    ///
    /// Has no effect once headers were sent.
    pub fn set_status(&mut self, status: StatusCode) -> &mut Self {
        if self.headers_sent {
            tracing::warn!(%status, "status change ignored, headers already sent");
        } else {
            self.status = status;
        }
        self
    }

    /// Sets a header, replacing any existing value with the same name.
    ///
    /// # Errors
    ///
    /// Returns [`ExchangeError::HeadersSent`] once headers were sent, or
    /// [`ExchangeError::InvalidHeader`] if the name or value is invalid.
    pub fn set_header<K, V>(&mut self, name: K, value: V) -> ExchangeResult<&mut Self>
    where
        HeaderName: TryFrom<K>,
        <HeaderName as TryFrom<K>>::Error: Into<http::Error>,
        HeaderValue: TryFrom<V>,
        <HeaderValue as TryFrom<V>>::Error: Into<http::Error>,
    {
        let (name, value) = convert_header(name, value)?;
        self.ensure_open()?;
        self.headers.insert(name, value);
        Ok(self)
    }

    /// Appends a header value, keeping existing values with the same name.
    ///
    /// # Errors
    ///
    /// Same as [`Response::set_header`].
    pub fn append_header<K, V>(&mut self, name: K, value: V) -> ExchangeResult<&mut Self>
    where
        HeaderName: TryFrom<K>,
        <HeaderName as TryFrom<K>>::Error: Into<http::Error>,
        HeaderValue: TryFrom<V>,
        <HeaderValue as TryFrom<V>>::Error: Into<http::Error>,
    {
        let (name, value) = convert_header(name, value)?;
        self.ensure_open()?;
        self.headers.append(name, value);
        Ok(self)
    }

    /// Removes a header.
    ///
    /// # Errors
    ///
    /// Returns [`ExchangeError::HeadersSent`] once headers were sent.
    pub fn remove_header(&mut self, name: impl AsHeaderName) -> ExchangeResult<Option<HeaderValue>> {
        self.ensure_open()?;
        Ok(self.headers.remove(name))
    }

    /// Writes the status line and headers in one step.
    ///
    /// The given headers are merged over any set earlier. After this call
    /// headers are considered sent and can no longer change.
    ///
    /// # Errors
    ///
    /// Returns [`ExchangeError::HeadersSent`] if headers were already sent.
    pub fn write_head<I>(&mut self, status: StatusCode, headers: I) -> ExchangeResult<&mut Self>
    where
        I: IntoIterator<Item = (HeaderName, HeaderValue)>,
    {
        self.ensure_open()?;
        self.status = status;
        for (name, value) in headers {
            self.headers.insert(name, value);
        }
        self.headers_sent = true;
        Ok(self)
    }

    /// Finalizes the response with the given body.
    ///
    /// Calling `end` on a finished response is ignored.
    pub fn end(&mut self, body: impl Into<Bytes>) {
        if self.finished {
            tracing::warn!("response already ended, extra body discarded");
            return;
        }
        self.body = body.into();
        self.headers_sent = true;
        self.finished = true;
    }

    /// Finalizes the response without a body.
    pub fn end_empty(&mut self) {
        self.end(Bytes::new());
    }

    /// Returns the headers written so far.
    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Returns a header value as a string, if present and valid UTF-8.
    #[must_use]
    pub fn header_str(&self, name: impl AsHeaderName) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Returns the response body.
    #[must_use]
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Returns `true` once status and headers can no longer change.
    #[must_use]
    pub fn headers_sent(&self) -> bool {
        self.headers_sent
    }

    /// Returns `true` once [`Response::end`] was called.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Converts the sink into an HTTP response for the transport.
    #[must_use]
    pub fn into_http(self) -> HttpResponse {
        let mut response = http::Response::new(Full::new(self.body));
        *response.status_mut() = self.status;
        *response.headers_mut() = self.headers;
        response
    }

    fn ensure_open(&self) -> ExchangeResult<()> {
        if self.headers_sent {
            Err(ExchangeError::HeadersSent)
        } else {
            Ok(())
        }
    }
}

fn convert_header<K, V>(name: K, value: V) -> ExchangeResult<(HeaderName, HeaderValue)>
where
    HeaderName: TryFrom<K>,
    <HeaderName as TryFrom<K>>::Error: Into<http::Error>,
    HeaderValue: TryFrom<V>,
    <HeaderValue as TryFrom<V>>::Error: Into<http::Error>,
{
    let name = HeaderName::try_from(name).map_err(|e| ExchangeError::InvalidHeader(e.into()))?;
    let value = HeaderValue::try_from(value).map_err(|e| ExchangeError::InvalidHeader(e.into()))?;
    Ok((name, value))
}
