//! Error types for response writing.

use thiserror::Error;

/// Result type alias using [`ExchangeError`].
pub type ExchangeResult<T> = Result<T, ExchangeError>;

/// Errors raised by the [`Response`](crate::Response) sink.
///
/// These are programming errors in user code (writing after the response
/// was finalized, or passing an invalid header). The framework never
/// raises them on its own dispatch path.
#[derive(Error, Debug)]
pub enum ExchangeError {
    /// Status or headers were modified after the response was ended.
    #[error("cannot modify headers after the response has been ended")]
    HeadersSent,

    /// A header name or value could not be converted.
    #[error("invalid header: {0}")]
    InvalidHeader(#[from] http::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ExchangeError::HeadersSent;
        assert_eq!(
            err.to_string(),
            "cannot modify headers after the response has been ended"
        );
    }

    #[test]
    fn test_invalid_header_from_http_error() {
        let http_err: http::Error = http::header::HeaderName::from_bytes(b"bad header")
            .unwrap_err()
            .into();
        let err = ExchangeError::from(http_err);
        assert!(err.to_string().starts_with("invalid header"));
    }
}
