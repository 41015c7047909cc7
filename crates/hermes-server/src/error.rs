//! Server error types.

use std::net::SocketAddr;

use thiserror::Error;

/// Errors raised while binding or serving.
///
/// Per-exchange failures (400, 404) are ordinary responses and never surface
/// here.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The configured address does not parse as `host:port`.
    #[error("invalid address '{addr}': {source}")]
    InvalidAddress {
        /// The rejected address string.
        addr: String,
        /// Parse failure.
        #[source]
        source: std::net::AddrParseError,
    },

    /// Failed to bind the listener.
    #[error("failed to bind to {addr}: {source}")]
    Bind {
        /// Address the bind was attempted on.
        addr: SocketAddr,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// I/O error during server operation.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for server operations.
pub type ServerResult<T> = Result<T, ServerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_address_display() {
        let source = "nope".parse::<SocketAddr>().unwrap_err();
        let err = ServerError::InvalidAddress {
            addr: "nope".to_string(),
            source,
        };
        assert!(err.to_string().starts_with("invalid address 'nope'"));
    }

    #[test]
    fn test_bind_error_keeps_source() {
        let err = ServerError::Bind {
            addr: "127.0.0.1:80".parse().unwrap(),
            source: std::io::Error::new(std::io::ErrorKind::AddrInUse, "in use"),
        };
        assert!(err.to_string().contains("127.0.0.1:80"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_io_from() {
        let err: ServerError = std::io::Error::new(std::io::ErrorKind::Other, "reset").into();
        assert!(matches!(err, ServerError::Io(_)));
    }
}
