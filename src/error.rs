use thiserror::Error;

/// A convenience alias for `Result` with [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the client.
#[derive(Error, Debug)]
pub enum Error {
    /// The configuration violates one of its invariants. The message lists
    /// every violated field, not just the first one.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    /// The configured remote URL could not be parsed.
    #[error("invalid remote URL")]
    InvalidRemoteUrl(#[source] url::ParseError),
    /// The configured remote URL cannot carry embedded credentials (for
    /// example, a cannot-be-a-base URL scheme).
    #[error("remote URL does not accept embedded credentials")]
    CredentialsNotSupported,
    /// No transport collaborator was supplied and the default one could not
    /// be constructed.
    #[error("no usable HTTP transport")]
    TransportUnavailable(#[source] reqwest::Error),
    /// The request body could not be serialized.
    #[error("failed to serialize request body")]
    Serialization(#[from] serde_json::Error),
    /// A transport-level failure, propagated unmodified after the retry
    /// policy (if any) is exhausted.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// A failure reported by an [`HttpTransport`](crate::HttpTransport)
/// implementation.
///
/// An HTTP error status is not a transport failure: responses are handed back
/// to the caller whatever their status code. Only failing to obtain a
/// response at all (connection refused, timeout, protocol error) is reported
/// through this type.
#[derive(Error, Debug)]
pub enum TransportError {
    /// Failure from the default reqwest-backed transport.
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    /// Failure from a custom transport implementation.
    #[error("{0}")]
    Other(String),
}
