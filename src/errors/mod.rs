//! Error types shared by the provider contract and its backends.

use std::fmt;
use thiserror::Error;

/// Result type alias for provider operations.
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Error kinds for categorizing provider errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderErrorKind {
    // Configuration errors
    /// Missing API token.
    MissingToken,
    /// Invalid server URL.
    InvalidServerUrl,
    /// Invalid configuration.
    InvalidConfiguration,

    // Authentication / authorization errors
    /// Bad credentials.
    BadCredentials,
    /// Access forbidden.
    Forbidden,

    // Request errors
    /// Request validation failed.
    ValidationError,
    /// Unprocessable entity (422).
    UnprocessableEntity,
    /// A required field was missing before any network call was made.
    Precondition,

    // Resource errors
    /// Resource not found (404).
    NotFound,
    /// Resource conflict (409).
    Conflict,
    /// Resource already exists.
    AlreadyExists,

    // Capability errors
    /// The backend has no equivalent of the requested operation.
    NotSupported,

    // Network errors
    /// Connection failed.
    ConnectionFailed,
    /// Request timeout.
    Timeout,
    /// Gave up waiting for an eventually-consistent resource.
    DeadlineExceeded,

    // Server errors
    /// Internal server error (500).
    InternalError,
    /// Bad gateway (502).
    BadGateway,
    /// Service unavailable (503).
    ServiceUnavailable,

    // Response errors
    /// Failed to deserialize response.
    DeserializationError,

    // Generic
    /// Unknown error.
    Unknown,
}

impl fmt::Display for ProviderErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingToken => write!(f, "missing_token"),
            Self::InvalidServerUrl => write!(f, "invalid_server_url"),
            Self::InvalidConfiguration => write!(f, "invalid_configuration"),
            Self::BadCredentials => write!(f, "bad_credentials"),
            Self::Forbidden => write!(f, "forbidden"),
            Self::ValidationError => write!(f, "validation_error"),
            Self::UnprocessableEntity => write!(f, "unprocessable_entity"),
            Self::Precondition => write!(f, "precondition"),
            Self::NotFound => write!(f, "not_found"),
            Self::Conflict => write!(f, "conflict"),
            Self::AlreadyExists => write!(f, "already_exists"),
            Self::NotSupported => write!(f, "not_supported"),
            Self::ConnectionFailed => write!(f, "connection_failed"),
            Self::Timeout => write!(f, "timeout"),
            Self::DeadlineExceeded => write!(f, "deadline_exceeded"),
            Self::InternalError => write!(f, "internal_error"),
            Self::BadGateway => write!(f, "bad_gateway"),
            Self::ServiceUnavailable => write!(f, "service_unavailable"),
            Self::DeserializationError => write!(f, "deserialization_error"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// Provider error with detailed information.
#[derive(Error, Debug)]
pub struct ProviderError {
    /// Error kind.
    kind: ProviderErrorKind,
    /// Error message.
    message: String,
    /// HTTP status code.
    status_code: Option<u16>,
    /// The provider operation that produced the error.
    operation: Option<String>,
    /// Underlying cause.
    #[source]
    cause: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)?;
        if let Some(code) = self.status_code {
            write!(f, " (HTTP {})", code)?;
        }
        Ok(())
    }
}

impl ProviderError {
    /// Creates a new provider error.
    pub fn new(kind: ProviderErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status_code: None,
            operation: None,
            cause: None,
        }
    }

    /// Sets the HTTP status code.
    pub fn with_status(mut self, code: u16) -> Self {
        self.status_code = Some(code);
        self
    }

    /// Sets the originating operation name.
    pub fn with_operation(mut self, operation: impl Into<String>) -> Self {
        self.operation = Some(operation.into());
        self
    }

    /// Sets the underlying cause.
    pub fn with_cause(mut self, cause: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    /// Gets the error kind.
    pub fn kind(&self) -> &ProviderErrorKind {
        &self.kind
    }

    /// Gets the error message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Gets the HTTP status code.
    pub fn status_code(&self) -> Option<u16> {
        self.status_code
    }

    /// Gets the originating operation name.
    pub fn operation(&self) -> Option<&str> {
        self.operation.as_deref()
    }

    /// Returns true if the remote reported the resource as missing.
    pub fn is_not_found(&self) -> bool {
        self.kind == ProviderErrorKind::NotFound || self.status_code == Some(404)
    }

    /// Returns true if this is the not-supported sentinel.
    pub fn is_not_supported(&self) -> bool {
        self.kind == ProviderErrorKind::NotSupported
    }

    /// Wraps this error in context, keeping the original as the source.
    pub fn context(self, message: impl Into<String>) -> Self {
        Self {
            kind: self.kind.clone(),
            message: message.into(),
            status_code: self.status_code,
            operation: self.operation.clone(),
            cause: Some(Box::new(self)),
        }
    }

    /// Creates an error from an HTTP status code and response message.
    pub fn from_response(status: u16, message: String) -> Self {
        Self::new(Self::kind_from_status(status), message).with_status(status)
    }

    /// Maps HTTP status code to error kind.
    fn kind_from_status(status: u16) -> ProviderErrorKind {
        match status {
            400 => ProviderErrorKind::ValidationError,
            401 => ProviderErrorKind::BadCredentials,
            403 => ProviderErrorKind::Forbidden,
            404 => ProviderErrorKind::NotFound,
            409 => ProviderErrorKind::Conflict,
            422 => ProviderErrorKind::UnprocessableEntity,
            500 => ProviderErrorKind::InternalError,
            502 => ProviderErrorKind::BadGateway,
            503 => ProviderErrorKind::ServiceUnavailable,
            _ => ProviderErrorKind::Unknown,
        }
    }

    // Convenience constructors

    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::InvalidConfiguration, message)
    }

    /// Creates a not found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::NotFound, message).with_status(404)
    }

    /// Creates an already-exists error.
    pub fn already_exists(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::AlreadyExists, message)
    }

    /// Creates a precondition error for a missing required field.
    pub fn precondition(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::Precondition, message)
    }

    /// Creates the not-supported sentinel for an operation a backend cannot do.
    pub fn not_supported(operation: &str, backend: &str) -> Self {
        Self::new(
            ProviderErrorKind::NotSupported,
            format!("{} is not implemented for {}", operation, backend),
        )
        .with_operation(operation)
    }

    /// Creates a timeout error.
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::Timeout, message)
    }

    /// Creates a deadline-exceeded error.
    pub fn deadline_exceeded(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::DeadlineExceeded, message)
    }

    /// Creates a deserialization error.
    pub fn deserialization(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::DeserializationError, message)
    }
}
