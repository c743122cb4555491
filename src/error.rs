use std::fmt;
use std::time::Duration;

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing_error::SpanTrace;

/// The `type` of an error returned by the Stripe API.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[allow(clippy::module_name_repetitions)]
pub enum ErrorType {
    ApiConnectionError,
    ApiError,
    AuthenticationError,
    CardError,
    IdempotencyError,
    InvalidRequestError,
    PermissionError,
    RateLimitError,
    #[serde(other)]
    Unknown,
}

impl ErrorType {
    /// The wire name of the error type.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ApiConnectionError => "api_connection_error",
            Self::ApiError => "api_error",
            Self::AuthenticationError => "authentication_error",
            Self::CardError => "card_error",
            Self::IdempotencyError => "idempotency_error",
            Self::InvalidRequestError => "invalid_request_error",
            Self::PermissionError => "permission_error",
            Self::RateLimitError => "rate_limit_error",
            Self::Unknown => "unknown",
        }
    }

    /// A short human readable description of the error category.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::ApiConnectionError => "The connection to Stripe failed",
            Self::ApiError => "Stripe encountered an internal problem",
            Self::AuthenticationError => "The request could not be authenticated",
            Self::CardError => "The card could not be charged",
            Self::IdempotencyError => {
                "An idempotency key was reused with different request parameters"
            }
            Self::InvalidRequestError => "The request had invalid parameters",
            Self::PermissionError => "The API key does not have access to this resource",
            Self::RateLimitError => "Too many requests were made too quickly",
            Self::Unknown => "An unrecognised error was returned",
        }
    }
}

/// The body of an error returned by the API.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiError {
    #[serde(rename = "type")]
    pub error_type: ErrorType,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub decline_code: Option<String>,
    #[serde(default)]
    pub doc_url: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub param: Option<String>,
}

/// Envelope around [`ApiError`], as sent on the wire: `{"error": {...}}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiError,
}

impl fmt::Display for ApiErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let error = &self.error;
        write!(
            f,
            "Stripe API error ({}): {}",
            error.error_type.as_str(),
            error.message.as_deref().unwrap_or("no message")
        )?;
        if let Some(param) = &error.param {
            write!(f, " [param: {param}]")?;
        }
        if let Some(code) = &error.code {
            write!(f, " [code: {code}]")?;
        }
        write!(f, " - {}", error.error_type.description())
    }
}

/// Errors that can occur when interacting with the Stripe API.
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("error making request: {0}")]
    #[diagnostic(
        code(stripe_rs::request_error),
        help("Check your network connection and Stripe API availability")
    )]
    Request(#[source] reqwest::Error),

    /// A relation field held something other than an id string or an object.
    #[error("malformed reference to `{resource}` in field `{field}`: {message}")]
    #[diagnostic(
        code(stripe_rs::malformed_reference),
        help("The API returned `{field}` in a shape that is neither an id nor an expanded object")
    )]
    MalformedReference {
        field: String,
        resource: String,
        message: String,
        span_trace: SpanTrace,
    },

    #[error("error decoding {resource}: {source}")]
    #[diagnostic(
        code(stripe_rs::malformed_resource),
        help("The API returned data in an unexpected format")
    )]
    MalformedResource {
        resource: String,
        #[source]
        source: serde_json::Error,
        body: Option<String>,
        span_trace: SpanTrace,
    },

    #[error("error encoding request parameters: {0}")]
    #[diagnostic(
        code(stripe_rs::form_encoding),
        help("Request parameters must serialize to a JSON object")
    )]
    FormEncoding(#[source] serde_json::Error),

    #[error("endpoint could not be parsed as a URL")]
    #[diagnostic(
        code(stripe_rs::invalid_endpoint),
        help("Check the configured API base and that resource ids are not empty")
    )]
    InvalidEndpoint,

    #[error("missing configuration: {0}")]
    #[diagnostic(
        code(stripe_rs::missing_config),
        help("Set the named environment variable or configure the client explicitly")
    )]
    MissingConfig(&'static str),

    #[error("invalid value for header {0}")]
    #[diagnostic(
        code(stripe_rs::invalid_header),
        help("Header values must be visible ASCII")
    )]
    InvalidHeader(&'static str),

    #[error("object not found: {resource} (url: {url})")]
    #[diagnostic(
        code(stripe_rs::not_found),
        help("Verify that the {resource} exists and that the API key can access it")
    )]
    NotFound {
        resource: String,
        url: String,
        status_code: reqwest::StatusCode,
        response: Option<ApiErrorResponse>,
    },

    /// A standard error body returned by the API, such as an `invalid_request_error`.
    #[error("{response} (status: {status_code})")]
    #[diagnostic(
        code(stripe_rs::api_error),
        help("Review the error type, code and param returned by Stripe")
    )]
    Api {
        status_code: reqwest::StatusCode,
        url: String,
        response: ApiErrorResponse,
    },

    #[error("rate limit exceeded: retry after {retry_after:?}")]
    #[diagnostic(
        code(stripe_rs::rate_limit_exceeded),
        help("The Stripe API rate limit has been exceeded. Wait and retry, or throttle requests.")
    )]
    RateLimitExceeded {
        retry_after: Option<Duration>,
        url: String,
        response: Option<ApiErrorResponse>,
    },

    /// A non-success status whose body is not a Stripe error object.
    #[error("unexpected response status {status_code} from {url}")]
    #[diagnostic(
        code(stripe_rs::unexpected_response),
        help("The response did not contain a Stripe error body")
    )]
    UnexpectedResponse {
        status_code: reqwest::StatusCode,
        url: String,
        body: String,
    },
}

impl Error {
    pub(crate) fn malformed_reference(field: String, resource: String, message: String) -> Self {
        Self::MalformedReference {
            field,
            resource,
            message,
            span_trace: SpanTrace::capture(),
        }
    }

    pub(crate) fn malformed_resource(
        resource: String,
        source: serde_json::Error,
        body: Option<String>,
    ) -> Self {
        Self::MalformedResource {
            resource,
            source,
            body,
            span_trace: SpanTrace::capture(),
        }
    }

    /// The span trace captured when the error was created, if any.
    #[must_use]
    pub fn span_trace(&self) -> Option<&SpanTrace> {
        match self {
            Self::MalformedReference { span_trace, .. }
            | Self::MalformedResource { span_trace, .. } => Some(span_trace),
            _ => None,
        }
    }

    /// The HTTP status code that caused this error, if it came from a response.
    #[must_use]
    pub fn status_code(&self) -> Option<reqwest::StatusCode> {
        match self {
            Self::Request(e) => e.status(),
            Self::NotFound { status_code, .. }
            | Self::Api { status_code, .. }
            | Self::UnexpectedResponse { status_code, .. } => Some(*status_code),
            Self::RateLimitExceeded { .. } => Some(reqwest::StatusCode::TOO_MANY_REQUESTS),
            _ => None,
        }
    }

    /// The request URL, for errors raised after a response arrived.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::NotFound { url, .. }
            | Self::Api { url, .. }
            | Self::RateLimitExceeded { url, .. }
            | Self::UnexpectedResponse { url, .. } => Some(url),
            Self::Request(e) => e.url().map(url::Url::as_str),
            _ => None,
        }
    }

    /// The error body returned by Stripe, if there was one.
    #[must_use]
    pub fn api_response(&self) -> Option<&ApiErrorResponse> {
        match self {
            Self::Api { response, .. } => Some(response),
            Self::NotFound { response, .. } | Self::RateLimitExceeded { response, .. } => {
                response.as_ref()
            }
            _ => None,
        }
    }

    /// The raw response body of a response that could not be understood.
    #[must_use]
    pub fn response_body(&self) -> Option<&str> {
        match self {
            Self::UnexpectedResponse { body, .. } => Some(body),
            Self::MalformedResource { body, .. } => body.as_deref(),
            _ => None,
        }
    }

    /// Whether repeating the same request may succeed.
    ///
    /// Decode errors are never retryable: the same bytes would fail the same way.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Request(e) => e.is_connect() || e.is_timeout(),
            Self::RateLimitExceeded { .. } => true,
            Self::Api {
                status_code,
                response,
                ..
            } => {
                status_code.is_server_error()
                    || (*status_code == reqwest::StatusCode::CONFLICT
                        && response.error.code.as_deref() == Some("lock_timeout"))
            }
            Self::UnexpectedResponse { status_code, .. } => status_code.is_server_error(),
            _ => false,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Self::Request(e)
    }
}

/// Type alias for results from this crate.
///
/// This is already a Miette diagnostic result due to the implementation of
/// the Diagnostic trait for the Error type.
pub type Result<O> = std::result::Result<O, Error>;
