//! Sentry integration for stripe-rs errors.
//!
//! This module provides integration with Sentry for error reporting and breadcrumb capture.
//! It is only available when the `sentry` feature is enabled.
//!
//! # Usage
//!
//! Enable the `sentry` feature in your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! stripe-rs = { version = "0.1.0-alpha.1", features = ["sentry"] }
//! ```
//!
//! Then set up tracing with `ErrorLayer` and `sentry-tracing`:
//!
//! ```ignore
//! use tracing_subscriber::prelude::*;
//! use tracing_error::ErrorLayer;
//!
//! tracing_subscriber::registry()
//!     .with(tracing_subscriber::fmt::layer())
//!     .with(ErrorLayer::default())  // Required for SpanTrace capture
//!     .with(sentry::integrations::tracing::layer())
//!     .init();
//! ```
//!
//! Decode errors carry a span trace of the instrumented call that produced them.

use std::collections::BTreeMap;

use sentry_core::{Breadcrumb, protocol::Value};

use crate::error::Error;

/// Longest response body attached to Sentry context.
const MAX_BODY_PREVIEW: usize = 500;

/// Convert a stripe-rs Error into a Sentry breadcrumb.
impl<'a> From<&'a Error> for Breadcrumb {
    fn from(error: &'a Error) -> Self {
        let mut data = BTreeMap::new();
        if let Some(url) = error.url() {
            data.insert("url".to_string(), Value::from(url));
        }
        if let Some(status) = error.status_code() {
            data.insert("status_code".to_string(), Value::from(status.as_u16()));
        }

        let (category, message) = match error {
            Error::Request(source) => ("http.request", format!("HTTP request error: {source}")),

            Error::MalformedReference {
                field, resource, ..
            } => {
                data.insert("field".to_string(), Value::from(field.clone()));
                data.insert("resource".to_string(), Value::from(resource.clone()));
                (
                    "stripe.decode",
                    format!("Malformed reference to {resource} in {field}"),
                )
            }

            Error::MalformedResource { resource, .. } => {
                data.insert("resource".to_string(), Value::from(resource.clone()));
                ("stripe.decode", format!("Failed to decode {resource}"))
            }

            Error::FormEncoding(_) => (
                "stripe.validation",
                "Failed to encode request parameters".to_string(),
            ),

            Error::InvalidEndpoint => ("stripe.config", "Invalid endpoint URL".to_string()),

            Error::MissingConfig(name) => ("stripe.config", format!("Missing configuration {name}")),

            Error::InvalidHeader(name) => ("stripe.config", format!("Invalid header value {name}")),

            Error::NotFound { resource, .. } => {
                ("http.response", format!("{resource} not found"))
            }

            Error::Api { response, .. } => {
                let error_type = response.error.error_type.as_str();
                data.insert("error_type".to_string(), Value::from(error_type));
                if let Some(code) = &response.error.code {
                    data.insert("code".to_string(), Value::from(code.clone()));
                }
                if let Some(param) = &response.error.param {
                    data.insert("param".to_string(), Value::from(param.clone()));
                }
                ("stripe.api", format!("Stripe API error: {error_type}"))
            }

            Error::RateLimitExceeded { retry_after, .. } => {
                if let Some(retry) = retry_after {
                    data.insert("retry_after_secs".to_string(), Value::from(retry.as_secs()));
                }
                ("stripe.rate_limit", "Rate limit exceeded".to_string())
            }

            Error::UnexpectedResponse { status_code, .. } => (
                "http.response",
                format!("Unexpected response status {status_code}"),
            ),
        };

        Breadcrumb {
            ty: "error".to_string(),
            category: Some(category.to_string()),
            message: Some(message),
            data,
            level: sentry_core::Level::Error,
            ..Default::default()
        }
    }
}

/// Convert a stripe-rs Error into Sentry context data.
///
/// # Example
///
/// ```ignore
/// use sentry::configure_scope;
/// use stripe_rs::sentry_integration::error_to_sentry_context;
///
/// if let Err(e) = client.invoice_items().get("ii_123", &Params::default()).await {
///     configure_scope(|scope| {
///         for (key, value) in error_to_sentry_context(&e) {
///             scope.set_extra(&key, value);
///         }
///     });
/// }
/// ```
pub fn error_to_sentry_context(error: &Error) -> BTreeMap<String, Value> {
    let mut context = BTreeMap::new();

    if let Some(span_trace) = error.span_trace() {
        context.insert(
            "stripe.span_trace".to_string(),
            Value::from(format!("{span_trace}")),
        );
    }

    if let Some(url) = error.url() {
        context.insert("stripe.url".to_string(), Value::from(url));
    }

    if let Some(status) = error.status_code() {
        context.insert("stripe.status_code".to_string(), Value::from(status.as_u16()));
    }

    if let Some(body) = error.response_body() {
        let truncated = match body.char_indices().nth(MAX_BODY_PREVIEW) {
            Some((end, _)) => format!("{}...", &body[..end]),
            None => body.to_string(),
        };
        context.insert("stripe.response_body".to_string(), Value::from(truncated));
    }

    if let Some(response) = error.api_response() {
        let error = &response.error;
        context.insert(
            "stripe.error_type".to_string(),
            Value::from(error.error_type.as_str()),
        );
        if let Some(message) = &error.message {
            context.insert("stripe.message".to_string(), Value::from(message.clone()));
        }
        if let Some(code) = &error.code {
            context.insert("stripe.code".to_string(), Value::from(code.clone()));
        }
        if let Some(doc_url) = &error.doc_url {
            context.insert("stripe.doc_url".to_string(), Value::from(doc_url.clone()));
        }
    }

    context
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ApiError, ApiErrorResponse, ErrorType};

    #[test]
    fn api_errors_become_breadcrumbs() {
        let error = Error::Api {
            status_code: reqwest::StatusCode::BAD_REQUEST,
            url: "https://api.stripe.com/v1/invoiceitems".to_string(),
            response: ApiErrorResponse {
                error: ApiError {
                    error_type: ErrorType::InvalidRequestError,
                    code: Some("parameter_missing".to_string()),
                    decline_code: None,
                    doc_url: None,
                    message: Some("Missing required param: customer.".to_string()),
                    param: Some("customer".to_string()),
                },
            },
        };

        let breadcrumb = Breadcrumb::from(&error);
        assert_eq!(breadcrumb.category.as_deref(), Some("stripe.api"));
        assert_eq!(breadcrumb.data["param"], Value::from("customer"));
        assert_eq!(breadcrumb.data["status_code"], Value::from(400_u16));

        let context = error_to_sentry_context(&error);
        assert_eq!(context["stripe.code"], Value::from("parameter_missing"));
    }
}
