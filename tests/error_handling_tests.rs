use serde_json::json;
use stripe_rs::error::{ApiError, ApiErrorResponse, Error, ErrorType};

#[test]
fn test_invalid_request_error_handling() {
    let error_json = json!({
        "error": {
            "type": "invalid_request_error",
            "message": "No such customer: 'cus_missing'",
            "param": "customer",
            "code": "resource_missing",
            "doc_url": "https://stripe.com/docs/error-codes/resource-missing"
        }
    });

    let result: Result<ApiErrorResponse, _> = serde_json::from_value(error_json);
    assert!(
        result.is_ok(),
        "Failed to deserialize invalid_request_error: {:?}",
        result.err()
    );

    let error = result.unwrap().error;
    assert_eq!(error.error_type, ErrorType::InvalidRequestError);
    assert_eq!(error.param.as_deref(), Some("customer"));
    assert_eq!(error.code.as_deref(), Some("resource_missing"));
}

#[test]
fn test_unknown_error_type_handling() {
    let error_json = json!({"error": {"type": "brand_new_error", "message": "Test"}});

    let response: ApiErrorResponse = serde_json::from_value(error_json).unwrap();
    assert_eq!(response.error.error_type, ErrorType::Unknown);
    assert_eq!(response.error.param, None);
}

#[test]
fn test_error_display_formatting() {
    let error_response = ApiErrorResponse {
        error: ApiError {
            error_type: ErrorType::CardError,
            code: Some("card_declined".to_string()),
            decline_code: Some("generic_decline".to_string()),
            doc_url: None,
            message: Some("Your card was declined.".to_string()),
            param: None,
        },
    };

    let display_text = format!("{}", error_response);
    assert!(display_text.contains("Stripe API error (card_error): Your card was declined."));
    assert!(display_text.contains("[code: card_declined]"));
    assert!(display_text.contains("The card could not be charged"));
}

#[test]
fn test_all_error_types_deserialize() {
    let error_types = [
        ("api_connection_error", ErrorType::ApiConnectionError),
        ("api_error", ErrorType::ApiError),
        ("authentication_error", ErrorType::AuthenticationError),
        ("card_error", ErrorType::CardError),
        ("idempotency_error", ErrorType::IdempotencyError),
        ("invalid_request_error", ErrorType::InvalidRequestError),
        ("permission_error", ErrorType::PermissionError),
        ("rate_limit_error", ErrorType::RateLimitError),
    ];

    for (wire, expected) in error_types {
        let result: Result<ApiErrorResponse, _> =
            serde_json::from_value(json!({"error": {"type": wire, "message": "Test"}}));
        assert!(
            result.is_ok(),
            "Failed to deserialize {}: {:?}",
            wire,
            result.err()
        );
        let error_type = result.unwrap().error.error_type;
        assert_eq!(error_type, expected);
        assert_eq!(error_type.as_str(), wire);
    }
}

#[test]
fn test_retryable_classification() {
    let lock_timeout = Error::Api {
        status_code: reqwest::StatusCode::CONFLICT,
        url: "https://api.stripe.com/v1/invoiceitems".to_string(),
        response: serde_json::from_value(json!({
            "error": {"type": "invalid_request_error", "code": "lock_timeout"}
        }))
        .unwrap(),
    };
    assert!(lock_timeout.is_retryable());
    assert_eq!(lock_timeout.status_code(), Some(reqwest::StatusCode::CONFLICT));
    assert!(lock_timeout.api_response().is_some());

    let bad_request = Error::Api {
        status_code: reqwest::StatusCode::BAD_REQUEST,
        url: "https://api.stripe.com/v1/invoiceitems".to_string(),
        response: serde_json::from_value(json!({"error": {"type": "invalid_request_error"}}))
            .unwrap(),
    };
    assert!(!bad_request.is_retryable());

    assert!(!Error::InvalidEndpoint.is_retryable());
}

#[test]
fn test_malformed_reference_display() {
    let err = stripe_rs::expandable::decode::<stripe_rs::invoice_item::InvoiceItem>(
        br#"{"subscription":false}"#,
    )
    .unwrap_err();
    let display_text = err.to_string();
    assert!(
        display_text.starts_with("malformed reference to `subscription` in field `subscription`"),
        "unexpected message: {display_text}"
    );
    assert!(err.span_trace().is_some());
}
