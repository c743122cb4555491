mod test_utils;

use serde_json::json;
use stripe_rs::{
    Error, expandable,
    issuing_dispute::{
        IssuingDispute, IssuingDisputeList, IssuingDisputeListParams, IssuingDisputeParams,
        IssuingDisputeReason, IssuingDisputeStatus,
    },
    issuing_transaction::IssuingTransactionType,
};
use test_utils::{do_setup, fixture};

#[test]
fn decodes_dispute_with_expanded_transaction_and_file_reference() {
    do_setup();
    let body = fixture(&json!({
        "id": "idp_1",
        "object": "issuing.dispute",
        "amount": 1000,
        "currency": "eur",
        "created": 1_577_836_800,
        "reason": "fraudulent",
        "status": "under_review",
        "evidence": {
            "fraudulent": {
                "dispute_explanation": "Card was stolen",
                "uncategorized_file": "file_1"
            },
            "other": null
        },
        "transaction": {
            "id": "ipi_1",
            "object": "issuing.transaction",
            "amount": -1000,
            "type": "capture"
        }
    }));
    let dispute: IssuingDispute = expandable::decode(&body).unwrap();

    assert_eq!(dispute.reason, IssuingDisputeReason::Fraudulent);
    assert_eq!(dispute.status, IssuingDisputeStatus::UnderReview);
    assert_eq!(dispute.created.unwrap().unix_timestamp(), 1_577_836_800);

    let evidence = dispute.evidence.unwrap().fraudulent.unwrap();
    assert_eq!(evidence.dispute_explanation.as_deref(), Some("Card was stolen"));
    let file = evidence.uncategorized_file.unwrap();
    assert!(!file.is_expanded());
    assert_eq!(file.id(), "file_1");

    let transaction = dispute.transaction.unwrap().into_object().unwrap();
    assert_eq!(transaction.amount, -1000);
    assert_eq!(transaction.transaction_type, IssuingTransactionType::Capture);
}

#[test]
fn unknown_enum_values_decode() {
    let dispute: IssuingDispute =
        expandable::decode(br#"{"id":"idp_2","reason":"duplicate","status":"expired"}"#).unwrap();
    assert_eq!(dispute.reason, IssuingDisputeReason::Unknown);
    assert_eq!(dispute.status, IssuingDisputeStatus::Unknown);
}

#[test]
fn malformed_file_reference_reports_path() {
    let err = expandable::decode::<IssuingDispute>(
        br#"{"id":"idp_3","evidence":{"other":{"uncategorized_file":true}}}"#,
    )
    .unwrap_err();
    match err {
        Error::MalformedReference {
            field, resource, ..
        } => {
            assert_eq!(field, "evidence.other.uncategorized_file");
            assert_eq!(resource, "file");
        }
        other => panic!("expected MalformedReference, got {other:?}"),
    }
}

#[test]
fn malformed_reference_inside_list_reports_index() {
    let err = expandable::decode::<IssuingDisputeList>(
        br#"{"object":"list","data":[{"id":"idp_4","transaction":"ipi_4"},{"id":"idp_5","transaction":5}],"has_more":false}"#,
    )
    .unwrap_err();
    match err {
        Error::MalformedReference { field, .. } => assert_eq!(field, "data[1].transaction"),
        other => panic!("expected MalformedReference, got {other:?}"),
    }
}

#[test]
fn create_params_put_evidence_under_reason() {
    let params = IssuingDisputeParams::new(
        "ipi_1",
        IssuingDisputeReason::Other,
        "Merchant never shipped",
    );
    let pairs = stripe_rs::form::to_pairs(&params).unwrap();
    assert!(pairs.contains(&("disputed_transaction".to_string(), "ipi_1".to_string())));
    assert!(pairs.contains(&("reason".to_string(), "other".to_string())));
    assert!(pairs.contains(&(
        "evidence[other][dispute_explanation]".to_string(),
        "Merchant never shipped".to_string()
    )));
    assert!(!pairs.iter().any(|(k, _)| k.starts_with("evidence[fraudulent]")));
}

#[test]
fn unknown_reason_is_sent_as_other() {
    let params = IssuingDisputeParams::new(
        "ipi_1",
        IssuingDisputeReason::Unknown,
        "Not recognised",
    );
    assert_eq!(params.reason, Some(IssuingDisputeReason::Other));
    let pairs = stripe_rs::form::to_pairs(&params).unwrap();
    assert!(pairs.contains(&("reason".to_string(), "other".to_string())));
    assert!(!pairs.iter().any(|(_, v)| v == "unknown"));
}

#[test]
fn list_params_filter_by_transaction() {
    let params = IssuingDisputeListParams {
        transaction: Some("ipi_1".to_string()),
        ..IssuingDisputeListParams::default()
    };
    assert_eq!(
        stripe_rs::form::encode(&params).unwrap(),
        "transaction=ipi_1"
    );
}
