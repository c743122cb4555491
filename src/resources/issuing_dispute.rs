use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::{Currency, Metadata, file::File, issuing_transaction::IssuingTransaction};
use crate::{
    expandable::Expandable,
    list::List,
    params::{DateFilter, ListParams, Params, impl_api_params, impl_list_params},
    utils::serde_helpers::null_as_default,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssuingDisputeReason {
    Fraudulent,
    Other,
    #[default]
    #[serde(other)]
    Unknown,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssuingDisputeStatus {
    Lost,
    UnderReview,
    Unsubmitted,
    Won,
    #[default]
    #[serde(other)]
    Unknown,
}

/// Evidence for one dispute reason. The fraudulent and other reasons share
/// this shape.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IssuingDisputeReasonEvidence {
    pub dispute_explanation: Option<String>,
    pub uncategorized_file: Option<Expandable<File>>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IssuingDisputeEvidence {
    pub fraudulent: Option<IssuingDisputeReasonEvidence>,
    pub other: Option<IssuingDisputeReasonEvidence>,
}

/// A dispute raised by a cardholder against an Issuing transaction.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IssuingDispute {
    pub id: String,
    pub object: String,
    pub amount: i64,
    #[serde(with = "time::serde::timestamp::option")]
    pub created: Option<OffsetDateTime>,
    pub currency: Currency,
    pub evidence: Option<IssuingDisputeEvidence>,
    pub livemode: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub metadata: Metadata,
    pub reason: IssuingDisputeReason,
    pub status: IssuingDisputeStatus,
    pub transaction: Option<Expandable<IssuingTransaction>>,
}

crate::resource!(IssuingDispute => "issuing.dispute");

pub type IssuingDisputeList = List<IssuingDispute>;

/// Evidence parameters for one dispute reason.
#[derive(Clone, Debug, Default, Serialize)]
pub struct IssuingDisputeReasonEvidenceParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dispute_explanation: Option<String>,
    /// Id of a file uploaded with purpose `dispute_evidence`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uncategorized_file: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct IssuingDisputeEvidenceParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fraudulent: Option<IssuingDisputeReasonEvidenceParams>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other: Option<IssuingDisputeReasonEvidenceParams>,
}

/// Parameters for creating or updating an issuing dispute.
#[derive(Clone, Debug, Default, Serialize)]
pub struct IssuingDisputeParams {
    #[serde(flatten)]
    pub params: Params,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evidence: Option<IssuingDisputeEvidenceParams>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<IssuingDisputeReason>,
    /// Only on creation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disputed_transaction: Option<String>,
}

impl IssuingDisputeParams {
    /// Dispute `transaction` for `reason`, with an explanation as evidence.
    ///
    /// [`IssuingDisputeReason::Unknown`] is sent as `other`.
    #[must_use]
    pub fn new(
        transaction: impl Into<String>,
        reason: IssuingDisputeReason,
        explanation: impl Into<String>,
    ) -> Self {
        let reason = match reason {
            IssuingDisputeReason::Unknown => IssuingDisputeReason::Other,
            known => known,
        };
        let evidence = IssuingDisputeReasonEvidenceParams {
            dispute_explanation: Some(explanation.into()),
            uncategorized_file: None,
        };
        let evidence = match reason {
            IssuingDisputeReason::Fraudulent => IssuingDisputeEvidenceParams {
                fraudulent: Some(evidence),
                other: None,
            },
            IssuingDisputeReason::Other | IssuingDisputeReason::Unknown => {
                IssuingDisputeEvidenceParams {
                    fraudulent: None,
                    other: Some(evidence),
                }
            }
        };
        Self {
            disputed_transaction: Some(transaction.into()),
            reason: Some(reason),
            evidence: Some(evidence),
            ..Self::default()
        }
    }
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct IssuingDisputeListParams {
    #[serde(flatten)]
    pub list: ListParams,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<DateFilter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disputed_transaction: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction: Option<String>,
}

impl_api_params!(IssuingDisputeParams => params);
impl_list_params!(IssuingDisputeListParams => list);
