use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::{Currency, Metadata};
use crate::utils::serde_helpers::null_as_default;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssuingTransactionType {
    Capture,
    CashWithdrawal,
    Dispute,
    DisputeLoss,
    Refund,
    RefundReversal,
    #[default]
    #[serde(other)]
    Unknown,
}

/// A card transaction on an Issuing card, the subject of an issuing dispute.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IssuingTransaction {
    pub id: String,
    pub object: String,
    pub amount: i64,
    #[serde(with = "time::serde::timestamp::option")]
    pub created: Option<OffsetDateTime>,
    pub currency: Currency,
    pub livemode: bool,
    pub merchant_amount: i64,
    pub merchant_currency: Currency,
    #[serde(deserialize_with = "null_as_default")]
    pub metadata: Metadata,
    #[serde(rename = "type")]
    pub transaction_type: IssuingTransactionType,
}

crate::resource!(IssuingTransaction => "issuing.transaction");
