use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::{Currency, Metadata};
use crate::utils::serde_helpers::null_as_default;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanInterval {
    Day,
    Week,
    Month,
    Year,
    #[default]
    #[serde(other)]
    Unknown,
}

/// A recurring price. Returned inline on invoice items, never as a bare id.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Plan {
    pub id: String,
    pub object: String,
    pub active: bool,
    pub amount: Option<i64>,
    pub amount_decimal: Option<Decimal>,
    #[serde(with = "time::serde::timestamp::option")]
    pub created: Option<OffsetDateTime>,
    pub currency: Currency,
    pub interval: PlanInterval,
    pub interval_count: u64,
    pub livemode: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub metadata: Metadata,
    pub nickname: Option<String>,
}

crate::resource!(Plan => "plan");
