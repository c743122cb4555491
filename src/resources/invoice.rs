use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::{Currency, Metadata, customer::Customer, subscription::Subscription};
use crate::{expandable::Expandable, utils::serde_helpers::null_as_default};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    Draft,
    Open,
    Paid,
    Uncollectible,
    Void,
    #[default]
    #[serde(other)]
    Unknown,
}

/// An invoice. Only the attributes invoice items relate to are modelled.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Invoice {
    pub id: String,
    pub object: String,
    pub amount_due: i64,
    pub amount_paid: i64,
    pub amount_remaining: i64,
    #[serde(with = "time::serde::timestamp::option")]
    pub created: Option<OffsetDateTime>,
    pub currency: Currency,
    pub customer: Option<Expandable<Customer>>,
    #[serde(with = "time::serde::timestamp::option")]
    pub due_date: Option<OffsetDateTime>,
    pub livemode: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub metadata: Metadata,
    pub number: Option<String>,
    pub paid: bool,
    pub status: Option<InvoiceStatus>,
    pub subscription: Option<Expandable<Subscription>>,
    pub total: i64,
}

crate::resource!(Invoice => "invoice");
