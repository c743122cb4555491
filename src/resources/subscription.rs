use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::{Metadata, customer::Customer};
use crate::{expandable::Expandable, utils::serde_helpers::null_as_default};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    Active,
    Canceled,
    Incomplete,
    IncompleteExpired,
    PastDue,
    Trialing,
    Unpaid,
    #[default]
    #[serde(other)]
    Unknown,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Subscription {
    pub id: String,
    pub object: String,
    pub cancel_at_period_end: bool,
    #[serde(with = "time::serde::timestamp::option")]
    pub created: Option<OffsetDateTime>,
    #[serde(with = "time::serde::timestamp::option")]
    pub current_period_end: Option<OffsetDateTime>,
    #[serde(with = "time::serde::timestamp::option")]
    pub current_period_start: Option<OffsetDateTime>,
    pub customer: Option<Expandable<Customer>>,
    pub livemode: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub metadata: Metadata,
    pub status: SubscriptionStatus,
}

crate::resource!(Subscription => "subscription");
