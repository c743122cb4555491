use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::{Currency, Metadata};
use crate::utils::serde_helpers::null_as_default;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Customer {
    pub id: String,
    pub object: String,
    pub balance: i64,
    #[serde(with = "time::serde::timestamp::option")]
    pub created: Option<OffsetDateTime>,
    pub currency: Option<Currency>,
    pub deleted: bool,
    pub description: Option<String>,
    pub email: Option<String>,
    pub livemode: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub metadata: Metadata,
    pub name: Option<String>,
    pub phone: Option<String>,
}

crate::resource!(Customer => "customer");
