use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

pub mod customer;
pub mod file;
pub mod invoice;
pub mod invoice_item;
pub mod issuing_dispute;
pub mod issuing_transaction;
pub mod login_link;
pub mod plan;
pub mod subscription;
pub mod tax_rate;
pub mod webhook_endpoint;

/// Free-form key/value pairs attached to a resource.
pub type Metadata = BTreeMap<String, String>;

/// A three-letter ISO currency code, lowercase as the API uses it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Currency(String);

impl Currency {
    #[must_use]
    pub fn new(code: &str) -> Self {
        Self(code.to_ascii_lowercase())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Currency {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A span of time covered by a line item or subscription.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Period {
    #[serde(with = "time::serde::timestamp::option")]
    pub start: Option<OffsetDateTime>,
    #[serde(with = "time::serde::timestamp::option")]
    pub end: Option<OffsetDateTime>,
}
