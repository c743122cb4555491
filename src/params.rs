//! Parameters shared by every request.
//!
//! Each resource's parameter struct flattens [`Params`] (or [`ListParams`]
//! for list endpoints) and wraps every attribute in `Option` so that an
//! omitted attribute never reaches the wire. Attributes that can be cleared
//! use `Option<Nullable<T>>`:
//!
//! - `None` omits the attribute,
//! - `Some(Nullable::Null)` sends an explicit empty value, unsetting it,
//! - `Some(Nullable::Value(v))` sends `v`.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Serialize, Serializer};
use time::OffsetDateTime;

/// Implemented by every parameter struct the client can send.
///
/// Besides the body/query fields, parameters carry request-scoped values that
/// travel as headers.
pub trait ApiParams: Serialize + fmt::Debug {
    /// Value of the `Idempotency-Key` header.
    fn idempotency_key(&self) -> Option<&str> {
        None
    }

    /// Value of the `Stripe-Account` header, for requests made on behalf of a
    /// connected account.
    fn stripe_account(&self) -> Option<&str> {
        None
    }
}

/// Implements [`ApiParams`] by delegating to a flattened [`Params`] or
/// [`ListParams`] field.
macro_rules! impl_api_params {
    ($($ty:ty => $field:ident),+ $(,)?) => {
        $(
            impl $crate::params::ApiParams for $ty {
                fn idempotency_key(&self) -> Option<&str> {
                    $crate::params::ApiParams::idempotency_key(&self.$field)
                }

                fn stripe_account(&self) -> Option<&str> {
                    $crate::params::ApiParams::stripe_account(&self.$field)
                }
            }
        )+
    };
}
pub(crate) use impl_api_params;

/// Implemented by list parameter structs, which flatten a [`ListParams`]
/// next to their own filters.
pub trait ListApiParams: ApiParams + Clone {
    fn list_params(&self) -> &ListParams;

    fn list_params_mut(&mut self) -> &mut ListParams;
}

/// Implements [`ApiParams`] and [`ListApiParams`] for list parameter structs
/// through their flattened [`ListParams`] field.
macro_rules! impl_list_params {
    ($($ty:ty => $field:ident),+ $(,)?) => {
        $(
            $crate::params::impl_api_params!($ty => $field);

            impl $crate::params::ListApiParams for $ty {
                fn list_params(&self) -> &$crate::params::ListParams {
                    &self.$field
                }

                fn list_params_mut(&mut self) -> &mut $crate::params::ListParams {
                    &mut self.$field
                }
            }
        )+
    };
}
pub(crate) use impl_list_params;

/// A value that can be explicitly unset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Nullable<T> {
    Null,
    Value(T),
}

impl<T> From<T> for Nullable<T> {
    fn from(value: T) -> Self {
        Self::Value(value)
    }
}

impl<T: Serialize> Serialize for Nullable<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_none(),
            Self::Value(value) => value.serialize(serializer),
        }
    }
}

/// Parameters common to create, retrieve and update requests.
#[derive(Clone, Debug, Default, Serialize)]
pub struct Params {
    /// Relation fields to return expanded, e.g. `"customer"` or
    /// `"data.invoice"`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub expand: Vec<String>,

    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, Nullable<String>>,

    #[serde(skip)]
    pub idempotency_key: Option<String>,

    #[serde(skip)]
    pub stripe_account: Option<String>,
}

impl Params {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request that a relation field be returned as the full object.
    #[must_use]
    pub fn with_expand(mut self, field: impl Into<String>) -> Self {
        self.expand.push(field.into());
        self
    }

    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata
            .insert(key.into(), Nullable::Value(value.into()));
        self
    }

    /// Unset a metadata key on the resource.
    #[must_use]
    pub fn without_metadata(mut self, key: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), Nullable::Null);
        self
    }

    #[must_use]
    pub fn with_idempotency_key(mut self, key: impl Into<String>) -> Self {
        self.idempotency_key = Some(key.into());
        self
    }

    #[must_use]
    pub fn with_stripe_account(mut self, account: impl Into<String>) -> Self {
        self.stripe_account = Some(account.into());
        self
    }
}

impl ApiParams for Params {
    fn idempotency_key(&self) -> Option<&str> {
        self.idempotency_key.as_deref()
    }

    fn stripe_account(&self) -> Option<&str> {
        self.stripe_account.as_deref()
    }
}

/// Cursor parameters common to list requests.
#[derive(Clone, Debug, Default, Serialize)]
pub struct ListParams {
    /// Number of objects to return, between 1 and 100.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u8>,

    /// Return objects listed after this id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starting_after: Option<String>,

    /// Return objects listed before this id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ending_before: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub expand: Vec<String>,

    #[serde(skip)]
    pub stripe_account: Option<String>,
}

impl ListParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_limit(mut self, limit: u8) -> Self {
        self.limit = Some(limit);
        self
    }

    #[must_use]
    pub fn with_starting_after(mut self, id: impl Into<String>) -> Self {
        self.starting_after = Some(id.into());
        self
    }

    #[must_use]
    pub fn with_ending_before(mut self, id: impl Into<String>) -> Self {
        self.ending_before = Some(id.into());
        self
    }

    /// Expand a relation on every listed object, e.g. `"data.customer"`.
    #[must_use]
    pub fn with_expand(mut self, field: impl Into<String>) -> Self {
        self.expand.push(field.into());
        self
    }

    #[must_use]
    pub fn with_stripe_account(mut self, account: impl Into<String>) -> Self {
        self.stripe_account = Some(account.into());
        self
    }
}

impl ApiParams for ListParams {
    fn stripe_account(&self) -> Option<&str> {
        self.stripe_account.as_deref()
    }
}

impl ListApiParams for ListParams {
    fn list_params(&self) -> &ListParams {
        self
    }

    fn list_params_mut(&mut self) -> &mut ListParams {
        self
    }
}

/// Bounds for filtering on a timestamp attribute.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RangeQuery {
    #[serde(
        with = "time::serde::timestamp::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub gt: Option<OffsetDateTime>,
    #[serde(
        with = "time::serde::timestamp::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub gte: Option<OffsetDateTime>,
    #[serde(
        with = "time::serde::timestamp::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub lt: Option<OffsetDateTime>,
    #[serde(
        with = "time::serde::timestamp::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub lte: Option<OffsetDateTime>,
}

/// A filter on a timestamp: either an exact instant or a range.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum DateFilter {
    At(#[serde(with = "time::serde::timestamp")] OffsetDateTime),
    Range(RangeQuery),
}

impl From<OffsetDateTime> for DateFilter {
    fn from(at: OffsetDateTime) -> Self {
        Self::At(at)
    }
}

impl From<RangeQuery> for DateFilter {
    fn from(range: RangeQuery) -> Self {
        Self::Range(range)
    }
}
