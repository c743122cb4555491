use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::{
    Currency, Metadata, Period, customer::Customer, invoice::Invoice, plan::Plan,
    subscription::Subscription, tax_rate::TaxRate,
};
use crate::{
    expandable::Expandable,
    list::List,
    params::{DateFilter, ListParams, Nullable, Params, impl_api_params, impl_list_params},
    utils::serde_helpers::null_as_default,
};

/// A charge or credit added to a customer's next (or a draft) invoice.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvoiceItem {
    pub id: String,
    pub object: String,
    pub amount: i64,
    pub currency: Currency,
    pub customer: Option<Expandable<Customer>>,
    #[serde(with = "time::serde::timestamp::option")]
    pub date: Option<OffsetDateTime>,
    /// Set on the object returned by a delete request.
    pub deleted: bool,
    pub description: Option<String>,
    pub discountable: bool,
    pub invoice: Option<Expandable<Invoice>>,
    pub livemode: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub metadata: Metadata,
    pub period: Option<Period>,
    pub plan: Option<Plan>,
    pub proration: bool,
    pub quantity: u64,
    pub subscription: Option<Expandable<Subscription>>,
    #[serde(deserialize_with = "null_as_default")]
    pub tax_rates: Vec<TaxRate>,
    pub unit_amount: Option<i64>,
    /// Sent as a string on the wire to keep 12 decimal places.
    pub unit_amount_decimal: Option<Decimal>,
}

crate::resource!(InvoiceItem => "invoiceitem");

pub type InvoiceItemList = List<InvoiceItem>;

/// The service period an invoice item covers.
#[derive(Clone, Debug, Serialize)]
pub struct InvoiceItemPeriodParams {
    #[serde(with = "time::serde::timestamp")]
    pub start: OffsetDateTime,
    #[serde(with = "time::serde::timestamp")]
    pub end: OffsetDateTime,
}

/// Parameters for creating or updating an invoice item.
///
/// `customer` is required on creation and ignored on update.
#[derive(Clone, Debug, Default, Serialize)]
pub struct InvoiceItemParams {
    #[serde(flatten)]
    pub params: Params,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<Currency>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Nullable<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discountable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<InvoiceItemPeriodParams>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscription: Option<String>,
    /// `Some(vec![])` removes every tax rate from the item.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_rates: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_amount: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_amount_decimal: Option<Decimal>,
}

impl InvoiceItemParams {
    /// Parameters for a new item of `amount` in `currency` for `customer`.
    #[must_use]
    pub fn new(customer: impl Into<String>, amount: i64, currency: impl Into<Currency>) -> Self {
        Self {
            customer: Some(customer.into()),
            amount: Some(amount),
            currency: Some(currency.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(Nullable::Value(description.into()));
        self
    }

    #[must_use]
    pub fn without_description(mut self) -> Self {
        self.description = Some(Nullable::Null);
        self
    }

    #[must_use]
    pub fn with_invoice(mut self, invoice: impl Into<String>) -> Self {
        self.invoice = Some(invoice.into());
        self
    }

    #[must_use]
    pub fn with_tax_rates<I, S>(mut self, tax_rates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tax_rates = Some(tax_rates.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn with_expand(mut self, field: impl Into<String>) -> Self {
        self.params = self.params.with_expand(field);
        self
    }
}

/// Filters for listing invoice items.
#[derive(Clone, Debug, Default, Serialize)]
pub struct InvoiceItemListParams {
    #[serde(flatten)]
    pub list: ListParams,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<DateFilter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice: Option<String>,
    /// Only items not yet attached to an invoice.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pending: Option<bool>,
}

impl InvoiceItemListParams {
    #[must_use]
    pub fn builder() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_customer(mut self, customer: impl Into<String>) -> Self {
        self.customer = Some(customer.into());
        self
    }

    #[must_use]
    pub fn with_invoice(mut self, invoice: impl Into<String>) -> Self {
        self.invoice = Some(invoice.into());
        self
    }

    #[must_use]
    pub fn with_pending(mut self, pending: bool) -> Self {
        self.pending = Some(pending);
        self
    }

    #[must_use]
    pub fn with_created(mut self, created: impl Into<DateFilter>) -> Self {
        self.created = Some(created.into());
        self
    }
}

impl_api_params!(InvoiceItemParams => params);
impl_list_params!(InvoiceItemListParams => list);
