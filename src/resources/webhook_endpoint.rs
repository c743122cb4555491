use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::Metadata;
use crate::{
    list::List,
    params::{DateFilter, ListParams, Params, impl_api_params, impl_list_params},
    utils::serde_helpers::null_as_default,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WebhookEndpointStatus {
    Enabled,
    Disabled,
    #[default]
    #[serde(other)]
    Unknown,
}

/// A URL Stripe delivers events to.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebhookEndpoint {
    pub id: String,
    pub object: String,
    pub api_version: Option<String>,
    pub application: Option<String>,
    pub connect: bool,
    #[serde(with = "time::serde::timestamp::option")]
    pub created: Option<OffsetDateTime>,
    /// Set on the object returned by a delete request.
    pub deleted: bool,
    pub description: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub enabled_events: Vec<String>,
    pub livemode: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub metadata: Metadata,
    /// Signing secret; only returned when the endpoint is created.
    pub secret: Option<String>,
    pub status: WebhookEndpointStatus,
    pub url: String,
}

crate::resource!(WebhookEndpoint => "webhook_endpoint");

pub type WebhookEndpointList = List<WebhookEndpoint>;

/// Parameters for creating or updating a webhook endpoint.
#[derive(Clone, Debug, Default, Serialize)]
pub struct WebhookEndpointParams {
    #[serde(flatten)]
    pub params: Params,
    /// Receive events from connected accounts rather than this account.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connect: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disabled: Option<bool>,
    /// Event types to deliver; `"*"` enables all.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled_events: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Only on creation. Pin this to [`API_VERSION`](crate::config::API_VERSION)
    /// so event payloads match this library's resource definitions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
}

impl WebhookEndpointParams {
    /// Parameters for a new endpoint delivering `events` to `url`.
    #[must_use]
    pub fn new<I, S>(url: impl Into<String>, events: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            url: Some(url.into()),
            enabled_events: Some(events.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = Some(api_version.into());
        self
    }

    #[must_use]
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = Some(disabled);
        self
    }
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct WebhookEndpointListParams {
    #[serde(flatten)]
    pub list: ListParams,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<DateFilter>,
}

impl_api_params!(WebhookEndpointParams => params);
impl_list_params!(WebhookEndpointListParams => list);
