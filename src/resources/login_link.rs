use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::params::{Params, impl_api_params};

/// A single-use link into the Express dashboard of a connected account.
///
/// Login links have no id and are never returned as a reference.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginLink {
    pub object: String,
    #[serde(with = "time::serde::timestamp::option")]
    pub created: Option<OffsetDateTime>,
    pub url: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct LoginLinkParams {
    #[serde(flatten)]
    pub params: Params,
    /// The connected account; part of the URL path, never the body.
    #[serde(skip)]
    pub account: String,
    /// Where the user is sent after logging out of the dashboard.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_url: Option<String>,
}

impl LoginLinkParams {
    #[must_use]
    pub fn new(account: impl Into<String>) -> Self {
        Self {
            params: Params::default(),
            account: account.into(),
            redirect_url: None,
        }
    }

    #[must_use]
    pub fn with_redirect_url(mut self, redirect_url: impl Into<String>) -> Self {
        self.redirect_url = Some(redirect_url.into());
        self
    }
}

impl_api_params!(LoginLinkParams => params);
