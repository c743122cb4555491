use std::fmt;

use url::Url;

use crate::error::{Error, Result};

/// A typed representation of Stripe API endpoints.
///
/// Ids are appended as percent-encoded path segments, so an id can never
/// escape its segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StripeEndpoint {
    InvoiceItems,
    InvoiceItem(String),
    IssuingDisputes,
    IssuingDispute(String),
    /// Login links of a connected Express account.
    LoginLinks(String),
    WebhookEndpoints,
    WebhookEndpoint(String),

    // Custom endpoint with path components
    Custom(Vec<String>),
}

impl StripeEndpoint {
    fn segments(&self) -> Vec<&str> {
        match self {
            Self::InvoiceItems => vec!["invoiceitems"],
            Self::InvoiceItem(id) => vec!["invoiceitems", id.as_str()],
            Self::IssuingDisputes => vec!["issuing", "disputes"],
            Self::IssuingDispute(id) => vec!["issuing", "disputes", id.as_str()],
            Self::LoginLinks(account) => vec!["accounts", account.as_str(), "login_links"],
            Self::WebhookEndpoints => vec!["webhook_endpoints"],
            Self::WebhookEndpoint(id) => vec!["webhook_endpoints", id.as_str()],
            Self::Custom(components) => components.iter().map(String::as_str).collect(),
        }
    }

    /// Resolves the endpoint against `base`, e.g. `https://api.stripe.com/v1/`.
    pub fn to_url(&self, base: &Url) -> Result<Url> {
        let segments = self.segments();
        if segments.is_empty() || segments.iter().any(|s| s.is_empty()) {
            return Err(Error::InvalidEndpoint);
        }

        let mut url = base.clone();
        url.path_segments_mut()
            .map_err(|()| Error::InvalidEndpoint)?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// The kind of object the endpoint addresses, for error messages.
    #[must_use]
    pub fn resource_name(&self) -> &'static str {
        match self {
            Self::InvoiceItems | Self::InvoiceItem(_) => "InvoiceItem",
            Self::IssuingDisputes | Self::IssuingDispute(_) => "IssuingDispute",
            Self::LoginLinks(_) => "LoginLink",
            Self::WebhookEndpoints | Self::WebhookEndpoint(_) => "WebhookEndpoint",
            Self::Custom(_) => "Custom",
        }
    }
}

impl fmt::Display for StripeEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}", self.segments().join("/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://api.stripe.com/v1/").unwrap()
    }

    #[test]
    fn builds_collection_and_member_urls() {
        assert_eq!(
            StripeEndpoint::InvoiceItems.to_url(&base()).unwrap().as_str(),
            "https://api.stripe.com/v1/invoiceitems"
        );
        assert_eq!(
            StripeEndpoint::IssuingDispute("idp_1".into())
                .to_url(&base())
                .unwrap()
                .as_str(),
            "https://api.stripe.com/v1/issuing/disputes/idp_1"
        );
        assert_eq!(
            StripeEndpoint::LoginLinks("acct_1".into())
                .to_url(&base())
                .unwrap()
                .as_str(),
            "https://api.stripe.com/v1/accounts/acct_1/login_links"
        );
    }

    #[test]
    fn ids_are_encoded_as_a_single_segment() {
        let url = StripeEndpoint::WebhookEndpoint("we_1/../x".into())
            .to_url(&base())
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.stripe.com/v1/webhook_endpoints/we_1%2F..%2Fx"
        );
    }

    #[test]
    fn empty_ids_are_rejected() {
        assert!(matches!(
            StripeEndpoint::InvoiceItem(String::new()).to_url(&base()),
            Err(Error::InvalidEndpoint)
        ));
    }

    #[test]
    fn display_is_the_relative_path() {
        assert_eq!(
            StripeEndpoint::WebhookEndpoint("we_1".into()).to_string(),
            "/webhook_endpoints/we_1"
        );
    }
}
