use std::future::Future;
use std::time::Duration;

use reqwest::{Method, RequestBuilder, StatusCode, header};
use serde::de::DeserializeOwned;
use tokio::time::sleep;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use url::Url;
use uuid::Uuid;

use crate::config::Config;
use crate::endpoints::StripeEndpoint;
use crate::error::{ApiErrorResponse, Error, Result};
use crate::expandable;
use crate::form;
use crate::params::{ApiParams, Params};
use crate::resources::{
    invoice_item::{InvoiceItem, InvoiceItemList, InvoiceItemListParams, InvoiceItemParams},
    issuing_dispute::{
        IssuingDispute, IssuingDisputeList, IssuingDisputeListParams, IssuingDisputeParams,
    },
    login_link::{LoginLink, LoginLinkParams},
    webhook_endpoint::{
        WebhookEndpoint, WebhookEndpointList, WebhookEndpointListParams, WebhookEndpointParams,
    },
};
use crate::utils::type_name::short_type_name;

const USER_AGENT: &str = concat!("stripe-rs/", env!("CARGO_PKG_VERSION"));

const HEADER_STRIPE_VERSION: &str = "Stripe-Version";
const HEADER_STRIPE_ACCOUNT: &str = "Stripe-Account";
const HEADER_IDEMPOTENCY_KEY: &str = "Idempotency-Key";
/// Header identifying the request in the Stripe dashboard logs
const HEADER_REQUEST_ID: &str = "Request-Id";

/// Upper bound for a single backoff between retries.
const MAX_RETRY_DELAY: Duration = Duration::from_secs(5);
/// Upper bound for honouring a `Retry-After` header.
const MAX_RETRY_AFTER: Duration = Duration::from_secs(60);

/// Delays between attempts: 500ms, 1s, 2s, ... capped at [`MAX_RETRY_DELAY`],
/// each with random jitter.
fn backoff_strategy(max_retries: usize) -> impl Iterator<Item = Duration> {
    ExponentialBackoff::from_millis(2)
        .factor(250)
        .max_delay(MAX_RETRY_DELAY)
        .map(jitter)
        .take(max_retries)
}

/// This is the client that is used for interacting with the Stripe API. It
/// handles authentication, API version pinning and retries.
///
/// Cloning is cheap; clones share one connection pool.
#[derive(Clone, Debug)]
pub struct Client {
    config: Config,
    http: reqwest::Client,
}

impl Client {
    pub fn new(config: Config) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        let mut authorization =
            header::HeaderValue::from_str(&format!("Bearer {}", config.secret_key.secret()))
                .map_err(|_| Error::InvalidHeader("Authorization"))?;
        authorization.set_sensitive(true);
        headers.insert(header::AUTHORIZATION, authorization);
        headers.insert(
            HEADER_STRIPE_VERSION,
            header::HeaderValue::from_str(&config.api_version)
                .map_err(|_| Error::InvalidHeader(HEADER_STRIPE_VERSION))?,
        );

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(USER_AGENT)
            .build()?;

        trace!(api_base = %config.api_base, api_version = %config.api_version, "created client");
        Ok(Self { config, http })
    }

    /// Creates a client configured from `STRIPE_*` environment variables.
    ///
    /// See [`Config::from_env`].
    pub fn from_env() -> Result<Self> {
        Self::new(Config::from_env()?)
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Build a request object with the per-request headers.
    pub(crate) fn build_request(
        &self,
        method: Method,
        url: Url,
        stripe_account: Option<&str>,
    ) -> Result<RequestBuilder> {
        let mut request = self
            .http
            .request(method, url)
            .header(header::ACCEPT, "application/json");
        if let Some(account) = stripe_account.or(self.config.stripe_account.as_deref()) {
            let account = header::HeaderValue::from_str(account)
                .map_err(|_| Error::InvalidHeader(HEADER_STRIPE_ACCOUNT))?;
            request = request.header(HEADER_STRIPE_ACCOUNT, account);
        }
        Ok(request)
    }

    /// Execute a request, retrying retryable failures with backoff.
    async fn execute_with_retry<T, F, Fut>(&self, request_fn: F) -> Result<T>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut delays = backoff_strategy(self.config.max_network_retries);
        let mut attempts = 0;

        loop {
            attempts += 1;

            match request_fn().await {
                Ok(result) => return Ok(result),
                Err(e) if e.is_retryable() => {
                    let Some(backoff) = delays.next() else {
                        warn!(attempts, "giving up after retryable error: {e}");
                        return Err(e);
                    };
                    let wait_time = match &e {
                        Error::RateLimitExceeded {
                            retry_after: Some(retry_after),
                            ..
                        } => (*retry_after).min(MAX_RETRY_AFTER),
                        _ => backoff,
                    };

                    warn!(
                        "Retryable error (attempt {}/{}), waiting for {:?} before retrying: {}",
                        attempts,
                        self.config.max_network_retries + 1,
                        wait_time,
                        e
                    );

                    sleep(wait_time).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Perform an authenticated `GET` request, encoding `params` as the query.
    #[instrument(skip(self, params))]
    pub async fn get<R: DeserializeOwned, P: ApiParams>(
        &self,
        endpoint: StripeEndpoint,
        params: &P,
    ) -> Result<R> {
        let url = endpoint.to_url(&self.config.api_base)?;
        let query = form::to_pairs(params)?;
        self.execute_with_retry(|| async {
            trace!(?query, %url, "making GET request");
            let response = self
                .build_request(Method::GET, url.clone(), params.stripe_account())?
                .query(&query)
                .send()
                .await?;

            Self::handle_response(response).await
        })
        .await
    }

    /// Perform an authenticated `POST` request with a form-encoded body.
    ///
    /// Every attempt carries the same `Idempotency-Key`, generated when the
    /// parameters don't supply one, so a retried create is applied once.
    #[instrument(skip(self, params))]
    pub async fn post<R: DeserializeOwned, P: ApiParams>(
        &self,
        endpoint: StripeEndpoint,
        params: &P,
    ) -> Result<R> {
        let url = endpoint.to_url(&self.config.api_base)?;
        let body = form::encode(params)?;
        let idempotency_key = params
            .idempotency_key()
            .map_or_else(|| Uuid::new_v4().to_string(), str::to_owned);
        self.execute_with_retry(|| async {
            trace!(%body, %url, %idempotency_key, "making POST request");
            let response = self
                .build_request(Method::POST, url.clone(), params.stripe_account())?
                .header(HEADER_IDEMPOTENCY_KEY, idempotency_key.as_str())
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(body.clone())
                .send()
                .await?;

            Self::handle_response(response).await
        })
        .await
    }

    /// Perform an authenticated `DELETE` request. Stripe answers with the
    /// deleted object, flagged `deleted: true`.
    #[instrument(skip(self, params))]
    pub async fn delete<R: DeserializeOwned, P: ApiParams>(
        &self,
        endpoint: StripeEndpoint,
        params: &P,
    ) -> Result<R> {
        let url = endpoint.to_url(&self.config.api_base)?;
        let query = form::to_pairs(params)?;
        self.execute_with_retry(|| async {
            trace!(%url, "making DELETE request");
            let response = self
                .build_request(Method::DELETE, url.clone(), params.stripe_account())?
                .query(&query)
                .send()
                .await?;

            Self::handle_response(response).await
        })
        .await
    }

    #[instrument(skip(response))]
    pub(crate) async fn handle_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();
        let url = response.url().to_string();
        let request_id = response
            .headers()
            .get(HEADER_REQUEST_ID)
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        let retry_after = response
            .headers()
            .get(header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.trim().parse::<u64>().ok())
            .map(Duration::from_secs);

        let body = response.bytes().await?;

        debug!(
            %url,
            %status,
            request_id = request_id.as_deref().unwrap_or("-"),
            size = body.len(),
            "received response"
        );
        trace!("Response text:\n{}", String::from_utf8_lossy(&body));

        if status.is_success() {
            return expandable::decode(&body);
        }

        let api_error = serde_json::from_slice::<ApiErrorResponse>(&body).ok();
        match status {
            StatusCode::NOT_FOUND => Err(Error::NotFound {
                resource: short_type_name::<T>(),
                url,
                status_code: status,
                response: api_error,
            }),
            StatusCode::TOO_MANY_REQUESTS => {
                warn!(%url, ?retry_after, "Rate limit exceeded");
                Err(Error::RateLimitExceeded {
                    retry_after,
                    url,
                    response: api_error,
                })
            }
            _ => match api_error {
                Some(response) => {
                    error!(%url, %status, "API error: {response}");
                    Err(Error::Api {
                        status_code: status,
                        url,
                        response,
                    })
                }
                None => {
                    error!(%url, %status, "Unexpected status code");
                    Err(Error::UnexpectedResponse {
                        status_code: status,
                        url,
                        body: String::from_utf8_lossy(&body).into_owned(),
                    })
                }
            },
        }
    }

    /// Access the invoice items API
    #[must_use]
    pub fn invoice_items(&self) -> InvoiceItemsApi<'_> {
        InvoiceItemsApi { client: self }
    }

    /// Access the issuing disputes API
    #[must_use]
    pub fn issuing_disputes(&self) -> IssuingDisputesApi<'_> {
        IssuingDisputesApi { client: self }
    }

    /// Access the login links API
    #[must_use]
    pub fn login_links(&self) -> LoginLinksApi<'_> {
        LoginLinksApi { client: self }
    }

    /// Access the webhook endpoints API
    #[must_use]
    pub fn webhook_endpoints(&self) -> WebhookEndpointsApi<'_> {
        WebhookEndpointsApi { client: self }
    }
}

/// API handler for Invoice Items endpoints
#[derive(Debug)]
pub struct InvoiceItemsApi<'a> {
    client: &'a Client,
}

impl InvoiceItemsApi<'_> {
    /// Create an invoice item
    #[instrument(skip(self, params))]
    pub async fn create(&self, params: &InvoiceItemParams) -> Result<InvoiceItem> {
        self.client
            .post(StripeEndpoint::InvoiceItems, params)
            .await
    }

    /// Retrieve an invoice item; use `params.expand` to inflate relations
    #[instrument(skip(self, params))]
    pub async fn get(&self, id: &str, params: &Params) -> Result<InvoiceItem> {
        self.client
            .get(StripeEndpoint::InvoiceItem(id.to_owned()), params)
            .await
    }

    /// Update an invoice item
    #[instrument(skip(self, params))]
    pub async fn update(&self, id: &str, params: &InvoiceItemParams) -> Result<InvoiceItem> {
        self.client
            .post(StripeEndpoint::InvoiceItem(id.to_owned()), params)
            .await
    }

    /// Delete an invoice item that is not attached to a finalized invoice
    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<InvoiceItem> {
        self.client
            .delete(StripeEndpoint::InvoiceItem(id.to_owned()), &Params::default())
            .await
    }

    /// List one page of invoice items
    #[instrument(skip(self, params))]
    pub async fn list(&self, params: &InvoiceItemListParams) -> Result<InvoiceItemList> {
        self.client
            .get(StripeEndpoint::InvoiceItems, params)
            .await
    }

    /// List the first page of invoice items without any filtering
    #[instrument(skip(self))]
    pub async fn list_all(&self) -> Result<InvoiceItemList> {
        self.list(&InvoiceItemListParams::default()).await
    }
}

/// API handler for Issuing Disputes endpoints
#[derive(Debug)]
pub struct IssuingDisputesApi<'a> {
    client: &'a Client,
}

impl IssuingDisputesApi<'_> {
    /// Create an issuing dispute
    #[instrument(skip(self, params))]
    pub async fn create(&self, params: &IssuingDisputeParams) -> Result<IssuingDispute> {
        self.client
            .post(StripeEndpoint::IssuingDisputes, params)
            .await
    }

    /// Retrieve an issuing dispute
    #[instrument(skip(self, params))]
    pub async fn get(&self, id: &str, params: &Params) -> Result<IssuingDispute> {
        self.client
            .get(StripeEndpoint::IssuingDispute(id.to_owned()), params)
            .await
    }

    /// Update an issuing dispute
    #[instrument(skip(self, params))]
    pub async fn update(&self, id: &str, params: &IssuingDisputeParams) -> Result<IssuingDispute> {
        self.client
            .post(StripeEndpoint::IssuingDispute(id.to_owned()), params)
            .await
    }

    /// List one page of issuing disputes
    #[instrument(skip(self, params))]
    pub async fn list(&self, params: &IssuingDisputeListParams) -> Result<IssuingDisputeList> {
        self.client
            .get(StripeEndpoint::IssuingDisputes, params)
            .await
    }
}

/// API handler for Login Links endpoints
#[derive(Debug)]
pub struct LoginLinksApi<'a> {
    client: &'a Client,
}

impl LoginLinksApi<'_> {
    /// Create a login link for the Express account in `params.account`
    #[instrument(skip(self, params), fields(account = %params.account))]
    pub async fn create(&self, params: &LoginLinkParams) -> Result<LoginLink> {
        self.client
            .post(StripeEndpoint::LoginLinks(params.account.clone()), params)
            .await
    }
}

/// API handler for Webhook Endpoints endpoints
#[derive(Debug)]
pub struct WebhookEndpointsApi<'a> {
    client: &'a Client,
}

impl WebhookEndpointsApi<'_> {
    /// Create a webhook endpoint; the response is the only one carrying its secret
    #[instrument(skip(self, params))]
    pub async fn create(&self, params: &WebhookEndpointParams) -> Result<WebhookEndpoint> {
        self.client
            .post(StripeEndpoint::WebhookEndpoints, params)
            .await
    }

    /// Retrieve a webhook endpoint
    #[instrument(skip(self))]
    pub async fn get(&self, id: &str) -> Result<WebhookEndpoint> {
        self.client
            .get(StripeEndpoint::WebhookEndpoint(id.to_owned()), &Params::default())
            .await
    }

    /// Update a webhook endpoint
    #[instrument(skip(self, params))]
    pub async fn update(&self, id: &str, params: &WebhookEndpointParams) -> Result<WebhookEndpoint> {
        self.client
            .post(StripeEndpoint::WebhookEndpoint(id.to_owned()), params)
            .await
    }

    /// Delete a webhook endpoint
    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<WebhookEndpoint> {
        self.client
            .delete(StripeEndpoint::WebhookEndpoint(id.to_owned()), &Params::default())
            .await
    }

    /// List one page of webhook endpoints
    #[instrument(skip(self, params))]
    pub async fn list(&self, params: &WebhookEndpointListParams) -> Result<WebhookEndpointList> {
        self.client
            .get(StripeEndpoint::WebhookEndpoints, params)
            .await
    }
}
