//! # stripe-rs
//!
//! A Rust client library for the Stripe API.
//!
//! Relation fields on resources are [`Expandable`]: depending on the
//! `expand` parameter of a request the API returns either the related
//! object's id or the whole object, and the [`expandable`] module decodes
//! both shapes into one type.
//!
//! ```no_run
//! use stripe_rs::{Client, invoice_item::InvoiceItemParams};
//!
//! # async fn run() -> stripe_rs::error::Result<()> {
//! let client = Client::from_env()?;
//! let item = client
//!     .invoice_items()
//!     .create(&InvoiceItemParams::new("cus_123", 1500, "usd").with_expand("customer"))
//!     .await?;
//!
//! if let Some(customer) = item.customer.as_ref().and_then(|c| c.as_object()) {
//!     println!("billed {:?}", customer.email);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Sentry Integration
//!
//! Errors include async span traces that capture the call stack at the point
//! a response failed to decode. Enable the `sentry` feature for breadcrumb
//! support, and install `tracing_error::ErrorLayer` so span traces are
//! captured:
//!
//! ```ignore
//! use tracing_subscriber::prelude::*;
//! use tracing_error::ErrorLayer;
//!
//! tracing_subscriber::registry()
//!     .with(tracing_subscriber::fmt::layer())
//!     .with(ErrorLayer::default())  // Required for SpanTrace capture
//!     .with(sentry::integrations::tracing::layer())
//!     .init();
//! ```

#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

#[macro_use]
extern crate tracing;

pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod expandable;
pub mod form;
pub mod list;
pub mod params;
pub mod resources;
pub mod utils;

#[cfg(feature = "sentry")]
pub mod sentry_integration;

pub use client::Client;
pub use config::{Config, SecretKey};
pub use endpoints::StripeEndpoint;
pub use error::Error;
pub use expandable::{Expandable, Resource};
pub use list::List;
pub use params::{ApiParams, DateFilter, ListApiParams, ListParams, Nullable, Params, RangeQuery};
pub use resources::*;

// Re-export SpanTrace for users who want to access it
pub use tracing_error::SpanTrace;
