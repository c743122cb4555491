//! Example test showing how to use the miette integration
use miette::{Diagnostic, IntoDiagnostic, Result};

use stripe_rs::error::Error;
use stripe_rs::{expandable, invoice_item::InvoiceItem};

#[tokio::test]
async fn miette_integration_example() -> Result<()> {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    // Our Error type is already Diagnostic-compatible
    let result: stripe_rs::error::Result<InvoiceItem> =
        expandable::decode(br#"{"id":"ii_1","customer":12}"#);

    if let Err(e) = result {
        println!("Error with diagnostic info: {:#?}", e);
        assert_eq!(
            e.code().map(|c| c.to_string()).as_deref(),
            Some("stripe_rs::malformed_reference")
        );
    }

    // Converting into a miette report still needs into_diagnostic()
    if let Err(client_error) = create_client().await.into_diagnostic() {
        println!("Client error with diagnostic info: {:#?}", client_error);
    }

    Ok(())
}

async fn create_client() -> stripe_rs::error::Result<stripe_rs::Client> {
    Err(Error::MissingConfig("STRIPE_SECRET_KEY"))
}
