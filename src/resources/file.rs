use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// What an uploaded file is used for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilePurpose {
    AdditionalVerification,
    BusinessIcon,
    BusinessLogo,
    CustomerSignature,
    DisputeEvidence,
    IdentityDocument,
    PciDocument,
    TaxDocumentUserUpload,
    #[default]
    #[serde(other)]
    Unknown,
}

/// A file hosted by Stripe, e.g. dispute evidence.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct File {
    pub id: String,
    pub object: String,
    #[serde(with = "time::serde::timestamp::option")]
    pub created: Option<OffsetDateTime>,
    pub filename: Option<String>,
    pub purpose: FilePurpose,
    pub size: u64,
    pub title: Option<String>,
    #[serde(rename = "type")]
    pub file_type: Option<String>,
    pub url: Option<String>,
}

crate::resource!(File => "file");
