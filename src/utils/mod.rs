pub mod serde_helpers;
pub(crate) mod type_name;
