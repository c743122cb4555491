use serde::{Deserialize, Deserializer};

/// Deserializes a value, treating `null` as the type's default.
/// Useful for Stripe collections that are sometimes returned as `null`
/// instead of empty.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
