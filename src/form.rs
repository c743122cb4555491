//! Flattens parameter structs into `application/x-www-form-urlencoded`
//! pairs using Stripe's bracket notation.
//!
//! The only field metadata consulted is what serde already records: the
//! field name, `skip_serializing_if` for omission, and the value's own
//! serialization (decimals serialize as strings, so they keep full
//! precision).
//!
//! | value                       | pairs                                  |
//! |-----------------------------|----------------------------------------|
//! | `{"period": {"start": 1}}`  | `period[start]=1`                      |
//! | `{"tax_rates": ["a", "b"]}` | `tax_rates[0]=a`, `tax_rates[1]=b`     |
//! | `{"description": null}`     | `description=` (unset)                 |
//! | `{"tax_rates": []}`         | `tax_rates=` (unset)                   |

use serde::Serialize;
use serde_json::Value;

use crate::error::{Error, Result};

/// Flattens `params` into ordered key/value pairs.
pub fn to_pairs<T: Serialize + ?Sized>(params: &T) -> Result<Vec<(String, String)>> {
    let value = serde_json::to_value(params).map_err(Error::FormEncoding)?;
    let mut pairs = Vec::new();
    match value {
        Value::Object(map) => {
            for (key, value) in map {
                flatten(key, value, &mut pairs);
            }
        }
        Value::Null => {}
        other => {
            return Err(Error::FormEncoding(serde::ser::Error::custom(format!(
                "expected parameters to serialize to an object, got {other}"
            ))));
        }
    }
    Ok(pairs)
}

/// Encodes `params` as a URL-encoded request body or query string.
pub fn encode<T: Serialize + ?Sized>(params: &T) -> Result<String> {
    let pairs = to_pairs(params)?;
    Ok(url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish())
}

fn flatten(key: String, value: Value, pairs: &mut Vec<(String, String)>) {
    match value {
        Value::Null => pairs.push((key, String::new())),
        Value::Bool(b) => pairs.push((key, b.to_string())),
        Value::Number(n) => pairs.push((key, n.to_string())),
        Value::String(s) => pairs.push((key, s)),
        Value::Array(items) if items.is_empty() => pairs.push((key, String::new())),
        Value::Array(items) => {
            for (i, item) in items.into_iter().enumerate() {
                flatten(format!("{key}[{i}]"), item, pairs);
            }
        }
        Value::Object(map) => {
            for (field, value) in map {
                flatten(format!("{key}[{field}]"), value, pairs);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn pairs(value: &Value) -> Vec<(String, String)> {
        to_pairs(value).unwrap()
    }

    fn pair(key: &str, value: &str) -> (String, String) {
        (key.to_string(), value.to_string())
    }

    #[test]
    fn nests_objects_and_indexes_arrays() {
        let value = json!({
            "amount": 500,
            "period": {"end": 20, "start": 10},
            "tax_rates": ["txr_1", "txr_2"],
        });
        assert_eq!(
            pairs(&value),
            vec![
                pair("amount", "500"),
                pair("period[end]", "20"),
                pair("period[start]", "10"),
                pair("tax_rates[0]", "txr_1"),
                pair("tax_rates[1]", "txr_2"),
            ]
        );
    }

    #[test]
    fn null_and_empty_array_unset() {
        let value = json!({"description": null, "tax_rates": []});
        assert_eq!(
            pairs(&value),
            vec![pair("description", ""), pair("tax_rates", "")]
        );
    }

    #[test]
    fn encode_escapes_brackets_and_values() {
        let value = json!({"metadata": {"note": "a&b"}});
        assert_eq!(encode(&value).unwrap(), "metadata%5Bnote%5D=a%26b");
    }

    #[test]
    fn rejects_non_object_parameters() {
        assert!(matches!(to_pairs(&json!(5)), Err(Error::FormEncoding(_))));
        assert!(to_pairs(&()).unwrap().is_empty());
    }
}
