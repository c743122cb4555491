//! Relation fields that the API returns either as a bare id or as the full
//! nested object.
//!
//! Whether a relation comes back expanded depends on the `expand` parameter of
//! the request, so every relation field is declared as
//! `Option<Expandable<R>>` and decoded by peeking at the JSON type tag:
//!
//! | wire value      | decoded as                                   |
//! |-----------------|----------------------------------------------|
//! | `"cus_123"`     | `Some(Expandable::Id("cus_123"))`            |
//! | `{"id": ...}`   | `Some(Expandable::Object(..))`               |
//! | `null`/missing  | `None`                                       |
//! | anything else   | [`Error::MalformedReference`]                |
//!
//! Where a reference is decoded without the `Option` wrapper (at the top
//! level, or as a list element), `null` becomes `Expandable::Id("")`, whose
//! [`Expandable::into_resource`] is the resource's default value.
//!
//! ```
//! use stripe_rs::{expandable, invoice_item::InvoiceItem};
//!
//! let item: InvoiceItem = expandable::decode(
//!     br#"{"id":"ii_1","customer":"cus_1","invoice":{"id":"in_1","number":"INV-001"}}"#,
//! )?;
//!
//! let customer = item.customer.as_ref().unwrap();
//! assert_eq!(customer.id(), "cus_1");
//! assert!(!customer.is_expanded());
//!
//! let invoice = item.invoice.as_ref().and_then(|i| i.as_object()).unwrap();
//! assert_eq!(invoice.number.as_deref(), Some("INV-001"));
//! # Ok::<(), stripe_rs::Error>(())
//! ```

use std::fmt;
use std::marker::PhantomData;

use serde::de::{self, DeserializeOwned, MapAccess, SeqAccess, Unexpected, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::error::Category;

use crate::error::{Error, Result};
use crate::utils::type_name::short_type_name;

/// Prefix of the codec's rejection message; [`decode`] uses it to tell a
/// malformed reference apart from any other decode failure.
const MALFORMED_REFERENCE: &str = "malformed reference to `";

/// A named API entity with a stable, server-assigned identifier.
///
/// Implemented through the [`resource!`](crate::resource) macro.
pub trait Resource {
    /// The value of the `object` field, e.g. `"invoiceitem"`.
    const OBJECT: &'static str;

    fn id(&self) -> &str;

    /// An identifier-only value: `id` set, every other attribute at its default.
    fn stub(id: String) -> Self;
}

/// Implements [`Resource`] for structs with an `id: String` field and a
/// `Default` impl.
#[macro_export]
macro_rules! resource {
    ($($ty:ty => $object:literal),+ $(,)?) => {
        $(
            impl $crate::expandable::Resource for $ty {
                const OBJECT: &'static str = $object;

                fn id(&self) -> &str {
                    &self.id
                }

                fn stub(id: String) -> Self {
                    Self {
                        id,
                        ..Default::default()
                    }
                }
            }
        )+
    };
}

/// A reference to another resource: either just its id, or the whole object.
#[derive(Clone, Debug, PartialEq)]
pub enum Expandable<T> {
    Id(String),
    Object(Box<T>),
}

impl<T> Expandable<T> {
    /// A reference holding only an id.
    pub fn from_id(id: impl Into<String>) -> Self {
        Self::Id(id.into())
    }

    #[must_use]
    pub fn is_expanded(&self) -> bool {
        matches!(self, Self::Object(_))
    }

    #[must_use]
    pub fn as_object(&self) -> Option<&T> {
        match self {
            Self::Id(_) => None,
            Self::Object(object) => Some(object),
        }
    }

    #[must_use]
    pub fn into_object(self) -> Option<T> {
        match self {
            Self::Id(_) => None,
            Self::Object(object) => Some(*object),
        }
    }
}

impl<T: Resource> Expandable<T> {
    /// The referenced id, whether or not the object was expanded.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Id(id) => id,
            Self::Object(object) => object.id(),
        }
    }

    /// The expanded object, or an id-only stub of it.
    ///
    /// A stub is indistinguishable from an object that legitimately has
    /// default attributes; check [`Expandable::is_expanded`] first when that
    /// matters.
    #[must_use]
    pub fn into_resource(self) -> T {
        match self {
            Self::Id(id) => T::stub(id),
            Self::Object(object) => *object,
        }
    }
}

impl<T> From<T> for Expandable<T> {
    fn from(object: T) -> Self {
        Self::Object(Box::new(object))
    }
}

impl<T: Serialize> Serialize for Expandable<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Id(id) => serializer.serialize_str(id),
            Self::Object(object) => object.serialize(serializer),
        }
    }
}

impl<'de, T> Deserialize<'de> for Expandable<T>
where
    T: Resource + Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(ExpandableVisitor(PhantomData))
    }
}

struct ExpandableVisitor<T>(PhantomData<T>);

impl<T: Resource> ExpandableVisitor<T> {
    fn reject<E: de::Error>(&self, unexpected: Unexpected<'_>) -> E {
        E::custom(format_args!(
            "{MALFORMED_REFERENCE}{}`: expected {self}, found {unexpected}",
            T::OBJECT
        ))
    }
}

impl<T: Resource> fmt::Display for ExpandableVisitor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "an id string or an expanded {} object", T::OBJECT)
    }
}

impl<'de, T> Visitor<'de> for ExpandableVisitor<T>
where
    T: Resource + Deserialize<'de>,
{
    type Value = Expandable<T>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Self::Value, E> {
        Ok(Expandable::Id(v.to_owned()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> std::result::Result<Self::Value, E> {
        Ok(Expandable::Id(v))
    }

    fn visit_map<A: MapAccess<'de>>(self, map: A) -> std::result::Result<Self::Value, A::Error> {
        T::deserialize(de::value::MapAccessDeserializer::new(map))
            .map(|object| Expandable::Object(Box::new(object)))
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> std::result::Result<Self::Value, E> {
        Err(self.reject(Unexpected::Bool(v)))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Self::Value, E> {
        Err(self.reject(Unexpected::Signed(v)))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Self::Value, E> {
        Err(self.reject(Unexpected::Unsigned(v)))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<Self::Value, E> {
        Err(self.reject(Unexpected::Float(v)))
    }

    /// `null` is the zero value: an empty id, whose stub is `T::default()`.
    fn visit_unit<E: de::Error>(self) -> std::result::Result<Self::Value, E> {
        Ok(Expandable::Id(String::new()))
    }

    fn visit_none<E: de::Error>(self) -> std::result::Result<Self::Value, E> {
        Ok(Expandable::Id(String::new()))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, _seq: A) -> std::result::Result<Self::Value, A::Error> {
        Err(self.reject(Unexpected::Seq))
    }

    fn visit_bytes<E: de::Error>(self, v: &[u8]) -> std::result::Result<Self::Value, E> {
        Err(self.reject(Unexpected::Bytes(v)))
    }
}

/// Decodes a response body into `T`.
///
/// Fails atomically: a rejected reference anywhere in the tree becomes
/// [`Error::MalformedReference`] naming the path of the offending field,
/// anything else [`Error::MalformedResource`].
///
/// Only [`Expandable`] accepts a bare id. Resource structs always expect an
/// object, so a position that may hold either shape, such as the elements of
/// a list returned with or without `expand`, must be decoded as
/// `Expandable<R>` (e.g. `List<Expandable<InvoiceItem>>`); decoding `"ii_1"`
/// as `InvoiceItem` is a [`Error::MalformedResource`].
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    let mut deserializer = serde_json::Deserializer::from_slice(bytes);
    let value = serde_path_to_error::deserialize(&mut deserializer)
        .map_err(|e| classify::<T>(e, bytes))?;
    deserializer
        .end()
        .map_err(|e| malformed_resource::<T>(e, bytes))?;
    Ok(value)
}

/// [`decode`] for an already parsed JSON value.
pub fn decode_value<T: DeserializeOwned>(value: serde_json::Value) -> Result<T> {
    serde_path_to_error::deserialize(value).map_err(|e| {
        let path = e.path().to_string();
        let inner = e.into_inner();
        match parse_rejection(&inner) {
            Some((resource, message)) => Error::malformed_reference(path, resource, message),
            None => Error::malformed_resource(short_type_name::<T>(), inner, None),
        }
    })
}

fn classify<T>(e: serde_path_to_error::Error<serde_json::Error>, bytes: &[u8]) -> Error {
    let path = e.path().to_string();
    let inner = e.into_inner();
    match parse_rejection(&inner) {
        Some((resource, message)) => {
            error!(field = %path, %resource, "malformed reference in response");
            Error::malformed_reference(path, resource, message)
        }
        None => malformed_resource::<T>(inner, bytes),
    }
}

fn malformed_resource<T>(source: serde_json::Error, bytes: &[u8]) -> Error {
    let resource = short_type_name::<T>();
    error!(%resource, line = source.line(), column = source.column(), "failed to decode resource: {source}");
    Error::malformed_resource(
        resource,
        source,
        Some(String::from_utf8_lossy(bytes).into_owned()),
    )
}

/// Splits a codec rejection into the resource object name and the full
/// message. serde_json appends the position, which is kept.
fn parse_rejection(error: &serde_json::Error) -> Option<(String, String)> {
    if error.classify() != Category::Data {
        return None;
    }
    let message = error.to_string();
    let rest = message.strip_prefix(MALFORMED_REFERENCE)?;
    let (resource, _) = rest.split_once('`')?;
    Some((resource.to_owned(), message))
}
