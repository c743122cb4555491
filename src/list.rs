use serde::{Deserialize, Serialize};

use crate::expandable::Resource;
use crate::params::ListApiParams;

/// Pagination metadata of a list response.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListMeta {
    pub has_more: bool,
    pub total_count: Option<u64>,
    pub url: String,
}

/// A page of resources as returned by a list endpoint.
///
/// Items keep the order the server returned them in.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct List<T> {
    #[serde(default = "list_object")]
    pub object: String,
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_count: Option<u64>,
    #[serde(default)]
    pub url: String,
}

fn list_object() -> String {
    "list".to_string()
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self {
            object: list_object(),
            data: Vec::new(),
            has_more: false,
            total_count: None,
            url: String::new(),
        }
    }
}

impl<T> List<T> {
    #[must_use]
    pub fn meta(&self) -> ListMeta {
        ListMeta {
            has_more: self.has_more,
            total_count: self.total_count,
            url: self.url.clone(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }
}

impl<T: Resource> List<T> {
    /// Id of the last item on this page, usable as a `starting_after` cursor.
    #[must_use]
    pub fn last_id(&self) -> Option<&str> {
        self.data.last().map(Resource::id)
    }

    /// Parameters for the page after this one, or `None` when the server
    /// reported no more results.
    ///
    /// `base` is the request that produced this page; its filters, limit and
    /// expansions carry over and only the cursor changes.
    #[must_use]
    pub fn next_page_params<P: ListApiParams>(&self, base: &P) -> Option<P> {
        if !self.has_more {
            return None;
        }
        let last_id = self.last_id()?;
        let mut params = base.clone();
        let list = params.list_params_mut();
        list.ending_before = None;
        list.starting_after = Some(last_id.to_owned());
        Some(params)
    }
}

impl<T> IntoIterator for List<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a List<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expandable;
    use crate::params::ListParams;

    #[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
    #[serde(default)]
    struct Entry {
        id: String,
    }

    crate::resource!(Entry => "entry");

    #[test]
    fn preserves_server_order() {
        let list: List<Entry> =
            expandable::decode(br#"{"data":[{"id":"x"},{"id":"y"}],"has_more":true}"#).unwrap();
        let ids: Vec<_> = list.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["x", "y"]);
        assert!(list.has_more);
        assert_eq!(list.object, "list");
        assert_eq!(list.last_id(), Some("y"));
    }

    #[test]
    fn next_page_uses_last_id() {
        let list: List<Entry> = expandable::decode(
            br#"{"object":"list","url":"/v1/entries","data":[{"id":"a"},{"id":"b"}],"has_more":true}"#,
        )
        .unwrap();
        let base = ListParams::new().with_limit(2).with_ending_before("z");
        let next = list.next_page_params(&base).unwrap();
        assert_eq!(next.starting_after.as_deref(), Some("b"));
        assert_eq!(next.ending_before, None);
        assert_eq!(next.limit, Some(2));
    }

    #[test]
    fn last_page_has_no_next() {
        let list: List<Entry> =
            expandable::decode(br#"{"data":[{"id":"a"}],"has_more":false}"#).unwrap();
        assert!(list.next_page_params(&ListParams::new()).is_none());
        assert_eq!(list.meta(), ListMeta::default());
    }

    #[test]
    fn stub_elements_decode_inside_lists() {
        let list: List<expandable::Expandable<Entry>> =
            expandable::decode(br#"{"data":["a",{"id":"b"}],"has_more":false}"#).unwrap();
        assert!(!list.data[0].is_expanded());
        assert!(list.data[1].is_expanded());
    }
}
