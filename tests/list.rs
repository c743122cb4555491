mod test_utils;

use serde::{Deserialize, Serialize};
use stripe_rs::{Error, Expandable, List, ListParams, expandable, invoice_item::InvoiceItem};
use test_utils::do_setup;

#[derive(Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
struct Thing {
    id: String,
}

stripe_rs::resource!(Thing => "thing");

#[test]
fn keeps_server_order() {
    do_setup();
    let page: List<Thing> =
        expandable::decode(br#"{"data":[{"id":"x"},{"id":"y"}],"has_more":true}"#).unwrap();

    let ids: Vec<_> = page.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, ["x", "y"]);
    assert!(page.has_more);
    assert_eq!(page.object, "list");
    assert_eq!(page.last_id(), Some("y"));
}

#[test]
fn next_page_starts_after_last_item() {
    let page: List<Thing> = expandable::decode(
        br#"{"object":"list","data":[{"id":"a"},{"id":"b"}],"has_more":true,"total_count":9}"#,
    )
    .unwrap();
    let next = page
        .next_page_params(&ListParams::new().with_ending_before("q").with_expand("data.customer"))
        .unwrap();
    assert_eq!(next.starting_after.as_deref(), Some("b"));
    assert_eq!(next.ending_before, None);
    assert_eq!(next.expand, ["data.customer"]);
    assert_eq!(page.meta().total_count, Some(9));
}

#[test]
fn null_reference_element_is_the_zero_value() {
    let refs: List<Expandable<Thing>> =
        expandable::decode(br#"{"data":["a",null]}"#).unwrap();
    assert_eq!(refs.data[0].id(), "a");
    assert_eq!(refs.data[1], Expandable::Id(String::new()));
    assert_eq!(refs.data[1].id(), "");
}

#[test]
fn bare_ids_need_an_expandable_element_type() {
    let refs: List<Expandable<InvoiceItem>> =
        expandable::decode(br#"{"data":["ii_1",{"id":"ii_2","amount":5}]}"#).unwrap();
    assert_eq!(refs.data[0].clone().into_resource().id, "ii_1");
    assert_eq!(refs.data[1].as_object().map(|i| i.amount), Some(5));

    let err = expandable::decode::<List<InvoiceItem>>(br#"{"data":["ii_1"]}"#).unwrap_err();
    assert!(matches!(err, Error::MalformedResource { .. }), "{err:?}");
}

#[test]
fn bad_item_is_a_malformed_resource() {
    let err = expandable::decode::<List<InvoiceItem>>(br#"{"data":[{"id":"ii_1","amount":"ten"}]}"#)
        .unwrap_err();
    match err {
        Error::MalformedResource { resource, body, .. } => {
            assert_eq!(resource, "List<InvoiceItem>");
            assert!(body.unwrap().contains("ten"));
        }
        other => panic!("expected MalformedResource, got {other:?}"),
    }
}

#[test]
fn consuming_iteration() {
    let page: List<Thing> =
        expandable::decode(br#"{"data":[{"id":"p"},{"id":"q"}]}"#).unwrap();
    let ids: Vec<String> = page.into_iter().map(|t| t.id).collect();
    assert_eq!(ids, ["p", "q"]);
}
