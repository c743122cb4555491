mod test_utils;

use stripe_rs::{
    ApiParams, StripeEndpoint, expandable,
    login_link::{LoginLink, LoginLinkParams},
};
use test_utils::do_setup;

#[test]
fn decodes_login_link() {
    do_setup();
    let link: LoginLink = expandable::decode(
        br#"{"object":"login_link","created":1577836800,"url":"https://connect.stripe.com/express/abc"}"#,
    )
    .unwrap();
    assert_eq!(link.object, "login_link");
    assert_eq!(link.url, "https://connect.stripe.com/express/abc");
    assert_eq!(link.created.unwrap().unix_timestamp(), 1_577_836_800);
}

#[test]
fn account_goes_in_the_path_not_the_body() {
    let params = LoginLinkParams::new("acct_1").with_redirect_url("https://example.com/done");
    assert_eq!(
        stripe_rs::form::encode(&params).unwrap(),
        "redirect_url=https%3A%2F%2Fexample.com%2Fdone"
    );
    assert_eq!(
        StripeEndpoint::LoginLinks(params.account.clone()).to_string(),
        "/accounts/acct_1/login_links"
    );
}

#[test]
fn header_values_come_from_common_params() {
    let mut params = LoginLinkParams::new("acct_1");
    params.params = params.params.with_idempotency_key("login-acct_1");
    assert_eq!(params.idempotency_key(), Some("login-acct_1"));
    assert_eq!(params.stripe_account(), None);
    assert_eq!(stripe_rs::form::encode(&params).unwrap(), "");
}
