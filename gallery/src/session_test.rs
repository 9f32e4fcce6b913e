use super::*;
use crate::testing::{FakeIdentity, token_with_admin, token_with_claims};
use futures::executor::block_on;

// =============================================================
// admin_claim
// =============================================================

#[test]
fn admin_claim_reads_true_flag() {
    assert!(admin_claim(&token_with_admin(true)));
    assert!(!admin_claim(&token_with_admin(false)));
}

#[test]
fn admin_claim_missing_is_false() {
    let token = token_with_claims(&serde_json::json!({ "sub": "uid-1" }));
    assert!(!admin_claim(&token));
}

#[test]
fn admin_claim_uses_truthiness() {
    for (claim, expected) in [
        (serde_json::json!(1), true),
        (serde_json::json!("yes"), true),
        (serde_json::json!(0), false),
        (serde_json::json!(""), false),
        (serde_json::Value::Null, false),
    ] {
        let token = token_with_claims(&serde_json::json!({ "admin": claim }));
        assert_eq!(admin_claim(&token), expected, "claim {claim}");
    }
}

#[test]
fn admin_claim_rejects_malformed_tokens() {
    assert!(!admin_claim(""));
    assert!(!admin_claim("not-a-jwt"));
    assert!(!admin_claim("a.@@@.c"));
    assert!(!admin_claim("a.bm90IGpzb24.c"));
}

// =============================================================
// Session
// =============================================================

#[test]
fn session_from_missing_token_is_anonymous() {
    let session = Session::from_token(None);
    assert!(!session.signed_in);
    assert!(!session.is_admin);
    assert!(session.token.is_none());
}

#[test]
fn session_fetch_degrades_to_anonymous_on_provider_error() {
    let identity = FakeIdentity::signed_in(true);
    identity.break_tokens();
    assert_eq!(block_on(Session::fetch(&identity)), Session::anonymous());
}

#[test]
fn session_fetch_rederives_admin_after_claim_change() {
    let identity = FakeIdentity::signed_in(true);
    assert!(block_on(Session::fetch(&identity)).is_admin);
    identity.set_token(Some(token_with_admin(false)));
    assert!(!block_on(Session::fetch(&identity)).is_admin);
}

// =============================================================
// Capabilities
// =============================================================

#[test]
fn capabilities_follow_admin_claim() {
    let admin = Capabilities::for_session(&Session::from_token(Some(token_with_admin(true))));
    assert!(admin.create_album && admin.upload && admin.delete_album && admin.edit_photo && admin.delete_photo);

    let member = Capabilities::for_session(&Session::from_token(Some(token_with_admin(false))));
    assert_eq!(member, Capabilities::none());
}

#[test]
fn capabilities_for_anonymous_are_none() {
    assert_eq!(Capabilities::for_session(&Session::anonymous()), Capabilities::none());
}
