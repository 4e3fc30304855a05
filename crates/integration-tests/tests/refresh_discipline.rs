//! The gateway's refresh-and-retry behavior against a canned backend.
//!
//! Run with: cargo test -p kiogloss-integration-tests

use kiogloss_client::storage::keys;
use kiogloss_client::{ApiError, AuthError, SessionState, Storefront};
use kiogloss_core::{AccountId, Email, SizeId};
use kiogloss_integration_tests::{
    access_token, raw_state, seed_credentials, spawn_stub_backend, stub_config,
};

#[tokio::test]
async fn test_rejected_sign_in_leaves_live_session_intact() {
    let dir = tempfile::tempdir().expect("tempdir");
    seed_credentials(dir.path(), &access_token(7, &["ROLE_USER"], i64::MAX));
    let addr = spawn_stub_backend().await;

    let storefront = Storefront::new(&stub_config(dir.path(), addr)).expect("storefront");
    storefront.session.bootstrap().await;
    assert_eq!(storefront.session.state(), SessionState::Authenticated);
    // Enrichment reached the backend, so the account id resolved.
    assert_eq!(storefront.session.account_id(), Some(AccountId::new(14)));

    // A sign-in with the wrong password is rejected twice: once outright and
    // once after the gateway refreshes and replays it.
    let email: Email = "tester@example.com".parse().expect("email");
    let result = storefront.session.login(email, "wrong-password".to_owned()).await;
    assert!(matches!(result, Err(AuthError::InvalidCredentials)));

    // The failed attempt must not tear down the session that was live
    // before it, in memory or on disk.
    assert_eq!(storefront.session.state(), SessionState::Authenticated);
    assert!(storefront.session.identity().is_some());
    assert!(raw_state(dir.path(), keys::AUTH).is_some());
}

#[tokio::test]
async fn test_terminal_unauthorized_is_not_destructive() {
    let dir = tempfile::tempdir().expect("tempdir");
    seed_credentials(dir.path(), &access_token(7, &["ROLE_USER"], i64::MAX));
    let addr = spawn_stub_backend().await;

    let storefront = Storefront::new(&stub_config(dir.path(), addr)).expect("storefront");
    storefront.session.bootstrap().await;
    assert_eq!(storefront.session.state(), SessionState::Authenticated);

    // The stub rejects the orders listing even after a successful refresh,
    // so the call ends in the terminal unauthorized error.
    let result = storefront.orders.user_orders(0, 10, None).await;
    assert!(matches!(result, Err(ApiError::Unauthenticated)));

    // Terminal for the call, not for the session: the refreshed pair stays
    // installed and the identity stays live.
    assert_eq!(storefront.session.state(), SessionState::Authenticated);
    assert!(raw_state(dir.path(), keys::AUTH).is_some());
}

#[tokio::test]
async fn test_admin_size_rename_round_trips() {
    let dir = tempfile::tempdir().expect("tempdir");
    seed_credentials(
        dir.path(),
        &access_token(7, &["ROLE_USER", "ROLE_ADMIN"], i64::MAX),
    );
    let addr = spawn_stub_backend().await;

    let storefront = Storefront::new(&stub_config(dir.path(), addr)).expect("storefront");
    let size = storefront
        .admin
        .update_size(SizeId::new(1), "30ml")
        .await
        .expect("rename size");

    assert_eq!(size.id, SizeId::new(1));
    assert_eq!(size.name, "30ml");
}
