use conflict_gateway_test_helpers::configuration;
use tracing::level_filters::LevelFilter;

use crate::common::auth::{StubVerifier, VALID_TOKEN};
use crate::common::logging::{tracing_stderr_init, INIT};
use crate::servers::api::client::Client;
use crate::servers::api::Started;

#[tokio::test]
async fn should_authenticate_requests_with_a_valid_bearer_token() {
    INIT.call_once(|| {
        tracing_stderr_init(LevelFilter::ERROR);
    });

    let env = Started::new(&configuration::ephemeral().into(), Box::new(StubVerifier::accepting(VALID_TOKEN))).await;

    let response = Client::authenticated(env.bind_address(), VALID_TOKEN).get("conflitti").await;

    assert_eq!(response.status(), 200);

    env.stop().await;
}

#[tokio::test]
async fn should_not_authenticate_requests_when_the_authorization_header_is_missing() {
    INIT.call_once(|| {
        tracing_stderr_init(LevelFilter::ERROR);
    });

    let env = Started::new(&configuration::ephemeral().into(), Box::new(StubVerifier::accepting(VALID_TOKEN))).await;

    let response = Client::new(env.bind_address()).get("conflitti").await;

    assert_eq!(response.status(), 401);
    assert_eq!(
        response.json::<serde_json::Value>().await.unwrap(),
        serde_json::json!({"error": "unauthorized"})
    );

    env.stop().await;
}

#[tokio::test]
async fn should_not_authenticate_requests_when_the_token_is_invalid() {
    INIT.call_once(|| {
        tracing_stderr_init(LevelFilter::ERROR);
    });

    let env = Started::new(&configuration::ephemeral().into(), Box::new(StubVerifier::accepting(VALID_TOKEN))).await;

    let response = Client::authenticated(env.bind_address(), "INVALID TOKEN").get("conflitti").await;

    assert_eq!(response.status(), 401);

    env.stop().await;
}

#[tokio::test]
async fn should_not_authenticate_requests_when_the_header_does_not_follow_the_bearer_scheme() {
    INIT.call_once(|| {
        tracing_stderr_init(LevelFilter::ERROR);
    });

    let env = Started::new(&configuration::ephemeral().into(), Box::new(StubVerifier::accepting(VALID_TOKEN))).await;

    let response = Client::new(env.bind_address())
        .get_with_authorization_header("conflitti", &format!("Basic {VALID_TOKEN}"))
        .await;

    assert_eq!(response.status(), 401);

    env.stop().await;
}

#[tokio::test]
async fn should_short_circuit_before_the_store_when_the_credential_is_missing() {
    INIT.call_once(|| {
        tracing_stderr_init(LevelFilter::ERROR);
    });

    let env = Started::new(&configuration::ephemeral().into(), Box::new(StubVerifier::accepting(VALID_TOKEN))).await;

    // With a broken store an authenticated request fails with a 500, so a
    // 401 here proves the rejected request never reached the store.
    env.break_the_store();

    let response = Client::new(env.bind_address()).get("conflitti").await;
    assert_eq!(response.status(), 401);

    let response = Client::authenticated(env.bind_address(), VALID_TOKEN).get("conflitti").await;
    assert_eq!(response.status(), 500);

    env.stop().await;
}
