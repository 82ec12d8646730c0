use conflict_gateway_test_helpers::configuration;
use serde_json::json;
use tracing::level_filters::LevelFilter;

use crate::common::auth::{StubVerifier, VALID_TOKEN};
use crate::common::fixtures::event;
use crate::common::logging::{tracing_stderr_init, INIT};
use crate::servers::api::client::Client;
use crate::servers::api::Started;

#[tokio::test]
async fn should_return_the_events_grouped_by_region() {
    INIT.call_once(|| {
        tracing_stderr_init(LevelFilter::ERROR);
    });

    let env = Started::new(&configuration::ephemeral().into(), Box::new(StubVerifier::accepting(VALID_TOKEN))).await;

    let events = [
        event(Some("X"), 1),
        event(Some("X"), 2),
        event(Some("Y"), 3),
        event(None, 4),
    ];

    for conflict_event in &events {
        env.add_conflict_event(conflict_event);
    }

    let response = Client::authenticated(env.bind_address(), VALID_TOKEN).get("conflitti").await;

    assert_eq!(response.status(), 200);

    let expected = json!({
        "X": [
            serde_json::to_value(&events[0]).unwrap(),
            serde_json::to_value(&events[1]).unwrap(),
        ],
        "Y": [
            serde_json::to_value(&events[2]).unwrap(),
        ],
    });

    assert_eq!(response.json::<serde_json::Value>().await.unwrap(), expected);

    env.stop().await;
}

#[tokio::test]
async fn should_drop_the_events_without_a_region() {
    INIT.call_once(|| {
        tracing_stderr_init(LevelFilter::ERROR);
    });

    let env = Started::new(&configuration::ephemeral().into(), Box::new(StubVerifier::accepting(VALID_TOKEN))).await;

    env.add_conflict_event(&event(None, 1));
    env.add_conflict_event(&event(Some("Europe"), 2));

    let response = Client::authenticated(env.bind_address(), VALID_TOKEN).get("conflitti").await;

    let grouped = response.json::<serde_json::Value>().await.unwrap();
    let grouped = grouped.as_object().unwrap();

    assert_eq!(grouped.keys().collect::<Vec<_>>(), vec!["Europe"]);
    assert_eq!(grouped["Europe"].as_array().unwrap().len(), 1);

    env.stop().await;
}

#[tokio::test]
async fn should_return_an_empty_mapping_when_the_table_is_empty() {
    INIT.call_once(|| {
        tracing_stderr_init(LevelFilter::ERROR);
    });

    let env = Started::new(&configuration::ephemeral().into(), Box::new(StubVerifier::accepting(VALID_TOKEN))).await;

    let response = Client::authenticated(env.bind_address(), VALID_TOKEN).get("conflitti").await;

    assert_eq!(response.status(), 200);
    assert_eq!(response.json::<serde_json::Value>().await.unwrap(), json!({}));

    env.stop().await;
}

#[tokio::test]
async fn should_preserve_the_store_order_within_a_group() {
    INIT.call_once(|| {
        tracing_stderr_init(LevelFilter::ERROR);
    });

    let env = Started::new(&configuration::ephemeral().into(), Box::new(StubVerifier::accepting(VALID_TOKEN))).await;

    for id in 1..=3 {
        env.add_conflict_event(&event(Some("X"), id));
    }

    let response = Client::authenticated(env.bind_address(), VALID_TOKEN).get("conflitti").await;

    let grouped = response.json::<serde_json::Value>().await.unwrap();
    let ids: Vec<i64> = grouped["X"]
        .as_array()
        .unwrap()
        .iter()
        .map(|row| row["id"].as_i64().unwrap())
        .collect();

    assert_eq!(ids, vec![1, 2, 3]);

    env.stop().await;
}

#[tokio::test]
async fn should_hide_the_error_internals_behind_a_correlation_id_when_the_store_fails() {
    INIT.call_once(|| {
        tracing_stderr_init(LevelFilter::ERROR);
    });

    let env = Started::new(&configuration::ephemeral().into(), Box::new(StubVerifier::accepting(VALID_TOKEN))).await;

    env.break_the_store();

    let response = Client::authenticated(env.bind_address(), VALID_TOKEN).get("conflitti").await;

    assert_eq!(response.status(), 500);

    let body = response.json::<serde_json::Value>().await.unwrap();

    assert_eq!(
        body["message"],
        json!("Internal server error while retrieving the conflict data.")
    );
    assert!(!body["error_id"].as_str().unwrap().is_empty());
    assert!(
        !body.to_string().contains("no such table"),
        "the raw store error should not leak to the caller"
    );

    env.stop().await;
}
