use conflict_gateway_test_helpers::configuration;
use serde_json::json;
use tracing::level_filters::LevelFilter;

use crate::common::auth::{StubVerifier, VALID_TOKEN};
use crate::common::logging::{tracing_stderr_init, INIT};
use crate::servers::api::client::Client;
use crate::servers::api::Started;

#[tokio::test]
async fn should_answer_without_authentication() {
    INIT.call_once(|| {
        tracing_stderr_init(LevelFilter::ERROR);
    });

    let env = Started::new(&configuration::ephemeral().into(), Box::new(StubVerifier::accepting(VALID_TOKEN))).await;

    let response = Client::new(env.bind_address()).get("health_check").await;

    assert_eq!(response.status(), 200);
    assert_eq!(response.json::<serde_json::Value>().await.unwrap(), json!({"status": "Ok"}));

    env.stop().await;
}
