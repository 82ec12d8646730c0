use std::net::SocketAddr;

use reqwest::Response;

/// A thin HTTP client for the gateway API under test.
pub struct Client {
    base_url: String,
    token: Option<String>,
    client: reqwest::Client,
}

impl Client {
    /// A client without credentials.
    pub fn new(bind_address: SocketAddr) -> Self {
        Self {
            base_url: format!("http://{bind_address}"),
            token: None,
            client: reqwest::Client::new(),
        }
    }

    /// A client sending a bearer token with every request.
    pub fn authenticated(bind_address: SocketAddr, token: &str) -> Self {
        Self {
            base_url: format!("http://{bind_address}"),
            token: Some(token.to_owned()),
            client: reqwest::Client::new(),
        }
    }

    pub async fn get(&self, path: &str) -> Response {
        let mut builder = self.client.get(format!("{}/{path}", self.base_url));

        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }

        builder.send().await.expect("it should get a response")
    }

    /// A request with a raw `Authorization` header value, bypassing the
    /// bearer scheme.
    pub async fn get_with_authorization_header(&self, path: &str, header_value: &str) -> Response {
        self.client
            .get(format!("{}/{path}", self.base_url))
            .header(reqwest::header::AUTHORIZATION, header_value)
            .send()
            .await
            .expect("it should get a response")
    }
}
