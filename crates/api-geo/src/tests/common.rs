#![allow(clippy::unwrap_used, clippy::expect_used)]

use reqwest::StatusCode;
use reqwest::header::CONTENT_TYPE;
use std::net::SocketAddr;

#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub body: String,
}

impl TestResponse {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body)
            .unwrap_or_else(|err| panic!("Invalid JSON ({err}): {}", self.body))
    }
}

async fn into_test_response(response: reqwest::Response) -> TestResponse {
    let status = response.status();
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .map(|value| value.to_str().unwrap().to_string());
    let body = response.text().await.expect("Failed to get response text");
    TestResponse {
        status,
        content_type,
        body,
    }
}

pub async fn get(addr: SocketAddr, path: &str) -> TestResponse {
    let response = reqwest::Client::new()
        .get(format!("http://{addr}{path}"))
        .send()
        .await
        .expect("Failed to send request");
    into_test_response(response).await
}

pub async fn post_sql(addr: SocketAddr, sql: &str) -> TestResponse {
    post_body(addr, sql.as_bytes().to_vec()).await
}

pub async fn post_body(addr: SocketAddr, body: Vec<u8>) -> TestResponse {
    let response = reqwest::Client::new()
        .post(format!("http://{addr}/api/query"))
        .header(CONTENT_TYPE, "text/plain")
        .body(body)
        .send()
        .await
        .expect("Failed to send request");
    into_test_response(response).await
}
