#[allow(dead_code)]
mod common;

use common::{TestServer, get_json, post_json, wait_for_json};
use serde_json::json;

async fn put_json(url: &str, body: serde_json::Value) -> (u16, serde_json::Value) {
    let resp = reqwest::Client::new()
        .put(url)
        .json(&body)
        .send()
        .await
        .unwrap();
    let status = resp.status().as_u16();
    (status, resp.json().await.unwrap_or(serde_json::Value::Null))
}

#[tokio::test]
async fn new_session_is_seeded() {
    let server = TestServer::new().await;
    let (status, body) = get_json(&server.api("/agents/1/playground")).await;
    assert_eq!(status, 200);
    assert_eq!(body["rendered_prompt"], "What is the capital of India?");
    assert_eq!(body["history"].as_array().unwrap().len(), 1);
    assert_eq!(body["running"], false);
}

#[tokio::test]
async fn run_completes_into_history() {
    let server = TestServer::new().await;
    put_json(
        &server.api("/agents/1/playground"),
        json!({"variables": [{"key": "country", "value": "France"}]}),
    )
    .await;

    let (status, run) = post_json(&server.api("/agents/1/playground/runs"), None).await;
    assert_eq!(status, 202);
    assert_eq!(run["prompt"], "What is the capital of France?");

    let body = wait_for_json(&server.api("/agents/1/playground"), |b| {
        b["history"].as_array().is_some_and(|h| h.len() == 2)
    })
    .await;
    assert_eq!(body["history"][0]["id"], run["id"]);
    assert_eq!(body["history"][0]["status"], "success");
    assert_eq!(body["running"], false);

    let cost = body["history"][0]["cost"].as_f64().unwrap();
    assert!((0.0..0.001).contains(&cost));
}

#[tokio::test]
async fn overlapping_runs_both_complete() {
    let server = TestServer::new().await;
    let (_, first) = post_json(&server.api("/agents/2/playground/runs"), None).await;
    let (_, second) = post_json(&server.api("/agents/2/playground/runs"), None).await;
    assert_ne!(first["id"], second["id"]);

    let body = wait_for_json(&server.api("/agents/2/playground"), |b| {
        b["history"].as_array().is_some_and(|h| h.len() == 3)
    })
    .await;
    assert_eq!(body["history"].as_array().unwrap().len(), 3);
    assert!(body["in_flight"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn cancelled_run_is_never_recorded() {
    let config = agenthub_server::config::ServerConfig {
        playground: agenthub_server::config::PlaygroundConfig {
            simulated_latency_ms: 300,
            ..Default::default()
        },
        ..common::fast_config()
    };
    let server = TestServer::from_config(config).await;

    let (_, run) = post_json(&server.api("/agents/3/playground/runs"), None).await;
    let run_id = run["id"].as_str().unwrap();
    let url = server.api(&format!("/agents/3/playground/runs/{run_id}"));

    let client = reqwest::Client::new();
    let resp = client.delete(&url).send().await.unwrap();
    assert_eq!(resp.status().as_u16(), 204);
    let resp = client.delete(&url).send().await.unwrap();
    assert_eq!(resp.status().as_u16(), 404);

    tokio::time::sleep(std::time::Duration::from_millis(500)).await;
    let (_, body) = get_json(&server.api("/agents/3/playground")).await;
    assert_eq!(body["history"].as_array().unwrap().len(), 1);
    assert_eq!(body["running"], false);

    let (_, events) = get_json(&server.api("/events")).await;
    assert_eq!(events["events"].as_array().unwrap().len(), 1);
    assert_eq!(events["events"][0]["kind"], "playground.cancelled");
}

#[tokio::test]
async fn unknown_agent_and_empty_prompt() {
    let server = TestServer::new().await;
    let (status, _) = get_json(&server.api("/agents/99/playground")).await;
    assert_eq!(status, 404);
    let (status, _) = post_json(&server.api("/agents/99/playground/runs"), None).await;
    assert_eq!(status, 404);

    let (status, body) = put_json(
        &server.api("/agents/1/playground"),
        json!({"user_prompt": "   ", "variables": []}),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["user_prompt"], "   ");

    let (status, body) = post_json(&server.api("/agents/1/playground/runs"), None).await;
    assert_eq!(status, 400);
    assert_eq!(body["error"], "user prompt is empty");
}
