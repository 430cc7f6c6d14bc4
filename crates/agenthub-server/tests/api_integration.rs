#[allow(dead_code)]
mod common;

use common::{TestServer, get_json, post_json, wait_for_json};

#[tokio::test]
async fn server_responds_on_root() {
    let server = TestServer::new().await;
    let resp = reqwest::get(&server.base_url()).await.unwrap();
    // 200 when index.html exists, otherwise 404
    assert!(
        resp.status().is_success() || resp.status().as_u16() == 404,
        "Unexpected status: {}",
        resp.status()
    );
}

#[tokio::test]
async fn health_reports_agents() {
    let server = TestServer::new().await;
    let (status, body) = get_json(&format!("{}/health", server.base_url())).await;
    assert_eq!(status, 200);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["agents"], 6);
}

#[tokio::test]
async fn list_sorted_by_performance() {
    let server = TestServer::new().await;
    let (status, body) = get_json(&server.api("/agents?sort=performance")).await;
    assert_eq!(status, 200);
    assert_eq!(body["total"], 6);
    assert_eq!(body["agents"][0]["name"], "Data Analyst");
    assert_eq!(body["agents"][0]["performance"]["successRate"], 96.1);
}

#[tokio::test]
async fn list_filters_by_query() {
    let server = TestServer::new().await;
    let (_, body) = get_json(&server.api("/agents?q=support")).await;
    let agents = body["agents"].as_array().unwrap();
    assert_eq!(agents.len(), 1);
    assert_eq!(agents[0]["name"], "Customer Support Bot");
    assert_eq!(body["shown"], 1);
}

#[tokio::test]
async fn unknown_sort_key_is_bad_request() {
    let server = TestServer::new().await;
    let (status, body) = get_json(&server.api("/agents?sort=price")).await;
    assert_eq!(status, 400);
    assert!(body["error"].as_str().unwrap().contains("price"));
}

#[tokio::test]
async fn start_then_stop_leaves_agent_inactive() {
    let server = TestServer::new().await;

    let (status, body) = post_json(&server.api("/agents/5/start"), None).await;
    assert_eq!(status, 200);
    assert_eq!(body["from"], "error");
    assert_eq!(body["to"], "active");

    let (status, _) = post_json(&server.api("/agents/5/stop"), None).await;
    assert_eq!(status, 200);

    let (_, agent) = get_json(&server.api("/agents/5")).await;
    assert_eq!(agent["status"], "inactive");

    let (_, metrics) = get_json(&server.api("/metrics")).await;
    assert_eq!(metrics["activeAgents"], 3);
    assert_eq!(metrics["byStatus"]["inactive"], 1);
}

#[tokio::test]
async fn unknown_agent_is_not_found() {
    let server = TestServer::new().await;
    let (status, body) = post_json(&server.api("/agents/99/start"), None).await;
    assert_eq!(status, 404);
    assert_eq!(body["error"], "agent 99 not found");

    let (status, _) = get_json(&server.api("/agents/99")).await;
    assert_eq!(status, 404);

    let (_, list) = get_json(&server.api("/agents")).await;
    assert_eq!(list["total"], 6);
}

#[tokio::test]
async fn status_change_raises_notification() {
    let server = TestServer::new().await;
    post_json(&server.api("/agents/1/stop"), None).await;

    let (_, body) = get_json(&server.api("/notifications")).await;
    let visible = body["visible"].as_array().unwrap();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0]["title"], "Agent stopped");
    assert_eq!(visible[0]["level"], "success");

    let id = visible[0]["id"].as_str().unwrap();
    let dismiss_url = server.api(&format!("/notifications/{id}/dismiss"));
    let (status, body) = post_json(&dismiss_url, None).await;
    assert_eq!(status, 200);
    assert!(body["visible"].as_array().unwrap().is_empty());

    let (status, _) = post_json(&dismiss_url, None).await;
    assert_eq!(status, 404);
}

#[tokio::test]
async fn notifications_overflow_into_pending() {
    let server = TestServer::new().await;
    for id in ["1", "2", "3", "4"] {
        post_json(&server.api(&format!("/agents/{id}/stop")), None).await;
    }
    let (_, body) = get_json(&server.api("/notifications")).await;
    assert_eq!(body["visible"].as_array().unwrap().len(), 3);
    assert_eq!(body["pending"], 1);
}

#[tokio::test]
async fn clearing_notifications_empties_queue() {
    let server = TestServer::new().await;
    for id in ["1", "2", "3", "4"] {
        post_json(&server.api(&format!("/agents/{id}/stop")), None).await;
    }
    let resp = reqwest::Client::new()
        .delete(server.api("/notifications"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 204);

    let (_, body) = get_json(&server.api("/notifications")).await;
    assert!(body["visible"].as_array().unwrap().is_empty());
    assert_eq!(body["pending"], 0);
}

#[tokio::test]
async fn ready_once_agents_are_loaded() {
    let server = TestServer::new().await;
    let resp = reqwest::get(format!("{}/ready", server.base_url())).await.unwrap();
    assert_eq!(resp.status().as_u16(), 200);
    assert_eq!(resp.text().await.unwrap(), "ready");
}

#[tokio::test]
async fn costs_filter_and_summarize() {
    let server = TestServer::new().await;
    let (status, body) = get_json(&server.api("/costs?type=Tool&status=all")).await;
    assert_eq!(status, 200);
    assert_eq!(body["entries"].as_array().unwrap().len(), 2);
    assert_eq!(body["summary"]["total_estimated"], 900.0);
    assert_eq!(body["summary"]["remaining_budget"], 1100.0);

    let (status, _) = get_json(&server.api("/costs?type=gpu")).await;
    assert_eq!(status, 400);
}

#[tokio::test]
async fn incidents_search_and_rca() {
    let server = TestServer::new().await;
    let (_, body) = get_json(&server.api("/incidents?search=timeout")).await;
    assert_eq!(body["executions"].as_array().unwrap().len(), 1);
    assert_eq!(body["summary"]["total"], 3);
    assert_eq!(body["recommended_rollback"], "v2.4.1");

    let (status, _) = post_json(&server.api("/incidents/fe1/rca"), None).await;
    assert_eq!(status, 202);
    let (_, events) = get_json(&server.api("/events")).await;
    assert_eq!(events["events"][0]["title"], "RCA Analysis Started");

    let (status, _) = post_json(&server.api("/incidents/nope/rca"), None).await;
    assert_eq!(status, 404);
}

#[tokio::test]
async fn rollback_completes_in_background() {
    let server = TestServer::new().await;
    let (status, body) = post_json(&server.api("/incidents/rollback/v2.4.1"), None).await;
    assert_eq!(status, 202);
    assert_eq!(body["target"], "v2.4.1");

    let events = wait_for_json(&server.api("/events"), |b| {
        b["events"][0]["title"] == "Rollback Completed"
    })
    .await;
    assert_eq!(events["events"][0]["kind"], "incident.rollback_completed");
    assert_eq!(events["events"][1]["title"], "Initiating Rollback");

    let (status, _) = post_json(&server.api("/incidents/rollback/v0.0.1"), None).await;
    assert_eq!(status, 404);
}

#[tokio::test]
async fn rollback_toasts_name_the_version() {
    let server = TestServer::new().await;
    post_json(&server.api("/incidents/rollback/v2.4.1"), None).await;
    let body = wait_for_json(&server.api("/notifications"), |b| {
        b["visible"].as_array().is_some_and(|v| v.len() == 2)
    })
    .await;
    assert_eq!(body["visible"][0]["description"], "Rolling back to version v2.4.1...");
    assert_eq!(body["visible"][1]["description"], "Successfully rolled back to version v2.4.1");
}

#[tokio::test]
async fn incident_settings_round_trip_through_panel() {
    let server = TestServer::new().await;
    let (_, body) = get_json(&server.api("/incidents")).await;
    assert_eq!(body["settings"]["auto_rollback_enabled"], true);

    let resp = reqwest::Client::new()
        .put(server.api("/incidents/settings"))
        .json(&serde_json::json!({"slo_auto_actions": false}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 200);

    let (_, body) = get_json(&server.api("/incidents")).await;
    assert_eq!(body["settings"]["auto_rollback_enabled"], true);
    assert_eq!(body["settings"]["slo_auto_actions"], false);
}

#[tokio::test]
async fn onboarding_skip_hides_tour() {
    let server = TestServer::new().await;
    let (_, body) = get_json(&server.api("/onboarding")).await;
    assert_eq!(body["show"], true);
    assert_eq!(body["total_steps"], 6);

    let (_, body) = post_json(&server.api("/onboarding/steps/3"), None).await;
    assert_eq!(body["step"]["title"], "Playground Testing");

    let (_, body) = post_json(&server.api("/onboarding/skip"), None).await;
    assert_eq!(body["show"], false);
}

#[tokio::test]
async fn onboarding_finish_persists_flag_file() {
    let path = std::env::temp_dir().join(format!("agenthub-flags-{}.json", uuid::Uuid::new_v4()));
    let config = agenthub_server::config::ServerConfig {
        onboarding: agenthub_server::config::OnboardingConfig {
            flag_path: Some(path.display().to_string()),
        },
        ..common::fast_config()
    };
    let server = TestServer::from_config(config).await;

    for _ in 0..5 {
        post_json(&server.api("/onboarding/next"), None).await;
    }
    let (_, body) = post_json(&server.api("/onboarding/next"), None).await;
    assert_eq!(body["show"], false);

    let content = std::fs::read_to_string(&path).unwrap();
    let flags: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(flags["agenthub-tutorial-completed"], "true");
    let _ = std::fs::remove_file(path);
}
