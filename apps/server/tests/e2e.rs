use quire::domain::config::ApiConfig;
use quire_payments::client::{ChannelNotifier, ConfigPanel, HttpConfigApi, SubmitOutcome};
use quire_server::Server;
use serde_json::{Value, json};
use tokio::net::TcpListener;

async fn spawn(cfg: ApiConfig) -> String {
    let app = Server::builder().config(cfg).build().await.unwrap().into_router();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });

    format!("http://{address}")
}

fn memory_config() -> ApiConfig {
    let mut cfg = ApiConfig::default();
    cfg.database.namespace = "e2e".to_owned();
    cfg
}

#[tokio::test]
async fn health_reports_database_up() {
    let base = spawn(memory_config()).await;

    let response = reqwest::get(format!("{base}/health")).await.unwrap();
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "up");
    assert_eq!(body["database"], "up");
}

#[tokio::test]
async fn articles_are_served_through_the_full_stack() {
    let base = spawn(memory_config()).await;
    let client = reqwest::Client::new();

    let created: Value = client
        .post(format!("{base}/api/articles"))
        .json(&json!({ "data": { "title": "Hello", "slug": "hello" } }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let id = created["data"]["id"].as_str().unwrap().to_owned();

    let listed: Value =
        client.get(format!("{base}/api/articles")).send().await.unwrap().json().await.unwrap();
    assert_eq!(listed["data"][0]["id"], id.as_str());
    assert_eq!(listed["meta"]["pagination"]["total"], 1);

    let missing = client.get(format!("{base}/api/articles/unknown")).send().await.unwrap();
    assert_eq!(missing.status(), 404);
}

#[tokio::test]
async fn payment_settings_round_trip() {
    let base = spawn(memory_config()).await;

    let (notifier, _rx) = ChannelNotifier::new();
    let panel = ConfigPanel::new(HttpConfigApi::new(&base, "payments"), notifier);
    panel.load().await;
    assert_eq!(panel.submit("sk_test_4eC39HqLyjWDarjtT1zdp7dc").await, SubmitOutcome::Saved);

    let (notifier, _rx) = ChannelNotifier::new();
    let reopened = ConfigPanel::new(HttpConfigApi::new(&base, "payments"), notifier);
    reopened.load().await;
    assert_eq!(reopened.masked_key().as_deref(), Some("sk_test_4eC3...p7dc"));
}

#[tokio::test]
async fn disabled_payments_are_not_routed() {
    let mut cfg = memory_config();
    cfg.payments.enabled = false;
    let base = spawn(cfg).await;

    let response = reqwest::get(format!("{base}/payments/config")).await.unwrap();
    assert_eq!(response.status(), 404);
}
