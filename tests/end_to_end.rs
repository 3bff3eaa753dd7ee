// End-to-end tests against a real listener on an ephemeral port

use std::net::SocketAddr;

use reqwest::{Client, StatusCode};
use tokio::net::TcpListener;

use timestore::app::build_app;
use timestore::codec::WireFormat;
use timestore::config::AppConfig;
use timestore::state::{AppState, TimestampStore};

async fn start_server(format: WireFormat) -> SocketAddr {
    let cfg = AppConfig {
        wire_format: format,
        ..AppConfig::default()
    };
    let store = TimestampStore::spawn(cfg.mailbox_capacity).await.unwrap();
    let app = build_app(AppState::new(store, format), cfg);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

#[tokio::test]
async fn test_set_and_get_over_http() {
    let addr = start_server(WireFormat::Text).await;
    let client = Client::new();

    let res = client
        .post(format!("http://{addr}/setTime"))
        .body("1700000000")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.text().await.unwrap().is_empty());

    let res = client
        .get(format!("http://{addr}/getTime"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await.unwrap(), "1700000000");
}

#[tokio::test]
async fn test_bad_body_and_wrong_method() {
    let addr = start_server(WireFormat::Text).await;
    let client = Client::new();

    let res = client
        .post(format!("http://{addr}/setTime"))
        .body("not-a-number")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = client
        .get(format!("http://{addr}/setTime"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_concurrent_clients_see_a_written_value() {
    let addr = start_server(WireFormat::Text).await;
    let client = Client::new();

    let mut tasks = tokio::task::JoinSet::new();
    for secs in [1_000_i64, 2_000, 3_000, 4_000] {
        let client = client.clone();
        tasks.spawn(async move {
            let res = client
                .post(format!("http://{addr}/setTime"))
                .body(secs.to_string())
                .send()
                .await
                .unwrap();
            assert_eq!(res.status(), StatusCode::OK);
        });
    }
    while let Some(joined) = tasks.join_next().await {
        joined.unwrap();
    }

    let body = client
        .get(format!("http://{addr}/getTime"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(["1000", "2000", "3000", "4000"].contains(&body.as_str()), "got {body}");
}

#[tokio::test]
async fn test_json_format_over_http() {
    let addr = start_server(WireFormat::Json).await;
    let client = Client::new();

    let res = client
        .post(format!("http://{addr}/setTime"))
        .json(&serde_json::json!({ "time": "2023-11-14T22:13:20Z" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = client
        .get(format!("http://{addr}/getTime"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.headers()[reqwest::header::CONTENT_TYPE],
        "application/json"
    );
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["time"], "2023-11-14T22:13:20Z");
}

#[tokio::test]
async fn test_system_routes_report_ready() {
    let addr = start_server(WireFormat::Text).await;

    let res = reqwest::get(format!("http://{addr}/system/ready")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await.unwrap(), "READY");
}
