//! Integration tests delivering real HTTP requests to a loopback webhook.

use std::sync::{Arc, Mutex};

use axum::extract::Json;
use axum::http::StatusCode;
use axum::routing::post;
use axum::Router;
use tokio::net::TcpListener;

use ci_notify::{Alert, NotifyError, SlackMessage, SlackNotifier};

/// Captured request bodies, in arrival order.
type Received = Arc<Mutex<Vec<serde_json::Value>>>;

/// Spawn a webhook server on a random loopback port that records every
/// payload and answers with the given status and body.
async fn spawn_webhook(status: StatusCode, body: &'static str) -> (String, Received) {
    let received: Received = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&received);

    let app = Router::new().route(
        "/hook",
        post(move |Json(payload): Json<serde_json::Value>| {
            let sink = Arc::clone(&sink);
            async move {
                sink.lock().unwrap().push(payload);
                (status, body)
            }
        }),
    );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}/hook"), received)
}

fn sample_message() -> SlackMessage {
    SlackMessage::from(Alert {
        message: "semgrep found 2 findings".to_string(),
        action_link: "https://github.com/acme/repo/actions/runs/7".to_string(),
        branch: "feature/scan".to_string(),
        ..Alert::default()
    })
}

#[tokio::test]
async fn send_succeeds_on_200() {
    let (url, received) = spawn_webhook(StatusCode::OK, "ok").await;

    let notifier = SlackNotifier::new(url);
    notifier.send(&sample_message()).await.unwrap();

    let payloads = received.lock().unwrap();
    assert_eq!(payloads.len(), 1);

    let payload = &payloads[0];
    assert_eq!(payload["username"], "Github Actions Bot");
    assert_eq!(payload["icon_emoji"], ":sos:");
    assert_eq!(payload["channel"], "#alert-test");

    let fields = payload["attachments"][0]["fields"].as_array().unwrap();
    assert_eq!(fields.len(), 3);
    assert_eq!(fields[0]["title"], "Github Actions Vulnerability Alert");
    assert_eq!(fields[0]["value"], "semgrep found 2 findings");
    assert_eq!(fields[0]["short"], true);
    assert_eq!(fields[1]["title"], "Action URL");
    assert_eq!(fields[2]["title"], "Branch");
    assert_eq!(fields[2]["value"], "feature/scan");
}

#[tokio::test]
async fn send_fails_on_500_with_status_and_body() {
    let (url, _received) = spawn_webhook(StatusCode::INTERNAL_SERVER_ERROR, "boom").await;

    let notifier = SlackNotifier::new(url);
    let err = notifier.send(&sample_message()).await.unwrap_err();

    match err {
        NotifyError::Status { status, body } => {
            assert_eq!(status, reqwest::StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(body, "boom");
        }
        other => panic!("expected Status error, got: {other:?}"),
    }
}

#[tokio::test]
async fn send_treats_non_200_success_codes_as_failure() {
    // The webhook contract is exactly 200, not any 2xx.
    let (url, _received) = spawn_webhook(StatusCode::NO_CONTENT, "").await;

    let notifier = SlackNotifier::new(url);
    let err = notifier.send(&sample_message()).await.unwrap_err();

    match err {
        NotifyError::Status { status, .. } => {
            assert_eq!(status, reqwest::StatusCode::NO_CONTENT);
        }
        other => panic!("expected Status error, got: {other:?}"),
    }
}

#[tokio::test]
async fn send_fails_on_connection_refused() {
    // Bind then drop a listener so the port is known-dead.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let notifier = SlackNotifier::new(format!("http://{addr}/hook"));
    let err = notifier.send(&sample_message()).await.unwrap_err();
    assert!(matches!(err, NotifyError::Http(_)));
}
