use axum::Router;
use axum::http::{HeaderMap, StatusCode, header};
use axum::routing::post;
use axum::{Json, extract::State};
use serde_json::{Value, json};
use shiok_daily_word::client::{ChatMessage, ChatRequest, SearchRequest};
use shiok_daily_word::{ChatCompletion, DailyWordError, HttpUpstream, WebSearch};
use shiok_domain::config::UpstreamConfig;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

const KEY: &str = "pplx-test-key";

/// Bodies received by the fake upstream, keyed by route.
#[derive(Debug, Default)]
struct Seen {
    chat: Mutex<Vec<Value>>,
    search: Mutex<Vec<Value>>,
}

fn authorized(headers: &HeaderMap) -> bool {
    headers.get(header::AUTHORIZATION).and_then(|v| v.to_str().ok()) == Some("Bearer pplx-test-key")
}

async fn chat(
    State(seen): State<Arc<Seen>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    if !authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, Json(json!({ "error": "bad key" })));
    }
    seen.chat.lock().unwrap().push(body);
    let reply = json!({
        "id": "cmpl-1",
        "choices": [{ "index": 0, "message": { "role": "assistant", "content": "{\"word\":\"OTAH\"}" } }]
    });
    (StatusCode::OK, Json(reply))
}

async fn search(
    State(seen): State<Arc<Seen>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    if !authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, Json(json!({ "error": "bad key" })));
    }
    seen.search.lock().unwrap().push(body);
    (StatusCode::OK, Json(json!({ "results": [{ "title": "Otah otah", "snippet": "Grilled fish cake" }] })))
}

async fn unavailable() -> (StatusCode, &'static str) {
    (StatusCode::SERVICE_UNAVAILABLE, "try later")
}

async fn not_json() -> &'static str {
    "<html>oops</html>"
}

/// Serves the fake upstream on an ephemeral port and returns its base URL.
async fn spawn_upstream(seen: Arc<Seen>) -> String {
    let app = Router::new()
        .route("/chat/completions", post(chat))
        .route("/search", post(search))
        .route("/down/chat/completions", post(unavailable))
        .route("/down/search", post(unavailable))
        .route("/html/search", post(not_json))
        .with_state(seen);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{address}")
}

fn config(base: &str, prefix: &str) -> UpstreamConfig {
    let mut config = UpstreamConfig { timeout_seconds: Some(5), ..UpstreamConfig::default() };
    config.generation.url = format!("{base}{prefix}/chat/completions");
    config.search.url = format!("{base}{prefix}/search");
    config
}

fn chat_request() -> ChatRequest {
    ChatRequest {
        model: "sonar".to_owned(),
        messages: vec![ChatMessage::system("rules"), ChatMessage::user("go")],
        max_tokens: 150,
        temperature: 1.3,
    }
}

#[tokio::test]
async fn chat_completion_sends_bearer_and_returns_first_choice() {
    let seen = Arc::new(Seen::default());
    let base = spawn_upstream(seen.clone()).await;
    let upstream = HttpUpstream::new(&config(&base, ""), KEY).unwrap();

    let text = upstream.complete(&chat_request()).await.unwrap();

    assert_eq!(text, "{\"word\":\"OTAH\"}");
    let bodies = seen.chat.lock().unwrap();
    assert_eq!(bodies[0]["model"], "sonar");
    assert_eq!(bodies[0]["max_tokens"], 150);
    assert_eq!(bodies[0]["messages"][0], json!({ "role": "system", "content": "rules" }));
    assert_eq!(bodies[0]["messages"][1]["role"], "user");
}

#[tokio::test]
async fn search_posts_query_and_returns_raw_payload() {
    let seen = Arc::new(Seen::default());
    let base = spawn_upstream(seen.clone()).await;
    let upstream = HttpUpstream::new(&config(&base, ""), KEY).unwrap();

    let request = SearchRequest { query: "OTAH singapore food dish".to_owned(), max_results: 5 };
    let payload = upstream.search(&request).await.unwrap();

    assert_eq!(payload["results"][0]["title"], "Otah otah");
    assert_eq!(
        seen.search.lock().unwrap()[0],
        json!({ "query": "OTAH singapore food dish", "max_results": 5 })
    );
}

#[tokio::test]
async fn wrong_key_surfaces_the_status() {
    let base = spawn_upstream(Arc::new(Seen::default())).await;
    let upstream = HttpUpstream::new(&config(&base, ""), "someone-else").unwrap();

    let err = upstream.complete(&chat_request()).await.unwrap_err();

    assert!(
        matches!(err, DailyWordError::UpstreamStatus { service: "generation", status: 401, .. }),
        "{err:?}"
    );
}

#[tokio::test]
async fn non_success_statuses_are_errors() {
    let base = spawn_upstream(Arc::new(Seen::default())).await;
    let upstream = HttpUpstream::new(&config(&base, "/down"), KEY).unwrap();

    let chat_err = upstream.complete(&chat_request()).await.unwrap_err();
    let request = SearchRequest { query: "x".to_owned(), max_results: 5 };
    let search_err = upstream.search(&request).await.unwrap_err();

    assert!(matches!(chat_err, DailyWordError::UpstreamStatus { status: 503, .. }));
    assert!(matches!(
        search_err,
        DailyWordError::UpstreamStatus { service: "search", status: 503, .. }
    ));
}

#[tokio::test]
async fn non_json_search_body_is_a_decode_error() {
    let base = spawn_upstream(Arc::new(Seen::default())).await;
    let upstream = HttpUpstream::new(&config(&base, "/html"), KEY).unwrap();

    let request = SearchRequest { query: "x".to_owned(), max_results: 5 };
    let err = upstream.search(&request).await.unwrap_err();

    assert!(matches!(err, DailyWordError::Decode { .. }), "{err:?}");
}

#[tokio::test]
async fn unreachable_upstream_is_a_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    drop(listener);

    let upstream = HttpUpstream::new(&config(&format!("http://{address}"), ""), KEY).unwrap();
    let err = upstream.complete(&chat_request()).await.unwrap_err();

    assert!(matches!(err, DailyWordError::Transport { .. }), "{err:?}");
}
