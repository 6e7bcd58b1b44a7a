#![allow(dead_code)]

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;

use chat_translate_relay::build_app;
use chat_translate_relay::config::Config;
use chat_translate_relay::state::AppState;

#[derive(Clone, Copy)]
pub enum ProviderMode {
    /// 200 with a canned completion
    Ok,
    /// 500 with an OpenAI-style error object
    Fault,
    /// 200 with an empty `choices` list
    NoChoices,
}

#[derive(Clone)]
struct ProviderState {
    mode: ProviderMode,
    calls: Arc<AtomicUsize>,
    requests: Arc<Mutex<Vec<Value>>>,
}

/// Local stand-in for an OpenAI-compatible `chat/completions` endpoint.
pub struct MockProvider {
    pub base_url: String,
    calls: Arc<AtomicUsize>,
    requests: Arc<Mutex<Vec<Value>>>,
}

impl MockProvider {
    pub async fn spawn(mode: ProviderMode) -> Self {
        let calls = Arc::new(AtomicUsize::new(0));
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = ProviderState {
            mode,
            calls: calls.clone(),
            requests: requests.clone(),
        };
        let app = Router::new()
            .route("/v1/chat/completions", post(mock_chat_completion))
            .with_state(state);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}/v1", addr),
            calls,
            requests,
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<Value> {
        self.requests.lock().unwrap().clone()
    }
}

async fn mock_chat_completion(
    State(state): State<ProviderState>,
    Json(request): Json<Value>,
) -> (StatusCode, Json<Value>) {
    state.calls.fetch_add(1, Ordering::SeqCst);
    let model = request["model"].clone();
    state.requests.lock().unwrap().push(request);

    match state.mode {
        ProviderMode::Ok => (
            StatusCode::OK,
            Json(json!({
                "id": "chatcmpl-1234567890",
                "object": "chat.completion",
                "created": 1697042000,
                "model": model,
                "choices": [{
                    "index": 0,
                    "message": { "role": "assistant", "content": "こんにちは、世界！" },
                    "finish_reason": "stop"
                }],
                "usage": { "prompt_tokens": 9, "completion_tokens": 7, "total_tokens": 16 }
            })),
        ),
        ProviderMode::Fault => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": { "message": "The server had an error", "type": "server_error" } })),
        ),
        ProviderMode::NoChoices => (StatusCode::OK, Json(json!({ "choices": [] }))),
    }
}

#[derive(Clone)]
struct ReceiverState {
    hits: Arc<AtomicUsize>,
    tx: mpsc::UnboundedSender<Value>,
}

/// Local stand-in for the chat platform's response_url.
pub struct CallbackReceiver {
    pub url: String,
    hits: Arc<AtomicUsize>,
    rx: mpsc::UnboundedReceiver<Value>,
}

impl CallbackReceiver {
    pub async fn spawn() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let hits = Arc::new(AtomicUsize::new(0));
        let app = Router::new()
            .route("/hook", post(record))
            .with_state(ReceiverState {
                hits: hits.clone(),
                tx,
            });
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            url: format!("http://{}/hook", addr),
            hits,
            rx,
        }
    }

    pub async fn next_payload(&mut self) -> Value {
        tokio::time::timeout(Duration::from_secs(5), self.rx.recv())
            .await
            .expect("timed out waiting for callback")
            .expect("callback receiver closed")
    }

    pub async fn assert_quiet(&mut self) {
        let extra = tokio::time::timeout(Duration::from_millis(200), self.rx.recv()).await;
        assert!(extra.is_err(), "unexpected extra callback: {:?}", extra);
    }

    pub fn hit_count(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

async fn record(State(state): State<ReceiverState>, Json(body): Json<Value>) -> StatusCode {
    state.hits.fetch_add(1, Ordering::SeqCst);
    let _ = state.tx.send(body);
    StatusCode::OK
}

pub fn config_for(provider: &MockProvider) -> Config {
    let mut config = Config::default();
    config.llm_config.llm_provider = "openai_compatible_llm".to_string();
    config.llm_config.base_url = provider.base_url.clone();
    config.llm_config.llm_api_key = "test-key".to_string();
    config.llm_config.request_timeout_secs = 5;
    config.callback_config.timeout_secs = 2;
    config.callback_config.start_message = "Translating...".to_string();
    config
}

/// Serves the full application on an ephemeral port and returns its base URL.
pub async fn serve_app(config: Config) -> String {
    let state = AppState::new(&config).unwrap();
    let app = build_app(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}
