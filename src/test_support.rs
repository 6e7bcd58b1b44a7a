use async_trait::async_trait;
use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, Mutex};

use crate::llm::{ChatMessage, LlmError, StatelessLLMInterface};

#[derive(Clone)]
struct ReceiverState {
    status: StatusCode,
    hits: Arc<AtomicUsize>,
    tx: mpsc::UnboundedSender<Value>,
}

/// Local HTTP server standing in for a chat callback endpoint.
pub struct CallbackReceiver {
    pub url: String,
    pub hits: Arc<AtomicUsize>,
    rx: Mutex<mpsc::UnboundedReceiver<Value>>,
}

impl CallbackReceiver {
    pub async fn spawn() -> Self {
        Self::spawn_with_status(StatusCode::OK).await
    }

    pub async fn spawn_with_status(status: StatusCode) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let hits = Arc::new(AtomicUsize::new(0));
        let state = ReceiverState {
            status,
            hits: hits.clone(),
            tx,
        };
        let app = Router::new()
            .route("/callback", post(record))
            .with_state(state);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            url: format!("http://{}/callback", addr),
            hits,
            rx: Mutex::new(rx),
        }
    }

    /// Waits for the next posted payload.
    pub async fn next_payload(&self) -> Value {
        let mut rx = self.rx.lock().await;
        tokio::time::timeout(Duration::from_secs(5), rx.recv())
            .await
            .expect("timed out waiting for callback")
            .expect("callback receiver closed")
    }

    /// Asserts nothing else arrives within a short grace period.
    pub async fn assert_quiet(&self) {
        let mut rx = self.rx.lock().await;
        let extra = tokio::time::timeout(Duration::from_millis(200), rx.recv()).await;
        assert!(extra.is_err(), "unexpected extra callback: {:?}", extra);
    }

    pub fn hit_count(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

async fn record(State(state): State<ReceiverState>, Json(body): Json<Value>) -> StatusCode {
    state.hits.fetch_add(1, Ordering::SeqCst);
    let _ = state.tx.send(body);
    state.status
}

/// URL on a port nothing listens on
pub async fn unreachable_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/callback", addr)
}

pub enum FakeReply {
    Echo,
    Upstream,
    Panic,
}

/// In-process completion provider that counts its calls.
pub struct CountingLLM {
    reply: FakeReply,
    delay: Duration,
    pub calls: AtomicUsize,
}

impl CountingLLM {
    pub fn new(reply: FakeReply) -> Arc<Self> {
        Self::with_delay(reply, Duration::ZERO)
    }

    pub fn with_delay(reply: FakeReply, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            reply,
            delay,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StatelessLLMInterface for CountingLLM {
    async fn chat_completion(&self, messages: Vec<ChatMessage>) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        match self.reply {
            FakeReply::Echo => {
                let user = messages.last().map(|m| m.content.clone()).unwrap_or_default();
                let text = user.rsplit("\n\n").next().unwrap_or_default().to_string();
                Ok(format!("[translated] {}", text))
            }
            FakeReply::Upstream => Err(LlmError::Upstream {
                status: 503,
                message: "service unavailable".to_string(),
            }),
            FakeReply::Panic => panic!("provider exploded"),
        }
    }
}
