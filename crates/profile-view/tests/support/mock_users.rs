#![allow(dead_code)]

use std::collections::VecDeque;
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::{Notify, mpsc};
use tokio::task::JoinHandle;
use tokio::time::timeout;

pub const STEP_TIMEOUT: Duration = Duration::from_secs(3);

/// A canned reply for one `GET /users`.
#[derive(Clone)]
pub struct MockReply {
    pub status: StatusCode,
    pub body: String,
    /// When set, the reply waits until [`MockUsersServer::release`] is called.
    pub held: bool,
}

impl MockReply {
    pub fn json(body: impl Into<String>) -> Self {
        Self {
            status: StatusCode::OK,
            body: body.into(),
            held: false,
        }
    }

    pub fn status(status: StatusCode) -> Self {
        Self {
            status,
            body: String::new(),
            held: false,
        }
    }

    pub fn held(mut self) -> Self {
        self.held = true;
        self
    }
}

/// What the server saw for one request.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub path: String,
    pub authorization: Option<String>,
    pub accept: Option<String>,
}

#[derive(Clone)]
struct ServerState {
    replies: Arc<Mutex<VecDeque<MockReply>>>,
    request_tx: mpsc::UnboundedSender<RecordedRequest>,
    release: Arc<Notify>,
}

pub struct MockUsersServer {
    addr: SocketAddr,
    replies: Arc<Mutex<VecDeque<MockReply>>>,
    request_rx: mpsc::UnboundedReceiver<RecordedRequest>,
    release: Arc<Notify>,
    server_task: JoinHandle<()>,
}

impl MockUsersServer {
    pub async fn start() -> std::io::Result<Self> {
        let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).await?;
        let addr = listener.local_addr()?;
        let replies = Arc::new(Mutex::new(VecDeque::new()));
        let (request_tx, request_rx) = mpsc::unbounded_channel();
        let release = Arc::new(Notify::new());

        let state = ServerState {
            replies: Arc::clone(&replies),
            request_tx,
            release: Arc::clone(&release),
        };
        let app = Router::new()
            .route("/users", get(handle_users))
            .fallback(handle_unknown)
            .with_state(state);

        let server_task = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Ok(Self {
            addr,
            replies,
            request_rx,
            release,
            server_task,
        })
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn enqueue(&self, reply: MockReply) {
        self.replies.lock().unwrap().push_back(reply);
    }

    /// Let one held reply go out.
    pub fn release(&self) {
        self.release.notify_one();
    }

    pub async fn recv_request(&mut self) -> RecordedRequest {
        timeout(STEP_TIMEOUT, self.request_rx.recv())
            .await
            .expect("timed out waiting for request")
            .expect("mock server request channel closed")
    }
}

impl Drop for MockUsersServer {
    fn drop(&mut self) {
        self.server_task.abort();
    }
}

fn header_string(headers: &HeaderMap, name: header::HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

async fn handle_users(State(state): State<ServerState>, headers: HeaderMap) -> Response {
    let _ = state.request_tx.send(RecordedRequest {
        path: "/users".to_string(),
        authorization: header_string(&headers, header::AUTHORIZATION),
        accept: header_string(&headers, header::ACCEPT),
    });

    let reply = state
        .replies
        .lock()
        .unwrap()
        .pop_front()
        .unwrap_or_else(|| MockReply::status(StatusCode::SERVICE_UNAVAILABLE));

    if reply.held {
        state.release.notified().await;
    }

    (
        reply.status,
        [(header::CONTENT_TYPE, "application/json")],
        reply.body,
    )
        .into_response()
}

async fn handle_unknown(State(state): State<ServerState>, uri: axum::http::Uri) -> StatusCode {
    let _ = state.request_tx.send(RecordedRequest {
        path: uri.path().to_string(),
        authorization: None,
        accept: None,
    });
    StatusCode::NOT_FOUND
}
