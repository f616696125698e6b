#![allow(dead_code)]

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use redis_gateway::api::{self, AppState, Fixtures};
use reqwest::Url;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

pub const SESSION_ID: &str = "0b5a5f2c-7c1e-4a43-9d0e-8f1b2c3d4e5f";

/// Serves `router` on an ephemeral port and returns its base url.
pub async fn spawn_backend(router: Router) -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    Url::parse(&format!("http://{}", addr)).unwrap()
}

pub async fn spawn_mock(fixtures: Fixtures) -> (AppState, Url) {
    let state = AppState::new(fixtures);
    let url = spawn_backend(api::router(state.clone())).await;
    (state, url)
}

/// Base url of a port nothing listens on.
pub async fn dead_url() -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    Url::parse(&format!("http://{}", addr)).unwrap()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Fault {
    Nothing,
    CreateWrongStatus,
    CreateWithoutUuid,
    SendFails,
    SendHangs,
    DeleteHangs,
    SendAndDeleteHang,
}

/// Backend whose CLI endpoints misbehave on demand and count their calls.
#[derive(Clone)]
pub struct Scripted {
    pub fault: Fault,
    pub databases: Value,
    pub creates: Arc<AtomicUsize>,
    pub sends: Arc<AtomicUsize>,
    pub deletes: Arc<AtomicUsize>,
    pub deleted_sessions: Arc<Mutex<Vec<String>>>,
}

impl Scripted {
    pub fn new(fault: Fault) -> Self {
        Scripted {
            fault,
            databases: json!([{
                "id": "db1",
                "host": "127.0.0.1",
                "port": 6379,
                "modules": [{"name": "search"}]
            }]),
            creates: Arc::new(AtomicUsize::new(0)),
            sends: Arc::new(AtomicUsize::new(0)),
            deletes: Arc::new(AtomicUsize::new(0)),
            deleted_sessions: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn creates(&self) -> usize {
        self.creates.load(Ordering::SeqCst)
    }

    pub fn sends(&self) -> usize {
        self.sends.load(Ordering::SeqCst)
    }

    pub fn deletes(&self) -> usize {
        self.deletes.load(Ordering::SeqCst)
    }

    pub fn router(&self) -> Router {
        Router::new()
            .route("/databases", get(scripted_databases))
            .route("/databases/{id}/cli", post(scripted_create))
            .route("/databases/{id}/cli/{uuid}/send-command", post(scripted_send))
            .route("/databases/{id}/cli/{uuid}", delete(scripted_delete))
            .with_state(self.clone())
    }
}

async fn hang() {
    tokio::time::sleep(Duration::from_secs(10)).await;
}

async fn scripted_databases(State(state): State<Scripted>) -> Json<Value> {
    Json(state.databases.clone())
}

async fn scripted_create(State(state): State<Scripted>) -> Response {
    state.creates.fetch_add(1, Ordering::SeqCst);
    match state.fault {
        Fault::CreateWrongStatus => {
            (StatusCode::OK, Json(json!({"uuid": SESSION_ID}))).into_response()
        }
        Fault::CreateWithoutUuid => (StatusCode::CREATED, Json(json!({}))).into_response(),
        _ => (StatusCode::CREATED, Json(json!({"uuid": SESSION_ID}))).into_response(),
    }
}

async fn scripted_send(State(state): State<Scripted>, Json(body): Json<Value>) -> Response {
    state.sends.fetch_add(1, Ordering::SeqCst);
    match state.fault {
        Fault::SendFails => (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response(),
        Fault::SendHangs | Fault::SendAndDeleteHang => {
            hang().await;
            StatusCode::OK.into_response()
        }
        _ => Json(json!({"response": body, "status": "success"})).into_response(),
    }
}

async fn scripted_delete(
    State(state): State<Scripted>,
    Path((_id, uuid)): Path<(String, String)>,
) -> Response {
    state.deletes.fetch_add(1, Ordering::SeqCst);
    state.deleted_sessions.lock().unwrap().push(uuid);
    if matches!(state.fault, Fault::DeleteHangs | Fault::SendAndDeleteHang) {
        hang().await;
    }
    StatusCode::OK.into_response()
}

/// Backend answering `GET /databases` with a fixed status and body.
pub fn databases_reply(status: StatusCode, body: Value) -> Router {
    Router::new().route(
        "/databases",
        get(move || {
            let body = body.clone();
            async move { (status, Json(body)) }
        }),
    )
}
