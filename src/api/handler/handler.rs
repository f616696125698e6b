use crate::api::AppState;
use crate::models::{CliCommandResponse, DatabaseInstance, SendCommandRequest};
use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use log::{debug, info};
use serde_json::json;
use uuid::Uuid;

fn not_found(message: String) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "statusCode": 404,
            "error": "Not Found",
            "message": message,
        })),
    )
        .into_response()
}

pub async fn list_databases_handler(State(state): State<AppState>) -> Json<Vec<DatabaseInstance>> {
    debug!("Listing {} databases", state.fixtures.databases.len());
    Json(state.fixtures.databases.clone())
}

pub async fn create_cli_handler(
    State(state): State<AppState>,
    Path(database_id): Path<String>,
) -> Response {
    if state.fixtures.database(&database_id).is_none() {
        return not_found(format!("Invalid database instance id: {}", database_id));
    }

    let uuid = Uuid::new_v4();
    state.sessions.lock().await.insert(uuid, database_id.clone());
    info!("Created CLI client {} for database '{}'", uuid, database_id);

    (StatusCode::CREATED, Json(json!({ "uuid": uuid }))).into_response()
}

pub async fn send_command_handler(
    State(state): State<AppState>,
    Path((database_id, uuid)): Path<(String, Uuid)>,
    Json(payload): Json<SendCommandRequest>,
) -> Response {
    let owned = state.sessions.lock().await.get(&uuid) == Some(&database_id);
    if !owned {
        return not_found(format!("CLI client {} not found", uuid));
    }

    state.record_command();
    info!("Executing '{}' on database '{}'", payload.command, database_id);
    let reply = state.fixtures.reply_to(&database_id, &payload.command);

    (StatusCode::OK, Json(CliCommandResponse::success(reply))).into_response()
}

pub async fn delete_cli_handler(
    State(state): State<AppState>,
    Path((database_id, uuid)): Path<(String, Uuid)>,
) -> Response {
    let mut sessions = state.sessions.lock().await;
    let affected = match sessions.get(&uuid) {
        Some(owner) if *owner == database_id => {
            sessions.remove(&uuid);
            1
        }
        _ => 0,
    };
    debug!("Deleted CLI client {} ({} affected)", uuid, affected);

    (StatusCode::OK, Json(json!({ "affected": affected }))).into_response()
}
