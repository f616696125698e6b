// src/api/mod.rs
//
// Mock of the backend HTTP surface, serving canned data.

pub mod app_state;
pub mod fixtures;
pub mod handler;

pub use app_state::AppState;
pub use fixtures::Fixtures;

use axum::{
    routing::{get, post},
    Router,
};
use handler::{create_cli_handler, delete_cli_handler, list_databases_handler, send_command_handler};
use tokio::net::TcpListener;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/databases", get(list_databases_handler))
        .route("/databases/{id}/cli", post(create_cli_handler))
        .route(
            "/databases/{id}/cli/{uuid}/send-command",
            post(send_command_handler),
        )
        .route(
            "/databases/{id}/cli/{uuid}",
            axum::routing::delete(delete_cli_handler),
        )
        .with_state(state)
}

pub async fn serve(listener: TcpListener, state: AppState) -> std::io::Result<()> {
    axum::serve(listener, router(state)).await
}
