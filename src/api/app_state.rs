use super::fixtures::Fixtures;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

// Shared state of the mock backend: canned data plus the open CLI sessions,
// each mapped to the database it was created for.
#[derive(Clone)]
pub struct AppState {
    pub fixtures: Arc<Fixtures>,
    pub sessions: Arc<Mutex<HashMap<Uuid, String>>>,
    commands_sent: Arc<AtomicUsize>,
}

impl AppState {
    pub fn new(fixtures: Fixtures) -> Self {
        AppState {
            fixtures: Arc::new(fixtures),
            sessions: Arc::new(Mutex::new(HashMap::new())),
            commands_sent: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub async fn open_sessions(&self) -> usize {
        self.sessions.lock().await.len()
    }

    pub fn commands_sent(&self) -> usize {
        self.commands_sent.load(Ordering::SeqCst)
    }

    pub(crate) fn record_command(&self) {
        self.commands_sent.fetch_add(1, Ordering::SeqCst);
    }
}
