use org_messages_core::{MessagesRepositories, MessagesService};

/// Application state shared across request handlers
#[derive(Clone)]
pub struct AppState {
    pub service: MessagesService,
}

impl AppState {
    pub fn new(service: MessagesService) -> Self {
        Self { service }
    }

    /// Shutdown the underlying database pool, if any
    pub async fn shutdown(&self) {
        self.service.shutdown_pool().await
    }
}

impl From<MessagesRepositories> for AppState {
    fn from(repositories: MessagesRepositories) -> Self {
        AppState::new(repositories.into())
    }
}
