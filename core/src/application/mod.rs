use sqlx::{
    PgPool,
    postgres::{PgConnectOptions, PgPoolOptions},
};

use crate::{
    domain::{
        common::{CoreError, services::Service},
        health::{
            entities::IsHealthy,
            port::{HealthRepository, InMemoryHealthRepository},
        },
        message::{
            entities::{Message, MessageId, NewMessage, OrganizationId},
            ports::MessageRepository,
        },
    },
    infrastructure::{
        health::repositories::postgres::PostgresHealthRepository,
        message::repositories::{
            memory::InMemoryMessageRepository, postgres::PostgresMessageRepository,
        },
    },
};

/// Concrete service type used by the API, whichever storage backend is selected.
pub type MessagesService = Service<MessageStore, HealthStore>;

/// Storage backend selected at startup.
#[derive(Clone)]
pub enum MessageStore {
    Postgres(PostgresMessageRepository),
    InMemory(InMemoryMessageRepository),
}

#[derive(Clone)]
pub enum HealthStore {
    Postgres(PostgresHealthRepository),
    InMemory(InMemoryHealthRepository),
}

#[derive(Clone)]
pub struct MessagesRepositories {
    pool: Option<PgPool>,
    pub message_repository: MessageStore,
    pub health_repository: HealthStore,
}

/// Connects to Postgres and applies the embedded migrations.
pub async fn create_repositories(
    pg_connection_options: PgConnectOptions,
) -> Result<MessagesRepositories, CoreError> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect_with(pg_connection_options)
        .await
        .map_err(|e| CoreError::ServiceUnavailable(e.to_string()))?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(|e| CoreError::DatabaseError { msg: e.to_string() })?;
    tracing::info!("Database migrations applied");

    Ok(MessagesRepositories {
        message_repository: MessageStore::Postgres(PostgresMessageRepository::new(pool.clone())),
        health_repository: HealthStore::Postgres(PostgresHealthRepository::new(pool.clone())),
        pool: Some(pool),
    })
}

/// Repositories that keep everything in memory; nothing survives a restart.
pub fn in_memory_repositories() -> MessagesRepositories {
    MessagesRepositories {
        pool: None,
        message_repository: MessageStore::InMemory(InMemoryMessageRepository::new()),
        health_repository: HealthStore::InMemory(InMemoryHealthRepository::new()),
    }
}

impl From<MessagesRepositories> for MessagesService {
    fn from(repositories: MessagesRepositories) -> Self {
        Service::new(
            repositories.message_repository,
            repositories.health_repository,
        )
    }
}

impl MessagesRepositories {
    pub async fn shutdown_pool(&self) {
        if let Some(pool) = &self.pool {
            pool.close().await;
        }
    }
}

impl MessagesService {
    pub async fn shutdown_pool(&self) {
        if let MessageStore::Postgres(repository) = &self.message_repository {
            repository.pool.close().await;
        }
    }
}

impl MessageRepository for MessageStore {
    async fn find_by_id(
        &self,
        organization_id: &OrganizationId,
        id: &MessageId,
    ) -> Result<Option<Message>, CoreError> {
        match self {
            MessageStore::Postgres(repository) => repository.find_by_id(organization_id, id).await,
            MessageStore::InMemory(repository) => repository.find_by_id(organization_id, id).await,
        }
    }

    async fn find_by_title(
        &self,
        organization_id: &OrganizationId,
        title: &str,
    ) -> Result<Option<Message>, CoreError> {
        match self {
            MessageStore::Postgres(repository) => {
                repository.find_by_title(organization_id, title).await
            }
            MessageStore::InMemory(repository) => {
                repository.find_by_title(organization_id, title).await
            }
        }
    }

    async fn list_by_organization(
        &self,
        organization_id: &OrganizationId,
    ) -> Result<Vec<Message>, CoreError> {
        match self {
            MessageStore::Postgres(repository) => {
                repository.list_by_organization(organization_id).await
            }
            MessageStore::InMemory(repository) => {
                repository.list_by_organization(organization_id).await
            }
        }
    }

    async fn insert(&self, input: NewMessage) -> Result<Message, CoreError> {
        match self {
            MessageStore::Postgres(repository) => repository.insert(input).await,
            MessageStore::InMemory(repository) => repository.insert(input).await,
        }
    }

    async fn update(&self, message: Message) -> Result<Option<Message>, CoreError> {
        match self {
            MessageStore::Postgres(repository) => repository.update(message).await,
            MessageStore::InMemory(repository) => repository.update(message).await,
        }
    }

    async fn delete(
        &self,
        organization_id: &OrganizationId,
        id: &MessageId,
    ) -> Result<bool, CoreError> {
        match self {
            MessageStore::Postgres(repository) => repository.delete(organization_id, id).await,
            MessageStore::InMemory(repository) => repository.delete(organization_id, id).await,
        }
    }
}

impl HealthRepository for HealthStore {
    async fn ping(&self) -> IsHealthy {
        match self {
            HealthStore::Postgres(repository) => repository.ping().await,
            HealthStore::InMemory(repository) => repository.ping().await,
        }
    }
}
