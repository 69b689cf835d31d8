use sqlx::{PgPool, query_as};

use crate::domain::{
    common::CoreError,
    message::{
        entities::{Message, MessageId, NewMessage, OrganizationId},
        ports::MessageRepository,
    },
};

/// Postgres-backed message store.
///
/// The `messages_organization_title_key` unique index on
/// `(organization_id, lower(title))` is the authoritative uniqueness check;
/// violations surface as `CoreError::DuplicateTitle`.
#[derive(Clone)]
pub struct PostgresMessageRepository {
    pub(crate) pool: PgPool,
}

impl PostgresMessageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn database_error(e: sqlx::Error) -> CoreError {
    tracing::error!(error = %e, "Message query failed");
    CoreError::DatabaseError { msg: e.to_string() }
}

fn write_error(e: sqlx::Error, organization_id: OrganizationId, title: &str) -> CoreError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => CoreError::DuplicateTitle {
            organization_id,
            title: title.to_owned(),
        },
        _ => database_error(e),
    }
}

impl MessageRepository for PostgresMessageRepository {
    async fn find_by_id(
        &self,
        organization_id: &OrganizationId,
        id: &MessageId,
    ) -> Result<Option<Message>, CoreError> {
        query_as::<_, Message>(
            r#"
            SELECT id, organization_id, title, content, is_active, created_at, updated_at
            FROM messages
            WHERE organization_id = $1 AND id = $2
            "#,
        )
        .bind(organization_id.0)
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)
    }

    async fn find_by_title(
        &self,
        organization_id: &OrganizationId,
        title: &str,
    ) -> Result<Option<Message>, CoreError> {
        query_as::<_, Message>(
            r#"
            SELECT id, organization_id, title, content, is_active, created_at, updated_at
            FROM messages
            WHERE organization_id = $1 AND lower(title) = lower($2)
            "#,
        )
        .bind(organization_id.0)
        .bind(title.trim())
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)
    }

    async fn list_by_organization(
        &self,
        organization_id: &OrganizationId,
    ) -> Result<Vec<Message>, CoreError> {
        query_as::<_, Message>(
            r#"
            SELECT id, organization_id, title, content, is_active, created_at, updated_at
            FROM messages
            WHERE organization_id = $1
            ORDER BY created_at, id
            "#,
        )
        .bind(organization_id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)
    }

    async fn insert(&self, input: NewMessage) -> Result<Message, CoreError> {
        let id = MessageId::new();

        query_as::<_, Message>(
            r#"
            INSERT INTO messages (id, organization_id, title, content, is_active, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, organization_id, title, content, is_active, created_at, updated_at
            "#,
        )
        .bind(id.0)
        .bind(input.organization_id.0)
        .bind(&input.title)
        .bind(&input.content)
        .bind(input.is_active)
        .bind(input.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| write_error(e, input.organization_id, &input.title))
    }

    async fn update(&self, message: Message) -> Result<Option<Message>, CoreError> {
        query_as::<_, Message>(
            r#"
            UPDATE messages
            SET title = $3, content = $4, is_active = $5, updated_at = $6
            WHERE organization_id = $1 AND id = $2
            RETURNING id, organization_id, title, content, is_active, created_at, updated_at
            "#,
        )
        .bind(message.organization_id.0)
        .bind(message.id.0)
        .bind(&message.title)
        .bind(&message.content)
        .bind(message.is_active)
        .bind(message.updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| write_error(e, message.organization_id, &message.title))
    }

    async fn delete(
        &self,
        organization_id: &OrganizationId,
        id: &MessageId,
    ) -> Result<bool, CoreError> {
        let result = sqlx::query("DELETE FROM messages WHERE organization_id = $1 AND id = $2")
            .bind(organization_id.0)
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(database_error)?;

        Ok(result.rows_affected() > 0)
    }
}
