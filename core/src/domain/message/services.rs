use chrono::Utc;
use tracing::{debug, info};

use crate::domain::{
    common::{CoreError, services::Service},
    health::port::HealthRepository,
    message::{
        entities::{
            CreateMessageRequest, Message, MessageId, NewMessage, OrganizationId,
            UpdateMessageRequest,
        },
        outcome::{FieldErrors, MessageOutcome},
        ports::{MessageRepository, MessageService},
        validation::{IS_ACTIVE_FIELD, same_title, validate_message_fields},
    },
};

pub const MESSAGE_NOT_FOUND: &str = "Message not found.";
pub const MESSAGE_NOT_FOUND_DURING_UPDATE: &str = "Message not found during update.";
pub const MESSAGE_NOT_DELETED: &str = "Message not found or could not be deleted.";
pub const INACTIVE_UPDATE: &str = "Cannot update an inactive message.";
pub const INACTIVE_DELETE: &str = "Cannot delete an inactive message.";

// Quotes the title exactly as the caller sent it, padding included.
fn title_conflict(title: &str) -> MessageOutcome {
    MessageOutcome::Conflict(format!("A message with title '{title}' already exists."))
}

impl<M, H> MessageService for Service<M, H>
where
    M: MessageRepository,
    H: HealthRepository,
{
    #[tracing::instrument(skip(self, request))]
    async fn create_message(
        &self,
        organization_id: &OrganizationId,
        request: CreateMessageRequest,
    ) -> Result<MessageOutcome, CoreError> {
        let errors = validate_message_fields(&request.title, &request.content);
        if !errors.is_empty() {
            debug!(fields = ?errors.fields().collect::<Vec<_>>(), "Rejected message creation");
            return Ok(MessageOutcome::ValidationError(errors));
        }

        let title = request.title.trim();
        if self
            .message_repository
            .find_by_title(organization_id, title)
            .await?
            .is_some()
        {
            debug!(title, "Title already used in organization");
            return Ok(title_conflict(&request.title));
        }

        let input = NewMessage {
            organization_id: *organization_id,
            title: title.to_owned(),
            content: request.content.trim().to_owned(),
            is_active: true,
            created_at: Utc::now(),
        };

        // The store has the final word on uniqueness: a concurrent writer may
        // have taken the title since the lookup above.
        match self.message_repository.insert(input).await {
            Ok(message) => {
                info!(message_id = %message.id, "Message created");
                Ok(MessageOutcome::Created(message))
            }
            Err(CoreError::DuplicateTitle { .. }) => Ok(title_conflict(&request.title)),
            Err(e) => Err(e),
        }
    }

    #[tracing::instrument(skip(self, request))]
    async fn update_message(
        &self,
        organization_id: &OrganizationId,
        id: &MessageId,
        request: UpdateMessageRequest,
    ) -> Result<MessageOutcome, CoreError> {
        let Some(mut message) = self.message_repository.find_by_id(organization_id, id).await?
        else {
            return Ok(MessageOutcome::NotFound(MESSAGE_NOT_FOUND.to_owned()));
        };

        if !message.is_active {
            return Ok(MessageOutcome::ValidationError(FieldErrors::single(
                IS_ACTIVE_FIELD,
                INACTIVE_UPDATE,
            )));
        }

        let errors = validate_message_fields(&request.title, &request.content);
        if !errors.is_empty() {
            debug!(fields = ?errors.fields().collect::<Vec<_>>(), "Rejected message update");
            return Ok(MessageOutcome::ValidationError(errors));
        }

        let title = request.title.trim();
        if !same_title(&message.title, title) {
            let taken = self
                .message_repository
                .find_by_title(organization_id, title)
                .await?
                .is_some_and(|holder| holder.id != *id);
            if taken {
                debug!(title, "Title already used in organization");
                return Ok(title_conflict(&request.title));
            }
        }

        message.title = title.to_owned();
        message.content = request.content.trim().to_owned();
        message.is_active = request.is_active;
        message.updated_at = Some(Utc::now());

        match self.message_repository.update(message).await {
            Ok(Some(updated)) => {
                info!(message_id = %updated.id, is_active = updated.is_active, "Message updated");
                Ok(MessageOutcome::Updated)
            }
            Ok(None) => Ok(MessageOutcome::NotFound(
                MESSAGE_NOT_FOUND_DURING_UPDATE.to_owned(),
            )),
            Err(CoreError::DuplicateTitle { .. }) => Ok(title_conflict(&request.title)),
            Err(e) => Err(e),
        }
    }

    #[tracing::instrument(skip(self))]
    async fn delete_message(
        &self,
        organization_id: &OrganizationId,
        id: &MessageId,
    ) -> Result<MessageOutcome, CoreError> {
        let Some(message) = self.message_repository.find_by_id(organization_id, id).await? else {
            return Ok(MessageOutcome::NotFound(MESSAGE_NOT_FOUND.to_owned()));
        };

        if !message.is_active {
            return Ok(MessageOutcome::ValidationError(FieldErrors::single(
                IS_ACTIVE_FIELD,
                INACTIVE_DELETE,
            )));
        }

        if !self.message_repository.delete(organization_id, id).await? {
            return Ok(MessageOutcome::NotFound(MESSAGE_NOT_DELETED.to_owned()));
        }

        info!(message_id = %id, "Message deleted");
        Ok(MessageOutcome::Deleted)
    }

    async fn get_message(
        &self,
        organization_id: &OrganizationId,
        id: &MessageId,
    ) -> Result<Option<Message>, CoreError> {
        self.message_repository.find_by_id(organization_id, id).await
    }

    async fn list_messages(
        &self,
        organization_id: &OrganizationId,
    ) -> Result<Vec<Message>, CoreError> {
        self.message_repository
            .list_by_organization(organization_id)
            .await
    }
}
