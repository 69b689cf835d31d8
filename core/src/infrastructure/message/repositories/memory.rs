use std::sync::{Arc, Mutex, MutexGuard};

use crate::domain::{
    common::CoreError,
    message::{
        entities::{Message, MessageId, NewMessage, OrganizationId},
        ports::MessageRepository,
        validation::same_title,
    },
};

/// Message store kept in process memory.
///
/// Clones share the same storage. Title uniqueness is enforced under the
/// lock, so it behaves like the unique index of the Postgres schema.
#[derive(Clone, Default)]
pub struct InMemoryMessageRepository {
    messages: Arc<Mutex<Vec<Message>>>,
}

impl InMemoryMessageRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn messages(&self) -> Result<MutexGuard<'_, Vec<Message>>, CoreError> {
        self.messages.lock().map_err(|_| {
            CoreError::ServiceUnavailable("in-memory message store is poisoned".into())
        })
    }
}

fn title_taken(
    messages: &[Message],
    organization_id: &OrganizationId,
    title: &str,
    except: Option<&MessageId>,
) -> bool {
    messages.iter().any(|m| {
        &m.organization_id == organization_id
            && Some(&m.id) != except
            && same_title(&m.title, title)
    })
}

impl MessageRepository for InMemoryMessageRepository {
    async fn find_by_id(
        &self,
        organization_id: &OrganizationId,
        id: &MessageId,
    ) -> Result<Option<Message>, CoreError> {
        let messages = self.messages()?;

        Ok(messages
            .iter()
            .find(|m| &m.organization_id == organization_id && &m.id == id)
            .cloned())
    }

    async fn find_by_title(
        &self,
        organization_id: &OrganizationId,
        title: &str,
    ) -> Result<Option<Message>, CoreError> {
        let messages = self.messages()?;

        Ok(messages
            .iter()
            .find(|m| &m.organization_id == organization_id && same_title(&m.title, title))
            .cloned())
    }

    async fn list_by_organization(
        &self,
        organization_id: &OrganizationId,
    ) -> Result<Vec<Message>, CoreError> {
        let messages = self.messages()?;

        Ok(messages
            .iter()
            .filter(|m| &m.organization_id == organization_id)
            .cloned()
            .collect())
    }

    async fn insert(&self, input: NewMessage) -> Result<Message, CoreError> {
        let mut messages = self.messages()?;

        if title_taken(&messages, &input.organization_id, &input.title, None) {
            return Err(CoreError::DuplicateTitle {
                organization_id: input.organization_id,
                title: input.title,
            });
        }

        let message = input.into_message(MessageId::new());
        messages.push(message.clone());

        Ok(message)
    }

    async fn update(&self, message: Message) -> Result<Option<Message>, CoreError> {
        let mut messages = self.messages()?;

        let Some(index) = messages
            .iter()
            .position(|m| m.organization_id == message.organization_id && m.id == message.id)
        else {
            return Ok(None);
        };

        if title_taken(
            &messages,
            &message.organization_id,
            &message.title,
            Some(&message.id),
        ) {
            return Err(CoreError::DuplicateTitle {
                organization_id: message.organization_id,
                title: message.title,
            });
        }

        // Identity and creation time belong to the store
        let stored = &mut messages[index];
        stored.title = message.title;
        stored.content = message.content;
        stored.is_active = message.is_active;
        stored.updated_at = message.updated_at;

        Ok(Some(stored.clone()))
    }

    async fn delete(
        &self,
        organization_id: &OrganizationId,
        id: &MessageId,
    ) -> Result<bool, CoreError> {
        let mut messages = self.messages()?;

        let count_before = messages.len();
        messages.retain(|m| !(&m.organization_id == organization_id && &m.id == id));

        Ok(messages.len() != count_before)
    }
}
