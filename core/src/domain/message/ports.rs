use crate::domain::{
    common::CoreError,
    message::{
        entities::{
            CreateMessageRequest, Message, MessageId, NewMessage, OrganizationId,
            UpdateMessageRequest,
        },
        outcome::MessageOutcome,
    },
};

/// Persistence port for messages. Every lookup is scoped by organization.
pub trait MessageRepository: Send + Sync {
    fn find_by_id(
        &self,
        organization_id: &OrganizationId,
        id: &MessageId,
    ) -> impl Future<Output = Result<Option<Message>, CoreError>> + Send;

    /// Matches `title` case-insensitively against the stored (trimmed) titles.
    fn find_by_title(
        &self,
        organization_id: &OrganizationId,
        title: &str,
    ) -> impl Future<Output = Result<Option<Message>, CoreError>> + Send;

    fn list_by_organization(
        &self,
        organization_id: &OrganizationId,
    ) -> impl Future<Output = Result<Vec<Message>, CoreError>> + Send;

    /// Persists a new message and assigns its id.
    ///
    /// Fails with `CoreError::DuplicateTitle` when the store already holds the
    /// title for the organization.
    fn insert(&self, input: NewMessage) -> impl Future<Output = Result<Message, CoreError>> + Send;

    /// Overwrites the stored message. Resolves to `Ok(None)` when it no longer exists.
    fn update(
        &self,
        message: Message,
    ) -> impl Future<Output = Result<Option<Message>, CoreError>> + Send;

    /// Resolves to `true` when a message was removed.
    fn delete(
        &self,
        organization_id: &OrganizationId,
        id: &MessageId,
    ) -> impl Future<Output = Result<bool, CoreError>> + Send;
}

/// A service for managing the messages of an organization.
///
/// This trait is the port the HTTP layer talks to. Mutations never fail for
/// business reasons: validation problems, title conflicts and missing
/// messages are all reported as a [`MessageOutcome`]. The `Err` side is kept
/// for infrastructure faults coming out of the repository.
///
/// # Thread Safety
///
/// All implementations must be thread-safe (`Send + Sync`) to support concurrent access
/// in multi-threaded environments.
pub trait MessageService: Send + Sync {
    /// Validates and stores a new message for the organization.
    ///
    /// # Returns
    ///
    /// - `MessageOutcome::Created` with the stored message
    /// - `MessageOutcome::ValidationError` keyed by `Title` and/or `Content`
    /// - `MessageOutcome::Conflict` when the organization already has the title
    fn create_message(
        &self,
        organization_id: &OrganizationId,
        request: CreateMessageRequest,
    ) -> impl Future<Output = Result<MessageOutcome, CoreError>> + Send;

    /// Replaces title, content and active flag of an active message.
    ///
    /// # Returns
    ///
    /// - `MessageOutcome::Updated` on success
    /// - `MessageOutcome::NotFound` when the message does not exist or vanished before the write
    /// - `MessageOutcome::ValidationError` keyed by `IsActive` when the message is inactive,
    ///   otherwise keyed by `Title` and/or `Content`
    /// - `MessageOutcome::Conflict` when another message of the organization holds the title
    fn update_message(
        &self,
        organization_id: &OrganizationId,
        id: &MessageId,
        request: UpdateMessageRequest,
    ) -> impl Future<Output = Result<MessageOutcome, CoreError>> + Send;

    /// Removes an active message.
    ///
    /// # Returns
    ///
    /// - `MessageOutcome::Deleted` on success
    /// - `MessageOutcome::NotFound` when nothing was there to delete
    /// - `MessageOutcome::ValidationError` keyed by `IsActive` when the message is inactive
    fn delete_message(
        &self,
        organization_id: &OrganizationId,
        id: &MessageId,
    ) -> impl Future<Output = Result<MessageOutcome, CoreError>> + Send;

    fn get_message(
        &self,
        organization_id: &OrganizationId,
        id: &MessageId,
    ) -> impl Future<Output = Result<Option<Message>, CoreError>> + Send;

    fn list_messages(
        &self,
        organization_id: &OrganizationId,
    ) -> impl Future<Output = Result<Vec<Message>, CoreError>> + Send;
}
