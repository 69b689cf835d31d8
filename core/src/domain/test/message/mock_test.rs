use uuid::Uuid;

use crate::{
    Service,
    domain::{
        common::CoreError,
        health::port::{HealthService, InMemoryHealthRepository},
        message::{
            entities::{
                CreateMessageRequest, Message, MessageId, OrganizationId, UpdateMessageRequest,
            },
            outcome::MessageOutcome,
            ports::{MessageRepository, MessageService},
        },
    },
    infrastructure::message::repositories::memory::InMemoryMessageRepository,
};

use super::fakes::{
    CountingMessageRepository, FailingMessageRepository, RacingMessageRepository,
    StaleMessageRepository, VanishingMessageRepository,
};

fn organization() -> OrganizationId {
    OrganizationId::from(Uuid::new_v4())
}

fn create_request(title: &str, content: &str) -> CreateMessageRequest {
    CreateMessageRequest {
        title: title.to_string(),
        content: content.to_string(),
    }
}

fn update_request(title: &str, content: &str, is_active: bool) -> UpdateMessageRequest {
    UpdateMessageRequest {
        title: title.to_string(),
        content: content.to_string(),
        is_active,
    }
}

fn service<M: MessageRepository>(repository: M) -> Service<M, InMemoryHealthRepository> {
    Service::new(repository, InMemoryHealthRepository::new())
}

async fn create<M: MessageRepository>(
    service: &Service<M, InMemoryHealthRepository>,
    organization_id: &OrganizationId,
    title: &str,
) -> Message {
    match service
        .create_message(organization_id, create_request(title, &"x".repeat(20)))
        .await
        .expect("create_message returned an error")
    {
        MessageOutcome::Created(message) => message,
        other => panic!("Expected Created, got {other:?}"),
    }
}

async fn deactivate<M: MessageRepository>(
    service: &Service<M, InMemoryHealthRepository>,
    organization_id: &OrganizationId,
    message: &Message,
) {
    let outcome = service
        .update_message(
            organization_id,
            &message.id,
            update_request(&message.title, &message.content, false),
        )
        .await
        .expect("update_message returned an error");
    assert_eq!(outcome, MessageOutcome::Updated);
}

// == Create ==

#[tokio::test]
async fn test_create_message_success() -> Result<(), Box<dyn std::error::Error>> {
    let repository = InMemoryMessageRepository::new();
    let service = service(repository.clone());
    let organization_id = organization();
    let content = "x".repeat(20);

    let outcome = service
        .create_message(&organization_id, create_request("Valid Title", &content))
        .await?;

    let MessageOutcome::Created(created) = outcome else {
        panic!("Expected Created");
    };
    assert_eq!(created.title, "Valid Title");
    assert_eq!(created.content, content);
    assert_eq!(created.organization_id, organization_id);
    assert!(created.is_active, "New messages start active");
    assert!(created.updated_at.is_none(), "New messages were never updated");

    let stored = service.get_message(&organization_id, &created.id).await?;
    assert_eq!(stored, Some(created));

    Ok(())
}

#[tokio::test]
async fn test_create_message_stores_trimmed_fields() -> Result<(), Box<dyn std::error::Error>> {
    let service = service(InMemoryMessageRepository::new());
    let organization_id = organization();

    let outcome = service
        .create_message(
            &organization_id,
            create_request("   Padded title \t", "\n  some padded content  \n"),
        )
        .await?;

    let MessageOutcome::Created(created) = outcome else {
        panic!("Expected Created");
    };
    assert_eq!(created.title, "Padded title");
    assert_eq!(created.content, "some padded content");

    Ok(())
}

#[tokio::test]
async fn test_create_message_fail_duplicate_title() -> Result<(), Box<dyn std::error::Error>> {
    let service = service(InMemoryMessageRepository::new());
    let organization_id = organization();
    create(&service, &organization_id, "Duplicate").await;

    let outcome = service
        .create_message(&organization_id, create_request("Duplicate", &"y".repeat(20)))
        .await?;

    assert_eq!(
        outcome,
        MessageOutcome::Conflict("A message with title 'Duplicate' already exists.".to_string())
    );

    Ok(())
}

#[tokio::test]
async fn test_create_message_conflict_ignores_case_and_padding_but_quotes_input()
-> Result<(), Box<dyn std::error::Error>> {
    let service = service(InMemoryMessageRepository::new());
    let organization_id = organization();
    create(&service, &organization_id, "Quarterly Report").await;

    let outcome = service
        .create_message(
            &organization_id,
            create_request("  quarterly REPORT ", &"y".repeat(20)),
        )
        .await?;

    assert_eq!(
        outcome,
        MessageOutcome::Conflict(
            "A message with title '  quarterly REPORT ' already exists.".to_string()
        )
    );
    assert_eq!(service.list_messages(&organization_id).await?.len(), 1);

    Ok(())
}

#[tokio::test]
async fn test_create_message_same_title_in_other_organization()
-> Result<(), Box<dyn std::error::Error>> {
    let service = service(InMemoryMessageRepository::new());
    let first = organization();
    let second = organization();
    create(&service, &first, "Shared title").await;

    let outcome = service
        .create_message(&second, create_request("Shared title", &"y".repeat(20)))
        .await?;

    assert!(matches!(outcome, MessageOutcome::Created(_)));

    Ok(())
}

#[tokio::test]
async fn test_create_message_fail_short_content() -> Result<(), Box<dyn std::error::Error>> {
    let repository = CountingMessageRepository::new();
    let service = service(repository.clone());

    let outcome = service
        .create_message(&organization(), create_request("OK Title", "short"))
        .await?;

    let MessageOutcome::ValidationError(errors) = outcome else {
        panic!("Expected ValidationError");
    };
    assert!(errors.contains_field("Content"));
    assert!(!errors.contains_field("Title"));
    assert_eq!(
        repository.lookups_by_title() + repository.writes(),
        0,
        "Invalid input must not reach the repository"
    );

    Ok(())
}

#[tokio::test]
async fn test_create_message_reports_both_fields() -> Result<(), Box<dyn std::error::Error>> {
    let service = service(InMemoryMessageRepository::new());

    let outcome = service
        .create_message(&organization(), create_request("  ", "tiny"))
        .await?;

    let MessageOutcome::ValidationError(errors) = outcome else {
        panic!("Expected ValidationError");
    };
    assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["Title", "Content"]);
    assert_eq!(errors.get("Title"), Some(&["Title is required.".to_string()][..]));
    assert_eq!(
        errors.get("Content"),
        Some(&["Content must be between 10 and 1000 characters.".to_string()][..])
    );

    Ok(())
}

#[tokio::test]
async fn test_create_message_conflict_detected_by_store() -> Result<(), Box<dyn std::error::Error>>
{
    let service = service(RacingMessageRepository::default());
    let organization_id = organization();
    create(&service, &organization_id, "Raced").await;

    let outcome = service
        .create_message(&organization_id, create_request("RACED", &"y".repeat(20)))
        .await?;

    assert_eq!(
        outcome,
        MessageOutcome::Conflict("A message with title 'RACED' already exists.".to_string())
    );

    Ok(())
}

#[tokio::test]
async fn test_create_message_uses_at_most_two_repository_calls()
-> Result<(), Box<dyn std::error::Error>> {
    let repository = CountingMessageRepository::new();
    let service = service(repository.clone());

    service
        .create_message(&organization(), create_request("Counted", &"x".repeat(20)))
        .await?;

    assert_eq!(repository.lookups_by_title(), 1);
    assert_eq!(repository.writes(), 1);
    assert_eq!(repository.lookups_by_id(), 0);

    Ok(())
}

// == Update ==

#[tokio::test]
async fn test_update_message_fail_not_found() -> Result<(), Box<dyn std::error::Error>> {
    let service = service(InMemoryMessageRepository::new());

    let outcome = service
        .update_message(
            &organization(),
            &MessageId::new(),
            update_request("New Title", &"x".repeat(20), true),
        )
        .await?;

    assert_eq!(outcome, MessageOutcome::NotFound("Message not found.".to_string()));

    Ok(())
}

#[tokio::test]
async fn test_update_message_fail_inactive() -> Result<(), Box<dyn std::error::Error>> {
    let service = service(InMemoryMessageRepository::new());
    let organization_id = organization();
    let message = create(&service, &organization_id, "Existing").await;
    deactivate(&service, &organization_id, &message).await;

    let outcome = service
        .update_message(
            &organization_id,
            &message.id,
            update_request("New Title", &"y".repeat(20), true),
        )
        .await?;

    let MessageOutcome::ValidationError(errors) = outcome else {
        panic!("Expected ValidationError");
    };
    assert_eq!(
        errors.get("IsActive"),
        Some(&["Cannot update an inactive message.".to_string()][..])
    );
    assert_eq!(errors.len(), 1);

    Ok(())
}

#[tokio::test]
async fn test_update_message_inactive_check_precedes_field_validation()
-> Result<(), Box<dyn std::error::Error>> {
    let service = service(InMemoryMessageRepository::new());
    let organization_id = organization();
    let message = create(&service, &organization_id, "Existing").await;
    deactivate(&service, &organization_id, &message).await;

    let outcome = service
        .update_message(&organization_id, &message.id, update_request("", "", true))
        .await?;

    let MessageOutcome::ValidationError(errors) = outcome else {
        panic!("Expected ValidationError");
    };
    assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["IsActive"]);

    Ok(())
}

#[tokio::test]
async fn test_update_message_success() -> Result<(), Box<dyn std::error::Error>> {
    let service = service(InMemoryMessageRepository::new());
    let organization_id = organization();
    let message = create(&service, &organization_id, "Before").await;

    let outcome = service
        .update_message(
            &organization_id,
            &message.id,
            update_request("  After  ", "  brand new content  ", true),
        )
        .await?;
    assert_eq!(outcome, MessageOutcome::Updated);

    let stored = service
        .get_message(&organization_id, &message.id)
        .await?
        .expect("message should still exist");
    assert_eq!(stored.title, "After");
    assert_eq!(stored.content, "brand new content");
    assert!(stored.is_active);
    assert_eq!(stored.created_at, message.created_at);
    assert!(stored.updated_at.is_some_and(|at| at >= message.created_at));

    Ok(())
}

#[tokio::test]
async fn test_update_message_to_inactive_freezes_message() -> Result<(), Box<dyn std::error::Error>>
{
    let service = service(InMemoryMessageRepository::new());
    let organization_id = organization();
    let message = create(&service, &organization_id, "Soon frozen").await;
    deactivate(&service, &organization_id, &message).await;

    let stored = service
        .get_message(&organization_id, &message.id)
        .await?
        .expect("inactive messages stay readable");
    assert!(!stored.is_active);

    let deleted = service.delete_message(&organization_id, &message.id).await?;
    let MessageOutcome::ValidationError(errors) = deleted else {
        panic!("Expected ValidationError");
    };
    assert_eq!(
        errors.get("IsActive"),
        Some(&["Cannot delete an inactive message.".to_string()][..])
    );

    Ok(())
}

#[tokio::test]
async fn test_update_message_fail_validation() -> Result<(), Box<dyn std::error::Error>> {
    let service = service(InMemoryMessageRepository::new());
    let organization_id = organization();
    let message = create(&service, &organization_id, "Valid").await;

    let outcome = service
        .update_message(
            &organization_id,
            &message.id,
            update_request(&"t".repeat(201), &"c".repeat(1001), true),
        )
        .await?;

    let MessageOutcome::ValidationError(errors) = outcome else {
        panic!("Expected ValidationError");
    };
    assert_eq!(
        errors.get("Title"),
        Some(&["Title must be between 3 and 200 characters.".to_string()][..])
    );
    assert_eq!(
        errors.get("Content"),
        Some(&["Content must be between 10 and 1000 characters.".to_string()][..])
    );

    Ok(())
}

#[tokio::test]
async fn test_update_message_keeps_own_title() -> Result<(), Box<dyn std::error::Error>> {
    let repository = CountingMessageRepository::new();
    let service = service(repository.clone());
    let organization_id = organization();
    let message = create(&service, &organization_id, "Mine").await;
    repository.reset();

    let outcome = service
        .update_message(
            &organization_id,
            &message.id,
            update_request(" MINE ", &"z".repeat(20), true),
        )
        .await?;

    assert_eq!(outcome, MessageOutcome::Updated);
    assert_eq!(
        repository.lookups_by_title(),
        0,
        "Unchanged title needs no uniqueness lookup"
    );

    Ok(())
}

#[tokio::test]
async fn test_update_message_fail_title_of_other_message() -> Result<(), Box<dyn std::error::Error>>
{
    let service = service(InMemoryMessageRepository::new());
    let organization_id = organization();
    create(&service, &organization_id, "Taken").await;
    let message = create(&service, &organization_id, "Free").await;

    let outcome = service
        .update_message(
            &organization_id,
            &message.id,
            update_request("taken", &"z".repeat(20), true),
        )
        .await?;

    assert_eq!(
        outcome,
        MessageOutcome::Conflict("A message with title 'taken' already exists.".to_string())
    );
    let stored = service.get_message(&organization_id, &message.id).await?;
    assert_eq!(stored.map(|m| m.title), Some("Free".to_string()));

    Ok(())
}

#[tokio::test]
async fn test_update_message_conflict_detected_by_store() -> Result<(), Box<dyn std::error::Error>>
{
    let service = service(RacingMessageRepository::default());
    let organization_id = organization();
    create(&service, &organization_id, "Taken").await;
    let message = create(&service, &organization_id, "Free").await;

    let outcome = service
        .update_message(
            &organization_id,
            &message.id,
            update_request("Taken", &"z".repeat(20), true),
        )
        .await?;

    assert!(matches!(outcome, MessageOutcome::Conflict(_)));

    Ok(())
}

#[tokio::test]
async fn test_update_message_vanished_before_write() -> Result<(), Box<dyn std::error::Error>> {
    let repository = VanishingMessageRepository::default();
    let service = service(repository.clone());
    let organization_id = organization();
    let message = create(&service, &organization_id, "Ghost").await;

    let outcome = service
        .update_message(
            &organization_id,
            &message.id,
            update_request("Ghost", &"z".repeat(20), true),
        )
        .await?;

    assert_eq!(
        outcome,
        MessageOutcome::NotFound("Message not found during update.".to_string())
    );

    Ok(())
}

#[tokio::test]
async fn test_update_message_removed_concurrently_with_taken_title_is_not_found()
-> Result<(), Box<dyn std::error::Error>> {
    let repository = StaleMessageRepository::default();
    let service = service(repository.clone());
    let organization_id = organization();
    let alpha = create(&service, &organization_id, "Alpha").await;
    create(&service, &organization_id, "Beta").await;

    repository.remember(alpha.clone());
    assert!(repository.inner.delete(&organization_id, &alpha.id).await?);

    let outcome = service
        .update_message(
            &organization_id,
            &alpha.id,
            update_request("Beta", &"z".repeat(20), true),
        )
        .await?;

    assert_eq!(
        outcome,
        MessageOutcome::NotFound("Message not found during update.".to_string())
    );

    Ok(())
}

#[tokio::test]
async fn test_update_message_uses_one_lookup_and_one_write()
-> Result<(), Box<dyn std::error::Error>> {
    let repository = CountingMessageRepository::new();
    let service = service(repository.clone());
    let organization_id = organization();
    let message = create(&service, &organization_id, "Counted").await;
    repository.reset();

    service
        .update_message(
            &organization_id,
            &message.id,
            update_request("Renamed", &"z".repeat(20), true),
        )
        .await?;

    assert_eq!(repository.lookups_by_id(), 1);
    assert_eq!(repository.lookups_by_title(), 1);
    assert_eq!(repository.writes(), 1);

    Ok(())
}

// == Delete ==

#[tokio::test]
async fn test_delete_message_fail_not_found() -> Result<(), Box<dyn std::error::Error>> {
    let service = service(InMemoryMessageRepository::new());

    let outcome = service
        .delete_message(&organization(), &MessageId::new())
        .await?;

    assert_eq!(outcome, MessageOutcome::NotFound("Message not found.".to_string()));

    Ok(())
}

#[tokio::test]
async fn test_delete_message_success() -> Result<(), Box<dyn std::error::Error>> {
    let service = service(InMemoryMessageRepository::new());
    let organization_id = organization();
    let message = create(&service, &organization_id, "Short lived").await;

    let outcome = service.delete_message(&organization_id, &message.id).await?;

    assert_eq!(outcome, MessageOutcome::Deleted);
    assert!(service.get_message(&organization_id, &message.id).await?.is_none());

    // The title is free again once the message is gone
    let recreated = service
        .create_message(&organization_id, create_request("Short lived", &"x".repeat(20)))
        .await?;
    assert!(matches!(recreated, MessageOutcome::Created(_)));

    Ok(())
}

#[tokio::test]
async fn test_delete_message_scoped_by_organization() -> Result<(), Box<dyn std::error::Error>> {
    let service = service(InMemoryMessageRepository::new());
    let owner = organization();
    let message = create(&service, &owner, "Not yours").await;

    let outcome = service.delete_message(&organization(), &message.id).await?;

    assert_eq!(outcome, MessageOutcome::NotFound("Message not found.".to_string()));
    assert!(service.get_message(&owner, &message.id).await?.is_some());

    Ok(())
}

#[tokio::test]
async fn test_delete_message_nothing_removed() -> Result<(), Box<dyn std::error::Error>> {
    let service = service(VanishingMessageRepository::default());
    let organization_id = organization();
    let message = create(&service, &organization_id, "Sticky").await;

    let outcome = service.delete_message(&organization_id, &message.id).await?;

    assert_eq!(
        outcome,
        MessageOutcome::NotFound("Message not found or could not be deleted.".to_string())
    );

    Ok(())
}

// == Read ==

#[tokio::test]
async fn test_list_messages_only_returns_organization() -> Result<(), Box<dyn std::error::Error>> {
    let service = service(InMemoryMessageRepository::new());
    let organization_id = organization();
    let other = organization();
    let first = create(&service, &organization_id, "First").await;
    let second = create(&service, &organization_id, "Second").await;
    create(&service, &other, "Elsewhere").await;

    let messages = service.list_messages(&organization_id).await?;

    assert_eq!(messages, vec![first, second]);

    Ok(())
}

#[tokio::test]
async fn test_get_message_other_organization_is_absent() -> Result<(), Box<dyn std::error::Error>>
{
    let service = service(InMemoryMessageRepository::new());
    let message = create(&service, &organization(), "Private").await;

    assert!(service.get_message(&organization(), &message.id).await?.is_none());

    Ok(())
}

// == Failures ==

#[tokio::test]
async fn test_repository_failure_propagates() {
    let service = service(FailingMessageRepository);
    let organization_id = organization();

    let created = service
        .create_message(&organization_id, create_request("Valid Title", &"x".repeat(20)))
        .await;
    assert!(matches!(created, Err(CoreError::DatabaseError { .. })));

    let deleted = service
        .delete_message(&organization_id, &MessageId::new())
        .await;
    assert!(matches!(deleted, Err(CoreError::DatabaseError { .. })));

    let listed = service.list_messages(&organization_id).await;
    assert!(listed.is_err());
}

#[tokio::test]
async fn test_check_health_in_memory() -> Result<(), Box<dyn std::error::Error>> {
    let service = service(InMemoryMessageRepository::new());

    let healthy = service.check_health().await?;

    assert!(healthy.0);

    Ok(())
}
