use axum::{
    Json,
    extract::{Path, State},
};
use org_messages_core::domain::message::{
    entities::{CreateMessageRequest, Message, MessageId, OrganizationId, UpdateMessageRequest},
    ports::MessageService,
};
use uuid::Uuid;

use crate::http::server::{ApiError, AppState, OutcomeResponse, Response};

#[utoipa::path(
    get,
    path = "/api/v1/organizations/{organization_id}/messages",
    tag = "messages",
    params(
        ("organization_id" = String, Path, description = "Organization ID")
    ),
    responses(
        (status = 200, description = "Messages of the organization", body = Vec<Message>),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip(state))]
pub async fn list_messages(
    Path(organization_id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Response<Vec<Message>>, ApiError> {
    let organization_id = OrganizationId::from(organization_id);
    let messages = state.service.list_messages(&organization_id).await?;
    Ok(Response::ok(messages))
}

#[utoipa::path(
    get,
    path = "/api/v1/organizations/{organization_id}/messages/{id}",
    tag = "messages",
    params(
        ("organization_id" = String, Path, description = "Organization ID"),
        ("id" = String, Path, description = "Message ID")
    ),
    responses(
        (status = 200, description = "Message retrieved successfully", body = Message),
        (status = 404, description = "Message not found"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip(state))]
pub async fn get_message(
    Path((organization_id, id)): Path<(Uuid, Uuid)>,
    State(state): State<AppState>,
) -> Result<Response<Message>, ApiError> {
    let organization_id = OrganizationId::from(organization_id);
    let message_id = MessageId::from(id);

    let message = state
        .service
        .get_message(&organization_id, &message_id)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Response::ok(message))
}

#[utoipa::path(
    post,
    path = "/api/v1/organizations/{organization_id}/messages",
    tag = "messages",
    params(
        ("organization_id" = String, Path, description = "Organization ID")
    ),
    request_body = CreateMessageRequest,
    responses(
        (status = 201, description = "Message created successfully", body = Message),
        (status = 400, description = "Validation failed, body maps field names to messages"),
        (status = 409, description = "Title already used in the organization"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip(state, request))]
pub async fn create_message(
    Path(organization_id): Path<Uuid>,
    State(state): State<AppState>,
    Json(request): Json<CreateMessageRequest>,
) -> Result<OutcomeResponse, ApiError> {
    let organization_id = OrganizationId::from(organization_id);
    let outcome = state
        .service
        .create_message(&organization_id, request)
        .await?;
    Ok(outcome.into())
}

#[utoipa::path(
    put,
    path = "/api/v1/organizations/{organization_id}/messages/{id}",
    tag = "messages",
    params(
        ("organization_id" = String, Path, description = "Organization ID"),
        ("id" = String, Path, description = "Message ID")
    ),
    request_body = UpdateMessageRequest,
    responses(
        (status = 204, description = "Message updated successfully"),
        (status = 400, description = "Validation failed or message is inactive"),
        (status = 404, description = "Message not found"),
        (status = 409, description = "Title already used in the organization"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip(state, request))]
pub async fn update_message(
    Path((organization_id, id)): Path<(Uuid, Uuid)>,
    State(state): State<AppState>,
    Json(request): Json<UpdateMessageRequest>,
) -> Result<OutcomeResponse, ApiError> {
    let organization_id = OrganizationId::from(organization_id);
    let message_id = MessageId::from(id);

    let outcome = state
        .service
        .update_message(&organization_id, &message_id, request)
        .await?;
    Ok(outcome.into())
}

#[utoipa::path(
    delete,
    path = "/api/v1/organizations/{organization_id}/messages/{id}",
    tag = "messages",
    params(
        ("organization_id" = String, Path, description = "Organization ID"),
        ("id" = String, Path, description = "Message ID")
    ),
    responses(
        (status = 204, description = "Message deleted successfully"),
        (status = 400, description = "Message is inactive"),
        (status = 404, description = "Message not found"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip(state))]
pub async fn delete_message(
    Path((organization_id, id)): Path<(Uuid, Uuid)>,
    State(state): State<AppState>,
) -> Result<OutcomeResponse, ApiError> {
    let organization_id = OrganizationId::from(organization_id);
    let message_id = MessageId::from(id);

    let outcome = state
        .service
        .delete_message(&organization_id, &message_id)
        .await?;
    Ok(outcome.into())
}
