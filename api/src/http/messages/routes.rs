use org_messages_core::domain::message::entities::{MessageId, OrganizationId};
use utoipa_axum::{router::OpenApiRouter, routes};

use crate::http::{
    messages::handlers::{
        __path_create_message, __path_delete_message, __path_get_message, __path_list_messages,
        __path_update_message, create_message, delete_message, get_message, list_messages,
        update_message,
    },
    server::AppState,
};

pub const API_PREFIX: &str = "/api/v1";

/// Canonical location of a message, as sent back in the `Location` header.
pub fn message_path(organization_id: &OrganizationId, id: &MessageId) -> String {
    format!("{API_PREFIX}/organizations/{organization_id}/messages/{id}")
}

pub fn message_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_messages, create_message))
        .routes(routes!(get_message, update_message, delete_message))
}
