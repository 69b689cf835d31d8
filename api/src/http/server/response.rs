use axum::{
    Json,
    http::{StatusCode, header},
    response::IntoResponse,
};
use org_messages_core::domain::message::{entities::Message, outcome::MessageOutcome};
use serde::Serialize;

use crate::http::{messages::routes::message_path, server::error::ErrorBody};

/// JSON body with an explicit status code.
pub struct Response<T: Serialize> {
    status: StatusCode,
    data: T,
}

impl<T: Serialize> Response<T> {
    pub fn ok(data: T) -> Self {
        Self {
            status: StatusCode::OK,
            data,
        }
    }
}

impl<T: Serialize> IntoResponse for Response<T> {
    fn into_response(self) -> axum::response::Response {
        (self.status, Json(self.data)).into_response()
    }
}

/// HTTP rendering of a [`MessageOutcome`].
///
/// | Outcome           | Status | Body                       |
/// |-------------------|--------|----------------------------|
/// | `Created`         | 201    | message, `Location` header |
/// | `Updated`         | 204    | none                       |
/// | `Deleted`         | 204    | none                       |
/// | `NotFound`        | 404    | `{"message": reason}`      |
/// | `Conflict`        | 409    | `{"message": reason}`      |
/// | `ValidationError` | 400    | field → messages           |
pub struct OutcomeResponse(pub MessageOutcome);

impl From<MessageOutcome> for OutcomeResponse {
    fn from(outcome: MessageOutcome) -> Self {
        Self(outcome)
    }
}

fn created(message: Message) -> axum::response::Response {
    let location = message_path(&message.organization_id, &message.id);
    (
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(message),
    )
        .into_response()
}

fn reason(status: StatusCode, message: String) -> axum::response::Response {
    (status, Json(ErrorBody { message })).into_response()
}

impl IntoResponse for OutcomeResponse {
    fn into_response(self) -> axum::response::Response {
        match self.0 {
            MessageOutcome::Created(message) => created(message),
            MessageOutcome::Updated | MessageOutcome::Deleted => {
                StatusCode::NO_CONTENT.into_response()
            }
            MessageOutcome::NotFound(message) => reason(StatusCode::NOT_FOUND, message),
            MessageOutcome::Conflict(message) => reason(StatusCode::CONFLICT, message),
            MessageOutcome::ValidationError(errors) => {
                (StatusCode::BAD_REQUEST, Json(errors)).into_response()
            }
        }
    }
}
