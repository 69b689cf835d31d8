use thiserror::Error;

use crate::domain::message::entities::OrganizationId;

pub mod services;

/// Infrastructure faults raised by repositories.
///
/// Predictable business failures are not errors: they are reported through
/// [`MessageOutcome`](crate::domain::message::outcome::MessageOutcome).
#[derive(Error, Debug, Clone)]
pub enum CoreError {
    #[error("Service is currently unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Database error: {msg}")]
    DatabaseError { msg: String },

    /// The store rejected a write because the organization already holds the title.
    #[error("A message titled '{title}' already exists in organization {organization_id}")]
    DuplicateTitle {
        organization_id: OrganizationId,
        title: String,
    },

    #[error("Health check failed")]
    Unhealthy,
}
