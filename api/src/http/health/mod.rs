use axum::extract::State;
use org_messages_core::domain::health::port::HealthService;
use serde::Serialize;

use crate::http::server::{ApiError, AppState, Response};

pub mod routes;

#[derive(Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
}

pub async fn health_check(
    State(state): State<AppState>,
) -> Result<Response<HealthStatus>, ApiError> {
    state.service.check_health().await?;
    Ok(Response::ok(HealthStatus { status: "ok" }))
}
