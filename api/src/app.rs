use std::future::IntoFuture;

use axum::Router;
use org_messages_core::{create_repositories, in_memory_repositories};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_scalar::{Scalar, Servable};

use crate::{
    config::{Config, StorageBackend},
    http::{
        health::routes::health_routes,
        messages::routes::message_routes,
        server::{ApiError, AppState},
    },
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Organization Messages API",
        description = "Messages scoped by organization"
    ),
    tags((name = "messages", description = "Message management"))
)]
struct ApiDoc;

/// Builds the public API router: message routes, OpenAPI document under `/scalar`.
pub fn app_router(state: AppState) -> Router {
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .merge(message_routes())
        .split_for_parts();

    router
        .merge(Scalar::with_url("/scalar", api))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub fn health_router(state: AppState) -> Router {
    health_routes().with_state(state)
}

pub struct App {
    config: Config,
    state: AppState,
    app_router: Router,
    health_router: Router,
}

impl App {
    pub async fn new(config: Config) -> Result<Self, ApiError> {
        info!(
            storage = ?config.storage,
            environment = ?config.environment,
            "Initializing repositories"
        );
        let repositories = match config.storage {
            StorageBackend::Postgres => create_repositories(config.database.clone().into())
                .await
                .map_err(|e| ApiError::StartupError { msg: e.to_string() })?,
            StorageBackend::Memory => in_memory_repositories(),
        };

        let state: AppState = repositories.into();
        Ok(Self {
            app_router: app_router(state.clone()),
            health_router: health_router(state.clone()),
            config,
            state,
        })
    }

    pub async fn start(&self) -> Result<(), ApiError> {
        let api_addr = format!("0.0.0.0:{}", self.config.server.api_port);
        let health_addr = format!("0.0.0.0:{}", self.config.server.health_port);

        let api_listener = TcpListener::bind(&api_addr)
            .await
            .map_err(|e| ApiError::StartupError { msg: e.to_string() })?;
        let health_listener = TcpListener::bind(&health_addr)
            .await
            .map_err(|e| ApiError::StartupError { msg: e.to_string() })?;
        info!("API listening on {api_addr}, health on {health_addr}");

        let api_server = axum::serve(api_listener, self.app_router.clone())
            .with_graceful_shutdown(shutdown_signal());
        let health_server = axum::serve(health_listener, self.health_router.clone())
            .with_graceful_shutdown(shutdown_signal());

        let served = tokio::try_join!(api_server.into_future(), health_server.into_future());

        info!("Shutting down");
        self.state.shutdown().await;

        served
            .map(|_| ())
            .map_err(|e| ApiError::StartupError { msg: e.to_string() })
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}
