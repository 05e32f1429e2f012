//! # Server Configuration
//!
//! This module contains the server setup and router configuration for the
//! elevator backend.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use sea_orm::DatabaseConnection;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::{AppConfig, BuildingConfig};
use crate::handlers;

/// Application state containing shared resources
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub building: Arc<BuildingConfig>,
    pub db: DatabaseConnection,
}

/// Creates and configures the Axum application router
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/elevator_call", post(handlers::calls::log_elevator_call))
        .route("/get_calls", get(handlers::calls::get_calls))
        .route(
            "/elevator_at_rest",
            post(handlers::state::set_elevator_at_rest),
        )
        .route("/move_elevator", post(handlers::state::move_elevator))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()))
}

/// Starts the server with the given configuration
pub async fn run_server(
    config: AppConfig,
    building: BuildingConfig,
    db: DatabaseConnection,
) -> Result<(), Box<dyn std::error::Error>> {
    let addr = config
        .bind_addr()
        .map_err(|e| format!("Invalid server address: {}", e))?;

    let state = AppState {
        config: Arc::new(config),
        building: Arc::new(building),
        db,
    };
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Server listening on: {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::root,
        crate::handlers::calls::log_elevator_call,
        crate::handlers::calls::get_calls,
        crate::handlers::state::set_elevator_at_rest,
        crate::handlers::state::move_elevator,
    ),
    components(
        schemas(
            crate::models::ServiceInfo,
            crate::models::MessageResponse,
            crate::handlers::calls::LogCallRequest,
            crate::handlers::calls::CallInfo,
            crate::handlers::state::AtRestRequest,
            crate::handlers::state::MoveRequest,
            crate::error::ApiError,
        )
    ),
    info(
        title = "Elevator Backend API",
        description = "API for logging elevator calls and state transitions",
        version = env!("CARGO_PKG_VERSION"),
    )
)]
pub struct ApiDoc;
