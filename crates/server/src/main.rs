// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{Path, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

use bunkhouse_api::{
    AllocateRoomsRequest, AllocateRoomsResponse, ApiError, AutoAssignRequest, AutoAssignResponse,
    CancelRequest, CreateEventRequest, EventResponse, GroupRegistrationRequest,
    IndividualRegistrationRequest, RecalculateRequest, RecalculateResponse, RegistrationResponse,
    RoomsResponse, UnassignedResponse,
};
use bunkhouse_persistence::SqlitePersistence;

/// Bunkhouse Server - HTTP server for event capacity and housing allocation
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,
}

/// Application state shared across handlers.
///
/// This contains the persistence layer wrapped in a Mutex to allow
/// safe concurrent access.
#[derive(Clone)]
struct AppState {
    /// The persistence layer for events, registrations, and assignments.
    persistence: Arc<Mutex<SqlitePersistence>>,
}

/// Standard error response body.
#[derive(Debug, Clone, Serialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::InvalidInput { .. } => Self {
                status: StatusCode::BAD_REQUEST,
                message: err.to_string(),
            },
            ApiError::Unauthorized { .. } => Self {
                status: StatusCode::FORBIDDEN,
                message: err.to_string(),
            },
            ApiError::ResourceNotFound { .. } => Self {
                status: StatusCode::NOT_FOUND,
                message: err.to_string(),
            },
            ApiError::CapacityExceeded { .. } | ApiError::Conflict { .. } => Self {
                status: StatusCode::CONFLICT,
                message: err.to_string(),
            },
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: err.to_string(),
                }
            }
        }
    }
}

/// Handler for POST `/events` endpoint.
///
/// Creates a new event with optional capacity ceilings.
async fn handle_create_event(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreateEventRequest>,
) -> Result<Json<EventResponse>, HttpError> {
    info!(
        actor_id = req.actor.actor_id,
        role = %req.actor.actor_role,
        name = %req.name,
        "Handling create_event request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: EventResponse = bunkhouse_api::create_event(&mut persistence, &req)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/events/{event_id}` endpoint.
async fn handle_get_event(
    AxumState(app_state): AxumState<AppState>,
    Path(event_id): Path<i64>,
) -> Result<Json<EventResponse>, HttpError> {
    let persistence = app_state.persistence.lock().await;
    let response: EventResponse = bunkhouse_api::get_event(&persistence, event_id)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/registrations/group` endpoint.
///
/// Registers a group against the event's capacity ledger.
async fn handle_register_group(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<GroupRegistrationRequest>,
) -> Result<Json<RegistrationResponse>, HttpError> {
    info!(
        actor_id = req.actor.actor_id,
        role = %req.actor.actor_role,
        event_id = req.event_id,
        group_name = %req.group_name,
        total = req.total_participants,
        "Handling register_group request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: RegistrationResponse = bunkhouse_api::register_group(&mut persistence, &req)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/registrations/group/{registration_id}/cancel` endpoint.
async fn handle_cancel_group(
    AxumState(app_state): AxumState<AppState>,
    Path(registration_id): Path<i64>,
    Json(req): Json<CancelRequest>,
) -> Result<Json<RegistrationResponse>, HttpError> {
    info!(
        actor_id = req.actor.actor_id,
        registration_id = registration_id,
        "Handling cancel_group request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: RegistrationResponse =
        bunkhouse_api::cancel_group(&mut persistence, registration_id, &req)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/registrations/individual` endpoint.
async fn handle_register_individual(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<IndividualRegistrationRequest>,
) -> Result<Json<RegistrationResponse>, HttpError> {
    info!(
        actor_id = req.actor.actor_id,
        role = %req.actor.actor_role,
        event_id = req.event_id,
        "Handling register_individual request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: RegistrationResponse =
        bunkhouse_api::register_individual(&mut persistence, &req)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/registrations/individual/{registration_id}/cancel` endpoint.
async fn handle_cancel_individual(
    AxumState(app_state): AxumState<AppState>,
    Path(registration_id): Path<i64>,
    Json(req): Json<CancelRequest>,
) -> Result<Json<RegistrationResponse>, HttpError> {
    info!(
        actor_id = req.actor.actor_id,
        registration_id = registration_id,
        "Handling cancel_individual request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: RegistrationResponse =
        bunkhouse_api::cancel_individual(&mut persistence, registration_id, &req)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/events/{event_id}/auto_assign` endpoint.
///
/// Runs the room allocation engine for an event or one of its groups.
async fn handle_auto_assign(
    AxumState(app_state): AxumState<AppState>,
    Path(event_id): Path<i64>,
    Json(req): Json<AutoAssignRequest>,
) -> Result<Json<AutoAssignResponse>, HttpError> {
    info!(
        actor_id = req.actor.actor_id,
        event_id = event_id,
        group_id = req.group_id,
        strategy = %req.strategy,
        only_unassigned = req.only_unassigned,
        "Handling auto_assign request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: AutoAssignResponse =
        bunkhouse_api::auto_assign(&mut persistence, event_id, &req)?;
    drop(persistence);

    info!(
        event_id = event_id,
        assigned = response.assigned,
        skipped = response.skipped.len(),
        unclassifiable = response.unclassifiable.len(),
        "Auto-assignment complete"
    );

    Ok(Json(response))
}

/// Handler for POST `/groups/{group_id}/allocate_rooms` endpoint.
///
/// Reserves a batch of rooms for a group, all or nothing.
async fn handle_allocate_rooms(
    AxumState(app_state): AxumState<AppState>,
    Path(group_id): Path<i64>,
    Json(req): Json<AllocateRoomsRequest>,
) -> Result<Json<AllocateRoomsResponse>, HttpError> {
    info!(
        actor_id = req.actor.actor_id,
        group_id = group_id,
        rooms = req.room_ids.len(),
        "Handling allocate_rooms request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: AllocateRoomsResponse =
        bunkhouse_api::allocate_rooms(&mut persistence, group_id, &req)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/events/{event_id}/recalculate` endpoint.
///
/// Rebuilds the capacity counters from the stored registrations.
async fn handle_recalculate(
    AxumState(app_state): AxumState<AppState>,
    Path(event_id): Path<i64>,
    Json(req): Json<RecalculateRequest>,
) -> Result<Json<RecalculateResponse>, HttpError> {
    info!(
        actor_id = req.actor.actor_id,
        event_id = event_id,
        "Handling recalculate request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: RecalculateResponse =
        bunkhouse_api::recalculate_capacity(&mut persistence, event_id, &req)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/events/{event_id}/rooms` endpoint.
async fn handle_list_rooms(
    AxumState(app_state): AxumState<AppState>,
    Path(event_id): Path<i64>,
) -> Result<Json<RoomsResponse>, HttpError> {
    let persistence = app_state.persistence.lock().await;
    let response: RoomsResponse = bunkhouse_api::list_rooms(&persistence, event_id)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/events/{event_id}/unassigned` endpoint.
async fn handle_list_unassigned(
    AxumState(app_state): AxumState<AppState>,
    Path(event_id): Path<i64>,
) -> Result<Json<UnassignedResponse>, HttpError> {
    let persistence = app_state.persistence.lock().await;
    let response: UnassignedResponse = bunkhouse_api::list_unassigned(&persistence, event_id)?;
    drop(persistence);

    Ok(Json(response))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/events", post(handle_create_event))
        .route("/events/{event_id}", get(handle_get_event))
        .route("/registrations/group", post(handle_register_group))
        .route(
            "/registrations/group/{registration_id}/cancel",
            post(handle_cancel_group),
        )
        .route("/registrations/individual", post(handle_register_individual))
        .route(
            "/registrations/individual/{registration_id}/cancel",
            post(handle_cancel_individual),
        )
        .route("/events/{event_id}/auto_assign", post(handle_auto_assign))
        .route("/groups/{group_id}/allocate_rooms", post(handle_allocate_rooms))
        .route("/events/{event_id}/recalculate", post(handle_recalculate))
        .route("/events/{event_id}/rooms", get(handle_list_rooms))
        .route("/events/{event_id}/unassigned", get(handle_list_unassigned))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Bunkhouse Server");

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let persistence: SqlitePersistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        SqlitePersistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        SqlitePersistence::new_in_memory()?
    };

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests;
