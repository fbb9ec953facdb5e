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

mod live;
mod session;

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, patch, post},
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

use stripboard_api::{
    ApiError, AuthenticationService, CreateFlightRequest, DeleteFlightResponse,
    FileFlightRequest, FixedWindowLimiter, FlightInfo, HistoryEntryInfo, ImportFlightsRequest,
    ImportFlightsResponse, ListFlightsResponse, ListUsersResponse, LoginRequest, LoginResponse,
    SetAdminRequest, SetAdminResponse, ToggleControllerResponse, UpdateFlightRequest,
    WhoAmIResponse, compute_user_capabilities, create_flight, delete_flight, file_flight,
    get_event_settings, get_flight, get_flight_history, import_flights, list_flights, list_users,
    my_flights, set_admin, toggle_controller, update_event_settings, update_flight, user_to_info,
};
use stripboard_domain::{EventSettings, SettingsPatch};
use stripboard_persistence::{Persistence, PersistenceError};

use crate::live::{LiveEventBroadcaster, live_events_handler};
use crate::session::{SessionUser, bearer_token};

/// Stripboard Server - HTTP server for the Stripboard flight strip system
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// External identity granted the admin flag at login. Role flags can
    /// never be self-escalated, so the first admin must be designated here.
    #[arg(long)]
    bootstrap_admin: Option<String>,
}

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    /// The persistence layer, one logical operation per lock hold.
    persistence: Arc<Mutex<Persistence>>,
    /// The filing rate limiter (process-local fixed window).
    limiter: Arc<FixedWindowLimiter>,
    /// Broadcaster for informational live board events.
    live: LiveEventBroadcaster,
    /// External identity granted the admin flag at login, if configured.
    bootstrap_admin: Option<String>,
}

/// Query parameters for listing flights.
#[derive(Debug, Deserialize)]
struct ListFlightsQuery {
    /// Optional board filter.
    airport: Option<String>,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// Generic acknowledgement response.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct AckResponse {
    /// Success indicator.
    success: bool,
    /// A message describing the outcome.
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
            ApiError::AuthenticationFailed { .. } => Self {
                status: StatusCode::UNAUTHORIZED,
                message: err.to_string(),
            },
            ApiError::Forbidden { .. } => Self {
                status: StatusCode::FORBIDDEN,
                message: err.to_string(),
            },
            ApiError::DomainRuleViolation { .. } => Self {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                message: err.to_string(),
            },
            ApiError::InvalidInput { .. } => Self {
                status: StatusCode::BAD_REQUEST,
                message: err.to_string(),
            },
            ApiError::ResourceNotFound { .. } => Self {
                status: StatusCode::NOT_FOUND,
                message: err.to_string(),
            },
            ApiError::RateLimited { .. } => Self {
                status: StatusCode::TOO_MANY_REQUESTS,
                message: err.to_string(),
            },
            // Internal detail is for the log, not the client.
            ApiError::Internal { message } => {
                error!(detail = %message, "Internal error");
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: String::from("Internal server error"),
                }
            }
        }
    }
}

impl From<stripboard_api::AuthError> for HttpError {
    fn from(err: stripboard_api::AuthError) -> Self {
        Self::from(ApiError::from(err))
    }
}

impl From<PersistenceError> for HttpError {
    fn from(err: PersistenceError) -> Self {
        error!(error = %err, "Persistence error");
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: String::from("Internal server error"),
        }
    }
}

/// Handler for POST `/auth/login` endpoint.
///
/// Mirrors a provider-verified identity into the profile store and issues
/// a bearer session token.
async fn handle_login(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, HttpError> {
    info!(external_id = %req.external_id, username = %req.username, "Handling login request");

    let grant_admin: bool = app_state
        .bootstrap_admin
        .as_deref()
        .is_some_and(|admin| admin == req.external_id);

    let mut persistence = app_state.persistence.lock().await;
    let (session_token, actor, profile) = AuthenticationService::login(
        &mut persistence,
        &req.external_id,
        &req.username,
        req.display_name.as_deref().unwrap_or(""),
        grant_admin,
    )?;
    drop(persistence);

    Ok(Json(LoginResponse {
        session_token,
        user: user_to_info(&profile),
        capabilities: compute_user_capabilities(&actor),
    }))
}

/// Handler for POST `/auth/logout` endpoint.
async fn handle_logout(
    AxumState(app_state): AxumState<AppState>,
    parts: axum::http::request::Parts,
) -> Result<Json<AckResponse>, HttpError> {
    let token: String = bearer_token(&parts).map_err(|_| HttpError {
        status: StatusCode::UNAUTHORIZED,
        message: String::from("Missing or invalid Authorization header"),
    })?;

    let mut persistence = app_state.persistence.lock().await;
    AuthenticationService::logout(&mut persistence, &token)?;
    drop(persistence);

    Ok(Json(AckResponse {
        success: true,
        message: String::from("Logged out"),
    }))
}

/// Handler for GET `/auth/whoami` endpoint.
async fn handle_whoami(
    SessionUser(actor, profile): SessionUser,
) -> Result<Json<WhoAmIResponse>, HttpError> {
    Ok(Json(WhoAmIResponse {
        user: user_to_info(&profile),
        capabilities: compute_user_capabilities(&actor),
    }))
}

/// Handler for POST `/flights/file` endpoint.
///
/// Public filing path: rate-limited, capacity-checked, strip starts in
/// `delivery`.
async fn handle_file_flight(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _profile): SessionUser,
    Json(req): Json<FileFlightRequest>,
) -> Result<Json<FlightInfo>, HttpError> {
    info!(callsign = %req.callsign, airport = %req.airport, "Handling file_flight request");

    let mut persistence = app_state.persistence.lock().await;
    let filed: FlightInfo = file_flight(&mut persistence, &app_state.limiter, req, &actor)?;
    drop(persistence);

    app_state.live.broadcast(&live::LiveEvent::FlightFiled {
        flight_id: filed.flight_id,
        callsign: filed.callsign.clone(),
        airport: filed.airport.clone(),
    });

    Ok(Json(filed))
}

/// Handler for POST `/flights` endpoint.
///
/// Controller path: explicit status, no capacity ceiling.
async fn handle_create_flight(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _profile): SessionUser,
    Json(req): Json<CreateFlightRequest>,
) -> Result<Json<FlightInfo>, HttpError> {
    info!(callsign = %req.callsign, airport = %req.airport, "Handling create_flight request");

    let mut persistence = app_state.persistence.lock().await;
    let created: FlightInfo = create_flight(&mut persistence, req, &actor)?;
    drop(persistence);

    app_state.live.broadcast(&live::LiveEvent::FlightFiled {
        flight_id: created.flight_id,
        callsign: created.callsign.clone(),
        airport: created.airport.clone(),
    });

    Ok(Json(created))
}

/// Handler for GET `/flights` endpoint.
async fn handle_list_flights(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _profile): SessionUser,
    Query(query): Query<ListFlightsQuery>,
) -> Result<Json<ListFlightsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: ListFlightsResponse =
        list_flights(&mut persistence, query.airport.as_deref(), &actor)?;
    Ok(Json(response))
}

/// Handler for GET `/flights/mine` endpoint.
async fn handle_my_flights(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _profile): SessionUser,
) -> Result<Json<ListFlightsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: ListFlightsResponse = my_flights(&mut persistence, &actor)?;
    Ok(Json(response))
}

/// Handler for GET `/flights/{flight_id}` endpoint.
async fn handle_get_flight(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _profile): SessionUser,
    Path(flight_id): Path<i64>,
) -> Result<Json<FlightInfo>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let flight: FlightInfo = get_flight(&mut persistence, flight_id, &actor)?;
    Ok(Json(flight))
}

/// Handler for PATCH `/flights/{flight_id}` endpoint.
async fn handle_update_flight(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _profile): SessionUser,
    Path(flight_id): Path<i64>,
    Json(req): Json<UpdateFlightRequest>,
) -> Result<Json<FlightInfo>, HttpError> {
    info!(flight_id, "Handling update_flight request");

    let mut persistence = app_state.persistence.lock().await;
    let updated: FlightInfo = update_flight(&mut persistence, flight_id, req, &actor)?;
    drop(persistence);

    app_state.live.broadcast(&live::LiveEvent::FlightUpdated {
        flight_id: updated.flight_id,
        callsign: updated.callsign.clone(),
        airport: updated.airport.clone(),
        status: updated.status.clone(),
    });

    Ok(Json(updated))
}

/// Handler for DELETE `/flights/{flight_id}` endpoint.
async fn handle_delete_flight(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _profile): SessionUser,
    Path(flight_id): Path<i64>,
) -> Result<Json<DeleteFlightResponse>, HttpError> {
    info!(flight_id, "Handling delete_flight request");

    let mut persistence = app_state.persistence.lock().await;
    let deleted: DeleteFlightResponse = delete_flight(&mut persistence, flight_id, &actor)?;
    drop(persistence);

    app_state.live.broadcast(&live::LiveEvent::FlightDeleted {
        flight_id: deleted.flight_id,
        callsign: deleted.callsign.clone(),
    });

    Ok(Json(deleted))
}

/// Handler for GET `/flights/{flight_id}/history` endpoint.
async fn handle_get_flight_history(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _profile): SessionUser,
    Path(flight_id): Path<i64>,
) -> Result<Json<Vec<HistoryEntryInfo>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let entries: Vec<HistoryEntryInfo> =
        get_flight_history(&mut persistence, flight_id, &actor)?;
    Ok(Json(entries))
}

/// Handler for POST `/flights/import` endpoint.
async fn handle_import_flights(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _profile): SessionUser,
    Json(req): Json<ImportFlightsRequest>,
) -> Result<Json<ImportFlightsResponse>, HttpError> {
    info!(rows = req.flights.len(), "Handling import_flights request");

    let mut persistence = app_state.persistence.lock().await;
    let response: ImportFlightsResponse = import_flights(&mut persistence, req, &actor)?;
    drop(persistence);

    if response.created_count > 0 {
        app_state.live.broadcast(&live::LiveEvent::FlightsImported {
            created_count: response.created_count,
        });
    }

    Ok(Json(response))
}

/// Handler for GET `/settings` endpoint. Readable without authentication.
async fn handle_get_settings(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<EventSettings>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let settings: EventSettings = get_event_settings(&mut persistence)?;
    Ok(Json(settings))
}

/// Handler for PATCH `/settings` endpoint. Admin tier.
async fn handle_update_settings(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _profile): SessionUser,
    Json(patch): Json<SettingsPatch>,
) -> Result<Json<EventSettings>, HttpError> {
    info!("Handling update_settings request");

    let mut persistence = app_state.persistence.lock().await;
    let merged: EventSettings = update_event_settings(&mut persistence, patch, &actor)?;
    drop(persistence);

    app_state.live.broadcast(&live::LiveEvent::SettingsUpdated);

    Ok(Json(merged))
}

/// Handler for GET `/users` endpoint. Admin tier.
async fn handle_list_users(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _profile): SessionUser,
) -> Result<Json<ListUsersResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: ListUsersResponse = list_users(&mut persistence, &actor)?;
    Ok(Json(response))
}

/// Handler for POST `/users/{user_id}/controller` endpoint. Admin tier.
async fn handle_toggle_controller(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _profile): SessionUser,
    Path(user_id): Path<i64>,
) -> Result<Json<ToggleControllerResponse>, HttpError> {
    info!(user_id, "Handling toggle_controller request");

    let mut persistence = app_state.persistence.lock().await;
    let response: ToggleControllerResponse =
        toggle_controller(&mut persistence, user_id, &actor)?;
    Ok(Json(response))
}

/// Handler for POST `/users/{user_id}/admin` endpoint. Admin tier.
async fn handle_set_admin(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _profile): SessionUser,
    Path(user_id): Path<i64>,
    Json(req): Json<SetAdminRequest>,
) -> Result<Json<SetAdminResponse>, HttpError> {
    info!(user_id, is_admin = req.is_admin, "Handling set_admin request");

    let mut persistence = app_state.persistence.lock().await;
    let response: SetAdminResponse =
        set_admin(&mut persistence, user_id, req.is_admin, &actor)?;
    Ok(Json(response))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/auth/login", post(handle_login))
        .route("/auth/logout", post(handle_logout))
        .route("/auth/whoami", get(handle_whoami))
        .route("/flights", get(handle_list_flights))
        .route("/flights", post(handle_create_flight))
        .route("/flights/file", post(handle_file_flight))
        .route("/flights/mine", get(handle_my_flights))
        .route("/flights/import", post(handle_import_flights))
        .route("/flights/{flight_id}", get(handle_get_flight))
        .route("/flights/{flight_id}", patch(handle_update_flight))
        .route("/flights/{flight_id}", delete(handle_delete_flight))
        .route("/flights/{flight_id}/history", get(handle_get_flight_history))
        .route("/settings", get(handle_get_settings))
        .route("/settings", patch(handle_update_settings))
        .route("/users", get(handle_list_users))
        .route("/users/{user_id}/controller", post(handle_toggle_controller))
        .route("/users/{user_id}/admin", post(handle_set_admin))
        .route("/live", get(live_events_handler))
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

    info!("Initializing Stripboard Server");

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    if let Some(admin) = &args.bootstrap_admin {
        info!(external_id = %admin, "Bootstrap admin identity configured");
    }

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        limiter: Arc::new(FixedWindowLimiter::default()),
        live: LiveEventBroadcaster::new(),
        bootstrap_admin: args.bootstrap_admin,
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
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode as HttpStatusCode},
    };
    use tower::ServiceExt;

    /// Helper to create test app state with in-memory persistence.
    ///
    /// The identity `admin-ext` is configured as the bootstrap admin.
    fn create_test_app_state() -> AppState {
        let persistence: Persistence =
            Persistence::new_in_memory().expect("Failed to create in-memory persistence");
        AppState {
            persistence: Arc::new(Mutex::new(persistence)),
            limiter: Arc::new(FixedWindowLimiter::default()),
            live: LiveEventBroadcaster::new(),
            bootstrap_admin: Some(String::from("admin-ext")),
        }
    }

    /// Logs in an identity and returns the session token.
    async fn login(app: &Router, external_id: &str, username: &str) -> String {
        let request: LoginRequest = LoginRequest {
            external_id: external_id.to_string(),
            username: username.to_string(),
            display_name: None,
        };
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/auth/login")
                    .header("content-type", "application/json")
                    .body(Body::from(serde_json::to_string(&request).unwrap()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let login_response: LoginResponse = serde_json::from_slice(&bytes).unwrap();
        login_response.session_token
    }

    fn test_file_request(callsign: &str, airport: &str) -> FileFlightRequest {
        FileFlightRequest {
            airport: airport.to_string(),
            callsign: callsign.to_string(),
            aircraft_type: String::from("B738"),
            departure: String::from("KJFK"),
            arrival: String::from("KLAX"),
            altitude: String::from("FL350"),
            speed: String::from("450"),
            departure_time: String::from("1830Z"),
            squawk: None,
            route: None,
            notes: None,
            discord_username: None,
            geofs_callsign: None,
        }
    }

    /// Files a flight over HTTP and returns the created strip.
    async fn file_over_http(app: &Router, token: &str, callsign: &str) -> FlightInfo {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/flights/file")
                    .header("content-type", "application/json")
                    .header("Authorization", format!("Bearer {token}"))
                    .body(Body::from(
                        serde_json::to_string(&test_file_request(callsign, "KJFK")).unwrap(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_login_then_whoami_round_trip() {
        let app: Router = build_router(create_test_app_state());
        let token: String = login(&app, "discord-1", "pilotA").await;

        let response = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/auth/whoami")
                    .header("Authorization", format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let whoami: WhoAmIResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(whoami.user.username, "pilotA");
        assert!(!whoami.user.is_controller);
    }

    #[tokio::test]
    async fn test_unauthenticated_filing_is_rejected() {
        let app: Router = build_router(create_test_app_state());

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/flights/file")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        serde_json::to_string(&test_file_request("DAL456", "KJFK")).unwrap(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_filed_flight_starts_in_delivery() {
        let app: Router = build_router(create_test_app_state());
        let token: String = login(&app, "discord-1", "pilotA").await;

        let filed: FlightInfo = file_over_http(&app, &token, "DAL456").await;

        assert_eq!(filed.status, "delivery");
        assert_eq!(filed.callsign, "DAL456");
        assert_eq!(filed.discord_username, "pilotA");
    }

    #[tokio::test]
    async fn test_duplicate_callsign_maps_to_422() {
        let app: Router = build_router(create_test_app_state());
        let token: String = login(&app, "discord-1", "pilotA").await;
        file_over_http(&app, &token, "DAL456").await;

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/flights/file")
                    .header("content-type", "application/json")
                    .header("Authorization", format!("Bearer {token}"))
                    .body(Body::from(
                        serde_json::to_string(&test_file_request("dal456", "EGLL")).unwrap(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_missing_field_maps_to_400() {
        let app: Router = build_router(create_test_app_state());
        let token: String = login(&app, "discord-1", "pilotA").await;

        let mut request: FileFlightRequest = test_file_request("DAL456", "KJFK");
        request.aircraft_type = String::new();

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/flights/file")
                    .header("content-type", "application/json")
                    .header("Authorization", format!("Bearer {token}"))
                    .body(Body::from(serde_json::to_string(&request).unwrap()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_pilot_delete_is_forbidden() {
        let app: Router = build_router(create_test_app_state());
        let token: String = login(&app, "discord-1", "pilotA").await;
        let filed: FlightInfo = file_over_http(&app, &token, "DAL456").await;

        let response = app
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(format!("/flights/{}", filed.flight_id))
                    .header("Authorization", format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_settings_are_readable_without_auth() {
        let app: Router = build_router(create_test_app_state());

        let response = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/settings")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let settings: EventSettings = serde_json::from_slice(&bytes).unwrap();
        assert!(!settings.is_event_live);
    }

    #[tokio::test]
    async fn test_settings_write_requires_admin() {
        let app: Router = build_router(create_test_app_state());
        let pilot_token: String = login(&app, "discord-1", "pilotA").await;
        let admin_token: String = login(&app, "admin-ext", "eventAdmin").await;

        let patch: serde_json::Value = serde_json::json!({ "is_event_live": true });

        let forbidden = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("PATCH")
                    .uri("/settings")
                    .header("content-type", "application/json")
                    .header("Authorization", format!("Bearer {pilot_token}"))
                    .body(Body::from(patch.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(forbidden.status(), HttpStatusCode::FORBIDDEN);

        let allowed = app
            .oneshot(
                Request::builder()
                    .method("PATCH")
                    .uri("/settings")
                    .header("content-type", "application/json")
                    .header("Authorization", format!("Bearer {admin_token}"))
                    .body(Body::from(patch.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(allowed.status(), HttpStatusCode::OK);

        let bytes = axum::body::to_bytes(allowed.into_body(), usize::MAX)
            .await
            .unwrap();
        let settings: EventSettings = serde_json::from_slice(&bytes).unwrap();
        assert!(settings.is_event_live);
    }

    #[tokio::test]
    async fn test_admin_grants_controller_then_controller_deletes() {
        let app: Router = build_router(create_test_app_state());
        let pilot_token: String = login(&app, "discord-1", "pilotA").await;
        let admin_token: String = login(&app, "admin-ext", "eventAdmin").await;
        let filed: FlightInfo = file_over_http(&app, &pilot_token, "DAL456").await;

        // Find the pilot's user id via the admin user listing.
        let listing = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/users")
                    .header("Authorization", format!("Bearer {admin_token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(listing.status(), HttpStatusCode::OK);
        let bytes = axum::body::to_bytes(listing.into_body(), usize::MAX)
            .await
            .unwrap();
        let users: ListUsersResponse = serde_json::from_slice(&bytes).unwrap();
        let pilot_id: i64 = users
            .users
            .iter()
            .find(|u| u.username == "pilotA")
            .expect("pilot profile exists")
            .user_id;

        // Grant the controller flag.
        let toggled = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(format!("/users/{pilot_id}/controller"))
                    .header("Authorization", format!("Bearer {admin_token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(toggled.status(), HttpStatusCode::OK);

        // The pilot's next session sees the controller tier.
        let controller_token: String = login(&app, "discord-1", "pilotA").await;
        let response = app
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(format!("/flights/{}", filed.flight_id))
                    .header("Authorization", format!("Bearer {controller_token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let deleted: DeleteFlightResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(deleted.callsign, "DAL456");
    }

    #[tokio::test]
    async fn test_admin_self_toggle_maps_to_422() {
        let app: Router = build_router(create_test_app_state());
        let admin_token: String = login(&app, "admin-ext", "eventAdmin").await;

        let listing = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/users")
                    .header("Authorization", format!("Bearer {admin_token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let bytes = axum::body::to_bytes(listing.into_body(), usize::MAX)
            .await
            .unwrap();
        let users: ListUsersResponse = serde_json::from_slice(&bytes).unwrap();
        let admin_id: i64 = users.users[0].user_id;

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(format!("/users/{admin_id}/controller"))
                    .header("Authorization", format!("Bearer {admin_token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_logout_invalidates_the_session() {
        let app: Router = build_router(create_test_app_state());
        let token: String = login(&app, "discord-1", "pilotA").await;

        let logout = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/auth/logout")
                    .header("Authorization", format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(logout.status(), HttpStatusCode::OK);

        let whoami = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/auth/whoami")
                    .header("Authorization", format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(whoami.status(), HttpStatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_board_filter_is_visible_to_pilots() {
        let app: Router = build_router(create_test_app_state());
        let token: String = login(&app, "discord-1", "pilotA").await;
        file_over_http(&app, &token, "DAL1").await;

        // The full list is controller tier.
        let full = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/flights")
                    .header("Authorization", format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(full.status(), HttpStatusCode::FORBIDDEN);

        // A filtered board is open to any authenticated actor.
        let board = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/flights?airport=kjfk")
                    .header("Authorization", format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(board.status(), HttpStatusCode::OK);

        let bytes = axum::body::to_bytes(board.into_body(), usize::MAX)
            .await
            .unwrap();
        let listing: ListFlightsResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(listing.flights.len(), 1);
    }
}
