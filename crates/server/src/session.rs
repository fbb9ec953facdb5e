// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Session extraction and authentication middleware for the server.
//!
//! This module provides Axum extractors for validating session tokens
//! and enforcing authentication at the server boundary.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use axum::Json;
use serde::Serialize;
use tracing::{debug, warn};
use stripboard_api::{AuthenticatedActor, AuthenticationService};
use stripboard_persistence::UserProfileData;

use crate::AppState;

/// Extractor for authenticated users.
///
/// This extractor validates the session token from the Authorization header
/// and returns the authenticated actor plus their stored profile.
///
/// # Authentication Flow
///
/// 1. Extract `Authorization: Bearer <token>` header
/// 2. Validate session token via `AuthenticationService::validate_session`
/// 3. Check session expiration
/// 4. Return `AuthenticatedActor` and `UserProfileData`
///
/// # Errors
///
/// Returns HTTP 401 Unauthorized if:
/// - Authorization header is missing
/// - Authorization header format is invalid
/// - Session token is invalid or expired
pub struct SessionUser(pub AuthenticatedActor, pub UserProfileData);

impl FromRequestParts<AppState> for SessionUser {
    type Rejection = SessionError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token: String = bearer_token(parts)?;

        // Validate session
        let mut persistence = state.persistence.lock().await;
        let (actor, profile) = AuthenticationService::validate_session(&mut persistence, &token)
            .map_err(|e| {
                warn!(error = %e, "Session validation failed");
                SessionError::InvalidSession(e.to_string())
            })?;

        debug!(
            username = %profile.username,
            is_controller = profile.is_controller,
            is_admin = profile.is_admin,
            "Session validated successfully"
        );

        Ok(Self(actor, profile))
    }
}

/// Extracts the bearer token from the Authorization header.
///
/// # Errors
///
/// Returns a `SessionError` when the header is missing or malformed.
pub fn bearer_token(parts: &Parts) -> Result<String, SessionError> {
    let auth_header = parts
        .headers
        .get("Authorization")
        .ok_or_else(|| {
            debug!("Missing Authorization header");
            SessionError::MissingAuthorizationHeader
        })?
        .to_str()
        .map_err(|_| {
            warn!("Invalid Authorization header encoding");
            SessionError::InvalidAuthorizationHeader
        })?;

    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        warn!("Authorization header does not start with 'Bearer '");
        SessionError::InvalidAuthorizationHeader
    })?;

    Ok(token.to_string())
}

/// Session extraction failures, all rejected with HTTP 401.
#[derive(Debug)]
pub enum SessionError {
    /// No Authorization header was sent.
    MissingAuthorizationHeader,
    /// The Authorization header was not a well-formed bearer token.
    InvalidAuthorizationHeader,
    /// The session token did not validate.
    InvalidSession(String),
}

/// Error body for session rejections.
#[derive(Serialize)]
struct SessionErrorResponse {
    error: bool,
    message: String,
}

impl IntoResponse for SessionError {
    fn into_response(self) -> Response {
        let message: String = match self {
            Self::MissingAuthorizationHeader => String::from("Missing Authorization header"),
            Self::InvalidAuthorizationHeader => {
                String::from("Authorization header must be 'Bearer <token>'")
            }
            Self::InvalidSession(reason) => reason,
        };
        let body: Json<SessionErrorResponse> = Json(SessionErrorResponse {
            error: true,
            message,
        });
        (StatusCode::UNAUTHORIZED, body).into_response()
    }
}
