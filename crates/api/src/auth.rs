// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authentication and authorization types and services.

use time::{Duration, OffsetDateTime};
use stripboard_audit::Actor;
use stripboard_domain::{Flight, FlightStatus};
use stripboard_persistence::{Persistence, PersistenceError, SessionData, UserProfileData};

use crate::error::AuthError;

/// An authenticated actor with their role flags.
///
/// Actors are linked user profiles: pilots by default, elevated to
/// controller and/or admin via the role flags. The two flags are
/// independent authorization tiers — controllers manage flights, admins
/// manage event settings and roles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedActor {
    /// The canonical user identifier.
    pub user_id: i64,
    /// The auth provider's stable subject id.
    pub external_id: String,
    /// The linked username. Flight ownership matches against this.
    pub username: String,
    /// Whether this actor may manage any flight.
    pub is_controller: bool,
    /// Whether this actor may manage settings and roles.
    pub is_admin: bool,
}

impl AuthenticatedActor {
    /// Builds an actor from a stored profile.
    #[must_use]
    pub fn from_profile(profile: &UserProfileData) -> Self {
        Self {
            user_id: profile.user_id,
            external_id: profile.external_id.clone(),
            username: profile.username.clone(),
            is_controller: profile.is_controller,
            is_admin: profile.is_admin,
        }
    }

    /// Converts this actor into an audit `Actor` for history attribution.
    #[must_use]
    pub fn to_audit_actor(&self) -> Actor {
        let actor_type: String = if self.is_admin {
            String::from("admin")
        } else if self.is_controller {
            String::from("controller")
        } else {
            String::from("pilot")
        };
        Actor::new(self.username.clone(), actor_type)
    }
}

/// Authorization service for enforcing role-based access control.
///
/// This service determines whether an authenticated actor has permission
/// to perform a specific action based on their role flags and, for flight
/// edits, strip ownership.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Checks that an actor holds the controller tier.
    ///
    /// # Arguments
    ///
    /// * `actor` - The authenticated actor
    /// * `action` - The action name, used in the error
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not a controller.
    pub fn authorize_controller(
        actor: &AuthenticatedActor,
        action: &str,
    ) -> Result<(), AuthError> {
        if actor.is_controller {
            Ok(())
        } else {
            Err(AuthError::Forbidden {
                action: action.to_string(),
                required_role: String::from("Controller"),
            })
        }
    }

    /// Checks that an actor holds the admin tier.
    ///
    /// # Arguments
    ///
    /// * `actor` - The authenticated actor
    /// * `action` - The action name, used in the error
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not an admin.
    pub fn authorize_admin(actor: &AuthenticatedActor, action: &str) -> Result<(), AuthError> {
        if actor.is_admin {
            Ok(())
        } else {
            Err(AuthError::Forbidden {
                action: action.to_string(),
                required_role: String::from("Admin"),
            })
        }
    }

    /// Checks that an actor may edit the given flight strip.
    ///
    /// Controllers may edit any strip in any sector. A pilot may edit a
    /// strip only while it is still in `delivery` and its
    /// `discord_username` matches their linked identity. Once a controller
    /// advances the strip past `delivery`, the filing pilot permanently
    /// loses edit rights.
    ///
    /// # Arguments
    ///
    /// * `actor` - The authenticated actor
    /// * `flight` - The strip being edited
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is neither a controller nor the owning
    /// pilot of a strip still in `delivery`.
    pub fn authorize_edit_flight(
        actor: &AuthenticatedActor,
        flight: &Flight,
    ) -> Result<(), AuthError> {
        if actor.is_controller {
            return Ok(());
        }
        if flight.is_owned_by(&actor.username) && flight.status == FlightStatus::Delivery {
            return Ok(());
        }
        Err(AuthError::Forbidden {
            action: String::from("update_flight"),
            required_role: String::from("Controller, or owning pilot while in delivery"),
        })
    }

    /// Checks that an actor may delete a flight strip.
    ///
    /// Pilots never delete, not even their own strips.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not a controller.
    pub fn authorize_delete_flight(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        Self::authorize_controller(actor, "delete_flight")
    }
}

/// Authentication service for session-based authentication.
///
/// The external auth provider verifies credentials; the login boundary
/// receives the provider-verified identity payload, mirrors it into the
/// profile store, and issues a bearer session token.
pub struct AuthenticationService;

impl AuthenticationService {
    /// Default session expiration duration (30 days).
    const DEFAULT_SESSION_EXPIRATION: Duration = Duration::days(30);

    /// Logs in a provider-verified identity and creates a session.
    ///
    /// On first access the profile is created; later logins refresh the
    /// profile fields. Expired sessions are purged opportunistically.
    ///
    /// # Arguments
    ///
    /// * `persistence` - The persistence layer
    /// * `external_id` - The provider's stable subject id
    /// * `username` - The linked username
    /// * `display_name` - The profile display name
    /// * `grant_admin` - Whether this identity is the configured bootstrap admin
    ///
    /// # Returns
    ///
    /// A tuple of (`session_token`, `authenticated_actor`, `profile`)
    ///
    /// # Errors
    ///
    /// Returns an error if the identity payload is incomplete or storage fails.
    pub fn login(
        persistence: &mut Persistence,
        external_id: &str,
        username: &str,
        display_name: &str,
        grant_admin: bool,
    ) -> Result<(String, AuthenticatedActor, UserProfileData), AuthError> {
        if external_id.trim().is_empty() {
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("External id cannot be empty"),
            });
        }
        if username.trim().is_empty() {
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Username cannot be empty"),
            });
        }

        // Mirror the provider identity into the profile store.
        let profile: UserProfileData = persistence
            .upsert_user_on_login(external_id, username, display_name, grant_admin)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Database error: {e}"),
            })?;

        // Generate session token
        let session_token: String = Self::generate_session_token();

        // Calculate expiration time
        let expires_at: OffsetDateTime =
            OffsetDateTime::now_utc() + Self::DEFAULT_SESSION_EXPIRATION;
        let expires_at_str: String = expires_at
            .format(&time::format_description::well_known::Iso8601::DEFAULT)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to format expiration time: {e}"),
            })?;

        // Create session
        persistence
            .create_session(&session_token, profile.user_id, &expires_at_str)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to create session: {e}"),
            })?;

        // Opportunistically purge sessions that have already expired.
        let now_str: String = OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Iso8601::DEFAULT)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to format current time: {e}"),
            })?;
        persistence
            .delete_expired_sessions(&now_str)
            .map_err(Self::map_persistence_error)?;

        let actor: AuthenticatedActor = AuthenticatedActor::from_profile(&profile);
        Ok((session_token, actor, profile))
    }

    /// Validates a session token and returns the authenticated actor.
    ///
    /// # Arguments
    ///
    /// * `persistence` - The persistence layer
    /// * `session_token` - The session token to validate
    ///
    /// # Returns
    ///
    /// A tuple of (`authenticated_actor`, `profile`)
    ///
    /// # Errors
    ///
    /// Returns an error if the session is invalid or expired.
    pub fn validate_session(
        persistence: &mut Persistence,
        session_token: &str,
    ) -> Result<(AuthenticatedActor, UserProfileData), AuthError> {
        // Retrieve session
        let session: SessionData = persistence
            .get_session_by_token(session_token)
            .map_err(Self::map_persistence_error)?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: String::from("Invalid session token"),
            })?;

        // Check if session is expired
        let expires_at: OffsetDateTime = OffsetDateTime::parse(
            &session.expires_at,
            &time::format_description::well_known::Iso8601::DEFAULT,
        )
        .map_err(|e| AuthError::AuthenticationFailed {
            reason: format!("Failed to parse session expiration: {e}"),
        })?;

        if OffsetDateTime::now_utc() > expires_at {
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Session expired"),
            });
        }

        // Retrieve the profile this session belongs to
        let profile: UserProfileData = persistence
            .get_user_by_id(session.user_id)
            .map_err(Self::map_persistence_error)?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: String::from("User not found"),
            })?;

        // Update session activity
        persistence
            .update_session_activity(session.session_id)
            .map_err(Self::map_persistence_error)?;

        let actor: AuthenticatedActor = AuthenticatedActor::from_profile(&profile);
        Ok((actor, profile))
    }

    /// Logs out by deleting the session.
    ///
    /// # Arguments
    ///
    /// * `persistence` - The persistence layer
    /// * `session_token` - The session token to delete
    ///
    /// # Errors
    ///
    /// Returns an error if the logout fails.
    pub fn logout(persistence: &mut Persistence, session_token: &str) -> Result<(), AuthError> {
        persistence
            .delete_session(session_token)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to delete session: {e}"),
            })?;

        Ok(())
    }

    /// Generates a session token.
    ///
    /// Combines a timestamp with two random 64-bit values so tokens are not
    /// guessable from the clock alone.
    fn generate_session_token() -> String {
        use std::time::{SystemTime, UNIX_EPOCH};
        let timestamp: u128 = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        format!(
            "session_{timestamp}_{:016x}{:016x}",
            rand::random::<u64>(),
            rand::random::<u64>()
        )
    }

    /// Maps persistence errors to authentication errors.
    fn map_persistence_error(err: PersistenceError) -> AuthError {
        AuthError::AuthenticationFailed {
            reason: format!("Database error: {err}"),
        }
    }
}
