// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for state-changing and read-only operations.
//!
//! Each handler enforces authorization before touching storage, translates
//! inputs into normalized domain values, and translates domain/persistence
//! errors into the API contract. The check-then-write sequences themselves
//! (uniqueness, capacity, history) are transactional inside the persistence
//! layer.

use std::str::FromStr;
use tracing::info;

use stripboard_domain::{
    AirportCode, Callsign, DEFAULT_AIRPORT_CAPACITY, DomainError, EventSettings, Flight,
    FlightPlan, FlightStatus, PilotLink, SettingsPatch, validate_flight_fields, validate_required,
};
use stripboard_persistence::{FlightChangeset, Persistence, UserProfileData};

use crate::auth::{AuthenticatedActor, AuthorizationService};
use crate::capabilities::click_advance_target;
use crate::error::{ApiError, translate_domain_error, translate_persistence_error};
use crate::rate_limit::FixedWindowLimiter;
use crate::request_response::{
    CreateFlightRequest, DeleteFlightResponse, FileFlightRequest, FlightInfo, HistoryEntryInfo,
    ListFlightsResponse, ListUsersResponse, SetAdminResponse, ToggleControllerResponse,
    UpdateFlightRequest, UserInfo,
};
use crate::squawk::generate_unique_squawk;

/// Converts a domain flight into its API representation.
#[must_use]
pub fn flight_to_info(flight: &Flight) -> FlightInfo {
    FlightInfo {
        flight_id: flight.flight_id.unwrap_or_default(),
        airport: flight.airport.value().to_string(),
        callsign: flight.callsign.value().to_string(),
        discord_username: flight.pilot.discord_username.clone(),
        geofs_callsign: flight.pilot.geofs_callsign.clone(),
        aircraft_type: flight.plan.aircraft_type.clone(),
        departure: flight.plan.departure.clone(),
        arrival: flight.plan.arrival.clone(),
        altitude: flight.plan.altitude.clone(),
        speed: flight.plan.speed.clone(),
        squawk: flight.plan.squawk.clone(),
        departure_time: flight.plan.departure_time.clone(),
        route: flight.plan.route.clone(),
        notes: flight.plan.notes.clone(),
        status: flight.status.as_str().to_string(),
        next_status: click_advance_target(flight.status).as_str().to_string(),
        created_at: flight.created_at.clone(),
        updated_at: flight.updated_at.clone(),
    }
}

/// Converts a stored profile into its API representation.
#[must_use]
pub fn user_to_info(profile: &UserProfileData) -> UserInfo {
    UserInfo {
        user_id: profile.user_id,
        external_id: profile.external_id.clone(),
        username: profile.username.clone(),
        display_name: profile.display_name.clone(),
        is_controller: profile.is_controller,
        is_admin: profile.is_admin,
        created_at: profile.created_at.clone(),
        last_seen_at: profile.last_seen_at.clone(),
    }
}

/// Files a flight plan via the public filing path.
///
/// This function:
/// - Applies the per-actor filing rate limit
/// - Validates required fields and normalizes the payload
/// - Assigns a unique squawk when none was supplied
/// - Inserts the strip with the board capacity ceiling applied; the
///   uniqueness and capacity checks run in the same transaction as the
///   insert
///
/// The filed strip always starts in `delivery`, and no history entry is
/// written on creation.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `limiter` - The filing rate limiter
/// * `request` - The filing payload
/// * `actor` - The authenticated actor filing the plan
///
/// # Errors
///
/// Returns an error if the actor is rate-limited, a required field is
/// missing, the callsign collides, or the board is full.
pub fn file_flight(
    persistence: &mut Persistence,
    limiter: &FixedWindowLimiter,
    request: FileFlightRequest,
    actor: &AuthenticatedActor,
) -> Result<FlightInfo, ApiError> {
    limiter.check(&actor.external_id)?;

    validate_flight_fields(
        &request.airport,
        &request.callsign,
        &request.aircraft_type,
        &request.departure,
        &request.arrival,
        &request.altitude,
        &request.speed,
        &request.departure_time,
    )
    .map_err(translate_domain_error)?;

    let squawk: String = match request.squawk {
        Some(squawk) if !squawk.trim().is_empty() => squawk,
        _ => generate_unique_squawk(persistence)?,
    };

    // The filing pilot's identity defaults to the actor's linked identity
    // so ownership-based editing works without the pilot re-typing it.
    let discord_username: Option<String> = request
        .discord_username
        .filter(|name| !name.trim().is_empty())
        .or_else(|| Some(actor.username.clone()));

    let flight: Flight = Flight::new(
        AirportCode::new(&request.airport),
        Callsign::new(&request.callsign),
        PilotLink::new(discord_username, request.geofs_callsign),
        FlightPlan::new(
            &request.aircraft_type,
            &request.departure,
            &request.arrival,
            request.altitude,
            request.speed,
            request.departure_time,
            Some(squawk),
            request.route,
            request.notes,
        ),
        FlightStatus::Delivery,
    );

    let created: Flight = persistence
        .create_flight(&flight, Some(DEFAULT_AIRPORT_CAPACITY))
        .map_err(translate_persistence_error)?;

    info!(
        callsign = %created.callsign,
        airport = %created.airport,
        filed_by = %actor.username,
        "Flight plan filed"
    );

    Ok(flight_to_info(&created))
}

/// Builds a normalized domain flight from a controller/import request.
///
/// # Errors
///
/// Returns an error if a required field is missing or the status is not
/// one of the six sectors.
pub(crate) fn build_flight(request: &CreateFlightRequest) -> Result<Flight, ApiError> {
    validate_flight_fields(
        &request.airport,
        &request.callsign,
        &request.aircraft_type,
        &request.departure,
        &request.arrival,
        &request.altitude,
        &request.speed,
        &request.departure_time,
    )
    .map_err(translate_domain_error)?;
    validate_required("status", &request.status).map_err(translate_domain_error)?;

    let status: FlightStatus =
        FlightStatus::from_str(&request.status).map_err(translate_domain_error)?;

    Ok(Flight::new(
        AirportCode::new(&request.airport),
        Callsign::new(&request.callsign),
        PilotLink::new(
            request.discord_username.clone(),
            request.geofs_callsign.clone(),
        ),
        FlightPlan::new(
            &request.aircraft_type,
            &request.departure,
            &request.arrival,
            request.altitude.clone(),
            request.speed.clone(),
            request.departure_time.clone(),
            request.squawk.clone(),
            request.route.clone(),
            request.notes.clone(),
        ),
        status,
    ))
}

/// Creates a flight strip via the controller path.
///
/// The initial sector is set explicitly and no capacity ceiling applies.
/// The callsign uniqueness check runs in the same transaction as the
/// insert.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `request` - The creation payload
/// * `actor` - The authenticated actor
///
/// # Errors
///
/// Returns an error if the actor is not a controller, a field is invalid,
/// or the callsign collides.
pub fn create_flight(
    persistence: &mut Persistence,
    request: CreateFlightRequest,
    actor: &AuthenticatedActor,
) -> Result<FlightInfo, ApiError> {
    AuthorizationService::authorize_controller(actor, "create_flight")?;

    let flight: Flight = build_flight(&request)?;
    let created: Flight = persistence
        .create_flight(&flight, None)
        .map_err(translate_persistence_error)?;

    info!(
        callsign = %created.callsign,
        airport = %created.airport,
        created_by = %actor.username,
        "Flight strip created"
    );

    Ok(flight_to_info(&created))
}

/// Normalizes an update request into a storage changeset.
///
/// Fields that carry normalization on create get the same treatment here:
/// airport, callsign, aircraft type, departure, and arrival are uppercased.
/// Required fields present in the patch must be non-empty.
fn build_changeset(request: UpdateFlightRequest) -> Result<FlightChangeset, ApiError> {
    let required_present: [(&str, &Option<String>); 8] = [
        ("airport", &request.airport),
        ("callsign", &request.callsign),
        ("aircraft_type", &request.aircraft_type),
        ("departure", &request.departure),
        ("arrival", &request.arrival),
        ("altitude", &request.altitude),
        ("speed", &request.speed),
        ("departure_time", &request.departure_time),
    ];
    for (field, value) in required_present {
        if let Some(value) = value {
            validate_required(field, value).map_err(translate_domain_error)?;
        }
    }

    let status: Option<String> = match request.status {
        Some(status) => Some(
            FlightStatus::from_str(&status)
                .map_err(translate_domain_error)?
                .as_str()
                .to_string(),
        ),
        None => None,
    };

    let uppercase = |value: Option<String>| value.map(|v| v.trim().to_uppercase());

    Ok(FlightChangeset {
        airport: request.airport.map(|v| AirportCode::new(&v).value().to_string()),
        callsign: request.callsign.map(|v| Callsign::new(&v).value().to_string()),
        discord_username: request.discord_username,
        geofs_callsign: request.geofs_callsign,
        aircraft_type: uppercase(request.aircraft_type),
        departure: uppercase(request.departure),
        arrival: uppercase(request.arrival),
        altitude: request.altitude,
        speed: request.speed,
        squawk: request.squawk,
        departure_time: request.departure_time,
        route: request.route,
        notes: request.notes,
        status,
        updated_at: None,
    })
}

/// Partially updates a flight strip.
///
/// This function:
/// - Loads the strip and enforces the edit policy (controllers always; the
///   owning pilot only while the strip is in `delivery`)
/// - Normalizes present fields consistently with create
/// - Applies the patch; a status change appends exactly one history entry
///   atomically with the patch
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `flight_id` - The flight identifier
/// * `request` - The fields to change
/// * `actor` - The authenticated actor
///
/// # Errors
///
/// Returns an error if the strip is missing, the actor may not edit it, a
/// present field is invalid, or the new callsign collides.
pub fn update_flight(
    persistence: &mut Persistence,
    flight_id: i64,
    request: UpdateFlightRequest,
    actor: &AuthenticatedActor,
) -> Result<FlightInfo, ApiError> {
    let current: Flight = persistence
        .get_flight(flight_id)
        .map_err(translate_persistence_error)?;

    AuthorizationService::authorize_edit_flight(actor, &current)?;

    let changes: FlightChangeset = build_changeset(request)?;
    let updated: Flight = persistence
        .update_flight(flight_id, &changes, Some(&actor.username))
        .map_err(translate_persistence_error)?;

    info!(
        flight_id,
        callsign = %updated.callsign,
        status = %updated.status,
        updated_by = %actor.username,
        "Flight strip updated"
    );

    Ok(flight_to_info(&updated))
}

/// Deletes a flight strip and its history trail.
///
/// Controller tier only; pilots never delete, not even their own strips.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `flight_id` - The flight identifier
/// * `actor` - The authenticated actor
///
/// # Errors
///
/// Returns an error if the actor is not a controller or the strip is
/// missing.
pub fn delete_flight(
    persistence: &mut Persistence,
    flight_id: i64,
    actor: &AuthenticatedActor,
) -> Result<DeleteFlightResponse, ApiError> {
    AuthorizationService::authorize_delete_flight(actor)?;

    let (deleted_id, callsign) = persistence
        .delete_flight(flight_id)
        .map_err(translate_persistence_error)?;

    info!(
        flight_id = deleted_id,
        callsign = %callsign,
        deleted_by = %actor.username,
        "Flight strip deleted"
    );

    Ok(DeleteFlightResponse {
        flight_id: deleted_id,
        callsign: callsign.clone(),
        message: format!("Deleted flight '{callsign}'"),
    })
}

/// Retrieves a single flight strip. Controller tier.
///
/// # Errors
///
/// Returns an error if the actor is not a controller or the strip is
/// missing.
pub fn get_flight(
    persistence: &mut Persistence,
    flight_id: i64,
    actor: &AuthenticatedActor,
) -> Result<FlightInfo, ApiError> {
    AuthorizationService::authorize_controller(actor, "get_flight")?;

    let flight: Flight = persistence
        .get_flight(flight_id)
        .map_err(translate_persistence_error)?;
    Ok(flight_to_info(&flight))
}

/// Lists flight strips.
///
/// With an airport filter, any authenticated actor may read that board.
/// The unfiltered full list is controller tier.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `airport` - Optional board filter
/// * `actor` - The authenticated actor
///
/// # Errors
///
/// Returns an error if the unfiltered list is requested without the
/// controller tier, or the query fails.
pub fn list_flights(
    persistence: &mut Persistence,
    airport: Option<&str>,
    actor: &AuthenticatedActor,
) -> Result<ListFlightsResponse, ApiError> {
    let flights: Vec<Flight> = match airport {
        Some(airport) => {
            let normalized: AirportCode = AirportCode::new(airport);
            persistence
                .list_flights_for_airport(normalized.value())
                .map_err(translate_persistence_error)?
        }
        None => {
            AuthorizationService::authorize_controller(actor, "list_flights")?;
            persistence
                .list_flights()
                .map_err(translate_persistence_error)?
        }
    };

    Ok(ListFlightsResponse {
        flights: flights.iter().map(flight_to_info).collect(),
    })
}

/// Lists the flight strips filed by the actor's linked identity.
///
/// # Errors
///
/// Returns an error if the actor has no linked identity or the query fails.
pub fn my_flights(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
) -> Result<ListFlightsResponse, ApiError> {
    if actor.username.trim().is_empty() {
        return Err(translate_domain_error(DomainError::IdentityNotLinked));
    }

    let flights: Vec<Flight> = persistence
        .list_flights_for_pilot(&actor.username)
        .map_err(translate_persistence_error)?;

    Ok(ListFlightsResponse {
        flights: flights.iter().map(flight_to_info).collect(),
    })
}

/// Retrieves the status history for a flight strip, newest first.
///
/// Controller tier. A strip that no longer exists has an empty trail: its
/// history was removed with it, so the result is an empty list rather than
/// an error.
///
/// # Errors
///
/// Returns an error if the actor is not a controller or the query fails.
pub fn get_flight_history(
    persistence: &mut Persistence,
    flight_id: i64,
    actor: &AuthenticatedActor,
) -> Result<Vec<HistoryEntryInfo>, ApiError> {
    AuthorizationService::authorize_controller(actor, "get_flight_history")?;

    let entries = persistence
        .get_flight_history(flight_id)
        .map_err(translate_persistence_error)?;

    Ok(entries
        .into_iter()
        .map(|entry| HistoryEntryInfo {
            history_id: entry.history_id,
            flight_id: entry.flight_id,
            old_status: entry.old_status,
            new_status: entry.new_status,
            changed_by: entry.changed_by,
            changed_at: entry.changed_at,
        })
        .collect())
}

/// Retrieves the event settings, or the documented defaults when never
/// written. Readable without any role.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_event_settings(persistence: &mut Persistence) -> Result<EventSettings, ApiError> {
    persistence
        .get_event_settings()
        .map_err(translate_persistence_error)
}

/// Applies a partial update to the event settings. Admin tier.
///
/// Upsert semantics: an absent record is created from defaults overlaid
/// with the patch; a present record is patched field-by-field.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `patch` - The fields to change
/// * `actor` - The authenticated actor
///
/// # Errors
///
/// Returns an error if the actor is not an admin or the upsert fails.
pub fn update_event_settings(
    persistence: &mut Persistence,
    patch: SettingsPatch,
    actor: &AuthenticatedActor,
) -> Result<EventSettings, ApiError> {
    AuthorizationService::authorize_admin(actor, "update_event_settings")?;

    let merged: EventSettings = persistence
        .update_event_settings(&patch)
        .map_err(translate_persistence_error)?;

    info!(updated_by = %actor.username, "Event settings updated");
    Ok(merged)
}

/// Flips a user's controller flag. Admin tier; self-targeting is rejected.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `target_user_id` - The user whose flag is flipped
/// * `actor` - The authenticated actor
///
/// # Errors
///
/// Returns an error if the actor is not an admin, targets themselves, or
/// the user is missing.
pub fn toggle_controller(
    persistence: &mut Persistence,
    target_user_id: i64,
    actor: &AuthenticatedActor,
) -> Result<ToggleControllerResponse, ApiError> {
    AuthorizationService::authorize_admin(actor, "toggle_controller")?;

    if target_user_id == actor.user_id {
        return Err(translate_domain_error(DomainError::CannotSelfToggle));
    }

    let profile: UserProfileData = persistence
        .toggle_controller(target_user_id)
        .map_err(translate_persistence_error)?;

    info!(
        target_user_id,
        is_controller = profile.is_controller,
        changed_by = %actor.username,
        "Controller flag toggled"
    );

    Ok(ToggleControllerResponse {
        user_id: profile.user_id,
        is_controller: profile.is_controller,
        message: format!(
            "User '{}' is {} a controller",
            profile.username,
            if profile.is_controller { "now" } else { "no longer" }
        ),
    })
}

/// Sets a user's admin flag. Admin tier; removing one's own flag is
/// rejected. Reapplying the stored value is a no-op.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `target_user_id` - The user whose flag is set
/// * `is_admin` - The new flag value
/// * `actor` - The authenticated actor
///
/// # Errors
///
/// Returns an error if the actor is not an admin, demotes themselves, or
/// the user is missing.
pub fn set_admin(
    persistence: &mut Persistence,
    target_user_id: i64,
    is_admin: bool,
    actor: &AuthenticatedActor,
) -> Result<SetAdminResponse, ApiError> {
    AuthorizationService::authorize_admin(actor, "set_admin")?;

    if target_user_id == actor.user_id && !is_admin {
        return Err(translate_domain_error(DomainError::CannotSelfDemote));
    }

    let profile: UserProfileData = persistence
        .set_admin(target_user_id, is_admin)
        .map_err(translate_persistence_error)?;

    info!(
        target_user_id,
        is_admin = profile.is_admin,
        changed_by = %actor.username,
        "Admin flag set"
    );

    Ok(SetAdminResponse {
        user_id: profile.user_id,
        is_admin: profile.is_admin,
        message: format!(
            "User '{}' is {} an admin",
            profile.username,
            if profile.is_admin { "now" } else { "no longer" }
        ),
    })
}

/// Lists all user profiles. Admin tier, for role management.
///
/// # Errors
///
/// Returns an error if the actor is not an admin or the query fails.
pub fn list_users(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
) -> Result<ListUsersResponse, ApiError> {
    AuthorizationService::authorize_admin(actor, "list_users")?;

    let users = persistence
        .list_users()
        .map_err(translate_persistence_error)?;

    Ok(ListUsersResponse {
        users: users.iter().map(user_to_info).collect(),
    })
}
