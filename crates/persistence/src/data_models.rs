// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::diesel_schema::{flight_history, flights};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use stripboard_domain::{AirportCode, Callsign, Flight, FlightPlan, FlightStatus, PilotLink};

/// Queryable row for a stored flight strip.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = flights)]
pub(crate) struct FlightRow {
    pub flight_id: i64,
    pub airport: String,
    pub callsign: String,
    pub discord_username: String,
    pub geofs_callsign: String,
    pub aircraft_type: String,
    pub departure: String,
    pub arrival: String,
    pub altitude: String,
    pub speed: String,
    pub squawk: String,
    pub departure_time: String,
    pub route: String,
    pub notes: String,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

impl FlightRow {
    /// Converts a stored row into the domain `Flight`.
    ///
    /// Stored statuses are always one of the six sectors; a row that fails to
    /// parse indicates corruption and surfaces as a serialization error.
    pub(crate) fn into_domain(self) -> Result<Flight, crate::error::PersistenceError> {
        let status: FlightStatus = FlightStatus::from_str(&self.status).map_err(|e| {
            crate::error::PersistenceError::SerializationError(format!(
                "Stored flight {} has invalid status: {e}",
                self.flight_id
            ))
        })?;
        Ok(Flight {
            flight_id: Some(self.flight_id),
            airport: AirportCode::new(&self.airport),
            callsign: Callsign::new(&self.callsign),
            pilot: PilotLink {
                discord_username: self.discord_username,
                geofs_callsign: self.geofs_callsign,
            },
            plan: FlightPlan {
                aircraft_type: self.aircraft_type,
                departure: self.departure,
                arrival: self.arrival,
                altitude: self.altitude,
                speed: self.speed,
                squawk: self.squawk,
                departure_time: self.departure_time,
                route: self.route,
                notes: self.notes,
            },
            status,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Insertable row for a new flight strip.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = flights)]
pub(crate) struct NewFlightRow {
    pub airport: String,
    pub callsign: String,
    pub discord_username: String,
    pub geofs_callsign: String,
    pub aircraft_type: String,
    pub departure: String,
    pub arrival: String,
    pub altitude: String,
    pub speed: String,
    pub squawk: String,
    pub departure_time: String,
    pub route: String,
    pub notes: String,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Partial update to a flight strip.
///
/// `None` fields are left untouched by Diesel; `updated_at` is always set.
/// Values must already be normalized (uppercase where applicable) by the
/// caller.
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = flights)]
pub struct FlightChangeset {
    pub airport: Option<String>,
    pub callsign: Option<String>,
    pub discord_username: Option<String>,
    pub geofs_callsign: Option<String>,
    pub aircraft_type: Option<String>,
    pub departure: Option<String>,
    pub arrival: Option<String>,
    pub altitude: Option<String>,
    pub speed: Option<String>,
    pub squawk: Option<String>,
    pub departure_time: Option<String>,
    pub route: Option<String>,
    pub notes: Option<String>,
    pub status: Option<String>,
    pub updated_at: Option<String>,
}

/// Insertable row for a flight status history entry.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = flight_history)]
pub(crate) struct NewFlightHistoryRow {
    pub flight_id: i64,
    pub old_status: String,
    pub new_status: String,
    pub changed_by: Option<String>,
    pub changed_at: String,
}

/// One recorded flight status transition, newest first in listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntryData {
    /// The history row identifier.
    pub history_id: i64,
    /// The flight this entry belongs to.
    pub flight_id: i64,
    /// The sector the strip was in before the update.
    pub old_status: String,
    /// The sector the strip moved to.
    pub new_status: String,
    /// The acting identity, when known.
    pub changed_by: Option<String>,
    /// When the transition was recorded (ISO 8601).
    pub changed_at: String,
}

/// A stored user profile linked to an external identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfileData {
    /// The canonical internal identifier.
    pub user_id: i64,
    /// The external auth provider's stable subject id.
    pub external_id: String,
    /// The linked username, refreshed on each login. Flight ownership
    /// matches against this value.
    pub username: String,
    /// Display name, refreshed on each login.
    pub display_name: String,
    /// Whether this user may manage any flight.
    pub is_controller: bool,
    /// Whether this user may manage settings and roles.
    pub is_admin: bool,
    /// When the profile was first created (ISO 8601).
    pub created_at: String,
    /// Last authenticated access (ISO 8601).
    pub last_seen_at: Option<String>,
}

/// A stored bearer session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionData {
    /// The session row identifier.
    pub session_id: i64,
    /// The bearer token presented by clients.
    pub session_token: String,
    /// The user this session belongs to.
    pub user_id: i64,
    /// When the session was created (ISO 8601).
    pub created_at: String,
    /// Last request seen on this session (ISO 8601).
    pub last_activity_at: String,
    /// When the session expires (ISO 8601).
    pub expires_at: String,
}
