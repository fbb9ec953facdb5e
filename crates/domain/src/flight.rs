// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::status::FlightStatus;
use crate::types::{AirportCode, Callsign};
use serde::{Deserialize, Serialize};

/// Pilot identity correlation for a flight strip.
///
/// Ownership checks match `discord_username` against the linked identity of
/// the authenticated actor. Both fields are optional at filing time and
/// default to empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PilotLink {
    /// The filing pilot's linked external username.
    pub discord_username: String,
    /// The pilot's in-simulator callsign.
    pub geofs_callsign: String,
}

impl PilotLink {
    /// Creates a new `PilotLink` from optional inputs, defaulting absent
    /// fields to empty strings.
    #[must_use]
    pub fn new(discord_username: Option<String>, geofs_callsign: Option<String>) -> Self {
        Self {
            discord_username: discord_username.unwrap_or_default(),
            geofs_callsign: geofs_callsign.unwrap_or_default(),
        }
    }

    /// Returns whether this strip is linked to an external identity at all.
    #[must_use]
    pub fn is_linked(&self) -> bool {
        !self.discord_username.is_empty()
    }
}

/// The flight-plan payload carried by a strip.
///
/// Fields are presence-validated only; the service does not check semantic
/// correctness of altitudes, speeds, or routes. `aircraft_type`, `departure`
/// and `arrival` are normalized to uppercase; the free-form fields keep the
/// pilot's casing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightPlan {
    /// The aircraft type designator (uppercase).
    pub aircraft_type: String,
    /// The departure airport code (uppercase).
    pub departure: String,
    /// The arrival airport code (uppercase).
    pub arrival: String,
    /// Cruise altitude, free-form.
    pub altitude: String,
    /// Cruise speed, free-form.
    pub speed: String,
    /// Transponder squawk code. Empty when not yet assigned.
    pub squawk: String,
    /// Planned departure time, free-form.
    pub departure_time: String,
    /// Filed route, free-form.
    pub route: String,
    /// Controller/pilot notes, free-form.
    pub notes: String,
}

impl FlightPlan {
    /// Creates a new `FlightPlan`, applying field normalization.
    ///
    /// Required fields are passed as-is (presence validation happens at the
    /// boundary via [`crate::validation::validate_flight_fields`]); optional
    /// fields default to empty strings when absent.
    ///
    /// # Arguments
    ///
    /// * `aircraft_type` - The aircraft type (normalized to uppercase)
    /// * `departure` - The departure code (normalized to uppercase)
    /// * `arrival` - The arrival code (normalized to uppercase)
    /// * `altitude` - Cruise altitude
    /// * `speed` - Cruise speed
    /// * `departure_time` - Planned departure time
    /// * `squawk` - Optional squawk code
    /// * `route` - Optional filed route
    /// * `notes` - Optional notes
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        aircraft_type: &str,
        departure: &str,
        arrival: &str,
        altitude: String,
        speed: String,
        departure_time: String,
        squawk: Option<String>,
        route: Option<String>,
        notes: Option<String>,
    ) -> Self {
        Self {
            aircraft_type: aircraft_type.trim().to_uppercase(),
            departure: departure.trim().to_uppercase(),
            arrival: arrival.trim().to_uppercase(),
            altitude,
            speed,
            squawk: squawk.unwrap_or_default(),
            departure_time,
            route: route.unwrap_or_default(),
            notes: notes.unwrap_or_default(),
        }
    }
}

/// One active flight strip.
///
/// `flight_id` is the canonical storage-assigned identifier; `None` indicates
/// the strip has not been persisted yet. Timestamps are set by the storage
/// layer and are empty until persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flight {
    /// Canonical identifier assigned by the storage layer.
    pub flight_id: Option<i64>,
    /// The board this strip currently belongs to.
    pub airport: AirportCode,
    /// The strip's unique callsign.
    pub callsign: Callsign,
    /// Pilot identity correlation.
    pub pilot: PilotLink,
    /// The flight-plan payload.
    pub plan: FlightPlan,
    /// The control sector the strip currently sits in.
    pub status: FlightStatus,
    /// Creation timestamp (ISO 8601), set by the storage layer.
    pub created_at: String,
    /// Last-update timestamp (ISO 8601), set by the storage layer.
    pub updated_at: String,
}

impl Flight {
    /// Creates a new, not-yet-persisted `Flight`.
    ///
    /// # Arguments
    ///
    /// * `airport` - The board the strip belongs to
    /// * `callsign` - The strip's callsign
    /// * `pilot` - Pilot identity correlation
    /// * `plan` - The flight-plan payload
    /// * `status` - The initial control sector
    #[must_use]
    pub const fn new(
        airport: AirportCode,
        callsign: Callsign,
        pilot: PilotLink,
        plan: FlightPlan,
        status: FlightStatus,
    ) -> Self {
        Self {
            flight_id: None,
            airport,
            callsign,
            pilot,
            plan,
            status,
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    /// Returns whether the given linked identity owns this strip.
    ///
    /// An unlinked strip (empty `discord_username`) is owned by nobody.
    ///
    /// # Arguments
    ///
    /// * `username` - The actor's linked external username
    #[must_use]
    pub fn is_owned_by(&self, username: &str) -> bool {
        self.pilot.is_linked() && !username.is_empty() && self.pilot.discord_username == username
    }
}
