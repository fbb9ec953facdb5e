// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Event settings use the domain types directly (`EventSettings`,
//! `SettingsPatch`): their tagged `Mode` representation is the API
//! contract.

use serde::{Deserialize, Serialize};

/// API request to log in with a provider-verified identity.
///
/// The external auth provider has already verified credentials; this
/// payload mirrors the verified identity into the profile store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    /// The provider's stable subject id.
    pub external_id: String,
    /// The linked username. Flight ownership matches against this.
    pub username: String,
    /// Optional display name.
    pub display_name: Option<String>,
}

/// API response for a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    /// The bearer session token.
    pub session_token: String,
    /// The stored profile after the login refresh.
    pub user: UserInfo,
    /// Advisory capability flags for UI gating.
    pub capabilities: UserCapabilities,
}

/// API response describing the authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhoAmIResponse {
    /// The stored profile.
    pub user: UserInfo,
    /// Advisory capability flags for UI gating.
    pub capabilities: UserCapabilities,
}

/// A stored user profile as exposed over the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    /// The canonical user identifier.
    pub user_id: i64,
    /// The provider's stable subject id.
    pub external_id: String,
    /// The linked username.
    pub username: String,
    /// The display name.
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

/// API request to file a flight plan (public filing path).
///
/// The filed strip always starts in `delivery`; there is no status field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileFlightRequest {
    /// The board the strip belongs to.
    pub airport: String,
    /// The strip's callsign.
    pub callsign: String,
    /// The aircraft type designator.
    pub aircraft_type: String,
    /// The departure airport code.
    pub departure: String,
    /// The arrival airport code.
    pub arrival: String,
    /// Cruise altitude.
    pub altitude: String,
    /// Cruise speed.
    pub speed: String,
    /// Planned departure time.
    pub departure_time: String,
    /// Optional squawk code; assigned automatically when absent.
    pub squawk: Option<String>,
    /// Optional filed route.
    pub route: Option<String>,
    /// Optional notes.
    pub notes: Option<String>,
    /// Optional pilot identity correlation.
    pub discord_username: Option<String>,
    /// Optional in-simulator callsign.
    pub geofs_callsign: Option<String>,
}

/// API request to create a flight strip (controller/import path).
///
/// Unlike the public filing path, the initial sector is set explicitly and
/// no capacity ceiling applies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateFlightRequest {
    /// The board the strip belongs to.
    pub airport: String,
    /// The strip's callsign.
    pub callsign: String,
    /// The aircraft type designator.
    pub aircraft_type: String,
    /// The departure airport code.
    pub departure: String,
    /// The arrival airport code.
    pub arrival: String,
    /// Cruise altitude.
    pub altitude: String,
    /// Cruise speed.
    pub speed: String,
    /// Planned departure time.
    pub departure_time: String,
    /// The initial control sector.
    pub status: String,
    /// Optional squawk code.
    pub squawk: Option<String>,
    /// Optional filed route.
    pub route: Option<String>,
    /// Optional notes.
    pub notes: Option<String>,
    /// Optional pilot identity correlation.
    pub discord_username: Option<String>,
    /// Optional in-simulator callsign.
    pub geofs_callsign: Option<String>,
}

/// API request to partially update a flight strip.
///
/// Absent fields are left untouched, not nulled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct UpdateFlightRequest {
    /// New board, if changing.
    pub airport: Option<String>,
    /// New callsign, if changing.
    pub callsign: Option<String>,
    /// New pilot identity correlation, if changing.
    pub discord_username: Option<String>,
    /// New in-simulator callsign, if changing.
    pub geofs_callsign: Option<String>,
    /// New aircraft type, if changing.
    pub aircraft_type: Option<String>,
    /// New departure code, if changing.
    pub departure: Option<String>,
    /// New arrival code, if changing.
    pub arrival: Option<String>,
    /// New altitude, if changing.
    pub altitude: Option<String>,
    /// New speed, if changing.
    pub speed: Option<String>,
    /// New squawk, if changing.
    pub squawk: Option<String>,
    /// New departure time, if changing.
    pub departure_time: Option<String>,
    /// New route, if changing.
    pub route: Option<String>,
    /// New notes, if changing.
    pub notes: Option<String>,
    /// New control sector, if changing. A change appends a history entry.
    pub status: Option<String>,
}

/// A flight strip as exposed over the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightInfo {
    /// The canonical flight identifier.
    pub flight_id: i64,
    /// The board the strip belongs to.
    pub airport: String,
    /// The strip's callsign.
    pub callsign: String,
    /// Pilot identity correlation.
    pub discord_username: String,
    /// In-simulator callsign.
    pub geofs_callsign: String,
    /// The aircraft type designator.
    pub aircraft_type: String,
    /// The departure airport code.
    pub departure: String,
    /// The arrival airport code.
    pub arrival: String,
    /// Cruise altitude.
    pub altitude: String,
    /// Cruise speed.
    pub speed: String,
    /// The squawk code, empty when unassigned.
    pub squawk: String,
    /// Planned departure time.
    pub departure_time: String,
    /// The filed route.
    pub route: String,
    /// Notes.
    pub notes: String,
    /// The current control sector.
    pub status: String,
    /// Advisory click-to-advance target for board UIs. The service itself
    /// accepts a jump to any sector.
    pub next_status: String,
    /// Creation timestamp (ISO 8601).
    pub created_at: String,
    /// Last-update timestamp (ISO 8601).
    pub updated_at: String,
}

/// API response for listing flight strips.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListFlightsResponse {
    /// The strips, oldest filing first.
    pub flights: Vec<FlightInfo>,
}

/// API response for a successful deletion.
///
/// Carries the id and callsign for caller-facing messaging, not the full
/// record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteFlightResponse {
    /// The deleted flight identifier.
    pub flight_id: i64,
    /// The deleted strip's callsign.
    pub callsign: String,
    /// A success message.
    pub message: String,
}

/// One recorded status transition as exposed over the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntryInfo {
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

/// API response for a role toggle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleControllerResponse {
    /// The target user.
    pub user_id: i64,
    /// The controller flag after the toggle.
    pub is_controller: bool,
    /// A success message.
    pub message: String,
}

/// API request to set a user's admin flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetAdminRequest {
    /// The new flag value.
    pub is_admin: bool,
}

/// API response for an admin flag change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetAdminResponse {
    /// The target user.
    pub user_id: i64,
    /// The admin flag after the change.
    pub is_admin: bool,
    /// A success message.
    pub message: String,
}

/// API response for listing user profiles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListUsersResponse {
    /// The profiles, oldest first.
    pub users: Vec<UserInfo>,
}

/// API request for a bulk flight import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportFlightsRequest {
    /// The rows to import, each validated independently.
    pub flights: Vec<CreateFlightRequest>,
}

/// Outcome of one imported row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportRowStatus {
    /// The row was created.
    Created,
    /// The row was rejected; the rest of the batch is unaffected.
    Failed,
}

/// Per-row result of a bulk flight import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportRowResult {
    /// Zero-based index of the row in the request.
    pub row: usize,
    /// The row's callsign, when present.
    pub callsign: Option<String>,
    /// Whether the row was created or rejected.
    pub status: ImportRowStatus,
    /// A human-readable outcome message.
    pub message: String,
}

/// API response for a bulk flight import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportFlightsResponse {
    /// Per-row outcomes, in request order.
    pub results: Vec<ImportRowResult>,
    /// Number of rows created.
    pub created_count: usize,
    /// Number of rows rejected.
    pub failed_count: usize,
}

/// An advisory permission flag.
///
/// Capabilities expose what an actor is permitted to do without leaking
/// policy internals. They are advisory only and never replace server-side
/// authorization checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Capability {
    /// The action is permitted.
    Allowed,
    /// The action is denied.
    Denied,
}

/// Advisory capability flags for an authenticated actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserCapabilities {
    /// May file a flight plan.
    pub can_file_flight: Capability,
    /// May create, edit, and advance any flight strip.
    pub can_manage_flights: Capability,
    /// May delete flight strips.
    pub can_delete_flights: Capability,
    /// May bulk-import flight strips.
    pub can_import_flights: Capability,
    /// May update the event settings.
    pub can_update_settings: Capability,
    /// May change controller/admin flags.
    pub can_manage_roles: Capability,
}
