// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};

/// A pilot-facing input policy for one flight-plan field.
///
/// `Custom` leaves the field to pilot free choice; `Fixed` locks it to the
/// carried value, which is authoritative and must override any pilot input.
/// This collapses the paired mode/fixed-value columns into one value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum Mode {
    /// Pilot free choice.
    #[default]
    Custom,
    /// Locked to the associated value.
    Fixed {
        /// The authoritative value.
        value: String,
    },
}

impl Mode {
    /// Reconstructs a `Mode` from its stored mode/value column pair.
    ///
    /// # Arguments
    ///
    /// * `mode` - The stored mode discriminant (`CUSTOM` or `FIXED`)
    /// * `value` - The stored fixed value (ignored for `CUSTOM`)
    ///
    /// # Errors
    ///
    /// Returns an error if the discriminant is not recognized.
    pub fn from_parts(mode: &str, value: &str) -> Result<Self, DomainError> {
        match mode {
            "CUSTOM" => Ok(Self::Custom),
            "FIXED" => Ok(Self::Fixed {
                value: value.to_string(),
            }),
            _ => Err(DomainError::InvalidMode(mode.to_string())),
        }
    }

    /// Decomposes this `Mode` into its stored mode/value column pair.
    #[must_use]
    pub fn to_parts(&self) -> (&'static str, String) {
        match self {
            Self::Custom => ("CUSTOM", String::new()),
            Self::Fixed { value } => ("FIXED", value.clone()),
        }
    }

    /// Returns the fixed value if this mode is `Fixed`.
    #[must_use]
    pub fn fixed_value(&self) -> Option<&str> {
        match self {
            Self::Custom => None,
            Self::Fixed { value } => Some(value),
        }
    }
}

/// Denormalized display metadata for one active airport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AirportInfo {
    /// The ICAO-like airport code.
    pub id: String,
    /// The display name shown on boards.
    pub name: String,
}

/// Event-wide configuration. At most one record exists system-wide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventSettings {
    /// Whether the event is currently live.
    pub is_event_live: bool,
    /// Policy for the filing airport field.
    pub airport_mode: Mode,
    /// Policy for the departure field.
    pub departure_mode: Mode,
    /// Policy for the arrival field.
    pub arrival_mode: Mode,
    /// Policy for the departure-time field.
    pub time_mode: Mode,
    /// Policy for the route field.
    pub route_mode: Mode,
    /// ICAO codes currently enabled as boards (uppercase).
    pub active_airports: Vec<String>,
    /// Display metadata for the active airports.
    pub airport_data: Vec<AirportInfo>,
}

impl Default for EventSettings {
    fn default() -> Self {
        Self {
            is_event_live: false,
            airport_mode: Mode::Custom,
            departure_mode: Mode::Custom,
            arrival_mode: Mode::Custom,
            time_mode: Mode::Custom,
            route_mode: Mode::Custom,
            active_airports: Vec::new(),
            airport_data: Vec::new(),
        }
    }
}

/// A partial update to [`EventSettings`].
///
/// Absent fields are left untouched; present fields replace the stored value
/// (last writer wins per field).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SettingsPatch {
    /// New live flag, if changing.
    pub is_event_live: Option<bool>,
    /// New airport-field policy, if changing.
    pub airport_mode: Option<Mode>,
    /// New departure-field policy, if changing.
    pub departure_mode: Option<Mode>,
    /// New arrival-field policy, if changing.
    pub arrival_mode: Option<Mode>,
    /// New departure-time policy, if changing.
    pub time_mode: Option<Mode>,
    /// New route policy, if changing.
    pub route_mode: Option<Mode>,
    /// Replacement active-airport set, if changing.
    pub active_airports: Option<Vec<String>>,
    /// Replacement airport display metadata, if changing.
    pub airport_data: Option<Vec<AirportInfo>>,
}

impl SettingsPatch {
    /// Applies this patch to a settings record, returning the merged result.
    ///
    /// Airport codes in a replacement set are normalized to uppercase.
    ///
    /// # Arguments
    ///
    /// * `settings` - The current settings (or defaults when none exist)
    #[must_use]
    pub fn apply(self, mut settings: EventSettings) -> EventSettings {
        if let Some(live) = self.is_event_live {
            settings.is_event_live = live;
        }
        if let Some(mode) = self.airport_mode {
            settings.airport_mode = mode;
        }
        if let Some(mode) = self.departure_mode {
            settings.departure_mode = mode;
        }
        if let Some(mode) = self.arrival_mode {
            settings.arrival_mode = mode;
        }
        if let Some(mode) = self.time_mode {
            settings.time_mode = mode;
        }
        if let Some(mode) = self.route_mode {
            settings.route_mode = mode;
        }
        if let Some(airports) = self.active_airports {
            settings.active_airports = airports
                .into_iter()
                .map(|code| code.trim().to_uppercase())
                .collect();
        }
        if let Some(data) = self.airport_data {
            settings.airport_data = data;
        }
        settings
    }

    /// Returns whether this patch changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.is_event_live.is_none()
            && self.airport_mode.is_none()
            && self.departure_mode.is_none()
            && self.arrival_mode.is_none()
            && self.time_mode.is_none()
            && self.route_mode.is_none()
            && self.active_airports.is_none()
            && self.airport_data.is_none()
    }
}
