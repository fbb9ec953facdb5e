// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Event settings queries.
//!
//! The settings record is a singleton stored under a fixed well-known id.
//! Reads never fail merely because the record was never written: an absent
//! row yields the documented defaults.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};

use crate::diesel_schema::event_settings;
use crate::error::PersistenceError;
use stripboard_domain::{AirportInfo, EventSettings, Mode};

/// The fixed id of the singleton settings row.
pub(crate) const SETTINGS_ROW_ID: i64 = 1;

/// Queryable struct for the settings row.
#[derive(Queryable, Selectable)]
#[diesel(table_name = event_settings)]
pub(crate) struct SettingsRow {
    #[allow(dead_code)]
    pub settings_id: i64,
    pub is_event_live: i32,
    pub airport_mode: String,
    pub airport_fixed: String,
    pub departure_mode: String,
    pub departure_fixed: String,
    pub arrival_mode: String,
    pub arrival_fixed: String,
    pub time_mode: String,
    pub time_fixed: String,
    pub route_mode: String,
    pub route_fixed: String,
    pub active_airports: String,
    pub airport_data: String,
}

impl SettingsRow {
    /// Converts the stored row into the domain settings, collapsing each
    /// mode/value column pair into its tagged `Mode` variant.
    pub(crate) fn into_domain(self) -> Result<EventSettings, PersistenceError> {
        let parse_mode = |mode: &str, value: &str| -> Result<Mode, PersistenceError> {
            Mode::from_parts(mode, value)
                .map_err(|e| PersistenceError::SerializationError(e.to_string()))
        };

        let active_airports: Vec<String> = serde_json::from_str(&self.active_airports)?;
        let airport_data: Vec<AirportInfo> = serde_json::from_str(&self.airport_data)?;

        Ok(EventSettings {
            is_event_live: self.is_event_live != 0,
            airport_mode: parse_mode(&self.airport_mode, &self.airport_fixed)?,
            departure_mode: parse_mode(&self.departure_mode, &self.departure_fixed)?,
            arrival_mode: parse_mode(&self.arrival_mode, &self.arrival_fixed)?,
            time_mode: parse_mode(&self.time_mode, &self.time_fixed)?,
            route_mode: parse_mode(&self.route_mode, &self.route_fixed)?,
            active_airports,
            airport_data,
        })
    }
}

backend_fn! {
/// Retrieves the singleton event settings, or the documented defaults when
/// no record has been written yet.
///
/// # Arguments
///
/// * `conn` - The database connection
///
/// # Errors
///
/// Returns an error if the database query fails or the stored record cannot
/// be decoded.
pub fn get_settings(conn: &mut _) -> Result<EventSettings, PersistenceError> {
    let result: Result<SettingsRow, diesel::result::Error> = event_settings::table
        .filter(event_settings::settings_id.eq(SETTINGS_ROW_ID))
        .select(SettingsRow::as_select())
        .first(conn);

    match result {
        Ok(row) => row.into_domain(),
        Err(diesel::result::Error::NotFound) => Ok(EventSettings::default()),
        Err(e) => Err(PersistenceError::from(e)),
    }
}
}
