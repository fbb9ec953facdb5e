// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Event settings mutations.
//!
//! The settings record is a singleton stored under a fixed well-known id.
//! The upsert runs in one transaction and the primary-key constraint on the
//! fixed id guarantees that concurrent first writers cannot create a second
//! record.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tracing::info;

use crate::diesel_schema::event_settings;
use crate::error::PersistenceError;
use crate::queries::settings::{SETTINGS_ROW_ID, SettingsRow};
use stripboard_domain::{EventSettings, SettingsPatch};

backend_fn! {
/// Applies a partial update to the singleton settings record.
///
/// Within one transaction:
/// 1. Loads the current record when it exists; otherwise starts from the
///    documented defaults.
/// 2. Merges the patch (last writer wins per field; absent fields keep
///    their stored value).
/// 3. Updates the existing row, or inserts the merged record under the
///    fixed id.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `patch` - The fields to change
///
/// # Returns
///
/// The merged settings as persisted.
///
/// # Errors
///
/// Returns an error if the database operation fails or the stored record
/// cannot be decoded.
pub fn upsert_settings(
    conn: &mut _,
    patch: &SettingsPatch,
) -> Result<EventSettings, PersistenceError> {
    conn.transaction(|conn| {
        let existing: Option<SettingsRow> = match event_settings::table
            .filter(event_settings::settings_id.eq(SETTINGS_ROW_ID))
            .select(SettingsRow::as_select())
            .first(conn)
        {
            Ok(row) => Some(row),
            Err(diesel::result::Error::NotFound) => None,
            Err(e) => return Err(PersistenceError::from(e)),
        };

        let record_exists: bool = existing.is_some();
        let base: EventSettings = match existing {
            Some(row) => row.into_domain()?,
            None => EventSettings::default(),
        };
        let merged: EventSettings = patch.clone().apply(base);

        let (airport_mode, airport_fixed) = merged.airport_mode.to_parts();
        let (departure_mode, departure_fixed) = merged.departure_mode.to_parts();
        let (arrival_mode, arrival_fixed) = merged.arrival_mode.to_parts();
        let (time_mode, time_fixed) = merged.time_mode.to_parts();
        let (route_mode, route_fixed) = merged.route_mode.to_parts();
        let active_airports: String = serde_json::to_string(&merged.active_airports)?;
        let airport_data: String = serde_json::to_string(&merged.airport_data)?;

        let values = (
            event_settings::is_event_live.eq(i32::from(merged.is_event_live)),
            event_settings::airport_mode.eq(airport_mode),
            event_settings::airport_fixed.eq(&airport_fixed),
            event_settings::departure_mode.eq(departure_mode),
            event_settings::departure_fixed.eq(&departure_fixed),
            event_settings::arrival_mode.eq(arrival_mode),
            event_settings::arrival_fixed.eq(&arrival_fixed),
            event_settings::time_mode.eq(time_mode),
            event_settings::time_fixed.eq(&time_fixed),
            event_settings::route_mode.eq(route_mode),
            event_settings::route_fixed.eq(&route_fixed),
            event_settings::active_airports.eq(&active_airports),
            event_settings::airport_data.eq(&airport_data),
        );

        if record_exists {
            diesel::update(
                event_settings::table.filter(event_settings::settings_id.eq(SETTINGS_ROW_ID)),
            )
            .set(values)
            .execute(conn)?;
        } else {
            diesel::insert_into(event_settings::table)
                .values((event_settings::settings_id.eq(SETTINGS_ROW_ID), values))
                .execute(conn)?;
        }

        info!(is_event_live = merged.is_event_live, "Updated event settings");
        Ok(merged)
    })
}
}
