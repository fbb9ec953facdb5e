// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Flight strip mutations.
//!
//! Creation, partial update, and deletion of flight strips. Each function
//! wraps its check-then-write sequence in one transaction: the callsign
//! uniqueness check, the capacity check, and the status-change history
//! insert all commit or roll back together with the write they guard.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use std::str::FromStr;
use tracing::{debug, info};

use crate::backend::PersistenceBackend;
use crate::data_models::{FlightChangeset, FlightRow, NewFlightHistoryRow, NewFlightRow};
use crate::diesel_schema::{flight_history, flights};
use crate::error::PersistenceError;
use crate::now_utc_iso8601;
use stripboard_audit::StatusChange;
use stripboard_domain::{Flight, FlightStatus};

backend_fn! {
/// Inserts a new flight strip.
///
/// Within one transaction:
/// 1. Rejects the insert if an active flight with the same normalized
///    callsign exists (`DuplicateCallsign`).
/// 2. When `capacity` is given (the public filing path), rejects the insert
///    if the target board already holds that many strips (`AirportFull`).
/// 3. Inserts the strip with storage-assigned timestamps.
///
/// No history entry is written on creation: history records transitions
/// between stored statuses only.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `flight` - The normalized flight to insert
/// * `capacity` - The board capacity ceiling, when filing publicly
///
/// # Errors
///
/// Returns `DuplicateCallsign`, `AirportFull`, or a database error.
pub fn create_flight(
    conn: &mut _,
    flight: &Flight,
    capacity: Option<u32>,
) -> Result<Flight, PersistenceError> {
    conn.transaction(|conn| {
        let callsign: &str = flight.callsign.value();
        let airport: &str = flight.airport.value();

        let existing: i64 = flights::table
            .filter(flights::callsign.eq(callsign))
            .count()
            .get_result(conn)?;
        if existing > 0 {
            return Err(PersistenceError::DuplicateCallsign(callsign.to_string()));
        }

        if let Some(capacity) = capacity {
            let board_count: i64 = flights::table
                .filter(flights::airport.eq(airport))
                .count()
                .get_result(conn)?;
            if board_count >= i64::from(capacity) {
                return Err(PersistenceError::AirportFull {
                    airport: airport.to_string(),
                    capacity,
                });
            }
        }

        let now: String = now_utc_iso8601()?;
        let record = NewFlightRow {
            airport: airport.to_string(),
            callsign: callsign.to_string(),
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
            created_at: now.clone(),
            updated_at: now,
        };

        diesel::insert_into(flights::table)
            .values(&record)
            .execute(conn)?;

        let flight_id: i64 = conn.get_last_insert_rowid()?;
        info!(flight_id, callsign, airport, "Created flight strip");

        let row: FlightRow = flights::table
            .filter(flights::flight_id.eq(flight_id))
            .select(FlightRow::as_select())
            .first(conn)?;
        row.into_domain()
    })
}
}

backend_fn! {
/// Applies a partial update to a flight strip.
///
/// Within one transaction:
/// 1. Loads the current strip (`FlightNotFound` when absent).
/// 2. If the callsign is changing, rejects a collision with any other
///    active flight (`DuplicateCallsign`).
/// 3. If the status is changing, appends exactly one history entry
///    recording the stored status, the requested status, and the actor.
/// 4. Applies the changeset. Absent fields are left untouched.
///
/// The history entry and the field patch commit or roll back together, so
/// a failed patch can never leave a dangling history entry.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `flight_id` - The flight identifier
/// * `changes` - The normalized changeset (`updated_at` is set here)
/// * `changed_by` - The acting identity recorded on a status change
///
/// # Errors
///
/// Returns `FlightNotFound`, `DuplicateCallsign`, or a database error.
pub fn update_flight(
    conn: &mut _,
    flight_id: i64,
    changes: &FlightChangeset,
    changed_by: Option<&str>,
) -> Result<Flight, PersistenceError> {
    conn.transaction(|conn| {
        let current: FlightRow = flights::table
            .filter(flights::flight_id.eq(flight_id))
            .select(FlightRow::as_select())
            .first(conn)
            .map_err(|e| match e {
                diesel::result::Error::NotFound => PersistenceError::FlightNotFound(flight_id),
                other => PersistenceError::from(other),
            })?;

        if let Some(new_callsign) = &changes.callsign
            && *new_callsign != current.callsign
        {
            let colliding: i64 = flights::table
                .filter(flights::callsign.eq(new_callsign))
                .filter(flights::flight_id.ne(flight_id))
                .count()
                .get_result(conn)?;
            if colliding > 0 {
                return Err(PersistenceError::DuplicateCallsign(new_callsign.clone()));
            }
        }

        let now: String = now_utc_iso8601()?;

        if let Some(new_status) = &changes.status {
            let stored: FlightStatus = FlightStatus::from_str(&current.status).map_err(|e| {
                PersistenceError::SerializationError(format!(
                    "Stored flight {flight_id} has invalid status: {e}"
                ))
            })?;
            let requested: FlightStatus = FlightStatus::from_str(new_status).map_err(|e| {
                PersistenceError::SerializationError(format!(
                    "Changeset for flight {flight_id} has invalid status: {e}"
                ))
            })?;

            // StatusChange::new yields None when the status is unchanged,
            // which is exactly the updates that must not leave a trail.
            if let Some(change) =
                StatusChange::new(stored, requested, changed_by.map(ToString::to_string))
            {
                debug!(
                    flight_id,
                    old_status = %change.old_status,
                    new_status = %change.new_status,
                    "Recording status transition"
                );
                let entry = NewFlightHistoryRow {
                    flight_id,
                    old_status: change.old_status.as_str().to_string(),
                    new_status: change.new_status.as_str().to_string(),
                    changed_by: change.changed_by,
                    changed_at: now.clone(),
                };
                diesel::insert_into(flight_history::table)
                    .values(&entry)
                    .execute(conn)?;
            }
        }

        let mut changes: FlightChangeset = changes.clone();
        changes.updated_at = Some(now);

        diesel::update(flights::table.filter(flights::flight_id.eq(flight_id)))
            .set(&changes)
            .execute(conn)?;

        let row: FlightRow = flights::table
            .filter(flights::flight_id.eq(flight_id))
            .select(FlightRow::as_select())
            .first(conn)?;
        row.into_domain()
    })
}
}

backend_fn! {
/// Deletes a flight strip and its history trail.
///
/// History rows are deleted before the strip so the removal is one logical
/// cascade even on backends without referential cascade support.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `flight_id` - The flight identifier
///
/// # Returns
///
/// The deleted strip's id and callsign, for caller-facing messaging.
///
/// # Errors
///
/// Returns `FlightNotFound` or a database error.
pub fn delete_flight(conn: &mut _, flight_id: i64) -> Result<(i64, String), PersistenceError> {
    conn.transaction(|conn| {
        let callsign: String = flights::table
            .filter(flights::flight_id.eq(flight_id))
            .select(flights::callsign)
            .first(conn)
            .map_err(|e| match e {
                diesel::result::Error::NotFound => PersistenceError::FlightNotFound(flight_id),
                other => PersistenceError::from(other),
            })?;

        diesel::delete(flight_history::table.filter(flight_history::flight_id.eq(flight_id)))
            .execute(conn)?;
        diesel::delete(flights::table.filter(flights::flight_id.eq(flight_id))).execute(conn)?;

        info!(flight_id, callsign = %callsign, "Deleted flight strip and history");
        Ok((flight_id, callsign))
    })
}
}
