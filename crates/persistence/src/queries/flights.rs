// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Flight strip and history queries.
//!
//! This module contains backend-agnostic queries for retrieving flight
//! strips, airport boards, and the status history trail. All queries use
//! Diesel DSL and work across all supported database backends.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tracing::debug;

use crate::data_models::{FlightRow, HistoryEntryData};
use crate::diesel_schema::{flight_history, flights};
use crate::error::PersistenceError;
use stripboard_domain::Flight;

/// Queryable struct for history rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = flight_history)]
struct HistoryRow {
    history_id: i64,
    flight_id: i64,
    old_status: String,
    new_status: String,
    changed_by: Option<String>,
    changed_at: String,
}

backend_fn! {
/// Retrieves a flight strip by its canonical identifier.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `flight_id` - The flight identifier
///
/// # Errors
///
/// Returns `FlightNotFound` if no strip with this identifier exists.
pub fn get_flight(conn: &mut _, flight_id: i64) -> Result<Flight, PersistenceError> {
    let result: Result<FlightRow, diesel::result::Error> = flights::table
        .filter(flights::flight_id.eq(flight_id))
        .select(FlightRow::as_select())
        .first(conn);

    match result {
        Ok(row) => row.into_domain(),
        Err(diesel::result::Error::NotFound) => Err(PersistenceError::FlightNotFound(flight_id)),
        Err(e) => Err(PersistenceError::from(e)),
    }
}
}

backend_fn! {
/// Retrieves all flight strips, oldest filing first.
///
/// # Arguments
///
/// * `conn` - The database connection
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_flights(conn: &mut _) -> Result<Vec<Flight>, PersistenceError> {
    let rows: Vec<FlightRow> = flights::table
        .order(flights::flight_id.asc())
        .select(FlightRow::as_select())
        .load(conn)?;

    rows.into_iter().map(FlightRow::into_domain).collect()
}
}

backend_fn! {
/// Retrieves the board for one airport, oldest filing first.
///
/// The airport code must already be normalized to uppercase.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `airport` - The normalized airport code
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_flights_for_airport(
    conn: &mut _,
    airport: &str,
) -> Result<Vec<Flight>, PersistenceError> {
    debug!("Loading board for airport: {}", airport);

    let rows: Vec<FlightRow> = flights::table
        .filter(flights::airport.eq(airport))
        .order(flights::flight_id.asc())
        .select(FlightRow::as_select())
        .load(conn)?;

    rows.into_iter().map(FlightRow::into_domain).collect()
}
}

backend_fn! {
/// Retrieves the flight strips filed by one linked identity.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `discord_username` - The linked external username
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_flights_for_pilot(
    conn: &mut _,
    discord_username: &str,
) -> Result<Vec<Flight>, PersistenceError> {
    let rows: Vec<FlightRow> = flights::table
        .filter(flights::discord_username.eq(discord_username))
        .order(flights::flight_id.asc())
        .select(FlightRow::as_select())
        .load(conn)?;

    rows.into_iter().map(FlightRow::into_domain).collect()
}
}

backend_fn! {
/// Retrieves the status history for a flight strip, newest first.
///
/// Returns an empty list for an unknown flight identifier: history entries
/// are cascade-deleted with their parent strip, so an absent flight simply
/// has no trail.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `flight_id` - The flight identifier
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn get_flight_history(
    conn: &mut _,
    flight_id: i64,
) -> Result<Vec<HistoryEntryData>, PersistenceError> {
    let rows: Vec<HistoryRow> = flight_history::table
        .filter(flight_history::flight_id.eq(flight_id))
        .order(flight_history::history_id.desc())
        .select(HistoryRow::as_select())
        .load(conn)?;

    Ok(rows
        .into_iter()
        .map(|row| HistoryEntryData {
            history_id: row.history_id,
            flight_id: row.flight_id,
            old_status: row.old_status,
            new_status: row.new_status,
            changed_by: row.changed_by,
            changed_at: row.changed_at,
        })
        .collect())
}
}

backend_fn! {
/// Retrieves the squawk codes currently assigned to active flights.
///
/// Empty squawks (not yet assigned) are excluded. Used by the squawk
/// generator to avoid collisions.
///
/// # Arguments
///
/// * `conn` - The database connection
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_active_squawks(conn: &mut _) -> Result<Vec<String>, PersistenceError> {
    Ok(flights::table
        .filter(flights::squawk.ne(""))
        .select(flights::squawk)
        .load(conn)?)
}
}
