// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer tests.
//!
//! All tests here run against in-memory `SQLite`. Backend validation against
//! `MariaDB` lives in `backend_validation_tests` and is explicitly opt-in
//! via `cargo xtask test-mariadb`.

mod backend_validation_tests;
mod settings_tests;

use crate::Persistence;
use stripboard_domain::{AirportCode, Callsign, Flight, FlightPlan, FlightStatus, PilotLink};

/// Creates an isolated in-memory persistence adapter.
pub(crate) fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("Failed to create in-memory persistence")
}

/// Builds a normalized test flight for the given callsign and airport.
pub(crate) fn create_test_flight(callsign: &str, airport: &str) -> Flight {
    Flight::new(
        AirportCode::new(airport),
        Callsign::new(callsign),
        PilotLink::new(Some(String::from("pilotA")), None),
        FlightPlan::new(
            "B738",
            "KJFK",
            "KLAX",
            String::from("FL350"),
            String::from("450"),
            String::from("1830Z"),
            None,
            None,
            None,
        ),
        FlightStatus::Delivery,
    )
}
