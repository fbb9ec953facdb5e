// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use std::time::Duration;
use stripboard_persistence::Persistence;

use crate::auth::AuthenticatedActor;
use crate::rate_limit::FixedWindowLimiter;
use crate::request_response::{CreateFlightRequest, FileFlightRequest};

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("Failed to create in-memory persistence")
}

/// Creates a rate limiter that never rejects, for tests not about limiting.
pub fn unlimited_limiter() -> FixedWindowLimiter {
    FixedWindowLimiter::new(Duration::from_secs(60), u32::MAX)
}

/// Registers a plain pilot profile and returns its actor.
pub fn create_pilot(persistence: &mut Persistence, username: &str) -> AuthenticatedActor {
    let profile = persistence
        .upsert_user_on_login(&format!("ext-{username}"), username, username, false)
        .expect("pilot profile created");
    AuthenticatedActor::from_profile(&profile)
}

/// Registers a controller profile and returns its actor.
pub fn create_controller(persistence: &mut Persistence, username: &str) -> AuthenticatedActor {
    let profile = persistence
        .upsert_user_on_login(&format!("ext-{username}"), username, username, false)
        .expect("controller profile created");
    let profile = persistence
        .toggle_controller(profile.user_id)
        .expect("controller flag set");
    AuthenticatedActor::from_profile(&profile)
}

/// Registers an admin profile and returns its actor.
pub fn create_admin(persistence: &mut Persistence, username: &str) -> AuthenticatedActor {
    let profile = persistence
        .upsert_user_on_login(&format!("ext-{username}"), username, username, true)
        .expect("admin profile created");
    AuthenticatedActor::from_profile(&profile)
}

pub fn create_file_request(callsign: &str, airport: &str) -> FileFlightRequest {
    FileFlightRequest {
        airport: airport.to_string(),
        callsign: callsign.to_string(),
        aircraft_type: String::from("B738"),
        departure: String::from("KJFK"),
        arrival: String::from("KLAX"),
        altitude: String::from("FL350"),
        speed: String::from("450"),
        departure_time: String::from("1830Z"),
        squawk: None,
        route: Some(String::from("DCT MERIT DCT")),
        notes: None,
        discord_username: None,
        geofs_callsign: None,
    }
}

pub fn create_create_request(callsign: &str, airport: &str, status: &str) -> CreateFlightRequest {
    CreateFlightRequest {
        airport: airport.to_string(),
        callsign: callsign.to_string(),
        aircraft_type: String::from("A320"),
        departure: String::from("EGLL"),
        arrival: String::from("EHAM"),
        altitude: String::from("FL240"),
        speed: String::from("430"),
        departure_time: String::from("0915Z"),
        status: status.to_string(),
        squawk: None,
        route: None,
        notes: None,
        discord_username: Some(String::from("pilotA")),
        geofs_callsign: None,
    }
}
