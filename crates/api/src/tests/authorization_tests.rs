// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use stripboard_persistence::Persistence;

use crate::auth::{AuthenticatedActor, AuthenticationService};
use crate::error::{ApiError, AuthError};
use crate::handlers::{delete_flight, file_flight, get_flight_history, update_flight};
use crate::rate_limit::FixedWindowLimiter;
use crate::request_response::{FlightInfo, UpdateFlightRequest};
use crate::tests::helpers::{
    create_controller, create_file_request, create_pilot, create_test_persistence,
    unlimited_limiter,
};

fn file_as(
    persistence: &mut Persistence,
    limiter: &FixedWindowLimiter,
    pilot: &AuthenticatedActor,
    callsign: &str,
) -> FlightInfo {
    file_flight(
        persistence,
        limiter,
        create_file_request(callsign, "KJFK"),
        pilot,
    )
    .expect("filing succeeds")
}

#[test]
fn test_owner_may_edit_while_in_delivery() {
    let mut persistence: Persistence = create_test_persistence();
    let pilot = create_pilot(&mut persistence, "pilotA");
    let limiter: FixedWindowLimiter = unlimited_limiter();
    let filed: FlightInfo = file_as(&mut persistence, &limiter, &pilot, "DAL456");

    let updated = update_flight(
        &mut persistence,
        filed.flight_id,
        UpdateFlightRequest {
            altitude: Some(String::from("FL390")),
            ..UpdateFlightRequest::default()
        },
        &pilot,
    );

    assert!(updated.is_ok());
}

#[test]
fn test_owner_loses_edit_rights_after_delivery() {
    let mut persistence: Persistence = create_test_persistence();
    let pilot = create_pilot(&mut persistence, "pilotA");
    let controller = create_controller(&mut persistence, "controller1");
    let limiter: FixedWindowLimiter = unlimited_limiter();
    let filed: FlightInfo = file_as(&mut persistence, &limiter, &pilot, "DAL456");

    // Controller advances the strip off the delivery board.
    update_flight(
        &mut persistence,
        filed.flight_id,
        UpdateFlightRequest {
            status: Some(String::from("ground")),
            ..UpdateFlightRequest::default()
        },
        &controller,
    )
    .expect("controller advance succeeds");

    // The filing pilot's edit rights are permanently gone.
    let result = update_flight(
        &mut persistence,
        filed.flight_id,
        UpdateFlightRequest {
            altitude: Some(String::from("FL390")),
            ..UpdateFlightRequest::default()
        },
        &pilot,
    );

    assert!(matches!(result, Err(ApiError::Forbidden { .. })));
}

#[test]
fn test_non_owner_pilot_may_never_edit() {
    let mut persistence: Persistence = create_test_persistence();
    let pilot = create_pilot(&mut persistence, "pilotA");
    let other = create_pilot(&mut persistence, "pilotB");
    let limiter: FixedWindowLimiter = unlimited_limiter();
    let filed: FlightInfo = file_as(&mut persistence, &limiter, &pilot, "DAL456");

    // Still in delivery, but pilotB does not own the strip.
    let result = update_flight(
        &mut persistence,
        filed.flight_id,
        UpdateFlightRequest {
            notes: Some(String::from("not mine")),
            ..UpdateFlightRequest::default()
        },
        &other,
    );

    assert!(matches!(result, Err(ApiError::Forbidden { .. })));
}

#[test]
fn test_pilot_may_never_delete() {
    let mut persistence: Persistence = create_test_persistence();
    let pilot = create_pilot(&mut persistence, "pilotA");
    let limiter: FixedWindowLimiter = unlimited_limiter();
    let filed: FlightInfo = file_as(&mut persistence, &limiter, &pilot, "DAL456");

    // Not even the owner, not even in delivery.
    let result = delete_flight(&mut persistence, filed.flight_id, &pilot);

    assert!(matches!(result, Err(ApiError::Forbidden { .. })));
}

#[test]
fn test_controller_manages_any_flight_in_any_sector() {
    let mut persistence: Persistence = create_test_persistence();
    let pilot = create_pilot(&mut persistence, "pilotA");
    let controller = create_controller(&mut persistence, "controller1");
    let limiter: FixedWindowLimiter = unlimited_limiter();
    let filed: FlightInfo = file_as(&mut persistence, &limiter, &pilot, "DAL456");

    for status in ["control", "tower", "delivery"] {
        update_flight(
            &mut persistence,
            filed.flight_id,
            UpdateFlightRequest {
                status: Some(status.to_string()),
                ..UpdateFlightRequest::default()
            },
            &controller,
        )
        .expect("controller edits in any sector");
    }

    assert!(delete_flight(&mut persistence, filed.flight_id, &controller).is_ok());
}

#[test]
fn test_lifecycle_example_scenario() {
    let mut persistence: Persistence = create_test_persistence();
    let pilot = create_pilot(&mut persistence, "pilotA");
    let controller = create_controller(&mut persistence, "controller1");
    let limiter: FixedWindowLimiter = unlimited_limiter();

    // Pilot files and edits while the strip sits in delivery.
    let filed: FlightInfo = file_as(&mut persistence, &limiter, &pilot, "DAL456");
    update_flight(
        &mut persistence,
        filed.flight_id,
        UpdateFlightRequest {
            route: Some(String::from("DCT CAMRN DCT")),
            ..UpdateFlightRequest::default()
        },
        &pilot,
    )
    .expect("owner edit in delivery succeeds");

    // Controller advances it; the pilot's next edit is refused.
    update_flight(
        &mut persistence,
        filed.flight_id,
        UpdateFlightRequest {
            status: Some(String::from("ground")),
            ..UpdateFlightRequest::default()
        },
        &controller,
    )
    .expect("controller advance succeeds");
    let refused = update_flight(
        &mut persistence,
        filed.flight_id,
        UpdateFlightRequest {
            notes: Some(String::from("late change")),
            ..UpdateFlightRequest::default()
        },
        &pilot,
    );
    assert!(matches!(refused, Err(ApiError::Forbidden { .. })));

    // Controller deletes; the history trail is gone with the strip.
    delete_flight(&mut persistence, filed.flight_id, &controller).expect("deletion succeeds");
    let history = get_flight_history(&mut persistence, filed.flight_id, &controller)
        .expect("history query succeeds");
    assert!(history.is_empty());
}

#[test]
fn test_login_issues_session_and_validates() {
    let mut persistence: Persistence = create_test_persistence();

    let (token, actor, profile) =
        AuthenticationService::login(&mut persistence, "discord-1", "pilotA", "Pilot A", false)
            .expect("login succeeds");
    assert_eq!(actor.username, "pilotA");
    assert!(!profile.is_controller);

    let (validated, _) = AuthenticationService::validate_session(&mut persistence, &token)
        .expect("session validates");
    assert_eq!(validated.user_id, actor.user_id);
}

#[test]
fn test_login_rejects_incomplete_identity() {
    let mut persistence: Persistence = create_test_persistence();

    let result = AuthenticationService::login(&mut persistence, "", "pilotA", "Pilot A", false);

    assert!(matches!(
        result,
        Err(AuthError::AuthenticationFailed { .. })
    ));
}

#[test]
fn test_logout_invalidates_session() {
    let mut persistence: Persistence = create_test_persistence();
    let (token, _, _) =
        AuthenticationService::login(&mut persistence, "discord-1", "pilotA", "Pilot A", false)
            .expect("login succeeds");

    AuthenticationService::logout(&mut persistence, &token).expect("logout succeeds");

    let result = AuthenticationService::validate_session(&mut persistence, &token);
    assert!(matches!(
        result,
        Err(AuthError::AuthenticationFailed { .. })
    ));
}

#[test]
fn test_expired_session_is_rejected() {
    let mut persistence: Persistence = create_test_persistence();
    let profile = persistence
        .upsert_user_on_login("discord-1", "pilotA", "Pilot A", false)
        .expect("profile created");
    persistence
        .create_session("stale-token", profile.user_id, "2001-01-01T00:00:00Z")
        .expect("session created");

    let result = AuthenticationService::validate_session(&mut persistence, "stale-token");

    assert!(matches!(
        result,
        Err(AuthError::AuthenticationFailed { .. })
    ));
}

#[test]
fn test_unknown_token_is_rejected() {
    let mut persistence: Persistence = create_test_persistence();

    let result = AuthenticationService::validate_session(&mut persistence, "no-such-token");

    assert!(matches!(
        result,
        Err(AuthError::AuthenticationFailed { .. })
    ));
}
