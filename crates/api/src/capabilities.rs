// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Capability computation and board-interaction helpers.
//!
//! Capabilities expose what actions an actor is permitted to perform
//! without leaking policy internals. They are advisory only and do not
//! replace backend authorization checks.

use crate::auth::AuthenticatedActor;
use crate::request_response::{Capability, UserCapabilities};
use stripboard_domain::FlightStatus;

/// Computes advisory capabilities for an authenticated actor.
///
/// # Arguments
///
/// * `actor` - The authenticated actor
#[must_use]
pub const fn compute_user_capabilities(actor: &AuthenticatedActor) -> UserCapabilities {
    let controller: Capability = if actor.is_controller {
        Capability::Allowed
    } else {
        Capability::Denied
    };
    let admin: Capability = if actor.is_admin {
        Capability::Allowed
    } else {
        Capability::Denied
    };

    UserCapabilities {
        // Any authenticated actor may file.
        can_file_flight: Capability::Allowed,
        can_manage_flights: controller,
        can_delete_flights: controller,
        can_import_flights: controller,
        can_update_settings: admin,
        can_manage_roles: admin,
    }
}

/// The click-to-advance target for a strip in the given sector.
///
/// Board UIs advance a strip one sector per click, wrapping from `control`
/// back to `delivery`. This is a presentation convenience: the service
/// accepts a jump from any sector to any other, and nothing validates
/// updates against this table.
#[must_use]
pub const fn click_advance_target(status: FlightStatus) -> FlightStatus {
    match status {
        FlightStatus::Delivery => FlightStatus::Ground,
        FlightStatus::Ground => FlightStatus::Tower,
        FlightStatus::Tower => FlightStatus::Departure,
        FlightStatus::Departure => FlightStatus::Approach,
        FlightStatus::Approach => FlightStatus::Control,
        FlightStatus::Control => FlightStatus::Delivery,
    }
}
