// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

mod auth;
mod capabilities;
mod error;
mod handlers;
mod import;
mod rate_limit;
mod request_response;
mod squawk;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticatedActor, AuthenticationService, AuthorizationService};
pub use capabilities::{click_advance_target, compute_user_capabilities};
pub use error::{ApiError, AuthError, translate_domain_error, translate_persistence_error};
pub use handlers::{
    create_flight, delete_flight, file_flight, flight_to_info, get_event_settings, get_flight,
    get_flight_history, list_flights, list_users, my_flights, set_admin, toggle_controller,
    update_event_settings, update_flight, user_to_info,
};
pub use import::import_flights;
pub use rate_limit::{FixedWindowLimiter, RateLimitExceeded};
pub use request_response::{
    Capability, CreateFlightRequest, DeleteFlightResponse, FileFlightRequest, FlightInfo,
    HistoryEntryInfo, ImportFlightsRequest, ImportFlightsResponse, ImportRowResult,
    ImportRowStatus, ListFlightsResponse, ListUsersResponse, LoginRequest, LoginResponse,
    SetAdminRequest, SetAdminResponse, ToggleControllerResponse, UpdateFlightRequest,
    UserCapabilities, UserInfo, WhoAmIResponse,
};
pub use squawk::generate_unique_squawk;
