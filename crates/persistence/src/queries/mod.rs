// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend-agnostic query modules.
//!
//! This module contains all read-only operations for the persistence layer.
//! All queries use Diesel DSL and work across all supported database
//! backends.
//!
//! ## Module Organization
//!
//! - `flights` — Flight strips, boards, and status history
//! - `settings` — The singleton event settings record
//! - `users` — User profiles and sessions

pub mod flights;
pub mod settings;
pub mod users;

pub use flights::{
    get_flight_mysql, get_flight_sqlite, get_flight_history_mysql, get_flight_history_sqlite,
    list_active_squawks_mysql, list_active_squawks_sqlite, list_flights_for_airport_mysql,
    list_flights_for_airport_sqlite, list_flights_for_pilot_mysql, list_flights_for_pilot_sqlite,
    list_flights_mysql, list_flights_sqlite,
};
pub use settings::{get_settings_mysql, get_settings_sqlite};
pub use users::{
    get_session_by_token_mysql, get_session_by_token_sqlite, get_user_by_external_id_mysql,
    get_user_by_external_id_sqlite, get_user_by_id_mysql, get_user_by_id_sqlite, list_users_mysql,
    list_users_sqlite,
};
