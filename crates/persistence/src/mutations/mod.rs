// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend-agnostic mutation modules.
//!
//! This module contains all state-changing operations for the persistence
//! layer. Every check-then-write sequence (callsign uniqueness, airport
//! capacity, status-change history, the settings singleton upsert) runs
//! inside a single transaction so concurrent callers cannot interleave
//! between the check and the write.
//!
//! ## Module Organization
//!
//! - `flights` — Flight strip creation, partial update, and cascading delete
//! - `settings` — The singleton event settings upsert
//! - `users` — User profile upsert, role flags, and session lifecycle
//!
//! ## Backend-Specific Code
//!
//! Backend-specific helpers (e.g., `get_last_insert_rowid()`) are imported
//! from the `backend` module. All other code uses Diesel DSL exclusively.

pub mod flights;
pub mod settings;
pub mod users;

pub use flights::{
    create_flight_mysql, create_flight_sqlite, delete_flight_mysql, delete_flight_sqlite,
    update_flight_mysql, update_flight_sqlite,
};
pub use settings::{upsert_settings_mysql, upsert_settings_sqlite};
pub use users::{
    create_session_mysql, create_session_sqlite, delete_expired_sessions_mysql,
    delete_expired_sessions_sqlite, delete_session_mysql, delete_session_sqlite, set_admin_mysql,
    set_admin_sqlite, toggle_controller_mysql, toggle_controller_sqlite,
    update_session_activity_mysql, update_session_activity_sqlite, upsert_user_on_login_mysql,
    upsert_user_on_login_sqlite,
};
