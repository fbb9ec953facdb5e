// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend validation tests for multi-database support.
//!
//! These tests validate that the persistence layer works correctly
//! across different database backends (`SQLite`, MariaDB/MySQL).
//!
//! ## Test Execution
//!
//! - `SQLite` tests run normally via `cargo test`
//! - MariaDB/MySQL tests are marked `#[ignore]` and run only via `cargo xtask test-mariadb`
//!
//! ## Infrastructure Requirements
//!
//! `MariaDB` tests require:
//! - `DATABASE_URL` environment variable (set by xtask)
//! - `STRIPBOARD_TEST_BACKEND=mariadb` environment variable
//! - Running `MariaDB` instance (provisioned by xtask)
//!
//! Tests fail fast if required infrastructure is missing.
//!
//! ## What These Tests Validate
//!
//! These tests focus on **infrastructure and schema compatibility**, not
//! business logic: migration application, constraint enforcement (FK,
//! UNIQUE, the settings singleton CHECK), and transaction semantics.
//! Business logic is validated by the standard suite against `SQLite`.

use diesel::MysqlConnection;
use diesel::prelude::*;
use std::env;

use crate::backend::mysql;
use crate::tests::create_test_flight;
use crate::{Persistence, PersistenceError};
use stripboard_domain::SettingsPatch;

/// Helper to get the `MariaDB` connection URL from environment.
///
/// # Panics
///
/// Panics if `DATABASE_URL` is not set, indicating missing infrastructure.
fn get_mariadb_url() -> String {
    env::var("DATABASE_URL")
        .expect("DATABASE_URL not set - MariaDB tests must be run via `cargo xtask test-mariadb`")
}

/// Helper to verify we're running in the `MariaDB` test environment.
///
/// # Panics
///
/// Panics if the backend marker is missing, indicating these tests were
/// invoked outside the xtask orchestration.
fn verify_mariadb_test_environment() {
    let backend: String = env::var("STRIPBOARD_TEST_BACKEND")
        .expect("STRIPBOARD_TEST_BACKEND not set - run via `cargo xtask test-mariadb`");
    assert_eq!(backend, "mariadb", "Unexpected test backend: {backend}");
}

/// Removes all rows so each validation test starts from a clean schema.
fn truncate_all_tables(conn: &mut MysqlConnection) {
    for table in [
        "flight_history",
        "sessions",
        "flights",
        "users",
        "event_settings",
    ] {
        diesel::sql_query(format!("DELETE FROM {table}"))
            .execute(conn)
            .expect("cleanup delete succeeds");
    }
}

fn create_mariadb_persistence() -> Persistence {
    verify_mariadb_test_environment();
    let url: String = get_mariadb_url();
    let mut conn: MysqlConnection =
        mysql::initialize_database(&url).expect("MariaDB initialization succeeds");
    truncate_all_tables(&mut conn);
    Persistence::new_with_mysql(&url).expect("MariaDB persistence adapter initializes")
}

#[test]
#[ignore = "requires MariaDB - run via cargo xtask test-mariadb"]
fn test_mariadb_migrations_apply_cleanly() {
    verify_mariadb_test_environment();
    let url: String = get_mariadb_url();

    // Applying migrations twice must be a no-op the second time.
    mysql::initialize_database(&url).expect("first initialization succeeds");
    mysql::initialize_database(&url).expect("re-initialization is idempotent");
}

#[test]
#[ignore = "requires MariaDB - run via cargo xtask test-mariadb"]
fn test_mariadb_enforces_callsign_uniqueness() {
    let mut persistence: Persistence = create_mariadb_persistence();

    persistence
        .create_flight(&create_test_flight("DAL456", "KJFK"), None)
        .expect("first create succeeds");
    let result = persistence.create_flight(&create_test_flight("dal456", "EGLL"), None);

    assert_eq!(
        result,
        Err(PersistenceError::DuplicateCallsign(String::from("DAL456")))
    );
}

#[test]
#[ignore = "requires MariaDB - run via cargo xtask test-mariadb"]
fn test_mariadb_cascade_delete_removes_history() {
    let mut persistence: Persistence = create_mariadb_persistence();

    let flight_id: i64 = persistence
        .create_flight(&create_test_flight("UAL1", "KJFK"), None)
        .expect("create succeeds")
        .flight_id
        .expect("persisted id");
    let changes = crate::FlightChangeset {
        status: Some(String::from("ground")),
        ..crate::FlightChangeset::default()
    };
    persistence
        .update_flight(flight_id, &changes, Some("controller-1"))
        .expect("update succeeds");

    persistence.delete_flight(flight_id).expect("delete succeeds");

    assert!(
        persistence
            .get_flight_history(flight_id)
            .expect("history query succeeds")
            .is_empty()
    );
}

#[test]
#[ignore = "requires MariaDB - run via cargo xtask test-mariadb"]
fn test_mariadb_settings_singleton_constraint() {
    let mut persistence: Persistence = create_mariadb_persistence();

    persistence
        .update_event_settings(&SettingsPatch {
            is_event_live: Some(true),
            ..SettingsPatch::default()
        })
        .expect("first upsert succeeds");
    persistence
        .update_event_settings(&SettingsPatch {
            is_event_live: Some(false),
            ..SettingsPatch::default()
        })
        .expect("second upsert patches the same row");

    let settings = persistence.get_event_settings().expect("read succeeds");
    assert!(!settings.is_event_live);
}
