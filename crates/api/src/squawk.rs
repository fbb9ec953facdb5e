// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Squawk code assignment.
//!
//! A squawk is a four-octal-digit transponder code. Filings without a
//! supplied squawk are assigned one that is neither reserved nor already
//! held by an active flight.

use std::collections::HashSet;
use stripboard_persistence::Persistence;

use crate::error::{ApiError, translate_persistence_error};

/// Codes with fixed meanings that must never be auto-assigned: emergency
/// (7500/7600/7700), VFR and conspicuity codes, and the all-zeros/test codes.
const RESERVED_SQUAWKS: [&str; 8] = [
    "0000", "1200", "2000", "7000", "7500", "7600", "7700", "7777",
];

/// Number of four-octal-digit codes (0000 through 7777).
const SQUAWK_POOL_SIZE: u32 = 4096;

/// Random draws attempted before falling back to a sequential scan.
const RANDOM_ATTEMPTS: u32 = 256;

/// Generates a squawk code unique among active flights.
///
/// Draws random codes first; if the pool is congested enough that the draws
/// all collide, scans the pool sequentially so assignment still succeeds
/// whenever any code remains free.
///
/// # Arguments
///
/// * `persistence` - The persistence layer, queried for codes in use
///
/// # Errors
///
/// Returns an error if the pool is exhausted or the storage query fails.
pub fn generate_unique_squawk(persistence: &mut Persistence) -> Result<String, ApiError> {
    let in_use: HashSet<String> = persistence
        .list_active_squawks()
        .map_err(translate_persistence_error)?
        .into_iter()
        .collect();

    let is_free = |code: &str| !in_use.contains(code) && !RESERVED_SQUAWKS.contains(&code);

    for _ in 0..RANDOM_ATTEMPTS {
        // 4096 divides u16::MAX + 1, so the modulo draw is unbiased.
        let code: String = format!("{:04o}", u32::from(rand::random::<u16>()) % SQUAWK_POOL_SIZE);
        if is_free(&code) {
            return Ok(code);
        }
    }

    // Congested pool: take the first free code in order.
    for n in 0..SQUAWK_POOL_SIZE {
        let code: String = format!("{n:04o}");
        if is_free(&code) {
            return Ok(code);
        }
    }

    Err(ApiError::Internal {
        message: String::from("Squawk code pool is exhausted"),
    })
}
