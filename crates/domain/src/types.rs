// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};

/// A flight callsign.
///
/// Callsigns are the primary human identifier for a strip and must be unique
/// among all active flights. They are normalized to uppercase so uniqueness
/// is case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Callsign {
    /// The callsign value (uppercase).
    value: String,
}

impl Callsign {
    /// Creates a new `Callsign`, normalizing to uppercase.
    ///
    /// # Arguments
    ///
    /// * `value` - The callsign value (will be normalized to uppercase)
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self {
            value: value.trim().to_uppercase(),
        }
    }

    /// Returns the callsign value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl std::fmt::Display for Callsign {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// An airport board identifier.
///
/// ICAO-like codes (e.g., "KJFK"). Normalized to uppercase; the strip's
/// airport determines which controller board it appears on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AirportCode {
    /// The airport code (uppercase).
    value: String,
}

impl AirportCode {
    /// Creates a new `AirportCode`, normalizing to uppercase.
    ///
    /// # Arguments
    ///
    /// * `value` - The airport code (will be normalized to uppercase)
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self {
            value: value.trim().to_uppercase(),
        }
    }

    /// Returns the airport code.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl std::fmt::Display for AirportCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}
