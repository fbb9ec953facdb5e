// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;

/// Validates that a required string field is present and non-empty.
///
/// # Arguments
///
/// * `field` - The field name, used in the error
/// * `value` - The field value
///
/// # Errors
///
/// Returns `DomainError::MissingField` if the value is empty or whitespace.
pub fn validate_required(field: &str, value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::MissingField {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Validates the required fields of a flight payload.
///
/// This checks presence only. It does NOT check callsign uniqueness or
/// airport capacity (both require storage context) and does not validate
/// semantic correctness of the flight-plan values.
///
/// # Arguments
///
/// * `airport` - The board the strip belongs to
/// * `callsign` - The strip's callsign
/// * `aircraft_type` - The aircraft type designator
/// * `departure` - The departure code
/// * `arrival` - The arrival code
/// * `altitude` - Cruise altitude
/// * `speed` - Cruise speed
/// * `departure_time` - Planned departure time
///
/// # Errors
///
/// Returns `DomainError::MissingField` naming the first empty field.
#[allow(clippy::too_many_arguments)]
pub fn validate_flight_fields(
    airport: &str,
    callsign: &str,
    aircraft_type: &str,
    departure: &str,
    arrival: &str,
    altitude: &str,
    speed: &str,
    departure_time: &str,
) -> Result<(), DomainError> {
    validate_required("airport", airport)?;
    validate_required("callsign", callsign)?;
    validate_required("aircraft_type", aircraft_type)?;
    validate_required("departure", departure)?;
    validate_required("arrival", arrival)?;
    validate_required("altitude", altitude)?;
    validate_required("speed", speed)?;
    validate_required("departure_time", departure_time)?;
    Ok(())
}
