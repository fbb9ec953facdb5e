// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A required field was missing or empty.
    MissingField {
        /// The name of the missing field.
        field: String,
    },
    /// The status value is not one of the six control sectors.
    InvalidStatus(String),
    /// A mode string could not be parsed.
    InvalidMode(String),
    /// An active flight with the same normalized callsign already exists.
    DuplicateCallsign {
        /// The colliding callsign (normalized).
        callsign: String,
    },
    /// The target airport board has reached its filing capacity.
    AirportFull {
        /// The airport code.
        airport: String,
        /// The capacity ceiling that was hit.
        capacity: u32,
    },
    /// The referenced flight does not exist.
    FlightNotFound(i64),
    /// The referenced user does not exist.
    UserNotFound(i64),
    /// The actor has no linked external identity.
    IdentityNotLinked,
    /// An admin attempted to toggle their own controller flag.
    CannotSelfToggle,
    /// An admin attempted to remove their own admin flag.
    CannotSelfDemote,
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField { field } => {
                write!(f, "Required field '{field}' is missing or empty")
            }
            Self::InvalidStatus(value) => {
                write!(f, "Invalid flight status: '{value}'")
            }
            Self::InvalidMode(value) => {
                write!(f, "Invalid settings mode: '{value}'")
            }
            Self::DuplicateCallsign { callsign } => {
                write!(f, "An active flight with callsign '{callsign}' already exists")
            }
            Self::AirportFull { airport, capacity } => {
                write!(
                    f,
                    "Airport '{airport}' is full: board already holds {capacity} flights"
                )
            }
            Self::FlightNotFound(id) => write!(f, "Flight {id} not found"),
            Self::UserNotFound(id) => write!(f, "User {id} not found"),
            Self::IdentityNotLinked => {
                write!(f, "No external identity is linked to this account")
            }
            Self::CannotSelfToggle => {
                write!(f, "Cannot toggle your own controller flag")
            }
            Self::CannotSelfDemote => {
                write!(f, "Cannot remove your own admin flag")
            }
        }
    }
}

impl std::error::Error for DomainError {}
