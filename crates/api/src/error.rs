// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use crate::rate_limit::RateLimitExceeded;
use stripboard_domain::DomainError;
use stripboard_persistence::PersistenceError;

/// Authentication and authorization errors.
///
/// `AuthenticationFailed` means no valid identity was presented;
/// `Forbidden` means the identity is valid but lacks the required role or
/// ownership. The two are kept distinct so the HTTP boundary can map them
/// to 401 and 403 respectively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed.
    Forbidden {
        /// The action that was attempted.
        action: String,
        /// The role or ownership required for this action.
        required_role: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Forbidden {
                action,
                required_role,
            } => {
                write!(f, "Forbidden: '{action}' requires {required_role}")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// API-level errors.
///
/// These are distinct from domain/persistence errors and represent the API
/// contract. All variants except `Internal` are expected, user-facing
/// outcomes; `Internal` carries detail for logging and must be surfaced
/// generically at the HTTP boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed - the actor does not have permission.
    Forbidden {
        /// The action that was attempted.
        action: String,
        /// The role or ownership required for this action.
        required_role: String,
    },
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// The caller exceeded the filing rate limit.
    RateLimited {
        /// Seconds until the current window resets.
        retry_after_seconds: u64,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Forbidden {
                action,
                required_role,
            } => {
                write!(f, "Forbidden: '{action}' requires {required_role}")
            }
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::RateLimited {
                retry_after_seconds,
            } => {
                write!(f, "Rate limit exceeded: retry in {retry_after_seconds} seconds")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
            AuthError::Forbidden {
                action,
                required_role,
            } => Self::Forbidden {
                action,
                required_role,
            },
        }
    }
}

impl From<RateLimitExceeded> for ApiError {
    fn from(err: RateLimitExceeded) -> Self {
        Self::RateLimited {
            retry_after_seconds: err.retry_after_seconds,
        }
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::MissingField { field } => ApiError::InvalidInput {
            field: field.clone(),
            message: format!("Required field '{field}' is missing or empty"),
        },
        DomainError::InvalidStatus(value) => ApiError::InvalidInput {
            field: String::from("status"),
            message: format!(
                "Invalid flight status '{value}'. Must be one of: delivery, ground, tower, departure, approach, control"
            ),
        },
        DomainError::InvalidMode(value) => ApiError::InvalidInput {
            field: String::from("mode"),
            message: format!("Invalid settings mode: '{value}'"),
        },
        DomainError::DuplicateCallsign { callsign } => ApiError::DomainRuleViolation {
            rule: String::from("unique_callsign"),
            message: format!("An active flight with callsign '{callsign}' already exists"),
        },
        DomainError::AirportFull { airport, capacity } => ApiError::DomainRuleViolation {
            rule: String::from("airport_capacity"),
            message: format!(
                "Airport '{airport}' is full: board already holds {capacity} flights"
            ),
        },
        DomainError::FlightNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Flight"),
            message: format!("Flight {id} does not exist"),
        },
        DomainError::UserNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("User"),
            message: format!("User {id} does not exist"),
        },
        DomainError::IdentityNotLinked => ApiError::InvalidInput {
            field: String::from("identity"),
            message: String::from("No external identity is linked to this account"),
        },
        DomainError::CannotSelfToggle => ApiError::DomainRuleViolation {
            rule: String::from("role_self_protection"),
            message: String::from("Cannot toggle your own controller flag"),
        },
        DomainError::CannotSelfDemote => ApiError::DomainRuleViolation {
            rule: String::from("role_self_protection"),
            message: String::from("Cannot remove your own admin flag"),
        },
    }
}

/// Translates a persistence error into an API error.
///
/// Domain-meaningful storage outcomes (duplicate callsign, full board,
/// missing rows) surface as their user-facing API variants; everything else
/// is an internal error whose detail is for logging only.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::DuplicateCallsign(callsign) => ApiError::DomainRuleViolation {
            rule: String::from("unique_callsign"),
            message: format!("An active flight with callsign '{callsign}' already exists"),
        },
        PersistenceError::AirportFull { airport, capacity } => ApiError::DomainRuleViolation {
            rule: String::from("airport_capacity"),
            message: format!(
                "Airport '{airport}' is full: board already holds {capacity} flights"
            ),
        },
        PersistenceError::FlightNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Flight"),
            message: format!("Flight {id} does not exist"),
        },
        PersistenceError::UserNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("User"),
            message: format!("User {id} does not exist"),
        },
        PersistenceError::NotFound(message) => ApiError::ResourceNotFound {
            resource_type: String::from("Resource"),
            message,
        },
        other => ApiError::Internal {
            message: format!("Storage error: {other}"),
        },
    }
}
