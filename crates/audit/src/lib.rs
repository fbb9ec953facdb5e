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

use stripboard_domain::FlightStatus;

/// Represents the entity performing an action.
///
/// An actor is any identifiable entity that initiates a state change:
/// a controller, a pilot, or an import tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    /// The unique identifier for this actor.
    pub id: String,
    /// The type of actor (e.g., "controller", "pilot", "import").
    pub actor_type: String,
}

impl Actor {
    /// Creates a new Actor.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this actor
    /// * `actor_type` - The type of actor
    #[must_use]
    pub const fn new(id: String, actor_type: String) -> Self {
        Self { id, actor_type }
    }
}

/// An immutable record of one flight status transition.
///
/// Every status-changing update produces exactly one `StatusChange`, written
/// atomically with the update itself. A change records the sector the strip
/// left, the sector it entered, and who moved it. Updates that do not touch
/// the status produce no record, which is why construction rejects
/// `old == new`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusChange {
    /// The sector the strip was in before the update.
    pub old_status: FlightStatus,
    /// The sector the strip moved to.
    pub new_status: FlightStatus,
    /// The identifier of the actor who moved the strip, when known.
    pub changed_by: Option<String>,
}

impl StatusChange {
    /// Creates a new `StatusChange`, or `None` when the status did not
    /// actually change.
    ///
    /// # Arguments
    ///
    /// * `old_status` - The stored sector before the update
    /// * `new_status` - The requested sector
    /// * `changed_by` - The acting identity, when known
    #[must_use]
    pub fn new(
        old_status: FlightStatus,
        new_status: FlightStatus,
        changed_by: Option<String>,
    ) -> Option<Self> {
        if old_status == new_status {
            return None;
        }
        Some(Self {
            old_status,
            new_status,
            changed_by,
        })
    }
}
