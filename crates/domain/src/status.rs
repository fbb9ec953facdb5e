// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The control sector a flight strip currently sits in.
///
/// The six sectors form the fixed pipeline a strip moves through during an
/// event. The service validates membership only: a strip may jump from any
/// sector to any other (drag-and-drop between boards is legal), so no
/// ordering is enforced here. The click-to-advance successor lookup is a
/// presentation concern and lives at the API boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FlightStatus {
    /// Clearance delivery. Every pilot filing starts here, and the filing
    /// pilot may edit the strip only while it remains here.
    #[default]
    Delivery,
    /// Ground control.
    Ground,
    /// Tower.
    Tower,
    /// Departure.
    Departure,
    /// Approach.
    Approach,
    /// Area control.
    Control,
}

impl FromStr for FlightStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "delivery" => Ok(Self::Delivery),
            "ground" => Ok(Self::Ground),
            "tower" => Ok(Self::Tower),
            "departure" => Ok(Self::Departure),
            "approach" => Ok(Self::Approach),
            "control" => Ok(Self::Control),
            _ => Err(DomainError::InvalidStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for FlightStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FlightStatus {
    /// All six sectors, in pipeline order. Display/iteration convenience.
    pub const ALL: [Self; 6] = [
        Self::Delivery,
        Self::Ground,
        Self::Tower,
        Self::Departure,
        Self::Approach,
        Self::Control,
    ];

    /// Converts this sector to its canonical lowercase string form.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Delivery => "delivery",
            Self::Ground => "ground",
            Self::Tower => "tower",
            Self::Departure => "departure",
            Self::Approach => "approach",
            Self::Control => "control",
        }
    }
}
