// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Bulk flight import.
//!
//! Import payloads are untrusted external input: each row is validated
//! against the same contract as a single controller creation, and rows
//! fail individually. A failing row never aborts the batch, and nothing is
//! retried automatically — callers decide what to do with the per-row
//! results.

use tracing::info;

use stripboard_domain::Flight;
use stripboard_persistence::Persistence;

use crate::auth::{AuthenticatedActor, AuthorizationService};
use crate::error::{ApiError, translate_persistence_error};
use crate::handlers::build_flight;
use crate::request_response::{
    ImportFlightsRequest, ImportFlightsResponse, ImportRowResult, ImportRowStatus,
};

/// Imports a batch of flight strips. Controller tier.
///
/// Each row is validated and inserted independently; the response reports
/// per-row outcomes in request order. Later rows see the strips created by
/// earlier rows, so duplicate callsigns inside one batch fail on the
/// second occurrence.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `request` - The batch of rows to import
/// * `actor` - The authenticated actor
///
/// # Errors
///
/// Returns an error only when the actor lacks the controller tier; row
/// failures are reported in the response instead.
pub fn import_flights(
    persistence: &mut Persistence,
    request: ImportFlightsRequest,
    actor: &AuthenticatedActor,
) -> Result<ImportFlightsResponse, ApiError> {
    AuthorizationService::authorize_controller(actor, "import_flights")?;

    let mut results: Vec<ImportRowResult> = Vec::with_capacity(request.flights.len());
    let mut created_count: usize = 0;

    for (row, row_request) in request.flights.into_iter().enumerate() {
        let callsign: Option<String> = if row_request.callsign.trim().is_empty() {
            None
        } else {
            Some(row_request.callsign.trim().to_uppercase())
        };

        let outcome: Result<Flight, ApiError> = build_flight(&row_request).and_then(|flight| {
            persistence
                .create_flight(&flight, None)
                .map_err(translate_persistence_error)
        });

        match outcome {
            Ok(created) => {
                created_count += 1;
                results.push(ImportRowResult {
                    row,
                    callsign,
                    status: ImportRowStatus::Created,
                    message: format!("Created flight '{}'", created.callsign),
                });
            }
            Err(error) => {
                results.push(ImportRowResult {
                    row,
                    callsign,
                    status: ImportRowStatus::Failed,
                    message: error.to_string(),
                });
            }
        }
    }

    let failed_count: usize = results.len() - created_count;
    info!(
        created = created_count,
        failed = failed_count,
        imported_by = %actor.username,
        "Bulk flight import finished"
    );

    Ok(ImportFlightsResponse {
        results,
        created_count,
        failed_count,
    })
}
