// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Routeview-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Routeview and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::SolverError;
use crate::model::{Degree, LngLat, RouteSet, VehicleId};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SolveMetrics {
    #[serde(default)]
    pub total_distance: f64,
    #[serde(default)]
    pub total_load: u64,
}

/// Wire shape of a solver reply: either routes or an error message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SolveResponse {
    Failure {
        error: String,
    },
    Success {
        #[serde(default)]
        message: Option<String>,
        calculated_routes: BTreeMap<String, Vec<[Degree; 2]>>,
        #[serde(default)]
        metrics: Option<SolveMetrics>,
    },
}

/// A decoded, successful solve.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SolveOutcome {
    pub routes: RouteSet,
    pub metrics: Option<SolveMetrics>,
    pub message: Option<String>,
}

impl SolveResponse {
    pub fn into_outcome(self) -> Result<SolveOutcome, SolverError> {
        match self {
            Self::Failure { error } => Err(SolverError::Remote(error)),
            Self::Success {
                message,
                calculated_routes,
                metrics,
            } => {
                let mut routes = RouteSet::new();
                for (raw_id, waypoints) in calculated_routes {
                    let vehicle_id = VehicleId::new(&raw_id)
                        .map_err(|source| SolverError::InvalidVehicleId { id: raw_id, source })?;
                    let waypoints = waypoints.into_iter().map(LngLat::from).collect();
                    routes.insert(vehicle_id, waypoints);
                }
                Ok(SolveOutcome {
                    routes,
                    metrics,
                    message,
                })
            }
        }
    }
}

pub fn decode_response(json: &str) -> Result<SolveOutcome, SolverError> {
    serde_json::from_str::<SolveResponse>(json)?.into_outcome()
}

#[cfg(test)]
mod tests {
    use super::decode_response;
    use crate::model::{LngLat, VehicleId};
    use crate::solver::SolverError;

    #[test]
    fn decodes_routes_and_metrics() {
        let outcome = decode_response(
            r#"{
                "message": "Success",
                "calculated_routes": {
                    "10": [[13.41, 52.52], [13.37, 52.51], [13.41, 52.52]],
                    "2": [[13.41, 52.52], [13.44, 52.50]]
                },
                "metrics": {"total_distance": 1234.5, "total_load": 9}
            }"#,
        )
        .expect("outcome");
        let ids = outcome.routes.keys().map(VehicleId::as_str).collect::<Vec<_>>();
        assert_eq!(ids, vec!["2", "10"]);
        let route = &outcome.routes[&VehicleId::from_index(10)];
        assert_eq!(route[1], LngLat::new(13.37, 52.51));
        let metrics = outcome.metrics.expect("metrics");
        assert_eq!(metrics.total_load, 9);
        assert_eq!(outcome.message.as_deref(), Some("Success"));
    }

    #[test]
    fn metrics_are_optional() {
        let outcome =
            decode_response(r#"{"calculated_routes": {}}"#).expect("outcome without metrics");
        assert!(outcome.routes.is_empty());
        assert_eq!(outcome.metrics, None);
    }

    #[test]
    fn error_reply_becomes_remote_error() {
        let error = decode_response(r#"{"error": "No solution found"}"#).expect_err("failure");
        assert!(matches!(error, SolverError::Remote(message) if message == "No solution found"));
    }

    #[test]
    fn empty_vehicle_id_is_rejected() {
        let error = decode_response(r#"{"calculated_routes": {"": [[0, 0], [1, 1]]}}"#)
            .expect_err("invalid id");
        assert!(matches!(error, SolverError::InvalidVehicleId { .. }));
    }

    #[test]
    fn garbage_is_a_json_error() {
        assert!(matches!(
            decode_response("{\"status\": 1}"),
            Err(SolverError::Json(_))
        ));
    }
}
