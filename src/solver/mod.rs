// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Routeview-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Routeview and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Contract with the external route-solving service.
//!
//! The crate never optimizes routes itself. It builds and validates the request, and turns a
//! reply into a [`RouteSet`](crate::model::RouteSet).

mod request;
mod response;

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::model::VehicleIdError;

pub use request::SolveRequest;
pub use response::{decode_response, SolveMetrics, SolveOutcome, SolveResponse};

#[derive(Debug, Error)]
pub enum SolverError {
    #[error("at least 2 locations are needed, got {0}")]
    TooFewLocations(usize),
    #[error("location {0} has a non-finite coordinate")]
    NonFiniteLocation(usize),
    #[error("{demands} demand value(s) for {locations} location(s)")]
    DemandMismatch { demands: usize, locations: usize },
    #[error("at least one vehicle is needed")]
    NoVehicles,
    #[error("{num_vehicles} vehicle(s) but only {capacities} capacity value(s)")]
    MissingCapacities {
        num_vehicles: usize,
        capacities: usize,
    },
    #[error("no depot selected")]
    MissingDepot,
    #[error("depot {depot} is outside the {locations} location(s)")]
    DepotOutOfRange { depot: usize, locations: usize },
    #[error("total demand {demand} exceeds the fleet capacity {capacity}")]
    OverCapacity { demand: u64, capacity: u64 },
    #[error("solver reported: {0}")]
    Remote(String),
    #[error("solver returned invalid vehicle id {id:?}: {source}")]
    InvalidVehicleId {
        id: String,
        #[source]
        source: VehicleIdError,
    },
    #[error("no solver configured")]
    Unavailable,
    #[error("failed to read solver reply {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid solver JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub trait RouteSolver {
    fn solve(&mut self, request: &SolveRequest) -> Result<SolveOutcome, SolverError>;
}

/// Answers every valid request with a recorded reply read from disk.
#[derive(Debug, Clone)]
pub struct ReplaySolver {
    path: PathBuf,
}

impl ReplaySolver {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RouteSolver for ReplaySolver {
    fn solve(&mut self, request: &SolveRequest) -> Result<SolveOutcome, SolverError> {
        request.validate()?;
        let json = std::fs::read_to_string(&self.path).map_err(|source| SolverError::Read {
            path: self.path.clone(),
            source,
        })?;
        let outcome = decode_response(&json)?;
        log::debug!(
            "replayed {} route(s) from {}",
            outcome.routes.len(),
            self.path.display()
        );
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use std::env;
    use std::fs;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::{ReplaySolver, RouteSolver, SolveRequest, SolverError};
    use crate::model::fixtures::demo_plan;

    static REPLAY_COUNTER: AtomicUsize = AtomicUsize::new(0);

    fn temp_reply(contents: &str) -> PathBuf {
        let counter = REPLAY_COUNTER.fetch_add(1, Ordering::Relaxed);
        let mut path = env::temp_dir();
        path.push(format!("routeview-replay-{}-{counter}.json", std::process::id()));
        fs::write(&path, contents).expect("write reply");
        path
    }

    #[test]
    fn replays_recorded_reply() {
        let path = temp_reply(r#"{"calculated_routes": {"0": [[13.4, 52.5], [13.3, 52.4]]}}"#);
        let mut solver = ReplaySolver::new(&path);
        let request = SolveRequest::from_plan(&demo_plan()).expect("request");
        let outcome = solver.solve(&request).expect("outcome");
        assert_eq!(outcome.routes.len(), 1);
        let _ = fs::remove_file(path);
    }

    #[test]
    fn invalid_request_never_reads_the_reply() {
        let mut solver = ReplaySolver::new("/definitely/not/here.json");
        let mut request = SolveRequest::from_plan(&demo_plan()).expect("request");
        request.num_vehicles = 0;
        assert!(matches!(solver.solve(&request), Err(SolverError::NoVehicles)));
    }

    #[test]
    fn missing_reply_is_a_read_error() {
        let mut solver = ReplaySolver::new("/definitely/not/here.json");
        let request = SolveRequest::from_plan(&demo_plan()).expect("request");
        assert!(matches!(solver.solve(&request), Err(SolverError::Read { .. })));
    }
}
