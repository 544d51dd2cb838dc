// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Routeview-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Routeview and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde::{Deserialize, Serialize};

use super::SolverError;
use crate::model::{Degree, Plan};

/// Body of a solve call. Locations travel as `[lon, lat]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolveRequest {
    pub locations: Vec<[Degree; 2]>,
    pub num_vehicles: usize,
    pub depot: usize,
    pub capacities: Vec<u32>,
    pub demands: Vec<u32>,
}

impl SolveRequest {
    /// One vehicle per configured capacity.
    pub fn from_plan(plan: &Plan) -> Result<Self, SolverError> {
        let depot = plan.depot_index().ok_or(SolverError::MissingDepot)?;
        let request = Self {
            locations: plan
                .locations()
                .iter()
                .map(|location| [location.longitude, location.latitude])
                .collect(),
            num_vehicles: plan.vehicle_capacities().len(),
            depot,
            capacities: plan.vehicle_capacities().to_vec(),
            demands: plan.demands(),
        };
        request.validate()?;
        Ok(request)
    }

    /// Checks the preconditions a capacitated solve needs before anything is sent.
    pub fn validate(&self) -> Result<(), SolverError> {
        let locations = self.locations.len();
        if locations < 2 {
            return Err(SolverError::TooFewLocations(locations));
        }
        if let Some(index) = self
            .locations
            .iter()
            .position(|[lon, lat]| !lon.is_finite() || !lat.is_finite())
        {
            return Err(SolverError::NonFiniteLocation(index));
        }
        if self.demands.len() != locations {
            return Err(SolverError::DemandMismatch {
                demands: self.demands.len(),
                locations,
            });
        }
        if self.num_vehicles == 0 {
            return Err(SolverError::NoVehicles);
        }
        if self.capacities.len() < self.num_vehicles {
            return Err(SolverError::MissingCapacities {
                num_vehicles: self.num_vehicles,
                capacities: self.capacities.len(),
            });
        }
        if self.depot >= locations {
            return Err(SolverError::DepotOutOfRange {
                depot: self.depot,
                locations,
            });
        }

        let demand: u64 = self
            .demands
            .iter()
            .enumerate()
            .filter(|(index, _)| *index != self.depot)
            .map(|(_, demand)| u64::from(*demand))
            .sum();
        let capacity: u64 = self
            .capacities
            .iter()
            .take(self.num_vehicles)
            .map(|capacity| u64::from(*capacity))
            .sum();
        if demand > capacity {
            return Err(SolverError::OverCapacity { demand, capacity });
        }
        Ok(())
    }

    pub fn to_json_string(&self) -> Result<String, SolverError> {
        Ok(serde_json::to_string(self)?)
    }
}
