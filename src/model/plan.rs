// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Routeview-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Routeview and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde::{Deserialize, Serialize};

use super::location::Location;

/// The editable input of a planning session: stops, the depot and the fleet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    #[serde(default)]
    locations: Vec<Location>,
    #[serde(default)]
    depot_index: Option<usize>,
    #[serde(default)]
    vehicle_capacities: Vec<u32>,
}

impl Plan {
    pub fn new(locations: Vec<Location>) -> Self {
        Self {
            locations,
            depot_index: None,
            vehicle_capacities: Vec::new(),
        }
    }

    pub fn with_depot(mut self, depot_index: usize) -> Self {
        self.set_depot(Some(depot_index));
        self
    }

    pub fn with_vehicle_capacities(mut self, capacities: Vec<u32>) -> Self {
        self.vehicle_capacities = capacities;
        self
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    pub fn depot_index(&self) -> Option<usize> {
        self.depot_index.filter(|index| *index < self.locations.len())
    }

    pub fn depot(&self) -> Option<&Location> {
        self.depot_index().and_then(|index| self.locations.get(index))
    }

    /// Sets the depot; indices outside the location list are refused.
    pub fn set_depot(&mut self, depot_index: Option<usize>) -> bool {
        match depot_index {
            Some(index) if index >= self.locations.len() => false,
            _ => {
                self.depot_index = depot_index;
                true
            }
        }
    }

    pub fn vehicle_capacities(&self) -> &[u32] {
        &self.vehicle_capacities
    }

    pub fn vehicle_capacities_mut(&mut self) -> &mut Vec<u32> {
        &mut self.vehicle_capacities
    }

    pub fn demands(&self) -> Vec<u32> {
        self.locations.iter().map(|location| location.demand).collect()
    }

    pub fn add_location(&mut self, location: Location) -> usize {
        self.locations.push(location);
        self.locations.len() - 1
    }

    /// Removes a location and keeps the depot pointing at the same stop.
    ///
    /// Removing the depot itself clears it.
    pub fn remove_location(&mut self, index: usize) -> Option<Location> {
        if index >= self.locations.len() {
            return None;
        }
        let removed = self.locations.remove(index);
        self.depot_index = match self.depot_index {
            Some(depot) if depot == index => None,
            Some(depot) if depot > index => Some(depot - 1),
            other => other,
        };
        Some(removed)
    }

    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::Plan;
    use crate::model::Location;

    fn three_stops() -> Plan {
        Plan::new(vec![
            Location::new(0.0, 0.0, 0),
            Location::new(1.0, 1.0, 5),
            Location::new(2.0, 2.0, 3),
        ])
    }

    #[test]
    fn removing_before_depot_shifts_it() {
        let mut plan = three_stops().with_depot(2);
        plan.remove_location(0).expect("removed");
        assert_eq!(plan.depot_index(), Some(1));
        assert_eq!(plan.depot().map(|depot| depot.demand), Some(3));
    }

    #[test]
    fn removing_depot_clears_it() {
        let mut plan = three_stops().with_depot(1);
        plan.remove_location(1).expect("removed");
        assert_eq!(plan.depot_index(), None);
    }

    #[test]
    fn set_depot_refuses_out_of_range() {
        let mut plan = three_stops();
        assert!(!plan.set_depot(Some(3)));
        assert!(plan.set_depot(Some(0)));
        assert_eq!(plan.depot_index(), Some(0));
    }

    #[test]
    fn parses_plan_json() {
        let plan = Plan::from_json_str(
            r#"{
                "locations": [
                    {"latitude": 52.5, "longitude": 13.4, "demand": 0},
                    {"latitude": 52.6, "longitude": 13.5, "demand": 4}
                ],
                "depot_index": 0,
                "vehicle_capacities": [10, 10]
            }"#,
        )
        .expect("plan");
        assert_eq!(plan.locations().len(), 2);
        assert_eq!(plan.depot_index(), Some(0));
        assert_eq!(plan.demands(), vec![0, 4]);
        assert_eq!(plan.vehicle_capacities(), &[10, 10]);
    }
}
