// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Routeview-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Routeview and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![allow(dead_code)]

// Shared deterministic benchmark fixtures (no RNG).

use routeview::model::{route_set, Location, RouteSet};
use routeview::overlay::MapInput;

#[derive(Debug, Clone, Copy)]
pub enum Case {
    Small,
    Medium,
    Large,
}

impl Case {
    pub const ALL: [Case; 3] = [Case::Small, Case::Medium, Case::Large];

    pub fn id(self) -> &'static str {
        match self {
            Case::Small => "small",
            Case::Medium => "medium",
            Case::Large => "large",
        }
    }

    fn shape(self) -> (usize, u32) {
        match self {
            Case::Small => (10, 3),
            Case::Medium => (100, 10),
            Case::Large => (1_000, 40),
        }
    }
}

/// Locations on a square grid around central Berlin; index 0 is the depot.
pub fn locations(count: usize) -> Vec<Location> {
    let side = (count as f64).sqrt().ceil().max(1.0) as usize;
    (0..count)
        .map(|index| {
            let row = (index / side) as f64;
            let col = (index % side) as f64;
            Location::new(52.45 + row * 0.002, 13.30 + col * 0.003, (index % 5) as u32)
        })
        .collect()
}

/// Deals the non-depot stops round-robin across `vehicles`, every route starting and ending at
/// the depot. `offset` rotates the deal so consecutive inputs differ.
pub fn routes(locations: &[Location], vehicles: u32, offset: usize) -> RouteSet {
    let point = |location: &Location| (location.longitude, location.latitude);
    let depot = point(&locations[0]);
    let mut waypoints = vec![vec![depot]; vehicles as usize];
    for (position, location) in locations.iter().enumerate().skip(1) {
        let vehicle = (position + offset) % vehicles as usize;
        waypoints[vehicle].push(point(location));
    }
    route_set(waypoints.into_iter().enumerate().map(|(vehicle, mut points)| {
        points.push(depot);
        (vehicle as u32, points)
    }))
}

pub fn map_input(case: Case, offset: usize) -> MapInput {
    let (count, vehicles) = case.shape();
    let locations = locations(count);
    let routes = routes(&locations, vehicles, offset);
    MapInput {
        locations,
        routes,
        depot_index: Some(0),
    }
}
