// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Routeview-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Routeview and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::{route_set, Location, Plan, RouteSet};

// Central Berlin, depot at Alexanderplatz.
const DEMO_STOPS: [(f64, f64, u32); 9] = [
    (52.5219, 13.4132, 0),
    (52.5163, 13.3777, 4),
    (52.5096, 13.3760, 2),
    (52.5251, 13.3694, 3),
    (52.5308, 13.3847, 5),
    (52.5404, 13.4124, 2),
    (52.5283, 13.4372, 4),
    (52.5050, 13.4400, 3),
    (52.4995, 13.4183, 1),
];

pub(crate) fn demo_plan() -> Plan {
    let locations = DEMO_STOPS
        .iter()
        .map(|&(lat, lng, demand)| Location::new(lat, lng, demand))
        .collect();
    Plan::new(locations)
        .with_depot(0)
        .with_vehicle_capacities(vec![10, 10, 10])
}

/// Routes as a solver would return them for [`demo_plan`]: `(lng, lat)` pairs, depot at both
/// ends.
pub(crate) fn demo_routes() -> RouteSet {
    let stop = |index: usize| {
        let (lat, lng, _) = DEMO_STOPS[index];
        (lng, lat)
    };
    route_set([
        (0, vec![stop(0), stop(1), stop(2), stop(8), stop(0)]),
        (1, vec![stop(0), stop(3), stop(4), stop(0)]),
        (2, vec![stop(0), stop(5), stop(6), stop(7), stop(0)]),
    ])
}
