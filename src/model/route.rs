// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Routeview-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Routeview and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;

use thiserror::Error;

use super::coord::LngLat;
use super::ids::VehicleId;

/// The complete desired route set: vehicle id → ordered waypoints.
///
/// Always supplied wholesale; the overlay never receives incremental deltas.
pub type RouteSet = BTreeMap<VehicleId, Vec<LngLat>>;

pub const MIN_ROUTE_WAYPOINTS: usize = 2;

/// Why a route cannot be drawn.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteDefect {
    #[error("route has {count} waypoint(s), at least 2 are required")]
    TooFewWaypoints { count: usize },
    #[error("waypoint {index} has a non-finite coordinate")]
    NonFiniteWaypoint { index: usize },
}

pub fn validate_waypoints(waypoints: &[LngLat]) -> Result<(), RouteDefect> {
    if waypoints.len() < MIN_ROUTE_WAYPOINTS {
        return Err(RouteDefect::TooFewWaypoints {
            count: waypoints.len(),
        });
    }
    if let Some(index) = waypoints.iter().position(|point| !point.is_finite()) {
        return Err(RouteDefect::NonFiniteWaypoint { index });
    }
    Ok(())
}

/// Builds a [`RouteSet`] from `(vehicle index, waypoints)` pairs.
pub fn route_set<I, W>(routes: I) -> RouteSet
where
    I: IntoIterator<Item = (u32, W)>,
    W: IntoIterator<Item = (f64, f64)>,
{
    routes
        .into_iter()
        .map(|(vehicle, waypoints)| {
            let waypoints = waypoints
                .into_iter()
                .map(|(lng, lat)| LngLat::new(lng, lat))
                .collect();
            (VehicleId::from_index(vehicle), waypoints)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{route_set, validate_waypoints, RouteDefect};
    use crate::model::{LngLat, VehicleId};

    #[rstest]
    #[case::empty(vec![], Err(RouteDefect::TooFewWaypoints { count: 0 }))]
    #[case::single(vec![LngLat::new(0.0, 0.0)], Err(RouteDefect::TooFewWaypoints { count: 1 }))]
    #[case::nan(
        vec![LngLat::new(0.0, 0.0), LngLat::new(f64::NAN, 1.0)],
        Err(RouteDefect::NonFiniteWaypoint { index: 1 })
    )]
    #[case::valid(vec![LngLat::new(0.0, 0.0), LngLat::new(1.0, 1.0)], Ok(()))]
    fn waypoint_validation(#[case] waypoints: Vec<LngLat>, #[case] expected: Result<(), RouteDefect>) {
        assert_eq!(validate_waypoints(&waypoints), expected);
    }

    #[test]
    fn route_set_builds_numeric_ids() {
        let routes = route_set([(1, vec![(0.0, 0.0), (1.0, 2.0)]), (0, vec![(3.0, 4.0)])]);
        let ids = routes.keys().cloned().collect::<Vec<_>>();
        assert_eq!(ids, vec![VehicleId::from_index(0), VehicleId::from_index(1)]);
        assert_eq!(routes[&VehicleId::from_index(1)][1], LngLat::new(1.0, 2.0));
    }
}
