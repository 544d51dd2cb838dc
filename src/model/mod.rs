// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Routeview-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Routeview and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! A plan holds the stops (with the depot and fleet); a route set holds what the solver made of
//! it. Both are plain values the overlay reads but never mutates.

pub(crate) mod fixtures;
pub mod coord;
pub mod ids;
pub mod location;
pub mod plan;
pub mod route;

pub use coord::{Bounds, CoordKey, Degree, LngLat, NanoDegree};
pub use ids::{VehicleId, VehicleIdError};
pub use location::{Location, LocationIndex};
pub use plan::Plan;
pub use route::{route_set, validate_waypoints, RouteDefect, RouteSet, MIN_ROUTE_WAYPOINTS};
