// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Routeview-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Routeview and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use smol_str::SmolStr;
use thiserror::Error;

use crate::model::{LngLat, RouteDefect, VehicleId};
use crate::surface::SurfaceError;

/// Something the overlay skipped or could not do. Never fatal.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Diagnostic {
    #[error("route {vehicle_id} skipped: {defect}")]
    InvalidRoute {
        vehicle_id: VehicleId,
        defect: RouteDefect,
    },
    #[error("failed to draw route {vehicle_id}: {source}")]
    LayerCreateFailed {
        vehicle_id: VehicleId,
        source: SurfaceError,
    },
    #[error("failed to remove route {vehicle_id}: {source}")]
    LayerRemoveFailed {
        vehicle_id: VehicleId,
        source: SurfaceError,
    },
    #[error("failed to place marker {label}: {source}")]
    MarkerCreateFailed { label: SmolStr, source: SurfaceError },
    #[error("failed to remove marker: {source}")]
    MarkerRemoveFailed { source: SurfaceError },
    #[error("depot index {index} is outside the {len} known location(s)")]
    DepotOutOfRange { index: usize, len: usize },
    #[error("failed to fit the view: {source}")]
    FitFailed { source: SurfaceError },
    #[error("route {vehicle_id} waypoint #{position} at {waypoint} matches no location")]
    UnmatchedWaypoint {
        vehicle_id: VehicleId,
        /// Index of the waypoint within the route.
        position: usize,
        waypoint: LngLat,
    },
    #[error("sequence entry {position} points at missing location {index}")]
    SequenceIndexOutOfRange { position: usize, index: usize },
}

impl Diagnostic {
    /// Informational diagnostics describe expected data gaps rather than failures.
    pub fn is_informational(&self) -> bool {
        matches!(self, Self::UnmatchedWaypoint { .. })
    }
}

/// Collects diagnostics of one overlay operation and logs them as they arrive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        if diagnostic.is_informational() {
            log::debug!("{diagnostic}");
        } else {
            log::warn!("{diagnostic}");
        }
        self.entries.push(diagnostic);
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.entries.extend(other.entries);
    }

    pub fn as_slice(&self) -> &[Diagnostic] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.entries.iter()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.entries
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
