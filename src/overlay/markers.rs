// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Routeview-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Routeview and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use smol_str::{format_smolstr, SmolStr};

use super::diagnostics::{Diagnostic, Diagnostics};
use crate::model::Location;
use crate::style::MapStyle;
use crate::surface::{MarkerHandle, MarkerKind, MarkerSpec, Surface, SurfaceError};

/// Location markers plus the numbered stops of the selected route.
///
/// Both sets are redrawn from scratch on every call.
#[derive(Debug, Default)]
pub struct MarkerManager {
    location_markers: Vec<MarkerHandle>,
    sequence_markers: Vec<MarkerHandle>,
    // Handles the surface refused to remove; retried on the next clear.
    stale: Vec<MarkerHandle>,
}

impl MarkerManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn location_marker_count(&self) -> usize {
        self.location_markers.len()
    }

    pub fn sequence_marker_count(&self) -> usize {
        self.sequence_markers.len()
    }

    /// One marker per location; the depot gets its own kind and color.
    ///
    /// A `depot_index` past the end of `locations` marks nothing as depot.
    pub fn render_location_markers<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        style: &MapStyle,
        locations: &[Location],
        depot_index: Option<usize>,
    ) -> Diagnostics {
        let mut diagnostics = Diagnostics::new();
        let old = std::mem::take(&mut self.location_markers);
        self.remove_all(surface, old, &mut diagnostics);

        for (index, location) in locations.iter().enumerate() {
            let is_depot = depot_index == Some(index);
            let (kind, color) = if is_depot {
                (MarkerKind::Depot, style.depot_color)
            } else {
                (MarkerKind::Stop, style.stop_color)
            };
            let detail = if is_depot {
                format!("Depot\nDemand: {}", location.demand)
            } else {
                format!("Demand: {}", location.demand)
            };
            let spec = MarkerSpec {
                kind,
                position: location.position(),
                label: format_smolstr!("Point {}", index + 1),
                detail: Some(detail),
                color,
            };
            if let Some(handle) = place(surface, spec, &mut diagnostics) {
                self.location_markers.push(handle);
            }
        }
        diagnostics
    }

    /// Numbers the stops of `ordered_indices` 1, 2, 3, … at their locations.
    pub fn render_sequence_markers<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        style: &MapStyle,
        ordered_indices: &[usize],
        locations: &[Location],
    ) -> Diagnostics {
        let mut diagnostics = self.clear_sequence(surface);
        for (position, &index) in ordered_indices.iter().enumerate() {
            let Some(location) = locations.get(index) else {
                diagnostics.push(Diagnostic::SequenceIndexOutOfRange { position, index });
                continue;
            };
            let spec = MarkerSpec {
                kind: MarkerKind::Sequence,
                position: location.position(),
                label: format_smolstr!("{}", position + 1),
                detail: Some(format!("Stop {}: Point {}", position + 1, index + 1)),
                color: style.sequence_color,
            };
            if let Some(handle) = place(surface, spec, &mut diagnostics) {
                self.sequence_markers.push(handle);
            }
        }
        diagnostics
    }

    pub fn clear_sequence<S: Surface + ?Sized>(&mut self, surface: &mut S) -> Diagnostics {
        let mut diagnostics = Diagnostics::new();
        let old = std::mem::take(&mut self.sequence_markers);
        self.remove_all(surface, old, &mut diagnostics);
        diagnostics
    }

    pub fn clear<S: Surface + ?Sized>(&mut self, surface: &mut S) -> Diagnostics {
        let mut diagnostics = self.clear_sequence(surface);
        let old = std::mem::take(&mut self.location_markers);
        self.remove_all(surface, old, &mut diagnostics);
        diagnostics
    }

    fn remove_all<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        handles: Vec<MarkerHandle>,
        diagnostics: &mut Diagnostics,
    ) {
        let stale = std::mem::take(&mut self.stale);
        for handle in stale.into_iter().chain(handles) {
            match surface.remove_marker(handle) {
                Ok(()) | Err(SurfaceError::UnknownMarker) => {}
                Err(source) => {
                    diagnostics.push(Diagnostic::MarkerRemoveFailed { source });
                    self.stale.push(handle);
                }
            }
        }
    }
}

fn place<S: Surface + ?Sized>(
    surface: &mut S,
    spec: MarkerSpec,
    diagnostics: &mut Diagnostics,
) -> Option<MarkerHandle> {
    let label: SmolStr = spec.label.clone();
    match surface.add_marker(spec) {
        Ok(handle) => Some(handle),
        Err(source) => {
            diagnostics.push(Diagnostic::MarkerCreateFailed { label, source });
            None
        }
    }
}
