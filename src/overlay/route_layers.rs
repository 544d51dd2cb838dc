// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Routeview-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Routeview and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Keeps exactly one path layer per drawable route on the surface.
//!
//! Every pass follows the same steps:
//!
//! 1. split the desired routes into drawable and defective ones (defects become diagnostics),
//! 2. remove layers whose vehicle no longer has a drawable route,
//! 3. order the remaining ids naturally with the selected id moved to the end,
//! 4. recreate each layer in that order, so creation order and z-index agree,
//! 5. derive the visit order of the selected route for its sequence markers.
//!
//! A surface failure on one layer is recorded and the pass moves on to the next one.

use std::collections::BTreeMap;

use smol_str::SmolStr;

use super::diagnostics::{Diagnostic, Diagnostics};
use crate::model::{validate_waypoints, CoordKey, LngLat, LocationIndex, RouteSet, VehicleId};
use crate::style::MapStyle;
use crate::surface::{LayerHandle, PathSpec, PathStyle, Surface, SurfaceError};

/// The rendered counterpart of one route.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteLayer {
    vehicle_id: VehicleId,
    handle: LayerHandle,
    style: PathStyle,
    selected: bool,
    z_index: u32,
}

impl RouteLayer {
    pub fn vehicle_id(&self) -> &VehicleId {
        &self.vehicle_id
    }

    pub fn handle(&self) -> LayerHandle {
        self.handle
    }

    pub fn style(&self) -> &PathStyle {
        &self.style
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn z_index(&self) -> u32 {
        self.z_index
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ReconcileInput<'a> {
    pub routes: &'a RouteSet,
    pub selected: Option<&'a VehicleId>,
    /// Quantized depot coordinate, used to strip the depot from the visit order.
    pub depot: Option<CoordKey>,
    pub locations: &'a LocationIndex,
}

/// What one reconcile pass did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteReconcile {
    /// Ids whose layer was (re)created, in creation order.
    pub created: Vec<VehicleId>,
    /// Ids whose layer was removed because their route is gone or no longer drawable.
    pub destroyed: Vec<VehicleId>,
    /// Location indices visited by the selected route, when a drawable route is selected.
    pub visit_order: Option<Vec<usize>>,
    pub diagnostics: Diagnostics,
}

#[derive(Debug, Default)]
pub struct RouteLayerManager {
    layers: BTreeMap<VehicleId, RouteLayer>,
    // Layers the surface refused to remove; retried on every pass.
    orphans: Vec<(VehicleId, LayerHandle)>,
}

impl RouteLayerManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn layer(&self, vehicle_id: &VehicleId) -> Option<&RouteLayer> {
        self.layers.get(vehicle_id)
    }

    /// Layers in natural vehicle-id order.
    pub fn layers(&self) -> impl Iterator<Item = &RouteLayer> {
        self.layers.values()
    }

    pub fn selected_layer(&self) -> Option<&RouteLayer> {
        self.layers.values().find(|layer| layer.selected)
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn orphan_count(&self) -> usize {
        self.orphans.len()
    }

    pub fn reconcile<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        style: &MapStyle,
        input: ReconcileInput<'_>,
    ) -> RouteReconcile {
        let mut outcome = RouteReconcile::default();
        self.retry_orphans(surface, &mut outcome.diagnostics);

        let mut drawable = BTreeMap::new();
        for (vehicle_id, waypoints) in input.routes {
            match validate_waypoints(waypoints) {
                Ok(()) => {
                    drawable.insert(vehicle_id, waypoints.as_slice());
                }
                Err(defect) => outcome.diagnostics.push(Diagnostic::InvalidRoute {
                    vehicle_id: vehicle_id.clone(),
                    defect,
                }),
            }
        }

        let stale = self
            .layers
            .keys()
            .filter(|vehicle_id| !drawable.contains_key(vehicle_id))
            .cloned()
            .collect::<Vec<_>>();
        for vehicle_id in stale {
            if let Some(layer) = self.layers.remove(&vehicle_id) {
                self.release(surface, layer, &mut outcome.diagnostics);
                outcome.destroyed.push(vehicle_id);
            }
        }

        let selected = input
            .selected
            .and_then(|vehicle_id| drawable.get_key_value(vehicle_id))
            .map(|(vehicle_id, waypoints)| (*vehicle_id, *waypoints));
        let selection_active = selected.is_some();
        let render_order = drawable
            .iter()
            .filter(|(vehicle_id, _)| Some(**vehicle_id) != selected.map(|(id, _)| id))
            .map(|(vehicle_id, waypoints)| (*vehicle_id, *waypoints))
            .chain(selected);

        for (position, (vehicle_id, waypoints)) in render_order.enumerate() {
            let is_selected = selected.is_some_and(|(id, _)| id == vehicle_id);
            // At most one surface path per vehicle: a layer that cannot be removed stays as it
            // is until a later pass manages to replace it.
            if let Some(existing) = self.layers.remove(vehicle_id) {
                if let Err(source) = surface.remove_path(existing.handle) {
                    outcome.diagnostics.push(Diagnostic::LayerRemoveFailed {
                        vehicle_id: vehicle_id.clone(),
                        source,
                    });
                    self.layers.insert(vehicle_id.clone(), existing);
                    continue;
                }
            }
            if self.orphans.iter().any(|(orphan, _)| orphan == vehicle_id) {
                log::debug!("route {vehicle_id} still has an orphaned layer, not drawing it again");
                continue;
            }
            let z_index = u32::try_from(position).unwrap_or(u32::MAX);
            let path_style = route_style(style, vehicle_id, is_selected, selection_active);
            match create_layer(surface, vehicle_id, waypoints, path_style.clone(), z_index) {
                Ok(handle) => {
                    self.layers.insert(
                        vehicle_id.clone(),
                        RouteLayer {
                            vehicle_id: vehicle_id.clone(),
                            handle,
                            style: path_style,
                            selected: is_selected,
                            z_index,
                        },
                    );
                    outcome.created.push(vehicle_id.clone());
                }
                Err(source) => outcome.diagnostics.push(Diagnostic::LayerCreateFailed {
                    vehicle_id: vehicle_id.clone(),
                    source,
                }),
            }
        }

        outcome.visit_order = selected.map(|(vehicle_id, waypoints)| {
            visit_order(
                vehicle_id,
                waypoints,
                input.depot,
                input.locations,
                &mut outcome.diagnostics,
            )
        });

        log::debug!(
            "route reconcile: {} created, {} destroyed, {} diagnostic(s)",
            outcome.created.len(),
            outcome.destroyed.len(),
            outcome.diagnostics.len()
        );
        outcome
    }

    /// Removes every layer this manager created.
    pub fn teardown<S: Surface + ?Sized>(&mut self, surface: &mut S) -> Diagnostics {
        let mut diagnostics = Diagnostics::new();
        self.retry_orphans(surface, &mut diagnostics);
        for (_, layer) in std::mem::take(&mut self.layers) {
            self.release(surface, layer, &mut diagnostics);
        }
        diagnostics
    }

    fn release<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        layer: RouteLayer,
        diagnostics: &mut Diagnostics,
    ) {
        if let Err(source) = surface.remove_path(layer.handle) {
            diagnostics.push(Diagnostic::LayerRemoveFailed {
                vehicle_id: layer.vehicle_id.clone(),
                source,
            });
            self.orphans.push((layer.vehicle_id, layer.handle));
        }
    }

    fn retry_orphans<S: Surface + ?Sized>(&mut self, surface: &mut S, diagnostics: &mut Diagnostics) {
        let orphans = std::mem::take(&mut self.orphans);
        for (vehicle_id, handle) in orphans {
            match surface.remove_path(handle) {
                Ok(()) | Err(SurfaceError::UnknownLayer) => {}
                Err(source) => {
                    diagnostics.push(Diagnostic::LayerRemoveFailed {
                        vehicle_id: vehicle_id.clone(),
                        source,
                    });
                    self.orphans.push((vehicle_id, handle));
                }
            }
        }
    }
}

fn create_layer<S: Surface + ?Sized>(
    surface: &mut S,
    vehicle_id: &VehicleId,
    waypoints: &[LngLat],
    style: PathStyle,
    z_index: u32,
) -> Result<LayerHandle, SurfaceError> {
    let spec = PathSpec {
        label: SmolStr::new(vehicle_id.as_str()),
        points: waypoints.to_vec(),
        style,
        z_index,
    };
    match surface.add_path(spec.clone()) {
        Err(SurfaceError::StyleSheetMissing) if spec.style.animated => {
            log::debug!("no highlight stylesheet installed, drawing route {vehicle_id} without animation");
            let mut still = spec;
            still.style.animated = false;
            surface.add_path(still)
        }
        result => result,
    }
}

/// Style of one route layer.
pub fn route_style(
    style: &MapStyle,
    vehicle_id: &VehicleId,
    is_selected: bool,
    selection_active: bool,
) -> PathStyle {
    if is_selected {
        return PathStyle {
            color: style.highlight_color,
            weight: style.selected_weight,
            opacity: 1.0,
            dash: Some(style.highlight_dash.clone()),
            animated: true,
        };
    }
    PathStyle {
        color: style.palette.color_for(vehicle_id),
        weight: style.normal_weight,
        opacity: if selection_active {
            style.faded_opacity
        } else {
            style.normal_opacity
        },
        dash: None,
        animated: false,
    }
}

/// Maps a route's waypoints back to location indices.
///
/// A leading or trailing waypoint at the depot is dropped. Waypoints that match no location are
/// reported and left out; they never abort the lookup.
pub fn visit_order(
    vehicle_id: &VehicleId,
    waypoints: &[LngLat],
    depot: Option<CoordKey>,
    locations: &LocationIndex,
    diagnostics: &mut Diagnostics,
) -> Vec<usize> {
    let is_depot = |point: &LngLat| depot.is_some() && point.key() == depot;
    let mut start = 0;
    let mut end = waypoints.len();
    if waypoints.first().is_some_and(is_depot) {
        start += 1;
    }
    if end > start && waypoints.last().is_some_and(is_depot) {
        end -= 1;
    }

    let mut order = Vec::with_capacity(end - start);
    for (position, waypoint) in waypoints.iter().enumerate().take(end).skip(start) {
        match locations.lookup(*waypoint) {
            Some(index) => order.push(index),
            None => diagnostics.push(Diagnostic::UnmatchedWaypoint {
                vehicle_id: vehicle_id.clone(),
                position,
                waypoint: *waypoint,
            }),
        }
    }
    order
}
