// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Routeview-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Routeview and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Hosts the overlay components on one surface.
//!
//! The host calls [`MapCanvas::update`] with the complete inputs whenever any of them changes.
//! The canvas compares them with what it last drew and only runs the components whose inputs
//! moved: a new location set refits the view, new locations or a new depot redraw the location
//! markers, and any change to routes, locations, depot or selection reconciles the route layers.
//!
//! Commands never interleave. Anything submitted through a [`CommandQueue`] while a command is
//! being applied (a click handler that adds a location, say) runs after it, in order.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use super::diagnostics::{Diagnostic, Diagnostics};
use super::events::EventBridge;
use super::markers::MarkerManager;
use super::route_layers::{ReconcileInput, RouteLayerManager};
use super::selection::SelectionController;
use super::viewport::ViewportController;
use crate::model::{Degree, Location, LocationIndex, RouteSet, VehicleId};
use crate::style::MapStyle;
use crate::surface::{PointerEvent, StyleSheet, StyleSheetHandle, Surface, SurfaceError};

/// Everything the host supplies on each recompute. Selection travels separately.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MapInput {
    pub locations: Vec<Location>,
    pub routes: RouteSet,
    pub depot_index: Option<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CanvasCommand {
    Update(MapInput),
    Select(VehicleId),
    ClearSelection,
}

/// Shared handle for submitting commands from outside a `&mut MapCanvas` borrow.
#[derive(Debug, Clone, Default)]
pub struct CommandQueue {
    pending: Rc<RefCell<VecDeque<CanvasCommand>>>,
}

impl CommandQueue {
    pub fn submit(&self, command: CanvasCommand) {
        self.pending.borrow_mut().push_back(command);
    }

    pub fn len(&self) -> usize {
        self.pending.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.borrow().is_empty()
    }

    fn pop(&self) -> Option<CanvasCommand> {
        self.pending.borrow_mut().pop_front()
    }
}

/// What a batch of commands did to the surface.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CanvasReport {
    pub commands: usize,
    pub fits: usize,
    pub location_redraws: usize,
    pub route_passes: usize,
    /// Layer creation order of the latest route pass.
    pub created: Vec<VehicleId>,
    pub destroyed: Vec<VehicleId>,
    pub clicks: usize,
    pub diagnostics: Diagnostics,
}

impl CanvasReport {
    pub fn merge(&mut self, other: CanvasReport) {
        self.commands += other.commands;
        self.fits += other.fits;
        self.location_redraws += other.location_redraws;
        self.route_passes += other.route_passes;
        if other.route_passes > 0 {
            self.created = other.created;
        }
        self.destroyed.extend(other.destroyed);
        self.clicks += other.clicks;
        self.diagnostics.extend(other.diagnostics);
    }
}

pub struct MapCanvas<S: Surface> {
    surface: S,
    style: MapStyle,
    stylesheet: Option<StyleSheetHandle>,
    input: MapInput,
    index: LocationIndex,
    route_layers: RouteLayerManager,
    markers: MarkerManager,
    selection: SelectionController,
    viewport: ViewportController,
    events: EventBridge,
    queue: CommandQueue,
    sequence: Vec<usize>,
    mounted: bool,
}

impl<S: Surface> MapCanvas<S> {
    /// Takes over `surface` and installs the highlight stylesheet on it.
    pub fn mount(
        mut surface: S,
        style: MapStyle,
        on_click: impl FnMut(Degree, Degree) + 'static,
    ) -> Result<Self, SurfaceError> {
        let stylesheet = surface.install_stylesheet(StyleSheet::highlight(1.0))?;
        log::debug!("map canvas mounted");
        Ok(Self {
            surface,
            style,
            stylesheet: Some(stylesheet),
            input: MapInput::default(),
            index: LocationIndex::default(),
            route_layers: RouteLayerManager::new(),
            markers: MarkerManager::new(),
            selection: SelectionController::new(),
            viewport: ViewportController::new(),
            events: EventBridge::new(on_click),
            queue: CommandQueue::default(),
            sequence: Vec::new(),
            mounted: true,
        })
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn style(&self) -> &MapStyle {
        &self.style
    }

    pub fn input(&self) -> &MapInput {
        &self.input
    }

    pub fn selected(&self) -> Option<&VehicleId> {
        self.selection.selected()
    }

    pub fn selection_rev(&self) -> u64 {
        self.selection.rev()
    }

    pub fn route_layers(&self) -> &RouteLayerManager {
        &self.route_layers
    }

    pub fn markers(&self) -> &MarkerManager {
        &self.markers
    }

    pub fn viewport(&self) -> &ViewportController {
        &self.viewport
    }

    /// Location indices of the selected route in visit order.
    pub fn sequence(&self) -> &[usize] {
        &self.sequence
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn queue(&self) -> CommandQueue {
        self.queue.clone()
    }

    pub fn update(&mut self, input: MapInput) -> CanvasReport {
        self.queue.submit(CanvasCommand::Update(input));
        self.flush()
    }

    pub fn select_route(&mut self, vehicle_id: &VehicleId) -> CanvasReport {
        self.queue.submit(CanvasCommand::Select(vehicle_id.clone()));
        self.flush()
    }

    pub fn clear_selection(&mut self) -> CanvasReport {
        self.queue.submit(CanvasCommand::ClearSelection);
        self.flush()
    }

    /// Forwards a pointer event to the click handler, then applies whatever it queued.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> CanvasReport {
        let clicked = self.events.on_surface_click(event);
        let mut report = self.flush();
        report.clicks += usize::from(clicked);
        report
    }

    /// Applies queued commands in submission order.
    pub fn flush(&mut self) -> CanvasReport {
        let mut report = CanvasReport::default();
        if !self.mounted {
            let dropped = self.queue.pending.borrow_mut().drain(..).count();
            if dropped > 0 {
                log::warn!("dropped {dropped} command(s) submitted after teardown");
            }
            return report;
        }
        while let Some(command) = self.queue.pop() {
            let applied = self.apply(command);
            report.merge(applied);
        }
        report
    }

    /// Releases every surface resource the canvas holds. Also runs on drop.
    pub fn teardown(&mut self) -> Diagnostics {
        let mut diagnostics = Diagnostics::new();
        if !self.mounted {
            return diagnostics;
        }
        diagnostics.extend(self.route_layers.teardown(&mut self.surface));
        diagnostics.extend(self.markers.clear(&mut self.surface));
        if let Some(handle) = self.stylesheet.take() {
            if let Err(error) = self.surface.uninstall_stylesheet(handle) {
                log::warn!("failed to uninstall highlight stylesheet: {error}");
            }
        }
        self.sequence.clear();
        self.mounted = false;
        log::debug!("map canvas torn down");
        diagnostics
    }

    fn apply(&mut self, command: CanvasCommand) -> CanvasReport {
        let mut report = CanvasReport {
            commands: 1,
            ..CanvasReport::default()
        };
        match command {
            CanvasCommand::Update(input) => self.apply_update(input, &mut report),
            CanvasCommand::Select(vehicle_id) => {
                let before = self.selection.rev();
                self.selection.select(&vehicle_id);
                if self.selection.rev() != before {
                    self.reconcile_routes(&mut report);
                }
            }
            CanvasCommand::ClearSelection => {
                if self.selection.clear() {
                    self.reconcile_routes(&mut report);
                }
            }
        }
        report
    }

    fn apply_update(&mut self, input: MapInput, report: &mut CanvasReport) {
        let locations_changed = !same_locations(&input.locations, &self.input.locations);
        let depot_changed = input.depot_index != self.input.depot_index;
        let routes_changed = !same_routes(&input.routes, &self.input.routes);
        self.input = input;

        if locations_changed {
            self.index = LocationIndex::new(&self.input.locations);
        }
        let selection_changed = routes_changed && self.selection.retain(&self.input.routes);

        if locations_changed || depot_changed {
            if let Some(index) = self
                .input
                .depot_index
                .filter(|index| *index >= self.input.locations.len())
            {
                report.diagnostics.push(Diagnostic::DepotOutOfRange {
                    index,
                    len: self.input.locations.len(),
                });
            }
        }
        if locations_changed
            && self.viewport.fit_to_locations(
                &mut self.surface,
                &self.style,
                &self.input.locations,
                &mut report.diagnostics,
            )
        {
            report.fits += 1;
        }
        if locations_changed || depot_changed {
            let depot_index = self.depot_index();
            let diagnostics = self.markers.render_location_markers(
                &mut self.surface,
                &self.style,
                &self.input.locations,
                depot_index,
            );
            report.diagnostics.extend(diagnostics);
            report.location_redraws += 1;
        }
        if routes_changed || locations_changed || depot_changed || selection_changed {
            self.reconcile_routes(report);
        }
    }

    fn depot_index(&self) -> Option<usize> {
        self.input
            .depot_index
            .filter(|index| *index < self.input.locations.len())
    }

    fn reconcile_routes(&mut self, report: &mut CanvasReport) {
        let depot = self
            .depot_index()
            .and_then(|index| self.input.locations[index].key());
        let outcome = self.route_layers.reconcile(
            &mut self.surface,
            &self.style,
            ReconcileInput {
                routes: &self.input.routes,
                selected: self.selection.selected(),
                depot,
                locations: &self.index,
            },
        );
        report.route_passes += 1;
        report.created = outcome.created;
        report.destroyed.extend(outcome.destroyed);
        report.diagnostics.extend(outcome.diagnostics);

        let sequence_diagnostics = match outcome.visit_order {
            Some(order) => {
                let diagnostics = self.markers.render_sequence_markers(
                    &mut self.surface,
                    &self.style,
                    &order,
                    &self.input.locations,
                );
                self.sequence = order;
                diagnostics
            }
            None => {
                self.sequence.clear();
                self.markers.clear_sequence(&mut self.surface)
            }
        };
        report.diagnostics.extend(sequence_diagnostics);
    }
}

fn same_locations(left: &[Location], right: &[Location]) -> bool {
    left.len() == right.len() && left.iter().zip(right).all(|(a, b)| a.same_as(b))
}

fn same_routes(left: &RouteSet, right: &RouteSet) -> bool {
    left.len() == right.len()
        && left.iter().zip(right).all(|((left_id, left_points), (right_id, right_points))| {
            left_id == right_id
                && left_points.len() == right_points.len()
                && left_points.iter().zip(right_points).all(|(a, b)| a.same_as(b))
        })
}

impl<S: Surface> Drop for MapCanvas<S> {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests;
