// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Routeview-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Routeview and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::cell::RefCell;
use std::rc::Rc;

use rstest::{fixture, rstest};

use super::{CanvasCommand, MapCanvas, MapInput};
use crate::model::fixtures::{demo_plan, demo_routes};
use crate::model::{route_set, LngLat, Location, VehicleId};
use crate::overlay::Diagnostic;
use crate::style::MapStyle;
use crate::surface::{MarkerKind, PointerEvent, Scene, SceneOp};

fn id(raw: &str) -> VehicleId {
    VehicleId::new(raw).expect("vehicle id")
}

#[fixture]
fn canvas() -> MapCanvas<Scene> {
    MapCanvas::mount(Scene::new(), MapStyle::default(), |_, _| {}).expect("mount")
}

fn demo_input() -> MapInput {
    let plan = demo_plan();
    MapInput {
        locations: plan.locations().to_vec(),
        routes: demo_routes(),
        depot_index: plan.depot_index(),
    }
}

#[rstest]
fn first_update_fits_and_draws_everything(mut canvas: MapCanvas<Scene>) {
    let report = canvas.update(demo_input());
    assert_eq!(report.fits, 1);
    assert_eq!(report.location_redraws, 1);
    assert_eq!(report.route_passes, 1);
    assert!(report.diagnostics.is_empty(), "{:?}", report.diagnostics);
    assert_eq!(canvas.surface().path_count(), 3);
    assert_eq!(canvas.surface().markers_of_kind(MarkerKind::Depot).len(), 1);
    assert_eq!(canvas.surface().markers_of_kind(MarkerKind::Stop).len(), 8);
}

#[rstest]
fn unchanged_input_touches_nothing(mut canvas: MapCanvas<Scene>) {
    canvas.update(demo_input());
    let stats = canvas.surface().stats();
    let report = canvas.update(demo_input());
    assert_eq!(report.commands, 1);
    assert_eq!(report.route_passes, 0);
    assert_eq!(canvas.surface().stats(), stats);
}

#[rstest]
fn unchanged_nan_input_is_still_unchanged(mut canvas: MapCanvas<Scene>) {
    let nan_input = || {
        let mut input = demo_input();
        input.locations.push(Location::new(f64::NAN, 13.4, 1));
        input
            .routes
            .insert(id("9"), vec![LngLat::new(f64::NAN, 52.5), LngLat::new(13.4, 52.5)]);
        input
    };
    canvas.update(nan_input());
    let stats = canvas.surface().stats();
    let report = canvas.update(nan_input());
    assert_eq!(report.fits, 0);
    assert_eq!(report.location_redraws, 0);
    assert_eq!(report.route_passes, 0);
    assert_eq!(canvas.surface().stats(), stats);
}

#[rstest]
fn route_change_does_not_refit(mut canvas: MapCanvas<Scene>) {
    canvas.update(demo_input());
    let mut input = demo_input();
    input.routes.remove(&id("2"));
    let report = canvas.update(input);
    assert_eq!(report.fits, 0);
    assert_eq!(report.location_redraws, 0);
    assert_eq!(report.route_passes, 1);
    assert_eq!(report.destroyed, vec![id("2")]);
    assert_eq!(canvas.surface().stats().fits, 1);
}

#[rstest]
fn depot_change_redraws_markers_without_refit(mut canvas: MapCanvas<Scene>) {
    canvas.update(demo_input());
    let mut input = demo_input();
    input.depot_index = Some(3);
    let report = canvas.update(input);
    assert_eq!(report.fits, 0);
    assert_eq!(report.location_redraws, 1);
    assert_eq!(report.route_passes, 1);
    let depot = canvas.surface().markers_of_kind(MarkerKind::Depot);
    assert_eq!(depot.len(), 1);
    assert_eq!(depot[0].spec().label, "Point 4");
}

#[rstest]
fn out_of_range_depot_is_reported_once(mut canvas: MapCanvas<Scene>) {
    let mut input = demo_input();
    input.depot_index = Some(42);
    let report = canvas.update(input);
    assert!(report
        .diagnostics
        .iter()
        .any(|diagnostic| matches!(diagnostic, Diagnostic::DepotOutOfRange { index: 42, len: 9 })));
    assert!(canvas.surface().markers_of_kind(MarkerKind::Depot).is_empty());
}

#[rstest]
fn selection_draws_sequence_markers(mut canvas: MapCanvas<Scene>) {
    canvas.update(demo_input());
    let report = canvas.select_route(&id("1"));
    assert_eq!(report.route_passes, 1);
    assert_eq!(report.created.last(), Some(&id("1")));
    assert_eq!(canvas.sequence(), &[3, 4]);
    let labels = canvas
        .surface()
        .markers_of_kind(MarkerKind::Sequence)
        .iter()
        .map(|marker| marker.spec().label.to_string())
        .collect::<Vec<_>>();
    assert_eq!(labels, vec!["1", "2"]);

    canvas.clear_selection();
    assert!(canvas.sequence().is_empty());
    assert!(canvas.surface().markers_of_kind(MarkerKind::Sequence).is_empty());
}

#[rstest]
fn selecting_the_same_route_twice_deselects(mut canvas: MapCanvas<Scene>) {
    canvas.update(demo_input());
    canvas.select_route(&id("0"));
    canvas.select_route(&id("0"));
    assert_eq!(canvas.selected(), None);
    assert!(canvas.route_layers().selected_layer().is_none());
}

#[rstest]
fn removing_the_selected_route_clears_selection(mut canvas: MapCanvas<Scene>) {
    canvas.update(demo_input());
    canvas.select_route(&id("2"));
    let mut input = demo_input();
    input.routes.remove(&id("2"));
    canvas.update(input);
    assert_eq!(canvas.selected(), None);
    assert!(canvas.sequence().is_empty());
    assert!(canvas
        .route_layers()
        .layers()
        .all(|layer| layer.style().opacity == canvas.style().normal_opacity));
}

#[rstest]
fn clear_selection_without_selection_is_a_no_op(mut canvas: MapCanvas<Scene>) {
    canvas.update(demo_input());
    let report = canvas.clear_selection();
    assert_eq!(report.route_passes, 0);
}

#[test]
fn click_handler_can_queue_an_update() {
    let clicks = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&clicks);
    let mut canvas =
        MapCanvas::mount(Scene::new(), MapStyle::default(), move |lat, lng| {
            sink.borrow_mut().push((lat, lng));
        })
        .expect("mount");
    let queue = canvas.queue();

    let report = canvas.handle_pointer(PointerEvent::primary(LngLat::new(13.4, 52.5)));
    assert_eq!(report.clicks, 1);
    assert_eq!(report.commands, 0);
    assert_eq!(clicks.borrow().as_slice(), &[(52.5, 13.4)]);

    queue.submit(CanvasCommand::Update(MapInput {
        locations: vec![Location::new(52.5, 13.4, 1)],
        ..MapInput::default()
    }));
    queue.submit(CanvasCommand::Update(MapInput {
        locations: vec![Location::new(52.5, 13.4, 1), Location::new(52.6, 13.5, 2)],
        ..MapInput::default()
    }));
    let report = canvas.flush();
    assert_eq!(report.commands, 2);
    assert_eq!(report.fits, 2);
    assert_eq!(canvas.input().locations.len(), 2);
    assert!(queue.is_empty());
}

#[rstest]
fn teardown_releases_surface_resources(mut canvas: MapCanvas<Scene>) {
    canvas.update(demo_input());
    canvas.select_route(&id("0"));
    let diagnostics = canvas.teardown();
    assert!(diagnostics.is_empty());
    assert!(!canvas.is_mounted());
    assert_eq!(canvas.surface().path_count(), 0);
    assert_eq!(canvas.surface().marker_count(), 0);
    assert_eq!(canvas.surface().stylesheets().count(), 0);

    let report = canvas.update(demo_input());
    assert_eq!(report.commands, 0);
    assert_eq!(canvas.surface().path_count(), 0);
}

#[rstest]
fn mount_installs_stylesheet_first(canvas: MapCanvas<Scene>) {
    assert!(matches!(
        canvas.surface().journal().next(),
        Some(SceneOp::InstallStyleSheet { .. })
    ));
}

#[rstest]
fn invalid_routes_surface_as_diagnostics(mut canvas: MapCanvas<Scene>) {
    let report = canvas.update(MapInput {
        locations: vec![Location::new(0.0, 0.0, 0)],
        routes: route_set([(0, vec![(0.0, 0.0)])]),
        depot_index: Some(0),
    });
    assert_eq!(canvas.surface().path_count(), 0);
    assert!(matches!(
        report.diagnostics.as_slice(),
        [Diagnostic::InvalidRoute { .. }]
    ));
}
