// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Routeview-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Routeview and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::VecDeque;

use slotmap::SlotMap;
use smol_str::SmolStr;

use super::{
    LayerHandle, MarkerHandle, MarkerKind, MarkerSpec, PathSpec, StyleSheet, StyleSheetHandle,
    Surface, SurfaceError,
};
use crate::model::{Bounds, LngLat};

const DEFAULT_JOURNAL_CAPACITY: usize = 256;

#[derive(Debug, Clone, PartialEq)]
pub struct ScenePath {
    spec: PathSpec,
    seq: u64,
}

impl ScenePath {
    pub fn spec(&self) -> &PathSpec {
        &self.spec
    }

    /// Creation sequence number; later paths have larger numbers.
    pub fn seq(&self) -> u64 {
        self.seq
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneMarker {
    spec: MarkerSpec,
    seq: u64,
}

impl SceneMarker {
    pub fn spec(&self) -> &MarkerSpec {
        &self.spec
    }

    pub fn seq(&self) -> u64 {
        self.seq
    }
}

/// The framed region after the last `fit_bounds`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneView {
    requested: Bounds,
    padding: f32,
}

impl SceneView {
    pub fn requested(&self) -> Bounds {
        self.requested
    }

    pub fn padding(&self) -> f32 {
        self.padding
    }

    /// `requested` grown by the padding fraction on every side.
    pub fn visible(&self) -> Bounds {
        let pad_lng = self.requested.width() * f64::from(self.padding);
        let pad_lat = self.requested.height() * f64::from(self.padding);
        let south_west = self.requested.south_west();
        let north_east = self.requested.north_east();
        Bounds::new(
            LngLat::new(south_west.lng - pad_lng, south_west.lat - pad_lat),
            LngLat::new(north_east.lng + pad_lng, north_east.lat + pad_lat),
        )
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SceneStats {
    pub paths_added: u64,
    pub paths_removed: u64,
    pub markers_added: u64,
    pub markers_removed: u64,
    pub fits: u64,
}

/// One applied surface operation, oldest first in [`Scene::journal`].
#[derive(Debug, Clone, PartialEq)]
pub enum SceneOp {
    InstallStyleSheet { name: SmolStr },
    UninstallStyleSheet { name: SmolStr },
    AddPath { label: SmolStr, z_index: u32 },
    RemovePath { label: SmolStr },
    AddMarker { kind: MarkerKind, label: SmolStr },
    RemoveMarker { kind: MarkerKind, label: SmolStr },
    FitBounds { bounds: Bounds },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultOp {
    AddPath,
    RemovePath,
    AddMarker,
}

/// A scripted failure: every `op` on an item with `label` is rejected until cleared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fault {
    pub op: FaultOp,
    pub label: SmolStr,
}

/// In-memory [`Surface`] that records what is on screen.
///
/// The terminal map widget draws from it, and it doubles as an inspectable surface for tests
/// (creation order, journal, scripted faults).
#[derive(Debug)]
pub struct Scene {
    paths: SlotMap<LayerHandle, ScenePath>,
    markers: SlotMap<MarkerHandle, SceneMarker>,
    stylesheets: SlotMap<StyleSheetHandle, StyleSheet>,
    view: Option<SceneView>,
    next_seq: u64,
    stats: SceneStats,
    journal: VecDeque<SceneOp>,
    journal_capacity: usize,
    faults: Vec<Fault>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::with_journal_capacity(DEFAULT_JOURNAL_CAPACITY)
    }
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_journal_capacity(journal_capacity: usize) -> Self {
        Self {
            paths: SlotMap::with_key(),
            markers: SlotMap::with_key(),
            stylesheets: SlotMap::with_key(),
            view: None,
            next_seq: 0,
            stats: SceneStats::default(),
            journal: VecDeque::with_capacity(journal_capacity.min(DEFAULT_JOURNAL_CAPACITY)),
            journal_capacity,
            faults: Vec::new(),
        }
    }

    pub fn path(&self, handle: LayerHandle) -> Option<&ScenePath> {
        self.paths.get(handle)
    }

    pub fn paths(&self) -> impl Iterator<Item = (LayerHandle, &ScenePath)> {
        self.paths.iter()
    }

    pub fn path_count(&self) -> usize {
        self.paths.len()
    }

    /// Paths bottom to top: ascending z-index, creation order breaking ties.
    pub fn paths_in_draw_order(&self) -> Vec<&ScenePath> {
        let mut paths = self.paths.values().collect::<Vec<_>>();
        paths.sort_by_key(|path| (path.spec.z_index, path.seq));
        paths
    }

    pub fn paths_labeled<'a>(&'a self, label: &'a str) -> impl Iterator<Item = &'a ScenePath> + 'a {
        self.paths
            .values()
            .filter(move |path| path.spec.label.as_str() == label)
    }

    pub fn marker(&self, handle: MarkerHandle) -> Option<&SceneMarker> {
        self.markers.get(handle)
    }

    /// Markers in creation order.
    pub fn markers(&self) -> Vec<&SceneMarker> {
        let mut markers = self.markers.values().collect::<Vec<_>>();
        markers.sort_by_key(|marker| marker.seq);
        markers
    }

    pub fn markers_of_kind(&self, kind: MarkerKind) -> Vec<&SceneMarker> {
        self.markers()
            .into_iter()
            .filter(|marker| marker.spec.kind == kind)
            .collect()
    }

    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    pub fn stylesheet(&self, handle: StyleSheetHandle) -> Option<&StyleSheet> {
        self.stylesheets.get(handle)
    }

    pub fn stylesheets(&self) -> impl Iterator<Item = &StyleSheet> {
        self.stylesheets.values()
    }

    pub fn view(&self) -> Option<SceneView> {
        self.view
    }

    pub fn stats(&self) -> SceneStats {
        self.stats
    }

    pub fn journal(&self) -> impl Iterator<Item = &SceneOp> {
        self.journal.iter()
    }

    pub fn take_journal(&mut self) -> Vec<SceneOp> {
        self.journal.drain(..).collect()
    }

    pub fn inject_fault(&mut self, op: FaultOp, label: impl Into<SmolStr>) {
        self.faults.push(Fault {
            op,
            label: label.into(),
        });
    }

    pub fn clear_faults(&mut self) {
        self.faults.clear();
    }

    fn faulted(&self, op: FaultOp, label: &str) -> bool {
        self.faults
            .iter()
            .any(|fault| fault.op == op && fault.label.as_str() == label)
    }

    fn next_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq = self.next_seq.saturating_add(1);
        seq
    }

    fn record(&mut self, op: SceneOp) {
        if self.journal_capacity == 0 {
            return;
        }
        if self.journal.len() == self.journal_capacity {
            self.journal.pop_front();
        }
        log::trace!("scene: {op:?}");
        self.journal.push_back(op);
    }
}

fn rejected(reason: impl Into<String>) -> SurfaceError {
    SurfaceError::Rejected {
        reason: reason.into(),
    }
}

impl Surface for Scene {
    fn install_stylesheet(&mut self, sheet: StyleSheet) -> Result<StyleSheetHandle, SurfaceError> {
        let name = sheet.name.clone();
        let handle = self.stylesheets.insert(sheet);
        self.record(SceneOp::InstallStyleSheet { name });
        Ok(handle)
    }

    fn uninstall_stylesheet(&mut self, handle: StyleSheetHandle) -> Result<(), SurfaceError> {
        let sheet = self
            .stylesheets
            .remove(handle)
            .ok_or(SurfaceError::UnknownStyleSheet)?;
        self.record(SceneOp::UninstallStyleSheet { name: sheet.name });
        Ok(())
    }

    fn add_path(&mut self, spec: PathSpec) -> Result<LayerHandle, SurfaceError> {
        if self.faulted(FaultOp::AddPath, &spec.label) {
            return Err(rejected(format!("scripted add_path fault for {}", spec.label)));
        }
        if spec.points.len() < 2 {
            return Err(rejected("a path needs at least two points"));
        }
        if let Some(point) = spec.points.iter().find(|point| !point.is_finite()) {
            return Err(rejected(format!("non-finite path point {point}")));
        }
        if spec.style.animated && self.stylesheets.is_empty() {
            return Err(SurfaceError::StyleSheetMissing);
        }

        let seq = self.next_seq();
        let op = SceneOp::AddPath {
            label: spec.label.clone(),
            z_index: spec.z_index,
        };
        let handle = self.paths.insert(ScenePath { spec, seq });
        self.stats.paths_added += 1;
        self.record(op);
        Ok(handle)
    }

    fn remove_path(&mut self, handle: LayerHandle) -> Result<(), SurfaceError> {
        let label = self
            .paths
            .get(handle)
            .map(|path| path.spec.label.clone())
            .ok_or(SurfaceError::UnknownLayer)?;
        if self.faulted(FaultOp::RemovePath, &label) {
            return Err(rejected(format!("scripted remove_path fault for {label}")));
        }
        self.paths.remove(handle);
        self.stats.paths_removed += 1;
        self.record(SceneOp::RemovePath { label });
        Ok(())
    }

    fn add_marker(&mut self, spec: MarkerSpec) -> Result<MarkerHandle, SurfaceError> {
        if self.faulted(FaultOp::AddMarker, &spec.label) {
            return Err(rejected(format!("scripted add_marker fault for {}", spec.label)));
        }
        if !spec.position.is_finite() {
            return Err(rejected(format!("non-finite marker position {}", spec.position)));
        }
        let seq = self.next_seq();
        let op = SceneOp::AddMarker {
            kind: spec.kind,
            label: spec.label.clone(),
        };
        let handle = self.markers.insert(SceneMarker { spec, seq });
        self.stats.markers_added += 1;
        self.record(op);
        Ok(handle)
    }

    fn remove_marker(&mut self, handle: MarkerHandle) -> Result<(), SurfaceError> {
        let marker = self
            .markers
            .remove(handle)
            .ok_or(SurfaceError::UnknownMarker)?;
        self.stats.markers_removed += 1;
        self.record(SceneOp::RemoveMarker {
            kind: marker.spec.kind,
            label: marker.spec.label,
        });
        Ok(())
    }

    fn fit_bounds(&mut self, bounds: Bounds, padding: f32) -> Result<(), SurfaceError> {
        let finite = bounds.south_west().is_finite() && bounds.north_east().is_finite();
        if !finite || !padding.is_finite() || padding < 0.0 {
            return Err(SurfaceError::InvalidBounds);
        }
        self.view = Some(SceneView {
            requested: bounds,
            padding,
        });
        self.stats.fits += 1;
        self.record(SceneOp::FitBounds { bounds });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use rstest::{fixture, rstest};
    use smol_str::SmolStr;

    use super::{FaultOp, Scene, SceneOp};
    use crate::model::{Bounds, LngLat};
    use crate::style::{Color, DashPattern};
    use crate::surface::{
        MarkerKind, MarkerSpec, PathSpec, PathStyle, StyleSheet, Surface, SurfaceError,
    };

    #[fixture]
    fn scene() -> Scene {
        Scene::new()
    }

    fn path(label: &str, z_index: u32) -> PathSpec {
        PathSpec {
            label: SmolStr::new(label),
            points: vec![LngLat::new(0.0, 0.0), LngLat::new(1.0, 1.0)],
            style: PathStyle {
                color: Color::rgb(1, 2, 3),
                weight: 4.0,
                opacity: 1.0,
                dash: None,
                animated: false,
            },
            z_index,
        }
    }

    fn marker(label: &str) -> MarkerSpec {
        MarkerSpec {
            kind: MarkerKind::Stop,
            position: LngLat::new(0.5, 0.5),
            label: SmolStr::new(label),
            detail: None,
            color: Color::rgb(0, 0, 0),
        }
    }

    #[rstest]
    fn draw_order_follows_z_index_then_creation(mut scene: Scene) {
        scene.add_path(path("top", 2)).expect("top");
        scene.add_path(path("bottom", 0)).expect("bottom");
        scene.add_path(path("middle", 1)).expect("middle");
        let labels = scene
            .paths_in_draw_order()
            .into_iter()
            .map(|path| path.spec().label.to_string())
            .collect::<Vec<_>>();
        assert_eq!(labels, vec!["bottom", "middle", "top"]);
    }

    #[rstest]
    fn removed_handles_become_unknown(mut scene: Scene) {
        let handle = scene.add_path(path("0", 0)).expect("path");
        scene.remove_path(handle).expect("remove");
        assert_eq!(scene.remove_path(handle), Err(SurfaceError::UnknownLayer));
        assert_eq!(scene.path_count(), 0);
        assert_eq!(scene.stats().paths_added, 1);
        assert_eq!(scene.stats().paths_removed, 1);
    }

    #[rstest]
    fn animated_paths_need_a_stylesheet(mut scene: Scene) {
        let mut spec = path("0", 0);
        spec.style.dash = Some(DashPattern::new([4.0, 2.0]));
        spec.style.animated = true;
        assert_eq!(
            scene.add_path(spec.clone()),
            Err(SurfaceError::StyleSheetMissing)
        );
        let sheet = scene
            .install_stylesheet(StyleSheet::highlight(1.0))
            .expect("stylesheet");
        scene.add_path(spec).expect("animated path");
        scene.uninstall_stylesheet(sheet).expect("uninstall");
        assert_eq!(
            scene.uninstall_stylesheet(sheet),
            Err(SurfaceError::UnknownStyleSheet)
        );
    }

    #[rstest]
    fn rejects_non_finite_geometry(mut scene: Scene) {
        let mut spec = path("0", 0);
        spec.points[1] = LngLat::new(f64::NAN, 0.0);
        assert!(matches!(
            scene.add_path(spec),
            Err(SurfaceError::Rejected { .. })
        ));
        let mut bad_marker = marker("1");
        bad_marker.position = LngLat::new(0.0, f64::INFINITY);
        assert!(scene.add_marker(bad_marker).is_err());
    }

    #[rstest]
    fn scripted_faults_target_one_label(mut scene: Scene) {
        scene.inject_fault(FaultOp::AddPath, "1");
        assert!(scene.add_path(path("1", 0)).is_err());
        scene.add_path(path("2", 0)).expect("unaffected label");

        let handle = scene.add_marker(marker("3")).expect("marker");
        scene.inject_fault(FaultOp::AddMarker, "3");
        assert!(scene.add_marker(marker("3")).is_err());
        scene.remove_marker(handle).expect("removal is not faulted");

        scene.clear_faults();
        scene.add_path(path("1", 0)).expect("fault cleared");
    }

    #[rstest]
    fn fit_pads_visible_bounds(mut scene: Scene) {
        let bounds = Bounds::new(LngLat::new(0.0, 0.0), LngLat::new(10.0, 4.0));
        scene.fit_bounds(bounds, 0.1).expect("fit");
        let visible = scene.view().expect("view").visible();
        assert_relative_eq!(visible.south_west().lng, -1.0);
        assert_relative_eq!(visible.south_west().lat, -0.4);
        assert_relative_eq!(visible.north_east().lng, 11.0);
        assert_relative_eq!(visible.north_east().lat, 4.4);
        assert_eq!(scene.stats().fits, 1);
    }

    #[rstest]
    fn fit_rejects_negative_padding(mut scene: Scene) {
        let bounds = Bounds::new(LngLat::new(0.0, 0.0), LngLat::new(1.0, 1.0));
        assert_eq!(scene.fit_bounds(bounds, -1.0), Err(SurfaceError::InvalidBounds));
        assert!(scene.view().is_none());
    }

    #[test]
    fn journal_is_bounded() {
        let mut scene = Scene::with_journal_capacity(2);
        for label in ["a", "b", "c"] {
            scene.add_marker(marker(label)).expect("marker");
        }
        let journal = scene.take_journal();
        assert_eq!(journal.len(), 2);
        assert!(matches!(&journal[0], SceneOp::AddMarker { label, .. } if label == "b"));
        assert_eq!(scene.journal().count(), 0);
    }
}
