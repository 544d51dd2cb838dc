// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Routeview-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Routeview and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The rendering surface the overlay draws onto.
//!
//! A surface hands out opaque handles for everything it creates. The overlay owns those handles
//! and must give every one of them back; a surface never garbage-collects on its own.

mod scene;

use smol_str::SmolStr;
use thiserror::Error;

use crate::model::{Bounds, LngLat};
use crate::style::{Color, DashPattern};

pub use scene::{Fault, FaultOp, Scene, SceneMarker, SceneOp, ScenePath, SceneStats, SceneView};

slotmap::new_key_type! {
    /// A path (polyline) layer on the surface.
    pub struct LayerHandle;
}

slotmap::new_key_type! {
    /// A point marker on the surface.
    pub struct MarkerHandle;
}

slotmap::new_key_type! {
    /// An installed stylesheet; animated paths need one to exist.
    pub struct StyleSheetHandle;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SurfaceError {
    #[error("unknown layer handle")]
    UnknownLayer,
    #[error("unknown marker handle")]
    UnknownMarker,
    #[error("unknown stylesheet handle")]
    UnknownStyleSheet,
    #[error("animated path requires an installed stylesheet")]
    StyleSheetMissing,
    #[error("surface rejected the request: {reason}")]
    Rejected { reason: String },
    #[error("bounds are not finite")]
    InvalidBounds,
}

/// Shared styling resource for animated highlight strokes.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleSheet {
    pub name: SmolStr,
    /// Distance the dash offset travels per animation tick.
    pub dash_speed: f32,
}

impl StyleSheet {
    pub fn highlight(dash_speed: f32) -> Self {
        Self {
            name: SmolStr::new_static("route-highlight"),
            dash_speed,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PathStyle {
    pub color: Color,
    pub weight: f32,
    pub opacity: f32,
    pub dash: Option<DashPattern>,
    /// Marching-dash animation; only meaningful together with `dash`.
    pub animated: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PathSpec {
    pub label: SmolStr,
    pub points: Vec<LngLat>,
    pub style: PathStyle,
    /// Paths with a higher z-index draw on top.
    pub z_index: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerKind {
    Depot,
    Stop,
    Sequence,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarkerSpec {
    pub kind: MarkerKind,
    pub position: LngLat,
    pub label: SmolStr,
    /// Popup text.
    pub detail: Option<String>,
    pub color: Color,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Primary,
    Secondary,
    Move,
    Drag,
}

/// A raw pointer interaction as the surface saw it.
///
/// `position` is `None` when the pointer was outside the mapped area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub position: Option<LngLat>,
}

impl PointerEvent {
    pub fn primary(position: LngLat) -> Self {
        Self {
            kind: PointerKind::Primary,
            position: Some(position),
        }
    }
}

pub trait Surface {
    fn install_stylesheet(&mut self, sheet: StyleSheet) -> Result<StyleSheetHandle, SurfaceError>;

    fn uninstall_stylesheet(&mut self, handle: StyleSheetHandle) -> Result<(), SurfaceError>;

    fn add_path(&mut self, spec: PathSpec) -> Result<LayerHandle, SurfaceError>;

    fn remove_path(&mut self, handle: LayerHandle) -> Result<(), SurfaceError>;

    fn add_marker(&mut self, spec: MarkerSpec) -> Result<MarkerHandle, SurfaceError>;

    fn remove_marker(&mut self, handle: MarkerHandle) -> Result<(), SurfaceError>;

    /// Frames `bounds`, growing it by `padding` (a fraction of its span) on every side.
    fn fit_bounds(&mut self, bounds: Bounds, padding: f32) -> Result<(), SurfaceError>;
}
