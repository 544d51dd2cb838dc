// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Routeview-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Routeview and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The route overlay: path layers, markers, selection and viewport on top of a [`Surface`].
//!
//! [`Surface`]: crate::surface::Surface

mod canvas;
mod diagnostics;
mod events;
mod markers;
mod route_layers;
mod selection;
mod viewport;

pub use canvas::{CanvasCommand, CanvasReport, CommandQueue, MapCanvas, MapInput};
pub use diagnostics::{Diagnostic, Diagnostics};
pub use events::{ClickHandler, EventBridge};
pub use markers::MarkerManager;
pub use route_layers::{
    route_style, visit_order, ReconcileInput, RouteLayer, RouteLayerManager, RouteReconcile,
};
pub use selection::{toggle, SelectionController};
pub use viewport::ViewportController;
