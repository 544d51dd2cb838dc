// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Routeview-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Routeview and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Routeview: multi-route map overlays.
//!
//! The [`overlay`] module keeps a map [`surface`] in sync with a set of locations and solved
//! vehicle routes: one colored layer per route, numbered stop markers for the selected route and
//! a viewport fitted to the locations. [`tui`] hosts it in a terminal.

pub mod model;
pub mod overlay;
pub mod solver;
pub mod store;
pub mod style;
pub mod surface;
pub mod tui;
