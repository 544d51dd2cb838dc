// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Routeview-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Routeview and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::diagnostics::{Diagnostic, Diagnostics};
use crate::model::{Bounds, Location};
use crate::style::MapStyle;
use crate::surface::Surface;

/// Frames the map around the location set.
#[derive(Debug, Clone, Default)]
pub struct ViewportController {
    last_fit: Option<Bounds>,
}

impl ViewportController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_fit(&self) -> Option<Bounds> {
        self.last_fit
    }

    /// Fits the view to all locations. Does nothing for an empty set.
    ///
    /// Returns whether the surface was asked to move.
    pub fn fit_to_locations<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        style: &MapStyle,
        locations: &[Location],
        diagnostics: &mut Diagnostics,
    ) -> bool {
        let Some(bounds) = Bounds::from_points(locations.iter().map(Location::position)) else {
            return false;
        };
        let bounds = bounds.with_min_span(style.min_fit_span);
        match surface.fit_bounds(bounds, style.fit_padding) {
            Ok(()) => {
                self.last_fit = Some(bounds);
                true
            }
            Err(source) => {
                diagnostics.push(Diagnostic::FitFailed { source });
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::ViewportController;
    use crate::model::Location;
    use crate::overlay::Diagnostics;
    use crate::style::MapStyle;
    use crate::surface::Scene;

    #[test]
    fn empty_set_is_a_no_op() {
        let mut scene = Scene::new();
        let mut viewport = ViewportController::new();
        let mut diagnostics = Diagnostics::new();
        assert!(!viewport.fit_to_locations(&mut scene, &MapStyle::default(), &[], &mut diagnostics));
        assert_eq!(scene.stats().fits, 0);
        assert!(scene.view().is_none());
    }

    #[test]
    fn fits_bounding_box_with_padding() {
        let mut scene = Scene::new();
        let mut viewport = ViewportController::new();
        let mut diagnostics = Diagnostics::new();
        let style = MapStyle::default();
        let locations = [Location::new(1.0, 2.0, 0), Location::new(3.0, 6.0, 0)];
        assert!(viewport.fit_to_locations(&mut scene, &style, &locations, &mut diagnostics));

        let view = scene.view().expect("view");
        let requested = view.requested();
        assert_relative_eq!(requested.south_west().lng, 2.0);
        assert_relative_eq!(requested.south_west().lat, 1.0);
        assert_relative_eq!(requested.north_east().lng, 6.0);
        assert_relative_eq!(requested.north_east().lat, 3.0);
        assert_relative_eq!(view.padding(), style.fit_padding);
        assert_eq!(viewport.last_fit(), Some(requested));
    }

    #[test]
    fn single_location_gets_a_minimum_span() {
        let mut scene = Scene::new();
        let mut viewport = ViewportController::new();
        let mut diagnostics = Diagnostics::new();
        let style = MapStyle::default();
        viewport.fit_to_locations(&mut scene, &style, &[Location::new(52.5, 13.4, 0)], &mut diagnostics);
        let requested = scene.view().expect("view").requested();
        assert_relative_eq!(requested.width(), style.min_fit_span, epsilon = 1e-12);
        assert_relative_eq!(requested.center().lat, 52.5, epsilon = 1e-12);
    }
}
