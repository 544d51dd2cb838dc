// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Routeview-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Routeview and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::model::{RouteSet, VehicleId};

/// Toggle semantics: selecting the current id clears the selection.
pub fn toggle(current: Option<&VehicleId>, requested: &VehicleId) -> Option<VehicleId> {
    match current {
        Some(current) if current == requested => None,
        _ => Some(requested.clone()),
    }
}

/// Owns the single highlighted route id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionController {
    selected: Option<VehicleId>,
    rev: u64,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<&VehicleId> {
        self.selected.as_ref()
    }

    /// Bumped on every change, never on a no-op.
    pub fn rev(&self) -> u64 {
        self.rev
    }

    pub fn select(&mut self, vehicle_id: &VehicleId) -> Option<VehicleId> {
        let next = toggle(self.selected.as_ref(), vehicle_id);
        self.set(next);
        self.selected.clone()
    }

    pub fn clear(&mut self) -> bool {
        self.set(None)
    }

    /// Drops the selection when its route is gone from `routes`.
    pub fn retain(&mut self, routes: &RouteSet) -> bool {
        match &self.selected {
            Some(selected) if !routes.contains_key(selected) => {
                log::debug!("selection {selected} cleared: route no longer present");
                self.set(None)
            }
            _ => false,
        }
    }

    fn set(&mut self, next: Option<VehicleId>) -> bool {
        if self.selected == next {
            return false;
        }
        self.selected = next;
        self.rev = self.rev.wrapping_add(1);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::{toggle, SelectionController};
    use crate::model::{route_set, VehicleId};

    fn id(raw: &str) -> VehicleId {
        VehicleId::new(raw).expect("vehicle id")
    }

    #[test]
    fn selecting_twice_returns_to_none() {
        let mut selection = SelectionController::new();
        assert_eq!(selection.select(&id("0")), Some(id("0")));
        assert_eq!(selection.select(&id("0")), None);
        assert_eq!(selection.selected(), None);
        assert_eq!(selection.rev(), 2);
    }

    #[test]
    fn selecting_another_id_switches() {
        let mut selection = SelectionController::new();
        selection.select(&id("0"));
        assert_eq!(selection.select(&id("1")), Some(id("1")));
    }

    #[test]
    fn clear_is_a_no_op_without_selection() {
        let mut selection = SelectionController::new();
        assert!(!selection.clear());
        assert_eq!(selection.rev(), 0);
    }

    #[test]
    fn retain_prunes_vanished_routes() {
        let mut selection = SelectionController::new();
        selection.select(&id("2"));
        let routes = route_set([(0, vec![(0.0, 0.0), (1.0, 1.0)])]);
        assert!(selection.retain(&routes));
        assert_eq!(selection.selected(), None);
        assert!(!selection.retain(&routes));
    }

    #[test]
    fn toggle_is_pure() {
        assert_eq!(toggle(None, &id("a")), Some(id("a")));
        assert_eq!(toggle(Some(&id("a")), &id("a")), None);
        assert_eq!(toggle(Some(&id("a")), &id("b")), Some(id("b")));
    }
}
