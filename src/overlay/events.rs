// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Routeview-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Routeview and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use crate::model::Degree;
use crate::surface::{PointerEvent, PointerKind};

/// Receives `(latitude, longitude)` of a primary click on the map.
pub type ClickHandler = Box<dyn FnMut(Degree, Degree)>;

/// Turns raw pointer events into map-click notifications. Holds no state besides the handler.
pub struct EventBridge {
    on_click: ClickHandler,
}

impl EventBridge {
    pub fn new(on_click: impl FnMut(Degree, Degree) + 'static) -> Self {
        Self {
            on_click: Box::new(on_click),
        }
    }

    /// Returns whether the handler was invoked.
    pub fn on_surface_click(&mut self, event: PointerEvent) -> bool {
        let (PointerKind::Primary, Some(position)) = (event.kind, event.position) else {
            return false;
        };
        if !position.is_finite() {
            return false;
        }
        (self.on_click)(position.lat, position.lng);
        true
    }
}

impl fmt::Debug for EventBridge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBridge").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use rstest::rstest;

    use super::EventBridge;
    use crate::model::LngLat;
    use crate::surface::{PointerEvent, PointerKind};

    #[test]
    fn primary_click_reports_lat_then_lng() {
        let clicks = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&clicks);
        let mut bridge = EventBridge::new(move |lat, lng| sink.borrow_mut().push((lat, lng)));
        assert!(bridge.on_surface_click(PointerEvent::primary(LngLat::new(13.4, 52.5))));
        assert_eq!(clicks.borrow().as_slice(), &[(52.5, 13.4)]);
    }

    #[rstest]
    #[case(PointerKind::Secondary, Some(LngLat::new(1.0, 2.0)))]
    #[case(PointerKind::Move, Some(LngLat::new(1.0, 2.0)))]
    #[case(PointerKind::Drag, Some(LngLat::new(1.0, 2.0)))]
    #[case(PointerKind::Primary, None)]
    #[case(PointerKind::Primary, Some(LngLat::new(f64::NAN, 2.0)))]
    fn other_events_are_ignored(#[case] kind: PointerKind, #[case] position: Option<LngLat>) {
        let clicks = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&clicks);
        let mut bridge = EventBridge::new(move |_, _| *sink.borrow_mut() += 1);
        assert!(!bridge.on_surface_click(PointerEvent { kind, position }));
        assert_eq!(*clicks.borrow(), 0);
    }
}
