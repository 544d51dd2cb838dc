// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Routeview-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Routeview and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::coord::{CoordKey, Degree, LngLat};

/// A point the fleet has to visit. Its identity is its position in the plan's location list.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: Degree,
    pub longitude: Degree,
    #[serde(default, alias = "capacity")]
    pub demand: u32,
}

impl Location {
    pub const fn new(latitude: Degree, longitude: Degree, demand: u32) -> Self {
        Self {
            latitude,
            longitude,
            demand,
        }
    }

    pub fn position(&self) -> LngLat {
        LngLat::new(self.longitude, self.latitude)
    }

    pub fn key(&self) -> Option<CoordKey> {
        CoordKey::from_degrees(self.latitude, self.longitude)
    }

    /// Like `==`, but bitwise on the coordinates, so an unchanged NaN stays unchanged.
    pub fn same_as(&self, other: &Self) -> bool {
        self.demand == other.demand && self.position().same_as(&other.position())
    }
}

/// Reverse lookup from a coordinate to the index of the location sitting there.
///
/// When several locations share a coordinate the lowest index wins.
#[derive(Debug, Clone, Default)]
pub struct LocationIndex {
    by_key: HashMap<CoordKey, usize>,
}

impl LocationIndex {
    pub fn new(locations: &[Location]) -> Self {
        let mut by_key = HashMap::with_capacity(locations.len());
        for (index, location) in locations.iter().enumerate() {
            if let Some(key) = location.key() {
                by_key.entry(key).or_insert(index);
            }
        }
        Self { by_key }
    }

    pub fn lookup(&self, position: LngLat) -> Option<usize> {
        self.by_key.get(&position.key()?).copied()
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }
}
