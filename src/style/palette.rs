// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Routeview-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Routeview and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde::{Deserialize, Serialize};

use super::{Color, StyleError};
use crate::model::VehicleId;

const DEFAULT_COLORS: [Color; 10] = [
    Color::from_u24(0x1f77b4),
    Color::from_u24(0xff7f0e),
    Color::from_u24(0x2ca02c),
    Color::from_u24(0xd62728),
    Color::from_u24(0x9467bd),
    Color::from_u24(0x8c564b),
    Color::from_u24(0xe377c2),
    Color::from_u24(0x7f7f7f),
    Color::from_u24(0xbcbd22),
    Color::from_u24(0x17becf),
];

/// The fixed, ordered list of route colors.
///
/// Numeric vehicle ids pick `colors[id % len]`; any other id is hashed (FNV-1a) into the same
/// range so the mapping never depends on call order or on which other ids exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Color>", into = "Vec<Color>")]
pub struct Palette {
    colors: Vec<Color>,
}

impl Palette {
    pub fn new(colors: Vec<Color>) -> Result<Self, StyleError> {
        if colors.is_empty() {
            return Err(StyleError::EmptyPalette);
        }
        Ok(Self { colors })
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn slot_for(&self, vehicle_id: &VehicleId) -> usize {
        let len = self.colors.len() as u64;
        let slot = match vehicle_id.numeric() {
            Some(value) => value % len,
            None => fnv1a(vehicle_id.as_str().as_bytes()) % len,
        };
        slot as usize
    }

    pub fn color_for(&self, vehicle_id: &VehicleId) -> Color {
        self.colors[self.slot_for(vehicle_id)]
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: DEFAULT_COLORS.to_vec(),
        }
    }
}

impl TryFrom<Vec<Color>> for Palette {
    type Error = StyleError;

    fn try_from(value: Vec<Color>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Palette> for Vec<Color> {
    fn from(value: Palette) -> Self {
        value.colors
    }
}

fn fnv1a(bytes: &[u8]) -> u64 {
    const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;
    bytes.iter().fold(OFFSET_BASIS, |hash, byte| {
        (hash ^ u64::from(*byte)).wrapping_mul(PRIME)
    })
}
