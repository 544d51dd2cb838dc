// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Routeview-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Routeview and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::path::Path;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::{Color, Palette, StyleError};

/// Alternating dash/gap lengths, in the surface's stroke units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<f32>", into = "Vec<f32>")]
pub struct DashPattern(SmallVec<[f32; 4]>);

impl DashPattern {
    pub fn new(segments: impl IntoIterator<Item = f32>) -> Self {
        Self(segments.into_iter().collect())
    }

    pub fn segments(&self) -> &[f32] {
        &self.0
    }

    /// One full dash + gap cycle.
    pub fn period(&self) -> f32 {
        let sum: f32 = self.0.iter().sum();
        // Odd-length patterns repeat twice per cycle, like SVG `stroke-dasharray`.
        if self.0.len() % 2 == 1 {
            sum * 2.0
        } else {
            sum
        }
    }

    fn validate(&self) -> Result<(), StyleError> {
        if self.0.is_empty() {
            return Err(StyleError::EmptyDash);
        }
        if self.0.iter().any(|segment| !segment.is_finite() || *segment < 0.0) {
            return Err(StyleError::InvalidDash);
        }
        if self.period() <= 0.0 {
            return Err(StyleError::InvalidDash);
        }
        Ok(())
    }
}

impl From<Vec<f32>> for DashPattern {
    fn from(value: Vec<f32>) -> Self {
        Self(SmallVec::from_vec(value))
    }
}

impl From<DashPattern> for Vec<f32> {
    fn from(value: DashPattern) -> Self {
        value.0.into_vec()
    }
}

/// Visual parameters of the route overlay.
///
/// Every field has a default, so a style file only needs the keys it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapStyle {
    pub palette: Palette,
    /// Reserved for the selected route; never handed out by the palette.
    pub highlight_color: Color,
    pub normal_weight: f32,
    pub selected_weight: f32,
    pub normal_opacity: f32,
    /// Opacity of unselected routes while a selection is active.
    pub faded_opacity: f32,
    pub highlight_dash: DashPattern,
    /// Fraction of the location bounding box added on every side when fitting the view.
    pub fit_padding: f32,
    /// Smallest span, in degrees, the view is fitted to (a single location still gets context).
    pub min_fit_span: f64,
    pub depot_color: Color,
    pub stop_color: Color,
    pub sequence_color: Color,
}

impl Default for MapStyle {
    fn default() -> Self {
        Self {
            palette: Palette::default(),
            highlight_color: Color::from_u24(0xffd400),
            normal_weight: 4.0,
            selected_weight: 7.0,
            normal_opacity: 1.0,
            faded_opacity: 0.35,
            highlight_dash: DashPattern::new([10.0, 6.0]),
            fit_padding: 0.1,
            min_fit_span: 0.005,
            depot_color: Color::from_u24(0xe03131),
            stop_color: Color::from_u24(0x4dabf7),
            sequence_color: Color::from_u24(0xffffff),
        }
    }
}

impl MapStyle {
    pub fn from_json_str(json: &str) -> Result<Self, StyleError> {
        let style: Self = serde_json::from_str(json)?;
        style.validate()?;
        Ok(style)
    }

    pub fn load(path: &Path) -> Result<Self, StyleError> {
        let json = std::fs::read_to_string(path).map_err(|source| StyleError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), StyleError> {
        for (field, weight) in [
            ("normal_weight", self.normal_weight),
            ("selected_weight", self.selected_weight),
        ] {
            if !weight.is_finite() || weight <= 0.0 {
                return Err(StyleError::InvalidWeight { field, value: weight });
            }
        }
        for (field, opacity) in [
            ("normal_opacity", self.normal_opacity),
            ("faded_opacity", self.faded_opacity),
        ] {
            if !(0.0..=1.0).contains(&opacity) {
                return Err(StyleError::InvalidOpacity { field, value: opacity });
            }
        }
        if !self.fit_padding.is_finite() || self.fit_padding < 0.0 {
            return Err(StyleError::InvalidPadding(self.fit_padding));
        }
        if !self.min_fit_span.is_finite() || self.min_fit_span < 0.0 {
            return Err(StyleError::InvalidMinSpan(self.min_fit_span));
        }
        if self.palette.colors().contains(&self.highlight_color) {
            log::warn!(
                "highlight color {} is also a palette color; the selected route may be hard to tell apart",
                self.highlight_color
            );
        }
        self.highlight_dash.validate()
    }
}
