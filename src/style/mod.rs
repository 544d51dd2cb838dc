// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Routeview-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Routeview and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Route colors and the configurable map style.

mod color;
mod config;
mod palette;

use std::path::PathBuf;

use thiserror::Error;

pub use color::Color;
pub use config::{DashPattern, MapStyle};
pub use palette::Palette;

#[derive(Debug, Error)]
pub enum StyleError {
    #[error("invalid color {value:?}: {reason}")]
    InvalidColor { value: String, reason: String },
    #[error("palette must contain at least one color")]
    EmptyPalette,
    #[error("{field} must be a positive number, got {value}")]
    InvalidWeight { field: &'static str, value: f32 },
    #[error("{field} must lie within [0, 1], got {value}")]
    InvalidOpacity { field: &'static str, value: f32 },
    #[error("fit padding must be a non-negative number, got {0}")]
    InvalidPadding(f32),
    #[error("minimum fit span must be a non-negative number of degrees, got {0}")]
    InvalidMinSpan(f64),
    #[error("highlight dash pattern must not be empty")]
    EmptyDash,
    #[error("highlight dash pattern needs non-negative lengths with a positive total")]
    InvalidDash,
    #[error("failed to read style file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid style JSON: {0}")]
    Json(#[from] serde_json::Error),
}
