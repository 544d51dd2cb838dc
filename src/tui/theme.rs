// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Routeview-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Routeview and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::env;

use ratatui::style::{Color, Modifier, Style};
use thiserror::Error;

use crate::style::Color as MapColor;

pub(crate) const PALETTE_ENV: &str = "ROUTEVIEW_TUI_PALETTE";

/// Terminal background assumed when blending faded routes without a palette override.
const DEFAULT_BACKGROUND: MapColor = MapColor::rgb(0, 0, 0);

pub(crate) fn tui_color(color: MapColor) -> Color {
    Color::Rgb(color.r, color.g, color.b)
}

#[derive(Debug, Clone, Default)]
pub(crate) struct TuiTheme {
    palette: Option<TuiPalette>,
}

impl TuiTheme {
    pub(crate) fn from_env() -> Result<Self, ThemeError> {
        let palette = palette_override_from_env()?;
        Ok(Self { palette })
    }

    pub(crate) fn base_style(&self) -> Style {
        match &self.palette {
            Some(palette) => Style::default().fg(tui_color(palette.fg)).bg(tui_color(palette.bg)),
            None => Style::default(),
        }
    }

    pub(crate) fn background(&self) -> MapColor {
        self.palette
            .as_ref()
            .map_or(DEFAULT_BACKGROUND, |palette| palette.bg)
    }

    pub(crate) fn panel_border_style(&self, focused: bool) -> Style {
        if focused {
            self.base_style().fg(self.accent())
        } else {
            self.base_style()
        }
    }

    pub(crate) fn accent_style(&self) -> Style {
        self.base_style().fg(self.accent()).add_modifier(Modifier::BOLD)
    }

    pub(crate) fn muted_style(&self) -> Style {
        self.base_style().fg(self.muted())
    }

    pub(crate) fn error_style(&self) -> Style {
        let fg = match &self.palette {
            Some(palette) => tui_color(palette.error),
            None => Color::Red,
        };
        self.base_style().fg(fg)
    }

    pub(crate) fn selection_style(&self) -> Style {
        self.base_style().add_modifier(Modifier::REVERSED | Modifier::BOLD)
    }

    pub(crate) fn basemap_color(&self) -> Color {
        self.muted()
    }

    fn accent(&self) -> Color {
        match &self.palette {
            Some(palette) => tui_color(palette.accent),
            None => Color::Yellow,
        }
    }

    fn muted(&self) -> Color {
        match &self.palette {
            Some(palette) => tui_color(palette.muted),
            None => Color::DarkGray,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct TuiPalette {
    fg: MapColor,
    bg: MapColor,
    accent: MapColor,
    muted: MapColor,
    error: MapColor,
}

impl TuiPalette {
    const CSV_LEN: usize = 5;

    fn parse_csv(value: &str) -> Result<Self, String> {
        let parts: Vec<&str> = value.split(',').map(str::trim).collect();
        if parts.len() != Self::CSV_LEN {
            return Err(format!(
                "expected {} comma-separated colors (fg,bg,accent,muted,error), got {}",
                Self::CSV_LEN,
                parts.len()
            ));
        }
        let color = |part: &str| MapColor::parse(part).map_err(|error| error.to_string());
        Ok(Self {
            fg: color(parts[0])?,
            bg: color(parts[1])?,
            accent: color(parts[2])?,
            muted: color(parts[3])?,
            error: color(parts[4])?,
        })
    }
}

fn palette_override_from_env() -> Result<Option<TuiPalette>, ThemeError> {
    let value = match env::var(PALETTE_ENV) {
        Ok(value) => value,
        Err(env::VarError::NotPresent) => return Ok(None),
        Err(env::VarError::NotUnicode(_)) => {
            return Err(ThemeError::InvalidEnv {
                name: PALETTE_ENV.to_string(),
                value: "<non-unicode>".to_string(),
            });
        }
    };

    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let parsed = TuiPalette::parse_csv(trimmed).map_err(|error| ThemeError::InvalidEnv {
        name: PALETTE_ENV.to_string(),
        value: format!("{trimmed} ({error})"),
    })?;
    Ok(Some(parsed))
}

#[derive(Debug, Clone, Error)]
pub(crate) enum ThemeError {
    #[error("invalid env {name}={value}")]
    InvalidEnv { name: String, value: String },
}

#[cfg(test)]
mod tests {
    use super::{tui_color, TuiPalette, TuiTheme};
    use crate::style::Color as MapColor;
    use ratatui::style::Color;

    #[test]
    fn palette_override_parses_valid_csv() {
        let palette =
            TuiPalette::parse_csv("#111111, #222222, rgb:ff/d4/00, 0x555555, #ff0000").expect("palette");
        assert_eq!(palette.fg, MapColor::rgb(0x11, 0x11, 0x11));
        assert_eq!(palette.bg, MapColor::rgb(0x22, 0x22, 0x22));
        assert_eq!(palette.accent, MapColor::rgb(0xff, 0xd4, 0x00));
        assert_eq!(palette.error, MapColor::rgb(0xff, 0, 0));
    }

    #[test]
    fn palette_override_rejects_invalid_csv() {
        let err = TuiPalette::parse_csv("nope").expect_err("too few colors");
        assert!(err.contains("expected"));
        let err = TuiPalette::parse_csv("#111111,#222222,#333333,#444444,#zzzzzz")
            .expect_err("bad color");
        assert!(err.contains("#zzzzzz"));
    }

    #[test]
    fn default_theme_blends_against_black() {
        let theme = TuiTheme::default();
        assert_eq!(theme.background(), MapColor::rgb(0, 0, 0));
        assert_eq!(theme.basemap_color(), Color::DarkGray);
    }

    #[test]
    fn map_colors_convert_to_rgb() {
        assert_eq!(tui_color(MapColor::rgb(1, 2, 3)), Color::Rgb(1, 2, 3));
    }
}
