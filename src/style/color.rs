// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Routeview-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Routeview and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::StyleError;

/// An opaque 24-bit color. Serialized as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn from_u24(rgb: u32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xFF) as u8,
            g: ((rgb >> 8) & 0xFF) as u8,
            b: (rgb & 0xFF) as u8,
        }
    }

    /// Parses `#rrggbb`, `0xrrggbb`, bare `rrggbb`, or X11 `rgb:rr/gg/bb` (2 or 4 digits per
    /// channel).
    pub fn parse(value: &str) -> Result<Self, StyleError> {
        let trimmed = value.trim();
        let invalid = |reason: &str| StyleError::InvalidColor {
            value: trimmed.to_owned(),
            reason: reason.to_owned(),
        };
        if trimmed.is_empty() {
            return Err(invalid("empty color"));
        }

        let lower = trimmed.to_ascii_lowercase();
        if let Some(rest) = lower.strip_prefix("rgb:") {
            let channels = rest
                .split('/')
                .map(parse_x11_channel)
                .collect::<Option<Vec<_>>>()
                .ok_or_else(|| invalid("expected 2 or 4 hex digits per rgb: channel"))?;
            let [r, g, b] = channels[..] else {
                return Err(invalid("expected three rgb: channels"));
            };
            return Ok(Self::rgb(r, g, b));
        }

        let hex = lower
            .strip_prefix('#')
            .or_else(|| lower.strip_prefix("0x"))
            .unwrap_or(&lower);
        if hex.len() != 6 || !hex.chars().all(|ch| ch.is_ascii_hexdigit()) {
            return Err(invalid("expected #RRGGBB"));
        }
        let rgb = u32::from_str_radix(hex, 16).map_err(|_| invalid("expected #RRGGBB"))?;
        Ok(Self::from_u24(rgb))
    }

    /// Linear mix towards `other`; `amount` 0.0 keeps `self`, 1.0 yields `other`.
    pub fn mix(self, other: Self, amount: f32) -> Self {
        let amount = amount.clamp(0.0, 1.0);
        let channel = |from: u8, to: u8| {
            let from = f32::from(from);
            let to = f32::from(to);
            (from + (to - from) * amount).round() as u8
        };
        Self::rgb(
            channel(self.r, other.r),
            channel(self.g, other.g),
            channel(self.b, other.b),
        )
    }
}

fn parse_x11_channel(value: &str) -> Option<u8> {
    let value = value.trim();
    match value.len() {
        2 => u8::from_str_radix(value, 16).ok(),
        4 => u16::from_str_radix(value, 16).ok().map(|wide| (wide >> 8) as u8),
        _ => None,
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Color {
    type Error = StyleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Color> for String {
    fn from(value: Color) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::Color;

    #[rstest]
    #[case("#1f77b4")]
    #[case("0x1F77B4")]
    #[case("1f77b4")]
    #[case("rgb:1f/77/b4")]
    #[case("rgb:1f1f/7777/b4b4")]
    fn parses_supported_notations(#[case] raw: &str) {
        assert_eq!(Color::parse(raw).expect("color"), Color::rgb(0x1f, 0x77, 0xb4));
    }

    #[rstest]
    #[case("")]
    #[case("#12345")]
    #[case("#gggggg")]
    #[case("rgb:11/22")]
    #[case("rgb:1/22/33")]
    fn rejects_malformed_colors(#[case] raw: &str) {
        assert!(Color::parse(raw).is_err(), "{raw:?} should be rejected");
    }

    #[test]
    fn displays_lowercase_hex() {
        assert_eq!(Color::rgb(255, 8, 0).to_string(), "#ff0800");
    }

    #[test]
    fn mix_interpolates_channels() {
        let black = Color::rgb(0, 0, 0);
        let white = Color::rgb(255, 255, 255);
        assert_eq!(black.mix(white, 0.0), black);
        assert_eq!(black.mix(white, 1.0), white);
        assert_eq!(black.mix(white, 0.5), Color::rgb(128, 128, 128));
    }
}
