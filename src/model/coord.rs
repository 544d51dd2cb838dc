// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Routeview-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Routeview and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Coordinate primitives shared by the model, the overlay and the surfaces.

use std::fmt;

use geo::{BoundingRect, Coord, MultiPoint, Point, Rect};
use serde::{Deserialize, Serialize};

pub type Degree = f64;
pub type NanoDegree = i64;

const NANO_DEGREES_PER_DEGREE: f64 = 1e7;

/// A `(longitude, latitude)` pair in degrees.
///
/// Serialized as a `[lng, lat]` array, the order route solvers exchange waypoints in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[Degree; 2]", into = "[Degree; 2]")]
pub struct LngLat {
    pub lng: Degree,
    pub lat: Degree,
}

impl LngLat {
    pub const fn new(lng: Degree, lat: Degree) -> Self {
        Self { lng, lat }
    }

    pub fn is_finite(&self) -> bool {
        self.lng.is_finite() && self.lat.is_finite()
    }

    /// Stable lookup key, `None` for non-finite coordinates.
    pub fn key(&self) -> Option<CoordKey> {
        CoordKey::from_degrees(self.lat, self.lng)
    }

    /// Bitwise equality: a NaN coordinate equals itself, `0.0` and `-0.0` differ.
    pub fn same_as(&self, other: &Self) -> bool {
        self.lng.to_bits() == other.lng.to_bits() && self.lat.to_bits() == other.lat.to_bits()
    }
}

impl fmt::Display for LngLat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "POINT({} {})", self.lng, self.lat)
    }
}

impl From<[Degree; 2]> for LngLat {
    fn from([lng, lat]: [Degree; 2]) -> Self {
        Self::new(lng, lat)
    }
}

impl From<LngLat> for [Degree; 2] {
    fn from(value: LngLat) -> Self {
        [value.lng, value.lat]
    }
}

impl From<LngLat> for Coord<Degree> {
    fn from(value: LngLat) -> Self {
        Coord {
            x: value.lng,
            y: value.lat,
        }
    }
}

impl From<Coord<Degree>> for LngLat {
    fn from(value: Coord<Degree>) -> Self {
        Self::new(value.x, value.y)
    }
}

/// Coordinates quantized to nano-degrees (1e-7°, roughly one centimetre).
///
/// Two coordinates that print the same at seven decimals share a key, which makes reverse
/// lookups immune to float formatting noise introduced by a solver round trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CoordKey {
    lat: NanoDegree,
    lng: NanoDegree,
}

impl CoordKey {
    pub fn from_degrees(lat: Degree, lng: Degree) -> Option<Self> {
        if !lat.is_finite() || !lng.is_finite() {
            return None;
        }
        Some(Self {
            lat: (lat * NANO_DEGREES_PER_DEGREE).round() as NanoDegree,
            lng: (lng * NANO_DEGREES_PER_DEGREE).round() as NanoDegree,
        })
    }

    pub fn nano_lat(&self) -> NanoDegree {
        self.lat
    }

    pub fn nano_lng(&self) -> NanoDegree {
        self.lng
    }
}

/// Axis-aligned geographic bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    south_west: LngLat,
    north_east: LngLat,
}

impl Bounds {
    pub fn new(a: LngLat, b: LngLat) -> Self {
        Self::from_rect(Rect::new(Coord::from(a), Coord::from(b)))
    }

    /// Bounding box of every finite point, `None` when there is none.
    pub fn from_points(points: impl IntoIterator<Item = LngLat>) -> Option<Self> {
        let points = points
            .into_iter()
            .filter(LngLat::is_finite)
            .map(|point| Point::from(Coord::from(point)))
            .collect::<Vec<_>>();
        MultiPoint::new(points).bounding_rect().map(Self::from_rect)
    }

    pub fn from_rect(rect: Rect<Degree>) -> Self {
        Self {
            south_west: rect.min().into(),
            north_east: rect.max().into(),
        }
    }

    pub fn south_west(&self) -> LngLat {
        self.south_west
    }

    pub fn north_east(&self) -> LngLat {
        self.north_east
    }

    pub fn width(&self) -> Degree {
        self.north_east.lng - self.south_west.lng
    }

    pub fn height(&self) -> Degree {
        self.north_east.lat - self.south_west.lat
    }

    pub fn center(&self) -> LngLat {
        LngLat::new(
            (self.south_west.lng + self.north_east.lng) / 2.0,
            (self.south_west.lat + self.north_east.lat) / 2.0,
        )
    }

    pub fn contains(&self, point: LngLat) -> bool {
        point.lng >= self.south_west.lng
            && point.lng <= self.north_east.lng
            && point.lat >= self.south_west.lat
            && point.lat <= self.north_east.lat
    }

    /// Grows a degenerate (zero-width or zero-height) box so it can be framed.
    pub fn with_min_span(self, min_span: Degree) -> Self {
        let center = self.center();
        let half_width = self.width().max(min_span) / 2.0;
        let half_height = self.height().max(min_span) / 2.0;
        Self {
            south_west: LngLat::new(center.lng - half_width, center.lat - half_height),
            north_east: LngLat::new(center.lng + half_width, center.lat + half_height),
        }
    }
}
