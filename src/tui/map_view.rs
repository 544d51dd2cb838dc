// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Routeview-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Routeview and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Draws a [`Scene`] with the ratatui canvas widget and maps terminal cells back to coordinates.

use ratatui::{
    layout::Rect,
    style::Style,
    symbols::Marker,
    text::Span,
    widgets::{
        canvas::{Canvas, Context, Line as CanvasLine, Map, MapResolution},
        Block, Borders,
    },
    Frame,
};

use super::theme::{tui_color, TuiTheme};
use crate::model::{Bounds, LngLat};
use crate::style::Color as MapColor;
use crate::surface::{MarkerKind, Scene, ScenePath};

/// Shown before anything was fitted.
const WORLD: ([f64; 2], [f64; 2]) = ([-180.0, 180.0], [-85.0, 85.0]);
/// A terminal cell is roughly twice as tall as it is wide.
const CELL_ASPECT: f64 = 2.0;
/// Dash lengths are given in quarter cells.
const DASH_UNITS_PER_CELL: f64 = 4.0;

/// Linear mapping between a geographic window and a terminal rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct MapProjection {
    x_bounds: [f64; 2],
    y_bounds: [f64; 2],
    area: Rect,
}

impl MapProjection {
    /// Projects `view` into `area`, widening one axis so a degree of longitude keeps the same
    /// on-screen length as it has on the ground at the view's latitude.
    pub(crate) fn new(view: Option<Bounds>, area: Rect) -> Self {
        let Some(view) = view else {
            return Self {
                x_bounds: WORLD.0,
                y_bounds: WORLD.1,
                area,
            };
        };
        let center = view.center();
        let lng_scale = center.lat.to_radians().cos().abs().max(0.01);
        let ground_width = view.width() * lng_scale;
        let ground_height = view.height();
        let cols = f64::from(area.width.max(1));
        let rows = f64::from(area.height.max(1)) * CELL_ASPECT;

        let (ground_width, ground_height) = if ground_width * rows > ground_height * cols {
            (ground_width, ground_width * rows / cols)
        } else {
            (ground_height * cols / rows, ground_height)
        };
        let half_width = ground_width / lng_scale / 2.0;
        let half_height = ground_height / 2.0;
        Self {
            x_bounds: [center.lng - half_width, center.lng + half_width],
            y_bounds: [center.lat - half_height, center.lat + half_height],
            area,
        }
    }

    pub(crate) fn x_bounds(&self) -> [f64; 2] {
        self.x_bounds
    }

    pub(crate) fn y_bounds(&self) -> [f64; 2] {
        self.y_bounds
    }

    /// Degrees of longitude covered by one terminal column.
    pub(crate) fn degrees_per_column(&self) -> f64 {
        (self.x_bounds[1] - self.x_bounds[0]) / f64::from(self.area.width.max(1))
    }

    /// Coordinate under the center of the cell at `(column, row)`, `None` outside the area.
    pub(crate) fn unproject(&self, column: u16, row: u16) -> Option<LngLat> {
        let area = self.area;
        if area.width == 0 || area.height == 0 {
            return None;
        }
        if column < area.x || row < area.y || column >= area.x + area.width || row >= area.y + area.height {
            return None;
        }
        let fx = (f64::from(column - area.x) + 0.5) / f64::from(area.width);
        let fy = (f64::from(row - area.y) + 0.5) / f64::from(area.height);
        let lng = self.x_bounds[0] + fx * (self.x_bounds[1] - self.x_bounds[0]);
        let lat = self.y_bounds[1] - fy * (self.y_bounds[1] - self.y_bounds[0]);
        Some(LngLat::new(lng, lat))
    }
}

type Segment = ((f64, f64), (f64, f64));

/// Splits a polyline into its visible dashes.
///
/// `pattern` alternates dash and gap lengths measured in `unit`s; `offset` shifts the pattern
/// along the line (animating it makes the dashes march).
pub(crate) fn dash_segments(points: &[(f64, f64)], pattern: &[f32], offset: f64, unit: f64) -> Vec<Segment> {
    let lengths = pattern
        .iter()
        .map(|length| f64::from(*length) * unit)
        .collect::<Vec<_>>();
    // Odd patterns repeat twice so dashes and gaps keep alternating.
    let lengths = if lengths.len() % 2 == 1 {
        lengths.iter().chain(lengths.iter()).copied().collect()
    } else {
        lengths
    };
    let period: f64 = lengths.iter().sum();
    if points.len() < 2 || period <= 0.0 || !period.is_finite() {
        return solid_segments(points);
    }

    // Position inside the pattern: which entry and how much of it is left.
    let mut phase = offset.rem_euclid(period);
    let mut slot = 0;
    while phase >= lengths[slot] {
        phase -= lengths[slot];
        slot = (slot + 1) % lengths.len();
    }
    let mut remaining = lengths[slot] - phase;

    let mut segments = Vec::new();
    for pair in points.windows(2) {
        let (start, end) = (pair[0], pair[1]);
        let length = ((end.0 - start.0).powi(2) + (end.1 - start.1).powi(2)).sqrt();
        let mut travelled = 0.0;
        while travelled < length {
            let step = remaining.min(length - travelled);
            if slot % 2 == 0 {
                let from = lerp(start, end, travelled / length);
                let to = lerp(start, end, (travelled + step) / length);
                segments.push((from, to));
            }
            travelled += step;
            remaining -= step;
            if remaining <= f64::EPSILON {
                slot = (slot + 1) % lengths.len();
                remaining = lengths[slot];
            }
        }
    }
    segments
}

fn solid_segments(points: &[(f64, f64)]) -> Vec<Segment> {
    points.windows(2).map(|pair| (pair[0], pair[1])).collect()
}

fn lerp(start: (f64, f64), end: (f64, f64), t: f64) -> (f64, f64) {
    (start.0 + (end.0 - start.0) * t, start.1 + (end.1 - start.1) * t)
}

/// Stroke color of a path after blending it towards the background by its opacity.
pub(crate) fn stroke_color(path: &ScenePath, background: MapColor) -> MapColor {
    let style = &path.spec().style;
    background.mix(style.color, style.opacity)
}

fn marker_glyph(kind: MarkerKind) -> &'static str {
    match kind {
        MarkerKind::Depot => "■",
        MarkerKind::Stop => "●",
        MarkerKind::Sequence => "",
    }
}

pub(crate) fn draw_map(
    frame: &mut Frame<'_>,
    area: Rect,
    scene: &Scene,
    theme: &TuiTheme,
    tick: u64,
    title: &str,
) -> MapProjection {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title.to_owned())
        .border_style(theme.panel_border_style(true));
    let inner = block.inner(area);
    let projection = MapProjection::new(scene.view().map(|view| view.visible()), inner);

    let paths = scene.paths_in_draw_order();
    let markers = scene.markers();
    let background = theme.background();
    let basemap = theme.basemap_color();
    let dash_speed = scene
        .stylesheets()
        .map(|sheet| f64::from(sheet.dash_speed))
        .next()
        .unwrap_or(0.0);
    let unit = projection.degrees_per_column() / DASH_UNITS_PER_CELL;

    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .x_bounds(projection.x_bounds())
        .y_bounds(projection.y_bounds())
        .paint(|ctx| {
            ctx.draw(&Map {
                resolution: MapResolution::High,
                color: basemap,
            });
            ctx.layer();
            for path in &paths {
                paint_path(ctx, path, background, tick, dash_speed, unit);
            }
            ctx.layer();
            for marker in &markers {
                let spec = marker.spec();
                let text = match spec.kind {
                    MarkerKind::Sequence => spec.label.to_string(),
                    kind => marker_glyph(kind).to_owned(),
                };
                let style = Style::default().fg(tui_color(spec.color));
                ctx.print(spec.position.lng, spec.position.lat, Span::styled(text, style));
            }
        });
    frame.render_widget(canvas, area);
    projection
}

fn paint_path(
    ctx: &mut Context<'_>,
    path: &ScenePath,
    background: MapColor,
    tick: u64,
    dash_speed: f64,
    unit: f64,
) {
    let spec = path.spec();
    let color = tui_color(stroke_color(path, background));
    let points = spec
        .points
        .iter()
        .map(|point| (point.lng, point.lat))
        .collect::<Vec<_>>();
    let segments = match &spec.style.dash {
        Some(dash) => {
            let offset = if spec.style.animated {
                -(tick as f64) * dash_speed * unit
            } else {
                0.0
            };
            dash_segments(&points, dash.segments(), offset, unit)
        }
        None => solid_segments(&points),
    };
    for ((x1, y1), (x2, y2)) in segments {
        ctx.draw(&CanvasLine {
            x1,
            y1,
            x2,
            y2,
            color,
        });
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use ratatui::layout::Rect;
    use rstest::rstest;

    use super::{dash_segments, MapProjection};
    use crate::model::{Bounds, LngLat};

    #[test]
    fn world_view_without_fit() {
        let projection = MapProjection::new(None, Rect::new(0, 0, 80, 24));
        assert_eq!(projection.x_bounds(), [-180.0, 180.0]);
        assert_eq!(projection.y_bounds(), [-85.0, 85.0]);
    }

    #[test]
    fn projection_keeps_the_view_inside() {
        let view = Bounds::new(LngLat::new(13.3, 52.4), LngLat::new(13.5, 52.6));
        let projection = MapProjection::new(Some(view), Rect::new(0, 0, 100, 30));
        let [west, east] = projection.x_bounds();
        let [south, north] = projection.y_bounds();
        assert!(west <= 13.3 && east >= 13.5);
        assert!(south <= 52.4 + 1e-9 && north >= 52.6 - 1e-9);
        assert_relative_eq!((west + east) / 2.0, 13.4, epsilon = 1e-9);
    }

    #[rstest]
    #[case(0, 0)]
    #[case(79, 23)]
    #[case(40, 12)]
    fn unproject_stays_within_bounds(#[case] column: u16, #[case] row: u16) {
        let projection = MapProjection::new(None, Rect::new(0, 0, 80, 24));
        let point = projection.unproject(column, row).expect("inside");
        assert!(point.lng > -180.0 && point.lng < 180.0);
        assert!(point.lat > -85.0 && point.lat < 85.0);
    }

    #[test]
    fn unproject_maps_top_left_to_north_west() {
        let projection = MapProjection::new(None, Rect::new(10, 5, 36, 17));
        let top_left = projection.unproject(10, 5).expect("inside");
        assert_relative_eq!(top_left.lng, -175.0);
        assert_relative_eq!(top_left.lat, 80.0);
        assert_eq!(projection.unproject(9, 5), None);
        assert_eq!(projection.unproject(46, 5), None);
    }

    #[test]
    fn dashes_alternate_along_the_line() {
        let segments = dash_segments(&[(0.0, 0.0), (10.0, 0.0)], &[2.0, 3.0], 0.0, 1.0);
        let starts = segments.iter().map(|(from, _)| from.0).collect::<Vec<_>>();
        assert_eq!(starts, vec![0.0, 5.0]);
        assert_relative_eq!(segments[0].1 .0, 2.0);
        assert_relative_eq!(segments[1].1 .0, 7.0);
    }

    #[test]
    fn dash_offset_shifts_the_pattern() {
        let segments = dash_segments(&[(0.0, 0.0), (10.0, 0.0)], &[2.0, 3.0], 1.0, 1.0);
        assert_relative_eq!(segments[0].0 .0, 0.0);
        assert_relative_eq!(segments[0].1 .0, 1.0);
        assert_relative_eq!(segments[1].0 .0, 4.0);
    }

    #[test]
    fn dashes_continue_across_corners() {
        let segments = dash_segments(&[(0.0, 0.0), (1.0, 0.0), (1.0, 3.0)], &[2.0, 1.0], 0.0, 1.0);
        assert_eq!(segments[0], ((0.0, 0.0), (1.0, 0.0)));
        assert_eq!(segments[1].0, (1.0, 0.0));
        assert_relative_eq!(segments[1].1 .1, 1.0);
        assert_relative_eq!(segments[2].0 .1, 2.0);
    }

    #[test]
    fn empty_pattern_draws_solid() {
        let points = [(0.0, 0.0), (1.0, 1.0), (2.0, 0.0)];
        assert_eq!(dash_segments(&points, &[], 0.0, 1.0).len(), 2);
    }
}
