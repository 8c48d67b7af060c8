//! Incremental painting primitives for the stroke hot path and shape tools.
//!
//! Everything here writes directly onto the live [`RasterSurface`] and never
//! touches the history log; committing a snapshot is the engine's job.

use crate::surface::{RasterSurface, Rgba};
use kurbo::Point;

/// How painted pixels combine with the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlendMode {
    /// Source-over paint with the stroke color.
    #[default]
    Paint,
    /// Clear pixels back to the surface background color.
    Erase,
}

/// Brush radius in pixels for a given stroke width.
fn brush_radius(width: f64) -> i64 {
    (((width - 1.0) / 2.0).round()).max(0.0) as i64
}

/// Stamp a round brush centered on (cx, cy). Returns pixels written.
fn stamp(surface: &mut RasterSurface, cx: i64, cy: i64, radius: i64, color: Rgba) -> u64 {
    let mut painted = 0;
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx * dx + dy * dy > radius * radius {
                continue;
            }
            let x = cx + dx;
            let y = cy + dy;
            if x < 0 || y < 0 {
                continue;
            }
            let (x, y) = (x as u32, y as u32);
            let dst = match surface.pixel(x, y) {
                Some(p) => p,
                None => continue,
            };
            if surface.set_pixel(x, y, color.over(dst)) {
                painted += 1;
            }
        }
    }
    painted
}

/// Resolve the effective color for a blend mode. Erasing paints the
/// background rather than drawing.
fn resolve_color(surface: &RasterSurface, color: Rgba, mode: BlendMode) -> Rgba {
    match mode {
        BlendMode::Paint => color,
        BlendMode::Erase => surface.background(),
    }
}

/// Paint a line segment with a round brush of the given width.
///
/// Returns the number of pixels written (overlapping brush stamps are not
/// deduplicated; callers only rely on zero vs. non-zero).
pub fn paint_segment(
    surface: &mut RasterSurface,
    from: Point,
    to: Point,
    width: f64,
    color: Rgba,
    mode: BlendMode,
) -> u64 {
    let color = resolve_color(surface, color, mode);
    let radius = brush_radius(width);

    let dx = to.x - from.x;
    let dy = to.y - from.y;
    let steps = dx.abs().max(dy.abs()).round() as i64;

    if steps == 0 {
        return stamp(surface, from.x.round() as i64, from.y.round() as i64, radius, color);
    }

    let mut painted = 0;
    for i in 0..=steps {
        let t = i as f64 / steps as f64;
        let x = (from.x + dx * t).round() as i64;
        let y = (from.y + dy * t).round() as i64;
        painted += stamp(surface, x, y, radius, color);
    }
    painted
}

/// Paint an axis-aligned rectangle outline between two corners.
pub fn stroke_rect(
    surface: &mut RasterSurface,
    a: Point,
    b: Point,
    width: f64,
    color: Rgba,
    mode: BlendMode,
) -> u64 {
    let x0 = a.x.min(b.x);
    let y0 = a.y.min(b.y);
    let x1 = a.x.max(b.x);
    let y1 = a.y.max(b.y);

    let corners = [
        Point::new(x0, y0),
        Point::new(x1, y0),
        Point::new(x1, y1),
        Point::new(x0, y1),
        Point::new(x0, y0),
    ];

    let mut painted = 0;
    for pair in corners.windows(2) {
        painted += paint_segment(surface, pair[0], pair[1], width, color, mode);
    }
    painted
}

/// Fill an axis-aligned rectangle between two corners.
pub fn fill_rect(
    surface: &mut RasterSurface,
    a: Point,
    b: Point,
    color: Rgba,
    mode: BlendMode,
) -> u64 {
    let color = resolve_color(surface, color, mode);
    let x0 = a.x.min(b.x).round().max(0.0) as u32;
    let y0 = a.y.min(b.y).round().max(0.0) as u32;
    let x1 = a.x.max(b.x).round().max(0.0) as u32;
    let y1 = a.y.max(b.y).round().max(0.0) as u32;

    let mut painted = 0;
    for y in y0..=y1 {
        for x in x0..=x1 {
            let dst = match surface.pixel(x, y) {
                Some(p) => p,
                None => continue,
            };
            if surface.set_pixel(x, y, color.over(dst)) {
                painted += 1;
            }
        }
    }
    painted
}

/// Paint an ellipse outline inscribed in the rectangle between two corners.
pub fn stroke_ellipse(
    surface: &mut RasterSurface,
    a: Point,
    b: Point,
    width: f64,
    color: Rgba,
    mode: BlendMode,
) -> u64 {
    let cx = (a.x + b.x) / 2.0;
    let cy = (a.y + b.y) / 2.0;
    let rx = (b.x - a.x).abs() / 2.0;
    let ry = (b.y - a.y).abs() / 2.0;

    if rx < 0.5 && ry < 0.5 {
        return 0;
    }

    // Sample the perimeter densely enough that consecutive samples are at
    // most ~one pixel apart, then connect them with segments.
    let steps = (std::f64::consts::TAU * rx.max(ry)).ceil().max(16.0) as usize;
    let point_at = |i: usize| {
        let angle = std::f64::consts::TAU * i as f64 / steps as f64;
        Point::new(cx + rx * angle.cos(), cy + ry * angle.sin())
    };

    let mut painted = 0;
    for i in 0..steps {
        painted += paint_segment(surface, point_at(i), point_at(i + 1), width, color, mode);
    }
    painted
}

/// Fill an ellipse inscribed in the rectangle between two corners.
pub fn fill_ellipse(
    surface: &mut RasterSurface,
    a: Point,
    b: Point,
    color: Rgba,
    mode: BlendMode,
) -> u64 {
    let color = resolve_color(surface, color, mode);
    let cx = (a.x + b.x) / 2.0;
    let cy = (a.y + b.y) / 2.0;
    let rx = (b.x - a.x).abs() / 2.0;
    let ry = (b.y - a.y).abs() / 2.0;

    if rx < 0.5 || ry < 0.5 {
        return 0;
    }

    let y0 = (cy - ry).floor().max(0.0) as u32;
    let y1 = (cy + ry).ceil().min((surface.height() - 1) as f64) as u32;

    let mut painted = 0;
    for y in y0..=y1 {
        let dy = (y as f64 - cy) / ry;
        let rem = 1.0 - dy * dy;
        if rem < 0.0 {
            continue;
        }
        let half = rx * rem.sqrt();
        let x0 = (cx - half).floor().max(0.0) as u32;
        let x1 = (cx + half).ceil().min((surface.width() - 1) as f64) as u32;
        for x in x0..=x1 {
            let dst = match surface.pixel(x, y) {
                Some(p) => p,
                None => continue,
            };
            if surface.set_pixel(x, y, color.over(dst)) {
                painted += 1;
            }
        }
    }
    painted
}
