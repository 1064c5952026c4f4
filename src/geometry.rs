//! Planar geometry for user-drawn zones.
//!
//! All coordinates are integer pixels in the space of one surface (image
//! canvas, video frame or webcam frame). Containment tests take `f64` so
//! detection centres and centroids can be tested without rounding.

use serde::{Deserialize, Serialize};

/// A recorded vertex, in surface pixel space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// A two-click segment used for line-crossing counts on stream surfaces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossingLine {
    pub start: Point,
    pub end: Point,
}

/// Absolute polygon area via the shoelace formula, over the cyclic vertex
/// sequence. Fewer than 3 vertices is not a polygon and yields 0.
pub fn polygon_area(points: &[Point]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let n = points.len();
    // each cross term needs up to 63 bits, so the running sum is widened
    let mut twice_area: i128 = 0;
    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        twice_area += a.x as i128 * b.y as i128;
        twice_area -= b.x as i128 * a.y as i128;
    }
    (twice_area as f64 / 2.0).abs()
}

/// Arithmetic mean of the vertices.
///
/// This is NOT the area centroid. For non-convex or unevenly sampled outlines
/// the two differ; zone validation relies on the vertex mean.
pub fn vertex_centroid(points: &[Point]) -> Option<(f64, f64)> {
    if points.is_empty() {
        return None;
    }
    let (sx, sy) = points.iter().fold((0i64, 0i64), |(sx, sy), p| {
        (sx + p.x as i64, sy + p.y as i64)
    });
    let n = points.len() as f64;
    Some((sx as f64 / n, sy as f64 / n))
}

/// Even-odd ray casting against a horizontal ray from `(x, y)`.
///
/// The lower edge bound is exclusive and the upper bound inclusive so a ray
/// through a shared vertex is counted once. Points exactly on an edge get a
/// deterministic but otherwise arbitrary classification.
pub fn point_in_polygon(x: f64, y: f64, polygon: &[Point]) -> bool {
    if polygon.len() < 3 {
        return false;
    }

    let n = polygon.len();
    let mut inside = false;
    let (mut p1x, mut p1y) = (polygon[0].x as f64, polygon[0].y as f64);

    for i in 0..n {
        let next = polygon[(i + 1) % n];
        let (p2x, p2y) = (next.x as f64, next.y as f64);

        if y > p1y.min(p2y) && y <= p1y.max(p2y) && x <= p1x.max(p2x) {
            let xinters = if p1y != p2y {
                (y - p1y) * (p2x - p1x) / (p2y - p1y) + p1x
            } else {
                p1x
            };
            if p1x == p2x || x <= xinters {
                inside = !inside;
            }
        }

        p1x = p2x;
        p1y = p2y;
    }

    inside
}

/// Euclidean distance from a recorded vertex to an arbitrary position.
pub fn distance(a: Point, (x, y): (f64, f64)) -> f64 {
    let dx = x - a.x as f64;
    let dy = y - a.y as f64;
    (dx * dx + dy * dy).sqrt()
}
