//! Circular-arc reconstruction from three points.

use glam::DVec2;
use std::f64::consts::TAU;

/// Three points closer to collinear than this (by triangle area) do not
/// determine a circle.
pub const COLLINEAR_AREA_EPS: f64 = 1e-10;

/// A reconstructed circular arc.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcParams {
    pub center: DVec2,
    pub radius: f64,
    /// Angle of the start point, radians.
    pub start_angle: f64,
    /// Angle of the end point, radians.
    pub end_angle: f64,
    /// Sweep direction: true = counter-clockwise from start to end.
    pub ccw: bool,
}

/// Normalize an angle into `[0, 2π)`.
pub fn normalize_angle(angle: f64) -> f64 {
    let mut a = angle % TAU;
    if a < 0.0 {
        a += TAU;
    }
    a
}

/// Whether `test` lies on the counter-clockwise sweep from `start` to `end`.
pub fn angle_on_ccw_arc(start: f64, end: f64, test: f64) -> bool {
    let s = normalize_angle(start);
    let e = normalize_angle(end);
    let t = normalize_angle(test);
    if s <= e {
        t >= s && t <= e
    } else {
        t >= s || t <= e
    }
}

/// Center of the circle through three points, via the intersection of the
/// two perpendicular bisectors. `None` when the points are collinear.
pub fn circle_center(p1: DVec2, p2: DVec2, p3: DVec2) -> Option<DVec2> {
    let area =
        ((p1.x * (p2.y - p3.y) + p2.x * (p3.y - p1.y) + p3.x * (p1.y - p2.y)) / 2.0).abs();
    if area < COLLINEAR_AREA_EPS {
        return None;
    }

    let m1 = (p1 + p2) * 0.5;
    let m2 = (p2 + p3) * 0.5;

    // Bisector directions: chord rotated a quarter turn.
    let dir1 = DVec2::new(p2.y - p1.y, p1.x - p2.x).normalize();
    let dir2 = DVec2::new(p3.y - p2.y, p2.x - p3.x).normalize();

    // Solve m1 + t1*dir1 = m2 + t2*dir2 by projecting onto dir2's normal.
    let dir2_perp = DVec2::new(-dir2.y, dir2.x);
    let denom = dir1.dot(dir2_perp);
    if denom.abs() < 1e-12 {
        return None;
    }
    let t1 = (m2 - m1).dot(dir2_perp) / denom;

    Some(m1 + dir1 * t1)
}

/// Reconstruct the arc through `start`, `mid`, `end`.
///
/// The sweep direction is chosen so that the arc actually passes through
/// the mid-point: if the mid-point's angle lies on the counter-clockwise
/// arc from start to end, the sweep is counter-clockwise, else clockwise.
pub fn arc_through_points(start: DVec2, mid: DVec2, end: DVec2) -> Option<ArcParams> {
    let center = circle_center(start, mid, end)?;
    let radius = (start - center).length();

    let start_angle = (start.y - center.y).atan2(start.x - center.x);
    let end_angle = (end.y - center.y).atan2(end.x - center.x);
    let mid_angle = (mid.y - center.y).atan2(mid.x - center.x);

    let ccw = angle_on_ccw_arc(start_angle, end_angle, mid_angle);

    Some(ArcParams {
        center,
        radius,
        start_angle,
        end_angle,
        ccw,
    })
}

impl ArcParams {
    /// Signed sweep angle: positive counter-clockwise, negative clockwise.
    pub fn sweep(&self) -> f64 {
        let ccw_span = normalize_angle(self.end_angle - self.start_angle);
        if self.ccw {
            ccw_span
        } else if ccw_span == 0.0 {
            0.0
        } else {
            ccw_span - TAU
        }
    }

    /// Point on the circle at `angle`.
    pub fn point_at(&self, angle: f64) -> DVec2 {
        self.center + DVec2::new(angle.cos(), angle.sin()) * self.radius
    }

    /// Tessellate the arc into `segments + 1` points including both ends.
    pub fn tessellate(&self, segments: usize) -> Vec<DVec2> {
        let sweep = self.sweep();
        (0..=segments)
            .map(|i| {
                let t = i as f64 / segments as f64;
                self.point_at(self.start_angle + sweep * t)
            })
            .collect()
    }
}
