//! 2D closed outlines in sketch coordinates.

use glam::DVec2;

/// Segments used when tessellating a full circle.
pub const CIRCLE_SEGMENTS: usize = 32;
/// Segments used when tessellating an arc.
pub const ARC_SEGMENTS: usize = 24;

/// Profiles with less signed area than this are degenerate and skipped.
pub const MIN_PROFILE_AREA: f64 = 1e-6;

/// Outline of a rectangle centered at `center`, counter-clockwise.
pub fn rectangle(center: [f64; 2], width: f64, height: f64) -> Vec<DVec2> {
    let hw = width / 2.0;
    let hh = height / 2.0;
    let (cx, cy) = (center[0], center[1]);
    vec![
        DVec2::new(cx - hw, cy - hh),
        DVec2::new(cx + hw, cy - hh),
        DVec2::new(cx + hw, cy + hh),
        DVec2::new(cx - hw, cy + hh),
    ]
}

/// Outline of a full circle, counter-clockwise.
pub fn circle(center: [f64; 2], radius: f64) -> Vec<DVec2> {
    (0..CIRCLE_SEGMENTS)
        .map(|i| {
            let angle = (i as f64) * std::f64::consts::TAU / (CIRCLE_SEGMENTS as f64);
            DVec2::new(
                center[0] + radius * angle.cos(),
                center[1] + radius * angle.sin(),
            )
        })
        .collect()
}

/// Outline from explicit polyline points.
pub fn polyline(points: &[[f64; 2]]) -> Vec<DVec2> {
    points.iter().map(|p| DVec2::new(p[0], p[1])).collect()
}

/// Signed area via the shoelace formula. Positive for counter-clockwise.
pub fn signed_area(points: &[DVec2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum / 2.0
}

/// True when the outline cannot bound a usable profile.
pub fn is_degenerate(points: &[DVec2]) -> bool {
    points.len() < 3 || signed_area(points).abs() < MIN_PROFILE_AREA
}

/// Canonicalize an outline to counter-clockwise winding.
pub fn ensure_ccw(points: &mut Vec<DVec2>) {
    if signed_area(points) < 0.0 {
        points.reverse();
    }
}

/// Scale every point about the sketch origin.
pub fn scale(points: &mut [DVec2], factor: f64) {
    if factor != 1.0 {
        for p in points.iter_mut() {
            *p *= factor;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rectangle_outline_corners() {
        let pts = rectangle([0.0, 0.0], 4.0, 2.0);
        assert_eq!(pts.len(), 4);
        assert_eq!(pts[0], DVec2::new(-2.0, -1.0));
        assert_eq!(pts[2], DVec2::new(2.0, 1.0));
        assert!(signed_area(&pts) > 0.0);
        assert!((signed_area(&pts) - 8.0).abs() < 1e-12);
    }

    #[test]
    fn circle_points_on_radius() {
        let pts = circle([5.0, 3.0], 2.0);
        assert_eq!(pts.len(), CIRCLE_SEGMENTS);
        for p in &pts {
            let dist = (*p - DVec2::new(5.0, 3.0)).length();
            assert!((dist - 2.0).abs() < 1e-10, "point off circle: {dist}");
        }
        assert!(signed_area(&pts) > 0.0);
    }

    #[test]
    fn degenerate_outlines() {
        assert!(is_degenerate(&[]));
        assert!(is_degenerate(&[DVec2::ZERO, DVec2::X]));
        // Collinear points have no area.
        assert!(is_degenerate(&[
            DVec2::ZERO,
            DVec2::new(1.0, 0.0),
            DVec2::new(2.0, 0.0)
        ]));
        assert!(!is_degenerate(&rectangle([0.0, 0.0], 1.0, 1.0)));
    }

    #[test]
    fn ensure_ccw_flips_clockwise_outline() {
        let mut pts = rectangle([0.0, 0.0], 2.0, 2.0);
        pts.reverse();
        assert!(signed_area(&pts) < 0.0);
        ensure_ccw(&mut pts);
        assert!(signed_area(&pts) > 0.0);
    }

    #[test]
    fn scale_about_origin() {
        let mut pts = rectangle([1.0, 1.0], 2.0, 2.0);
        scale(&mut pts, 2.0);
        assert_eq!(pts[0], DVec2::new(0.0, 0.0));
        assert_eq!(pts[2], DVec2::new(4.0, 4.0));
    }
}
