//! Edge chaining: turn an unordered set of loop edges into a continuous
//! closed outline.

use glam::DVec2;
use tracing::warn;

use super::arc::arc_through_points;
use super::outline::ARC_SEGMENTS;

/// Per-coordinate tolerance for endpoint matching.
pub const POINT_TOLERANCE: f64 = 1e-6;

/// A single loop edge in sketch coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SketchEdge {
    Line {
        start: DVec2,
        end: DVec2,
    },
    Arc {
        start: DVec2,
        mid: DVec2,
        end: DVec2,
    },
}

impl SketchEdge {
    pub fn start(&self) -> DVec2 {
        match self {
            SketchEdge::Line { start, .. } => *start,
            SketchEdge::Arc { start, .. } => *start,
        }
    }

    pub fn end(&self) -> DVec2 {
        match self {
            SketchEdge::Line { end, .. } => *end,
            SketchEdge::Arc { end, .. } => *end,
        }
    }

    /// The same edge traversed the other way. Arcs keep their mid point.
    pub fn reversed(&self) -> SketchEdge {
        match *self {
            SketchEdge::Line { start, end } => SketchEdge::Line {
                start: end,
                end: start,
            },
            SketchEdge::Arc { start, mid, end } => SketchEdge::Arc {
                start: end,
                mid,
                end: start,
            },
        }
    }
}

/// Approximate point equality, per coordinate.
pub fn points_equal(a: DVec2, b: DVec2) -> bool {
    (a.x - b.x).abs() < POINT_TOLERANCE && (a.y - b.y).abs() < POINT_TOLERANCE
}

/// Order a set of edges into a continuous chain.
///
/// Seeds with edge 0, then repeatedly scans the remaining edges for one
/// whose start or end matches the chain's open end; an end-point match
/// appends the edge reversed. When no edge connects but some remain, the
/// next unused edge is appended as-is (malformed input, best effort) and
/// chaining continues from there.
pub fn order_edges(edges: &[SketchEdge]) -> Vec<SketchEdge> {
    if edges.is_empty() {
        return Vec::new();
    }

    let mut ordered = vec![edges[0]];
    let mut used = vec![false; edges.len()];
    used[0] = true;
    let mut current_end = edges[0].end();

    while ordered.len() < edges.len() {
        let mut found = false;

        for (i, edge) in edges.iter().enumerate() {
            if used[i] {
                continue;
            }
            if points_equal(edge.start(), current_end) {
                ordered.push(*edge);
                used[i] = true;
                current_end = edge.end();
                found = true;
                break;
            } else if points_equal(edge.end(), current_end) {
                let reversed = edge.reversed();
                current_end = reversed.end();
                ordered.push(reversed);
                used[i] = true;
                found = true;
                break;
            }
        }

        if !found {
            warn!("loop is not continuous, appending remaining edges in input order");
            match used.iter().position(|u| !u) {
                Some(i) => {
                    ordered.push(edges[i]);
                    used[i] = true;
                    current_end = edges[i].end();
                }
                None => break,
            }
        }
    }

    ordered
}

/// Tessellate an ordered edge chain into a closed outline.
///
/// Arcs that fail reconstruction (collinear control points) degrade to a
/// straight segment to their end point. A chain whose last point does not
/// meet the first is closed implicitly — the outline is treated as a
/// closed polygon by the extruder.
pub fn outline_from_edges(edges: &[SketchEdge]) -> Vec<DVec2> {
    let mut points: Vec<DVec2> = Vec::new();

    for edge in edges {
        if points.is_empty() {
            points.push(edge.start());
        }

        match edge {
            SketchEdge::Line { end, .. } => push_point(&mut points, *end),
            SketchEdge::Arc { start, mid, end } => {
                match arc_through_points(*start, *mid, *end) {
                    Some(arc) => {
                        for p in arc.tessellate(ARC_SEGMENTS).into_iter().skip(1) {
                            push_point(&mut points, p);
                        }
                    }
                    None => {
                        warn!("arc through collinear points, using straight segment");
                        push_point(&mut points, *end);
                    }
                }
            }
        }
    }

    // Drop a duplicated closing point so the polygon is not self-touching.
    if points.len() > 1 && points_equal(points[0], *points.last().unwrap()) {
        points.pop();
    }

    points
}

fn push_point(points: &mut Vec<DVec2>, p: DVec2) {
    if points.last().is_none_or(|last| !points_equal(*last, p)) {
        points.push(p);
    }
}
