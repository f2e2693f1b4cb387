//! Ray casting against scene objects.

use glam::DVec3;

use crate::geometry::mesh::Aabb;
use crate::scene::{ObjectId, SceneRegistry};

/// A ray in world space.
pub struct Ray {
    pub origin: DVec3,
    pub direction: DVec3,
}

/// Ray-AABB intersection using the slab method.
/// Returns the distance along the ray to the nearest hit, or None.
pub fn ray_aabb(ray: &Ray, aabb: &Aabb) -> Option<f64> {
    let inv_dir = DVec3::new(
        1.0 / ray.direction.x,
        1.0 / ray.direction.y,
        1.0 / ray.direction.z,
    );

    let t1 = (aabb.min.x - ray.origin.x) * inv_dir.x;
    let t2 = (aabb.max.x - ray.origin.x) * inv_dir.x;
    let t3 = (aabb.min.y - ray.origin.y) * inv_dir.y;
    let t4 = (aabb.max.y - ray.origin.y) * inv_dir.y;
    let t5 = (aabb.min.z - ray.origin.z) * inv_dir.z;
    let t6 = (aabb.max.z - ray.origin.z) * inv_dir.z;

    let tmin = t1.min(t2).max(t3.min(t4)).max(t5.min(t6));
    let tmax = t1.max(t2).min(t3.max(t4)).min(t5.max(t6));

    if tmax < 0.0 || tmin > tmax {
        return None;
    }

    Some(if tmin < 0.0 { tmax } else { tmin })
}

/// Pick the nearest object whose world AABB is intersected by the ray.
pub fn pick_nearest(ray: &Ray, registry: &SceneRegistry) -> Option<ObjectId> {
    let mut best: Option<(ObjectId, f64)> = None;

    for (id, object) in registry.iter() {
        if let Some(dist) = ray_aabb(ray, &object.world_aabb()) {
            if best.is_none_or(|(_, d)| dist < d) {
                best = Some((id, dist));
            }
        }
    }

    best.map(|(id, _)| id)
}

/// Minimum distance between a ray and a line segment.
pub fn ray_segment_distance(ray: &Ray, seg_start: DVec3, seg_end: DVec3) -> f64 {
    let u = ray.direction;
    let v = seg_end - seg_start;
    let w = ray.origin - seg_start;

    let a = u.dot(u);
    let b = u.dot(v);
    let c = v.dot(v);
    let d = u.dot(w);
    let e = v.dot(w);

    let denom = a * c - b * b;

    let (sc, tc);
    if denom < 1e-12 {
        // Nearly parallel
        sc = 0.0;
        tc = if b > c { d / b } else { e / c };
    } else {
        sc = (b * e - c * d) / denom;
        tc = (a * e - b * d) / denom;
    }

    let tc = tc.clamp(0.0, 1.0);
    let sc = sc.max(0.0);

    let closest_ray = ray.origin + u * sc;
    let closest_seg = seg_start + v * tc;

    (closest_ray - closest_seg).length()
}
