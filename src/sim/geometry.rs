//! Pure geometry helpers for ball-versus-edge collisions
//!
//! Nothing in here holds state: every function takes `Vec2` values by copy
//! and is total over finite input, including zero-length segments.

use glam::Vec2;

/// Where a point lands when projected onto a finite segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentProjection {
    /// Projection parameter along A→B, clamped to [0, 1]
    pub t: f32,
    /// Closest point on the segment
    pub point: Vec2,
    /// Euclidean distance from the query point to `point`
    pub distance: f32,
}

impl SegmentProjection {
    /// True when the closest point is one of the segment's endpoints
    #[inline]
    pub fn at_endpoint(&self) -> bool {
        self.t <= 0.0 || self.t >= 1.0
    }
}

/// Project `p` onto segment AB, clamping to the segment
///
/// A zero-length segment projects everything onto A with `t = 0`.
pub fn segment_projection(p: Vec2, a: Vec2, b: Vec2) -> SegmentProjection {
    let ab = b - a;
    let ap = p - a;
    let len_sq = ab.length_squared();

    if len_sq == 0.0 {
        return SegmentProjection {
            t: 0.0,
            point: a,
            distance: ap.length(),
        };
    }

    let t = (ap.dot(ab) / len_sq).clamp(0.0, 1.0);
    // Snap to the exact endpoint so callers can compare against A/B directly
    let point = if t == 0.0 {
        a
    } else if t == 1.0 {
        b
    } else {
        a + ab * t
    };

    SegmentProjection {
        t,
        point,
        distance: (p - point).length(),
    }
}

/// Distance from `p` to segment AB and the closest point on it
#[inline]
pub fn closest_point_on_segment(p: Vec2, a: Vec2, b: Vec2) -> (f32, Vec2) {
    let proj = segment_projection(p, a, b);
    (proj.distance, proj.point)
}

/// Unit normal of edge AB that points toward `interior_hint`
///
/// Returns `Vec2::ZERO` for a zero-length edge; callers skip such edges.
pub fn derive_inward_normal(a: Vec2, b: Vec2, interior_hint: Vec2) -> Vec2 {
    let edge = b - a;
    let perp = edge.perp();
    let to_interior = interior_hint - (a + b) * 0.5;

    let normal = if perp.dot(to_interior) > 0.0 { perp } else { -perp };
    normal.normalize_or_zero()
}

/// Elastic reflection: v' = v - 2(v·n)n
///
/// Speed is preserved only for unit `normal`.
#[inline]
pub fn reflect(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Signed distance from `p` to the infinite line through `a` with unit `normal`
///
/// Positive on the side the normal points to.
#[inline]
pub fn signed_distance_to_line(p: Vec2, a: Vec2, normal: Vec2) -> f32 {
    (p - a).dot(normal)
}
