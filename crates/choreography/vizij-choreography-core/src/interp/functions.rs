//! Interpolation helpers:
//! - lerp_f32 / lerp_vec3 (component-wise)
//! - ease_out_cubic (fast start, soft landing)

use crate::data::Vec3;

/// Linear interpolation of scalars.
#[inline]
pub fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Each axis interpolated independently.
#[inline]
pub fn lerp_vec3(a: Vec3, b: Vec3, t: f32) -> Vec3 {
    Vec3 {
        x: lerp_f32(a.x, b.x, t),
        y: lerp_f32(a.y, b.y, t),
        z: lerp_f32(a.z, b.z, t),
    }
}

/// `1 - (1 - t)^3`. Exact at both endpoints, strictly increasing on (0,1).
#[inline]
pub fn ease_out_cubic(t: f32) -> f32 {
    let inv = 1.0 - t;
    1.0 - inv * inv * inv
}
