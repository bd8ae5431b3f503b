//! Interpolation helpers.
//!
//! Linear blending of points and the easing curves applied to a part's
//! local progress.

pub mod functions;

pub use functions::{ease_out_cubic, lerp_f32, lerp_vec3};
