//! Staggered part sampling for one assembly pass.
//!
//! Model:
//! - Every part owns a motion window `[start_offset, start_offset + window]`
//!   in progress units (reference width 0.2).
//! - Before its window a part sits at its scattered point; after it, at its
//!   target point. Both are returned verbatim, never re-derived through a lerp.
//! - Inside the window local progress is eased with ease-out-cubic and each
//!   axis is interpolated independently.
//! - Progress 1.0 settles every part, including ones whose window would run
//!   past the end of the pass.
//!
//! The result is an assembly wave: earlier offsets start and land first.

use crate::data::{PartPoses, Vec3};
use crate::interp::functions::{ease_out_cubic, lerp_vec3};
use crate::state::ActivePose;

/// Width of a part's motion window in progress units.
pub const DEFAULT_PART_WINDOW: f32 = 0.2;

/// Where a part is within its own motion window.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PartPhase {
    /// Window not reached yet
    Waiting,
    /// Inside the window; carries the eased fraction in [0,1]
    Moving(f32),
    /// Window elapsed
    Settled,
}

/// Classify `progress` against a part window starting at `start_offset`.
pub fn part_phase(progress: f32, start_offset: f32, window: f32) -> PartPhase {
    if progress < start_offset {
        return PartPhase::Waiting;
    }
    if progress > start_offset + window || progress >= 1.0 {
        return PartPhase::Settled;
    }
    let local = ((progress - start_offset) / window).clamp(0.0, 1.0);
    PartPhase::Moving(ease_out_cubic(local))
}

/// Position of `part` at assembly `progress` heading for `pose`.
pub fn sample_part(part: &PartPoses, progress: f32, pose: ActivePose, window: f32) -> Vec3 {
    let start = part.scattered;
    let end = part.position(pose.slot());
    match part_phase(progress, part.start_offset, window) {
        PartPhase::Waiting => start,
        PartPhase::Settled => end,
        PartPhase::Moving(eased) => lerp_vec3(start, end, eased),
    }
}
