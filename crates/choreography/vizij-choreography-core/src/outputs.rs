//! Output contracts from the choreographer.
//!
//! `Outputs` carries the semantic events raised during one `advance` call.
//! `Frame` is the render-facing view: every part's position plus the group
//! scale and rotation. Adapters (Bevy/WASM) apply frames to the host.

use serde::{Deserialize, Serialize};

use crate::data::Vec3;
use crate::ids::TimerHandle;
use crate::state::{ActivePose, AnimationState};

/// Discrete signals emitted while stepping.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ChoreographyEvent {
    StateChanged {
        from: AnimationState,
        to: AnimationState,
    },
    /// A rotation pass finished; the loop for `pose` is complete.
    LoopCompleted {
        pose: ActivePose,
    },
    RestartScheduled {
        handle: TimerHandle,
        delay_ms: u64,
    },
    PoseToggled {
        from: ActivePose,
        to: ActivePose,
    },
    /// A restart fired after the state moved on, or after it was superseded.
    RestartDiscarded {
        handle: TimerHandle,
    },
    AssemblyComplete {
        final_state: AnimationState,
    },
}

/// Events produced by one `advance` call.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Outputs {
    #[serde(default)]
    pub events: Vec<ChoreographyEvent>,
}

impl Outputs {
    #[inline]
    pub fn clear(&mut self) {
        self.events.clear();
    }

    #[inline]
    pub fn push_event(&mut self, event: ChoreographyEvent) {
        self.events.push(event);
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// One part's interpolated position for the current instant.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PartTransform {
    pub part: String,
    pub position: Vec3,
}

/// Everything a renderer needs for one displayed frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub state: AnimationState,
    pub active_pose: ActivePose,
    pub progress: f32,
    /// Uniform scale for the whole model
    pub scale: f32,
    /// Rotation about the vertical axis, radians
    pub rotation: f32,
    /// Parts in declaration order
    pub parts: Vec<PartTransform>,
}
