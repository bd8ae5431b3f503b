//! Discrete animation state, active pose and the choreographer snapshot.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::data::PoseSlot;
use crate::error::ChoreographyError;
use crate::ids::TimerHandle;

/// State of the choreography loop. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnimationState {
    /// Fully assembled and at rest
    Idle,
    /// Looping assembly pass, followed by a rotation
    AssemblingLoop,
    /// Assembled model sweeping one full turn
    Rotating,
    /// Waiting for the scheduled restart
    Paused,
    /// One-shot assembly that ends in Idle
    AssemblingTransition,
}

impl AnimationState {
    /// Get the host-facing name of this state
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "IDLE",
            Self::AssemblingLoop => "ASSEMBLING_LOOP",
            Self::Rotating => "ROTATING",
            Self::Paused => "PAUSED",
            Self::AssemblingTransition => "ASSEMBLING_TRANSITION",
        }
    }

    /// States that accumulate assembly progress
    #[inline]
    pub fn is_assembling(&self) -> bool {
        matches!(self, Self::AssemblingLoop | Self::AssemblingTransition)
    }

    /// Settled states never render a mid-interpolation pose
    #[inline]
    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Idle | Self::Paused)
    }
}

impl fmt::Display for AnimationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AnimationState {
    type Err = ChoreographyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "IDLE" => Ok(Self::Idle),
            "ASSEMBLING_LOOP" => Ok(Self::AssemblingLoop),
            "ROTATING" => Ok(Self::Rotating),
            "PAUSED" => Ok(Self::Paused),
            "ASSEMBLING_TRANSITION" => Ok(Self::AssemblingTransition),
            other => Err(ChoreographyError::UnknownState {
                name: other.to_string(),
            }),
        }
    }
}

/// Which target pose the current assembly pass lands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ActivePose {
    #[default]
    A,
    B,
}

impl ActivePose {
    #[inline]
    pub fn toggled(self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }

    #[inline]
    pub fn slot(self) -> PoseSlot {
        match self {
            Self::A => PoseSlot::A,
            Self::B => PoseSlot::B,
        }
    }
}

/// Copy of the choreographer's mutable state at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChoreographerSnapshot {
    pub state: AnimationState,
    /// Assembly progress in [0,1]
    pub progress: f32,
    /// Accumulated rotation in [0, 2π)
    pub rotation_angle: f32,
    pub active_pose: ActivePose,
    #[serde(default)]
    pub pending_restart: Option<TimerHandle>,
}

impl ChoreographerSnapshot {
    /// Fresh state for a requested entry state. Settled states start fully
    /// assembled.
    pub fn entering(state: AnimationState, active_pose: ActivePose) -> Self {
        Self {
            state,
            progress: if state.is_settled() { 1.0 } else { 0.0 },
            rotation_angle: 0.0,
            active_pose,
            pending_restart: None,
        }
    }
}
