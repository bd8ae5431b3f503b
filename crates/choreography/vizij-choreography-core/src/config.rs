//! Core configuration for vizij-choreography-core.

use serde::{Deserialize, Serialize};

use crate::error::ChoreographyError;
use crate::sampling::DEFAULT_PART_WINDOW;
use crate::state::{ActivePose, AnimationState};

/// Timing, scale and entry-state settings for a choreographer.
/// Every field has a default, so hosts may pass a partial JSON object.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChoreographyConfig {
    /// Progress gained per second at speed multiplier 1.
    pub base_assembly_speed: f32,
    /// Radians gained per second at speed multiplier 1.
    pub base_rotation_speed: f32,
    /// Real-time pause between a finished rotation and the next assembly.
    /// Not scaled by the speed multiplier.
    pub restart_delay_ms: u64,
    /// Width of each part's motion window in progress units.
    pub part_window: f32,
    /// Group scale while assembling, rotating or paused.
    pub active_scale: f32,
    /// Group scale at rest in Idle.
    pub idle_scale: f32,
    /// Toggle the active pose on every restart. When false the loop keeps
    /// re-assembling the same pose.
    pub auto_transform: bool,
    pub initial_state: AnimationState,
    pub initial_pose: ActivePose,
}

impl Default for ChoreographyConfig {
    fn default() -> Self {
        Self {
            base_assembly_speed: 0.25,
            base_rotation_speed: 0.25,
            restart_delay_ms: 1000,
            part_window: DEFAULT_PART_WINDOW,
            active_scale: 1.2,
            idle_scale: 0.8,
            auto_transform: true,
            initial_state: AnimationState::AssemblingLoop,
            initial_pose: ActivePose::A,
        }
    }
}

impl ChoreographyConfig {
    pub fn validate(&self) -> Result<(), ChoreographyError> {
        let positive = |name: &str, v: f32| {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(ChoreographyError::InvalidConfig {
                    reason: format!("{name} must be finite and > 0, got {v}"),
                })
            }
        };
        positive("base_assembly_speed", self.base_assembly_speed)?;
        positive("base_rotation_speed", self.base_rotation_speed)?;
        positive("active_scale", self.active_scale)?;
        positive("idle_scale", self.idle_scale)?;
        if !(self.part_window.is_finite() && self.part_window > 0.0 && self.part_window <= 1.0) {
            return Err(ChoreographyError::InvalidConfig {
                reason: format!("part_window must be in (0, 1], got {}", self.part_window),
            });
        }
        Ok(())
    }
}
