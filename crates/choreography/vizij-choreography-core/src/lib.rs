//! Vizij Choreography Core (engine-agnostic)
//!
//! Drives a multi-part model through a looping assembly choreography:
//! scattered parts fly in and settle into pose A or pose B, the assembled
//! model rotates once, pauses, then the active pose toggles and the loop
//! starts over.
//!
//! The crate owns the pose data model ([`PoseTable`]), the staggered eased
//! sampling of part positions, and the [`Choreographer`] state machine with its
//! single cancellable restart timer. Rendering hosts (web/Bevy) consume
//! [`Frame`] and the per-tick [`Outputs`].

pub mod config;
pub mod data;
pub mod engine;
pub mod error;
pub mod ids;
pub mod interp;
pub mod outputs;
pub mod pose_table;
pub mod presets;
pub mod sampling;
pub mod state;
pub mod timer;

// Re-exports for consumers (adapters)
pub use config::ChoreographyConfig;
pub use data::{PartPoses, PoseLabels, PoseSheet, PoseSlot, Vec3};
pub use engine::Choreographer;
pub use error::ChoreographyError;
pub use ids::TimerHandle;
pub use outputs::{ChoreographyEvent, Frame, Outputs, PartTransform};
pub use pose_table::{PoseTable, PoseTableBuilder};
pub use sampling::sample_part;
pub use state::{ActivePose, AnimationState, ChoreographerSnapshot};
pub use timer::{Clock, ManualClock, RestartScheduler, SystemClock};
