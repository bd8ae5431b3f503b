use std::sync::Arc;

use bevy::prelude::*;
use vizij_choreography_core::{
    presets, AnimationState, Choreographer, ChoreographyConfig, PoseTable,
};

pub mod components;
pub mod systems;

pub use components::{ChoreographyPart, ChoreographyRoot};

/// Non-send resource owning the choreographer. The completion listener is a
/// plain boxed closure, so the engine stays on the main thread.
pub struct ChoreographyEngine(pub Choreographer);

/// Multiplier applied to `Time` delta before it reaches the engine.
#[derive(Resource, Debug, Clone, Copy)]
pub struct ChoreographySpeed(pub f32);

impl Default for ChoreographySpeed {
    fn default() -> Self {
        Self(1.0)
    }
}

/// Sent when an `AssemblingTransition` pass lands.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssemblyCompleted {
    pub final_state: AnimationState,
}

pub struct VizijChoreographyPlugin {
    pub config: ChoreographyConfig,
    /// Pose table to drive; the transformer preset when `None`.
    pub table: Option<Arc<PoseTable>>,
}

impl Default for VizijChoreographyPlugin {
    fn default() -> Self {
        Self {
            config: ChoreographyConfig::default(),
            table: None,
        }
    }
}

impl VizijChoreographyPlugin {
    pub fn with_table(table: PoseTable) -> Self {
        Self {
            table: Some(Arc::new(table)),
            ..Self::default()
        }
    }
}

impl Plugin for VizijChoreographyPlugin {
    fn build(&self, app: &mut App) {
        let table = self
            .table
            .clone()
            .unwrap_or_else(|| Arc::new(presets::transformer()));
        let engine = match Choreographer::new(table, self.config.clone()) {
            Ok(engine) => engine,
            Err(e) => {
                error!("vizij choreography disabled: {e}");
                return;
            }
        };

        app.insert_non_send_resource(ChoreographyEngine(engine))
            .init_resource::<ChoreographySpeed>()
            .add_event::<AssemblyCompleted>()
            .add_systems(
                Update,
                (systems::tick_choreography, systems::apply_frame).chain(),
            );
    }
}
