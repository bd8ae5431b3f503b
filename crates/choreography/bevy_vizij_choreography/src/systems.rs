use bevy::prelude::*;
use bevy::utils::HashSet;

use crate::components::{ChoreographyPart, ChoreographyRoot};
use crate::{AssemblyCompleted, ChoreographyEngine, ChoreographySpeed};
use vizij_choreography_core::ChoreographyEvent;

/// Advance the engine by this frame's delta and forward completion events.
pub fn tick_choreography(
    time: Res<Time>,
    speed: Res<ChoreographySpeed>,
    mut engine: NonSendMut<ChoreographyEngine>,
    mut completed: EventWriter<AssemblyCompleted>,
) {
    let out = engine.0.advance(time.delta_seconds(), speed.0);
    for event in &out.events {
        match event {
            ChoreographyEvent::AssemblyComplete { final_state } => {
                completed.send(AssemblyCompleted {
                    final_state: *final_state,
                });
            }
            other => debug!("choreography event: {other:?}"),
        }
    }
}

/// Write the current frame into root and part transforms.
pub fn apply_frame(
    engine: NonSend<ChoreographyEngine>,
    mut roots: Query<&mut Transform, (With<ChoreographyRoot>, Without<ChoreographyPart>)>,
    mut parts: Query<(Entity, &ChoreographyPart, &mut Transform), Without<ChoreographyRoot>>,
    mut warned: Local<HashSet<Entity>>,
) {
    let core = &engine.0;

    let scale = core.current_scale();
    let rotation = core.current_rotation();
    for mut tf in roots.iter_mut() {
        tf.scale = Vec3::splat(scale);
        tf.rotation = Quat::from_rotation_y(rotation);
    }

    for (entity, part, mut tf) in parts.iter_mut() {
        if !core.table().contains(&part.0) {
            if warned.insert(entity) {
                warn!("choreography part '{}' is not in the pose table", part.0);
            }
            continue;
        }
        let [x, y, z] = core.position_of(&part.0).to_array();
        tf.translation = Vec3::new(x, y, z);
    }
}
