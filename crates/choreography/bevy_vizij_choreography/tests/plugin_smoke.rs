use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use bevy_vizij_choreography::{
    AssemblyCompleted, ChoreographyEngine, ChoreographyPart, ChoreographyRoot, ChoreographySpeed,
    VizijChoreographyPlugin,
};
use vizij_choreography_core::{AnimationState, ChoreographyConfig, PoseTable};
use vizij_test_fixtures::pose_sheets;

fn crane() -> PoseTable {
    PoseTable::from_json(&pose_sheets::json("mini-crane").unwrap()).unwrap()
}

/// 100 ms per frame at speed 10: one second of choreography time per update.
fn app_with(plugin: VizijChoreographyPlugin) -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .add_plugins(plugin)
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(100)))
        .insert_resource(ChoreographySpeed(10.0));
    app
}

fn state(app: &App) -> AnimationState {
    app.world()
        .get_non_send_resource::<ChoreographyEngine>()
        .unwrap()
        .0
        .current_state()
}

#[test]
fn plugin_inserts_engine_and_speed() {
    let mut app = App::new();
    // it should insert the engine and default speed when the plugin is added
    app.add_plugins(MinimalPlugins)
        .add_plugins(VizijChoreographyPlugin::default());

    let engine = app.world().get_non_send_resource::<ChoreographyEngine>();
    assert!(engine.is_some());
    assert_eq!(engine.unwrap().0.table().len(), 33);
    assert_eq!(app.world().resource::<ChoreographySpeed>().0, 1.0);
}

/// it should skip engine setup when the config is invalid
#[test]
fn invalid_config_disables_plugin() {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .add_plugins(VizijChoreographyPlugin {
            config: ChoreographyConfig {
                part_window: 0.0,
                ..Default::default()
            },
            table: None,
        });
    assert!(app
        .world()
        .get_non_send_resource::<ChoreographyEngine>()
        .is_none());
}

/// it should assemble, then write pose A translations and the active scale
#[test]
fn update_drives_part_and_root_transforms() {
    let mut app = app_with(VizijChoreographyPlugin::with_table(crane()));
    let root = app
        .world_mut()
        .spawn((ChoreographyRoot, Transform::default()))
        .id();
    let boom = app
        .world_mut()
        .spawn((ChoreographyPart::new("boom"), Transform::default()))
        .id();

    for _ in 0..6 {
        app.update();
    }
    assert_eq!(state(&app), AnimationState::Rotating);

    let boom_tf = app.world().get::<Transform>(boom).unwrap();
    assert_eq!(boom_tf.translation, Vec3::new(1.2, 3.0, 0.0));

    let root_tf = app.world().get::<Transform>(root).unwrap();
    assert_eq!(root_tf.scale, Vec3::splat(1.2));
    assert_ne!(root_tf.rotation, Quat::IDENTITY);
}

/// it should leave entities naming unknown parts untouched
#[test]
fn unknown_part_is_skipped() {
    let mut app = app_with(VizijChoreographyPlugin::with_table(crane()));
    let stray = app
        .world_mut()
        .spawn((
            ChoreographyPart::new("propeller"),
            Transform::from_xyz(9.0, 9.0, 9.0),
        ))
        .id();
    for _ in 0..3 {
        app.update();
    }
    assert_eq!(
        app.world().get::<Transform>(stray).unwrap().translation,
        Vec3::new(9.0, 9.0, 9.0)
    );
}

#[derive(Resource, Default)]
struct Completed(Vec<AssemblyCompleted>);

fn collect_completed(mut ev: EventReader<AssemblyCompleted>, mut seen: ResMut<Completed>) {
    seen.0.extend(ev.read().copied());
}

/// it should send AssemblyCompleted once when a transition pass lands in Idle
#[test]
fn transition_sends_assembly_completed() {
    let mut app = app_with(VizijChoreographyPlugin {
        config: ChoreographyConfig {
            initial_state: AnimationState::AssemblingTransition,
            ..Default::default()
        },
        table: Some(crane().into()),
    });
    app.init_resource::<Completed>().add_systems(
        Update,
        collect_completed.after(bevy_vizij_choreography::systems::tick_choreography),
    );
    let root = app
        .world_mut()
        .spawn((ChoreographyRoot, Transform::default()))
        .id();

    for _ in 0..10 {
        app.update();
    }

    assert_eq!(state(&app), AnimationState::Idle);
    assert_eq!(
        app.world().resource::<Completed>().0,
        vec![AssemblyCompleted {
            final_state: AnimationState::Idle
        }]
    );
    assert_eq!(
        app.world().get::<Transform>(root).unwrap().scale,
        Vec3::splat(0.8)
    );
}
