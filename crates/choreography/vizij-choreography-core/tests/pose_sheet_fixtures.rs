use vizij_choreography_core::{
    ActivePose, AnimationState, Choreographer, ChoreographyConfig, ChoreographyError, ManualClock,
    PoseSheet, PoseSlot, PoseTable, Vec3,
};
use vizij_test_fixtures::pose_sheets;

/// it should load every valid fixture sheet through the JSON entry point
#[test]
fn valid_sheets_load() {
    for key in pose_sheets::valid_keys() {
        let json = pose_sheets::json(&key).unwrap();
        let table = PoseTable::from_json(&json)
            .unwrap_or_else(|e| panic!("fixture {key} should load: {e}"));
        assert!(!table.is_empty());
    }
}

/// it should reject every fixture flagged invalid in the manifest
#[test]
fn invalid_sheets_are_rejected() {
    for key in pose_sheets::invalid_keys() {
        let json = pose_sheets::json(&key).unwrap();
        let err = PoseTable::from_json(&json).expect_err(&key);
        assert_eq!(err.category(), "table", "{key}: {err}");
    }
}

#[test]
fn missing_pose_entry_names_the_part() {
    let sheet: PoseSheet = pose_sheets::load("missing-pose-b").unwrap();
    assert_eq!(
        PoseTable::from_sheet(sheet).unwrap_err(),
        ChoreographyError::MissingPart {
            part: "mast".into(),
            table: "pose_b".into(),
        }
    );
}

#[test]
fn mini_crane_keeps_order_labels_and_mixed_point_forms() {
    let table = PoseTable::from_json(&pose_sheets::json("mini-crane").unwrap()).unwrap();
    let names: Vec<&str> = table.all_parts().collect();
    assert_eq!(names, vec!["base", "mast", "boom", "hook"]);
    assert_eq!(table.labels().a, "crane");
    assert_eq!(
        table.position_of("mast", PoseSlot::Scattered),
        Vec3::new(0.0, 20.0, 0.0)
    );
    assert_eq!(table.start_offset_of("hook"), 0.5);
}

#[test]
fn malformed_json_is_a_serialization_error() {
    let err = PoseTable::from_json("{ \"scattered\": ").unwrap_err();
    assert_eq!(err.category(), "serialization");
}

/// it should still land late parts when the pass reaches full progress
#[test]
fn late_offset_part_settles_at_end_of_pass() {
    let table = PoseTable::from_json(&pose_sheets::json("late-offsets").unwrap()).unwrap();
    let mut c =
        Choreographer::with_clock(table, ChoreographyConfig::default(), ManualClock::new())
            .unwrap();

    // progress 0.95: "flag" (offset 0.9) is mid-flight
    c.advance(3.8, 1.0);
    assert_eq!(c.current_state(), AnimationState::AssemblingLoop);
    assert_ne!(c.position_of("flag"), Vec3::new(0.0, 2.0, 0.0));

    c.advance(0.2, 1.0);
    assert_eq!(c.current_state(), AnimationState::Rotating);
    assert_eq!(c.position_of("flag"), Vec3::new(0.0, 2.0, 0.0));
    assert_eq!(c.active_pose(), ActivePose::A);
}

/// it should refuse a sheet that lists the same part twice instead of keeping the last entry
#[test]
fn repeated_part_key_is_a_table_error() {
    let err = PoseTable::from_json(&pose_sheets::json("duplicate-part").unwrap()).unwrap_err();
    assert_eq!(
        err,
        ChoreographyError::DuplicatePart {
            part: "base".into(),
            table: "scattered".into(),
        }
    );
    assert_eq!(err.category(), "table");
}
