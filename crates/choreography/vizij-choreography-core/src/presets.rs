//! Built-in pose tables.

use crate::data::{PoseLabels, PoseSheet, Vec3};
use crate::pose_table::PoseTable;

type Row = (&'static str, [f32; 3], [f32; 3], [f32; 3], f32);

// name, scattered, robot, vehicle, start offset
const TRANSFORMER: &[Row] = &[
    // Head
    ("head", [0.0, 25.0, 0.0], [0.0, 2.3, 0.0], [0.0, 0.8, 1.8], 0.0),
    ("helmet", [0.0, 30.0, 0.0], [0.0, 2.6, 0.0], [0.0, 0.9, 1.7], 0.02),
    ("faceplate", [0.0, 20.0, 5.0], [0.0, 2.3, 0.4], [0.0, 0.8, 2.0], 0.04),
    ("eyes", [-15.0, 0.1, 10.0], [0.0, 2.35, 0.45], [0.0, 0.8, 2.1], 0.06),
    // Torso
    ("chest", [0.0, 20.0, 0.0], [0.0, 1.5, 0.0], [0.0, 0.0, 1.0], 0.08),
    ("chestMatrix", [0.0, 25.0, 2.0], [0.0, 1.7, 0.3], [0.0, 0.1, 1.3], 0.1),
    ("abdomen", [0.0, 15.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 0.5], 0.12),
    ("waist", [0.0, 10.0, 0.0], [0.0, 0.5, 0.0], [0.0, 0.0, 0.0], 0.14),
    // Arms
    ("leftShoulder", [-30.0, 1.0, 0.0], [-1.8, 1.8, 0.0], [-1.2, 0.2, 1.0], 0.16),
    ("rightShoulder", [30.0, 1.0, 0.0], [1.8, 1.8, 0.0], [1.2, 0.2, 1.0], 0.16),
    ("leftUpperArm", [-25.0, 1.0, 0.0], [-2.2, 1.2, 0.0], [-1.5, 0.0, 0.5], 0.18),
    ("rightUpperArm", [25.0, 1.0, 0.0], [2.2, 1.2, 0.0], [1.5, 0.0, 0.5], 0.18),
    ("leftForearm", [-20.0, 1.0, 0.0], [-2.2, 0.6, 0.0], [-1.5, 0.0, 0.0], 0.2),
    ("rightForearm", [20.0, 1.0, 0.0], [2.2, 0.6, 0.0], [1.5, 0.0, 0.0], 0.2),
    ("leftHand", [-15.0, 1.0, 0.0], [-2.2, 0.1, 0.0], [-1.5, 0.0, -0.5], 0.22),
    ("rightHand", [15.0, 1.0, 0.0], [2.2, 0.1, 0.0], [1.5, 0.0, -0.5], 0.22),
    // Legs
    ("leftThigh", [-20.0, -10.0, 0.0], [-0.6, -0.3, 0.0], [-0.8, 0.0, -1.0], 0.24),
    ("rightThigh", [20.0, -10.0, 0.0], [0.6, -0.3, 0.0], [0.8, 0.0, -1.0], 0.24),
    ("leftShin", [-25.0, -15.0, 0.0], [-0.6, -1.2, 0.0], [-0.8, 0.0, -1.8], 0.26),
    ("rightShin", [25.0, -15.0, 0.0], [0.6, -1.2, 0.0], [0.8, 0.0, -1.8], 0.26),
    ("leftFoot", [-30.0, -20.0, 0.0], [-0.6, -2.0, 0.2], [-0.8, 0.0, -2.5], 0.28),
    ("rightFoot", [30.0, -20.0, 0.0], [0.6, -2.0, 0.2], [0.8, 0.0, -2.5], 0.28),
    // Vehicle body, tucked away in robot mode
    ("frontGrill", [0.0, 0.0, 25.0], [0.0, 1.5, 0.2], [0.0, 0.3, 2.8], 0.3),
    ("frontBumper", [0.0, -5.0, 20.0], [0.0, 1.3, 0.25], [0.0, 0.1, 2.9], 0.32),
    ("windshield", [0.0, 15.0, 15.0], [0.0, 2.0, -0.2], [0.0, 0.8, 2.2], 0.34),
    ("cabin", [0.0, 10.0, 10.0], [0.0, 1.8, -0.1], [0.0, 0.5, 2.0], 0.36),
    ("trailer", [0.0, 5.0, -20.0], [0.0, 0.5, -0.8], [0.0, 0.2, -2.5], 0.38),
    ("leftWheel1", [-20.0, -5.0, 15.0], [-0.8, 0.3, -0.5], [-1.2, -0.5, 2.2], 0.4),
    ("rightWheel1", [20.0, -5.0, 15.0], [0.8, 0.3, -0.5], [1.2, -0.5, 2.2], 0.4),
    ("leftWheel2", [-20.0, -5.0, -15.0], [-0.8, -1.0, -0.5], [-1.2, -0.5, -2.2], 0.42),
    ("rightWheel2", [20.0, -5.0, -15.0], [0.8, -1.0, -0.5], [1.2, -0.5, -2.2], 0.42),
    ("smokeStack1", [-15.0, 20.0, 5.0], [-0.3, 2.8, -0.3], [-0.6, 1.5, 1.5], 0.44),
    ("smokeStack2", [15.0, 20.0, 5.0], [0.3, 2.8, -0.3], [0.6, 1.5, 1.5], 0.44),
];

fn sheet_from_rows(labels: PoseLabels, rows: &[Row]) -> PoseSheet {
    let mut sheet = PoseSheet {
        labels,
        ..PoseSheet::default()
    };
    for &(name, scattered, a, b, offset) in rows {
        sheet.scattered.insert(name.into(), Vec3::from(scattered));
        sheet.pose_a.insert(name.into(), Vec3::from(a));
        sheet.pose_b.insert(name.into(), Vec3::from(b));
        sheet.start_offsets.insert(name.into(), offset);
    }
    sheet
}

/// Sheet for the 33-part robot / vehicle transformer.
pub fn transformer_sheet() -> PoseSheet {
    sheet_from_rows(
        PoseLabels {
            a: "robot".into(),
            b: "vehicle".into(),
        },
        TRANSFORMER,
    )
}

/// The 33-part robot / vehicle transformer. Pose A is the robot.
pub fn transformer() -> PoseTable {
    match PoseTable::from_sheet(transformer_sheet()) {
        Ok(table) => table,
        // Static data; covered by the presets tests.
        Err(e) => panic!("built-in transformer table is invalid: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::PoseSlot;

    #[test]
    fn transformer_is_complete() {
        let table = transformer();
        assert_eq!(table.len(), 33);
        assert_eq!(table.labels().a, "robot");
        assert_eq!(table.all_parts().next(), Some("head"));
        assert_eq!(table.all_parts().last(), Some("smokeStack2"));
    }

    #[test]
    fn transformer_windows_end_before_full_progress() {
        let table = transformer();
        for p in table.iter() {
            assert!(p.start_offset + 0.2 <= 1.0, "{} ends late", p.name);
        }
    }

    #[test]
    fn transformer_offsets_follow_declaration_order() {
        let table = transformer();
        let offsets: Vec<f32> = table.iter().map(|p| p.start_offset).collect();
        assert!(offsets.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn transformer_positions() {
        let table = transformer();
        assert_eq!(
            table.position_of("cabin", PoseSlot::B),
            Vec3::new(0.0, 0.5, 2.0)
        );
        assert_eq!(
            table.position_of("eyes", PoseSlot::Scattered),
            Vec3::new(-15.0, 0.1, 10.0)
        );
    }
}
