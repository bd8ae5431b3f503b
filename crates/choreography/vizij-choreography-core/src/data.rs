//! Pose data model: points, per-part pose sets and the authoring sheet.

use std::fmt;
use std::marker::PhantomData;

use indexmap::IndexMap;
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ChoreographyError;

/// 3D point used for part positions.
/// Deserializes from either `{ "x": .., "y": .., "z": .. }` or `[x, y, z]`.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(from = "Vec3Repr")]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Vec3Repr {
    Array([f32; 3]),
    Object { x: f32, y: f32, z: f32 },
}

impl From<Vec3Repr> for Vec3 {
    fn from(repr: Vec3Repr) -> Self {
        match repr {
            Vec3Repr::Array([x, y, z]) => Vec3 { x, y, z },
            Vec3Repr::Object { x, y, z } => Vec3 { x, y, z },
        }
    }
}

impl Vec3 {
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl From<[f32; 3]> for Vec3 {
    fn from([x, y, z]: [f32; 3]) -> Self {
        Vec3 { x, y, z }
    }
}

/// Which of a part's three stored positions to read.
#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PoseSlot {
    Scattered,
    A,
    B,
}

/// Everything the table knows about one part.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PartPoses {
    pub name: String,
    pub scattered: Vec3,
    pub pose_a: Vec3,
    pub pose_b: Vec3,
    /// Progress value in [0,1) at which this part starts moving.
    pub start_offset: f32,
}

impl PartPoses {
    #[inline]
    pub fn position(&self, slot: PoseSlot) -> Vec3 {
        match slot {
            PoseSlot::Scattered => self.scattered,
            PoseSlot::A => self.pose_a,
            PoseSlot::B => self.pose_b,
        }
    }
}

/// Display names for the two poses (e.g. "robot" / "vehicle").
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PoseLabels {
    pub a: String,
    pub b: String,
}

impl Default for PoseLabels {
    fn default() -> Self {
        Self {
            a: "pose_a".into(),
            b: "pose_b".into(),
        }
    }
}

/// Authoring form of a pose table: one map per pose plus the timing map.
/// Key order of `scattered` defines the part declaration order.
/// A part name repeated inside one map is rejected when deserializing.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "RawPoseSheet")]
pub struct PoseSheet {
    #[serde(default)]
    pub labels: PoseLabels,
    pub scattered: IndexMap<String, Vec3>,
    pub pose_a: IndexMap<String, Vec3>,
    pub pose_b: IndexMap<String, Vec3>,
    pub start_offsets: IndexMap<String, f32>,
}

/// Sheet as written, with every map entry kept in order, duplicates included.
#[derive(Deserialize)]
pub(crate) struct RawPoseSheet {
    #[serde(default)]
    labels: PoseLabels,
    scattered: Entries<Vec3>,
    pose_a: Entries<Vec3>,
    pose_b: Entries<Vec3>,
    start_offsets: Entries<f32>,
}

impl TryFrom<RawPoseSheet> for PoseSheet {
    type Error = ChoreographyError;

    fn try_from(raw: RawPoseSheet) -> Result<Self, Self::Error> {
        Ok(PoseSheet {
            labels: raw.labels,
            scattered: raw.scattered.into_map("scattered")?,
            pose_a: raw.pose_a.into_map("pose_a")?,
            pose_b: raw.pose_b.into_map("pose_b")?,
            start_offsets: raw.start_offsets.into_map("start_offsets")?,
        })
    }
}

struct Entries<V>(Vec<(String, V)>);

impl<V> Entries<V> {
    fn into_map(self, table: &str) -> Result<IndexMap<String, V>, ChoreographyError> {
        let mut map = IndexMap::with_capacity(self.0.len());
        for (part, value) in self.0 {
            if map.contains_key(&part) {
                return Err(ChoreographyError::DuplicatePart {
                    part,
                    table: table.to_string(),
                });
            }
            map.insert(part, value);
        }
        Ok(map)
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for Entries<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntriesVisitor<V>(PhantomData<V>);

        impl<'de, V: Deserialize<'de>> Visitor<'de> for EntriesVisitor<V> {
            type Value = Entries<V>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map keyed by part name")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some(entry) = access.next_entry::<String, V>()? {
                    entries.push(entry);
                }
                Ok(Entries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor(PhantomData))
    }
}
