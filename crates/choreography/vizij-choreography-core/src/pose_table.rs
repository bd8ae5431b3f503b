//! Immutable registry of parts and their scattered / pose A / pose B positions.

use indexmap::IndexMap;

use crate::data::{PartPoses, PoseLabels, PoseSheet, PoseSlot, RawPoseSheet, Vec3};
use crate::error::ChoreographyError;
use crate::state::ActivePose;

/// Tolerance when checking that a part's motion window ends by progress 1.0.
const WINDOW_EPS: f32 = 1e-4;

/// Validated, immutable pose table.
///
/// Parts keep their declaration order; `all_parts()` is deterministic.
/// Lookups for parts that were never declared panic: the part set is fixed
/// when the table is built, so a miss means the caller's part list is broken.
#[derive(Clone, Debug, PartialEq)]
pub struct PoseTable {
    labels: PoseLabels,
    parts: IndexMap<String, PartPoses>,
}

impl PoseTable {
    pub fn builder() -> PoseTableBuilder {
        PoseTableBuilder::default()
    }

    /// Validate a sheet into a table.
    pub fn from_sheet(sheet: PoseSheet) -> Result<Self, ChoreographyError> {
        let PoseSheet {
            labels,
            scattered,
            pose_a,
            pose_b,
            start_offsets,
        } = sheet;

        if scattered.is_empty() {
            return Err(ChoreographyError::EmptyTable);
        }

        check_declared(&scattered, &pose_a, "pose_a")?;
        check_declared(&scattered, &pose_b, "pose_b")?;
        check_declared(&scattered, &start_offsets, "start_offsets")?;

        let mut parts = IndexMap::with_capacity(scattered.len());
        for (name, start) in scattered {
            let a = lookup_point(&pose_a, &name, "pose_a")?;
            let b = lookup_point(&pose_b, &name, "pose_b")?;
            check_finite(start, &name, "scattered")?;

            let offset = *start_offsets
                .get(&name)
                .ok_or_else(|| ChoreographyError::MissingPart {
                    part: name.clone(),
                    table: "start_offsets".into(),
                })?;
            if !offset.is_finite() {
                return Err(ChoreographyError::NonFinite {
                    part: name,
                    table: "start_offsets".into(),
                });
            }
            if !(0.0..1.0).contains(&offset) {
                return Err(ChoreographyError::OffsetOutOfRange { part: name, offset });
            }

            parts.insert(
                name.clone(),
                PartPoses {
                    name,
                    scattered: start,
                    pose_a: a,
                    pose_b: b,
                    start_offset: offset,
                },
            );
        }

        Ok(Self { labels, parts })
    }

    /// Parse a JSON pose sheet and validate it.
    pub fn from_json(json: &str) -> Result<Self, ChoreographyError> {
        let raw: RawPoseSheet = serde_json::from_str(json)?;
        Self::from_sheet(PoseSheet::try_from(raw)?)
    }

    /// Convert back into the authoring form.
    pub fn to_sheet(&self) -> PoseSheet {
        let mut sheet = PoseSheet {
            labels: self.labels.clone(),
            ..PoseSheet::default()
        };
        for p in self.parts.values() {
            sheet.scattered.insert(p.name.clone(), p.scattered);
            sheet.pose_a.insert(p.name.clone(), p.pose_a);
            sheet.pose_b.insert(p.name.clone(), p.pose_b);
            sheet.start_offsets.insert(p.name.clone(), p.start_offset);
        }
        sheet
    }

    #[inline]
    pub fn labels(&self) -> &PoseLabels {
        &self.labels
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    #[inline]
    pub fn contains(&self, part: &str) -> bool {
        self.parts.contains_key(part)
    }

    /// Non-panicking lookup.
    #[inline]
    pub fn get(&self, part: &str) -> Option<&PartPoses> {
        self.parts.get(part)
    }

    /// Lookup that treats an unknown part as a programming error.
    pub fn part(&self, part: &str) -> &PartPoses {
        match self.parts.get(part) {
            Some(p) => p,
            None => panic!("unknown part '{part}' in pose table"),
        }
    }

    pub fn position_of(&self, part: &str, slot: PoseSlot) -> Vec3 {
        self.part(part).position(slot)
    }

    pub fn start_offset_of(&self, part: &str) -> f32 {
        self.part(part).start_offset
    }

    /// Final resting position of a part for the given pose.
    pub fn resting(&self, part: &str, pose: ActivePose) -> Vec3 {
        self.position_of(part, pose.slot())
    }

    /// Part names in declaration order.
    pub fn all_parts(&self) -> impl Iterator<Item = &str> + '_ {
        self.parts.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PartPoses> + '_ {
        self.parts.values()
    }

    /// Parts whose motion window of width `window` runs past progress 1.0.
    /// They still land, but only when the pass completes.
    pub fn late_parts(&self, window: f32) -> impl Iterator<Item = &PartPoses> + '_ {
        self.parts
            .values()
            .filter(move |p| p.start_offset + window > 1.0 + WINDOW_EPS)
    }
}

fn lookup_point(
    map: &IndexMap<String, Vec3>,
    part: &str,
    table: &str,
) -> Result<Vec3, ChoreographyError> {
    let point = *map.get(part).ok_or_else(|| ChoreographyError::MissingPart {
        part: part.to_string(),
        table: table.to_string(),
    })?;
    check_finite(point, part, table)?;
    Ok(point)
}

fn check_declared<V>(
    scattered: &IndexMap<String, Vec3>,
    map: &IndexMap<String, V>,
    table: &str,
) -> Result<(), ChoreographyError> {
    match map.keys().find(|k| !scattered.contains_key(k.as_str())) {
        Some(extra) => Err(ChoreographyError::UnknownPart {
            part: extra.clone(),
            table: table.to_string(),
        }),
        None => Ok(()),
    }
}

fn check_finite(point: Vec3, part: &str, table: &str) -> Result<(), ChoreographyError> {
    if point.is_finite() {
        Ok(())
    } else {
        Err(ChoreographyError::NonFinite {
            part: part.to_string(),
            table: table.to_string(),
        })
    }
}

/// Programmatic construction; validated through the same path as sheets.
#[derive(Debug, Default)]
pub struct PoseTableBuilder {
    sheet: PoseSheet,
}

impl PoseTableBuilder {
    pub fn labels(mut self, a: impl Into<String>, b: impl Into<String>) -> Self {
        self.sheet.labels = PoseLabels {
            a: a.into(),
            b: b.into(),
        };
        self
    }

    pub fn part(
        mut self,
        name: impl Into<String>,
        scattered: [f32; 3],
        pose_a: [f32; 3],
        pose_b: [f32; 3],
        start_offset: f32,
    ) -> Self {
        let name = name.into();
        self.sheet.scattered.insert(name.clone(), scattered.into());
        self.sheet.pose_a.insert(name.clone(), pose_a.into());
        self.sheet.pose_b.insert(name.clone(), pose_b.into());
        self.sheet.start_offsets.insert(name, start_offset);
        self
    }

    pub fn build(self) -> Result<PoseTable, ChoreographyError> {
        PoseTable::from_sheet(self.sheet)
    }
}
