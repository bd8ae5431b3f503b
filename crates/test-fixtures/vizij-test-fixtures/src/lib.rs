use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde::Deserialize;

static MANIFEST: Lazy<Manifest> = Lazy::new(|| {
    let raw = include_str!("../../../../fixtures/manifest.json");
    serde_json::from_str(raw).expect("fixtures manifest should parse")
});

#[derive(Debug, Deserialize)]
struct Manifest {
    #[serde(rename = "pose-sheets")]
    pose_sheets: HashMap<String, PoseSheetEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PoseSheetEntry {
    Path(String),
    Detailed {
        path: String,
        #[serde(default)]
        invalid: bool,
    },
}

impl PoseSheetEntry {
    fn as_path(&self) -> &str {
        match self {
            PoseSheetEntry::Path(path) => path,
            PoseSheetEntry::Detailed { path, .. } => path,
        }
    }

    fn is_invalid(&self) -> bool {
        matches!(self, PoseSheetEntry::Detailed { invalid: true, .. })
    }
}

fn fixtures_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../../fixtures")
}

fn resolve_path(rel: &str) -> PathBuf {
    fixtures_root().join(rel)
}

fn read_to_string(rel: &str) -> Result<String> {
    let path = resolve_path(rel);
    fs::read_to_string(&path)
        .with_context(|| format!("failed to read fixture at {}", path.display()))
}

fn load_json<T: DeserializeOwned>(rel: &str) -> Result<T> {
    let text = read_to_string(rel)?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse JSON fixture {rel}"))
}

fn lookup<'a, T>(map: &'a HashMap<String, T>, kind: &str, name: &str) -> Result<&'a T> {
    map.get(name)
        .ok_or_else(|| anyhow!("unknown {kind} fixture '{name}'"))
}

pub mod pose_sheets {
    use super::*;

    /// Every registered sheet, sorted for stable iteration.
    pub fn keys() -> Vec<String> {
        let mut keys: Vec<String> = MANIFEST.pose_sheets.keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Sheets that are expected to load successfully.
    pub fn valid_keys() -> Vec<String> {
        keys()
            .into_iter()
            .filter(|k| !MANIFEST.pose_sheets[k].is_invalid())
            .collect()
    }

    /// Sheets that are deliberately broken and must be rejected.
    pub fn invalid_keys() -> Vec<String> {
        keys()
            .into_iter()
            .filter(|k| MANIFEST.pose_sheets[k].is_invalid())
            .collect()
    }

    pub fn json(name: &str) -> Result<String> {
        let entry = lookup(&MANIFEST.pose_sheets, "pose sheet", name)?;
        read_to_string(entry.as_path())
    }

    pub fn load<T: DeserializeOwned>(name: &str) -> Result<T> {
        let entry = lookup(&MANIFEST.pose_sheets, "pose sheet", name)?;
        super::load_json(entry.as_path())
    }

    pub fn path(name: &str) -> Result<PathBuf> {
        let entry = lookup(&MANIFEST.pose_sheets, "pose sheet", name)?;
        Ok(resolve_path(entry.as_path()))
    }
}
