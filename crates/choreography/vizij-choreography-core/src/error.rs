//! Error types for the choreography core

use serde::{Deserialize, Serialize};

/// Errors raised while building pose tables, validating configuration or
/// parsing host-supplied names.
///
/// Queries against an already built [`PoseTable`](crate::PoseTable) do not
/// return this type: an unknown part at query time is a programming error
/// and panics.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ChoreographyError {
    /// Part declared in `scattered` but absent from another map
    #[error("Part '{part}' is missing from {table}")]
    MissingPart { part: String, table: String },

    /// Part present in a pose or timing map but never declared in `scattered`
    #[error("Part '{part}' in {table} is not declared in scattered")]
    UnknownPart { part: String, table: String },

    /// Same part name listed twice in one map
    #[error("Part '{part}' appears more than once in {table}")]
    DuplicatePart { part: String, table: String },

    /// Start offset outside [0, 1)
    #[error("Start offset {offset} for part '{part}' is outside [0, 1)")]
    OffsetOutOfRange { part: String, offset: f32 },

    /// NaN or infinite coordinate/offset
    #[error("Non-finite value in {table} for part '{part}'")]
    NonFinite { part: String, table: String },

    /// Sheet without any parts
    #[error("Pose table has no parts")]
    EmptyTable,

    /// Configuration value rejected by validation
    #[error("Invalid config: {reason}")]
    InvalidConfig { reason: String },

    /// Unrecognised animation state name
    #[error("Unknown animation state: {name}")]
    UnknownState { name: String },

    /// Serialization error
    #[error("Serialization error: {reason}")]
    Json { reason: String },
}

impl ChoreographyError {
    /// Get error category for logging
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::MissingPart { .. }
            | Self::UnknownPart { .. }
            | Self::DuplicatePart { .. }
            | Self::OffsetOutOfRange { .. }
            | Self::NonFinite { .. }
            | Self::EmptyTable => "table",
            Self::InvalidConfig { .. } => "config",
            Self::UnknownState { .. } => "state",
            Self::Json { .. } => "serialization",
        }
    }
}

impl From<serde_json::Error> for ChoreographyError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json {
            reason: err.to_string(),
        }
    }
}
