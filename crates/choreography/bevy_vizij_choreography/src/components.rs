use bevy::prelude::*;

/// Marker for the entity that carries the whole model. Its `Transform`
/// receives the group scale and the rotation about Y.
#[derive(Component, Debug, Default)]
pub struct ChoreographyRoot;

/// A model part, keyed by its name in the pose table. Its `Transform`
/// translation follows the part's interpolated position.
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct ChoreographyPart(pub String);

impl ChoreographyPart {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}
