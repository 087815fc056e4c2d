//! Registry of cubie transforms
//!
//! Every cubie's placement is owned here, keyed by its stable position id.
//! Animation steps mutate the registry; the scene copies it onto the
//! rendered entities once per frame.

use std::collections::BTreeMap;

use bevy::prelude::*;

use super::position::CubiePosition;

#[derive(Resource, Debug, Clone)]
pub struct CubieRegistry {
    transforms: BTreeMap<CubiePosition, Transform>,
}

impl CubieRegistry {
    /// Every cubie at its home offset with no rotation
    pub fn new() -> Self {
        Self {
            transforms: CubiePosition::ALL
                .into_iter()
                .map(|position| (position, Transform::from_translation(position.home())))
                .collect(),
        }
    }

    /// Put every cubie back at its home offset
    pub fn reset(&mut self) {
        for (position, transform) in self.transforms.iter_mut() {
            *transform = Transform::from_translation(position.home());
        }
    }

    pub fn get(&self, position: CubiePosition) -> Option<&Transform> {
        self.transforms.get(&position)
    }

    pub fn get_mut(&mut self, position: CubiePosition) -> Option<&mut Transform> {
        self.transforms.get_mut(&position)
    }

    pub fn contains(&self, position: CubiePosition) -> bool {
        self.transforms.contains_key(&position)
    }

    pub fn iter(&self) -> impl Iterator<Item = (CubiePosition, &Transform)> {
        self.transforms.iter().map(|(p, t)| (*p, t))
    }

    /// Whether every cubie sits at its home offset, unrotated
    pub fn is_at_rest(&self) -> bool {
        self.transforms.iter().all(|(position, transform)| {
            transform.translation.abs_diff_eq(position.home(), 1e-5)
                && transform.rotation.abs_diff_eq(Quat::IDENTITY, 1e-5)
        })
    }
}

impl Default for CubieRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_registry_is_at_rest() {
        let registry = CubieRegistry::new();
        assert_eq!(registry.iter().count(), 26);
        assert!(registry.is_at_rest());
    }

    #[test]
    fn reset_is_idempotent() {
        let mut registry = CubieRegistry::new();
        if let Some(transform) = registry.get_mut(CubiePosition::URF) {
            transform.rotate_around(Vec3::ZERO, Quat::from_rotation_y(0.3));
        }
        assert!(!registry.is_at_rest());

        registry.reset();
        assert!(registry.is_at_rest());
        registry.reset();
        assert!(registry.is_at_rest());
    }
}
