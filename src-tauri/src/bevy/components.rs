//! Bevy component definitions
//!
//! This module contains all component markers and data structures used
//! to tag and identify entities in the Bevy ECS (Entity Component System).

use bevy::prelude::*;

use crate::cube::CubiePosition;

/// Marker component for the offscreen rendering camera
///
/// Entities with this component are cameras that render to an offscreen
/// texture instead of a window.
#[derive(Component)]
pub struct OffscreenCamera;

/// Marker component for cameras that can be controlled by user input
///
/// Entities with this component will respond to mouse input for
/// orbit camera control (rotation, zoom).
#[derive(Component)]
pub struct CameraController;

/// One cubie of the puzzle
///
/// Its `Transform` mirrors the entry for `position` in the cubie registry.
#[derive(Component, Debug, Clone, Copy)]
pub struct Cubie {
    pub position: CubiePosition,
}

/// A sticker on a cubie, child of the cubie entity
///
/// `slot` indexes the cubie's facelet table and always refers to an
/// occupied slot.
#[derive(Component, Debug, Clone, Copy)]
pub struct Sticker {
    pub position: CubiePosition,
    pub slot: usize,
}
