//! Cube plugin
//!
//! Registers the cube resources and the per-frame systems that keep the
//! scene in step with the shared viewer session.

use bevy::prelude::*;

use crate::bevy::resources::{ActiveRotation, AnimationSpeed, AppliedRevision, SessionRes};
use crate::bevy::systems::{
    apply_session_changes, drive_rotation, start_pending_rotation, sync_cubie_transforms,
};
use crate::cube::CubieRegistry;
use crate::tauri_bridge::shared_state::SharedSession;

pub struct CubePlugin {
    pub session: SharedSession,
    pub speed: f32,
}

impl Plugin for CubePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(SessionRes(self.session.clone()))
            .insert_resource(AnimationSpeed(self.speed))
            .init_resource::<AppliedRevision>()
            .init_resource::<ActiveRotation>()
            .init_resource::<CubieRegistry>()
            .add_systems(
                Update,
                (
                    apply_session_changes,
                    start_pending_rotation,
                    drive_rotation,
                    sync_cubie_transforms,
                )
                    .chain(),
            );
    }
}
