//! Bevy systems
//!
//! This module contains all the systems that operate on the cube scene
//! and its resources in the Bevy ECS.

pub mod animation;
pub mod camera;
pub mod frame_extraction;
pub mod scene;

pub use animation::{
    apply_session_changes, drive_rotation, start_pending_rotation, sync_cubie_transforms,
};
pub use camera::update_camera_from_input;
pub use frame_extraction::extract_and_process_frame;
pub use scene::setup_scene;
