//! Bevy resource definitions
//!
//! This module contains all global resources used by Bevy systems.
//! Resources are singleton data that can be accessed by any system.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use bevy::prelude::*;
use crossbeam_channel::{Receiver, Sender};

use crate::config::camera::{MAX_DISTANCE, MIN_DISTANCE, START_POSITION};
use crate::cube::{state::FaceletColour, PendingRotation, RotationAnimator};
use crate::tauri_bridge::shared_state::{
    SharedFrameBuffer, SharedMouseInput, SharedPerfStats, SharedSession,
};

// =============================================================================
// Camera Control
// =============================================================================

/// Orbit camera state in spherical coordinates
///
/// Input moves the `target_*` angles; the camera eases toward them every
/// frame.
#[derive(Resource)]
pub struct OrbitCameraState {
    /// Horizontal rotation angle (radians)
    pub yaw: f32,
    /// Vertical rotation angle (radians), clamped to avoid gimbal lock
    pub pitch: f32,
    pub target_yaw: f32,
    pub target_pitch: f32,
    /// Distance from the camera to the center point
    pub distance: f32,
    /// The point the camera orbits around
    pub center: Vec3,
}

impl OrbitCameraState {
    /// Orbit state placing the camera at `position`, looking at the origin
    pub fn looking_from(position: Vec3) -> Self {
        let distance = position.length().max(f32::EPSILON);
        let yaw = position.x.atan2(position.z);
        let pitch = (position.y / distance).asin();
        Self {
            yaw,
            pitch,
            target_yaw: yaw,
            target_pitch: pitch,
            distance: distance.clamp(MIN_DISTANCE, MAX_DISTANCE),
            center: Vec3::ZERO,
        }
    }

    /// Camera position for the current angles
    pub fn eye(&self) -> Vec3 {
        let x = self.distance * self.pitch.cos() * self.yaw.sin();
        let y = self.distance * self.pitch.sin();
        let z = self.distance * self.pitch.cos() * self.yaw.cos();
        self.center + Vec3::new(x, y, z)
    }
}

impl Default for OrbitCameraState {
    fn default() -> Self {
        Self::looking_from(Vec3::from_array(START_POSITION))
    }
}

/// Resource to hold shared mouse input in Bevy
#[derive(Resource)]
pub struct MouseInputRes(pub SharedMouseInput);

// =============================================================================
// Cube
// =============================================================================

/// Viewer session shared with the Tauri commands
#[derive(Resource, Clone)]
pub struct SessionRes(pub SharedSession);

/// Session revision currently shown by the scene
#[derive(Resource, Default)]
pub struct AppliedRevision(pub Option<u64>);

/// The face turn being animated, with the session entry it belongs to
#[derive(Resource, Default)]
pub struct ActiveRotation(pub Option<(RotationAnimator, PendingRotation)>);

/// Speed multiplier for face turns
#[derive(Resource)]
pub struct AnimationSpeed(pub f32);

/// One unlit material per sticker colour
#[derive(Resource)]
pub struct FaceletMaterials(pub HashMap<FaceletColour, Handle<StandardMaterial>>);

// =============================================================================
// Rendering
// =============================================================================

/// Handle to the offscreen render target texture
#[derive(Resource)]
pub struct RenderTargetHandle(pub Handle<Image>);

/// Shared frame buffer resource for Bevy
#[derive(Resource, Clone)]
pub struct FrameBufferRes(pub SharedFrameBuffer);

// =============================================================================
// Frame Management
// =============================================================================

/// Counter for total frames rendered
#[derive(Resource, Default)]
pub struct FrameCount(pub u32);

/// Number of pre-roll frames to skip before starting output
#[derive(Resource, Default)]
pub struct PreRollFrames(pub u32);

/// Frame rate limiter to control output FPS
#[derive(Resource)]
pub struct FrameRateLimiter {
    pub last_frame_time: Instant,
    pub min_frame_interval: Duration,
}

impl FrameRateLimiter {
    pub fn new(target_fps: f64) -> Self {
        Self {
            last_frame_time: Instant::now(),
            min_frame_interval: Duration::from_secs_f64(1.0 / target_fps),
        }
    }
}

// =============================================================================
// Performance Monitoring
// =============================================================================

/// Performance timing tracker for frame processing
#[derive(Resource, Default)]
pub struct FrameTimings {
    pub last_print_time: f64,
    pub frame_times: Vec<f64>,
}

/// Shared performance statistics resource
#[derive(Resource)]
pub struct PerfStatsRes(pub SharedPerfStats);

// =============================================================================
// Channel Communication (Main World <-> Render World)
// =============================================================================

/// Receives data from render world
#[derive(Resource, Deref)]
pub struct MainWorldReceiver(pub Receiver<Vec<u8>>);

/// Sends data to main world
#[derive(Resource, Deref)]
pub struct RenderWorldSender(pub Sender<Vec<u8>>);
