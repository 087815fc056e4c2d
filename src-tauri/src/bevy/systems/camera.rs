//! Camera control system
//!
//! Orbit camera around the cube, driven by mouse input forwarded from the
//! frontend. Dragging moves the target angles and the camera eases toward
//! them, so motion keeps gliding briefly after the mouse stops.

use bevy::{math::Vec3, prelude::*};

use crate::bevy::components::CameraController;
use crate::bevy::resources::{MouseInputRes, OrbitCameraState};
use crate::config::camera::*;

/// Update camera transform based on mouse input
/// - Left button drag: orbit (yaw/pitch)
/// - Scroll wheel: zoom (adjust distance)
pub fn update_camera_from_input(
    mouse_input_res: Option<Res<MouseInputRes>>,
    mut orbit_state: ResMut<OrbitCameraState>,
    mut camera_query: Query<&mut Transform, With<CameraController>>,
) {
    let Some(mouse_res) = mouse_input_res else {
        return;
    };

    // Read and clear accumulated input
    let input = {
        let mut guard = match mouse_res.0 .0.lock() {
            Ok(g) => g,
            Err(_) => return,
        };
        let input = guard.clone();
        guard.delta_x = 0.0;
        guard.delta_y = 0.0;
        guard.scroll_delta = 0.0;
        input
    };

    if input.left_button && (input.delta_x != 0.0 || input.delta_y != 0.0) {
        orbit_state.target_yaw -= input.delta_x * ROTATION_SPEED;
        orbit_state.target_pitch =
            (orbit_state.target_pitch - input.delta_y * ROTATION_SPEED).clamp(MIN_PITCH, MAX_PITCH);
    }

    let zoomed = zoom(&mut orbit_state, input.scroll_delta);
    let settled = ease_orbit(&mut orbit_state);
    if settled && !zoomed {
        return;
    }

    let eye = orbit_state.eye();
    for mut transform in camera_query.iter_mut() {
        *transform = Transform::from_translation(eye).looking_at(orbit_state.center, Vec3::Y);
    }
}

/// Apply a wheel step within the zoom bounds.
/// Returns `true` when the distance changed.
fn zoom(orbit: &mut OrbitCameraState, scroll_delta: f32) -> bool {
    let distance = (orbit.distance - scroll_delta * ZOOM_SPEED).clamp(MIN_DISTANCE, MAX_DISTANCE);
    let changed = distance != orbit.distance;
    orbit.distance = distance;
    changed
}

/// Move the orbit angles a damped step toward their targets.
/// Returns `true` when there was nothing left to move.
fn ease_orbit(orbit: &mut OrbitCameraState) -> bool {
    let yaw_gap = orbit.target_yaw - orbit.yaw;
    let pitch_gap = orbit.target_pitch - orbit.pitch;
    if yaw_gap.abs() < 1e-5 && pitch_gap.abs() < 1e-5 {
        return true;
    }
    orbit.yaw += yaw_gap * DAMPING_FACTOR;
    orbit.pitch += pitch_gap * DAMPING_FACTOR;
    false
}
