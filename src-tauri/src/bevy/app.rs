//! Bevy application setup and execution
//!
//! This module handles the creation and configuration of the Bevy app,
//! including plugin registration and system scheduling.

use bevy::{
    app::{App, ScheduleRunnerPlugin},
    log::info,
    prelude::*,
    window::ExitCondition,
};
use std::thread;
use std::time::Duration;

use crate::bevy::plugins::{CubePlugin, ImageCopyPlugin};
use crate::bevy::resources::*;
use crate::bevy::systems::*;
use crate::config::{PRE_ROLL_FRAMES, TARGET_FPS};
use crate::tauri_bridge::shared_state::{
    SharedFrameBuffer, SharedMouseInput, SharedPerfStats, SharedSession,
};

/// Handles shared between the Bevy thread and the Tauri commands
#[derive(Clone)]
pub struct BevyBridge {
    pub frame_buffer: SharedFrameBuffer,
    pub perf_stats: SharedPerfStats,
    pub mouse_input: SharedMouseInput,
    pub session: SharedSession,
}

/// Create and configure the Bevy application
pub fn create_app(bridge: BevyBridge, animation_speed: f32) -> App {
    let mut app = App::new();

    // Use DefaultPlugins but configure for headless operation
    app.add_plugins(
        DefaultPlugins
            .set(WindowPlugin {
                primary_window: None,
                exit_condition: ExitCondition::DontExit,
                ..default()
            })
            .set(ImagePlugin::default_nearest()),
    );

    // Add schedule runner for controlled frame rate
    app.add_plugins(ScheduleRunnerPlugin::run_loop(Duration::from_secs_f64(
        1.0 / TARGET_FPS,
    )));

    app.add_plugins(ImageCopyPlugin);
    app.add_plugins(CubePlugin {
        session: bridge.session,
        speed: animation_speed,
    });

    app.add_systems(Startup, setup_scene);
    app.add_systems(Update, update_camera_from_input);
    app.add_systems(Last, extract_and_process_frame);

    app.insert_resource(FrameBufferRes(bridge.frame_buffer));
    app.insert_resource(PerfStatsRes(bridge.perf_stats));
    app.insert_resource(MouseInputRes(bridge.mouse_input));
    app.insert_resource(OrbitCameraState::default());
    app.insert_resource(FrameCount::default());
    app.insert_resource(PreRollFrames(PRE_ROLL_FRAMES));
    app.insert_resource(FrameTimings::default());
    app.insert_resource(FrameRateLimiter::new(TARGET_FPS));

    info!("[Bevy] App configured (headless, animation speed {animation_speed})");
    app
}

/// Start Bevy in a background thread
pub fn start_bevy(bridge: BevyBridge, animation_speed: f32) {
    thread::spawn(move || {
        let mut app = create_app(bridge, animation_speed);
        info!("[Bevy] Running render loop...");
        app.run();
    });
}
