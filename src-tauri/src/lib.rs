//! Cube Viewer: animated Rubik's Cube solutions
//!
//! A Tauri webview hosts the controls (state text, Random, Solve, the move
//! list and auto-play) while Bevy renders the cube headless in a background
//! thread. Solving is delegated to an external solver executable.
//!
//! Architecture:
//! - Bevy runs in a background thread with NO window and renders offscreen
//! - GPU texture -> Buffer -> CPU channel -> Tauri frontend via `frame://`
//! - Commands edit a shared viewer session; Bevy plays it back frame by frame
//!
//! # Module Structure
//!
//! - `config`: Configuration constants and settings
//! - `cube`: Cube domain model (states, moves, animator, solver, session)
//! - `tauri_bridge`: Bridge layer between Tauri and Bevy
//!   - `shared_state`: Thread-safe data structures
//!   - `commands`: Tauri command handlers
//!   - `protocol`: Custom protocol handlers
//! - `bevy`: Bevy engine integration
//!   - `components`: ECS components
//!   - `resources`: Global resources
//!   - `geometry`: Cubie meshes
//!   - `plugins`: Frame copy and cube playback plugins
//!   - `systems`: Scene, camera, animation and frame systems
//!   - `app`: Application setup

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

// Module declarations
mod bevy;
pub mod config;
pub mod cube;
mod tauri_bridge;

use std::sync::Arc;
use std::{thread, time::Duration};

use ::bevy::log::{error, info};

use crate::bevy::app::BevyBridge;
use crate::cube::{ProcessSolver, Session};
use tauri_bridge::{
    SharedFrameBuffer, SharedMouseInput, SharedPerfStats, SharedSession, SharedSolver,
};

/// Main entry point for the Tauri application
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    // Create shared state
    let bridge = BevyBridge {
        frame_buffer: SharedFrameBuffer::default(),
        perf_stats: SharedPerfStats::default(),
        mouse_input: SharedMouseInput::default(),
        session: SharedSession::new(Session::new()),
    };
    let solver = ProcessSolver::new(config::solver_path());

    // Start Bevy in background thread; its LogPlugin installs the logger
    bevy::start_bevy(bridge.clone(), config::animation_speed());

    // Wait for Bevy to initialize
    thread::sleep(Duration::from_millis(1000));
    info!("[Tauri] Starting, solver at {:?}", solver.path());

    // Clone for the custom protocol handler
    let protocol_buffer = bridge.frame_buffer.clone();
    let protocol_perf_stats = bridge.perf_stats.clone();

    let result = tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .manage(bridge.frame_buffer)
        .manage(bridge.perf_stats)
        .manage(bridge.mouse_input)
        .manage(bridge.session)
        .manage(SharedSolver(Arc::new(solver)))
        // Register custom protocol "frame://" for direct binary transfer
        .register_asynchronous_uri_scheme_protocol("frame", move |_ctx, request, responder| {
            let buffer = protocol_buffer.clone();
            let perf_stats = protocol_perf_stats.clone();

            // JPEG encoding is slow, keep it off the webview thread
            std::thread::spawn(move || {
                let response = tauri_bridge::protocol::handle_frame_protocol(
                    request.uri().path(),
                    &buffer,
                    &perf_stats,
                );
                responder.respond(response);
            });
        })
        .invoke_handler(tauri::generate_handler![
            tauri_bridge::commands::get_frame,
            tauri_bridge::commands::get_render_size,
            tauri_bridge::commands::get_performance_stats,
            tauri_bridge::commands::send_mouse_input,
            tauri_bridge::commands::get_cube_view,
            tauri_bridge::commands::set_cube_state,
            tauri_bridge::commands::select_move,
            tauri_bridge::commands::set_auto_play,
            tauri_bridge::commands::random_cube,
            tauri_bridge::commands::solve_cube,
        ])
        .run(tauri::generate_context!());

    if let Err(err) = result {
        error!("[Tauri] Application error: {err}");
    }
}
