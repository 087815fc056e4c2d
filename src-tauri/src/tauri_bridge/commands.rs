//! Tauri command handlers
//!
//! This module contains all the Tauri command functions that can be invoked
//! from the frontend JavaScript code. Cube commands edit the shared session
//! and answer with a fresh [`CubeView`]; the Bevy side picks the change up
//! on its next frame.

use base64::{engine::general_purpose::STANDARD, Engine};
use bevy::log::{info, warn};
use tauri::State;

use super::shared_state::{
    FrameResponse, PerformanceStats, SharedFrameBuffer, SharedMouseInput, SharedPerfStats,
    SharedSession, SharedSolver,
};
use crate::config::{RENDER_HEIGHT, RENDER_WIDTH};
use crate::cube::{solution, CubeSolver, CubeView};

// =============================================================================
// Frames and input
// =============================================================================

/// Get the current rendered frame as Base64-encoded RGBA data
#[tauri::command]
pub fn get_frame(
    state: State<SharedFrameBuffer>,
    perf_state: State<SharedPerfStats>,
) -> Result<FrameResponse, String> {
    let cmd_start = std::time::Instant::now();

    let guard = state.0.lock().map_err(|e| e.to_string())?;
    let Some(rgba_data) = &*guard else {
        return Err("No frame yet (scene still loading)".into());
    };
    let data_fetch_time = cmd_start.elapsed().as_secs_f64() * 1000.0;

    let encode_start = std::time::Instant::now();
    let data = STANDARD.encode(rgba_data);
    let encode_time = encode_start.elapsed().as_secs_f64() * 1000.0;

    if let Ok(mut stats) = perf_state.0.lock() {
        stats.tauri_get_frame_ms = data_fetch_time;
        stats.tauri_serialize_ms = encode_time;
    }

    Ok(FrameResponse {
        data,
        width: RENDER_WIDTH,
        height: RENDER_HEIGHT,
    })
}

/// Get the render resolution
#[tauri::command]
pub fn get_render_size() -> (u32, u32) {
    (RENDER_WIDTH, RENDER_HEIGHT)
}

/// Get performance statistics
#[tauri::command]
pub fn get_performance_stats(state: State<SharedPerfStats>) -> Result<PerformanceStats, String> {
    let guard = state.0.lock().map_err(|e| e.to_string())?;
    Ok(guard.clone())
}

/// Receive mouse input from frontend for camera control
/// Input deltas are accumulated until consumed by Bevy
#[tauri::command]
pub fn send_mouse_input(
    state: State<SharedMouseInput>,
    delta_x: f32,
    delta_y: f32,
    scroll_delta: f32,
    left_button: bool,
) -> Result<(), String> {
    let mut guard = state.0.lock().map_err(|e| e.to_string())?;
    guard.delta_x += delta_x;
    guard.delta_y += delta_y;
    guard.scroll_delta += scroll_delta;
    guard.left_button = left_button;
    Ok(())
}

// =============================================================================
// Cube
// =============================================================================

/// Current state text, solution moves, selection and auto-play flag
#[tauri::command]
pub fn get_cube_view(session: State<SharedSession>) -> Result<CubeView, String> {
    view(&session)
}

/// Replace the displayed cube with the text typed by the user
#[tauri::command]
pub fn set_cube_state(session: State<SharedSession>, text: String) -> Result<CubeView, String> {
    edit_state(&session, &text)
}

/// Jump to the start of a solution move
#[tauri::command]
pub fn select_move(session: State<SharedSession>, index: usize) -> Result<CubeView, String> {
    choose_move(&session, index)
}

/// Pause or resume solution playback
#[tauri::command]
pub fn set_auto_play(session: State<SharedSession>, enabled: bool) -> Result<CubeView, String> {
    toggle_auto_play(&session, enabled)
}

/// Show a random scramble from the solver
#[tauri::command]
pub async fn random_cube(
    session: State<'_, SharedSession>,
    solver: State<'_, SharedSolver>,
) -> Result<CubeView, String> {
    let session = session.inner().clone();
    let solver = solver.inner().clone();
    tauri::async_runtime::spawn_blocking(move || scramble(&session, solver.0.as_ref()))
        .await
        .map_err(|e| e.to_string())?
}

/// Solve the displayed cube and start playing the solution
#[tauri::command]
pub async fn solve_cube(
    session: State<'_, SharedSession>,
    solver: State<'_, SharedSolver>,
) -> Result<CubeView, String> {
    let session = session.inner().clone();
    let solver = solver.inner().clone();
    tauri::async_runtime::spawn_blocking(move || solve_current(&session, solver.0.as_ref()))
        .await
        .map_err(|e| e.to_string())?
}

fn view(session: &SharedSession) -> Result<CubeView, String> {
    let guard = session.0.lock().map_err(|e| e.to_string())?;
    Ok(guard.view())
}

fn edit_state(session: &SharedSession, text: &str) -> Result<CubeView, String> {
    let mut guard = session.0.lock().map_err(|e| e.to_string())?;
    guard.set_state_text(text);
    Ok(guard.view())
}

fn choose_move(session: &SharedSession, index: usize) -> Result<CubeView, String> {
    let mut guard = session.0.lock().map_err(|e| e.to_string())?;
    guard.select_move(index).map_err(|e| e.to_string())?;
    Ok(guard.view())
}

fn toggle_auto_play(session: &SharedSession, enabled: bool) -> Result<CubeView, String> {
    let mut guard = session.0.lock().map_err(|e| e.to_string())?;
    guard.set_auto_play(enabled);
    Ok(guard.view())
}

fn scramble(session: &SharedSession, solver: &dyn CubeSolver) -> Result<CubeView, String> {
    let state = solver.rand_cube().map_err(|e| {
        warn!("[Solver] Random cube failed: {e}");
        e.to_string()
    })?;
    info!("[Solver] Scrambled: {state}");

    let mut guard = session.0.lock().map_err(|e| e.to_string())?;
    guard.randomize(state);
    Ok(guard.view())
}

fn solve_current(session: &SharedSession, solver: &dyn CubeSolver) -> Result<CubeView, String> {
    // Not held across the solve; whichever request finishes last wins
    let state = session.0.lock().map_err(|e| e.to_string())?.state().clone();

    let solution = solution::solve(solver, &state).map_err(|e| {
        warn!("[Solver] Solve failed for {state}: {e}");
        e.to_string()
    })?;

    let mut guard = session.0.lock().map_err(|e| e.to_string())?;
    guard.load_solution(solution);
    Ok(guard.view())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cube::solution::tests::ChainSolver;

    #[test]
    fn typed_text_is_sanitized_and_grouped() {
        let session = SharedSession::default();
        let view = edit_state(&session, "wwwwoooogggg rrrryyyybbbb").unwrap();
        assert_eq!(view.state, "WWWW OOOO GGGG RRRR YYYY BBBB");
    }

    #[test]
    fn scramble_then_solve_loads_the_solution() {
        let session = SharedSession::default();
        let solver = ChainSolver::scrambled();

        let view = scramble(&session, &solver).unwrap();
        assert!(view.moves.is_empty());

        let view = solve_current(&session, &solver).unwrap();
        assert_eq!(view.moves, ["R", "U'", "F2", "🎉"]);
        assert_eq!(view.index, 0);
        assert!(view.auto_play);
    }

    #[test]
    fn solver_failure_is_reported_verbatim() {
        let session = SharedSession::default();
        let solver = ChainSolver::scrambled();
        edit_state(&session, "WWWW").unwrap();

        let err = solve_current(&session, &solver).unwrap_err();
        assert_eq!(err, "Cube is unsolveable");
        assert!(view(&session).unwrap().moves.is_empty());
    }

    #[test]
    fn selecting_a_move_updates_the_view() {
        let session = SharedSession::default();
        let solver = ChainSolver::scrambled();
        scramble(&session, &solver).unwrap();
        solve_current(&session, &solver).unwrap();
        toggle_auto_play(&session, false).unwrap();

        let view = choose_move(&session, 1).unwrap();
        assert_eq!(view.index, 1);
        assert_eq!(view.state, solver.chain[1].grouped());
        assert!(!view.auto_play);

        assert!(choose_move(&session, 17).is_err());
    }
}
