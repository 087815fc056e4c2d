//! Configuration constants and settings for the cube viewer
//!
//! This module contains all configurable parameters such as render resolution,
//! frame rates, cube geometry and animation tuning. A few values can be
//! overridden from the environment at startup.

/// Width of the offscreen render target in pixels
pub const RENDER_WIDTH: u32 = 800;

/// Height of the offscreen render target in pixels
pub const RENDER_HEIGHT: u32 = 600;

/// Target frames per second for the Bevy render loop
pub const TARGET_FPS: f64 = 60.0;

/// Number of pre-roll frames to skip before starting output
/// This allows the scene to fully load and stabilize
pub const PRE_ROLL_FRAMES: u32 = 30;

/// Camera control settings
pub mod camera {
    /// Initial camera direction, looking at the origin; the distance is
    /// clamped to the zoom bounds
    pub const START_POSITION: [f32; 3] = [4.0, 4.0, 5.0];

    /// Rotation speed multiplier for mouse drag
    pub const ROTATION_SPEED: f32 = 0.005;

    /// Zoom speed multiplier for scroll wheel
    pub const ZOOM_SPEED: f32 = 0.5;

    /// Fraction of the remaining orbit applied each frame
    pub const DAMPING_FACTOR: f32 = 0.25;

    /// Minimum camera distance from center point
    pub const MIN_DISTANCE: f32 = 4.0;

    /// Maximum camera distance from center point; equal to the minimum,
    /// so the camera sits at a fixed distance and the wheel cannot zoom
    pub const MAX_DISTANCE: f32 = 4.0;

    /// Maximum pitch angle (radians) to prevent camera flipping
    pub const MAX_PITCH: f32 = 1.5;

    /// Minimum pitch angle (radians) to prevent camera flipping
    pub const MIN_PITCH: f32 = -1.5;
}

/// Cubie mesh settings
pub mod geometry {
    /// Edge length of a cubie
    pub const CUBIE_SIZE: f32 = 1.0;

    /// Rounding radius of cubie edges
    pub const CUBIE_RADIUS: f32 = 0.08;

    /// Segments per rounded edge
    pub const CUBIE_SMOOTHNESS: u32 = 5;

    /// Edge length of a sticker
    pub const FACELET_SIZE: f32 = 0.88;

    /// Gap between a sticker and the cubie surface, avoids z-fighting
    pub const FACELET_LIFT: f32 = 0.002;
}

/// Face turn animation settings
pub mod animation {
    /// Default speed multiplier, overridable with `CUBE_ANIMATION_SPEED`
    pub const DEFAULT_SPEED: f32 = 1.0;

    /// Lowest accepted speed multiplier
    pub const MIN_SPEED: f32 = 0.05;

    /// Base angular step per frame (radians) per quarter turn
    pub const STEP_FACTOR: f32 = 0.05;

    /// Peak of the easing curve; the step never drops below `EASING_PEAK - 1`
    pub const EASING_PEAK: f32 = 1.1;
}

/// External solver settings
pub mod solver {
    /// Environment variable naming the solver executable
    pub const BIN_ENV: &str = "CUBE_SOLVER_BIN";

    /// Solver executable looked up on `PATH` when `BIN_ENV` is unset
    pub const DEFAULT_BIN: &str = "cube-solver";
}

/// Performance monitoring settings
pub mod performance {
    /// Interval for printing performance stats (seconds)
    pub const STATS_PRINT_INTERVAL: f64 = 2.0;

    /// Number of frame timing samples to keep for averaging
    pub const FRAME_TIMING_SAMPLES: usize = 60;
}

/// Image compression settings
pub mod compression {
    /// JPEG quality level (0-100, higher = better quality but larger size)
    pub const JPEG_QUALITY: u8 = 85;
}

/// Environment variable overriding the animation speed
pub const ANIMATION_SPEED_ENV: &str = "CUBE_ANIMATION_SPEED";

/// Path of the solver executable
pub fn solver_path() -> String {
    std::env::var(solver::BIN_ENV).unwrap_or_else(|_| solver::DEFAULT_BIN.to_string())
}

/// Animation speed multiplier, falling back to the default on bad input
pub fn animation_speed() -> f32 {
    parse_speed(std::env::var(ANIMATION_SPEED_ENV).ok().as_deref())
}

fn parse_speed(value: Option<&str>) -> f32 {
    value
        .and_then(|v| v.trim().parse::<f32>().ok())
        .filter(|v| v.is_finite() && *v >= animation::MIN_SPEED)
        .unwrap_or(animation::DEFAULT_SPEED)
}
