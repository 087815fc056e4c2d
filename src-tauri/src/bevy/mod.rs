//! Bevy engine integration
//!
//! This module contains all Bevy-related code including components,
//! resources, systems, plugins, mesh building and application setup.

pub mod app;
pub mod components;
pub mod geometry;
pub mod plugins;
pub mod resources;
pub mod systems;

// Re-export commonly used items
pub use app::start_bevy;
