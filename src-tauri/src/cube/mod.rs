//! Cube domain model
//!
//! Everything the viewer knows about the puzzle itself, independent of
//! rendering: facelet states, cubie positions, move notation, the rotation
//! animator, the solver capability and the viewer session.

pub mod mapping;
pub mod moves;
pub mod position;
pub mod registry;
pub mod rotation;
pub mod session;
pub mod solution;
pub mod solver;
pub mod state;

pub use moves::Move;
pub use position::{Axis, CubiePosition};
pub use registry::CubieRegistry;
pub use rotation::RotationAnimator;
pub use session::{CubeView, PendingRotation, Session};
pub use solver::{CubeSolver, ProcessSolver, SolverError};
pub use state::CubeState;
