//! Solutions as sequences of move transitions

use std::fmt;

use bevy::log::info;

use super::moves::Move;
use super::solver::{CubeSolver, SolverError};
use super::state::CubeState;

/// What a transition does to the cube
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Step {
    Turn(Move),
    /// End-of-solution marker; not a real move
    Complete,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Step::Turn(mv) => write!(f, "{mv}"),
            Step::Complete => f.write_str("🎉"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveTransition {
    pub step: Step,
    pub start_state: CubeState,
    pub end_state: CubeState,
}

impl MoveTransition {
    /// The move to animate, if this is not the completion marker
    pub fn turn(&self) -> Option<Move> {
        match self.step {
            Step::Turn(mv) => Some(mv),
            Step::Complete => None,
        }
    }
}

pub type Solution = Vec<MoveTransition>;

/// Ask `solver` for a solution to `state` and expand it into transitions
///
/// Each move is replayed on top of the previous end state, so transition
/// `i` starts where transition `i - 1` ends. A [`Step::Complete`] marker on
/// the solved cube closes the sequence. Solver errors are returned as is.
pub fn solve(solver: &dyn CubeSolver, state: &CubeState) -> Result<Solution, SolverError> {
    let moves = solver.solve_cube(state)?;
    info!("[Solver] {} moves for {}", moves.len(), state);

    let mut transitions = Vec::with_capacity(moves.len() + 1);
    let mut current = state.clone();
    for mv in moves {
        let next = solver.apply_cube_moves(&current, &[mv])?;
        transitions.push(MoveTransition {
            step: Step::Turn(mv),
            start_state: current,
            end_state: next.clone(),
        });
        current = next;
    }

    transitions.push(MoveTransition {
        step: Step::Complete,
        start_state: CubeState::solved(),
        end_state: CubeState::solved(),
    });

    Ok(transitions)
}
