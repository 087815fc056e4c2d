//! External solver capability
//!
//! The solving engine is opaque to the viewer. It is reached only through
//! [`CubeSolver`], so tests and alternative backends can plug in without
//! touching the scene.

use std::ffi::OsStr;
use std::path::PathBuf;
use std::process::Command;

use bevy::log::{debug, warn};
use thiserror::Error;

use super::moves::{Move, MoveParseError};
use super::state::CubeState;

#[derive(Debug, Error)]
pub enum SolverError {
    /// The solver ran and reported a failure, e.g. an unsolvable cube
    #[error("{0}")]
    Rejected(String),
    #[error("solver returned an invalid move: {0}")]
    InvalidMove(#[from] MoveParseError),
    #[error("failed to run solver {path:?}: {source}")]
    Spawn {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("solver output is not valid UTF-8")]
    Encoding(#[from] std::string::FromUtf8Error),
}

/// Operations offered by the external solving engine
pub trait CubeSolver: Send + Sync {
    /// Moves taking `state` to the solved cube
    fn solve_cube(&self, state: &CubeState) -> Result<Vec<Move>, SolverError>;

    /// `state` after applying `moves` in order
    fn apply_cube_moves(&self, state: &CubeState, moves: &[Move])
        -> Result<CubeState, SolverError>;

    /// A randomly scrambled cube
    fn rand_cube(&self) -> Result<CubeState, SolverError>;
}

/// Solver running as a separate executable
///
/// Sub-commands: `solve <STATE>` prints whitespace separated moves,
/// `apply <STATE> <MOVE>...` and `random` print a state. A non-zero exit
/// status turns stderr into [`SolverError::Rejected`].
#[derive(Debug, Clone)]
pub struct ProcessSolver {
    path: PathBuf,
}

impl ProcessSolver {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn run<I, S>(&self, args: I) -> Result<String, SolverError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let output = Command::new(&self.path)
            .args(args)
            .output()
            .map_err(|source| SolverError::Spawn {
                path: self.path.clone(),
                source,
            })?;

        if !output.status.success() {
            let message = String::from_utf8_lossy(&output.stderr).trim().to_string();
            warn!("[Solver] {:?} exited with {}: {}", self.path, output.status, message);
            let message = if message.is_empty() {
                format!("solver exited with {}", output.status)
            } else {
                message
            };
            return Err(SolverError::Rejected(message));
        }

        let stdout = String::from_utf8(output.stdout)?;
        debug!("[Solver] {}", stdout.trim());
        Ok(stdout)
    }
}

impl CubeSolver for ProcessSolver {
    fn solve_cube(&self, state: &CubeState) -> Result<Vec<Move>, SolverError> {
        let stdout = self.run(["solve", state.as_str()])?;
        parse_moves(&stdout)
    }

    fn apply_cube_moves(
        &self,
        state: &CubeState,
        moves: &[Move],
    ) -> Result<CubeState, SolverError> {
        let mut args = vec!["apply".to_string(), state.to_string()];
        args.extend(moves.iter().map(Move::to_string));
        let stdout = self.run(args)?;
        Ok(CubeState::sanitize(&stdout))
    }

    fn rand_cube(&self) -> Result<CubeState, SolverError> {
        let stdout = self.run(["random"])?;
        Ok(CubeState::sanitize(&stdout))
    }
}

/// Parse whitespace separated move notation
pub fn parse_moves(text: &str) -> Result<Vec<Move>, SolverError> {
    Ok(text
        .split_whitespace()
        .map(str::parse)
        .collect::<Result<Vec<Move>, _>>()?)
}
