//! Viewer session
//!
//! The authoritative state shown to the user: the displayed cube, the
//! loaded solution, the selected transition and whether auto-play is on.
//! Every externally visible change bumps `revision`, which the scene uses
//! to recolour stickers, reset cubies and drop an in-flight rotation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::moves::Move;
use super::solution::Solution;
use super::state::CubeState;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("move {index} is outside the solution ({len} moves)")]
    MoveOutOfRange { index: usize, len: usize },
}

/// A rotation the scene should animate next
///
/// Carries the session revision it was issued for, so a completion that
/// arrives after the session moved on can be recognised as stale.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PendingRotation {
    pub mv: Move,
    pub index: usize,
    pub revision: u64,
}

/// Snapshot handed to the frontend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CubeView {
    /// State text grouped in fours, as shown in the input field
    pub state: String,
    pub moves: Vec<String>,
    pub index: usize,
    pub auto_play: bool,
}

#[derive(Debug, Clone)]
pub struct Session {
    state: CubeState,
    solution: Solution,
    index: usize,
    auto_play: bool,
    revision: u64,
}

impl Session {
    pub fn new() -> Self {
        Self {
            state: CubeState::solved(),
            solution: Vec::new(),
            index: 0,
            auto_play: true,
            revision: 0,
        }
    }

    pub fn state(&self) -> &CubeState {
        &self.state
    }

    pub fn solution(&self) -> &Solution {
        &self.solution
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn auto_play(&self) -> bool {
        self.auto_play
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    /// Replace the displayed state with sanitized user text
    ///
    /// The loaded solution and selection are kept; selecting a move still
    /// jumps back to that transition's start state.
    pub fn set_state_text(&mut self, text: &str) {
        self.state = CubeState::sanitize(text);
        self.touch();
    }

    /// Show a freshly scrambled cube
    pub fn randomize(&mut self, state: CubeState) {
        self.state = state;
        self.solution.clear();
        self.index = 0;
        self.touch();
    }

    /// Load a new solution and start playing it from the beginning
    pub fn load_solution(&mut self, solution: Solution) {
        self.solution = solution;
        self.index = 0;
        self.auto_play = true;
        self.touch();
    }

    /// Jump to the start of transition `index`
    pub fn select_move(&mut self, index: usize) -> Result<(), SessionError> {
        let transition = self
            .solution
            .get(index)
            .ok_or(SessionError::MoveOutOfRange {
                index,
                len: self.solution.len(),
            })?;
        self.state = transition.start_state.clone();
        self.index = index;
        self.touch();
        Ok(())
    }

    pub fn set_auto_play(&mut self, enabled: bool) {
        self.auto_play = enabled;
        self.touch();
    }

    /// The rotation auto-play wants animated now, if any
    pub fn pending_rotation(&self) -> Option<PendingRotation> {
        if !self.auto_play {
            return None;
        }
        let transition = self.solution.get(self.index)?;
        if transition.start_state.is_solved() {
            return None;
        }
        Some(PendingRotation {
            mv: transition.turn()?,
            index: self.index,
            revision: self.revision,
        })
    }

    /// Commit a finished rotation
    ///
    /// Returns `false` when the session changed since `rotation` was issued;
    /// the caller then discards the animation instead.
    pub fn complete_rotation(&mut self, rotation: PendingRotation) -> bool {
        if rotation.revision != self.revision || rotation.index != self.index {
            return false;
        }
        let Some(transition) = self.solution.get(self.index) else {
            return false;
        };
        self.state = transition.end_state.clone();
        if self.index + 1 < self.solution.len() {
            self.index += 1;
        }
        self.touch();
        true
    }

    pub fn view(&self) -> CubeView {
        CubeView {
            state: self.state.grouped(),
            moves: self
                .solution
                .iter()
                .map(|transition| transition.step.to_string())
                .collect(),
            index: self.index,
            auto_play: self.auto_play,
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cube::solution::{solve, tests::ChainSolver};

    fn loaded() -> (Session, ChainSolver) {
        let solver = ChainSolver::scrambled();
        let mut session = Session::new();
        session.randomize(solver.chain[0].clone());
        let solution = solve(&solver, session.state()).unwrap();
        session.load_solution(solution);
        (session, solver)
    }

    #[test]
    fn selecting_a_move_shows_its_start_state() {
        let (mut session, solver) = loaded();
        session.set_auto_play(false);

        session.select_move(2).unwrap();
        assert_eq!(session.index(), 2);
        assert_eq!(session.state(), &solver.chain[2]);
        assert!(!session.auto_play());
        assert_eq!(session.pending_rotation(), None);
    }

    #[test]
    fn selecting_outside_the_solution_fails() {
        let (mut session, _) = loaded();
        let revision = session.revision();
        assert_eq!(
            session.select_move(9),
            Err(SessionError::MoveOutOfRange { index: 9, len: 4 })
        );
        assert_eq!(session.revision(), revision);
    }

    #[test]
    fn auto_play_walks_the_solution_to_the_end() {
        let (mut session, solver) = loaded();

        let mut played = Vec::new();
        while let Some(rotation) = session.pending_rotation() {
            played.push(rotation.mv);
            assert!(session.complete_rotation(rotation));
        }

        assert_eq!(played, solver.moves);
        assert!(session.state().is_solved());
        assert_eq!(session.index(), session.solution().len() - 1);
    }

    #[test]
    fn stale_completion_is_rejected() {
        let (mut session, _) = loaded();
        let rotation = session.pending_rotation().unwrap();

        session.set_auto_play(false);
        session.set_auto_play(true);

        assert!(!session.complete_rotation(rotation));
        assert_eq!(session.index(), 0);
        assert!(session.pending_rotation().is_some());
    }

    #[test]
    fn loading_a_solution_turns_auto_play_back_on() {
        let solver = ChainSolver::scrambled();
        let mut session = Session::new();
        session.set_auto_play(false);
        session.randomize(solver.chain[0].clone());
        session.load_solution(solve(&solver, session.state()).unwrap());
        assert!(session.auto_play());
        assert_eq!(session.index(), 0);
    }

    #[test]
    fn editing_the_text_keeps_the_solution() {
        let (mut session, solver) = loaded();
        session.set_auto_play(false);
        session.select_move(1).unwrap();

        session.set_state_text("wwww rrrr x");
        assert_eq!(session.state().as_str(), "WWWWRRRR");
        assert_eq!(session.solution().len(), 4);
        assert_eq!(session.index(), 1);
        assert_eq!(session.view().moves, ["R", "U'", "F2", "🎉"]);

        session.select_move(2).unwrap();
        assert_eq!(session.state(), &solver.chain[2]);
        session.select_move(0).unwrap();
        assert_eq!(session.state(), &solver.chain[0]);
    }

    #[test]
    fn view_lists_move_labels() {
        let (session, _) = loaded();
        let view = session.view();
        assert_eq!(view.moves, ["R", "U'", "F2", "🎉"]);
        assert_eq!(view.index, 0);
        assert!(view.auto_play);
        assert!(view.state.starts_with("GGGG GGGG G"));
    }

    #[test]
    fn move_labels_stay_put_while_playback_advances() {
        let (mut session, _) = loaded();
        let labels = session.view().moves;

        let mut indices = vec![session.view().index];
        while let Some(rotation) = session.pending_rotation() {
            assert!(session.complete_rotation(rotation));
            let view = session.view();
            assert_eq!(view.moves, labels);
            indices.push(view.index);
        }
        assert_eq!(indices, [0, 1, 2, 3]);

        session.select_move(1).unwrap();
        assert_eq!(session.view().moves, labels);
    }

    #[test]
    fn every_change_bumps_the_revision() {
        let mut session = Session::new();
        let mut last = session.revision();
        let mut check = |session: &Session| {
            assert!(session.revision() != last);
            last = session.revision();
        };
        session.set_state_text("W");
        check(&session);
        session.randomize(CubeState::solved());
        check(&session);
        session.set_auto_play(false);
        check(&session);
        session.load_solution(Vec::new());
        check(&session);
    }
}
