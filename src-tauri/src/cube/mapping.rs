//! Mapping a cube state onto the stickers of each cubie

use super::position::{Axis, CubiePosition, FACELET_AXES};
use super::state::{CubeState, FaceletColour, FACELET_COUNT};

/// A coloured sticker on one side of a cubie
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Facelet {
    pub axis: Axis,
    /// `true` when the sticker faces the negative end of `axis`
    pub inverse: bool,
    pub colour: FaceletColour,
}

/// Stickers of one cubie for the given state
pub fn cubie_facelets(
    position: CubiePosition,
    facelets: &[FaceletColour; FACELET_COUNT],
) -> Vec<Facelet> {
    let home = position.home();
    FACELET_AXES
        .iter()
        .zip(position.facelet_indices())
        .filter_map(|(&axis, index)| {
            index.map(|index| Facelet {
                axis,
                inverse: axis.component(home) < 0.0,
                colour: facelets[index],
            })
        })
        .collect()
}

/// Stickers of every cubie, in [`CubiePosition::ALL`] order
pub fn map_state(state: &CubeState) -> Vec<(CubiePosition, Vec<Facelet>)> {
    let facelets = state.facelets();
    CubiePosition::ALL
        .into_iter()
        .map(|position| (position, cubie_facelets(position, &facelets)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cube::state::SOLVED_CUBE;

    fn count(mapped: &[(CubiePosition, Vec<Facelet>)]) -> usize {
        mapped.iter().map(|(_, f)| f.len()).sum()
    }

    #[test]
    fn solved_cube_faces_are_uniform() {
        let mapped = map_state(&CubeState::solved());
        for (position, facelets) in &mapped {
            for facelet in facelets {
                let expected = match (facelet.axis, facelet.inverse) {
                    (Axis::Y, false) => FaceletColour::White,
                    (Axis::X, false) => FaceletColour::Red,
                    (Axis::Z, false) => FaceletColour::Green,
                    (Axis::Y, true) => FaceletColour::Yellow,
                    (Axis::X, true) => FaceletColour::Orange,
                    (Axis::Z, true) => FaceletColour::Blue,
                };
                assert_eq!(facelet.colour, expected, "{:?}", position);
            }
        }
    }

    #[test]
    fn corners_edges_and_centres_carry_three_two_and_one() {
        for (position, facelets) in map_state(&CubeState::solved()) {
            assert_eq!(facelets.len(), position.name().len());
        }
    }

    #[test]
    fn mapping_is_total_for_any_length() {
        let long = format!("{SOLVED_CUBE}{SOLVED_CUBE}");
        for text in ["", "R", "GGGG OOOO", long.as_str()] {
            let mapped = map_state(&CubeState::sanitize(text));
            assert_eq!(mapped.len(), CubiePosition::ALL.len());
            assert_eq!(count(&mapped), 54);
        }
    }

    #[test]
    fn empty_state_maps_to_filler() {
        let mapped = map_state(&CubeState::sanitize(""));
        assert!(mapped
            .iter()
            .flat_map(|(_, f)| f)
            .all(|f| f.colour == FaceletColour::White));
    }

    #[test]
    fn first_facelet_lands_on_upper_left_back_corner() {
        let state = CubeState::sanitize("B");
        let mapped = map_state(&state);
        let (_, facelets) = mapped
            .iter()
            .find(|(p, _)| *p == CubiePosition::ULB)
            .unwrap();
        assert_eq!(facelets[0].axis, Axis::Y);
        assert_eq!(facelets[0].colour, FaceletColour::Blue);
    }
}
