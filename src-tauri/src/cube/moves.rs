//! Face turn notation

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use super::position::{Axis, CubiePosition};

/// The six rotatable faces
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Face {
    F,
    B,
    R,
    L,
    U,
    D,
}

impl Face {
    pub const ALL: [Face; 6] = [Face::F, Face::B, Face::R, Face::L, Face::U, Face::D];

    pub fn letter(self) -> char {
        match self {
            Face::F => 'F',
            Face::B => 'B',
            Face::R => 'R',
            Face::L => 'L',
            Face::U => 'U',
            Face::D => 'D',
        }
    }

    fn from_letter(letter: char) -> Option<Self> {
        Self::ALL.into_iter().find(|face| face.letter() == letter)
    }

    /// World axis the layer turns around
    pub fn axis(self) -> Axis {
        match self {
            Face::F | Face::B => Axis::Z,
            Face::R | Face::L => Axis::X,
            Face::U | Face::D => Axis::Y,
        }
    }

    /// Faces on the negative side of their axis turn the other way round
    pub fn handedness(self) -> f32 {
        match self {
            Face::D | Face::L | Face::B => -1.0,
            Face::F | Face::R | Face::U => 1.0,
        }
    }

    /// Cubies in this face's layer
    pub fn layer(self) -> [CubiePosition; 9] {
        use CubiePosition::*;
        match self {
            Face::F => [ULF, URF, DLF, DRF, UF, DF, FR, FL, F],
            Face::B => [URB, ULB, DRB, DLB, UB, DB, BL, BR, B],
            Face::R => [URF, URB, DRF, DRB, UR, DR, FR, BR, R],
            Face::L => [ULB, ULF, DLB, DLF, UL, DL, FL, BL, L],
            Face::U => [ULB, URB, ULF, URF, UR, UF, UL, UB, U],
            Face::D => [DLF, DRF, DLB, DRB, DR, DF, DL, DB, D],
        }
    }
}

/// Suffix after the face letter
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Modifier {
    /// Plain quarter turn
    Normal,
    /// `'`, quarter turn the other way
    Prime,
    /// `2`, half turn
    Double,
}

impl Modifier {
    pub fn quarter_turns(self) -> u8 {
        match self {
            Modifier::Double => 2,
            Modifier::Normal | Modifier::Prime => 1,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Move {
    pub face: Face,
    pub modifier: Modifier,
}

impl Move {
    pub fn new(face: Face, modifier: Modifier) -> Self {
        Self { face, modifier }
    }

    /// Signed turn direction around the face axis
    pub fn direction(self) -> f32 {
        let sign = match self.modifier {
            Modifier::Prime => 1.0,
            Modifier::Normal | Modifier::Double => -1.0,
        };
        sign * self.face.handedness()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveParseError {
    #[error("empty move")]
    Empty,
    #[error("unknown face in move {0:?}")]
    UnknownFace(String),
    #[error("unknown modifier in move {0:?}")]
    UnknownModifier(String),
}

impl FromStr for Move {
    type Err = MoveParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let letter = chars.next().ok_or(MoveParseError::Empty)?;
        let face =
            Face::from_letter(letter).ok_or_else(|| MoveParseError::UnknownFace(s.to_string()))?;
        let modifier = match (chars.next(), chars.next()) {
            (None, _) => Modifier::Normal,
            (Some('\''), None) => Modifier::Prime,
            (Some('2'), None) => Modifier::Double,
            _ => return Err(MoveParseError::UnknownModifier(s.to_string())),
        };
        Ok(Move::new(face, modifier))
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let suffix = match self.modifier {
            Modifier::Normal => "",
            Modifier::Prime => "'",
            Modifier::Double => "2",
        };
        write!(f, "{}{}", self.face.letter(), suffix)
    }
}
