//! Cube state value type
//!
//! A cube state is a string of facelet colour symbols ordered
//! `U R F D L B`, nine facelets per face. States coming from the text field
//! may have any length; they are padded or truncated only when mapped onto
//! cubies.

use std::fmt;

use bevy::color::{palettes::css, Color, Srgba};

/// Number of facelets on a 3x3 cube
pub const FACELET_COUNT: usize = 54;

/// Colour used to pad states that are too short
pub const FILLER: FaceletColour = FaceletColour::White;

/// The solved cube, white on top and green in front
pub const SOLVED_CUBE: &str = "WWWWWWWWWRRRRRRRRRGGGGGGGGGYYYYYYYYYOOOOOOOOOBBBBBBBBB";

/// One of the six sticker colours
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum FaceletColour {
    White,
    Orange,
    Green,
    Red,
    Yellow,
    Blue,
}

impl FaceletColour {
    pub const ALL: [FaceletColour; 6] = [
        FaceletColour::White,
        FaceletColour::Orange,
        FaceletColour::Green,
        FaceletColour::Red,
        FaceletColour::Yellow,
        FaceletColour::Blue,
    ];

    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            'W' => Some(Self::White),
            'O' => Some(Self::Orange),
            'G' => Some(Self::Green),
            'R' => Some(Self::Red),
            'Y' => Some(Self::Yellow),
            'B' => Some(Self::Blue),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Self::White => 'W',
            Self::Orange => 'O',
            Self::Green => 'G',
            Self::Red => 'R',
            Self::Yellow => 'Y',
            Self::Blue => 'B',
        }
    }

    /// Sticker colour used by the renderer
    pub fn color(self) -> Color {
        match self {
            // Slightly off-white so the sticker reads against the clear colour
            Self::White => Color::Srgba(Srgba::rgb_u8(0xf7, 0xf5, 0xf5)),
            Self::Orange => Color::Srgba(css::ORANGE),
            Self::Green => Color::Srgba(css::GREEN),
            Self::Red => Color::Srgba(css::RED),
            Self::Yellow => Color::Srgba(css::YELLOW),
            Self::Blue => Color::Srgba(css::BLUE),
        }
    }
}

/// A cube state made only of colour symbols
///
/// The length is not enforced: a half-typed state is still a valid value
/// and gets padded with [`FILLER`] by [`CubeState::facelets`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CubeState(String);

impl CubeState {
    pub fn solved() -> Self {
        Self(SOLVED_CUBE.to_string())
    }

    /// Uppercase the text and drop every character outside the colour alphabet
    pub fn sanitize(text: &str) -> Self {
        Self(
            text.chars()
                .flat_map(char::to_uppercase)
                .filter(|c| FaceletColour::from_symbol(*c).is_some())
                .collect(),
        )
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_solved(&self) -> bool {
        self.0 == SOLVED_CUBE
    }

    /// Exactly [`FACELET_COUNT`] colours, padded or truncated as needed
    pub fn facelets(&self) -> [FaceletColour; FACELET_COUNT] {
        let mut facelets = [FILLER; FACELET_COUNT];
        for (slot, symbol) in facelets.iter_mut().zip(self.0.chars()) {
            *slot = FaceletColour::from_symbol(symbol).unwrap_or(FILLER);
        }
        facelets
    }

    /// The state split into groups of four, as shown in the text field
    pub fn grouped(&self) -> String {
        self.0
            .as_bytes()
            .chunks(4)
            .map(|chunk| String::from_utf8_lossy(chunk))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Default for CubeState {
    fn default() -> Self {
        Self::solved()
    }
}

impl fmt::Display for CubeState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}
