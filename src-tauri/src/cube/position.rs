//! Cubie positions in the static 3x3 lattice

use bevy::math::Vec3;

/// One of the three world axes
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub fn unit(self) -> Vec3 {
        match self {
            Axis::X => Vec3::X,
            Axis::Y => Vec3::Y,
            Axis::Z => Vec3::Z,
        }
    }

    /// Component of `v` along this axis
    pub fn component(self, v: Vec3) -> f32 {
        match self {
            Axis::X => v.x,
            Axis::Y => v.y,
            Axis::Z => v.z,
        }
    }
}

/// Axes of the facelet slots, in facelet table order
pub const FACELET_AXES: [Axis; 3] = [Axis::Y, Axis::X, Axis::Z];

/// Stable identifier of a cubie, named after the faces it touches
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CubiePosition {
    DLB,
    DLF,
    ULB,
    ULF,
    DRB,
    DRF,
    URB,
    URF,
    UR,
    UF,
    UL,
    UB,
    DR,
    DF,
    DL,
    DB,
    FR,
    FL,
    BL,
    BR,
    U,
    D,
    R,
    L,
    F,
    B,
}

use CubiePosition::*;

struct CubieSlot {
    home: [i8; 3],
    facelets: [Option<usize>; 3],
}

const fn slot(home: [i8; 3], facelets: [Option<usize>; 3]) -> CubieSlot {
    CubieSlot { home, facelets }
}

// Facelet indices are (Y, X, Z): the U/D sticker, the R/L sticker, the F/B sticker.
#[rustfmt::skip]
const SLOTS: [CubieSlot; 26] = [
    slot([-1, -1, -1], [Some(33), Some(42), Some(53)]),
    slot([-1, -1,  1], [Some(27), Some(44), Some(24)]),
    slot([-1,  1, -1], [Some(0),  Some(36), Some(47)]),
    slot([-1,  1,  1], [Some(6),  Some(38), Some(18)]),
    slot([ 1, -1, -1], [Some(35), Some(17), Some(51)]),
    slot([ 1, -1,  1], [Some(29), Some(15), Some(26)]),
    slot([ 1,  1, -1], [Some(2),  Some(11), Some(45)]),
    slot([ 1,  1,  1], [Some(8),  Some(9),  Some(20)]),
    slot([ 1,  1,  0], [Some(5),  Some(10), None]),
    slot([ 0,  1,  1], [Some(7),  None,     Some(19)]),
    slot([-1,  1,  0], [Some(3),  Some(37), None]),
    slot([ 0,  1, -1], [Some(1),  None,     Some(46)]),
    slot([ 1, -1,  0], [Some(32), Some(16), None]),
    slot([ 0, -1,  1], [Some(28), None,     Some(25)]),
    slot([-1, -1,  0], [Some(30), Some(43), None]),
    slot([ 0, -1, -1], [Some(34), None,     Some(52)]),
    slot([ 1,  0,  1], [None,     Some(12), Some(23)]),
    slot([-1,  0,  1], [None,     Some(41), Some(21)]),
    slot([-1,  0, -1], [None,     Some(39), Some(50)]),
    slot([ 1,  0, -1], [None,     Some(14), Some(48)]),
    slot([ 0,  1,  0], [Some(4),  None,     None]),
    slot([ 0, -1,  0], [Some(31), None,     None]),
    slot([ 1,  0,  0], [None,     Some(13), None]),
    slot([-1,  0,  0], [None,     Some(40), None]),
    slot([ 0,  0,  1], [None,     None,     Some(22)]),
    slot([ 0,  0, -1], [None,     None,     Some(49)]),
];

impl CubiePosition {
    pub const ALL: [CubiePosition; 26] = [
        DLB, DLF, ULB, ULF, DRB, DRF, URB, URF, UR, UF, UL, UB, DR, DF, DL, DB, FR, FL, BL, BR, U,
        D, R, L, F, B,
    ];

    fn slot(self) -> &'static CubieSlot {
        &SLOTS[self as usize]
    }

    /// Home offset of the cubie in the solved lattice
    pub fn home(self) -> Vec3 {
        let [x, y, z] = self.slot().home;
        Vec3::new(x as f32, y as f32, z as f32)
    }

    /// Facelet indices touched by this cubie, in [`FACELET_AXES`] order
    pub fn facelet_indices(self) -> [Option<usize>; 3] {
        self.slot().facelets
    }

    pub fn name(self) -> &'static str {
        match self {
            DLB => "DLB",
            DLF => "DLF",
            ULB => "ULB",
            ULF => "ULF",
            DRB => "DRB",
            DRF => "DRF",
            URB => "URB",
            URF => "URF",
            UR => "UR",
            UF => "UF",
            UL => "UL",
            UB => "UB",
            DR => "DR",
            DF => "DF",
            DL => "DL",
            DB => "DB",
            FR => "FR",
            FL => "FL",
            BL => "BL",
            BR => "BR",
            U => "U",
            D => "D",
            R => "R",
            L => "L",
            F => "F",
            B => "B",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cube::state::FACELET_COUNT;
    use std::collections::HashSet;

    #[test]
    fn every_facelet_belongs_to_exactly_one_cubie() {
        let mut seen = HashSet::new();
        for position in CubiePosition::ALL {
            for index in position.facelet_indices().into_iter().flatten() {
                assert!(seen.insert(index), "facelet {index} used twice");
            }
        }
        assert_eq!(seen.len(), FACELET_COUNT);
    }

    #[test]
    fn facelets_sit_on_outward_axes() {
        for position in CubiePosition::ALL {
            let home = position.home();
            for (axis, index) in FACELET_AXES.iter().zip(position.facelet_indices()) {
                assert_eq!(
                    index.is_some(),
                    axis.component(home) != 0.0,
                    "{} on {:?}",
                    position.name(),
                    axis
                );
            }
        }
    }

    #[test]
    fn names_match_home_offsets() {
        for position in CubiePosition::ALL {
            let home = position.home();
            let name = position.name();
            assert_eq!(name.contains('U'), home.y > 0.0, "{name}");
            assert_eq!(name.contains('D'), home.y < 0.0, "{name}");
            assert_eq!(name.contains('R'), home.x > 0.0, "{name}");
            assert_eq!(name.contains('L'), home.x < 0.0, "{name}");
            assert_eq!(name.contains('F'), home.z > 0.0, "{name}");
            assert_eq!(name.contains('B'), home.z < 0.0, "{name}");
        }
    }
}
