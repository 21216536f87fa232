//! Cubelet definitions and coordinate types.
//!
//! A 3x3x3 puzzle is made of 26 visible cubelets (the hidden core is left out).
//! Each cubelet sits on an integer coordinate in {-1, 0, 1}^3 and carries six
//! sticker slots, one per outward direction.
//!
//! Axis convention:
//! - `x = +1` is the R layer, `x = -1` the L layer
//! - `y = -1` is the U layer, `y = +1` the D layer
//! - `z = +1` is the F layer, `z = -1` the B layer

use std::fmt;

/// A 3D integer coordinate of a cubelet.
pub type Coord = (i32, i32, i32);

/// Number of visible cubelets on a 3x3x3 puzzle.
pub const CUBELET_COUNT: usize = 26;

/// Sticker colors, using the Western color scheme.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Yellow,
    Green,
    Blue,
    Orange,
    Red,
}

impl Color {
    /// Single-letter code used by the text net.
    pub fn letter(self) -> char {
        match self {
            Color::White => 'W',
            Color::Yellow => 'Y',
            Color::Green => 'G',
            Color::Blue => 'B',
            Color::Orange => 'O',
            Color::Red => 'R',
        }
    }

    /// Linear RGB components for rendering.
    pub fn rgb(self) -> [f32; 3] {
        match self {
            Color::White => [1.0, 1.0, 1.0],
            Color::Yellow => [1.0, 0.85, 0.0],
            Color::Green => [0.0, 0.62, 0.3],
            Color::Blue => [0.0, 0.27, 0.68],
            Color::Orange => [1.0, 0.35, 0.0],
            Color::Red => [0.72, 0.07, 0.2],
        }
    }
}

/// The six faces of the puzzle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Face {
    U,
    D,
    F,
    B,
    L,
    R,
}

impl Face {
    pub const ALL: [Face; 6] = [Face::U, Face::D, Face::F, Face::B, Face::L, Face::R];

    /// Outward normal of the face.
    pub const fn normal(self) -> Coord {
        match self {
            Face::U => (0, -1, 0),
            Face::D => (0, 1, 0),
            Face::F => (0, 0, 1),
            Face::B => (0, 0, -1),
            Face::L => (-1, 0, 0),
            Face::R => (1, 0, 0),
        }
    }

    /// Color of this face in the solved state.
    pub const fn solved_color(self) -> Color {
        match self {
            Face::U => Color::White,
            Face::D => Color::Yellow,
            Face::F => Color::Green,
            Face::B => Color::Blue,
            Face::L => Color::Orange,
            Face::R => Color::Red,
        }
    }

    pub fn letter(self) -> char {
        match self {
            Face::U => 'U',
            Face::D => 'D',
            Face::F => 'F',
            Face::B => 'B',
            Face::L => 'L',
            Face::R => 'R',
        }
    }

    pub fn from_letter(letter: char) -> Option<Face> {
        Face::ALL
            .into_iter()
            .find(|face| face.letter() == letter.to_ascii_uppercase())
    }

    /// Returns whether a cubelet at `position` belongs to this face's layer.
    #[inline]
    pub fn contains(self, position: Coord) -> bool {
        let (nx, ny, nz) = self.normal();
        // exactly one normal component is non-zero, and it equals the layer's extreme
        position.0 * nx + position.1 * ny + position.2 * nz == 1
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Sticker slot of a cubelet, named after the direction it faces.
///
/// The slot order is fixed: front, back, right, left, top, bottom.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Slot {
    Front = 0,
    Back = 1,
    Right = 2,
    Left = 3,
    Top = 4,
    Bottom = 5,
}

impl Slot {
    pub const ALL: [Slot; 6] = [
        Slot::Front,
        Slot::Back,
        Slot::Right,
        Slot::Left,
        Slot::Top,
        Slot::Bottom,
    ];

    /// The face whose outward direction this slot points along.
    pub const fn face(self) -> Face {
        match self {
            Slot::Front => Face::F,
            Slot::Back => Face::B,
            Slot::Right => Face::R,
            Slot::Left => Face::L,
            Slot::Top => Face::U,
            Slot::Bottom => Face::D,
        }
    }

    pub const fn normal(self) -> Coord {
        self.face().normal()
    }

    /// Slot pointing along an axis-aligned unit vector.
    ///
    /// Only meaningful for the six unit vectors; anything else falls through
    /// to whichever component is checked first.
    pub const fn towards(normal: Coord) -> Slot {
        match normal {
            (1, _, _) => Slot::Right,
            (-1, _, _) => Slot::Left,
            (_, -1, _) => Slot::Top,
            (_, 1, _) => Slot::Bottom,
            (_, _, 1) => Slot::Front,
            _ => Slot::Back,
        }
    }
}

/// Sticker colors in slot order; `None` marks an interior face.
pub type FaceColors = [Option<Color>; 6];

/// One of the 26 visible pieces of the puzzle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cubelet {
    /// Slot this cubelet occupies when the puzzle is solved.
    pub home: Coord,
    /// Slot this cubelet occupies right now.
    pub position: Coord,
    /// Sticker colors, indexed by [`Slot`].
    pub colors: FaceColors,
}

impl Cubelet {
    /// Creates a cubelet in its solved position and orientation.
    pub fn solved(home: Coord) -> Self {
        Self {
            home,
            position: home,
            colors: solved_colors(home),
        }
    }

    #[inline]
    pub fn color(&self, slot: Slot) -> Option<Color> {
        self.colors[slot as usize]
    }

    /// Returns whether this cubelet is back home with its original orientation.
    pub fn is_home(&self) -> bool {
        self.position == self.home && self.colors == solved_colors(self.home)
    }
}

/// Sticker colors of the cubelet whose home is `home`, in the solved state.
pub fn solved_colors(home: Coord) -> FaceColors {
    let mut colors = [None; 6];
    for slot in Slot::ALL {
        let face = slot.face();
        if face.contains(home) {
            colors[slot as usize] = Some(face.solved_color());
        }
    }
    colors
}

/// All 26 home coordinates, in x-major order with the core skipped.
pub fn home_coords() -> impl Iterator<Item = Coord> {
    (-1..=1)
        .flat_map(|x| (-1..=1).flat_map(move |y| (-1..=1).map(move |z| (x, y, z))))
        .filter(|&coord| coord != (0, 0, 0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_home_coords_skip_core() {
        let coords: Vec<Coord> = home_coords().collect();
        assert_eq!(coords.len(), CUBELET_COUNT);
        assert!(!coords.contains(&(0, 0, 0)));
    }

    #[test]
    fn test_solved_colors_match_exposed_faces() {
        // corner on U, F, R
        let corner = solved_colors((1, -1, 1));
        assert_eq!(corner[Slot::Top as usize], Some(Color::White));
        assert_eq!(corner[Slot::Front as usize], Some(Color::Green));
        assert_eq!(corner[Slot::Right as usize], Some(Color::Red));
        assert_eq!(corner.iter().flatten().count(), 3);

        // centre of D
        let center = solved_colors((0, 1, 0));
        assert_eq!(center.iter().flatten().count(), 1);
        assert_eq!(center[Slot::Bottom as usize], Some(Color::Yellow));
    }

    #[test]
    fn test_sticker_count_is_54() {
        let stickers: usize = home_coords()
            .map(|home| solved_colors(home).iter().flatten().count())
            .sum();
        assert_eq!(stickers, 54);
    }

    #[test]
    fn test_slot_normal_roundtrip() {
        for slot in Slot::ALL {
            assert_eq!(Slot::towards(slot.normal()), slot);
        }
    }

    #[test]
    fn test_face_letters() {
        for face in Face::ALL {
            assert_eq!(Face::from_letter(face.letter()), Some(face));
        }
        assert_eq!(Face::from_letter('r'), Some(Face::R));
        assert_eq!(Face::from_letter('X'), None);
    }
}
