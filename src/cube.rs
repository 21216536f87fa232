//! The 26-cubelet puzzle state and the face rotation transform.

use rustc_hash::FxHashSet;

use crate::cubelet::{home_coords, Coord, Cubelet, CUBELET_COUNT};
use crate::geometry::{matrix_for, rotate, rotate_colors};
use crate::moves::Move;

/// A 3x3x3 puzzle: 26 cubelets stored in a fixed order.
///
/// The storage order never changes after construction, so renderers can rely
/// on a stable iteration order. Turns only mutate cubelet fields.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cube {
    cubelets: [Cubelet; CUBELET_COUNT],
}

impl Default for Cube {
    fn default() -> Self {
        Self::solved()
    }
}

impl Cube {
    /// Creates a puzzle in the solved state.
    pub fn solved() -> Self {
        let mut cubelets = [Cubelet::solved((0, 0, 0)); CUBELET_COUNT];
        for (cubelet, home) in cubelets.iter_mut().zip(home_coords()) {
            *cubelet = Cubelet::solved(home);
        }
        Self { cubelets }
    }

    /// Read-only view of every cubelet, in storage order.
    #[inline]
    pub fn cubelets(&self) -> &[Cubelet] {
        &self.cubelets
    }

    /// Applies a quarter turn to the layer under `mv.face`.
    ///
    /// Layer membership is decided before any cubelet moves, and the whole
    /// layer is updated within this call. Returns the number of cubelets
    /// turned, which is always 9.
    pub fn apply(&mut self, mv: Move) -> usize {
        let matrix = matrix_for(mv);
        let mut turned = 0;
        for cubelet in &mut self.cubelets {
            if !mv.face.contains(cubelet.position) {
                continue;
            }
            cubelet.position = rotate(&matrix, cubelet.position);
            cubelet.colors = rotate_colors(&matrix, &cubelet.colors);
            turned += 1;
        }
        turned
    }

    /// Applies a sequence of moves in order.
    pub fn apply_all<'a>(&mut self, moves: impl IntoIterator<Item = &'a Move>) {
        for &mv in moves {
            self.apply(mv);
        }
    }

    /// Returns whether every cubelet is home with its original orientation.
    pub fn is_solved(&self) -> bool {
        self.cubelets.iter().all(Cubelet::is_home)
    }

    /// Finds the cubelet currently occupying `position`.
    pub fn cubelet_at(&self, position: Coord) -> Option<&Cubelet> {
        self.cubelets.iter().find(|c| c.position == position)
    }

    /// Checks that the 26 current positions are distinct non-core slots.
    pub fn positions_are_valid(&self) -> bool {
        let mut seen: FxHashSet<Coord> = FxHashSet::default();
        self.cubelets.iter().all(|cubelet| {
            let (x, y, z) = cubelet.position;
            let in_range = [x, y, z].iter().all(|v| (-1..=1).contains(v));
            in_range && cubelet.position != (0, 0, 0) && seen.insert(cubelet.position)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cubelet::{Face, Slot};

    #[test]
    fn test_solved_cube_is_solved_and_valid() {
        let cube = Cube::solved();
        assert!(cube.is_solved());
        assert!(cube.positions_are_valid());
        assert_eq!(cube.cubelets().len(), 26);
    }

    #[test]
    fn test_every_turn_moves_nine_cubelets() {
        for mv in Move::ALL {
            let mut cube = Cube::solved();
            assert_eq!(cube.apply(mv), 9, "{mv}");
            assert!(!cube.is_solved(), "{mv} should change the state");
            assert!(cube.positions_are_valid());
        }
    }

    #[test]
    fn test_u_turn_cycles_side_colors_of_top_layer() {
        let before = Cube::solved();
        let mut cube = before.clone();
        cube.apply(Move::cw(Face::U));

        for (old, new) in before.cubelets().iter().zip(cube.cubelets()) {
            if old.position.1 != -1 {
                assert_eq!(old, new, "cubelets outside U must not change");
                continue;
            }
            assert_eq!(new.position.1, -1);
            // front -> left -> back -> right -> front, top and bottom fixed
            assert_eq!(new.color(Slot::Left), old.color(Slot::Front));
            assert_eq!(new.color(Slot::Back), old.color(Slot::Left));
            assert_eq!(new.color(Slot::Right), old.color(Slot::Back));
            assert_eq!(new.color(Slot::Front), old.color(Slot::Right));
            assert_eq!(new.color(Slot::Top), old.color(Slot::Top));
            assert_eq!(new.color(Slot::Bottom), old.color(Slot::Bottom));
        }

        for _ in 0..3 {
            cube.apply(Move::cw(Face::U));
        }
        assert_eq!(cube, before);
    }

    #[test]
    fn test_turn_then_inverse_restores_state() {
        for mv in Move::ALL {
            let mut cube = Cube::solved();
            cube.apply(Move::cw(Face::R));
            cube.apply(Move::ccw(Face::F));
            let before = cube.clone();

            cube.apply(mv);
            cube.apply(mv.inverse());
            assert_eq!(cube, before, "{mv} then {}", mv.inverse());
        }
    }

    #[test]
    fn test_sexy_move_has_order_six() {
        let sequence = [
            Move::cw(Face::R),
            Move::cw(Face::U),
            Move::ccw(Face::R),
            Move::ccw(Face::U),
        ];
        let mut cube = Cube::solved();
        for repetition in 1..=6 {
            cube.apply_all(&sequence);
            assert_eq!(cube.is_solved(), repetition == 6, "after {repetition}");
        }
    }

    #[test]
    fn test_cubelet_at_finds_current_occupant() {
        let mut cube = Cube::solved();
        cube.apply(Move::cw(Face::F));
        // the UF edge has moved to RF
        let occupant = cube.cubelet_at((1, 0, 1)).unwrap();
        assert_eq!(occupant.home, (0, -1, 1));
        assert!(cube.cubelet_at((0, 0, 0)).is_none());
    }
}
