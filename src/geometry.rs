//! Integer quarter-turn rotations.
//!
//! Every face turn is a 90 degree rotation about one coordinate axis, so it can
//! be written as a signed permutation matrix over {-1, 0, 1}. Positions and
//! sticker normals both go through the same matrix, which keeps the position
//! update and the sticker permutation in agreement by construction.

use crate::cubelet::{Coord, Face, FaceColors, Slot};
use crate::moves::{Move, Turn};

/// A 3x3 signed permutation matrix, row-major.
pub type Matrix = [[i32; 3]; 3];

pub const IDENTITY: Matrix = [[1, 0, 0], [0, 1, 0], [0, 0, 1]];

/// Clockwise quarter turn of each face, as seen from outside that face.
///
/// Indexed in `Face` declaration order: U, D, F, B, L, R.
/// Counterclockwise turns use the transpose.
#[rustfmt::skip]
pub const CLOCKWISE: [Matrix; 6] = [
    // U: (x, y, z) -> (-z, y, x), front goes to left
    [[ 0, 0, -1], [0, 1, 0], [ 1, 0, 0]],
    // D: (x, y, z) -> (z, y, -x), front goes to right
    [[ 0, 0,  1], [0, 1, 0], [-1, 0, 0]],
    // F: (x, y, z) -> (-y, x, z), up goes to right
    [[ 0, -1, 0], [ 1, 0, 0], [0, 0, 1]],
    // B: (x, y, z) -> (y, -x, z), up goes to left
    [[ 0,  1, 0], [-1, 0, 0], [0, 0, 1]],
    // L: (x, y, z) -> (x, z, -y), front goes to down
    [[1, 0, 0], [0,  0, 1], [0, -1, 0]],
    // R: (x, y, z) -> (x, -z, y), front goes to up
    [[1, 0, 0], [0,  0, -1], [0, 1, 0]],
];

const fn face_index(face: Face) -> usize {
    match face {
        Face::U => 0,
        Face::D => 1,
        Face::F => 2,
        Face::B => 3,
        Face::L => 4,
        Face::R => 5,
    }
}

const fn transpose(matrix: Matrix) -> Matrix {
    let mut result = [[0; 3]; 3];
    let mut row = 0;
    while row < 3 {
        let mut col = 0;
        while col < 3 {
            result[row][col] = matrix[col][row];
            col += 1;
        }
        row += 1;
    }
    result
}

/// The rotation matrix applied by a move.
pub const fn matrix_for(mv: Move) -> Matrix {
    let clockwise = CLOCKWISE[face_index(mv.face)];
    match mv.turn {
        Turn::Clockwise => clockwise,
        Turn::CounterClockwise => transpose(clockwise),
    }
}

/// Matrix product `a * b`: applying the result is applying `b`, then `a`.
pub const fn multiply(a: &Matrix, b: &Matrix) -> Matrix {
    let mut result = [[0; 3]; 3];
    let mut row = 0;
    while row < 3 {
        let mut col = 0;
        while col < 3 {
            result[row][col] = a[row][0] * b[0][col] + a[row][1] * b[1][col] + a[row][2] * b[2][col];
            col += 1;
        }
        row += 1;
    }
    result
}

/// Multiplies a matrix by a coordinate column vector.
#[inline(always)]
pub const fn rotate(matrix: &Matrix, (x, y, z): Coord) -> Coord {
    (
        matrix[0][0] * x + matrix[0][1] * y + matrix[0][2] * z,
        matrix[1][0] * x + matrix[1][1] * y + matrix[1][2] * z,
        matrix[2][0] * x + matrix[2][1] * y + matrix[2][2] * z,
    )
}

/// Carries each sticker to the slot its normal points at after the rotation.
pub fn rotate_colors(matrix: &Matrix, colors: &FaceColors) -> FaceColors {
    let mut rotated = [None; 6];
    for slot in Slot::ALL {
        let target = Slot::towards(rotate(matrix, slot.normal()));
        rotated[target as usize] = colors[slot as usize];
    }
    rotated
}
