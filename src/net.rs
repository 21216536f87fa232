//! Text rendering of the unfolded cube.
//!
//! The net is laid out with U on top, the four side faces in the middle row
//! (L F R B) and D at the bottom. Every face is drawn as seen from outside the
//! cube: U with B at the top edge, the side faces with U at the top edge and
//! D with F at the top edge.

use crate::cube::Cube;
use crate::cubelet::{Coord, Face, Slot};

/// Placeholder for a sticker that could not be found.
const MISSING: char = '?';

/// Coordinate of the cubelet shown at `(row, col)` of a face, both in `0..3`.
fn facelet_coord(face: Face, row: i32, col: i32) -> Coord {
    let across = col - 1;
    let down = row - 1;
    match face {
        Face::U => (across, -1, down),
        Face::D => (across, 1, -down),
        Face::F => (across, down, 1),
        Face::B => (-across, down, -1),
        Face::L => (-1, down, across),
        Face::R => (1, down, -across),
    }
}

fn slot_for(face: Face) -> Slot {
    Slot::towards(face.normal())
}

/// The three sticker letters on one row of a face.
fn face_row(cube: &Cube, face: Face, row: i32) -> String {
    (0..3)
        .map(|col| {
            cube.cubelet_at(facelet_coord(face, row, col))
                .and_then(|cubelet| cubelet.color(slot_for(face)))
                .map_or(MISSING, |color| color.letter())
        })
        .collect()
}

/// Formats the cube as an unfolded net of color letters.
pub fn format_net(cube: &Cube) -> String {
    let mut output = String::new();
    let indent = " ".repeat(4);

    for row in 0..3 {
        output.push_str(&indent);
        output.push_str(&face_row(cube, Face::U, row));
        output.push('\n');
    }

    for row in 0..3 {
        let sides: Vec<String> = [Face::L, Face::F, Face::R, Face::B]
            .into_iter()
            .map(|face| face_row(cube, face, row))
            .collect();
        output.push_str(&sides.join(" "));
        output.push('\n');
    }

    for row in 0..3 {
        output.push_str(&indent);
        output.push_str(&face_row(cube, Face::D, row));
        output.push('\n');
    }

    output
}
