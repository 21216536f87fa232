//! Keyboard bindings.
//!
//! Face letters turn clockwise, and with Shift counterclockwise. Space toggles
//! the timer, `N` scrambles, `S` solves, `C` resets, `V` reveals home
//! positions and `X`, `Y`, `Z` quarter-turn the whole cube.

use crate::cubelet::Face;
use crate::moves::Move;
use crate::orbit::ViewAxis;

/// A key press, reduced to what the bindings care about.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyInput {
    Letter(char),
    Space,
}

/// Something the user asked the puzzle or the view to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Turn(Move),
    ToggleTimer,
    Shuffle,
    Solve,
    Reset,
    ToggleReveal,
    RotateCube(ViewAxis),
}

/// Maps a key press to its command, if it is bound.
pub fn command_for(key: KeyInput, shift: bool) -> Option<Command> {
    match key {
        KeyInput::Space => Some(Command::ToggleTimer),
        KeyInput::Letter(letter) => {
            if let Some(face) = Face::from_letter(letter) {
                let mv = if shift { Move::ccw(face) } else { Move::cw(face) };
                return Some(Command::Turn(mv));
            }
            match letter.to_ascii_uppercase() {
                'N' => Some(Command::Shuffle),
                'S' => Some(Command::Solve),
                'C' => Some(Command::Reset),
                'V' => Some(Command::ToggleReveal),
                'X' => Some(Command::RotateCube(ViewAxis::X)),
                'Y' => Some(Command::RotateCube(ViewAxis::Y)),
                'Z' => Some(Command::RotateCube(ViewAxis::Z)),
                _ => None,
            }
        }
    }
}
