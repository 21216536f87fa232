//! Face turns and their notation.
//!
//! A move is a quarter turn of one face, clockwise as seen from outside the
//! cube (`U`) or counterclockwise (`U'`). Sequences may also use the double
//! turn shorthand `U2`, which expands into two clockwise quarter turns.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::cubelet::Face;

/// Turn direction, as seen looking at the face from outside the cube.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Turn {
    Clockwise,
    CounterClockwise,
}

impl Turn {
    pub fn reversed(self) -> Self {
        match self {
            Turn::Clockwise => Turn::CounterClockwise,
            Turn::CounterClockwise => Turn::Clockwise,
        }
    }
}

/// A quarter turn of one face.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub face: Face,
    pub turn: Turn,
}

impl Move {
    /// All 12 quarter turns: each face clockwise then counterclockwise.
    pub const ALL: [Move; 12] = [
        Move::cw(Face::U),
        Move::ccw(Face::U),
        Move::cw(Face::D),
        Move::ccw(Face::D),
        Move::cw(Face::F),
        Move::ccw(Face::F),
        Move::cw(Face::B),
        Move::ccw(Face::B),
        Move::cw(Face::L),
        Move::ccw(Face::L),
        Move::cw(Face::R),
        Move::ccw(Face::R),
    ];

    pub const fn cw(face: Face) -> Self {
        Self {
            face,
            turn: Turn::Clockwise,
        }
    }

    pub const fn ccw(face: Face) -> Self {
        Self {
            face,
            turn: Turn::CounterClockwise,
        }
    }

    /// The move that undoes this one.
    pub fn inverse(self) -> Self {
        Self {
            face: self.face,
            turn: self.turn.reversed(),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.turn {
            Turn::Clockwise => write!(f, "{}", self.face),
            Turn::CounterClockwise => write!(f, "{}'", self.face),
        }
    }
}

/// Errors produced while reading move notation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseMoveError {
    #[error("empty move")]
    Empty,
    #[error("unknown face '{0}', expected one of U D F B L R")]
    UnknownFace(char),
    #[error("invalid move suffix in '{0}', expected nothing, ' or 2")]
    InvalidSuffix(String),
}

impl FromStr for Move {
    type Err = ParseMoveError;

    /// Parses a single quarter turn such as `R` or `R'`.
    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match parse_token(token)? {
            (face, Suffix::None) => Ok(Move::cw(face)),
            (face, Suffix::Prime) => Ok(Move::ccw(face)),
            (_, Suffix::Double) => Err(ParseMoveError::InvalidSuffix(token.to_string())),
        }
    }
}

enum Suffix {
    None,
    Prime,
    Double,
}

fn parse_token(token: &str) -> Result<(Face, Suffix), ParseMoveError> {
    let mut chars = token.trim().chars();
    let letter = chars.next().ok_or(ParseMoveError::Empty)?;
    let face = Face::from_letter(letter).ok_or(ParseMoveError::UnknownFace(letter))?;

    let suffix = match chars.as_str() {
        "" => Suffix::None,
        "'" | "’" => Suffix::Prime,
        "2" => Suffix::Double,
        _ => return Err(ParseMoveError::InvalidSuffix(token.to_string())),
    };
    Ok((face, suffix))
}

/// Parses a whitespace-separated sequence such as `R U2 R' U'`.
///
/// Double turns expand into two clockwise quarter turns.
pub fn parse_sequence(sequence: &str) -> Result<Vec<Move>, ParseMoveError> {
    let mut moves = Vec::new();
    for token in sequence.split_whitespace() {
        match parse_token(token)? {
            (face, Suffix::None) => moves.push(Move::cw(face)),
            (face, Suffix::Prime) => moves.push(Move::ccw(face)),
            (face, Suffix::Double) => moves.extend([Move::cw(face), Move::cw(face)]),
        }
    }
    Ok(moves)
}

/// Formats a sequence back into notation, separated by single spaces.
pub fn format_sequence(moves: &[Move]) -> String {
    moves
        .iter()
        .map(Move::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// The sequence that undoes `moves`: reversed, with every move inverted.
pub fn invert_sequence(moves: &[Move]) -> Vec<Move> {
    moves.iter().rev().map(|mv| mv.inverse()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notation_roundtrip_for_all_moves() {
        for mv in Move::ALL {
            let text = mv.to_string();
            assert_eq!(text.parse::<Move>(), Ok(mv), "failed on {text}");
        }
    }

    #[test]
    fn test_inverse_flips_direction_only() {
        let mv = Move::cw(Face::F);
        assert_eq!(mv.inverse(), Move::ccw(Face::F));
        assert_eq!(mv.inverse().inverse(), mv);
    }

    #[test]
    fn test_parse_sequence_expands_double_turns() {
        let moves = parse_sequence("R U2 r'").unwrap();
        assert_eq!(
            moves,
            vec![
                Move::cw(Face::R),
                Move::cw(Face::U),
                Move::cw(Face::U),
                Move::ccw(Face::R),
            ]
        );
        assert_eq!(format_sequence(&moves), "R U U R'");
    }

    #[test]
    fn test_parse_rejects_bad_tokens() {
        assert_eq!("X".parse::<Move>(), Err(ParseMoveError::UnknownFace('X')));
        assert_eq!("".parse::<Move>(), Err(ParseMoveError::Empty));
        assert_eq!(
            "U3".parse::<Move>(),
            Err(ParseMoveError::InvalidSuffix("U3".to_string()))
        );
        // a double turn is not a single quarter turn
        assert!("U2".parse::<Move>().is_err());
        assert!(parse_sequence("R Q").is_err());
    }

    #[test]
    fn test_invert_sequence() {
        let moves = parse_sequence("R U F'").unwrap();
        assert_eq!(format_sequence(&invert_sequence(&moves)), "F U' R'");
        assert!(invert_sequence(&[]).is_empty());
    }
}
