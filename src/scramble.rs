//! Random scramble generation.

use rand::seq::IndexedRandom;
use rand::Rng;

use crate::moves::Move;

/// Scramble length used when none is configured.
pub const DEFAULT_SCRAMBLE_LENGTH: usize = 20;

/// Generates `length` random quarter turns.
///
/// Two consecutive moves never share a face: `U U'` would cancel and `U U`
/// is just a half turn, both of which waste scramble length.
pub fn scramble<R: Rng + ?Sized>(rng: &mut R, length: usize) -> Vec<Move> {
    let mut moves: Vec<Move> = Vec::with_capacity(length);
    while moves.len() < length {
        let last_face = moves.last().map(|mv| mv.face);
        let candidates: Vec<Move> = Move::ALL
            .into_iter()
            .filter(|mv| Some(mv.face) != last_face)
            .collect();
        if let Some(&mv) = candidates.choose(rng) {
            moves.push(mv);
        }
    }
    moves
}
