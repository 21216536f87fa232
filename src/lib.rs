//! Cube Puzzle Library
//!
//! Provides the engine behind an interactive 3x3x3 twisty puzzle: face turns,
//! move history, inverse-replay solving, scrambling, a solve timer and a
//! drag-to-orient view controller. Rendering is left to whatever implements
//! [`RenderSurface`].

pub mod config;
pub mod controls;
pub mod cube;
pub mod cubelet;
pub mod engine;
pub mod geometry;
pub mod moves;
pub mod net;
pub mod orbit;
pub mod persistence;
pub mod scramble;
pub mod timer;

use cubelet::Cubelet;
use engine::Animation;

/// Read-only snapshot of the puzzle handed to a renderer.
#[derive(Clone, Copy, Debug)]
pub struct Frame<'a> {
    /// All 26 cubelets in a stable order.
    pub cubelets: &'a [Cubelet],
    /// The turn currently being tweened, if any.
    pub animation: Option<Animation>,
    /// Bumped after every state change; equal revisions mean equal cubelet
    /// state. Animation progress moves without a bump.
    pub revision: u64,
}

/// Something that can draw the puzzle.
///
/// Surfaces only ever see a borrowed [`Frame`], so they cannot change the
/// puzzle they draw.
pub trait RenderSurface {
    fn draw(&mut self, frame: &Frame<'_>);
}
