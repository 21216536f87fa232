//! Drag-to-orient view controller.
//!
//! Turns pointer drags into a yaw/elevation pair for an orbiting camera, and
//! keeps a whole-cube orientation that quarter-turns about the x, y and z
//! axes. Neither touches the puzzle; they only describe how it is looked at.

use crate::cubelet::{Coord, Face};
use crate::geometry::{matrix_for, multiply, rotate, Matrix, IDENTITY};
use crate::moves::Move;

const DEFAULT_SENSITIVITY: f32 = 0.5;
const DEFAULT_YAW: f32 = 45.0;
const DEFAULT_ELEVATION: f32 = 30.0;
const MAX_ELEVATION: f32 = 89.0;

/// View angles in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewAngles {
    /// Rotation about the vertical axis; 0 looks straight at the F face.
    pub yaw: f32,
    /// Height of the viewer above the horizon; positive shows the U face.
    pub elevation: f32,
}

/// Axis of a whole-cube view rotation, named as in cube notation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewAxis {
    /// Turns the whole cube like `R`.
    X,
    /// Turns the whole cube like `U`.
    Y,
    /// Turns the whole cube like `F`.
    Z,
}

impl ViewAxis {
    fn quarter_turn(self) -> Matrix {
        let face = match self {
            ViewAxis::X => Face::R,
            ViewAxis::Y => Face::U,
            ViewAxis::Z => Face::F,
        };
        matrix_for(Move::cw(face))
    }
}

#[derive(Clone, Copy, Debug)]
struct DragStart {
    pointer: (f32, f32),
    angles: ViewAngles,
}

#[derive(Clone, Debug)]
pub struct Orbit {
    angles: ViewAngles,
    initial: ViewAngles,
    sensitivity: f32,
    drag: Option<DragStart>,
    orientation: Matrix,
}

impl Default for Orbit {
    fn default() -> Self {
        Self::new(
            ViewAngles {
                yaw: DEFAULT_YAW,
                elevation: DEFAULT_ELEVATION,
            },
            DEFAULT_SENSITIVITY,
        )
    }
}

impl Orbit {
    /// Creates a controller starting at `initial`, moving `sensitivity`
    /// degrees per pixel dragged.
    pub fn new(initial: ViewAngles, sensitivity: f32) -> Self {
        let initial = ViewAngles {
            yaw: initial.yaw,
            elevation: initial.elevation.clamp(-MAX_ELEVATION, MAX_ELEVATION),
        };
        Self {
            angles: initial,
            initial,
            sensitivity,
            drag: None,
            orientation: IDENTITY,
        }
    }

    #[inline]
    pub fn angles(&self) -> ViewAngles {
        self.angles
    }

    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Captures the pointer origin and the angles at drag start.
    pub fn begin_drag(&mut self, x: f32, y: f32) {
        self.drag = Some(DragStart {
            pointer: (x, y),
            angles: self.angles,
        });
    }

    /// Updates the angles from the pointer's offset to the drag origin.
    ///
    /// Ignored when no drag is in progress.
    pub fn drag_to(&mut self, x: f32, y: f32) {
        let Some(start) = self.drag else {
            return;
        };
        let delta_x = x - start.pointer.0;
        let delta_y = y - start.pointer.1;

        self.angles.yaw = (start.angles.yaw - delta_x * self.sensitivity) % 360.0;
        self.angles.elevation = (start.angles.elevation + delta_y * self.sensitivity)
            .clamp(-MAX_ELEVATION, MAX_ELEVATION);
    }

    /// Freezes the current angles.
    pub fn end_drag(&mut self) {
        self.drag = None;
    }

    /// Whole-cube orientation applied on top of the orbit.
    #[inline]
    pub fn orientation(&self) -> &Matrix {
        &self.orientation
    }

    /// Quarter-turns the whole cube about `axis`.
    pub fn rotate_cube(&mut self, axis: ViewAxis) {
        self.orientation = multiply(&axis.quarter_turn(), &self.orientation);
    }

    /// Where a cubelet coordinate is drawn under the current orientation.
    #[inline]
    pub fn orient(&self, coord: Coord) -> Coord {
        rotate(&self.orientation, coord)
    }

    /// Restores the starting angles and orientation, and drops any drag.
    pub fn reset(&mut self) {
        self.angles = self.initial;
        self.orientation = IDENTITY;
        self.drag = None;
    }
}
