//! Turn scheduling, move history and scripted playback.
//!
//! The engine owns the puzzle and serialises every turn through a two-state
//! gate: a turn can only start while the engine is [`Phase::Idle`], and it
//! holds the engine in [`Phase::Animating`] for the configured turn duration.
//! The layer transform itself is applied at once when the turn starts, so no
//! half-turned state is ever observable; the duration only paces the visual
//! tween and the playback of scrambles and solves.
//!
//! Nothing runs on its own. Time only moves when the host calls
//! [`Engine::advance`], which makes every scheduled continuation (the next
//! scramble or solve step) engine-owned state that [`Engine::reset`] can drop.

use std::collections::VecDeque;
use std::time::Duration;

use log::{debug, info};
use thiserror::Error;

use crate::cube::Cube;
use crate::moves::{Move, ParseMoveError};
use crate::timer::{format_time, Timer};
use crate::{Frame, RenderSurface};

/// Timing parameters for turns and playback.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineSettings {
    /// How long a user turn keeps the engine animating.
    pub turn_duration: Duration,
    /// How long each scramble or solve turn keeps the engine animating.
    pub playback_turn_duration: Duration,
    /// Pause between two consecutive playback turns.
    pub playback_pause: Duration,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            turn_duration: Duration::from_millis(200),
            playback_turn_duration: Duration::from_millis(90),
            playback_pause: Duration::from_millis(40),
        }
    }
}

/// Whether a turn is in flight.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Animating,
}

/// Scripted sequence currently being played back.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Activity {
    Scrambling,
    Solving,
}

/// The turn currently in flight, for renderers that tween it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Animation {
    pub mv: Move,
    /// Fraction of the turn duration elapsed, in `0.0..=1.0`.
    pub progress: f32,
}

/// Reasons a request was turned down. None of them change the puzzle.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("a turn is already in progress")]
    Busy,
    #[error("a scramble or solve is being played back")]
    PlaybackActive,
    #[error("invalid move: {0}")]
    InvalidMove(#[from] ParseMoveError),
}

#[derive(Clone, Debug)]
struct InFlight {
    mv: Move,
    duration: Duration,
    elapsed: Duration,
}

#[derive(Clone, Debug)]
enum Script {
    /// Moves still to play; each one is appended to history once applied.
    Scramble(VecDeque<Move>),
    /// Pops history and plays the inverse until history is empty.
    Solve,
}

#[derive(Clone, Debug)]
struct Playback {
    script: Script,
    /// Pause left before the next step may start.
    wait: Duration,
}

/// An interactive puzzle: cube state, history, timer and turn gate.
#[derive(Clone, Debug)]
pub struct Engine {
    cube: Cube,
    history: Vec<Move>,
    in_flight: Option<InFlight>,
    playback: Option<Playback>,
    timer: Timer,
    settings: EngineSettings,
    revision: u64,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineSettings::default())
    }
}

impl Engine {
    pub fn new(settings: EngineSettings) -> Self {
        Self::with_timer(settings, Timer::new())
    }

    /// Creates an engine around an existing timer, e.g. one seeded with a
    /// stored best time.
    pub fn with_timer(settings: EngineSettings, timer: Timer) -> Self {
        Self {
            cube: Cube::solved(),
            history: Vec::new(),
            in_flight: None,
            playback: None,
            timer,
            settings,
            revision: 0,
        }
    }

    #[inline]
    pub fn cube(&self) -> &Cube {
        &self.cube
    }

    /// Moves applied since the last reset, oldest first.
    #[inline]
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    #[inline]
    pub fn timer(&self) -> &Timer {
        &self.timer
    }

    #[inline]
    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Counter bumped after every state change a renderer should pick up.
    #[inline]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn phase(&self) -> Phase {
        if self.in_flight.is_some() {
            Phase::Animating
        } else {
            Phase::Idle
        }
    }

    pub fn activity(&self) -> Option<Activity> {
        self.playback.as_ref().map(|playback| match playback.script {
            Script::Scramble(_) => Activity::Scrambling,
            Script::Solve => Activity::Solving,
        })
    }

    pub fn animation(&self) -> Option<Animation> {
        self.in_flight.as_ref().map(|flight| Animation {
            mv: flight.mv,
            progress: if flight.duration.is_zero() {
                1.0
            } else {
                (flight.elapsed.as_secs_f32() / flight.duration.as_secs_f32()).min(1.0)
            },
        })
    }

    /// Snapshot handed to render surfaces.
    pub fn frame(&self) -> Frame<'_> {
        Frame {
            cubelets: self.cube.cubelets(),
            animation: self.animation(),
            revision: self.revision,
        }
    }

    /// Hands the current snapshot to a render surface.
    pub fn present<S: RenderSurface + ?Sized>(&self, surface: &mut S) {
        surface.draw(&self.frame());
    }

    fn check_ready(&self) -> Result<(), EngineError> {
        if self.playback.is_some() {
            return Err(EngineError::PlaybackActive);
        }
        if self.in_flight.is_some() {
            return Err(EngineError::Busy);
        }
        Ok(())
    }

    /// Starts a user turn and records it in history.
    ///
    /// If the timer is running and this turn solves the puzzle, the timer is
    /// stopped and the run counts towards the best time.
    pub fn turn(&mut self, mv: Move) -> Result<(), EngineError> {
        self.check_ready()?;
        self.begin(mv, self.settings.turn_duration);
        self.history.push(mv);
        debug!("turn {mv}, {} moves in history", self.history.len());

        if self.timer.is_running() && self.cube.is_solved() {
            self.timer.stop();
            info!("solved in {}", format_time(self.timer.elapsed()));
        }
        Ok(())
    }

    /// Parses a single move such as `F'` and starts it as a user turn.
    pub fn turn_notation(&mut self, notation: &str) -> Result<(), EngineError> {
        let mv = notation.parse::<Move>()?;
        self.turn(mv)
    }

    /// Resets to solved and plays `moves` back as a scramble.
    ///
    /// History is cleared first and then holds exactly the scramble moves that
    /// have been applied, so [`Engine::solve`] undoes the scramble.
    pub fn shuffle(&mut self, moves: Vec<Move>) -> Result<(), EngineError> {
        self.check_ready()?;
        self.restore_solved();
        self.timer.clear();
        info!("scrambling with {} moves", moves.len());

        self.playback = Some(Playback {
            script: Script::Scramble(moves.into()),
            wait: Duration::ZERO,
        });
        self.step_playback();
        Ok(())
    }

    /// Undoes history by playing the inverse of each move, newest first.
    ///
    /// With an empty history this does nothing. The timer is cancelled rather
    /// than stopped, so an automatic solve never sets a best time.
    pub fn solve(&mut self) -> Result<(), EngineError> {
        self.check_ready()?;
        if self.history.is_empty() {
            debug!("solve requested with empty history");
            return Ok(());
        }
        self.timer.cancel();
        info!("solving {} moves", self.history.len());

        self.playback = Some(Playback {
            script: Script::Solve,
            wait: Duration::ZERO,
        });
        self.step_playback();
        Ok(())
    }

    /// Returns to the solved state, dropping any in-flight turn or playback.
    pub fn reset(&mut self) {
        if self.playback.take().is_some() {
            debug!("reset cancelled playback");
        }
        self.in_flight = None;
        self.restore_solved();
        self.timer.clear();
    }

    /// Starts the timer if stopped, stops it otherwise.
    ///
    /// Returns `true` when stopping set a new best time. Refused while a
    /// scramble or solve is playing, so scripted turns never count as a run.
    pub fn toggle_timer(&mut self) -> Result<bool, EngineError> {
        if self.playback.is_some() {
            return Err(EngineError::PlaybackActive);
        }
        let is_record = self.timer.toggle();
        self.revision += 1;
        Ok(is_record)
    }

    /// Moves engine time forward: finishes turns, starts due playback steps
    /// and feeds the timer.
    pub fn advance(&mut self, dt: Duration) {
        self.timer.advance(dt);

        let mut remaining = dt;
        loop {
            if let Some(flight) = &mut self.in_flight {
                let left = flight.duration.saturating_sub(flight.elapsed);
                if remaining < left {
                    flight.elapsed += remaining;
                    return;
                }
                remaining -= left;
                self.finish_turn();
                continue;
            }

            let Some(playback) = &mut self.playback else {
                return;
            };
            if remaining < playback.wait {
                playback.wait -= remaining;
                return;
            }
            remaining -= playback.wait;
            playback.wait = Duration::ZERO;
            if !self.step_playback() {
                return;
            }
        }
    }

    fn begin(&mut self, mv: Move, duration: Duration) {
        self.cube.apply(mv);
        self.in_flight = Some(InFlight {
            mv,
            duration,
            elapsed: Duration::ZERO,
        });
        self.revision += 1;
    }

    fn finish_turn(&mut self) {
        self.in_flight = None;
        self.revision += 1;

        let has_next = match &self.playback {
            Some(Playback {
                script: Script::Scramble(queue),
                ..
            }) => !queue.is_empty(),
            Some(Playback {
                script: Script::Solve,
                ..
            }) => !self.history.is_empty(),
            None => return,
        };

        if has_next {
            if let Some(playback) = &mut self.playback {
                playback.wait = self.settings.playback_pause;
            }
        } else {
            self.finish_playback();
        }
    }

    /// Starts the next scripted turn. Returns `false` once the script is done.
    fn step_playback(&mut self) -> bool {
        let next = match self.playback.as_mut().map(|playback| &mut playback.script) {
            Some(Script::Scramble(queue)) => queue.pop_front().map(|mv| (mv, true)),
            Some(Script::Solve) => self.history.pop().map(|mv| (mv.inverse(), false)),
            None => return false,
        };

        let Some((mv, record)) = next else {
            self.finish_playback();
            return false;
        };
        self.begin(mv, self.settings.playback_turn_duration);
        if record {
            self.history.push(mv);
        }
        true
    }

    fn finish_playback(&mut self) {
        match self.playback.take().map(|playback| playback.script) {
            Some(Script::Scramble(_)) => info!("scramble finished"),
            Some(Script::Solve) => info!("solve finished, solved = {}", self.cube.is_solved()),
            None => {}
        }
        self.revision += 1;
    }

    fn restore_solved(&mut self) {
        self.cube = Cube::solved();
        self.history.clear();
        self.revision += 1;
    }
}
