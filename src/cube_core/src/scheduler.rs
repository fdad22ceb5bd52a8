//! One-at-a-time draining of queued turns.
//!
//! All cube mutation happens on whatever thread calls [`Animator::tick`];
//! the single in-flight slot is the mutual-exclusion guard that keeps
//! turns strictly FIFO with at most one animating. A turn's visible
//! effect unfolds over the fixed duration, but logical state transitions
//! only twice: layer membership is fixed when the turn starts, and the
//! rotation plus snap land when it completes.

use std::{collections::VecDeque, time::Duration};

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    cube::CubeState,
    moves::Move,
    notation::notation,
    scramble::{self, History, ScramblePolicy},
    turning::{rotate_cubies, select_layer},
};

const DEFAULT_TURN_MS: u64 = 300;

/// Animation and scramble settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimatorConfig {
    /// Fixed duration of one turn, in milliseconds.
    pub turn_duration_ms: u64,
    pub scramble: ScramblePolicy,
}

impl Default for AnimatorConfig {
    fn default() -> Self {
        AnimatorConfig {
            turn_duration_ms: DEFAULT_TURN_MS,
            scramble: ScramblePolicy::default(),
        }
    }
}

impl AnimatorConfig {
    fn turn_duration(&self) -> Duration {
        Duration::from_millis(self.turn_duration_ms)
    }
}

/// A rejected command. Nothing changes when one of these comes back;
/// callers that want the silent-no-op behavior can discard the result.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CommandError {
    /// Turns are still queued or animating; wait for
    /// [`TurnEvent::QueueIdle`] and retry.
    #[error("turns are still queued or animating")]
    Busy,
    /// There is no recorded scramble to undo.
    #[error("nothing to solve: the scramble history is empty")]
    NothingToSolve,
}

/// What happened during an [`Animator::tick`], in order.
#[derive(Debug, Clone, PartialEq)]
pub enum TurnEvent {
    /// A turn was dequeued and started animating. Display collaborators
    /// log the precomputed notation.
    TurnStarted { mv: Move, notation: String },
    /// The turn's duration elapsed and the cube snapped to its new state.
    TurnFinished { mv: Move },
    /// A queued turn matched no cubies (possible only from a corrupted
    /// state); it was dropped as a completed no-op.
    LayerSkipped { mv: Move },
    /// The queue drained to empty with nothing left in flight. Emitted
    /// exactly once per busy period; collaborators re-enable controls on
    /// it.
    QueueIdle,
}

/// The turn currently animating, for collaborators that interpolate.
#[derive(Debug, Clone, Copy)]
pub struct ActiveTurn<'a> {
    pub mv: Move,
    /// Fraction of the fixed duration that has elapsed, in `[0, 1]`.
    pub progress: f32,
    /// Indices of the cubies that were in the layer when the turn
    /// started; membership stays fixed for the whole turn.
    pub cubies: &'a [usize],
}

struct InFlight {
    mv: Move,
    cubies: Vec<usize>,
    elapsed: Duration,
}

/// Owns the cube plus everything needed to animate it: the FIFO move
/// queue, the single in-flight slot, the scramble history, and the RNG.
pub struct Animator {
    cube: CubeState,
    queue: VecDeque<Move>,
    history: History,
    in_flight: Option<InFlight>,
    config: AnimatorConfig,
    rng: fastrand::Rng,
}

impl Animator {
    /// A solved `n`-cube with default settings.
    ///
    /// # Panics
    ///
    /// If `n` is outside [`crate::MIN_SIZE`]`..=`[`crate::MAX_SIZE`].
    #[must_use]
    pub fn new(n: usize) -> Animator {
        Animator::with_config(n, AnimatorConfig::default())
    }

    /// A solved `n`-cube with the given settings.
    ///
    /// # Panics
    ///
    /// If `n` is outside [`crate::MIN_SIZE`]`..=`[`crate::MAX_SIZE`].
    #[must_use]
    pub fn with_config(n: usize, config: AnimatorConfig) -> Animator {
        Animator {
            cube: CubeState::new(n),
            queue: VecDeque::new(),
            history: History::default(),
            in_flight: None,
            config,
            rng: fastrand::Rng::new(),
        }
    }

    /// Replace everything with a fresh solved `n`-cube: cubies, queue,
    /// history, and any in-flight turn.
    ///
    /// # Panics
    ///
    /// If `n` is outside [`crate::MIN_SIZE`]`..=`[`crate::MAX_SIZE`].
    pub fn create_cube(&mut self, n: usize) {
        self.cube = CubeState::new(n);
        self.queue.clear();
        self.history.clear();
        self.in_flight = None;
    }

    /// Make the next scrambles reproducible.
    pub fn reseed(&mut self, seed: u64) {
        self.rng = fastrand::Rng::with_seed(seed);
    }

    #[must_use]
    pub fn cube(&self) -> &CubeState {
        &self.cube
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.cube.size()
    }

    #[must_use]
    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    #[must_use]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Nothing queued and nothing animating.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.in_flight.is_none() && self.queue.is_empty()
    }

    /// The turn currently animating, if any.
    #[must_use]
    pub fn active_turn(&self) -> Option<ActiveTurn<'_>> {
        let duration = self.config.turn_duration();
        self.in_flight.as_ref().map(|in_flight| ActiveTurn {
            mv: in_flight.mv,
            progress: (in_flight.elapsed.as_secs_f32() / duration.as_secs_f32()).min(1.0),
            cubies: &in_flight.cubies,
        })
    }

    /// Generate a scramble, record it in the history, and queue it. The
    /// turns themselves play out over subsequent [`Animator::tick`]s.
    ///
    /// # Errors
    ///
    /// [`CommandError::Busy`] while a previous command is still draining.
    pub fn scramble(&mut self) -> Result<(), CommandError> {
        if !self.is_idle() {
            return Err(CommandError::Busy);
        }

        let moves = scramble::generate(self.cube.size(), &self.config.scramble, &mut self.rng);
        debug!(target: "animator", "scrambling with {} moves", moves.len());
        self.history.record(&moves);
        self.queue.extend(moves);
        Ok(())
    }

    /// Queue the exact inverse of the recorded scramble and clear the
    /// history. Replaying it returns the cube to its pre-scramble state;
    /// this is deliberately not a general cube solver.
    ///
    /// # Errors
    ///
    /// [`CommandError::Busy`] while a previous command is still draining;
    /// [`CommandError::NothingToSolve`] if the history is empty.
    pub fn solve(&mut self) -> Result<(), CommandError> {
        if !self.is_idle() {
            return Err(CommandError::Busy);
        }
        if self.history.is_empty() {
            return Err(CommandError::NothingToSolve);
        }

        let solution = self.history.take_solution();
        debug!(target: "animator", "solving with {} moves", solution.len());
        self.queue.extend(solution);
        Ok(())
    }

    /// Queue manual turns. They are not recorded in the scramble history,
    /// so [`Animator::solve`] cannot undo them.
    ///
    /// # Errors
    ///
    /// [`CommandError::Busy`] while a previous command is still draining.
    ///
    /// # Panics
    ///
    /// If any move's layer is outside the cube's grid.
    pub fn enqueue_moves(&mut self, moves: &[Move]) -> Result<(), CommandError> {
        if !self.is_idle() {
            return Err(CommandError::Busy);
        }
        for mv in moves {
            assert!(
                mv.layer() < self.cube.size(),
                "layer {} out of range for a {}-cube",
                mv.layer(),
                self.cube.size()
            );
        }

        self.queue.extend(moves.iter().copied());
        Ok(())
    }

    /// Advance the animation clock by `delta` and drain the queue.
    ///
    /// Returns what happened, in order. A tick that lands mid-turn
    /// returns nothing and mutates nothing; the rotation and snap land on
    /// the tick where the turn's fixed duration elapses, and the next
    /// turn starts in that same tick.
    pub fn tick(&mut self, delta: Duration) -> Vec<TurnEvent> {
        let was_busy = !self.is_idle();
        let turn_duration = self.config.turn_duration();
        let mut events = Vec::new();

        if let Some(in_flight) = &mut self.in_flight {
            in_flight.elapsed += delta;
            if in_flight.elapsed < turn_duration {
                return events;
            }

            let done = self.in_flight.take().expect("checked above");
            rotate_cubies(&mut self.cube, &done.cubies, done.mv.axis(), done.mv.angle());
            events.push(TurnEvent::TurnFinished { mv: done.mv });
        }

        self.drain(&mut events);

        if was_busy && self.is_idle() {
            events.push(TurnEvent::QueueIdle);
        }

        events
    }

    /// Dequeue until a turn starts animating or the queue empties. Layer
    /// membership is fixed here, at turn start.
    fn drain(&mut self, events: &mut Vec<TurnEvent>) {
        while self.in_flight.is_none() {
            let Some(mv) = self.queue.pop_front() else {
                break;
            };

            let cubies = select_layer(&self.cube, mv.axis(), mv.layer());
            if cubies.is_empty() {
                warn!(
                    target: "animator",
                    "no cubies in layer {} of {:?}; dropping the turn",
                    mv.layer(),
                    mv.axis(),
                );
                events.push(TurnEvent::LayerSkipped { mv });
                continue;
            }

            events.push(TurnEvent::TurnStarted {
                notation: notation(mv, self.cube.size()),
                mv,
            });
            self.in_flight = Some(InFlight {
                mv,
                cubies,
                elapsed: Duration::ZERO,
            });
        }
    }
}
