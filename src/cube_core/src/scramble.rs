//! Random scramble generation and the exact-inverse history.

use serde::{Deserialize, Serialize};

use crate::moves::{Axis, Move};

/// Tunable scramble policy.
///
/// The defaults are the documented policy: the move count scales linearly
/// with the cube size (20 moves for a 3-cube, 36 for a 7-cube) and the
/// same axis is never picked twice in a row, which avoids the cheap
/// partial cancellations back-to-back same-axis turns produce.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScramblePolicy {
    /// Constant part of the move count.
    pub base_moves: usize,
    /// Per-layer part of the move count.
    pub moves_per_layer: usize,
    /// Reject a candidate axis equal to the previous move's axis.
    pub avoid_axis_repeat: bool,
}

impl Default for ScramblePolicy {
    fn default() -> Self {
        ScramblePolicy {
            base_moves: 8,
            moves_per_layer: 4,
            avoid_axis_repeat: true,
        }
    }
}

impl ScramblePolicy {
    /// Number of moves generated for an `n`-cube.
    #[must_use]
    pub fn move_count(&self, n: usize) -> usize {
        self.base_moves + self.moves_per_layer * n
    }
}

/// Generate a pseudo-random sequence of legal moves for an `n`-cube: axis
/// and layer uniform, angle a fair coin, axis repetition subject to the
/// policy.
pub fn generate(n: usize, policy: &ScramblePolicy, rng: &mut fastrand::Rng) -> Vec<Move> {
    let count = policy.move_count(n);
    let mut moves = Vec::with_capacity(count);
    let mut last_axis = None;

    for _ in 0..count {
        let axis = loop {
            let axis = Axis::ALL[rng.usize(..Axis::ALL.len())];
            if !(policy.avoid_axis_repeat && last_axis == Some(axis)) {
                break axis;
            }
        };
        last_axis = Some(axis);

        let layer = rng.usize(..n);
        moves.push(if rng.bool() {
            Move::positive(axis, layer)
        } else {
            Move::negative(axis, layer)
        });
    }

    moves
}

/// The move sequence needed to return the cube to its last solved state,
/// in the order it was issued.
#[derive(Debug, Clone, Default)]
pub struct History {
    moves: Vec<Move>,
}

impl History {
    /// Append scramble moves in issued order.
    pub fn record(&mut self, moves: &[Move]) {
        self.moves.extend_from_slice(moves);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Forget the recorded scramble without solving.
    pub fn clear(&mut self) {
        self.moves.clear();
    }

    /// The exact algebraic inverse of the recorded scramble: inverse moves
    /// in reverse order, so the last scramble move is turned back first.
    /// Consumes and clears the history.
    #[must_use]
    pub fn take_solution(&mut self) -> Vec<Move> {
        let solution = self.moves.iter().rev().map(|mv| mv.inverse()).collect();
        self.moves.clear();
        solution
    }
}
